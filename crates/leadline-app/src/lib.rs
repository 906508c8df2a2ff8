//! Leadline host runtime.
//!
//! Runs the aim engine on two scheduled threads over a synthetic world and
//! hands tick reports and beam frames back to the caller.

pub mod latch;
pub mod scheduler;
pub mod state;

pub use leadline_core as core;
pub use leadline_sim as sim;
