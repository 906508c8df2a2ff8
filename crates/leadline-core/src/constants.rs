//! Default tuning parameters.
//!
//! These seed `EngineConfig::default()`. Live values always come from the
//! configuration snapshot handed to the engine, never from these constants.

// --- Scheduling ---

/// Default rate of the state/prediction pass (Hz).
pub const STATE_TICK_HZ: f64 = 60.0;

/// Default rate of the beam redraw pass (Hz).
pub const BEAM_TICK_HZ: f64 = 60.0;

/// Slowest accepted pass rate (Hz): one pass every 100 s.
pub const MIN_TICK_HZ: f64 = 0.01;

/// Fastest accepted pass rate (Hz).
pub const MAX_TICK_HZ: f64 = 10_000.0;

/// How long a beam keeps reporting a hit after the last one (milliseconds).
pub const HIT_HOLD_MS: u64 = 100;

// --- Prediction ---

/// Lead distance for the short-horizon aim point, in ticks of velocity.
pub const LEAD_DISTANCE: f64 = 36.0;

/// Number of points in the multi-step future path.
pub const MULTI_STEP_COUNT: usize = 50;

/// Step size of the multi-step extrapolation (ticks).
pub const PREDICTION_DT: f64 = 0.1;

// --- Beam ---

/// Tolerance radius around the aim point used by the hit test (world units).
pub const CIRCLE_RADIUS: f64 = 10.0;

/// Default beam length (world units).
pub const BEAM_LENGTH: f64 = 1000.0;

/// Selectable beam lengths.
pub const BEAM_LENGTH_PRESETS: [f64; 5] = [800.0, 1000.0, 1200.0, 1400.0, 2000.0];

// --- Filtering ---

/// Per-axis process noise added to the error covariance each predict step.
pub const PROCESS_NOISE: f64 = 0.01;

/// Per-axis observation noise.
pub const OBSERVATION_NOISE: f64 = 0.01;

/// Exponential smoothing factor for the display position.
pub const SMOOTHING_FACTOR: f64 = 0.7;

/// Upper bound accepted for `smoothing_factor` (values above 1 overshoot).
pub const SMOOTHING_FACTOR_MAX: f64 = 2.0;

/// Velocity correction gain for the closed-loop velocity model.
pub const VELOCITY_GAIN: f64 = 0.1;

// --- Track lifecycle ---

/// Ticks a track may go unobserved before it is evicted (~2 s at 60 Hz).
pub const EVICTION_TICKS: u64 = 120;

/// Observations with any coordinate beyond this magnitude are rejected.
pub const WORLD_BOUND: f64 = 1.0e6;
