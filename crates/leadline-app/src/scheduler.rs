//! Loop threads: the state task and the beam task.
//!
//! Both run at fixed rates taken from the active configuration and share one
//! `Arc<Mutex<Session>>`. Commands reach the state task over `mpsc` and are
//! applied before its next pass. Outputs go back to the host over a second
//! channel; a dropped receiver is not an error.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use leadline_core::state::{BeamFrame, TickReport};

use crate::state::{LoopCommand, Session};

/// Something a loop produced for the host.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    Tick(TickReport),
    Beam(BeamFrame),
}

/// Fixed-rate sleeper. Drops the backlog when more than two periods behind
/// instead of running passes back to back.
#[derive(Debug)]
pub struct Pacer {
    period: Duration,
    next: Instant,
}

impl Pacer {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period, next: now }
    }

    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    /// Advance the schedule by one period. Returns how long to sleep.
    pub fn advance(&mut self, now: Instant) -> Duration {
        self.next += self.period;
        if self.next > now {
            self.next - now
        } else {
            if now - self.next > self.period * 2 {
                // Too far behind: reset rather than spiral.
                self.next = now;
            }
            Duration::ZERO
        }
    }

    pub fn wait(&mut self) {
        let sleep = self.advance(Instant::now());
        if !sleep.is_zero() {
            std::thread::sleep(sleep);
        }
    }
}

/// Handle to the running loops. Dropping it stops and joins them.
pub struct LoopHandle {
    commands: mpsc::Sender<LoopCommand>,
    threads: Vec<JoinHandle<()>>,
}

impl LoopHandle {
    /// Queue a command for the state task.
    pub fn send(&self, command: LoopCommand) -> Result<(), mpsc::SendError<LoopCommand>> {
        self.commands.send(command)
    }

    /// Stop both loops and wait for them to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.commands.send(LoopCommand::Shutdown);
        for thread in self.threads.drain(..) {
            let _ = thread.join();
        }
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn the state and beam loops over `session`.
pub fn spawn_loops(
    session: Arc<Mutex<Session>>,
    output: mpsc::Sender<Output>,
) -> io::Result<LoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let running = Arc::new(AtomicBool::new(true));

    let state = {
        let session = Arc::clone(&session);
        let running = Arc::clone(&running);
        let output = output.clone();
        std::thread::Builder::new()
            .name("leadline-state".into())
            .spawn(move || {
                run_state_loop(&session, &cmd_rx, &output);
                running.store(false, Ordering::Release);
            })?
    };

    let beam = std::thread::Builder::new()
        .name("leadline-beam".into())
        .spawn(move || run_beam_loop(&session, &running, &output))?;

    Ok(LoopHandle {
        commands: cmd_tx,
        threads: vec![state, beam],
    })
}

/// Drain pending commands. Returns false once the loop should stop.
fn drain_commands(rx: &mpsc::Receiver<LoopCommand>, session: &Mutex<Session>) -> bool {
    loop {
        match rx.try_recv() {
            Ok(LoopCommand::ApplyConfig(config)) => {
                let Ok(mut session) = session.lock() else {
                    return false;
                };
                if session.apply_config(config).is_ok() {
                    info!("config applied");
                }
            }
            Ok(LoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

fn run_state_loop(
    session: &Mutex<Session>,
    cmd_rx: &mpsc::Receiver<LoopCommand>,
    output: &mpsc::Sender<Output>,
) {
    let Some(period) = read_period(session, |s| s.engine.config().state_period()) else {
        return;
    };
    let mut pacer = Pacer::new(period, Instant::now());
    info!(?period, "state loop started");

    while drain_commands(cmd_rx, session) {
        let report = {
            let Ok(mut session) = session.lock() else {
                warn!("session lock poisoned, state loop exiting");
                break;
            };
            pacer.set_period(session.engine.config().state_period());
            session.state_pass(Instant::now())
        };

        if let Some(report) = report {
            let _ = output.send(Output::Tick(report));
        }
        pacer.wait();
    }

    info!("state loop stopped");
}

fn run_beam_loop(session: &Mutex<Session>, running: &AtomicBool, output: &mpsc::Sender<Output>) {
    let Some(period) = read_period(session, |s| s.engine.config().beam_period()) else {
        return;
    };
    let mut pacer = Pacer::new(period, Instant::now());
    info!(?period, "beam loop started");

    while running.load(Ordering::Acquire) {
        let frame = {
            let Ok(session) = session.lock() else {
                warn!("session lock poisoned, beam loop exiting");
                break;
            };
            pacer.set_period(session.engine.config().beam_period());
            session.beam_pass(Instant::now())
        };

        if let Some(frame) = frame {
            let _ = output.send(Output::Beam(frame));
        }
        pacer.wait();
    }

    info!("beam loop stopped");
}

fn read_period(session: &Mutex<Session>, f: impl FnOnce(&Session) -> Duration) -> Option<Duration> {
    session.lock().ok().map(|s| f(&s))
}
