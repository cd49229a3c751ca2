//! Single-pass orchestration: collect → layout → render → present, with
//! graceful backend teardown on every exit path.
//!
//! Uses the `signal-hook` crate for safe interrupt registration. The
//! pipeline polls the flag between stages rather than blocking on signals.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::{SIGINT, SIGTERM};

use crate::core::config::{BackendMode, Config};
use crate::core::errors::Result;
use crate::display::backend::{self, DisplayBackend};
use crate::render::{frame, layout};
use crate::telemetry::collector::{Collector, reported_hostname};

/// Outcome of one pipeline pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A frame was rendered and handed to the backend.
    Presented,
    /// An interrupt arrived; no (further) frame was presented.
    Interrupted,
}

/// Thread-safe interrupt state shared between the signal handler and the
/// pipeline. Flags use `Ordering::Relaxed` because the pipeline polls
/// between stages and exact ordering with other atomics is not required.
#[derive(Clone)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    /// Create a flag and register OS signal hooks (SIGINT/SIGTERM).
    ///
    /// Registration is best-effort; failures are logged to stderr but not
    /// fatal.
    pub fn new() -> Self {
        let flag = Self::unregistered();
        for signal in [SIGINT, SIGTERM] {
            if let Err(e) = signal_hook::flag::register(signal, Arc::clone(&flag.raised)) {
                eprintln!("[PST-SIGNAL] failed to register signal {signal}: {e}");
            }
        }
        flag
    }

    /// A flag with no OS hooks (tests drive it programmatically).
    #[must_use]
    pub fn unregistered() -> Self {
        Self {
            raised: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an interrupt has been requested.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
    }

    /// Programmatically request interruption.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Relaxed);
    }
}

impl Default for InterruptFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the backend mode from the reported host name, then run one pass.
pub fn run_once(config: &Config) -> Result<RunOutcome> {
    let host = reported_hostname()?;
    run_with_mode(BackendMode::resolve(&host, &config.device), config)
}

/// Run one pass with an explicit mode (the `--mock` override path).
///
/// The backend is acquired once and shut down on every exit path — fatal
/// error, interrupt, or normal completion alike.
pub fn run_with_mode(mode: BackendMode, config: &Config) -> Result<RunOutcome> {
    let interrupt = InterruptFlag::new();
    let collector = Collector::new(mode, config);
    let mut backend = backend::select_backend(mode, config)?;

    let outcome = drive(&collector, backend.as_mut(), &interrupt);
    let teardown = backend.shutdown();
    settle(outcome, teardown)
}

/// Reconcile the pipeline outcome with the teardown result. The pipeline
/// error takes precedence; a teardown failure alongside it is logged, not
/// swallowed.
fn settle(outcome: Result<RunOutcome>, teardown: Result<()>) -> Result<RunOutcome> {
    match (outcome, teardown) {
        (Ok(outcome), Ok(())) => Ok(outcome),
        (Ok(_), Err(teardown_err)) => Err(teardown_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(teardown_err)) => {
            eprintln!("[PST-DISPLAY] backend teardown also failed: {teardown_err}");
            Err(err)
        }
    }
}

/// The linear pipeline, polled against the interrupt flag between stages.
///
/// Fatal errors abort before any present; no partial frame reaches the
/// backend.
pub fn drive(
    collector: &Collector,
    backend: &mut dyn DisplayBackend,
    interrupt: &InterruptFlag,
) -> Result<RunOutcome> {
    if interrupt.is_raised() {
        return Ok(RunOutcome::Interrupted);
    }
    // A terminal interrupt lands on the whole foreground process group, so a
    // live telemetry command dies of the same signal before the next poll.
    // The raised flag wins over that induced failure.
    let readings = match collector.collect() {
        Ok(readings) => readings,
        Err(_) if interrupt.is_raised() => return Ok(RunOutcome::Interrupted),
        Err(err) => return Err(err),
    };

    if interrupt.is_raised() {
        return Ok(RunOutcome::Interrupted);
    }
    let fields = layout::build_layout(&readings);
    let canvas = frame::render(&fields);

    if interrupt.is_raised() {
        return Ok(RunOutcome::Interrupted);
    }
    backend.present(canvas)?;
    Ok(RunOutcome::Presented)
}
