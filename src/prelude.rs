//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use paperstat::prelude::*;
//! ```

// Core
pub use crate::core::config::{BackendMode, Config};
pub use crate::core::errors::{PstError, Result};

// Telemetry
pub use crate::telemetry::collector::{Collector, Readings, reported_hostname};
pub use crate::telemetry::source::{SourceSet, TextSource};

// Render
pub use crate::render::frame::{Frame, render};
pub use crate::render::layout::{Field, FontClass, build_layout};

// Display
pub use crate::display::backend::{DisplayBackend, select_backend};
pub use crate::display::epd::{EpdBackend, EpdDevice};
pub use crate::display::preview::PreviewBackend;

// Runner
pub use crate::runner::{InterruptFlag, RunOutcome, run_once, run_with_mode};
