//! Telemetry pipeline: raw-text sources, fixed-pattern parsers, and the
//! per-cycle collector.

pub mod collector;
pub mod parsers;
pub mod source;
