//! Display backends: the capability trait, the physical-panel sink, and the
//! file-preview sink.

pub mod backend;
pub mod epd;
#[cfg(feature = "hardware")]
pub mod hardware;
pub mod preview;
