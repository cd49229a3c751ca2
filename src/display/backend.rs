//! The backend capability trait and one-shot backend selection.

use crate::core::config::{BackendMode, Config};
use crate::core::errors::Result;
use crate::display::preview::PreviewBackend;
use crate::render::frame::Frame;

/// Sink for rendered frames. Two concrete implementations: the physical
/// panel and the file preview. Selected once at startup by dependency
/// injection; never reconsidered mid-run.
pub trait DisplayBackend {
    /// Push one rendered frame out. Takes the frame by value; a fresh one
    /// is built every cycle.
    fn present(&mut self, frame: Frame) -> Result<()>;

    /// Release the output device. Must be safe to call more than once and
    /// must run before process exit when the physical panel is active —
    /// skipping it leaves the panel in an undefined state.
    fn shutdown(&mut self) -> Result<()>;
}

/// Build the backend for the resolved mode.
///
/// Real mode requires the `hardware` feature; without it the build has no
/// panel driver and selection fails rather than silently previewing.
pub fn select_backend(mode: BackendMode, config: &Config) -> Result<Box<dyn DisplayBackend>> {
    match mode {
        BackendMode::Mock => Ok(Box::new(PreviewBackend::new(config.preview.clone()))),
        BackendMode::Real => real_backend(config),
    }
}

#[cfg(feature = "hardware")]
fn real_backend(_config: &Config) -> Result<Box<dyn DisplayBackend>> {
    use crate::display::epd::EpdBackend;
    use crate::display::hardware::WaveshareEpd;

    let device = WaveshareEpd::open()?;
    Ok(Box::new(EpdBackend::new(device)?))
}

#[cfg(not(feature = "hardware"))]
fn real_backend(_config: &Config) -> Result<Box<dyn DisplayBackend>> {
    Err(crate::core::errors::PstError::UnsupportedPlatform {
        details: "real backend selected but the hardware feature is not compiled in".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;

    #[test]
    fn mock_mode_selects_preview_backend() {
        let config = Config::default();
        let backend = select_backend(BackendMode::Mock, &config);
        assert!(backend.is_ok());
    }

    #[cfg(not(feature = "hardware"))]
    #[test]
    fn real_mode_without_hardware_feature_fails() {
        let config = Config::default();
        let err = select_backend(BackendMode::Real, &config)
            .err()
            .expect("real mode should fail without hardware");
        assert_eq!(err.code(), "PST-1101");
    }
}
