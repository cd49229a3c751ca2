//! File-preview backend: frame → grayscale PNG on disk, plus a best-effort
//! refresh of an external viewer process.

use std::process::Command;
use std::thread;
use std::time::Duration;

use image::GrayImage;

use crate::core::config::PreviewConfig;
use crate::core::errors::{PstError, Result};
use crate::display::backend::DisplayBackend;
use crate::render::frame::{self, Frame};

/// Mock backend for panel-less machines.
pub struct PreviewBackend {
    config: PreviewConfig,
}

impl PreviewBackend {
    #[must_use]
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// Kill any prior viewer and open a fresh one on the preview file.
    ///
    /// Entirely best-effort: spawn failures are logged, never fatal, and the
    /// children are fire-and-forget — exit status is not awaited. The short
    /// delay lets the prior viewer actually exit before the next launch.
    fn refresh_viewer(&self) {
        let delay = Duration::from_millis(self.config.step_delay_ms);

        if !self.config.viewer_kill.trim().is_empty() {
            thread::sleep(delay);
            spawn_detached(&self.config.viewer_kill);
        }
        if !self.config.viewer_open.trim().is_empty() {
            thread::sleep(delay);
            spawn_detached(&format!(
                "{} {}",
                self.config.viewer_open,
                self.config.image_path.display()
            ));
        }
    }
}

impl DisplayBackend for PreviewBackend {
    fn present(&mut self, frame: Frame) -> Result<()> {
        let raster = GrayImage::from_raw(frame::WIDTH, frame::HEIGHT, frame.into_raw())
            .ok_or_else(|| PstError::Runtime {
                details: "frame buffer size does not match canvas dimensions".to_string(),
            })?;
        raster
            .save(&self.config.image_path)
            .map_err(|err| PstError::Runtime {
                details: format!(
                    "failed to write preview image {}: {err}",
                    self.config.image_path.display()
                ),
            })?;

        self.refresh_viewer();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        // Nothing to release; the preview file stays behind on purpose.
        Ok(())
    }
}

fn spawn_detached(command: &str) {
    match Command::new("sh").arg("-c").arg(command).spawn() {
        Ok(_child) => {}
        Err(err) => {
            eprintln!("[PST-PREVIEW] viewer command failed to spawn ({command}): {err}");
        }
    }
}
