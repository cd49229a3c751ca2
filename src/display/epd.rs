//! Physical-panel backend over an opaque device driver.
//!
//! The bit-level controller protocol lives behind [`EpdDevice`]; this module
//! only sequences the vendor lifecycle: init → clear once at startup, push →
//! sleep on every present, explicit power-down on the way out.

use crate::core::errors::Result;
use crate::display::backend::DisplayBackend;
use crate::render::frame::Frame;

/// Opaque e-paper device lifecycle, mirroring the vendor driver surface.
pub trait EpdDevice {
    /// Power up and program the controller.
    fn init(&mut self) -> Result<()>;
    /// Blank the panel to a known all-white state.
    fn clear(&mut self) -> Result<()>;
    /// Convert and transfer one frame to the panel.
    fn display(&mut self, frame: &Frame) -> Result<()>;
    /// Drop into the low-power retention state between refreshes.
    fn sleep(&mut self) -> Result<()>;
    /// Full power-down/exit sequence. Required before process exit.
    fn power_off(&mut self) -> Result<()>;
}

/// Real backend: acquire once, release on every exit path.
pub struct EpdBackend<D: EpdDevice> {
    device: D,
    powered_off: bool,
}

impl<D: EpdDevice> EpdBackend<D> {
    /// Acquire the panel: init, then clear to blank.
    pub fn new(mut device: D) -> Result<Self> {
        device.init()?;
        device.clear()?;
        Ok(Self {
            device,
            powered_off: false,
        })
    }

    /// Access the underlying device (test inspection).
    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: EpdDevice> DisplayBackend for EpdBackend<D> {
    fn present(&mut self, frame: Frame) -> Result<()> {
        self.device.display(&frame)?;
        // Bistable panel holds the image unpowered; park it immediately.
        self.device.sleep()
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.powered_off {
            return Ok(());
        }
        self.powered_off = true;
        self.device.power_off()
    }
}
