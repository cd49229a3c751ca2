//! Waveshare 2.13" V2 panel binding: SPI + sysfs GPIO behind the
//! [`EpdDevice`] trait. Only compiled with the `hardware` feature.

#![allow(missing_docs)]

use epd_waveshare::epd2in13_v2::Epd2in13;
use epd_waveshare::prelude::WaveshareDisplay;
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::sysfs_gpio::Direction;
use linux_embedded_hal::{Delay, Pin, Spidev};

use crate::core::errors::{PstError, Result};
use crate::display::epd::EpdDevice;
use crate::render::frame::{self, Frame};

const SPI_DEV: &str = "/dev/spidev0.0";
const GPIO_CS: u64 = 8;
const GPIO_RST: u64 = 17;
const GPIO_BUSY: u64 = 24;
const GPIO_DC: u64 = 25;

// Panel RAM geometry: 122 columns padded to whole bytes, 250 rows.
const BYTES_PER_ROW: usize = 16;
const PANEL_HEIGHT: usize = 250;

/// The physical 2.13" panel on the Raspberry Pi HAT header.
pub struct WaveshareEpd {
    spi: Spidev,
    delay: Delay,
    epd: Epd2in13<Spidev, Pin, Pin, Pin, Pin>,
}

impl WaveshareEpd {
    /// Open SPI and GPIO lines and program the controller.
    pub fn open() -> Result<Self> {
        let mut spi =
            Spidev::open(SPI_DEV).map_err(|err| device_err("spi open", &err))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(4_000_000)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options)
            .map_err(|err| device_err("spi configure", &err))?;

        let cs = output_pin(GPIO_CS)?;
        let busy = input_pin(GPIO_BUSY)?;
        let dc = output_pin(GPIO_DC)?;
        let rst = output_pin(GPIO_RST)?;

        let mut delay = Delay {};
        let epd = Epd2in13::new(&mut spi, cs, busy, dc, rst, &mut delay)
            .map_err(|err| device_err("controller init", &err))?;

        Ok(Self { spi, delay, epd })
    }
}

impl EpdDevice for WaveshareEpd {
    fn init(&mut self) -> Result<()> {
        self.epd
            .wake_up(&mut self.spi, &mut self.delay)
            .map_err(|err| device_err("init", &err))
    }

    fn clear(&mut self) -> Result<()> {
        self.epd
            .clear_frame(&mut self.spi)
            .map_err(|err| device_err("clear", &err))
    }

    fn display(&mut self, frame: &Frame) -> Result<()> {
        let buffer = pack_panel_buffer(frame);
        self.epd
            .update_frame(&mut self.spi, &buffer)
            .map_err(|err| device_err("update", &err))?;
        self.epd
            .display_frame(&mut self.spi)
            .map_err(|err| device_err("display", &err))
    }

    fn sleep(&mut self) -> Result<()> {
        self.epd
            .sleep(&mut self.spi)
            .map_err(|err| device_err("sleep", &err))
    }

    fn power_off(&mut self) -> Result<()> {
        // Deep sleep is the panel's parked state; the bistable image holds
        // without power and the controller stops driving the source lines.
        self.epd
            .sleep(&mut self.spi)
            .map_err(|err| device_err("power off", &err))
    }
}

/// Rotate the landscape frame into the panel's portrait RAM layout:
/// 1 bit per pixel, MSB-first within each row byte, 1 = white.
fn pack_panel_buffer(frame: &Frame) -> Vec<u8> {
    let mut buffer = vec![0xFF_u8; BYTES_PER_ROW * PANEL_HEIGHT];
    for y in 0..frame::HEIGHT {
        for x in 0..frame::WIDTH {
            if !frame.is_ink(x, y) {
                continue;
            }
            let panel_x = y as usize;
            let panel_y = (frame::WIDTH - 1 - x) as usize;
            let byte = panel_y * BYTES_PER_ROW + panel_x / 8;
            buffer[byte] &= !(0x80 >> (panel_x % 8));
        }
    }
    buffer
}

fn output_pin(number: u64) -> Result<Pin> {
    let pin = Pin::new(number);
    pin.export()
        .and_then(|()| pin.set_direction(Direction::Out))
        .map_err(|err| device_err("gpio setup", &err))?;
    Ok(pin)
}

fn input_pin(number: u64) -> Result<Pin> {
    let pin = Pin::new(number);
    pin.export()
        .and_then(|()| pin.set_direction(Direction::In))
        .map_err(|err| device_err("gpio setup", &err))?;
    Ok(pin)
}

fn device_err(stage: &'static str, err: &dyn std::fmt::Display) -> PstError {
    PstError::Device {
        stage,
        details: err.to_string(),
    }
}
