//! The 250×122 monochrome canvas and the single-pass text renderer.
//!
//! The frame stores one byte per pixel (255 = paper, 0 = ink) so the mock
//! backend can hand the buffer straight to a grayscale PNG encoder; the
//! real backend packs it to the panel's 1-bit format on its side of the
//! trait.

use core::convert::Infallible;

use embedded_graphics::Drawable;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X13, FONT_10X20};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Baseline, Text};

use crate::render::layout::{Field, FontClass};

/// Canvas width in pixels.
pub const WIDTH: u32 = 250;
/// Canvas height in pixels.
pub const HEIGHT: u32 = 122;

/// Byte value of an unset (paper) pixel.
pub const PAPER: u8 = 255;
/// Byte value of a set (ink) pixel.
pub const INK: u8 = 0;

/// A freshly-allocated monochrome raster, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<u8>,
}

impl Frame {
    /// All-paper canvas.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pixels: vec![PAPER; (WIDTH * HEIGHT) as usize],
        }
    }

    /// Raw row-major buffer, `WIDTH * HEIGHT` bytes.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume into the raw buffer (for the PNG encoder).
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Whether the pixel at (x, y) carries ink. Out of bounds reads as paper.
    #[must_use]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pixels[(y * WIDTH + x) as usize] == INK
    }

    /// Count of ink pixels inside the given rectangle (clipped to canvas).
    #[must_use]
    pub fn ink_in_rect(&self, x: u32, y: u32, w: u32, h: u32) -> usize {
        let mut count = 0;
        for py in y..(y + h).min(HEIGHT) {
            for px in x..(x + w).min(WIDTH) {
                if self.is_ink(px, py) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for embedded_graphics::Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            self.pixels[(y * WIDTH + x) as usize] = if color.is_on() { INK } else { PAPER };
        }
        Ok(())
    }
}

fn style_for(font_class: FontClass) -> MonoTextStyle<'static, BinaryColor> {
    match font_class {
        FontClass::Large => MonoTextStyle::new(&FONT_10X20, BinaryColor::On),
        FontClass::Small => MonoTextStyle::new(&FONT_6X13, BinaryColor::On),
    }
}

/// Draw each field's formatted text at its exact (x, y) origin, in layout
/// order. No wrapping, no collision detection.
#[must_use]
pub fn render(fields: &[Field]) -> Frame {
    let mut frame = Frame::new();
    for field in fields {
        let text = field.formatted();
        let (x, y) = field.position;
        let style = style_for(field.font_class);
        // Error type is Infallible; the target clips out-of-bounds pixels.
        let _ = Text::with_baseline(&text, Point::new(x, y), style, Baseline::Top).draw(&mut frame);
    }
    frame
}
