use embedded_graphics_core::pixelcolor::raw::RawU16;
use embedded_graphics_core::pixelcolor::{Rgb565, Rgb888, RgbColor};
use embedded_graphics_core::prelude::RawData;

/// Packed RGB565 value as the controller expects it: red in bits 15-11,
/// green in 10-5, blue in 4-0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color565(u16);

impl Color565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);

    /// Scale 8-bit channels down to 5/6/5 bits with truncating division.
    pub const fn quantize(r: u8, g: u8, b: u8) -> Self {
        let red = (r as u16 * 31) / 255;
        let green = (g as u16 * 63) / 255;
        let blue = (b as u16 * 31) / 255;
        Self((red << 11) | (green << 5) | blue)
    }

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn into_inner(self) -> u16 {
        self.0
    }

    /// High byte first, the order the panel latches pixel data in.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// Free-function form of [`Color565::quantize`].
pub const fn quantize(r: u8, g: u8, b: u8) -> u16 {
    Color565::quantize(r, g, b).into_inner()
}

impl From<Rgb888> for Color565 {
    fn from(color: Rgb888) -> Self {
        Self::quantize(color.r(), color.g(), color.b())
    }
}

impl From<Color565> for Rgb565 {
    fn from(color: Color565) -> Self {
        RawU16::new(color.into_inner()).into()
    }
}

impl From<Rgb565> for Color565 {
    fn from(color: Rgb565) -> Self {
        Self(RawU16::from(color).into_inner())
    }
}
