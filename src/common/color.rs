use image::{Luma, Rgb, Rgba};

// Color
//------------------------------------------------------------------------------

/// 32-bit ARGB color, alpha in the most significant byte.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Brightness of the color channels, alpha ignored
    pub fn luma(self) -> u8 {
        luma(self.r(), self.g(), self.b())
    }
}

impl From<Rgba<u8>> for Color {
    fn from(p: Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Self::from_argb(a, r, g, b)
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r(), c.g(), c.b(), c.a()])
    }
}

impl From<Color> for Rgb<u8> {
    fn from(c: Color) -> Self {
        Rgb([c.r(), c.g(), c.b()])
    }
}

impl From<Color> for Luma<u8> {
    fn from(c: Color) -> Self {
        Luma([c.luma()])
    }
}

// Luma
// Fixed point Y = 0.299 R + 0.587 G + 0.114 B, scaled by 2^16. Coefficients sum to 65536
// so pure white maps to 255.
//------------------------------------------------------------------------------

const COEF_R: u32 = 19562;
const COEF_G: u32 = 38550;
const COEF_B: u32 = 7424;

pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 16) as u8
}
