//! RGB color values

use crate::interpolate::Interpolate;

/// RGB color with `f32` components, nominally in the `[0, 1]` range.
///
/// The alpha channel of the fixed-function pipeline is unused, so it is not stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    #[inline(always)]
    pub fn new(r: f32, g: f32, b: f32) -> Color {
        Color { r, g, b }
    }

    /// Component-wise multiplication, used for texture modulation.
    #[inline]
    pub fn modulate(self, other: Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
        }
    }

    /// Converts components to `u8`, clamping to `[0, 1]` first.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        fn component(x: f32) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        [component(self.r), component(self.g), component(self.b)]
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Color {
        Color {
            r: bytes[0] as f32 / 255.0,
            g: bytes[1] as f32 / 255.0,
            b: bytes[2] as f32 / 255.0,
        }
    }
}

impl Interpolate for Color {
    #[inline]
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
        Color {
            r: u * x1.r + v * x2.r + w * x3.r,
            g: u * x1.g + v * x2.g + w * x3.g,
            b: u * x1.b + v * x2.b + w * x3.b,
        }
    }

    #[inline]
    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
        Color {
            r: (1.0 - t) * x1.r + t * x2.r,
            g: (1.0 - t) * x1.g + t * x2.g,
            b: (1.0 - t) * x1.b + t * x2.b,
        }
    }
}
