//! Pixel surfaces and the depth buffer

use crate::color::Color;
use crate::geometry::{Coordinate, Dimensions, HasDimensions};

/// A real pixel surface the compositor writes accepted fragments to.
///
/// The host window layer supplies (or wraps) one of these; the pipeline
/// never blocks on it. Coordinates passed to `set` are always in bounds.
pub trait PixelSurface: HasDimensions {
    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Color);

    /// Write a single pixel.
    fn set(&mut self, coord: Coordinate, color: Color);
}

/// Minimalist in-memory RGB color buffer.
pub struct Framebuffer {
    dimensions: Dimensions,
    color: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Framebuffer {
        Framebuffer::new_with(width, height, Color::BLACK)
    }

    pub fn new_with(width: u32, height: u32, color: Color) -> Framebuffer {
        let dimensions = Dimensions::new(width, height);

        Framebuffer {
            dimensions,
            color: vec![color; dimensions.area()],
        }
    }

    #[inline]
    pub fn pixel(&self, coord: Coordinate) -> Color {
        self.color[coord.into_index(self.dimensions)]
    }

    /// Flattens the buffer into row-major RGB byte triplets for blitting.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.color.len() * 3);

        for color in &self.color {
            bytes.extend_from_slice(&color.to_bytes());
        }

        bytes
    }
}

impl HasDimensions for Framebuffer {
    #[inline]
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl PixelSurface for Framebuffer {
    fn clear(&mut self, color: Color) {
        for pixel in &mut self.color {
            *pixel = color;
        }
    }

    #[inline]
    fn set(&mut self, coord: Coordinate, color: Color) {
        let index = coord.into_index(self.dimensions);
        self.color[index] = color;
    }
}

const GRID_COLOR: Color = Color { r: 0.15, g: 0.15, b: 0.15 };

/// Maps a grid of "virtual pixels" onto an inner surface at an integer scale
/// factor, with an optional debug grid drawn at virtual-pixel boundaries.
///
/// Every coordinate the pipeline sees is in virtual-pixel units; only this
/// adapter knows the real resolution.
pub struct ScaledSurface<S: PixelSurface> {
    inner: S,
    scale: u32,
    pub grid_visible: bool,
}

impl<S: PixelSurface> ScaledSurface<S> {
    /// Wraps `inner`, scaling by `scale` real pixels per virtual pixel.
    /// The factor is clamped to `1..=40`.
    pub fn new(inner: S, scale: u32) -> ScaledSurface<S> {
        ScaledSurface {
            inner,
            scale: scale.clamp(1, 40),
            grid_visible: false,
        }
    }

    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale.clamp(1, 40);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn draw_grid(&mut self) {
        let real = self.inner.dimensions();
        let virt = self.dimensions();

        for x in 0..=virt.width {
            let rx = x * self.scale;
            if rx >= real.width {
                break;
            }
            for ry in 0..real.height {
                self.inner.set(Coordinate::new(rx, ry), GRID_COLOR);
            }
        }

        for y in 0..=virt.height {
            let ry = y * self.scale;
            if ry >= real.height {
                break;
            }
            for rx in 0..real.width {
                self.inner.set(Coordinate::new(rx, ry), GRID_COLOR);
            }
        }
    }
}

impl<S: PixelSurface> HasDimensions for ScaledSurface<S> {
    #[inline]
    fn dimensions(&self) -> Dimensions {
        let inner = self.inner.dimensions();
        Dimensions::new(inner.width / self.scale, inner.height / self.scale)
    }
}

impl<S: PixelSurface> PixelSurface for ScaledSurface<S> {
    fn clear(&mut self, color: Color) {
        self.inner.clear(color);

        if self.grid_visible && self.scale > 1 {
            self.draw_grid();
        }
    }

    fn set(&mut self, coord: Coordinate, color: Color) {
        let real = self.inner.dimensions();

        for dy in 0..self.scale {
            for dx in 0..self.scale {
                let rx = coord.x * self.scale + dx;
                let ry = coord.y * self.scale + dy;

                if rx < real.width && ry < real.height {
                    self.inner.set(Coordinate::new(rx, ry), color);
                }
            }
        }
    }
}

/// One depth value per pixel of the current viewport.
///
/// The allocation is grow-only: shrinking the viewport leaves the capacity
/// in place, and `clear` only touches the logical extent, so stale values
/// beyond it can never leak into a later, larger frame (the next `reshape`
/// to a larger size reallocates fresh).
pub struct DepthBuffer {
    dimensions: Dimensions,
    data: Vec<f32>,
}

/// Cleared depth value; every fragment depth compares `<=` against it.
pub const DEPTH_CLEAR: f32 = f32::MAX;

impl DepthBuffer {
    pub fn new(dimensions: Dimensions) -> DepthBuffer {
        DepthBuffer {
            dimensions,
            data: vec![DEPTH_CLEAR; dimensions.area() * 4],
        }
    }

    /// Resizes the logical extent, reallocating only when it outgrows the
    /// current capacity.
    pub fn reshape(&mut self, dimensions: Dimensions) {
        let area = dimensions.area();

        if area > self.data.len() {
            self.data = vec![DEPTH_CLEAR; area * 4];
        }

        self.dimensions = dimensions;
    }

    /// Resets every depth value in the logical extent to the clear sentinel.
    pub fn clear(&mut self) {
        for depth in &mut self.data[..self.dimensions.area()] {
            *depth = DEPTH_CLEAR;
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Depth test with less-or-equal acceptance: an equal-depth fragment
    /// submitted later overrides the earlier one. On acceptance the stored
    /// depth is updated.
    #[inline]
    pub fn test_and_set(&mut self, coord: Coordinate, depth: f32) -> bool {
        let index = coord.into_index(self.dimensions);
        let stored = &mut self.data[index];

        if depth <= *stored {
            *stored = depth;
            true
        } else {
            false
        }
    }
}

impl HasDimensions for DepthBuffer {
    #[inline]
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}
