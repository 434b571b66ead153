//! Depth test and compositing

use log::warn;
use nalgebra::Vector2;

use crate::color::Color;
use crate::framebuffer::{DepthBuffer, PixelSurface};
use crate::geometry::{Coordinate, Dimensions};
use crate::texture::Texture;

/// Borrowed pipeline outputs for rasterizing one primitive: the surface,
/// the depth buffer and the texture bound at submission time.
pub(crate) struct FragmentContext<'a, S: PixelSurface> {
    pub surface: &'a mut S,
    pub depth: &'a mut DepthBuffer,
    pub viewport: Dimensions,
    pub texture: Option<&'a Texture>,
}

impl<S: PixelSurface> FragmentContext<'_, S> {
    /// Depth-tests one candidate fragment and, if accepted, commits its
    /// depth and final color.
    ///
    /// The final color is the interpolated vertex color, modulated by the
    /// texture sample at `uv` when a texture is bound. An off-screen
    /// fragment is reported and dropped without aborting the frame.
    pub fn composite(&mut self, x: i64, y: i64, depth: f32, color: Color, uv: Vector2<f32>) {
        if x < 0 || y < 0 || x >= self.viewport.width as i64 || y >= self.viewport.height as i64 {
            warn!("attempting to set a pixel that is off-screen: {x}, {y}");
            return;
        }

        let coord = Coordinate::new(x as u32, y as u32);

        if !self.surface.in_bounds(coord) {
            return;
        }

        if !self.depth.test_and_set(coord, depth) {
            return;
        }

        let output = match self.texture {
            Some(texture) => color.modulate(texture.sample(uv.x, uv.y)),
            None => color,
        };

        self.surface.set(coord, output);
    }
}
