//! Texture storage and nearest-pixel sampling

use std::path::Path;

use crate::color::Color;
use crate::error::RenderResult;
use crate::geometry::{Dimensions, HasDimensions};

/// An immutable RGB raster sampled during compositing.
///
/// Textures are shared through the [`ResourceCache`](crate::cache::ResourceCache)
/// and live for the whole process once loaded.
#[derive(Debug, Clone)]
pub struct Texture {
    dimensions: Dimensions,
    /// Row-major RGB byte triplets.
    data: Vec<u8>,
}

impl Texture {
    /// Decodes an image file (PPM or PNG) into a texture.
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Texture> {
        let image = image::open(path.as_ref())?.into_rgb8();

        Ok(Texture {
            dimensions: Dimensions::new(image.width(), image.height()),
            data: image.into_raw(),
        })
    }

    /// Builds a texture from raw row-major RGB bytes. Mostly useful in tests.
    pub fn from_rgb_bytes(width: u32, height: u32, data: Vec<u8>) -> Texture {
        let dimensions = Dimensions::new(width, height);
        assert_eq!(data.len(), dimensions.area() * 3);

        Texture { dimensions, data }
    }

    /// Looks up the color at the given UV coordinates.
    ///
    /// `u` and `v` are clamped to `[0, 1]` and index the nearest pixel at
    /// `floor(u * (width - 1)), floor(v * (height - 1))`; no filtering.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = (u * (self.dimensions.width - 1) as f32) as usize;
        let y = (v * (self.dimensions.height - 1) as f32) as usize;

        let offset = 3 * (y * self.dimensions.width as usize + x);
        let p = &self.data[offset..offset + 3];

        Color::from_bytes([p[0], p[1], p[2]])
    }
}

impl HasDimensions for Texture {
    #[inline]
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}
