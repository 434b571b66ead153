use nalgebra::Vector4;

use crate::interpolate::Interpolate;

use super::{Dimensions, ScreenVertex};

/// A vertex in clip-space, after the model-view and projection transforms
/// but before the perspective divide.
#[derive(Debug, Clone)]
pub struct ClipVertex<K> {
    /// Homogeneous clip-space position. Clipping against the `±w` bounds is
    /// well-defined here for all depths.
    pub position: Vector4<f32>,
    /// Per-vertex data carried through clipping and rasterization, such as
    /// color, texture coordinates and normals.
    pub attributes: K,
}

impl<K: Interpolate> Interpolate for ClipVertex<K> {
    #[inline]
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
        ClipVertex {
            position: Interpolate::barycentric_interpolate(u, &x1.position, v, &x2.position, w, &x3.position),
            attributes: Interpolate::barycentric_interpolate(u, &x1.attributes, v, &x2.attributes, w, &x3.attributes),
        }
    }

    #[inline]
    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
        ClipVertex {
            position: Interpolate::linear_interpolate(t, &x1.position, &x2.position),
            attributes: Interpolate::linear_interpolate(t, &x1.attributes, &x2.attributes),
        }
    }
}

impl<K> ClipVertex<K> {
    #[inline(always)]
    pub fn new(position: Vector4<f32>, attributes: K) -> ClipVertex<K> {
        ClipVertex { position, attributes }
    }

    /// Performs the perspective divide and maps the normalized device
    /// coordinates to screen-space using the given viewport.
    ///
    /// This assumes a viewport in the shape of:
    ///
    /// ```text
    /// 0,0-----------------x
    ///  |                  |
    ///  |                  |
    ///  y-----------------x,y
    /// ```
    ///
    /// where the y-axis is flipped.
    ///
    /// The resulting position stores the NDC depth in `z`, which is what the
    /// depth test compares directly, and `1/w` in `w` for perspective-correct
    /// interpolation.
    pub fn normalize(self, viewport: Dimensions) -> ScreenVertex<K> {
        let width = viewport.width as f32;
        let height = viewport.height as f32;

        let p = self.position;

        ScreenVertex {
            position: Vector4::new(
                (1.0 + p.x / p.w) * width / 2.0,
                (1.0 - p.y / p.w) * height / 2.0,
                p.z / p.w,
                1.0 / p.w,
            ),
            attributes: self.attributes,
        }
    }
}
