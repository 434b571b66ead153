use nalgebra::Vector4;

use crate::interpolate::Interpolate;

/// A vertex in screen-space, produced from a [`ClipVertex`](super::ClipVertex)
/// by the perspective divide and viewport mapping.
///
/// `position.x` and `position.y` are pixel coordinates, `position.z` is the
/// NDC depth compared by the depth test, and `position.w` holds `1/w` of the
/// original clip-space vertex for perspective-correct interpolation.
#[derive(Debug, Clone)]
pub struct ScreenVertex<K> {
    pub position: Vector4<f32>,
    pub attributes: K,
}

impl<K: Interpolate> Interpolate for ScreenVertex<K> {
    #[inline]
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
        ScreenVertex {
            position: Interpolate::barycentric_interpolate(u, &x1.position, v, &x2.position, w, &x3.position),
            attributes: Interpolate::barycentric_interpolate(u, &x1.attributes, v, &x2.attributes, w, &x3.attributes),
        }
    }

    #[inline]
    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
        ScreenVertex {
            position: Interpolate::linear_interpolate(t, &x1.position, &x2.position),
            attributes: Interpolate::linear_interpolate(t, &x1.attributes, &x2.attributes),
        }
    }
}
