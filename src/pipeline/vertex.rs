use nalgebra::{Point3, Vector2, Vector3};

use crate::color::Color;
use crate::interpolate::Interpolate;

/// The per-vertex data snapshotted from the attribute pens when a vertex is
/// submitted, and carried through clipping and rasterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attributes {
    pub color: Color,
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
}

impl Interpolate for Attributes {
    #[inline]
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
        Attributes {
            color: Interpolate::barycentric_interpolate(u, &x1.color, v, &x2.color, w, &x3.color),
            uv: Interpolate::barycentric_interpolate(u, &x1.uv, v, &x2.uv, w, &x3.uv),
            normal: Interpolate::barycentric_interpolate(u, &x1.normal, v, &x2.normal, w, &x3.normal),
        }
    }

    #[inline]
    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
        Attributes {
            color: Interpolate::linear_interpolate(t, &x1.color, &x2.color),
            uv: Interpolate::linear_interpolate(t, &x1.uv, &x2.uv),
            normal: Interpolate::linear_interpolate(t, &x1.normal, &x2.normal),
        }
    }
}

/// An object-space vertex buffered between `begin()` and `end()`.
#[derive(Debug, Clone)]
pub(crate) struct Vertex {
    pub position: Point3<f32>,
    pub attributes: Attributes,
}
