//! Interpolation utilities

use nalgebra::{Vector2, Vector3, Vector4};

/// Describes a type that can be interpolated with barycentric coordinates.
///
/// This is required for any rasterization to occur, and for the clipper to
/// synthesize vertices at plane intersections.
pub trait Interpolate {
    /// Interpolate the three values with their corresponding barycentric coordinate weight
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self;

    /// Simple linear interpolation
    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self;
}

impl Interpolate for f32 {
    #[inline(always)]
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
        u * x1 + v * x2 + w * x3
    }

    #[inline(always)]
    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
        (1.0 - t) * x1 + t * x2
    }
}

macro_rules! impl_vector_interpolate {
    ($($t:ty),+) => {
        $(
            impl Interpolate for $t {
                #[inline]
                fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
                    x1 * u + x2 * v + x3 * w
                }

                #[inline]
                fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
                    x1 * (1.0 - t) + x2 * t
                }
            }
        )+
    }
}

impl_vector_interpolate!(Vector2<f32>, Vector3<f32>, Vector4<f32>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycentric_weights_sum_to_value() {
        let x = Vector3::new(1.0, 2.0, 3.0);
        let r = Interpolate::barycentric_interpolate(0.25, &x, 0.25, &x, 0.5, &x);
        assert!((r - x).norm() < 1e-6);
    }

    #[test]
    fn linear_endpoints() {
        let a = Vector2::new(0.0, 4.0);
        let b = Vector2::new(2.0, 0.0);
        assert_eq!(Vector2::linear_interpolate(0.0, &a, &b), a);
        assert_eq!(Vector2::linear_interpolate(1.0, &a, &b), b);
        assert_eq!(Vector2::linear_interpolate(0.5, &a, &b), Vector2::new(1.0, 2.0));
    }
}
