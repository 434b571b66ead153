//! Pipeline render state and transform composition

use std::sync::Arc;

use nalgebra::{Matrix4, Point3, Unit, Vector2, Vector3};

use crate::color::Color;
use crate::geometry::Dimensions;
use crate::pipeline::Attributes;
use crate::texture::Texture;

/// All mutable state the immediate-mode API operates on: the current
/// transforms, the attribute "pens" snapshotted into each submitted vertex,
/// the bound texture and the viewport.
///
/// Owned by one [`Pipeline`](crate::pipeline::Pipeline) instance rather than
/// living in globals, so the "current state governs the next vertex"
/// semantics carry no hidden coupling.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub model_view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub color: Color,
    pub tex_coord: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub texture: Option<Arc<Texture>>,
    pub viewport: Dimensions,
}

impl RenderState {
    pub fn new(viewport: Dimensions) -> RenderState {
        RenderState {
            model_view: Matrix4::identity(),
            projection: Matrix4::identity(),
            color: Color::WHITE,
            tex_coord: Vector2::zeros(),
            normal: Vector3::zeros(),
            texture: None,
            viewport,
        }
    }

    /// Resets both the model-view and projection matrices to the identity.
    pub fn load_identity(&mut self) {
        self.model_view = Matrix4::identity();
        self.projection = Matrix4::identity();
    }

    /// Right-multiplies a translation onto the model-view matrix, so the
    /// call composes in issue order and nests inside all prior transforms.
    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) {
        self.model_view *= Matrix4::new_translation(&Vector3::new(tx, ty, tz));
    }

    /// Right-multiplies a rotation of `angle` degrees about the given axis
    /// onto the model-view matrix.
    ///
    /// A zero-length axis makes this a no-op.
    pub fn rotate(&mut self, angle: f32, axis_x: f32, axis_y: f32, axis_z: f32) {
        if let Some(axis) = Unit::try_new(Vector3::new(axis_x, axis_y, axis_z), 1.0e-12) {
            self.model_view *= Matrix4::from_axis_angle(&axis, angle.to_radians());
        }
    }

    /// Right-multiplies a non-uniform scale onto the model-view matrix.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.model_view *= Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
    }

    /// Right-multiplies a perspective projection built from the six
    /// frustum clip planes onto the projection matrix.
    #[rustfmt::skip]
    pub fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        let frustum = Matrix4::new(
            2.0 * near / (right - left), 0.0, (right + left) / (right - left), 0.0,
            0.0, 2.0 * near / (top - bottom), (top + bottom) / (top - bottom), 0.0,
            0.0, 0.0, -(far + near) / (far - near), -2.0 * far * near / (far - near),
            0.0, 0.0, -1.0, 0.0,
        );

        self.projection *= frustum;
    }

    /// Right-multiplies a viewing transform onto the model-view matrix,
    /// looking from `eye` towards `center` with the given up direction.
    #[rustfmt::skip]
    pub fn look_at(&mut self, eye: Point3<f32>, center: Point3<f32>, up: Vector3<f32>) {
        let forward = (center - eye).normalize();
        let right = forward.cross(&up).normalize();
        let true_up = right.cross(&forward);

        let basis = Matrix4::new(
            right.x, right.y, right.z, 0.0,
            true_up.x, true_up.y, true_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        self.model_view *= basis * Matrix4::new_translation(&(-eye.coords));
    }

    /// Sets or clears the bound texture. `None` renders untextured.
    pub fn bind_texture(&mut self, texture: Option<Arc<Texture>>) {
        self.texture = texture;
    }

    /// Snapshots the current attribute pens for a submitted vertex. Later
    /// pen changes never retroactively alter the snapshot.
    #[inline]
    pub fn snapshot(&self) -> Attributes {
        Attributes {
            color: self.color,
            uv: self.tex_coord,
            normal: self.normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector4;

    use super::*;

    fn transform(state: &RenderState, x: f32, y: f32, z: f32) -> Vector4<f32> {
        state.model_view * Vector4::new(x, y, z, 1.0)
    }

    #[test]
    fn transforms_compose_in_issue_order() {
        let mut state = RenderState::new(Dimensions::new(16, 16));

        // Translate then scale: the scale happens inside the translated
        // frame, so the origin maps to the translation alone.
        state.translate(1.0, 0.0, 0.0);
        state.scale(2.0, 2.0, 2.0);

        let origin = transform(&state, 0.0, 0.0, 0.0);
        assert!((origin.x - 1.0).abs() < 1e-6);

        let unit = transform(&state, 1.0, 0.0, 0.0);
        assert!((unit.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn rotate_uses_degrees() {
        let mut state = RenderState::new(Dimensions::new(16, 16));
        state.rotate(90.0, 0.0, 0.0, 1.0);

        let p = transform(&state, 1.0, 0.0, 0.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotate_about_zero_axis_is_noop() {
        let mut state = RenderState::new(Dimensions::new(16, 16));
        state.rotate(45.0, 0.0, 0.0, 0.0);
        assert_eq!(state.model_view, Matrix4::identity());
    }

    #[test]
    fn frustum_maps_near_plane_corners() {
        let mut state = RenderState::new(Dimensions::new(16, 16));
        state.frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);

        // The near top-right frustum corner lands on clip (w, w, -w).
        let corner = state.projection * Vector4::new(1.0, 1.0, -1.0, 1.0);
        assert!((corner.x - corner.w).abs() < 1e-5);
        assert!((corner.y - corner.w).abs() < 1e-5);
        assert!((corner.z + corner.w).abs() < 1e-5);
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let mut state = RenderState::new(Dimensions::new(16, 16));
        let eye = Point3::new(0.0, 0.0, 2.0);
        state.look_at(eye, Point3::origin(), Vector3::y());

        let p = transform(&state, 0.0, 0.0, 2.0);
        assert!(p.xyz().norm() < 1e-6);

        // The focus ends up on the negative z axis in eye space.
        let focus = transform(&state, 0.0, 0.0, 0.0);
        assert!((focus.z + 2.0).abs() < 1e-6);
    }

    #[test]
    fn load_identity_resets_both_matrices() {
        let mut state = RenderState::new(Dimensions::new(16, 16));
        state.translate(1.0, 2.0, 3.0);
        state.frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);

        state.load_identity();

        assert_eq!(state.model_view, Matrix4::identity());
        assert_eq!(state.projection, Matrix4::identity());
    }
}
