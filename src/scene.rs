//! Named scene registry
//!
//! A host application registers each drawable demo under a name, then routes
//! per-frame draw calls (and user-driven scene switching) through the
//! registry instead of hard-wiring one scene into its event loop.

use log::{debug, warn};
use nalgebra::{Point3, Vector3};

use crate::framebuffer::PixelSurface;
use crate::pipeline::Pipeline;

/// The camera a scene wants when it becomes current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInit {
    pub position: Point3<f32>,
    pub focus: Point3<f32>,
    /// `true` selects a perspective projection; `false` leaves the
    /// projection at the identity, rendering orthographically.
    pub perspective: bool,
}

impl Default for CameraInit {
    fn default() -> Self {
        CameraInit {
            position: Point3::new(0.0, 0.0, 2.0),
            focus: Point3::origin(),
            perspective: false,
        }
    }
}

/// One drawable scene.
///
/// Closures `FnMut(&mut Pipeline<S>)` implement this directly, so simple
/// scenes need no struct of their own.
pub trait Scene<S: PixelSurface> {
    /// The camera to install when this scene becomes current.
    fn camera(&self) -> CameraInit {
        CameraInit::default()
    }

    /// Draws one frame. The transforms arrive loaded with the scene's
    /// camera; the scene composes its model transforms on top.
    fn draw(&mut self, gl: &mut Pipeline<S>);
}

impl<S: PixelSurface, F: FnMut(&mut Pipeline<S>)> Scene<S> for F {
    fn draw(&mut self, gl: &mut Pipeline<S>) {
        self(gl)
    }
}

/// An ordered collection of named scenes with one current selection.
///
/// Registration order is cycling order. An empty registry is legal and
/// draws nothing.
pub struct SceneRegistry<S: PixelSurface> {
    scenes: Vec<(String, Box<dyn Scene<S>>)>,
    current: usize,
}

impl<S: PixelSurface> SceneRegistry<S> {
    pub fn new() -> SceneRegistry<S> {
        SceneRegistry {
            scenes: Vec::new(),
            current: 0,
        }
    }

    /// Registers `scene` under `name`. A repeated name replaces the earlier
    /// scene in place, keeping its position in the cycling order.
    pub fn register<N: Into<String>>(&mut self, name: N, scene: Box<dyn Scene<S>>) {
        let name = name.into();

        if let Some(entry) = self.scenes.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = scene;
        } else {
            self.scenes.push((name, scene));
        }
    }

    /// Makes the scene registered under `name` current. Returns `false`
    /// (leaving the selection untouched) when no such scene exists.
    pub fn select(&mut self, name: &str) -> bool {
        match self.scenes.iter().position(|(n, _)| n == name) {
            Some(index) => {
                self.current = index;
                debug!("selected scene {:?}", name);
                true
            }
            None => {
                warn!("no scene registered under {:?}", name);
                false
            }
        }
    }

    /// Advances to the next scene in registration order, wrapping around.
    pub fn cycle(&mut self) {
        if !self.scenes.is_empty() {
            self.current = (self.current + 1) % self.scenes.len();
        }
    }

    pub fn current_name(&self) -> Option<&str> {
        self.scenes.get(self.current).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Draws one frame of the current scene: resets the transforms, installs
    /// the scene's camera and hands the pipeline to the scene. Does nothing
    /// when the registry is empty.
    pub fn draw_current(&mut self, gl: &mut Pipeline<S>) {
        let (_, scene) = match self.scenes.get_mut(self.current) {
            Some(entry) => entry,
            None => return,
        };

        let camera = scene.camera();

        gl.load_identity();

        if camera.perspective {
            gl.frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 100.0);
        }

        gl.look_at(camera.position, camera.focus, Vector3::y());

        scene.draw(gl);
    }
}

impl<S: PixelSurface> Default for SceneRegistry<S> {
    fn default() -> Self {
        SceneRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::framebuffer::Framebuffer;
    use crate::pipeline::Topology;

    fn registry() -> (SceneRegistry<Framebuffer>, Pipeline<Framebuffer>) {
        (SceneRegistry::new(), Pipeline::new(Framebuffer::new(8, 8)))
    }

    #[test]
    fn cycling_wraps_in_registration_order() {
        let (mut scenes, _) = registry();

        scenes.register("first", Box::new(|_: &mut Pipeline<Framebuffer>| {}));
        scenes.register("second", Box::new(|_: &mut Pipeline<Framebuffer>| {}));

        assert_eq!(scenes.current_name(), Some("first"));
        scenes.cycle();
        assert_eq!(scenes.current_name(), Some("second"));
        scenes.cycle();
        assert_eq!(scenes.current_name(), Some("first"));
    }

    #[test]
    fn select_unknown_scene_keeps_selection() {
        let (mut scenes, _) = registry();
        scenes.register("only", Box::new(|_: &mut Pipeline<Framebuffer>| {}));

        assert!(!scenes.select("missing"));
        assert_eq!(scenes.current_name(), Some("only"));
    }

    #[test]
    fn draw_current_runs_the_selected_scene() {
        let (mut scenes, mut gl) = registry();

        // The default camera sits at z = 2 with an identity projection, so
        // geometry drawn at z = 2 lands on the eye plane.
        scenes.register(
            "fill",
            Box::new(|gl: &mut Pipeline<Framebuffer>| {
                gl.set_color(1.0, 0.0, 0.0);
                gl.begin(Topology::Triangles);
                gl.vertex(-1.0, -1.0, 2.0);
                gl.vertex(3.0, -1.0, 2.0);
                gl.vertex(-1.0, 3.0, 2.0);
                gl.end();
            }),
        );

        gl.clear(Color::BLACK);
        scenes.draw_current(&mut gl);

        let center = gl.surface().pixel(crate::geometry::Coordinate::new(4, 4));
        assert!(center.r > 0.9);
    }

    #[test]
    fn empty_registry_draws_nothing() {
        let (mut scenes, mut gl) = registry();

        gl.clear(Color::BLACK);
        scenes.draw_current(&mut gl);

        assert_eq!(scenes.current_name(), None);
        assert_eq!(gl.surface().pixel(crate::geometry::Coordinate::new(0, 0)).r, 0.0);
    }
}
