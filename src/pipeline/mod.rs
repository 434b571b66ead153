//! The immediate-mode rendering pipeline
//!
//! Geometry submitted between [`begin`](Pipeline::begin) and
//! [`end`](Pipeline::end) flows through primitive assembly, the model-view
//! and projection transforms, homogeneous clipping, scan conversion and
//! depth-tested compositing, synchronously and in submission order.

pub(crate) mod fragment;
mod rasterization;
mod vertex;

pub use self::vertex::Attributes;

use std::mem;
use std::sync::Arc;

use nalgebra::{Point3, Vector2, Vector3};
use smallvec::SmallVec;

use crate::color::Color;
use crate::framebuffer::{DepthBuffer, PixelSurface};
use crate::geometry::clip::{clip_line, clip_polygon, ClipPolygon};
use crate::geometry::{ClipVertex, Dimensions, ScreenVertex, ALL_CLIPPING_PLANES};
use crate::state::RenderState;
use crate::texture::Texture;

use self::fragment::FragmentContext;
use self::rasterization::{rasterize_line, rasterize_point, rasterize_triangle};
use self::vertex::Vertex;

/// How the vertices of one `begin()`/`end()` bracket are grouped into
/// primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Each vertex is an independent point.
    Points,
    /// Vertices are consumed pairwise as independent segments.
    Lines,
    /// Vertices are consumed in triples as independent triangles.
    Triangles,
    /// A convex polygon fan, triangulated as `(v0, vi, vi+1)`.
    TriangleFan,
}

/// Cross-cutting behavior toggles, threaded through the pipeline explicitly
/// rather than read from globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Interpolate color and texture coordinates perspective-correctly
    /// (via `1/w`) instead of linearly in screen space.
    pub perspective_correct: bool,
    /// Render filled primitives as their vertices only.
    pub draw_as_points: bool,
    /// Side length of the square a point rasterizes to, in pixels,
    /// clamped to `1..=40` at draw time.
    pub point_size: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            perspective_correct: true,
            draw_as_points: false,
            point_size: 1,
        }
    }
}

/// A software rendering pipeline drawing into an owned pixel surface.
///
/// One instance owns all pipeline state: the current transforms and
/// attribute pens, the bound texture, the persistent depth buffer, and the
/// vertices of the currently open primitive bracket. Everything is
/// single-threaded; a frame runs to completion before control returns.
pub struct Pipeline<S: PixelSurface> {
    surface: S,
    depth: DepthBuffer,
    state: RenderState,
    options: PipelineOptions,
    topology: Option<Topology>,
    vertices: Vec<Vertex>,
}

impl<S: PixelSurface> Pipeline<S> {
    /// Creates a pipeline rendering into `surface`, with the viewport set
    /// to the surface dimensions.
    pub fn new(surface: S) -> Pipeline<S> {
        let viewport = surface.dimensions();

        assert!(viewport.width > 0, "surface must have a non-zero width");
        assert!(viewport.height > 0, "surface must have a non-zero height");

        Pipeline {
            depth: DepthBuffer::new(viewport),
            state: RenderState::new(viewport),
            options: PipelineOptions::default(),
            topology: None,
            vertices: Vec::new(),
            surface,
        }
    }

    /// Returns a reference to the surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns a mutable reference to the surface
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the pipeline and returns the surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Replaces the surface (after a host window resize, for example),
    /// adopting its dimensions as the new viewport. Returns the old surface.
    pub fn replace_surface(&mut self, surface: S) -> S {
        let old = mem::replace(&mut self.surface, surface);

        let dimensions = self.surface.dimensions();
        self.set_viewport(dimensions.width, dimensions.height);

        old
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut PipelineOptions {
        &mut self.options
    }

    /// Sets the viewport in virtual-pixel units and reshapes the depth
    /// buffer to match. The depth allocation only grows; shrinking keeps
    /// the capacity for later.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let dimensions = Dimensions::new(width, height);
        self.state.viewport = dimensions;
        self.depth.reshape(dimensions);
    }

    /// Clears the surface to `color` and every depth value to the maximum
    /// sentinel. Call once at the start of each frame, before any primitive.
    pub fn clear(&mut self, color: Color) {
        self.surface.clear(color);
        self.depth.clear();
    }

    /// Resets the model-view and projection matrices to the identity.
    pub fn load_identity(&mut self) {
        self.state.load_identity();
    }

    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) {
        self.state.translate(tx, ty, tz);
    }

    /// Rotates by `angle` degrees about the given axis.
    pub fn rotate(&mut self, angle: f32, axis_x: f32, axis_y: f32, axis_z: f32) {
        self.state.rotate(angle, axis_x, axis_y, axis_z);
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.state.scale(sx, sy, sz);
    }

    /// Multiplies a perspective projection onto the projection matrix.
    pub fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.state.frustum(left, right, bottom, top, near, far);
    }

    /// Multiplies a viewing transform onto the model-view matrix.
    pub fn look_at(&mut self, eye: Point3<f32>, center: Point3<f32>, up: Vector3<f32>) {
        self.state.look_at(eye, center, up);
    }

    /// Sets the current color pen.
    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.state.color = Color::new(r, g, b);
    }

    /// Sets the current texture coordinate pen.
    pub fn set_tex_coord(&mut self, u: f32, v: f32) {
        self.state.tex_coord = Vector2::new(u, v);
    }

    /// Sets the current normal pen.
    pub fn set_normal(&mut self, x: f32, y: f32, z: f32) {
        self.state.normal = Vector3::new(x, y, z);
    }

    /// Sets or clears the bound texture. Textured fragments modulate the
    /// vertex color with the sample; `None` renders untextured.
    pub fn bind_texture(&mut self, texture: Option<Arc<Texture>>) {
        self.state.bind_texture(texture);
    }

    /// Opens a primitive bracket.
    ///
    /// # Panics
    ///
    /// Panics when a bracket is already open; nested primitives are caller
    /// error, not a recoverable condition.
    pub fn begin(&mut self, topology: Topology) {
        assert!(
            self.topology.is_none(),
            "begin() called inside an open primitive bracket"
        );
        self.topology = Some(topology);
    }

    /// Submits a vertex at the given object-space position, carrying a
    /// snapshot of the current color, texture-coordinate and normal pens.
    /// Later pen changes never affect vertices already submitted.
    ///
    /// # Panics
    ///
    /// Panics when called outside a `begin()`/`end()` bracket.
    pub fn vertex(&mut self, x: f32, y: f32, z: f32) {
        assert!(
            self.topology.is_some(),
            "vertex() called outside a begin()/end() bracket"
        );

        self.vertices.push(Vertex {
            position: Point3::new(x, y, z),
            attributes: self.state.snapshot(),
        });
    }

    /// Closes the bracket and draws the accumulated primitives.
    ///
    /// An empty bracket is legal and draws nothing; trailing vertices short
    /// of a whole primitive are dropped silently.
    ///
    /// # Panics
    ///
    /// Panics when no bracket is open.
    pub fn end(&mut self) {
        let topology = match self.topology.take() {
            Some(topology) => topology,
            None => panic!("end() called without a matching begin()"),
        };

        let vertices = mem::take(&mut self.vertices);

        // A minimized host window leaves an empty viewport; the bracket is
        // still consumed, there is just nothing to rasterize into.
        if self.state.viewport.area() == 0 {
            return;
        }

        match topology {
            Topology::Points => {
                for vertex in &vertices {
                    self.draw_point(vertex);
                }
            }
            Topology::Lines => {
                for pair in vertices.chunks_exact(2) {
                    self.draw_line(&pair[0], &pair[1]);
                }
            }
            Topology::Triangles => {
                for triple in vertices.chunks_exact(3) {
                    self.draw_triangle(&triple[0], &triple[1], &triple[2]);
                }
            }
            Topology::TriangleFan => {
                for i in 1..vertices.len().saturating_sub(1) {
                    self.draw_triangle(&vertices[0], &vertices[i], &vertices[i + 1]);
                }
            }
        }
    }

    /// Maps an object-space vertex to clip space. The perspective divide is
    /// deferred until after clipping.
    fn to_clip(&self, vertex: &Vertex) -> ClipVertex<Attributes> {
        let eye = self.state.model_view * vertex.position.to_homogeneous();

        ClipVertex::new(self.state.projection * eye, vertex.attributes)
    }

    fn draw_point(&mut self, vertex: &Vertex) {
        let clip = self.to_clip(vertex);

        if !ALL_CLIPPING_PLANES.iter().all(|plane| plane.has_inside(&clip)) {
            return;
        }

        let screen = clip.normalize(self.state.viewport);

        let point_size = self.options.point_size;
        let mut ctx = FragmentContext {
            viewport: self.state.viewport,
            texture: self.state.texture.as_deref(),
            surface: &mut self.surface,
            depth: &mut self.depth,
        };

        rasterize_point(&mut ctx, point_size, &screen);
    }

    fn draw_line(&mut self, a: &Vertex, b: &Vertex) {
        let (start, end) = match clip_line(self.to_clip(a), self.to_clip(b)) {
            Some(segment) => segment,
            None => return,
        };

        let viewport = self.state.viewport;
        let start = start.normalize(viewport);
        let end = end.normalize(viewport);

        let options = self.options;
        let mut ctx = FragmentContext {
            viewport,
            texture: self.state.texture.as_deref(),
            surface: &mut self.surface,
            depth: &mut self.depth,
        };

        if options.draw_as_points {
            rasterize_point(&mut ctx, options.point_size, &start);
            rasterize_point(&mut ctx, options.point_size, &end);
        } else {
            rasterize_line(&mut ctx, &start, &end);
        }
    }

    fn draw_triangle(&mut self, a: &Vertex, b: &Vertex, c: &Vertex) {
        let polygon: ClipPolygon<Attributes> =
            clip_polygon(SmallVec::from_iter([self.to_clip(a), self.to_clip(b), self.to_clip(c)]));

        if polygon.len() < 3 {
            return;
        }

        let viewport = self.state.viewport;
        let screen: SmallVec<[ScreenVertex<Attributes>; 9]> = polygon
            .into_iter()
            .map(|vertex| vertex.normalize(viewport))
            .collect();

        let options = self.options;
        let mut ctx = FragmentContext {
            viewport,
            texture: self.state.texture.as_deref(),
            surface: &mut self.surface,
            depth: &mut self.depth,
        };

        if options.draw_as_points {
            for vertex in &screen {
                rasterize_point(&mut ctx, options.point_size, vertex);
            }
            return;
        }

        // Clipping may have grown the triangle into a convex polygon;
        // re-fan it around the first vertex.
        for i in 1..screen.len() - 1 {
            rasterize_triangle(&mut ctx, options.perspective_correct, &screen[0], &screen[i], &screen[i + 1]);
        }
    }
}
