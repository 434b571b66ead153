//! `softgl` is a small immediate-mode software rasterizer in pure Rust.
//!
//! It mirrors the shape of a classic fixed-function GL: a host application
//! opens primitive brackets with [`begin`](pipeline::Pipeline::begin),
//! submits vertices that snapshot the current color/texture/normal pens,
//! and on [`end`](pipeline::Pipeline::end) the pipeline transforms, clips,
//! scan-converts and depth-composites everything into an owned
//! [`PixelSurface`](framebuffer::PixelSurface).
//!
//! The pipeline is strictly single-threaded and synchronous; a frame runs
//! to completion inside `end()`. Meshes in an extended OBJ dialect (with
//! per-vertex colors) and PPM/PNG textures can be loaded and cached, and a
//! [`SceneRegistry`](scene::SceneRegistry) lets a host switch between named
//! scenes at runtime.
//!
//! ```
//! use softgl::color::Color;
//! use softgl::framebuffer::Framebuffer;
//! use softgl::pipeline::{Pipeline, Topology};
//!
//! let mut gl = Pipeline::new(Framebuffer::new(64, 64));
//!
//! gl.clear(Color::BLACK);
//!
//! gl.begin(Topology::Triangles);
//! gl.set_color(1.0, 0.0, 0.0);
//! gl.vertex(-0.5, -0.5, 0.0);
//! gl.set_color(0.0, 1.0, 0.0);
//! gl.vertex(0.5, -0.5, 0.0);
//! gl.set_color(0.0, 0.0, 1.0);
//! gl.vertex(0.0, 0.5, 0.0);
//! gl.end();
//!
//! let rgb = gl.surface().to_rgb_bytes();
//! # assert_eq!(rgb.len(), 64 * 64 * 3);
//! ```

pub mod cache;
pub mod color;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod interpolate;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod state;
pub mod texture;

pub use self::cache::{MeshCache, TextureCache};
pub use self::color::Color;
pub use self::error::{RenderError, RenderResult};
pub use self::framebuffer::{Framebuffer, PixelSurface, ScaledSurface};
pub use self::mesh::Mesh;
pub use self::pipeline::{Pipeline, PipelineOptions, Topology};
pub use self::scene::{CameraInit, Scene, SceneRegistry};
pub use self::texture::Texture;
