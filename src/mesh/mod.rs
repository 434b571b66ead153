//! Mesh loading and immediate-mode replay

mod parser;

use std::path::Path;

use nalgebra::Vector3;
use smallvec::SmallVec;

use crate::color::Color;
use crate::error::{RenderError, RenderResult};
use crate::framebuffer::PixelSurface;
use crate::pipeline::{Pipeline, Topology};

/// One corner of a face. Indices point into the attribute tables of the
/// owning [`Mesh`]; every attribute except the position is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
    pub color: Option<usize>,
}

/// A triangle or quad face.
#[derive(Debug, Clone)]
pub struct Face {
    pub vertices: SmallVec<[FaceVertex; 4]>,
}

/// An indexed mesh parsed from the extended OBJ dialect, which adds `vc`
/// vertex-color records and a fourth (color) face index.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vector3<f32>>,
    pub tex_coords: Vec<nalgebra::Vector2<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub colors: Vec<Color>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Parses a mesh file and applies the post-load fix-ups: recenter and
    /// rescale to roughly a 2-unit cube, synthesize missing face normals,
    /// then synthesize missing vertex colors from those normals.
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Mesh> {
        let source = std::fs::read_to_string(path.as_ref())?;

        let mut mesh = parser::parse(&source);

        if mesh.faces.is_empty() {
            return Err(RenderError::EmptyMesh { path: path.as_ref().to_owned() });
        }

        mesh.normalize();
        mesh.fill_normals();
        mesh.fill_colors();

        Ok(mesh)
    }

    /// Recenters the mesh about the origin and rescales it so the mean
    /// bounding-box extent is two units.
    fn normalize(&mut self) {
        if self.positions.is_empty() {
            return;
        }

        let mut min = Vector3::repeat(f32::MAX);
        let mut max = Vector3::repeat(f32::MIN);

        for p in &self.positions {
            min = min.inf(p);
            max = max.sup(p);
        }

        let offset = (min + max) / 2.0;
        let extent = max - min;
        let mean = (extent.x + extent.y + extent.z) / 3.0;

        let scale = if mean > 0.0 { 2.0 / mean } else { 1.0 };

        for p in &mut self.positions {
            *p = (*p - offset) * scale;
        }
    }

    /// Synthesizes a flat normal from two edges for every face without one.
    fn fill_normals(&mut self) {
        for face in &mut self.faces {
            if face.vertices[0].normal.is_some() {
                continue;
            }

            let a = self.positions[face.vertices[0].position];
            let b = self.positions[face.vertices[1].position];
            let c = self.positions[face.vertices[2].position];

            let normal = (b - a)
                .cross(&(c - a))
                .try_normalize(1.0e-12)
                .unwrap_or_else(Vector3::zeros);

            self.normals.push(normal);
            let index = self.normals.len() - 1;

            for vertex in &mut face.vertices {
                vertex.normal = Some(index);
            }
        }
    }

    /// Synthesizes `(normal + 1) / 2` colors for vertices that have a normal
    /// but no color.
    fn fill_colors(&mut self) {
        for face in &mut self.faces {
            for vertex in &mut face.vertices {
                if vertex.color.is_none() {
                    if let Some(ni) = vertex.normal {
                        let n = self.normals[ni];
                        self.colors.push(Color::new(
                            (n.x + 1.0) * 0.5,
                            (n.y + 1.0) * 0.5,
                            (n.z + 1.0) * 0.5,
                        ));
                        vertex.color = Some(self.colors.len() - 1);
                    }
                }
            }
        }
    }

    /// Replays the mesh through the immediate-mode API, one triangle per
    /// bracket. Quads are split into `(0,1,2)` and `(2,3,0)`.
    pub fn draw<S: PixelSurface>(&self, gl: &mut Pipeline<S>) {
        for face in &self.faces {
            match face.vertices.len() {
                3 => {
                    gl.begin(Topology::Triangles);
                    for vertex in &face.vertices {
                        self.submit(gl, vertex);
                    }
                    gl.end();
                }
                4 => {
                    gl.begin(Topology::Triangles);
                    self.submit(gl, &face.vertices[0]);
                    self.submit(gl, &face.vertices[1]);
                    self.submit(gl, &face.vertices[2]);
                    gl.end();

                    gl.begin(Topology::Triangles);
                    self.submit(gl, &face.vertices[2]);
                    self.submit(gl, &face.vertices[3]);
                    self.submit(gl, &face.vertices[0]);
                    gl.end();
                }
                _ => {}
            }
        }
    }

    fn submit<S: PixelSurface>(&self, gl: &mut Pipeline<S>, vertex: &FaceVertex) {
        if let Some(t) = vertex.tex_coord.and_then(|i| self.tex_coords.get(i)) {
            gl.set_tex_coord(t.x, t.y);
        }
        if let Some(c) = vertex.color.and_then(|i| self.colors.get(i)) {
            gl.set_color(c.r, c.g, c.b);
        }
        if let Some(n) = vertex.normal.and_then(|i| self.normals.get(i)) {
            gl.set_normal(n.x, n.y, n.z);
        }

        let p = self.positions[vertex.position];
        gl.vertex(p.x, p.y, p.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(source: &str) -> Mesh {
        let mut mesh = parser::parse(source);
        mesh.normalize();
        mesh.fill_normals();
        mesh.fill_colors();
        mesh
    }

    #[test]
    fn normalize_recenters_and_rescales() {
        let mesh = load_str(
            "v 10 10 10\nv 12 10 10\nv 10 12 10\nv 10 10 12\nf 1 2 3\nf 1 2 4\n",
        );

        // Mean extent was 2, so the scale is 1 and only the offset moves.
        let centroid = mesh.positions.iter().fold(Vector3::zeros(), |acc, p| acc + p) / 4.0;
        assert!(centroid.norm() < 2.0);

        let mut min = Vector3::repeat(f32::MAX);
        let mut max = Vector3::repeat(f32::MIN);
        for p in &mesh.positions {
            min = min.inf(p);
            max = max.sup(p);
        }
        assert!(((max - min).x - 2.0).abs() < 1e-5);
        assert!(((min + max) / 2.0).norm() < 1e-5);
    }

    #[test]
    fn missing_normals_are_synthesized_from_edges() {
        let mesh = load_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");

        let ni = mesh.faces[0].vertices[0].normal.unwrap();
        let n = mesh.normals[ni];
        assert!((n - Vector3::z()).norm() < 1e-6);

        // All three corners share the synthesized normal.
        for v in &mesh.faces[0].vertices {
            assert_eq!(v.normal, Some(ni));
        }
    }

    #[test]
    fn missing_colors_come_from_normals() {
        let mesh = load_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");

        let ci = mesh.faces[0].vertices[0].color.unwrap();
        // Normal (0,0,1) maps to color (0.5, 0.5, 1).
        assert_eq!(mesh.colors[ci], Color::new(0.5, 0.5, 1.0));
    }

    #[test]
    fn explicit_colors_are_kept() {
        let mesh = load_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvc 1 0 0\nf 1///1 2///1 3///1\n",
        );

        let ci = mesh.faces[0].vertices[0].color.unwrap();
        assert_eq!(mesh.colors[ci], Color::new(1.0, 0.0, 0.0));
    }
}
