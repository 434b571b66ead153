//! Parser for the extended OBJ dialect
//!
//! On top of plain OBJ this dialect adds `vc` vertex-color records, and face
//! indices carry up to four `/`-separated fields per vertex:
//! `position/texcoord/normal/color`, each 1-based and independently optional.

use log::warn;
use nalgebra::{Vector2, Vector3};
use smallvec::SmallVec;

use crate::color::Color;

use super::{Face, FaceVertex, Mesh};

/// Parses mesh source text. Malformed records are logged and skipped;
/// parsing always continues.
pub(super) fn parse(source: &str) -> Mesh {
    let mut mesh = Mesh::default();

    for (line_number, line) in source.lines().enumerate() {
        let mut tokens = line.split_whitespace();

        let op = match tokens.next() {
            Some(op) if !op.starts_with('#') => op,
            _ => continue,
        };

        match op {
            // Groups carry no geometry we care about.
            "g" => {}
            "v" | "vt" | "vn" | "vc" => {
                let mut components = [0.0f32; 4];
                let mut ok = true;

                for (i, token) in tokens.take(4).enumerate() {
                    match token.parse() {
                        Ok(value) => components[i] = value,
                        Err(_) => {
                            warn!("line {}: bad {op} component {token:?}; record skipped", line_number + 1);
                            ok = false;
                            break;
                        }
                    }
                }

                if !ok {
                    continue;
                }

                let [x, y, z, _] = components;

                match op {
                    "v" => mesh.positions.push(Vector3::new(x, y, z)),
                    "vt" => mesh.tex_coords.push(Vector2::new(x, y)),
                    "vn" => mesh.normals.push(Vector3::new(x, y, z)),
                    "vc" => mesh.colors.push(Color::new(x, y, z)),
                    _ => unreachable!(),
                }
            }
            "f" => {
                let mut vertices: SmallVec<[FaceVertex; 4]> = SmallVec::new();

                // Triangles and quads only; extra corners are dropped.
                for spec in tokens.by_ref().take(4) {
                    match parse_face_vertex(spec) {
                        Some(vertex) => vertices.push(vertex),
                        None => {
                            warn!("line {}: bad face vertex {spec:?}", line_number + 1);
                        }
                    }
                }

                if vertices.len() >= 3 {
                    mesh.faces.push(Face { vertices });
                } else {
                    warn!("line {}: face with fewer than 3 usable vertices skipped", line_number + 1);
                }
            }
            _ => {
                warn!("line {}: unknown record {op:?} skipped", line_number + 1);
            }
        }
    }

    validate_indices(&mut mesh);

    mesh
}

/// Parses one `p/t/n/c` face corner. Empty or non-positive fields mean the
/// attribute is absent; indices convert from 1-based to 0-based.
fn parse_face_vertex(spec: &str) -> Option<FaceVertex> {
    let mut indices = [None::<usize>; 4];

    for (i, field) in spec.split('/').take(4).enumerate() {
        indices[i] = match field.parse::<i64>() {
            Ok(index) if index > 0 => Some((index - 1) as usize),
            _ => None,
        };
    }

    Some(FaceVertex {
        position: indices[0]?,
        tex_coord: indices[1],
        normal: indices[2],
        color: indices[3],
    })
}

/// Drops faces whose position indices are out of range, and clears
/// out-of-range attribute indices. Index errors never abort the load.
fn validate_indices(mesh: &mut Mesh) {
    let positions = mesh.positions.len();
    let tex_coords = mesh.tex_coords.len();
    let normals = mesh.normals.len();
    let colors = mesh.colors.len();

    mesh.faces.retain_mut(|face| {
        if face.vertices.iter().any(|v| v.position >= positions) {
            warn!("face references a missing position; face skipped");
            return false;
        }

        for vertex in &mut face.vertices {
            if vertex.tex_coord.is_some_and(|i| i >= tex_coords) {
                warn!("face references a missing texture coordinate");
                vertex.tex_coord = None;
            }
            if vertex.normal.is_some_and(|i| i >= normals) {
                warn!("face references a missing normal");
                vertex.normal = None;
            }
            if vertex.color.is_some_and(|i| i >= colors) {
                warn!("face references a missing color");
                vertex.color = None;
            }
        }

        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_record_kinds() {
        let mesh = parse(
            "# comment\n\
             v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             vt 0.5 0.5\n\
             vn 0 0 1\n\
             vc 1 0 1\n\
             f 1/1/1/1 2/1/1/1 3/1/1/1\n",
        );

        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.tex_coords.len(), 1);
        assert_eq!(mesh.normals.len(), 1);
        assert_eq!(mesh.colors.len(), 1);
        assert_eq!(mesh.faces.len(), 1);

        let v = mesh.faces[0].vertices[0];
        assert_eq!(v.position, 0);
        assert_eq!(v.tex_coord, Some(0));
        assert_eq!(v.normal, Some(0));
        assert_eq!(v.color, Some(0));
    }

    #[test]
    fn optional_indices_may_be_absent() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2 3//1\n");

        let face = &mesh.faces[0];
        assert_eq!(face.vertices[0].normal, Some(0));
        assert_eq!(face.vertices[0].tex_coord, None);
        assert_eq!(face.vertices[1].normal, None);
        assert_eq!(face.vertices[1].color, None);
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let mesh = parse(
            "v 0 0 0\n\
             v banana 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             splines reticulate\n\
             f 1 2 3\n",
        );

        // The bad `v` record is dropped; everything else still parses.
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn faces_with_missing_positions_are_dropped() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nf 1 2 9\nf 1 2\n");
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn out_of_range_attributes_degrade_to_absent() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/7/7/7 2 3\n");

        let v = mesh.faces[0].vertices[0];
        assert_eq!(v.tex_coord, None);
        assert_eq!(v.normal, None);
        assert_eq!(v.color, None);
    }

    #[test]
    fn quads_are_kept_whole_for_the_caller_to_split() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        assert_eq!(mesh.faces[0].vertices.len(), 4);
    }
}
