//! Scan conversion of clipped, screen-mapped primitives

mod line;
mod point;
mod triangle;

pub(crate) use self::line::rasterize_line;
pub(crate) use self::point::rasterize_point;
pub(crate) use self::triangle::rasterize_triangle;

use nalgebra::Vector4;

/// The top-left tie-break rule, for a triangle wound so its signed area is
/// positive: a pixel center exactly on an edge belongs to the triangle only
/// when the edge is a top edge (horizontal, interior below it) or a left
/// edge. Adjacent triangles sharing an edge then cover each boundary pixel
/// exactly once.
///
/// `from` and `to` are the edge endpoints in winding order, in screen space
/// with the y axis pointing down.
#[inline]
fn is_top_left(from: &Vector4<f32>, to: &Vector4<f32>) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    dy < 0.0 || (dy == 0.0 && dx > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(x1: f32, y1: f32, x2: f32, y2: f32) -> bool {
        is_top_left(&Vector4::new(x1, y1, 0.0, 1.0), &Vector4::new(x2, y2, 0.0, 1.0))
    }

    #[test]
    fn top_edges_own_their_pixels() {
        // A top edge runs rightwards (y constant, interior below it in
        // screen space).
        assert!(edge(0.0, 0.0, 4.0, 0.0));
        assert!(!edge(4.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn left_edges_own_their_pixels() {
        // A left edge runs upwards on screen (decreasing y).
        assert!(edge(0.0, 4.0, 0.0, 0.0));
        assert!(!edge(0.0, 0.0, 0.0, 4.0));
    }

    #[test]
    fn a_shared_edge_belongs_to_exactly_one_triangle() {
        // The diagonal of a split quad appears once per winding direction;
        // the rule must accept one and reject the other.
        let forward = edge(0.0, 4.0, 4.0, 0.0);
        let backward = edge(4.0, 0.0, 0.0, 4.0);
        assert_ne!(forward, backward);
    }
}
