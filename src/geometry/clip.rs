//! Homogeneous clipping against the view volume
//!
//! Clipping runs in clip-space, before the perspective divide, so geometry
//! behind the eye never produces a division by a negative or zero `w`.

use smallvec::SmallVec;

use crate::interpolate::Interpolate;

use super::ClipVertex;

/// Scratch polygon used while clipping. A triangle clipped against all six
/// planes can gain at most one vertex per plane.
pub type ClipPolygon<K> = SmallVec<[ClipVertex<K>; 9]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClippingPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

/// All clipping planes in a constant array. Useful for iterating over all of them.
pub const ALL_CLIPPING_PLANES: [ClippingPlane; 6] = [
    ClippingPlane::Left,
    ClippingPlane::Right,
    ClippingPlane::Bottom,
    ClippingPlane::Top,
    ClippingPlane::Near,
    ClippingPlane::Far,
];

impl ClippingPlane {
    /// Check if the clipping plane has the given clip-space point inside of it
    #[inline]
    pub fn has_inside<K>(self, v: &ClipVertex<K>) -> bool {
        let p = v.position;

        match self {
            ClippingPlane::Left => p.x >= -p.w,
            ClippingPlane::Right => p.x <= p.w,
            ClippingPlane::Bottom => p.y >= -p.w,
            ClippingPlane::Top => p.y <= p.w,
            ClippingPlane::Near => p.z >= -p.w,
            ClippingPlane::Far => p.z <= p.w,
        }
    }

    /// Find the intersection of a line segment and the clipping plane.
    ///
    /// The same parametric fraction interpolates the position and every
    /// carried attribute, which keeps colors and texture coordinates exact
    /// on the new edge rather than approximated.
    #[inline]
    pub fn intersect<K: Interpolate>(self, v1: &ClipVertex<K>, v2: &ClipVertex<K>) -> ClipVertex<K> {
        let p1 = v1.position;
        let p2 = v2.position;

        let (a, b) = match self {
            ClippingPlane::Left => (p1.w + p1.x, p2.w + p2.x),
            ClippingPlane::Right => (p1.w - p1.x, p2.w - p2.x),
            ClippingPlane::Bottom => (p1.w + p1.y, p2.w + p2.y),
            ClippingPlane::Top => (p1.w - p1.y, p2.w - p2.y),
            ClippingPlane::Near => (p1.w + p1.z, p2.w + p2.z),
            ClippingPlane::Far => (p1.w - p1.z, p2.w - p2.z),
        };

        let t = a / (a - b);

        Interpolate::linear_interpolate(t, v1, v2)
    }
}

/// Clips a convex polygon against the view volume with a Sutherland-Hodgman
/// pass per plane.
///
/// Returns the surviving polygon, which may be empty or have fewer than three
/// vertices; callers drop those silently.
pub fn clip_polygon<K: Interpolate + Clone>(mut polygon: ClipPolygon<K>) -> ClipPolygon<K> {
    for plane in ALL_CLIPPING_PLANES {
        if polygon.is_empty() {
            break;
        }

        // Skip the pass when every vertex is already inside.
        if polygon.iter().all(|v| plane.has_inside(v)) {
            continue;
        }

        let mut output = ClipPolygon::new();

        for i in 0..polygon.len() {
            let current = &polygon[i];
            let previous = &polygon[(i + polygon.len() - 1) % polygon.len()];

            let current_inside = plane.has_inside(current);
            let previous_inside = plane.has_inside(previous);

            if current_inside != previous_inside {
                output.push(plane.intersect(previous, current));
            }

            if current_inside {
                output.push(current.clone());
            }
        }

        polygon = output;
    }

    if polygon.len() < 3 {
        polygon.clear();
    }

    polygon
}

/// Clips a line segment against the view volume, one plane at a time.
///
/// Returns `None` when the segment is entirely outside.
pub fn clip_line<K: Interpolate + Clone>(
    mut start: ClipVertex<K>,
    mut end: ClipVertex<K>,
) -> Option<(ClipVertex<K>, ClipVertex<K>)> {
    for plane in ALL_CLIPPING_PLANES {
        let start_inside = plane.has_inside(&start);
        let end_inside = plane.has_inside(&end);

        match (start_inside, end_inside) {
            (true, true) => {}
            (false, false) => return None,
            (true, false) => end = plane.intersect(&start, &end),
            (false, true) => start = plane.intersect(&start, &end),
        }
    }

    Some((start, end))
}
