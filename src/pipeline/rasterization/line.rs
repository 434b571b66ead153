use crate::framebuffer::PixelSurface;
use crate::geometry::ScreenVertex;
use crate::interpolate::Interpolate;
use crate::pipeline::fragment::FragmentContext;
use crate::pipeline::Attributes;

/// Scan-converts one screen-space line segment with Bresenham traversal.
///
/// Depth and attributes interpolate linearly by the fraction of the distance
/// travelled from `start`.
pub(crate) fn rasterize_line<S: PixelSurface>(
    ctx: &mut FragmentContext<S>,
    start: &ScreenVertex<Attributes>,
    end: &ScreenVertex<Attributes>,
) {
    let (x1, y1) = (start.position.x, start.position.y);
    let (x2, y2) = (end.position.x, end.position.y);

    let length = (x2 - x1).hypot(y2 - y1);

    let width = ctx.viewport.width as i64;
    let height = ctx.viewport.height as i64;

    // The segment is already clipped to the view volume, so its endpoints
    // map into [0, width] x [0, height]; the exact upper boundary rounds
    // into the last pixel row/column rather than off-screen.
    let mut x = (x1.floor() as i64).clamp(0, width - 1);
    let mut y = (y1.floor() as i64).clamp(0, height - 1);
    let xe = (x2.floor() as i64).clamp(0, width - 1);
    let ye = (y2.floor() as i64).clamp(0, height - 1);

    let dx = (xe - x).abs();
    let dy = -(ye - y).abs();
    let sx = if x < xe { 1 } else { -1 };
    let sy = if y < ye { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;

        let t = if length > 0.0 {
            ((px - x1).hypot(py - y1) / length).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let depth = (1.0 - t) * start.position.z + t * end.position.z;
        let attributes = Interpolate::linear_interpolate(t, &start.attributes, &end.attributes);

        ctx.composite(x, y, depth, attributes.color, attributes.uv);

        if x == xe && y == ye {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
