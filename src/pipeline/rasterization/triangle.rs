use crate::framebuffer::PixelSurface;
use crate::geometry::ScreenVertex;
use crate::interpolate::Interpolate;
use crate::pipeline::fragment::FragmentContext;
use crate::pipeline::Attributes;

use super::is_top_left;

/// Scan-converts one screen-space triangle.
///
/// Coverage is decided per pixel center with edge functions; depth is always
/// interpolated linearly in screen space, while color and texture
/// coordinates interpolate either linearly or perspective-correctly
/// depending on `perspective_correct`.
pub(crate) fn rasterize_triangle<S: PixelSurface>(
    ctx: &mut FragmentContext<S>,
    perspective_correct: bool,
    a: &ScreenVertex<Attributes>,
    b: &ScreenVertex<Attributes>,
    c: &ScreenVertex<Attributes>,
) {
    // Reorder to a positive signed area so the edge tests and the top-left
    // rule see a consistent winding. Barycentric weights are computed from
    // the reordered vertices, so the output does not depend on submission
    // order.
    let det = (b.position.y - c.position.y) * (a.position.x - c.position.x)
        + (c.position.x - b.position.x) * (a.position.y - c.position.y);

    if det == 0.0 {
        return;
    }

    let (b, c, det) = if det < 0.0 { (c, b, -det) } else { (b, c, det) };

    let (x1, y1) = (a.position.x, a.position.y);
    let (x2, y2) = (b.position.x, b.position.y);
    let (x3, y3) = (c.position.x, c.position.y);

    let width = ctx.viewport.width as i64;
    let height = ctx.viewport.height as i64;

    let min_x = (x1.min(x2).min(x3).floor() as i64).max(0);
    let max_x = (x1.max(x2).max(x3).ceil() as i64).min(width - 1);
    let min_y = (y1.min(y2).min(y3).floor() as i64).max(0);
    let max_y = (y1.max(y2).max(y3).ceil() as i64).min(height - 1);

    // Per-vertex 1/w, stored by the screen mapping.
    let (iw1, iw2, iw3) = (a.position.w, b.position.w, c.position.w);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // Sample at the pixel center.
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            // Unnormalized barycentric weights; each is an edge function of
            // the edge opposite its vertex.
            let eu = (y2 - y3) * (px - x3) + (x3 - x2) * (py - y3);
            let ev = (y3 - y1) * (px - x3) + (x1 - x3) * (py - y3);
            let ew = det - eu - ev;

            let covered = (eu > 0.0 || (eu == 0.0 && is_top_left(&b.position, &c.position)))
                && (ev > 0.0 || (ev == 0.0 && is_top_left(&c.position, &a.position)))
                && (ew > 0.0 || (ew == 0.0 && is_top_left(&a.position, &b.position)));

            if !covered {
                continue;
            }

            let u = eu / det;
            let v = ev / det;
            let w = 1.0 - u - v;

            // Depth interpolates linearly in screen space regardless of the
            // attribute mode.
            let depth = u * a.position.z + v * b.position.z + w * c.position.z;

            let attributes = if perspective_correct {
                let inv_w = u * iw1 + v * iw2 + w * iw3;

                Interpolate::barycentric_interpolate(
                    u * iw1 / inv_w,
                    &a.attributes,
                    v * iw2 / inv_w,
                    &b.attributes,
                    w * iw3 / inv_w,
                    &c.attributes,
                )
            } else {
                Interpolate::barycentric_interpolate(u, &a.attributes, v, &b.attributes, w, &c.attributes)
            };

            ctx.composite(x, y, depth, attributes.color, attributes.uv);
        }
    }
}
