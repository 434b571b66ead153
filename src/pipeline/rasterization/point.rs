use crate::framebuffer::PixelSurface;
use crate::geometry::ScreenVertex;
use crate::pipeline::fragment::FragmentContext;
use crate::pipeline::Attributes;

/// Writes a single vertex as a square of `point_size` pixels centered on its
/// rounded screen coordinate. No interpolation; every pixel of the square
/// carries the vertex's depth and attributes.
pub(crate) fn rasterize_point<S: PixelSurface>(
    ctx: &mut FragmentContext<S>,
    point_size: u32,
    point: &ScreenVertex<Attributes>,
) {
    let cx = point.position.x.round() as i64;
    let cy = point.position.y.round() as i64;

    let size = point_size.clamp(1, 40) as i64;
    let half = size / 2;

    let width = ctx.viewport.width as i64;
    let height = ctx.viewport.height as i64;

    for oy in 0..size {
        for ox in 0..size {
            let x = cx - half + ox;
            let y = cy - half + oy;

            let center = ox == half && oy == half;
            let inside = x >= 0 && y >= 0 && x < width && y < height;

            // The overhang of a fat point at the viewport edge is expected;
            // only an off-screen center is worth reporting.
            if inside || center {
                ctx.composite(x, y, point.position.z, point.attributes.color, point.attributes.uv);
            }
        }
    }
}
