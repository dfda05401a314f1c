//! Scanline polygon fill for any `DrawTarget`.
//!
//! embedded-graphics has no filled polygon primitive, so the mask is painted
//! row by row as 1-pixel-high rectangles. Pixel centres are sampled with the
//! even-odd rule: a pixel is filled when `(x + 0.5, y + 0.5)` lies inside.
//! Coordinates are doubled internally so every test stays in integers.

use embedded_graphics::{
    draw_target::DrawTarget,
    prelude::{Dimensions, PixelColor, Point, Size},
    primitives::Rectangle,
};
use heapless::Vec;

/// Largest polygon `fill_polygon` handles; extra vertices are ignored.
pub const MAX_POLYGON_VERTICES: usize = 16;

/// Fill the closed polygon through `vertices` with `color`.
///
/// Fewer than three vertices draws nothing. Spans are clipped to the target.
pub fn fill_polygon<D, C>(target: &mut D, vertices: &[Point], color: C) -> Result<(), D::Error>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
{
    let vertices = &vertices[..vertices.len().min(MAX_POLYGON_VERTICES)];
    if vertices.len() < 3 {
        return Ok(());
    }

    let (min_y, max_y) = vertices
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let clip = target.bounding_box();

    for y in min_y..max_y {
        let crossings = row_crossings(vertices, y);

        for pair in crossings.chunks_exact(2) {
            // pixel x is inside when 2x + 1 falls in [a, b)
            let start = pair[0].div_euclid(2);
            let end = pair[1].div_euclid(2);
            if end <= start {
                continue;
            }
            let span = Rectangle::new(Point::new(start, y), Size::new((end - start) as u32, 1))
                .intersection(&clip);
            if span.size.width == 0 || span.size.height == 0 {
                continue;
            }
            target.fill_solid(&span, color)?;
        }
    }
    Ok(())
}

// Doubled x coordinates where the row's centre line crosses polygon edges, sorted
fn row_crossings(vertices: &[Point], y: i32) -> Vec<i32, MAX_POLYGON_VERTICES> {
    let yc = 2 * y + 1;
    let mut crossings: Vec<i32, MAX_POLYGON_VERTICES> = Vec::new();

    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        if a.y == b.y {
            continue;
        }
        let (lo, hi) = if a.y < b.y { (*a, b) } else { (b, *a) };
        if yc < 2 * lo.y || yc >= 2 * hi.y {
            continue;
        }
        let dy = hi.y - lo.y;
        let x2 = 2 * lo.x + ((yc - 2 * lo.y) * (hi.x - lo.x)).div_euclid(dy);
        // one crossing per edge, so this never overflows the vertex bound
        let _ = crossings.push(x2);
    }

    crossings.sort_unstable();
    crossings
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics_framebuf::FrameBuf;

    const W: usize = 16;
    const H: usize = 16;

    fn lit(fb: &FrameBuf<BinaryColor, &mut [BinaryColor; W * H]>) -> usize {
        fb.data.iter().filter(|c| **c == BinaryColor::On).count()
    }

    #[test]
    fn axis_aligned_rectangle_fills_exactly() {
        let mut data = [BinaryColor::Off; W * H];
        let mut fb = FrameBuf::new(&mut data, W, H);
        let quad = [
            Point::new(2, 3),
            Point::new(6, 3),
            Point::new(6, 8),
            Point::new(2, 8),
        ];
        fill_polygon(&mut fb, &quad, BinaryColor::On).unwrap();

        // half-open on both axes: columns 2..6, rows 3..8
        assert_eq!(lit(&fb), 4 * 5);
        assert_eq!(fb.get_color_at(Point::new(2, 3)), BinaryColor::On);
        assert_eq!(fb.get_color_at(Point::new(5, 7)), BinaryColor::On);
        assert_eq!(fb.get_color_at(Point::new(6, 7)), BinaryColor::Off);
        assert_eq!(fb.get_color_at(Point::new(5, 8)), BinaryColor::Off);
    }

    #[test]
    fn triangle_is_half_a_square() {
        let mut data = [BinaryColor::Off; W * H];
        let mut fb = FrameBuf::new(&mut data, W, H);
        let tri = [Point::new(0, 0), Point::new(8, 0), Point::new(0, 8)];
        fill_polygon(&mut fb, &tri, BinaryColor::On).unwrap();

        assert_eq!(fb.get_color_at(Point::new(0, 0)), BinaryColor::On);
        assert_eq!(fb.get_color_at(Point::new(6, 0)), BinaryColor::On);
        // centre (7.5, 0.5) sits on the hypotenuse
        assert_eq!(fb.get_color_at(Point::new(7, 0)), BinaryColor::Off);
        assert_eq!(fb.get_color_at(Point::new(0, 6)), BinaryColor::On);
        assert_eq!(fb.get_color_at(Point::new(0, 7)), BinaryColor::Off);
        // rows hold 7, 6, ..., 0 pixels
        assert_eq!(lit(&fb), 28);
    }

    #[test]
    fn repeated_vertex_changes_nothing() {
        let mut a = [BinaryColor::Off; W * H];
        let mut b = [BinaryColor::Off; W * H];
        let base = [Point::new(1, 1), Point::new(10, 2), Point::new(4, 12)];
        let dup = [Point::new(1, 1), Point::new(10, 2), Point::new(4, 12), Point::new(4, 12)];
        fill_polygon(&mut FrameBuf::new(&mut a, W, H), &base, BinaryColor::On).unwrap();
        fill_polygon(&mut FrameBuf::new(&mut b, W, H), &dup, BinaryColor::On).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn clips_to_target() {
        let mut data = [BinaryColor::Off; W * H];
        let mut fb = FrameBuf::new(&mut data, W, H);
        let quad = [
            Point::new(-5, -5),
            Point::new(40, -5),
            Point::new(40, 40),
            Point::new(-5, 40),
        ];
        fill_polygon(&mut fb, &quad, BinaryColor::On).unwrap();
        assert_eq!(lit(&fb), W * H);
    }

    #[test]
    fn degenerate_input_draws_nothing() {
        let mut data = [BinaryColor::Off; W * H];
        let mut fb = FrameBuf::new(&mut data, W, H);
        fill_polygon(&mut fb, &[Point::new(1, 1), Point::new(9, 9)], BinaryColor::On).unwrap();
        fill_polygon(&mut fb, &[], BinaryColor::On).unwrap();
        assert_eq!(lit(&fb), 0);
    }
}
