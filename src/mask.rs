//! Mask polygon construction.
//!
//! A ring is drawn solid and then a polygon is filled over it in the background
//! colour. The polygon starts at 12 o'clock, runs into the ring centre, out to
//! the sweep boundary and then around the edges of the ring's bounding square
//! (one pixel outside it) back to the top. Which corners it has to route
//! through depends on the sweep direction and on whether it passes 50%.

use embedded_graphics::prelude::Point;
use heapless::Vec;

use crate::clock::{Completion, Direction};
use crate::trig::SweepGeometry;

/// Upper bound on mask vertices.
pub const MAX_MASK_VERTICES: usize = 7;

/// Vertex template for one sweep case.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WedgeShape {
    /// Forward, up to half a turn
    FiveWayForward,
    /// Forward, past half a turn
    SevenWayForward,
    /// Backward, up to half a turn
    SixWayBackward,
    /// Backward, past half a turn
    SevenWayBackward,
}

impl WedgeShape {
    pub const ALL: [WedgeShape; 4] = [
        WedgeShape::FiveWayForward,
        WedgeShape::SevenWayForward,
        WedgeShape::SixWayBackward,
        WedgeShape::SevenWayBackward,
    ];

    pub fn classify(magnitude: u8, direction: Direction) -> Self {
        match (direction, magnitude <= 50) {
            (Direction::Forward, true) => WedgeShape::FiveWayForward,
            (Direction::Forward, false) => WedgeShape::SevenWayForward,
            (Direction::Backward, true) => WedgeShape::SixWayBackward,
            (Direction::Backward, false) => WedgeShape::SevenWayBackward,
        }
    }

    pub fn vertex_count(self) -> usize {
        match self {
            WedgeShape::FiveWayForward => 5,
            WedgeShape::SixWayBackward => 6,
            WedgeShape::SevenWayForward | WedgeShape::SevenWayBackward => 7,
        }
    }

    // Edges of the square around the ring, one pixel outside it
    fn vertices(self, center: Point, radius: i32, boundary: Point) -> [Point; MAX_MASK_VERTICES] {
        let left = center.x - radius - 1;
        let right = center.x + radius + 1;
        let top = center.y - radius - 1;
        let bottom = center.y + radius + 1;

        let tip = Point::new(center.x, top);
        let edge = |x| Point::new(x, boundary.y);

        match self {
            WedgeShape::FiveWayForward => [
                tip,
                center,
                boundary,
                edge(right),
                Point::new(right, top),
                // unused
                Point::zero(),
                Point::zero(),
            ],
            WedgeShape::SevenWayForward => [
                tip,
                center,
                boundary,
                edge(left),
                Point::new(left, bottom),
                Point::new(right, bottom),
                Point::new(right, top),
            ],
            WedgeShape::SixWayBackward => [
                tip,
                center,
                boundary,
                edge(left),
                Point::new(left, top),
                // closing corner repeated, zero-length edge
                Point::new(left, top),
                // unused
                Point::zero(),
            ],
            WedgeShape::SevenWayBackward => [
                tip,
                center,
                boundary,
                edge(right),
                Point::new(right, bottom),
                Point::new(left, bottom),
                Point::new(left, top),
            ],
        }
    }
}

/// Ordered vertices of one mask. Lives on the stack for a single redraw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskPolygon {
    shape: WedgeShape,
    points: Vec<Point, MAX_MASK_VERTICES>,
}

impl MaskPolygon {
    pub fn shape(&self) -> WedgeShape {
        self.shape
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Build the mask for a sweep of `magnitude` percent in `direction` on the
/// circle at `center` with `radius`.
pub fn build_mask(center: Point, radius: i32, magnitude: u8, direction: Direction) -> MaskPolygon {
    let sweep = SweepGeometry::from_parts(center, radius, magnitude, direction);
    let shape = WedgeShape::classify(sweep.magnitude, sweep.direction);

    let template = shape.vertices(center, radius, sweep.boundary);
    let mut points = Vec::new();
    for p in template.iter().take(shape.vertex_count()) {
        // capacity is MAX_MASK_VERTICES and vertex_count never exceeds it
        let _ = points.push(*p);
    }
    MaskPolygon { shape, points }
}

/// Mask for a signed completion value.
pub fn mask_for(center: Point, radius: i32, completion: Completion) -> MaskPolygon {
    build_mask(center, radius, completion.magnitude(), completion.direction())
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Point = Point::new(72, 84);
    const R: i32 = 71;

    #[test]
    fn vertex_counts_follow_rule_table() {
        for magnitude in 0..=100u8 {
            for direction in [Direction::Forward, Direction::Backward] {
                let mask = build_mask(C, R, magnitude, direction);
                let expected = match (direction, magnitude <= 50) {
                    (Direction::Forward, true) => 5,
                    (Direction::Backward, true) => 6,
                    _ => 7,
                };
                assert_eq!(mask.len(), expected, "{magnitude} {direction:?}");
                assert_eq!(mask.shape().vertex_count(), expected);
            }
        }
    }

    #[test]
    fn every_shape_is_reachable() {
        let seen = [
            build_mask(C, R, 10, Direction::Forward).shape(),
            build_mask(C, R, 90, Direction::Forward).shape(),
            build_mask(C, R, 10, Direction::Backward).shape(),
            build_mask(C, R, 90, Direction::Backward).shape(),
        ];
        assert_eq!(seen, WedgeShape::ALL);
    }

    #[test]
    fn deterministic() {
        for magnitude in [0u8, 1, 33, 50, 51, 99, 100] {
            for direction in [Direction::Forward, Direction::Backward] {
                assert_eq!(
                    build_mask(C, R, magnitude, direction),
                    build_mask(C, R, magnitude, direction)
                );
            }
        }
    }

    #[test]
    fn forward_quarter_template() {
        let mask = build_mask(C, R, 25, Direction::Forward);
        assert_eq!(
            mask.points(),
            &[
                Point::new(72, 12),
                Point::new(72, 84),
                Point::new(143, 84),
                Point::new(144, 84),
                Point::new(144, 12),
            ]
        );
    }

    #[test]
    fn backward_quarter_mirrors_forward() {
        let mask = build_mask(C, R, 25, Direction::Backward);
        assert_eq!(
            mask.points(),
            &[
                Point::new(72, 12),
                Point::new(72, 84),
                Point::new(1, 84),
                Point::new(0, 84),
                Point::new(0, 12),
                Point::new(0, 12),
            ]
        );
    }

    #[test]
    fn past_half_wraps_bottom_corners() {
        let fwd = build_mask(C, R, 75, Direction::Forward);
        assert_eq!(fwd.points()[2], Point::new(1, 84));
        assert_eq!(fwd.points()[4], Point::new(0, 156));
        assert_eq!(fwd.points()[5], Point::new(144, 156));

        let back = build_mask(C, R, 75, Direction::Backward);
        assert_eq!(back.points()[2], Point::new(143, 84));
        assert_eq!(back.points()[4], Point::new(144, 156));
        assert_eq!(back.points()[5], Point::new(0, 156));
    }

    #[test]
    fn signed_completion_selects_direction() {
        let back = mask_for(C, R, Completion::saturating(-60));
        assert_eq!(back.shape(), WedgeShape::SevenWayBackward);
        let zero = mask_for(C, R, Completion::ZERO);
        assert_eq!(zero.shape(), WedgeShape::FiveWayForward);
    }
}
