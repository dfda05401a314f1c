//! Ring compositing and structure outlines.
//!
//! A ring is a solid disk with a background-coloured disk punched out of its
//! middle. The unswept part is then hidden by filling the mask polygon in the
//! background colour. Outlines are plain 1px circles drawn on top.

use core::fmt;

use embedded_graphics::{
    draw_target::DrawTarget,
    prelude::{PixelColor, Point, Primitive},
    primitives::{Circle, PrimitiveStyle},
    Drawable,
};

use crate::clock::Completion;
use crate::config::{Palette, OUTLINE_COUNT};
use crate::mask::mask_for;
use crate::raster::fill_polygon;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RingError {
    NonPositiveRadius(i32),
    NonPositiveStroke(i32),
    /// stroke_width >= outer_radius
    StrokeTooWide { outer_radius: i32, stroke_width: i32 },
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::NonPositiveRadius(r) => write!(f, "ring radius {} must be positive", r),
            RingError::NonPositiveStroke(s) => write!(f, "ring stroke {} must be positive", s),
            RingError::StrokeTooWide {
                outer_radius,
                stroke_width,
            } => write!(
                f,
                "stroke width {} must be smaller than outer radius {}",
                stroke_width, outer_radius
            ),
        }
    }
}

/// Placement of one ring. Checked once at layout time and never changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RingSpec {
    center: Point,
    outer_radius: i32,
    stroke_width: i32,
}

impl RingSpec {
    pub fn new(center: Point, outer_radius: i32, stroke_width: i32) -> Result<Self, RingError> {
        if outer_radius <= 0 {
            return Err(RingError::NonPositiveRadius(outer_radius));
        }
        if stroke_width <= 0 {
            return Err(RingError::NonPositiveStroke(stroke_width));
        }
        if stroke_width >= outer_radius {
            return Err(RingError::StrokeTooWide {
                outer_radius,
                stroke_width,
            });
        }
        Ok(Self {
            center,
            outer_radius,
            stroke_width,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn outer_radius(&self) -> i32 {
        self.outer_radius
    }

    pub fn stroke_width(&self) -> i32 {
        self.stroke_width
    }

    pub fn inner_radius(&self) -> i32 {
        self.outer_radius - self.stroke_width
    }
}

// Pixel diameter covering every point within `radius` of the centre
fn diameter(radius: i32) -> u32 {
    (2 * radius.max(0) + 1) as u32
}

fn fill_disk<D, C>(target: &mut D, center: Point, radius: i32, color: C) -> Result<(), D::Error>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
{
    Circle::with_center(center, diameter(radius))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

fn stroke_circle<D, C>(target: &mut D, center: Point, radius: i32, color: C) -> Result<(), D::Error>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
{
    Circle::with_center(center, diameter(radius))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(target)
}

/// Draw `ring` showing `completion`.
pub fn draw_ring<D, C>(
    target: &mut D,
    ring: &RingSpec,
    completion: Completion,
    palette: &Palette<C>,
) -> Result<(), D::Error>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
{
    fill_disk(target, ring.center, ring.outer_radius, palette.foreground)?;
    fill_disk(target, ring.center, ring.inner_radius(), palette.background)?;

    let mask = mask_for(ring.center, ring.outer_radius, completion);
    fill_polygon(target, mask.points(), palette.background)
}

/// Draw the static guide circles at the outer and inner edge of a ring.
pub fn draw_outline<D, C>(
    target: &mut D,
    center: Point,
    radius: i32,
    stroke_width: i32,
    palette: &Palette<C>,
) -> Result<(), D::Error>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
{
    for edge in [radius, radius - stroke_width] {
        for i in 0..OUTLINE_COUNT {
            stroke_circle(target, center, edge - i, palette.outline)?;
        }
    }
    Ok(())
}
