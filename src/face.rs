//! Watch face layout and full-frame drawing.
//!
//! This module provides:
//! - `FaceLayout`, the hour and minute `RingSpec`s derived from the display bounds
//! - `WatchFace`, which draws both rings and their outlines for a `ClockTime`
//!
//! The hour ring spans the whole surface. The minute ring sits in a centred box
//! at 26% inset, 48% of the surface wide and high.

use embedded_graphics::{
    draw_target::DrawTarget,
    prelude::{PixelColor, Point, Size},
    primitives::Rectangle,
};

use crate::clock::{compute_completions, ClockTime};
use crate::config::{
    Palette, HOURS_STROKE_WIDTH, MINUTES_STROKE_WIDTH, MINUTE_RING_INSET_PCT, MINUTE_RING_SPAN_PCT,
};
use crate::ring::{draw_outline, draw_ring, RingError, RingSpec};

// Ring centred in `area`, touching its left/right edges
fn ring_in(area: &Rectangle, stroke_width: i32) -> Result<RingSpec, RingError> {
    let half_w = area.size.width as i32 / 2;
    let half_h = area.size.height as i32 / 2;
    let center = area.top_left + Point::new(half_w, half_h);
    RingSpec::new(center, half_w - 1, stroke_width)
}

/// Box of the minute ring inside `bounds`.
pub fn minute_ring_area(bounds: &Rectangle) -> Rectangle {
    let Size { width, height } = bounds.size;
    let inset = Point::new(
        (width * MINUTE_RING_INSET_PCT / 100) as i32,
        (height * MINUTE_RING_INSET_PCT / 100) as i32,
    );
    let size = Size::new(
        (width * MINUTE_RING_SPAN_PCT / 100).saturating_sub(1),
        (height * MINUTE_RING_SPAN_PCT / 100).saturating_sub(1),
    );
    Rectangle::new(bounds.top_left + inset, size)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceLayout {
    pub hours: RingSpec,
    pub minutes: RingSpec,
}

impl FaceLayout {
    pub fn from_bounds(bounds: Rectangle) -> Result<Self, RingError> {
        Ok(Self {
            hours: ring_in(&bounds, HOURS_STROKE_WIDTH)?,
            minutes: ring_in(&minute_ring_area(&bounds), MINUTES_STROKE_WIDTH)?,
        })
    }
}

/// Two-ring clock face. Holds only layout and colours; the time is passed
/// into every `draw`.
#[derive(Copy, Clone, Debug)]
pub struct WatchFace<C> {
    layout: FaceLayout,
    palette: Palette<C>,
}

impl<C> WatchFace<C>
where
    C: PixelColor,
{
    pub fn new(bounds: Rectangle, palette: Palette<C>) -> Result<Self, RingError> {
        Ok(Self {
            layout: FaceLayout::from_bounds(bounds)?,
            palette,
        })
    }

    /// Lay the face out over the whole of `target`.
    pub fn for_target<D>(target: &D, palette: Palette<C>) -> Result<Self, RingError>
    where
        D: DrawTarget<Color = C>,
    {
        Self::new(target.bounding_box(), palette)
    }

    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    /// Redraw the whole face for `time`. The same `time` always yields the same
    /// pixels.
    pub fn draw<D>(&self, target: &mut D, time: ClockTime) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let completions = compute_completions(time);
        let FaceLayout { hours, minutes } = &self.layout;

        target.clear(self.palette.background)?;
        draw_ring(target, hours, completions.hour, &self.palette)?;
        draw_ring(target, minutes, completions.minute, &self.palette)?;

        for ring in [hours, minutes] {
            draw_outline(
                target,
                ring.center(),
                ring.outer_radius(),
                ring.stroke_width(),
                &self.palette,
            )?;
        }
        Ok(())
    }
}
