//! Fixed-point trigonometry and the angle mapper.
//!
//! Angles are expressed in fractions of a turn: `TRIG_MAX_ANGLE` is one full
//! revolution and sine/cosine come back scaled by `TRIG_MAX_RATIO`. Nothing in
//! here touches floating point, so it runs the same on the watch and the host.

use embedded_graphics::prelude::Point;

use crate::clock::{Completion, Direction};

/// One full turn in fixed-point angle units.
pub const TRIG_MAX_ANGLE: i32 = 0x1_0000;
/// Fixed-point value of sin(90°).
pub const TRIG_MAX_RATIO: i32 = 0xffff;

const QUARTER_TURN: i32 = TRIG_MAX_ANGLE / 4;
const TABLE_STEP_BITS: u32 = 8;

// Quarter-wave sine, 64 steps of 256 angle units, scaled by TRIG_MAX_RATIO
const QUARTER_SIN: [i32; 65] = [
    0, 1608, 3216, 4821, 6424, 8022, 9616, 11204,
    12785, 14359, 15924, 17479, 19024, 20557, 22078, 23586,
    25079, 26557, 28020, 29465, 30893, 32302, 33692, 35061,
    36409, 37736, 39039, 40319, 41575, 42806, 44011, 45189,
    46340, 47464, 48558, 49624, 50659, 51664, 52638, 53580,
    54490, 55367, 56211, 57021, 57797, 58537, 59243, 59913,
    60546, 61144, 61704, 62227, 62713, 63161, 63571, 63943,
    64276, 64570, 64826, 65042, 65219, 65357, 65456, 65515,
    65535,
];

// Interpolated sine over [0, QUARTER_TURN]
fn quarter_sin(offset: i32) -> i32 {
    let idx = (offset >> TABLE_STEP_BITS) as usize;
    let frac = offset & ((1 << TABLE_STEP_BITS) - 1);
    if idx + 1 >= QUARTER_SIN.len() {
        return QUARTER_SIN[QUARTER_SIN.len() - 1];
    }
    let lo = QUARTER_SIN[idx];
    let hi = QUARTER_SIN[idx + 1];
    lo + (((hi - lo) * frac) >> TABLE_STEP_BITS)
}

/// Sine of `angle` (turn units), scaled by `TRIG_MAX_RATIO`.
///
/// Any angle is accepted and wrapped into one turn first.
pub fn sin_lookup(angle: i32) -> i32 {
    let a = angle.rem_euclid(TRIG_MAX_ANGLE);
    let within = a % QUARTER_TURN;
    match a / QUARTER_TURN {
        0 => quarter_sin(within),
        1 => quarter_sin(QUARTER_TURN - within),
        2 => -quarter_sin(within),
        _ => -quarter_sin(QUARTER_TURN - within),
    }
}

/// Cosine of `angle` (turn units), scaled by `TRIG_MAX_RATIO`.
pub fn cos_lookup(angle: i32) -> i32 {
    sin_lookup(angle.wrapping_add(QUARTER_TURN))
}

/// Fixed-point angle for `magnitude_percent` of a turn. Magnitudes above 100
/// are clamped.
pub fn percent_to_angle(magnitude_percent: u8) -> i32 {
    TRIG_MAX_ANGLE * i32::from(magnitude_percent.min(100)) / 100
}

/// Offset from a ring centre to its boundary at `magnitude_percent` of a turn,
/// measured clockwise from 12 o'clock (screen y grows downward).
pub fn map_angle(radius: i32, magnitude_percent: u8) -> Point {
    let angle = percent_to_angle(magnitude_percent);
    Point::new(
        sin_lookup(angle) * radius / TRIG_MAX_RATIO,
        -cos_lookup(angle) * radius / TRIG_MAX_RATIO,
    )
}

/// Where a sweep ends on one ring. Built and dropped inside a single redraw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SweepGeometry {
    pub angle: i32,
    pub boundary: Point,
    pub magnitude: u8,
    pub direction: Direction,
}

impl SweepGeometry {
    /// Resolve `completion` on the circle at `center` with `radius`.
    pub fn new(center: Point, radius: i32, completion: Completion) -> Self {
        Self::from_parts(center, radius, completion.magnitude(), completion.direction())
    }

    /// Backward sweeps mirror the boundary across the vertical axis.
    pub fn from_parts(center: Point, radius: i32, magnitude: u8, direction: Direction) -> Self {
        let magnitude = magnitude.min(100);
        let offset = map_angle(radius, magnitude);
        let dx = match direction {
            Direction::Forward => offset.x,
            Direction::Backward => -offset.x,
        };
        Self {
            angle: percent_to_angle(magnitude),
            boundary: Point::new(center.x + dx, center.y + offset.y),
            magnitude,
            direction,
        }
    }
}
