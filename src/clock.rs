//! Wall-clock state and the completion values the rings are drawn from.
//!
//! This module provides:
//! - `ClockTime`, the hour/minute pair handed to every redraw
//! - `Completion` and `Direction`, the signed percentage a ring sweeps
//! - `compute_completions` to derive both ring values from a `ClockTime`
//! - `MinuteTicker` to turn a running seconds counter into per-minute ticks
//! - `SharedClock` for handing the latest tick across an interrupt boundary

use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 3_600;
const SECS_PER_DAY: u32 = 86_400;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClockError {
    HourOutOfRange(u8),
    MinuteOutOfRange(u8),
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::HourOutOfRange(h) => write!(f, "hour {} not in 0..=23", h),
            ClockError::MinuteOutOfRange(m) => write!(f, "minute {} not in 0..=59", m),
        }
    }
}

/// Hour (0..=23) and minute (0..=59) of the current wall-clock time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    pub fn new(hour: u8, minute: u8) -> Result<Self, ClockError> {
        if hour > 23 {
            return Err(ClockError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ClockError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    /// UTC time of day for a Unix timestamp. Seconds are dropped.
    pub fn from_unix(secs: u32) -> Self {
        let of_day = secs % SECS_PER_DAY;
        Self {
            hour: (of_day / SECS_PER_HOUR) as u8,
            minute: ((of_day % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8,
        }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompletionError {
    OutOfRange(i32),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::OutOfRange(v) => write!(f, "completion {} not in -100..=100", v),
        }
    }
}

/// Which way a ring sweeps away from 12 o'clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise
    Forward,
    /// Counter-clockwise
    Backward,
}

/// Signed percentage in `-100..=100`: the magnitude is how much of the cycle
/// the ring sweeps and the sign picks the direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Completion(i8);

impl Completion {
    pub const ZERO: Completion = Completion(0);

    pub fn new(value: i32) -> Result<Self, CompletionError> {
        if !(-100..=100).contains(&value) {
            return Err(CompletionError::OutOfRange(value));
        }
        Ok(Self(value as i8))
    }

    pub fn saturating(value: i32) -> Self {
        Self(value.clamp(-100, 100) as i8)
    }

    pub fn value(self) -> i8 {
        self.0
    }

    pub fn magnitude(self) -> u8 {
        self.0.unsigned_abs()
    }

    pub fn direction(self) -> Direction {
        if self.0 < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}

/// Completion values for both rings at one instant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Completions {
    pub hour: Completion,
    pub minute: Completion,
}

/// Derive the hour and minute ring values for `time`.
///
/// The minute ring flips direction every odd hour and the hour ring runs
/// backward before noon, so neighbouring hours and half-days read differently.
pub fn compute_completions(time: ClockTime) -> Completions {
    let hour = i32::from(time.hour);
    let minute = i32::from(time.minute);

    let mut minute_completion = minute * 100 / 60;
    if hour % 2 == 1 {
        minute_completion -= 100;
    }

    let mut hour_completion = ((hour % 12) * 60 + minute) * 100 / 720;
    if hour < 12 {
        hour_completion -= 100;
    }

    // both stay within -100..=99 for any valid ClockTime
    Completions {
        hour: Completion::saturating(hour_completion),
        minute: Completion::saturating(minute_completion),
    }
}

/// Emits a `ClockTime` whenever the sampled time enters a new minute.
///
/// The first sample always ticks, aligned to a minute boundary or not.
#[derive(Debug, Default)]
pub struct MinuteTicker {
    last_minute: Option<u32>,
}

impl MinuteTicker {
    pub const fn new() -> Self {
        Self { last_minute: None }
    }

    pub fn poll(&mut self, unix_secs: u32) -> Option<ClockTime> {
        let minute = unix_secs / SECS_PER_MINUTE;
        if self.last_minute == Some(minute) {
            return None;
        }
        self.last_minute = Some(minute);
        Some(ClockTime::from_unix(unix_secs))
    }
}

/// Latest tick, written by the timer side and snapshotted by the render side.
pub struct SharedClock {
    now: Mutex<Cell<ClockTime>>,
}

impl SharedClock {
    pub const fn new(initial: ClockTime) -> Self {
        Self {
            now: Mutex::new(Cell::new(initial)),
        }
    }

    pub fn store(&self, time: ClockTime) {
        critical_section::with(|cs| self.now.borrow(cs).set(time));
    }

    pub fn load(&self) -> ClockTime {
        critical_section::with(|cs| self.now.borrow(cs).get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u8, minute: u8) -> Completions {
        compute_completions(ClockTime::new(hour, minute).unwrap())
    }

    #[test]
    fn rejects_invalid_time() {
        assert_eq!(ClockTime::new(24, 0), Err(ClockError::HourOutOfRange(24)));
        assert_eq!(ClockTime::new(0, 60), Err(ClockError::MinuteOutOfRange(60)));
    }

    #[test]
    fn completion_range_and_sign() {
        assert!(Completion::new(101).is_err());
        assert!(Completion::new(-101).is_err());
        let c = Completion::new(-37).unwrap();
        assert_eq!(c.magnitude(), 37);
        assert_eq!(c.direction(), Direction::Backward);
        assert_eq!(Completion::ZERO.direction(), Direction::Forward);
        assert_eq!(Completion::saturating(-300).value(), -100);
        assert_eq!(Completion::new(-100).unwrap().magnitude(), 100);
    }

    #[test]
    fn midnight() {
        let c = at(0, 0);
        assert_eq!(c.hour.value(), -100);
        // hour 0 is even, so the minute ring does not reverse
        assert_eq!(c.minute.value(), 0);
    }

    #[test]
    fn noon_switches_hour_ring_forward() {
        let c = at(12, 0);
        assert_eq!(c.hour.value(), 0);
        assert_eq!(c.minute.value(), 0);
        assert_eq!(at(11, 59).hour.direction(), Direction::Backward);
        assert_eq!(c.hour.direction(), Direction::Forward);
    }

    #[test]
    fn half_past_one_pm() {
        let c = at(13, 30);
        assert_eq!(c.minute.value(), -50);
        assert_eq!(c.hour.value(), 12);
    }

    #[test]
    fn same_time_same_values() {
        assert_eq!(at(17, 42), at(17, 42));
    }

    #[test]
    fn monotonic_within_parity_and_half() {
        for hour in 0..24u8 {
            let mut prev = at(hour, 0);
            for minute in 1..60u8 {
                let cur = at(hour, minute);
                assert!(cur.minute.value() >= prev.minute.value());
                assert!(cur.hour.value() >= prev.hour.value());
                prev = cur;
            }
        }
        for half in [0u8, 12] {
            let mut prev = at(half, 0).hour.value();
            for hour in half..half + 12 {
                for minute in 0..60 {
                    let cur = at(hour, minute).hour.value();
                    assert!(cur >= prev);
                    prev = cur;
                }
            }
        }
    }

    #[test]
    fn from_unix_uses_time_of_day() {
        // 2024-03-10 13:30:59 UTC
        let t = ClockTime::from_unix(1_710_077_459);
        assert_eq!((t.hour(), t.minute()), (13, 30));
    }

    #[test]
    fn ticker_fires_once_per_minute() {
        let mut ticker = MinuteTicker::new();
        // unaligned start still ticks immediately
        assert_eq!(ticker.poll(125), ClockTime::new(0, 2).ok());
        assert_eq!(ticker.poll(150), None);
        assert_eq!(ticker.poll(179), None);
        assert_eq!(ticker.poll(180), ClockTime::new(0, 3).ok());
        assert_eq!(ticker.poll(181), None);
    }

    #[test]
    fn shared_clock_latest_tick_wins() {
        let shared = SharedClock::new(ClockTime::MIDNIGHT);
        assert_eq!(shared.load(), ClockTime::MIDNIGHT);
        shared.store(ClockTime::new(9, 15).unwrap());
        shared.store(ClockTime::new(9, 16).unwrap());
        assert_eq!(shared.load(), ClockTime::new(9, 16).unwrap());
    }
}
