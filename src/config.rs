// Fixed watch-face constants and colour palettes.
// Board-specific panel sizes are picked by Cargo feature, like the wiring profiles.

use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::RgbColor;

cfg_if::cfg_if! {
    if #[cfg(feature = "devkit-esp32s3-disp128")] {
        // GC9A01 round panel
        pub const DISPLAY_WIDTH: u32 = 240;
        pub const DISPLAY_HEIGHT: u32 = 240;
    } else {
        // classic 144x168 watch panel, also the host default
        pub const DISPLAY_WIDTH: u32 = 144;
        pub const DISPLAY_HEIGHT: u32 = 168;
    }
}

pub const HOURS_STROKE_WIDTH: i32 = 22;
pub const MINUTES_STROKE_WIDTH: i32 = 14;

/// Concentric 1px circles per outline boundary.
pub const OUTLINE_COUNT: i32 = 3;

// Minute ring box, as percent of the surface: offset and size
pub const MINUTE_RING_INSET_PCT: u32 = 26;
pub const MINUTE_RING_SPAN_PCT: u32 = 48;

/// Colours for the ring fill, the carved-out background and the outlines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette<C> {
    pub foreground: C,
    pub background: C,
    pub outline: C,
}

impl Default for Palette<BinaryColor> {
    fn default() -> Self {
        Self {
            foreground: BinaryColor::On,
            background: BinaryColor::Off,
            outline: BinaryColor::On,
        }
    }
}

impl Default for Palette<Rgb565> {
    fn default() -> Self {
        Self {
            foreground: Rgb565::WHITE,
            background: Rgb565::BLACK,
            outline: Rgb565::WHITE,
        }
    }
}
