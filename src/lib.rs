#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod face;
pub mod mask;
pub mod raster;
pub mod ring;
pub mod rtc_pcf85063;
pub mod trig;

#[cfg(feature = "devkit-esp32s3-disp128")]
pub mod display;
#[cfg(feature = "devkit-esp32s3-disp128")]
pub mod wiring;
