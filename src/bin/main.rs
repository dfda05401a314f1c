//! Ring Watch
//! ========================================
//! needs to be run in WSL2 terminal
//! source ~/export-esp.sh
//! cargo run --release --features firmware
//! ========================================
//!
//! Hour and minute progress rings on a GC9A01 round panel.
//! Wall-clock time comes from the PCF85063 at boot and advances on the
//! system timer; the face is redrawn once per minute.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

// Define the application description, which is placed in a special section of the binary.
// This is used by the bootloader to verify the application.
// The macro automatically fills in the fields.
esp_bootloader_esp_idf::esp_app_desc!();

// Module imports
use ring_watch::{
    clock::{ClockTime, MinuteTicker, SharedClock},
    config::{Palette, DISPLAY_HEIGHT, DISPLAY_WIDTH},
    display::setup_display,
    face::WatchFace,
    rtc_pcf85063::Pcf85063,
    wiring::{init_board_pins, BoardPins, RtcPins},
};

use esp_backtrace as _;

// ESP-HAL imports
use esp_hal::{
    delay::Delay,
    i2c::master::{Config as I2cConfig, I2c},
    main,
    time::Rate,
    timer::systimer::{SystemTimer, Unit},
    Config,
};

// Embedded-graphics
use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::Rgb565,
    prelude::{OriginDimensions, Point, RgbColor},
    primitives::Rectangle,
};
use embedded_graphics_framebuf::FrameBuf;

// Println macro
use esp_println::println;

// Allocator for the framebuffer
extern crate alloc;
use alloc::{boxed::Box, vec};

const FB_W: usize = DISPLAY_WIDTH as usize;
const FB_H: usize = DISPLAY_HEIGHT as usize;
const FB_LEN: usize = FB_W * FB_H;

// How often the main loop samples the clock
const POLL_MS: u32 = 250;

// Latest minute tick, written by the tick side of the loop and read by the render side
static NOW: SharedClock = SharedClock::new(ClockTime::MIDNIGHT);

fn uptime_secs() -> u32 {
    let t = SystemTimer::unit_value(Unit::Unit0);
    (t / SystemTimer::ticks_per_second()) as u32
}

// Unix seconds from the external RTC, if it is present and trustworthy
fn read_rtc(pins: RtcPins<'static>) -> Option<u32> {
    let cfg = I2cConfig::default().with_frequency(Rate::from_khz(400));
    let i2c = match I2c::new(pins.i2c0, cfg) {
        Ok(i2c) => i2c.with_sda(pins.sda).with_scl(pins.scl),
        Err(e) => {
            println!("[RTC] I2C init failed: {:?}", e);
            return None;
        }
    };

    let mut rtc = Pcf85063::new(i2c);
    match rtc.read_unix() {
        Ok(Some(secs)) => {
            println!("[RTC] boot time {}", secs);
            Some(secs)
        }
        Ok(None) => {
            println!("[RTC] VL set or date invalid, ignoring");
            None
        }
        Err(e) => {
            println!("[RTC] read failed: {:?}", e);
            None
        }
    }
}

#[main]
fn main() -> ! {
    // Initialize peripherals
    let peripherals = esp_hal::init(Config::default());

    esp_alloc::heap_allocator!(size: 160 * 1024);

    // one call gives you all role pins from wiring.rs
    let BoardPins {
        display_pins,
        rtc_pins,
    } = init_board_pins(peripherals);

    let display_buf: &'static mut [u8] = Box::leak(vec![0u8; 1024].into_boxed_slice());
    let mut display = setup_display(display_pins, display_buf).expect("display init failed");

    // -------------------- Wall clock --------------------
    let boot_unix = read_rtc(rtc_pins).unwrap_or_else(|| {
        println!("[RTC] starting from midnight");
        0
    });
    let boot_uptime = uptime_secs();

    // -------------------- Face --------------------
    let fb_data: Box<[Rgb565; FB_LEN]> = vec![Rgb565::BLACK; FB_LEN]
        .into_boxed_slice()
        .try_into()
        .expect("framebuffer size");
    let mut fb = FrameBuf::new(Box::leak(fb_data), FB_W, FB_H);

    let face = WatchFace::for_target(&fb, Palette::default()).expect("face layout");
    println!("[face] layout {:?}", face.layout());

    let mut ticker = MinuteTicker::new();
    let mut needs_redraw = false;
    let delay = Delay::new();

    // Main loop: tick on minute boundaries, redraw on tick
    loop {
        let now = boot_unix.wrapping_add(uptime_secs().wrapping_sub(boot_uptime));
        if let Some(time) = ticker.poll(now) {
            NOW.store(time);
            needs_redraw = true;
        }

        if needs_redraw {
            let time = NOW.load();
            face.draw(&mut fb, time).ok();

            let area = Rectangle::new(Point::zero(), fb.size());
            if let Err(e) = display.fill_contiguous(&area, fb.data.iter().copied()) {
                println!("[face] push failed: {:?}", e);
            }
            println!("[face] {:02}:{:02}", time.hour(), time.minute());
            needs_redraw = false;
        }

        delay.delay_millis(POLL_MS);
    }
}
