//! Display setup and initialization module.
//
// - `setup_display` brings up the GC9A01 (240x240) through mipidsi.
// - Pins come from `wiring::DisplayPins`.
// - The watch face renders into a framebuffer and is pushed here in one
//   `fill_contiguous` per tick.

use esp_hal::{
    delay::Delay,
    gpio::Output,
    spi::master::{Config as SpiConfig, Spi},
    spi::Mode,
    time::Rate,
    Blocking,
};

use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::{
    models::GC9A01,
    options::{ColorInversion, ColorOrder, Orientation, Rotation},
    Builder as DisplayBuilder,
};

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::wiring::DisplayPins;

pub type DisplayType<'a> = mipidsi::Display<
    SpiInterface<'a, ExclusiveDevice<Spi<'a, Blocking>, Output<'a>, NoDelay>, Output<'a>>,
    GC9A01,
    Output<'a>,
>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplaySetupError {
    SpiConfig,
    ChipSelect,
    PanelInit,
}

pub fn setup_display<'a>(
    display_pins: DisplayPins<'a>,
    display_buf: &'a mut [u8],
) -> Result<DisplayType<'a>, DisplaySetupError> {
    let DisplayPins {
        spi2,
        spi_sck,
        spi_mosi,
        lcd_cs,
        lcd_dc,
        lcd_rst,
        mut lcd_bl,
    } = display_pins;

    // SPI @ 40 MHz, Mode 0
    let spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_mhz(40))
        .with_mode(Mode::_0);

    let spi = Spi::new(spi2, spi_cfg)
        .map_err(|_| DisplaySetupError::SpiConfig)?
        .with_sck(spi_sck)
        .with_mosi(spi_mosi);

    // SPI device + DisplayInterface (needs D/C and a buffer)
    let spi_dev =
        ExclusiveDevice::new(spi, lcd_cs, NoDelay).map_err(|_| DisplaySetupError::ChipSelect)?;
    let di = SpiInterface::new(spi_dev, lcd_dc, display_buf);
    let mut delay = Delay::new();

    let display = DisplayBuilder::new(GC9A01, di)
        .display_size(DISPLAY_WIDTH as u16, DISPLAY_HEIGHT as u16)
        .display_offset(0, 0)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(lcd_rst)
        .init(&mut delay)
        .map_err(|_| DisplaySetupError::PanelInit)?;

    // Backlight on after panel init
    lcd_bl.set_high();
    Ok(display)
}
