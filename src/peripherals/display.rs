//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use mipidsi::{models::ST7789, Builder, Orientation};
use pinetime_motd::{
    config::{SCREEN_HEIGHT, SCREEN_WIDTH},
    ui::WatchFace,
};

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

/// ST7789 LCD on SPI
pub struct Display<'a, SPI>
where
    SPI: spim::Instance,
{
    lcd: Lcd<'a, SPI>,
}

impl<'a, SPI> Display<'a, SPI>
where
    SPI: spim::Instance,
{
    /// Initialize the display
    pub fn init(
        spim: Spim<'a, SPI>,
        cs: Output<'a, P0_25>,
        dc: Output<'a, P0_18>,
        rst: Output<'a, P0_26>,
        delay: &mut Delay,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc, cs))
            .with_display_size(SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16)
            .with_orientation(Orientation::Portrait(false))
            .init(delay, Some(rst))
            .map_err(|_| Error::Init)?;

        let mut display = Self { lcd };
        display.clear()?;
        Ok(display)
    }

    /// Clear the display
    pub fn clear(&mut self) -> Result<(), Error> {
        self.lcd.clear(Rgb565::BLACK).map_err(|_| Error::Draw)
    }

    /// Draw the whole watch face
    pub fn render<W: WatchFace>(&mut self, face: &W) -> Result<(), Error> {
        face.draw(&mut self.lcd).map_err(|_| Error::Draw)
    }

    /// Draw the animated parts of the watch face
    pub fn render_frame<W: WatchFace>(&mut self, face: &W) -> Result<(), Error> {
        face.draw_frame(&mut self.lcd).map_err(|_| Error::Draw)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Controller did not come up
    Init,
    /// SPI transfer failed while drawing
    Draw,
}
