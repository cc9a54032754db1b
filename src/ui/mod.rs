//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use chrono::NaiveDateTime;
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565};

pub mod format;
pub mod label;
pub mod motd_watchface;
pub mod scroll;
pub mod scroll_view;

pub use motd_watchface::MotdWatchface;

/// Events delivered to a watch face, and how it draws itself.
///
/// Event sources call the handlers one at a time; a handler never runs
/// while another one is in progress.
pub trait WatchFace {
    /// Called once per second with the current local time
    fn handle_tick(&mut self, time: &NaiveDateTime);

    /// Called when charge level or charging state changed
    fn handle_battery(&mut self, info: BatteryInfo);

    /// Called when the BLE connection state changed
    fn handle_connection(&mut self, connected: bool);

    /// Redraw the whole watch face
    fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    /// Advance running animations. Returns `true` if a frame must be drawn.
    fn next_frame(&mut self) -> bool {
        false
    }

    /// Redraw only the animated parts of the watch face
    fn draw_frame<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.draw(display)
    }
}

/// Battery charge as seen by the watch face
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct BatteryInfo {
    /// Charge in percent (0–100)
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}

/// State for the watch face at load time
#[derive(Clone, Copy, Debug)]
pub struct WatchFaceState {
    pub time: NaiveDateTime,
    pub battery: BatteryInfo,
    pub connected: bool,
}

#[cfg(test)]
pub(crate) mod tests {
    use embedded_graphics::{pixelcolor::Rgb565, prelude::*, Pixel};

    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

    const LEN: usize = (SCREEN_WIDTH * SCREEN_HEIGHT) as usize;

    /// In-memory frame buffer the size of the LCD
    pub struct TestDisplay {
        pixels: Vec<Rgb565>,
    }

    impl TestDisplay {
        pub fn new() -> Self {
            Self {
                pixels: vec![Rgb565::BLACK; LEN],
            }
        }

        pub fn pixel(&self, point: Point) -> Rgb565 {
            self.pixels[point.y as usize * SCREEN_WIDTH as usize + point.x as usize]
        }

        /// Points drawn in any color other than black
        pub fn lit(&self) -> impl Iterator<Item = Point> + '_ {
            self.bounding_box()
                .points()
                .filter(move |p| self.pixel(*p) != Rgb565::BLACK)
        }

        pub fn fill(&mut self, color: Rgb565) {
            self.pixels.iter_mut().for_each(|p| *p = color);
        }
    }

    impl OriginDimensions for TestDisplay {
        fn size(&self) -> Size {
            Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
        }
    }

    impl DrawTarget for TestDisplay {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if self.bounding_box().contains(point) {
                    let idx = point.y as usize * SCREEN_WIDTH as usize + point.x as usize;
                    self.pixels[idx] = color;
                }
            }
            Ok(())
        }
    }
}
