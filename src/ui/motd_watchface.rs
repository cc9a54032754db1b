//! Message of the day watchface
//!
//! ```text
//! +------------------------------+
//! |           12:34:56           |  clock
//! +------------------------------+
//! | For we labor diligently to   |
//! | write, to persuade our       |  message, scrolls
//! | children, and also our ...   |
//! +------------------------------+
//! | connected              100%  |  status bar
//! +------------------------------+
//! ```

use chrono::NaiveDateTime;
use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{iso_8859_1::FONT_10X20, MonoTextStyle},
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Alignment,
};
use embedded_text::{
    alignment::HorizontalAlignment,
    style::{HeightMode, TextBoxStyle, TextBoxStyleBuilder},
    TextBox,
};
use profont::PROFONT_24_POINT;

use super::{
    format,
    label::Label,
    scroll::{ScrollPacer, ScrollPhase, ScrollState},
    scroll_view::ScrollView,
    BatteryInfo, WatchFace, WatchFaceState,
};
use crate::config::{
    CONNECTION_WIDTH, CONTENT_PADDING, MESSAGE_HEIGHT, MESSAGE_TOP, PAUSE_THRESHOLD,
    SCREEN_HEIGHT, SCREEN_WIDTH, STATUS_HEIGHT, TIME_HEIGHT,
};

const BACKGROUND: Rgb565 = Rgb565::BLACK;
const FOREGROUND: Rgb565 = Rgb565::WHITE;

fn message_textbox_style() -> TextBoxStyle {
    TextBoxStyleBuilder::new()
        .height_mode(HeightMode::FitToText)
        .alignment(HorizontalAlignment::Left)
        .build()
}

/// Watchface with a clock, a scrolling message and a status bar
pub struct MotdWatchface<'a> {
    /// Time label
    time_label: Label<8>,
    /// Connection label, also used for the scroll debug text
    connection_label: Label<16>,
    /// Power indicator label
    battery_label: Label<4>,
    /// Message text and its style
    message: &'a str,
    message_style: MonoTextStyle<'static, Rgb565>,
    /// Viewport the message scrolls in
    view: ScrollView,
    pacer: ScrollPacer,
    scroll: ScrollState,
}

impl<'a> MotdWatchface<'a> {
    /// Lay out the watchface and measure the message.
    pub fn new(message: &'a str) -> Self {
        let message_style = MonoTextStyle::new(&FONT_10X20, FOREGROUND);

        // Content is never shorter than the viewport
        let text_height =
            message_textbox_style().measure_text_height(&message_style, message, SCREEN_WIDTH);
        let content_height =
            text_height.max(MESSAGE_HEIGHT - CONTENT_PADDING) + CONTENT_PADDING;

        let viewport = Rectangle::new(
            Point::new(0, MESSAGE_TOP),
            Size::new(SCREEN_WIDTH, MESSAGE_HEIGHT),
        );
        let status_top = (SCREEN_HEIGHT - STATUS_HEIGHT) as i32;

        Self {
            time_label: Label::new(
                Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, TIME_HEIGHT)),
                MonoTextStyle::new(&PROFONT_24_POINT, FOREGROUND),
                BACKGROUND,
                Alignment::Center,
            ),
            connection_label: Label::new(
                Rectangle::new(
                    Point::new(0, status_top),
                    Size::new(CONNECTION_WIDTH, STATUS_HEIGHT),
                ),
                MonoTextStyle::new(&FONT_10X20, FOREGROUND),
                BACKGROUND,
                Alignment::Left,
            ),
            battery_label: Label::new(
                Rectangle::new(
                    Point::new(CONNECTION_WIDTH as i32, status_top),
                    Size::new(SCREEN_WIDTH - CONNECTION_WIDTH, STATUS_HEIGHT),
                ),
                MonoTextStyle::new(&FONT_10X20, FOREGROUND),
                BACKGROUND,
                Alignment::Right,
            ),
            message,
            message_style,
            view: ScrollView::new(viewport, content_height),
            pacer: ScrollPacer::default(),
            scroll: ScrollState::new(PAUSE_THRESHOLD),
        }
    }

    /// Create the watchface and show the current state right away.
    pub fn load(message: &'a str, state: &WatchFaceState) -> Self {
        let mut face = Self::new(message);
        face.handle_connection(state.connected);
        face.handle_tick(&state.time);
        face.handle_battery(state.battery);
        face
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.scroll.phase(self.view.geometry(), self.pacer.slack())
    }

    pub fn scroll_view(&self) -> &ScrollView {
        &self.view
    }

    pub fn time_text(&self) -> &str {
        self.time_label.text()
    }

    pub fn connection_text(&self) -> &str {
        self.connection_label.text()
    }

    pub fn battery_text(&self) -> &str {
        self.battery_label.text()
    }

    /// Clear the viewport and draw the message at the rendered offset
    fn draw_message<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let viewport = self.view.viewport();
        viewport
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(display)?;

        let bounds = Rectangle::new(
            viewport.top_left + Point::new(0, self.view.rendered_offset()),
            Size::new(viewport.size.width, self.view.content_height()),
        );
        TextBox::with_textbox_style(
            self.message,
            bounds,
            self.message_style,
            message_textbox_style(),
        )
        .draw(&mut display.clipped(&viewport))?;

        Ok(())
    }
}

impl WatchFace for MotdWatchface<'_> {
    fn handle_tick(&mut self, time: &NaiveDateTime) {
        self.time_label.set_text(&format::clock_text(time));

        let (next, command) = self.pacer.tick(self.scroll, self.view.geometry());
        if let Some(command) = command {
            self.view.apply(command);
        }
        // The view may clamp the offset at the end of the content
        self.scroll = ScrollState {
            offset: self.view.offset(),
            ..next
        };

        #[cfg(feature = "scroll-debug")]
        self.connection_label
            .set_text(&format::scroll_debug_text(&self.scroll));
    }

    fn handle_battery(&mut self, info: BatteryInfo) {
        self.battery_label.set_text(&format::battery_text(info));
    }

    fn handle_connection(&mut self, connected: bool) {
        self.connection_label
            .set_text(format::connection_text(connected));
    }

    fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.time_label.draw(display)?;
        self.draw_message(display)?;
        self.connection_label.draw(display)?;
        self.battery_label.draw(display)?;
        Ok(())
    }

    fn next_frame(&mut self) -> bool {
        self.view.advance_frame()
    }

    fn draw_frame<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.draw_message(display)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MESSAGE, SCROLL_ANIMATION_FRAMES};
    use crate::ui::tests::TestDisplay;
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    fn loaded(message: &str) -> MotdWatchface<'_> {
        MotdWatchface::load(
            message,
            &WatchFaceState {
                time: at(12, 34, 56),
                battery: BatteryInfo {
                    percent: 57,
                    charging: false,
                },
                connected: true,
            },
        )
    }

    #[test]
    fn test_load_shows_current_state() {
        let face = loaded(MESSAGE);
        assert_eq!(face.time_text(), "12:34:56");
        assert_eq!(face.battery_text(), "57%");
        #[cfg(not(feature = "scroll-debug"))]
        assert_eq!(face.connection_text(), "connected");

        // Load counts as the first tick
        assert_eq!(face.scroll_state().pause_counter, 1);
        assert_eq!(face.scroll_state().offset, 0);
    }

    #[test]
    fn test_long_message_is_taller_than_viewport() {
        let face = MotdWatchface::new(MESSAGE);
        assert!(face.scroll_view().content_height() > MESSAGE_HEIGHT);
        assert!(face.scroll_view().max_scroll() > 0);
        assert_eq!(face.scroll_phase(), ScrollPhase::WaitingToScroll);
    }

    #[test]
    fn test_short_message_fills_viewport() {
        let face = MotdWatchface::new("Short.");
        assert_eq!(face.scroll_view().content_height(), MESSAGE_HEIGHT);
        assert_eq!(face.scroll_view().max_scroll(), 0);
    }

    #[test]
    fn test_short_message_never_scrolls() {
        let mut face = MotdWatchface::new("Short.");
        for sec in 0..30 {
            face.handle_tick(&at(8, 0, sec));
            assert_eq!(face.scroll_state().offset, 0);
            assert_eq!(face.scroll_state().pause_counter, 0);
            assert!(!face.scroll_view().is_animating());
        }
    }

    #[test]
    fn test_ticks_update_clock() {
        let mut face = loaded(MESSAGE);
        face.handle_tick(&at(23, 59, 59));
        assert_eq!(face.time_text(), "23:59:59");
    }

    #[test]
    fn test_battery_and_connection_events() {
        let mut face = loaded(MESSAGE);
        face.handle_battery(BatteryInfo {
            percent: 12,
            charging: true,
        });
        assert_eq!(face.battery_text(), "++%");

        face.handle_connection(false);
        assert_eq!(face.connection_text(), "disconnected");
    }

    #[cfg(feature = "scroll-debug")]
    #[test]
    fn test_scroll_debug_overrides_connection_label() {
        let mut face = loaded(MESSAGE);
        face.handle_tick(&at(12, 34, 57));
        assert_eq!(face.connection_text(), "2|5");
    }

    #[test]
    fn test_message_scrolls_after_pause() {
        let mut face = MotdWatchface::new(MESSAGE);
        for sec in 0..6 {
            face.handle_tick(&at(9, 0, sec));
            assert_eq!(face.scroll_state().offset, 0);
        }
        assert_eq!(face.scroll_phase(), ScrollPhase::Scrolling);

        face.handle_tick(&at(9, 0, 6));
        assert_eq!(face.scroll_state().offset, -10);
        assert!(face.scroll_view().is_animating());

        let mut frames = 0;
        while face.next_frame() {
            frames += 1;
        }
        assert_eq!(frames, SCROLL_ANIMATION_FRAMES - 1);
        assert_eq!(face.scroll_view().rendered_offset(), -10);
    }

    #[test]
    fn test_message_returns_to_top() {
        let mut face = MotdWatchface::new(MESSAGE);
        let max_scroll = face.scroll_view().max_scroll();
        let mut reached_end = false;

        for tick in 0..1000 {
            face.handle_tick(&at(10, tick / 60, tick % 60));
            while face.next_frame() {}

            let offset = face.scroll_state().offset;
            assert!(offset <= 0 && offset >= -max_scroll);
            if offset == -max_scroll {
                reached_end = true;
            }
            if reached_end && offset == 0 {
                return;
            }
        }
        panic!("message never returned to the top");
    }

    #[test]
    fn test_draw_covers_all_regions() {
        let face = loaded(MESSAGE);
        let mut display = TestDisplay::new();
        face.draw(&mut display).unwrap();

        let lit: Vec<Point> = display.lit().collect();
        let status_top = (SCREEN_HEIGHT - STATUS_HEIGHT) as i32;
        assert!(lit.iter().any(|p| p.y < MESSAGE_TOP));
        assert!(lit.iter().any(|p| p.y >= MESSAGE_TOP && p.y < status_top));
        assert!(lit.iter().any(|p| p.y >= status_top && p.x < CONNECTION_WIDTH as i32));
        assert!(lit.iter().any(|p| p.y >= status_top && p.x >= CONNECTION_WIDTH as i32));
    }

    #[test]
    fn test_frame_only_touches_viewport() {
        let mut face = MotdWatchface::new(MESSAGE);
        for sec in 0..8 {
            face.handle_tick(&at(11, 0, sec));
        }
        assert!(face.scroll_state().offset < 0);

        let mut display = TestDisplay::new();
        display.fill(Rgb565::RED);
        face.draw_frame(&mut display).unwrap();

        let viewport = face.scroll_view().viewport();
        for point in display.bounding_box().points() {
            if !viewport.contains(point) {
                assert_eq!(display.pixel(point), Rgb565::RED);
            }
        }
    }
}
