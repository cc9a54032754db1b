//! Text for the watch face labels.

use core::fmt::Write;

use chrono::Timelike;
use heapless::String;

use super::BatteryInfo;
#[cfg(feature = "scroll-debug")]
use super::scroll::ScrollState;

/// Shown instead of the percentage while charging.
pub const CHARGING_TEXT: &str = "++%";

pub const CONNECTED_TEXT: &str = "connected";
pub const DISCONNECTED_TEXT: &str = "disconnected";

/// Time as `HH:MM:SS`.
pub fn clock_text<T: Timelike>(time: &T) -> String<8> {
    let mut text = String::new();
    let _ = write!(
        text,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    text
}

/// Battery charge as `<percent>%`, or the charging indicator.
pub fn battery_text(info: BatteryInfo) -> String<4> {
    let mut text = String::new();
    if info.charging {
        let _ = text.push_str(CHARGING_TEXT);
    } else {
        let _ = write!(text, "{}%", info.percent.min(100));
    }
    text
}

pub fn connection_text(connected: bool) -> &'static str {
    if connected {
        CONNECTED_TEXT
    } else {
        DISCONNECTED_TEXT
    }
}

/// Pause counter and threshold as `<counter>|<threshold>`.
#[cfg(feature = "scroll-debug")]
pub fn scroll_debug_text(state: &ScrollState) -> String<16> {
    let mut text = String::new();
    let _ = write!(text, "{}|{}", state.pause_counter, state.pause_threshold);
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
