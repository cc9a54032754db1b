//! Watch face configuration.
//!
//! Display geometry, scroll pacing and the message shown by the watch face.
//! All values are compile-time constants.

// =============================================================================
// Display
// =============================================================================

/// LCD width in pixels (ST7789, 240x240)
pub const SCREEN_WIDTH: u32 = 240;

/// LCD height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Backlight level set on boot (0 = off, 7 = max)
pub const BACKLIGHT_LEVEL: u8 = 2;

// =============================================================================
// Layout
// =============================================================================

/// Height of the clock row at the top of the screen.
pub const TIME_HEIGHT: u32 = 40;

/// Height of the status bar (connection + battery) at the bottom.
pub const STATUS_HEIGHT: u32 = 30;

/// Width of the connection label, the battery label takes the rest.
pub const CONNECTION_WIDTH: u32 = 170;

/// Top edge of the message viewport.
pub const MESSAGE_TOP: i32 = TIME_HEIGHT as i32;

/// Height of the message viewport between clock and status bar.
pub const MESSAGE_HEIGHT: u32 = SCREEN_HEIGHT - TIME_HEIGHT - STATUS_HEIGHT;

/// Space added below the wrapped message so the last line is not flush with
/// the viewport edge once fully scrolled.
pub const CONTENT_PADDING: u32 = 4;

// =============================================================================
// Scroll pacing
// =============================================================================

/// Ticks to hold the message before scrolling starts, and before it snaps
/// back to the top once the end is reached.
pub const PAUSE_THRESHOLD: u8 = 5;

/// Pixels scrolled per tick.
pub const SCROLL_STEP: i32 = 10;

/// Remaining scroll distance below which the message counts as fully
/// scrolled. Smaller than one step so the pacer never micro-scrolls.
pub const SLACK_THRESHOLD: i32 = 9;

/// Frames used to animate one scroll step.
pub const SCROLL_ANIMATION_FRAMES: u8 = 5;

/// Delay between two animation frames in milliseconds.
pub const SCROLL_FRAME_MS: u64 = 40;

// =============================================================================
// Time
// =============================================================================

/// Offset of local time from UTC in seconds.
pub const UTC_OFFSET_SECS: i32 = 1 * 3_600;

// =============================================================================
// Message
// =============================================================================

/// Message of the day.
pub const MESSAGE: &str = "For we labor diligently to write, to persuade our children, \
and also our brethren, to believe in Christ, and to be reconciled to God; for we know \
that it is by grace that we are saved, after all we can do. And we talk of Christ, we \
rejoice in Christ, we preach of Christ, we prophesy of Christ, and we write according \
to our prophecies, that our children may know to what source they may look for a \
remission of their sins.";
