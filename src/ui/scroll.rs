//! Scroll pacing for the message viewport.
//!
//! Once per tick the [`ScrollPacer`] decides whether the message advances by
//! one step, keeps waiting, or snaps back to the top. The same pause counter
//! is used for two waits:
//!
//! - counting up from 0 while the message still has text below the viewport,
//!   until it passes the threshold and scrolling starts
//! - counting down from the threshold once the end is reached, until it hits
//!   0 and the offset resets
//!
//! ```text
//!  WaitingToScroll --(counter > threshold)--> Scrolling
//!        ^                                       |
//!        |                               (remaining < slack)
//!   (reset to top)                               v
//!        +------------(counter == 0)------ WaitingToReset
//! ```

use crate::config::{PAUSE_THRESHOLD, SCROLL_STEP, SLACK_THRESHOLD};

/// Mutable scroll position and pause bookkeeping of the message viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct ScrollState {
    /// Vertical content offset, 0 at the top and negative further down.
    pub offset: i32,
    /// Ticks spent waiting. Above `pause_threshold` while scrolling.
    pub pause_counter: u8,
    /// Ticks to wait before scrolling and before resetting.
    pub pause_threshold: u8,
}

impl ScrollState {
    /// Create a state at the top of the content, about to start waiting.
    pub const fn new(pause_threshold: u8) -> Self {
        Self {
            offset: 0,
            pause_counter: 0,
            pause_threshold,
        }
    }

    /// Phase of the pacer for the given geometry.
    pub fn phase(&self, geometry: ContentGeometry, slack: i32) -> ScrollPhase {
        if self.pause_counter > self.pause_threshold {
            ScrollPhase::Scrolling
        } else if geometry.remaining() < slack {
            ScrollPhase::WaitingToReset
        } else {
            ScrollPhase::WaitingToScroll
        }
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(PAUSE_THRESHOLD)
    }
}

/// Layout measurement of the scrolled content, taken once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct ContentGeometry {
    /// Bottom edge of the viewport in content coordinates.
    pub visible_height: i32,
    /// Total height of the scrollable content.
    pub content_height: i32,
}

impl ContentGeometry {
    /// Content still hidden below the viewport. Negative once overscrolled.
    pub fn remaining(&self) -> i32 {
        self.content_height.saturating_sub(self.visible_height)
    }
}

/// Offset to apply to the scroll view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct ScrollCommand {
    pub offset: i32,
    pub animated: bool,
}

/// Where the pacer is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum ScrollPhase {
    /// Advancing one step per tick.
    Scrolling,
    /// Holding at the current offset before scrolling starts.
    WaitingToScroll,
    /// Holding at the end before snapping back to the top.
    WaitingToReset,
}

/// Per-tick scroll state machine.
#[derive(Clone, Copy, Debug)]
pub struct ScrollPacer {
    step: i32,
    slack: i32,
}

impl ScrollPacer {
    pub const fn new(step: i32, slack: i32) -> Self {
        Self { step, slack }
    }

    /// Remaining distance below which the content counts as fully scrolled.
    pub const fn slack(&self) -> i32 {
        self.slack
    }

    /// Evaluate one tick.
    ///
    /// Returns the next state and the scroll command to issue, if any. When no
    /// command is returned the offset stays where it is.
    pub fn tick(
        &self,
        state: ScrollState,
        geometry: ContentGeometry,
    ) -> (ScrollState, Option<ScrollCommand>) {
        let exhausted = geometry.remaining() < self.slack;
        let mut next = state;

        if state.pause_counter > state.pause_threshold {
            next.offset = state.offset.saturating_sub(self.step);
            if exhausted {
                next.pause_counter = state.pause_threshold;
            }
            let command = ScrollCommand {
                offset: next.offset,
                animated: true,
            };
            return (next, Some(command));
        }

        if !exhausted {
            next.pause_counter = state.pause_counter.saturating_add(1);
            return (next, None);
        }

        if state.pause_counter != 0 {
            next.pause_counter = state.pause_counter - 1;
            (next, None)
        } else {
            next.offset = 0;
            let command = ScrollCommand {
                offset: 0,
                animated: false,
            };
            (next, Some(command))
        }
    }
}

impl Default for ScrollPacer {
    fn default() -> Self {
        Self::new(SCROLL_STEP, SLACK_THRESHOLD)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
