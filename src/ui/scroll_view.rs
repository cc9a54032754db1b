//! Scrollable viewport for the message text.
//!
//! Holds the committed scroll offset the pacer works with, and the offset
//! of the frame currently on screen. Animated commands move the rendered
//! offset towards the committed one over a few frames, non-animated commands
//! snap to it.

use embedded_graphics::primitives::Rectangle;

use super::scroll::{ContentGeometry, ScrollCommand};
use crate::config::SCROLL_ANIMATION_FRAMES;

/// Linear move between two offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Animation {
    from: i32,
    to: i32,
    /// Frames already shown, 1..=frames
    frame: u8,
    frames: u8,
}

impl Animation {
    fn offset(&self) -> i32 {
        let delta = self.to - self.from;
        self.from + delta * i32::from(self.frame) / i32::from(self.frames)
    }

    fn finished(&self) -> bool {
        self.frame >= self.frames
    }
}

/// Viewport over content taller than itself.
#[derive(Clone, Debug)]
pub struct ScrollView {
    viewport: Rectangle,
    content_height: u32,
    offset: i32,
    animation: Option<Animation>,
}

impl ScrollView {
    pub fn new(viewport: Rectangle, content_height: u32) -> Self {
        Self {
            viewport,
            content_height,
            offset: 0,
            animation: None,
        }
    }

    /// Screen area the content is drawn into.
    pub fn viewport(&self) -> Rectangle {
        self.viewport
    }

    pub fn content_height(&self) -> u32 {
        self.content_height
    }

    /// Largest distance the content can move up.
    pub fn max_scroll(&self) -> i32 {
        self.content_height.saturating_sub(self.viewport.size.height) as i32
    }

    /// Move the content to `y`, clamped to the scrollable range.
    pub fn set_offset(&mut self, y: i32, animated: bool) {
        let target = y.clamp(-self.max_scroll(), 0);
        let from = self.rendered_offset();
        self.offset = target;

        self.animation = if animated && SCROLL_ANIMATION_FRAMES > 1 && from != target {
            Some(Animation {
                from,
                to: target,
                frame: 1,
                frames: SCROLL_ANIMATION_FRAMES,
            })
        } else {
            None
        };
    }

    /// Apply a command issued by the scroll pacer.
    pub fn apply(&mut self, command: ScrollCommand) {
        self.set_offset(command.offset, command.animated);
    }

    /// Committed offset, where the content ends up once animations settle.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Offset of the frame to draw.
    pub fn rendered_offset(&self) -> i32 {
        match self.animation {
            Some(animation) => animation.offset(),
            None => self.offset,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Step the running animation by one frame.
    ///
    /// Returns `true` if the rendered offset changed and a frame must be
    /// drawn.
    pub fn advance_frame(&mut self) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        animation.frame += 1;
        if animation.finished() {
            self.animation = None;
        }
        true
    }

    /// Measurement used by the pacer: how far the viewport reaches into the
    /// content, and how tall the content is.
    pub fn geometry(&self) -> ContentGeometry {
        ContentGeometry {
            visible_height: self.viewport.size.height as i32 - self.offset,
            content_height: self.content_height as i32,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{geometry::Point, geometry::Size};

    fn view(content_height: u32) -> ScrollView {
        ScrollView::new(
            Rectangle::new(Point::new(0, 40), Size::new(240, 170)),
            content_height,
        )
    }

    #[test]
    fn test_new_view_is_at_top() {
        let v = view(300);
        assert_eq!(v.offset(), 0);
        assert_eq!(v.rendered_offset(), 0);
        assert!(!v.is_animating());
        assert_eq!(v.max_scroll(), 130);
    }

    #[test]
    fn test_max_scroll_is_zero_for_short_content() {
        assert_eq!(view(100).max_scroll(), 0);
        assert_eq!(view(170).max_scroll(), 0);
    }

    #[test]
    fn test_set_offset_clamps() {
        let mut v = view(300);
        v.set_offset(-500, false);
        assert_eq!(v.offset(), -130);
        v.set_offset(20, false);
        assert_eq!(v.offset(), 0);

        let mut short = view(100);
        short.set_offset(-10, false);
        assert_eq!(short.offset(), 0);
    }

    #[test]
    fn test_geometry_follows_offset() {
        let mut v = view(300);
        assert_eq!(v.geometry().remaining(), 130);
        v.set_offset(-30, false);
        assert_eq!(
            v.geometry(),
            ContentGeometry {
                visible_height: 200,
                content_height: 300
            }
        );
        assert_eq!(v.geometry().remaining(), 100);
        v.set_offset(-1000, false);
        assert_eq!(v.geometry().remaining(), 0);
    }

    #[test]
    fn test_animated_scroll_reaches_target() {
        let mut v = view(300);
        v.set_offset(-10, true);
        assert!(v.is_animating());
        assert_eq!(v.offset(), -10);

        let mut rendered = vec![v.rendered_offset()];
        while v.advance_frame() {
            rendered.push(v.rendered_offset());
        }

        assert_eq!(rendered.len(), SCROLL_ANIMATION_FRAMES as usize);
        assert_eq!(*rendered.last().unwrap(), -10);
        assert!(rendered.windows(2).all(|w| w[1] <= w[0]));
        assert!(!v.is_animating());
        assert!(!v.advance_frame());
    }

    #[test]
    fn test_snap_cancels_animation() {
        let mut v = view(300);
        v.set_offset(-10, false);
        v.set_offset(-20, true);
        assert!(v.is_animating());

        v.set_offset(0, false);
        assert!(!v.is_animating());
        assert_eq!(v.rendered_offset(), 0);
    }

    #[test]
    fn test_clamped_step_does_not_animate() {
        let mut v = view(300);
        v.set_offset(-130, false);
        v.apply(ScrollCommand {
            offset: -140,
            animated: true,
        });
        assert_eq!(v.offset(), -130);
        assert!(!v.is_animating());
    }
}
