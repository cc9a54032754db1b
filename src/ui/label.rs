//! Single line text label

use embedded_graphics::{
    geometry::Point,
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use heapless::String;

/// Text label with fixed bounds and its own text buffer
pub struct Label<const N: usize> {
    text: String<N>,
    bounds: Rectangle,
    character_style: MonoTextStyle<'static, Rgb565>,
    background: Rgb565,
    alignment: Alignment,
}

impl<const N: usize> Label<N> {
    /// Create new label
    pub fn new(
        bounds: Rectangle,
        character_style: MonoTextStyle<'static, Rgb565>,
        background: Rgb565,
        alignment: Alignment,
    ) -> Self {
        Self {
            text: String::new(),
            bounds,
            character_style,
            background,
            alignment,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Replace the label text, truncated to the buffer size.
    ///
    /// Returns whether the text changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text.as_str() == text {
            return false;
        }

        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        true
    }

    /// Anchor point of the text for the configured alignment
    fn anchor(&self) -> Point {
        let top_left = self.bounds.top_left;
        let x = match self.alignment {
            Alignment::Left => top_left.x,
            Alignment::Center => top_left.x + self.bounds.size.width as i32 / 2,
            Alignment::Right => top_left.x + self.bounds.size.width as i32 - 1,
        };
        Point::new(x, top_left.y)
    }

    /// Clear the label area and draw the text
    pub fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(display)?;

        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        Text::with_text_style(
            self.text.as_str(),
            self.anchor(),
            self.character_style,
            text_style,
        )
        .draw(&mut display.clipped(&self.bounds))?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::TestDisplay;
    use embedded_graphics::{geometry::Size, mono_font::ascii::FONT_10X20};

    fn label(alignment: Alignment) -> Label<8> {
        Label::new(
            Rectangle::new(Point::new(10, 10), Size::new(100, 20)),
            MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE),
            Rgb565::BLACK,
            alignment,
        )
    }

    #[test]
    fn test_set_text_reports_changes() {
        let mut l = label(Alignment::Left);
        assert!(l.set_text("12:00:00"));
        assert!(!l.set_text("12:00:00"));
        assert!(l.set_text("12:00:01"));
        assert_eq!(l.text(), "12:00:01");
    }

    #[test]
    fn test_set_text_truncates() {
        let mut l = label(Alignment::Left);
        l.set_text("disconnected");
        assert_eq!(l.text(), "disconne");
    }

    #[test]
    fn test_anchor_follows_alignment() {
        assert_eq!(label(Alignment::Left).anchor(), Point::new(10, 10));
        assert_eq!(label(Alignment::Center).anchor(), Point::new(60, 10));
        assert_eq!(label(Alignment::Right).anchor(), Point::new(109, 10));
    }

    #[test]
    fn test_draw_stays_in_bounds() {
        for alignment in [Alignment::Left, Alignment::Center, Alignment::Right] {
            let mut l = label(alignment);
            l.set_text("100%");
            let mut display = TestDisplay::new();
            l.draw(&mut display).unwrap();

            let bounds = l.bounds();
            assert!(display.lit().all(|p| bounds.contains(p)));
            assert!(display.lit().count() > 0);
        }
    }
}
