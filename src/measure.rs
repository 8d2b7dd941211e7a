//! Content measurement
//!
//! Text metrics belong to the rendering host. The core only asks for sizes
//! through [`Measure`]; [`FixedWidthMeasure`] is a deterministic stand-in for
//! hosts without real font metrics (and for tests).

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;
use crate::style::Content;

/// Icon size used when an icon is laid out inline with a plain rect label
pub const BOX_ICON_SIZE: Vec2 = Vec2::new(16.0, 16.0);

/// Size measurement supplied by the rendering host
pub trait Measure {
    /// Size of `text` in the label style
    fn measure_text(&self, text: &str) -> Vec2;

    /// Size of `text` in the title style (legend titles)
    fn measure_title(&self, text: &str) -> Vec2 {
        self.measure_text(text)
    }

    /// Size of a plain rect label: the text, preceded by a box icon if the
    /// content has one
    fn measure(&self, content: &Content) -> Vec2 {
        let text = self.measure_text(&content.label);
        match content.icon {
            Some(_) => Vec2::new(text.x + BOX_ICON_SIZE.x, text.y.max(BOX_ICON_SIZE.y)),
            None => text,
        }
    }
}

impl<M: Measure + ?Sized> Measure for &M {
    fn measure_text(&self, text: &str) -> Vec2 {
        (**self).measure_text(text)
    }

    fn measure_title(&self, text: &str) -> Vec2 {
        (**self).measure_title(text)
    }

    fn measure(&self, content: &Content) -> Vec2 {
        (**self).measure(content)
    }
}

/// Every character has the same advance; every line the same height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedWidthMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl FixedWidthMeasure {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl Default for FixedWidthMeasure {
    fn default() -> Self {
        Self::new(7.0, 16.0)
    }
}

impl Measure for FixedWidthMeasure {
    fn measure_text(&self, text: &str) -> Vec2 {
        let lines = text.lines().count().max(1);
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        Vec2::new(
            widest as f32 * self.char_width,
            lines as f32 * self.line_height,
        )
        .non_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Icon;

    #[test]
    fn measures_widest_line() {
        let m = FixedWidthMeasure::new(8.0, 20.0);
        assert_eq!(m.measure_text("Hello"), Vec2::new(40.0, 20.0));
        assert_eq!(m.measure_text("ab\nabcd"), Vec2::new(32.0, 40.0));
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let m = FixedWidthMeasure::new(8.0, 20.0);
        assert_eq!(m.measure_text(""), Vec2::new(0.0, 20.0));
    }

    #[test]
    fn inline_icon_widens_label() {
        let m = FixedWidthMeasure::new(8.0, 10.0);
        let content = Content::text("abc").with_icon(Icon::square("gear", 64.0));
        assert_eq!(m.measure(&content), Vec2::new(40.0, 16.0));
    }

    #[test]
    fn references_measure_like_owner() {
        fn width(m: impl Measure) -> f32 {
            m.measure_text("ab").x
        }
        let m = FixedWidthMeasure::new(8.0, 20.0);
        assert_eq!(width(&m), 16.0);
        assert_eq!(width(&m as &dyn Measure), 16.0);
    }
}
