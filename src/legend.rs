//! Color legend box
//!
//! A titled list of `(label, color)` rows, used by hosts to explain relation
//! or entity colors. Each row is a small outlined color swatch followed by
//! its label.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{Rect, Vec2};
use crate::measure::Measure;
use crate::render::{DrawList, DrawPrimitive};
use crate::style::StyleBundle;

/// Space between the legend box border and its content
pub const LEGEND_PADDING: Vec2 = Vec2::new(4.0, 4.0);

/// Layout cell reserved for one swatch
pub const SWATCH_CELL: Vec2 = Vec2::new(16.0, 16.0);

/// Offset of the swatch inside its cell
pub const SWATCH_INSET: Vec2 = Vec2::new(4.0, 4.0);

pub const SWATCH_SIZE: Vec2 = Vec2::new(8.0, 8.0);

/// One legend row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorLegendEntry {
    pub text: String,
    pub color: Color,
}

impl ColorLegendEntry {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Size of the legend content (title and rows), without the box padding
pub fn legend_size(title: &str, entries: &[ColorLegendEntry], measure: &dyn Measure) -> Vec2 {
    let title_size = measure.measure_title(title);
    let entry_sizes: Vec<Vec2> = entries
        .iter()
        .map(|e| measure.measure_text(&e.text))
        .collect();

    let widest_entry = entry_sizes
        .iter()
        .map(|s| s.x + SWATCH_CELL.x)
        .fold(0.0_f32, f32::max);
    let rows_height: f32 = entry_sizes.iter().map(|s| s.y).sum();

    Vec2::new(title_size.x.max(widest_entry), title_size.y + rows_height)
}

/// Size of the whole legend box: content plus padding on both sides
pub fn legend_box_size(title: &str, entries: &[ColorLegendEntry], measure: &dyn Measure) -> Vec2 {
    legend_size(title, entries, measure) + LEGEND_PADDING * 2.0
}

/// Draw primitives for a legend box filling `rect`
pub fn legend_box_layers(
    rect: Rect,
    title: &str,
    entries: &[ColorLegendEntry],
    measure: &dyn Measure,
    style: &StyleBundle,
) -> DrawList {
    let text_color = style.content.text_color;
    let mut primitives = vec![DrawPrimitive::Fill {
        shape: rect.into(),
        color: style.background_color,
    }];

    let content = rect.expand(LEGEND_PADDING * -1.0);
    let title_size = measure.measure_title(title);
    primitives.push(DrawPrimitive::Label {
        rect: Rect::new(content.x, content.y, title_size.x, title_size.y),
        text: title.to_string(),
        color: text_color,
    });

    for (i, entry) in entries.iter().enumerate() {
        let row_y = content.y + title_size.y + SWATCH_CELL.y * i as f32;
        let swatch = Rect::new(
            content.x + SWATCH_INSET.x,
            row_y + SWATCH_INSET.y,
            SWATCH_SIZE.x,
            SWATCH_SIZE.y,
        );
        primitives.push(DrawPrimitive::Outline {
            shape: swatch.add_border(1.0).into(),
            color: Color::BLACK,
        });
        primitives.push(DrawPrimitive::Fill {
            shape: swatch.into(),
            color: entry.color,
        });

        let label_size = measure.measure_text(&entry.text);
        primitives.push(DrawPrimitive::Label {
            rect: Rect::new(content.x + SWATCH_CELL.x, row_y, label_size.x, label_size.y),
            text: entry.text.clone(),
            color: text_color,
        });
    }

    DrawList {
        primitives,
        bounds: rect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FixedWidthMeasure;

    const MEASURE: FixedWidthMeasure = FixedWidthMeasure {
        char_width: 8.0,
        line_height: 16.0,
    };

    fn entries() -> Vec<ColorLegendEntry> {
        vec![
            ColorLegendEntry::new("owns", Color::from_rgb8(255, 0, 0)),
            ColorLegendEntry::new("likes", Color::from_rgb8(0, 0, 255)),
        ]
    }

    #[test]
    fn size_uses_widest_of_title_and_rows() {
        // title 3*8 = 24; widest row 5*8 + 16 = 56; height 16 + 2*16
        assert_eq!(
            legend_size("Key", &entries(), &MEASURE),
            Vec2::new(56.0, 48.0)
        );
        // title 10*8 = 80 wins
        assert_eq!(
            legend_size("Relations!", &entries(), &MEASURE),
            Vec2::new(80.0, 48.0)
        );
    }

    #[test]
    fn box_size_adds_padding_on_both_sides() {
        assert_eq!(
            legend_box_size("Key", &entries(), &MEASURE),
            Vec2::new(64.0, 56.0)
        );
    }

    #[test]
    fn empty_legend_is_just_the_title() {
        assert_eq!(legend_size("Key", &[], &MEASURE), Vec2::new(24.0, 16.0));
    }

    #[test]
    fn rows_stack_below_title() {
        let style = StyleBundle::light();
        let rect = Rect::new(10.0, 10.0, 64.0, 56.0);
        let list = legend_box_layers(rect, "Key", &entries(), &MEASURE, &style);
        assert_eq!(
            list.layers().join(" "),
            "fill label outline fill label outline fill label"
        );
        let bounds = |i: usize| list.primitives[i].bounds();
        // content origin (14, 14); first row at y = 14 + 16
        assert_eq!(bounds(1), Rect::new(14.0, 14.0, 24.0, 16.0));
        assert_eq!(bounds(2), Rect::new(17.0, 33.0, 10.0, 10.0));
        assert_eq!(
            list.primitives[3],
            DrawPrimitive::Fill {
                shape: Rect::new(18.0, 34.0, 8.0, 8.0).into(),
                color: Color::from_rgb8(255, 0, 0),
            }
        );
        assert_eq!(bounds(4), Rect::new(30.0, 30.0, 32.0, 16.0));
        assert_eq!(bounds(7), Rect::new(30.0, 46.0, 40.0, 16.0));
    }
}
