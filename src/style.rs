//! Per-frame visual state handed to the renderer
//!
//! [`StyleBundle`] holds the visual constants the host chooses for a frame,
//! [`Content`] is what a backend wants drawn for one entity, and
//! [`DrawContext`] says how that entity must look right now. All three are
//! owned by the caller; the renderer only reads them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::Vec2;

/// Shape of entity widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetType {
    #[default]
    Rect,
    Circle,
}

impl WidgetType {
    /// Parse a widget type name. Anything unrecognized is a rect.
    pub fn parse(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("circle") {
            WidgetType::Circle
        } else {
            WidgetType::Rect
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::Rect => "rect",
            WidgetType::Circle => "circle",
        }
    }
}

impl From<String> for WidgetType {
    fn from(name: String) -> Self {
        WidgetType::parse(&name)
    }
}

impl From<WidgetType> for String {
    fn from(widget_type: WidgetType) -> String {
        widget_type.as_str().to_string()
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text style for widget labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentStyle {
    pub text_color: Color,
    pub font_size: f32,
}

impl Default for ContentStyle {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            font_size: 11.0,
        }
    }
}

/// Visual constants for one frame.
///
/// Missing fields in a style file fall back to the light defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleBundle {
    /// Fill of ordinary entities
    pub background_color: Color,
    /// Fill of target entities (inspection roots)
    pub target_background_color: Color,
    pub shadow_color: Color,
    /// Aura color of selected entities
    pub highlight_color: Color,
    /// Aura color of entities with undiscovered relations
    pub unexplored_color: Color,
    /// Space between a rect widget's label and its outline
    pub padding: Vec2,
    /// How far a selection aura extends past the outline
    pub highlight_strength: f32,
    /// Content radius of circle widgets
    pub widget_radius: f32,
    /// Icon slot size in icon+label widgets
    pub icon_size: Vec2,
    /// Padding inside icon+label widgets
    pub icon_padding: Vec2,
    pub content: ContentStyle,
}

impl StyleBundle {
    /// Default style for light host skins
    pub fn light() -> Self {
        Self {
            background_color: Color::from_rgb8(200, 200, 200),
            target_background_color: Color::from_rgb8(255, 229, 153),
            shadow_color: Color::from_rgba8(0, 0, 0, 77),
            highlight_color: Color::from_rgb8(255, 153, 0),
            unexplored_color: Color::from_rgb8(102, 170, 255),
            padding: Vec2::new(4.0, 4.0),
            highlight_strength: 3.0,
            widget_radius: 16.0,
            icon_size: Vec2::new(25.0, 25.0),
            icon_padding: Vec2::new(4.0, 4.0),
            content: ContentStyle::default(),
        }
    }

    /// Default style for dark host skins
    pub fn dark() -> Self {
        Self {
            background_color: Color::from_rgb8(64, 64, 64),
            target_background_color: Color::from_rgb8(96, 80, 40),
            shadow_color: Color::from_rgba8(0, 0, 0, 128),
            content: ContentStyle {
                text_color: Color::from_rgb8(220, 220, 220),
                ..ContentStyle::default()
            },
            ..Self::light()
        }
    }

    /// Light or dark default, following the host's dark mode flag
    pub fn for_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for StyleBundle {
    fn default() -> Self {
        Self::light()
    }
}

/// An icon reference. The host owns the image; the core only needs its
/// identity for drawing and its pixel size for aspect fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub id: String,
    pub size: Vec2,
}

impl Icon {
    pub fn new(id: impl Into<String>, size: Vec2) -> Self {
        Self {
            id: id.into(),
            size,
        }
    }

    /// A square icon
    pub fn square(id: impl Into<String>, side: f32) -> Self {
        Self::new(id, Vec2::splat(side))
    }
}

/// What a backend wants drawn for one entity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// Tooltip text. The host draws tooltips itself; the renderer ignores this.
    #[serde(default)]
    pub tooltip: String,
}

impl Content {
    /// Label-only content whose tooltip repeats the label
    pub fn text(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            tooltip: label.clone(),
            label,
            icon: None,
        }
    }

    /// Content for any displayable value, used as label and tooltip
    pub fn for_display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self::text(value.to_string())
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }
}

/// How one entity widget must be drawn in the current frame.
///
/// Built fresh by the caller for every draw call.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    /// Widget center in layout units
    pub position: Vec2,
    pub widget_type: WidgetType,
    pub is_selected: bool,
    /// The entity has relations that were not fetched yet
    pub is_unexplored: bool,
    /// The entity is an inspection root
    pub is_target: bool,
    pub style: &'a StyleBundle,
}

impl<'a> DrawContext<'a> {
    /// Unselected, explored, non-target rect widget at `position`
    pub fn new(position: Vec2, style: &'a StyleBundle) -> Self {
        Self {
            position,
            widget_type: WidgetType::Rect,
            is_selected: false,
            is_unexplored: false,
            is_target: false,
            style,
        }
    }

    pub fn widget_type(mut self, widget_type: WidgetType) -> Self {
        self.widget_type = widget_type;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn unexplored(mut self, unexplored: bool) -> Self {
        self.is_unexplored = unexplored;
        self
    }

    pub fn target(mut self, target: bool) -> Self {
        self.is_target = target;
        self
    }

    /// Fill color: target background for inspection roots, plain background otherwise
    pub fn fill_color(&self) -> Color {
        if self.is_target {
            self.style.target_background_color
        } else {
            self.style.background_color
        }
    }
}
