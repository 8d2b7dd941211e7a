//! Widget geometry
//!
//! Pure layout functions for entity widgets: the plain rect widget, the
//! circle widget and the icon+label composite. Nothing here keeps state
//! between calls; identical inputs always give identical rectangles.
//!
//! Coordinates follow the host's GUI convention: `(x, y)` is the minimum
//! corner of a rect and sizes grow toward positive axes.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// `sqrt(2)`, ratio between a circle widget's disc radius and its content radius
pub const SQRT_2: f32 = std::f32::consts::SQRT_2;

/// Width of the black outline drawn around every widget
pub const OUTLINE_WIDTH: f32 = 1.0;

/// A 2D vector (position or size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    /// Create new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector with both components set to `v`
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v)
    }

    /// Replace negative or NaN components with zero
    pub fn non_negative(self) -> Self {
        Self::new(non_negative(self.x), non_negative(self.y))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// An axis-aligned rectangle.
///
/// Width and height are never negative: constructors clamp degenerate sizes
/// to zero so that bad input yields zero-area rects instead of inverted ones.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rect from its minimum corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    /// Create a rect of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let size = size.non_negative();
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    /// Minimum corner
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Grow the rect by `border` on all four sides, keeping its center
    pub fn add_border(&self, border: f32) -> Self {
        self.expand(Vec2::splat(border))
    }

    /// Grow the rect by `amount.x` left and right and `amount.y` top and bottom.
    ///
    /// Negative amounts shrink it; a rect can shrink to zero size but never
    /// past its center.
    pub fn expand(&self, amount: Vec2) -> Self {
        let (x, width) = expand_axis(self.x, self.width, amount.x);
        let (y, height) = expand_axis(self.y, self.height, amount.y);
        Self::new(x, y, width, height)
    }

    /// Move the rect by `offset`
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(
            self.x + offset.x,
            self.y + offset.y,
            self.width,
            self.height,
        )
    }

    /// Whether `other` lies entirely inside this rect (edges included)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x_max() <= self.x_max()
            && other.y_max() <= self.y_max()
    }

    /// Fit a sprite into this slot: full slot width, height scaled by the
    /// sprite's aspect ratio and centered vertically in the slot.
    ///
    /// A sprite without width keeps the slot unchanged.
    pub fn fit_sprite(&self, sprite_size: Vec2) -> Self {
        if !(sprite_size.x > 0.0) {
            return *self;
        }
        let height = self.height * (sprite_size.y / sprite_size.x);
        Self::new(
            self.x,
            self.y + (self.height - height) / 2.0,
            self.width,
            height,
        )
    }

    /// Scale `sprite_size` to the largest size that fits inside this rect
    /// without changing its aspect ratio, centered in the rect
    pub fn fit_contain(&self, sprite_size: Vec2) -> Self {
        if !(sprite_size.x > 0.0 && sprite_size.y > 0.0) {
            return *self;
        }
        let scale = (self.width / sprite_size.x).min(self.height / sprite_size.y);
        Self::centered(self.center(), sprite_size * scale)
    }
}

fn expand_axis(min: f32, len: f32, amount: f32) -> (f32, f32) {
    let grown = len + 2.0 * amount;
    if grown >= 0.0 {
        (min - amount, grown)
    } else {
        (min + len / 2.0, 0.0)
    }
}

fn non_negative(v: f32) -> f32 {
    // f32::max treats NaN as missing, so NaN becomes 0 as well
    v.max(0.0)
}

/// Layout of a rectangular widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectWidget {
    /// Area the measured content is drawn in, centered on the widget position
    pub label: Rect,
    /// `label` grown by the style padding; this area is filled with the background
    pub content: Rect,
    /// `content` grown by the outline width
    pub outline: Rect,
}

/// Lay out a rect widget around `position` for content of `content_size`
pub fn rect_widget(position: Vec2, content_size: Vec2, padding: Vec2) -> RectWidget {
    let label = Rect::centered(position, content_size);
    let content = label.expand(padding.non_negative());
    RectWidget {
        label,
        content,
        outline: content.add_border(OUTLINE_WIDTH),
    }
}

/// Layout of a circular widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleWidget {
    pub center: Vec2,
    /// Radius of the filled disc
    pub draw_radius: f32,
    /// Radius of the black outline disc behind the fill
    pub outline_radius: f32,
    /// Square the content icon is fitted into. Its side is `2 * widget_radius`,
    /// smaller than the disc, which leaves a visible ring around the icon.
    pub icon: Rect,
    /// Bounding square of the filled disc
    pub bounds: Rect,
}

/// Lay out a circle widget around `position`
pub fn circle_widget(position: Vec2, widget_radius: f32) -> CircleWidget {
    let widget_radius = non_negative(widget_radius);
    let draw_radius = widget_radius * SQRT_2;
    CircleWidget {
        center: position,
        draw_radius,
        outline_radius: draw_radius + OUTLINE_WIDTH,
        icon: Rect::centered(position, Vec2::splat(2.0 * widget_radius)),
        bounds: Rect::centered(position, Vec2::splat(2.0 * draw_radius)),
    }
}

/// Layout of the icon+label composite widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconLabelWidget {
    /// Whole widget; filled with the background
    pub widget: Rect,
    pub icon: Rect,
    pub label: Rect,
    /// `widget` grown by the outline width
    pub outline: Rect,
}

/// Lay out an icon followed by a label, centered on `position`.
///
/// Padding separates the left edge and the icon, the icon and the label, and
/// the label and the right edge. The widget is as tall as the icon plus
/// vertical padding; the label is centered vertically in it.
pub fn icon_label_widget(
    position: Vec2,
    icon_size: Vec2,
    label_size: Vec2,
    padding: Vec2,
) -> IconLabelWidget {
    let icon_size = icon_size.non_negative();
    let label_size = label_size.non_negative();
    let padding = padding.non_negative();

    let extents = Vec2::new(
        3.0 * padding.x + icon_size.x + label_size.x,
        2.0 * padding.y + icon_size.y,
    );
    let widget = Rect::centered(position, extents);
    let icon_origin = widget.origin() + padding;
    let label_origin = Vec2::new(
        widget.x + 2.0 * padding.x + icon_size.x,
        widget.y + (extents.y - label_size.y) / 2.0,
    );

    IconLabelWidget {
        widget,
        icon: Rect::new(icon_origin.x, icon_origin.y, icon_size.x, icon_size.y),
        label: Rect::new(label_origin.x, label_origin.y, label_size.x, label_size.y),
        outline: widget.add_border(OUTLINE_WIDTH),
    }
}
