//! Entity widget rendering
//!
//! Turns an entity's [`Content`] and its [`DrawContext`] into an ordered list
//! of draw primitives, back to front:
//!
//! 1. an aura when the entity is selected (highlight color) or, failing that,
//!    unexplored (unexplored color); otherwise a drop shadow for rect widgets.
//!    Auras and shadows never appear together.
//! 2. the black outline
//! 3. the fill, in the target background color for inspection roots
//! 4. the content: label text and/or icon
//!
//! The host rasterizes the primitives; nothing here touches pixels and
//! nothing here can fail.

use std::fmt;

use serde::Serialize;

use crate::color::Color;
use crate::geometry::{Rect, Vec2, circle_widget, icon_label_widget, rect_widget};
use crate::measure::{BOX_ICON_SIZE, Measure};
use crate::style::{Content, DrawContext, Icon, WidgetType};

/// Offset of a rect widget's drop shadow from its outline
pub const SHADOW_OFFSET: Vec2 = Vec2::new(2.0, 2.0);

/// Area covered by a background primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rect { rect: Rect },
    Disc { center: Vec2, radius: f32 },
}

impl Shape {
    pub fn disc(center: Vec2, radius: f32) -> Self {
        Shape::Disc {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Axis-aligned bounds of the shape
    pub fn bounds(&self) -> Rect {
        match *self {
            Shape::Rect { rect } => rect,
            Shape::Disc { center, radius } => Rect::centered(center, Vec2::splat(2.0 * radius)),
        }
    }
}

impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Shape::Rect { rect }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Rect { rect } => write_rect(f, rect),
            Shape::Disc { center, radius } => {
                write!(f, "disc({:.1}, {:.1}, {:.1})", center.x, center.y, radius)
            }
        }
    }
}

fn write_rect(f: &mut fmt::Formatter<'_>, r: &Rect) -> fmt::Result {
    write!(
        f,
        "rect({:.1}, {:.1}, {:.1}, {:.1})",
        r.x, r.y, r.width, r.height
    )
}

/// One draw call for the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum DrawPrimitive {
    /// Selection or unexplored ring behind the outline
    Aura {
        shape: Shape,
        color: Color,
    },
    Shadow {
        shape: Shape,
        color: Color,
    },
    Outline {
        shape: Shape,
        color: Color,
    },
    Fill {
        shape: Shape,
        color: Color,
    },
    Image {
        rect: Rect,
        icon: Icon,
    },
    /// Label text. Tooltips are never part of a label; the host draws them.
    Label {
        rect: Rect,
        text: String,
        color: Color,
    },
}

impl DrawPrimitive {
    /// Layer name, as used in text dumps
    pub fn layer(&self) -> &'static str {
        match self {
            DrawPrimitive::Aura { .. } => "aura",
            DrawPrimitive::Shadow { .. } => "shadow",
            DrawPrimitive::Outline { .. } => "outline",
            DrawPrimitive::Fill { .. } => "fill",
            DrawPrimitive::Image { .. } => "icon",
            DrawPrimitive::Label { .. } => "label",
        }
    }

    /// Area the primitive covers
    pub fn bounds(&self) -> Rect {
        match self {
            DrawPrimitive::Aura { shape, .. }
            | DrawPrimitive::Shadow { shape, .. }
            | DrawPrimitive::Outline { shape, .. }
            | DrawPrimitive::Fill { shape, .. } => shape.bounds(),
            DrawPrimitive::Image { rect, .. } | DrawPrimitive::Label { rect, .. } => *rect,
        }
    }
}

impl fmt::Display for DrawPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.layer())?;
        match self {
            DrawPrimitive::Aura { shape, color }
            | DrawPrimitive::Shadow { shape, color }
            | DrawPrimitive::Outline { shape, color }
            | DrawPrimitive::Fill { shape, color } => write!(f, "{shape} {color}"),
            DrawPrimitive::Image { rect, icon } => {
                write_rect(f, rect)?;
                write!(f, " {}", icon.id)
            }
            DrawPrimitive::Label { rect, text, color } => {
                write_rect(f, rect)?;
                write!(f, " {color} {text:?}")
            }
        }
    }
}

/// Draw primitives of one widget, back to front
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DrawList {
    pub primitives: Vec<DrawPrimitive>,
    /// The rect the widget claims: the label rect of plain rect widgets, the
    /// whole widget of icon+label widgets, the disc's bounding square of
    /// circle widgets
    pub bounds: Rect,
}

impl DrawList {
    /// Layer names in draw order
    pub fn layers(&self) -> Vec<&'static str> {
        self.primitives.iter().map(DrawPrimitive::layer).collect()
    }

    pub fn has_aura(&self) -> bool {
        self.primitives
            .iter()
            .any(|p| matches!(p, DrawPrimitive::Aura { .. }))
    }

    pub fn has_shadow(&self) -> bool {
        self.primitives
            .iter()
            .any(|p| matches!(p, DrawPrimitive::Shadow { .. }))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawPrimitive> {
        self.primitives.iter()
    }

    /// Union of the bounds of every primitive and the widget bounds
    pub fn extent(&self) -> Rect {
        self.primitives
            .iter()
            .map(DrawPrimitive::bounds)
            .fold(self.bounds, |acc, r| {
                let x = acc.x.min(r.x);
                let y = acc.y.min(r.y);
                Rect::new(
                    x,
                    y,
                    acc.x_max().max(r.x_max()) - x,
                    acc.y_max().max(r.y_max()) - y,
                )
            })
    }
}

impl fmt::Display for DrawList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, primitive) in self.primitives.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{primitive}")?;
        }
        Ok(())
    }
}

/// Compute the draw layers for `content` in the given context.
///
/// Circle contexts always use the circle widget. Rect contexts use the
/// icon+label composite when the content has an icon and the plain rect
/// widget otherwise. Unknown widget types were already mapped to rect when
/// the [`WidgetType`] was parsed.
pub fn compute_draw_layers(
    content: &Content,
    ctx: &DrawContext<'_>,
    measure: &dyn Measure,
) -> DrawList {
    match (ctx.widget_type, &content.icon) {
        (WidgetType::Circle, icon) => {
            if icon.is_some() && !content.label.is_empty() {
                tracing::trace!(label = %content.label, "circle widget draws the icon only");
            }
            circle_layers(content, ctx)
        }
        (WidgetType::Rect, Some(icon)) => icon_label_layers(&content.label, icon, ctx, measure),
        (WidgetType::Rect, None) => rect_layers(content, ctx, measure),
    }
}

/// Plain rect widget: measured label (with an inline box icon, if any)
/// surrounded by padding, outline and aura or shadow
pub fn rect_layers(content: &Content, ctx: &DrawContext<'_>, measure: &dyn Measure) -> DrawList {
    let widget = rect_widget(ctx.position, measure.measure(content), ctx.style.padding);
    let mut primitives = box_and_background(widget.content, widget.outline, ctx);

    let text_rect = match &content.icon {
        Some(icon) => {
            let slot = Rect::new(
                widget.label.x,
                widget.label.y + (widget.label.height - BOX_ICON_SIZE.y) / 2.0,
                BOX_ICON_SIZE.x,
                BOX_ICON_SIZE.y,
            );
            primitives.push(DrawPrimitive::Image {
                rect: slot.fit_contain(icon.size),
                icon: icon.clone(),
            });
            Rect::new(
                widget.label.x + BOX_ICON_SIZE.x,
                widget.label.y,
                widget.label.width - BOX_ICON_SIZE.x,
                widget.label.height,
            )
        }
        None => widget.label,
    };
    primitives.push(label(text_rect, &content.label, ctx));

    DrawList {
        primitives,
        bounds: widget.label,
    }
}

/// Icon+label composite. Only defined for rect contexts; a circle context
/// falls back to the circle widget.
pub fn icon_label_layers(
    text: &str,
    icon: &Icon,
    ctx: &DrawContext<'_>,
    measure: &dyn Measure,
) -> DrawList {
    if ctx.widget_type == WidgetType::Circle {
        let content = Content::text(text).with_icon(icon.clone());
        return circle_layers(&content, ctx);
    }

    let style = ctx.style;
    let widget = icon_label_widget(
        ctx.position,
        style.icon_size,
        measure.measure_text(text),
        style.icon_padding,
    );
    let mut primitives = box_and_background(widget.widget, widget.outline, ctx);
    primitives.push(DrawPrimitive::Image {
        rect: widget.icon.fit_sprite(icon.size),
        icon: icon.clone(),
    });
    primitives.push(label(widget.label, text, ctx));

    DrawList {
        primitives,
        bounds: widget.widget,
    }
}

/// Circle widget: aura (never a shadow), outline disc, fill disc and the
/// content icon, if any, inside the inscribed square
pub fn circle_layers(content: &Content, ctx: &DrawContext<'_>) -> DrawList {
    let style = ctx.style;
    let widget = circle_widget(ctx.position, style.widget_radius);
    let strength = highlight_strength(ctx);
    let mut primitives = Vec::with_capacity(4);

    if ctx.is_selected {
        primitives.push(DrawPrimitive::Aura {
            shape: Shape::disc(widget.center, widget.outline_radius + strength),
            color: style.highlight_color,
        });
    } else if ctx.is_unexplored {
        primitives.push(DrawPrimitive::Aura {
            shape: Shape::disc(
                widget.center,
                widget.outline_radius + unexplored_disc_expansion(strength),
            ),
            color: style.unexplored_color,
        });
    }

    primitives.push(DrawPrimitive::Outline {
        shape: Shape::disc(widget.center, widget.outline_radius),
        color: Color::BLACK,
    });
    primitives.push(DrawPrimitive::Fill {
        shape: Shape::disc(widget.center, widget.draw_radius),
        color: ctx.fill_color(),
    });

    if let Some(icon) = &content.icon {
        primitives.push(DrawPrimitive::Image {
            rect: widget.icon.fit_contain(icon.size),
            icon: icon.clone(),
        });
    }

    DrawList {
        primitives,
        bounds: widget.bounds,
    }
}

/// How far an unexplored aura extends past a circle's outline: half the
/// selection aura, but at least one unit while highlighting is on
pub fn unexplored_disc_expansion(highlight_strength: f32) -> f32 {
    if highlight_strength > 0.0 {
        (highlight_strength / 2.0).max(1.0)
    } else {
        0.0
    }
}

fn highlight_strength(ctx: &DrawContext<'_>) -> f32 {
    ctx.style.highlight_strength.max(0.0)
}

/// Aura or shadow, outline and fill for a rect-shaped widget
fn box_and_background(content: Rect, outline: Rect, ctx: &DrawContext<'_>) -> Vec<DrawPrimitive> {
    let style = ctx.style;
    let strength = highlight_strength(ctx);
    let mut primitives = Vec::with_capacity(6);

    if ctx.is_selected {
        primitives.push(DrawPrimitive::Aura {
            shape: outline.add_border(strength).into(),
            color: style.highlight_color,
        });
    } else if ctx.is_unexplored {
        primitives.push(DrawPrimitive::Aura {
            shape: outline.add_border(strength).into(),
            color: style.unexplored_color,
        });
    } else {
        primitives.push(DrawPrimitive::Shadow {
            shape: outline.translate(SHADOW_OFFSET).into(),
            color: style.shadow_color,
        });
    }

    primitives.push(DrawPrimitive::Outline {
        shape: outline.into(),
        color: Color::BLACK,
    });
    primitives.push(DrawPrimitive::Fill {
        shape: content.into(),
        color: ctx.fill_color(),
    });
    primitives
}

fn label(rect: Rect, text: &str, ctx: &DrawContext<'_>) -> DrawPrimitive {
    DrawPrimitive::Label {
        rect,
        text: text.to_string(),
        color: ctx.style.content.text_color,
    }
}
