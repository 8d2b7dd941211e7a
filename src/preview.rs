//! SVG preview of draw lists
//!
//! Renders a [`DrawList`] to a standalone SVG document for debugging layouts
//! outside a host. Every layer is a filled shape: outlines are drawn as a
//! black shape one unit larger than the fill that covers them.

use askama::Template;

use crate::render::{DrawList, DrawPrimitive, Shape};

/// Margin around the drawn extent
const MARGIN: f32 = 4.0;

#[derive(Template)]
#[template(path = "preview.svg", escape = "html")]
struct PreviewTemplate {
    view_box: String,
    width: String,
    height: String,
    font_size: String,
    elements: Vec<SvgElement>,
}

/// One SVG element, with coordinates already formatted
struct SvgElement {
    layer: &'static str,
    /// `circle`, `rect`, `icon` or `text`
    kind: &'static str,
    x: String,
    y: String,
    width: String,
    height: String,
    r: String,
    fill: String,
    text: String,
}

fn num(v: f32) -> String {
    format!("{v:.1}")
}

impl SvgElement {
    fn new(layer: &'static str, kind: &'static str) -> Self {
        Self {
            layer,
            kind,
            x: String::new(),
            y: String::new(),
            width: String::new(),
            height: String::new(),
            r: String::new(),
            fill: String::new(),
            text: String::new(),
        }
    }

    fn from_primitive(primitive: &DrawPrimitive) -> Self {
        let layer = primitive.layer();
        match primitive {
            DrawPrimitive::Aura { shape, color }
            | DrawPrimitive::Shadow { shape, color }
            | DrawPrimitive::Outline { shape, color }
            | DrawPrimitive::Fill { shape, color } => {
                let el = match shape {
                    Shape::Rect { rect } => Self {
                        x: num(rect.x),
                        y: num(rect.y),
                        width: num(rect.width),
                        height: num(rect.height),
                        ..Self::new(layer, "rect")
                    },
                    Shape::Disc { center, radius } => Self {
                        x: num(center.x),
                        y: num(center.y),
                        r: num(*radius),
                        ..Self::new(layer, "circle")
                    },
                };
                Self {
                    fill: color.to_css(),
                    ..el
                }
            }
            DrawPrimitive::Image { rect, icon } => Self {
                x: num(rect.x),
                y: num(rect.y),
                width: num(rect.width),
                height: num(rect.height),
                text: icon.id.clone(),
                ..Self::new(layer, "icon")
            },
            DrawPrimitive::Label { rect, text, color } => Self {
                x: num(rect.x),
                // baseline near the bottom of the line box
                y: num(rect.y + rect.height * 0.75),
                fill: color.to_css(),
                text: text.clone(),
                ..Self::new(layer, "text")
            },
        }
    }
}

/// Render `list` as an SVG document. `font_size` applies to every label.
pub fn render_svg(list: &DrawList, font_size: f32) -> anyhow::Result<String> {
    let extent = list.extent().add_border(MARGIN);
    let template = PreviewTemplate {
        view_box: format!(
            "{} {} {} {}",
            num(extent.x),
            num(extent.y),
            num(extent.width),
            num(extent.height)
        ),
        width: num(extent.width),
        height: num(extent.height),
        font_size: num(font_size),
        elements: list.iter().map(SvgElement::from_primitive).collect(),
    };
    Ok(template.render()?)
}
