//! Standalone SVG documents with SMIL animations for keyed transitions.

use std::fmt::Write as _;

use crate::error::ChartResult;
use crate::render::curve::path_data;
use crate::render::primitives::{Element, LineStrokeStyle, Shape, TextHAlign, trim_float};
use crate::render::reconcile::ElementTransition;
use crate::render::{RenderFrame, Renderer};

const DEFAULT_FONT_FAMILY: &str = "Inter, system-ui, sans-serif";
/// Cubic in-out control points used for every animation.
const EASE_SPLINE: &str = "0.645 0.045 0.355 1";

type Attributes = Vec<(&'static str, String)>;

/// Writes each frame as an SVG document.
///
/// Elements are written at their target state; transitions become
/// `<animate>` children that run once when the document loads, so viewers
/// without SMIL support still show the settled chart.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    font_family: String,
    last_document: Option<String>,
    pub documents_rendered: usize,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            last_document: None,
            documents_rendered: 0,
        }
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    #[must_use]
    pub fn last_document(&self) -> Option<&str> {
        self.last_document.as_deref()
    }

    pub fn take_last_document(&mut self) -> Option<String> {
        self.last_document.take()
    }

    /// Serializes `frame` without touching renderer state.
    pub fn document(&self, frame: &RenderFrame) -> ChartResult<String> {
        frame.validate()?;
        let width = frame.viewport.width;
        let height = frame.viewport.height;

        let mut svg = String::with_capacity(16 * 1024);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" preserveAspectRatio="xMidYMid meet" role="img" font-family="{}">"#,
            escape_xml(&self.font_family)
        );
        if !frame.caption.is_empty() {
            let _ = writeln!(svg, "<desc>{}</desc>", escape_xml(&frame.caption));
        }

        for layer in &frame.layers {
            if layer.items.is_empty() {
                continue;
            }
            let _ = writeln!(svg, r#"<g class="layer-{}">"#, layer.kind.name());
            for item in &layer.items {
                write_item(&mut svg, item);
            }
            svg.push_str("</g>\n");
        }
        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let document = self.document(frame)?;
        self.last_document = Some(document);
        self.documents_rendered += 1;
        Ok(())
    }
}

fn write_item(svg: &mut String, item: &ElementTransition) {
    let (tag, attributes, text) = markup(&item.to);
    let _ = write!(svg, "<{tag} data-key=\"{}\"", escape_xml(&item.key.to_string()));
    for (name, value) in &attributes {
        let _ = write!(svg, " {name}=\"{}\"", escape_xml(value));
    }

    let animations = if item.is_animated() {
        animations(&item.from, &attributes, tag)
    } else {
        Vec::new()
    };
    if animations.is_empty() && text.is_none() {
        svg.push_str("/>\n");
        return;
    }

    svg.push('>');
    for (name, from, to) in &animations {
        let _ = write!(
            svg,
            r#"<animate attributeName="{name}" from="{}" to="{}" dur="{}ms" fill="freeze" calcMode="spline" keyTimes="0;1" keySplines="{EASE_SPLINE}"/>"#,
            escape_xml(from),
            escape_xml(to),
            item.duration_ms
        );
    }
    if let Some(text) = text {
        svg.push_str(&escape_xml(&text));
    }
    let _ = writeln!(svg, "</{tag}>");
}

/// Attributes whose start value differs from the target.
fn animations(
    from: &Element,
    to_attributes: &Attributes,
    to_tag: &str,
) -> Vec<(&'static str, String, String)> {
    let (from_tag, from_attributes, _) = markup(from);
    if from_tag != to_tag {
        return Vec::new();
    }
    to_attributes
        .iter()
        .filter(|(name, _)| ANIMATABLE.contains(name))
        .filter_map(|(name, to_value)| {
            let from_value = from_attributes
                .iter()
                .find(|(from_name, _)| from_name == name)
                .map(|(_, value)| value)?;
            (from_value != to_value).then(|| (*name, from_value.clone(), to_value.clone()))
        })
        .collect()
}

const ANIMATABLE: [&str; 16] = [
    "x", "y", "x1", "y1", "x2", "y2", "cx", "cy", "r", "width", "height", "d", "fill", "stroke",
    "opacity", "stroke-width",
];

fn markup(element: &Element) -> (&'static str, Attributes, Option<String>) {
    let mut attributes: Attributes = Vec::new();
    let mut push = |name: &'static str, value: String| attributes.push((name, value));
    let (tag, text) = match &element.shape {
        Shape::Line(line) => {
            push("x1", trim_float(line.x1));
            push("y1", trim_float(line.y1));
            push("x2", trim_float(line.x2));
            push("y2", trim_float(line.y2));
            push("stroke", line.color.to_css());
            push("stroke-width", trim_float(line.stroke_width));
            if let LineStrokeStyle::Dashed { dash, gap } = line.stroke_style {
                push("stroke-dasharray", format!("{dash} {gap}"));
            }
            ("line", None)
        }
        Shape::Rect(rect) => {
            push("x", trim_float(rect.x));
            push("y", trim_float(rect.y));
            push("width", trim_float(rect.width));
            push("height", trim_float(rect.height));
            if rect.corner_radius > 0.0 {
                push("rx", trim_float(rect.corner_radius));
            }
            push("fill", rect.fill.to_css());
            if let Some((color, width)) = rect.stroke {
                push("stroke", color.to_css());
                push("stroke-width", trim_float(width));
            }
            ("rect", None)
        }
        Shape::Circle(circle) => {
            push("cx", trim_float(circle.cx));
            push("cy", trim_float(circle.cy));
            push("r", trim_float(circle.radius));
            push("fill", circle.fill.to_css());
            if let Some((color, width)) = circle.stroke {
                push("stroke", color.to_css());
                push("stroke-width", trim_float(width));
            }
            ("circle", None)
        }
        Shape::Path(path) => {
            push("d", path_data(&path.points, path.curve, path.closed));
            push(
                "fill",
                path.fill.map_or_else(|| "none".to_owned(), |fill| fill.to_css()),
            );
            push("stroke", path.stroke.to_css());
            push("stroke-width", trim_float(path.stroke_width));
            push("stroke-linejoin", "round".to_owned());
            push("stroke-linecap", "round".to_owned());
            ("path", None)
        }
        Shape::Text(text) => {
            push("x", trim_float(text.x));
            push("y", trim_float(text.y));
            push("font-size", trim_float(text.font_size_px));
            push("fill", text.color.to_css());
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            push("text-anchor", anchor.to_owned());
            push("dominant-baseline", "middle".to_owned());
            if text.bold {
                push("font-weight", "600".to_owned());
            }
            if text.rotation_deg != 0.0 {
                push(
                    "transform",
                    format!(
                        "rotate({} {} {})",
                        trim_float(text.rotation_deg),
                        trim_float(text.x),
                        trim_float(text.y)
                    ),
                );
            }
            ("text", Some(text.text.clone()))
        }
    };
    attributes.push(("opacity", trim_float(element.opacity)));
    (tag, attributes, text)
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
