use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS color string (`#rrggbb` or `rgba(r, g, b, a)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels and a 0..=1 alpha.
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    /// Parses `#rrggbb` or `#rgb`.
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let digits = input.trim().strip_prefix('#').unwrap_or(input.trim());
        let expanded: String = match digits.len() {
            _ if !digits.is_ascii() => {
                return Err(ChartError::InvalidData(format!("color `{input}` is not hex")));
            }
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_owned(),
            _ => {
                return Err(ChartError::InvalidData(format!(
                    "color `{input}` must be #rrggbb or #rgb"
                )));
            }
        };
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16)
                .map_err(|_| ChartError::InvalidData(format!("color `{input}` is not hex")))
        };
        Ok(Self::from_rgba8(channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0))
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// CSS color value: `#rrggbb` when opaque, `rgba(...)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        let [red, green, blue] = [self.red, self.green, self.blue].map(to_channel8);
        if self.alpha >= 1.0 {
            format!("#{red:02x}{green:02x}{blue:02x}")
        } else {
            format!("rgba({red}, {green}, {blue}, {})", trim_float(self.alpha))
        }
    }

    /// Component-wise interpolation, `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self::rgba(
            lerp(self.red, to.red, t),
            lerp(self.green, to.green, t),
            lerp(self.blue, to.blue, t),
            lerp(self.alpha, to.alpha, t),
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    /// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    fn from_str(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        if trimmed.starts_with('#') {
            return Self::from_hex(trimmed);
        }

        let invalid = || ChartError::InvalidData(format!("unsupported color `{input}`"));
        let (body, has_alpha) = if let Some(body) = trimmed.strip_prefix("rgba(") {
            (body, true)
        } else if let Some(body) = trimmed.strip_prefix("rgb(") {
            (body, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts = body
            .split(',')
            .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
            .collect::<ChartResult<Vec<f64>>>()?;

        let color = match (parts.as_slice(), has_alpha) {
            ([red, green, blue], false) => {
                Self::rgba(red / 255.0, green / 255.0, blue / 255.0, 1.0)
            }
            ([red, green, blue, alpha], true) => {
                Self::rgba(red / 255.0, green / 255.0, blue / 255.0, *alpha)
            }
            _ => return Err(invalid()),
        };
        color.validate()?;
        Ok(color)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

fn to_channel8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Shortest decimal text for SVG attributes (at most 3 fractional digits).
pub(crate) fn trim_float(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" || text.is_empty() {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

fn ensure_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite")))
    }
}

/// Stroke pattern for line-like shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    /// Dash and gap lengths in pixels.
    Dashed { dash: u16, gap: u16 },
}

/// One straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled rectangle with optional rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub fill: Color,
    pub stroke: Option<(Color, f64)>,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            corner_radius: 0.0,
            fill,
            stroke: None,
        }
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    #[must_use]
    pub const fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some((color, width));
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(
            &[self.x, self.y, self.width, self.height, self.corner_radius],
            "rect geometry",
        )?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if let Some((color, width)) = self.stroke {
            ensure_finite(&[width], "rect stroke width")?;
            color.validate()?;
        }
        self.fill.validate()
    }
}

/// Filled circle with an optional outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Color,
    pub stroke: Option<(Color, f64)>,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, fill: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill,
            stroke: None,
        }
    }

    #[must_use]
    pub const fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some((color, width));
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.cx, self.cy, self.radius], "circle geometry")?;
        if self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be >= 0".to_owned(),
            ));
        }
        if let Some((color, width)) = self.stroke {
            ensure_finite(&[width], "circle stroke width")?;
            color.validate()?;
        }
        self.fill.validate()
    }
}

/// Interpolation used between path vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCurve {
    Linear,
    /// Catmull-Rom spline with the given parameterization alpha.
    CatmullRom { alpha: f64 },
}

/// Open or closed polyline through `points`, drawn with `curve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub points: Vec<(f64, f64)>,
    pub curve: PathCurve,
    pub closed: bool,
    pub stroke: Color,
    pub stroke_width: f64,
    pub fill: Option<Color>,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(
        points: Vec<(f64, f64)>,
        curve: PathCurve,
        stroke: Color,
        stroke_width: f64,
    ) -> Self {
        Self {
            points,
            curve,
            closed: false,
            stroke,
            stroke_width,
            fill: None,
        }
    }

    #[must_use]
    pub fn closed_with_fill(mut self, fill: Color) -> Self {
        self.closed = true;
        self.fill = Some(fill);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (x, y) in &self.points {
            ensure_finite(&[*x, *y], "path vertices")?;
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ChartError::InvalidData(
                "path stroke width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        self.stroke.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// One label anchored at `(x, y)`, optionally rotated around the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub rotation_deg: f64,
    pub bold: bool,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            rotation_deg: 0.0,
            bold: false,
        }
    }

    #[must_use]
    pub fn rotated(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        ensure_finite(&[self.x, self.y, self.rotation_deg], "text placement")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Any drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
}

impl Shape {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Path(path) => path.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// A shape plus its group opacity; the unit the reconciler animates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub shape: Shape,
    pub opacity: f64,
}

impl Element {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Invisible starting state for an entering element (points grow from r = 0).
    #[must_use]
    pub fn faded(&self) -> Self {
        let mut faded = self.clone().with_opacity(0.0);
        if let Shape::Circle(circle) = &mut faded.shape {
            circle.radius = 0.0;
        }
        faded
    }

    /// Interpolated state at `t` in `[0, 1]`.
    ///
    /// Shapes of different kinds, paths with different vertex counts and text
    /// content switch discretely at the end.
    #[must_use]
    pub fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let opacity = lerp(from.opacity, to.opacity, t);
        let shape = match (&from.shape, &to.shape) {
            (Shape::Line(a), Shape::Line(b)) => Shape::Line(LinePrimitive {
                x1: lerp(a.x1, b.x1, t),
                y1: lerp(a.y1, b.y1, t),
                x2: lerp(a.x2, b.x2, t),
                y2: lerp(a.y2, b.y2, t),
                stroke_width: lerp(a.stroke_width, b.stroke_width, t),
                color: a.color.lerp(b.color, t),
                stroke_style: b.stroke_style,
            }),
            (Shape::Rect(a), Shape::Rect(b)) => Shape::Rect(RectPrimitive {
                x: lerp(a.x, b.x, t),
                y: lerp(a.y, b.y, t),
                width: lerp(a.width, b.width, t),
                height: lerp(a.height, b.height, t),
                corner_radius: lerp(a.corner_radius, b.corner_radius, t),
                fill: a.fill.lerp(b.fill, t),
                stroke: b.stroke,
            }),
            (Shape::Circle(a), Shape::Circle(b)) => Shape::Circle(CirclePrimitive {
                cx: lerp(a.cx, b.cx, t),
                cy: lerp(a.cy, b.cy, t),
                radius: lerp(a.radius, b.radius, t),
                fill: a.fill.lerp(b.fill, t),
                stroke: b.stroke,
            }),
            (Shape::Path(a), Shape::Path(b)) if a.points.len() == b.points.len() => {
                Shape::Path(PathPrimitive {
                    points: a
                        .points
                        .iter()
                        .zip(&b.points)
                        .map(|(p, q)| (lerp(p.0, q.0, t), lerp(p.1, q.1, t)))
                        .collect(),
                    curve: b.curve,
                    closed: b.closed,
                    stroke: a.stroke.lerp(b.stroke, t),
                    stroke_width: lerp(a.stroke_width, b.stroke_width, t),
                    fill: b.fill,
                })
            }
            (Shape::Text(a), Shape::Text(b)) => Shape::Text(TextPrimitive {
                x: lerp(a.x, b.x, t),
                y: lerp(a.y, b.y, t),
                color: a.color.lerp(b.color, t),
                ..b.clone()
            }),
            _ if t < 1.0 => from.shape.clone(),
            _ => to.shape.clone(),
        };
        Self { shape, opacity }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "element opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.shape.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{CirclePrimitive, Color, Element, Shape, trim_float};

    #[test]
    fn hex_colors_round_trip_through_css() {
        let color = Color::from_hex("#0f8cc6").expect("valid hex");
        assert_eq!(color.to_css(), "#0f8cc6");
        assert_eq!(Color::from_hex("#fff").expect("short hex").to_css(), "#ffffff");
        assert!(Color::from_hex("#12").is_err());
    }

    #[test]
    fn translucent_colors_use_rgba() {
        let color = Color::from_rgba8(15, 140, 198, 0.12);
        assert_eq!(color.to_css(), "rgba(15, 140, 198, 0.12)");
    }

    #[test]
    fn css_strings_parse_and_serialize() {
        let color: Color = "rgba(15, 140, 198, 0.35)".parse().expect("rgba");
        assert_eq!(color.to_css(), "rgba(15, 140, 198, 0.35)");
        let json = serde_json::to_string(&Color::from_rgba8(82, 100, 121, 1.0)).expect("json");
        assert_eq!(json, "\"#526479\"");
        assert!("hsl(1, 2, 3)".parse::<Color>().is_err());
    }

    #[test]
    fn faded_circle_starts_at_zero_radius() {
        let element = Element::new(Shape::Circle(CirclePrimitive::new(
            10.0,
            20.0,
            5.0,
            Color::WHITE,
        )));
        let faded = element.faded();
        assert_eq!(faded.opacity, 0.0);
        match faded.shape {
            Shape::Circle(circle) => assert_eq!(circle.radius, 0.0),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn trim_float_drops_trailing_zeros() {
        assert_eq!(trim_float(12.5), "12.5");
        assert_eq!(trim_float(3.0), "3");
        assert_eq!(trim_float(-0.0001), "0");
    }
}
