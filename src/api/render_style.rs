use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Ten-color categorical palette assigned to sites in discovery order.
pub const TABLEAU10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Visual constants of the explorer chart.
///
/// Colors serialize as CSS strings; every field falls back to its default
/// when missing from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub plot_background: Color,
    pub plot_corner_radius: f64,
    pub grid_color: Color,
    pub grid_width: f64,
    pub y_tick_count: usize,
    pub y_tick_mark_color: Color,
    pub y_tick_mark_length: f64,
    pub axis_domain_color: Color,
    pub axis_text_color: Color,
    pub x_tick_font_px: f64,
    pub y_tick_font_px: f64,
    pub axis_title_color: Color,
    pub axis_title_font_px: f64,
    /// Horizontal distance of the rotated axis title from the plot's left edge.
    pub axis_title_offset: f64,
    pub line_width: f64,
    pub curve_alpha: f64,
    pub inactive_line_opacity: f64,
    pub point_radius: f64,
    pub point_hover_radius: f64,
    pub point_stroke: Color,
    pub point_stroke_width: f64,
    pub legend_font_px: f64,
    pub legend_swatch_radius: f64,
    pub legend_inactive_opacity: f64,
    pub tooltip_background: Color,
    pub tooltip_text_color: Color,
    pub tooltip_font_px: f64,
    pub tooltip_corner_radius: f64,
    pub tooltip_offset: (f64, f64),
    pub message_color: Color,
    pub palette: Vec<Color>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            plot_background: Color::from_rgba8(0xf2, 0xf7, 0xfb, 1.0),
            plot_corner_radius: 18.0,
            grid_color: Color::from_rgba8(15, 140, 198, 0.12),
            grid_width: 1.0,
            y_tick_count: 6,
            y_tick_mark_color: Color::from_rgba8(15, 140, 198, 0.35),
            y_tick_mark_length: 6.0,
            axis_domain_color: Color::from_rgba8(82, 100, 121, 0.45),
            axis_text_color: Color::from_rgba8(0x52, 0x64, 0x79, 1.0),
            x_tick_font_px: 13.12,
            y_tick_font_px: 12.8,
            axis_title_color: Color::from_rgba8(0x0b, 0x3c, 0x5d, 1.0),
            axis_title_font_px: 15.2,
            axis_title_offset: 58.0,
            line_width: 2.6,
            curve_alpha: 0.65,
            inactive_line_opacity: 0.35,
            point_radius: 5.0,
            point_hover_radius: 7.0,
            point_stroke: Color::WHITE,
            point_stroke_width: 1.6,
            legend_font_px: 13.0,
            legend_swatch_radius: 6.0,
            legend_inactive_opacity: 0.4,
            tooltip_background: Color::from_rgba8(11, 60, 93, 0.92),
            tooltip_text_color: Color::WHITE,
            tooltip_font_px: 13.6,
            tooltip_corner_radius: 10.0,
            tooltip_offset: (16.0, -32.0),
            message_color: Color::from_rgba8(0x0b, 0x3c, 0x5d, 1.0),
            palette: default_palette(),
        }
    }
}

fn default_palette() -> Vec<Color> {
    TABLEAU10
        .iter()
        .filter_map(|hex| Color::from_hex(hex).ok())
        .collect()
}

impl ChartStyle {
    /// Color of the site at discovery position `index`, cycling the palette.
    #[must_use]
    pub fn site_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.axis_title_color;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        let colors = [
            self.plot_background,
            self.grid_color,
            self.y_tick_mark_color,
            self.axis_domain_color,
            self.axis_text_color,
            self.axis_title_color,
            self.point_stroke,
            self.tooltip_background,
            self.tooltip_text_color,
            self.message_color,
        ];
        for color in colors.iter().chain(self.palette.iter()) {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        if self.palette.is_empty() {
            return Err(ChartError::InvalidConfig(
                "style palette must not be empty".to_owned(),
            ));
        }

        let positive = [
            ("line_width", self.line_width),
            ("point_radius", self.point_radius),
            ("point_hover_radius", self.point_hover_radius),
            ("x_tick_font_px", self.x_tick_font_px),
            ("y_tick_font_px", self.y_tick_font_px),
            ("axis_title_font_px", self.axis_title_font_px),
            ("legend_font_px", self.legend_font_px),
            ("tooltip_font_px", self.tooltip_font_px),
            ("grid_width", self.grid_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        if self.point_hover_radius < self.point_radius {
            return Err(ChartError::InvalidConfig(
                "style `point_hover_radius` must be >= `point_radius`".to_owned(),
            ));
        }
        for (name, value) in [
            ("inactive_line_opacity", self.inactive_line_opacity),
            ("legend_inactive_opacity", self.legend_inactive_opacity),
            ("curve_alpha", self.curve_alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidConfig(format!(
                    "style `{name}` must be in [0, 1]"
                )));
            }
        }
        if self.y_tick_count == 0 {
            return Err(ChartError::InvalidConfig(
                "style `y_tick_count` must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}
