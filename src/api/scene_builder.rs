use ordered_float::OrderedFloat;
use smallvec::{SmallVec, smallvec};

use crate::core::{
    ChartLayout, ChartScales, Dataset, FilterState, MetricDescriptor, NO_DATA_SUMMARY, SeriesPoint,
    SiteSeries, build_site_series,
};
use crate::interaction::{HoverCandidate, PointKey, TooltipState};
use crate::render::{
    CirclePrimitive, Element, ElementKey, LayerKind, LinePrimitive, LineStrokeStyle, PathCurve,
    PathPrimitive, RectPrimitive, Scene, Shape, TextHAlign, TextPrimitive,
};

use super::ChartStyle;

/// Approximate advance of one glyph relative to the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.58;
const LEGEND_ITEM_GAP: f64 = 24.0;
const TOOLTIP_PADDING: (f64, f64) = (14.0, 10.0);

/// Everything a redraw needs to place elements.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub layout: ChartLayout,
    pub style: &'a ChartStyle,
    pub dataset: &'a Dataset,
    pub filter: &'a FilterState,
    /// Series of the active sites, as built for this cycle.
    pub series: &'a [SiteSeries],
    /// `None` when nothing is visible.
    pub scales: Option<&'a ChartScales>,
    pub hovered: Option<&'a PointKey>,
    pub tooltip: &'a TooltipState,
    pub caption: &'a str,
}

/// Builds the target scene of one redraw cycle.
///
/// Without scales every data-driven layer stays empty; the plot background,
/// axis title and legend remain.
#[must_use]
pub fn build_scene(input: &SceneInput<'_>) -> Scene {
    let mut scene = Scene::new(input.layout.viewport, input.caption);
    let metric = input.filter.metric().descriptor();

    push_background(&mut scene, input);
    push_axis_title(&mut scene, input, metric);
    push_legend(&mut scene, input);

    match input.scales {
        Some(scales) => {
            push_grid(&mut scene, input, scales);
            push_axes(&mut scene, input, scales, metric);
            push_series_lines(&mut scene, input, scales, metric);
            push_points(&mut scene, input, scales);
            push_tooltip(&mut scene, input);
        }
        None => push_message(&mut scene, input, NO_DATA_SUMMARY),
    }
    scene
}

fn push_background(scene: &mut Scene, input: &SceneInput<'_>) {
    let layout = input.layout;
    let rect = RectPrimitive::new(
        layout.margin.left,
        layout.margin.top,
        layout.inner_width(),
        layout.inner_height(),
        input.style.plot_background,
    )
    .with_corner_radius(input.style.plot_corner_radius);
    scene.insert(
        LayerKind::Background,
        ElementKey::Background,
        Element::new(Shape::Rect(rect)),
    );
}

fn push_grid(scene: &mut Scene, input: &SceneInput<'_>, scales: &ChartScales) {
    let layout = input.layout;
    let left = layout.margin.left;
    let right = left + layout.inner_width();
    for tick in scales.y.ticks(input.style.y_tick_count) {
        let (_, y) = layout.to_viewport(0.0, scales.y.map(tick));
        let line = LinePrimitive::new(
            left,
            y,
            right,
            y,
            input.style.grid_width,
            input.style.grid_color,
        );
        scene.insert(
            LayerKind::Grid,
            ElementKey::GridLine(OrderedFloat(tick)),
            Element::new(Shape::Line(line)),
        );
    }
}

fn push_axes(
    scene: &mut Scene,
    input: &SceneInput<'_>,
    scales: &ChartScales,
    metric: &MetricDescriptor,
) {
    let layout = input.layout;
    let style = input.style;
    let left = layout.margin.left;
    let top = layout.margin.top;
    let bottom = top + layout.inner_height();

    let right = left + layout.inner_width();
    let x_domain = LinePrimitive::new(left, bottom, right, bottom, 1.0, style.axis_domain_color);
    let y_domain = LinePrimitive::new(left, top, left, bottom, 1.0, style.axis_domain_color);
    scene.insert(
        LayerKind::Axis,
        ElementKey::XDomain,
        Element::new(Shape::Line(x_domain)),
    );
    scene.insert(
        LayerKind::Axis,
        ElementKey::YDomain,
        Element::new(Shape::Line(y_domain)),
    );

    for (month, x) in scales.x.positions() {
        let label = TextPrimitive::new(
            month,
            left + x,
            bottom + 18.0,
            style.x_tick_font_px,
            style.axis_text_color,
            TextHAlign::Center,
        );
        scene.insert(
            LayerKind::Axis,
            ElementKey::XTickLabel(month.to_owned()),
            Element::new(Shape::Text(label)),
        );
    }

    for tick in scales.y.ticks(style.y_tick_count) {
        let (_, y) = layout.to_viewport(0.0, scales.y.map(tick));
        let mark_start = left - style.y_tick_mark_length;
        let mark = LinePrimitive::new(mark_start, y, left, y, 1.0, style.y_tick_mark_color)
            .with_stroke_style(LineStrokeStyle::Dashed { dash: 2, gap: 4 });
        let label = TextPrimitive::new(
            metric.format_with_suffix(tick),
            mark_start - 3.0,
            y,
            style.y_tick_font_px,
            style.axis_text_color,
            TextHAlign::Right,
        );
        scene.insert(
            LayerKind::Axis,
            ElementKey::YTickMark(OrderedFloat(tick)),
            Element::new(Shape::Line(mark)),
        );
        scene.insert(
            LayerKind::Axis,
            ElementKey::YTickLabel(OrderedFloat(tick)),
            Element::new(Shape::Text(label)),
        );
    }
}

fn push_axis_title(scene: &mut Scene, input: &SceneInput<'_>, metric: &MetricDescriptor) {
    let layout = input.layout;
    let style = input.style;
    let title = TextPrimitive::new(
        metric.y_label,
        layout.margin.left - style.axis_title_offset,
        layout.margin.top + layout.inner_height() / 2.0,
        style.axis_title_font_px,
        style.axis_title_color,
        TextHAlign::Center,
    )
    .rotated(-90.0)
    .bold();
    scene.insert(LayerKind::Axis, ElementKey::AxisTitle, Element::new(Shape::Text(title)));
}

/// Viewport position of a point, clamped into the plot when `clamp` is set.
fn project(
    layout: ChartLayout,
    scales: &ChartScales,
    point: &SeriesPoint,
    clamp: bool,
) -> Option<(f64, f64)> {
    let x = scales.x.position(&point.month_name)?;
    let y = if clamp {
        scales.y.map_clamped(point.value)
    } else {
        scales.y.map(point.value)
    };
    Some(layout.to_viewport(x, y))
}

fn push_series_lines(
    scene: &mut Scene,
    input: &SceneInput<'_>,
    scales: &ChartScales,
    metric: &MetricDescriptor,
) {
    let style = input.style;
    for (index, site) in input.filter.all_sites().iter().enumerate() {
        let active = input.filter.is_active(site);
        let inactive_series;
        let series = if active {
            match input.series.iter().find(|entry| &entry.site == site) {
                Some(series) => series,
                None => continue,
            }
        } else {
            inactive_series =
                build_site_series(input.dataset, input.filter.season(), metric, site);
            &inactive_series
        };

        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .filter_map(|point| project(input.layout, scales, point, !active))
            .collect();
        if points.is_empty() {
            continue;
        }

        let path = PathPrimitive::new(
            points,
            PathCurve::CatmullRom {
                alpha: style.curve_alpha,
            },
            style.site_color(index),
            style.line_width,
        );
        let opacity = if active { 1.0 } else { style.inactive_line_opacity };
        scene.insert(
            LayerKind::Series,
            ElementKey::SeriesLine(site.clone()),
            Element::new(Shape::Path(path)).with_opacity(opacity),
        );
    }
}

fn push_points(scene: &mut Scene, input: &SceneInput<'_>, scales: &ChartScales) {
    let style = input.style;
    for series in input.series {
        let color = style.site_color(input.dataset.site_index(&series.site).unwrap_or(0));
        for point in &series.values {
            let Some((cx, cy)) = project(input.layout, scales, point, false) else {
                continue;
            };
            let hovered = input
                .hovered
                .is_some_and(|key| key.site == point.site && key.month_index == point.month_index);
            let radius = if hovered {
                style.point_hover_radius
            } else {
                style.point_radius
            };
            let circle = CirclePrimitive::new(cx, cy, radius, color)
                .with_stroke(style.point_stroke, style.point_stroke_width);
            scene.insert(
                LayerKind::Points,
                ElementKey::point(point.site.clone(), point.month_index),
                Element::new(Shape::Circle(circle)),
            );
        }
    }
}

fn push_legend(scene: &mut Scene, input: &SceneInput<'_>) {
    let style = input.style;
    let layout = input.layout;
    let y = f64::from(layout.viewport.height) - 20.0;
    let mut x = layout.margin.left + style.legend_swatch_radius;

    for (index, site) in input.filter.all_sites().iter().enumerate() {
        let opacity = if input.filter.is_active(site) {
            1.0
        } else {
            style.legend_inactive_opacity
        };
        let swatch =
            CirclePrimitive::new(x, y, style.legend_swatch_radius, style.site_color(index));
        let label_x = x + style.legend_swatch_radius + 8.0;
        let label = TextPrimitive::new(
            site.as_str(),
            label_x,
            y,
            style.legend_font_px,
            style.axis_text_color,
            TextHAlign::Left,
        );
        scene.insert(
            LayerKind::Legend,
            ElementKey::LegendSwatch(site.clone()),
            Element::new(Shape::Circle(swatch)).with_opacity(opacity),
        );
        scene.insert(
            LayerKind::Legend,
            ElementKey::LegendLabel(site.clone()),
            Element::new(Shape::Text(label)).with_opacity(opacity),
        );
        x = label_x
            + estimate_text_width(site, style.legend_font_px)
            + LEGEND_ITEM_GAP
            + style.legend_swatch_radius;
    }
}

fn push_tooltip(scene: &mut Scene, input: &SceneInput<'_>) {
    let tooltip = input.tooltip;
    if !tooltip.visible || tooltip.lines.is_empty() || input.hovered.is_none() {
        return;
    }
    let style = input.style;
    let line_height = style.tooltip_font_px * 1.5;
    let width = tooltip
        .lines
        .iter()
        .map(|line| estimate_text_width(line, style.tooltip_font_px))
        .fold(0.0, f64::max)
        + TOOLTIP_PADDING.0 * 2.0;
    let height = line_height * tooltip.lines.len() as f64 + TOOLTIP_PADDING.1 * 2.0;

    let viewport_width = f64::from(input.layout.viewport.width);
    let viewport_height = f64::from(input.layout.viewport.height);
    let x = tooltip.x.min(viewport_width - width).max(0.0);
    let y = tooltip.y.min(viewport_height - height).max(0.0);

    let panel = RectPrimitive::new(x, y, width, height, style.tooltip_background)
        .with_corner_radius(style.tooltip_corner_radius);
    scene.insert(
        LayerKind::Overlay,
        ElementKey::TooltipPanel,
        Element::new(Shape::Rect(panel)),
    );
    for (index, line) in tooltip.lines.iter().enumerate() {
        let mut text = TextPrimitive::new(
            line.as_str(),
            x + TOOLTIP_PADDING.0,
            y + TOOLTIP_PADDING.1 + line_height * (index as f64 + 0.5),
            style.tooltip_font_px,
            style.tooltip_text_color,
            TextHAlign::Left,
        );
        if index == 0 {
            text = text.bold();
        }
        scene.insert(
            LayerKind::Overlay,
            ElementKey::TooltipLine(index),
            Element::new(Shape::Text(text)),
        );
    }
}

fn push_message(scene: &mut Scene, input: &SceneInput<'_>, message: &str) {
    let layout = input.layout;
    let text = TextPrimitive::new(
        message,
        layout.margin.left + layout.inner_width() / 2.0,
        layout.margin.top + layout.inner_height() / 2.0,
        input.style.axis_title_font_px,
        input.style.message_color,
        TextHAlign::Center,
    );
    scene.insert(LayerKind::Overlay, ElementKey::Message, Element::new(Shape::Text(text)));
}

#[must_use]
pub fn estimate_text_width(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * GLYPH_WIDTH_RATIO
}

/// Tooltip text of one point: site and region, month and season, value.
#[must_use]
pub fn tooltip_lines(point: &SeriesPoint, metric: &MetricDescriptor) -> SmallVec<[String; 3]> {
    smallvec![
        format!("{} · {}", point.site, point.region),
        format!("{} ({})", point.month_name, point.season),
        format!("{}: {}", metric.label, metric.format_with_suffix(point.value)),
    ]
}

/// Hoverable points of the current cycle in viewport coordinates.
#[must_use]
pub fn hover_candidates(
    layout: ChartLayout,
    metric: &MetricDescriptor,
    series: &[SiteSeries],
    scales: Option<&ChartScales>,
) -> Vec<HoverCandidate> {
    let Some(scales) = scales else {
        return Vec::new();
    };
    series
        .iter()
        .flat_map(|entry| entry.values.iter())
        .filter_map(|point| {
            let (x, y) = project(layout, scales, point, false)?;
            Some(HoverCandidate {
                key: PointKey::new(point.site.clone(), point.month_index),
                x,
                y,
                lines: tooltip_lines(point, metric),
            })
        })
        .collect()
}
