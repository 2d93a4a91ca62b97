//! Static companion charts built from the full dataset.

use std::f64::consts::{FRAC_PI_2, TAU};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    BandScale, BoxSummary, ChartLayout, DEFAULT_NICE_COUNT, Dataset, LinearScale, Margins,
    MetricDescriptor, MetricKey, Season, SeasonFilter, Viewport, mean, month_name,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, Element, ElementKey, LayerKind, LinePrimitive, LineStrokeStyle,
    PathCurve, PathPrimitive, RectPrimitive, Scene, Shape, TextHAlign, TextPrimitive,
};

use super::ChartStyle;

const MONTHS: usize = 12;
const SEASONS: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];
const MEDIAN_COLOR: (u8, u8, u8) = (0x2c, 0x3e, 0x50);
const WHISKER_COLOR: (u8, u8, u8) = (0x34, 0x49, 0x5e);

/// One chart of the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GalleryChart {
    MonthlyMeans,
    SiteHeatmap,
    SeasonalBoxPlot,
    RadialCycle,
}

impl GalleryChart {
    pub const ALL: [Self; 4] = [
        Self::MonthlyMeans,
        Self::SiteHeatmap,
        Self::SeasonalBoxPlot,
        Self::RadialCycle,
    ];

    /// File-name friendly identifier.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::MonthlyMeans => "monthly-means",
            Self::SiteHeatmap => "site-heatmap",
            Self::SeasonalBoxPlot => "seasonal-box-plot",
            Self::RadialCycle => "radial-cycle",
        }
    }

    #[must_use]
    pub fn title(self, metric: &MetricDescriptor) -> String {
        match self {
            Self::MonthlyMeans => {
                format!("Monthly mean {} across all sites", metric.label.to_lowercase())
            }
            Self::SiteHeatmap => format!("{} by site and month", metric.label),
            Self::SeasonalBoxPlot => {
                format!("Seasonal distribution of {}", metric.label.to_lowercase())
            }
            Self::RadialCycle => format!("Annual cycle of {}", metric.label.to_lowercase()),
        }
    }

    #[must_use]
    pub fn layout(self) -> ChartLayout {
        match self {
            Self::MonthlyMeans | Self::SeasonalBoxPlot => ChartLayout {
                viewport: Viewport::new(800, 400),
                margin: Margins::new(20.0, 30.0, 50.0, 70.0),
            },
            Self::SiteHeatmap => ChartLayout {
                viewport: Viewport::new(800, 400),
                margin: Margins::new(40.0, 30.0, 50.0, 120.0),
            },
            Self::RadialCycle => ChartLayout {
                viewport: Viewport::new(500, 500),
                margin: Margins::new(20.0, 20.0, 20.0, 20.0),
            },
        }
    }

    /// Builds the chart's scene. Fails when the metric has no observations.
    pub fn build(
        self,
        dataset: &Dataset,
        metric: MetricKey,
        style: &ChartStyle,
    ) -> ChartResult<Scene> {
        let descriptor = metric.descriptor();
        let layout = self.layout();
        let scene = match self {
            Self::MonthlyMeans => monthly_means_chart(dataset, descriptor, layout, style),
            Self::SiteHeatmap => site_heatmap_chart(dataset, descriptor, layout, style),
            Self::SeasonalBoxPlot => seasonal_box_plot_chart(dataset, descriptor, layout, style),
            Self::RadialCycle => radial_cycle_chart(dataset, descriptor, layout, style),
        }?;
        debug!(
            chart = self.slug(),
            %metric,
            elements = scene.element_count(),
            "gallery chart built"
        );
        Ok(scene)
    }
}

fn no_values(metric: &MetricDescriptor) -> ChartError {
    ChartError::InvalidData(format!("no {} values to chart", metric.label.to_lowercase()))
}

/// Mean value of every calendar month across all sites.
#[must_use]
pub fn monthly_means(dataset: &Dataset, metric: &MetricDescriptor) -> [Option<f64>; MONTHS] {
    let mut buckets: [Vec<f64>; MONTHS] = Default::default();
    for record in dataset.records() {
        if let Some(value) = metric.value_of(record) {
            buckets[record.month_index()].push(value);
        }
    }
    buckets.map(|values| mean(&values))
}

/// Per-site monthly values (mean of duplicates), sites in discovery order.
#[must_use]
pub fn site_month_values(
    dataset: &Dataset,
    metric: &MetricDescriptor,
) -> IndexMap<String, [Option<f64>; MONTHS]> {
    dataset
        .sites()
        .iter()
        .map(|site| {
            let mut buckets: [Vec<f64>; MONTHS] = Default::default();
            for record in dataset.records().iter().filter(|record| &record.site == site) {
                if let Some(value) = metric.value_of(record) {
                    buckets[record.month_index()].push(value);
                }
            }
            (site.clone(), buckets.map(|values| mean(&values)))
        })
        .collect()
}

/// All observations of each season, in season order.
#[must_use]
pub fn seasonal_values(dataset: &Dataset, metric: &MetricDescriptor) -> Vec<(Season, Vec<f64>)> {
    SEASONS
        .into_iter()
        .map(|season| {
            let filter = SeasonFilter::from(season);
            let values = dataset
                .records()
                .iter()
                .filter(|record| filter.contains_month_index(record.month_index()))
                .filter_map(|record| metric.value_of(record))
                .collect();
            (season, values)
        })
        .collect()
}

/// Sequential yellow-green-blue ramp, `t` in `[0, 1]`.
#[must_use]
pub fn sequential_color(t: f64) -> Color {
    let low = Color::from_rgba8(0xff, 0xff, 0xd9, 1.0);
    let mid = Color::from_rgba8(0x41, 0xb6, 0xc4, 1.0);
    let high = Color::from_rgba8(0x08, 0x1d, 0x58, 1.0);
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    if t <= 0.5 {
        low.lerp(mid, t * 2.0)
    } else {
        mid.lerp(high, (t - 0.5) * 2.0)
    }
}

fn rgb((red, green, blue): (u8, u8, u8)) -> Color {
    Color::from_rgba8(red, green, blue, 1.0)
}

fn normalized(value: f64, min: f64, max: f64) -> f64 {
    if max > min { (value - min) / (max - min) } else { 0.5 }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

/// Vertical value scale including zero, niced, mapped onto the plot height.
fn value_scale(min: f64, max: f64, layout: ChartLayout) -> ChartResult<LinearScale> {
    let lower = min.min(0.0);
    let upper = if max > lower { max } else { lower + 1.0 };
    Ok(LinearScale::new((lower, upper), (layout.inner_height(), 0.0))?.nice(DEFAULT_NICE_COUNT))
}

fn month_labels() -> Vec<String> {
    (0..MONTHS)
        .filter_map(month_name)
        .map(str::to_owned)
        .collect()
}

fn push_text(scene: &mut Scene, layer: LayerKind, key: String, text: TextPrimitive) {
    scene.insert(layer, ElementKey::Mark(key), Element::new(Shape::Text(text)));
}

fn push_line(scene: &mut Scene, layer: LayerKind, key: String, line: LinePrimitive) {
    scene.insert(layer, ElementKey::Mark(key), Element::new(Shape::Line(line)));
}

fn push_plot_background(scene: &mut Scene, layout: ChartLayout, style: &ChartStyle) {
    let rect = RectPrimitive::new(
        layout.margin.left,
        layout.margin.top,
        layout.inner_width(),
        layout.inner_height(),
        style.plot_background,
    )
    .with_corner_radius(style.plot_corner_radius / 2.0);
    scene.insert(LayerKind::Background, ElementKey::Background, Element::new(Shape::Rect(rect)));
}

/// Grid, tick marks and tick labels of a vertical value axis.
fn push_value_axis(
    scene: &mut Scene,
    layout: ChartLayout,
    style: &ChartStyle,
    scale: LinearScale,
    metric: &MetricDescriptor,
) {
    let left = layout.margin.left;
    let right = left + layout.inner_width();
    for tick in scale.ticks(style.y_tick_count) {
        let (_, y) = layout.to_viewport(0.0, scale.map(tick));
        push_line(
            scene,
            LayerKind::Grid,
            format!("grid:{tick}"),
            LinePrimitive::new(left, y, right, y, style.grid_width, style.grid_color),
        );
        push_line(
            scene,
            LayerKind::Axis,
            format!("y-tick-mark:{tick}"),
            LinePrimitive::new(
                left - style.y_tick_mark_length,
                y,
                left,
                y,
                1.0,
                style.y_tick_mark_color,
            )
            .with_stroke_style(LineStrokeStyle::Dashed { dash: 2, gap: 4 }),
        );
        push_text(
            scene,
            LayerKind::Axis,
            format!("y-tick:{tick}"),
            TextPrimitive::new(
                metric.format(tick),
                left - style.y_tick_mark_length - 3.0,
                y,
                style.y_tick_font_px,
                style.axis_text_color,
                TextHAlign::Right,
            ),
        );
    }
    let title = TextPrimitive::new(
        metric.y_label,
        left - layout.margin.left + 16.0,
        layout.margin.top + layout.inner_height() / 2.0,
        style.y_tick_font_px,
        style.axis_title_color,
        TextHAlign::Center,
    )
    .rotated(-90.0)
    .bold();
    scene.insert(LayerKind::Axis, ElementKey::AxisTitle, Element::new(Shape::Text(title)));
}

/// Category labels centered under each band.
fn push_band_labels(scene: &mut Scene, layout: ChartLayout, style: &ChartStyle, band: &BandScale) {
    let bottom = layout.margin.top + layout.inner_height();
    for (index, label) in band.domain().iter().enumerate() {
        let Some(start) = band.position_at(index) else {
            continue;
        };
        let text = TextPrimitive::new(
            label.as_str(),
            layout.margin.left + start + band.bandwidth() / 2.0,
            bottom + 18.0,
            style.x_tick_font_px,
            style.axis_text_color,
            TextHAlign::Center,
        );
        scene.insert(
            LayerKind::Axis,
            ElementKey::XTickLabel(label.clone()),
            Element::new(Shape::Text(text)),
        );
    }
}

fn monthly_means_chart(
    dataset: &Dataset,
    metric: &MetricDescriptor,
    layout: ChartLayout,
    style: &ChartStyle,
) -> ChartResult<Scene> {
    let means = monthly_means(dataset, metric);
    let (min, max) = extent(means.iter().flatten().copied()).ok_or_else(|| no_values(metric))?;
    let y = value_scale(min, max, layout)?;
    let x = BandScale::new(month_labels(), (0.0, layout.inner_width())).with_padding(0.2);

    let mut scene = Scene::new(layout.viewport, GalleryChart::MonthlyMeans.title(metric));
    push_plot_background(&mut scene, layout, style);
    push_value_axis(&mut scene, layout, style, y, metric);
    push_band_labels(&mut scene, layout, style, &x);

    let baseline = y.map(0.0);
    for (index, value) in means.iter().enumerate() {
        let (Some(value), Some(start), Some(month)) =
            (value, x.position_at(index), month_name(index))
        else {
            continue;
        };
        let top = y.map(*value);
        let (bar_x, bar_y) = layout.to_viewport(start, top.min(baseline));
        let bar = RectPrimitive::new(
            bar_x,
            bar_y,
            x.bandwidth(),
            (baseline - top).abs(),
            sequential_color(normalized(*value, min, max)),
        );
        scene.insert(
            LayerKind::Series,
            ElementKey::Mark(format!("bar:{month}")),
            Element::new(Shape::Rect(bar)),
        );
    }
    Ok(scene)
}

fn site_heatmap_chart(
    dataset: &Dataset,
    metric: &MetricDescriptor,
    layout: ChartLayout,
    style: &ChartStyle,
) -> ChartResult<Scene> {
    let grid = site_month_values(dataset, metric);
    let (min, max) = extent(grid.values().flat_map(|row| row.iter().flatten().copied()))
        .ok_or_else(|| no_values(metric))?;
    let x = BandScale::new(month_labels(), (0.0, layout.inner_width())).with_padding(0.05);
    let y = BandScale::new(grid.keys().cloned().collect(), (0.0, layout.inner_height()))
        .with_padding(0.05);

    let mut scene = Scene::new(layout.viewport, GalleryChart::SiteHeatmap.title(metric));
    push_band_labels(&mut scene, layout, style, &x);

    for (row, (site, values)) in grid.iter().enumerate() {
        let Some(row_start) = y.position_at(row) else {
            continue;
        };
        push_text(
            &mut scene,
            LayerKind::Axis,
            format!("row:{site}"),
            TextPrimitive::new(
                site.as_str(),
                layout.margin.left - 8.0,
                layout.margin.top + row_start + y.bandwidth() / 2.0,
                style.y_tick_font_px,
                style.axis_text_color,
                TextHAlign::Right,
            ),
        );
        for (column, value) in values.iter().enumerate() {
            let (Some(value), Some(column_start)) = (value, x.position_at(column)) else {
                continue;
            };
            let (cell_x, cell_y) = layout.to_viewport(column_start, row_start);
            let cell = RectPrimitive::new(
                cell_x,
                cell_y,
                x.bandwidth(),
                y.bandwidth(),
                sequential_color(normalized(*value, min, max)),
            )
            .with_corner_radius(2.0);
            scene.insert(
                LayerKind::Series,
                ElementKey::Mark(format!("cell:{site}:{column}")),
                Element::new(Shape::Rect(cell)),
            );
        }
    }

    // Color legend above the plot, right aligned.
    const LEGEND_STEPS: usize = 10;
    const LEGEND_WIDTH: f64 = 200.0;
    let step_width = LEGEND_WIDTH / LEGEND_STEPS as f64;
    let legend_x = layout.margin.left + layout.inner_width() - LEGEND_WIDTH;
    let legend_y = layout.margin.top - 28.0;
    for step in 0..LEGEND_STEPS {
        let swatch = RectPrimitive::new(
            legend_x + step_width * step as f64,
            legend_y,
            step_width,
            10.0,
            sequential_color(step as f64 / (LEGEND_STEPS - 1) as f64),
        );
        scene.insert(
            LayerKind::Legend,
            ElementKey::Mark(format!("legend-step:{step}")),
            Element::new(Shape::Rect(swatch)),
        );
    }
    for (key, value, x_pos, align) in [
        ("legend-min", min, legend_x - 6.0, TextHAlign::Right),
        ("legend-max", max, legend_x + LEGEND_WIDTH + 6.0, TextHAlign::Left),
    ] {
        push_text(
            &mut scene,
            LayerKind::Legend,
            key.to_owned(),
            TextPrimitive::new(
                metric.format_with_suffix(value),
                x_pos,
                legend_y + 5.0,
                style.legend_font_px,
                style.axis_text_color,
                align,
            ),
        );
    }
    Ok(scene)
}

fn seasonal_box_plot_chart(
    dataset: &Dataset,
    metric: &MetricDescriptor,
    layout: ChartLayout,
    style: &ChartStyle,
) -> ChartResult<Scene> {
    let summaries: Vec<(Season, BoxSummary)> = seasonal_values(dataset, metric)
        .into_iter()
        .filter_map(|(season, values)| Some((season, BoxSummary::from_values(&values)?)))
        .collect();
    let (min, max) = extent(
        summaries
            .iter()
            .flat_map(|(_, summary)| [summary.whisker_low, summary.whisker_high]),
    )
    .ok_or_else(|| no_values(metric))?;
    let y = value_scale(min, max, layout)?;
    let labels: Vec<String> = summaries
        .iter()
        .map(|(season, _)| season_label(*season))
        .collect();
    let x = BandScale::new(labels, (0.0, layout.inner_width())).with_padding(0.2);
    let fill = Color::from_hex(metric.color)?.with_alpha(0.6);

    let mut scene = Scene::new(layout.viewport, GalleryChart::SeasonalBoxPlot.title(metric));
    push_plot_background(&mut scene, layout, style);
    push_value_axis(&mut scene, layout, style, y, metric);
    push_band_labels(&mut scene, layout, style, &x);

    let box_width = x.bandwidth() * 0.6;
    for (index, (season, summary)) in summaries.iter().enumerate() {
        let Some(start) = x.position_at(index) else {
            continue;
        };
        let left = layout.margin.left + start + (x.bandwidth() - box_width) / 2.0;
        let center = left + box_width / 2.0;
        let at = |value: f64| layout.margin.top + y.map(value);
        let name = season.name();

        let body = RectPrimitive::new(
            left,
            at(summary.q3),
            box_width,
            at(summary.q1) - at(summary.q3),
            fill,
        );
        scene.insert(
            LayerKind::Series,
            ElementKey::Mark(format!("box:{name}")),
            Element::new(Shape::Rect(body)),
        );
        push_line(
            &mut scene,
            LayerKind::Points,
            format!("median:{name}"),
            LinePrimitive::new(
                left,
                at(summary.median),
                left + box_width,
                at(summary.median),
                2.0,
                rgb(MEDIAN_COLOR),
            ),
        );
        let whiskers = [
            ("whisker-low", summary.q1, summary.whisker_low),
            ("whisker-high", summary.q3, summary.whisker_high),
        ];
        for (part, from, to) in whiskers {
            push_line(
                &mut scene,
                LayerKind::Series,
                format!("{part}:{name}"),
                LinePrimitive::new(center, at(from), center, at(to), 1.5, rgb(WHISKER_COLOR)),
            );
            push_line(
                &mut scene,
                LayerKind::Series,
                format!("{part}-cap:{name}"),
                LinePrimitive::new(
                    center - box_width / 4.0,
                    at(to),
                    center + box_width / 4.0,
                    at(to),
                    1.5,
                    rgb(WHISKER_COLOR),
                ),
            );
        }
    }
    Ok(scene)
}

/// "Winter (Dec-Feb)" style label from the season's canonical months.
fn season_label(season: Season) -> String {
    let months = SeasonFilter::from(season).month_names();
    match (months.first(), months.last()) {
        (Some(first), Some(last)) => format!("{} ({first}-{last})", season.name()),
        _ => season.name().to_owned(),
    }
}

fn radial_cycle_chart(
    dataset: &Dataset,
    metric: &MetricDescriptor,
    layout: ChartLayout,
    style: &ChartStyle,
) -> ChartResult<Scene> {
    let means = monthly_means(dataset, metric);
    let (_, max) = extent(means.iter().flatten().copied()).ok_or_else(|| no_values(metric))?;
    let center = (
        layout.margin.left + layout.inner_width() / 2.0,
        layout.margin.top + layout.inner_height() / 2.0,
    );
    let outer = layout.inner_width().min(layout.inner_height()) / 2.0 - 30.0;
    let radius =
        LinearScale::new((0.0, max.max(f64::EPSILON)), (0.0, outer))?.nice(DEFAULT_NICE_COUNT);
    let angle = |month: usize| month as f64 / MONTHS as f64 * TAU - FRAC_PI_2;
    let polar = |month: usize, r: f64| {
        (
            center.0 + angle(month).cos() * r,
            center.1 + angle(month).sin() * r,
        )
    };
    let accent = Color::from_hex(metric.color)?;

    let mut scene = Scene::new(layout.viewport, GalleryChart::RadialCycle.title(metric));
    for tick in radius.ticks(4).into_iter().filter(|tick| *tick > 0.0) {
        let r = radius.map(tick);
        let ring = CirclePrimitive::new(center.0, center.1, r, Color::rgba(0.0, 0.0, 0.0, 0.0))
            .with_stroke(style.grid_color, style.grid_width);
        scene.insert(
            LayerKind::Grid,
            ElementKey::GridLine(tick.into()),
            Element::new(Shape::Circle(ring)),
        );
        push_text(
            &mut scene,
            LayerKind::Axis,
            format!("ring:{tick}"),
            TextPrimitive::new(
                metric.format_with_suffix(tick),
                center.0 + 4.0,
                center.1 - r,
                style.y_tick_font_px,
                style.axis_text_color,
                TextHAlign::Left,
            ),
        );
    }

    for month in 0..MONTHS {
        let Some(name) = month_name(month) else {
            continue;
        };
        let (x, y) = polar(month, outer + 20.0);
        let label = TextPrimitive::new(
            name,
            x,
            y,
            style.x_tick_font_px,
            style.axis_text_color,
            TextHAlign::Center,
        );
        scene.insert(
            LayerKind::Axis,
            ElementKey::XTickLabel(name.to_owned()),
            Element::new(Shape::Text(label)),
        );
    }

    let vertices: Vec<(usize, (f64, f64))> = means
        .iter()
        .enumerate()
        .filter_map(|(month, value)| Some((month, polar(month, radius.map_clamped((*value)?)))))
        .collect();
    let outline = PathPrimitive::new(
        vertices.iter().map(|(_, point)| *point).collect(),
        PathCurve::Linear,
        accent,
        2.0,
    )
    .closed_with_fill(accent.with_alpha(0.25));
    scene.insert(
        LayerKind::Series,
        ElementKey::SeriesLine(metric.key.to_string()),
        Element::new(Shape::Path(outline)),
    );
    for (month, (x, y)) in vertices {
        let point = CirclePrimitive::new(x, y, 4.0, accent)
            .with_stroke(style.point_stroke, style.point_stroke_width);
        scene.insert(
            LayerKind::Points,
            ElementKey::point(metric.key.to_string(), month),
            Element::new(Shape::Circle(point)),
        );
    }
    Ok(scene)
}
