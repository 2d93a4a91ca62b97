use arctic_sky::ChartError;
use arctic_sky::api::{ChartStyle, ExplorerConfig, TABLEAU10};
use arctic_sky::core::MetricKey;
use arctic_sky::render::{Color, LayerKind, TransitionTiming};

#[test]
fn defaults_match_the_explorer() {
    let config = ExplorerConfig::default();
    assert_eq!(config.layout.viewport.width, 1100);
    assert_eq!(config.layout.margin.left, 92.0);
    assert_eq!(config.default_metric, MetricKey::BrightnessIndex);
    assert_eq!(config.cycle_year, Some(2023));
    assert_eq!(config.timing.series.update_ms, 500);
    assert_eq!(config.timing.points.exit_ms, 200);
    assert_eq!(config.timing.hover_ms, 150);
    assert_eq!(config.style.palette.len(), TABLEAU10.len());
    assert_eq!(config.style.palette[0].to_css(), TABLEAU10[0]);
    config.validate().expect("defaults are valid");
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let config = ExplorerConfig::from_json_str(
        r##"{
            "default_metric": "cloudCover",
            "cycle_year": null,
            "style": {"line_width": 3.5, "plot_background": "#ffffff"},
            "timing": {"series": {"enter_ms": 0, "update_ms": 250, "exit_ms": 0}}
        }"##,
    )
    .expect("config");
    assert_eq!(config.default_metric, MetricKey::CloudCover);
    assert_eq!(config.cycle_year, None);
    assert_eq!(config.style.line_width, 3.5);
    assert_eq!(config.style.plot_background, Color::WHITE);
    assert_eq!(config.style.point_radius, ChartStyle::default().point_radius);
    assert_eq!(config.timing.series.update_ms, 250);
    assert_eq!(config.timing.grid, TransitionTiming::default().grid);
}

#[test]
fn json_round_trip_preserves_the_config() {
    let config = ExplorerConfig::default()
        .with_default_metric(MetricKey::DaylightHours)
        .with_cycle_year(Some(2024))
        .with_timing(TransitionTiming::immediate());
    let json = config.to_json_pretty().expect("json");
    assert!(json.contains("\"daylightHours\""));
    assert_eq!(ExplorerConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn invalid_styles_are_rejected() {
    let err = ExplorerConfig::from_json_str(r#"{"style": {"point_radius": 9.0}}"#)
        .expect_err("hover radius smaller than rest radius");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = ExplorerConfig::from_json_str(r#"{"style": {"palette": []}}"#)
        .expect_err("empty palette");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = ExplorerConfig::from_json_str(r#"{"style": {"grid_color": "teal"}}"#)
        .expect_err("unparseable color");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn invalid_layouts_are_rejected() {
    let err = ExplorerConfig::from_json_str(
        r#"{"layout": {"viewport": {"width": 0, "height": 520},
            "margin": {"top": 54, "right": 40, "bottom": 72, "left": 92}}}"#,
    )
    .expect_err("zero width");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, .. }));
}

#[test]
fn palette_cycles_after_ten_sites() {
    let style = ChartStyle::default();
    assert_eq!(style.site_color(10), style.site_color(0));
    assert_ne!(style.site_color(1), style.site_color(0));
}

#[test]
fn hover_timing_only_animates_points() {
    let hover = TransitionTiming::default().hover();
    assert_eq!(hover.for_layer(LayerKind::Points).update_ms, 150);
    assert_eq!(hover.for_layer(LayerKind::Series).update_ms, 0);
    assert_eq!(hover.for_layer(LayerKind::Overlay).enter_ms, 0);
}
