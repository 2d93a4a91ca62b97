use arctic_sky::api::{ExplorerConfig, ExplorerEngine, RedrawReason};
use arctic_sky::core::{
    Dataset, MetricKey, NO_DATA_SUMMARY, Record, Season, SeasonFilter, ToggleOutcome, month_name,
};
use arctic_sky::interaction::{HoverChange, PointKey};
use arctic_sky::render::{ElementKey, LayerKind, NullRenderer, Shape, TransitionPhase};

fn fixture() -> Dataset {
    Dataset::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/arctic_sites.json"))
        .expect("fixture dataset")
}

fn engine() -> ExplorerEngine<NullRenderer> {
    ExplorerEngine::new(NullRenderer::default(), ExplorerConfig::default(), fixture())
        .expect("engine init")
}

fn layer_len(engine: &ExplorerEngine<NullRenderer>, kind: LayerKind) -> usize {
    engine
        .current_scene()
        .expect("drawn scene")
        .layer(kind)
        .elements
        .len()
}

fn element_opacity(
    engine: &ExplorerEngine<NullRenderer>,
    kind: LayerKind,
    key: &ElementKey,
) -> f64 {
    engine
        .current_scene()
        .expect("drawn scene")
        .get(kind, key)
        .expect("element")
        .opacity
}

fn point_radius(engine: &ExplorerEngine<NullRenderer>, key: ElementKey) -> f64 {
    let scene = engine.current_scene().expect("drawn scene");
    match &scene.get(LayerKind::Points, &key).expect("point").shape {
        Shape::Circle(circle) => circle.radius,
        other => panic!("unexpected shape {other:?}"),
    }
}

#[test]
fn first_draw_renders_everything_and_grows_points() {
    let engine = engine();
    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_updated, 0);
    assert_eq!(renderer.last_exited, 0);

    let cycle = engine.last_cycle().expect("cycle");
    assert_eq!(cycle.reason, RedrawReason::Initial);
    // Tromso has no brightness value for July.
    assert_eq!(cycle.visible_points, 35);
    assert_eq!(layer_len(&engine, LayerKind::Points), 35);
    assert_eq!(layer_len(&engine, LayerKind::Series), 3);
    assert_eq!(layer_len(&engine, LayerKind::Grid), 6);
    assert_eq!(layer_len(&engine, LayerKind::Legend), 6);

    let frame = renderer.last_frame.as_ref().expect("frame");
    let points = frame.layer(LayerKind::Points).expect("points");
    assert!(points.items.iter().all(|item| item.duration_ms == 350));
    let lines = frame.layer(LayerKind::Series).expect("lines");
    assert!(lines.items.iter().all(|item| item.duration_ms == 0));

    assert_eq!(
        engine.summary(),
        "Viewing surface brightness index across the full 2023 cycle for 3 sites. \
         Highest value: Longyearbyen in Jun (92 idx). Lowest value: Longyearbyen in Dec (1 idx)."
    );
    assert_eq!(renderer.last_caption, engine.summary());
}

#[test]
fn season_change_keeps_shared_keys_and_exits_the_rest() {
    let mut engine = engine();
    engine.set_season(SeasonFilter::Summer).expect("redraw");

    let cycle = engine.last_cycle().expect("cycle");
    assert_eq!(cycle.reason, RedrawReason::Season);
    assert_eq!(cycle.visible_points, 8);

    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    let points = frame.layer(LayerKind::Points).expect("points");
    let count = |phase: TransitionPhase| {
        points.items.iter().filter(|item| item.phase == phase).count()
    };
    assert_eq!(count(TransitionPhase::Update), 8);
    assert_eq!(count(TransitionPhase::Enter), 0);
    assert_eq!(count(TransitionPhase::Exit), 27);
    assert!(
        points
            .items
            .iter()
            .filter(|item| item.phase == TransitionPhase::Exit)
            .all(|item| item.duration_ms == 200 && item.to.opacity == 0.0)
    );

    let lines = frame.layer(LayerKind::Series).expect("lines");
    assert!(lines.items.iter().all(|item| item.phase == TransitionPhase::Update));
    assert!(lines.items.iter().all(|item| item.duration_ms == 500));

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.x_domain, vec!["Jun", "Jul", "Aug"]);
    assert_eq!(snapshot.y_domain, Some((0.0, 100.0)));
    assert_eq!(layer_len(&engine, LayerKind::Points), 8);
}

#[test]
fn summer_scenario_and_metric_switch() {
    let mut records = Vec::new();
    for month_index in 0..12usize {
        for site in ["A", "B"] {
            let base = (month_index + 1) as f64;
            records.push(Record {
                site: site.to_owned(),
                month: (month_index + 1) as u8,
                month_name: month_name(month_index).expect("month").to_owned(),
                season: Season::for_month_index(month_index).expect("season"),
                region: "Arctic".to_owned(),
                brightness_index: Some(if site == "A" { base * 10.0 } else { base }),
                daylight_hours: Some(base * 2.0),
                cloud_cover: None,
            });
        }
    }
    let dataset = Dataset::from_records(records).expect("dataset");
    let mut engine =
        ExplorerEngine::new(NullRenderer::default(), ExplorerConfig::default(), dataset)
            .expect("engine init");

    engine.set_season(SeasonFilter::Summer).expect("redraw");
    let a = &engine.series()[0];
    assert_eq!(a.site, "A");
    let months: Vec<&str> = a.values.iter().map(|point| point.month_name.as_str()).collect();
    assert_eq!(months, vec!["Jun", "Jul", "Aug"]);
    let values: Vec<f64> = a.values.iter().map(|point| point.value).collect();
    assert_eq!(values, vec![60.0, 70.0, 80.0]);

    engine.set_metric(MetricKey::DaylightHours).expect("redraw");
    assert_eq!(engine.last_cycle().expect("cycle").reason, RedrawReason::Metric);
    let a = &engine.series()[0];
    let months: Vec<&str> = a.values.iter().map(|point| point.month_name.as_str()).collect();
    assert_eq!(months, vec!["Jun", "Jul", "Aug"]);
    let values: Vec<f64> = a.values.iter().map(|point| point.value).collect();
    assert_eq!(values, vec![12.0, 14.0, 16.0]);

    let scene = engine.current_scene().expect("scene");
    match &scene.get(LayerKind::Axis, &ElementKey::AxisTitle).expect("title").shape {
        Shape::Text(text) => assert_eq!(text.text, "Daylight duration (hours)"),
        other => panic!("unexpected shape {other:?}"),
    }
    // Point keys survive the metric switch; only their values move.
    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    let points = frame.layer(LayerKind::Points).expect("points");
    assert_eq!(points.items.len(), 6);
    assert!(points.items.iter().all(|item| item.phase == TransitionPhase::Update));
}

#[test]
fn empty_selection_clears_data_layers_immediately() {
    let records: Vec<Record> = ["A", "B"]
        .into_iter()
        .map(|site| Record {
            site: site.to_owned(),
            month: 7,
            month_name: "Jul".to_owned(),
            season: Season::Summer,
            region: "Arctic".to_owned(),
            brightness_index: Some(55.0),
            daylight_hours: Some(24.0),
            cloud_cover: Some(70.0),
        })
        .collect();
    let dataset = Dataset::from_records(records).expect("dataset");
    let mut engine =
        ExplorerEngine::new(NullRenderer::default(), ExplorerConfig::default(), dataset)
            .expect("engine init");

    engine.set_season(SeasonFilter::Winter).expect("redraw");
    assert!(engine.scales().is_none());
    assert_eq!(engine.summary(), NO_DATA_SUMMARY);
    assert_eq!(engine.series().len(), 2);
    assert!(engine.series().iter().all(|series| series.is_empty()));

    let cycle = engine.last_cycle().expect("cycle");
    assert_eq!(cycle.visible_points, 0);
    assert_eq!(cycle.duration_ms, 0);
    for kind in [LayerKind::Grid, LayerKind::Series, LayerKind::Points] {
        assert_eq!(layer_len(&engine, kind), 0, "{} should be empty", kind.name());
    }
    assert_eq!(layer_len(&engine, LayerKind::Axis), 1);
    assert_eq!(layer_len(&engine, LayerKind::Legend), 4);
    assert_eq!(layer_len(&engine, LayerKind::Background), 1);
    let scene = engine.current_scene().expect("scene");
    assert!(scene.get(LayerKind::Overlay, &ElementKey::Message).is_some());

    engine.set_season(SeasonFilter::Summer).expect("redraw");
    assert!(engine.scales().is_some());
    assert_eq!(layer_len(&engine, LayerKind::Points), 2);
    assert_eq!(layer_len(&engine, LayerKind::Overlay), 0);
}

#[test]
fn deselected_sites_fade_but_keep_their_line() {
    let mut engine = engine();
    assert_eq!(engine.toggle_site("Tromso").expect("toggle"), ToggleOutcome::Deactivated);
    assert_eq!(engine.last_cycle().expect("cycle").reason, RedrawReason::SiteToggle);

    let line = ElementKey::SeriesLine("Tromso".to_owned());
    assert_eq!(element_opacity(&engine, LayerKind::Series, &line), 0.35);
    let active_line = ElementKey::SeriesLine("Utqiagvik".to_owned());
    assert_eq!(element_opacity(&engine, LayerKind::Series, &active_line), 1.0);
    let swatch = ElementKey::LegendSwatch("Tromso".to_owned());
    assert_eq!(element_opacity(&engine, LayerKind::Legend, &swatch), 0.4);

    let scene = engine.current_scene().expect("scene");
    assert!(scene.get(LayerKind::Points, &ElementKey::point("Tromso", 0)).is_none());
    assert_eq!(layer_len(&engine, LayerKind::Points), 24);
    assert_eq!(engine.renderer().last_exited, 11);
}

#[test]
fn rejected_toggles_do_not_redraw() {
    let mut engine = engine();
    let _ = engine.toggle_site("Tromso").expect("toggle");
    let _ = engine.toggle_site("Utqiagvik").expect("toggle");
    let frames = engine.renderer().frames_rendered;

    assert_eq!(
        engine.toggle_site("Longyearbyen").expect("toggle"),
        ToggleOutcome::RejectedLastActive
    );
    assert_eq!(engine.toggle_site("Atlantis").expect("toggle"), ToggleOutcome::UnknownSite);
    assert_eq!(engine.renderer().frames_rendered, frames);
    assert_eq!(engine.filter().active_count(), 1);
}

#[test]
fn reset_restores_the_initial_snapshot() {
    let mut engine = engine();
    let initial = engine.snapshot();

    engine.set_season(SeasonFilter::Winter).expect("redraw");
    engine.set_metric(MetricKey::CloudCover).expect("redraw");
    let _ = engine.toggle_site("Longyearbyen").expect("toggle");
    assert_ne!(engine.snapshot(), initial);

    engine.reset().expect("redraw");
    assert_eq!(engine.last_cycle().expect("cycle").reason, RedrawReason::Reset);
    assert_eq!(engine.snapshot(), initial);
}

#[test]
fn metric_switch_rekeys_grid_lines_by_tick_value() {
    let mut engine = engine();
    engine.set_metric(MetricKey::DaylightHours).expect("redraw");
    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    let grid = frame.layer(LayerKind::Grid).expect("grid");
    let keys = |phase: TransitionPhase| {
        grid.items
            .iter()
            .filter(|item| item.phase == phase)
            .map(|item| item.key.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(TransitionPhase::Update), vec!["grid:0", "grid:20"]);
    assert_eq!(keys(TransitionPhase::Enter), vec!["grid:5", "grid:10", "grid:15"]);
    assert_eq!(
        keys(TransitionPhase::Exit),
        vec!["grid:40", "grid:60", "grid:80", "grid:100"]
    );
    assert_eq!(engine.snapshot().y_ticks, vec![0.0, 5.0, 10.0, 15.0, 20.0]);
}

#[test]
fn hover_grows_the_point_and_shows_a_tooltip() {
    let mut engine = engine();
    engine.set_season(SeasonFilter::Summer).expect("redraw");
    let target = engine
        .hover_candidates()
        .into_iter()
        .find(|candidate| candidate.key == PointKey::new("Longyearbyen", 5))
        .expect("candidate");

    let frames = engine.renderer().frames_rendered;
    assert_eq!(engine.pointer_move(5.0, 5.0).expect("move"), HoverChange::Unchanged);
    assert_eq!(engine.renderer().frames_rendered, frames);

    let change = engine.pointer_move(target.x, target.y).expect("move");
    assert_eq!(change, HoverChange::Entered(PointKey::new("Longyearbyen", 5)));
    let cycle = engine.last_cycle().expect("cycle");
    assert_eq!(cycle.reason, RedrawReason::Hover);
    assert_eq!(cycle.duration_ms, 150);
    assert_eq!(point_radius(&engine, ElementKey::point("Longyearbyen", 5)), 7.0);
    assert_eq!(point_radius(&engine, ElementKey::point("Utqiagvik", 5)), 5.0);

    let tooltip = engine.interaction().tooltip();
    assert!(tooltip.visible);
    assert_eq!(
        tooltip.lines.to_vec(),
        vec![
            "Longyearbyen · Svalbard".to_owned(),
            "Jun (Summer)".to_owned(),
            "Surface brightness index: 92 idx".to_owned()
        ]
    );
    assert_eq!((tooltip.x, tooltip.y), (target.x + 16.0, target.y - 32.0));
    assert_eq!(layer_len(&engine, LayerKind::Overlay), 4);

    // Inside the enlarged radius the hover sticks.
    let frames_before = engine.renderer().frames_rendered;
    let change = engine.pointer_move(target.x + 6.0, target.y).expect("move");
    assert_eq!(change, HoverChange::Moved);
    // The tooltip follows the pointer, so a move still draws a frame.
    assert_eq!(engine.renderer().frames_rendered, frames_before + 1);
    assert_eq!(engine.interaction().tooltip().x, target.x + 6.0 + 16.0);

    let change = engine.pointer_move(target.x + 30.0, target.y).expect("move");
    assert_eq!(change, HoverChange::Left(PointKey::new("Longyearbyen", 5)));
    assert_eq!(point_radius(&engine, ElementKey::point("Longyearbyen", 5)), 5.0);
    assert_eq!(layer_len(&engine, LayerKind::Overlay), 0);
    assert_eq!(engine.pointer_leave().expect("leave"), HoverChange::Unchanged);
}

#[test]
fn data_redraws_drop_the_hover_state() {
    let mut engine = engine();
    let target = engine.hover_candidates().into_iter().next().expect("candidate");
    let _ = engine.pointer_move(target.x, target.y).expect("move");
    assert!(engine.interaction().hovered().is_some());

    engine.set_season(SeasonFilter::Fall).expect("redraw");
    assert!(engine.interaction().hovered().is_none());
    assert!(!engine.interaction().tooltip().visible);
    assert_eq!(layer_len(&engine, LayerKind::Overlay), 0);
}

#[test]
fn pointer_leave_hides_the_tooltip() {
    let mut engine = engine();
    let target = engine.hover_candidates().into_iter().next().expect("candidate");
    let _ = engine.pointer_move(target.x, target.y).expect("move");
    assert_eq!(
        engine.pointer_leave().expect("leave"),
        HoverChange::Left(target.key.clone())
    );
    assert!(!engine.interaction().tooltip().visible);
    let key = ElementKey::point(target.key.site, target.key.month_index);
    assert_eq!(point_radius(&engine, key), 5.0);
}

#[test]
fn snapshot_serializes_to_json() {
    let engine = engine();
    let json = engine.snapshot_json_pretty().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["metric"], "brightnessIndex");
    assert_eq!(value["season"], "All");
    assert_eq!(value["active_sites"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["layer_element_counts"]["points"], 35);
}
