use arctic_sky::api::{ExplorerConfig, ExplorerEngine};
use arctic_sky::core::{
    ChartLayout, Dataset, FilterState, MetricKey, Record, Season, SeasonFilter, build_scales,
    build_series, month_name,
};
use arctic_sky::render::{NullRenderer, RenderFrame, SvgRenderer, TransitionTiming};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn synthetic_dataset(site_count: usize) -> Dataset {
    let records = (0..site_count)
        .flat_map(|site| {
            (0..12usize).map(move |month_index| {
                let phase = (month_index as f64 / 12.0) * std::f64::consts::TAU;
                Record {
                    site: format!("Site {site}"),
                    month: (month_index + 1) as u8,
                    month_name: month_name(month_index).unwrap_or_default().to_owned(),
                    season: Season::for_month_index(month_index).unwrap_or(Season::Winter),
                    region: "Arctic".to_owned(),
                    brightness_index: Some(45.0 - 40.0 * phase.cos() + site as f64),
                    daylight_hours: Some((12.0 - 12.0 * phase.cos()).clamp(0.0, 24.0)),
                    cloud_cover: Some(55.0 + 20.0 * phase.sin()),
                }
            })
        })
        .collect();
    Dataset::from_records(records).expect("valid synthetic dataset")
}

fn bench_series_and_scales(c: &mut Criterion) {
    let dataset = synthetic_dataset(24);
    let mut filter = FilterState::new(dataset.sites().clone(), MetricKey::BrightnessIndex)
        .expect("filter state");
    filter.set_season(SeasonFilter::Summer);
    let layout = ChartLayout::default();

    c.bench_function("series_and_scales_24_sites", |b| {
        b.iter(|| {
            let series = build_series(black_box(&dataset), black_box(&filter));
            let _ = build_scales(&series, filter.season(), layout);
        })
    });
}

fn bench_engine_season_cycle(c: &mut Criterion) {
    let dataset = synthetic_dataset(8);
    let config = ExplorerConfig::default().with_timing(TransitionTiming::default());
    let mut engine =
        ExplorerEngine::new(NullRenderer::default(), config, dataset).expect("engine init");

    c.bench_function("engine_season_cycle_8_sites", |b| {
        b.iter(|| {
            for season in SeasonFilter::ALL {
                engine.set_season(black_box(season)).expect("redraw");
            }
        })
    });
}

fn bench_svg_document(c: &mut Criterion) {
    let dataset = synthetic_dataset(8);
    let engine = ExplorerEngine::new(NullRenderer::default(), ExplorerConfig::default(), dataset)
        .expect("engine init");
    let frame = RenderFrame::snapshot_of(engine.current_scene().expect("drawn scene"));
    let renderer = SvgRenderer::new();

    c.bench_function("svg_document_8_sites", |b| {
        b.iter(|| {
            let _ = renderer.document(black_box(&frame)).expect("svg document");
        })
    });
}

criterion_group!(
    benches,
    bench_series_and_scales,
    bench_engine_season_cycle,
    bench_svg_document
);
criterion_main!(benches);
