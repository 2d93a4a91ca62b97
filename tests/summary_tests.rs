use arctic_sky::core::{
    Dataset, FilterState, MetricKey, NO_DATA_SUMMARY, SeasonFilter, build_series, build_summary,
    value_records,
};

fn fixture() -> Dataset {
    Dataset::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/arctic_sites.json"))
        .expect("fixture dataset")
}

fn summary_for(dataset: &Dataset, filter: &FilterState, cycle_year: Option<i32>) -> String {
    let series = build_series(dataset, filter);
    build_summary(
        filter.metric().descriptor(),
        filter.season(),
        filter.active_count(),
        &series,
        cycle_year,
    )
}

#[test]
fn summer_brightness_sentence() {
    let dataset = fixture();
    let mut filter = FilterState::new(dataset.sites().clone(), MetricKey::BrightnessIndex)
        .expect("filter");
    filter.set_season(SeasonFilter::Summer);
    assert_eq!(
        summary_for(&dataset, &filter, Some(2023)),
        "Viewing surface brightness index across summer months for 3 sites. \
         Highest value: Longyearbyen in Jun (92 idx). Lowest value: Tromso in Aug (62 idx)."
    );
}

#[test]
fn full_cycle_names_the_year_and_formats_decimals() {
    let dataset = fixture();
    let filter = FilterState::new(dataset.sites().clone(), MetricKey::DaylightHours)
        .expect("filter");
    assert_eq!(
        summary_for(&dataset, &filter, Some(2023)),
        "Viewing daylight hours across the full 2023 cycle for 3 sites. \
         Highest value: Utqiagvik in Jun (24.0 h). Lowest value: Utqiagvik in Dec (0.0 h)."
    );
    assert!(summary_for(&dataset, &filter, None).contains("the full annual cycle"));
}

#[test]
fn single_site_is_not_pluralized() {
    let dataset = fixture();
    let mut filter =
        FilterState::new(dataset.sites().clone(), MetricKey::CloudCover).expect("filter");
    let _ = filter.toggle_site("Longyearbyen");
    let _ = filter.toggle_site("Tromso");
    filter.set_season(SeasonFilter::Fall);
    assert_eq!(
        summary_for(&dataset, &filter, None),
        "Viewing cloud cover across fall months for 1 site. \
         Highest value: Utqiagvik in Sep (85%). Lowest value: Utqiagvik in Nov (70%)."
    );
}

#[test]
fn first_occurrence_wins_ties() {
    let dataset = fixture();
    let mut filter = FilterState::new(dataset.sites().clone(), MetricKey::DaylightHours)
        .expect("filter");
    filter.set_season(SeasonFilter::Summer);
    let series = build_series(&dataset, &filter);
    let records = value_records(&series).expect("records");
    // Every site reaches 24 h in Jun and Jul; Utqiagvik's Jun is scanned first.
    assert_eq!(records.max.site, "Utqiagvik");
    assert_eq!(records.max.month_name, "Jun");
    assert_eq!(records.min.site, "Utqiagvik");
    assert_eq!(records.min.month_name, "Aug");
    assert_eq!(records.min.value, 18.3);
}

#[test]
fn empty_selection_reports_no_data() {
    let summary = build_summary(
        MetricKey::BrightnessIndex.descriptor(),
        SeasonFilter::Winter,
        2,
        &[],
        Some(2023),
    );
    assert_eq!(summary, NO_DATA_SUMMARY);
    assert_eq!(summary, "No data available for the selected filters.");
}
