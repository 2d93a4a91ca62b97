use arctic_sky::ChartError;
use arctic_sky::core::{Dataset, MetricKey, Season};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/arctic_sites.json");

#[test]
fn fixture_loads_with_sites_in_discovery_order() {
    let dataset = Dataset::from_path(FIXTURE).expect("fixture dataset");
    assert_eq!(dataset.records().len(), 36);
    let sites: Vec<&str> = dataset.sites().iter().map(String::as_str).collect();
    assert_eq!(sites, vec!["Utqiagvik", "Longyearbyen", "Tromso"]);
    assert_eq!(dataset.site_index("Tromso"), Some(2));
    assert_eq!(dataset.region_of("Longyearbyen"), Some("Svalbard"));
    assert_eq!(dataset.region_of("Nowhere"), None);
}

#[test]
fn camel_case_fields_and_nulls_parse() {
    let dataset = Dataset::from_json_str(
        r#"[
            {"site": "B", "month": 6, "monthName": "Jun", "season": "Summer",
             "region": "North", "brightnessIndex": 71.5, "daylightHours": null},
            {"site": "A", "month": 12, "monthName": "Dec", "season": "Winter",
             "region": "South", "brightnessIndex": 3, "daylightHours": 0.4, "cloudCover": 64}
        ]"#,
    )
    .expect("dataset");
    let sites: Vec<&str> = dataset.sites().iter().map(String::as_str).collect();
    assert_eq!(sites, vec!["B", "A"]);

    let first = &dataset.records()[0];
    assert_eq!(first.month_index(), 5);
    assert_eq!(first.season, Season::Summer);
    assert_eq!(first.daylight_hours, None);
    assert_eq!(first.cloud_cover, None);
    assert_eq!(MetricKey::BrightnessIndex.descriptor().value_of(first), Some(71.5));
    assert_eq!(MetricKey::DaylightHours.descriptor().value_of(first), None);
}

#[test]
fn mismatched_month_names_are_normalized() {
    let dataset = Dataset::from_json_str(
        r#"[{"site": "A", "month": 3, "monthName": "March", "season": "Spring", "region": "R"}]"#,
    )
    .expect("dataset");
    assert_eq!(dataset.records()[0].month_name, "Mar");
}

#[test]
fn months_outside_the_calendar_are_rejected() {
    let err = Dataset::from_json_str(
        r#"[{"site": "A", "month": 13, "monthName": "Dec", "season": "Winter", "region": "R"}]"#,
    )
    .expect_err("month 13");
    assert!(matches!(err, ChartError::InvalidData(ref message) if message.contains("month 13")));
}

#[test]
fn empty_documents_are_rejected() {
    assert!(matches!(Dataset::from_json_str("[]"), Err(ChartError::EmptyDataset)));
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = Dataset::from_json_str("{\"site\": ").expect_err("malformed");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn missing_files_report_the_path() {
    let err = Dataset::from_path("does/not/exist.json").expect_err("missing file");
    match err {
        ChartError::DataLoad { path, .. } => assert_eq!(path, "does/not/exist.json"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(
        Dataset::from_path("does/not/exist.json")
            .expect_err("missing file")
            .to_string()
            .starts_with("failed to load `does/not/exist.json`")
    );
}
