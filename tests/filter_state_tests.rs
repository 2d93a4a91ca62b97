use arctic_sky::core::{FilterState, MetricKey, SeasonFilter, ToggleOutcome};
use indexmap::IndexSet;

fn filter(names: &[&str]) -> FilterState {
    let sites: IndexSet<String> = names.iter().map(|name| (*name).to_owned()).collect();
    FilterState::new(sites, MetricKey::BrightnessIndex).expect("filter init")
}

#[test]
fn starts_with_every_site_active_and_defaults() {
    let state = filter(&["A", "B", "C"]);
    assert_eq!(state.season(), SeasonFilter::All);
    assert_eq!(state.metric(), MetricKey::BrightnessIndex);
    assert_eq!(state.active_sites().collect::<Vec<_>>(), vec!["A", "B", "C"]);
}

#[test]
fn empty_site_registry_is_rejected() {
    let result = FilterState::new(IndexSet::new(), MetricKey::default());
    assert!(result.is_err());
}

#[test]
fn last_active_site_cannot_be_toggled_off() {
    let mut state = filter(&["A", "B"]);
    assert_eq!(state.toggle_site("A"), ToggleOutcome::Deactivated);
    assert_eq!(state.toggle_site("B"), ToggleOutcome::RejectedLastActive);
    assert_eq!(state.active_sites().collect::<Vec<_>>(), vec!["B"]);
    assert!(!ToggleOutcome::RejectedLastActive.changed());
}

#[test]
fn unknown_sites_leave_the_selection_untouched() {
    let mut state = filter(&["A", "B"]);
    let before = state.clone();
    assert_eq!(state.toggle_site("Z"), ToggleOutcome::UnknownSite);
    assert_eq!(state, before);
}

#[test]
fn reactivated_sites_follow_discovery_order() {
    let mut state = filter(&["A", "B", "C"]);
    assert_eq!(state.toggle_site("A"), ToggleOutcome::Deactivated);
    assert_eq!(state.toggle_site("A"), ToggleOutcome::Activated);
    assert_eq!(state.active_sites().collect::<Vec<_>>(), vec!["A", "B", "C"]);
}

#[test]
fn reset_restores_season_metric_and_sites() {
    let mut state = filter(&["A", "B", "C"]);
    let initial = state.clone();
    state.set_season(SeasonFilter::Winter);
    state.set_metric(MetricKey::CloudCover);
    assert_eq!(state.toggle_site("B"), ToggleOutcome::Deactivated);
    assert_eq!(state.toggle_site("C"), ToggleOutcome::Deactivated);

    state.reset();
    assert_eq!(state, initial);
    assert_eq!(state.metric(), MetricKey::BrightnessIndex);
}

#[test]
fn reset_uses_the_configured_default_metric() {
    let sites: IndexSet<String> = ["A"].into_iter().map(str::to_owned).collect();
    let mut state = FilterState::new(sites, MetricKey::DaylightHours).expect("filter init");
    state.set_metric(MetricKey::CloudCover);
    state.reset();
    assert_eq!(state.metric(), MetricKey::DaylightHours);
    assert_eq!(state.default_metric(), MetricKey::DaylightHours);
}

#[test]
fn serialized_state_round_trips() {
    let mut state = filter(&["A", "B", "C"]);
    state.set_season(SeasonFilter::Fall);
    assert_eq!(state.toggle_site("B"), ToggleOutcome::Deactivated);
    let json = serde_json::to_string(&state).expect("serialize");
    let restored: FilterState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, state);
    assert_eq!(restored.active_sites().collect::<Vec<_>>(), vec!["A", "C"]);
}

#[test]
fn deserializing_an_empty_active_set_is_rejected() {
    let result =
        serde_json::from_str::<FilterState>(r#"{"all_sites": ["A", "B"], "active_sites": []}"#);
    let err = result.expect_err("empty active set");
    assert!(err.to_string().contains("no active sites"));
}

#[test]
fn deserializing_an_unknown_active_site_is_rejected() {
    let result =
        serde_json::from_str::<FilterState>(r#"{"all_sites": ["A"], "active_sites": ["Ghost"]}"#);
    let err = result.expect_err("unknown active site");
    assert!(err.to_string().contains("`Ghost`"));
}

#[test]
fn deserializing_without_sites_is_rejected() {
    let result = serde_json::from_str::<FilterState>(r#"{"all_sites": [], "active_sites": []}"#);
    assert!(result.is_err());
}
