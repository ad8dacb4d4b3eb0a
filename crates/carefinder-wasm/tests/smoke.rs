use wasm_bindgen_test::*;

use carefinder_wasm::{
    default_limit, error_message, kpk_city_count, limit_options, search_city_names, FinderState,
};

const BODY: &str = r#"[
    {"osm_id": 1, "name": "Lady Reading Hospital", "ownership": "government",
     "is_emergency": true, "is_24_7": true, "lat": 34.0, "lon": 71.57},
    {"osm_id": 2, "name": "Rehman Medical Institute", "ownership": "private",
     "is_emergency": false, "lat": "34.01", "lon": "71.54"}
]"#;

#[wasm_bindgen_test]
fn catalog_is_exposed() {
    #[cfg(target_arch = "wasm32")]
    carefinder_wasm::start();

    assert_eq!(kpk_city_count(), 13);
    assert_eq!(limit_options(), vec![50, 100, 150, 200]);
    assert_eq!(default_limit(), 150);
    assert_eq!(search_city_names("dera").len(), 2);
    assert_eq!(search_city_names("KOHAT"), vec!["Kohat"]);
}

#[wasm_bindgen_test]
fn resolve_applies_latest_generation_only() {
    let mut finder = FinderState::new(None);
    let first = finder.begin("Peshawar").unwrap();
    let second = finder.begin("Mardan").unwrap();
    assert!(second > first);
    assert!(finder.loading());

    assert!(!finder.resolve(first, BODY));
    assert!(finder.loading());
    assert_eq!(finder.facility_count(), 0);

    assert!(finder.resolve(second, BODY));
    assert_eq!(finder.city(), "Mardan");
    assert_eq!(finder.phase(), "loaded");
    assert_eq!(finder.facility_count(), 2);

    // Each generation is applied at most once.
    assert!(!finder.resolve(second, "[]"));
    assert_eq!(finder.facility_count(), 2);
}

#[wasm_bindgen_test]
fn filters_narrow_the_visible_set() {
    let mut finder = FinderState::default();
    let generation = finder.begin("Peshawar").unwrap();
    finder.resolve(generation, BODY);

    finder.set_filters("government", false, false);
    assert_eq!(finder.filtered_count(), 1);
    finder.set_filters("all", true, true);
    assert_eq!(finder.filtered_count(), 1);
    finder.set_filters("", false, false);
    assert_eq!(finder.filtered_count(), 2);
    assert_eq!(finder.facility_count(), 2);
}

#[wasm_bindgen_test]
fn reject_surfaces_backend_detail() {
    let mut finder = FinderState::new(Some(50));
    let generation = finder.begin("Atlantis").unwrap();
    assert!(finder.reject(generation, 502, r#"{"detail": "city not found"}"#));
    assert_eq!(finder.phase(), "failed");
    assert_eq!(finder.error().as_deref(), Some("city not found"));
    assert_eq!(finder.limit(), 50);

    let generation = finder.set_limit(100).unwrap();
    assert!(finder.fail_transport(generation, "connection refused"));
    assert_eq!(
        finder.error().as_deref(),
        Some("Could not load facilities. Please check that the backend is running.")
    );
}

#[wasm_bindgen_test]
fn blank_city_resets_without_fetch() {
    let mut finder = FinderState::default();
    let generation = finder.begin("Swat").unwrap();
    assert!(finder.begin("   ").is_none());
    assert_eq!(finder.phase(), "idle");
    assert!(!finder.resolve(generation, BODY));
    assert_eq!(finder.facility_count(), 0);
}

#[wasm_bindgen_test]
fn error_message_falls_back_to_generic_text() {
    assert_eq!(error_message(r#"{"detail": "timeout upstream"}"#), "timeout upstream");
    assert_eq!(
        error_message("<html>Bad Gateway</html>"),
        "Could not load facilities. Please check that the backend is running."
    );
}
