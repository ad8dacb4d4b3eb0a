//! End-to-end flows through the public API: session, fetch client trait,
//! filtering and views.

use carefinder_core::prelude::*;
use std::time::Duration;
use tokio::sync::mpsc;

/// Fake backend with a fixed dataset per city and a per-city latency.
struct FakeBackend;

fn record(id: &str, ownership: Ownership, emergency: Option<bool>, open24: Option<bool>) -> FacilityRecord {
    let mut f = FacilityRecord::new(id);
    f.name = Some(format!("Facility {id}"));
    f.ownership = ownership;
    f.emergency = emergency;
    f.open_24_7 = open24;
    f.lat = Some(34.0);
    f.lon = Some(71.5);
    f
}

impl FetchClient for FakeBackend {
    async fn fetch_facilities(
        &self,
        city: &str,
        limit: u32,
    ) -> std::result::Result<Vec<FacilityRecord>, LoadError> {
        match city {
            "Peshawar" => {
                tokio::time::sleep(Duration::from_millis(800)).await;
                Ok(vec![
                    record("p1", Ownership::Government, Some(true), Some(false)),
                    record("p2", Ownership::Private, Some(false), Some(true)),
                ])
            }
            "Mardan" => {
                tokio::time::sleep(Duration::from_millis(20)).await;
                let all = vec![
                    record("m1", Ownership::Government, Some(true), Some(false)),
                    record("m2", Ownership::Private, Some(false), Some(true)),
                    record("m3", Ownership::Unset, None, None),
                ];
                Ok(all.into_iter().take(limit as usize).collect())
            }
            "Atlantis" => Err(LoadError::Status {
                status: 502,
                detail: Some("city not found".into()),
            }),
            _ => Err(LoadError::Transport("connection refused".into())),
        }
    }
}

fn ids(records: &[&FacilityRecord]) -> Vec<String> {
    records.iter().map(|f| f.id.to_string()).collect()
}

#[tokio::test(start_paused = true)]
async fn latest_selection_wins_regardless_of_completion_order() {
    let backend = std::sync::Arc::new(FakeBackend);
    let mut session = FinderSession::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    for city in ["Peshawar", "Mardan"] {
        let pending = session.select_city(city).unwrap();
        let backend = backend.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(pending.run(&backend).await);
        });
    }
    drop(tx);

    let mut outcomes = Vec::new();
    while let Some(done) = rx.recv().await {
        outcomes.push((done.city.clone(), session.complete(done)));
    }

    assert_eq!(
        outcomes,
        vec![
            ("Mardan".to_string(), Completion::Applied(LoadPhase::Loaded)),
            ("Peshawar".to_string(), Completion::Discarded),
        ]
    );
    assert_eq!(session.state().city, "Mardan");
    assert_eq!(ids(&session.filtered()), ["m1", "m2", "m3"]);
}

#[tokio::test(start_paused = true)]
async fn filters_apply_to_loaded_list() {
    let mut session = FinderSession::new();
    let pending = session.select_city("Mardan").unwrap();
    session.complete(pending.run(&FakeBackend).await);

    session.set_filters(FilterState::new(Ownership::Government, false, false));
    assert_eq!(ids(&session.filtered()), ["m1"]);

    session.set_filters(FilterState::new(Ownership::Unset, true, false));
    assert_eq!(ids(&session.filtered()), ["m1"]);

    session.set_filters(FilterState::new(Ownership::Unset, false, true));
    assert_eq!(ids(&session.filtered()), ["m2"]);

    session.set_filters(FilterState::default());
    assert_eq!(ids(&session.filtered()), ["m1", "m2", "m3"]);

    let map = session.map_view();
    assert_eq!(map.markers.len(), 3);
    assert_eq!(map.center, (34.0, 71.5));
}

#[tokio::test(start_paused = true)]
async fn limit_is_forwarded_to_the_client() {
    let mut session = FinderSession::with_limit(2);
    let pending = session.select_city("Mardan").unwrap();
    session.complete(pending.run(&FakeBackend).await);
    assert_eq!(session.state().facilities.len(), 2);

    let pending = session.select_limit(200).unwrap();
    session.complete(pending.run(&FakeBackend).await);
    assert_eq!(session.state().facilities.len(), 3);
}

#[tokio::test]
async fn errors_become_messages_and_clear_facilities() {
    let mut session = FinderSession::new();
    let pending = session.select_city("Mardan").unwrap();
    session.complete(pending.run(&FakeBackend).await);
    assert!(!session.state().facilities.is_empty());

    let pending = session.select_city("Atlantis").unwrap();
    session.complete(pending.run(&FakeBackend).await);
    assert_eq!(
        session.list_view(),
        ListView::Failed {
            message: "city not found".into()
        }
    );
    assert!(session.state().facilities.is_empty());

    let pending = session.select_city("Elsewhere").unwrap();
    session.complete(pending.run(&FakeBackend).await);
    assert_eq!(session.state().error.as_deref(), Some(GENERIC_LOAD_ERROR));
}

#[tokio::test(start_paused = true)]
async fn clearing_city_always_returns_to_idle() {
    let mut session = FinderSession::new();

    let pending = session.select_city("Atlantis").unwrap();
    session.complete(pending.run(&FakeBackend).await);
    assert!(session.select_city("").is_none());

    let state = session.state();
    assert!(state.facilities.is_empty());
    assert_eq!(state.error, None);
    assert!(!state.loading);
    assert_eq!(session.list_view(), ListView::NoCity);
    assert_eq!(session.map_view().center, DEFAULT_CENTER);
}

#[tokio::test(start_paused = true)]
async fn driver_publishes_final_state() {
    let mut driver = LoadDriver::new(FakeBackend, DEFAULT_LIMIT);
    let rx = driver.subscribe();

    driver.select("Peshawar", DEFAULT_LIMIT);
    driver.select("Mardan", DEFAULT_LIMIT);
    driver.settle().await;

    let state = rx.borrow().clone();
    assert_eq!(state.city, "Mardan");
    assert_eq!(state.facilities.len(), 3);
    assert_eq!(state.phase(), LoadPhase::Loaded);
}
