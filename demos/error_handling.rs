//! Error handling example for carefinder-rs
//!
//! Shows configuration errors, how load failures turn into user-facing
//! messages, and how a slow answer for an old selection never overwrites a
//! newer one.

use carefinder_rs::prelude::*;
use std::time::Duration;

/// Answers after a per-city delay; "Atlantis" is rejected by the backend.
struct SlowBackend;

impl FetchClient for SlowBackend {
    async fn fetch_facilities(
        &self,
        city: &str,
        _limit: u32,
    ) -> std::result::Result<Vec<FacilityRecord>, LoadError> {
        let delay = if city == "Peshawar" { 300 } else { 30 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        if city == "Atlantis" {
            return Err(LoadError::Status {
                status: 502,
                detail: Some(format!("No facilities known for {city}")),
            });
        }
        let mut record = FacilityRecord::new(city);
        record.name = Some(format!("District Headquarters Hospital {city}"));
        Ok(vec![record])
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== carefinder-rs Error Handling Example ===\n");

    // Example 1: Bad configuration is rejected up front
    println!("--- Example 1: Configuration errors ---");
    match ClientConfig::new("localhost:8000") {
        Ok(cfg) => println!("Unexpectedly accepted: {}", cfg.base_url),
        Err(e) => println!("✗ {e}"),
    }
    let cfg = ClientConfig::new("http://localhost:8000/")?;
    println!("✓ normalized to {}\n", cfg.base_url);

    // Example 2: What the user sees for each failure
    println!("--- Example 2: User-facing messages ---");
    let failures = [
        LoadError::Transport("connection refused".into()),
        LoadError::Timeout(Duration::from_secs(25)),
        LoadError::Status {
            status: 500,
            detail: None,
        },
        LoadError::Status {
            status: 404,
            detail: Some("City not supported".into()),
        },
    ];
    for err in &failures {
        println!("{err}\n    -> {}", err.user_message());
    }
    println!();

    // Example 3: A slow, superseded load is discarded
    println!("--- Example 3: Stale results are dropped ---");
    let mut driver = LoadDriver::new(SlowBackend, DEFAULT_LIMIT);
    driver.apply(Selection::City("Peshawar".into()));
    driver.apply(Selection::City("Mardan".into()));
    let state = driver.settle().await;
    println!(
        "Selected {}: {} facilities, error: {:?}",
        state.city,
        state.facilities.len(),
        state.error
    );
    println!();

    // Example 4: Backend rejection
    println!("--- Example 4: Backend rejection ---");
    driver.apply(Selection::City("Atlantis".into()));
    let state = driver.settle().await;
    let filtered = filter_facilities(&state.facilities, &FilterState::default());
    println!("{}", ListView::build(state, &filtered).headline());

    Ok(())
}
