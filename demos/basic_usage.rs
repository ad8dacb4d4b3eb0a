//! Basic usage example for carefinder-rs
//!
//! This example demonstrates how to:
//! - Browse the supported city catalog
//! - Load facilities for a city from the backend
//! - Render the list and map view models
//!
//! Point it at a backend with `CAREFINDER_API_BASE_URL` (defaults to
//! `http://localhost:8000`). Without a backend the error path is shown.

use carefinder_rs::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== carefinder-rs Basic Usage Example ===\n");

    // Example 1: The city catalog
    println!("--- Example 1: Supported cities ---");
    for (i, city) in KPK_CITIES.iter().enumerate() {
        println!("{:>2}. {}", i + 1, city);
    }
    println!();

    // Example 2: Fuzzy city lookup
    println!("--- Example 2: City lookup ---");
    for query in ["peshawar", "  MARDAN ", "Abbottābād", "Lahore"] {
        match find_city(query) {
            Some(city) => println!("'{query}' -> {city}"),
            None => println!("'{query}' -> not in catalog"),
        }
    }
    println!();

    // Example 3: Load facilities for one city
    println!("--- Example 3: Facilities in Peshawar ---");
    let client = HttpFetchClient::from_env()?;
    println!("Backend: {}", client.config().facilities_url());

    let mut session = FinderSession::with_limit(50);
    if let Some(pending) = session.select_city("Peshawar") {
        println!("Loading {} (limit {})...", pending.city, pending.limit);
        let done = pending.run(&client).await;
        session.complete(done);
    }

    let list = session.list_view();
    println!("{}", list.headline());
    if let ListView::Results { items, .. } = &list {
        for item in items.iter().take(5) {
            println!("- {} ({})", item.name, item.address);
        }
        if items.len() > 5 {
            println!("... and {} more", items.len() - 5);
        }
    }
    println!();

    // Example 4: Map view
    println!("--- Example 4: Map view ---");
    let map = session.map_view();
    println!(
        "Center: {:.4}, {:.4} at zoom {}",
        map.center.0, map.center.1, map.zoom
    );
    println!("Markers: {}", map.markers.len());

    Ok(())
}
