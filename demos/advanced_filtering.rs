//! Advanced filtering example for carefinder-rs
//!
//! Works offline: a canned backend response is decoded and run through the
//! ownership, emergency and 24/7 filters.

use carefinder_rs::prelude::*;
use carefinder_rs::wire::parse_facilities;

const RESPONSE: &str = r#"[
  {"osm_id": 101, "name": "Lady Reading Hospital", "facility_type": "hospital",
   "ownership": "government", "is_emergency": true, "is_24_7": true,
   "phone": "+92 91 9211430", "lat": 34.0006, "lon": 71.5772},
  {"osm_id": 102, "name": "Rehman Medical Institute", "facility_type": "hospital",
   "ownership": "private", "is_emergency": true, "is_24_7": true,
   "lat": "33.9925", "lon": "71.4964"},
  {"osm_id": 103, "name": "BHU Pabbi", "facility_type": "bhu",
   "ownership": "government", "is_emergency": false, "is_24_7": false},
  {"osm_id": 104, "name": "", "facility_type": "clinic", "ownership": null,
   "address": "University Road", "lat": 34.01, "lon": 71.55},
  "not a facility"
]"#;

fn show(label: &str, records: &[&FacilityRecord]) {
    println!("--- {label}: {} ---", records.len());
    for f in records {
        println!(
            "- {} [{}]",
            f.name().unwrap_or("Unnamed facility"),
            f.ownership.label().unwrap_or("unknown ownership")
        );
    }
    println!();
}

fn main() -> Result<()> {
    println!("=== carefinder-rs Advanced Filtering Example ===\n");

    let facilities = parse_facilities(RESPONSE.as_bytes());
    println!("Decoded {} facilities (malformed entries skipped)\n", facilities.len());

    // Example 1: No filters
    show("All", &filter_facilities(&facilities, &FilterState::default()));

    // Example 2: Government only
    let gov = FilterState::new(Ownership::Government, false, false);
    show("Government", &filter_facilities(&facilities, &gov));

    // Example 3: Emergency and 24/7 together
    let urgent = FilterState::new(Ownership::Unset, true, true);
    show("Emergency + 24/7", &filter_facilities(&facilities, &urgent));

    // Example 4: Private emergency care
    let private_er = FilterState::new(Ownership::Private, true, false);
    show("Private emergency", &filter_facilities(&facilities, &private_er));

    // Example 5: Filters feed the view models
    let urgent_records = filter_facilities(&facilities, &urgent);
    let map = MapView::build(&urgent_records);
    println!("--- Map of emergency + 24/7 facilities ---");
    println!("Center: {:.4}, {:.4}", map.center.0, map.center.1);
    for marker in &map.markers {
        println!("- {}", marker.popup.join(" | "));
    }

    Ok(())
}
