// crates/carefinder-core/src/view.rs

//! # View Models
//!
//! Plain, serializable projections of the filtered list. A front end (the
//! CLI printer, the wasm bindings) renders these without looking at
//! [`LoadState`] or error values.

use crate::controller::LoadState;
use crate::model::{FacilityId, FacilityRecord};
use serde::Serialize;

/// Map center used when there is nothing to show (roughly Peshawar).
pub const DEFAULT_CENTER: (f64, f64) = (34.0151, 71.5249);
pub const DEFAULT_ZOOM: u8 = 12;

pub const UNNAMED_FACILITY: &str = "Unnamed facility";
pub const ADDRESS_NOT_AVAILABLE: &str = "Address not available";

/// One row of the facility list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityItem {
    pub id: FacilityId,
    pub name: String,
    pub address: String,
    pub facility_type: Option<String>,
    /// "Government" / "Private"; absent when unknown.
    pub ownership: Option<&'static str>,
    pub phone: Option<String>,
    /// Only true flags produce a tag; unknown and false look the same.
    pub tags: Vec<String>,
}

impl FacilityItem {
    pub fn from_record(f: &FacilityRecord) -> Self {
        Self {
            id: f.id.clone(),
            name: f.name().unwrap_or(UNNAMED_FACILITY).to_string(),
            address: f.address().unwrap_or(ADDRESS_NOT_AVAILABLE).to_string(),
            facility_type: f.facility_type().map(str::to_string),
            ownership: f.ownership.label(),
            phone: f.phone().map(str::to_string),
            tags: status_tags(f),
        }
    }
}

fn status_tags(f: &FacilityRecord) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(phone) = f.phone() {
        tags.push(format!("Phone: {phone}"));
    }
    if f.is_emergency() {
        tags.push("Emergency".to_string());
    }
    if f.is_24x7() {
        tags.push("24/7".to_string());
    }
    tags
}

/// What the list panel shows, in precedence order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListView {
    /// No city chosen yet.
    NoCity,
    Loading { city: String },
    /// Static error block; never shown alongside records.
    Failed { message: String },
    /// The load succeeded but nothing survived filtering.
    Empty { city: String },
    Results { city: String, items: Vec<FacilityItem> },
}

impl ListView {
    pub fn build(state: &LoadState, filtered: &[&FacilityRecord]) -> Self {
        if !state.has_city() {
            return ListView::NoCity;
        }
        if state.loading {
            return ListView::Loading {
                city: state.city.clone(),
            };
        }
        if let Some(message) = &state.error {
            return ListView::Failed {
                message: message.clone(),
            };
        }
        if filtered.is_empty() {
            return ListView::Empty {
                city: state.city.clone(),
            };
        }
        ListView::Results {
            city: state.city.clone(),
            items: filtered.iter().map(|f| FacilityItem::from_record(f)).collect(),
        }
    }

    /// One-line headline for the panel.
    pub fn headline(&self) -> String {
        match self {
            ListView::NoCity => {
                "Select a city in KPK to explore nearby healthcare facilities.".to_string()
            }
            ListView::Loading { city } => format!("Fetching live data for {city}…"),
            ListView::Failed { message } => format!("Unable to load facilities. {message}"),
            ListView::Empty { city } => format!(
                "No healthcare facilities were found for {city}. Data coverage may be incomplete."
            ),
            ListView::Results { city, items } => {
                format!("Showing {} facilities in {city}", items.len())
            }
        }
    }
}

/// A pin on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: FacilityId,
    pub position: (f64, f64),
    /// Popup lines: name first, then type, address, phone and status tags.
    pub popup: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// Records without usable coordinates get no marker.
    ///
    /// The view centers on the first record with usable coordinates, or on
    /// [`DEFAULT_CENTER`] when there is none.
    pub fn build(filtered: &[&FacilityRecord]) -> Self {
        let markers: Vec<MapMarker> = filtered
            .iter()
            .filter_map(|f| {
                f.coordinates().map(|position| MapMarker {
                    id: f.id.clone(),
                    position,
                    popup: popup_lines(f),
                })
            })
            .collect();

        let center = markers.first().map(|m| m.position).unwrap_or(DEFAULT_CENTER);

        Self {
            center,
            zoom: DEFAULT_ZOOM,
            markers,
        }
    }
}

fn popup_lines(f: &FacilityRecord) -> Vec<String> {
    let mut lines = vec![f.name().unwrap_or(UNNAMED_FACILITY).to_string()];
    lines.extend(f.facility_type().map(str::to_string));
    lines.extend(f.address().map(str::to_string));
    lines.extend(status_tags(f));
    lines
}
