// crates/carefinder-core/src/model.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable identifier of a facility within one response.
///
/// The backend sends OSM ids as strings, but integers are accepted too.
/// Ids are only unique per response; a new city replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacilityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityId::Number(n) => write!(f, "{n}"),
            FacilityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FacilityId {
    fn from(s: &str) -> Self {
        FacilityId::Text(s.to_owned())
    }
}

impl From<i64> for FacilityId {
    fn from(n: i64) -> Self {
        FacilityId::Number(n)
    }
}

/// Who runs a facility.
///
/// Anything other than `government` / `private` on the wire (blank, null,
/// missing, unexpected labels) becomes [`Ownership::Unset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Ownership {
    Government,
    Private,
    #[default]
    Unset,
}

impl Ownership {
    /// Parse a wire or CLI label, case-insensitively.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "government" => Ownership::Government,
            "private" => Ownership::Private,
            _ => Ownership::Unset,
        }
    }

    /// Wire label; unset is the empty string, like the backend sends it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ownership::Government => "government",
            Ownership::Private => "private",
            Ownership::Unset => "",
        }
    }

    /// Badge label for the list view, `None` when unset.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Ownership::Government => Some("Government"),
            Ownership::Private => Some("Private"),
            Ownership::Unset => None,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Ownership::Unset)
    }
}

impl From<Option<String>> for Ownership {
    fn from(v: Option<String>) -> Self {
        v.as_deref().map(Ownership::parse).unwrap_or_default()
    }
}

impl From<Ownership> for String {
    fn from(o: Ownership) -> Self {
        o.as_str().to_string()
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("Unknown"))
    }
}

/// One healthcare facility as returned by the backend.
///
/// Read-only from the core's point of view. Optional text fields may arrive
/// blank; use the accessors, which treat blank the same as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    #[serde(rename = "osm_id", alias = "id")]
    pub id: FacilityId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "facility_type", default)]
    pub facility_type: Option<String>,
    #[serde(default)]
    pub ownership: Ownership,
    /// `None` means the backend does not know.
    #[serde(rename = "is_emergency", default)]
    pub emergency: Option<bool>,
    /// `None` means the backend does not know.
    #[serde(rename = "is_24_7", default)]
    pub open_24_7: Option<bool>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lon: Option<f64>,
}

impl FacilityRecord {
    /// Minimal record with only an id; handy for tests and demos.
    pub fn new(id: impl Into<FacilityId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            address: None,
            facility_type: None,
            ownership: Ownership::Unset,
            emergency: None,
            open_24_7: None,
            phone: None,
            lat: None,
            lon: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn address(&self) -> Option<&str> {
        non_blank(&self.address)
    }

    pub fn facility_type(&self) -> Option<&str> {
        non_blank(&self.facility_type)
    }

    pub fn phone(&self) -> Option<&str> {
        non_blank(&self.phone)
    }

    /// Unknown counts as `false`.
    pub fn is_emergency(&self) -> bool {
        self.emergency.unwrap_or(false)
    }

    /// Unknown counts as `false`.
    pub fn is_24x7(&self) -> bool {
        self.open_24_7.unwrap_or(false)
    }

    /// `(lat, lon)` when both are present, finite and within WGS84 range.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = (self.lat?, self.lon?);
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some((lat, lon))
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts a JSON number or a numeric string; anything else is `None`.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_deserialize_backend_shape() {
        let v = json!({
            "osm_id": "123456",
            "name": "Lady Reading Hospital",
            "facility_type": "Hospital",
            "address": "Soekarno Road, Peshawar",
            "phone": "+92 91 9211430",
            "is_24_7": true,
            "is_emergency": null,
            "ownership": "government",
            "lat": 34.0086,
            "lon": 71.5767
        });

        let f: FacilityRecord = serde_json::from_value(v).unwrap();
        assert_eq!(f.id, FacilityId::Text("123456".into()));
        assert_eq!(f.name(), Some("Lady Reading Hospital"));
        assert_eq!(f.ownership, Ownership::Government);
        assert!(f.is_24x7());
        assert_eq!(f.emergency, None);
        assert!(!f.is_emergency());
        assert_eq!(f.coordinates(), Some((34.0086, 71.5767)));
    }

    #[test]
    fn test_sparse_record_uses_defaults() {
        let f: FacilityRecord = serde_json::from_value(json!({ "osm_id": 42 })).unwrap();
        assert_eq!(f.id, FacilityId::Number(42));
        assert_eq!(f.ownership, Ownership::Unset);
        assert_eq!(f.name(), None);
        assert_eq!(f.coordinates(), None);
    }

    #[test]
    fn test_blank_and_unknown_ownership_is_unset() {
        for raw in [json!(""), json!(null), json!("community")] {
            let f: FacilityRecord =
                serde_json::from_value(json!({ "osm_id": "1", "ownership": raw })).unwrap();
            assert_eq!(f.ownership, Ownership::Unset);
        }
        let f: FacilityRecord =
            serde_json::from_value(json!({ "osm_id": "1", "ownership": "Private" })).unwrap();
        assert_eq!(f.ownership, Ownership::Private);
    }

    #[test]
    fn test_blank_text_is_treated_as_missing() {
        let mut f = FacilityRecord::new("1");
        f.name = Some("  ".into());
        f.address = Some(String::new());
        assert_eq!(f.name(), None);
        assert_eq!(f.address(), None);
    }

    #[test]
    fn test_coordinates_tolerate_strings_and_reject_garbage() {
        let f: FacilityRecord = serde_json::from_value(
            json!({ "osm_id": "1", "lat": "34.5", "lon": " 71.25 " }),
        )
        .unwrap();
        assert_eq!(f.coordinates(), Some((34.5, 71.25)));

        let f: FacilityRecord =
            serde_json::from_value(json!({ "osm_id": "1", "lat": "n/a", "lon": 71.0 })).unwrap();
        assert_eq!(f.coordinates(), None);

        let mut f = FacilityRecord::new("1");
        f.lat = Some(123.0);
        f.lon = Some(71.0);
        assert_eq!(f.coordinates(), None);
    }

    #[test]
    fn test_ownership_serializes_as_wire_label() {
        let mut f = FacilityRecord::new("9");
        f.ownership = Ownership::Private;
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["ownership"], "private");
        assert_eq!(v["osm_id"], "9");
    }
}
