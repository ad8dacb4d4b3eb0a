// crates/carefinder-core/src/cities.rs

//! Catalog of the Khyber Pakhtunkhwa towns the backend knows how to query.
//!
//! The catalog drives city pickers; the fetch client never checks against it.

use crate::text::{fold_key, NameMatch};

/// Towns offered in the city picker, in display order.
pub const KPK_CITIES: &[&str] = &[
    "Peshawar",
    "Mardan",
    "Abbottabad",
    "Mingora",
    "Swat",
    "Kohat",
    "Bannu",
    "Dera Ismail Khan",
    "Dera Ismail Khan (D.I. Khan)",
    "Charsadda",
    "Nowshera",
    "Haripur",
    "Mansehra",
];

/// Canonical catalog entry for `query`, ignoring case, accents and spacing.
pub fn find_city(query: &str) -> Option<&'static str> {
    let q = fold_key(query);
    if q.is_empty() {
        return None;
    }
    KPK_CITIES.iter().copied().find(|c| fold_key(c) == q)
}

/// Catalog entries containing `substr`, in catalog order.
///
/// An empty query returns the whole catalog.
pub fn search_cities(substr: &str) -> Vec<&'static str> {
    KPK_CITIES
        .iter()
        .copied()
        .filter(|c| c.name_contains(substr))
        .collect()
}
