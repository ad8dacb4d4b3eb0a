// crates/carefinder-core/src/filter.rs

//! Client-side filtering of a loaded facility list.

use crate::model::{FacilityRecord, Ownership};
use serde::{Deserialize, Serialize};

/// User-chosen filters. Independent of the load state and kept across
/// city changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    /// [`Ownership::Unset`] means "all ownership types".
    pub ownership: Ownership,
    pub emergency_only: bool,
    pub open24_only: bool,
}

impl FilterState {
    pub fn new(ownership: Ownership, emergency_only: bool, open24_only: bool) -> Self {
        Self {
            ownership,
            emergency_only,
            open24_only,
        }
    }

    /// True when no filter narrows the list.
    pub fn is_identity(&self) -> bool {
        !self.ownership.is_set() && !self.emergency_only && !self.open24_only
    }

    /// Unknown emergency / 24-7 flags never satisfy an "only" filter.
    pub fn matches(&self, f: &FacilityRecord) -> bool {
        (!self.ownership.is_set() || f.ownership == self.ownership)
            && (!self.emergency_only || f.is_emergency())
            && (!self.open24_only || f.is_24x7())
    }
}

/// Records passing `filters`, in input order.
///
/// Pure: recomputed on every call, never cached or applied in place.
pub fn filter_facilities<'a>(
    facilities: &'a [FacilityRecord],
    filters: &FilterState,
) -> Vec<&'a FacilityRecord> {
    facilities.iter().filter(|f| filters.matches(f)).collect()
}
