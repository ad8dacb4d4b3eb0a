//! carefinder prelude: bring common types and traits into scope for demos.

#![allow(unused_imports)]

pub use crate::cities::{find_city, search_cities, KPK_CITIES};
pub use crate::config::{CLIENT_DEFAULT_LIMIT, DEFAULT_LIMIT, LIMIT_OPTIONS};
pub use crate::controller::{
    CompletedLoad, Completion, Generation, LoadController, LoadPhase, LoadState, PendingLoad,
};
pub use crate::error::{CareError, LoadError, Result, GENERIC_LOAD_ERROR};
pub use crate::filter::{filter_facilities, FilterState};
pub use crate::model::{FacilityId, FacilityRecord, Ownership};
pub use crate::session::FinderSession;
pub use crate::text::{equals_folded, fold_key, NameMatch};
pub use crate::view::{FacilityItem, ListView, MapMarker, MapView, DEFAULT_CENTER};

#[cfg(feature = "client")]
pub use crate::client::{FetchClient, HttpFetchClient};
#[cfg(feature = "client")]
pub use crate::config::ClientConfig;
#[cfg(feature = "client")]
pub use crate::driver::{LoadDriver, Selection};
