// crates/carefinder-core/src/lib.rs

//! # carefinder-core
//!
//! Fetch-and-filter core of the healthcare facility finder.
//!
//! A user picks a city, one request per (city, limit) pair goes to the
//! facilities backend, and the returned records are filtered client-side
//! and projected into a list view and a map view.
//!
//! The interesting part is [`controller::LoadController`]: every load is
//! tagged with a [`controller::Generation`] and only the most recently
//! triggered load may touch visible state.
//!
//! ```rust
//! use carefinder_core::prelude::*;
//!
//! let mut session = FinderSession::new();
//! let pending = session.select_city("Peshawar").expect("non-empty city starts a load");
//! assert!(session.state().loading);
//!
//! // ... the fetch happens elsewhere ...
//! session.complete(pending.finish(Ok(Vec::new())));
//! assert!(matches!(session.list_view(), ListView::Empty { .. }));
//! ```

pub mod cities;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod model;
pub mod prelude;
pub mod session;
pub mod text;
pub mod view;
pub mod wire;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod driver;

// Re-exports
pub use crate::config::{CLIENT_DEFAULT_LIMIT, DEFAULT_LIMIT, LIMIT_OPTIONS};
pub use crate::controller::{
    CompletedLoad, Completion, Generation, LoadController, LoadPhase, LoadState, PendingLoad,
};
pub use crate::error::{CareError, LoadError, Result};
pub use crate::filter::{filter_facilities, FilterState};
pub use crate::model::{FacilityId, FacilityRecord, Ownership};
pub use crate::session::FinderSession;
pub use crate::view::{ListView, MapView};

#[cfg(feature = "client")]
pub use crate::client::{FetchClient, HttpFetchClient};
#[cfg(feature = "client")]
pub use crate::config::ClientConfig;
#[cfg(feature = "client")]
pub use crate::driver::{LoadDriver, Selection};
