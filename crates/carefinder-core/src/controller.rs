// crates/carefinder-core/src/controller.rs

//! # Selection & Load Controller
//!
//! Owns the [`LoadState`] and reacts to city/limit changes. Each triggered
//! load gets the next [`Generation`]; a completion is applied only if its
//! generation is still the latest one. Anything older is dropped without
//! touching state, so a slow response for a previous city can never
//! overwrite the current one.
//!
//! The controller never performs I/O itself. [`LoadController::select`]
//! hands back a [`PendingLoad`] describing what to fetch, and the caller
//! feeds the outcome back through [`LoadController::complete`].

use crate::config::DEFAULT_LIMIT;
use crate::error::LoadError;
use crate::model::FacilityRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Monotonic tag of a triggered load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

impl From<u64> for Generation {
    fn from(v: u64) -> Self {
        Generation(v)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// No city selected.
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Everything the views need to know about the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadState {
    /// Empty when no city is selected.
    pub city: String,
    pub limit: u32,
    pub facilities: Vec<FacilityRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl LoadState {
    pub fn new(limit: u32) -> Self {
        Self {
            city: String::new(),
            limit,
            facilities: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        if self.city.is_empty() {
            LoadPhase::Idle
        } else if self.loading {
            LoadPhase::Loading
        } else if self.error.is_some() {
            LoadPhase::Failed
        } else {
            LoadPhase::Loaded
        }
    }

    pub fn has_city(&self) -> bool {
        !self.city.is_empty()
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// A load the controller has started but not yet received an answer for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub generation: Generation,
    pub city: String,
    pub limit: u32,
}

impl PendingLoad {
    /// Attach the fetch outcome.
    pub fn finish(self, result: std::result::Result<Vec<FacilityRecord>, LoadError>) -> CompletedLoad {
        CompletedLoad {
            generation: self.generation,
            city: self.city,
            limit: self.limit,
            result,
        }
    }

    /// Perform the fetch with `client` and attach its outcome.
    #[cfg(feature = "client")]
    pub async fn run<C>(self, client: &C) -> CompletedLoad
    where
        C: crate::client::FetchClient + ?Sized,
    {
        let result = client.fetch_facilities(&self.city, self.limit).await;
        self.finish(result)
    }
}

/// A finished fetch, waiting to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedLoad {
    pub generation: Generation,
    pub city: String,
    pub limit: u32,
    pub result: std::result::Result<Vec<FacilityRecord>, LoadError>,
}

/// What [`LoadController::complete`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// State changed; carries the resulting phase.
    Applied(LoadPhase),
    /// A newer load was triggered meanwhile. Nothing changed.
    Discarded,
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied(_))
    }
}

#[derive(Debug, Clone)]
pub struct LoadController {
    state: LoadState,
    latest: Generation,
    /// Generation still waiting for its answer, if any.
    in_flight: Option<Generation>,
}

impl Default for LoadController {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl LoadController {
    pub fn new(limit: u32) -> Self {
        Self {
            state: LoadState::new(limit),
            latest: Generation::default(),
            in_flight: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// True while a load is waiting to be applied.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Generation of the most recent selection, including clears.
    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    /// React to a new (city, limit) selection.
    ///
    /// Every call supersedes whatever is in flight. A blank city resets the
    /// state to idle and returns `None`; otherwise the state goes to loading
    /// and the returned [`PendingLoad`] says what to fetch.
    pub fn select(&mut self, city: &str, limit: u32) -> Option<PendingLoad> {
        self.latest = self.latest.next();
        self.state.limit = limit;

        let city = city.trim();
        if city.is_empty() {
            debug!(generation = %self.latest, "city cleared, resetting load state");
            self.state.city.clear();
            self.state.facilities = Vec::new();
            self.state.error = None;
            self.state.loading = false;
            self.in_flight = None;
            return None;
        }

        self.state.city = city.to_string();
        self.state.error = None;
        self.state.loading = true;
        self.in_flight = Some(self.latest);

        debug!(generation = %self.latest, city, limit, "starting facility load");
        Some(PendingLoad {
            generation: self.latest,
            city: self.state.city.clone(),
            limit,
        })
    }

    /// Change only the city, keeping the current limit.
    pub fn set_city(&mut self, city: &str) -> Option<PendingLoad> {
        let limit = self.state.limit;
        self.select(city, limit)
    }

    /// Change only the limit, keeping the current city.
    pub fn set_limit(&mut self, limit: u32) -> Option<PendingLoad> {
        let city = self.state.city.clone();
        self.select(&city, limit)
    }

    /// Apply a finished fetch if it belongs to the latest selection.
    ///
    /// Each generation is applied at most once.
    pub fn complete(&mut self, done: CompletedLoad) -> Completion {
        if self.in_flight != Some(done.generation) {
            debug!(
                generation = %done.generation,
                latest = %self.latest,
                city = %done.city,
                "discarding stale facility load"
            );
            return Completion::Discarded;
        }

        self.in_flight = None;
        self.state.loading = false;
        match done.result {
            Ok(facilities) => {
                info!(
                    generation = %done.generation,
                    city = %done.city,
                    count = facilities.len(),
                    "facilities loaded"
                );
                self.state.facilities = facilities;
                self.state.error = None;
                Completion::Applied(LoadPhase::Loaded)
            }
            Err(err) => {
                warn!(
                    generation = %done.generation,
                    city = %done.city,
                    error = %err,
                    "facility load failed"
                );
                self.state.facilities = Vec::new();
                self.state.error = Some(err.user_message());
                Completion::Applied(LoadPhase::Failed)
            }
        }
    }
}
