// crates/carefinder-core/src/session.rs
use crate::config::DEFAULT_LIMIT;
use crate::controller::{CompletedLoad, Completion, LoadController, LoadState, PendingLoad};
use crate::filter::{filter_facilities, FilterState};
use crate::model::FacilityRecord;
use crate::view::{ListView, MapView};

/// The whole finder screen: a [`LoadController`] plus the user's filters.
///
/// Filters live outside the load state, so they survive city changes.
/// Derived data ([`FinderSession::filtered`] and the views) is recomputed
/// on every call.
#[derive(Debug, Clone)]
pub struct FinderSession {
    controller: LoadController,
    filters: FilterState,
}

impl Default for FinderSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FinderSession {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: u32) -> Self {
        Self {
            controller: LoadController::new(limit),
            filters: FilterState::default(),
        }
    }

    pub fn state(&self) -> &LoadState {
        self.controller.state()
    }

    pub fn controller(&self) -> &LoadController {
        &self.controller
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn select_city(&mut self, city: &str) -> Option<PendingLoad> {
        self.controller.set_city(city)
    }

    pub fn select_limit(&mut self, limit: u32) -> Option<PendingLoad> {
        self.controller.set_limit(limit)
    }

    pub fn select(&mut self, city: &str, limit: u32) -> Option<PendingLoad> {
        self.controller.select(city, limit)
    }

    pub fn complete(&mut self, done: CompletedLoad) -> Completion {
        self.controller.complete(done)
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn filtered(&self) -> Vec<&FacilityRecord> {
        filter_facilities(&self.state().facilities, &self.filters)
    }

    pub fn list_view(&self) -> ListView {
        ListView::build(self.state(), &self.filtered())
    }

    pub fn map_view(&self) -> MapView {
        MapView::build(&self.filtered())
    }
}
