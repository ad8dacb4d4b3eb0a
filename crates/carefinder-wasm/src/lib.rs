//! carefinder-wasm: WebAssembly bindings for carefinder-core
//!
//! The browser performs the HTTP request (it already has `fetch`); Rust owns
//! everything around it: the load state machine with stale-result
//! suppression, body decoding, filters, and the list/map view models.
//!
//! What it provides
//! ----------------
//! - `FinderState`: `begin(city)` returns a generation, hand that back to
//!   `resolve(generation, bodyText)` / `reject(generation, status, bodyText)`
//!   when the fetch settles. Results for superseded generations are ignored.
//! - View models as plain JS objects: `list_view()`, `map_view()`, `state()`
//! - Helpers: `kpk_cities()`, `limit_options()`, `filter_facilities(...)`,
//!   `error_message(bodyText)`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { FinderState } from 'carefinder-wasm';
//!
//! await init();
//! const finder = new FinderState(150);
//!
//! async function onCityChange(city) {
//!   const gen = finder.begin(city);
//!   render(finder);
//!   if (gen === undefined) return; // city cleared
//!   try {
//!     const res = await fetch(`${API}/api/facilities?city=${encodeURIComponent(city)}&limit=${finder.limit()}`);
//!     const text = await res.text();
//!     res.ok ? finder.resolve(gen, text) : finder.reject(gen, res.status, text);
//!   } catch (e) {
//!     finder.fail_transport(gen, String(e));
//!   }
//!   render(finder);
//! }
//! ```
use carefinder_core::cities::{search_cities, KPK_CITIES};
use carefinder_core::controller::{Generation, LoadController, LoadPhase, PendingLoad};
use carefinder_core::error::LoadError;
use carefinder_core::filter::{filter_facilities as filter_records, FilterState};
use carefinder_core::model::{FacilityRecord, Ownership};
use carefinder_core::view::{ListView, MapView};
use carefinder_core::wire::{error_detail, parse_facilities};
use carefinder_core::{DEFAULT_LIMIT, LIMIT_OPTIONS};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// Superseded loads kept around only so late answers can be logged.
const MAX_OUTSTANDING: usize = 8;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing carefinder WASM module...".into());
}

fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/* --------------------------------------------------------------------------
   Load state machine
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub struct FinderState {
    controller: LoadController,
    filters: FilterState,
    outstanding: Vec<PendingLoad>,
}

#[wasm_bindgen]
impl FinderState {
    #[wasm_bindgen(constructor)]
    pub fn new(limit: Option<u32>) -> FinderState {
        FinderState {
            controller: LoadController::new(limit.unwrap_or(DEFAULT_LIMIT)),
            filters: FilterState::default(),
            outstanding: Vec::new(),
        }
    }

    /// Select a city. Returns the generation to fetch for, or `undefined`
    /// when the city is blank (state reset, nothing to fetch).
    pub fn begin(&mut self, city: &str) -> Option<f64> {
        let pending = self.controller.set_city(city);
        self.track(pending)
    }

    /// Change the limit; refetches the current city if there is one.
    pub fn set_limit(&mut self, limit: u32) -> Option<f64> {
        let pending = self.controller.set_limit(limit);
        self.track(pending)
    }

    /// Feed a 2xx body. Returns `true` if it changed the state.
    pub fn resolve(&mut self, generation: f64, body: &str) -> bool {
        let records = parse_facilities(body.as_bytes());
        self.settle(generation, Ok(records))
    }

    /// Feed a non-2xx answer. Returns `true` if it changed the state.
    pub fn reject(&mut self, generation: f64, status: u16, body: &str) -> bool {
        let err = LoadError::Status {
            status,
            detail: error_detail(body.as_bytes()),
        };
        self.settle(generation, Err(err))
    }

    /// Report a network failure or timeout. Returns `true` if it changed the state.
    pub fn fail_transport(&mut self, generation: f64, message: &str) -> bool {
        self.settle(generation, Err(LoadError::Transport(message.to_string())))
    }

    /// `ownership` is `"government"`, `"private"` or anything else for all.
    pub fn set_filters(&mut self, ownership: &str, emergency_only: bool, open24_only: bool) {
        self.filters = FilterState::new(Ownership::parse(ownership), emergency_only, open24_only);
    }

    pub fn city(&self) -> String {
        self.controller.state().city.clone()
    }

    pub fn limit(&self) -> u32 {
        self.controller.state().limit
    }

    pub fn loading(&self) -> bool {
        self.controller.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.controller.state().error.clone()
    }

    /// `"idle"`, `"loading"`, `"loaded"` or `"failed"`.
    pub fn phase(&self) -> String {
        match self.controller.state().phase() {
            LoadPhase::Idle => "idle",
            LoadPhase::Loading => "loading",
            LoadPhase::Loaded => "loaded",
            LoadPhase::Failed => "failed",
        }
        .to_string()
    }

    pub fn facility_count(&self) -> usize {
        self.controller.state().facilities.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    pub fn list_view(&self) -> Result<JsValue, JsValue> {
        to_js(&ListView::build(self.controller.state(), &self.filtered()))
    }

    pub fn map_view(&self) -> Result<JsValue, JsValue> {
        to_js(&MapView::build(&self.filtered()))
    }

    /// Raw load state (city, limit, facilities, loading, error).
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(self.controller.state())
    }
}

impl FinderState {
    fn filtered(&self) -> Vec<&FacilityRecord> {
        filter_records(&self.controller.state().facilities, &self.filters)
    }

    fn track(&mut self, pending: Option<PendingLoad>) -> Option<f64> {
        let pending = pending?;
        let generation = pending.generation.value() as f64;
        self.outstanding.push(pending);
        if self.outstanding.len() > MAX_OUTSTANDING {
            let excess = self.outstanding.len() - MAX_OUTSTANDING;
            self.outstanding.drain(..excess);
        }
        Some(generation)
    }

    fn settle(
        &mut self,
        generation: f64,
        result: Result<Vec<FacilityRecord>, LoadError>,
    ) -> bool {
        let generation = Generation::from(generation as u64);
        let pending = match self.outstanding.iter().position(|p| p.generation == generation) {
            Some(i) => self.outstanding.remove(i),
            None => {
                log(&format!("ignoring answer for unknown load {generation}"));
                return false;
            }
        };
        let city = pending.city.clone();
        let applied = self.controller.complete(pending.finish(result)).is_applied();
        if !applied {
            log(&format!("discarded stale answer for {city} ({generation})"));
        }
        applied
    }
}

impl Default for FinderState {
    fn default() -> Self {
        Self::new(None)
    }
}

/* --------------------------------------------------------------------------
   Helpers
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn kpk_cities() -> js_sys::Array {
    KPK_CITIES.iter().map(|c| JsValue::from_str(c)).collect()
}

#[wasm_bindgen]
pub fn kpk_city_count() -> usize {
    KPK_CITIES.len()
}

/// Catalog entries containing `query` (case- and accent-insensitive).
#[wasm_bindgen]
pub fn search_city_names(query: &str) -> Vec<String> {
    search_cities(query).into_iter().map(str::to_string).collect()
}

#[wasm_bindgen]
pub fn limit_options() -> Vec<u32> {
    LIMIT_OPTIONS.to_vec()
}

#[wasm_bindgen]
pub fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// User-facing message for an error body: its `detail`, or the generic text.
#[wasm_bindgen]
pub fn error_message(body: &str) -> String {
    LoadError::Status {
        status: 0,
        detail: error_detail(body.as_bytes()),
    }
    .user_message()
}

/// Filter an array of facility objects without a `FinderState`.
#[wasm_bindgen]
pub fn filter_facilities(
    records: JsValue,
    ownership: &str,
    emergency_only: bool,
    open24_only: bool,
) -> Result<JsValue, JsValue> {
    let records: Vec<FacilityRecord> = serde_wasm_bindgen::from_value(records)?;
    let filters = FilterState::new(Ownership::parse(ownership), emergency_only, open24_only);
    to_js(&filter_records(&records, &filters))
}
