// crates/carefinder-core/src/driver.rs

//! # Async Load Driver
//!
//! Runs a [`LoadController`] on tokio. Every selection spawns its fetch as
//! a task; finished fetches come back over a channel and go through
//! [`LoadController::complete`], so completion order does not matter.
//! Each state change is published on a `watch` channel.
//!
//! In-flight requests for superseded selections are not aborted; their
//! results are simply dropped when they arrive.

use crate::client::FetchClient;
use crate::controller::{CompletedLoad, Completion, Generation, LoadController, LoadState};
use crate::error::LoadError;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, trace, warn};

/// A user action the driver reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// New city, current limit. Blank clears the selection.
    City(String),
    /// New limit, current city.
    Limit(u32),
    Both { city: String, limit: u32 },
}

pub struct LoadDriver<C> {
    client: Arc<C>,
    controller: LoadController,
    done_tx: mpsc::UnboundedSender<CompletedLoad>,
    done_rx: mpsc::UnboundedReceiver<CompletedLoad>,
    state_tx: watch::Sender<LoadState>,
}

impl<C> LoadDriver<C>
where
    C: FetchClient + 'static,
{
    pub fn new(client: C, limit: u32) -> Self {
        Self::with_shared_client(Arc::new(client), limit)
    }

    pub fn with_shared_client(client: Arc<C>, limit: u32) -> Self {
        let controller = LoadController::new(limit);
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(controller.state().clone());
        Self {
            client,
            controller,
            done_tx,
            done_rx,
            state_tx,
        }
    }

    /// Receiver of state snapshots; starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> &LoadState {
        self.controller.state()
    }

    pub fn is_in_flight(&self) -> bool {
        self.controller.is_in_flight()
    }

    /// Apply a selection and spawn its fetch. Returns the generation of the
    /// started load, or `None` when the city was cleared.
    pub fn apply(&mut self, selection: Selection) -> Option<Generation> {
        let pending = match selection {
            Selection::City(city) => self.controller.set_city(&city),
            Selection::Limit(limit) => self.controller.set_limit(limit),
            Selection::Both { city, limit } => self.controller.select(&city, limit),
        };
        self.publish();

        let pending = pending?;
        let generation = pending.generation;
        let client = Arc::clone(&self.client);
        let tx = self.done_tx.clone();
        tokio::spawn(async move {
            // The fetch runs in its own task so a panicking client still
            // yields a completion for this generation.
            let city = pending.city.clone();
            let limit = pending.limit;
            let fetch =
                tokio::spawn(async move { client.fetch_facilities(&city, limit).await });
            let result = match fetch.await {
                Ok(result) => result,
                Err(err) => {
                    warn!(%generation, error = %err, "facility fetch task failed");
                    Err(LoadError::Transport(format!("fetch task failed: {err}")))
                }
            };
            // The driver may be gone by now; nobody is left to care.
            let _ = tx.send(pending.finish(result));
        });
        trace!(%generation, "spawned facility fetch");
        Some(generation)
    }

    pub fn select(&mut self, city: &str, limit: u32) -> Option<Generation> {
        self.apply(Selection::Both {
            city: city.to_string(),
            limit,
        })
    }

    /// Wait for the next finished fetch (stale or not) and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        if !self.is_in_flight() {
            return None;
        }
        let done = self.done_rx.recv().await?;
        Some(self.absorb(done))
    }

    /// Keep applying completions until the latest load has settled.
    pub async fn settle(&mut self) -> &LoadState {
        while self.next_completion().await.is_some() {}
        self.controller.state()
    }

    /// Event loop: apply selections as they arrive and completions as they
    /// finish. Returns once `selections` is closed and the last load settled.
    pub async fn run(mut self, mut selections: mpsc::Receiver<Selection>) -> LoadState {
        let mut open = true;
        loop {
            if !open && !self.is_in_flight() {
                break;
            }
            tokio::select! {
                sel = selections.recv(), if open => match sel {
                    Some(sel) => {
                        self.apply(sel);
                    }
                    None => {
                        debug!("selection channel closed");
                        open = false;
                    }
                },
                Some(done) = self.done_rx.recv() => {
                    self.absorb(done);
                }
            }
        }
        self.controller.state().clone()
    }

    fn absorb(&mut self, done: CompletedLoad) -> Completion {
        let outcome = self.controller.complete(done);
        if outcome.is_applied() {
            self.publish();
        }
        outcome
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.controller.state().clone());
    }
}
