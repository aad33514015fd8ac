//! Search flow execution

use super::models::{Phase, SearchOutcome, ViewState};
use crate::api::{ApiError, CityApi};
use crate::query::{validate, Query};
use futures::future::join;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A validated submission whose requests have not settled yet
///
/// Owns everything it needs, so it can be driven without borrowing the
/// flow; hand the outcome back with [`SearchFlow::apply`].
pub struct PendingSearch {
    generation: u64,
    query: Query,
    api: Arc<dyn CityApi>,
}

impl PendingSearch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> Query {
        self.query
    }

    /// Issue the count and list requests together and wait for both
    pub async fn run(self) -> SearchOutcome {
        let query = self.query;

        let count = AssertUnwindSafe(self.api.get_count(query)).catch_unwind();
        let list = AssertUnwindSafe(self.api.get_list(query)).catch_unwind();

        let (count, list) = join(count, list).await;

        SearchOutcome {
            generation: self.generation,
            query,
            count: count.unwrap_or_else(|_| {
                warn!("City count request for '{}' panicked", query);
                Err(ApiError::unexpected())
            }),
            list: list.unwrap_or_else(|_| {
                warn!("City list request for '{}' panicked", query);
                Err(ApiError::unexpected())
            }),
        }
    }
}

/// The finder: validates input, fans out both lookups and reduces them
/// into a [`ViewState`]
pub struct SearchFlow {
    api: Arc<dyn CityApi>,
    state: ViewState,
    phase: Phase,
    /// Bumped by every submission and every clear
    generation: u64,
}

impl SearchFlow {
    /// Create a flow over an explicit API client
    pub fn new(api: Arc<dyn CityApi>) -> Self {
        Self {
            api,
            state: ViewState::default(),
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record an input change and revalidate it; never hits the network
    pub fn input(&mut self, text: &str) {
        self.state.query = text.to_string();

        let result = if text.is_empty() {
            Ok(())
        } else {
            validate(text).map(|_| ())
        };

        match result {
            Ok(()) => {
                self.state.validation_error.clear();
                if self.phase == Phase::Invalid {
                    self.phase = Phase::Idle;
                }
            }
            Err(e) => {
                debug!("Input {:?} rejected: {}", text, e);
                self.state.validation_error = e.to_string();
                if self.phase != Phase::Loading {
                    self.phase = Phase::Invalid;
                }
            }
        }
    }

    /// Validate the current input and, if it passes, reset the results and
    /// enter loading
    ///
    /// Returns `None` when the input is invalid; no request is issued then.
    pub fn begin_submit(&mut self) -> Option<PendingSearch> {
        let query = match validate(&self.state.query) {
            Ok(query) => query,
            Err(e) => {
                debug!("Submit of {:?} rejected: {}", self.state.query, e);
                self.state.validation_error = e.to_string();
                self.phase = Phase::Invalid;
                return None;
            }
        };

        self.generation += 1;
        self.state.validation_error.clear();
        self.state.count = None;
        self.state.cities.clear();
        self.state.error = None;
        self.state.loading = true;
        self.phase = Phase::Loading;

        info!("Searching cities starting with '{}'", query);

        Some(PendingSearch {
            generation: self.generation,
            query,
            api: self.api.clone(),
        })
    }

    /// Reduce a settled outcome into the view state
    ///
    /// A count failure takes precedence over a list failure; successful
    /// payloads are kept either way. Returns `false` and leaves the state
    /// untouched when the outcome belongs to a superseded submission.
    pub fn apply(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.generation != self.generation {
            warn!(
                "Discarding results for '{}' from superseded search #{}",
                outcome.query, outcome.generation
            );
            return false;
        }

        let phase = outcome.phase();

        match outcome.count {
            Ok(count) => self.state.count = Some(count),
            Err(error) => self.state.error = Some(error),
        }

        match outcome.list {
            Ok(cities) => self.state.cities = cities,
            Err(error) => {
                if self.state.error.is_none() {
                    self.state.error = Some(error);
                }
            }
        }

        self.state.loading = false;
        self.phase = phase;

        info!(
            "Search for '{}' settled as {:?} (count: {:?}, cities: {})",
            outcome.query,
            phase,
            self.state.count,
            self.state.cities.len()
        );

        true
    }

    /// Validate, fetch and reduce in one go
    pub async fn submit(&mut self) -> Phase {
        if let Some(pending) = self.begin_submit() {
            let outcome = pending.run().await;
            self.apply(outcome);
        }
        self.phase
    }

    /// Reset to an empty idle state, orphaning any search still in flight
    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = ViewState::default();
        self.phase = Phase::Idle;
        debug!("Cleared (generation {})", self.generation);
    }
}
