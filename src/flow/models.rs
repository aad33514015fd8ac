//! View state and outcome models

use crate::api::ApiError;
use crate::query::Query;
use serde::Serialize;

/// Where the flow is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing submitted, or cleared
    #[default]
    Idle,
    /// The current input failed validation
    Invalid,
    /// Both requests are in flight
    Loading,
    /// Both requests succeeded
    Success,
    /// Exactly one request failed
    PartialError,
    /// Both requests failed
    Error,
}

/// Complete renderable state of the finder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Raw input text, as typed
    pub query: String,
    pub count: Option<u64>,
    pub cities: Vec<String>,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// Empty when the input is acceptable
    pub validation_error: String,
}

/// The one panel group that is visible for a given state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel<'a> {
    Validation(&'a str),
    Loading,
    Error(&'a ApiError),
    /// Count and list render side by side; either may be absent
    Results {
        count: Option<u64>,
        cities: &'a [String],
    },
    Empty,
}

impl ViewState {
    /// Pick the visible panel: validation > loading > error > results
    pub fn panel(&self) -> Panel<'_> {
        if !self.validation_error.is_empty() {
            Panel::Validation(&self.validation_error)
        } else if self.loading {
            Panel::Loading
        } else if let Some(ref error) = self.error {
            Panel::Error(error)
        } else if self.count.is_some() || !self.cities.is_empty() {
            Panel::Results {
                count: self.count,
                cities: &self.cities,
            }
        } else {
            Panel::Empty
        }
    }

    pub fn has_results(&self) -> bool {
        matches!(self.panel(), Panel::Results { .. })
    }
}

/// Settled result of both requests for one submission
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Submission this outcome belongs to
    pub generation: u64,
    pub query: Query,
    pub count: Result<u64, ApiError>,
    pub list: Result<Vec<String>, ApiError>,
}

impl SearchOutcome {
    /// Phase the flow settles in after applying this outcome
    pub fn phase(&self) -> Phase {
        match (self.count.is_ok(), self.list.is_ok()) {
            (true, true) => Phase::Success,
            (false, false) => Phase::Error,
            _ => Phase::PartialError,
        }
    }
}
