//! City Letter Finder: how many cities start with a given letter
//!
//! A client for the weather service's city endpoints. The search flow
//! validates a single letter, asks for the count and the list of matching
//! cities concurrently, and reduces both answers into a renderable view.

pub mod api;
pub mod cli;
pub mod config;
pub mod flow;
pub mod network;
pub mod query;
pub mod render;

pub use api::{ApiError, CityApi, WeatherApiClient};
pub use config::Settings;
pub use flow::{SearchFlow, ViewState};
pub use query::{validate, Query, ValidationError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
