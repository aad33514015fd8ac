//! City API module
//!
//! Wraps the count and list endpoints and normalizes every failure into
//! an [`ApiError`].

mod client;
mod error;
mod traits;

pub use client::WeatherApiClient;
pub use error::{ApiError, ApiErrorKind, UNEXPECTED_ERROR};
pub use traits::CityApi;
