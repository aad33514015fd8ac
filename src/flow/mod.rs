//! Search flow module
//!
//! Validates the typed letter, issues the count and list lookups
//! concurrently and reduces both outcomes into a renderable view state.

mod executor;
mod models;

pub use executor::{PendingSearch, SearchFlow};
pub use models::*;
