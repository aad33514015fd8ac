//! HTTP networking module
//!
//! Provides the HTTP transport used by the city API client.

mod client;
mod user_agent;

pub use client::{HttpClient, HttpResponse};
pub use user_agent::user_agent;
