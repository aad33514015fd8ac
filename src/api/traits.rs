//! City API trait

use super::ApiError;
use crate::query::Query;
use async_trait::async_trait;

/// The two read-only lookups the search flow depends on
///
/// Implementations are handed to the flow explicitly; tests substitute
/// scripted fakes for the HTTP-backed client.
#[async_trait]
pub trait CityApi: Send + Sync {
    /// Number of cities whose name starts with `query`
    async fn get_count(&self, query: Query) -> Result<u64, ApiError>;

    /// Names of the cities whose name starts with `query`, in server order
    async fn get_list(&self, query: Query) -> Result<Vec<String>, ApiError>;
}
