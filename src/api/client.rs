//! HTTP-backed city API client

use super::{ApiError, CityApi};
use crate::config::{ApiSettings, ConfigError, Settings};
use crate::network::HttpClient;
use crate::query::Query;
use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

const COUNT_CONTEXT: &str = "Failed to fetch city count";
const LIST_CONTEXT: &str = "Failed to fetch city list";

#[derive(Debug, Deserialize)]
struct CityCount {
    count: u64,
}

/// Client for the weather service's city endpoints
#[derive(Clone)]
pub struct WeatherApiClient {
    http: HttpClient,
    count_url: Url,
    list_url: Url,
}

impl WeatherApiClient {
    /// Create a client over an existing transport
    pub fn new(http: HttpClient, api: &ApiSettings) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            http,
            count_url: endpoint_url(api, &api.count_path)?,
            list_url: endpoint_url(api, &api.list_path)?,
        })
    }

    /// Build the transport and the client from full settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let http = HttpClient::with_settings(&settings.outgoing)?;
        Ok(Self::new(http, &settings.api)?)
    }

    /// URL of the count endpoint for `query`
    pub fn count_url(&self, query: Query) -> Url {
        with_letter(&self.count_url, query)
    }

    /// URL of the list endpoint for `query`
    pub fn list_url(&self, query: Query) -> Url {
        with_letter(&self.list_url, query)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ApiError> {
        let response = match self.http.get(url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{}: {}", context, e);
                return Err(ApiError::transport(context, e));
            }
        };

        if !response.is_success() {
            warn!("{} returned HTTP {}", response.url, response.status);
            return Err(ApiError::from_response(
                response.status,
                &response.text,
                context,
            ));
        }

        response.json().map_err(|e| {
            warn!("Failed to decode {}: {}", response.url, e);
            ApiError::transport(context, e)
        })
    }
}

#[async_trait]
impl CityApi for WeatherApiClient {
    async fn get_count(&self, query: Query) -> Result<u64, ApiError> {
        let body: CityCount = self.fetch(self.count_url(query), COUNT_CONTEXT).await?;
        debug!("{} cities start with '{}'", body.count, query);
        Ok(body.count)
    }

    async fn get_list(&self, query: Query) -> Result<Vec<String>, ApiError> {
        let cities: Vec<String> = self.fetch(self.list_url(query), LIST_CONTEXT).await?;
        debug!("Received {} city names for '{}'", cities.len(), query);
        Ok(cities)
    }
}

fn endpoint_url(api: &ApiSettings, path: &str) -> std::result::Result<Url, ConfigError> {
    // Concatenate rather than `Url::join` so a base path prefix survives.
    let raw = format!(
        "{}/{}",
        api.base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl { url: raw, source })
}

fn with_letter(base: &Url, query: Query) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("letter", &query.letter().to_string());
    url
}
