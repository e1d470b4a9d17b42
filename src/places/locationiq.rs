//! LocationIQ search client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Place, PlaceError, PlaceFinder};
use crate::config::PlacesConfig;

/// LocationIQ forward-search client
pub struct LocationIqClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    key_env: String,
    limit: u32,
    query_suffix: String,
}

impl LocationIqClient {
    /// Create a client from configuration
    ///
    /// A missing API key is not an error until a search is attempted, so
    /// sessions that never look up venues run without one.
    pub fn from_config(config: &PlacesConfig) -> Self {
        debug!(base_url = %config.base_url, "from_config: called");
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            warn!(env = %config.api_key_env, "from_config: place API key not set");
        }

        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: config.base_url.clone(),
            api_key,
            key_env: config.api_key_env.clone(),
            limit: config.limit,
            query_suffix: config.query_suffix.clone(),
        }
    }

    /// Build the combined search query for a venue type and region
    fn build_query(&self, query: &str, region: &str) -> String {
        let region = clean_region(region);
        if self.query_suffix.is_empty() {
            format!("{} {}", query, region)
        } else {
            format!("{} {} {}", query, region, self.query_suffix)
        }
    }
}

/// Strip filler the intent parser sometimes leaves on region names
fn clean_region(region: &str) -> String {
    region.replace("around", "").trim().to_string()
}

#[async_trait]
impl PlaceFinder for LocationIqClient {
    async fn search(&self, query: &str, region: &str) -> Result<Vec<Place>, PlaceError> {
        debug!(%query, %region, "search: called");
        let api_key = self.api_key.as_ref().ok_or_else(|| PlaceError::MissingApiKey {
            env: self.key_env.clone(),
        })?;

        let url = format!("{}/v1/search.php", self.base_url);
        let combined = self.build_query(query, region);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", api_key.as_str()),
                ("q", combined.as_str()),
                ("format", "json"),
                ("limit", &self.limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "search: API error");
            return Err(PlaceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let results: Vec<LocationIqPlace> = response.json().await?;
        debug!(count = results.len(), "search: success");

        Ok(results.into_iter().map(Place::from).collect())
    }
}

// LocationIQ API response types

#[derive(Debug, Deserialize)]
struct LocationIqPlace {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    icon: String,
}

impl From<LocationIqPlace> for Place {
    fn from(raw: LocationIqPlace) -> Self {
        Place {
            name: raw.display_name,
            latitude: raw.lat,
            longitude: raw.lon,
            kind: raw.kind,
            icon: raw.icon,
        }
    }
}
