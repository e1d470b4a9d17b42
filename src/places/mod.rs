//! Venue lookup collaborator
//!
//! Narrow seam over the external place-search service: a query and a
//! region in, a list of places out. The production implementation is
//! [`LocationIqClient`]; tests substitute their own finder.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod locationiq;

pub use locationiq::LocationIqClient;

/// A place returned by the search service
///
/// Coordinates stay as strings - that is the upstream wire format and
/// nothing downstream does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub icon: String,
}

/// Errors from the place-search service
#[derive(Debug, Error)]
pub enum PlaceError {
    #[error("Place API key not set ({env})")]
    MissingApiKey { env: String },

    #[error("Place API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Finds venues matching a query within a region
#[async_trait]
pub trait PlaceFinder: Send + Sync {
    async fn search(&self, query: &str, region: &str) -> Result<Vec<Place>, PlaceError>;
}
