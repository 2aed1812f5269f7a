//! Show lookups against TheTVDB v4 search API.
//!
//! The resolver never fails outward: any transport, status, or decoding problem is logged
//! and turned into an empty [`ShowInfo`], which callers treat as "not found".

use crate::error::{Result, WatchLogError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Configuration for connecting to TheTVDB.
#[derive(Debug, Clone)]
pub struct TvdbConfig {
    pub token: String,
    pub base_url: String,
}

/// Title and network of a show. Both fields blank means nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowInfo {
    pub title: String,
    pub service: String,
}

impl ShowInfo {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.service.is_empty()
    }
}

/// One candidate from the search endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRecord {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}

impl SearchRecord {
    fn is_usa(&self) -> bool {
        self.country.as_deref().is_some_and(|c| c.eq_ignore_ascii_case("usa"))
    }
}

impl From<SearchRecord> for ShowInfo {
    fn from(record: SearchRecord) -> Self {
        Self {
            title: record.name.unwrap_or_default(),
            service: record.network.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<SearchRecord>>,
}

/// Resolves free-text show queries to a US title and network.
#[derive(Clone)]
pub struct ShowInfoResolver {
    client: Client,
    config: TvdbConfig,
}

impl ShowInfoResolver {
    pub fn with_config(config: TvdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create a resolver with a custom token and base URL.
    pub fn with_token_and_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_config(TvdbConfig {
            token: token.into(),
            base_url: base_url.into(),
        })
    }

    /// Look up `query` and pick the first record whose country is USA.
    pub async fn resolve(&self, query: &str) -> ShowInfo {
        info!(query = query, "Getting show info");

        let records = match self.search(query).await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, query = query, "Show info lookup failed");
                return ShowInfo::default();
            }
        };

        info!(results = records.len(), "Queried TVDB");

        let info = records.into_iter().find(SearchRecord::is_usa).map(ShowInfo::from).unwrap_or_default();

        info!(title = %info.title, service = %info.service, "Got show info");
        info
    }

    /// Raw search call, returning every candidate record.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchRecord>> {
        let url = format!("{}/search?query={}", self.config.base_url, urlencoding::encode(query));

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WatchLogError::ApiError(format!(
                "TVDB search failed with status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        debug!(body = %body, "TVDB response body");

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.data.unwrap_or_default())
    }
}
