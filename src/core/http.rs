//! Fetching reference files from remote pumps or local directories

use crate::core::config::{is_remote, SourceConfig};
use crate::error::{NflDataError, Result};
use crate::table::codec::{self, DataFormat};
use crate::table::Table;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Shared fetch client. Holds no per-call state, so one instance can serve
/// any number of independent loader calls.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: Client,
    config: SourceConfig,
}

/// Default headers sent with every upstream request.
pub fn default_header_map(config: &SourceConfig) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("*/*"));
    h.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
    Ok(h)
}

impl SourceClient {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let http = Client::builder()
            .default_headers(default_header_map(&config)?)
            .timeout(config.timeout)
            .build()
            .map_err(|e| NflDataError::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(SourceConfig::from_env()?)
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Raw bytes from a URL or a local path.
    pub async fn fetch_bytes(&self, provider: &str, location: &str) -> Result<Vec<u8>> {
        if is_remote(location) {
            debug!(provider, location, "fetching remote source");
            let res = self
                .http
                .get(location)
                .send()
                .await
                .map_err(|e| NflDataError::unavailable(provider, location, e))?
                .error_for_status()
                .map_err(|e| NflDataError::unavailable(provider, location, e))?;
            let bytes = res
                .bytes()
                .await
                .map_err(|e| NflDataError::unavailable(provider, location, e))?;
            Ok(bytes.to_vec())
        } else {
            debug!(provider, location, "reading local source");
            tokio::fs::read(location)
                .await
                .map_err(|e| NflDataError::unavailable(provider, location, e))
        }
    }

    /// Decode a parquet or CSV source; the codec follows the extension.
    pub async fn fetch_table(&self, provider: &str, location: &str) -> Result<Table> {
        let format = DataFormat::from_path(location)?;
        let bytes = self.fetch_bytes(provider, location).await?;
        let table = codec::decode(bytes, format)?;
        debug!(
            provider,
            location,
            rows = table.len(),
            columns = table.columns().len(),
            "decoded source table"
        );
        Ok(table)
    }

    pub async fn fetch_json(&self, provider: &str, location: &str) -> Result<Value> {
        let bytes = self.fetch_bytes(provider, location).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
