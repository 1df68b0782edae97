use eyre::{Result, eyre};
use std::env;

/// Connection settings for the persistence/query service.
///
/// Loaded from environment variables:
///
/// - `CLASSTABLE_API_BASE_URL`: base URL of the school API (required)
/// - `CLASSTABLE_API_TOKEN`: bearer token attached to every request (optional)
/// - `CLASSTABLE_PAGE_SIZE`: page size requested from list endpoints
///   (defaults to 50)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub page_size: u32,
}

impl StoreConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("CLASSTABLE_API_BASE_URL")
            .map_err(|_| eyre!("CLASSTABLE_API_BASE_URL environment variable not set"))?;

        let api_token = env::var("CLASSTABLE_API_TOKEN").ok();

        let page_size = env::var("CLASSTABLE_PAGE_SIZE")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(50);

        Ok(Self::with_token(base_url, api_token, page_size))
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_token(base_url, None, 50)
    }

    pub fn with_token(
        base_url: impl Into<String>,
        api_token: Option<String>,
        page_size: u32,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_token,
            page_size,
        }
    }
}
