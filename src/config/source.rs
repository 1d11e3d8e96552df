use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEXSCREENER_API_URL;
use crate::constants::HELIUS_API_URL;
use crate::err_with_loc;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub helius_url: String,
    pub dexscreener_url: String,
    /// Overridden by HELIUS_API_KEY in the environment when set.
    pub helius_api_key: Option<String>,
    pub page_size: usize,
    /// Hard cap on fetched transactions. Bounds worst-case latency; a
    /// wallet past the cap gets a truncated history, not an error.
    pub max_transactions: usize,
    pub page_delay_ms: u64,
    pub batch_size: usize,
    pub batch_delay_ms: u64,
    /// DexScreener accepts at most 30 mints per request.
    pub market_chunk_size: usize,
    pub market_chunk_delay_ms: u64,
    pub max_retries: usize,
    pub base_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            helius_url: HELIUS_API_URL.to_string(),
            dexscreener_url: DEXSCREENER_API_URL.to_string(),
            helius_api_key: None,
            page_size: 100,
            max_transactions: 1000,
            page_delay_ms: 200,
            batch_size: 100,
            batch_delay_ms: 200,
            market_chunk_size: 30,
            market_chunk_delay_ms: 300,
            max_retries: 3,
            base_retry_delay_ms: 500,
            max_retry_delay_ms: 10_000,
        }
    }
}

impl SourceConfig {
    /// Environment wins over the config file. Absence is the one hard
    /// failure class: no partial analysis is possible without a feed.
    pub fn resolve_api_key(&self) -> crate::Result<String> {
        if let Ok(key) = std::env::var("HELIUS_API_KEY") {
            if !key.is_empty() {
                return Ok(key);
            }
        }
        match &self.helius_api_key {
            Some(key) if !key.is_empty() => Ok(key.clone()),
            _ => Err(err_with_loc!(ConfigError::MissingCredential(
                "HELIUS_API_KEY not set and source.helius_api_key missing".to_string()
            ))),
        }
    }
}
