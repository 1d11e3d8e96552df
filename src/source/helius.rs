use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use solana_pubkey::Pubkey;
use tracing::debug;
use tracing::warn;
use url::Url;

use super::TransactionSource;
use crate::Result;
use crate::config::SourceConfig;
use crate::err_with_loc;
use crate::error::SourceError;
use crate::model::RawTransaction;
use crate::utils::calculate_backoff_with_jitter;
use crate::utils::is_retryable_error;

/// Helius enhanced-transactions feed. Pagination walks backward from
/// most-recent using the last seen signature as cursor.
pub struct HeliusSource {
    client: Client,
    api_key: String,
    config: SourceConfig,
}

impl HeliusSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self {
            client: Client::new(),
            api_key,
            config,
        })
    }

    fn history_url(&self, wallet: &Pubkey, before: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/v0/addresses/{}/transactions",
            self.config.helius_url, wallet
        ))
        .map_err(|e| err_with_loc!(SourceError::MalformedResponse(e.to_string())))?;
        url.query_pairs_mut()
            .append_pair("api-key", &self.api_key)
            .append_pair("limit", &self.config.page_size.to_string());
        if let Some(before) = before {
            url.query_pairs_mut().append_pair("before", before);
        }
        Ok(url)
    }

    async fn fetch_page(&self, wallet: &Pubkey, before: Option<&str>) -> Result<Vec<RawTransaction>> {
        let url = self.history_url(wallet, before)?;
        let mut attempt = 0;

        loop {
            let outcome = match self.client.get(url.clone()).send().await {
                Ok(response) if response.status().is_success() => {
                    return response
                        .json::<Vec<RawTransaction>>()
                        .await
                        .map_err(|e| err_with_loc!(SourceError::MalformedResponse(e.to_string())));
                },
                Ok(response) => format!("status {}", response.status()),
                Err(e) => e.to_string(),
            };

            if attempt < self.config.max_retries && is_retryable_error(&outcome) {
                let delay = calculate_backoff_with_jitter(
                    attempt,
                    self.config.base_retry_delay_ms,
                    self.config.max_retry_delay_ms,
                );
                debug!("retrying_history_page::attempt::{}::delay_ms::{}", attempt, delay.as_millis());
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(err_with_loc!(SourceError::PageError {
                wallet: wallet.to_string(),
                reason: outcome,
            }));
        }
    }
}

#[async_trait]
impl TransactionSource for HeliusSource {
    async fn fetch_history(&self, wallet: &Pubkey) -> Result<Vec<RawTransaction>> {
        let mut all: Vec<RawTransaction> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = match self.fetch_page(wallet, cursor.as_deref()).await {
                Ok(page) => page,
                Err(e) => {
                    if all.is_empty() {
                        return Err(e);
                    }
                    // Partial history is still valid input downstream
                    warn!("history_pagination_failed::partial::{}::error::{}", all.len(), e);
                    break;
                },
            };

            if page.is_empty() {
                break;
            }

            let short_page = page.len() < self.config.page_size;
            cursor = page.last().map(|tx| tx.signature.clone());
            all.extend(page);
            debug!("fetched_history_page::total::{}::wallet::{}", all.len(), wallet);

            if short_page {
                break;
            }
            if all.len() >= self.config.max_transactions {
                debug!("history_cap_reached::cap::{}", self.config.max_transactions);
                all.truncate(self.config.max_transactions);
                break;
            }

            tokio::time::sleep(Duration::from_millis(self.config.page_delay_ms)).await;
        }

        Ok(all)
    }

    async fn fetch_parsed_batches(&self, signatures: &[String]) -> Result<Vec<RawTransaction>> {
        let mut url = Url::parse(&format!("{}/v0/transactions", self.config.helius_url))
            .map_err(|e| err_with_loc!(SourceError::MalformedResponse(e.to_string())))?;
        url.query_pairs_mut().append_pair("api-key", &self.api_key);

        let mut all: Vec<RawTransaction> = Vec::new();

        for (index, batch) in signatures.chunks(self.config.batch_size).enumerate() {
            let body = serde_json::json!({ "transactions": batch });
            match self.client.post(url.clone()).json(&body).send().await {
                Ok(response) if response.status().is_success() => {
                    match response.json::<Vec<RawTransaction>>().await {
                        Ok(parsed) => {
                            debug!("parsed_batch_fetched::index::{}::count::{}", index, parsed.len());
                            all.extend(parsed);
                        },
                        Err(e) => warn!("parsed_batch_decode_failed::index::{}::error::{}", index, e),
                    }
                },
                // A failed batch degrades completeness, not correctness
                Ok(response) => {
                    warn!("parsed_batch_failed::index::{}::status::{}", index, response.status())
                },
                Err(e) => warn!("parsed_batch_failed::index::{}::error::{}", index, e),
            }

            tokio::time::sleep(Duration::from_millis(self.config.batch_delay_ms)).await;
        }

        Ok(all)
    }
}
