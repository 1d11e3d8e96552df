use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use solana_pubkey::Pubkey;
use tracing::debug;
use tracing::warn;

use super::MarketDataSource;
use super::PriceOracle;
use crate::Result;
use crate::config::SourceConfig;
use crate::constants::FALLBACK_SOL_PRICE_USD;
use crate::constants::WSOL_MINT_KEY;
use crate::model::MarketSnapshot;
use crate::model::serde_pubkey_opt;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PairDto {
    base_token: BaseTokenDto,
    price_usd: Option<String>,
    liquidity: Option<LiquidityDto>,
    volume: Option<VolumeDto>,
    pair_created_at: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BaseTokenDto {
    #[serde(with = "serde_pubkey_opt")]
    address: Option<Pubkey>,
    name: Option<String>,
    symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LiquidityDto {
    usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct VolumeDto {
    h24: Option<f64>,
}

impl PairDto {
    fn into_snapshot(self) -> Option<(Pubkey, MarketSnapshot)> {
        let mint = self.base_token.address?;
        let snapshot = MarketSnapshot {
            name: self.base_token.name.unwrap_or_default(),
            symbol: self.base_token.symbol.unwrap_or_default(),
            price_usd: self.price_usd.and_then(|p| p.parse().ok()).unwrap_or(0.0),
            liquidity_usd: self.liquidity.and_then(|l| l.usd).unwrap_or(0.0),
            volume_24h_usd: self.volume.and_then(|v| v.h24).unwrap_or(0.0),
            pool_created_at: self.pair_created_at.unwrap_or(0),
        };
        Some((mint, snapshot))
    }
}

/// DexScreener token endpoint, chunked at 30 mints per request. Also
/// serves as the SOL price oracle off the WSOL pair.
pub struct DexScreenerSource {
    client: Client,
    config: SourceConfig,
}

impl DexScreenerSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MarketDataSource for DexScreenerSource {
    async fn fetch_market_data(&self, mints: &[Pubkey]) -> Result<HashMap<Pubkey, MarketSnapshot>> {
        let mut map = HashMap::new();

        for chunk in mints.chunks(self.config.market_chunk_size) {
            let joined = chunk.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(",");
            let url = format!("{}/tokens/v1/solana/{}", self.config.dexscreener_url, joined);

            // A failed chunk leaves its mints without data (Unknown),
            // never fails the whole analysis
            match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    match response.json::<Vec<PairDto>>().await {
                        Ok(pairs) => {
                            for pair in pairs {
                                if let Some((mint, snapshot)) = pair.into_snapshot() {
                                    map.entry(mint).or_insert(snapshot);
                                }
                            }
                        },
                        Err(e) => warn!("market_chunk_decode_failed::error::{}", e),
                    }
                },
                Ok(response) => warn!("market_chunk_failed::status::{}", response.status()),
                Err(e) => warn!("market_chunk_failed::error::{}", e),
            }

            tokio::time::sleep(Duration::from_millis(self.config.market_chunk_delay_ms)).await;
        }

        debug!("market_data_fetched::requested::{}::found::{}", mints.len(), map.len());
        Ok(map)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PairsEnvelope {
    pairs: Option<Vec<PairDto>>,
}

#[async_trait]
impl PriceOracle for DexScreenerSource {
    async fn sol_price_usd(&self) -> f64 {
        let url = format!(
            "{}/latest/dex/pairs/solana/{}",
            self.config.dexscreener_url, WSOL_MINT_KEY
        );

        let price = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<PairsEnvelope>()
                .await
                .ok()
                .and_then(|data| data.pairs?.into_iter().next()?.price_usd?.parse::<f64>().ok()),
            _ => None,
        };

        match price {
            Some(p) if p > 0.0 => p,
            _ => {
                warn!("sol_price_unavailable::using_fallback::{}", FALLBACK_SOL_PRICE_USD);
                FALLBACK_SOL_PRICE_USD
            },
        }
    }
}
