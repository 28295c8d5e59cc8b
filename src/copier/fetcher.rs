use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::types::ActivityRecord;

const MORALIS_BASE: &str = "https://deep-index.moralis.io/api/v2.2";

/// Source of recent wallet activity.
///
/// Implementations recover from their own failures: on any error they return
/// an empty list, so the monitor never sees a hard fetch error. The trait
/// seam exists so tests can drive the monitor with scripted activity.
#[async_trait]
pub trait ActivityFetcher: Send + Sync {
    /// The most recent `limit` activity records for `wallet`, newest first.
    async fn latest_activity(&self, wallet: &str, limit: usize) -> Vec<ActivityRecord>;
}

/// Moralis ERC20 transfer page
#[derive(Debug, Deserialize)]
struct TransferPage {
    #[serde(default)]
    result: Vec<Erc20Transfer>,
}

#[derive(Debug, Deserialize)]
struct Erc20Transfer {
    block_timestamp: Option<String>,
    token_symbol: Option<String>,
    /// Decimal-adjusted amount, string-encoded
    value_decimal: Option<String>,
    transaction_hash: Option<String>,
}

impl From<Erc20Transfer> for ActivityRecord {
    fn from(transfer: Erc20Transfer) -> Self {
        ActivityRecord {
            timestamp: transfer.block_timestamp,
            token_symbol: transfer.token_symbol,
            amount: transfer.value_decimal.and_then(|v| v.parse().ok()),
            tx_hash: transfer.transaction_hash,
        }
    }
}

/// Fetches recent ERC20 transfers from the Moralis deep-index API
pub struct MoralisFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MoralisFetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: MORALIS_BASE.to_string(),
            api_key: config.moralis_api_key.clone(),
        }
    }
}

#[async_trait]
impl ActivityFetcher for MoralisFetcher {
    async fn latest_activity(&self, wallet: &str, limit: usize) -> Vec<ActivityRecord> {
        let url = format!("{}/{}/erc20/transfers", self.base_url, wallet);

        let response = match self
            .client
            .get(&url)
            .query(&[("limit", limit.to_string())])
            .header("X-API-Key", &self.api_key)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(response) => response,
            Err(e) => {
                warn!(wallet = %wallet, error = %e, "Activity fetch failed");
                return Vec::new();
            }
        };

        let page: TransferPage = match response.json().await {
            Ok(page) => page,
            Err(e) => {
                warn!(wallet = %wallet, error = %e, "Activity response was not decodable");
                return Vec::new();
            }
        };

        debug!(wallet = %wallet, records = page.result.len(), "Fetched wallet activity");
        page.result.into_iter().map(ActivityRecord::from).collect()
    }
}
