use std::collections::HashSet;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::Config;

const BITQUERY_URL: &str = "https://graphql.bitquery.io";

/// First-N buyers of a token, ascending by block time
const EARLY_BUYERS_QUERY: &str = r#"
query ($token: String!, $limit: Int!) {
  ethereum(network: ethereum) {
    dexTrades(
      options: {limit: $limit, asc: "block.timestamp.time"}
      buyCurrency: {is: $token}
    ) {
      transaction {
        hash
      }
      taker {
        address
      }
      block {
        timestamp {
          time
        }
      }
      buyAmount
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<QueryData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    ethereum: Option<EthereumData>,
}

#[derive(Debug, Deserialize)]
struct EthereumData {
    #[serde(rename = "dexTrades", default)]
    dex_trades: Vec<DexTrade>,
}

#[derive(Debug, Deserialize)]
struct DexTrade {
    taker: Option<Taker>,
}

#[derive(Debug, Deserialize)]
struct Taker {
    address: String,
}

/// Queries Bitquery for the early buyers of a token
pub struct WalletAnalyzer {
    client: Client,
    url: String,
    api_key: String,
}

impl WalletAnalyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            url: BITQUERY_URL.to_string(),
            api_key: config.bitquery_api_key.clone(),
        }
    }

    /// Returns the distinct taker addresses of the first `limit` buys of
    /// `token_address`. Bitquery errors and transport failures degrade to an
    /// empty list.
    #[instrument(skip(self))]
    pub async fn early_buyers(&self, token_address: &str, limit: usize) -> Vec<String> {
        let body = json!({
            "query": EARLY_BUYERS_QUERY,
            "variables": { "token": token_address, "limit": limit },
        });

        let response = match self
            .client
            .post(&self.url)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Bitquery request failed");
                return Vec::new();
            }
        };

        let parsed: GraphQlResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Bitquery response was not decodable");
                return Vec::new();
            }
        };

        if let Some(errors) = parsed.errors {
            for error in &errors {
                warn!(message = %error.message, "Bitquery reported an error");
            }
            return Vec::new();
        }

        let trades = parsed
            .data
            .and_then(|d| d.ethereum)
            .map(|e| e.dex_trades)
            .unwrap_or_default();

        let wallets: HashSet<String> = trades
            .into_iter()
            .filter_map(|t| t.taker.map(|taker| taker.address))
            .collect();

        debug!(
            token = %token_address,
            buyers = wallets.len(),
            "Early buyer query complete"
        );
        wallets.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_with_errors_has_no_usable_data() {
        let raw = r#"{"errors":[{"message":"API key invalid"}]}"#;
        let parsed: GraphQlResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.errors.is_some());
        assert!(parsed.data.is_none());
    }

    #[test]
    fn takers_deduplicate_across_trades() {
        let raw = r#"{
            "data": {"ethereum": {"dexTrades": [
                {"taker": {"address": "0xaaa"}},
                {"taker": {"address": "0xbbb"}},
                {"taker": {"address": "0xaaa"}},
                {"taker": null}
            ]}}
        }"#;
        let parsed: GraphQlResponse = serde_json::from_str(raw).unwrap();
        let trades = parsed.data.unwrap().ethereum.unwrap().dex_trades;

        let wallets: HashSet<String> = trades
            .into_iter()
            .filter_map(|t| t.taker.map(|taker| taker.address))
            .collect();

        assert_eq!(wallets.len(), 2);
        assert!(wallets.contains("0xaaa"));
        assert!(wallets.contains("0xbbb"));
    }
}
