/// Market Discovery via GeckoTerminal
///
/// Fetches trending pools for the configured chain and filters them down to
/// tokens with enough liquidity and volume to be worth analyzing. The free
/// GeckoTerminal API needs no key; any transport or decode failure degrades
/// to an empty result rather than surfacing an error.
use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::core::types::TrendingToken;

const GECKO_TERMINAL_BASE: &str = "https://api.geckoterminal.com/api/v2";
const GECKO_TERMINAL_ACCEPT: &str = "application/json;version=20230302";

/// Trending-pool response envelope
#[derive(Debug, Deserialize)]
struct TrendingPoolsResponse {
    #[serde(default)]
    data: Vec<Pool>,
}

#[derive(Debug, Deserialize)]
struct Pool {
    #[serde(default)]
    attributes: PoolAttributes,
    #[serde(default)]
    relationships: PoolRelationships,
}

#[derive(Debug, Default, Deserialize)]
struct PoolAttributes {
    /// Pool name, usually "TOKEN / QUOTE"
    #[serde(default)]
    name: String,
    /// POOL address, not the token address
    #[serde(default)]
    address: String,
    /// String-encoded USD price of the base token
    base_token_price_usd: Option<String>,
    /// String-encoded USD reserve
    reserve_in_usd: Option<String>,
    /// Volume windows, string-encoded ("h24" is the one we filter on)
    #[serde(default)]
    volume_usd: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct PoolRelationships {
    base_token: Option<Relationship>,
}

#[derive(Debug, Deserialize)]
struct Relationship {
    data: Option<RelationshipData>,
}

#[derive(Debug, Deserialize)]
struct RelationshipData {
    /// Network-prefixed token id, e.g. "eth_0x6982..."
    #[serde(default)]
    id: String,
}

/// Scans GeckoTerminal trending pools for qualified tokens
pub struct TokenScanner {
    client: Client,
    base_url: String,
    chain: String,
    min_liquidity_usd: f64,
    min_volume_24h_usd: f64,
}

impl TokenScanner {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: GECKO_TERMINAL_BASE.to_string(),
            chain: config.target_chain.clone(),
            min_liquidity_usd: config.min_liquidity_usd,
            min_volume_24h_usd: config.min_volume_24h_usd,
        }
    }

    /// Maps the configured chain to a GeckoTerminal network slug. Unknown
    /// chains fall back to eth, matching the scout's permissive posture.
    fn network_slug(&self) -> &str {
        match self.chain.as_str() {
            "ethereum" => "eth",
            "solana" => "solana",
            "base" => "base",
            _ => "eth",
        }
    }

    /// Fetches trending pools and returns up to `limit` qualified tokens in
    /// response order. Failures yield an empty list.
    #[instrument(skip(self))]
    pub async fn trending_tokens(&self, limit: usize) -> Vec<TrendingToken> {
        let url = format!(
            "{}/networks/{}/trending_pools",
            self.base_url,
            self.network_slug()
        );

        let response = match self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, GECKO_TERMINAL_ACCEPT)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Trending pools request failed");
                return Vec::new();
            }
        };

        let pools: TrendingPoolsResponse = match response.json().await {
            Ok(pools) => pools,
            Err(e) => {
                warn!(error = %e, "Trending pools response was not decodable");
                return Vec::new();
            }
        };

        let tokens = self.qualify_pools(pools.data, limit);
        info!(
            chain = %self.chain,
            qualified = tokens.len(),
            "Market scan complete"
        );
        tokens
    }

    /// Applies the liquidity/volume filter and extracts token identity from
    /// each pool. Pools with unparsable numbers or no base token id are
    /// skipped.
    fn qualify_pools(&self, pools: Vec<Pool>, limit: usize) -> Vec<TrendingToken> {
        let mut qualified = Vec::new();

        for pool in pools {
            if qualified.len() >= limit {
                break;
            }

            let attrs = &pool.attributes;
            let liquidity = match attrs.reserve_in_usd.as_deref().and_then(parse_f64) {
                Some(v) => v,
                None => continue,
            };
            let volume_24h = match attrs.volume_usd.get("h24").map(String::as_str).and_then(parse_f64) {
                Some(v) => v,
                None => continue,
            };

            if liquidity < self.min_liquidity_usd || volume_24h < self.min_volume_24h_usd {
                debug!(
                    pool = %attrs.name,
                    liquidity_usd = liquidity,
                    volume_24h_usd = volume_24h,
                    "Pool below thresholds, skipping"
                );
                continue;
            }

            // "TOKEN / WETH" -> "TOKEN"
            let symbol = attrs
                .name
                .split('/')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();

            // base_token id arrives network-prefixed, e.g. "eth_0x6982..."
            let token_address = pool
                .relationships
                .base_token
                .as_ref()
                .and_then(|r| r.data.as_ref())
                .map(|d| match d.id.split_once('_') {
                    Some((_, address)) => address.to_string(),
                    None => d.id.clone(),
                })
                .unwrap_or_default();

            if token_address.is_empty() {
                continue;
            }

            qualified.push(TrendingToken {
                symbol,
                address: token_address,
                price_usd: attrs.base_token_price_usd.as_deref().and_then(parse_f64),
                liquidity_usd: liquidity,
                volume_24h_usd: volume_24h,
                pool_address: attrs.address.clone(),
            });
        }

        qualified
    }
}

fn parse_f64(s: &str) -> Option<f64> {
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> TokenScanner {
        TokenScanner::new(&Config::default())
    }

    fn pool(name: &str, reserve: &str, vol_h24: &str, base_token_id: &str) -> Pool {
        Pool {
            attributes: PoolAttributes {
                name: name.to_string(),
                address: "0xpool".to_string(),
                base_token_price_usd: Some("0.0000012".to_string()),
                reserve_in_usd: Some(reserve.to_string()),
                volume_usd: HashMap::from([("h24".to_string(), vol_h24.to_string())]),
            },
            relationships: PoolRelationships {
                base_token: Some(Relationship {
                    data: Some(RelationshipData {
                        id: base_token_id.to_string(),
                    }),
                }),
            },
        }
    }

    #[test]
    fn qualifying_pool_becomes_token() {
        let pools = vec![pool("PEPE / WETH", "50000", "120000", "eth_0x6982")];
        let tokens = scanner().qualify_pools(pools, 10);

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].symbol, "PEPE");
        assert_eq!(tokens[0].address, "0x6982");
        assert_eq!(tokens[0].pool_address, "0xpool");
    }

    #[test]
    fn thin_pools_are_filtered_out() {
        let pools = vec![
            pool("THIN / WETH", "500", "120000", "eth_0x1"),
            pool("QUIET / WETH", "50000", "100", "eth_0x2"),
        ];
        assert!(scanner().qualify_pools(pools, 10).is_empty());
    }

    #[test]
    fn limit_caps_result_in_response_order() {
        let pools = vec![
            pool("A / WETH", "50000", "120000", "eth_0xa"),
            pool("B / WETH", "50000", "120000", "eth_0xb"),
            pool("C / WETH", "50000", "120000", "eth_0xc"),
        ];
        let tokens = scanner().qualify_pools(pools, 2);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].address, "0xa");
        assert_eq!(tokens[1].address, "0xb");
    }

    #[test]
    fn unprefixed_base_token_id_is_used_verbatim() {
        let pools = vec![pool("RAW / WETH", "50000", "120000", "0xraw")];
        let tokens = scanner().qualify_pools(pools, 10);
        assert_eq!(tokens[0].address, "0xraw");
    }

    #[test]
    fn unparsable_numbers_skip_the_pool() {
        let mut bad = pool("BAD / WETH", "not-a-number", "120000", "eth_0xbad");
        bad.attributes.reserve_in_usd = Some("not-a-number".to_string());
        assert!(scanner().qualify_pools(vec![bad], 10).is_empty());
    }

    #[test]
    fn missing_base_token_skips_the_pool() {
        let mut orphan = pool("ORPHAN / WETH", "50000", "120000", "");
        orphan.relationships.base_token = None;
        assert!(scanner().qualify_pools(vec![orphan], 10).is_empty());
    }

    #[test]
    fn unknown_chain_falls_back_to_eth() {
        let config = Config {
            target_chain: "dogechain".to_string(),
            ..Config::default()
        };
        assert_eq!(TokenScanner::new(&config).network_slug(), "eth");
    }
}
