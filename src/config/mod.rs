/// Environment-driven configuration with compiled defaults
///
/// Keys are read from the process environment, with `.env` loaded first via
/// dotenv. Missing API keys never fail startup — the operator is warned and
/// the affected collaborator degrades to empty results.
use std::env;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bitquery API key for early-buyer discovery
    pub bitquery_api_key: String,
    /// Moralis API key for the wallet activity feed
    pub moralis_api_key: String,
    /// Chain to scout ("ethereum", "solana" or "base")
    pub target_chain: String,
    /// Minimum pool reserve (USD) for a trending token to qualify
    pub min_liquidity_usd: f64,
    /// Minimum 24h volume (USD) for a trending token to qualify
    pub min_volume_24h_usd: f64,
    /// Idle time between scan cycles, in one-second stop-flag checks
    pub poll_interval_secs: u64,
    /// Path of the durable signal log
    pub signal_log_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bitquery_api_key: String::new(),
            moralis_api_key: String::new(),
            target_chain: "ethereum".to_string(),
            min_liquidity_usd: 10_000.0,
            min_volume_24h_usd: 50_000.0,
            poll_interval_secs: 900,
            signal_log_path: "signals.json".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        Self {
            bitquery_api_key: env::var("BITQUERY_API_KEY").unwrap_or(defaults.bitquery_api_key),
            moralis_api_key: env::var("MORALIS_API_KEY").unwrap_or(defaults.moralis_api_key),
            target_chain: env::var("TARGET_CHAIN").unwrap_or(defaults.target_chain),
            min_liquidity_usd: parse_env("MIN_LIQUIDITY_USD", defaults.min_liquidity_usd),
            min_volume_24h_usd: parse_env("MIN_VOLUME_24H", defaults.min_volume_24h_usd),
            poll_interval_secs: parse_env("POLL_INTERVAL_SECS", defaults.poll_interval_secs),
            signal_log_path: env::var("SIGNAL_LOG_PATH").unwrap_or(defaults.signal_log_path),
        }
    }

    /// Logs a warning for each missing API key. Returns true when all keys
    /// are present.
    pub fn warn_on_missing_keys(&self) -> bool {
        let mut complete = true;
        if self.bitquery_api_key.is_empty() {
            warn!("BITQUERY_API_KEY not set - wallet analysis will return nothing");
            complete = false;
        }
        if self.moralis_api_key.is_empty() {
            warn!("MORALIS_API_KEY not set - activity feed will return nothing");
            complete = false;
        }
        complete
    }
}

fn parse_env<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.target_chain, "ethereum");
        assert_eq!(config.min_liquidity_usd, 10_000.0);
        assert_eq!(config.min_volume_24h_usd, 50_000.0);
        assert_eq!(config.poll_interval_secs, 900);
        assert_eq!(config.signal_log_path, "signals.json");
    }

    #[test]
    fn parse_env_falls_back_on_garbage() {
        std::env::set_var("REMORA_TEST_FLOAT", "not-a-number");
        assert_eq!(parse_env("REMORA_TEST_FLOAT", 5.0), 5.0);
        std::env::remove_var("REMORA_TEST_FLOAT");
    }
}
