/// Bitquery connectivity probe.
///
/// Queries the first buyers of USDC, a token guaranteed to have trade
/// history, so an empty-but-successful response still proves the key works.
use anyhow::{bail, Result};
use tracing::{info, warn};

use remora::config::Config;
use remora::intelligence::WalletAnalyzer;

/// USDC on Ethereum mainnet
const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    if config.bitquery_api_key.is_empty() {
        bail!("BITQUERY_API_KEY is not set");
    }

    info!(token = USDC, "Querying early buyers for USDC");
    let buyers = WalletAnalyzer::new(&config).early_buyers(USDC, 5).await;

    if buyers.is_empty() {
        // Auth worked if no error was reported; the query itself may just
        // return nothing for this window
        warn!("Connection made but no buyers returned");
    } else {
        info!(count = buyers.len(), sample = %buyers[0], "Bitquery feed verified");
    }
    Ok(())
}
