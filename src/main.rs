use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remora::config::Config;
use remora::copier::{MonitorConfig, MoralisFetcher, SignalLog, SignalMonitor, Watchlist};
use remora::intelligence::{WalletAnalyzer, WalletScorer};
use remora::scout::TokenScanner;

/// Trending tokens pulled per run
const DISCOVERY_LIMIT: usize = 5;
/// Early buyers fetched per token
const BUYERS_PER_TOKEN: usize = 20;
/// Ranked wallets promoted to the watchlist
const WATCHLIST_SIZE: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    info!("=== Remora Wallet Copy Trader ===");
    let config = Config::from_env();
    config.warn_on_missing_keys();

    // Phase 1: Scout - market discovery
    info!("--- Phase 1: Scout (Discovery) ---");
    let scanner = TokenScanner::new(&config);
    let trending = scanner.trending_tokens(DISCOVERY_LIMIT).await;

    if trending.is_empty() {
        warn!("No trending tokens found or API error, exiting");
        return Ok(());
    }
    for token in &trending {
        info!(
            symbol = %token.symbol,
            address = %token.address,
            liquidity_usd = token.liquidity_usd,
            "Trending token"
        );
    }

    // Phase 2: Intelligence - early buyers and scoring
    info!("--- Phase 2: Intelligence (Analysis) ---");
    let analyzer = WalletAnalyzer::new(&config);
    let mut candidates: HashSet<String> = HashSet::new();
    for token in &trending {
        info!(symbol = %token.symbol, "Finding early buyers");
        candidates.extend(analyzer.early_buyers(&token.address, BUYERS_PER_TOKEN).await);
    }

    info!(unique_candidates = candidates.len(), "Candidate wallets identified");
    if candidates.is_empty() {
        warn!("No wallets found to analyze, exiting");
        return Ok(());
    }

    let candidates: Vec<String> = candidates.into_iter().collect();
    let ranked = WalletScorer::new().rank(&candidates);
    let top_picks: Vec<String> = ranked
        .iter()
        .take(WATCHLIST_SIZE)
        .map(|w| {
            info!(address = %w.address, score = w.score, reason = %w.reason, "Top wallet");
            w.address.clone()
        })
        .collect();

    if top_picks.is_empty() {
        warn!("No wallet cleared the score threshold, exiting");
        return Ok(());
    }

    // Phase 3: Copier - watch and log signals
    info!("--- Phase 3: Copier (Execution) ---");
    let watchlist = Arc::new(Watchlist::new());
    watchlist.update(top_picks);

    if !confirm("Start listening for trades? (y/n): ")? {
        info!("Done, copy execution skipped");
        return Ok(());
    }

    let monitor = Arc::new(SignalMonitor::new(
        Arc::clone(&watchlist),
        MoralisFetcher::new(&config),
        SignalLog::new(&config.signal_log_path),
        MonitorConfig {
            poll_interval_secs: config.poll_interval_secs,
            ..MonitorConfig::default()
        },
    ));

    let runner = Arc::clone(&monitor);
    tokio::select! {
        result = runner.run() => {
            if let Err(e) = result {
                error!(error = %e, "Signal monitor failed");
            }
        }
        _ = signal::ctrl_c() => {
            info!("Ctrl-C received, stopping monitor");
            monitor.stop();
        }
    }

    let stats = monitor.stats();
    info!(
        cycles = stats.cycles_completed,
        signals = stats.signals_persisted,
        "Shutdown complete"
    );
    Ok(())
}

/// Blocking y/n prompt on stdin, matching the operator flow of the prototype
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn init_tracing() -> Result<()> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(console_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    Ok(())
}
