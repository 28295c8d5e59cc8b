use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::copier::fetcher::ActivityFetcher;
use crate::copier::signal_log::SignalLog;
use crate::copier::watchlist::Watchlist;
use crate::core::types::TradeSignal;

/// Configuration for the signal polling loop
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Idle period between scans, counted in stop-flag checks
    pub poll_interval_secs: u64,
    /// Granularity of the stop-flag check while idle. One second by
    /// default, which bounds stop latency to one second.
    pub stop_check: Duration,
    /// How many recent activity records to request per wallet per cycle
    pub fetch_limit: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 900, // ~15 minutes between scans
            stop_check: Duration::from_secs(1),
            fetch_limit: 1,
        }
    }
}

/// Counters exposed for status display
#[derive(Debug, Clone, Default)]
pub struct MonitorStats {
    /// Scan cycles completed since start
    pub cycles_completed: u64,
    /// New signals successfully persisted to the log
    pub signals_persisted: u64,
    /// End time of the most recent scan
    pub last_scan_at: Option<DateTime<Utc>>,
}

/// Polls the watchlist for fresh trading activity and appends anything not
/// seen before to the durable signal log.
///
/// The monitor owns its `running` flag and its watchlist handle — there is
/// no process-wide state. `run` occupies the calling task until `stop` is
/// observed; control surfaces wanting responsiveness spawn it and interact
/// through `stop()`. Cancellation is cooperative only: a fetch in flight
/// completes on its own terms.
pub struct SignalMonitor<F: ActivityFetcher> {
    watchlist: Arc<Watchlist>,
    log: SignalLog,
    fetcher: F,
    running: AtomicBool,
    config: MonitorConfig,
    stats: Mutex<MonitorStats>,
}

impl<F: ActivityFetcher> SignalMonitor<F> {
    pub fn new(
        watchlist: Arc<Watchlist>,
        fetcher: F,
        log: SignalLog,
        config: MonitorConfig,
    ) -> Self {
        Self {
            watchlist,
            log,
            fetcher,
            running: AtomicBool::new(false),
            config,
            stats: Mutex::new(MonitorStats::default()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Requests a halt. Always safe, idempotent; the loop honors it at its
    /// next per-second check.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            info!("Stop requested, monitor will go idle within one second");
        }
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats.lock().unwrap().clone()
    }

    /// Runs the polling loop until `stop` is called. No failure inside a
    /// cycle is fatal; the loop always proceeds to the next cycle.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<()> {
        self.running.store(true, Ordering::SeqCst);
        info!(
            wallets = self.watchlist.current().len(),
            poll_interval_secs = self.config.poll_interval_secs,
            log_path = %self.log.path().display(),
            "Signal monitor started, listening for trades"
        );

        while self.is_running() {
            let scan_start = Instant::now();
            let new_signals = self.scan().await;
            debug!(
                duration_ms = scan_start.elapsed().as_millis() as u64,
                new_signals = new_signals,
                "Scan cycle completed"
            );

            // Idle in one-second steps so a stop request is honored promptly
            for _ in 0..self.config.poll_interval_secs {
                if !self.is_running() {
                    break;
                }
                sleep(self.config.stop_check).await;
            }
        }

        info!("Signal monitor idle");
        Ok(())
    }

    /// One scan cycle: snapshot the watchlist, fetch each wallet's latest
    /// activity, keep what the log has not seen, persist the batch.
    /// Returns the number of new signals found this cycle.
    pub async fn scan(&self) -> usize {
        // Watchlist snapshot is taken once; a mid-cycle update applies next cycle
        let wallets = self.watchlist.current();
        if wallets.is_empty() {
            debug!("Watchlist is empty, nothing to scan");
            return 0;
        }

        let mut batch: Vec<TradeSignal> = Vec::new();
        for wallet in &wallets {
            for record in self
                .fetcher
                .latest_activity(wallet, self.config.fetch_limit)
                .await
            {
                let signal = match TradeSignal::from_activity(wallet, &record) {
                    Some(signal) => signal,
                    None => {
                        warn!(
                            wallet = %wallet,
                            "Activity record has no transaction hash, cannot deduplicate - skipped"
                        );
                        continue;
                    }
                };

                if self.log.contains(&signal.tx_hash)
                    || batch.iter().any(|s| s.tx_hash == signal.tx_hash)
                {
                    debug!(wallet = %wallet, tx_hash = %signal.tx_hash, "Signal already seen");
                    continue;
                }

                self.execute_copy_trade(&signal);
                batch.push(signal);
            }
        }

        let new_signals = batch.len();
        if new_signals == 0 {
            self.finish_cycle(0);
            return 0;
        }

        match self.log.prepend(&batch) {
            Ok(total) => {
                info!(
                    new_signals = new_signals,
                    log_length = total,
                    "Persisted new signals"
                );
                self.finish_cycle(new_signals as u64);
            }
            Err(e) => {
                // Best-effort write: this cycle's batch is lost from the
                // durable log, the loop carries on regardless
                error!(error = %e, "Failed to persist signal batch");
                self.finish_cycle(0);
            }
        }

        new_signals
    }

    /// Logs the copy intent for a fresh signal. No order is submitted — this
    /// is the prototype's stand-in for real execution.
    fn execute_copy_trade(&self, signal: &TradeSignal) {
        info!(
            wallet = %signal.wallet,
            token = signal.token.as_deref().unwrap_or("?"),
            amount = signal.amount.unwrap_or(0.0),
            tx_hash = %signal.tx_hash,
            "🚨 Copy detected - would execute BUY (no order submitted)"
        );
    }

    fn finish_cycle(&self, persisted: u64) {
        let mut stats = self.stats.lock().unwrap();
        stats.cycles_completed += 1;
        stats.signals_persisted += persisted;
        stats.last_scan_at = Some(Utc::now());
    }
}
