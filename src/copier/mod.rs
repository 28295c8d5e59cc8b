/// Copier — signal monitoring and copy-intent execution
///
/// This is the stateful heart of the system: a watchlist of wallets, a
/// durable deduplicated signal log, and a polling loop that scans the
/// watchlist each cycle and persists whatever activity it has not seen
/// before. Copy "execution" only logs intent; no order ever leaves the
/// process.
pub mod fetcher;
pub mod monitor;
pub mod signal_log;
pub mod watchlist;

pub use fetcher::{ActivityFetcher, MoralisFetcher};
pub use monitor::{MonitorConfig, SignalMonitor};
pub use signal_log::{SignalLog, SignalLogError};
pub use watchlist::Watchlist;
