// Shared domain types
pub mod core;

// Environment configuration
pub mod config;

// Market discovery (GeckoTerminal trending pools)
pub mod scout;

// Early-buyer analysis and mock scoring (Bitquery)
pub mod intelligence;

// Watchlist, signal log and the polling monitor
pub mod copier;

// Re-export commonly used types for convenience
pub use crate::config::Config;
pub use crate::core::types::{ActivityRecord, ScoredWallet, SignalType, TradeSignal, TrendingToken};
