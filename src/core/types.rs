use serde::{Deserialize, Serialize};

/// A trending token surfaced by the scout, already past the
/// liquidity/volume filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingToken {
    /// Token symbol extracted from the pool name
    pub symbol: String,
    /// Token contract address (not the pool address)
    pub address: String,
    /// Base token price in USD, when the API reports one
    pub price_usd: Option<f64>,
    /// Pool reserve in USD
    pub liquidity_usd: f64,
    /// 24h trading volume in USD
    pub volume_24h_usd: f64,
    /// Address of the pool the token was discovered in
    pub pool_address: String,
}

/// A candidate wallet with its heuristic score attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredWallet {
    pub address: String,
    /// Heuristic score in 0..100
    pub score: u32,
    pub reason: String,
}

/// Raw activity record as returned by the activity feed. Every field is
/// optional; the feed makes no completeness guarantee.
#[derive(Debug, Clone, Default)]
pub struct ActivityRecord {
    pub timestamp: Option<String>,
    pub token_symbol: Option<String>,
    pub amount: Option<f64>,
    pub tx_hash: Option<String>,
}

/// A recorded observation of a watched wallet's trading activity, keyed by
/// transaction hash for deduplication. This is the shape persisted to the
/// signal log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    /// Source-provided event time; kept verbatim, may be absent
    pub timestamp: Option<String>,
    /// Wallet that produced the activity
    pub wallet: String,
    /// Symbol of the traded token, when the feed reports one
    pub token: Option<String>,
    /// Traded amount, when the feed reports one
    pub amount: Option<f64>,
    /// Transaction hash — the deduplication key, unique across the log
    pub tx_hash: String,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
}

impl TradeSignal {
    /// Builds a BUY signal from a raw activity record. Returns `None` when
    /// the record carries no transaction hash: without the dedup key the
    /// signal cannot be reliably suppressed on the next cycle.
    pub fn from_activity(wallet: &str, record: &ActivityRecord) -> Option<Self> {
        let tx_hash = record.tx_hash.clone()?;
        Some(Self {
            timestamp: record.timestamp.clone(),
            wallet: wallet.to_string(),
            token: record.token_symbol.clone(),
            amount: record.amount,
            tx_hash,
            signal_type: SignalType::Buy,
        })
    }
}
