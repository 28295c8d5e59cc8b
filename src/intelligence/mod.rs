/// Wallet Intelligence
///
/// Finds the wallets that bought a token early (Bitquery dexTrades) and
/// ranks them with a deterministic placeholder score. The scoring step is an
/// explicit mock: no trade history is fetched and no real performance
/// analytics run behind it.
pub mod analyzer;
pub mod scorer;

pub use analyzer::WalletAnalyzer;
pub use scorer::WalletScorer;
