use std::sync::RwLock;

use tracing::info;

/// Ordered set of wallet addresses under surveillance.
///
/// Updates are wholesale replacements — there is no merge or incremental
/// add/remove, and address uniqueness is the caller's concern. Interior
/// mutability lets a control surface holding an `Arc` swap the list while
/// the monitor runs; the running cycle keeps the snapshot it started with
/// and picks the new list up next cycle.
#[derive(Debug, Default)]
pub struct Watchlist {
    wallets: RwLock<Vec<String>>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire watchlist. No validation of address format.
    pub fn update(&self, wallets: Vec<String>) {
        info!(count = wallets.len(), "Updating watchlist");
        *self.wallets.write().unwrap() = wallets;
    }

    /// Snapshot of the active list, for display or iteration.
    pub fn current(&self) -> Vec<String> {
        self.wallets.read().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let watchlist = Watchlist::new();
        assert!(watchlist.is_empty());
        assert!(watchlist.current().is_empty());
    }

    #[test]
    fn update_replaces_wholesale_and_preserves_order() {
        let watchlist = Watchlist::new();
        watchlist.update(vec!["0xaaa".to_string(), "0xbbb".to_string()]);
        assert_eq!(watchlist.current(), vec!["0xaaa", "0xbbb"]);

        watchlist.update(vec!["0xccc".to_string()]);
        assert_eq!(watchlist.current(), vec!["0xccc"]);
    }

    #[test]
    fn duplicates_are_not_the_stores_problem() {
        let watchlist = Watchlist::new();
        watchlist.update(vec!["0xaaa".to_string(), "0xaaa".to_string()]);
        assert_eq!(watchlist.current().len(), 2);
    }
}
