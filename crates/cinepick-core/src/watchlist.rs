use anyhow::Result;
use cinepick_models::MovieId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use crate::storage::LocalStore;

pub const WATCHLIST_KEY: &str = "watchlist";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchlistAction {
    Add,
    Remove,
}

/// Ordered list of movie ids the user wants to watch
#[derive(Clone)]
pub struct Watchlist {
    store: Arc<dyn LocalStore>,
}

impl Watchlist {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<MovieId> {
        match self.store.get(WATCHLIST_KEY) {
            Ok(Some(content)) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Watchlist is corrupt, treating as empty: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Error reading watchlist: {}", e);
                Vec::new()
            }
        }
    }

    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.list().contains(&movie_id)
    }

    /// Apply `action` and persist; returns the new list
    pub fn toggle(&self, movie_id: MovieId, action: WatchlistAction) -> Result<Vec<MovieId>> {
        let mut watchlist = self.list();
        match action {
            WatchlistAction::Add => {
                if !watchlist.contains(&movie_id) {
                    watchlist.push(movie_id);
                }
            }
            WatchlistAction::Remove => watchlist.retain(|id| *id != movie_id),
        }

        self.store.set(WATCHLIST_KEY, &serde_json::to_string(&watchlist)?)?;
        debug!(movie_id = movie_id, action = ?action, len = watchlist.len(), "Watchlist updated");
        Ok(watchlist)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(WATCHLIST_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn watchlist() -> (Watchlist, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Watchlist::new(store.clone()), store)
    }

    #[test]
    fn test_add_is_idempotent_and_keeps_order() {
        let (watchlist, _) = watchlist();
        watchlist.toggle(3, WatchlistAction::Add).unwrap();
        watchlist.toggle(1, WatchlistAction::Add).unwrap();
        let list = watchlist.toggle(3, WatchlistAction::Add).unwrap();

        assert_eq!(list, vec![3, 1]);
        assert_eq!(watchlist.list(), vec![3, 1]);
        assert!(watchlist.contains(1));
    }

    #[test]
    fn test_remove() {
        let (watchlist, _) = watchlist();
        watchlist.toggle(3, WatchlistAction::Add).unwrap();
        watchlist.toggle(4, WatchlistAction::Add).unwrap();

        assert_eq!(watchlist.toggle(3, WatchlistAction::Remove).unwrap(), vec![4]);
        assert_eq!(watchlist.toggle(99, WatchlistAction::Remove).unwrap(), vec![4]);
        assert!(!watchlist.contains(3));
    }

    #[test]
    fn test_corrupt_watchlist_reads_empty() {
        let (watchlist, store) = watchlist();
        store.set(WATCHLIST_KEY, "\"oops\"").unwrap();
        assert!(watchlist.list().is_empty());

        // Next write replaces the corrupt value
        assert_eq!(watchlist.toggle(7, WatchlistAction::Add).unwrap(), vec![7]);
    }

    #[test]
    fn test_clear() {
        let (watchlist, _) = watchlist();
        watchlist.toggle(1, WatchlistAction::Add).unwrap();
        watchlist.clear().unwrap();
        assert!(watchlist.list().is_empty());
    }
}
