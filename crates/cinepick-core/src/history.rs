use anyhow::Result;
use cinepick_models::WatchHistoryItem;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::storage::LocalStore;

/// Fixed store key holding the JSON-encoded history
pub const WATCH_HISTORY_KEY: &str = "watchHistory";

/// Whole-list persistence for the watch history (newest first).
pub trait WatchHistoryStore: Send + Sync {
    /// Missing or unreadable history is an empty list
    fn load(&self) -> Vec<WatchHistoryItem>;
    fn save(&self, history: &[WatchHistoryItem]) -> Result<()>;
}

/// History kept as a JSON array under [`WATCH_HISTORY_KEY`] in a [`LocalStore`]
#[derive(Clone)]
pub struct LocalWatchHistory {
    store: Arc<dyn LocalStore>,
}

impl LocalWatchHistory {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(WATCH_HISTORY_KEY)
    }
}

impl WatchHistoryStore for LocalWatchHistory {
    fn load(&self) -> Vec<WatchHistoryItem> {
        let content = match self.store.get(WATCH_HISTORY_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Error reading watch history: {}", e);
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Watch history is corrupt, treating as empty: {}", e);
                return Vec::new();
            }
        };

        // A bad entry is dropped on its own; the rest of the list survives
        let total = entries.len();
        let history: Vec<WatchHistoryItem> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(index = index, "Skipping malformed watch history entry: {}", e);
                    None
                }
            })
            .collect();

        debug!("Loaded watch history ({} of {} items)", history.len(), total);
        history
    }

    fn save(&self, history: &[WatchHistoryItem]) -> Result<()> {
        let json = serde_json::to_string(history)?;
        self.store.set(WATCH_HISTORY_KEY, &json)
    }
}

/// Put `item` at the front, dropping any older entry for the same movie, and cap the list.
pub fn record_watch(
    mut history: Vec<WatchHistoryItem>,
    item: WatchHistoryItem,
    limit: usize,
) -> Vec<WatchHistoryItem> {
    history.retain(|existing| existing.movie_id != item.movie_id);
    history.insert(0, item);
    history.truncate(limit.max(1));
    history
}
