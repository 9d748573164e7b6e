pub mod filter;
pub mod history;
pub mod pagination;
pub mod preferences;
pub mod recommend;
pub mod storage;
pub mod watchlist;

pub use filter::{filter_movies, MovieFilter};
pub use history::{record_watch, LocalWatchHistory, WatchHistoryStore, WATCH_HISTORY_KEY};
pub use pagination::{page_window, PageSlot};
pub use preferences::{compute_genre_preferences, top_genres, GenreScores};
pub use recommend::{rank_candidates, Recommender, RecommenderOptions};
pub use storage::{FileStore, LocalStore, MemoryStore};
pub use watchlist::{Watchlist, WatchlistAction, WATCHLIST_KEY};

#[cfg(test)]
pub(crate) mod test_support;
