use anyhow::Result;
use chrono::Utc;
use cinepick_config::RecommendationConfig;
use cinepick_models::{
    normalize_rating, Movie, MovieId, MoviePage, RecommendationResult, WatchHistoryItem, Watchable,
    DEFAULT_RATING, WATCH_HISTORY_LIMIT,
};
use cinepick_sources::{MovieCatalog, SourceError};
use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};
use crate::history::{record_watch, WatchHistoryStore};
use crate::preferences::{compute_genre_preferences, top_genres};

#[derive(Debug, Clone)]
pub struct RecommenderOptions {
    pub history_limit: usize,
    pub top_genres: usize,
    pub max_results: usize,
    pub default_rating: f64,
}

impl Default for RecommenderOptions {
    fn default() -> Self {
        Self {
            history_limit: WATCH_HISTORY_LIMIT,
            top_genres: 3,
            max_results: 20,
            default_rating: DEFAULT_RATING,
        }
    }
}

impl From<&RecommendationConfig> for RecommenderOptions {
    fn from(config: &RecommendationConfig) -> Self {
        Self {
            history_limit: config.history_limit,
            top_genres: config.top_genres,
            max_results: config.max_results,
            default_rating: config.default_rating,
        }
    }
}

/// Turns the local watch history into movie recommendations.
///
/// Holds no state between calls; the history lives in the injected store.
/// Genre pages are fetched concurrently and awaited together: one failed
/// request fails the batch, and the batch failure falls back to popular
/// movies. There is no per-request retry.
pub struct Recommender {
    catalog: Arc<dyn MovieCatalog>,
    history: Arc<dyn WatchHistoryStore>,
    options: RecommenderOptions,
}

impl Recommender {
    pub fn new(catalog: Arc<dyn MovieCatalog>, history: Arc<dyn WatchHistoryStore>) -> Self {
        Self::with_options(catalog, history, RecommenderOptions::default())
    }

    pub fn with_options(
        catalog: Arc<dyn MovieCatalog>,
        history: Arc<dyn WatchHistoryStore>,
        options: RecommenderOptions,
    ) -> Self {
        Self { catalog, history, options }
    }

    /// Personalised recommendations, or popular movies (page 1) when there is
    /// no usable history or anything goes wrong on the personalised path.
    ///
    /// Only a failure of the popular-movies request itself is returned as an error.
    pub async fn get_recommendations(&self) -> Result<RecommendationResult, SourceError> {
        let history = self.history.load();
        if history.is_empty() {
            info!("No watch history, recommending popular movies");
            return self.catalog.popular_movies(1).await;
        }

        match self.personalized(&history).await {
            Ok(Some(result)) => {
                info!(
                    history_len = history.len(),
                    results = result.results.len(),
                    "Personalised recommendations ready"
                );
                Ok(result)
            }
            Ok(None) => {
                info!("Watch history has no genres, recommending popular movies");
                self.catalog.popular_movies(1).await
            }
            Err(e) => {
                error!(error = %e, "Error getting recommendations, falling back to popular movies");
                self.catalog.popular_movies(1).await
            }
        }
    }

    async fn personalized(&self, history: &[WatchHistoryItem]) -> Result<Option<RecommendationResult>, SourceError> {
        let preferences = compute_genre_preferences(history);
        let genres = top_genres(&preferences, self.options.top_genres);
        if genres.is_empty() {
            return Ok(None);
        }
        debug!(genres = ?genres, "Fetching candidates for top genres");

        let pages = try_join_all(genres.iter().map(|genre| self.catalog.movies_by_genre(*genre, 1))).await?;

        let watched: HashSet<MovieId> = history.iter().map(|item| item.movie_id).collect();
        Ok(Some(rank_candidates(pages, &watched, self.options.max_results)))
    }

    /// Record a watch at the current time. Returns `false` when the movie lacks
    /// an id or genres and nothing was recorded.
    pub fn add_to_watch_history(&self, movie: &dyn Watchable, rating: Option<f64>) -> Result<bool> {
        self.add_to_watch_history_at(movie, rating, Utc::now().timestamp_millis())
    }

    pub fn add_to_watch_history_at(&self, movie: &dyn Watchable, rating: Option<f64>, timestamp: i64) -> Result<bool> {
        let (Some(movie_id), Some(genres)) = (movie.movie_id(), movie.genre_ids()) else {
            debug!("Skipping watch history entry without id or genres");
            return Ok(false);
        };

        let rating = match rating {
            Some(r) if r.is_finite() => normalize_rating(Some(r)),
            _ => normalize_rating(Some(self.options.default_rating)),
        };

        let item = WatchHistoryItem { movie_id, timestamp, genres, rating };
        let history = record_watch(self.history.load(), item, self.options.history_limit);
        self.history.save(&history)?;

        debug!(movie_id = movie_id, rating = rating, len = history.len(), "Recorded watch");
        Ok(true)
    }

    pub fn history(&self) -> Vec<WatchHistoryItem> {
        self.history.load()
    }
}

/// Merge genre pages into a ranked, deduplicated list.
///
/// Watched movies are dropped, the rest sorted by descending vote average
/// (stable), then the first occurrence of each id is kept, up to `limit`.
pub fn rank_candidates(pages: Vec<MoviePage>, watched: &HashSet<MovieId>, limit: usize) -> RecommendationResult {
    let mut candidates: Vec<Movie> = pages
        .into_iter()
        .flat_map(|page| page.results)
        .filter(|movie| !watched.contains(&movie.id))
        .collect();

    candidates.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));

    let mut seen = HashSet::new();
    candidates.retain(|movie| seen.insert(movie.id));
    candidates.truncate(limit);

    MoviePage::single(candidates)
}
