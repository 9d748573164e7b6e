use async_trait::async_trait;
use cinepick_models::{GenreId, Movie, MoviePage, WatchHistoryItem};
use cinepick_sources::{MovieCatalog, SourceError};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub fn movie(id: u64, vote_average: f64, genre_ids: &[GenreId]) -> Movie {
    Movie {
        id,
        title: format!("Movie {}", id),
        overview: String::new(),
        release_date: None,
        poster_path: None,
        backdrop_path: None,
        genre_ids: genre_ids.to_vec(),
        vote_average,
        vote_count: 0,
        popularity: 0.0,
        original_language: None,
    }
}

pub fn history_item(movie_id: u64, timestamp: i64, genres: &[GenreId], rating: f64) -> WatchHistoryItem {
    WatchHistoryItem {
        movie_id,
        timestamp,
        genres: genres.to_vec(),
        rating,
    }
}

pub fn page(results: Vec<Movie>) -> MoviePage {
    MoviePage {
        page: 1,
        total_results: results.len() as u64,
        total_pages: 5,
        results,
    }
}

/// Catalog serving canned pages and recording genre requests
#[derive(Default)]
pub struct FakeCatalog {
    pub popular: Option<MoviePage>,
    pub by_genre: HashMap<GenreId, MoviePage>,
    pub failing_genres: HashSet<GenreId>,
    pub genre_calls: Mutex<Vec<GenreId>>,
}

impl FakeCatalog {
    pub fn with_popular(popular: MoviePage) -> Self {
        Self {
            popular: Some(popular),
            ..Self::default()
        }
    }

    pub fn genre(mut self, genre: GenreId, results: Vec<Movie>) -> Self {
        self.by_genre.insert(genre, page(results));
        self
    }

    pub fn failing(mut self, genre: GenreId) -> Self {
        self.failing_genres.insert(genre);
        self
    }

    pub fn requested_genres(&self) -> Vec<GenreId> {
        let mut calls = self.genre_calls.lock().unwrap().clone();
        calls.sort_unstable();
        calls
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    fn catalog_name(&self) -> &str {
        "fake"
    }

    async fn popular_movies(&self, _page: u32) -> Result<MoviePage, SourceError> {
        self.popular.clone().ok_or_else(|| SourceError::Status {
            endpoint: "/movie/popular".to_string(),
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn movies_by_genre(&self, genre_id: GenreId, _page: u32) -> Result<MoviePage, SourceError> {
        self.genre_calls.lock().unwrap().push(genre_id);
        if self.failing_genres.contains(&genre_id) {
            return Err(SourceError::malformed("/discover/movie", "boom"));
        }
        Ok(self.by_genre.get(&genre_id).cloned().unwrap_or_else(MoviePage::empty))
    }
}
