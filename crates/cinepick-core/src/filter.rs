use cinepick_models::{GenreId, Movie};
use serde::{Deserialize, Serialize};

/// Listing filter: minimum vote average and an optional genre
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieFilter {
    #[serde(default)]
    pub min_rating: f64,
    #[serde(default)]
    pub genre: Option<GenreId>,
}

impl MovieFilter {
    pub fn is_active(&self) -> bool {
        self.min_rating > 0.0 || self.genre.is_some()
    }

    /// Unrated movies (vote average 0) are not held to `min_rating`
    pub fn matches(&self, movie: &Movie) -> bool {
        let rated = movie.vote_average > 0.0;
        if self.min_rating > 0.0 && rated && movie.vote_average < self.min_rating {
            return false;
        }
        match self.genre {
            Some(genre) => movie.genre_ids.contains(&genre),
            None => true,
        }
    }
}

pub fn filter_movies(movies: &[Movie], filter: &MovieFilter) -> Vec<Movie> {
    movies.iter().filter(|m| filter.matches(m)).cloned().collect()
}
