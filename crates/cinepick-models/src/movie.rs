use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use crate::genre::Genre;

pub type MovieId = u64;
pub type GenreId = u32;

/// A movie as it appears in list endpoints (popular, discover, search, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default)]
    pub vote_average: f64, // 0-10, missing upstream values are stored as 0
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
}

impl Movie {
    /// Release year parsed from the `YYYY-MM-DD` release date
    pub fn year(&self) -> Option<u32> {
        release_year(self.release_date.as_deref())
    }
}

/// Full movie record from the details endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>, // minutes
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl MovieDetails {
    pub fn year(&self) -> Option<u32> {
        release_year(self.release_date.as_deref())
    }

    pub fn genre_ids(&self) -> Vec<GenreId> {
        self.genres.iter().map(|g| g.id).collect()
    }
}

fn release_year(date: Option<&str>) -> Option<u32> {
    let date = NaiveDate::parse_from_str(date?, "%Y-%m-%d").ok()?;
    u32::try_from(date.year()).ok()
}

/// Anything that can be recorded in the watch history.
///
/// Both accessors may return `None` for partially-known movies; recording is
/// skipped in that case.
pub trait Watchable {
    fn movie_id(&self) -> Option<MovieId>;
    fn genre_ids(&self) -> Option<Vec<GenreId>>;
}

impl Watchable for Movie {
    fn movie_id(&self) -> Option<MovieId> {
        Some(self.id)
    }

    fn genre_ids(&self) -> Option<Vec<GenreId>> {
        Some(self.genre_ids.clone())
    }
}

impl Watchable for MovieDetails {
    fn movie_id(&self) -> Option<MovieId> {
        Some(self.id)
    }

    fn genre_ids(&self) -> Option<Vec<GenreId>> {
        Some(MovieDetails::genre_ids(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserialize_with_missing_optional_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 550, "title": "Fight Club"}"#).unwrap();
        assert_eq!(movie.id, 550);
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_release_year() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": 1, "title": "Heat", "release_date": "1995-12-15"}"#,
        )
        .unwrap();
        assert_eq!(movie.year(), Some(1995));

        let empty: Movie = serde_json::from_str(r#"{"id": 2, "title": "TBA", "release_date": ""}"#).unwrap();
        assert_eq!(empty.year(), None);
    }

    #[test]
    fn test_details_genre_ids() {
        let details: MovieDetails = serde_json::from_str(
            r#"{"id": 603, "title": "The Matrix", "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]}"#,
        )
        .unwrap();
        assert_eq!(details.genre_ids(), vec![28, 878]);
        assert_eq!(Watchable::movie_id(&details), Some(603));
    }
}
