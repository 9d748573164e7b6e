//! Raw TMDB payloads and their validation into domain models.
//!
//! Every field is optional here; `into_*` conversions decide what is required.

use cinepick_models::{Credits, Genre, Movie, MovieDetails, MoviePage, Video};
use serde::Deserialize;
use tracing::debug;
use crate::error::SourceError;

#[derive(Debug, Deserialize)]
pub struct RawPage {
    page: Option<u32>,
    #[serde(default)]
    results: Vec<Option<RawMovie>>,
    total_pages: Option<u32>,
    total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RawMovie {
    id: Option<u64>,
    title: Option<String>,
    original_title: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    genre_ids: Option<Vec<u32>>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    popularity: Option<f64>,
    original_language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawDetails {
    id: Option<u64>,
    title: Option<String>,
    original_title: Option<String>,
    overview: Option<String>,
    tagline: Option<String>,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    homepage: Option<String>,
    imdb_id: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawVideos {
    #[serde(default)]
    results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct RawGenres {
    #[serde(default)]
    genres: Vec<Genre>,
}

/// Parse a response body, mapping JSON errors to `Malformed`
pub fn parse_body<T>(endpoint: &str, body: &str) -> Result<T, SourceError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(body).map_err(|e| SourceError::malformed(endpoint, e.to_string()))
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl RawMovie {
    pub fn into_movie(self, endpoint: &str) -> Result<Movie, SourceError> {
        let id = self
            .id
            .ok_or_else(|| SourceError::malformed(endpoint, "movie entry without id"))?;

        Ok(Movie {
            id,
            title: self.title.or(self.original_title).unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            release_date: non_empty(self.release_date),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            genre_ids: self.genre_ids.unwrap_or_default(),
            vote_average: finite_or_zero(self.vote_average),
            vote_count: self.vote_count.unwrap_or(0),
            popularity: finite_or_zero(self.popularity),
            original_language: self.original_language,
        })
    }
}

impl RawPage {
    /// Validate a listing page. Null entries are skipped; entries without an id fail the page.
    pub fn into_page(self, endpoint: &str) -> Result<MoviePage, SourceError> {
        let raw_count = self.results.len();
        let results = self
            .results
            .into_iter()
            .flatten()
            .map(|raw| raw.into_movie(endpoint))
            .collect::<Result<Vec<_>, _>>()?;

        if results.len() < raw_count {
            debug!(
                endpoint = endpoint,
                skipped = raw_count - results.len(),
                "Skipped null entries in listing"
            );
        }

        let page = self.page.unwrap_or(1).max(1);
        Ok(MoviePage {
            page,
            total_pages: self.total_pages.unwrap_or(page),
            total_results: self.total_results.unwrap_or(results.len() as u64),
            results,
        })
    }
}

impl RawDetails {
    pub fn into_details(self, endpoint: &str) -> Result<MovieDetails, SourceError> {
        let id = self
            .id
            .ok_or_else(|| SourceError::malformed(endpoint, "movie details without id"))?;

        Ok(MovieDetails {
            id,
            title: self.title.or(self.original_title).unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            tagline: non_empty(self.tagline),
            release_date: non_empty(self.release_date),
            runtime: self.runtime.filter(|r| *r > 0),
            genres: self.genres,
            vote_average: finite_or_zero(self.vote_average),
            vote_count: self.vote_count.unwrap_or(0),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            homepage: non_empty(self.homepage),
            imdb_id: non_empty(self.imdb_id),
            status: self.status,
        })
    }
}

impl RawVideos {
    pub fn into_videos(self) -> Vec<Video> {
        self.results
    }
}

impl RawGenres {
    pub fn into_genres(self) -> Vec<Genre> {
        self.genres
    }
}

pub fn parse_page(endpoint: &str, body: &str) -> Result<MoviePage, SourceError> {
    parse_body::<RawPage>(endpoint, body)?.into_page(endpoint)
}

pub fn parse_details(endpoint: &str, body: &str) -> Result<MovieDetails, SourceError> {
    parse_body::<RawDetails>(endpoint, body)?.into_details(endpoint)
}

pub fn parse_credits(endpoint: &str, body: &str) -> Result<Credits, SourceError> {
    parse_body::<Credits>(endpoint, body)
}

pub fn parse_videos(endpoint: &str, body: &str) -> Result<Vec<Video>, SourceError> {
    Ok(parse_body::<RawVideos>(endpoint, body)?.into_videos())
}

pub fn parse_genres(endpoint: &str, body: &str) -> Result<Vec<Genre>, SourceError> {
    Ok(parse_body::<RawGenres>(endpoint, body)?.into_genres())
}
