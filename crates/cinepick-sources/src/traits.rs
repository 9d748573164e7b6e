use async_trait::async_trait;
use cinepick_models::{Credits, Genre, GenreId, MovieDetails, MovieId, MoviePage, StreamSource, Video};
use crate::error::SourceError;

/// A remote movie metadata catalog.
///
/// Listing and genre discovery are required; everything else is optional and
/// reports `Unsupported` unless the catalog overrides it.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    fn catalog_name(&self) -> &str;

    async fn popular_movies(&self, page: u32) -> Result<MoviePage, SourceError>;

    async fn movies_by_genre(&self, genre_id: GenreId, page: u32) -> Result<MoviePage, SourceError>;

    async fn top_rated_movies(&self, _page: u32) -> Result<MoviePage, SourceError> {
        Err(SourceError::Unsupported("top_rated_movies"))
    }

    async fn trending_movies(&self, _page: u32) -> Result<MoviePage, SourceError> {
        Err(SourceError::Unsupported("trending_movies"))
    }

    async fn search_movies(&self, _query: &str, _page: u32) -> Result<MoviePage, SourceError> {
        Err(SourceError::Unsupported("search_movies"))
    }

    async fn movie_details(&self, _id: MovieId) -> Result<MovieDetails, SourceError> {
        Err(SourceError::Unsupported("movie_details"))
    }

    async fn similar_movies(&self, _id: MovieId) -> Result<MoviePage, SourceError> {
        Err(SourceError::Unsupported("similar_movies"))
    }

    async fn movie_recommendations(&self, _id: MovieId) -> Result<MoviePage, SourceError> {
        Err(SourceError::Unsupported("movie_recommendations"))
    }

    async fn movie_credits(&self, _id: MovieId) -> Result<Credits, SourceError> {
        Err(SourceError::Unsupported("movie_credits"))
    }

    async fn movie_videos(&self, _id: MovieId) -> Result<Vec<Video>, SourceError> {
        Err(SourceError::Unsupported("movie_videos"))
    }

    async fn genres(&self) -> Result<Vec<Genre>, SourceError> {
        Err(SourceError::Unsupported("genres"))
    }

    /// Official trailer if one exists, otherwise the embed player URL
    async fn movie_stream(&self, id: MovieId) -> Result<StreamSource, SourceError> {
        let videos = self.movie_videos(id).await?;
        Ok(StreamSource::from_videos(id, &videos))
    }
}
