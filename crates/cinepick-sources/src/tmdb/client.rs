use crate::error::SourceError;
use crate::tmdb::api;
use crate::traits::MovieCatalog;
use async_trait::async_trait;
use cinepick_config::{TmdbAuth, TmdbConfig};
use cinepick_models::{Credits, Genre, GenreId, MovieDetails, MovieId, MoviePage, Video};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// TMDB refuses pages beyond this
const MAX_PAGE: u32 = 500;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    language: String,
    auth: TmdbAuth,
}

fn create_tmdb_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(concat!("cinepick/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

impl TmdbClient {
    pub fn new(auth: TmdbAuth) -> Self {
        Self::from_config(&TmdbConfig::default(), auth)
    }

    pub fn from_config(config: &TmdbConfig, auth: TmdbAuth) -> Self {
        Self {
            client: Arc::new(create_tmdb_client(Duration::from_secs(config.timeout_secs))),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            auth,
        }
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Query parameters sent with every request
    fn base_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("language", self.language.clone())];
        if let TmdbAuth::ApiKey(key) = &self.auth {
            query.push(("api_key", key.clone()));
        }
        query
    }

    async fn get_body(&self, path: &str, extra: &[(&'static str, String)]) -> Result<String, SourceError> {
        let mut query = self.base_query();
        query.extend_from_slice(extra);

        debug!(endpoint = path, params = ?extra, "TMDB request");

        let mut request = self
            .client
            .get(self.endpoint_url(path))
            .query(&query)
            .header("Accept", "application/json");
        if let TmdbAuth::AccessToken(token) = &self.auth {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(endpoint = path, status = status.as_u16(), "TMDB request failed");
            return Err(SourceError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }

    async fn get_page(&self, path: &str, page: u32, extra: &[(&'static str, String)]) -> Result<MoviePage, SourceError> {
        let mut params = vec![("page", clamp_page(page).to_string())];
        params.extend_from_slice(extra);
        let body = self.get_body(path, &params).await?;
        api::parse_page(path, &body)
    }
}

fn clamp_page(page: u32) -> u32 {
    page.clamp(1, MAX_PAGE)
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    fn catalog_name(&self) -> &str {
        "tmdb"
    }

    async fn popular_movies(&self, page: u32) -> Result<MoviePage, SourceError> {
        self.get_page("/movie/popular", page, &[]).await
    }

    async fn movies_by_genre(&self, genre_id: GenreId, page: u32) -> Result<MoviePage, SourceError> {
        self.get_page(
            "/discover/movie",
            page,
            &[
                ("with_genres", genre_id.to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ],
        )
        .await
    }

    async fn top_rated_movies(&self, page: u32) -> Result<MoviePage, SourceError> {
        self.get_page("/movie/top_rated", page, &[]).await
    }

    async fn trending_movies(&self, page: u32) -> Result<MoviePage, SourceError> {
        self.get_page("/trending/movie/week", page, &[]).await
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage, SourceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(MoviePage::empty());
        }
        self.get_page("/search/movie", page, &[("query", query.to_string())]).await
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, SourceError> {
        let path = format!("/movie/{}", id);
        let body = self.get_body(&path, &[]).await?;
        api::parse_details(&path, &body)
    }

    async fn similar_movies(&self, id: MovieId) -> Result<MoviePage, SourceError> {
        self.get_page(&format!("/movie/{}/similar", id), 1, &[]).await
    }

    async fn movie_recommendations(&self, id: MovieId) -> Result<MoviePage, SourceError> {
        self.get_page(&format!("/movie/{}/recommendations", id), 1, &[]).await
    }

    async fn movie_credits(&self, id: MovieId) -> Result<Credits, SourceError> {
        let path = format!("/movie/{}/credits", id);
        let body = self.get_body(&path, &[]).await?;
        api::parse_credits(&path, &body)
    }

    async fn movie_videos(&self, id: MovieId) -> Result<Vec<Video>, SourceError> {
        let path = format!("/movie/{}/videos", id);
        let body = self.get_body(&path, &[]).await?;
        api::parse_videos(&path, &body)
    }

    async fn genres(&self) -> Result<Vec<Genre>, SourceError> {
        let path = "/genre/movie/list";
        let body = self.get_body(path, &[]).await?;
        api::parse_genres(path, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> TmdbConfig {
        TmdbConfig {
            base_url: base_url.to_string(),
            language: "fr-FR".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let client = TmdbClient::from_config(&config("https://api.example.org/3/"), TmdbAuth::ApiKey("k".into()));
        assert_eq!(client.endpoint_url("/movie/popular"), "https://api.example.org/3/movie/popular");
    }

    #[test]
    fn test_api_key_sent_as_query_param() {
        let client = TmdbClient::from_config(&config("https://api.example.org/3"), TmdbAuth::ApiKey("secret".into()));
        let query = client.base_query();
        assert!(query.contains(&("language", "fr-FR".to_string())));
        assert!(query.contains(&("api_key", "secret".to_string())));
    }

    #[test]
    fn test_access_token_not_in_query() {
        let client = TmdbClient::new(TmdbAuth::AccessToken("token".into()));
        assert!(client.base_query().iter().all(|(name, _)| *name != "api_key"));
        assert_eq!(client.catalog_name(), "tmdb");
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0), 1);
        assert_eq!(clamp_page(7), 7);
        assert_eq!(clamp_page(10_000), MAX_PAGE);
    }

    #[tokio::test]
    async fn test_empty_search_skips_request() {
        // Unroutable base URL: any request would fail
        let client = TmdbClient::from_config(&config("http://127.0.0.1:9"), TmdbAuth::ApiKey("k".into()));
        let page = client.search_movies("   ", 1).await.unwrap();
        assert!(page.is_empty());
    }
}
