/// TMDb (The Movie Database) provider
///
/// API flow for one suggestion:
/// 1. /search/movie → candidate ids with release dates
/// 2. /movie/{id} → poster path
/// 3. /movie/{id}/videos → trailer key
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    config::TmdbConfig,
    error::{AppError, AppResult},
    models::{
        Language, TmdbMovie, TmdbMovieDetails, TmdbSearchResponse, TmdbVideo, TmdbVideosResponse,
    },
    services::providers::MetadataProvider,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    config: TmdbConfig,
}

impl TmdbProvider {
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(self.endpoint(path))
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDb API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_movies(&self, title: &str, language: Language) -> AppResult<Vec<TmdbMovie>> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let response: TmdbSearchResponse = self
            .get_json(
                "/search/movie",
                &[("query", title), ("language", language.code())],
            )
            .await?;

        tracing::debug!(
            query = %title,
            language = %language,
            results = response.results.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(response.results)
    }

    async fn movie_details(
        &self,
        movie_id: u64,
        language: Language,
    ) -> AppResult<TmdbMovieDetails> {
        self.get_json(
            &format!("/movie/{}", movie_id),
            &[("language", language.code())],
        )
        .await
    }

    async fn movie_videos(&self, movie_id: u64, language: Language) -> AppResult<Vec<TmdbVideo>> {
        let response: TmdbVideosResponse = self
            .get_json(
                &format!("/movie/{}/videos", movie_id),
                &[("language", language.code())],
            )
            .await?;

        Ok(response.results)
    }
}
