/// External service abstractions
///
/// The generator talks to an AI text-completion endpoint and the lookup talks
/// to a movie-metadata endpoint. Both sit behind traits so the HTTP clients can
/// be swapped for test doubles.
use crate::{
    error::AppResult,
    models::{Language, TmdbMovie, TmdbMovieDetails, TmdbVideo},
};

pub mod gemini;
pub mod tmdb;

pub use gemini::GeminiProvider;
pub use tmdb::TmdbProvider;

/// AI endpoint that answers a prompt with a JSON-typed text body
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends `prompt` and returns the raw response text, which is expected
    /// (but not guaranteed) to be JSON.
    async fn complete_json(&self, prompt: &str) -> AppResult<String>;
}

/// Movie metadata service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Title search, results in the service's own order
    async fn search_movies(&self, title: &str, language: Language) -> AppResult<Vec<TmdbMovie>>;

    /// Full details for one movie, used for the poster path
    async fn movie_details(&self, movie_id: u64, language: Language)
        -> AppResult<TmdbMovieDetails>;

    /// Videos attached to one movie, used for the trailer
    async fn movie_videos(&self, movie_id: u64, language: Language) -> AppResult<Vec<TmdbVideo>>;
}
