use std::sync::Arc;

use crate::{
    models::{EnrichedMovie, Language, MovieMetadata, MovieSuggestion, TmdbVideo},
    services::providers::MetadataProvider,
};

/// Accepted distance between the suggested year and the release year
pub const YEAR_TOLERANCE: i32 = 1;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const TRAILER_BASE_URL: &str = "https://www.youtube.com/embed/";

/// Finds poster and trailer URLs for suggested movies.
///
/// Enrichment is optional: every failure is logged and turned into an empty
/// [`MovieMetadata`], so lookups never fail.
#[derive(Clone)]
pub struct MetadataLookup {
    provider: Arc<dyn MetadataProvider>,
}

impl MetadataLookup {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    pub async fn lookup(&self, title: &str, year: i32, language: Language) -> MovieMetadata {
        let candidates = match self.provider.search_movies(title, language).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(error = %e, title = %title, year, "Metadata search failed");
                return MovieMetadata::default();
            }
        };

        // First acceptable hit in service order, not the closest one
        let Some(matched) = candidates.iter().find(|candidate| {
            candidate
                .release_year()
                .is_some_and(|release| (release - year).abs() <= YEAR_TOLERANCE)
        }) else {
            tracing::debug!(
                title = %title,
                year,
                candidates = candidates.len(),
                "No release within tolerance"
            );
            return MovieMetadata::default();
        };

        let details = match self.provider.movie_details(matched.id, language).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(error = %e, movie_id = matched.id, "Metadata details failed");
                return MovieMetadata::default();
            }
        };

        let videos = self
            .provider
            .movie_videos(matched.id, language)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, movie_id = matched.id, "Metadata videos failed");
                Vec::new()
            });

        let metadata = MovieMetadata {
            poster_url: details
                .poster_path
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(poster_url),
            trailer_url: first_trailer(&videos).map(trailer_url),
        };

        tracing::debug!(
            title = %title,
            matched_title = %matched.title.as_deref().unwrap_or_default(),
            movie_id = matched.id,
            poster = metadata.poster_url.is_some(),
            trailer = metadata.trailer_url.is_some(),
            "Metadata resolved"
        );

        metadata
    }

    pub async fn enrich(&self, movie: MovieSuggestion, language: Language) -> EnrichedMovie {
        let metadata = self.lookup(&movie.title, movie.year, language).await;
        EnrichedMovie { movie, metadata }
    }

    /// Looks up each movie in turn, keeping the input order
    pub async fn enrich_all(
        &self,
        movies: Vec<MovieSuggestion>,
        language: Language,
    ) -> Vec<EnrichedMovie> {
        let mut enriched = Vec::with_capacity(movies.len());
        for movie in movies {
            enriched.push(self.enrich(movie, language).await);
        }
        enriched
    }
}

fn first_trailer(videos: &[TmdbVideo]) -> Option<&str> {
    videos
        .iter()
        .find(|video| {
            video.site == "YouTube" && video.video_type == "Trailer" && !video.key.is_empty()
        })
        .map(|video| video.key.as_str())
}

fn poster_url(path: &str) -> String {
    format!("{}{}", POSTER_BASE_URL, path)
}

fn trailer_url(key: &str) -> String {
    format!("{}{}", TRAILER_BASE_URL, key)
}
