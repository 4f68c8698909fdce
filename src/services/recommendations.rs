use serde::{Deserialize, Serialize};

use crate::{
    db::JsonStore,
    error::AppResult,
    models::{EnrichedMovie, Language, MovieSuggestion, Preferences},
    services::{generator::RecommendationGenerator, lookup::MetadataLookup},
};

/// One submission of the recommendation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub preferences: Preferences,
    pub count: u8,
    pub language: Language,
}

/// Result of pressing "add to favorites"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteOutcome {
    /// False when an identical entry was already stored
    pub added: bool,
    pub favorites: Vec<MovieSuggestion>,
}

/// Runs the generate → save → enrich pipeline and manages favorites
#[derive(Clone)]
pub struct RecommendationService {
    generator: RecommendationGenerator,
    lookup: MetadataLookup,
    store: JsonStore,
}

impl RecommendationService {
    pub fn new(generator: RecommendationGenerator, lookup: MetadataLookup, store: JsonStore) -> Self {
        Self {
            generator,
            lookup,
            store,
        }
    }

    /// Generates a fresh batch, replaces the stored one and enriches each movie.
    ///
    /// Generation and store failures propagate; metadata failures only leave
    /// the poster or trailer empty.
    pub async fn recommend(&self, request: RecommendationRequest) -> AppResult<Vec<EnrichedMovie>> {
        let movies = self
            .generator
            .generate(&request.preferences, request.count)
            .await?;

        self.store.save_recommendations(&movies).await?;

        let enriched = self.lookup.enrich_all(movies, request.language).await;

        tracing::info!(
            count = enriched.len(),
            without_metadata = enriched.iter().filter(|m| m.metadata.is_empty()).count(),
            language = %request.language,
            "Recommendations ready"
        );

        Ok(enriched)
    }

    /// Last saved batch, enriched again in `language`
    pub async fn last_recommendations(&self, language: Language) -> AppResult<Vec<EnrichedMovie>> {
        let movies = self.store.recommendations().await?;
        Ok(self.lookup.enrich_all(movies, language).await)
    }

    pub async fn add_favorite(&self, movie: MovieSuggestion) -> AppResult<FavoriteOutcome> {
        let (added, favorites) = self.store.add_favorite(movie).await?;
        Ok(FavoriteOutcome { added, favorites })
    }

    /// Favorites as currently stored on disk
    pub async fn favorites(&self) -> AppResult<Vec<MovieSuggestion>> {
        self.store.favorites().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Era, Style};
    use crate::services::providers::{MockCompletionProvider, MockMetadataProvider};
    use std::sync::Arc;

    const THREE_COMEDIES: &str = r#"[
        {"title": "Paddington 2", "year": 2017, "description": "A bear.", "rating": 7.8},
        {"title": "The Grand Budapest Hotel", "year": 2014, "description": "A concierge.", "rating": 8.1},
        {"title": "Groundhog Day", "year": 1993, "description": "A loop.", "rating": 8.0}
    ]"#;

    fn offline_metadata() -> MockMetadataProvider {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_movies()
            .returning(|_, _| Err(AppError::ExternalApi("offline".to_string())));
        provider
    }

    fn service(reply: &'static str, dir: &tempfile::TempDir) -> RecommendationService {
        let mut completion = MockCompletionProvider::new();
        completion
            .expect_complete_json()
            .returning(move |_| Ok(reply.to_string()));

        RecommendationService::new(
            RecommendationGenerator::new(Arc::new(completion)),
            MetadataLookup::new(Arc::new(offline_metadata())),
            JsonStore::new(dir.path().join("store.json")),
        )
    }

    fn comedy_request(count: u8) -> RecommendationRequest {
        RecommendationRequest {
            preferences: Preferences::new("comedy", Era::Any, Style::Light),
            count,
            language: Language::EnUs,
        }
    }

    #[tokio::test]
    async fn test_recommend_saves_batch_and_leaves_favorites() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(THREE_COMEDIES, &dir);
        let up = MovieSuggestion::new("Up", 2009, "Balloons", 8.0);
        service.add_favorite(up.clone()).await.unwrap();

        let enriched = service.recommend(comedy_request(3)).await.unwrap();

        assert_eq!(enriched.len(), 3);
        assert!(enriched.iter().all(|m| m.metadata.is_empty()));

        let stored = service.last_recommendations(Language::EnUs).await.unwrap();
        let stored: Vec<MovieSuggestion> = stored.into_iter().map(|m| m.movie).collect();
        let returned: Vec<MovieSuggestion> = enriched.into_iter().map(|m| m.movie).collect();
        assert_eq!(stored, returned);
        assert_eq!(service.favorites().await.unwrap(), vec![up]);
    }

    #[tokio::test]
    async fn test_generation_failure_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let good = service(THREE_COMEDIES, &dir);
        good.recommend(comedy_request(3)).await.unwrap();

        let broken = service("not json at all", &dir);
        let result = broken.recommend(comedy_request(3)).await;
        assert!(matches!(result, Err(AppError::Generation { .. })));

        let stored = broken.last_recommendations(Language::EnUs).await.unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[tokio::test]
    async fn test_favorite_twice_stores_once() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(THREE_COMEDIES, &dir);
        let up = MovieSuggestion::new("Up", 2009, "...", 8.0);

        let first = service.add_favorite(up.clone()).await.unwrap();
        let second = service.add_favorite(up).await.unwrap();

        assert!(first.added);
        assert!(!second.added);
        assert_eq!(second.favorites.len(), 1);
        assert_eq!(second.favorites[0].title, "Up");
    }
}
