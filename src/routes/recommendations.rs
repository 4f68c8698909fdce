use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{EnrichedMovie, Era, Language, Preferences, Style, DEFAULT_COUNT},
    routes::AppState,
    services::RecommendationRequest,
};

/// Body of a form submission
#[derive(Debug, Deserialize)]
pub struct RecommendationForm {
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub era: Era,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub count: Option<u8>,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    #[serde(default)]
    pub language: Option<Language>,
}

/// Handler for generating a new batch
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RecommendationForm>,
) -> AppResult<Json<Vec<EnrichedMovie>>> {
    let request = RecommendationRequest {
        preferences: Preferences::new(form.genre, form.era, form.style),
        count: form.count.unwrap_or(DEFAULT_COUNT),
        language: form.language.unwrap_or(state.default_language),
    };

    tracing::info!(
        genre = %request.preferences.genre_label(),
        count = request.count,
        language = %request.language,
        "Processing recommendation request"
    );

    let movies = state.service.recommend(request).await?;

    Ok(Json(movies))
}

/// Handler returning the last saved batch
pub async fn last(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LanguageQuery>,
) -> AppResult<Json<Vec<EnrichedMovie>>> {
    let language = query.language.unwrap_or(state.default_language);
    let movies = state.service.last_recommendations(language).await?;
    Ok(Json(movies))
}
