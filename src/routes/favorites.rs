use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::MovieSuggestion,
    routes::AppState,
    services::FavoriteOutcome,
};

/// Handler listing favorites straight from the store
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<MovieSuggestion>>> {
    Ok(Json(state.service.favorites().await?))
}

/// Handler for "add to favorites"
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<MovieSuggestion>,
) -> AppResult<(StatusCode, Json<FavoriteOutcome>)> {
    tracing::info!(title = %movie.title, year = movie.year, "Adding favorite");

    let outcome = state.service.add_favorite(movie).await?;
    let status = if outcome.added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome)))
}
