use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    models::{Era, Language, Style, DEFAULT_COUNT, MAX_COUNT, MIN_COUNT},
    routes::AppState,
};

#[derive(Debug, Serialize)]
pub struct Choice<T> {
    pub value: T,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CountRange {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

/// Everything a client needs to draw the recommendation form
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub eras: Vec<Choice<Era>>,
    pub styles: Vec<Choice<Style>>,
    pub languages: Vec<Language>,
    pub default_language: Language,
    pub count: CountRange,
}

pub async fn form_options(State(state): State<Arc<AppState>>) -> Json<FormOptions> {
    Json(FormOptions {
        eras: Era::ALL
            .iter()
            .map(|era| Choice {
                value: *era,
                label: era.label(),
            })
            .collect(),
        styles: Style::ALL
            .iter()
            .map(|style| Choice {
                value: *style,
                label: style.label(),
            })
            .collect(),
        languages: Language::ALL.to_vec(),
        default_language: state.default_language,
        count: CountRange {
            min: MIN_COUNT,
            max: MAX_COUNT,
            default: DEFAULT_COUNT,
        },
    })
}
