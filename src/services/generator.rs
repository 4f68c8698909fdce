use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::{
    error::{AppError, AppResult},
    models::{validate_count, MovieSuggestion, Preferences},
    services::providers::CompletionProvider,
};

/// Turns form preferences into AI-proposed movies
#[derive(Clone)]
pub struct RecommendationGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl RecommendationGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Asks the AI endpoint for exactly `count` movies matching `preferences`.
    ///
    /// Fails if the reply is not a JSON array, if any item lacks one of the
    /// four fields, or if fewer than `count` items come back. Extra items
    /// are dropped.
    pub async fn generate(
        &self,
        preferences: &Preferences,
        count: u8,
    ) -> AppResult<Vec<MovieSuggestion>> {
        let count = validate_count(count)?;
        let prompt = build_prompt(preferences, count);

        tracing::info!(
            genre = %preferences.genre_label(),
            era = ?preferences.era,
            style = ?preferences.style,
            count,
            "Generating recommendations"
        );

        let raw = self.provider.complete_json(&prompt).await.map_err(|e| match e {
            AppError::Generation { .. } => e,
            other => AppError::generation(format!("Failed to generate recommendations: {}", other)),
        })?;

        let mut movies = parse_suggestions(&raw)?;
        let requested = usize::from(count);

        if movies.len() < requested {
            return Err(AppError::generation_with_response(
                format!(
                    "Expected {} movies but the model returned {}",
                    requested,
                    movies.len()
                ),
                raw,
            ));
        }

        if movies.len() > requested {
            tracing::warn!(
                requested,
                returned = movies.len(),
                "Model returned extra movies, truncating"
            );
            movies.truncate(requested);
        }

        tracing::info!(count = movies.len(), "Recommendations generated");

        Ok(movies)
    }
}

/// Natural-language instruction sent to the model
pub fn build_prompt(preferences: &Preferences, count: u8) -> String {
    let prefs = json!({
        "genre": preferences.genre_label(),
        "era": preferences.era.label(),
        "style": preferences.style.label(),
    });

    format!(
        r#"Based on the preferences below, suggest exactly {count} movies.

Preferences:
{prefs}

Respond ONLY with a JSON array in this format:
[
  {{
    "title": "Movie title",
    "year": 2020,
    "description": "Short description",
    "rating": 8
  }}
]
"#
    )
}

/// Parses the model's reply into suggestions, checking every item's shape
pub fn parse_suggestions(raw: &str) -> AppResult<Vec<MovieSuggestion>> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(|e| {
        tracing::error!(error = %e, response = %raw, "Model response is not valid JSON");
        AppError::generation_with_response(
            format!("Failed to decode JSON from the model: {}", e),
            raw,
        )
    })?;

    let items = value.as_array().ok_or_else(|| {
        AppError::generation_with_response("Response is not a list of movies", raw)
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse_item(item).map_err(|reason| {
                AppError::generation_with_response(
                    format!("Movie at index {} is malformed: {}", index, reason),
                    raw,
                )
            })
        })
        .collect()
}

fn parse_item(item: &Value) -> Result<MovieSuggestion, String> {
    let object = item
        .as_object()
        .ok_or_else(|| "expected an object".to_string())?;

    let title = required(object, "title")?
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "`title` must be a non-empty string".to_string())?;

    let year = required(object, "year")?;
    let year = year
        .as_i64()
        .or_else(|| year.as_f64().filter(|y| y.fract() == 0.0).map(|y| y as i64))
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| "`year` must be an integer".to_string())?;

    let description = required(object, "description")?
        .as_str()
        .ok_or_else(|| "`description` must be a string".to_string())?;

    let rating = required(object, "rating")?
        .as_f64()
        .ok_or_else(|| "`rating` must be a number".to_string())?;
    if !(0.0..=10.0).contains(&rating) {
        return Err(format!("`rating` must be between 0 and 10, got {}", rating));
    }

    Ok(MovieSuggestion::new(title, year, description, rating))
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value, String> {
    object
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| format!("missing `{}`", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Era, Style};
    use crate::services::providers::MockCompletionProvider;

    fn comedy() -> Preferences {
        Preferences::new("comedy", Era::Any, Style::Light)
    }

    fn reply(count: usize) -> String {
        let items: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "title": format!("Movie {}", i),
                    "year": 2000 + i as i64,
                    "description": "Funny",
                    "rating": 7
                })
            })
            .collect();
        Value::Array(items).to_string()
    }

    fn generator_replying(body: String) -> RecommendationGenerator {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete_json()
            .times(1)
            .returning(move |_| Ok(body.clone()));
        RecommendationGenerator::new(Arc::new(provider))
    }

    #[test]
    fn test_prompt_mentions_count_and_preferences() {
        let prompt = build_prompt(
            &Preferences::new("sci-fi", Era::Before2000, Style::Emotional),
            7,
        );
        assert!(prompt.contains("exactly 7 movies"));
        assert!(prompt.contains(r#""genre":"sci-fi""#));
        assert!(prompt.contains(r#""era":"Before 2000""#));
        assert!(prompt.contains(r#""style":"Emotional""#));
        assert!(prompt.contains(r#""description": "Short description""#));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt(&comedy(), 3), build_prompt(&comedy(), 3));
    }

    #[test]
    fn test_parse_valid_reply() {
        let movies = parse_suggestions(
            r#"[{"title": "Up", "year": 2009, "description": "Balloons", "rating": 8.3}]"#,
        )
        .unwrap();
        assert_eq!(movies, vec![MovieSuggestion::new("Up", 2009, "Balloons", 8.3)]);
    }

    #[test]
    fn test_parse_rejects_non_json_and_keeps_raw() {
        match parse_suggestions("Sure! Here are some movies") {
            Err(AppError::Generation { raw_response, .. }) => {
                assert_eq!(raw_response.as_deref(), Some("Sure! Here are some movies"));
            }
            other => panic!("expected generation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_list() {
        let result = parse_suggestions(r#"{"movies": []}"#);
        match result {
            Err(AppError::Generation { message, .. }) => {
                assert!(message.contains("not a list"));
            }
            other => panic!("expected generation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let result = parse_suggestions(r#"[{"title": "Up", "year": 2009, "rating": 8}]"#);
        match result {
            Err(AppError::Generation { message, .. }) => {
                assert!(message.contains("index 0"));
                assert!(message.contains("description"));
            }
            other => panic!("expected generation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_rating() {
        let result = parse_suggestions(
            r#"[{"title": "Up", "year": 2009, "description": "x", "rating": 11}]"#,
        );
        assert!(matches!(result, Err(AppError::Generation { .. })));
    }

    #[test]
    fn test_parse_rejects_string_year() {
        let result = parse_suggestions(
            r#"[{"title": "Up", "year": "2009", "description": "x", "rating": 8}]"#,
        );
        assert!(matches!(result, Err(AppError::Generation { .. })));
    }

    #[tokio::test]
    async fn test_generate_returns_requested_count() {
        let generator = generator_replying(reply(3));
        let movies = generator.generate(&comedy(), 3).await.unwrap();
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0].title, "Movie 0");
    }

    #[tokio::test]
    async fn test_generate_truncates_extra_movies() {
        let generator = generator_replying(reply(6));
        let movies = generator.generate(&comedy(), 4).await.unwrap();
        assert_eq!(movies.len(), 4);
        assert_eq!(movies[3].title, "Movie 3");
    }

    #[tokio::test]
    async fn test_generate_fails_on_short_reply() {
        let generator = generator_replying(reply(2));
        let result = generator.generate(&comedy(), 5).await;
        assert!(matches!(result, Err(AppError::Generation { .. })));
    }

    #[tokio::test]
    async fn test_generate_rejects_count_before_calling_provider() {
        let mut provider = MockCompletionProvider::new();
        provider.expect_complete_json().never();
        let generator = RecommendationGenerator::new(Arc::new(provider));

        let result = generator.generate(&comedy(), 11).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_generate_wraps_transport_failure() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete_json()
            .returning(|_| Err(AppError::ExternalApi("503 Service Unavailable".to_string())));
        let generator = RecommendationGenerator::new(Arc::new(provider));

        match generator.generate(&comedy(), 3).await {
            Err(AppError::Generation { message, .. }) => {
                assert!(message.contains("503"));
            }
            other => panic!("expected generation error, got {:?}", other),
        }
    }
}
