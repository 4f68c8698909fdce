/// Google Gemini provider
///
/// Calls `generateContent` with `responseMimeType: application/json` so the
/// model replies with a bare JSON body instead of prose.
use reqwest::Client as HttpClient;

use crate::{
    config::GeminiConfig,
    error::{AppError, AppResult},
    models::{GeminiRequest, GeminiResponse},
    services::providers::CompletionProvider,
};

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url, self.config.model
        )
    }

    /// Pulls the model's text out of a generateContent response body
    fn extract_text(body: &str) -> AppResult<String> {
        let response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
            AppError::generation_with_response(
                format!("Failed to parse Gemini response envelope: {}", e),
                body,
            )
        })?;

        if let Some(text) = response.text() {
            return Ok(text);
        }

        let block_reason = response
            .prompt_feedback
            .and_then(|pf| pf.block_reason)
            .or_else(|| {
                response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
            })
            .unwrap_or_else(|| "unknown".to_string());

        Err(AppError::generation_with_response(
            format!("Gemini returned no text (reason: {})", block_reason),
            body,
        ))
    }
}

#[async_trait::async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete_json(&self, prompt: &str) -> AppResult<String> {
        let url = self.endpoint();

        tracing::info!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            provider = "gemini",
            "Calling Gemini"
        );

        // Header auth keeps the key out of logged URLs
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&GeminiRequest::json_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "Gemini request rejected");
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        tracing::debug!(response = %body, "Raw Gemini response");

        let text = Self::extract_text(&body)?;

        tracing::info!(
            model = %self.config.model,
            response_len = text.len(),
            provider = "gemini",
            "Gemini completion received"
        );

        Ok(text)
    }
}
