use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Language,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Google Gemini API key
    #[serde(default)]
    pub gemini_api_key: String,

    /// Gemini REST base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model used for text generation
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// TMDb (v3) API key
    #[serde(default)]
    pub tmdb_api_key: String,

    /// TMDb REST base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Metadata language used when a request does not pick one
    #[serde(default)]
    pub default_language: Language,

    /// JSON document holding recommendations and favorites
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the Gemini completion client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

/// Settings for the TMDb metadata client
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub api_url: String,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_store_path() -> String {
    "recommendations.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Configuration(format!("Failed to load config: {}", e)))?;
        config.validate()
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| AppError::Configuration(format!("Failed to load config: {}", e)))?;
        config.validate()
    }

    /// Both service keys must be present and non-blank
    fn validate(self) -> AppResult<Self> {
        let mut missing = Vec::new();
        if self.gemini_api_key.trim().is_empty() {
            missing.push("GEMINI_API_KEY");
        }
        if self.tmdb_api_key.trim().is_empty() {
            missing.push("TMDB_API_KEY");
        }

        if !missing.is_empty() {
            return Err(AppError::Configuration(format!(
                "Configure GEMINI_API_KEY and TMDB_API_KEY (missing: {})",
                missing.join(", ")
            )));
        }

        Ok(self)
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            api_url: self.gemini_api_url.trim_end_matches('/').to_string(),
            model: self.gemini_model.clone(),
        }
    }

    pub fn tmdb(&self) -> TmdbConfig {
        TmdbConfig {
            api_key: self.tmdb_api_key.clone(),
            api_url: self.tmdb_api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
