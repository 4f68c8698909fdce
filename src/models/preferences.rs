use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Smallest number of movies a user may ask for
pub const MIN_COUNT: u8 = 3;
/// Largest number of movies a user may ask for
pub const MAX_COUNT: u8 = 10;
/// Count pre-selected on the form
pub const DEFAULT_COUNT: u8 = 5;

/// Release period the user is interested in
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    #[default]
    Any,
    Before2000,
    After2010,
}

impl Era {
    pub const ALL: [Era; 3] = [Era::Any, Era::Before2000, Era::After2010];

    /// Wording used inside the generation prompt
    pub fn label(&self) -> &'static str {
        match self {
            Era::Any => "No preference",
            Era::Before2000 => "Before 2000",
            Era::After2010 => "After 2010",
        }
    }
}

/// Tone of the movies the user is in the mood for
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Light,
    Emotional,
    #[default]
    Balanced,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Light, Style::Emotional, Style::Balanced];

    pub fn label(&self) -> &'static str {
        match self {
            Style::Light => "Light",
            Style::Emotional => "Emotional",
            Style::Balanced => "Balanced",
        }
    }
}

/// Locales the metadata service is queried in
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Language {
    #[default]
    #[serde(rename = "pt-PT")]
    PtPt,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::PtPt, Language::EnUs];

    /// BCP-47 code sent as the `language` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            Language::PtPt => "pt-PT",
            Language::EnUs => "en-US",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What the user filled in on the recommendation form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    /// Free-text genre, e.g. "comedy"
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub era: Era,
    #[serde(default)]
    pub style: Style,
}

impl Preferences {
    pub fn new(genre: impl Into<String>, era: Era, style: Style) -> Self {
        Self {
            genre: genre.into().trim().to_string(),
            era,
            style,
        }
    }

    /// Genre as it should read in the prompt
    pub fn genre_label(&self) -> &str {
        let genre = self.genre.trim();
        if genre.is_empty() {
            "any"
        } else {
            genre
        }
    }
}

/// Rejects counts outside the slider bounds
pub fn validate_count(count: u8) -> AppResult<u8> {
    if (MIN_COUNT..=MAX_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(AppError::InvalidInput(format!(
            "count must be between {} and {}, got {}",
            MIN_COUNT, MAX_COUNT, count
        )))
    }
}
