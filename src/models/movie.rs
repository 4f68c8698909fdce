use serde::{Deserialize, Serialize};

/// One movie proposed by the AI model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSuggestion {
    pub title: String,
    pub year: i32,
    pub description: String,
    /// Score on a 0-10 scale
    pub rating: f64,
}

impl MovieSuggestion {
    pub fn new(title: impl Into<String>, year: i32, description: impl Into<String>, rating: f64) -> Self {
        Self {
            title: title.into(),
            year,
            description: description.into(),
            rating,
        }
    }

    /// Whether both suggestions name the same release
    pub fn same_movie(&self, other: &MovieSuggestion) -> bool {
        self.year == other.year && self.title == other.title
    }
}

/// Poster and trailer found for a suggestion. Both keys are always serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieMetadata {
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
}

impl MovieMetadata {
    pub fn is_empty(&self) -> bool {
        self.poster_url.is_none() && self.trailer_url.is_none()
    }
}

/// A suggestion together with its metadata, as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedMovie {
    #[serde(flatten)]
    pub movie: MovieSuggestion,
    #[serde(flatten)]
    pub metadata: MovieMetadata,
}

/// Contents of the JSON store file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreDocument {
    /// Last generated batch, replaced on every run
    #[serde(default)]
    pub recommendations: Vec<MovieSuggestion>,
    /// Movies the user chose to keep, in insertion order
    #[serde(default)]
    pub favorites: Vec<MovieSuggestion>,
}

impl StoreDocument {
    /// Appends `movie` unless a structurally equal entry is already stored
    pub fn add_favorite(&mut self, movie: MovieSuggestion) -> bool {
        if self.favorites.contains(&movie) {
            return false;
        }
        self.favorites.push(movie);
        true
    }
}
