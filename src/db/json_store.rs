use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error::AppResult,
    models::{MovieSuggestion, StoreDocument},
};

/// JSON file holding the last recommendation batch and the user's favorites
///
/// Every operation re-reads the file, so edits made on disk between calls are
/// picked up. Writes rewrite the whole document and are not atomic, so every
/// read and write goes through one lock. The lock only orders requests inside
/// this process.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, creating an empty one first if the file is absent
    pub async fn load(&self) -> AppResult<StoreDocument> {
        let _guard = self.lock.lock().await;
        self.load_locked().await
    }

    pub async fn recommendations(&self) -> AppResult<Vec<MovieSuggestion>> {
        Ok(self.load().await?.recommendations)
    }

    pub async fn favorites(&self) -> AppResult<Vec<MovieSuggestion>> {
        Ok(self.load().await?.favorites)
    }

    /// Replaces the stored recommendation batch wholesale
    pub async fn save_recommendations(&self, movies: &[MovieSuggestion]) -> AppResult<()> {
        let _guard = self.lock.lock().await;

        let mut document = self.load_locked().await?;
        document.recommendations = movies.to_vec();
        self.write(&document).await?;

        tracing::info!(
            path = %self.path.display(),
            count = movies.len(),
            "Recommendations saved"
        );

        Ok(())
    }

    /// Appends `movie` to favorites unless an identical entry exists.
    /// Returns the updated favorites and whether the movie was added.
    pub async fn add_favorite(
        &self,
        movie: MovieSuggestion,
    ) -> AppResult<(bool, Vec<MovieSuggestion>)> {
        let _guard = self.lock.lock().await;

        let mut document = self.load_locked().await?;

        if document
            .favorites
            .iter()
            .any(|f| f.same_movie(&movie) && *f != movie)
        {
            tracing::debug!(
                title = %movie.title,
                year = movie.year,
                "Favorite with same title and year but different fields stored separately"
            );
        }

        let added = document.add_favorite(movie);
        self.write(&document).await?;

        tracing::info!(
            path = %self.path.display(),
            added,
            favorites = document.favorites.len(),
            "Favorite processed"
        );

        Ok((added, document.favorites))
    }

    /// Caller must hold `lock`
    async fn load_locked(&self) -> AppResult<StoreDocument> {
        self.initialize().await?;
        self.read().await
    }

    async fn initialize(&self) -> AppResult<()> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tracing::info!(path = %self.path.display(), "Creating empty store");
        self.write(&StoreDocument::default()).await
    }

    async fn read(&self) -> AppResult<StoreDocument> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let document = serde_json::from_str(&raw)?;
        Ok(document)
    }

    async fn write(&self, document: &StoreDocument) -> AppResult<()> {
        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
