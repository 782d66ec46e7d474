use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{AppError, AppResult};
use crate::models::Article;

/// Append-only list of delivered articles kept in one pretty-printed JSON file.
///
/// The whole file is read at the start of a cycle and rewritten in place when
/// a cycle finds new articles. There is no temp-file-then-rename and no lock:
/// one process owns the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored article. A missing file is an empty store.
    pub async fn load(&self) -> AppResult<Vec<Article>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Store file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(AppError::store("read", self.display(), e)),
        };

        serde_json::from_slice(&bytes).map_err(|e| AppError::store("parse", self.display(), e))
    }

    /// Overwrite the file with `articles`, creating parent directories first
    pub async fn save(&self, articles: &[Article]) -> AppResult<()> {
        let data = serde_json::to_vec_pretty(articles)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::store("write", self.display(), e))?;
        }

        tokio::fs::write(&self.path, data)
            .await
            .map_err(|e| AppError::store("write", self.display(), e))?;

        tracing::debug!(path = %self.path.display(), count = articles.len(), "Store saved");
        Ok(())
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}
