//! File loading abstraction for dependency configuration content.
//!
//! Provides a trait for loading file content without coupling the command
//! layer to the local filesystem, so tests can substitute fixtures.

use async_trait::async_trait;
use log::*;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::Result;

/// Abstraction for loading file content from a source.
#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Load the content of a file from the source.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(String))` - File was found and content loaded successfully
    /// * `Ok(None)` - File does not exist at the specified path
    /// * `Err(_)` - An error occurred while attempting to load the file
    async fn load_file(&self, path: &Path) -> Result<Option<String>>;
}

/// Loads files relative to a root directory on the local filesystem.
pub struct LocalFileLoader {
    root: PathBuf,
}

impl LocalFileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileLoader for LocalFileLoader {
    async fn load_file(&self, path: &Path) -> Result<Option<String>> {
        let full_path = self.root.join(path);

        if !fs::try_exists(&full_path).await? {
            debug!("no file found at {}", full_path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&full_path).await?;
        Ok(Some(content))
    }
}
