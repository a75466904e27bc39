use crate::domain::ports::{SharePayload, ShareSink, Storage};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::validate_storage_key;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Key-value store backed by one file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_storage_key(key)?;
        Ok(Path::new(&self.base_path).join(key))
    }
}

impl Storage for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(IntakeError::storage(key, e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| IntakeError::storage(key, e.to_string()))?;
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| IntakeError::storage(key, e.to_string()))?;
        tracing::debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(IntakeError::storage(key, e.to_string())),
        }
    }
}

/// Prints the share payload to stdout.
#[derive(Debug, Clone, Default)]
pub struct StdoutShare;

#[async_trait]
impl ShareSink for StdoutShare {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn share(&self, payload: &SharePayload) -> Result<()> {
        println!("{}\n{}\n{}", payload.title, payload.text, payload.url);
        Ok(())
    }
}

/// Stand-in for the system clipboard: overwrites a file with the share text.
#[derive(Debug, Clone)]
pub struct ClipboardFile {
    path: PathBuf,
}

impl ClipboardFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ShareSink for ClipboardFile {
    fn name(&self) -> &str {
        "clipboard-file"
    }

    async fn share(&self, payload: &SharePayload) -> Result<()> {
        tokio::fs::write(&self.path, &payload.text)
            .await
            .map_err(|e| IntakeError::ShareError {
                message: format!("{}: {}", self.path.display(), e),
            })
    }
}
