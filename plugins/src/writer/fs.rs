use std::path::{Path, PathBuf};

use async_trait::async_trait;
use enkai_core::api::{OutputWriter, WriteError};

/// Writes payloads to the local filesystem, creating parent directories.
/// Relative destinations resolve against `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FsOutputWriter {
    root: Option<PathBuf>,
}

impl FsOutputWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, destination: &str) -> Result<PathBuf, WriteError> {
        let trimmed = destination.trim();
        if trimmed.is_empty() {
            return Err(WriteError::InvalidDestination(
                "destination is empty".to_string(),
            ));
        }
        let path = Path::new(trimmed);
        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        })
    }
}

#[async_trait]
impl OutputWriter for FsOutputWriter {
    fn name(&self) -> &str {
        "fs"
    }

    async fn write(&self, destination: &str, payload: &str) -> Result<(), WriteError> {
        let path = self.resolve(destination)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| WriteError::io(destination, e))?;
        }
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| WriteError::io(destination, e))?;

        tracing::debug!(path = %path.display(), bytes = payload.len(), "payload written");
        Ok(())
    }
}
