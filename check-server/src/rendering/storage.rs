//! PDF file storage under the media root

use super::PDF_DIR;
use crate::utils::AppError;
use shared::models::{Check, order};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::storage(err.to_string())
    }
}

/// Rendered checks on disk
///
/// Records keep paths relative to the media root (`pdf/<file>`).
#[derive(Debug, Clone)]
pub struct CheckStorage {
    media_root: PathBuf,
}

impl CheckStorage {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    /// `{check_id}_{order_id}_{check_type}.pdf`
    pub fn file_name(check: &Check) -> String {
        let order_id = order::order_id(&check.order)
            .map(|id| sanitize(&id.to_string()))
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| "none".to_string());
        format!("{}_{}_{}.pdf", check.id, order_id, check.check_type)
    }

    /// Relative path stored in `pdf_file`
    pub fn relative_path(check: &Check) -> String {
        format!("{}/{}", PDF_DIR, Self::file_name(check))
    }

    pub fn absolute_path(&self, relative: &str) -> PathBuf {
        self.media_root.join(relative)
    }

    /// Where the check's file lives: the recorded path, else the naming rule
    pub fn locate(&self, check: &Check) -> PathBuf {
        match check.pdf_file.as_deref().filter(|p| !p.is_empty()) {
            Some(relative) => self.absolute_path(relative),
            None => self.absolute_path(&Self::relative_path(check)),
        }
    }

    /// Write the PDF, returning the relative path
    pub async fn write(&self, check: &Check, bytes: &[u8]) -> Result<String, StorageError> {
        let relative = Self::relative_path(check);
        let path = self.absolute_path(&relative);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(relative)
    }

    /// Remove a file by relative path; a missing file is not an error
    pub async fn remove(&self, relative: &str) -> Result<(), StorageError> {
        let path = self.absolute_path(relative);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove { path, source }),
        }
    }
}

// order_id must not escape the pdf directory
fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
