use std::path::{Path, PathBuf};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};
use crate::error::AppError;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._\-\p{L}]").expect("valid file name pattern"));

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub file_name: String,
    pub upload_time: Option<DateTime<Utc>>,
    pub size: u64,
    pub path: String,
}

/// Directory of raw uploaded files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Writes an upload as `<millis>-<original name>` and returns its path.
    pub async fn save(&self, original_name: &str, data: &Bytes) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let stored_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, data).await?;

        info!("Stored upload {} ({} bytes)", stored_name, data.len());
        Ok(path)
    }

    /// Lists stored uploads. A missing directory is an empty history.
    pub async fn list(&self) -> Result<Vec<StoredFile>, AppError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Upload directory {} does not exist yet", self.root.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let upload_time = metadata
                .created()
                .or_else(|_| metadata.modified())
                .ok()
                .map(DateTime::<Utc>::from);

            files.push(StoredFile {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                upload_time,
                size: metadata.len(),
                path: entry.path().display().to_string(),
            });
        }

        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(files)
    }

    /// Removes one stored upload by its stored name.
    pub async fn delete(&self, file_name: &str) -> Result<(), AppError> {
        if !is_plain_file_name(file_name) {
            warn!("Rejected delete of suspicious file name {:?}", file_name);
            return Err(AppError::InvalidInput(format!("Invalid file name: {}", file_name)));
        }

        let path = self.root.join(file_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted upload {}", file_name);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("File not found: {}", file_name)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let cleaned = UNSAFE_CHARS.replace_all(&base, "_").into_owned();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
