//! Filesystem-backed storage for uploaded member images.
//!
//! Files are addressed by generated collision-free names and exposed to
//! clients as relative paths under a fixed public prefix.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;

use crate::errors::AppError;

/// Public URL prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "uploads";

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Filesystem store for uploaded images.
#[derive(Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Open the store, creating the uploads directory if it does not exist.
    pub async fn open(root: &Path) -> Result<Self, std::io::Error> {
        tokio::fs::create_dir_all(root).await?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Store an uploaded file and return its relative path (`uploads/<name>`).
    ///
    /// Rejects non-image content types and oversized payloads before any
    /// bytes reach the disk.
    pub async fn store(
        &self,
        field_name: &str,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        if !content_type.starts_with("image/") {
            return Err(AppError::Validation(
                "Only image files are allowed".to_string(),
            ));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "File too large: limit is {} bytes",
                MAX_UPLOAD_BYTES
            )));
        }

        let filename = generate_filename(field_name, original_name);
        tokio::fs::write(self.root.join(&filename), data).await?;

        Ok(format!("{}/{}", PUBLIC_PREFIX, filename))
    }

    /// Delete a stored file by its relative path. Idempotent: a missing file
    /// is treated as success.
    pub async fn delete(&self, relative_path: &str) -> Result<(), AppError> {
        let Some(path) = self.resolve(relative_path) else {
            return Ok(());
        };

        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a relative path to its absolute filesystem location.
    pub fn resolve(&self, relative_path: &str) -> Option<PathBuf> {
        file_segment(relative_path).map(|filename| self.root.join(filename))
    }
}

/// Build a collision-free filename: field name, timestamp, random component,
/// original extension. Concurrent uploads of the same original name land on
/// distinct files.
fn generate_filename(field_name: &str, original_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let random: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    format!("{}-{}-{:09}{}", field_name, millis, random, ext)
}

/// Final path segment of a stored relative path. Stored paths carry the
/// public prefix, and honoring only the last segment keeps lookups inside
/// the uploads directory.
fn file_segment(relative_path: &str) -> Option<&str> {
    relative_path
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
}
