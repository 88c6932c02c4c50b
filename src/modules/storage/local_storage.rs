//! Local disk storage for publicly served uploads
//!
//! Files land in `<public_dir>/<uploads_dir>/` and are reachable over HTTP
//! under `/public/<uploads_dir>/`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::error::AppError;
use crate::shared::constants::PUBLIC_URL_PREFIX;

/// Maximum number of suffixed names tried before giving up on a collision
const MAX_NAME_ATTEMPTS: u32 = 16;

/// A file written to the uploads directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub file_name: String,
    pub path: PathBuf,
    pub url: String,
}

/// Storage backed by a directory on the local filesystem
pub struct LocalStorage {
    root: PathBuf,
    url_prefix: String,
}

impl LocalStorage {
    pub fn new(public_dir: &Path, uploads_dir: &str) -> Self {
        let uploads_dir = uploads_dir.trim_matches('/');
        Self {
            root: public_dir.join(uploads_dir),
            url_prefix: format!("{}/{}", PUBLIC_URL_PREFIX, uploads_dir),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the uploads directory exists, create if not
    pub async fn ensure_dir_exists(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create uploads directory '{}': {}",
                self.root.display(),
                e
            ))
        })?;
        debug!("Uploads directory ready: {}", self.root.display());
        Ok(())
    }

    /// Write `data` as `<stem>.<extension>`, never overwriting an existing file.
    ///
    /// When the name is taken, `<stem>-1.<extension>`, `<stem>-2.<extension>`, …
    /// are tried in turn.
    pub async fn store(&self, stem: &str, extension: &str, data: &[u8]) -> Result<StoredFile, AppError> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = if attempt == 0 {
                format!("{}.{}", stem, extension)
            } else {
                format!("{}-{}.{}", stem, attempt, extension)
            };
            let path = self.root.join(&file_name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Upload name taken, retrying: {}", file_name);
                    continue;
                }
                Err(e) => {
                    return Err(AppError::Internal(format!(
                        "Failed to create '{}': {}",
                        path.display(),
                        e
                    )))
                }
            };

            file.write_all(data).await.map_err(|e| {
                AppError::Internal(format!("Failed to write '{}': {}", path.display(), e))
            })?;
            file.flush().await.map_err(|e| {
                AppError::Internal(format!("Failed to flush '{}': {}", path.display(), e))
            })?;

            info!("Stored upload: {} ({} bytes)", path.display(), data.len());

            return Ok(StoredFile {
                url: format!("{}/{}", self.url_prefix, file_name),
                file_name,
                path,
            });
        }

        Err(AppError::Internal(format!(
            "Could not find a free file name for '{}.{}'",
            stem, extension
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::temp_dir;

    #[tokio::test]
    async fn test_store_writes_file_and_builds_url() {
        let public = temp_dir("storage-write");
        let storage = LocalStorage::new(&public, "uploads");
        storage.ensure_dir_exists().await.unwrap();

        let stored = storage.store("logo-1700000000000", "png", b"png-bytes").await.unwrap();

        assert_eq!(stored.file_name, "logo-1700000000000.png");
        assert_eq!(stored.url, "/public/uploads/logo-1700000000000.png");
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_store_never_overwrites() {
        let public = temp_dir("storage-collision");
        let storage = LocalStorage::new(&public, "uploads");
        storage.ensure_dir_exists().await.unwrap();

        let first = storage.store("icon-1", "ico", b"first").await.unwrap();
        let second = storage.store("icon-1", "ico", b"second").await.unwrap();

        assert_eq!(second.file_name, "icon-1-1.ico");
        assert_eq!(std::fs::read(&first.path).unwrap(), b"first");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"second");
    }
}
