// src/export/downloads.rs
use crate::error::ExportError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tracing::{debug, info};

/// What to do when the target filename already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictAction {
    /// `name (1).yaml`, `name (2).yaml`, ...
    #[default]
    Uniquify,
    Overwrite,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadItem {
    pub id: u64,
    pub filename: String,
    pub path: PathBuf,
    pub bytes: usize,
    pub finished_at: DateTime<Utc>,
}

#[async_trait]
pub trait Downloads: Send + Sync {
    async fn download(&self, filename: &str, contents: &[u8]) -> Result<DownloadItem, ExportError>;

    /// Items saved so far, oldest first.
    fn history(&self) -> Vec<DownloadItem>;
}

/// Saves into one directory on the local filesystem.
pub struct FsDownloads {
    dir: PathBuf,
    conflict_action: ConflictAction,
    history: Mutex<Vec<DownloadItem>>,
}

impl FsDownloads {
    pub fn new(dir: impl Into<PathBuf>, conflict_action: ConflictAction) -> Self {
        Self {
            dir: dir.into(),
            conflict_action,
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn target_path(&self, filename: &str) -> PathBuf {
        let path = self.dir.join(filename);
        if self.conflict_action == ConflictAction::Overwrite || !exists(&path).await {
            return path;
        }

        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename);
        let extension = Path::new(filename).extension().and_then(|e| e.to_str());

        let mut counter = 1;
        loop {
            let candidate = match extension {
                Some(ext) => format!("{} ({}).{}", stem, counter, ext),
                None => format!("{} ({})", stem, counter),
            };
            let path = self.dir.join(candidate);
            if !exists(&path).await {
                return path;
            }
            counter += 1;
        }
    }
}

async fn exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok()
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl Downloads for FsDownloads {
    async fn download(&self, filename: &str, contents: &[u8]) -> Result<DownloadItem, ExportError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(io_error(&self.dir))?;

        let path = self.target_path(filename).await;

        // Written aside and renamed so a failed write never leaves a partial file.
        let partial = path.with_extension("part");
        if let Err(e) = fs::write(&partial, contents).await {
            let _ = fs::remove_file(&partial).await;
            return Err(io_error(&partial)(e));
        }
        if let Err(e) = fs::rename(&partial, &path).await {
            let _ = fs::remove_file(&partial).await;
            return Err(io_error(&path)(e));
        }

        let saved_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename)
            .to_string();

        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        let item = DownloadItem {
            id: history.len() as u64 + 1,
            filename: saved_name,
            path,
            bytes: contents.len(),
            finished_at: Utc::now(),
        };
        history.push(item.clone());
        debug!("Download #{} complete ({} bytes)", item.id, item.bytes);
        info!("Saved file: {}", item.path.display());

        Ok(item)
    }

    fn history(&self) -> Vec<DownloadItem> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uniquify_adds_counter() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = FsDownloads::new(dir.path(), ConflictAction::Uniquify);

        let first = downloads.download("job.yaml", b"one").await.unwrap();
        let second = downloads.download("job.yaml", b"two").await.unwrap();
        let third = downloads.download("job.yaml", b"three").await.unwrap();

        assert_eq!(first.filename, "job.yaml");
        assert_eq!(second.filename, "job (1).yaml");
        assert_eq!(third.filename, "job (2).yaml");
        assert_eq!(std::fs::read_to_string(&first.path).unwrap(), "one");
        assert_eq!(downloads.history().len(), 3);
        assert_eq!(downloads.history()[2].id, 3);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = FsDownloads::new(dir.path(), ConflictAction::Overwrite);

        downloads.download("job.yaml", b"one").await.unwrap();
        let second = downloads.download("job.yaml", b"two").await.unwrap();

        assert_eq!(second.filename, "job.yaml");
        assert_eq!(std::fs::read_to_string(&second.path).unwrap(), "two");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let downloads = FsDownloads::new(&nested, ConflictAction::default());

        let item = downloads.download("x.yaml", b"x").await.unwrap();
        assert!(item.path.starts_with(downloads.dir()));
        assert!(item.path.starts_with(&nested));
        assert!(item.path.exists());
    }

    fn part_files(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "part"))
            .count()
    }

    #[tokio::test]
    async fn test_directory_that_is_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("downloads");
        std::fs::write(&blocker, "not a directory").unwrap();
        let downloads = FsDownloads::new(&blocker, ConflictAction::Uniquify);

        let result = downloads.download("job.yaml", b"one").await;

        assert!(matches!(result, Err(ExportError::Io { .. })));
        assert!(downloads.history().is_empty());
        assert_eq!(part_files(dir.path()), 0);
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[tokio::test]
    async fn test_failed_rename_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("job.yaml")).unwrap();
        let downloads = FsDownloads::new(dir.path(), ConflictAction::Overwrite);

        let result = downloads.download("job.yaml", b"one").await;

        match result {
            Err(ExportError::Io { path, .. }) => assert_eq!(path, dir.path().join("job.yaml")),
            other => panic!("expected an I/O error, got {:?}", other.map(|item| item.path)),
        }
        assert!(downloads.history().is_empty());
        assert_eq!(part_files(dir.path()), 0);
        assert!(dir.path().join("job.yaml").is_dir());
    }
}
