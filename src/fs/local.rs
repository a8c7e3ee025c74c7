//! Host file system adapter.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{DirEntry, EntryKind, FileStat, FileSystemPort};

/// [`FileSystemPort`] over the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

fn kind_of(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Dir
    } else {
        EntryKind::File
    }
}

#[async_trait]
impl FileSystemPort for LocalFs {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        fs::try_exists(path).await
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn create_empty(&self, path: &Path) -> io::Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to).await
    }

    async fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        // tokio files buffer writes on a blocking thread; flush before drop
        // or the tail of the write can be lost.
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_data().await?;
        Ok(())
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to).await
    }

    async fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut reader = fs::read_dir(path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: kind_of(entry.file_type().await?),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(path).await?;
        Ok(FileStat {
            kind: kind_of(metadata.file_type()),
            size: metadata.len(),
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_append_writes_everything() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.txt");
        let fs = LocalFs::new();

        fs.append(&path, b"a").await.unwrap();
        fs.append(&path, b"b").await.unwrap();

        let big = vec![b'x'; 256 * 1024];
        fs.append(&path, &big).await.unwrap();

        let content = std::fs::read(&path).unwrap();
        assert_eq!(content.len(), 2 + big.len());
        assert_eq!(&content[..2], b"ab");
    }

    #[tokio::test]
    async fn test_create_empty_refuses_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        let fs = LocalFs::new();

        fs.create_empty(&path).await.unwrap();
        let err = fs.create_empty(&path).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn test_list_tags_entries() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("sub")).unwrap();
        std::fs::write(temp_dir.path().join("file.txt"), "x").unwrap();

        let entries = LocalFs::new().list(temp_dir.path()).await.unwrap();
        assert_eq!(
            entries,
            vec![
                DirEntry {
                    name: "file.txt".to_string(),
                    kind: EntryKind::File,
                },
                DirEntry {
                    name: "sub".to_string(),
                    kind: EntryKind::Dir,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_stat_reports_size_and_kind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        std::fs::write(&path, "hello").unwrap();

        let stat = LocalFs::new().stat(&path).await.unwrap();
        assert_eq!(stat.kind, EntryKind::File);
        assert_eq!(stat.size, 5);
        assert!(stat.modified.is_some());

        let stat = LocalFs::new().stat(temp_dir.path()).await.unwrap();
        assert_eq!(stat.kind, EntryKind::Dir);
    }
}
