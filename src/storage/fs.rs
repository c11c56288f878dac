//! Filesystem capability used by the prompt store
//!
//! The store never touches `std::fs` or `tokio::fs` directly. It goes through
//! the [`FileSystem`] trait so that tests can swap in
//! [`MemoryFileSystem`](crate::storage::memory::MemoryFileSystem) and run
//! without disk I/O.
//!
//! - [`DiskFileSystem`] -- real filesystem access via `tokio::fs`.
//! - [`MemoryFileSystem`](crate::storage::memory::MemoryFileSystem) --
//!   in-process map of paths to nodes.

use std::io;
use std::path::Path;
use std::time::SystemTime;

use tokio::io::AsyncWriteExt;

/// A single entry returned by [`FileSystem::read_dir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (last path segment)
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// Metadata returned by [`FileSystem::metadata`]
#[derive(Debug, Clone)]
pub struct FileStat {
    /// Whether the path is a directory
    pub is_dir: bool,
    /// Size in bytes
    pub len: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// Creation (birth) time
    pub created: SystemTime,
}

/// Minimal set of filesystem operations the prompt store relies on.
///
/// All methods report failures as `std::io::Error` so that the store can
/// recognise `ErrorKind::NotFound` regardless of the backing implementation.
#[async_trait::async_trait]
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Create a directory and all missing parents. Succeeds if it already exists.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// List the direct children of a directory.
    ///
    /// Entries whose names are not valid UTF-8 are skipped.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Stat a path.
    async fn metadata(&self, path: &Path) -> io::Result<FileStat>;

    /// Read the full contents of a file.
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate a file and write `contents` to it.
    ///
    /// The parent directory must already exist.
    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Create a new file holding `contents`.
    ///
    /// Fails with `ErrorKind::AlreadyExists` if anything is already at `path`,
    /// so two callers racing for one name cannot both succeed.
    async fn create_new(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// [`FileSystem`] backed by the real disk through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileSystem;

impl DiskFileSystem {
    /// Creates a new disk-backed filesystem handle
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl FileSystem for DiskFileSystem {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(path).await?;
        while let Some(entry) = reader.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!("Skipping non UTF-8 entry in {}", path.display());
                continue;
            };
            let is_dir = entry.file_type().await?.is_dir();
            entries.push(DirEntry { name, is_dir });
        }
        Ok(entries)
    }

    async fn metadata(&self, path: &Path) -> io::Result<FileStat> {
        let meta = tokio::fs::metadata(path).await?;
        let modified = meta.modified()?;
        // Not every platform/filesystem reports birth time.
        let created = meta.created().unwrap_or(modified);
        Ok(FileStat {
            is_dir: meta.is_dir(),
            len: meta.len(),
            modified,
            created,
        })
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }

    async fn create_new(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(contents).await?;
        file.flush().await
    }
}
