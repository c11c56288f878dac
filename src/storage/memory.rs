//! In-process filesystem for prompt store tests
//!
//! [`MemoryFileSystem`] implements [`FileSystem`] over a map of normalized
//! paths to nodes. It tracks creation and modification times the way a real
//! filesystem does (creation time survives an overwrite) and can be told to
//! fail writes below a given prefix, which is how tests exercise the
//! "primary write succeeded, snapshot failed" path.
//!
//! # Example
//!
//! ```
//! use promptkeep::storage::fs::FileSystem;
//! use promptkeep::storage::memory::MemoryFileSystem;
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let fs = MemoryFileSystem::new();
//! fs.create_dir_all(Path::new("/prompts")).await.unwrap();
//! fs.write(Path::new("/prompts/a.txt"), b"hi").await.unwrap();
//! assert_eq!(fs.read(Path::new("/prompts/a.txt")).await.unwrap(), b"hi");
//! # }
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;

use crate::storage::fs::{DirEntry, FileStat, FileSystem};

#[derive(Debug, Clone)]
enum Node {
    Dir {
        created: SystemTime,
    },
    File {
        data: Vec<u8>,
        created: SystemTime,
        modified: SystemTime,
    },
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<PathBuf, Node>,
    failing_prefixes: Vec<PathBuf>,
}

impl State {
    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self
            .failing_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
        {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write denied: {}", path.display()),
            ));
        }

        match path.parent().map(|parent| self.nodes.get(parent)) {
            Some(Some(Node::Dir { .. })) => Ok(()),
            _ => Err(not_found(path)),
        }
    }
}

/// In-memory [`FileSystem`] implementation
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
}

fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl MemoryFileSystem {
    /// Creates an empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write at or below `prefix` fail with
    /// `PermissionDenied`. Directory creation is unaffected.
    pub fn fail_writes_under(&self, prefix: impl AsRef<Path>) {
        self.lock()
            .failing_prefixes
            .push(normalize(prefix.as_ref()));
    }

    /// Returns true if a file or directory exists at `path`
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.lock().nodes.contains_key(&normalize(path.as_ref()))
    }

    /// Overrides the creation time of an existing node
    ///
    /// Used by tests that need a deterministic history ordering.
    pub fn set_created(&self, path: impl AsRef<Path>, at: SystemTime) -> io::Result<()> {
        let path = normalize(path.as_ref());
        let mut state = self.lock();
        match state.nodes.get_mut(&path) {
            Some(Node::Dir { created }) | Some(Node::File { created, .. }) => {
                *created = at;
                Ok(())
            }
            None => Err(not_found(&path)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic in another test thread must not cascade.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl FileSystem for MemoryFileSystem {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        let now = SystemTime::now();
        let mut state = self.lock();

        let mut ancestors: Vec<&Path> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        ancestors.reverse();

        for dir in ancestors {
            match state.nodes.get(dir) {
                Some(Node::Dir { .. }) => {}
                Some(Node::File { .. }) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("file exists: {}", dir.display()),
                    ));
                }
                None => {
                    state
                        .nodes
                        .insert(dir.to_path_buf(), Node::Dir { created: now });
                }
            }
        }
        Ok(())
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let path = normalize(path);
        let state = self.lock();

        match state.nodes.get(&path) {
            Some(Node::Dir { .. }) => {}
            Some(Node::File { .. }) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None => return Err(not_found(&path)),
        }

        let entries = state
            .nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path.as_path()))
            .filter_map(|(p, node)| {
                let name = p.file_name()?.to_str()?.to_string();
                Some(DirEntry {
                    name,
                    is_dir: matches!(node, Node::Dir { .. }),
                })
            })
            .collect();
        Ok(entries)
    }

    async fn metadata(&self, path: &Path) -> io::Result<FileStat> {
        let path = normalize(path);
        let state = self.lock();
        match state.nodes.get(&path) {
            Some(Node::Dir { created }) => Ok(FileStat {
                is_dir: true,
                len: 0,
                modified: *created,
                created: *created,
            }),
            Some(Node::File {
                data,
                created,
                modified,
            }) => Ok(FileStat {
                is_dir: false,
                len: data.len() as u64,
                modified: *modified,
                created: *created,
            }),
            None => Err(not_found(&path)),
        }
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let path = normalize(path);
        let state = self.lock();
        match state.nodes.get(&path) {
            Some(Node::File { data, .. }) => Ok(data.clone()),
            Some(Node::Dir { .. }) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(not_found(&path)),
        }
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let path = normalize(path);
        let now = SystemTime::now();
        let mut state = self.lock();
        state.check_writable(&path)?;

        let created = match state.nodes.get(&path) {
            Some(Node::File { created, .. }) => *created,
            Some(Node::Dir { .. }) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("is a directory: {}", path.display()),
                ));
            }
            None => now,
        };

        state.nodes.insert(
            path,
            Node::File {
                data: contents.to_vec(),
                created,
                modified: now,
            },
        );
        Ok(())
    }

    async fn create_new(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let path = normalize(path);
        let now = SystemTime::now();
        let mut state = self.lock();
        state.check_writable(&path)?;

        if state.nodes.contains_key(&path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("file exists: {}", path.display()),
            ));
        }

        state.nodes.insert(
            path,
            Node::File {
                data: contents.to_vec(),
                created: now,
                modified: now,
            },
        );
        Ok(())
    }
}
