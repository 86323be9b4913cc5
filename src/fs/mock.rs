// src/fs/mock.rs

use super::FileSystem;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
}

/// In-memory filesystem for tests.
///
/// Every trait call is appended to an operation log (`"read_to_string a.yaml"`,
/// `"create_dir_all out/x"`, ...) so tests can assert that argument checks
/// happen before the filesystem is touched. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    ops: Arc<Mutex<Vec<String>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories implicitly.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let mut entries = self.entries();
        for ancestor in ancestors_from_root(path).into_iter().rev().skip(1) {
            entries.insert(ancestor, MockEntry::Dir);
        }
        entries.insert(path.to_path_buf(), MockEntry::File(content.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries();
        for ancestor in ancestors_from_root(path.as_ref()) {
            entries.insert(ancestor, MockEntry::Dir);
        }
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        is_root(path) || self.entries().contains_key(path)
    }

    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.entries().get(path.as_ref()), Some(MockEntry::File(_)))
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        is_root(path) || matches!(self.entries().get(path), Some(MockEntry::Dir))
    }

    /// Operations performed through the `FileSystem` trait, in call order.
    pub fn operations(&self) -> Vec<String> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, op: &str, path: &Path) {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{op} {}", path.display()));
    }
}

/// Ancestors of `path` from the outermost component down to `path` itself,
/// without the implicit root (`""`, `.`, `/`).
fn ancestors_from_root(path: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = path
        .ancestors()
        .filter(|p| !is_root(p))
        .map(Path::to_path_buf)
        .collect();
    out.reverse();
    out
}

fn is_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new(".") || path == Path::new("/")
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

fn is_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::IsADirectory,
        format!("is a directory: {}", path.display()),
    )
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.record("read_to_string", path);
        match self.entries().get(path) {
            Some(MockEntry::File(content)) => String::from_utf8(content.clone())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Some(MockEntry::Dir) => Err(is_a_directory(path)),
            None => Err(not_found(path)),
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.record("create_dir_all", path);
        let mut entries = self.entries();
        for ancestor in ancestors_from_root(path) {
            match entries.get(&ancestor) {
                Some(MockEntry::Dir) => {}
                Some(MockEntry::File(_)) if ancestor == path => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("file exists: {}", path.display()),
                    ));
                }
                Some(MockEntry::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        format!("not a directory: {}", ancestor.display()),
                    ));
                }
                None => {
                    entries.insert(ancestor, MockEntry::Dir);
                }
            }
        }
        Ok(())
    }

    fn file_len(&self, path: &Path) -> io::Result<u64> {
        self.record("file_len", path);
        match self.entries().get(path) {
            Some(MockEntry::File(content)) => Ok(content.len() as u64),
            Some(MockEntry::Dir) => Err(is_a_directory(path)),
            None => Err(not_found(path)),
        }
    }
}
