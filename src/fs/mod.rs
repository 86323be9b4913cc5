// src/fs/mod.rs

//! Filesystem seam used by the loader.
//!
//! Errors are plain `std::io::Error`s so callers see the operating system's
//! failure unchanged (not found, permission denied, not a directory, ...).

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::Path;

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// `mkdir -p`: create `path` and any missing parents. An existing
    /// directory is not an error.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Size in bytes of a regular file.
    fn file_len(&self, path: &Path) -> io::Result<u64>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn file_len(&self, path: &Path) -> io::Result<u64> {
        let meta = fs::metadata(path)?;
        if meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{} is a directory", path.display()),
            ));
        }
        Ok(meta.len())
    }
}
