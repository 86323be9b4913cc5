// src/config/loader.rs

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use tracing::{Dispatch, info};

use crate::config::dirs::check_directory_path;
use crate::config::document::ConfigDocument;
use crate::config::format::DocumentFormat;
use crate::config::value::ConfigValue;
use crate::errors::{ConfboxError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Loads configuration documents and provisions the directories they name.
///
/// The loader owns two collaborators, both injected at construction:
/// - a [`FileSystem`] (the real one by default),
/// - a `tracing` [`Dispatch`] that receives its log events. `new()` captures
///   whatever dispatcher is current at that point; tests pass their own
///   through [`with_dispatch`](Self::with_dispatch) instead of installing a
///   global subscriber.
///
/// The loader keeps no state between calls.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    fs: Arc<dyn FileSystem>,
    dispatch: Dispatch,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            dispatch: tracing::dispatcher::get_default(Dispatch::clone),
        }
    }

    pub fn with_filesystem(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Read and parse the document at `path`.
    ///
    /// - an empty path is rejected before any I/O (`InvalidArgument`),
    /// - read failures come back as `Io`, unchanged,
    /// - syntax errors come back as `Yaml` / `Toml`, unchanged,
    /// - a document with no content (`""`, `null`, `{}`) is `EmptyDocument`,
    /// - a root that is not a mapping is `NotAMapping`.
    ///
    /// Logs one `info` event on success and nothing on failure.
    pub fn load_document(&self, path: impl AsRef<Path>) -> Result<ConfigDocument> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ConfboxError::InvalidArgument(
                "config document path must not be empty".to_string(),
            ));
        }

        let contents = self.fs.read_to_string(path)?;
        let format = DocumentFormat::from_path(path);

        let root = match format.parse(&contents, path)? {
            Some(ConfigValue::Mapping(map)) => map,
            Some(other) => {
                return Err(ConfboxError::NotAMapping {
                    path: path.to_path_buf(),
                    found: other.kind(),
                });
            }
            None => {
                return Err(ConfboxError::EmptyDocument {
                    path: path.to_path_buf(),
                });
            }
        };

        self.emit(|| info!(path = %path.display(), %format, "config document loaded"));
        Ok(ConfigDocument::new(path.to_path_buf(), format, root))
    }

    /// Make sure every directory in `paths` exists (`mkdir -p` semantics).
    ///
    /// All paths are checked before the first directory is created. With
    /// `verbose` (the usual setting) one `info` event is logged per path,
    /// whether or not it already existed. A failure part-way through leaves
    /// the directories created so far in place.
    pub fn ensure_directories<P: AsRef<Path>>(&self, paths: &[P], verbose: bool) -> Result<()> {
        for path in paths {
            check_directory_path(path.as_ref())?;
        }

        for path in paths {
            let path = path.as_ref();
            self.fs.create_dir_all(path)?;
            if verbose {
                self.emit(|| info!(path = %path.display(), "created directory"));
            }
        }

        Ok(())
    }

    /// Size of the file at `path` as `"~ N KB"`.
    pub fn file_size_label(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ConfboxError::InvalidArgument(
                "file path must not be empty".to_string(),
            ));
        }
        let bytes = self.fs.file_len(path)?;
        Ok(size_label(bytes))
    }

    fn emit(&self, event: impl FnOnce()) {
        tracing::dispatcher::with_default(&self.dispatch, event);
    }
}

/// Format a byte count as `"~ N KB"`.
///
/// `N` is `bytes / 1024` rounded to the nearest integer, ties to even
/// (512 B is `~ 0 KB`, 1536 B is `~ 2 KB`, 2560 B is `~ 2 KB`).
pub fn size_label(bytes: u64) -> String {
    format!("~ {} KB", kib_rounded(bytes))
}

fn kib_rounded(bytes: u64) -> u64 {
    let whole = bytes / 1024;
    match (bytes % 1024).cmp(&512) {
        Ordering::Less => whole,
        Ordering::Greater => whole + 1,
        Ordering::Equal => whole + (whole & 1),
    }
}
