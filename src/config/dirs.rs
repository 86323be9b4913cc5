// src/config/dirs.rs

use std::ops::Deref;
use std::path::{Path, PathBuf};

use crate::config::value::ConfigValue;
use crate::errors::{ConfboxError, Result};

/// Ordered list of directories that must exist before a pipeline stage runs.
///
/// Duplicates are allowed; provisioning the same directory twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryList(Vec<PathBuf>);

impl DirectoryList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.0.push(path.into());
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<PathBuf> {
        self.0
    }

    /// Build from a config value that must be a sequence of strings.
    ///
    /// `key` is used for error messages only. A scalar where a sequence was
    /// expected is an argument error, not something to coerce.
    pub fn from_value(key: &str, value: &ConfigValue) -> Result<Self> {
        let items = value.as_sequence().ok_or_else(|| {
            ConfboxError::InvalidArgument(format!(
                "'{key}' must be a sequence of directory paths, found {}",
                value.kind()
            ))
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item.as_str() {
                Some(s) if !s.is_empty() => Ok(PathBuf::from(s)),
                Some(_) => Err(ConfboxError::InvalidArgument(format!(
                    "'{key}.{i}' is an empty directory path"
                ))),
                None => Err(ConfboxError::InvalidArgument(format!(
                    "'{key}.{i}' must be a directory path string, found {}",
                    item.kind()
                ))),
            })
            .collect()
    }
}

impl Deref for DirectoryList {
    type Target = [PathBuf];

    fn deref(&self) -> &[PathBuf] {
        &self.0
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for DirectoryList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a DirectoryList {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl AsRef<[PathBuf]> for DirectoryList {
    fn as_ref(&self) -> &[PathBuf] {
        &self.0
    }
}

impl Extend<PathBuf> for DirectoryList {
    fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl TryFrom<&ConfigValue> for DirectoryList {
    type Error = ConfboxError;

    fn try_from(value: &ConfigValue) -> Result<Self> {
        Self::from_value("<value>", value)
    }
}

/// Reject paths that cannot name a directory. Runs before any I/O.
pub(crate) fn check_directory_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ConfboxError::InvalidArgument(
            "directory path must not be empty".to_string(),
        ));
    }
    Ok(())
}
