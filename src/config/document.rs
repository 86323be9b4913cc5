// src/config/document.rs

use std::ops::Index;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::dirs::DirectoryList;
use crate::config::format::DocumentFormat;
use crate::config::value::{ConfigMap, ConfigValue, NULL};
use crate::errors::{ConfboxError, Result};

/// A loaded configuration document.
///
/// The root is always a non-empty mapping; [`ConfigLoader::load_document`]
/// refuses to build anything else. The document is a read view: it has no
/// mutating accessors and never goes back to disk.
///
/// Access styles:
///
/// ```ignore
/// let doc = confbox::load_document("config/config.yaml")?;
///
/// doc["data_ingestion"]["root_dir"];           // index, Null when missing
/// doc.lookup("data_ingestion.root_dir");       // dotted path, Option
/// doc.get_path("data_ingestion.root_dir")?;    // typed, errors when missing
/// ```
///
/// [`ConfigLoader::load_document`]: crate::config::ConfigLoader::load_document
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    source: PathBuf,
    format: DocumentFormat,
    root: ConfigMap,
}

impl ConfigDocument {
    pub(crate) fn new(source: PathBuf, format: DocumentFormat, root: ConfigMap) -> Self {
        Self {
            source,
            format,
            root,
        }
    }

    /// Path the document was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Number of top-level keys. Never zero.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.root.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn as_mapping(&self) -> &ConfigMap {
        &self.root
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Top-level lookup by exact key.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.root.get(key)
    }

    /// Dotted-path lookup, e.g. `"model_trainer.params.epochs"`.
    pub fn lookup(&self, path: &str) -> Option<&ConfigValue> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let value = self.root.get(head)?;
        match rest {
            Some(rest) => value.lookup(rest),
            None => Some(value),
        }
    }

    /// Like [`lookup`](Self::lookup) but a missing key is an error.
    pub fn require(&self, path: &str) -> Result<&ConfigValue> {
        self.lookup(path)
            .ok_or_else(|| ConfboxError::MissingKey(path.to_string()))
    }

    pub fn get_str(&self, path: &str) -> Result<&str> {
        let value = self.require(path)?;
        value.as_str().ok_or_else(|| mismatch(path, "string", value))
    }

    pub fn get_i64(&self, path: &str) -> Result<i64> {
        let value = self.require(path)?;
        value.as_i64().ok_or_else(|| mismatch(path, "integer", value))
    }

    /// Non-negative integers, including those above `i64::MAX`.
    pub fn get_u64(&self, path: &str) -> Result<u64> {
        let value = self.require(path)?;
        value
            .as_u64()
            .ok_or_else(|| mismatch(path, "unsigned integer", value))
    }

    pub fn get_f64(&self, path: &str) -> Result<f64> {
        let value = self.require(path)?;
        value.as_f64().ok_or_else(|| mismatch(path, "float", value))
    }

    pub fn get_bool(&self, path: &str) -> Result<bool> {
        let value = self.require(path)?;
        value.as_bool().ok_or_else(|| mismatch(path, "boolean", value))
    }

    /// A filesystem path stored as a string.
    ///
    /// Anything that is not a non-empty string (a mapping, a list, a number)
    /// is rejected as an argument error, so a mis-shaped entry fails here
    /// rather than when it reaches the filesystem.
    pub fn get_path(&self, path: &str) -> Result<PathBuf> {
        let value = self.require(path)?;
        match value.as_str() {
            Some(s) if !s.is_empty() => Ok(PathBuf::from(s)),
            Some(_) => Err(ConfboxError::InvalidArgument(format!(
                "'{path}' is an empty path"
            ))),
            None => Err(ConfboxError::InvalidArgument(format!(
                "'{path}' must be a path string, found {}",
                value.kind()
            ))),
        }
    }

    /// A sequence of directory paths, ready for `ensure_directories`.
    pub fn get_directories(&self, path: &str) -> Result<DirectoryList> {
        DirectoryList::from_value(path, self.require(path)?)
    }

    /// Deserialize the whole document into a typed structure.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        let value = ConfigValue::Mapping(self.root.clone()).to_yaml();
        serde_yaml::from_value(value).map_err(|source| ConfboxError::Schema {
            key: "<root>".to_string(),
            source,
        })
    }

    /// Deserialize the sub-tree at `path` into a typed structure.
    pub fn extract_at<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.require(path)?.to_yaml();
        serde_yaml::from_value(value).map_err(|source| ConfboxError::Schema {
            key: path.to_string(),
            source,
        })
    }
}

fn mismatch(key: &str, expected: &'static str, found: &ConfigValue) -> ConfboxError {
    ConfboxError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

impl Index<&str> for ConfigDocument {
    type Output = ConfigValue;

    fn index(&self, key: &str) -> &ConfigValue {
        self.root.get(key).unwrap_or(&NULL)
    }
}

impl<'a> IntoIterator for &'a ConfigDocument {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = indexmap::map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.root.iter()
    }
}
