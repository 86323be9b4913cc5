// src/errors.rs

//! Crate-wide error type.
//!
//! Variants fall into four classes:
//! - argument shape errors, raised before any I/O (`InvalidArgument`),
//! - document validation errors (`EmptyDocument`, `NotAMapping`, `UnsupportedKey`),
//! - parser errors, passed through unchanged (`Yaml`, `Toml`),
//! - filesystem errors, passed through unchanged (`Io`).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfboxError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("document is empty: {path:?}")]
    EmptyDocument { path: PathBuf },

    #[error("document root must be a mapping, found {found} in {path:?}")]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("unsupported {key} key in {path:?}: keys must be scalars")]
    UnsupportedKey { path: PathBuf, key: &'static str },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing key: {0}")]
    MissingKey(String),

    #[error("Type mismatch at '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Schema error at '{key}': {source}")]
    Schema {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfboxError {
    /// Wrong argument shape (the "type error" class).
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyDocument { .. } | Self::NotAMapping { .. } | Self::UnsupportedKey { .. }
        )
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Yaml(_) | Self::Toml(_))
    }

    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, ConfboxError>;
