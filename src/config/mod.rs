// src/config/mod.rs

//! Configuration loading and directory provisioning.
//!
//! Responsibilities:
//! - Represent parsed documents as immutable value trees (`value.rs`, `document.rs`).
//! - Parse YAML or TOML text into those trees (`format.rs`).
//! - Load documents from disk and provision directories (`loader.rs`).
//! - Validate directory lists drawn from configuration (`dirs.rs`).

pub mod dirs;
pub mod document;
pub mod format;
pub mod loader;
pub mod value;

pub use dirs::DirectoryList;
pub use document::ConfigDocument;
pub use format::DocumentFormat;
pub use loader::{ConfigLoader, size_label};
pub use value::{ConfigMap, ConfigValue};
