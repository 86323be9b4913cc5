// src/lib.rs

//! Typed configuration loading for pipeline startup code.
//!
//! The usual startup sequence is:
//!
//! ```ignore
//! let doc = confbox::load_document("config/config.yaml")?;
//! let root = doc.get_path("artifacts_root")?;
//! confbox::ensure_directories(&[root], true)?;
//! ```
//!
//! The free functions here use a default [`ConfigLoader`] (real filesystem,
//! current `tracing` dispatcher). Build a loader yourself to inject either.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;

use std::path::Path;

use anyhow::{Context, Result as AnyResult};
use tracing::debug;

use crate::cli::{CliArgs, Command};
pub use crate::config::{
    ConfigDocument, ConfigLoader, ConfigValue, DirectoryList, DocumentFormat, size_label,
};
pub use crate::errors::{ConfboxError, Result};

/// Load a configuration document with the default loader.
pub fn load_document(path: impl AsRef<Path>) -> Result<ConfigDocument> {
    ConfigLoader::new().load_document(path)
}

/// Create every directory in `paths` with the default loader.
pub fn ensure_directories<P: AsRef<Path>>(paths: &[P], verbose: bool) -> Result<()> {
    ConfigLoader::new().ensure_directories(paths, verbose)
}

/// `"~ N KB"` label for the file at `path`.
pub fn file_size_label(path: impl AsRef<Path>) -> Result<String> {
    ConfigLoader::new().file_size_label(path)
}

/// High-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> AnyResult<()> {
    let loader = ConfigLoader::new();

    match args.command {
        Command::Check { config } => {
            let doc = loader
                .load_document(&config)
                .with_context(|| format!("loading config document {config:?}"))?;
            print_summary(&loader, &doc)?;
        }
        Command::Provision {
            config,
            dir,
            dirs,
            quiet,
        } => {
            let doc = loader
                .load_document(&config)
                .with_context(|| format!("loading config document {config:?}"))?;
            let targets = collect_directories(&doc, &dir, &dirs)?;
            debug!(count = targets.len(), "provisioning directories");
            loader
                .ensure_directories(&targets, !quiet)
                .context("provisioning directories")?;
        }
        Command::Size { files } => {
            for file in files {
                let label = loader
                    .file_size_label(&file)
                    .with_context(|| format!("reading size of {file:?}"))?;
                println!("{}: {label}", file.display());
            }
        }
    }

    Ok(())
}

/// Resolve `--dir` keys (single path strings) and `--dirs` keys (sequences of
/// paths) into one ordered list.
fn collect_directories(
    doc: &ConfigDocument,
    dir_keys: &[String],
    list_keys: &[String],
) -> AnyResult<DirectoryList> {
    let mut targets = DirectoryList::new();
    for key in dir_keys {
        targets.push(doc.get_path(key).with_context(|| format!("--dir {key}"))?);
    }
    for key in list_keys {
        let list = doc
            .get_directories(key)
            .with_context(|| format!("--dirs {key}"))?;
        targets.extend(list.into_inner());
    }
    Ok(targets)
}

/// Simple check output: source, format, size and top-level keys.
fn print_summary(loader: &ConfigLoader, doc: &ConfigDocument) -> AnyResult<()> {
    println!("confbox check");
    println!("  source = {}", doc.source().display());
    println!("  format = {}", doc.format());
    println!("  size   = {}", loader.file_size_label(doc.source())?);
    println!();

    println!("keys ({}):", doc.len());
    for (key, value) in doc.iter() {
        println!("  - {key}: {value}");
    }

    debug!("check complete");
    Ok(())
}
