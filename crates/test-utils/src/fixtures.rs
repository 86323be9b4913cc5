#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Scratch directory for writing config documents and sized files.
///
/// Everything is removed when the fixture is dropped.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("creating temp workspace")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the workspace (not created).
    pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `contents` to `rel`, creating parents.
    pub fn write(&self, rel: impl AsRef<Path>, contents: &str) -> Result<PathBuf> {
        self.write_bytes(rel, contents.as_bytes())
    }

    pub fn write_bytes(&self, rel: impl AsRef<Path>, contents: &[u8]) -> Result<PathBuf> {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {:?}", path))?;
        Ok(path)
    }

    /// A file of exactly `len` bytes.
    pub fn sized_file(&self, rel: impl AsRef<Path>, len: usize) -> Result<PathBuf> {
        self.write_bytes(rel, &vec![b'x'; len])
    }
}

/// Builder for small YAML documents, one `key: value` line per entry.
///
/// Values are written verbatim, so nested structures can be passed in flow
/// style (`"{b: 1}"`, `"[a, b]"`).
#[derive(Debug, Default)]
pub struct YamlDocBuilder {
    lines: Vec<String>,
}

impl YamlDocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, key: &str, value: &str) -> Self {
        self.lines.push(format!("{key}: {value}"));
        self
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.lines.push(format!("# {text}"));
        self
    }

    pub fn build(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
