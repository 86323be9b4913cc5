// src/config/format.rs

//! Document formats and their conversion into [`ConfigValue`].
//!
//! YAML is the default. TOML is picked for `.toml` files. Anything else,
//! including JSON, goes through the YAML parser.

use std::fmt;
use std::path::Path;

use crate::config::value::{ConfigMap, ConfigValue};
use crate::errors::{ConfboxError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Yaml,
        }
    }

    /// Parse `contents` into a value tree.
    ///
    /// Returns `Ok(None)` when the document holds nothing: an empty or
    /// comment-only file, an explicit `null`/`~`, or an empty mapping.
    /// `path` is only used for error context.
    pub fn parse(self, contents: &str, path: &Path) -> Result<Option<ConfigValue>> {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

        let value = match self {
            DocumentFormat::Yaml => {
                // An empty stream is not an error for YAML; it is just empty.
                if !has_yaml_content(contents) {
                    return Ok(None);
                }
                let mut raw: serde_yaml::Value = serde_yaml::from_str(contents)?;
                // `<<: *anchor` merge keys fold into their mapping.
                raw.apply_merge()?;
                from_yaml(raw, path)?
            }
            DocumentFormat::Toml => {
                let table: toml::Table = toml::from_str(contents)?;
                from_toml(toml::Value::Table(table))
            }
        };

        let is_empty = match &value {
            ConfigValue::Null => true,
            ConfigValue::Mapping(map) => map.is_empty(),
            _ => false,
        };

        Ok(if is_empty { None } else { Some(value) })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Yaml => write!(f, "yaml"),
            DocumentFormat::Toml => write!(f, "toml"),
        }
    }
}

fn has_yaml_content(contents: &str) -> bool {
    contents.lines().map(str::trim).any(|line| {
        !line.is_empty() && !line.starts_with('#') && line != "---" && line != "..."
    })
}

fn from_yaml(value: serde_yaml::Value, path: &Path) -> Result<ConfigValue> {
    use serde_yaml::Value;

    Ok(match value {
        Value::Null => ConfigValue::Null,
        Value::Bool(b) => ConfigValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigValue::Integer(i)
            } else if let Some(u) = n.as_u64() {
                ConfigValue::UInteger(u)
            } else {
                ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => ConfigValue::String(s),
        Value::Sequence(items) => ConfigValue::Sequence(
            items
                .into_iter()
                .map(|item| from_yaml(item, path))
                .collect::<Result<_>>()?,
        ),
        Value::Mapping(mapping) => {
            let mut map = ConfigMap::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key, path)?, from_yaml(value, path)?);
            }
            ConfigValue::Mapping(map)
        }
        Value::Tagged(tagged) => from_yaml(tagged.value, path)?,
    })
}

/// Scalar keys are normalised to strings; `1: x` is reachable as `"1"`.
fn yaml_key(key: serde_yaml::Value, path: &Path) -> Result<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value, path),
        Value::Sequence(_) => Err(ConfboxError::UnsupportedKey {
            path: path.to_path_buf(),
            key: "sequence",
        }),
        Value::Mapping(_) => Err(ConfboxError::UnsupportedKey {
            path: path.to_path_buf(),
            key: "mapping",
        }),
    }
}

fn from_toml(value: toml::Value) -> ConfigValue {
    match value {
        toml::Value::String(s) => ConfigValue::String(s),
        toml::Value::Integer(i) => ConfigValue::Integer(i),
        toml::Value::Float(f) => ConfigValue::Float(f),
        toml::Value::Boolean(b) => ConfigValue::Bool(b),
        toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
        toml::Value::Array(items) => {
            ConfigValue::Sequence(items.into_iter().map(from_toml).collect())
        }
        toml::Value::Table(table) => ConfigValue::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (k, from_toml(v)))
                .collect(),
        ),
    }
}
