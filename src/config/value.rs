// src/config/value.rs

//! Immutable nested configuration value.
//!
//! A `ConfigValue` is what every parsed document is made of: mappings with
//! string keys (insertion ordered), sequences, and scalars. There are no
//! mutating accessors; once a document is loaded it is a read view.

use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;

/// Ordered mapping from string keys to values.
pub type ConfigMap = IndexMap<String, ConfigValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Only for integers above `i64::MAX`; everything that fits is `Integer`.
    UInteger(u64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigValue>),
    Mapping(ConfigMap),
}

pub(crate) static NULL: ConfigValue = ConfigValue::Null;

impl ConfigValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::UInteger(_) => "unsigned integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ConfigValue::Integer(i) => u64::try_from(*i).ok(),
            ConfigValue::UInteger(u) => Some(*u),
            _ => None,
        }
    }

    /// Floats, with integers widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Integer(i) => Some(*i as f64),
            ConfigValue::UInteger(u) => Some(*u as f64),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a direct child by key. Only mappings have children by key.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Walk a dotted path such as `data_ingestion.root_dir` or `stages.0.name`.
    ///
    /// Segments address mapping keys, or sequence elements by decimal index.
    /// Keys that themselves contain a `.` are only reachable through [`get`].
    ///
    /// [`get`]: ConfigValue::get
    pub fn lookup(&self, path: &str) -> Option<&ConfigValue> {
        path.split('.').try_fold(self, |current, segment| match current {
            ConfigValue::Mapping(map) => map.get(segment),
            ConfigValue::Sequence(items) => {
                segment.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            _ => None,
        })
    }

    /// Convert into a `serde_yaml::Value` so typed structs can be
    /// deserialized from a sub-tree.
    pub(crate) fn to_yaml(&self) -> serde_yaml::Value {
        use serde_yaml::Value;

        match self {
            ConfigValue::Null => Value::Null,
            ConfigValue::Bool(b) => Value::Bool(*b),
            ConfigValue::Integer(i) => Value::Number((*i).into()),
            ConfigValue::UInteger(u) => Value::Number((*u).into()),
            ConfigValue::Float(f) => Value::Number(serde_yaml::Number::from(*f)),
            ConfigValue::String(s) => Value::String(s.clone()),
            ConfigValue::Sequence(items) => {
                Value::Sequence(items.iter().map(ConfigValue::to_yaml).collect())
            }
            ConfigValue::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(k, v)| (Value::String(k.clone()), v.to_yaml()))
                    .collect(),
            ),
        }
    }
}

/// Missing keys index to `Null`, the same way `serde_json::Value` does.
impl Index<&str> for ConfigValue {
    type Output = ConfigValue;

    fn index(&self, key: &str) -> &ConfigValue {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for ConfigValue {
    type Output = ConfigValue;

    fn index(&self, index: usize) -> &ConfigValue {
        self.as_sequence()
            .and_then(|items| items.get(index))
            .unwrap_or(&NULL)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Integer(i) => write!(f, "{i}"),
            ConfigValue::UInteger(u) => write!(f, "{u}"),
            ConfigValue::Float(x) => write!(f, "{x}"),
            ConfigValue::String(s) => write!(f, "{s}"),
            ConfigValue::Sequence(items) => write!(f, "<sequence of {}>", items.len()),
            ConfigValue::Mapping(map) => write!(f, "<mapping of {}>", map.len()),
        }
    }
}

impl PartialEq<i64> for ConfigValue {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl PartialEq<u64> for ConfigValue {
    fn eq(&self, other: &u64) -> bool {
        self.as_u64() == Some(*other)
    }
}

impl PartialEq<i32> for ConfigValue {
    fn eq(&self, other: &i32) -> bool {
        self.as_i64() == Some(i64::from(*other))
    }
}

impl PartialEq<f64> for ConfigValue {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, ConfigValue::Float(f) if f == other)
    }
}

impl PartialEq<bool> for ConfigValue {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<str> for ConfigValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for ConfigValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<String> for ConfigValue {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}
