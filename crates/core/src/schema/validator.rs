use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::value::Value;

/// Absolute POSIX or Windows path.
pub static ABSOLUTE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/|[A-Za-z]:\\|\\\\).*").expect("valid path pattern"));

/// http(s) URL.
pub static HTTP_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid url pattern"));

/// Value constraint checked on known values.
#[derive(Debug, Clone)]
pub enum Validator {
    OneOfInt(Vec<i64>),
    OneOfString(Vec<String>),
    Matches { pattern: Regex, description: String },
}

impl Validator {
    pub fn one_of_int(values: &[i64]) -> Self {
        Validator::OneOfInt(values.to_vec())
    }

    pub fn one_of_string(values: &[&str]) -> Self {
        Validator::OneOfString(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn matches(pattern: &Regex, description: impl Into<String>) -> Self {
        Validator::Matches {
            pattern: pattern.clone(),
            description: description.into(),
        }
    }

    /// Check a known value. Set elements are checked one by one.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        if let Value::Set(items) = value {
            return items.iter().try_for_each(|item| self.check(item));
        }

        match self {
            Validator::OneOfInt(allowed) => match value.as_i64() {
                Some(v) if allowed.contains(&v) => Ok(()),
                _ => Err(format!(
                    "value must be one of: {}",
                    allowed
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                )),
            },
            Validator::OneOfString(allowed) => match value.as_str() {
                Some(v) if allowed.iter().any(|a| a == v) => Ok(()),
                _ => Err(format!(
                    "value must be one of: {}",
                    allowed
                        .iter()
                        .map(|a| format!("\"{}\"", a))
                        .collect::<Vec<_>>()
                        .join(", ")
                )),
            },
            Validator::Matches {
                pattern,
                description,
            } => match value.as_str() {
                Some(v) if pattern.is_match(v) => Ok(()),
                _ => Err(format!("value must be {}", description)),
            },
        }
    }
}

impl Serialize for Validator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Validator::OneOfInt(values) => map.serialize_entry("one_of", values)?,
            Validator::OneOfString(values) => map.serialize_entry("one_of", values)?,
            Validator::Matches { pattern, .. } => map.serialize_entry("matches", pattern.as_str())?,
        }
        map.end()
    }
}
