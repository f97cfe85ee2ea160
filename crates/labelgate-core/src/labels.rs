//! Label sets and the JSON label file loader.
//!
//! A label file is a flat JSON object. String values are taken as-is,
//! numbers keep their JSON form (`1.0` stays `1.0`), and anything else rejects
//! the whole file so a reload never produces a partial set.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{LabelgateError, Result};

/// Immutable mapping from label name to label value.
///
/// Stored sorted by name so the rendered fragment is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: BTreeMap<String, String>,
}

impl LabelSet {
    /// Build a set from `(name, value)` pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut labels = BTreeMap::new();
        for (k, v) in pairs {
            let k = k.into();
            if k.is_empty() {
                return Err(LabelgateError::EmptyLabelName);
            }
            labels.insert(k, v.into());
        }
        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `a="1",b="2"` with no trailing separator.
    ///
    /// Values are escaped per the exposition format (`\`, `"`, newline).
    pub fn fragment(&self) -> String {
        self.labels
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Read and decode a label file.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<LabelSet> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|source| LabelgateError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&s)
}

/// Decode a label file body.
pub fn load_from_str(s: &str) -> Result<LabelSet> {
    let raw: Value =
        serde_json::from_str(s).map_err(|e| LabelgateError::InvalidJson(e.to_string()))?;
    let Value::Object(obj) = raw else {
        return Err(LabelgateError::NotAnObject);
    };

    let mut labels = BTreeMap::new();
    for (key, value) in obj {
        if key.is_empty() {
            return Err(LabelgateError::EmptyLabelName);
        }
        let rendered = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(LabelgateError::UnsupportedValue {
                    key,
                    kind: value_kind(&other),
                })
            }
        };
        labels.insert(key, rendered);
    }

    tracing::debug!(labels = labels.len(), "label file decoded");
    Ok(LabelSet { labels })
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
