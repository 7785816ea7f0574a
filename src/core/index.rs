//! Reverse lookup from translated values to dotted key paths.
//!
//! The primary locale file is flattened depth-first in declaration order
//! (`serde_json` is built with `preserve_order`), so when several keys share
//! one value the first declared key is the one that gets used.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use serde_json::Value;

#[derive(Debug, Default, Clone)]
pub struct TranslationIndex {
    keys_by_value: HashMap<String, String>,
}

impl TranslationIndex {
    /// Read and index a locale JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read messages file: {:?}", path))?;
        let dictionary: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse messages file: {:?}", path))?;

        Ok(Self::from_dictionary(&dictionary))
    }

    pub fn from_dictionary(dictionary: &Value) -> Self {
        let mut index = Self::default();
        index.collect(dictionary, "");
        index
    }

    /// Key path for a literal value, if one exists.
    pub fn lookup(&self, value: &str) -> Option<&str> {
        self.keys_by_value.get(value).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys_by_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys_by_value.is_empty()
    }

    fn collect(&mut self, value: &Value, prefix: &str) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    self.collect(child, &path);
                }
            }
            Value::String(text) => {
                // A top-level string has no key path to point at.
                if prefix.is_empty() || text.trim().is_empty() {
                    return;
                }
                self.keys_by_value
                    .entry(text.clone())
                    .or_insert_with(|| prefix.to_string());
            }
            // Arrays are opaque values, never key containers.
            _ => {}
        }
    }
}
