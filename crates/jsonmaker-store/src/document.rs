use std::io::Write;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::value::{json_type_name, ScalarValue, ValueType};

/// Indentation used for every rendered or saved document.
pub const INDENT: &[u8] = b"    ";

/// An insertion-ordered mapping from keys to scalar values.
///
/// Every value held here is one of the four [`ScalarValue`] shapes and every
/// key is non-blank; both [`Document::insert`] and the load path reject
/// anything else, so a document is always flat.
///
/// Overwriting an existing key replaces its value in place: the key keeps
/// the position of its first insertion.
///
/// Equality compares key sets and values, not key order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    entries: IndexMap<String, ScalarValue>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce `raw` to `ty` and store it under `key`.
    ///
    /// Both key and value are trimmed. Returns the previous value when the
    /// key already existed. On error the document is unchanged.
    pub fn insert(
        &mut self,
        key: &str,
        raw: &str,
        ty: ValueType,
    ) -> StoreResult<Option<ScalarValue>> {
        let key = key.trim();
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let value = ScalarValue::coerce(raw, ty)?;
        Ok(self.store(key, value))
    }

    // Callers have already trimmed and checked `key`.
    fn store(&mut self, key: &str, value: ScalarValue) -> Option<ScalarValue> {
        let previous = self.entries.insert(key.to_string(), value);
        match &previous {
            Some(old) => debug!(key, old = %old, "overwrote entry"),
            None => debug!(key, len = self.entries.len(), "added entry"),
        }
        previous
    }

    /// Look up the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ScalarValue> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<ScalarValue> {
        let removed = self.entries.shift_remove(key.trim());
        if removed.is_some() {
            debug!(key, "removed entry");
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the document holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    // ---- JSON ----

    /// Render the document as 4-space-indented JSON.
    ///
    /// An empty document renders as `{}`. There is no trailing newline.
    pub fn render(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }

    /// Write the rendered JSON to `writer`.
    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut ser)
    }

    /// Parse and validate JSON text.
    pub fn from_json_str(text: &str) -> StoreResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    /// Validate a decoded JSON value.
    ///
    /// The top level must be an object, every key must be non-blank and
    /// every member a string, number or boolean. Key order is kept.
    pub fn from_json_value(value: Value) -> StoreResult<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::NotAnObject {
                    found: json_type_name(&other),
                })
            }
        };

        let mut entries = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            if key.trim().is_empty() {
                return Err(StoreError::BlankKey { key });
            }
            let scalar = ScalarValue::from_json(&value).map_err(|found| {
                StoreError::UnsupportedValue {
                    key: key.clone(),
                    found,
                }
            })?;
            entries.insert(key, scalar);
        }
        Ok(Self { entries })
    }
}

impl FromStr for Document {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}
