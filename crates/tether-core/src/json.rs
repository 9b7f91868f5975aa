//! Dynamic JSON values.
//!
//! [`Json`] wraps a payload whose shape is not known at compile time: a
//! raw byte buffer (the canonical encoded form) plus a parsed read-only
//! view derived from it. The two never diverge: every mutation produces
//! a new value with a freshly derived buffer, so holders of the original
//! are never affected.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::Value;
use thiserror::Error;

/// A path-based mutation could not be applied.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("empty patch path")]
    EmptyPath,
    #[error("empty segment in patch path {path:?}")]
    EmptySegment { path: String },
    #[error("segment {segment:?} does not index an array")]
    NotAnIndex { segment: String },
    #[error("array index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("failed to encode patch value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A JSON value backed by its canonical encoded bytes.
///
/// The default value has an empty buffer and encodes as JSON `null`.
/// Buffers handed in through [`Json::from_raw`] are adopted as-is, even
/// when they are not valid JSON: reads against such a value return
/// absent/empty results instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Json {
    raw: Vec<u8>,
    view: Value,
}

impl Json {
    /// Encode any structured value once and wrap the result.
    pub fn new(val: impl Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self::from_value(serde_json::to_value(val)?))
    }

    /// Wrap an already-parsed value, deriving its canonical buffer.
    pub fn from_value(view: Value) -> Self {
        let raw = view.to_string().into_bytes();
        Self { raw, view }
    }

    /// Adopt raw bytes as the canonical buffer.
    pub fn from_raw(raw: impl Into<Vec<u8>>) -> Self {
        let raw = raw.into();
        let view = serde_json::from_slice(&raw).unwrap_or(Value::Null);
        Self { raw, view }
    }

    /// The canonical buffer. Empty for the default value.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The parsed read view. `Null` when the buffer is empty or malformed.
    pub fn value(&self) -> &Value {
        &self.view
    }

    /// The bytes this value puts on the wire: the canonical buffer, or
    /// `null` when the buffer is empty.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.raw.is_empty() {
            b"null".to_vec()
        } else {
            self.raw.clone()
        }
    }

    /// Query a dot-separated path (`"a.b.0.c"`). Array segments must be
    /// decimal indices. Returns `None` when any step is missing.
    pub fn get(&self, path: &str) -> Option<Json> {
        if path.is_empty() {
            return None;
        }
        let mut current = &self.view;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(Json::from_value(current.clone()))
    }

    /// Iterate the elements of an array value, in stored order.
    ///
    /// Non-array values yield an empty iterator. Each call re-derives the
    /// sequence from the stored data; nothing is consumed.
    pub fn iter(&self) -> impl Iterator<Item = Json> + '_ {
        self.view
            .as_array()
            .into_iter()
            .flatten()
            .map(|el| Json::from_value(el.clone()))
    }

    /// Join the scalar renderings of an array's elements.
    ///
    /// An empty array (or a non-array value) joins to an empty string.
    pub fn join(&self, sep: &str) -> String {
        self.iter()
            .map(|el| el.scalar_string())
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Scalar rendering: strings unquoted, numbers and booleans in their
    /// JSON form, `null` as the empty string, containers as raw JSON.
    pub fn scalar_string(&self) -> String {
        match &self.view {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.view.as_str()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.view.as_f64()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.view.as_i64()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.view.as_bool()
    }

    /// Patch `path` with `value`'s encoding and return the result as a
    /// new value. The receiver is never modified, even on failure.
    ///
    /// Missing intermediate objects are created; descending through a
    /// scalar or `null` replaces it with an object. Array segments must
    /// be in-bounds indices or one-past-the-end (append).
    pub fn set(&self, path: &str, value: impl Serialize) -> Result<Json, PatchError> {
        if path.is_empty() {
            return Err(PatchError::EmptyPath);
        }
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PatchError::EmptySegment {
                path: path.to_string(),
            });
        }
        let patch_value = serde_json::to_value(value)?;
        let mut root = self.view.clone();
        patch(&mut root, &segments, patch_value)?;
        Ok(Json::from_value(root))
    }
}

/// Walk `segments` down from `node`, replacing the addressed slot.
fn patch(node: &mut Value, segments: &[&str], value: Value) -> Result<(), PatchError> {
    let Some((head, rest)) = segments.split_first() else {
        *node = value;
        return Ok(());
    };
    match node {
        Value::Array(arr) => {
            let index: usize = head.parse().map_err(|_| PatchError::NotAnIndex {
                segment: head.to_string(),
            })?;
            if index < arr.len() {
                patch(&mut arr[index], rest, value)
            } else if index == arr.len() {
                let mut slot = Value::Null;
                patch(&mut slot, rest, value)?;
                arr.push(slot);
                Ok(())
            } else {
                Err(PatchError::OutOfBounds {
                    index,
                    len: arr.len(),
                })
            }
        }
        Value::Object(map) => {
            let slot = map.entry(head.to_string()).or_insert(Value::Null);
            patch(slot, rest, value)
        }
        _ => {
            // Scalars and null cannot be descended through; replace with
            // an object and retry the same segment.
            *node = Value::Object(serde_json::Map::new());
            patch(node, segments, value)
        }
    }
}

impl Serialize for Json {
    /// Emits the canonical buffer verbatim; an empty buffer emits `null`.
    ///
    /// A malformed buffer cannot be embedded in a JSON document as-is, so
    /// it falls back to the parsed view (`null`).
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.raw.is_empty() {
            return serializer.serialize_unit();
        }
        let verbatim = std::str::from_utf8(&self.raw)
            .ok()
            .and_then(|s| RawValue::from_string(s.to_owned()).ok());
        match verbatim {
            Some(raw) => raw.serialize(serializer),
            None => self.view.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Json {
    /// Adopts the incoming bytes as the new canonical buffer.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Json::from_raw(raw.get().as_bytes().to_vec()))
    }
}
