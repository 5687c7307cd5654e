//! Tag-keyed metadata store
//!
//! Images carry their attributes in a store keyed by tag name. The overlay
//! core only reads identifiers from it and, when one is missing, writes a
//! generated value back so later reads see the same identifier.
//!
//! [`TagStore::upsert_with`] is a read followed by a write, not atomic. Two
//! threads calling it on the same store before a value exists can both
//! generate a value; the last write wins and both values are valid
//! identifiers. Callers that need a single winner serialize access per image.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Name of a metadata tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagKey(Cow<'static, str>);

impl TagKey {
    /// Series identifier tag
    pub const SERIES_INSTANCE_UID: TagKey = TagKey::from_static("SeriesInstanceUID");
    /// Instance identifier tag
    pub const SOP_INSTANCE_UID: TagKey = TagKey::from_static("SOPInstanceUID");

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TagKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// Value stored under a tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Read/write access to an image's metadata.
///
/// Implementations use interior mutability: the owning image is usually
/// shared between the viewer and the serialization layer.
pub trait TagStore: Send + Sync {
    /// Get the value stored under `key`, if any
    fn get(&self, key: &TagKey) -> Option<TagValue>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: TagKey, value: TagValue);

    /// Return the value under `key`, generating and storing one if absent.
    ///
    /// The default implementation is not atomic (see module docs).
    fn upsert_with(&self, key: &TagKey, make: &mut dyn FnMut() -> TagValue) -> TagValue {
        if let Some(existing) = self.get(key) {
            return existing;
        }
        let value = make();
        tracing::trace!(tag = %key, "storing generated tag value");
        self.set(key.clone(), value.clone());
        value
    }
}

/// In-memory tag store backed by a `parking_lot::RwLock`
#[derive(Debug, Default)]
pub struct MemoryTagStore {
    tags: RwLock<HashMap<TagKey, TagValue>>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries`
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<TagKey>,
        V: Into<TagValue>,
    {
        let tags = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            tags: RwLock::new(tags),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.read().is_empty()
    }

    pub fn remove(&self, key: &TagKey) -> Option<TagValue> {
        self.tags.write().remove(key)
    }
}

impl TagStore for MemoryTagStore {
    fn get(&self, key: &TagKey) -> Option<TagValue> {
        self.tags.read().get(key).cloned()
    }

    fn set(&self, key: TagKey, value: TagValue) {
        self.tags.write().insert(key, value);
    }
}
