//! Template context passed to the engine.
//!
//! A [`RenderContext`] maps names to the values a template can see. Values are
//! [`minijinja::Value`]s, so a context can hold plain data (strings, numbers,
//! nested maps and lists) next to live objects such as the
//! [`FileSystemLoader`](crate::FileSystemLoader) the adapter injects.
//!
//! Keys are kept in sorted order, so two contexts built from the same entries
//! always present identically to the engine. To build a context from a typed
//! value, go through [`Payload`](crate::Payload), which reports values that
//! cannot become a context.
//!
//! # Example
//!
//! ```rust
//! use stencil_render::RenderContext;
//!
//! let mut context = RenderContext::new();
//! context.insert("name", "World");
//! context.insert("count", 3);
//!
//! assert_eq!(context.len(), 2);
//! assert_eq!(context.get("name").and_then(|v| v.as_str()), Some("World"));
//! ```

use std::collections::BTreeMap;

use minijinja::Value;
use serde::Serialize;

/// Context key the adapter reserves for the template loader.
///
/// Any caller-supplied value under this key is overwritten before rendering.
pub const RESERVED_LOADER_KEY: &str = "loader";

/// String-keyed values visible to a template during rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    entries: BTreeMap<String, Value>,
}

impl RenderContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous value under that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Inserts any serializable value under `key`.
    pub fn insert_serialize<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Option<Value> {
        self.insert(key, Value::from_serialize(value))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Returns a copy of this context with `loader` bound to
    /// [`RESERVED_LOADER_KEY`], replacing whatever the caller put there.
    pub fn with_loader(&self, loader: Value) -> Self {
        let mut augmented = self.clone();
        augmented.insert(RESERVED_LOADER_KEY, loader);
        augmented
    }

    /// Converts the context into a single map value for the engine.
    pub fn to_value(&self) -> Value {
        Value::from(self.entries.clone())
    }
}

impl<K, V> FromIterator<(K, V)> for RenderContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, Value>> for RenderContext {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a RenderContext {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
