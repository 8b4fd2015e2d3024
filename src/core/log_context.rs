//! Extra data for one event, and persistent fields for every event

use super::field::FieldValue;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type SharedFields = Arc<RwLock<BTreeMap<String, FieldValue>>>;

/// Extra data passed to a single `emit` call
///
/// Keys are kept sorted so every layout renders them in the same order.
///
/// ```
/// use lockless_logger::LogContext;
///
/// let extra = LogContext::new().with_field("req_id", 42).with_field("user", "alice");
/// assert_eq!(extra.to_string(), "req_id=42 user=alice");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext {
    fields: BTreeMap<String, FieldValue>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.add_field(key, value);
        self
    }

    /// Insert or overwrite `key`
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `k=v` pairs separated by single spaces
    pub fn format_fields(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = LogContext::new();
        context.extend(iter);
        context
    }
}

impl<K, V> Extend<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add_field(key, value);
        }
    }
}

/// Fields merged beneath the extra data of every event a logger emits
///
/// Clones share the same fields. Writers take a short lock here; the
/// device write itself stays lock-free.
///
/// ```
/// use lockless_logger::LoggerContext;
///
/// let ctx = LoggerContext::new();
/// ctx.set("service", "api-gateway");
/// ctx.set("version", "1.2.3");
/// assert_eq!(ctx.get_fields().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerContext {
    fields: SharedFields,
}

impl LoggerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`
    pub fn set(&self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<FieldValue> {
        self.fields.write().remove(key)
    }

    pub fn clear(&self) {
        self.fields.write().clear();
    }

    /// Snapshot of the current fields
    pub fn get_fields(&self) -> BTreeMap<String, FieldValue> {
        self.fields.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.read().len()
    }

    /// Set `key` until the returned guard is dropped
    pub fn scoped(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> ContextGuard {
        let key = key.into();
        self.set(key.clone(), value);
        ContextGuard {
            fields: Arc::clone(&self.fields),
            key,
        }
    }
}

/// Removes its field from the [`LoggerContext`] on drop
///
/// ```
/// use lockless_logger::Logger;
///
/// let logger = Logger::null();
/// {
///     let _guard = logger.with_context("request_id", "abc-123");
///     assert!(logger.context().get_fields().contains_key("request_id"));
/// }
/// assert!(logger.context().is_empty());
/// ```
#[must_use = "the field is removed as soon as the guard is dropped"]
pub struct ContextGuard {
    fields: SharedFields,
    key: String,
}

impl fmt::Debug for ContextGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextGuard").field("key", &self.key).finish()
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        self.fields.write().remove(&self.key);
    }
}
