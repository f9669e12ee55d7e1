//! Making a schema index visible to `Flattened<T>` deserialization
//!
//! serde gives a `Deserialize` impl no way to receive extra context, so the index is
//! looked up from ambient state instead. A [`Flattener`] can be installed once for the
//! whole process, or put in scope for a closure on the current thread. A scoped
//! flattener takes precedence over the global one.

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::context::{CustomDeserializers, DeserializeContext};
use crate::error::{Error, Result};
use crate::flattened::Flattened;
use crate::schema_index::SchemaIndex;
use crate::type_key::TypeKey;

/// Process-wide flattener, set at most once
static GLOBAL_FLATTENER: OnceLock<Flattener> = OnceLock::new();

thread_local! {
    static SCOPED_FLATTENER: RefCell<Option<Flattener>> = const { RefCell::new(None) };
}

/// A schema index plus the deserializers used for located values
///
/// Cloning is cheap; clones share the same index.
#[derive(Debug, Clone)]
pub struct Flattener {
    inner: Arc<FlattenerInner>,
}

#[derive(Debug)]
struct FlattenerInner {
    index:         SchemaIndex,
    deserializers: CustomDeserializers,
}

impl Flattener {
    /// A flattener that deserializes located values with serde
    #[must_use]
    pub fn new(index: SchemaIndex) -> Self {
        Self::with_deserializers(index, CustomDeserializers::new())
    }

    /// A flattener with per-type deserializer overrides
    #[must_use]
    pub fn with_deserializers(index: SchemaIndex, deserializers: CustomDeserializers) -> Self {
        Self {
            inner: Arc::new(FlattenerInner {
                index,
                deserializers,
            }),
        }
    }

    /// The schema index
    #[must_use]
    pub fn index(&self) -> &SchemaIndex {
        &self.inner.index
    }

    /// The deserializers used for located values
    #[must_use]
    pub fn deserializers(&self) -> &CustomDeserializers {
        &self.inner.deserializers
    }

    /// Install as the process-wide flattener
    ///
    /// # Errors
    /// Returns [`Error::AlreadyInstalled`] on every call after the first.
    pub fn install(self) -> Result<()> {
        GLOBAL_FLATTENER
            .set(self)
            .map_err(|_| Error::AlreadyInstalled.into_report())?;
        tracing::debug!("Installed global flattener");
        Ok(())
    }

    /// The process-wide flattener, if installed
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL_FLATTENER.get()
    }

    /// The flattener in effect on this thread: the scoped one, else the global one
    #[must_use]
    pub fn current() -> Option<Self> {
        SCOPED_FLATTENER
            .with_borrow(Clone::clone)
            .or_else(|| Self::global().cloned())
    }

    /// Run `f` with this flattener in scope on the current thread
    ///
    /// The previously scoped flattener is restored afterwards, also when `f` panics.
    #[must_use]
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        let previous = SCOPED_FLATTENER.replace(Some(self.clone()));
        let _restore = ScopeRestore { previous };
        f()
    }

    /// Deserialize a root from a JSON string with this flattener in scope
    ///
    /// # Errors
    /// Returns an error if `json` is malformed or does not match `R`, including a
    /// located value that cannot be deserialized into its wrapped type.
    pub fn deserialize_str<R: DeserializeOwned>(&self, json: &str) -> serde_json::Result<R> {
        self.scope(|| serde_json::from_str(json))
    }

    /// Deserialize a root from a JSON value with this flattener in scope
    ///
    /// # Errors
    /// Returns an error if `value` does not match `R`.
    pub fn deserialize_value<R: DeserializeOwned>(&self, value: Value) -> serde_json::Result<R> {
        self.scope(|| serde_json::from_value(value))
    }

    /// Resolve the value of a `Flattened<T>` field
    ///
    /// Types without registered paths are deserialized from the field value itself.
    pub(crate) fn resolve_field<T>(&self, value: &Value) -> serde_json::Result<Flattened<T>>
    where
        T: DeserializeOwned + 'static,
    {
        if let Some(resolved) = self.index().resolve::<T, _>(value, self.deserializers())? {
            return Ok(resolved);
        }

        tracing::trace!(
            "No paths registered for {}, deserializing field value in place",
            TypeKey::of::<T>().short_name()
        );
        self.deserializers()
            .deserialize(value)
            .map(Flattened::present)
    }
}

struct ScopeRestore {
    previous: Option<Flattener>,
}

impl Drop for ScopeRestore {
    fn drop(&mut self) {
        let previous = self.previous.take();
        SCOPED_FLATTENER.set(previous);
    }
}
