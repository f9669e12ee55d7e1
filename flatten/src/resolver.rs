//! Path resolution against a JSON document
//!
//! Resolution never fails because of the document's shape. A missing key, a `null`,
//! or a scalar where an object was expected all just mean "this path did not match",
//! and the next candidate path is tried. The only error that can come out of
//! [`SchemaIndex::resolve`] is the one produced while deserializing the value that
//! was found.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::context::DeserializeContext;
use crate::flattened::Flattened;
use crate::json_kind::JsonKind;
use crate::path_spec::PathSpec;
use crate::schema_index::{SchemaEntry, SchemaIndex};
use crate::type_key::TypeKey;

/// Outcome of locating the value for a wrapped type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The index has no paths for this type
    Unregistered,
    /// The input is not an object, or no registered path matched
    Absent,
    /// The first matching path and the value it reached
    Found {
        /// Value at the end of the path, never `null`
        value: &'a Value,
        /// Entry whose path matched
        entry: &'a SchemaEntry,
    },
}

impl SchemaIndex {
    /// Find the value reached by the first matching path for `key`
    ///
    /// Paths are tried in the order they were registered; the first one that reaches a
    /// present, non-null value wins and later paths are not consulted.
    #[must_use]
    pub fn locate<'a>(&'a self, value: &'a Value, key: &TypeKey) -> Lookup<'a> {
        let Some(entries) = self.paths(key) else {
            return Lookup::Unregistered;
        };

        let kind = JsonKind::of(value);
        if !kind.is_traversable() {
            tracing::trace!("Cannot flatten {} from {} value", key, kind);
            return Lookup::Absent;
        }

        entries
            .iter()
            .find_map(|entry| {
                walk(value, entry.path()).map(|found| Lookup::Found {
                    value: found,
                    entry,
                })
            })
            .unwrap_or(Lookup::Absent)
    }

    /// Resolve and deserialize the value for wrapped type `T`
    ///
    /// Returns `Ok(None)` when `T` is not registered, meaning the caller should fall
    /// back to its default handling. Otherwise returns a present or absent
    /// [`Flattened`].
    ///
    /// # Errors
    /// Returns the error produced by `context` when the located value cannot be
    /// deserialized into `T`. Missing structure in `value` is never an error.
    pub fn resolve<T, C>(
        &self,
        value: &Value,
        context: &C,
    ) -> Result<Option<Flattened<T>>, C::Error>
    where
        T: DeserializeOwned + 'static,
        C: DeserializeContext,
    {
        match self.locate(value, &TypeKey::of::<T>()) {
            Lookup::Unregistered => Ok(None),
            Lookup::Absent => Ok(Some(Flattened::ABSENT)),
            Lookup::Found { value, entry } => {
                tracing::trace!(
                    "Resolved {} via '{}' ({}.{})",
                    TypeKey::of::<T>(),
                    entry.path(),
                    entry.descriptor(),
                    entry.field()
                );
                context.deserialize::<T>(value).map(|found| Some(Flattened::present(found)))
            }
        }
    }
}

/// Walk `path` from `root`, descending one object key per segment
fn walk<'a>(root: &'a Value, path: &PathSpec) -> Option<&'a Value> {
    if path.is_degenerate() {
        tracing::trace!("Skipping degenerate path '{}'", path);
        return None;
    }

    let mut cursor = root;
    for segment in path.segments() {
        let Value::Object(object) = cursor else {
            tracing::trace!(
                "Path '{}' interrupted at '{}' by {} value",
                path,
                segment,
                JsonKind::of(cursor)
            );
            return None;
        };
        cursor = object.get(segment)?;
    }

    (!cursor.is_null()).then_some(cursor)
}
