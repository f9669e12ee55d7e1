//! Immutable index from wrapped value type to candidate paths
//!
//! The index is built once from the root descriptors and never changes afterwards.
//! Several fields may wrap the same type (in the same root or across roots); their
//! paths end up in one list, in the order the fields were encountered.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::path_spec::PathSpec;
use crate::schema::{FlattenSchema, SchemaDescriptor};
use crate::type_key::TypeKey;

/// A registered path together with the field that declared it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    path:       PathSpec,
    descriptor: String,
    field:      String,
}

impl SchemaEntry {
    /// The parsed path
    #[must_use]
    pub const fn path(&self) -> &PathSpec {
        &self.path
    }

    /// Root descriptor that declared the path
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Field that declared the path
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

/// Read-only map from wrapped value type to its ordered candidate paths
///
/// Every key maps to at least one entry. There is no way to modify an index once it
/// is built; build a new one instead.
#[derive(Debug, Clone)]
pub struct SchemaIndex {
    entries: HashMap<TypeKey, Box<[SchemaEntry]>>,
}

impl SchemaIndex {
    /// Build the index from root descriptors
    ///
    /// Roots are scanned in the order given, fields in declaration order. The first
    /// malformed declaration aborts the build.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `roots` is empty ([`Error::NoRootsSupplied`])
    /// - a root declares no fields ([`Error::UnenumerableDescriptor`])
    /// - a field has a flatten path but is not `Flattened<T>` ([`Error::FieldNotWrapped`])
    pub fn build<I>(roots: I) -> Result<Self>
    where
        I: IntoIterator<Item = SchemaDescriptor>,
    {
        let mut entries: HashMap<TypeKey, Vec<SchemaEntry>> = HashMap::new();
        let mut root_count = 0_usize;

        for root in roots {
            root_count += 1;

            if root.fields().is_empty() {
                return Err(Error::unenumerable(root.name()).into_report());
            }

            for field in root.annotated_fields() {
                let Some(raw_path) = field.flatten_path() else {
                    continue;
                };
                let Some(wrapped_type) = field.wrapped_type() else {
                    return Err(Error::not_wrapped(field.name(), root.name())
                        .into_report()
                        .attach(format!("Flatten path: \"{raw_path}\"")));
                };

                let path = PathSpec::parse(raw_path);
                tracing::debug!(
                    "Registering path '{}' for {} from {}.{}",
                    path,
                    wrapped_type,
                    root.name(),
                    field.name()
                );

                entries.entry(wrapped_type).or_default().push(SchemaEntry {
                    path,
                    descriptor: root.name().to_string(),
                    field: field.name().to_string(),
                });
            }
        }

        if root_count == 0 {
            return Err(Error::NoRootsSupplied.into_report());
        }

        tracing::debug!(
            "Built schema index: {} roots, {} wrapped types",
            root_count,
            entries.len()
        );

        Ok(Self {
            entries: entries
                .into_iter()
                .map(|(key, list)| (key, list.into_boxed_slice()))
                .collect(),
        })
    }

    /// Start a fluent builder
    #[must_use]
    pub fn builder() -> SchemaIndexBuilder {
        SchemaIndexBuilder::default()
    }

    /// Candidate entries for a wrapped type, in priority order
    #[must_use]
    pub fn paths(&self, key: &TypeKey) -> Option<&[SchemaEntry]> {
        self.entries.get(key).map(AsRef::as_ref)
    }

    /// Whether the index has an opinion about this type
    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of registered wrapped types
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no type is registered (every root had only plain fields)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects root descriptors before building a [`SchemaIndex`]
#[derive(Debug, Default)]
pub struct SchemaIndexBuilder {
    roots: Vec<SchemaDescriptor>,
}

impl SchemaIndexBuilder {
    /// Add a root that implements [`FlattenSchema`]
    #[must_use]
    pub fn root<T: FlattenSchema>(mut self) -> Self {
        self.roots.push(T::schema_descriptor());
        self
    }

    /// Add a hand-assembled root descriptor
    #[must_use]
    pub fn descriptor(mut self, descriptor: SchemaDescriptor) -> Self {
        self.roots.push(descriptor);
        self
    }

    /// Build the index
    ///
    /// # Errors
    /// Fails for the same declarations as [`SchemaIndex::build`].
    pub fn build(self) -> Result<SchemaIndex> {
        SchemaIndex::build(self.roots)
    }
}
