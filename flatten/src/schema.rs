//! Declarative descriptions of root structs and their fields
//!
//! A [`SchemaDescriptor`] is the table the index builder scans: one entry per declared
//! field, in declaration order, each saying whether the field wraps a value in
//! `Flattened<T>` and which path (if any) it was annotated with.
//!
//! Descriptors are usually generated by `#[derive(FlattenSchema)]`, but they can be
//! assembled by hand for roots that cannot carry the derive:
//!
//! ```
//! use json_flatten::{FieldDescriptor, SchemaDescriptor};
//!
//! let descriptor = SchemaDescriptor::new("Response")
//!     .field(FieldDescriptor::new("id"))
//!     .field(
//!         FieldDescriptor::new("value")
//!             .wrapping::<bool>()
//!             .with_path("second::third"),
//!     );
//!
//! assert_eq!(descriptor.fields().len(), 2);
//! ```

use crate::type_key::TypeKey;

/// One declared field of a root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name:         String,
    wrapped_type: Option<TypeKey>,
    flatten_path: Option<String>,
}

impl FieldDescriptor {
    /// A plain field: not wrapped, not annotated
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:         name.into(),
            wrapped_type: None,
            flatten_path: None,
        }
    }

    /// Mark the field as declared `Flattened<T>`
    #[must_use]
    pub fn wrapping<T: 'static>(mut self) -> Self {
        self.wrapped_type = Some(TypeKey::of::<T>());
        self
    }

    /// Attach the raw `::`-delimited flatten path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.flatten_path = Some(path.into());
        self
    }

    /// Field name as declared
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wrapped value type, `None` when the field is not a `Flattened<T>`
    #[must_use]
    pub const fn wrapped_type(&self) -> Option<TypeKey> {
        self.wrapped_type
    }

    /// Raw flatten path, `None` when the field is not annotated
    #[must_use]
    pub fn flatten_path(&self) -> Option<&str> {
        self.flatten_path.as_deref()
    }

    /// Whether the field carries a flatten path
    #[must_use]
    pub const fn is_annotated(&self) -> bool {
        self.flatten_path.is_some()
    }
}

/// Field table of one root struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    name:   String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaDescriptor {
    /// An empty descriptor for the named root
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            fields: Vec::new(),
        }
    }

    /// Descriptor of a type implementing [`FlattenSchema`]
    #[must_use]
    pub fn of<T: FlattenSchema>() -> Self {
        T::schema_descriptor()
    }

    /// Append a field, keeping declaration order
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Root name used in diagnostics
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Fields carrying a flatten path
    pub fn annotated_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.is_annotated())
    }
}

/// Types that can describe their own fields to the index builder
///
/// Derive it with `#[derive(FlattenSchema)]` and mark fields with
/// `#[flatten("first::second")]`.
pub trait FlattenSchema {
    /// The declarative field table of this root
    fn schema_descriptor() -> SchemaDescriptor;
}
