use error_stack::Report;
use thiserror::Error;

use crate::constants::MSG_WRAPPER_TYPE;

/// Result type for the `json_flatten` library
pub type Result<T> = std::result::Result<T, Report<Error>>;

/// Configuration errors raised while building or installing a schema index
///
/// None of these can happen while resolving a document. They point at a schema
/// declaration that has to be fixed before the application can start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The root descriptor list was empty
    #[error("Configuration error: at least one root schema containing flattened fields is required")]
    NoRootsSupplied,

    /// A root descriptor exposed no fields
    #[error("Configuration error: cannot enumerate any fields of `{descriptor}`")]
    UnenumerableDescriptor {
        /// Name of the offending root descriptor
        descriptor: String,
    },

    /// A field carries a flatten path but is not declared as `Flattened<T>`
    #[error("Configuration error: field `{field}` in `{descriptor}` is not wrapped into `Flattened<_>`")]
    FieldNotWrapped {
        /// Name of the offending field
        field:      String,
        /// Name of the root descriptor that declares the field
        descriptor: String,
    },

    /// A process-wide flattener was already installed
    #[error("Invalid state: a global flattener is already installed")]
    AlreadyInstalled,
}

impl Error {
    /// Create an `UnenumerableDescriptor` error
    #[must_use]
    pub fn unenumerable(descriptor: impl Into<String>) -> Self {
        Self::UnenumerableDescriptor {
            descriptor: descriptor.into(),
        }
    }

    /// Create a `FieldNotWrapped` error
    #[must_use]
    pub fn not_wrapped(field: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self::FieldNotWrapped {
            field:      field.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Whether this error comes from a malformed schema declaration
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::AlreadyInstalled)
    }

    /// Hint attached to reports, telling the caller how to fix the declaration
    pub(crate) fn hint(&self) -> String {
        match self {
            Self::NoRootsSupplied => {
                "Pass every struct that declares #[flatten] fields when building the index"
                    .to_string()
            }
            Self::UnenumerableDescriptor { .. } => {
                "Roots must declare at least one field; register the structs that own flattened fields"
                    .to_string()
            }
            Self::FieldNotWrapped { field, .. } => {
                format!("Declare `{field}` as `{MSG_WRAPPER_TYPE}` or remove its flatten path")
            }
            Self::AlreadyInstalled => {
                "Install the global flattener once at startup, or use a scoped flattener".to_string()
            }
        }
    }

    /// Wrap into a report carrying the fix-it hint
    pub(crate) fn into_report(self) -> Report<Self> {
        let hint = self.hint();
        Report::new(self).attach(hint)
    }
}
