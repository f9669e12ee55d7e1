//! Identity of the value type wrapped by a `Flattened<T>` field
//!
//! The schema index is keyed by the wrapped type. Two fields that wrap the same
//! type share one list of candidate paths, regardless of which root declares them.

use std::any::{TypeId, type_name};
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// A type identity used as the schema index key
///
/// Equality and hashing only look at the `TypeId`. The type name is carried along
/// for log output and error messages.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id:   TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for type `T`
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id:   TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Fully-qualified type name (e.g. `alloc::vec::Vec<i64>`)
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Get the short name (last segment after ::)
    /// For example: `alloc::string::String` returns `String`
    /// For generic types the generic arguments are kept as written: `Vec<i64>`
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let base_end = self.name.find('<').unwrap_or(self.name.len());
        let start = self.name[..base_end].rfind("::").map_or(0, |pos| pos + 2);
        &self.name[start..]
    }

    /// Whether this key identifies `T`
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
