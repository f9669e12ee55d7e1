//! The value container declared on flattened fields

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::context::{DeserializeContext, SerdeContext};
use crate::flattener::Flattener;

/// A value found by walking a flatten path, or nothing
///
/// Declare fields as `Flattened<T>` and annotate them with `#[flatten("a::b")]`.
/// Deserializing the field walks the path starting from the field's own JSON value.
/// A missing field, a `null`, or a path that does not match all produce an absent
/// value rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flattened<T>(Option<T>);

impl<T> Flattened<T> {
    /// The shared absent value
    pub const ABSENT: Self = Self(None);

    /// A present value
    #[must_use]
    pub const fn present(value: T) -> Self {
        Self(Some(value))
    }

    /// The absent value
    #[must_use]
    pub const fn absent() -> Self {
        Self::ABSENT
    }

    /// The value, `None` when absent
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Whether a value is present
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.0.is_some()
    }

    /// Take the value out
    #[must_use]
    pub const fn into_inner(self) -> Option<T> {
        self.0
    }

    /// Map a present value
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Flattened<U> {
        Flattened(self.0.map(f))
    }
}

impl<T> Default for Flattened<T> {
    fn default() -> Self {
        Self::ABSENT
    }
}

impl<T> From<Option<T>> for Flattened<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> From<Flattened<T>> for Option<T> {
    fn from(flattened: Flattened<T>) -> Self {
        flattened.0
    }
}

impl<'de, T> Deserialize<'de> for Flattened<T>
where
    T: DeserializeOwned + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `Option` so that both a missing field and `null` come through as `None`
        let Some(value) = Option::<Value>::deserialize(deserializer)? else {
            return Ok(Self::ABSENT);
        };

        let resolved = match Flattener::current() {
            Some(flattener) => flattener.resolve_field(&value),
            None => {
                tracing::trace!("No flattener in scope, deserializing field value in place");
                SerdeContext.deserialize(&value).map(Self::present)
            }
        };
        resolved.map_err(D::Error::custom)
    }
}
