//! Deserialization callbacks used for the value at the end of a path
//!
//! The resolver knows nothing about how a `T` is built from JSON. It hands the
//! located value to a [`DeserializeContext`], which normally just defers to serde.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use crate::type_key::TypeKey;

/// Turns a located JSON value into a concrete type
pub trait DeserializeContext {
    /// Error produced when the value cannot be converted
    type Error;

    /// Deserialize `value` into `T`
    ///
    /// # Errors
    /// Returns an error if `value` does not have the shape `T` expects.
    fn deserialize<T>(&self, value: &Value) -> Result<T, Self::Error>
    where
        T: DeserializeOwned + 'static;
}

/// Plain serde deserialization
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeContext;

impl DeserializeContext for SerdeContext {
    type Error = serde_json::Error;

    fn deserialize<T>(&self, value: &Value) -> Result<T, Self::Error>
    where
        T: DeserializeOwned + 'static,
    {
        <T as Deserialize>::deserialize(value)
    }
}

type BoxedDeserializer = Box<dyn Fn(&Value) -> serde_json::Result<Box<dyn Any>> + Send + Sync>;

/// Per-type deserializer overrides, falling back to serde for every other type
///
/// Overrides apply to the value located at the end of a path, not to values nested
/// inside it.
///
/// ```
/// use json_flatten::{CustomDeserializers, DeserializeContext};
/// use serde_json::json;
///
/// let deserializers = CustomDeserializers::new().register(|value| {
///     value
///         .as_bool()
///         .map(i64::from)
///         .ok_or_else(|| serde::de::Error::custom("expected a boolean"))
/// });
///
/// let one: i64 = deserializers.deserialize(&json!(true))?;
/// assert_eq!(one, 1);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Default)]
pub struct CustomDeserializers {
    by_type: HashMap<TypeKey, BoxedDeserializer>,
}

impl CustomDeserializers {
    /// No overrides: behaves like [`SerdeContext`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the deserializer used for `T`, replacing any earlier one
    #[must_use]
    pub fn register<T, F>(mut self, deserializer: F) -> Self
    where
        T: 'static,
        F: Fn(&Value) -> serde_json::Result<T> + Send + Sync + 'static,
    {
        self.by_type.insert(
            TypeKey::of::<T>(),
            Box::new(move |value: &Value| {
                deserializer(value).map(|found| Box::new(found) as Box<dyn Any>)
            }),
        );
        self
    }

    /// Whether `key` has an override
    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.by_type.contains_key(key)
    }

    /// Number of overrides
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Whether there are no overrides
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl fmt::Debug for CustomDeserializers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.by_type.keys().map(TypeKey::name))
            .finish()
    }
}

impl DeserializeContext for CustomDeserializers {
    type Error = serde_json::Error;

    fn deserialize<T>(&self, value: &Value) -> Result<T, Self::Error>
    where
        T: DeserializeOwned + 'static,
    {
        let key = TypeKey::of::<T>();
        let Some(custom) = self.by_type.get(&key) else {
            return SerdeContext.deserialize(value);
        };

        custom(value)?.downcast::<T>().map(|found| *found).map_err(|_| {
            serde_json::Error::custom(format!(
                "custom deserializer registered for {key} produced another type"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "test assertions")]

    use serde::de::Error as _;
    use serde_json::json;

    use super::*;

    fn bool_as_int() -> CustomDeserializers {
        CustomDeserializers::new().register(|value| {
            value
                .as_bool()
                .map(i64::from)
                .ok_or_else(|| serde_json::Error::custom("expected a boolean"))
        })
    }

    #[test]
    fn test_serde_context_defers_to_serde() {
        let numbers: Vec<u8> = SerdeContext
            .deserialize(&json!([1, 2, 3]))
            .expect("array of bytes");
        assert_eq!(numbers, [1, 2, 3]);
    }

    #[test]
    fn test_override_is_used_for_registered_type() {
        let deserializers = bool_as_int();
        assert!(deserializers.contains(&TypeKey::of::<i64>()));
        assert_eq!(deserializers.len(), 1);

        let one: i64 = deserializers.deserialize(&json!(true)).expect("boolean input");
        let zero: i64 = deserializers.deserialize(&json!(false)).expect("boolean input");
        assert_eq!((one, zero), (1, 0));
    }

    #[test]
    fn test_override_errors_propagate() {
        let error = bool_as_int()
            .deserialize::<i64>(&json!(33))
            .expect_err("numbers are rejected by the override");
        assert!(error.to_string().contains("expected a boolean"));
    }

    #[test]
    fn test_other_types_fall_back_to_serde() {
        let text: String = bool_as_int()
            .deserialize(&json!("plain"))
            .expect("strings use serde");
        assert_eq!(text, "plain");
    }
}
