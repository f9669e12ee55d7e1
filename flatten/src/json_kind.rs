//! JSON value kinds used when describing why a path walk stopped
//!
//! A path walk only descends through objects. When it runs into anything else the
//! kind of that value ends up in the trace output, so the names below match the
//! JSON vocabulary rather than the `serde_json::Value` variant names.

use serde_json::Value;
use strum::{AsRefStr, Display};

/// Kind of a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum JsonKind {
    /// JSON object
    Object,
    /// JSON array
    Array,
    /// JSON string
    String,
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// JSON null
    Null,
}

impl JsonKind {
    /// Classify a JSON value
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }

    /// Whether a path walk can descend into a value of this kind
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Object)
    }
}

impl From<&Value> for JsonKind {
    fn from(value: &Value) -> Self {
        Self::of(value)
    }
}
