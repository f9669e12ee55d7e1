//! Shared constants for path parsing and diagnostics

/// Delimiter between segments of a flatten path (`first::second::third`)
pub const PATH_DELIMITER: &str = "::";

// Error message fragments
pub(crate) const MSG_WRAPPER_TYPE: &str = "Flattened<_>";
