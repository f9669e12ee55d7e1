//! Parsed flatten paths
//!
//! A path is split once, when the index is built, and never touched again.

use std::fmt::{self, Display};

use itertools::Itertools;

use crate::constants::PATH_DELIMITER;

/// An ordered, immutable sequence of object keys
///
/// `"first::second"` becomes `["first", "second"]`. Empty segments are kept as
/// they are (`""` becomes `[""]`), which makes the path degenerate: it is stored
/// in the index but never resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSpec {
    segments: Box<[String]>,
}

impl PathSpec {
    /// Split a raw path on `::`
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        // `split` keeps trailing empty segments: `"a::"` is `["a", ""]`, not `["a"]`
        Self {
            segments: raw.split(PATH_DELIMITER).map(str::to_owned).collect(),
        }
    }

    /// Segments in walk order
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments, always at least one
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether any segment is empty
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.segments.iter().any(String::is_empty)
    }
}

impl From<&str> for PathSpec {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join(PATH_DELIMITER))
    }
}
