//! Walker configuration.

use serde::Deserialize;

/// Deepest node a walk descends to before giving up on a branch.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for [`Walker`](crate::Walker).
///
/// Deserializable so test harnesses can keep it next to their fixtures;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Nodes nested deeper than this fail with a depth diagnostic instead
    /// of being walked.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
