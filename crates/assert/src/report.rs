//! Comparison outcome and its report text.

use std::fmt;

/// One failing node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path: {}\n{}", self.path, self.reason)
    }
}

/// Verdict of one comparison: every failing node in visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    failures: Vec<Failure>,
}

impl Comparison {
    /// A single failing node.
    pub(crate) fn fail(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            failures: vec![Failure {
                path: path.into(),
                reason: reason.into(),
            }],
        }
    }

    /// Wraps a comparator diagnostic; empty means match.
    pub(crate) fn check(path: &str, diagnostic: String) -> Self {
        if diagnostic.is_empty() {
            Self::default()
        } else {
            Self::fail(path, diagnostic)
        }
    }

    pub(crate) fn merge(&mut self, other: Comparison) {
        self.failures.extend(other.failures);
    }

    pub fn matched(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// `Path: <path>\n<reason>` blocks joined by newlines; empty on match.
    pub fn report(&self) -> String {
        self.to_string()
    }

    /// `(matched, report)`.
    pub fn into_parts(self) -> (bool, String) {
        (self.matched(), self.report())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, failure) in self.failures.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_comparison_is_a_match() {
        let ok = Comparison::check("$", String::new());
        assert!(ok.matched());
        assert_eq!(ok.into_parts(), (true, String::new()));
    }

    #[test]
    fn blocks_join_with_newlines() {
        let mut result = Comparison::fail("$.A", "first");
        result.merge(Comparison::check("$.B", "second\nline".into()));
        assert!(!result.matched());
        assert_eq!(result.report(), "Path: $.A\nfirst\nPath: $.B\nsecond\nline");
    }
}
