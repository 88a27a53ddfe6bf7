//! Node addresses.
//!
//! A path starts at [`ROOT`] and only ever grows: `.<Field>` for a record
//! field, `[<index>]` for a sequence element, `.<key>` for a mapping entry.
//! Override keys use the same syntax with every index replaced by `[]`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

pub const ROOT: &str = "$";

static INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("index pattern is a valid regex"));

/// Path of a record field below `parent`.
pub fn field(parent: &str, name: &str) -> String {
    format!("{parent}.{name}")
}

/// Path of a sequence element below `parent`.
pub fn index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Path of a mapping entry below `parent`.
pub fn key(parent: &str, key: &str) -> String {
    format!("{parent}.{key}")
}

/// Replaces every `[<digits>]` segment with `[]`.
///
/// `$.Items[3].Tags[0]` becomes `$.Items[].Tags[]`.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    INDEX.replace_all(path, "[]")
}
