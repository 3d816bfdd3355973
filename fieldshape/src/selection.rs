//! Parsing of the caller-supplied field list.

use std::collections::HashSet;

use crate::shaper::DEFAULT_SEPARATOR;

/// The set of requested field names, matched case-insensitively.
///
/// An empty selection means "no filter": every field is returned.
#[derive(Debug, Clone, Default)]
pub struct FieldSelection {
    /// First-seen spelling of each requested name, in request order.
    names: Vec<String>,
    /// Lowercased names for membership tests.
    keys: HashSet<String>,
}

impl FieldSelection {
    /// Parses a comma-separated field list.
    #[must_use]
    pub fn parse(text: Option<&str>) -> Self {
        Self::parse_with(text, DEFAULT_SEPARATOR)
    }

    /// Parses a field list split on `separator`.
    ///
    /// Tokens are trimmed; empty tokens are ignored, and repeats differing only
    /// in case collapse to the first one.
    #[must_use]
    pub fn parse_with(text: Option<&str>, separator: char) -> Self {
        let mut selection = Self::default();
        for token in text.unwrap_or_default().split(separator) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if selection.keys.insert(token.to_lowercase()) {
                selection.names.push(token.to_owned());
            }
        }
        selection
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&name.to_lowercase())
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Requested names, first-seen spelling, in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Selections are equal when they select the same names, ignoring case,
/// spelling and order.
impl PartialEq for FieldSelection {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl Eq for FieldSelection {}
