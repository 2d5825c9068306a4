//! Per-call resolution request options.

use std::collections::HashMap;
use std::fmt;

/// Pluralization hint.
///
/// A count normalizes to the plural form unless it is exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plural {
    Bool(bool),
    Count(i64),
}

impl Plural {
    /// Normalized form: true selects the "other" leaf, false the "one" leaf.
    pub fn other(self) -> bool {
        match self {
            Plural::Bool(b) => b,
            Plural::Count(n) => n != 1,
        }
    }
}

impl From<bool> for Plural {
    fn from(value: bool) -> Self {
        Plural::Bool(value)
    }
}

impl From<i64> for Plural {
    fn from(value: i64) -> Self {
        Plural::Count(value)
    }
}

impl From<i32> for Plural {
    fn from(value: i32) -> Self {
        Plural::Count(value as i64)
    }
}

impl From<u64> for Plural {
    fn from(value: u64) -> Self {
        Plural::Count(value as i64)
    }
}

impl From<usize> for Plural {
    fn from(value: usize) -> Self {
        Plural::Count(value as i64)
    }
}

/// Options for a single `translate` call, each independently optional.
///
/// ```
/// use lingo::TranslateOptions;
///
/// let options = TranslateOptions::new()
///     .plural(2)
///     .gender("female")
///     .replace("name", "Mickey")
///     .locale("es");
/// ```
#[derive(Debug, Default, Clone)]
pub struct TranslateOptions {
    pub(crate) plural: Option<Plural>,
    pub(crate) gender: Option<String>,
    pub(crate) replacements: HashMap<String, String>,
    pub(crate) locale: Option<String>,
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pluralization hint: a bool or a count (`2.into()` selects plural,
    /// `1` singular).
    pub fn plural(mut self, plural: impl Into<Plural>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    /// Gender hint. Anything displayable is accepted and normalized to its
    /// string form before validation against the configured gender tags.
    pub fn gender(mut self, gender: impl fmt::Display) -> Self {
        self.gender = Some(gender.to_string());
        self
    }

    /// Adds one explicit replacement value for `{{name}}` placeholders.
    pub fn replace(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.replacements.insert(name.into(), value.into());
        self
    }

    /// Replaces the whole explicit replacement map.
    pub fn replacements(mut self, replacements: HashMap<String, String>) -> Self {
        self.replacements = replacements;
        self
    }

    /// Resolves against this locale instead of the context's current one.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::options::*;

    #[test]
    fn test_plural_normalization() {
        assert!(!Plural::Bool(false).other());
        assert!(Plural::Bool(true).other());
        assert!(!Plural::Count(1).other());
        assert!(Plural::Count(0).other());
        assert!(Plural::Count(2).other());
        assert!(Plural::Count(-1).other());
    }

    #[test]
    fn test_plural_from() {
        assert_eq!(Plural::from(true), Plural::Bool(true));
        assert_eq!(Plural::from(2i64), Plural::Count(2));
        assert_eq!(Plural::from(3i32), Plural::Count(3));
        assert_eq!(Plural::from(4usize), Plural::Count(4));
    }

    #[test]
    fn test_gender_accepts_displayable() {
        struct Sex(&'static str);
        impl std::fmt::Display for Sex {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        let options = TranslateOptions::new().gender(Sex("female"));
        assert_eq!(options.gender.as_deref(), Some("female"));

        let options = TranslateOptions::new().gender("male");
        assert_eq!(options.gender.as_deref(), Some("male"));
    }

    #[test]
    fn test_builder_accumulates_replacements() {
        let options = TranslateOptions::new()
            .replace("name", "Mickey")
            .replace("spouse", "Minnie");
        assert_eq!(options.replacements.len(), 2);
        assert_eq!(
            options.replacements.get("name").map(String::as_str),
            Some("Mickey")
        );
    }
}
