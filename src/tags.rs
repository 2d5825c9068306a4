use serde::{Deserialize, Serialize};

/// Structural tag names used to disambiguate complex (multi-form) entries.
///
/// A complex entry is a locale-document node that is itself a sub-document
/// rather than a leaf string. The selector walks into it using these tag
/// names, so documents and configuration must agree on them. The engine
/// never hardcodes the defaults anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSet {
    /// Child key holding the plain text of a complex entry.
    #[serde(default = "default_tag")]
    pub default_tag: String,
    /// Child key introducing the plural branch.
    #[serde(default = "plural_tag")]
    pub plural_tag: String,
    /// Singular form under the plural branch.
    #[serde(default = "plural_one_tag")]
    pub plural_one_tag: String,
    /// Plural form under the plural branch.
    #[serde(default = "plural_other_tag")]
    pub plural_other_tag: String,
    /// Child key introducing the gender branch.
    #[serde(default = "gender_tag")]
    pub gender_tag: String,
    #[serde(default = "gender_female_tag")]
    pub gender_female_tag: String,
    #[serde(default = "gender_male_tag")]
    pub gender_male_tag: String,
    #[serde(default = "gender_neutral_tag")]
    pub gender_neutral_tag: String,
}

fn default_tag() -> String {
    "default".to_string()
}

fn plural_tag() -> String {
    "plural".to_string()
}

fn plural_one_tag() -> String {
    "one".to_string()
}

fn plural_other_tag() -> String {
    "other".to_string()
}

fn gender_tag() -> String {
    "gender".to_string()
}

fn gender_female_tag() -> String {
    "female".to_string()
}

fn gender_male_tag() -> String {
    "male".to_string()
}

fn gender_neutral_tag() -> String {
    "neutral".to_string()
}

impl Default for TagSet {
    fn default() -> Self {
        Self {
            default_tag: default_tag(),
            plural_tag: plural_tag(),
            plural_one_tag: plural_one_tag(),
            plural_other_tag: plural_other_tag(),
            gender_tag: gender_tag(),
            gender_female_tag: gender_female_tag(),
            gender_male_tag: gender_male_tag(),
            gender_neutral_tag: gender_neutral_tag(),
        }
    }
}

impl TagSet {
    /// Returns true if `value` is one of the three configured gender tags.
    pub fn is_gender(&self, value: &str) -> bool {
        value == self.gender_female_tag
            || value == self.gender_male_tag
            || value == self.gender_neutral_tag
    }

    /// Plural leaf tag for a normalized plural flag.
    pub fn plural_leaf(&self, plural: bool) -> &str {
        if plural {
            &self.plural_other_tag
        } else {
            &self.plural_one_tag
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tags::*;

    #[test]
    fn test_default_tags() {
        let tags = TagSet::default();
        assert_eq!(tags.default_tag, "default");
        assert_eq!(tags.plural_tag, "plural");
        assert_eq!(tags.plural_one_tag, "one");
        assert_eq!(tags.plural_other_tag, "other");
        assert_eq!(tags.gender_tag, "gender");
        assert_eq!(tags.gender_female_tag, "female");
        assert_eq!(tags.gender_male_tag, "male");
        assert_eq!(tags.gender_neutral_tag, "neutral");
    }

    #[test]
    fn test_partial_tags_from_json() {
        let json = r#"{ "pluralOneTag": "1", "pluralOtherTag": "*" }"#;
        let tags: TagSet = serde_json::from_str(json).unwrap();
        assert_eq!(tags.plural_one_tag, "1");
        assert_eq!(tags.plural_other_tag, "*");
        assert_eq!(tags.plural_tag, "plural");
        assert_eq!(tags.gender_tag, "gender");
    }

    #[test]
    fn test_is_gender() {
        let tags = TagSet::default();
        assert!(tags.is_gender("female"));
        assert!(tags.is_gender("male"));
        assert!(tags.is_gender("neutral"));
        assert!(!tags.is_gender("dog"));
        assert!(!tags.is_gender(""));
    }

    #[test]
    fn test_plural_leaf() {
        let tags = TagSet::default();
        assert_eq!(tags.plural_leaf(false), "one");
        assert_eq!(tags.plural_leaf(true), "other");
    }

    #[test]
    fn test_custom_gender_tags() {
        let json = r#"{ "genderFemaleTag": "f", "genderMaleTag": "m", "genderNeutralTag": "n" }"#;
        let tags: TagSet = serde_json::from_str(json).unwrap();
        assert!(tags.is_gender("f"));
        assert!(!tags.is_gender("female"));
    }
}
