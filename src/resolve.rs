//! Key resolution and complex-form selection.
//!
//! [`lookup`] descends a dot-separated key path through a document,
//! applying the shortcut-alias rule at the leaf. When the looked-up node is
//! itself a sub-document (a complex entry), [`resolve`] repeatedly extends
//! the key with the tag path chosen by [`extend_key`] and re-resolves
//! against the original document until a string leaf is reached.

use serde_json::Value;

use crate::documents::Document;
use crate::tags::TagSet;

/// Resolves a dot path against a document.
///
/// Returns the found node: a string leaf, a sub-document (complex entry)
/// or any other stored value. `None` when a path segment is absent or an
/// intermediate segment is not a sub-document.
pub fn lookup<'a>(doc: &'a Document, key: &str) -> Option<&'a Value> {
    match key.split_once('.') {
        None => lookup_leaf(doc, key),
        Some((head, rest)) => {
            let sub = doc.get(head)?.as_object()?;
            lookup(sub, rest)
        }
    }
}

/// Leaf lookup with the shortcut-alias rule: a string value starting with
/// `@` names a sibling key to read instead. One indirection only; the
/// aliased access is a plain map access, never another alias hop.
fn lookup_leaf<'a>(doc: &'a Document, key: &str) -> Option<&'a Value> {
    let found = doc.get(key)?;
    if let Some(text) = found.as_str()
        && let Some(alias) = text.strip_prefix('@')
    {
        return doc.get(alias);
    }
    Some(found)
}

/// Chooses the tag path to append when `node` is a complex entry.
///
/// | plural | gender | appended path                                   |
/// |--------|--------|-------------------------------------------------|
/// | no     | no     | `default`                                       |
/// | yes    | no     | `plural.<one|other>`                            |
/// | no     | yes    | `gender.<value>`                                |
/// | yes    | yes    | whichever ordering `node` uses, probed by the   |
/// |        |        | presence of a `plural` child                    |
pub fn extend_key(
    tags: &TagSet,
    key: &str,
    node: &Document,
    plural: Option<bool>,
    gender: Option<&str>,
) -> String {
    match (plural, gender) {
        (None, None) => format!("{}.{}", key, tags.default_tag),
        (Some(p), None) => format!("{}.{}.{}", key, tags.plural_tag, tags.plural_leaf(p)),
        (None, Some(g)) => format!("{}.{}.{}", key, tags.gender_tag, g),
        (Some(p), Some(g)) => {
            if node.contains_key(&tags.plural_tag) {
                format!(
                    "{}.{}.{}.{}.{}",
                    key,
                    tags.plural_tag,
                    tags.plural_leaf(p),
                    tags.gender_tag,
                    g
                )
            } else {
                format!(
                    "{}.{}.{}.{}.{}",
                    key,
                    tags.gender_tag,
                    g,
                    tags.plural_tag,
                    tags.plural_leaf(p)
                )
            }
        }
    }
}

/// Resolves `key` within a single document to a string leaf, walking
/// through arbitrarily nested complex entries.
///
/// Non-string scalar leaves (numbers, booleans, arrays) count as not
/// found: only strings are translations.
pub fn resolve(
    doc: &Document,
    tags: &TagSet,
    key: &str,
    plural: Option<bool>,
    gender: Option<&str>,
) -> Option<String> {
    let mut key = key.to_string();
    let mut value = lookup(doc, &key)?;
    loop {
        match value {
            Value::String(text) => return Some(text.clone()),
            Value::Object(node) => {
                key = extend_key(tags, &key, node, plural, gender);
                value = lookup(doc, &key)?;
            }
            _ => return None,
        }
    }
}
