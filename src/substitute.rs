//! Placeholder substitution.
//!
//! Resolved text may contain `{{token}}` placeholders (whitespace around
//! the token tolerated, token limited to word characters and dots).
//! Substitution is two-pass: explicit caller-supplied values first, then
//! any placeholder still standing is treated as a key and resolved against
//! the same locale/plural/gender context.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([\w.]+)\s*\}\}").unwrap());

/// Pass 1: replaces `{{ name }}` for every name in `replacements`.
///
/// Names without a matching placeholder are silently ignored; placeholders
/// without a matching name are left untouched for pass 2.
pub fn apply_replacements(text: &str, replacements: &HashMap<String, String>) -> String {
    if replacements.is_empty() {
        return text.to_string();
    }
    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &regex::Captures| match replacements.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Pass 2: resolves every remaining `{{token}}` through `resolve_token`
/// and substitutes the literal placeholder occurrence.
///
/// `depth` bounds re-expansion: with the default of 1, tokens introduced
/// by a resolved lookup are not themselves re-scanned. A failed token
/// lookup propagates its error.
pub fn fill_placeholders<F>(text: &str, depth: usize, mut resolve_token: F) -> Result<String>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut result = text.to_string();
    for _ in 0..depth {
        let pending: Vec<(String, String)> = PLACEHOLDER_REGEX
            .captures_iter(&result)
            .map(|caps| (caps[0].to_string(), caps[1].to_string()))
            .collect();
        if pending.is_empty() {
            break;
        }
        for (placeholder, token) in pending {
            let resolved = resolve_token(&token)?;
            result = result.replace(&placeholder, &resolved);
        }
    }
    Ok(result)
}
