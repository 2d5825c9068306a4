//! Locale document discovery and loading.
//!
//! One file per locale lives flat in the context directory, named
//! `<locale><extension>` (e.g. `en.json`). A document is a hierarchical
//! key-value tree: string leaves, nested objects for complex entries.

use std::{fs, path::Path};

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// A parsed locale document. Key order is preserved from the file.
pub type Document = serde_json::Map<String, Value>;

/// Infers the locale identifier from a file path.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.json" -> Some("zh-CN")
/// - "/path/to/locales/ja.json" -> Some("ja")
pub fn locale_of(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Scans `dir` for locale files with the given extension and returns the
/// locale identifiers, sorted for deterministic behavior.
///
/// `extension` is expected in leading-dot form (".json").
pub fn scan_locales(dir: &Path, extension: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(Error::LocaleDirMissing {
            dir: dir.to_path_buf(),
        });
    }

    let ext = extension.trim_start_matches('.');
    let mut locales = Vec::new();
    let entries = fs::read_dir(dir).map_err(|_| Error::LocaleDirMissing {
        dir: dir.to_path_buf(),
    })?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(ext)
            && let Some(locale) = locale_of(&path)
        {
            locales.push(locale);
        }
    }

    if locales.is_empty() {
        return Err(Error::NoLocaleFiles {
            dir: dir.to_path_buf(),
        });
    }

    locales.sort();
    debug!(dir = %dir.display(), count = locales.len(), "discovered locales");
    Ok(locales)
}

/// Loads and parses the document backing `locale`.
pub fn load_document(dir: &Path, locale: &str, extension: &str) -> Result<Document> {
    let file = dir.join(format!("{}{}", locale, extension));
    if !file.is_file() {
        return Err(Error::LocaleFileMissing { file });
    }

    let content = fs::read_to_string(&file).map_err(|_| Error::LocaleFileMissing {
        file: file.clone(),
    })?;
    // Deserializing into a map rejects non-object top levels as parse errors.
    let doc: Document =
        serde_json::from_str(&content).map_err(|source| Error::DocumentParseError {
            file: file.clone(),
            source,
        })?;

    debug!(locale, file = %file.display(), keys = doc.len(), "loaded locale document");
    Ok(doc)
}

/// Enumerates every leaf key of `doc` as a dot path ("Hi.withName").
pub fn flatten_keys(doc: &Document) -> Vec<String> {
    let mut keys = Vec::new();
    flatten_into(doc, String::new(), &mut keys);
    keys
}

fn flatten_into(doc: &Document, prefix: String, keys: &mut Vec<String>) {
    for (key, value) in doc {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(sub) => flatten_into(sub, path, keys),
            _ => keys.push(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::documents::*;

    #[test]
    fn test_locale_of() {
        assert_eq!(locale_of("en.json"), Some("en".to_string()));
        assert_eq!(locale_of("zh-CN.json"), Some("zh-CN".to_string()));
        assert_eq!(
            locale_of("/path/to/locales/ja.json"),
            Some("ja".to_string())
        );
    }

    #[test]
    fn test_scan_locales() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), "{}").unwrap();
        fs::write(dir.path().join("es.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let locales = scan_locales(dir.path(), ".json").unwrap();
        assert_eq!(locales, vec!["en", "es"]);
    }

    #[test]
    fn test_scan_locales_missing_dir() {
        let result = scan_locales(Path::new("/nonexistent/locales"), ".json");
        assert!(matches!(result, Err(Error::LocaleDirMissing { .. })));
    }

    #[test]
    fn test_scan_locales_empty_dir() {
        let dir = tempdir().unwrap();
        let result = scan_locales(dir.path(), ".json");
        assert!(matches!(result, Err(Error::NoLocaleFiles { .. })));
    }

    #[test]
    fn test_load_document() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("en.json"),
            r#"{"Hi": {"noName": "Hi"}, "Hello": "Hello"}"#,
        )
        .unwrap();

        let doc = load_document(dir.path(), "en", ".json").unwrap();
        assert_eq!(doc.get("Hello").and_then(|v| v.as_str()), Some("Hello"));
        assert!(doc.get("Hi").map(|v| v.is_object()).unwrap_or(false));
    }

    #[test]
    fn test_load_document_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_document(dir.path(), "de", ".json");
        assert!(matches!(result, Err(Error::LocaleFileMissing { .. })));
    }

    #[test]
    fn test_load_document_invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), "{ not json }").unwrap();

        let result = load_document(dir.path(), "en", ".json");
        assert!(matches!(result, Err(Error::DocumentParseError { .. })));
    }

    #[test]
    fn test_load_document_non_object_top_level() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"["not", "a", "tree"]"#).unwrap();

        let result = load_document(dir.path(), "en", ".json");
        assert!(matches!(result, Err(Error::DocumentParseError { .. })));
    }

    #[test]
    fn test_flatten_keys() {
        let doc: Document = serde_json::from_str(
            r#"{"Hello": "Hello", "Hi": {"noName": "Hi", "withName": "Hi, {{name}}!"}}"#,
        )
        .unwrap();

        let keys = flatten_keys(&doc);
        assert_eq!(keys, vec!["Hello", "Hi.noName", "Hi.withName"]);
    }
}
