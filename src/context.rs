//! Translation contexts.
//!
//! A [`Context`] is one independent translation namespace: a locale
//! directory, the locale set discovered from it, default/current locale,
//! the structural tag names and a lazily-filled document cache. A host may
//! own any number of contexts; they share no state.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::documents::{Document, load_document, scan_locales};
use crate::error::{Error, ErrorHook, Result};
use crate::options::{Plural, TranslateOptions};
use crate::resolve::resolve;
use crate::substitute::{apply_replacements, fill_placeholders};
use crate::tags::TagSet;

/// Options for constructing a [`Context`], each with a sensible default.
///
/// Deserializable, so a host can keep them in a JSON options file:
///
/// ```json
/// {
///   "directory": "./locales",
///   "defaultLocale": "en",
///   "pluralOneTag": "1"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOptions {
    /// Path to the locale files. Defaults to `./locales`.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Locale filename extension. Defaults to `.json`; a missing leading
    /// dot is supplied.
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
    /// Must name a discovered locale. When absent: `en` if discovered,
    /// otherwise the first discovered locale.
    #[serde(default)]
    pub default_locale: Option<String>,
    /// Must name a discovered locale. Defaults to the default locale.
    #[serde(default)]
    pub current_locale: Option<String>,
    #[serde(flatten)]
    pub tags: TagSet,
    /// How many rounds of placeholder lookup substitution may introduce
    /// further placeholders. 1 means text returned by a placeholder lookup
    /// is not re-scanned.
    #[serde(default = "default_placeholder_depth")]
    pub placeholder_depth: usize,
}

fn default_directory() -> PathBuf {
    PathBuf::from("./locales")
}

fn default_file_extension() -> String {
    ".json".to_string()
}

fn default_placeholder_depth() -> usize {
    1
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_extension: default_file_extension(),
            default_locale: None,
            current_locale: None,
            tags: TagSet::default(),
            placeholder_depth: default_placeholder_depth(),
        }
    }
}

impl ContextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    pub fn current_locale(mut self, locale: impl Into<String>) -> Self {
        self.current_locale = Some(locale.into());
        self
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn placeholder_depth(mut self, depth: usize) -> Self {
        self.placeholder_depth = depth;
        self
    }

    /// Reads options from a JSON file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {:?}", path))?;
        let options = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse options file: {:?}", path))?;
        Ok(options)
    }
}

/// One translation namespace.
pub struct Context {
    directory: PathBuf,
    file_extension: String,
    locales: Vec<String>,
    default_locale: String,
    current_locale: String,
    tags: TagSet,
    placeholder_depth: usize,
    /// Locale documents, loaded at most once per locale. Check-then-load-
    /// then-store happens under the lock, so concurrent callers cannot
    /// duplicate a load.
    cache: Mutex<HashMap<String, Arc<Document>>>,
    hook: Option<ErrorHook>,
}

impl Context {
    /// Creates a context: resolves the directory, discovers the locale set
    /// and validates the configured locales against it.
    pub fn new(options: ContextOptions) -> Result<Self> {
        let directory = options
            .directory
            .canonicalize()
            .map_err(|_| Error::LocaleDirMissing {
                dir: options.directory.clone(),
            })?;
        let file_extension = normalize_extension(&options.file_extension);
        let locales = scan_locales(&directory, &file_extension)?;

        let default_locale = match options.default_locale {
            Some(locale) => member_of(&locales, locale)?,
            None => pick_default_locale(&locales),
        };
        let current_locale = match options.current_locale {
            Some(locale) => member_of(&locales, locale)?,
            None => default_locale.clone(),
        };

        Ok(Self {
            directory,
            file_extension,
            locales,
            default_locale,
            current_locale,
            tags: options.tags,
            placeholder_depth: options.placeholder_depth,
            cache: Mutex::new(HashMap::new()),
            hook: None,
        })
    }

    /// Creates a context over a locale directory with default options.
    pub fn with_directory(directory: impl Into<PathBuf>) -> Result<Self> {
        Self::new(ContextOptions::new().directory(directory))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Discovered locale identifiers, sorted. Read-only: derived from the
    /// directory contents.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn placeholder_depth(&self) -> usize {
        self.placeholder_depth
    }

    /// Points the context at a new locale directory.
    ///
    /// Re-derives the locale set and clears the document cache. Default
    /// and current locale are kept when still present in the new set,
    /// otherwise re-derived the same way `new` derives them.
    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) -> Result<()> {
        let directory = directory.into();
        let directory = directory
            .canonicalize()
            .map_err(|_| Error::LocaleDirMissing { dir: directory })?;
        let locales = scan_locales(&directory, &self.file_extension)?;

        if !locales.contains(&self.default_locale) {
            self.default_locale = pick_default_locale(&locales);
            self.current_locale = self.default_locale.clone();
        } else if !locales.contains(&self.current_locale) {
            self.current_locale = self.default_locale.clone();
        }

        debug!(dir = %directory.display(), locales = ?locales, "locale directory changed");
        self.directory = directory;
        self.locales = locales;
        self.cache_lock().clear();
        Ok(())
    }

    pub fn set_file_extension(&mut self, extension: impl Into<String>) {
        self.file_extension = normalize_extension(&extension.into());
    }

    pub fn set_default_locale(&mut self, locale: impl Into<String>) -> Result<()> {
        self.default_locale = member_of(&self.locales, locale.into())?;
        Ok(())
    }

    pub fn set_current_locale(&mut self, locale: impl Into<String>) -> Result<()> {
        self.current_locale = member_of(&self.locales, locale.into())?;
        Ok(())
    }

    pub fn set_tags(&mut self, tags: TagSet) {
        self.tags = tags;
    }

    pub fn set_placeholder_depth(&mut self, depth: usize) {
        self.placeholder_depth = depth;
    }

    /// Registers a best-effort error notification hook.
    ///
    /// Every error produced at the `translate` boundary is passed to the
    /// hook before being returned, so a host may observe failures without
    /// inspecting each call's result.
    pub fn on_error(&mut self, hook: impl Fn(&Error) + Send + Sync + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// Resolves `key` to localized text.
    ///
    /// Validates the request, resolves within the working locale with one
    /// fallback hop to the default locale, then substitutes placeholders:
    /// explicit replacement values first, remaining `{{token}}` markers by
    /// recursive lookup under the same locale/plural/gender.
    pub fn translate(&self, key: &str, options: &TranslateOptions) -> Result<String> {
        self.translate_request(key, options).map_err(|err| {
            if let Some(hook) = &self.hook {
                hook(&err);
            }
            err
        })
    }

    /// Lossy variant: on failure, notifies the hook (when registered) and
    /// returns the untranslated key unchanged.
    pub fn translate_or_key(&self, key: &str, options: &TranslateOptions) -> String {
        self.translate(key, options)
            .unwrap_or_else(|_| key.to_string())
    }

    fn translate_request(&self, key: &str, options: &TranslateOptions) -> Result<String> {
        if key.is_empty() {
            return Err(Error::MissingKey);
        }

        let gender = options.gender.as_deref();
        if let Some(value) = gender
            && !self.tags.is_gender(value)
        {
            return Err(Error::InvalidGender {
                value: value.to_string(),
                female: self.tags.gender_female_tag.clone(),
                male: self.tags.gender_male_tag.clone(),
                neutral: self.tags.gender_neutral_tag.clone(),
            });
        }

        let locale = match options.locale.as_deref() {
            Some(locale) => {
                if !self.locales.iter().any(|l| l == locale) {
                    return Err(Error::UnknownLocale {
                        locale: locale.to_string(),
                    });
                }
                locale
            }
            None => &self.current_locale,
        };

        let plural = options.plural.map(Plural::other);

        let text = self.translate_in_locale(key, locale, plural, gender)?;
        let text = apply_replacements(&text, &options.replacements);
        fill_placeholders(&text, self.placeholder_depth, |token| {
            self.translate_in_locale(token, locale, plural, gender)
        })
    }

    /// Resolution with the single permitted fallback hop: working locale
    /// first, then the default locale.
    fn translate_in_locale(
        &self,
        key: &str,
        locale: &str,
        plural: Option<bool>,
        gender: Option<&str>,
    ) -> Result<String> {
        let doc = self.document(locale)?;
        if let Some(text) = resolve(&doc, &self.tags, key, plural, gender) {
            return Ok(text);
        }

        if locale != self.default_locale {
            let doc = self.document(&self.default_locale)?;
            if let Some(text) = resolve(&doc, &self.tags, key, plural, gender) {
                return Ok(text);
            }
        }

        Err(Error::KeyNotFound {
            key: key.to_string(),
            locale: locale.to_string(),
        })
    }

    /// Returns the locale's document, loading it on first access.
    fn document(&self, locale: &str) -> Result<Arc<Document>> {
        let mut cache = self.cache_lock();
        if let Some(doc) = cache.get(locale) {
            return Ok(Arc::clone(doc));
        }
        let doc = Arc::new(load_document(
            &self.directory,
            locale,
            &self.file_extension,
        )?);
        cache.insert(locale.to_string(), Arc::clone(&doc));
        Ok(doc)
    }

    fn cache_lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Document>>> {
        // a poisoned cache holds nothing worse than already-loaded maps
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("directory", &self.directory)
            .field("file_extension", &self.file_extension)
            .field("locales", &self.locales)
            .field("default_locale", &self.default_locale)
            .field("current_locale", &self.current_locale)
            .field("tags", &self.tags)
            .field("placeholder_depth", &self.placeholder_depth)
            .finish_non_exhaustive()
    }
}

fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim();
    if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    }
}

fn pick_default_locale(locales: &[String]) -> String {
    if locales.iter().any(|l| l == "en") {
        "en".to_string()
    } else {
        // scan_locales guarantees at least one entry
        locales[0].clone()
    }
}

fn member_of(locales: &[String], locale: String) -> Result<String> {
    if locales.contains(&locale) {
        Ok(locale)
    } else {
        Err(Error::UnknownLocale { locale })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use crate::context::*;

    fn locales_dir() -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("en.json"),
            r#"{"Hello": "Hello", "Hi": {"noName": "Hi"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("es.json"), r#"{"Hi": {"noName": "Hola"}}"#).unwrap();
        dir
    }

    #[test]
    fn test_new_with_defaults() {
        let dir = locales_dir();
        let ctx = Context::with_directory(dir.path()).unwrap();

        assert_eq!(ctx.locales(), ["en", "es"]);
        assert_eq!(ctx.default_locale(), "en");
        assert_eq!(ctx.current_locale(), "en");
        assert_eq!(ctx.file_extension(), ".json");
    }

    #[test]
    fn test_default_locale_falls_back_to_first() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("de.json"), "{}").unwrap();
        fs::write(dir.path().join("fr.json"), "{}").unwrap();

        let ctx = Context::with_directory(dir.path()).unwrap();
        assert_eq!(ctx.default_locale(), "de");
    }

    #[test]
    fn test_new_with_explicit_locales() {
        let dir = locales_dir();
        let ctx = Context::new(
            ContextOptions::new()
                .directory(dir.path())
                .default_locale("es")
                .current_locale("en"),
        )
        .unwrap();

        assert_eq!(ctx.default_locale(), "es");
        assert_eq!(ctx.current_locale(), "en");
    }

    #[test]
    fn test_new_rejects_unknown_default_locale() {
        let dir = locales_dir();
        let result = Context::new(
            ContextOptions::new()
                .directory(dir.path())
                .default_locale("de"),
        );
        assert!(matches!(result, Err(Error::UnknownLocale { .. })));
    }

    #[test]
    fn test_new_rejects_missing_directory() {
        let result = Context::with_directory("/nonexistent/locales");
        assert!(matches!(result, Err(Error::LocaleDirMissing { .. })));
    }

    #[test]
    fn test_extension_normalization() {
        let dir = locales_dir();
        let mut ctx = Context::new(
            ContextOptions::new()
                .directory(dir.path())
                .file_extension("json"),
        )
        .unwrap();
        assert_eq!(ctx.file_extension(), ".json");

        ctx.set_file_extension("yaml");
        assert_eq!(ctx.file_extension(), ".yaml");
        ctx.set_file_extension(" .yml ");
        assert_eq!(ctx.file_extension(), ".yml");
    }

    #[test]
    fn test_set_locale_validation() {
        let dir = locales_dir();
        let mut ctx = Context::with_directory(dir.path()).unwrap();

        ctx.set_current_locale("es").unwrap();
        assert_eq!(ctx.current_locale(), "es");

        let result = ctx.set_current_locale("junk");
        assert!(matches!(result, Err(Error::UnknownLocale { .. })));

        let result = ctx.set_default_locale("junk");
        assert!(matches!(result, Err(Error::UnknownLocale { .. })));
    }

    #[test]
    fn test_set_directory_rescans_and_clears_cache() {
        let dir = locales_dir();
        let mut ctx = Context::with_directory(dir.path()).unwrap();

        // warm the cache
        assert_eq!(
            ctx.translate("Hello", &TranslateOptions::new()).unwrap(),
            "Hello"
        );

        let other = tempdir().unwrap();
        fs::write(other.path().join("en.json"), r#"{"Hello": "Hey"}"#).unwrap();
        ctx.set_directory(other.path()).unwrap();

        assert_eq!(ctx.locales(), ["en"]);
        assert_eq!(
            ctx.translate("Hello", &TranslateOptions::new()).unwrap(),
            "Hey"
        );
    }

    #[test]
    fn test_set_directory_rederives_absent_locales() {
        let dir = locales_dir();
        let mut ctx = Context::with_directory(dir.path()).unwrap();
        ctx.set_current_locale("es").unwrap();

        let other = tempdir().unwrap();
        fs::write(other.path().join("fr.json"), "{}").unwrap();
        ctx.set_directory(other.path()).unwrap();

        assert_eq!(ctx.default_locale(), "fr");
        assert_eq!(ctx.current_locale(), "fr");
    }

    #[test]
    fn test_document_loaded_once() {
        let dir = locales_dir();
        let ctx = Context::with_directory(dir.path()).unwrap();

        assert_eq!(
            ctx.translate("Hello", &TranslateOptions::new()).unwrap(),
            "Hello"
        );

        // with the document cached, the backing file is no longer consulted
        fs::remove_file(dir.path().join("en.json")).unwrap();
        assert_eq!(
            ctx.translate("Hello", &TranslateOptions::new()).unwrap(),
            "Hello"
        );
    }

    #[test]
    fn test_error_hook_notified() {
        let dir = locales_dir();
        let mut ctx = Context::with_directory(dir.path()).unwrap();

        static CALLS: AtomicUsize = AtomicUsize::new(0);
        ctx.on_error(|err| {
            assert!(matches!(err, Error::KeyNotFound { .. }));
            CALLS.fetch_add(1, Ordering::SeqCst);
        });

        let result = ctx.translate("Missing", &TranslateOptions::new());
        assert!(result.is_err());
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_translate_or_key_returns_key_on_failure() {
        let dir = locales_dir();
        let ctx = Context::with_directory(dir.path()).unwrap();

        assert_eq!(
            ctx.translate_or_key("Missing.key", &TranslateOptions::new()),
            "Missing.key"
        );
        assert_eq!(
            ctx.translate_or_key("Hello", &TranslateOptions::new()),
            "Hello"
        );
    }

    #[test]
    fn test_options_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lingo.json");
        fs::write(
            &path,
            r#"{ "directory": "./locales", "defaultLocale": "es", "pluralOneTag": "1" }"#,
        )
        .unwrap();

        let options = ContextOptions::from_file(&path).unwrap();
        assert_eq!(options.directory, PathBuf::from("./locales"));
        assert_eq!(options.default_locale.as_deref(), Some("es"));
        assert_eq!(options.tags.plural_one_tag, "1");
        assert_eq!(options.tags.plural_other_tag, "other");
        assert_eq!(options.placeholder_depth, 1);
    }
}
