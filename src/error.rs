//! Error types for translation resolution.
//!
//! Every failure the engine can produce is a distinct variant so hosts can
//! match on the condition. `Context` additionally supports a best-effort
//! notification hook (see [`crate::context::Context::on_error`]) for hosts
//! that report failures instead of propagating them.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Callback invoked with every error produced at the `translate` boundary.
pub type ErrorHook = Box<dyn Fn(&Error) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An empty key was passed to `translate`.
    #[error("\"key\" parameter required")]
    MissingKey,

    /// The gender hint does not stringify to any configured gender tag.
    #[error(
        "invalid gender parameter \"{value}\" - expects either \"{female}\", \"{male}\" or \"{neutral}\""
    )]
    InvalidGender {
        value: String,
        female: String,
        male: String,
        neutral: String,
    },

    /// A locale name (override, current or default) is not in the
    /// discovered locale set.
    #[error("locale \"{locale}\" is not in the discovered locales list")]
    UnknownLocale { locale: String },

    /// The configured locale directory does not exist.
    #[error("locale directory {dir:?} does not exist")]
    LocaleDirMissing { dir: PathBuf },

    /// The locale directory contains no file with the configured extension.
    #[error("no locale files found in {dir:?}")]
    NoLocaleFiles { dir: PathBuf },

    /// A locale's backing file vanished between discovery and load.
    #[error("locale file {file:?} does not exist")]
    LocaleFileMissing { file: PathBuf },

    /// A locale file exists but does not parse into a key-value tree.
    #[error("locale file {file:?} is not a valid document: {source}")]
    DocumentParseError {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The fully-qualified key resolved to nothing in the requested locale
    /// or the default locale.
    #[error("key \"{key}\" not found for locale \"{locale}\"")]
    KeyNotFound { key: String, locale: String },
}
