//! Lingo - runtime i18n with plural- and gender-aware resolution
//!
//! Lingo resolves symbolic lookup keys into localized text drawn from
//! per-locale JSON documents on disk. Keys are dot paths into a
//! hierarchical document; nested nodes ("complex entries") are
//! disambiguated by plural and gender hints, missing keys fall back to the
//! default locale, and resolved text goes through two-pass `{{token}}`
//! substitution (explicit values first, then self-referential lookups).
//!
//! ```no_run
//! use lingo::{Context, TranslateOptions};
//!
//! let ctx = Context::with_directory("./locales")?;
//! let text = ctx.translate(
//!     "Hi.withName",
//!     &TranslateOptions::new().replace("name", "Mickey"),
//! )?;
//! assert_eq!(text, "Hi, Mickey!");
//! # Ok::<(), lingo::Error>(())
//! ```
//!
//! ## Module Structure
//!
//! - `context`: translation namespaces (configuration, cache, orchestration)
//! - `documents`: locale discovery and document loading
//! - `resolve`: key resolution and complex-form selection
//! - `substitute`: placeholder substitution
//! - `options`: per-call request options
//! - `tags`: configurable structural tag names
//! - `error`: typed error kinds
//! - `cli`: command-line interface layer

pub mod cli;
pub mod context;
pub mod documents;
pub mod error;
pub mod options;
pub mod resolve;
pub mod substitute;
pub mod tags;

pub use context::{Context, ContextOptions};
pub use error::{Error, Result};
pub use options::{Plural, TranslateOptions};
pub use tags::TagSet;
