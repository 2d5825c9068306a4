//! Command implementations.

use std::collections::BTreeSet;

use anyhow::Result;
use colored::Colorize;

use super::args::{CheckCommand, CommonArgs, GetCommand, LocalesCommand};
use super::exit_status::ExitStatus;
use crate::context::{Context, ContextOptions};
use crate::documents::{flatten_keys, load_document};
use crate::error::Error;
use crate::options::TranslateOptions;

/// Success mark for consistent output formatting
const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn build_context(common: &CommonArgs) -> Result<Context> {
    let mut options = match &common.options {
        Some(path) => ContextOptions::from_file(path)?,
        None => ContextOptions::new(),
    };
    if let Some(dir) = &common.dir {
        options.directory = dir.clone();
    }
    if let Some(ext) = &common.ext {
        options.file_extension = ext.clone();
    }
    if let Some(locale) = &common.default_locale {
        options.default_locale = Some(locale.clone());
    }
    Ok(Context::new(options)?)
}

pub fn get(cmd: GetCommand) -> Result<ExitStatus> {
    let ctx = build_context(&cmd.common)?;

    let mut options = TranslateOptions::new();
    if let Some(plural) = cmd.plural {
        options = options.plural(plural);
    }
    if let Some(gender) = &cmd.gender {
        options = options.gender(gender);
    }
    if let Some(locale) = &cmd.locale {
        options = options.locale(locale.clone());
    }
    for (name, value) in cmd.replacements {
        options = options.replace(name, value);
    }

    match ctx.translate(&cmd.key, &options) {
        Ok(text) => {
            println!("{}", text);
            Ok(ExitStatus::Success)
        }
        Err(err @ (Error::KeyNotFound { .. } | Error::InvalidGender { .. })) => {
            eprintln!("{}: {}", "error".bold().red(), err);
            Ok(ExitStatus::Failure)
        }
        Err(err) => Err(err.into()),
    }
}

pub fn locales(cmd: LocalesCommand) -> Result<ExitStatus> {
    let ctx = build_context(&cmd.common)?;

    for locale in ctx.locales() {
        if locale == ctx.default_locale() {
            println!("{} {}", locale.bold(), "(default)".dimmed());
        } else {
            println!("{}", locale);
        }
    }
    Ok(ExitStatus::Success)
}

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = build_context(&cmd.common)?;

    let reference = load_document(ctx.directory(), ctx.default_locale(), ctx.file_extension())?;
    let reference_keys: BTreeSet<String> = flatten_keys(&reference).into_iter().collect();

    let mut missing_total = 0;
    for locale in ctx.locales() {
        if locale == ctx.default_locale() {
            continue;
        }
        let doc = load_document(ctx.directory(), locale, ctx.file_extension())?;
        let keys: BTreeSet<String> = flatten_keys(&doc).into_iter().collect();

        let missing: Vec<&String> = reference_keys.difference(&keys).collect();
        missing_total += missing.len();
        for key in missing {
            println!(
                "{}: \"{}\" missing from locale {}",
                "warning".bold().yellow(),
                key,
                locale.bold()
            );
        }
    }

    if missing_total > 0 {
        println!(
            "\n{} {} key(s) missing against default locale {}",
            FAILURE_MARK.red(),
            missing_total,
            ctx.default_locale().bold()
        );
        Ok(ExitStatus::Failure)
    } else {
        println!(
            "{} all locales cover default locale {}",
            SUCCESS_MARK.green(),
            ctx.default_locale().bold()
        );
        Ok(ExitStatus::Success)
    }
}
