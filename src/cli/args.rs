//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `get`: translate a key against a locale directory
//! - `locales`: list discovered locales
//! - `check`: compare every locale's key set against the default locale

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::options::Plural;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Get(cmd)) => cmd.common.verbose,
            Some(Command::Locales(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            None => false,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a key
    Get(GetCommand),
    /// List discovered locales
    Locales(LocalesCommand),
    /// Report keys missing from non-default locales
    Check(CheckCommand),
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Locale files directory (default: ./locales)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Locale filename extension (default: .json)
    #[arg(long)]
    pub ext: Option<String>,

    /// Default (fallback) locale
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Context options file (JSON); flags override its values
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct GetCommand {
    /// Translation key (dot path, e.g. "Hi.withName")
    pub key: String,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Resolve in this locale instead of the default
    #[arg(long)]
    pub locale: Option<String>,

    /// Plural hint: a boolean or a count
    #[arg(long, value_parser = parse_plural)]
    pub plural: Option<Plural>,

    /// Gender hint (one of the configured gender tags)
    #[arg(long)]
    pub gender: Option<String>,

    /// Replacement value as name=value (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_replacement)]
    pub replacements: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct LocalesCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

fn parse_plural(value: &str) -> Result<Plural, String> {
    if let Ok(flag) = value.parse::<bool>() {
        return Ok(Plural::Bool(flag));
    }
    value
        .parse::<i64>()
        .map(Plural::Count)
        .map_err(|_| format!("invalid plural \"{}\" - expected a boolean or a count", value))
}

fn parse_replacement(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(name, val)| (name.to_string(), val.to_string()))
        .ok_or_else(|| format!("invalid replacement \"{}\" - expected NAME=VALUE", value))
}
