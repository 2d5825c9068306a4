//! Command-line interface layer.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Get(cmd)) => commands::get(cmd),
        Some(Command::Locales(cmd)) => commands::locales(cmd),
        Some(Command::Check(cmd)) => commands::check(cmd),
        None => Ok(ExitStatus::Success),
    }
}
