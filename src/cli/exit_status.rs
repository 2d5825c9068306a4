use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): command completed, nothing to report
/// - `Failure` (1): command completed but found problems (missing key,
///   missing translations)
/// - `Error` (2): command failed due to internal error (bad directory,
///   parse error, invalid arguments)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
