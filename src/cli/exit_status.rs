use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): every file was processed
/// - `Failure` (1): the command finished but some files could not be parsed,
///   or `init` found an existing config
/// - `Error` (2): the command could not run (bad config, unreadable catalog)
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
