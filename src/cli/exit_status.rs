use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, the lookup found text
/// - `Failure` (1): Command completed but found nothing, or refused to overwrite
/// - `Error` (2): Command failed due to internal error (config error, unreadable sources, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully.
    Success,
    /// Command completed without a result.
    Failure,
    /// Command failed due to internal error.
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
