use async_trait::async_trait;

pub mod process;
pub mod protocol;

pub use process::ProcessEngine;

/// Result of a single engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The engine exited with status zero, carrying its raw stdout.
    Success(String),
    /// The engine exited non-zero, or never ran. Negative exit codes are the sentinels below.
    Failure { exit_code: i32, stderr: String },
}

impl ProcessOutcome {
    /// The executable could not be started; `stderr` holds the launch error.
    pub const LAUNCH_FAILED: i32 = -1;
    /// The engine started but collecting its output or exit status failed.
    pub const IO_FAILED: i32 = -2;
    /// The configured timeout elapsed and the engine was killed.
    pub const TIMED_OUT: i32 = -3;
    /// The engine was terminated by a signal and has no exit code.
    pub const SIGNALLED: i32 = -4;

    pub fn is_success(&self) -> bool {
        matches!(self, ProcessOutcome::Success(_))
    }

    /// Distinguishes "never started" from "ran and failed".
    pub fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            ProcessOutcome::Failure {
                exit_code: ProcessOutcome::LAUNCH_FAILED,
                ..
            }
        )
    }
}

/// Anything that can score two texts. Implemented by [`ProcessEngine`] for the
/// real executable and by fakes in tests.
#[async_trait]
pub trait ComputationEngine: Send + Sync {
    async fn evaluate(&self, text1: &str, text2: &str) -> ProcessOutcome;
}
