use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::engine::protocol::{encode, EncodedInput};
use crate::engine::{ComputationEngine, ProcessOutcome};

/// Runs the external engine executable, one child process per invocation.
///
/// The executable is started without arguments. Input is written to its stdin while
/// stdout and stderr are drained concurrently, so an engine that produces output
/// before consuming all of its input cannot stall the exchange.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// `None` lets an invocation run until the engine exits on its own.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            program = %self.program.display(),
            input_bytes = input.as_bytes().len(),
        )
    )]
    pub async fn run(&self, input: EncodedInput) -> ProcessOutcome {
        let start = Instant::now();
        let outcome = match self.timeout {
            None => self.exchange(input).await,
            // Dropping the exchange future drops the child, which kills it.
            Some(limit) => match tokio::time::timeout(limit, self.exchange(input)).await {
                Ok(outcome) => outcome,
                Err(_) => ProcessOutcome::Failure {
                    exit_code: ProcessOutcome::TIMED_OUT,
                    stderr: format!(
                        "Computation engine did not finish within {:.1}s",
                        limit.as_secs_f64()
                    ),
                },
            },
        };

        info!(
            monotonic_counter.engine_invocations = 1u64,
            histogram.engine_duration_ms = start.elapsed().as_millis() as u64,
            success = outcome.is_success(),
            launch_failed = outcome.is_launch_failure(),
            "Computation engine finished"
        );
        outcome
    }

    async fn exchange(&self, input: EncodedInput) -> ProcessOutcome {
        let mut child = match Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                warn!(error = %err, "Failed to launch computation engine");
                return ProcessOutcome::Failure {
                    exit_code: ProcessOutcome::LAUNCH_FAILED,
                    stderr: format!(
                        "Failed to launch computation engine {}: {}",
                        self.program.display(),
                        err
                    ),
                };
            }
        };

        let stdin = child.stdin.take();
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            stdin.write_all(input.as_bytes()).await?;
            stdin.flush().await
            // stdin is dropped here, closing the pipe so the engine sees end of input
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        match fed {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                debug!("Computation engine closed stdin before reading all input")
            }
            Err(err) => warn!(error = %err, "Failed to write computation engine input"),
        }

        let output = match output {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "Failed to collect computation engine output");
                return ProcessOutcome::Failure {
                    exit_code: ProcessOutcome::IO_FAILED,
                    stderr: format!("Failed to collect computation engine output: {err}"),
                };
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if output.status.success() {
            if !stderr.is_empty() {
                debug!(stderr = %stderr, "Computation engine wrote to stderr");
            }
            return ProcessOutcome::Success(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let exit_code = output.status.code().unwrap_or(ProcessOutcome::SIGNALLED);
        warn!(exit_code, stderr = %stderr, "Computation engine failed");
        ProcessOutcome::Failure { exit_code, stderr }
    }
}

#[async_trait]
impl ComputationEngine for ProcessEngine {
    async fn evaluate(&self, text1: &str, text2: &str) -> ProcessOutcome {
        let input = encode(text1, text2);
        if input.is_ambiguous() {
            warn!("Text contains a line break, the engine may split the fields differently");
        }
        self.run(input).await
    }
}
