//! Mock engines for tests.

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::engine::{ComputationEngine, ProcessEngine, ProcessOutcome};

/// A shell script written to a temporary directory, removed on drop.
#[cfg(unix)]
pub(crate) struct ScriptEngine {
    _dir: TempDir,
    path: std::path::PathBuf,
}

#[cfg(unix)]
impl ScriptEngine {
    pub(crate) fn engine(&self) -> ProcessEngine {
        ProcessEngine::new(&self.path)
    }
}

/// Writes `body` as an executable `/bin/sh` script.
#[cfg(unix)]
pub(crate) fn script_engine(body: &str) -> ScriptEngine {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    ScriptEngine { _dir: dir, path }
}

/// Answers without spawning anything: `Success("<text1>|<text2>")`, or the fixed outcome.
pub(crate) struct FakeEngine {
    fixed: Option<ProcessOutcome>,
}

impl FakeEngine {
    pub(crate) fn echo() -> Arc<Self> {
        Arc::new(Self { fixed: None })
    }

    pub(crate) fn returning(outcome: ProcessOutcome) -> Arc<Self> {
        Arc::new(Self {
            fixed: Some(outcome),
        })
    }
}

#[async_trait]
impl ComputationEngine for FakeEngine {
    async fn evaluate(&self, text1: &str, text2: &str) -> ProcessOutcome {
        match &self.fixed {
            Some(outcome) => outcome.clone(),
            None => ProcessOutcome::Success(format!("{text1}|{text2}")),
        }
    }
}
