//! External-process runner.
//!
//! The suite does not speak any provider's wire protocol itself; each
//! invocation is delegated to an external benchmark binary that receives the
//! resolved argv verbatim and prints a single JSON [`BenchResult`] object on
//! stdout. Anything that goes wrong here (spawn failure, non-zero exit,
//! unparseable stdout) is an invocation failure, never a run failure.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::dispatch::{InvocationFailure, Outcome, Runner};
use crate::resolve::ResolvedInvocation;

pub struct CommandRunner {
    program: PathBuf,
}

impl CommandRunner {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Runner for CommandRunner {
    async fn benchmark(&self, invocation: ResolvedInvocation) -> Outcome {
        let fail = |reason: String| InvocationFailure {
            model: invocation.model.clone(),
            reason,
        };

        debug!(
            "running {} {}",
            self.program.display(),
            invocation.argv.join(" ")
        );
        let output = Command::new(&self.program)
            .args(&invocation.argv)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| fail(format!("failed to spawn runner: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(fail(format!(
                "runner exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| fail(format!("unparseable runner output: {e}")))
    }
}
