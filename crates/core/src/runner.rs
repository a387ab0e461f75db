//! Task execution.
//!
//! Walks the selected tasks in catalog order, prints their banners, and runs
//! each step as a child process that shares the driver's standard streams.
//! In simulate mode the command lines are printed, indented, instead of
//! executed, so a run can be inspected before committing hours of training.

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use tokio::process::Command;

use crate::catalog::{self, RunItem, Task};
use crate::command::ProcessCall;
use crate::layout::Layout;
use crate::recipe::Step;
use crate::timing;

/// Indentation prefixed to command lines echoed in simulate mode.
pub const DRY_RUN_INDENT: &str = "   ";

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A step's child process exited with a non-zero code.
    #[error("command failed with return code {code}")]
    CommandFailed { code: i32 },

    /// A step's child process could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A training-time record could not be written.
    #[error("failed to write {path}: {source}")]
    TimeFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RunError {
    /// The child's exit code, when the failure was a non-zero exit.
    pub fn return_code(&self) -> Option<i32> {
        match self {
            RunError::CommandFailed { code } => Some(*code),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Executes tasks against a [`Layout`].
pub struct Runner {
    layout: Layout,
    simulate: bool,
}

impl Runner {
    pub fn new(layout: Layout, simulate: bool) -> Self {
        Runner { layout, simulate }
    }

    /// Run every built-in task selected by `keywords`, in catalog order,
    /// stopping at the first failing step.
    pub async fn run_keywords(&self, keywords: &[String]) -> Result<(), RunError> {
        for task in catalog::select_tasks(keywords) {
            self.run_task(&task).await?;
        }
        Ok(())
    }

    async fn run_task(&self, task: &Task) -> Result<(), RunError> {
        for item in task.items() {
            match item {
                RunItem::Banner(line) => println!("{line}"),
                RunItem::Step(step) => self.run_step(&step).await?,
            }
        }
        Ok(())
    }

    /// Execute one step. Steps that train a model also write the elapsed
    /// training time next to the model's output files.
    async fn run_step(&self, step: &Step) -> Result<(), RunError> {
        let call = step.to_call(&self.layout);
        let start = Instant::now();
        self.invoke(&call).await?;

        if let Some((model, seed)) = step.train_target() {
            let minutes = timing::whole_minutes(start.elapsed());
            let record = self.layout.time_file(model, seed);
            timing::write_record(&record, minutes).map_err(|source| RunError::TimeFile {
                path: record.clone(),
                source,
            })?;
            tracing::info!(
                model,
                ?seed,
                minutes,
                record = %record.display(),
                "recorded training time"
            );
        }
        Ok(())
    }

    /// Run `call` to completion, inheriting the parent's standard streams.
    async fn invoke(&self, call: &ProcessCall) -> Result<(), RunError> {
        if self.simulate {
            println!("{DRY_RUN_INDENT}{call}");
            return Ok(());
        }

        tracing::debug!(command = %call, "spawning");
        let status = Command::new(call.program())
            .args(call.argv())
            .status()
            .await
            .map_err(|source| RunError::Spawn {
                program: call.program().to_string(),
                source,
            })?;

        if !status.success() {
            // A signal-killed child has no exit code; report it as -1.
            return Err(RunError::CommandFailed {
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn runner(dir: &tempfile::TempDir, simulate: bool) -> Runner {
        Runner::new(Layout::new(dir.path()), simulate)
    }

    fn shell(script: &str) -> ProcessCall {
        ProcessCall::new("sh").arg("-c").arg(script)
    }

    #[tokio::test]
    async fn invoke_accepts_a_clean_exit() {
        let dir = tempfile::tempdir().unwrap();
        assert!(runner(&dir, false).invoke(&shell("exit 0")).await.is_ok());
    }

    #[tokio::test]
    async fn invoke_reports_the_child_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let err = runner(&dir, false).invoke(&shell("exit 3")).await.unwrap_err();
        assert_matches!(err, RunError::CommandFailed { code: 3 });
        assert_eq!(err.return_code(), Some(3));
    }

    #[tokio::test]
    async fn invoke_surfaces_spawn_failures() {
        let dir = tempfile::tempdir().unwrap();
        let call = ProcessCall::new("/nonexistent/interpreter");
        let err = runner(&dir, false).invoke(&call).await.unwrap_err();
        assert_matches!(err, RunError::Spawn { ref program, .. } if program == "/nonexistent/interpreter");
        assert_eq!(err.return_code(), None);
    }

    #[tokio::test]
    async fn simulate_never_spawns() {
        let dir = tempfile::tempdir().unwrap();
        let call = ProcessCall::new("/nonexistent/interpreter");
        assert!(runner(&dir, true).invoke(&call).await.is_ok());
    }

    #[tokio::test]
    async fn simulated_training_still_writes_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());
        layout.ensure_dirs().unwrap();

        let runner = Runner::new(layout.clone(), true);
        runner.run_step(&Step::train("mante")).await.unwrap();

        let record = std::fs::read_to_string(layout.time_file("mante", None)).unwrap();
        assert_eq!(record, "# mins\n0\n");
    }

    #[tokio::test]
    async fn training_records_land_in_seed_suffixed_files() {
        let dir = tempfile::tempdir().unwrap();
        // `true` ignores the script arguments and exits cleanly, standing in
        // for a real interpreter.
        let layout = Layout::new(dir.path()).with_python("true");
        layout.ensure_dirs().unwrap();

        let runner = Runner::new(layout.clone(), false);
        runner
            .run_step(&Step::train("mante").with_seed(103))
            .await
            .unwrap();

        let path = layout.time_file("mante", Some(103));
        assert!(path.ends_with("paper/times/mante_s103.txt"));
        let record = std::fs::read_to_string(path).unwrap();
        assert_eq!(record, "# mins\n0\n");
    }

    #[tokio::test]
    async fn non_training_steps_leave_no_record() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path()).with_python("true");
        layout.ensure_dirs().unwrap();

        let runner = Runner::new(layout.clone(), false);
        runner
            .run_step(&Step::action("mante", "psychometric"))
            .await
            .unwrap();

        assert!(!layout.time_file("mante", None).exists());
    }

    #[tokio::test]
    async fn unknown_keywords_run_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let result = runner(&dir, false)
            .run_keywords(&["not-a-task".to_string()])
            .await;
        assert!(result.is_ok());
    }
}
