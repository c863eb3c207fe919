use crate::domain::model::CommandOutcome;
use crate::domain::ports::VersionControl;
use crate::utils::error::{DesignCodeError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Runs the git command-line tool inside the repository directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<String>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            repo_root: repo_root.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<CommandOutcome> {
        let command = format!("{} {}", self.program, args.join(" "));
        tracing::debug!("Running `{}` in {}", command, self.repo_root.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .await
            .map_err(|e| DesignCodeError::ExternalToolError {
                command: command.clone(),
                message: e.to_string(),
            })?;

        let outcome = CommandOutcome {
            command,
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!("`{}` exited with {:?}", outcome.command, outcome.exit_code);
        Ok(outcome)
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn stage_all(&self) -> Result<CommandOutcome> {
        self.run(&["add", "-A"]).await
    }

    async fn commit(&self, message: &str) -> Result<CommandOutcome> {
        self.run(&["commit", "-m", message]).await
    }

    async fn push(&self) -> Result<CommandOutcome> {
        self.run(&["push"]).await
    }
}
