use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::change::RevisionRange;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn run(&self, args: &[&str]) -> AppResult<String> {
        let command_line = format!("git {}", args.join(" "));
        debug!(command = %command_line, "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run `{command_line}`: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "`{command_line}` exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn changed_files(&self, range: &RevisionRange) -> AppResult<Vec<String>> {
        let output = self
            .run(&["diff", "--name-only", &range.as_git_range()])
            .await?;
        Ok(output
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn file_diff(&self, range: &RevisionRange, file: &str) -> AppResult<String> {
        self.run(&["diff", &range.as_git_range(), "--", file]).await
    }

    async fn name_status(&self, range: &RevisionRange) -> AppResult<String> {
        self.run(&["diff", &range.as_git_range(), "--name-status"])
            .await
    }

    async fn commit_log(&self, range: &RevisionRange) -> AppResult<String> {
        self.run(&["log", &range.as_git_range(), "--pretty=format:%h - %s"])
            .await
    }
}
