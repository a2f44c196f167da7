//! Local Git Log
//!
//! Commit history read from a local git checkout.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::models::CommitRecord;

use super::CommitFetcher;

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';
/// hash, author date (strict ISO-8601), author name, subject
const LOG_FORMAT: &str = "--pretty=format:%H%x1f%aI%x1f%an%x1f%s%x1e";

/// Reads the changelog with `git log` in a local repository.
#[derive(Debug, Clone)]
pub struct LocalGitLog {
    repo_path: PathBuf,
    timeout: Duration,
}

impl LocalGitLog {
    pub fn new(repo_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            repo_path: repo_path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CommitFetcher for LocalGitLog {
    fn source(&self) -> String {
        format!("local:{}", self.repo_path.display())
    }

    async fn fetch_commits(&self) -> FetchResult<Vec<CommitRecord>> {
        let mut command = Command::new("git");
        command
            .arg("-C")
            .arg(&self.repo_path)
            .args(["log", LOG_FORMAT])
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| FetchError::Upstream("git log timed out".to_string()))?
            .map_err(|e| FetchError::Upstream(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FetchError::Upstream(format!(
                "git log exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let commits = parse_git_log(&String::from_utf8_lossy(&output.stdout));
        debug!(path = %self.repo_path.display(), count = commits.len(), "Read local git log");
        Ok(commits)
    }
}

/// Parses output produced with the unit/record-separated log format.
///
/// Malformed records (fewer than four fields) are skipped.
pub fn parse_git_log(output: &str) -> Vec<CommitRecord> {
    output
        .split(RECORD_SEP)
        .map(|record| record.trim_start_matches(['\n', '\r']))
        .filter(|record| !record.is_empty())
        .filter_map(|record| {
            let mut fields = record.splitn(4, FIELD_SEP);
            let hash = fields.next()?;
            let date = fields.next()?;
            let author = fields.next()?;
            let message = fields.next()?;
            Some(CommitRecord::new(hash, date, author, message))
        })
        .collect()
}
