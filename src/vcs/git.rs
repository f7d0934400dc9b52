use super::{QueryKind, VcsQuery};
use crate::error::RepoLinkError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// [`VcsQuery`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    ceiling: Option<PathBuf>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Uses a specific git binary instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ceiling: None,
        }
    }

    /// Stops repository discovery from climbing above `dir` (`GIT_CEILING_DIRECTORIES`).
    pub fn with_ceiling(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ceiling = Some(dir.into());
        self
    }

    fn args(kind: QueryKind<'_>) -> Vec<OsString> {
        let fixed: &[&str] = match kind {
            QueryKind::RemoteOrigin => &["config", "--get", "remote.origin.url"],
            QueryKind::RepositoryRoot => &["rev-parse", "--show-toplevel"],
            QueryKind::CurrentBranch => &["rev-parse", "--abbrev-ref", "HEAD"],
            QueryKind::DefaultBranch => &["symbolic-ref", "--short", "refs/remotes/origin/HEAD"],
            QueryKind::LatestCommit(_) => &["log", "-n", "1", "--pretty=format:%H", "--"],
        };
        let mut args: Vec<OsString> = fixed.iter().map(OsString::from).collect();
        if let QueryKind::LatestCommit(file) = kind {
            args.push(file.as_os_str().to_owned());
        }
        args
    }

    async fn run(&self, working_dir: &Path, kind: QueryKind<'_>) -> Result<String, RepoLinkError> {
        let failed = |message: String| RepoLinkError::Vcs {
            query: kind.to_string(),
            message,
        };

        let mut command = Command::new(&self.program);
        command
            .args(Self::args(kind))
            .current_dir(working_dir)
            // Hook environments would otherwise point every query at one repository
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .kill_on_drop(true);
        if let Some(ceiling) = &self.ceiling {
            command.env("GIT_CEILING_DIRECTORIES", ceiling);
        }

        let output = command
            .output()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| failed("output was not valid UTF-8".to_string()))?;
        postprocess(kind, &stdout).ok_or_else(|| failed("no result".to_string()))
    }
}

/// Strips trailing line endings and maps git's output to a query answer.
fn postprocess(kind: QueryKind<'_>, stdout: &str) -> Option<String> {
    let text = stdout.trim_end_matches(['\r', '\n']);
    let text = match kind {
        // detached HEAD
        QueryKind::CurrentBranch if text == "HEAD" => return None,
        QueryKind::DefaultBranch => text.strip_prefix("origin/").unwrap_or(text),
        _ => text,
    };
    (!text.is_empty()).then(|| text.to_string())
}

impl VcsQuery for GitCli {
    async fn query(
        &self,
        working_dir: &Path,
        kind: QueryKind<'_>,
    ) -> Result<String, RepoLinkError> {
        let result = self.run(working_dir, kind).await;
        let dir = working_dir.display();
        match &result {
            Ok(text) => debug!(query = %kind, dir = %dir, result = %text, "git query"),
            Err(e) => debug!(query = %kind, dir = %dir, error = %e, "git query failed"),
        }
        result
    }
}
