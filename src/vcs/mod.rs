mod git;

pub use git::GitCli;

use crate::error::RepoLinkError;
use std::fmt;
use std::path::Path;

/// A read-only question asked of the version-control tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind<'a> {
    RemoteOrigin,
    RepositoryRoot,
    CurrentBranch,
    DefaultBranch,
    /// Latest commit touching the given file.
    LatestCommit(&'a Path),
}

impl fmt::Display for QueryKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteOrigin => f.write_str("remote origin"),
            Self::RepositoryRoot => f.write_str("repository root"),
            Self::CurrentBranch => f.write_str("current branch"),
            Self::DefaultBranch => f.write_str("default branch"),
            Self::LatestCommit(path) => write!(f, "latest commit for {}", path.display()),
        }
    }
}

/// Answers [`QueryKind`] questions for a working directory.
///
/// Implementations return trimmed, non-empty text or [`RepoLinkError::Vcs`].
pub trait VcsQuery {
    fn query(
        &self,
        working_dir: &Path,
        kind: QueryKind<'_>,
    ) -> impl std::future::Future<Output = Result<String, RepoLinkError>> + Send;
}
