use crate::error::RepoLinkError;
use crate::origin::ParsedOrigin;
use crate::resolve::RevisionKind;
use crate::vcs::{QueryKind, VcsQuery};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Everything needed to build links for one file, read from git in one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    pub origin: ParsedOrigin,
    /// Repository top level as reported by git.
    pub root: PathBuf,
    /// File path relative to `root`, always `/`-separated.
    pub relative_path: String,
    pub current_branch: Option<String>,
    pub default_branch: Option<String>,
    /// Most recent commit touching the file.
    pub current_commit: Option<String>,
}

impl RepositoryContext {
    /// Queries git for everything about `file`.
    ///
    /// The repository root and the remote origin gate the whole context: if
    /// either is unavailable the refresh fails. Branch and commit queries
    /// that fail leave their field empty instead.
    pub async fn discover<V: VcsQuery>(vcs: &V, file: &Path) -> Result<Self, RepoLinkError> {
        let dir = file
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .ok_or(RepoLinkError::NoActiveContext)?;

        let root = PathBuf::from(vcs.query(dir, QueryKind::RepositoryRoot).await?);
        let relative_path = relative_to_root(file, &root).await?;

        let raw_origin = vcs.query(dir, QueryKind::RemoteOrigin).await?;
        let origin = ParsedOrigin::parse(&raw_origin)?;

        let current_branch = optional(vcs.query(dir, QueryKind::CurrentBranch).await);
        let default_branch = optional(vcs.query(dir, QueryKind::DefaultBranch).await);
        let current_commit = optional(vcs.query(dir, QueryKind::LatestCommit(file)).await);

        Ok(Self {
            origin,
            root,
            relative_path,
            current_branch,
            default_branch,
            current_commit,
        })
    }

    pub fn revision(&self, kind: RevisionKind) -> Option<&str> {
        match kind {
            RevisionKind::DefaultBranch => self.default_branch.as_deref(),
            RevisionKind::CurrentBranch => self.current_branch.as_deref(),
            RevisionKind::CurrentCommit => self.current_commit.as_deref(),
        }
    }

    pub fn is_on_default_branch(&self) -> bool {
        matches!(
            (&self.current_branch, &self.default_branch),
            (Some(current), Some(default)) if current == default
        )
    }
}

fn optional(result: Result<String, RepoLinkError>) -> Option<String> {
    result
        .inspect_err(|e| debug!(error = %e, "leaving context field empty"))
        .ok()
}

/// `file` relative to `root`, joined with `/`.
///
/// git reports the root with symlinks resolved, so the file is canonicalized
/// first; a path that cannot be canonicalized (an unsaved file, say) is used
/// as given, with `.` and `..` resolved lexically.
async fn relative_to_root(file: &Path, root: &Path) -> Result<String, RepoLinkError> {
    let canonical = fs_err::tokio::canonicalize(file)
        .await
        .unwrap_or_else(|_| file.to_path_buf());

    let relative = canonical
        .strip_prefix(root)
        .or_else(|_| file.strip_prefix(root))
        .map_err(|_| RepoLinkError::NotInRepository {
            path: file.to_path_buf(),
        })?;

    let mut parts: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            // `..` climbing above the root leaves the repository
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(RepoLinkError::NotInRepository {
                        path: file.to_path_buf(),
                    });
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if parts.is_empty() {
        return Err(RepoLinkError::NotInRepository {
            path: file.to_path_buf(),
        });
    }
    Ok(parts.join("/"))
}

/// Issued by [`ContextCache::begin_refresh`]; later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// The context for the active file, with the two gating flags hosts use to
/// enable link actions.
///
/// The cache has one writer: the refresh routine, which needs `&mut self`.
/// Readers only get `&self`, so they always see either the old record or the
/// new one, never a mix.
#[derive(Debug, Default)]
pub struct ContextCache {
    context: Option<RepositoryContext>,
    in_repository: bool,
    on_default_branch: bool,
    issued: u64,
    applied: u64,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&RepositoryContext> {
        self.context.as_ref()
    }

    /// Whether the active file is inside a repository with a usable origin.
    pub fn in_repository(&self) -> bool {
        self.in_repository
    }

    /// Whether the working copy has the default branch checked out.
    pub fn on_default_branch(&self) -> bool {
        self.on_default_branch
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Stores the outcome of the refresh identified by `ticket`.
    ///
    /// Returns `false` and keeps the current record when a newer refresh has
    /// already been applied. A failed refresh clears the record.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<RepositoryContext, RepoLinkError>,
    ) -> bool {
        if ticket.0 <= self.applied {
            debug!(ticket = ticket.0, applied = self.applied, "dropping stale context refresh");
            return false;
        }
        self.applied = ticket.0;

        match result {
            Ok(context) => {
                info!(
                    origin = %context.origin.identifier(),
                    path = %context.relative_path,
                    branch = context.current_branch.as_deref().unwrap_or("-"),
                    "repository context refreshed"
                );
                self.set(Some(context));
            }
            Err(e) => {
                info!(reason = %e, "repository context cleared");
                self.set(None);
            }
        }
        true
    }

    /// Re-derives the context for a newly focused file, or clears it when
    /// nothing is focused.
    pub async fn refresh<V: VcsQuery>(&mut self, vcs: &V, active_file: Option<&Path>) {
        let ticket = self.begin_refresh();
        let result = match active_file {
            Some(file) => RepositoryContext::discover(vcs, file).await,
            None => Err(RepoLinkError::NoActiveContext),
        };
        self.complete_refresh(ticket, result);
    }

    pub fn clear(&mut self) {
        let ticket = self.begin_refresh();
        self.complete_refresh(ticket, Err(RepoLinkError::NoActiveContext));
    }

    fn set(&mut self, context: Option<RepositoryContext>) {
        self.in_repository = context.is_some();
        self.on_default_branch = context
            .as_ref()
            .is_some_and(RepositoryContext::is_on_default_branch);
        self.context = context;
    }
}
