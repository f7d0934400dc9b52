use crate::context::ContextCache;
use crate::error::RepoLinkError;
use crate::provider::TemplateRegistry;
use crate::resolve::{RevisionKind, resolve};
use crate::selection::SelectionRange;
use tracing::{info, warn};

/// Hands a finished URL to something that can show it.
pub trait UrlOpener {
    fn open(&self, url: &str) -> Result<(), RepoLinkError>;
}

/// Opens URLs in the system's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), RepoLinkError> {
        open::that(url).map_err(|source| RepoLinkError::OpenFailed {
            url: url.to_string(),
            source,
        })
    }
}

/// The link commands a host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenDefaultBranch,
    OpenCurrentBranch,
    OpenCurrentCommit,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::OpenDefaultBranch,
        Action::OpenCurrentBranch,
        Action::OpenCurrentCommit,
    ];

    pub fn revision_kind(self) -> RevisionKind {
        match self {
            Self::OpenDefaultBranch => RevisionKind::DefaultBranch,
            Self::OpenCurrentBranch => RevisionKind::CurrentBranch,
            Self::OpenCurrentCommit => RevisionKind::CurrentCommit,
        }
    }

    /// The action that opens a link at `kind`.
    pub fn for_revision(kind: RevisionKind) -> Self {
        match kind {
            RevisionKind::DefaultBranch => Self::OpenDefaultBranch,
            RevisionKind::CurrentBranch => Self::OpenCurrentBranch,
            RevisionKind::CurrentCommit => Self::OpenCurrentCommit,
        }
    }

    /// Gating for menus: nothing is offered outside a repository, and the
    /// current-branch link is hidden while on the default branch.
    pub fn is_enabled(self, cache: &ContextCache) -> bool {
        match self {
            Self::OpenDefaultBranch | Self::OpenCurrentCommit => cache.in_repository(),
            Self::OpenCurrentBranch => cache.in_repository() && !cache.on_default_branch(),
        }
    }

    /// Resolves the link from the cached context and opens it.
    ///
    /// Returns the URL handed to `opener`, or `None` when no link could be
    /// built. Failures are logged and never propagated.
    pub fn run(
        self,
        cache: &ContextCache,
        registry: &TemplateRegistry,
        selection: SelectionRange,
        opener: &impl UrlOpener,
    ) -> Option<String> {
        let url = match resolve(cache.current(), registry, self.revision_kind(), selection) {
            Ok(url) => url,
            Err(e) => {
                info!(action = ?self, reason = %e, "no link available");
                return None;
            }
        };

        if let Err(e) = opener.open(&url) {
            warn!(url = %url, error = %e, "could not open link");
        }
        Some(url)
    }
}
