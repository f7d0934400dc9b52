use crate::context::RepositoryContext;
use crate::error::RepoLinkError;
use crate::provider::TemplateRegistry;
use crate::selection::SelectionRange;
use crate::template::TemplateValues;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Which revision a link pins the file to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RevisionKind {
    #[default]
    #[value(alias = "default")]
    DefaultBranch,
    #[value(alias = "branch")]
    CurrentBranch,
    #[value(alias = "commit")]
    CurrentCommit,
}

impl fmt::Display for RevisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DefaultBranch => "default branch",
            Self::CurrentBranch => "current branch",
            Self::CurrentCommit => "current commit",
        })
    }
}

/// Builds the web URL for `selection` in the context's file.
///
/// Picks the revision for `kind`, the provider entry for the context's host
/// (falling back to the self-hosted layout), the kind-specific base template
/// and the line or line-range suffix, then renders them. Every failure is
/// returned as an error describing why no link is available.
pub fn resolve(
    context: Option<&RepositoryContext>,
    registry: &TemplateRegistry,
    kind: RevisionKind,
    selection: SelectionRange,
) -> Result<String, RepoLinkError> {
    let context = context.ok_or(RepoLinkError::NoActiveContext)?;
    let origin = &context.origin;

    if origin.host.is_empty()
        || origin.owner.is_empty()
        || origin.repo.is_empty()
        || context.relative_path.is_empty()
    {
        return Err(RepoLinkError::NoActiveContext);
    }

    let revision = context
        .revision(kind)
        .ok_or(RepoLinkError::RevisionUnknown { kind })?;

    let lookup = registry
        .resolve_template(&origin.host)
        .ok_or_else(|| RepoLinkError::TemplateMissing {
            host: origin.host.clone(),
        })?;
    let provider = lookup.template();
    trace!(
        host = %origin.host,
        fallback = lookup.is_fallback(),
        "selected provider template"
    );

    let values = TemplateValues {
        domain: &origin.host,
        protocol: &origin.protocol,
        owner: &origin.owner,
        repo: &origin.repo,
        path: &context.relative_path,
        revision,
        line: selection.start_line,
        line_end: selection.end_line,
    };

    let mut url = provider.base_for(kind).render(&values);
    if let Some(suffix) = provider.suffix_for(selection) {
        suffix.render_into(&values, &mut url);
    }

    if url::Url::parse(&url).is_err() {
        return Err(RepoLinkError::MalformedUrl { url });
    }

    Ok(url)
}
