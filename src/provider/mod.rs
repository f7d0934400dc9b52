mod builtin;

use crate::error::RepoLinkError;
use crate::resolve::RevisionKind;
use crate::selection::SelectionRange;
use crate::template::Template;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Registry key of the fallback used for hosts without their own entry.
pub const SELF_HOSTED: &str = "self-hosted";

/// URL layout of one hosting provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderTemplate {
    pub base: Template,
    /// Replaces `base` for default-branch and current-branch links.
    pub branch: Option<Template>,
    /// Replaces `base` for current-commit links.
    pub commit: Option<Template>,
    pub line: Option<Template>,
    pub line_range: Option<Template>,
}

impl ProviderTemplate {
    pub fn base_for(&self, kind: RevisionKind) -> &Template {
        let specific = match kind {
            RevisionKind::DefaultBranch | RevisionKind::CurrentBranch => self.branch.as_ref(),
            RevisionKind::CurrentCommit => self.commit.as_ref(),
        };
        specific.unwrap_or(&self.base)
    }

    /// Range suffix for multi-line selections when defined, else the single-line suffix.
    pub fn suffix_for(&self, selection: SelectionRange) -> Option<&Template> {
        if selection.is_range()
            && let Some(range) = &self.line_range
        {
            return Some(range);
        }
        self.line.as_ref()
    }
}

/// A partial [`ProviderTemplate`] as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderOverride {
    /// Existing registry entry to start from, e.g. `gitlab.com` for a self-hosted GitLab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_range: Option<String>,
}

/// Outcome of a host lookup. The fallback case is kept distinct so callers
/// can tell a dedicated entry from the self-hosted layout.
#[derive(Debug, Clone, Copy)]
pub enum TemplateLookup<'a> {
    Found(&'a ProviderTemplate),
    FallbackSelfHosted(&'a ProviderTemplate),
}

impl<'a> TemplateLookup<'a> {
    pub fn template(&self) -> &'a ProviderTemplate {
        match *self {
            Self::Found(t) | Self::FallbackSelfHosted(t) => t,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackSelfHosted(_))
    }
}

/// Host → [`ProviderTemplate`] table.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: BTreeMap<String, ProviderTemplate>,
}

impl TemplateRegistry {
    /// A registry with no entries, not even the self-hosted fallback.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in SaaS providers plus the self-hosted fallback.
    pub fn builtin() -> Self {
        Self {
            entries: builtin::entries().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ProviderTemplate> {
        self.entries.get(key)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Exact host match, else the [`SELF_HOSTED`] entry. `None` only when
    /// the registry lacks both.
    pub fn resolve_template(&self, host: &str) -> Option<TemplateLookup<'_>> {
        if let Some(found) = self.entries.get(host) {
            return Some(TemplateLookup::Found(found));
        }
        self.entries
            .get(SELF_HOSTED)
            .map(TemplateLookup::FallbackSelfHosted)
    }

    /// Merges user overrides into `builtins`.
    ///
    /// - A key already present in `builtins` (other than [`SELF_HOSTED`]) keeps
    ///   its built-in templates; the override is ignored with a warning.
    /// - The [`SELF_HOSTED`] key is merged field by field.
    /// - Any other key becomes a new entry built from its `inherit` target (if
    ///   any) with the supplied fields on top. It must end up with a `base`.
    ///
    /// Every supplied template is parsed here, so unknown placeholders are
    /// reported before any URL is built.
    pub fn merge_overrides(
        builtins: TemplateRegistry,
        overrides: &BTreeMap<String, ProviderOverride>,
    ) -> Result<TemplateRegistry, RepoLinkError> {
        let mut merged = builtins.clone();

        for (key, ov) in overrides {
            let host = key.to_ascii_lowercase();

            if host != SELF_HOSTED && builtins.entries.contains_key(&host) {
                warn!(host = %host, "ignoring provider override for built-in host");
                continue;
            }

            let start = match &ov.inherit {
                Some(target) => Some(
                    builtins
                        .get(&target.to_ascii_lowercase())
                        .cloned()
                        .ok_or_else(|| RepoLinkError::InvalidOverride {
                            host: host.clone(),
                            reason: format!("inherit target {target} is not a known provider"),
                        })?,
                ),
                None => builtins.get(&host).cloned(),
            };

            let template = apply_override(&host, start, ov)?;
            debug!(host = %host, base = %template.base, "registered provider override");
            merged.entries.insert(host, template);
        }

        Ok(merged)
    }
}

fn apply_override(
    host: &str,
    start: Option<ProviderTemplate>,
    ov: &ProviderOverride,
) -> Result<ProviderTemplate, RepoLinkError> {
    let field = |name: &str, value: &Option<String>| -> Result<Option<Template>, RepoLinkError> {
        value
            .as_deref()
            .map(|source| {
                Template::parse(source).map_err(|e| RepoLinkError::InvalidOverride {
                    host: host.to_string(),
                    reason: format!("{name}: {e}"),
                })
            })
            .transpose()
    };

    let base = field("base", &ov.base)?;
    let branch = field("branch", &ov.branch)?;
    let commit = field("commit", &ov.commit)?;
    let line = field("line", &ov.line)?;
    let line_range = field("line_range", &ov.line_range)?;

    let Some(start) = start else {
        let base = base.ok_or_else(|| RepoLinkError::InvalidOverride {
            host: host.to_string(),
            reason: "a `base` template (or `inherit`) is required for a new host".to_string(),
        })?;
        return Ok(ProviderTemplate {
            base,
            branch,
            commit,
            line,
            line_range,
        });
    };

    Ok(ProviderTemplate {
        base: base.unwrap_or(start.base),
        branch: branch.or(start.branch),
        commit: commit.or(start.commit),
        line: line.or(start.line),
        line_range: line_range.or(start.line_range),
    })
}
