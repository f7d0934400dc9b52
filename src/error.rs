use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::resolve::RevisionKind;

#[derive(Error, Debug, Diagnostic)]
pub enum RepoLinkError {
    #[error("git query '{query}' failed: {message}")]
    #[diagnostic(help("Make sure git is installed and the file is inside a git working copy"))]
    Vcs { query: String, message: String },

    #[error("{} is not inside the repository", path.display())]
    NotInRepository { path: PathBuf },

    #[error("unrecognised remote origin: {origin}")]
    #[diagnostic(help(
        "Expected scheme://host/owner/repo[.git] or user@host:owner/repo[.git]"
    ))]
    OriginUnparseable { origin: String },

    #[error("no URL template for host {host}")]
    #[diagnostic(help("Add a provider entry for this host to the config file"))]
    TemplateMissing { host: String },

    #[error("no active file")]
    NoActiveContext,

    #[error("{kind} is not known for this file")]
    #[diagnostic(help("{kind} could not be read from git; try another --revision"))]
    RevisionUnknown { kind: RevisionKind },

    #[error("invalid template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("invalid provider override for {host}: {reason}")]
    #[diagnostic(help("Check the `providers` section of the config file"))]
    InvalidOverride { host: String, reason: String },

    #[error("template produced a malformed url: {url}")]
    #[diagnostic(help("Provider templates must start with a scheme such as `https://`"))]
    MalformedUrl { url: String },

    #[error("invalid selection: {input}")]
    #[diagnostic(help("{hint}"))]
    InvalidSelection { input: String, hint: String },

    #[error("failed to open {url}")]
    OpenFailed {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load config from {}", path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    ConfigParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to save config")]
    ConfigSave {
        #[source]
        source: std::io::Error,
    },
}
