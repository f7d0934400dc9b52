pub mod action;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod origin;
pub mod provider;
pub mod resolve;
pub mod selection;
pub mod template;
pub mod vcs;

pub use action::{Action, SystemBrowser, UrlOpener};
pub use cli::Cli;
pub use config::Config;
pub use context::{ContextCache, RepositoryContext};
pub use error::RepoLinkError;
pub use origin::ParsedOrigin;
pub use provider::{ProviderOverride, ProviderTemplate, TemplateLookup, TemplateRegistry};
pub use resolve::{RevisionKind, resolve};
pub use selection::{Position, RawSelection, SelectionRange};
pub use vcs::{GitCli, QueryKind, VcsQuery};
