use crate::error::RepoLinkError;
use crate::provider::{ProviderOverride, TemplateRegistry};
use crate::resolve::RevisionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration for repo-link.
///
/// Configuration is stored at `~/.config/repo-link/config.json` and created with
/// default values on first run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Revision used when `--revision` is not given.
    #[serde(default)]
    pub default_revision: RevisionKind,
    /// Extra or adjusted provider templates, keyed by host.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderOverride>,
}

impl Config {
    /// Loads configuration from the default location, creating it if none exists.
    pub fn load() -> Result<Self, RepoLinkError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`, writing a default config there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, RepoLinkError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = fs_err::read_to_string(path).map_err(|source| RepoLinkError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|e| RepoLinkError::ConfigParse { source: e })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), RepoLinkError> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent).map_err(|e| RepoLinkError::ConfigSave { source: e })?;
        }

        let contents =
            serde_json::to_string_pretty(self).map_err(|e| RepoLinkError::ConfigSave {
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            })?;

        fs_err::write(path, contents).map_err(|e| RepoLinkError::ConfigSave { source: e })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
            })
            .join("repo-link")
            .join("config.json")
    }

    /// The built-in providers with this config's `providers` merged in.
    pub fn registry(&self) -> Result<TemplateRegistry, RepoLinkError> {
        TemplateRegistry::merge_overrides(TemplateRegistry::builtin(), &self.providers)
    }
}
