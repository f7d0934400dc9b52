use crate::error::RepoLinkError;
use regex::Regex;
use std::sync::LazyLock;

/// `scheme://[user@]host[:port]/[any/prefix/]owner/repo[.git][/]`
static URL_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.-]*)://(?:[^@/]*@)?(?P<host>[^/:@]+)(?::\d*)?/(?:[^?#]*/)?(?P<owner>[^/?#]+)/(?P<repo>[^/?#]+?)(?:\.git)?/?$",
    )
    .expect("valid url-style pattern")
});

/// `user@host:[any/prefix/]owner/repo[.git][/]`
static SSH_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[^@/:\s]+@(?P<host>[^:/\s]+):/?(?:.*/)?(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
    )
    .expect("valid ssh-style pattern")
});

/// A remote origin address broken down into the parts a web URL needs.
///
/// Two address shapes are recognised:
/// - URL style: `https://github.com/owner/repo.git`, `ssh://git@host:7999/~owner/repo.git`
/// - SSH style: `git@gitlab.com:group/subgroup/owner/repo.git`
///
/// Only the last two path segments become `owner` and `repo`, so GitLab
/// subgroups and Bitbucket Server `scm/` prefixes are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOrigin {
    pub host: String,
    pub owner: String,
    pub repo: String,
    /// Web protocol: `http` only when the origin itself was fetched over plain http.
    pub protocol: String,
}

impl ParsedOrigin {
    /// Parses a raw `remote.origin.url` value.
    ///
    /// The URL-style pattern is tried first, then the SSH-style one. An address
    /// matching neither yields [`RepoLinkError::OriginUnparseable`].
    pub fn parse(raw: &str) -> Result<Self, RepoLinkError> {
        let raw = raw.trim();

        if let Some(caps) = URL_STYLE.captures(raw) {
            let protocol = if caps["scheme"].eq_ignore_ascii_case("http") {
                "http"
            } else {
                "https"
            };
            return Ok(Self::from_parts(
                &caps["host"],
                &caps["owner"],
                &caps["repo"],
                protocol,
            ));
        }

        if let Some(caps) = SSH_STYLE.captures(raw) {
            return Ok(Self::from_parts(
                &caps["host"],
                &caps["owner"],
                &caps["repo"],
                "https",
            ));
        }

        Err(RepoLinkError::OriginUnparseable {
            origin: raw.to_string(),
        })
    }

    fn from_parts(host: &str, owner: &str, repo: &str, protocol: &str) -> Self {
        // Bitbucket Server personal repositories live under `~user`
        let owner = owner.strip_prefix('~').unwrap_or(owner);
        Self {
            host: host.to_ascii_lowercase(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            protocol: protocol.to_string(),
        }
    }

    /// `host/owner/repo`, handy for log lines.
    pub fn identifier(&self) -> String {
        format!("{}/{}/{}", self.host, self.owner, self.repo)
    }
}
