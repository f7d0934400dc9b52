use super::{ProviderTemplate, SELF_HOSTED};
use crate::template::Template;

struct Builtin {
    host: &'static str,
    base: &'static str,
    branch: Option<&'static str>,
    commit: Option<&'static str>,
    line: Option<&'static str>,
    line_range: Option<&'static str>,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        host: "github.com",
        base: "https://{domain}/{owner}/{repo}/blob/{revision}/{path}",
        branch: None,
        commit: None,
        line: Some("#L{line}"),
        line_range: Some("#L{line}-L{line_end}"),
    },
    Builtin {
        host: "gitlab.com",
        base: "https://{domain}/{owner}/{repo}/-/blob/{revision}/{path}",
        branch: None,
        commit: None,
        line: Some("#L{line}"),
        line_range: Some("#L{line}-{line_end}"),
    },
    Builtin {
        host: "bitbucket.org",
        base: "https://{domain}/{owner}/{repo}/src/{revision}/{path}",
        branch: None,
        commit: None,
        line: Some("#lines-{line}"),
        line_range: Some("#lines-{line}:{line_end}"),
    },
    Builtin {
        host: "codeberg.org",
        base: "https://{domain}/{owner}/{repo}/src/branch/{revision}/{path}",
        branch: None,
        commit: Some("https://{domain}/{owner}/{repo}/src/commit/{revision}/{path}"),
        line: Some("#L{line}"),
        line_range: Some("#L{line}-L{line_end}"),
    },
    // Bitbucket Server / Data Center layout
    Builtin {
        host: SELF_HOSTED,
        base: "{protocol}://{domain}/projects/{owner}/repos/{repo}/browse/{path}?at={revision}",
        branch: Some(
            "{protocol}://{domain}/projects/{owner}/repos/{repo}/browse/{path}?at=refs/heads/{revision}",
        ),
        commit: None,
        line: Some("#{line}"),
        line_range: Some("#{line}-{line_end}"),
    },
];

fn parse(source: &str) -> Template {
    Template::parse(source).expect("valid built-in template")
}

pub(super) fn entries() -> impl Iterator<Item = (String, ProviderTemplate)> {
    BUILTINS.iter().map(|b| {
        (
            b.host.to_string(),
            ProviderTemplate {
                base: parse(b.base),
                branch: b.branch.map(parse),
                commit: b.commit.map(parse),
                line: b.line.map(parse),
                line_range: b.line_range.map(parse),
            },
        )
    })
}
