use crate::error::RepoLinkError;
use std::borrow::Cow;
use std::fmt;

/// The closed set of `{placeholder}` tokens a provider template may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Domain,
    Protocol,
    Owner,
    Repo,
    Path,
    Revision,
    Line,
    LineEnd,
}

impl Placeholder {
    pub const ALL: [Placeholder; 8] = [
        Placeholder::Domain,
        Placeholder::Protocol,
        Placeholder::Owner,
        Placeholder::Repo,
        Placeholder::Path,
        Placeholder::Revision,
        Placeholder::Line,
        Placeholder::LineEnd,
    ];

    /// Looks up a token name. `host` is accepted as an alias for `domain`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "domain" | "host" => Some(Self::Domain),
            "protocol" => Some(Self::Protocol),
            "owner" => Some(Self::Owner),
            "repo" => Some(Self::Repo),
            "path" => Some(Self::Path),
            "revision" => Some(Self::Revision),
            "line" => Some(Self::Line),
            "line_end" => Some(Self::LineEnd),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Protocol => "protocol",
            Self::Owner => "owner",
            Self::Repo => "repo",
            Self::Path => "path",
            Self::Revision => "revision",
            Self::Line => "line",
            Self::LineEnd => "line_end",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(Placeholder),
}

/// A URL template parsed into literal text and placeholder tokens.
///
/// Parsing rejects unknown token names and unterminated `{`, so rendering a
/// `Template` always substitutes every token it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, RepoLinkError> {
        let invalid = |reason: String| RepoLinkError::InvalidTemplate {
            template: source.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let offset = source.len() - rest.len() + open;
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| invalid(format!("unterminated '{{' at byte {offset}")))?;
            let name = &after[..close];
            let placeholder = Placeholder::from_name(name).ok_or_else(|| {
                let known: Vec<String> = Placeholder::ALL.iter().map(ToString::to_string).collect();
                invalid(format!(
                    "unknown placeholder {{{name}}}, expected one of {}",
                    known.join(", ")
                ))
            })?;
            segments.push(Segment::Token(placeholder));
            rest = &after[close + 1..];
        }

        if rest.contains('}') {
            return Err(invalid("unmatched '}'".to_string()));
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Appends the rendered template to `out`.
    pub fn render_into(&self, values: &TemplateValues<'_>, out: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(p) => out.push_str(&values.value(*p)),
            }
        }
    }

    pub fn render(&self, values: &TemplateValues<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + 32);
        self.render_into(values, &mut out);
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Values substituted into a [`Template`]. Strings are raw; encoding happens on render.
#[derive(Debug, Clone)]
pub struct TemplateValues<'a> {
    pub domain: &'a str,
    pub protocol: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub path: &'a str,
    pub revision: &'a str,
    pub line: u32,
    pub line_end: u32,
}

impl TemplateValues<'_> {
    fn value(&self, placeholder: Placeholder) -> Cow<'_, str> {
        match placeholder {
            Placeholder::Domain => Cow::Borrowed(self.domain),
            Placeholder::Protocol => Cow::Borrowed(self.protocol),
            Placeholder::Owner => urlencoding::encode(self.owner),
            Placeholder::Repo => urlencoding::encode(self.repo),
            Placeholder::Path => encode_segments(self.path),
            Placeholder::Revision => encode_segments(self.revision),
            Placeholder::Line => Cow::Owned(self.line.to_string()),
            Placeholder::LineEnd => Cow::Owned(self.line_end.to_string()),
        }
    }
}

/// Percent-encodes each `/`-separated segment, keeping the slashes.
pub fn encode_segments(value: &str) -> Cow<'_, str> {
    let needs_encoding = value
        .split('/')
        .any(|segment| matches!(urlencoding::encode(segment), Cow::Owned(_)));
    if !needs_encoding {
        return Cow::Borrowed(value);
    }

    Cow::Owned(
        value
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/"),
    )
}
