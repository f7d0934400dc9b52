use crate::resolve::RevisionKind;
use crate::selection::{RawSelection, SelectionRange};
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "repo-link",
    version,
    about = "Print the web URL of a file and line range in its git hosting provider",
    long_about = "Repo-Link resolves a file inside a git working copy into a shareable link on GitHub, GitLab, Bitbucket, Codeberg or a self-hosted server, pinned to the default branch, the current branch or the latest commit"
)]
#[command(styles = get_styles())]
pub struct Cli {
    /// File to link to
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Line or line range, 1-based
    ///
    /// Example: 10 or 10-14
    #[arg(long, short = 'L', value_name = "START[-END]", conflicts_with = "selection")]
    pub lines: Option<SelectionRange>,

    /// Raw editor selection with 0-based positions
    ///
    /// Example: 2:5-5:0 (a selection ending at column 0 excludes that line)
    #[arg(long, value_name = "LINE:COL-LINE:COL")]
    pub selection: Option<RawSelection>,

    /// Revision the link points at
    ///
    /// Defaults to the `default_revision` from the config file.
    #[arg(long, short = 'r', value_enum, value_name = "REVISION")]
    pub revision: Option<RevisionKind>,

    /// Open the link in the default browser
    #[arg(long, short = 'o')]
    pub open: bool,

    /// Path to the config file
    #[arg(long, env = "REPO_LINK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use verbose output
    ///
    /// Use multiple times for more verbosity (e.g., -vv)
    #[arg(long, short, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Use quiet output
    ///
    /// Use multiple times for less output (e.g., -qq for silent)
    #[arg(long, short, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

impl Cli {
    /// The selection to link, defaulting to line 1.
    pub fn selection_range(&self) -> SelectionRange {
        match (self.lines, self.selection) {
            (Some(lines), _) => lines,
            (None, Some(raw)) => raw.normalize(),
            (None, None) => SelectionRange::default(),
        }
    }
}

fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}
