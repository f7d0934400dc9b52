use crate::error::RepoLinkError;
use std::str::FromStr;

/// An editor cursor position, 0-based like editor APIs report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Inclusive 1-based line span used in URL anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start_line: u32,
    pub end_line: u32,
}

impl SelectionRange {
    pub fn single(line: u32) -> Self {
        let line = line.max(1);
        Self {
            start_line: line,
            end_line: line,
        }
    }

    /// Builds a range from 1-based lines, swapping them if given backwards.
    pub fn lines(start_line: u32, end_line: u32) -> Self {
        let (start_line, end_line) = if end_line < start_line {
            (end_line, start_line)
        } else {
            (start_line, end_line)
        };
        Self {
            start_line: start_line.max(1),
            end_line: end_line.max(1),
        }
    }

    /// Converts a raw editor selection into a line span.
    ///
    /// A selection whose end sits at column 0 of a later line does not
    /// include that line: selecting lines 3-5 with the trailing newline
    /// reports `3..=5`, not `3..=6`. Reversed selections are reordered.
    pub fn normalize(start: Position, end: Position) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };

        let start_line = start.line.saturating_add(1);
        let mut end_line = end.line.saturating_add(1);
        if end.line > start.line && end.column == 0 {
            end_line = end_line.saturating_sub(1).max(start_line);
        }

        Self {
            start_line,
            end_line,
        }
    }

    pub fn is_range(&self) -> bool {
        self.end_line != self.start_line
    }
}

impl Default for SelectionRange {
    fn default() -> Self {
        Self::single(1)
    }
}

/// Parses `10` or `10-14` (1-based).
impl FromStr for SelectionRange {
    type Err = RepoLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RepoLinkError::InvalidSelection {
            input: s.to_string(),
            hint: "Expected a line number or range such as 10 or 10-14".to_string(),
        };
        let number = |v: &str| v.trim().parse::<u32>().ok().filter(|n| *n > 0);

        match s.split_once('-') {
            Some((start, end)) => {
                let start = number(start).ok_or_else(invalid)?;
                let end = number(end).ok_or_else(invalid)?;
                Ok(Self::lines(start, end))
            }
            None => number(s).map(Self::single).ok_or_else(invalid),
        }
    }
}

/// A raw editor selection `LINE:COL-LINE:COL` with 0-based positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSelection {
    pub start: Position,
    pub end: Position,
}

impl RawSelection {
    pub fn normalize(self) -> SelectionRange {
        SelectionRange::normalize(self.start, self.end)
    }
}

impl FromStr for RawSelection {
    type Err = RepoLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RepoLinkError::InvalidSelection {
            input: s.to_string(),
            hint: "Expected 0-based positions such as 2:5-5:0".to_string(),
        };
        let position = |v: &str| -> Option<Position> {
            let (line, column) = v.trim().split_once(':')?;
            Some(Position::new(line.parse().ok()?, column.parse().ok()?))
        };

        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            start: position(start).ok_or_else(invalid)?,
            end: position(end).ok_or_else(invalid)?,
        })
    }
}
