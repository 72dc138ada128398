use crate::resolve::{resolve, ResolveError};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A location in a text buffer: a line and an optional column, both 1-based.
///
/// A position that came from absolute input always has a positive line (and column, if present). A position
/// computed from a relative offset is left as computed, which means its line can be zero or negative; use
/// [`Position::clamp_to`] to bring it into a buffer's range.
///
/// The [`Display`] impl writes the position in the same absolute form that [`FromStr`] reads, so a position with a
/// positive line survives a round trip:
///
/// ```
/// use gotopos::Position;
///
/// let pos = Position::new(15, Some(3));
/// assert_eq!(pos.to_string(), "15 3");
/// assert_eq!("15 3".parse::<Position>(), Ok(pos));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
}

impl Position {
    pub fn new(line: i64, column: Option<i64>) -> Self {
        Self { line, column }
    }

    /// A position at the given line, with no column.
    pub fn at_line(line: i64) -> Self {
        Self { line, column: None }
    }

    /// Clamps this position into the given buffer.
    ///
    /// The line goes into `1..=line_count`, and the column (if there is one) into `1..=max_column`, or just `1..`
    /// if the bounds don't have a max column. A missing column stays missing.
    pub fn clamp_to(&self, bounds: &BufferBounds) -> Self {
        let line = self.line.clamp(1, bounds.line_count.max(1));
        let column = self.column.map(|column| match bounds.max_column {
            Some(max) => column.clamp(1, max.max(1)),
            None => column.max(1),
        });
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.column {
            None => write!(f, "{}", self.line),
            Some(column) => write!(f, "{} {}", self.line, column),
        }
    }
}

/// Parses the absolute form only. Relative input fails with [`ResolveError::NoActiveContext`], since there's no
/// reference position to resolve it against.
impl FromStr for Position {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s, None)
    }
}

/// The extent of a buffer that a [`Position`] can be clamped into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BufferBounds {
    /// Number of lines in the buffer. Anything below 1 is treated as 1.
    pub line_count: i64,
    pub max_column: Option<i64>,
}

impl BufferBounds {
    pub fn new(line_count: i64) -> Self {
        Self {
            line_count,
            max_column: None,
        }
    }

    pub fn with_max_column(self, max_column: i64) -> Self {
        Self {
            max_column: Some(max_column),
            ..self
        }
    }
}
