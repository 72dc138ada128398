//! Turning prompt text into a target position.
//!
//! The entry point is [`resolve`]. It's pure: the same input and reference position always produce the same result,
//! and nothing is read from or written to anywhere else.
//!
//! ```
//! use gotopos::{resolve, ErrorKind, Position};
//!
//! let cursor = Some(Position::new(10, Some(3)));
//!
//! assert_eq!(resolve("42 7", cursor), Ok(Position::new(42, Some(7))));
//! assert_eq!(resolve(":c+5", cursor), Ok(Position::at_line(15)));
//! assert_eq!(resolve(":c-3", cursor), Ok(Position::at_line(7)));
//!
//! assert_eq!(resolve(":c+5", None).unwrap_err().kind(), ErrorKind::NoActiveContext);
//! assert_eq!(resolve("abc", cursor).unwrap_err().kind(), ErrorKind::InvalidFormat);
//! ```
use crate::position::Position;
use crate::query::{ParseError, PositionQuery};
use std::fmt::{Display, Formatter};

/// Something that knows where the cursor currently is, if anywhere.
///
/// This is only consulted for relative input; absolute input never asks for it.
pub trait ActiveContext {
    fn current_reference_position(&self) -> Option<Position>;
}

impl ActiveContext for Option<Position> {
    fn current_reference_position(&self) -> Option<Position> {
        *self
    }
}

impl ActiveContext for Position {
    fn current_reference_position(&self) -> Option<Position> {
        Some(*self)
    }
}

/// Resolves prompt text against an (optional) reference position.
///
/// The text is trimmed, and then interpreted as either:
///
/// - the relative form, `:c+N` or `:c-N`, which moves `N` lines from the reference position's line and drops the
///   column; or
/// - the absolute form, `LINE` or `LINE COLUMN`, which ignores the reference position.
///
/// A relative result is not clamped: moving back past line 1 gives a line of 0 or less. See
/// [`Position::clamp_to`].
pub fn resolve(input: &str, reference: Option<Position>) -> Result<Position, ResolveError> {
    resolve_in(input, &reference)
}

/// Like [`resolve`], but gets the reference position from `context`, and only if the input needs it.
pub fn resolve_in(input: &str, context: &impl ActiveContext) -> Result<Position, ResolveError> {
    PositionQuery::parse(input)?.resolve(context)
}

impl PositionQuery {
    pub fn resolve(&self, context: &impl ActiveContext) -> Result<Position, ResolveError> {
        match self {
            PositionQuery::Absolute(position) => Ok(*position),
            PositionQuery::Relative(offset) => {
                let reference = context
                    .current_reference_position()
                    .ok_or(ResolveError::NoActiveContext)?;
                let line = offset.apply_to(reference.line)?;
                Ok(Position::at_line(line))
            }
        }
    }
}

/// Why an input couldn't be resolved to a position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolveError {
    /// The input was relative, but there was no reference position to resolve it against.
    NoActiveContext,

    /// The input wasn't in either the relative or absolute form, or one of its numbers was out of range.
    InvalidFormat(ParseError),
}

/// The kind of [`ResolveError`], without its details.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    NoActiveContext,
    InvalidFormat,
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::NoActiveContext => ErrorKind::NoActiveContext,
            ResolveError::InvalidFormat(_) => ErrorKind::InvalidFormat,
        }
    }

    /// Renders the error against the input text it came from. See [`ParseError::render`].
    pub fn render(&self, input_text: &str) -> String {
        match self {
            ResolveError::NoActiveContext => self.to_string(),
            ResolveError::InvalidFormat(err) => err.render(input_text),
        }
    }
}

impl From<ParseError> for ResolveError {
    fn from(err: ParseError) -> Self {
        Self::InvalidFormat(err)
    }
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::NoActiveContext => f.write_str("no reference position is available for relative input"),
            ResolveError::InvalidFormat(err) => Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::NoActiveContext => None,
            ResolveError::InvalidFormat(err) => Some(err),
        }
    }
}
