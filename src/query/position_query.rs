use crate::position::Position;
use crate::query::{DetachedSpan, Pair, Pairs, ParseError, Query, Rule};

/// What the user typed, before it's been resolved against a reference position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PositionQuery {
    /// `:c+5` or `:c-3`: an offset from the reference position's line.
    Relative(RelativeOffset),
    /// `42` or `42 7`: a line, and optionally a column.
    Absolute(Position),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelativeOffset {
    pub direction: Direction,
    /// The number of lines to move; never negative. The sign lives in [`Self::direction`].
    pub magnitude: i64,
    /// Where the relative form sits in the input text.
    pub span: DetachedSpan,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl PositionQuery {
    /// Parses the input text. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let pairs = Query::parse(input)?;
        Self::try_from(pairs)
    }
}

impl RelativeOffset {
    /// Applies this offset to a line, failing if the result doesn't fit.
    pub fn apply_to(&self, line: i64) -> Result<i64, ParseError> {
        let moved = match self.direction {
            Direction::Forward => line.checked_add(self.magnitude),
            Direction::Backward => line.checked_sub(self.magnitude),
        };
        moved.ok_or_else(|| ParseError::other(self.span, format!("line offset is out of range from line {line}")))
    }
}

impl TryFrom<Pairs<'_>> for PositionQuery {
    type Error = ParseError;

    fn try_from(pairs: Pairs) -> Result<Self, Self::Error> {
        for top in pairs {
            for pair in top.into_inner() {
                match pair.as_rule() {
                    Rule::relative => return relative_from_pair(pair).map(Self::Relative),
                    Rule::absolute => return absolute_from_pair(pair).map(Self::Absolute),
                    _ => {}
                }
            }
        }
        Err(ParseError::other(DetachedSpan::default(), "expected a position"))
    }
}

fn relative_from_pair(pair: Pair) -> Result<RelativeOffset, ParseError> {
    let span = DetachedSpan::from(&pair);
    let mut direction = None;
    let mut magnitude = None;
    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::relative_sign => {
                direction = child.into_inner().next().map(|sign| match sign.as_rule() {
                    Rule::backward => Direction::Backward,
                    _ => Direction::Forward,
                });
            }
            Rule::relative_magnitude => {
                magnitude = Some(parse_number(&child, "line offset")?);
            }
            _ => {}
        }
    }
    let (Some(direction), Some(magnitude)) = (direction, magnitude) else {
        return Err(ParseError::other(span, "incomplete relative position"));
    };
    Ok(RelativeOffset {
        direction,
        magnitude,
        span,
    })
}

fn absolute_from_pair(pair: Pair) -> Result<Position, ParseError> {
    let span = DetachedSpan::from(&pair);
    let mut line = None;
    let mut column = None;
    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::line => line = Some(parse_number(&child, "line number")?),
            Rule::column => column = Some(parse_number(&child, "column number")?),
            _ => {}
        }
    }
    match line {
        Some(line) => Ok(Position::new(line, column)),
        None => Err(ParseError::other(span, "missing line number")),
    }
}

/// The grammar only lets ASCII digits through, so the only way this fails is overflow.
fn parse_number(pair: &Pair, description: &str) -> Result<i64, ParseError> {
    pair.as_str()
        .parse::<i64>()
        .map_err(|_| ParseError::other(DetachedSpan::from(pair), format!("{description} is too large")))
}
