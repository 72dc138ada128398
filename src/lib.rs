//! Resolves the text typed into a "go to line/column" prompt into a target [`Position`].
//!
//! Two forms are understood:
//!
//! - **absolute**: `42` (line 42) or `42 7` (line 42, column 7)
//! - **relative**: `:c+5` or `:c-3`, which move that many lines from the cursor's current line
//!
//! ```
//! use gotopos::{resolve, Position};
//!
//! let cursor = Position::new(10, Some(3));
//! assert_eq!(resolve(":c+5", Some(cursor)), Ok(Position::at_line(15)));
//! assert_eq!(resolve("42 7", Some(cursor)), Ok(Position::new(42, Some(7))));
//! ```
//!
//! The library doesn't know anything about the buffer the position will be applied to. In particular, relative input
//! can resolve to a line before the first one; [`Position::clamp_to`] is there for callers that want to clamp.
//!
//! For the command-line flow (read input, resolve, clamp, print), see [`run`].
pub mod output;
pub mod position;
pub mod query;
pub mod resolve;
pub mod run;
mod util;

pub use position::{BufferBounds, Position};
pub use resolve::{resolve, resolve_in, ActiveContext, ErrorKind, ResolveError};
