//! Syntax of the text typed into a "go to position" prompt.
//!
//! This module only knows what the text says; it doesn't know where the cursor is. Applying a reference position
//! happens in [`crate::resolve`].
mod error;
mod pest;
mod position_query;

pub use error::*;
#[allow(unused_imports)]
pub(crate) use self::pest::{Error, Pair, Pairs, Query, Rule};
pub use position_query::*;
