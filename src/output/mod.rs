//! Writing resolved positions out.
use crate::position::Position;
use std::io;
use std::io::Write;

/// Writes the position in the absolute form (`LINE` or `LINE COLUMN`), followed by a newline.
///
/// This is the same form that [`crate::resolve`] accepts, so the output can be fed back in.
pub fn write_text(position: &Position, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{position}")
}

/// Writes the position as a single-line JSON object, followed by a newline.
///
/// The column is omitted when there isn't one: `{"line":15}` or `{"line":15,"column":3}`.
pub fn write_json(position: &Position, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer(&mut *out, position)?;
    writeln!(out)
}
