//! Allocation-free lookahead-1 scanning over an in-memory text buffer.

mod char_cursor;

pub use char_cursor::{CharCursor, END_OF_INPUT};
