//! A byte-level cursor over an indexable buffer with a defined end-of-input sentinel.
//!
//! `CharCursor` provides the single-byte lookahead the decoder needs: peeking at the
//! current byte without consuming it, advancing, and formatting errors that carry the
//! byte position plus a short snippet of the surrounding input.

use anyhow::{Error, anyhow};

/// Sentinel byte returned by [`CharCursor::peek`] once the input is exhausted.
///
/// NUL never occurs unescaped in valid JSON text (control bytes must be escaped inside
/// strings and are invalid between tokens), so it is distinguishable from all content.
pub const END_OF_INPUT: u8 = 0;

const SNIPPET_SIZE: usize = 16;

/// A cursor over a borrowed byte buffer with support for peeking, consuming, and
/// error reporting. Scanning never allocates and never reads out of bounds.
pub struct CharCursor<'a> {
	bytes: &'a [u8],
	position: usize,
}

impl<'a> CharCursor<'a> {
	/// Create a cursor over a string slice.
	///
	/// # Example
	/// ```
	/// # use jsonvisit::cursor::CharCursor;
	/// let mut cursor = CharCursor::from_str("[]");
	/// assert_eq!(cursor.peek(), b'[');
	/// ```
	#[must_use]
	pub fn from_str(text: &'a str) -> Self {
		Self::from_bytes(text.as_bytes())
	}

	/// Create a cursor over a raw byte slice.
	#[must_use]
	pub fn from_bytes(bytes: &'a [u8]) -> Self {
		CharCursor { bytes, position: 0 }
	}

	/// Return the current byte without consuming it, or [`END_OF_INPUT`] past the end.
	#[inline]
	#[must_use]
	pub fn peek(&self) -> u8 {
		self.bytes.get(self.position).copied().unwrap_or(END_OF_INPUT)
	}

	/// Advance the cursor by one byte. Advancing past the end is a no-op.
	#[inline]
	pub fn advance(&mut self) {
		if self.position < self.bytes.len() {
			self.position += 1;
		}
	}

	/// Consume and return the current byte, or [`END_OF_INPUT`] past the end.
	///
	/// # Example
	/// ```
	/// # use jsonvisit::cursor::{CharCursor, END_OF_INPUT};
	/// let mut cursor = CharCursor::from_str("ab");
	/// assert_eq!(cursor.consume(), b'a');
	/// assert_eq!(cursor.consume(), b'b');
	/// assert_eq!(cursor.consume(), END_OF_INPUT);
	/// ```
	#[inline]
	pub fn consume(&mut self) -> u8 {
		let byte = self.peek();
		self.advance();
		byte
	}

	/// Return the current absolute byte position.
	#[inline]
	#[must_use]
	pub fn position(&self) -> usize {
		self.position
	}

	/// Return true once every byte of the input has been consumed.
	#[inline]
	#[must_use]
	pub fn at_end(&self) -> bool {
		self.position >= self.bytes.len()
	}

	/// Skip the JSON whitespace bytes (space, tab, line feed, carriage return).
	pub fn skip_whitespace(&mut self) {
		while matches!(self.peek(), b' ' | b'\t' | b'\n' | b'\r') {
			self.advance();
		}
	}

	/// Format an error message including the byte position and a snippet of the
	/// input leading up to it.
	///
	/// # Example
	/// ```
	/// # use jsonvisit::cursor::CharCursor;
	/// let cursor = CharCursor::from_str("");
	/// let error = cursor.format_error("expected value");
	/// assert_eq!(error.to_string(), "expected value at position 0: <EOF>");
	/// ```
	#[must_use]
	pub fn format_error(&self, msg: &str) -> Error {
		let window_start = self.position.saturating_sub(SNIPPET_SIZE);
		let window_end = self.bytes.len().min(self.position + 1);
		let mut snippet = String::from_utf8_lossy(&self.bytes[window_start..window_end]).into_owned();
		if self.at_end() {
			snippet.push_str("<EOF>");
		}
		anyhow!("{msg} at position {}: {}", self.position, snippet)
	}
}
