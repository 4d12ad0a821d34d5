//! Indented encoder for human-readable output.

use super::text::{write_escaped_string, write_number};
use crate::value::JsonValue;
use crate::visit::JsonVisitor;

/// Separator state carried between events.
///
/// `CommaXorNewline` is armed when an array opens: its first element needs a
/// newline but no comma, later elements need both. `CommaAndNewline` is armed
/// when an object opens or a key ends: the next event needs neither (the first
/// key emits its own newline, and a value sits on the key's line).
enum Skip {
	None,
	CommaXorNewline,
	CommaAndNewline,
}

/// Visitor streaming events into an indented JSON string.
///
/// Every key and every array element starts on its own line, values follow
/// their key after `": "`, and a non-empty container's closing bracket sits on
/// its own line at the enclosing depth. Empty containers stay on one line.
pub struct PrettyWriter {
	out: String,
	skip: Skip,
	indent_level: usize,
	indent: String,
}

impl PrettyWriter {
	#[must_use]
	pub fn new(indent_width: usize) -> Self {
		PrettyWriter {
			out: String::new(),
			skip: Skip::CommaAndNewline,
			indent_level: 0,
			indent: " ".repeat(indent_width),
		}
	}

	/// Consume the writer and return the rendered text.
	#[must_use]
	pub fn into_string(self) -> String {
		self.out
	}

	fn newline(&mut self) {
		self.out.push('\n');
		for _ in 0..self.indent_level {
			self.out.push_str(&self.indent);
		}
	}
}

impl JsonVisitor for PrettyWriter {
	fn null_value(&mut self) {
		self.out.push_str("null");
	}

	fn string_value(&mut self, val: &str) {
		write_escaped_string(&mut self.out, val);
	}

	fn number_value(&mut self, val: f64) {
		write_number(&mut self.out, val);
	}

	fn bool_value(&mut self, val: bool) {
		self.out.push_str(if val { "true" } else { "false" });
	}

	fn begin_array(&mut self) {
		self.out.push('[');
		self.skip = Skip::CommaXorNewline;
		self.indent_level += 1;
	}

	fn end_array(&mut self) {
		self.indent_level = self.indent_level.saturating_sub(1);
		if matches!(self.skip, Skip::None) {
			self.newline();
		}
		self.out.push(']');
		self.skip = Skip::None;
	}

	fn begin_object(&mut self) {
		self.out.push('{');
		self.skip = Skip::CommaAndNewline;
		self.indent_level += 1;
	}

	fn end_object(&mut self) {
		self.indent_level = self.indent_level.saturating_sub(1);
		if matches!(self.skip, Skip::None) {
			self.newline();
		}
		self.out.push('}');
		self.skip = Skip::None;
	}

	fn begin_key(&mut self) {
		if matches!(self.skip, Skip::None) {
			self.out.push(',');
		}
		self.newline();
		self.skip = Skip::None;
	}

	fn end_key(&mut self) {
		self.out.push_str(": ");
		self.skip = Skip::CommaAndNewline;
	}

	fn begin_value(&mut self) {
		match self.skip {
			Skip::None => {
				self.out.push(',');
				self.newline();
			}
			Skip::CommaXorNewline => self.newline(),
			Skip::CommaAndNewline => {}
		}
		self.skip = Skip::None;
	}

	fn end_value(&mut self) {}
}

/// Serialize a value tree to an indented JSON string, `indent_width` spaces per
/// nesting level.
#[must_use]
pub fn stringify_pretty(value: &JsonValue, indent_width: usize) -> String {
	let mut writer = PrettyWriter::new(indent_width);
	value.traverse(&mut writer);
	writer.into_string()
}
