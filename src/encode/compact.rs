//! Compact encoder producing the densest possible rendering, no whitespace at all.

use super::text::{write_escaped_string, write_number};
use crate::value::JsonValue;
use crate::visit::JsonVisitor;

enum Skip {
	None,
	Comma,
}

/// Visitor streaming events into a compact JSON string.
///
/// A two-state flag tracks whether the next key or value needs a leading comma:
/// opening a container arms the skip so its first entry gets none, every entry
/// after that is separated.
pub struct CompactWriter {
	out: String,
	skip: Skip,
}

impl CompactWriter {
	#[must_use]
	pub fn new() -> Self {
		CompactWriter { out: String::new(), skip: Skip::Comma }
	}

	/// Consume the writer and return the rendered text.
	#[must_use]
	pub fn into_string(self) -> String {
		self.out
	}

	fn separate(&mut self) {
		if matches!(self.skip, Skip::Comma) {
			self.skip = Skip::None;
		} else {
			self.out.push(',');
		}
	}
}

impl Default for CompactWriter {
	fn default() -> Self {
		Self::new()
	}
}

impl JsonVisitor for CompactWriter {
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
		self.skip = Skip::Comma;
	}

	fn end_array(&mut self) {
		self.out.push(']');
		self.skip = Skip::None;
	}

	fn begin_object(&mut self) {
		self.out.push('{');
		self.skip = Skip::Comma;
	}

	fn end_object(&mut self) {
		self.out.push('}');
		self.skip = Skip::None;
	}

	fn begin_key(&mut self) {
		self.separate();
	}

	fn end_key(&mut self) {
		self.out.push(':');
		self.skip = Skip::Comma;
	}

	fn begin_value(&mut self) {
		self.separate();
	}

	fn end_value(&mut self) {}
}

/// Serialize a value tree to a compact JSON string.
#[must_use]
pub fn stringify(value: &JsonValue) -> String {
	let mut writer = CompactWriter::new();
	value.traverse(&mut writer);
	writer.into_string()
}
