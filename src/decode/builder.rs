//! Event consumer that assembles a [`JsonValue`] tree from the visitor protocol.

use crate::value::{JsonArray, JsonObject, JsonValue};
use crate::visit::JsonVisitor;

/// One open container. Object frames carry the key announced by the last
/// `end_key`, waiting for the matching `end_value` to consume it.
enum Frame {
	Array(JsonArray),
	Object(JsonObject, Option<String>),
}

/// Builds a value tree from decoder events.
///
/// Scalar events overwrite the current slot, `begin_*`/`end_*` container events
/// open and close a frame on the stack, and `end_value` moves the finished slot
/// into its parent container. After a complete event sequence the assembled tree
/// is taken with [`TreeBuilder::into_value`].
///
/// The builder trusts the event grammar documented in [`crate::visit`]; feeding
/// it an unbalanced or misordered sequence is a caller bug and asserts in debug
/// builds.
#[derive(Default)]
pub struct TreeBuilder {
	stack: Vec<Frame>,
	current: JsonValue,
	key_buffer: String,
	in_key: bool,
}

impl TreeBuilder {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Consume the builder and return the assembled tree.
	#[must_use]
	pub fn into_value(self) -> JsonValue {
		debug_assert!(self.stack.is_empty(), "unclosed container at end of events");
		self.current
	}
}

impl JsonVisitor for TreeBuilder {
	fn null_value(&mut self) {
		self.current = JsonValue::Null;
	}

	fn string_value(&mut self, val: &str) {
		if self.in_key {
			self.key_buffer = val.to_owned();
		} else {
			self.current = JsonValue::String(val.to_owned());
		}
	}

	fn number_value(&mut self, val: f64) {
		self.current = JsonValue::Number(val);
	}

	fn bool_value(&mut self, val: bool) {
		self.current = JsonValue::Bool(val);
	}

	fn begin_array(&mut self) {
		self.stack.push(Frame::Array(JsonArray::default()));
	}

	fn end_array(&mut self) {
		match self.stack.pop() {
			Some(Frame::Array(arr)) => self.current = JsonValue::Array(arr),
			_ => debug_assert!(false, "end_array without matching begin_array"),
		}
	}

	fn begin_object(&mut self) {
		self.stack.push(Frame::Object(JsonObject::default(), None));
	}

	fn end_object(&mut self) {
		match self.stack.pop() {
			Some(Frame::Object(obj, _)) => self.current = JsonValue::Object(obj),
			_ => debug_assert!(false, "end_object without matching begin_object"),
		}
	}

	fn begin_key(&mut self) {
		self.in_key = true;
	}

	fn end_key(&mut self) {
		self.in_key = false;
		let key = std::mem::take(&mut self.key_buffer);
		if let Some(Frame::Object(_, pending)) = self.stack.last_mut() {
			*pending = Some(key);
		} else {
			debug_assert!(false, "end_key outside of an object");
		}
	}

	fn begin_value(&mut self) {
		self.current = JsonValue::Null;
	}

	fn end_value(&mut self) {
		let value = std::mem::take(&mut self.current);
		match self.stack.last_mut() {
			Some(Frame::Array(arr)) => arr.0.push(value),
			Some(Frame::Object(obj, pending)) => {
				let key = pending.take();
				debug_assert!(key.is_some(), "object value without a preceding key");
				obj.0.insert(key.unwrap_or_default(), value);
			}
			None => debug_assert!(false, "end_value outside of a container"),
		}
	}
}
