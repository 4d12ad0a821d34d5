//! The push-style event protocol shared by the decoder, the tree builder, and the
//! encoders.
//!
//! Every producer of JSON structure — the recursive-descent decoder as well as
//! [`JsonValue::traverse`](crate::value::JsonValue::traverse) — emits the same event
//! sequence, and every consumer implements [`JsonVisitor`]. The two sides never know
//! about each other; the protocol is the only coupling point, so a new consumer (an
//! alternate text encoding, a hasher, a statistics pass) only has to implement this
//! trait once to work with both the decoder and existing trees.
//!
//! Event grammar, for one value:
//!
//! ```text
//! value   := null_value | string_value | number_value | bool_value | array | object
//! array   := begin_array { begin_value value end_value } end_array
//! object  := begin_object { key begin_value value end_value } end_object
//! key     := begin_key string_value end_key
//! ```
//!
//! Containers always emit matched `begin_*`/`end_*` pairs, even when empty. Object
//! keys are routed through `string_value` like ordinary strings; the surrounding
//! `begin_key`/`end_key` bracket is what distinguishes a key from a string value, so
//! consumers must honor it.

/// Consumer of the JSON event protocol.
///
/// Callbacks are infallible: producers validate input before emitting, so a consumer
/// only ever sees a well-formed event sequence.
pub trait JsonVisitor {
	/// A null value.
	fn null_value(&mut self);

	/// A string value, or an object key when bracketed by `begin_key`/`end_key`.
	fn string_value(&mut self, val: &str);

	/// A number value.
	fn number_value(&mut self, val: f64);

	/// A boolean value.
	fn bool_value(&mut self, val: bool);

	/// Start of an array.
	fn begin_array(&mut self);

	/// End of an array.
	fn end_array(&mut self);

	/// Start of an object.
	fn begin_object(&mut self);

	/// End of an object.
	fn end_object(&mut self);

	/// Start of an object key; the key itself follows as one `string_value` event.
	fn begin_key(&mut self);

	/// End of an object key.
	fn end_key(&mut self);

	/// Start of one container element (scalar or nested container).
	fn begin_value(&mut self);

	/// End of one container element.
	fn end_value(&mut self);
}
