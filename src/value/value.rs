//! JSON value enum representing any valid JSON data, with navigation, mutation,
//! traversal, and parsing/serialization entry points.

use crate::decode::parse_json_str;
use crate::encode::{stringify, stringify_pretty};
use crate::value::{JsonArray, JsonObject};
use crate::visit::JsonVisitor;
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::fmt::Display;

/// Shared out-of-range/absent-key read target; see [`JsonValue::child_at`].
static NULL_VALUE: JsonValue = JsonValue::Null;

/// Represents any JSON data: null, strings, numbers, booleans, arrays, and objects.
///
/// Exactly one variant is active at a time. Copies are deep: cloning a value with an
/// array or object payload duplicates the whole subtree, so values never alias.
/// Variants are declared in rank order — cross-variant comparisons order by variant
/// first (null < string < number < bool < array < object), then by payload.
#[derive(Clone, Debug, Default)]
pub enum JsonValue {
	#[default]
	Null,
	String(String),
	Number(f64),
	Bool(bool),
	Array(JsonArray),
	Object(JsonObject),
}

impl JsonValue {
	/// Decode a JSON document into a `JsonValue`.
	///
	/// The document must consist of exactly one object or array, optionally surrounded
	/// by whitespace. See [`parse_json_str`] for the full grammar and failure modes.
	///
	/// # Errors
	/// Returns an error if the text is not valid JSON.
	pub fn parse_str(json: &str) -> Result<JsonValue> {
		parse_json_str(json).context("failed to parse JSON document")
	}

	/// Serialize to a compact JSON string without any whitespace.
	#[must_use]
	pub fn stringify(&self) -> String {
		stringify(self)
	}

	/// Serialize to an indented JSON string, `indent_width` spaces per nesting level.
	#[must_use]
	pub fn stringify_pretty(&self, indent_width: usize) -> String {
		stringify_pretty(self, indent_width)
	}

	/// Create a new empty JSON array value.
	#[must_use]
	pub fn new_array() -> JsonValue {
		JsonValue::Array(JsonArray::default())
	}

	/// Create a new empty JSON object value.
	#[must_use]
	pub fn new_object() -> JsonValue {
		JsonValue::Object(JsonObject::new())
	}

	/// Return the JSON type as a lowercase string (`"array"`, `"object"`, etc.).
	#[must_use]
	pub fn type_as_str(&self) -> &'static str {
		use JsonValue::*;
		match self {
			Null => "null",
			String(_) => "string",
			Number(_) => "number",
			Bool(_) => "boolean",
			Array(_) => "array",
			Object(_) => "object",
		}
	}

	#[must_use]
	pub fn is_null(&self) -> bool {
		matches!(self, JsonValue::Null)
	}

	#[must_use]
	pub fn is_string(&self) -> bool {
		matches!(self, JsonValue::String(_))
	}

	#[must_use]
	pub fn is_number(&self) -> bool {
		matches!(self, JsonValue::Number(_))
	}

	#[must_use]
	pub fn is_bool(&self) -> bool {
		matches!(self, JsonValue::Bool(_))
	}

	#[must_use]
	pub fn is_array(&self) -> bool {
		matches!(self, JsonValue::Array(_))
	}

	#[must_use]
	pub fn is_object(&self) -> bool {
		matches!(self, JsonValue::Object(_))
	}

	/// Return the string payload, or `""` if this is not a string.
	///
	/// Calling this on the wrong variant is a caller bug: it asserts in debug builds
	/// and falls back to the empty string in release builds. Use [`Self::is_string`]
	/// first where the variant matters.
	#[must_use]
	pub fn as_str(&self) -> &str {
		debug_assert!(self.is_string(), "expected a string, found a {}", self.type_as_str());
		if let JsonValue::String(val) = self { val } else { "" }
	}

	/// Return the number payload, or `0.0` if this is not a number.
	///
	/// Same wrong-variant contract as [`Self::as_str`].
	#[must_use]
	pub fn as_number(&self) -> f64 {
		debug_assert!(self.is_number(), "expected a number, found a {}", self.type_as_str());
		if let JsonValue::Number(val) = self { *val } else { 0.0 }
	}

	/// Return the boolean payload, or `false` if this is not a boolean.
	///
	/// Same wrong-variant contract as [`Self::as_str`].
	#[must_use]
	pub fn as_bool(&self) -> bool {
		debug_assert!(self.is_bool(), "expected a boolean, found a {}", self.type_as_str());
		if let JsonValue::Bool(val) = self { *val } else { false }
	}

	/// Read the array element at `index`.
	///
	/// Out-of-range reads, and reads on a non-array value, return a `Null` reference
	/// instead of failing, so navigation chains never panic.
	#[must_use]
	pub fn child_at(&self, index: usize) -> &JsonValue {
		debug_assert!(
			self.is_null() || self.is_array(),
			"expected an array, found a {}",
			self.type_as_str()
		);
		match self {
			JsonValue::Array(arr) => arr.as_vec().get(index).unwrap_or(&NULL_VALUE),
			_ => &NULL_VALUE,
		}
	}

	/// Return a mutable slot for the array element at `index`.
	///
	/// A `Null` value is coerced to an empty array first, and the array grows with
	/// `Null` fill elements as needed to make `index` addressable.
	pub fn put_child_at(&mut self, index: usize) -> &mut JsonValue {
		debug_assert!(
			self.is_null() || self.is_array(),
			"expected an array, found a {}",
			self.type_as_str()
		);
		let arr = self.coerce_array();
		if index >= arr.0.len() {
			arr.0.resize(index + 1, JsonValue::Null);
		}
		&mut arr.0[index]
	}

	/// Return a mutable slot one past the current end; shorthand for
	/// `put_child_at(len())`.
	pub fn append_child(&mut self) -> &mut JsonValue {
		let index = self.len();
		self.put_child_at(index)
	}

	/// Number of array elements, or `0` for any non-array value.
	#[must_use]
	pub fn len(&self) -> usize {
		match self {
			JsonValue::Array(arr) => arr.as_vec().len(),
			_ => 0,
		}
	}

	/// True if [`Self::len`] is zero.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Truncate or grow (with `Null` fill) to exactly `length` elements, coercing a
	/// `Null` value to an array first.
	pub fn set_length(&mut self, length: usize) {
		debug_assert!(
			self.is_null() || self.is_array(),
			"expected an array, found a {}",
			self.type_as_str()
		);
		self.coerce_array().0.resize(length, JsonValue::Null);
	}

	/// Read the object entry for `name`.
	///
	/// Absent keys, and reads on a non-object value, return a `Null` reference.
	#[must_use]
	pub fn child_by_key(&self, name: &str) -> &JsonValue {
		debug_assert!(
			self.is_null() || self.is_object(),
			"expected an object, found a {}",
			self.type_as_str()
		);
		match self {
			JsonValue::Object(obj) => obj.get(name).unwrap_or(&NULL_VALUE),
			_ => &NULL_VALUE,
		}
	}

	/// Return a mutable slot for the object entry `name`, inserting a `Null` entry if
	/// absent.
	///
	/// A `Null` value is coerced to an empty object first. An existing entry keeps its
	/// storage, so repeated puts with the same key overwrite in place while the key
	/// retains its sorted position.
	pub fn put_child_by_key(&mut self, name: &str) -> &mut JsonValue {
		debug_assert!(
			self.is_null() || self.is_object(),
			"expected an object, found a {}",
			self.type_as_str()
		);
		self.coerce_object().0.entry(name.to_owned()).or_insert(JsonValue::Null)
	}

	/// True if this is an object containing the key `name`.
	#[must_use]
	pub fn has_key(&self, name: &str) -> bool {
		match self {
			JsonValue::Object(obj) => obj.get(name).is_some(),
			_ => false,
		}
	}

	/// Remove the object entry `name`, returning whether an entry was removed.
	pub fn erase_key(&mut self, name: &str) -> bool {
		debug_assert!(
			self.is_null() || self.is_object(),
			"expected an object, found a {}",
			self.type_as_str()
		);
		match self {
			JsonValue::Object(obj) => obj.0.remove(name).is_some(),
			_ => false,
		}
	}

	/// Depth-first walk emitting the full event protocol for this subtree.
	///
	/// Objects are visited in ascending key order, arrays in index order. Container
	/// elements are wrapped in `begin_value`/`end_value`, object keys in
	/// `begin_key`/`end_key`; see [`crate::visit`] for the event grammar.
	pub fn traverse<V: JsonVisitor>(&self, visitor: &mut V) {
		match self {
			JsonValue::Null => visitor.null_value(),
			JsonValue::String(val) => visitor.string_value(val),
			JsonValue::Number(val) => visitor.number_value(*val),
			JsonValue::Bool(val) => visitor.bool_value(*val),
			JsonValue::Array(arr) => {
				visitor.begin_array();
				for item in arr.iter() {
					visitor.begin_value();
					item.traverse(visitor);
					visitor.end_value();
				}
				visitor.end_array();
			}
			JsonValue::Object(obj) => {
				visitor.begin_object();
				for (key, value) in obj.iter() {
					visitor.begin_key();
					visitor.string_value(key);
					visitor.end_key();
					visitor.begin_value();
					value.traverse(visitor);
					visitor.end_value();
				}
				visitor.end_object();
			}
		}
	}

	fn coerce_array(&mut self) -> &mut JsonArray {
		if !self.is_array() {
			*self = JsonValue::new_array();
		}
		match self {
			JsonValue::Array(arr) => arr,
			_ => unreachable!(),
		}
	}

	fn coerce_object(&mut self) -> &mut JsonObject {
		if !self.is_object() {
			*self = JsonValue::new_object();
		}
		match self {
			JsonValue::Object(obj) => obj,
			_ => unreachable!(),
		}
	}

	fn variant_rank(&self) -> u8 {
		use JsonValue::*;
		match self {
			Null => 0,
			String(_) => 1,
			Number(_) => 2,
			Bool(_) => 3,
			Array(_) => 4,
			Object(_) => 5,
		}
	}
}

/// Total order over numbers: NaN equals itself and sorts below every non-NaN.
fn cmp_number(lhs: f64, rhs: f64) -> Ordering {
	match (lhs.is_nan(), rhs.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Less,
		(false, true) => Ordering::Greater,
		(false, false) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
	}
}

impl PartialEq for JsonValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(JsonValue::Null, JsonValue::Null) => true,
			(JsonValue::String(lhs), JsonValue::String(rhs)) => lhs == rhs,
			(JsonValue::Number(lhs), JsonValue::Number(rhs)) => {
				(lhs.is_nan() && rhs.is_nan()) || lhs == rhs
			}
			(JsonValue::Bool(lhs), JsonValue::Bool(rhs)) => lhs == rhs,
			(JsonValue::Array(lhs), JsonValue::Array(rhs)) => lhs == rhs,
			(JsonValue::Object(lhs), JsonValue::Object(rhs)) => lhs == rhs,
			_ => false,
		}
	}
}

impl Eq for JsonValue {}

impl PartialOrd for JsonValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for JsonValue {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(JsonValue::String(lhs), JsonValue::String(rhs)) => lhs.cmp(rhs),
			(JsonValue::Number(lhs), JsonValue::Number(rhs)) => cmp_number(*lhs, *rhs),
			(JsonValue::Bool(lhs), JsonValue::Bool(rhs)) => lhs.cmp(rhs),
			(JsonValue::Array(lhs), JsonValue::Array(rhs)) => lhs.cmp(rhs),
			(JsonValue::Object(lhs), JsonValue::Object(rhs)) => lhs.cmp(rhs),
			_ => self.variant_rank().cmp(&other.variant_rank()),
		}
	}
}

impl Display for JsonValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.stringify())
	}
}

impl From<&str> for JsonValue {
	fn from(input: &str) -> Self {
		JsonValue::String(input.to_string())
	}
}

impl From<&String> for JsonValue {
	fn from(input: &String) -> Self {
		JsonValue::String(input.to_string())
	}
}

impl From<String> for JsonValue {
	fn from(input: String) -> Self {
		JsonValue::String(input)
	}
}

impl From<bool> for JsonValue {
	fn from(input: bool) -> Self {
		JsonValue::Bool(input)
	}
}

impl From<&JsonValue> for JsonValue {
	fn from(input: &JsonValue) -> Self {
		input.clone()
	}
}

impl<I> From<I> for JsonValue
where
	JsonArray: From<I>,
{
	fn from(input: I) -> Self {
		JsonValue::Array(input.into())
	}
}

impl From<JsonObject> for JsonValue {
	fn from(input: JsonObject) -> Self {
		JsonValue::Object(input)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_conversions() {
		assert_eq!(JsonValue::from("hello"), JsonValue::String("hello".to_string()));
		assert_eq!(JsonValue::from(String::from("hello")), JsonValue::String("hello".to_string()));
		assert_eq!(JsonValue::from(true), JsonValue::Bool(true));
		assert_eq!(JsonValue::from(23.42), JsonValue::Number(23.42));
		assert_eq!(
			JsonValue::from(vec!["a", "b"]),
			JsonValue::Array(JsonArray(vec![JsonValue::from("a"), JsonValue::from("b")]))
		);
	}

	#[test]
	fn test_type_as_str() {
		assert_eq!(JsonValue::Null.type_as_str(), "null");
		assert_eq!(JsonValue::from("value").type_as_str(), "string");
		assert_eq!(JsonValue::from(42.0).type_as_str(), "number");
		assert_eq!(JsonValue::from(true).type_as_str(), "boolean");
		assert_eq!(JsonValue::new_array().type_as_str(), "array");
		assert_eq!(JsonValue::new_object().type_as_str(), "object");
	}

	#[test]
	fn test_accessors_on_matching_variants() {
		assert_eq!(JsonValue::from("value").as_str(), "value");
		assert_eq!(JsonValue::from(42.0).as_number(), 42.0);
		assert!(JsonValue::from(true).as_bool());
	}

	#[test]
	#[should_panic(expected = "expected a string, found a number")]
	fn test_as_str_on_wrong_variant_asserts_in_debug() {
		let _ = JsonValue::from(42.0).as_str();
	}

	#[test]
	#[should_panic(expected = "expected a number, found a boolean")]
	fn test_as_number_on_wrong_variant_asserts_in_debug() {
		let _ = JsonValue::from(true).as_number();
	}

	#[test]
	fn test_child_at_out_of_range_reads_null() {
		let value = JsonValue::from(vec![1.0, 2.0]);

		assert_eq!(value.child_at(0), &JsonValue::from(1.0));
		assert_eq!(value.child_at(7), &JsonValue::Null);
		assert_eq!(JsonValue::Null.child_at(0), &JsonValue::Null);
	}

	#[test]
	fn test_put_child_at_auto_grows() {
		let mut value = JsonValue::Null;
		*value.put_child_at(2) = JsonValue::from(true);

		assert!(value.is_array());
		assert_eq!(value.len(), 3);
		assert_eq!(value.child_at(0), &JsonValue::Null);
		assert_eq!(value.child_at(1), &JsonValue::Null);
		assert_eq!(value.child_at(2), &JsonValue::from(true));
	}

	#[test]
	fn test_append_child() {
		let mut value = JsonValue::Null;
		*value.append_child() = JsonValue::from(1.0);
		*value.append_child() = JsonValue::from(2.0);

		assert_eq!(value, JsonValue::from(vec![1.0, 2.0]));
	}

	#[test]
	fn test_set_length_truncates_and_grows() {
		let mut value = JsonValue::from(vec![1.0, 2.0, 3.0]);
		value.set_length(1);
		assert_eq!(value, JsonValue::from(vec![1.0]));

		value.set_length(3);
		assert_eq!(value.len(), 3);
		assert_eq!(value.child_at(2), &JsonValue::Null);

		let mut from_null = JsonValue::Null;
		from_null.set_length(2);
		assert_eq!(from_null.len(), 2);
	}

	#[test]
	fn test_object_navigation() {
		let mut value = JsonValue::Null;
		*value.put_child_by_key("b") = JsonValue::from(1.0);
		*value.put_child_by_key("a") = JsonValue::from(2.0);

		assert!(value.is_object());
		assert!(value.has_key("a"));
		assert!(!value.has_key("c"));
		assert_eq!(value.child_by_key("b"), &JsonValue::from(1.0));
		assert_eq!(value.child_by_key("missing"), &JsonValue::Null);
	}

	#[test]
	fn test_put_child_by_key_overwrites_in_place() {
		let mut value = JsonValue::Null;
		*value.put_child_by_key("key") = JsonValue::from(1.0);
		*value.put_child_by_key("key") = JsonValue::from(2.0);

		if let JsonValue::Object(obj) = &value {
			assert_eq!(obj.0.len(), 1);
		} else {
			panic!("expected JsonValue::Object variant");
		}
		assert_eq!(value.child_by_key("key"), &JsonValue::from(2.0));
	}

	#[test]
	fn test_erase_key() {
		let mut value = JsonValue::from(vec![("key", 1.0)]);

		assert!(value.erase_key("key"));
		assert!(!value.erase_key("key"));
		assert!(!value.has_key("key"));
	}

	#[test]
	fn test_variant_switch_destroys_payload() {
		let mut value = JsonValue::from(vec![1.0, 2.0, 3.0]);
		value = JsonValue::from("text");
		assert_eq!(value.as_str(), "text");

		value = JsonValue::Null;
		assert!(value.is_null());
	}

	#[test]
	fn test_deep_copy_does_not_alias() {
		let mut original = JsonValue::Null;
		*original.put_child_by_key("list") = JsonValue::from(vec![1.0]);

		let mut copy = original.clone();
		*copy.put_child_by_key("list").append_child() = JsonValue::from(2.0);

		assert_eq!(original.child_by_key("list").len(), 1);
		assert_eq!(copy.child_by_key("list").len(), 2);
	}

	#[test]
	fn test_equality_across_variants() {
		assert_ne!(JsonValue::Null, JsonValue::from(0.0));
		assert_ne!(JsonValue::from(false), JsonValue::from(0.0));
		assert_ne!(JsonValue::from(""), JsonValue::Null);
		assert_eq!(JsonValue::new_array(), JsonValue::new_array());
	}

	#[test]
	fn test_nan_equals_itself() {
		assert_eq!(JsonValue::from(f64::NAN), JsonValue::from(f64::NAN));
		assert_ne!(JsonValue::from(f64::NAN), JsonValue::from(1.0));
	}

	#[test]
	fn test_variant_rank_ordering() {
		let ranked = [
			JsonValue::Null,
			JsonValue::from("a"),
			JsonValue::from(1.0),
			JsonValue::from(true),
			JsonValue::new_array(),
			JsonValue::new_object(),
		];

		for window in ranked.windows(2) {
			assert!(window[0] < window[1], "{} should sort below {}", window[0].type_as_str(), window[1].type_as_str());
		}
	}

	#[test]
	fn test_payload_ordering() {
		assert!(JsonValue::from("abc") < JsonValue::from("abd"));
		assert!(JsonValue::from(1.0) < JsonValue::from(2.0));
		assert!(JsonValue::from(f64::NAN) < JsonValue::from(f64::NEG_INFINITY));
		assert!(JsonValue::from(false) < JsonValue::from(true));
		assert!(JsonValue::from(vec![1.0]) < JsonValue::from(vec![1.0, 0.0]));
		assert!(JsonValue::from(vec![1.0, 2.0]) < JsonValue::from(vec![2.0]));
	}

	#[test]
	fn test_traverse_event_order() {
		#[derive(Default)]
		struct Recorder(Vec<String>);

		impl JsonVisitor for Recorder {
			fn null_value(&mut self) {
				self.0.push("null".to_string());
			}
			fn string_value(&mut self, val: &str) {
				self.0.push(format!("str:{val}"));
			}
			fn number_value(&mut self, val: f64) {
				self.0.push(format!("num:{val}"));
			}
			fn bool_value(&mut self, val: bool) {
				self.0.push(format!("bool:{val}"));
			}
			fn begin_array(&mut self) {
				self.0.push("[".to_string());
			}
			fn end_array(&mut self) {
				self.0.push("]".to_string());
			}
			fn begin_object(&mut self) {
				self.0.push("{".to_string());
			}
			fn end_object(&mut self) {
				self.0.push("}".to_string());
			}
			fn begin_key(&mut self) {
				self.0.push("bk".to_string());
			}
			fn end_key(&mut self) {
				self.0.push("ek".to_string());
			}
			fn begin_value(&mut self) {
				self.0.push("bv".to_string());
			}
			fn end_value(&mut self) {
				self.0.push("ev".to_string());
			}
		}

		let mut value = JsonValue::Null;
		*value.put_child_by_key("b") = JsonValue::from(vec![1.0]);
		*value.put_child_by_key("a") = JsonValue::Null;

		let mut recorder = Recorder::default();
		value.traverse(&mut recorder);

		// Keys in sorted order, keys bracketed, every element wrapped in bv/ev.
		assert_eq!(
			recorder.0,
			vec![
				"{", "bk", "str:a", "ek", "bv", "null", "ev", "bk", "str:b", "ek", "bv", "[", "bv",
				"num:1", "ev", "]", "ev", "}"
			]
		);
	}

	#[test]
	fn test_parse_str_error_chain() {
		let error = JsonValue::parse_str("nope").unwrap_err();

		assert_eq!(error.to_string(), "failed to parse JSON document");
		assert_eq!(
			format!("{error:#}"),
			"failed to parse JSON document: expected object or array at position 0: n"
		);
	}

	#[test]
	fn test_round_trip_compact() -> anyhow::Result<()> {
		let text = r#"{"empty":{},"flag":false,"list":[1,2.5,"x",null],"name":"demo"}"#;
		let value = JsonValue::parse_str(text)?;

		assert_eq!(value.stringify(), text);
		assert_eq!(JsonValue::parse_str(&value.stringify())?, value);
		Ok(())
	}

	#[test]
	fn test_round_trip_pretty() -> anyhow::Result<()> {
		let value = JsonValue::parse_str(r#"{"a":[1,2],"b":{"c":"d"}}"#)?;

		assert_eq!(JsonValue::parse_str(&value.stringify_pretty(4))?, value);
		Ok(())
	}

	#[test]
	fn test_round_trip_escapes() -> anyhow::Result<()> {
		let mut value = JsonValue::Null;
		*value.put_child_by_key("text") = JsonValue::from("tab\tquote\"break\nend");

		let reparsed = JsonValue::parse_str(&value.stringify())?;
		assert_eq!(reparsed.child_by_key("text").as_str(), "tab\tquote\"break\nend");
		Ok(())
	}

	#[test]
	fn test_display_is_compact() {
		let value = JsonValue::from(vec![("key", "value")]);
		assert_eq!(format!("{value}"), r#"{"key":"value"}"#);
	}
}
