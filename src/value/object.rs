//! JSON object newtype backing [`JsonValue::Object`](super::JsonValue).

use super::JsonValue;
use std::{
	collections::BTreeMap,
	fmt::{Debug, Display},
};

/// A JSON object backed by a `BTreeMap<String, JsonValue>`.
///
/// Keys are unique and kept in ascending lexicographic (byte) order, so iteration,
/// traversal, and serialization all see entries in the same deterministic order
/// regardless of insertion order.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct JsonObject(pub BTreeMap<String, JsonValue>);

impl JsonObject {
	/// Create a new, empty `JsonObject`.
	#[must_use]
	pub fn new() -> Self {
		Self(BTreeMap::new())
	}

	/// Get a reference to the value for the specified key, if present.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Return an iterator over key-value pairs in ascending key order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
		self.0.iter()
	}
}

impl Debug for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

impl Display for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", JsonValue::Object(self.clone()).stringify())
	}
}

impl<T> From<Vec<(&str, T)>> for JsonValue
where
	JsonValue: From<T>,
{
	fn from(input: Vec<(&str, T)>) -> Self {
		JsonValue::Object(JsonObject::from(input))
	}
}

impl<T> From<Vec<(&str, T)>> for JsonObject
where
	JsonValue: From<T>,
{
	fn from(input: Vec<(&str, T)>) -> Self {
		JsonObject(
			input
				.into_iter()
				.map(|(key, value)| (key.to_string(), JsonValue::from(value)))
				.collect(),
		)
	}
}
