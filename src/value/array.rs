//! JSON array newtype backing [`JsonValue::Array`](super::JsonValue).

use super::JsonValue;
use std::fmt::Debug;

/// A JSON array, backed by a `Vec<JsonValue>`.
///
/// Element comparison and ordering delegate to [`JsonValue`], so arrays compare
/// lexicographically element by element, with length as the tie breaker.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct JsonArray(pub Vec<JsonValue>);

impl JsonArray {
	/// Get a reference to the underlying `Vec<JsonValue>`.
	#[must_use]
	pub fn as_vec(&self) -> &Vec<JsonValue> {
		&self.0
	}

	/// Return an iterator over the elements in index order.
	pub fn iter(&self) -> impl Iterator<Item = &JsonValue> {
		self.0.iter()
	}
}

impl Debug for JsonArray {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

impl<T> From<Vec<T>> for JsonArray
where
	JsonValue: From<T>,
{
	fn from(input: Vec<T>) -> Self {
		JsonArray(Vec::from_iter(input.into_iter().map(JsonValue::from)))
	}
}

impl<T> From<&Vec<T>> for JsonArray
where
	JsonValue: From<T>,
	T: Clone,
{
	fn from(input: &Vec<T>) -> Self {
		JsonArray(Vec::from_iter(input.iter().map(|v| JsonValue::from(v.clone()))))
	}
}

impl<T, const N: usize> From<&[T; N]> for JsonArray
where
	JsonValue: From<T>,
	T: Copy,
{
	fn from(input: &[T; N]) -> Self {
		JsonArray(Vec::from_iter(input.iter().map(|v| JsonValue::from(*v))))
	}
}
