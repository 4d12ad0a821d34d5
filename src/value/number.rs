//! `From` implementations creating `JsonValue::Number` from Rust numeric types.

use super::JsonValue;

impl From<f64> for JsonValue {
	fn from(input: f64) -> Self {
		JsonValue::Number(input)
	}
}

/// Implement `From<Number>` for `JsonValue` for types with lossless f64 conversion.
macro_rules! impl_from_number_lossless {
	($($t:ty),+ $(,)?) => {
		$(
			impl From<$t> for JsonValue {
				fn from(input: $t) -> Self {
					JsonValue::Number(f64::from(input))
				}
			}
		)+
	};
}

/// Implement `From<Number>` for `JsonValue` for types without lossless f64 conversion.
macro_rules! impl_from_number_lossy {
	($($t:ty),+ $(,)?) => {
		$(
			#[allow(clippy::cast_precision_loss)]
			impl From<$t> for JsonValue {
				fn from(input: $t) -> Self {
					JsonValue::Number(input as f64)
				}
			}
		)+
	};
}

impl_from_number_lossless!(f32, u8, u16, u32, i8, i16, i32);
impl_from_number_lossy!(u64, u128, usize, i64, i128, isize);
