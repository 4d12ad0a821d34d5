//! The JSON value tree: [`JsonValue`] and its container newtypes.

mod array;
mod number;
mod object;
mod value;

pub use array::JsonArray;
pub use object::JsonObject;
pub use value::JsonValue;
