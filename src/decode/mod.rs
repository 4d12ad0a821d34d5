//! Decoding JSON text into visitor events, and assembling trees from them.

mod builder;
mod parse;

pub use builder::TreeBuilder;
pub use parse::{parse_json_into, parse_json_str};
