//! An in-memory JSON value tree with a visitor-driven decoder and encoders.
//!
//! [`value::JsonValue`] holds any JSON document as an owned tagged union. The
//! decoder ([`decode`]), the tree walker
//! ([`JsonValue::traverse`](value::JsonValue::traverse)) and the two encoders
//! ([`encode`]) are all connected through one push-style event protocol
//! ([`visit::JsonVisitor`]), so text can be transcoded without ever building a
//! tree, and trees can be serialized without the encoders knowing their shape.
//!
//! ```
//! use jsonvisit::value::JsonValue;
//!
//! let mut doc = JsonValue::parse_str(r#"{"name":"demo","tags":[1,2]}"#)?;
//! *doc.put_child_by_key("name") = JsonValue::from("renamed");
//! assert_eq!(doc.stringify(), r#"{"name":"renamed","tags":[1,2]}"#);
//! # anyhow::Ok(())
//! ```

pub mod cursor;

pub mod decode;

pub mod encode;

pub mod value;

pub mod visit;
