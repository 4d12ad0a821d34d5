//! Recursive-descent JSON decoder emitting visitor events.
//!
//! The decoder works byte-wise over a [`CharCursor`] with one byte of lookahead and
//! pushes events into any [`JsonVisitor`]; it never builds a tree itself. A document
//! must be a single object or array, optionally surrounded by whitespace, with
//! nothing after it.

use crate::cursor::{CharCursor, END_OF_INPUT};
use crate::decode::TreeBuilder;
use crate::value::JsonValue;
use crate::visit::JsonVisitor;
use anyhow::Result;

/// Decode a JSON document into a value tree.
///
/// # Errors
/// Returns an error naming the violated grammar rule, the byte position, and a
/// snippet of the input, e.g. `expected value-separator or end-array at position 5: [1, 2<EOF>`.
pub fn parse_json_str(json: &str) -> Result<JsonValue> {
	log::trace!("parsing JSON document of {} bytes", json.len());

	let mut cursor = CharCursor::from_str(json);
	let mut builder = TreeBuilder::new();
	parse_json_into(&mut cursor, &mut builder)?;
	Ok(builder.into_value())
}

/// Decode a JSON document, pushing events into `visitor`.
///
/// Events are emitted as input is consumed, so a visitor may have observed a prefix
/// of the document when an error is returned.
///
/// # Errors
/// See [`parse_json_str`].
pub fn parse_json_into<V: JsonVisitor>(cursor: &mut CharCursor, visitor: &mut V) -> Result<()> {
	cursor.skip_whitespace();

	match cursor.peek() {
		b'{' => parse_object(cursor, visitor)?,
		b'[' => parse_array(cursor, visitor)?,
		_ => return Err(cursor.format_error("expected object or array")),
	}

	cursor.skip_whitespace();

	if !cursor.at_end() {
		return Err(cursor.format_error("expected end"));
	}
	Ok(())
}

fn parse_object<V: JsonVisitor>(cursor: &mut CharCursor, visitor: &mut V) -> Result<()> {
	cursor.advance(); // '{' checked by the caller
	visitor.begin_object();
	cursor.skip_whitespace();

	if cursor.peek() == b'}' {
		cursor.advance();
		visitor.end_object();
		return Ok(());
	}

	loop {
		if cursor.peek() != b'"' {
			return Err(cursor.format_error("expected string"));
		}

		visitor.begin_key();
		parse_string(cursor, visitor)?;
		visitor.end_key();

		cursor.skip_whitespace();

		if cursor.consume() != b':' {
			return Err(cursor.format_error("expected name-separator"));
		}

		cursor.skip_whitespace();

		visitor.begin_value();
		parse_value(cursor, visitor)?;
		visitor.end_value();

		cursor.skip_whitespace();

		match cursor.consume() {
			b',' => cursor.skip_whitespace(),
			b'}' => {
				visitor.end_object();
				return Ok(());
			}
			_ => return Err(cursor.format_error("expected value-separator or end-object")),
		}
	}
}

fn parse_array<V: JsonVisitor>(cursor: &mut CharCursor, visitor: &mut V) -> Result<()> {
	cursor.advance(); // '[' checked by the caller
	visitor.begin_array();
	cursor.skip_whitespace();

	if cursor.peek() == b']' {
		cursor.advance();
		visitor.end_array();
		return Ok(());
	}

	loop {
		visitor.begin_value();
		parse_value(cursor, visitor)?;
		visitor.end_value();

		cursor.skip_whitespace();

		match cursor.consume() {
			b',' => cursor.skip_whitespace(),
			b']' => {
				visitor.end_array();
				return Ok(());
			}
			_ => return Err(cursor.format_error("expected value-separator or end-array")),
		}
	}
}

fn parse_value<V: JsonVisitor>(cursor: &mut CharCursor, visitor: &mut V) -> Result<()> {
	match cursor.peek() {
		b'n' => {
			parse_literal(cursor, b"null")?;
			visitor.null_value();
			Ok(())
		}
		b't' => {
			parse_literal(cursor, b"true")?;
			visitor.bool_value(true);
			Ok(())
		}
		b'f' => {
			parse_literal(cursor, b"false")?;
			visitor.bool_value(false);
			Ok(())
		}
		b'"' => parse_string(cursor, visitor),
		b'{' => parse_object(cursor, visitor),
		b'[' => parse_array(cursor, visitor),
		_ => parse_number(cursor, visitor),
	}
}

fn parse_literal(cursor: &mut CharCursor, literal: &'static [u8]) -> Result<()> {
	for &expected in literal {
		if cursor.consume() != expected {
			return Err(cursor.format_error("expected value"));
		}
	}
	Ok(())
}

// Strings accumulate raw UTF-8 bytes; only escapes need decoding. Invalid byte
// sequences in the input are replaced rather than rejected.
fn parse_string<V: JsonVisitor>(cursor: &mut CharCursor, visitor: &mut V) -> Result<()> {
	cursor.advance(); // '"' checked by the caller
	let mut buf: Vec<u8> = Vec::new();

	loop {
		match cursor.consume() {
			b'"' => {
				visitor.string_value(&String::from_utf8_lossy(&buf));
				return Ok(());
			}
			b'\\' => parse_escape(cursor, &mut buf)?,
			END_OF_INPUT => return Err(cursor.format_error("expected char or quotation-mark")),
			c if c < 0x20 || c == 0x7f => return Err(cursor.format_error("expected char")),
			c => buf.push(c),
		}
	}
}

fn parse_escape(cursor: &mut CharCursor, buf: &mut Vec<u8>) -> Result<()> {
	match cursor.consume() {
		b'"' => buf.push(b'"'),
		b'/' => buf.push(b'/'),
		b'\\' => buf.push(b'\\'),
		b'b' => buf.push(0x08),
		b'f' => buf.push(0x0c),
		b'n' => buf.push(b'\n'),
		b'r' => buf.push(b'\r'),
		b't' => buf.push(b'\t'),
		b'u' => {
			let mut codepoint = u32::from(parse_four_hex(cursor)?);
			if (0xd800..=0xdbff).contains(&codepoint) {
				// UTF-16 surrogate pair, the trailing half must follow immediately.
				if cursor.consume() != b'\\' || cursor.consume() != b'u' {
					return Err(cursor.format_error("expected trailing surrogate"));
				}
				let trailing = u32::from(parse_four_hex(cursor)?);
				if !(0xdc00..=0xdfff).contains(&trailing) {
					return Err(cursor.format_error("expected trailing surrogate"));
				}
				codepoint = (((codepoint - 0xd800) << 10) | (trailing - 0xdc00)) + 0x10000;
			} else if (0xdc00..=0xdfff).contains(&codepoint) {
				return Err(cursor.format_error("unexpected trailing surrogate"));
			}
			push_utf8(buf, codepoint);
		}
		_ => return Err(cursor.format_error("expected escape")),
	}
	Ok(())
}

fn parse_four_hex(cursor: &mut CharCursor) -> Result<u16> {
	let mut code_unit: u16 = 0;

	for _ in 0..4 {
		let digit = match cursor.consume() {
			c @ b'0'..=b'9' => c - b'0',
			c @ b'A'..=b'F' => 10 + c - b'A',
			c @ b'a'..=b'f' => 10 + c - b'a',
			_ => return Err(cursor.format_error("expected 4hexdig")),
		};
		code_unit = (code_unit << 4) | u16::from(digit);
	}

	Ok(code_unit)
}

// Surrogates are filtered out before this is called, so `codepoint` is always a
// valid scalar value in 0..=0x10FFFF.
fn push_utf8(buf: &mut Vec<u8>, codepoint: u32) {
	if codepoint < 0x80 {
		buf.push(codepoint as u8);
	} else if codepoint < 0x800 {
		buf.push((codepoint >> 6) as u8 | 0xc0);
		buf.push((codepoint & 0x3f) as u8 | 0x80);
	} else if codepoint < 0x10000 {
		buf.push((codepoint >> 12) as u8 | 0xe0);
		buf.push(((codepoint >> 6) & 0x3f) as u8 | 0x80);
		buf.push((codepoint & 0x3f) as u8 | 0x80);
	} else {
		buf.push((codepoint >> 18) as u8 | 0xf0);
		buf.push(((codepoint >> 12) & 0x3f) as u8 | 0x80);
		buf.push(((codepoint >> 6) & 0x3f) as u8 | 0x80);
		buf.push((codepoint & 0x3f) as u8 | 0x80);
	}
}

fn parse_number<V: JsonVisitor>(cursor: &mut CharCursor, visitor: &mut V) -> Result<()> {
	let minus = cursor.peek() == b'-';
	if minus {
		cursor.advance();
	}

	let mut number: f64 = 0.0;

	// A leading zero ends the integer part, "042" is not a valid number.
	match cursor.peek() {
		b'0' => cursor.advance(),
		b'1'..=b'9' => number = parse_integer_digits(cursor),
		_ => return Err(cursor.format_error("expected integer")),
	}

	if cursor.peek() == b'.' {
		cursor.advance();
		if !cursor.peek().is_ascii_digit() {
			return Err(cursor.format_error("expected fraction"));
		}
		number += parse_fraction_digits(cursor);
	}

	if matches!(cursor.peek(), b'e' | b'E') {
		cursor.advance();

		let negative_exponent = cursor.peek() == b'-';
		if matches!(cursor.peek(), b'-' | b'+') {
			cursor.advance();
		}

		if !cursor.peek().is_ascii_digit() {
			return Err(cursor.format_error("expected exponent"));
		}

		let mut exponent: i32 = 0;
		while cursor.peek().is_ascii_digit() {
			let digit = i32::from(cursor.consume() - b'0');
			exponent = exponent.saturating_mul(10).saturating_add(digit);
		}
		number *= 10f64.powi(if negative_exponent { -exponent } else { exponent });
	}

	visitor.number_value(if minus { -number } else { number });
	Ok(())
}

fn parse_integer_digits(cursor: &mut CharCursor) -> f64 {
	let mut number: f64 = 0.0;
	while cursor.peek().is_ascii_digit() {
		let digit = f64::from(cursor.consume() - b'0');
		number = number * 10.0 + digit;
	}
	number
}

fn parse_fraction_digits(cursor: &mut CharCursor) -> f64 {
	let mut fraction: f64 = 0.0;
	let mut factor: f64 = 0.1;
	while cursor.peek().is_ascii_digit() {
		let digit = f64::from(cursor.consume() - b'0');
		fraction += digit * factor;
		factor *= 0.1;
	}
	fraction
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn parse_first_element(json: &str) -> Result<JsonValue> {
		let value = parse_json_str(json)?;
		Ok(value.child_at(0).clone())
	}

	#[test]
	fn test_parse_object() -> Result<()> {
		let value = parse_json_str(r#"{"name":"test","size":42,"flag":true,"nothing":null}"#)?;

		assert_eq!(value.child_by_key("name"), &JsonValue::from("test"));
		assert_eq!(value.child_by_key("size"), &JsonValue::from(42.0));
		assert_eq!(value.child_by_key("flag"), &JsonValue::from(true));
		assert!(value.child_by_key("nothing").is_null());
		Ok(())
	}

	#[test]
	fn test_parse_nested_containers() -> Result<()> {
		let value = parse_json_str(r#"{"list":[1,[2,3],{"deep":[]}]}"#)?;
		let list = value.child_by_key("list");

		assert_eq!(list.len(), 3);
		assert_eq!(list.child_at(1).child_at(0), &JsonValue::from(2.0));
		assert!(list.child_at(2).child_by_key("deep").is_array());
		Ok(())
	}

	#[test]
	fn test_parse_empty_containers() -> Result<()> {
		assert_eq!(parse_json_str("[]")?, JsonValue::new_array());
		assert_eq!(parse_json_str("{}")?, JsonValue::new_object());
		assert_eq!(parse_json_str(" [ ] ")?, JsonValue::new_array());
		assert_eq!(parse_json_str("\t{\n}\r")?, JsonValue::new_object());
		Ok(())
	}

	#[test]
	fn test_parse_duplicate_keys_keep_last() -> Result<()> {
		let value = parse_json_str(r#"{"a":1,"a":2}"#)?;

		assert_eq!(value.child_by_key("a"), &JsonValue::from(2.0));
		if let JsonValue::Object(obj) = &value {
			assert_eq!(obj.0.len(), 1);
		} else {
			panic!("expected JsonValue::Object variant");
		}
		Ok(())
	}

	#[rstest]
	#[case("[0]", 0.0)]
	#[case("[-0]", 0.0)]
	#[case("[42]", 42.0)]
	#[case("[-17]", -17.0)]
	#[case("[3.25]", 3.25)]
	#[case("[0.125]", 0.125)]
	#[case("[1e3]", 1000.0)]
	#[case("[1E3]", 1000.0)]
	#[case("[2.5e-3]", 0.0025)]
	#[case("[12e+2]", 1200.0)]
	#[case("[-1.5e2]", -150.0)]
	fn test_parse_numbers(#[case] json: &str, #[case] expected: f64) {
		assert_eq!(parse_first_element(json).unwrap(), JsonValue::from(expected));
	}

	#[test]
	fn test_parse_huge_exponent_overflows_to_infinity() {
		let value = parse_first_element("[1e999999999]").unwrap();
		assert_eq!(value.as_number(), f64::INFINITY);
	}

	#[rstest]
	#[case(r#"["plain"]"#, "plain")]
	#[case(r#"["tab\there"]"#, "tab\there")]
	#[case(r#"["quote\"slash\\solidus\/"]"#, "quote\"slash\\solidus/")]
	#[case(r#"["\b\f\n\r\t"]"#, "\u{8}\u{c}\n\r\t")]
	#[case(r#"["Aé"]"#, "Aé")]
	#[case(r#"["€"]"#, "€")]
	#[case(r#"["😀"]"#, "😀")]
	#[case(r#"["\u0041"]"#, "A")]
	#[case(r#"["\u00e9"]"#, "é")]
	#[case(r#"["\u20ac"]"#, "€")]
	#[case(r#"["\u20AC"]"#, "€")]
	#[case(r#"["\ud83d\ude00"]"#, "😀")]
	#[case(r#"["escaped \u20ac and raw €"]"#, "escaped € and raw €")]
	#[case(r#"[""]"#, "")]
	fn test_parse_strings(#[case] json: &str, #[case] expected: &str) {
		assert_eq!(parse_first_element(json).unwrap(), JsonValue::from(expected));
	}

	#[test]
	fn test_surrogate_pair_decodes_to_four_utf8_bytes() -> Result<()> {
		let value = parse_first_element(r#"["\ud83d\ude00"]"#)?;

		assert_eq!(value.as_str(), "\u{1F600}");
		assert_eq!(value.as_str().len(), 4);
		Ok(())
	}

	#[rstest]
	#[case("", "expected object or array")]
	#[case("42", "expected object or array")]
	#[case(r#""text""#, "expected object or array")]
	#[case("null", "expected object or array")]
	#[case("[] []", "expected end")]
	#[case("[]x", "expected end")]
	#[case("{x:1}", "expected string")]
	#[case(r#"{"a" 1}"#, "expected name-separator")]
	#[case(r#"{"a":1 "b":2}"#, "expected value-separator or end-object")]
	#[case(r#"{"a":1,}"#, "expected string")]
	#[case("[1 2]", "expected value-separator or end-array")]
	#[case("[1,2,]", "expected integer")]
	#[case("[nul]", "expected value")]
	#[case("[tru]", "expected value")]
	#[case("[fals]", "expected value")]
	#[case("[042]", "expected value-separator or end-array")]
	#[case("[.5]", "expected integer")]
	#[case("[-]", "expected integer")]
	#[case("[1.]", "expected fraction")]
	#[case("[1e]", "expected exponent")]
	#[case("[1e+]", "expected exponent")]
	#[case(r#"["ab"#, "expected char or quotation-mark")]
	#[case("[\"a\tb\"]", "expected char")]
	#[case(r#"["\x"]"#, "expected escape")]
	#[case(r#"["\u12g4"]"#, "expected 4hexdig")]
	#[case(r#"["\ud800"]"#, "expected trailing surrogate")]
	#[case(r#"["\ud800A"]"#, "expected trailing surrogate")]
	#[case(r#"["\ude00"]"#, "unexpected trailing surrogate")]
	fn test_parse_errors(#[case] json: &str, #[case] expected: &str) {
		let message = parse_json_str(json).unwrap_err().to_string();
		assert!(
			message.starts_with(expected),
			"json {json:?} should fail with {expected:?}, got {message:?}"
		);
	}

	#[test]
	fn test_error_carries_position_and_snippet() {
		let message = parse_json_str("[1, 2").unwrap_err().to_string();
		assert_eq!(message, "expected value-separator or end-array at position 5: [1, 2<EOF>");
	}

	#[test]
	fn test_events_before_error_are_delivered() {
		#[derive(Default)]
		struct Counter(usize);

		impl JsonVisitor for Counter {
			fn null_value(&mut self) {}
			fn string_value(&mut self, _val: &str) {}
			fn number_value(&mut self, _val: f64) {
				self.0 += 1;
			}
			fn bool_value(&mut self, _val: bool) {}
			fn begin_array(&mut self) {}
			fn end_array(&mut self) {}
			fn begin_object(&mut self) {}
			fn end_object(&mut self) {}
			fn begin_key(&mut self) {}
			fn end_key(&mut self) {}
			fn begin_value(&mut self) {}
			fn end_value(&mut self) {}
		}

		let mut cursor = CharCursor::from_str("[1,2,oops]");
		let mut counter = Counter::default();

		assert!(parse_json_into(&mut cursor, &mut counter).is_err());
		assert_eq!(counter.0, 2);
	}

	#[test]
	fn test_whitespace_everywhere() -> Result<()> {
		let value = parse_json_str(" { \"a\" : [ 1 , 2 ] , \"b\" : null } ")?;

		assert_eq!(value.child_by_key("a").len(), 2);
		assert!(value.child_by_key("b").is_null());
		Ok(())
	}
}
