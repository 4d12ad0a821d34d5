//! Shared text fragments for both encoders: quoted-string escaping and number
//! rendering.

use std::sync::OnceLock;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Append `text` as a quoted JSON string, escaping `"`, `\`, control characters
/// below 0x20 and DEL. Multi-byte UTF-8 passes through unescaped.
pub fn write_escaped_string(out: &mut String, text: &str) {
	out.push('"');
	for c in text.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\u{8}' => out.push_str("\\b"),
			'\u{c}' => out.push_str("\\f"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if (c as u32) < 0x20 || c == '\u{7f}' => {
				let code = c as u32;
				out.push_str("\\u00");
				out.push(HEX_DIGITS[(code >> 4) as usize] as char);
				out.push(HEX_DIGITS[(code & 0xf) as usize] as char);
			}
			c => out.push(c),
		}
	}
	out.push('"');
}

/// Number rendering context, shared by all encoder instances and initialized
/// once on first use. Rendering goes through `core::fmt`, which never consults
/// the process locale, so output is stable regardless of environment.
pub struct NumberFormat {
	precision: usize,
}

static NUMBER_FORMAT: OnceLock<NumberFormat> = OnceLock::new();

impl NumberFormat {
	fn get() -> &'static NumberFormat {
		NUMBER_FORMAT.get_or_init(|| NumberFormat { precision: 16 })
	}

	/// Shortest-of-`precision`-significant-digits rendering: fixed notation for
	/// decimal exponents in `[-4, precision)`, scientific otherwise, trailing
	/// zeros trimmed. Matches printf `%.16g` for `precision` 16.
	fn format_general(&self, value: f64) -> String {
		let negative = value < 0.0;
		let magnitude = value.abs();

		let formatted = format!("{magnitude:.prec$e}", prec = self.precision - 1);
		let Some((mantissa, exponent)) = formatted.split_once('e') else {
			return formatted;
		};
		let exponent: i32 = exponent.parse().unwrap_or(0);

		let mut digits: String = mantissa.chars().filter(|&c| c != '.').collect();
		while digits.len() > 1 && digits.ends_with('0') {
			digits.pop();
		}

		let mut out = String::new();
		if negative {
			out.push('-');
		}

		if exponent < -4 || exponent >= self.precision as i32 {
			out.push_str(&digits[..1]);
			if digits.len() > 1 {
				out.push('.');
				out.push_str(&digits[1..]);
			}
			out.push('e');
			out.push(if exponent < 0 { '-' } else { '+' });
			out.push_str(&format!("{:02}", exponent.abs()));
		} else if exponent >= 0 {
			let point = (exponent + 1) as usize;
			if digits.len() <= point {
				out.push_str(&digits);
				out.push_str(&"0".repeat(point - digits.len()));
			} else {
				out.push_str(&digits[..point]);
				out.push('.');
				out.push_str(&digits[point..]);
			}
		} else {
			out.push_str("0.");
			out.push_str(&"0".repeat((-exponent - 1) as usize));
			out.push_str(&digits);
		}
		out
	}
}

/// Append the JSON rendering of `value`.
///
/// Non-finite and vanishing values have fixed spellings: NaN becomes `null`,
/// the infinities become the strings `"+inf"` and `"-inf"`, zeros and
/// subnormals become `0`. Everything else renders with 16 significant digits.
pub fn write_number(out: &mut String, value: f64) {
	if value.is_nan() {
		out.push_str("null");
	} else if value == f64::INFINITY {
		out.push_str("\"+inf\"");
	} else if value == f64::NEG_INFINITY {
		out.push_str("\"-inf\"");
	} else if value == 0.0 || value.is_subnormal() {
		out.push('0');
	} else {
		out.push_str(&NumberFormat::get().format_general(value));
	}
}
