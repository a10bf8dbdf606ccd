use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::macros::id3v2_err;
use crate::util::text::{TextEncoding, decode_text, split_terminated};

/// An `ID3v2` text frame
///
/// ID3v2.4 allows multiple values, separated by a null terminator. These are joined with `'/'`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextInformationFrame {
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The text itself
	pub value: String,
}

impl TextInformationFrame {
	/// Read a [`TextInformationFrame`] from frame content
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * `content` is empty
	/// * Unable to decode the text
	pub fn parse(content: &[u8], parse_options: ParseOptions) -> Result<Self> {
		let Some((&encoding_byte, text)) = content.split_first() else {
			id3v2_err!(BadFrameLength);
		};

		let encoding = verify_encoding(encoding_byte, parse_options.parsing_mode)?;
		let value = decode_text_values(text, encoding, parse_options)?;

		Ok(Self { encoding, value })
	}
}

/// Decode null separated values, joining them with `'/'`
///
/// Trailing terminators are dropped.
pub(super) fn decode_text_values(
	mut text: &[u8],
	encoding: TextEncoding,
	parse_options: ParseOptions,
) -> Result<String> {
	let mut values = Vec::new();
	loop {
		let (value, rest) = split_terminated(text, encoding);
		values.push(decode_text(
			value,
			encoding,
			parse_options.default_utf16_byte_order,
		)?);

		match rest {
			Some(rest) => text = rest,
			None => break,
		}
	}

	while values.last().is_some_and(String::is_empty) {
		values.pop();
	}

	Ok(values.join("/"))
}
