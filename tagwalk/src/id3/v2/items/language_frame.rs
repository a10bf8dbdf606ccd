use super::decode_description_pair;
use super::text_information_frame::decode_text_values;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::macros::id3v2_err;
use crate::util::text::TextEncoding;

/// An `ID3v2` text frame with a language
///
/// This is used by both comments (`COMM`) and unsynchronized lyrics (`USLT`). Similar to `TXXX`
/// and `WXXX` frames, these are told apart by their descriptions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LanguageFrame {
	/// The encoding of the description and content text
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
}

impl LanguageFrame {
	/// Read a [`LanguageFrame`] from frame content
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * `content` is too short to hold the encoding and language
	/// * Unable to decode the text
	pub fn parse(content: &[u8], parse_options: ParseOptions) -> Result<Self> {
		let [encoding_byte, l1, l2, l3, content @ ..] = content else {
			id3v2_err!(BadFrameLength);
		};

		let encoding = verify_encoding(*encoding_byte, parse_options.parsing_mode)?;
		let language = [*l1, *l2, *l3];

		let (description, rest) = decode_description_pair(content, encoding, parse_options)?;
		let content = match rest {
			Some(rest) => decode_text_values(rest, encoding, parse_options)?,
			None => String::new(),
		};

		Ok(Self {
			encoding,
			language,
			description,
			content,
		})
	}
}
