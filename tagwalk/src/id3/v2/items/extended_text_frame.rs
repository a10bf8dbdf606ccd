use super::decode_description_pair;
use super::text_information_frame::decode_text_values;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::macros::id3v2_err;
use crate::util::text::TextEncoding;

/// An extended `ID3v2` text frame
///
/// This is used in the `TXXX` frame, where the frames
/// are told apart by descriptions, rather than their [`FrameId`](crate::id3::v2::FrameId)s.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedTextFrame {
	/// The encoding of the description and comment text
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
}

impl ExtendedTextFrame {
	/// Read an [`ExtendedTextFrame`] from frame content
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * `content` is empty
	/// * Unable to decode the text
	pub fn parse(content: &[u8], parse_options: ParseOptions) -> Result<Self> {
		let Some((&encoding_byte, content)) = content.split_first() else {
			id3v2_err!(BadFrameLength);
		};

		let encoding = verify_encoding(encoding_byte, parse_options.parsing_mode)?;
		let (description, rest) = decode_description_pair(content, encoding, parse_options)?;
		let content = match rest {
			Some(rest) => decode_text_values(rest, encoding, parse_options)?,
			None => String::new(),
		};

		Ok(Self {
			encoding,
			description,
			content,
		})
	}
}
