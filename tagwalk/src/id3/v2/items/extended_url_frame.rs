use super::decode_description_pair;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::macros::id3v2_err;
use crate::util::text::{TextEncoding, latin1_decode};

/// An extended `ID3v2` URL frame
///
/// This is used in the `WXXX` frame, where the frames
/// are told apart by descriptions, rather than their [`FrameId`](crate::id3::v2::FrameId)s.
///
/// The encoding only applies to the description. The URL itself is always Latin-1.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedUrlFrame {
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The URL
	pub content: String,
}

impl ExtendedUrlFrame {
	/// Read an [`ExtendedUrlFrame`] from frame content
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * `content` is empty
	/// * Unable to decode the description
	pub fn parse(content: &[u8], parse_options: ParseOptions) -> Result<Self> {
		let Some((&encoding_byte, content)) = content.split_first() else {
			id3v2_err!(BadFrameLength);
		};

		let encoding = verify_encoding(encoding_byte, parse_options.parsing_mode)?;
		let (description, rest) = decode_description_pair(content, encoding, parse_options)?;
		let content = rest.map(latin1_decode).unwrap_or_default();

		Ok(Self {
			encoding,
			description,
			content,
		})
	}
}
