mod attached_picture_frame;
mod extended_text_frame;
mod extended_url_frame;
mod language_frame;
mod text_information_frame;
mod unique_file_identifier;
mod url_link_frame;

pub use attached_picture_frame::AttachedPictureFrame;
pub use extended_text_frame::ExtendedTextFrame;
pub use extended_url_frame::ExtendedUrlFrame;
pub use language_frame::LanguageFrame;
pub use text_information_frame::TextInformationFrame;
pub use unique_file_identifier::UniqueFileIdentifierFrame;
pub use url_link_frame::UrlLinkFrame;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::util::text::{TextEncoding, decode_text, split_terminated};

/// Split a description off of the front of `content`, decoding both parts
///
/// Without a terminator, the entire content is the description, and the remainder is empty.
pub(super) fn decode_description_pair(
	content: &[u8],
	encoding: TextEncoding,
	parse_options: ParseOptions,
) -> Result<(String, Option<&[u8]>)> {
	let (description, rest) = split_terminated(content, encoding);
	let description = decode_text(
		description,
		encoding,
		parse_options.default_utf16_byte_order,
	)?;

	Ok((description, rest))
}
