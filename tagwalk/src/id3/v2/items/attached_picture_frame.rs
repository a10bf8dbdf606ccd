use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::id3::v2::frame::content::verify_encoding;
use crate::macros::{err, id3v2_err};
use crate::picture::{MimeType, Picture, PictureType};
use crate::util::text::{TextEncoding, decode_text, latin1_decode, split_terminated};

/// An `ID3v2` attached picture frame
///
/// This is used for both `APIC` (ID3v2.3/4) and `PIC` (ID3v2.2) frames.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame {
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The picture itself
	pub picture: Picture,
}

impl AttachedPictureFrame {
	/// Read an [`AttachedPictureFrame`] from frame content
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// Picture types outside of the ID3v2 table are read as [`PictureType::Other`].
	///
	/// # Errors
	///
	/// * `content` is too short
	/// * The MIME type (`APIC`) or description has no terminator
	///
	/// ID3v2.2:
	///
	/// * The image format is unknown, in [`ParsingMode::Strict`]
	pub fn parse(content: &[u8], version: Id3v2Version, parse_options: ParseOptions) -> Result<Self> {
		let Some((&encoding_byte, content)) = content.split_first() else {
			id3v2_err!(BadFrameLength);
		};

		let encoding = verify_encoding(encoding_byte, parse_options.parsing_mode)?;

		let (mime_type, extension, content) = if version == Id3v2Version::V2 {
			let Some((format, content)) = content.split_first_chunk::<3>() else {
				id3v2_err!(BadFrameLength);
			};

			let format = latin1_decode(format);
			match MimeType::from_pic_format(&format) {
				Some(mime_type) => {
					let extension = mime_type.ext().map(str::to_owned);
					(Some(mime_type), extension, content)
				},
				None => {
					if parse_options.parsing_mode == ParsingMode::Strict {
						id3v2_err!(BadPictureFormat(format));
					}

					log::warn!("Unknown PIC image format \"{format}\", no MIME type available");
					(None, Some(format), content)
				},
			}
		} else {
			let (mime_type, rest) = split_terminated(content, TextEncoding::Latin1);
			let Some(rest) = rest else {
				err!(InvalidFieldEncoding("APIC MIME type"));
			};

			let mime_type = latin1_decode(mime_type);
			let mime_type = (!mime_type.is_empty()).then(|| MimeType::from_str(&mime_type));
			let extension = mime_type.as_ref().and_then(MimeType::ext).map(str::to_owned);
			(mime_type, extension, rest)
		};

		let Some((&pic_type, content)) = content.split_first() else {
			err!(InvalidFieldEncoding("picture type"));
		};
		let pic_type = PictureType::from_u8(pic_type).unwrap_or_else(|| {
			log::debug!("Unknown picture type {pic_type}, using `PictureType::Other`");
			PictureType::Other
		});

		let (description, data) = split_terminated(content, encoding);
		let Some(data) = data else {
			err!(InvalidFieldEncoding("picture description"));
		};
		let description = decode_text(
			description,
			encoding,
			parse_options.default_utf16_byte_order,
		)?;

		let picture = Picture {
			pic_type,
			mime_type,
			extension,
			description: (!description.is_empty()).then_some(description),
			data: data.to_vec(),
		};

		Ok(Self { encoding, picture })
	}
}
