pub(crate) mod properties;

use super::comments::VorbisComments;
use super::constants::VORBIS_COMMENT_HEAD;
use super::verify_signature;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{FileSubtype, TagFormat};
use crate::macros::parse_mode_choice;
use crate::metadata::{Metadata, RawValue, forward_accessors};
use crate::picture::Picture;
use properties::{VorbisIdentificationHeader, VorbisProperties};

use std::borrow::Cow;
use std::io::{Read, Seek};
use std::time::Duration;

use ogg_pager::read_packet;

/// An OGG Vorbis file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VorbisFile {
	pub(crate) identification: VorbisIdentificationHeader,
	/// The Vorbis Comments contained in the file
	///
	/// NOTE: While a comment packet is required, it isn't required to actually have any data.
	pub(crate) vorbis_comments: Option<VorbisComments>,
	pub(crate) properties: VorbisProperties,
}

impl VorbisFile {
	/// Read an OGG Vorbis file from `reader`
	///
	/// The first packet must be the identification header, followed by the comment header.
	///
	/// # Errors
	///
	/// * The stream isn't made of valid OGG pages
	/// * Either header packet is missing its signature ([`ErrorKind::MagicMismatch`](crate::error::ErrorKind::MagicMismatch))
	/// * The comments are malformed
	/// * The last page isn't flagged as such ([`ErrorKind::MalformedFinalPage`](crate::error::ErrorKind::MalformedFinalPage)),
	///   unless using [`ParsingMode::Relaxed`](crate::config::ParsingMode::Relaxed)
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		let identification_packet = read_packet(reader)?;
		let identification = VorbisIdentificationHeader::parse(&identification_packet)?;
		log::debug!(
			"Vorbis: {} channels, {} Hz",
			identification.channels,
			identification.sample_rate
		);

		// The comment header may share its page with the setup header. The comments are length
		// prefixed, so anything following them is ignored.
		let comment_packet = read_packet(reader)?;
		verify_signature(&comment_packet, VORBIS_COMMENT_HEAD)?;

		let vorbis_comments = if parse_options.read_tags {
			Some(VorbisComments::parse(
				&comment_packet[VORBIS_COMMENT_HEAD.len()..],
				parse_options,
			)?)
		} else {
			None
		};

		let parse_mode = parse_options.parsing_mode;
		let properties = if parse_options.read_properties {
			match properties::read_properties(reader, &identification) {
				Ok(properties) => properties,
				Err(e) => parse_mode_choice!(
					parse_mode,
					RELAXED: {
						log::warn!("Vorbis: Unable to read properties, zeroing: {e}");
						VorbisProperties::default()
					},
					DEFAULT: return Err(e),
				),
			}
		} else {
			VorbisProperties::default()
		};

		Ok(Self {
			identification,
			vorbis_comments,
			properties,
		})
	}

	/// The identification header
	pub fn identification_header(&self) -> &VorbisIdentificationHeader {
		&self.identification
	}

	/// The Vorbis comments, if tags were read
	pub fn vorbis_comments(&self) -> Option<&VorbisComments> {
		self.vorbis_comments.as_ref()
	}

	/// The file's audio properties
	pub fn properties(&self) -> &VorbisProperties {
		&self.properties
	}
}

impl Metadata for VorbisFile {
	forward_accessors!(vorbis_comments);

	fn picture(&self) -> Option<&Picture> {
		self.vorbis_comments.as_ref()?.picture()
	}

	fn duration(&self) -> Duration {
		self.properties.duration
	}

	fn average_bitrate(&self) -> u32 {
		self.properties.average_bitrate
	}

	fn file_subtype(&self) -> FileSubtype {
		FileSubtype::Ogg
	}

	fn tag_format(&self) -> TagFormat {
		match self.vorbis_comments {
			Some(_) => TagFormat::Vorbis,
			None => TagFormat::Unknown,
		}
	}

	fn raw(&self) -> Vec<(Cow<'_, str>, RawValue<'_>)> {
		self.vorbis_comments
			.as_ref()
			.map(Metadata::raw)
			.unwrap_or_default()
	}
}


#[cfg(test)]
mod tests {
	use super::VorbisFile;
	use super::test_utils::stream;
	use crate::config::ParseOptions;
	use crate::error::ErrorKind;
	use crate::file::{FileSubtype, TagFormat};
use crate::macros::parse_mode_choice;
	use crate::metadata::Metadata;

	use std::io::Cursor;
	use std::time::Duration;

	use ogg_pager::CONTAINS_LAST_PAGE_OF_BITSTREAM;

	fn read(bytes: Vec<u8>, parse_options: ParseOptions) -> crate::error::Result<VorbisFile> {
		VorbisFile::read_from(&mut Cursor::new(bytes), parse_options)
	}

	#[test_log::test]
	fn read_stream() {
		let bytes = stream(
			&[b"TITLE=Foo title", b"ARTIST=Bar artist", b"TRACKNUMBER=4"],
			CONTAINS_LAST_PAGE_OF_BITSTREAM,
			48000 * 90,
		);

		let file = read(bytes, ParseOptions::new()).unwrap();

		let comments = file.vorbis_comments().unwrap();
		assert_eq!(
			comments.vendor(),
			"Xiph.Org libVorbis I 20200704 (Reducing Environment)"
		);
		assert_eq!(file.title().as_deref(), Some("Foo title"));
		assert_eq!(file.artist().as_deref(), Some("Bar artist"));
		assert_eq!(file.track(), Some(4));
		assert_eq!(file.raw().len(), 3);

		assert_eq!(file.identification_header().sample_rate, 48000);
		assert_eq!(file.duration(), Duration::from_secs(90));
		assert_eq!(file.average_bitrate(), 160_000);
		assert_eq!(file.properties().channels(), 2);
		assert_eq!(file.properties().total_samples(), 48000 * 90);
		assert_eq!(file.file_subtype(), FileSubtype::Ogg);
		assert_eq!(file.tag_format(), TagFormat::Vorbis);
	}

	#[test_log::test]
	fn unflagged_final_page() {
		let bytes = stream(&[], 0, 48000);

		let err = read(bytes.clone(), ParseOptions::new()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::MalformedFinalPage));

		// The last page is only needed for the properties
		let file = read(bytes, ParseOptions::new().read_properties(false)).unwrap();
		assert_eq!(file.duration(), Duration::ZERO);
		assert_eq!(file.tag_format(), TagFormat::Vorbis);
	}

	#[test_log::test]
	fn skip_tags() {
		let bytes = stream(&[b"TITLE=Foo"], CONTAINS_LAST_PAGE_OF_BITSTREAM, 48000);

		let file = read(bytes, ParseOptions::new().read_tags(false)).unwrap();
		assert!(file.vorbis_comments().is_none());
		assert_eq!(file.title(), None);
		assert_eq!(file.tag_format(), TagFormat::Unknown);
		assert_eq!(file.duration(), Duration::from_secs(1));
	}

	#[test_log::test]
	fn missing_comment_header() {
		let mut bytes = stream(&[], CONTAINS_LAST_PAGE_OF_BITSTREAM, 48000);

		// The comment signature starts right after the second page's header
		let first_page_len = 28 + 30;
		bytes[first_page_len + 28] = 5;

		let err = read(bytes, ParseOptions::new()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::MagicMismatch(_)));
	}
}
