//! MPEG specific items
//!
//! ## File notes
//!
//! Only the first frame of the stream is decoded. For Layer III streams, the Xing/Info header in
//! that frame gives an exact duration. Without one, the duration is estimated from the frame's
//! bitrate and the length of the stream.

mod constants;
pub(crate) mod header;
mod properties;
mod read;
mod xing;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{FileSubtype, TagFormat};
use crate::id3::v1::Id3v1Tag;
use crate::id3::v2::Id3v2Tag;
use crate::metadata::{Metadata, RawValue};
use crate::picture::Picture;

use std::borrow::Cow;
use std::io::{Read, Seek};
use std::time::Duration;

// Exports

pub use header::{
	Bitrate, ChannelMode, Emphasis, FrameHeader, Layer, MpegVersion, search_for_frame_sync,
};
pub use properties::MpegProperties;
pub use xing::{XingHeader, XingId};

macro_rules! fallback_accessors {
	($($name:ident -> $ty:ty),+ $(,)?) => {
		$(
			fn $name(&self) -> Option<$ty> {
				self.id3v2
					.as_ref()
					.and_then(|tag| tag.$name())
					.or_else(|| self.id3v1.as_ref().and_then(|tag| tag.$name()))
			}
		)+
	};
}

/// An MPEG file
///
/// ## Notes on the [`Metadata`] implementation
///
/// Every item is read from the ID3v2 tag first, falling back to the ID3v1 tag when the ID3v2 tag
/// doesn't have it. [`Metadata::raw`] and [`Metadata::tag_format`] describe the ID3v2 tag if the
/// file has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpegFile {
	pub(crate) id3v2: Option<Id3v2Tag>,
	pub(crate) id3v1: Option<Id3v1Tag>,
	pub(crate) header: FrameHeader,
	pub(crate) xing: Option<XingHeader>,
	pub(crate) properties: MpegProperties,
}

impl MpegFile {
	/// Read an MPEG file from `reader`
	///
	/// The stream may start with an ID3v2 tag, and end with an ID3v1 tag.
	///
	/// # Errors
	///
	/// * No frame sync was found
	/// * A tag or the Xing header failed to decode
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::ParseOptions;
	/// use tagwalk::metadata::Metadata;
	/// use tagwalk::mpeg::{Layer, MpegFile};
	///
	/// # fn main() -> tagwalk::error::Result<()> {
	/// // A single MPEG-1 Layer III frame header, followed by some empty frame data
	/// let mut bytes = vec![0xFF, 0xFB, 0x90, 0x64];
	/// bytes.extend([0; 64]);
	///
	/// let file = MpegFile::read_from(&mut std::io::Cursor::new(bytes), ParseOptions::new())?;
	/// assert_eq!(file.frame_header().layer, Layer::Layer3);
	/// assert!(file.xing_header().is_none());
	/// assert_eq!(file.average_bitrate(), 128_000);
	/// # Ok(()) }
	/// ```
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		read::read_from(reader, parse_options)
	}

	/// The ID3v2 tag, if one was read
	pub fn id3v2(&self) -> Option<&Id3v2Tag> {
		self.id3v2.as_ref()
	}

	/// The ID3v1 tag, if one was read
	pub fn id3v1(&self) -> Option<&Id3v1Tag> {
		self.id3v1.as_ref()
	}

	/// The header of the first frame
	pub fn frame_header(&self) -> &FrameHeader {
		&self.header
	}

	/// The Xing/Info header of the first frame
	pub fn xing_header(&self) -> Option<&XingHeader> {
		self.xing.as_ref()
	}

	/// The file's audio properties
	pub fn properties(&self) -> &MpegProperties {
		&self.properties
	}
}

impl Metadata for MpegFile {
	fallback_accessors!(
		title -> Cow<'_, str>,
		artist -> Cow<'_, str>,
		album -> Cow<'_, str>,
		album_artist -> Cow<'_, str>,
		composer -> Cow<'_, str>,
		genre -> Cow<'_, str>,
		comment -> Cow<'_, str>,
		lyrics -> Cow<'_, str>,
		year -> u32,
		track -> u32,
		track_total -> u32,
		disk -> u32,
		disk_total -> u32,
	);

	fn picture(&self) -> Option<&Picture> {
		self.id3v2.as_ref().and_then(Id3v2Tag::picture)
	}

	fn duration(&self) -> Duration {
		self.properties.duration
	}

	fn average_bitrate(&self) -> u32 {
		self.properties.average_bitrate
	}

	fn file_subtype(&self) -> FileSubtype {
		match self.header.layer {
			Layer::Layer1 => FileSubtype::Mp1,
			Layer::Layer2 => FileSubtype::Mp2,
			Layer::Layer3 => FileSubtype::Mp3,
			Layer::Reserved => FileSubtype::Unknown,
		}
	}

	fn tag_format(&self) -> TagFormat {
		match (&self.id3v2, &self.id3v1) {
			(Some(id3v2), _) => id3v2.tag_format(),
			(None, Some(id3v1)) => id3v1.tag_format(),
			(None, None) => TagFormat::Unknown,
		}
	}

	fn raw(&self) -> Vec<(Cow<'_, str>, RawValue<'_>)> {
		match (&self.id3v2, &self.id3v1) {
			(Some(id3v2), _) => id3v2.raw(),
			(None, Some(id3v1)) => id3v1.raw(),
			(None, None) => Vec::new(),
		}
	}
}
