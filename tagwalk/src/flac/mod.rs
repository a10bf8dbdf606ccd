//! Items for FLAC
//!
//! ## File notes
//!
//! * See [`FlacFile`]

mod block;
mod properties;
mod read;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{FileSubtype, TagFormat};
use crate::metadata::{Metadata, RawValue, forward_accessors, preferred_picture};
use crate::ogg::VorbisComments;
use crate::picture::Picture;

use std::borrow::Cow;
use std::io::{Read, Seek};
use std::time::Duration;

// Exports

pub use properties::{FlacProperties, FlacStreamInfo};

/// A FLAC file
///
/// ## Notes
///
/// * An ID3v2 tag preceding the stream is skipped, its use is discouraged by spec
/// * Pictures are stored both in `PICTURE` blocks, and in the Vorbis comments. [`FlacFile::pictures`]
///   only covers the blocks, while [`Metadata::picture`] considers both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlacFile {
	pub(crate) stream_info: Option<FlacStreamInfo>,
	/// The vorbis comments contained in the file
	pub(crate) vorbis_comments: Option<VorbisComments>,
	pub(crate) pictures: Vec<Picture>,
	/// The file's audio properties
	pub(crate) properties: FlacProperties,
}

impl FlacFile {
	/// Read a FLAC file from `reader`
	///
	/// # Errors
	///
	/// * The stream is missing the `fLaC` marker ([`ErrorKind::MagicMismatch`](crate::error::ErrorKind::MagicMismatch))
	/// * A block is truncated
	/// * The `STREAMINFO` or `VORBIS_COMMENT` blocks are malformed
	/// * **Strict mode only**: a `PICTURE` block is malformed, or there are multiple `VORBIS_COMMENT` blocks
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::ParseOptions;
	/// use tagwalk::flac::FlacFile;
	///
	/// # fn main() -> tagwalk::error::Result<()> {
	/// let mut bytes = b"fLaC".to_vec();
	/// // A lone STREAMINFO block, flagged as the last block
	/// bytes.extend([0x80, 0, 0, 34]);
	/// bytes.extend([0; 34]);
	///
	/// let file = FlacFile::read_from(&mut std::io::Cursor::new(bytes), ParseOptions::new())?;
	/// assert!(file.vorbis_comments().is_none());
	/// assert!(file.pictures().is_empty());
	/// # Ok(()) }
	/// ```
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		read::read_from(reader, parse_options)
	}

	/// The `STREAMINFO` block
	pub fn stream_info(&self) -> Option<&FlacStreamInfo> {
		self.stream_info.as_ref()
	}

	/// The Vorbis comments, if the file has a `VORBIS_COMMENT` block
	pub fn vorbis_comments(&self) -> Option<&VorbisComments> {
		self.vorbis_comments.as_ref()
	}

	/// The pictures stored in `PICTURE` blocks
	pub fn pictures(&self) -> &[Picture] {
		&self.pictures
	}

	/// The file's audio properties
	pub fn properties(&self) -> &FlacProperties {
		&self.properties
	}
}

impl Metadata for FlacFile {
	forward_accessors!(vorbis_comments);

	fn picture(&self) -> Option<&Picture> {
		let comment_pictures = self.vorbis_comments.iter().flat_map(VorbisComments::pictures);
		preferred_picture(self.pictures.iter().chain(comment_pictures))
	}

	fn duration(&self) -> Duration {
		self.properties.duration
	}

	fn average_bitrate(&self) -> u32 {
		self.properties.average_bitrate
	}

	fn file_subtype(&self) -> FileSubtype {
		FileSubtype::Flac
	}

	fn tag_format(&self) -> TagFormat {
		match self.vorbis_comments {
			Some(_) => TagFormat::Vorbis,
			None => TagFormat::Unknown,
		}
	}

	fn raw(&self) -> Vec<(Cow<'_, str>, RawValue<'_>)> {
		let mut raw = self
			.vorbis_comments
			.as_ref()
			.map(Metadata::raw)
			.unwrap_or_default();

		raw.extend(
			self.pictures
				.iter()
				.map(|picture| (Cow::Borrowed("PICTURE"), RawValue::Picture(picture))),
		);

		raw
	}
}
