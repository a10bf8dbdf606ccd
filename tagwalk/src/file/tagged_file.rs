use super::file_type::FileType;
use super::{FileSubtype, TagFormat};
use crate::flac::FlacFile;
use crate::id3::v1::Id3v1Tag;
use crate::metadata::{Metadata, RawValue};
use crate::mp4::Mp4File;
use crate::mpeg::MpegFile;
use crate::ogg::VorbisFile;
use crate::picture::Picture;

use std::borrow::Cow;
use std::time::Duration;

/// A file of any supported format, as returned by [`read_from`](crate::read_from)
///
/// Use the [`Metadata`] implementation for format-agnostic access, or match on the variants for
/// everything a format has to offer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TaggedFile {
	/// An MPEG audio file
	Mpeg(MpegFile),
	/// An MP4 file
	Mp4(Mp4File),
	/// A FLAC file
	Flac(FlacFile),
	/// An OGG Vorbis file
	Vorbis(VorbisFile),
	/// A stream of an unknown format, ending in an ID3v1 tag
	Id3v1(Id3v1Tag),
}

impl TaggedFile {
	/// Returns the file's [`FileType`]
	///
	/// This is `None` for [`TaggedFile::Id3v1`], as nothing is known about the stream.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::ParseOptions;
	/// use tagwalk::file::FileType;
	///
	/// # fn main() -> tagwalk::error::Result<()> {
	/// let mut bytes = b"fLaC".to_vec();
	/// bytes.extend([0x80, 0, 0, 34]);
	/// bytes.extend([0; 34]);
	///
	/// let tagged_file = tagwalk::read_from(&mut std::io::Cursor::new(bytes), ParseOptions::new())?;
	/// assert_eq!(tagged_file.file_type(), Some(FileType::Flac));
	/// # Ok(()) }
	/// ```
	pub fn file_type(&self) -> Option<FileType> {
		match self {
			Self::Mpeg(_) => Some(FileType::Mpeg),
			Self::Mp4(_) => Some(FileType::Mp4),
			Self::Flac(_) => Some(FileType::Flac),
			Self::Vorbis(_) => Some(FileType::Vorbis),
			Self::Id3v1(_) => None,
		}
	}

	fn inner(&self) -> &dyn Metadata {
		match self {
			Self::Mpeg(file) => file,
			Self::Mp4(file) => file,
			Self::Flac(file) => file,
			Self::Vorbis(file) => file,
			Self::Id3v1(tag) => tag,
		}
	}
}

macro_rules! delegate {
	($($name:ident -> $ty:ty),+ $(,)?) => {
		$(
			fn $name(&self) -> $ty {
				self.inner().$name()
			}
		)+
	};
}

impl Metadata for TaggedFile {
	delegate! {
		title -> Option<Cow<'_, str>>,
		artist -> Option<Cow<'_, str>>,
		album -> Option<Cow<'_, str>>,
		album_artist -> Option<Cow<'_, str>>,
		composer -> Option<Cow<'_, str>>,
		genre -> Option<Cow<'_, str>>,
		comment -> Option<Cow<'_, str>>,
		lyrics -> Option<Cow<'_, str>>,
		year -> Option<u32>,
		track -> Option<u32>,
		track_total -> Option<u32>,
		disk -> Option<u32>,
		disk_total -> Option<u32>,
		picture -> Option<&Picture>,
		duration -> Duration,
		average_bitrate -> u32,
		file_subtype -> FileSubtype,
		tag_format -> TagFormat,
		raw -> Vec<(Cow<'_, str>, RawValue<'_>)>,
	}
}

impl From<MpegFile> for TaggedFile {
	fn from(input: MpegFile) -> Self {
		Self::Mpeg(input)
	}
}

impl From<Mp4File> for TaggedFile {
	fn from(input: Mp4File) -> Self {
		Self::Mp4(input)
	}
}

impl From<FlacFile> for TaggedFile {
	fn from(input: FlacFile) -> Self {
		Self::Flac(input)
	}
}

impl From<VorbisFile> for TaggedFile {
	fn from(input: VorbisFile) -> Self {
		Self::Vorbis(input)
	}
}

impl From<Id3v1Tag> for TaggedFile {
	fn from(input: Id3v1Tag) -> Self {
		Self::Id3v1(input)
	}
}
