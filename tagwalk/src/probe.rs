//! Format-agnostic reading
//!
//! The format of a stream is determined from its leading bytes, see [`FileType::from_buffer`].

use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{FileType, TaggedFile};
use crate::flac::FlacFile;
use crate::id3::find_id3v2;
use crate::id3::v1::read_id3v1;
use crate::macros::err;
use crate::mp4::Mp4File;
use crate::mpeg::MpegFile;
use crate::ogg::VorbisFile;

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

// Enough for every signature, and a small ID3v2 tag followed by one
const GUESS_BUFFER_SIZE: u64 = 36;

/// Read a [`TaggedFile`] from a reader
///
/// The format is guessed from the content, starting at the current position. A stream of an
/// unknown format that ends in an ID3v1 tag is read as [`TaggedFile::Id3v1`].
///
/// # Errors
///
/// * The format could not be determined, and there is no ID3v1 tag ([`ErrorKind::UnknownFormat`](crate::error::ErrorKind::UnknownFormat))
/// * The format specific reader failed, see [`MpegFile::read_from`], [`Mp4File::read_from`],
///   [`FlacFile::read_from`], and [`VorbisFile::read_from`]
///
/// # Examples
///
/// ```rust
/// use tagwalk::config::ParseOptions;
/// use tagwalk::file::TaggedFile;
/// use tagwalk::metadata::Metadata;
///
/// # fn main() -> tagwalk::error::Result<()> {
/// let mut bytes = vec![0; 64];
///
/// let mut id3v1 = [0; 128];
/// id3v1[..3].copy_from_slice(b"TAG");
/// id3v1[3..6].copy_from_slice(b"Foo");
/// bytes.extend(id3v1);
///
/// let tagged_file = tagwalk::read_from(&mut std::io::Cursor::new(bytes), ParseOptions::new())?;
/// assert!(matches!(tagged_file, TaggedFile::Id3v1(_)));
/// assert_eq!(tagged_file.title().as_deref(), Some("Foo"));
/// # Ok(()) }
/// ```
pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<TaggedFile>
where
	R: Read + Seek,
{
	let start = reader.stream_position()?;
	let file_type = guess_file_type(reader)?;
	reader.seek(SeekFrom::Start(start))?;

	log::debug!("Guessed file type: {file_type:?}");

	match file_type {
		Some(FileType::Mpeg) => Ok(MpegFile::read_from(reader, parse_options)?.into()),
		Some(FileType::Mp4) => Ok(Mp4File::read_from(reader, parse_options)?.into()),
		Some(FileType::Flac) => Ok(FlacFile::read_from(reader, parse_options)?.into()),
		Some(FileType::Vorbis) => Ok(VorbisFile::read_from(reader, parse_options)?.into()),
		None => match read_id3v1(reader)? {
			Some(tag) => Ok(tag.into()),
			None => err!(UnknownFormat),
		},
	}
}

/// Read a [`TaggedFile`] from a path
///
/// NOTE: The format is guessed from the content, the extension is never considered.
///
/// # Errors
///
/// * `path` does not exist
/// * See [`read_from`]
pub fn read_from_path<P>(path: P, parse_options: ParseOptions) -> Result<TaggedFile>
where
	P: AsRef<Path>,
{
	let file = File::open(path)?;
	read_from(&mut BufReader::new(file), parse_options)
}

fn guess_file_type<R>(reader: &mut R) -> Result<Option<FileType>>
where
	R: Read + Seek,
{
	let start = reader.stream_position()?;

	let mut buf = Vec::with_capacity(GUESS_BUFFER_SIZE as usize);
	reader.by_ref().take(GUESS_BUFFER_SIZE).read_to_end(&mut buf)?;
	reader.seek(SeekFrom::Start(start))?;

	let guess = FileType::from_buffer(&buf);
	if !buf.starts_with(b"ID3") || guess != Some(FileType::Mpeg) {
		return Ok(guess);
	}

	// The tag may be larger than the buffer, check what follows it
	let skip_tag = ParseOptions::new().read_tags(false);
	let tag_size = match find_id3v2(reader, skip_tag) {
		Ok((_, size)) => size,
		Err(e) => {
			log::debug!("Unable to skip the ID3v2 tag while guessing the file type: {e}");
			reader.seek(SeekFrom::Start(start))?;
			return Ok(guess);
		},
	};

	log::trace!("Checking the data following a {tag_size} byte ID3v2 tag");

	let mut following = Vec::with_capacity(8);
	reader.by_ref().take(8).read_to_end(&mut following)?;
	reader.seek(SeekFrom::Start(start))?;

	match FileType::quick_type_guess(&following) {
		Some(FileType::Flac) => Ok(Some(FileType::Flac)),
		_ => Ok(guess),
	}
}
