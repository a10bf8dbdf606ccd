use super::frame::read::{FrameCursor, ParsedFrame};
use super::header::{Id3v2Header, Id3v2Version};
use super::tag::Id3v2Tag;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::v2::util::synchsafe::UnsynchronizedStream;

use std::io::{Read, Seek, SeekFrom};

/// Read an ID3v2 tag from the current position of `reader`
///
/// If the reader isn't positioned at a tag (or fewer than 10 bytes remain), this returns `Ok(None)`
/// and the reader is left where it started. Otherwise, the reader is left just past the tag,
/// including its padding and footer.
///
/// # Errors
///
/// * The tag header is invalid, see [`Id3v2Header::parse`]
/// * A frame fails to decode (frames with invalid IDs are only an error in [`ParsingMode::Strict`])
///
/// [`ParsingMode::Strict`]: crate::config::ParsingMode::Strict
///
/// # Examples
///
/// ```rust
/// use tagwalk::config::ParseOptions;
/// use tagwalk::id3::v2::read_id3v2;
///
/// # fn main() -> tagwalk::error::Result<()> {
/// let mut reader = std::io::Cursor::new(b"not an ID3v2 tag".to_vec());
///
/// let tag = read_id3v2(&mut reader, ParseOptions::new())?;
/// assert!(tag.is_none());
/// assert_eq!(reader.position(), 0);
/// # Ok(()) }
/// ```
pub fn read_id3v2<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<Id3v2Tag>>
where
	R: Read + Seek,
{
	let Some(header) = find_id3v2_header(reader, parse_options.parsing_mode)? else {
		return Ok(None);
	};

	let footer = header.flags.footer;

	let tag = parse_id3v2(reader, header, parse_options)?;

	if footer {
		log::trace!("Skipping ID3v2 footer");
		reader.seek(SeekFrom::Current(10))?;
	}

	Ok(Some(tag))
}

/// Parse the ID3v2 header at the current position, if there is one
///
/// When no tag is found, the reader is restored to where it started.
pub(crate) fn find_id3v2_header<R>(reader: &mut R, parse_mode: ParsingMode) -> Result<Option<Id3v2Header>>
where
	R: Read + Seek,
{
	let start = reader.stream_position()?;

	let mut magic = Vec::with_capacity(10);
	reader.by_ref().take(10).read_to_end(&mut magic)?;
	reader.seek(SeekFrom::Start(start))?;

	if magic.len() < 10 || &magic[..3] != b"ID3" {
		log::trace!("No ID3v2 tag found at {start}");
		return Ok(None);
	}

	Id3v2Header::parse(reader, parse_mode).map(Some)
}

/// Read the frames following an already parsed header
pub(crate) fn parse_id3v2<R>(
	reader: &mut R,
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag>
where
	R: Read,
{
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	let mut cursor = FrameCursor {
		version: header.version,
		tag_size: header.size,
		// Measured from the start of the tag header
		offset: 10 + u64::from(header.extended_header_size()),
	};

	let mut tag_bytes = reader.take(u64::from(header.frames_size()));
	let mut tag = Id3v2Tag::new(header.clone());

	// ID3v2.4 unsynchronises individual frames instead
	if header.flags.unsynchronisation && header.version < Id3v2Version::V4 {
		let mut unsynchronized_reader = UnsynchronizedStream::new(&mut tag_bytes);
		read_all_frames_into_tag(&mut unsynchronized_reader, &mut cursor, &mut tag, parse_options)?;
	} else {
		read_all_frames_into_tag(&mut tag_bytes, &mut cursor, &mut tag, parse_options)?;
	}

	// Throw away the rest of the tag (padding, bad frames)
	std::io::copy(&mut tag_bytes, &mut std::io::sink())?;
	Ok(tag)
}

fn read_all_frames_into_tag<R>(
	reader: &mut R,
	cursor: &mut FrameCursor,
	tag: &mut Id3v2Tag,
	parse_options: ParseOptions,
) -> Result<()>
where
	R: Read,
{
	loop {
		match ParsedFrame::read(reader, cursor, parse_options)? {
			ParsedFrame::Next(header, frame) => tag.insert(header, frame),
			// Skipped due to an error, or the options, but we can expect more frames
			ParsedFrame::Skip => {},
			// Padding, or the end of the tag
			ParsedFrame::Eof => break,
		}
	}

	Ok(())
}
