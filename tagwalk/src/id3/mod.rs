//! ID3 specific items
//!
//! ID3 does things differently than other tags, making working with them a little more effort than other formats.
//! Check the other modules for important notes and/or warnings.

pub mod v1;
pub mod v2;

use crate::config::ParseOptions;
use crate::error::Result;
use v2::Id3v2Tag;

use std::io::{Read, Seek, SeekFrom};

// Reads (or skips, if tags aren't wanted) an ID3v2 tag at the current position
//
// Returns the tag and the number of bytes it occupied. The reader is always left just past the tag.
pub(crate) fn find_id3v2<R>(
	reader: &mut R,
	parse_options: ParseOptions,
) -> Result<(Option<Id3v2Tag>, u64)>
where
	R: Read + Seek,
{
	if parse_options.read_tags {
		let tag = v2::read_id3v2(reader, parse_options)?;
		let size = tag.as_ref().map_or(0, Id3v2Tag::size);
		return Ok((tag, size));
	}

	let Some(header) = v2::read::find_id3v2_header(reader, parse_options.parsing_mode)? else {
		return Ok((None, 0));
	};

	log::debug!("Skipping ID3v2 tag");

	let footer = if header.flags.footer { 10 } else { 0 };
	reader.seek(SeekFrom::Current(i64::from(header.frames_size()) + footer))?;

	Ok((None, header.full_tag_size()))
}
