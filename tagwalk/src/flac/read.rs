use super::FlacFile;
use super::block::{BLOCK_ID_PICTURE, BLOCK_ID_STREAMINFO, BLOCK_ID_VORBIS_COMMENTS, Block};
use super::properties::{self, FlacProperties, FlacStreamInfo};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::find_id3v2;
use crate::macros::{decode_err, err};
use crate::ogg::VorbisComments;
use crate::picture::Picture;

use std::io::{Read, Seek, SeekFrom};

pub(super) fn verify_flac<R>(data: &mut R) -> Result<()>
where
	R: Read + Seek,
{
	let mut marker = [0; 4];
	data.read_exact(&mut marker)?;

	if &marker != b"fLaC" {
		err!(MagicMismatch("FLAC"));
	}

	log::debug!("File verified to be FLAC");
	Ok(())
}

pub(super) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<FlacFile>
where
	R: Read + Seek,
{
	let mut flac_file = FlacFile {
		stream_info: None,
		vorbis_comments: None,
		pictures: Vec::new(),
		properties: FlacProperties::default(),
	};

	// It is possible for a FLAC file to contain an ID3v2 tag, it is never read
	let skip_id3v2 = ParseOptions {
		read_tags: false,
		..parse_options
	};
	let (_, id3v2_size) = find_id3v2(data, skip_id3v2)?;
	if id3v2_size > 0 {
		log::warn!("Skipped an ID3v2 tag ({id3v2_size} bytes) preceding the FLAC stream");
	}

	verify_flac(data)?;

	let parse_mode = parse_options.parsing_mode;

	let mut last_block = false;
	while !last_block {
		let block = Block::read(data, |block_type| match block_type {
			BLOCK_ID_STREAMINFO => true,
			BLOCK_ID_VORBIS_COMMENTS => parse_options.read_tags,
			BLOCK_ID_PICTURE => parse_options.read_cover_art,
			_ => false,
		})?;

		last_block = block.last;

		match block.ty {
			BLOCK_ID_STREAMINFO => {
				if flac_file.stream_info.is_some() && parse_mode == ParsingMode::Strict {
					decode_err!(@BAIL Flac, "Streams are only allowed one STREAMINFO block");
				}

				flac_file.stream_info = Some(FlacStreamInfo::parse(&block.content)?);
			},
			BLOCK_ID_VORBIS_COMMENTS if parse_options.read_tags => {
				log::debug!("Encountered a Vorbis Comments block, parsing");

				// There should only be one, otherwise the latest block wins
				if flac_file.vorbis_comments.is_some() && parse_mode == ParsingMode::Strict {
					decode_err!(@BAIL Flac, "Streams are only allowed one Vorbis Comments block per stream");
				}

				flac_file.vorbis_comments = Some(VorbisComments::parse(&block.content, parse_options)?);
			},
			BLOCK_ID_PICTURE if parse_options.read_cover_art => {
				log::debug!("Encountered a FLAC picture block, parsing");

				match Picture::from_flac_bytes(&block.content, false) {
					Ok(picture) => flac_file.pictures.push(picture),
					Err(e) => {
						if parse_mode == ParsingMode::Strict {
							return Err(e);
						}

						log::warn!("Unable to read FLAC picture block, discarding");
					},
				}
			},
			ty => log::trace!("Skipped FLAC block, type: {ty}, size: {}", block.len),
		}
	}

	if !parse_options.read_properties {
		return Ok(flac_file);
	}

	let Some(stream_info) = &flac_file.stream_info else {
		if parse_mode == ParsingMode::Strict {
			decode_err!(@BAIL Flac, "File missing mandatory STREAMINFO block");
		}

		log::warn!("FLAC: No STREAMINFO block found, unable to read properties");
		return Ok(flac_file);
	};

	let stream_length = {
		let current = data.stream_position()?;
		let end = data.seek(SeekFrom::End(0))?;

		// In the event that a block lies about its size, the current position could be
		// completely wrong.
		if current > end {
			err!(SizeMismatch);
		}

		end - current
	};

	flac_file.properties = properties::read_properties(stream_info, stream_length);

	Ok(flac_file)
}
