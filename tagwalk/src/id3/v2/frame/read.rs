use super::Frame;
use super::content::parse_content;
use super::header::{FrameHeader, header_len, parse_header};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::id3::v2::util::known_frames::is_known_frame;
use crate::id3::v2::util::synchsafe::{SynchsafeInteger, UnsynchronizedStream};
use crate::macros::err;
use crate::util::io::ReadExt;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

pub(crate) enum ParsedFrame {
	Next(FrameHeader, Frame),
	Skip,
	Eof,
}

/// Tracks how far into the frame region the reader is
pub(crate) struct FrameCursor {
	pub(crate) version: Id3v2Version,
	pub(crate) tag_size: u32,
	pub(crate) offset: u64,
}

impl ParsedFrame {
	pub(crate) fn read<R>(
		reader: &mut R,
		cursor: &mut FrameCursor,
		parse_options: ParseOptions,
	) -> Result<Self>
	where
		R: Read,
	{
		let version = cursor.version;

		let mut size = 0u32;
		let header = match parse_header(reader, version, &mut size) {
			Ok(None) => return Ok(Self::Eof),
			Ok(Some(header)) => header,
			Err(err) => match parse_options.parsing_mode {
				ParsingMode::Strict => return Err(err),
				ParsingMode::BestAttempt | ParsingMode::Relaxed => {
					log::warn!("Failed to read frame header, skipping: {}", err);

					cursor.offset += u64::from(header_len(version)) + u64::from(size);
					skip_frame(reader, size)?;
					return Ok(Self::Skip);
				},
			},
		};

		if size == 0 {
			log::debug!("Encountered a zero length frame, assuming padding");
			return Ok(Self::Eof);
		}

		cursor.offset += u64::from(header_len(version)) + u64::from(size);

		let id = header.id.as_str();
		if !is_known_frame(version, id) && cursor.offset > u64::from(cursor.tag_size) {
			log::debug!("Unknown frame \"{id}\" runs past the end of the tag, stopping");
			return Ok(Self::Eof);
		}

		let mut flags = header.flags;
		let mut size = size;
		match version {
			Id3v2Version::V2 => {},
			Id3v2Version::V3 => {
				if flags.compression {
					log::trace!("Reading decompressed size");
					size = consume(size, 4)?;
					flags.data_length_indicator = Some(reader.read_u32::<BigEndian>()?);
				}

				if let Some(enc) = flags.encryption.as_mut() {
					log::trace!("Reading encryption method symbol");
					size = consume(size, 1)?;
					*enc = reader.read_u8()?;
				}

				if let Some(group) = flags.grouping_identity.as_mut() {
					log::trace!("Reading group identifier");
					size = consume(size, 1)?;
					*group = reader.read_u8()?;
				}
			},
			Id3v2Version::V4 => {
				if let Some(group) = flags.grouping_identity.as_mut() {
					log::trace!("Reading group identifier");
					size = consume(size, 1)?;
					*group = reader.read_u8()?;
				}

				if let Some(enc) = flags.encryption.as_mut() {
					log::trace!("Reading encryption method symbol");
					size = consume(size, 1)?;
					*enc = reader.read_u8()?;
				}

				// Only read once, even if both flags are set
				if flags.compression || flags.data_length_indicator.is_some() {
					log::trace!("Reading data length indicator");
					size = consume(size, 4)?;
					flags.data_length_indicator = Some(reader.read_u32::<BigEndian>()?.unsynch());
				}
			},
		}

		let mut content = reader.read_vec(size as usize)?;

		if flags.unsynchronisation {
			let mut unsynchronized = Vec::with_capacity(content.len());
			UnsynchronizedStream::new(&content[..]).read_to_end(&mut unsynchronized)?;
			content = unsynchronized;
		}

		let header = FrameHeader { flags, ..header };

		if flags.encryption.is_some() {
			log::debug!("Frame \"{}\" is encrypted, keeping it as binary", header.id);
			return Ok(Self::Next(header, Frame::Binary(content)));
		}

		if flags.compression {
			match decompress(&content)? {
				Some(decompressed) => content = decompressed,
				None => return Ok(Self::Next(header, Frame::Binary(content))),
			}
		}

		let id = header.id.as_str();
		if !parse_options.read_cover_art && matches!(id, "APIC" | "PIC") {
			log::trace!("Skipping picture frame");
			return Ok(Self::Skip);
		}

		let frame = parse_content(id, &content, version, parse_options)?;
		Ok(Self::Next(header, frame))
	}
}

// Removes `len` bytes of flag data from the frame size
fn consume(size: u32, len: u32) -> Result<u32> {
	match size.checked_sub(len) {
		Some(remaining) => Ok(remaining),
		None => err!(InvalidFieldEncoding("frame size")),
	}
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(content: &[u8]) -> Result<Option<Vec<u8>>> {
	use crate::config::global_options;
	use crate::error::{Id3v2Error, Id3v2ErrorKind};

	let limit = global_options().allocation_limit as u64;

	let mut decompressed = Vec::new();
	flate2::read::ZlibDecoder::new(content)
		.take(limit + 1)
		.read_to_end(&mut decompressed)
		.map_err(|e| Id3v2Error::new(Id3v2ErrorKind::Decompression(e)))?;

	if decompressed.len() as u64 > limit {
		err!(TooMuchData);
	}

	Ok(Some(decompressed))
}

#[cfg(not(feature = "id3v2_compression_support"))]
#[allow(clippy::unnecessary_wraps)]
fn decompress(_: &[u8]) -> Result<Option<Vec<u8>>> {
	log::debug!("Encountered a compressed frame without compression support, keeping it as binary");
	Ok(None)
}

// The reader is restricted to the tag, so this can't run past it
fn skip_frame(reader: &mut impl Read, size: u32) -> Result<()> {
	log::trace!("Skipping frame of size {}", size);

	let mut reader = reader.take(u64::from(size));
	std::io::copy(&mut reader, &mut std::io::sink())?;

	Ok(())
}
