use super::header::{FrameHeader, Layer, search_for_frame_sync};
use super::xing::{XingHeader, XingId};
use super::{MpegFile, properties};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::find_id3v2;
use crate::id3::v1::read::ID3V1_TAG_SIZE;
use crate::id3::v1::read_id3v1;
use crate::macros::decode_err;
use crate::util::io::{ReadExt, SeekStreamLen};

use std::io::{Read, Seek, SeekFrom};

pub(super) fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<MpegFile>
where
	R: Read + Seek,
{
	let (id3v2, id3v2_size) = find_id3v2(reader, parse_options)?;

	let Some(header_data) = search_for_frame_sync(reader)? else {
		decode_err!(@BAIL Mpeg, "File contains no frame sync");
	};

	let header = FrameHeader::parse(header_data);
	log::debug!(
		"MPEG: Found frame header, version: {:?}, layer: {:?}",
		header.version,
		header.layer
	);

	let xing = match header.layer {
		Layer::Layer3 => find_xing_header(reader, header)?,
		_ => None,
	};

	let id3v1 = read_id3v1(reader)?;

	let mut file = MpegFile {
		id3v2,
		id3v1: None,
		header,
		xing,
		properties: Default::default(),
	};

	if parse_options.read_properties {
		let id3v1_size = if id3v1.is_some() { ID3V1_TAG_SIZE } else { 0 };
		let audio_size = reader
			.stream_len_hack()?
			.saturating_sub(id3v2_size + id3v1_size);

		file.properties = properties::read_properties(header, file.xing.as_ref(), audio_size);
	}

	if parse_options.read_tags {
		file.id3v1 = id3v1;
	}

	Ok(file)
}

// Expects the reader to be positioned right after the frame header
fn find_xing_header<R>(reader: &mut R, header: FrameHeader) -> Result<Option<XingHeader>>
where
	R: Read + Seek,
{
	if header.protected {
		let mut crc = [0; 2];
		reader.read_exact(&mut crc)?;
	}

	let side_information = reader.read_vec(header.side_information_len())?;

	let mut marker = [0; 4];
	reader.read_exact(&mut marker)?;

	if XingId::from_bytes(marker).is_some() {
		reader.seek(SeekFrom::Current(-4))?;
		return XingHeader::read(reader).map(Some);
	}

	// Some encoders start the Xing header 2 bytes early, overlapping the side information
	if let [.., a, b] = side_information[..] {
		if XingId::from_bytes([a, b, marker[0], marker[1]]).is_some() {
			log::debug!("MPEG: Found a misplaced Xing header");

			reader.seek(SeekFrom::Current(-6))?;
			return XingHeader::read(reader).map(Some);
		}
	}

	Ok(None)
}
