use super::atom::{find_atom, read_atoms};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::file::FileSubtype;
use crate::macros::err;
use crate::util::io::take_bytes;

use std::io::Cursor;
use std::time::Duration;

use byteorder::{BigEndian, ByteOrder};

/// The contents of an `ftyp` atom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ftyp {
	/// The major brand, such as `"M4A "`
	pub major_brand: [u8; 4],
	/// The version of the major brand
	pub minor_version: u32,
	/// Every compatible brand
	pub compatible_brands: Vec<[u8; 4]>,
}

impl Ftyp {
	pub(crate) fn parse(data: &[u8]) -> Result<Self> {
		if data.len() < 8 {
			err!(InvalidFieldEncoding("ftyp"));
		}

		let major_brand = [data[0], data[1], data[2], data[3]];
		let minor_version = BigEndian::read_u32(&data[4..8]);

		// Incomplete groups are ignored
		let compatible_brands = data[8..]
			.chunks_exact(4)
			.map(|brand| [brand[0], brand[1], brand[2], brand[3]])
			.collect();

		Ok(Self {
			major_brand,
			minor_version,
			compatible_brands,
		})
	}

	/// The file subtype implied by the major brand
	pub fn subtype(&self) -> FileSubtype {
		match &self.major_brand {
			b"M4A " => FileSubtype::M4a,
			b"M4B " => FileSubtype::M4b,
			b"M4P " => FileSubtype::M4p,
			_ => FileSubtype::Unknown,
		}
	}
}

/// The timing information of an `mvhd` atom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieHeader {
	/// The atom version, which decides the size of the fields
	pub version: u8,
	/// The number of time units in a second
	pub time_scale: u32,
	/// The duration, in time units
	pub duration: u64,
}

impl MovieHeader {
	pub(crate) fn parse(data: &[u8]) -> Result<Self> {
		let Some(&version) = data.first() else {
			err!(InvalidFieldEncoding("mvhd"));
		};

		// Version 1 has 64 bit creation/modification times and duration
		let (time_scale, duration) = match version {
			1 => {
				if data.len() < 32 {
					err!(InvalidFieldEncoding("mvhd"));
				}

				(
					BigEndian::read_u32(&data[20..24]),
					BigEndian::read_u64(&data[24..32]),
				)
			},
			_ => {
				if data.len() < 20 {
					err!(InvalidFieldEncoding("mvhd"));
				}

				(
					BigEndian::read_u32(&data[12..16]),
					u64::from(BigEndian::read_u32(&data[16..20])),
				)
			},
		};

		Ok(Self {
			version,
			time_scale,
			duration,
		})
	}

	/// The duration of the movie
	///
	/// This is zero if the time scale is zero.
	pub fn duration(&self) -> Duration {
		if self.time_scale == 0 {
			return Duration::ZERO;
		}

		Duration::from_secs_f64(self.duration as f64 / f64::from(self.time_scale))
	}
}

/// The version 1 extension of a sound sample description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct SoundDescriptionV1 {
	pub samples_per_packet: u32,
	pub bytes_per_packet: u32,
	pub bytes_per_frame: u32,
	pub bytes_per_sample: u32,
}

/// The sound sample description of an `mp4a` atom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mp4aDescription {
	/// The sample description version (0, 1 or 2)
	pub version: u16,
	/// The revision level, usually 0
	pub revision: u16,
	/// The vendor of the encoder
	pub vendor: u32,
	/// Channel count
	pub channels: u32,
	/// Sample size in bits, only present in versions 0 and 1
	pub sample_size: Option<u16>,
	/// Sample rate (Hz)
	pub sample_rate: u32,
	/// Only present in version 1
	pub v1: Option<SoundDescriptionV1>,
}

impl Mp4aDescription {
	/// Parse the description, and the `esds` atom following it
	pub(crate) fn parse(
		data: &[u8],
		parse_mode: ParsingMode,
	) -> Result<(Self, Option<EsdsDescriptor>)> {
		if data.len() < 28 {
			err!(InvalidFieldEncoding("mp4a"));
		}

		let version = BigEndian::read_u16(&data[8..10]);
		let revision = BigEndian::read_u16(&data[10..12]);
		let vendor = BigEndian::read_u32(&data[12..16]);

		let mut description = Self {
			version,
			revision,
			vendor,
			channels: 0,
			sample_size: None,
			sample_rate: 0,
			v1: None,
		};

		let children_start = match version {
			0 | 1 => {
				description.channels = u32::from(BigEndian::read_u16(&data[16..18]));
				description.sample_size = Some(BigEndian::read_u16(&data[18..20]));
				// 16.16 fixed point, only the integer part is kept
				description.sample_rate = BigEndian::read_u32(&data[24..28]) >> 16;

				if version == 0 {
					28
				} else {
					if data.len() < 44 {
						err!(InvalidFieldEncoding("mp4a"));
					}

					description.v1 = Some(SoundDescriptionV1 {
						samples_per_packet: BigEndian::read_u32(&data[28..32]),
						bytes_per_packet: BigEndian::read_u32(&data[32..36]),
						bytes_per_frame: BigEndian::read_u32(&data[36..40]),
						bytes_per_sample: BigEndian::read_u32(&data[40..44]),
					});

					44
				}
			},
			2 => {
				if data.len() < 64 {
					err!(InvalidFieldEncoding("mp4a"));
				}

				description.sample_rate = BigEndian::read_f64(&data[32..40]) as u32;
				description.channels = BigEndian::read_i32(&data[40..44]).max(0) as u32;
				64
			},
			_ => err!(UnsupportedVersion("mp4a", u32::from(version))),
		};

		log::debug!(
			"Found mp4a version {version}, sample rate: {}, channels: {}",
			description.sample_rate,
			description.channels
		);

		let children = &data[children_start..];
		let atoms = read_atoms(&mut Cursor::new(children), children.len() as u64, parse_mode)?;

		let esds = match find_atom(&atoms, b"esds").and_then(|esds| esds.data()) {
			Some(esds) => Some(EsdsDescriptor::parse(esds)?),
			None => None,
		};

		Ok((description, esds))
	}
}

const ES_DESCRIPTOR_TAG: u8 = 0x03;
const DECODER_CONFIG_TAG: u8 = 0x04;
const DECODER_SPECIFIC_TAG: u8 = 0x05;
const SL_CONFIG_TAG: u8 = 0x06;

/// The elementary stream descriptor of an `esds` atom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsdsDescriptor {
	/// The object type of the stream (ex. `0x40` for MPEG-4 audio)
	pub object_type: u8,
	/// The stream type (ex. `0x05` for audio)
	pub stream_type: u8,
	/// The size of the decoding buffer
	pub buffer_size: u32,
	/// The maximum bitrate (bps)
	pub max_bitrate: u32,
	/// The average bitrate (bps), 0 for variable bitrate streams
	pub average_bitrate: u32,
	/// The decoder specific info, such as an AAC `AudioSpecificConfig`
	pub decoder_specific_info: Vec<u8>,
}

impl EsdsDescriptor {
	pub(crate) fn parse(data: &[u8]) -> Result<Self> {
		let mut content = data;

		// Version (1) + flags (3)
		take_bytes(&mut content, 4, "esds")?;

		// ES ID (2) + stream priority (1)
		read_descriptor_header(&mut content, ES_DESCRIPTOR_TAG)?;
		take_bytes(&mut content, 3, "esds")?;

		read_descriptor_header(&mut content, DECODER_CONFIG_TAG)?;
		let decoder_config = take_bytes(&mut content, 13, "esds decoder config")?;
		let object_type = decoder_config[0];
		let stream_type = decoder_config[1] >> 2;
		let buffer_size = BigEndian::read_u24(&decoder_config[2..5]);
		let max_bitrate = BigEndian::read_u32(&decoder_config[5..9]);
		let average_bitrate = BigEndian::read_u32(&decoder_config[9..13]);

		let info_len = read_descriptor_header(&mut content, DECODER_SPECIFIC_TAG)?;
		let decoder_specific_info =
			take_bytes(&mut content, usize::from(info_len), "esds decoder specific info")?.to_vec();

		let sl_config_len = read_descriptor_header(&mut content, SL_CONFIG_TAG)?;
		take_bytes(&mut content, usize::from(sl_config_len), "esds SL config")?;

		Ok(Self {
			object_type,
			stream_type,
			buffer_size,
			max_bitrate,
			average_bitrate,
			decoder_specific_info,
		})
	}

	/// The average bitrate, falling back to the maximum for variable bitrate streams
	pub fn bitrate(&self) -> u32 {
		match self.average_bitrate {
			0 => self.max_bitrate,
			average => average,
		}
	}
}

// Reads a descriptor tag and its length, returning the length
//
// The length can be preceded by the 3 byte extended length marker (0x80 0x80 0x80)
fn read_descriptor_header(content: &mut &[u8], expected_tag: u8) -> Result<u8> {
	let tag = take_bytes(content, 1, "esds descriptor tag")?[0];
	if tag != expected_tag {
		log::debug!("Expected esds descriptor {expected_tag:#04x}, found {tag:#04x}");
		err!(InvalidFieldEncoding("esds descriptor tag"));
	}

	if content.starts_with(&[0x80, 0x80, 0x80]) {
		*content = &content[3..];
	}

	Ok(take_bytes(content, 1, "esds descriptor length")?[0])
}

/// An MP4 file's audio properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct Mp4Properties {
	pub(crate) duration: Duration,
	pub(crate) average_bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) channels: u32,
}

impl Mp4Properties {
	/// Duration of the audio
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Average bitrate (bps)
	pub fn average_bitrate(&self) -> u32 {
		self.average_bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Channel count
	pub fn channels(&self) -> u32 {
		self.channels
	}
}

pub(super) fn read_properties(
	movie_header: Option<&MovieHeader>,
	audio: Option<&Mp4aDescription>,
	esds: Option<&EsdsDescriptor>,
) -> Mp4Properties {
	Mp4Properties {
		duration: movie_header.map_or(Duration::ZERO, MovieHeader::duration),
		average_bitrate: esds.map_or(0, EsdsDescriptor::bitrate),
		sample_rate: audio.map_or(0, |audio| audio.sample_rate),
		channels: audio.map_or(0, |audio| audio.channels),
	}
}

#[cfg(test)]
pub(crate) mod test_utils {
	use crate::mp4::atom::test_utils::atom;

	pub(crate) fn esds(max_bitrate: u32, average_bitrate: u32, extended: bool) -> Vec<u8> {
		let marker: &[u8] = if extended { &[0x80, 0x80, 0x80] } else { &[] };

		let mut content = vec![0; 4];
		content.push(0x03);
		content.extend(marker);
		content.extend([25, 0, 1, 0]);

		content.push(0x04);
		content.extend(marker);
		content.extend([17, 0x40, 0x15, 0, 0x18, 0]);
		content.extend(max_bitrate.to_be_bytes());
		content.extend(average_bitrate.to_be_bytes());

		content.push(0x05);
		content.extend(marker);
		content.extend([2, 0x12, 0x10]);

		content.push(0x06);
		content.extend(marker);
		content.extend([1, 0x02]);

		atom(b"esds", &content)
	}

	pub(crate) fn mp4a_v0(channels: u16, sample_rate: u16, esds: &[u8]) -> Vec<u8> {
		let mut content = vec![0; 16];
		content.extend(channels.to_be_bytes());
		content.extend(16_u16.to_be_bytes());
		content.extend([0; 4]);
		content.extend(sample_rate.to_be_bytes());
		content.extend([0; 2]);
		content.extend(esds);

		atom(b"mp4a", &content)
	}
}
