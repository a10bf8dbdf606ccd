use crate::error::Result;
use crate::macros::err;
use crate::ogg::constants::VORBIS_IDENT_HEAD;
use crate::ogg::verify_signature;

use std::io::{Read, Seek};
use std::time::Duration;

use byteorder::{ByteOrder, LittleEndian};
use ogg_pager::{CONTAINS_LAST_PAGE_OF_BITSTREAM, find_last_page};

// Version through the framing flag
const IDENTIFICATION_HEADER_LEN: usize = 23;

/// A Vorbis identification header
///
/// See <https://xiph.org/vorbis/doc/Vorbis_I_spec.html#x1-630004.2.2>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct VorbisIdentificationHeader {
	/// Vorbis version, always 0
	pub version: u32,
	/// Channel count
	pub channels: u8,
	/// Sample rate (Hz)
	pub sample_rate: u32,
	/// Maximum bitrate (bps)
	pub bitrate_maximum: i32,
	/// Nominal bitrate (bps)
	pub bitrate_nominal: i32,
	/// Minimum bitrate (bps)
	pub bitrate_minimum: i32,
	/// The short block size
	pub blocksize_0: u16,
	/// The long block size
	pub blocksize_1: u16,
}

impl VorbisIdentificationHeader {
	/// Parse the identification packet, including its `\x01vorbis` signature
	pub(crate) fn parse(packet: &[u8]) -> Result<Self> {
		verify_signature(packet, VORBIS_IDENT_HEAD)?;

		let Some(content) = packet[VORBIS_IDENT_HEAD.len()..].get(..IDENTIFICATION_HEADER_LEN)
		else {
			err!(InvalidFieldEncoding("Vorbis identification header"));
		};

		// Bits 0-3 and 4-7 are exponents of 2
		let blocksizes = content[21];

		Ok(Self {
			version: LittleEndian::read_u32(&content[..4]),
			channels: content[4],
			sample_rate: LittleEndian::read_u32(&content[5..9]),
			bitrate_maximum: LittleEndian::read_i32(&content[9..13]),
			bitrate_nominal: LittleEndian::read_i32(&content[13..17]),
			bitrate_minimum: LittleEndian::read_i32(&content[17..21]),
			blocksize_0: 1 << (blocksizes & 0x0F),
			blocksize_1: 1 << (blocksizes >> 4),
		})
	}

	/// Estimate the average bitrate
	///
	/// This is the nominal bitrate if it is set, otherwise the mean of the maximum and minimum.
	/// If only one of those is set, that one is used.
	pub fn average_bitrate(&self) -> u32 {
		let positive = |bitrate: i32| u32::try_from(bitrate).ok().filter(|b| *b > 0);

		if let Some(nominal) = positive(self.bitrate_nominal) {
			return nominal;
		}

		match (positive(self.bitrate_maximum), positive(self.bitrate_minimum)) {
			(Some(max), Some(min)) => ((u64::from(max) + u64::from(min)) / 2) as u32,
			(Some(bitrate), None) | (None, Some(bitrate)) => bitrate,
			(None, None) => 0,
		}
	}
}

/// An OGG Vorbis file's audio properties
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct VorbisProperties {
	pub(crate) duration: Duration,
	pub(crate) average_bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) channels: u8,
	pub(crate) total_samples: u64,
}

impl VorbisProperties {
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
	pub fn channels(&self) -> u8 {
		self.channels
	}

	/// The granule position of the last page, the total number of samples
	pub fn total_samples(&self) -> u64 {
		self.total_samples
	}
}

pub(in crate::ogg) fn read_properties<R>(
	data: &mut R,
	identification: &VorbisIdentificationHeader,
) -> Result<VorbisProperties>
where
	R: Read + Seek,
{
	let last_page = find_last_page(data)?;
	if last_page.header_type_flag() & CONTAINS_LAST_PAGE_OF_BITSTREAM == 0 {
		log::debug!(
			"Vorbis: Last page (sequence number {}) is not flagged as the end of the stream",
			last_page.sequence_number
		);
		err!(MalformedFinalPage);
	}

	let total_samples = last_page.abgp;

	let duration = if identification.sample_rate > 0 {
		Duration::from_secs_f64(total_samples as f64 / f64::from(identification.sample_rate))
	} else {
		log::warn!("Vorbis: Sample rate = 0, unable to calculate length");
		Duration::ZERO
	};

	Ok(VorbisProperties {
		duration,
		average_bitrate: identification.average_bitrate(),
		sample_rate: identification.sample_rate,
		channels: identification.channels,
		total_samples,
	})
}
