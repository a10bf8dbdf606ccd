use crate::error::Result;
use crate::macros::err;

use std::time::Duration;

use byteorder::{BigEndian, ByteOrder};

const STREAMINFO_LEN: usize = 34;

/// The contents of a FLAC `STREAMINFO` block
///
/// See <https://xiph.org/flac/format.html#metadata_block_streaminfo>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct FlacStreamInfo {
	/// The minimum block size (in samples)
	pub min_block_size: u16,
	/// The maximum block size (in samples)
	pub max_block_size: u16,
	/// The minimum frame size (in bytes), 0 if unknown
	pub min_frame_size: u32,
	/// The maximum frame size (in bytes), 0 if unknown
	pub max_frame_size: u32,
	/// Sample rate (Hz)
	pub sample_rate: u32,
	/// Channel count
	pub channels: u8,
	/// Bits per sample
	pub bits_per_sample: u8,
	/// Total samples per channel, 0 if unknown
	pub total_samples: u64,
	/// MD5 signature of the unencoded audio data
	pub md5_signature: [u8; 16],
}

impl FlacStreamInfo {
	pub(crate) fn parse(block: &[u8]) -> Result<Self> {
		if block.len() < STREAMINFO_LEN {
			log::debug!("FLAC: STREAMINFO block is only {} bytes", block.len());
			err!(InvalidFieldEncoding("STREAMINFO"));
		}

		// Sample rate (20 bits)
		// Number of channels - 1 (3 bits)
		// Bits per sample - 1 (5 bits)
		// Total samples (36 bits)
		let sample_rate = BigEndian::read_u24(&block[10..13]) >> 4;
		let channels = ((block[12] >> 1) & 7) + 1;
		let bits_per_sample = ((block[12] & 1) << 4) + (block[13] >> 4) + 1;
		let total_samples =
			(u64::from(block[13] & 0x0F) << 32) | u64::from(BigEndian::read_u32(&block[14..18]));

		let mut md5_signature = [0; 16];
		md5_signature.copy_from_slice(&block[18..34]);

		Ok(Self {
			min_block_size: BigEndian::read_u16(&block[..2]),
			max_block_size: BigEndian::read_u16(&block[2..4]),
			min_frame_size: BigEndian::read_u24(&block[4..7]),
			max_frame_size: BigEndian::read_u24(&block[7..10]),
			sample_rate,
			channels,
			bits_per_sample,
			total_samples,
			md5_signature,
		})
	}
}

/// A FLAC file's audio properties
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct FlacProperties {
	pub(crate) duration: Duration,
	pub(crate) average_bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) bit_depth: u8,
	pub(crate) channels: u8,
}

impl FlacProperties {
	/// Duration of the audio
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Average bitrate of the audio frames (bps)
	pub fn average_bitrate(&self) -> u32 {
		self.average_bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Bits per sample (usually 16 or 24 bit)
	pub fn bit_depth(&self) -> u8 {
		self.bit_depth
	}

	/// Channel count
	pub fn channels(&self) -> u8 {
		self.channels
	}
}

// `stream_length` is the number of bytes following the metadata blocks
pub(super) fn read_properties(stream_info: &FlacStreamInfo, stream_length: u64) -> FlacProperties {
	let mut properties = FlacProperties {
		sample_rate: stream_info.sample_rate,
		bit_depth: stream_info.bits_per_sample,
		channels: stream_info.channels,
		..FlacProperties::default()
	};

	if stream_info.sample_rate == 0 {
		log::warn!("FLAC: Sample rate = 0, unable to calculate length");
		return properties;
	}

	properties.duration = Duration::from_secs_f64(
		stream_info.total_samples as f64 / f64::from(stream_info.sample_rate),
	);

	let length = properties.duration.as_millis();
	if length > 0 {
		properties.average_bitrate = (u128::from(stream_length) * 8 * 1000 / length) as u32;
	}

	properties
}
