use super::constants::{BITRATES, SAMPLE_RATES, SAMPLES};

use std::io::Read;

pub(crate) fn verify_frame_sync(frame_sync: [u8; 2]) -> bool {
	frame_sync[0] == 0xFF && frame_sync[1] & 0xE0 == 0xE0
}

/// Search for the next frame sync (11 set bits) in the reader
///
/// The search moves through a 4 byte window, only keeping the bytes that could still start a
/// frame sync. On success, the reader is positioned right after the 4 byte frame header, and the
/// header is returned.
///
/// Reaching the end of the stream is not an error, this will return `None`.
///
/// # Errors
///
/// * Any error other than `UnexpectedEof` while reading
///
/// # Examples
///
/// ```rust
/// use tagwalk::mpeg::search_for_frame_sync;
///
/// # fn main() -> std::io::Result<()> {
/// let mut reader = &[0x00, 0x01, 0xFF, 0xFB, 0x90, 0x64, 0xAA][..];
///
/// assert_eq!(search_for_frame_sync(&mut reader)?, Some(0xFFFB_9064));
/// assert_eq!(reader, &[0xAA]);
/// # Ok(()) }
/// ```
pub fn search_for_frame_sync<R>(reader: &mut R) -> std::io::Result<Option<u32>>
where
	R: Read,
{
	let mut buffer = [0; 4];
	let mut filled = 0;

	loop {
		match reader.read_exact(&mut buffer[filled..]) {
			Ok(()) => {},
			Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
			Err(e) => return Err(e),
		}

		if verify_frame_sync([buffer[0], buffer[1]]) {
			return Ok(Some(u32::from_be_bytes(buffer)));
		}

		// Keep everything from the next 0xFF onwards, it may start a frame sync
		match buffer[1..].iter().position(|&b| b == 0xFF) {
			Some(pos) => {
				let start = pos + 1;
				buffer.copy_within(start.., 0);
				filled = buffer.len() - start;
			},
			None => filled = 0,
		}
	}
}

/// MPEG Audio version
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[allow(missing_docs)]
pub enum MpegVersion {
	#[default]
	V1,
	V2,
	V2_5,
	Reserved,
}

/// MPEG layer
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Layer {
	Layer1,
	Layer2,
	#[default]
	Layer3,
	Reserved,
}

/// Channel mode
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[allow(missing_docs)]
pub enum ChannelMode {
	#[default]
	Stereo,
	JointStereo,
	/// Two independent mono channels
	DualChannel,
	SingleChannel,
}

/// A rarely-used decoder hint that the file must be de-emphasized
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[allow(missing_docs, non_camel_case_types)]
pub enum Emphasis {
	/// 50/15 ms
	MS5015,
	Reserved,
	/// CCIT J.17
	CCIT_J17,
}

/// The bitrate of a frame
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Bitrate {
	/// The free format, the bitrate isn't stored in the header
	Free,
	/// A known bitrate, in kbps
	Kbps(u32),
	/// The bitrate index is invalid, or the version or layer is reserved
	Bad,
}

/// An MPEG frame header
///
/// No field is validated, reserved values are kept as-is. Lookups that depend on them (ex.
/// [`FrameHeader::sample_rate`]) report the problem instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHeader {
	/// MPEG version
	pub version: MpegVersion,
	/// MPEG layer
	pub layer: Layer,
	/// Whether a 16 bit CRC follows the header
	pub protected: bool,
	/// Index into the bitrate table
	pub bitrate_index: u8,
	/// Index into the sample rate table
	pub sample_rate_index: u8,
	/// Whether the frame has an extra slot of padding
	pub padded: bool,
	/// The private bit, free for application use
	pub private: bool,
	/// Channel mode
	pub channel_mode: ChannelMode,
	/// A channel mode extension, specifically for [`ChannelMode::JointStereo`]
	pub mode_extension: Option<u8>,
	/// Whether the audio is copyrighted
	pub copyright: bool,
	/// Whether the media is original or a copy
	pub original: bool,
	/// See [`Emphasis`]
	pub emphasis: Option<Emphasis>,
}

impl FrameHeader {
	/// Decode a header from its 32 bit big endian word
	///
	/// The frame sync itself isn't checked, see [`search_for_frame_sync`].
	pub fn parse(data: u32) -> Self {
		let version = match (data >> 19) & 0b11 {
			0b00 => MpegVersion::V2_5,
			0b10 => MpegVersion::V2,
			0b11 => MpegVersion::V1,
			_ => MpegVersion::Reserved,
		};

		let layer = match (data >> 17) & 0b11 {
			0b01 => Layer::Layer3,
			0b10 => Layer::Layer2,
			0b11 => Layer::Layer1,
			_ => Layer::Reserved,
		};

		let channel_mode = match (data >> 6) & 0b11 {
			0b00 => ChannelMode::Stereo,
			0b01 => ChannelMode::JointStereo,
			0b10 => ChannelMode::DualChannel,
			_ => ChannelMode::SingleChannel,
		};

		let mode_extension =
			(channel_mode == ChannelMode::JointStereo).then_some(((data >> 4) & 0b11) as u8);

		let emphasis = match data & 0b11 {
			0b00 => None,
			0b01 => Some(Emphasis::MS5015),
			0b10 => Some(Emphasis::Reserved),
			_ => Some(Emphasis::CCIT_J17),
		};

		Self {
			version,
			layer,
			protected: (data >> 16) & 1 == 0,
			bitrate_index: ((data >> 12) & 0xF) as u8,
			sample_rate_index: ((data >> 10) & 0b11) as u8,
			padded: (data >> 9) & 1 == 1,
			private: (data >> 8) & 1 == 1,
			channel_mode,
			mode_extension,
			copyright: (data >> 3) & 1 == 1,
			original: (data >> 2) & 1 == 1,
			emphasis,
		}
	}

	fn version_index(self) -> Option<usize> {
		match self.version {
			MpegVersion::V1 => Some(0),
			MpegVersion::V2 | MpegVersion::V2_5 => Some(1),
			MpegVersion::Reserved => None,
		}
	}

	fn layer_index(self) -> Option<usize> {
		match self.layer {
			Layer::Layer1 => Some(0),
			Layer::Layer2 => Some(1),
			Layer::Layer3 => Some(2),
			Layer::Reserved => None,
		}
	}

	/// The bitrate of the frame
	pub fn bitrate(self) -> Bitrate {
		let (Some(version), Some(layer)) = (self.version_index(), self.layer_index()) else {
			return Bitrate::Bad;
		};

		match self.bitrate_index {
			0 => Bitrate::Free,
			15 => Bitrate::Bad,
			index => Bitrate::Kbps(BITRATES[version][layer][usize::from(index)]),
		}
	}

	/// The sample rate, in Hz
	///
	/// This is `None` for a reserved version or sample rate index.
	pub fn sample_rate(self) -> Option<u32> {
		let version = match self.version {
			MpegVersion::V1 => 0,
			MpegVersion::V2 => 1,
			MpegVersion::V2_5 => 2,
			MpegVersion::Reserved => return None,
		};

		SAMPLE_RATES[version]
			.get(usize::from(self.sample_rate_index))
			.copied()
	}

	/// The number of samples in each frame
	///
	/// This is 0 for a reserved version or layer.
	pub fn samples_per_frame(self) -> u32 {
		match (self.version_index(), self.layer_index()) {
			(Some(version), Some(layer)) => SAMPLES[version][layer],
			_ => 0,
		}
	}

	/// The length of the Layer III side information following the header (and CRC)
	pub fn side_information_len(self) -> usize {
		match (self.version, self.channel_mode) {
			(MpegVersion::Reserved, _) => 0,
			(MpegVersion::V1, ChannelMode::SingleChannel) => 17,
			(MpegVersion::V1, _) => 32,
			(_, ChannelMode::SingleChannel) => 9,
			_ => 17,
		}
	}

	/// The number of channels
	pub fn channels(self) -> u8 {
		match self.channel_mode {
			ChannelMode::SingleChannel => 1,
			_ => 2,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{Bitrate, ChannelMode, Emphasis, FrameHeader, Layer, MpegVersion, search_for_frame_sync};

	#[test_log::test]
	fn frame_sync_search() {
		fn test(data: &[u8], expected: u32, remaining: &[u8]) {
			let mut reader = data;
			assert_eq!(search_for_frame_sync(&mut reader).unwrap(), Some(expected));
			assert_eq!(reader, remaining);
		}

		test(&[0xFF, 0xFB, 0x00, 0x00], 0xFFFB_0000, &[]);
		test(&[0x00, 0x00, 0x01, 0xFF, 0xFB, 0x52, 0xC4, 0x01], 0xFFFB_52C4, &[0x01]);
		// 0xFF followed by a byte without the remaining sync bits
		test(&[0xFF, 0x00, 0xFF, 0xE3, 0x10, 0x20], 0xFFE3_1020, &[]);
		// The first candidate wins
		test(&[0x00, 0xFF, 0xFF, 0xFA, 0x01, 0x02], 0xFFFF_FA01, &[0x02]);

		assert_eq!(search_for_frame_sync(&mut &[0x01, 0xFF][..]).unwrap(), None);
		assert_eq!(search_for_frame_sync(&mut &[][..]).unwrap(), None);
	}

	#[test_log::test]
	fn mpeg1_layer3() {
		// MPEG-1 Layer III, unprotected, 128 kbps, 44.1 kHz, joint stereo, original
		let header = FrameHeader::parse(0xFFFB_9064);

		assert_eq!(header.version, MpegVersion::V1);
		assert_eq!(header.layer, Layer::Layer3);
		assert!(!header.protected);
		assert_eq!(header.bitrate(), Bitrate::Kbps(128));
		assert_eq!(header.sample_rate(), Some(44100));
		assert_eq!(header.channel_mode, ChannelMode::JointStereo);
		assert_eq!(header.mode_extension, Some(2));
		assert!(header.original);
		assert_eq!(header.emphasis, None);
		assert_eq!(header.samples_per_frame(), 1152);
		assert_eq!(header.side_information_len(), 32);
	}

	#[test_log::test]
	fn mpeg2_mono() {
		// MPEG-2 Layer III, protected, 64 kbps, 22.05 kHz, mono, emphasis 50/15
		let header = FrameHeader::parse(0xFFF2_80C1);

		assert_eq!(header.version, MpegVersion::V2);
		assert!(header.protected);
		assert_eq!(header.bitrate(), Bitrate::Kbps(64));
		assert_eq!(header.sample_rate(), Some(22050));
		assert_eq!(header.channel_mode, ChannelMode::SingleChannel);
		assert_eq!(header.mode_extension, None);
		assert_eq!(header.emphasis, Some(Emphasis::MS5015));
		assert_eq!(header.samples_per_frame(), 576);
		assert_eq!(header.side_information_len(), 9);
		assert_eq!(header.channels(), 1);
	}

	#[test_log::test]
	fn sentinels() {
		// Free format
		assert_eq!(FrameHeader::parse(0xFFFB_0000).bitrate(), Bitrate::Free);
		// Bitrate index 15
		assert_eq!(FrameHeader::parse(0xFFFB_F000).bitrate(), Bitrate::Bad);
		// Reserved sample rate index
		assert_eq!(FrameHeader::parse(0xFFFB_9C00).sample_rate(), None);

		// Reserved version
		let header = FrameHeader::parse(0xFFEB_9000);
		assert_eq!(header.version, MpegVersion::Reserved);
		assert_eq!(header.bitrate(), Bitrate::Bad);
		assert_eq!(header.sample_rate(), None);
		assert_eq!(header.side_information_len(), 0);

		// Reserved layer
		let header = FrameHeader::parse(0xFFF9_9000);
		assert_eq!(header.layer, Layer::Reserved);
		assert_eq!(header.bitrate(), Bitrate::Bad);
		assert_eq!(header.samples_per_frame(), 0);
	}
}
