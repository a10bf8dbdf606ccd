use super::header::{Bitrate, FrameHeader};
use super::xing::{XingHeader, XingId};

use std::time::Duration;

/// An MPEG file's audio properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct MpegProperties {
	pub(crate) duration: Duration,
	pub(crate) average_bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) channels: u8,
}

impl MpegProperties {
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
}

// `audio_size` is the length of the stream without its tags, used whenever the Xing header
// doesn't know better.
pub(super) fn read_properties(
	header: FrameHeader,
	xing: Option<&XingHeader>,
	audio_size: u64,
) -> MpegProperties {
	let mut properties = MpegProperties {
		sample_rate: header.sample_rate().unwrap_or(0),
		channels: header.channels(),
		..MpegProperties::default()
	};

	let Some(sample_rate) = header.sample_rate() else {
		log::warn!("MPEG: Frame has a reserved sample rate, unable to calculate duration");
		return properties;
	};

	let kbps = match header.bitrate() {
		Bitrate::Kbps(kbps) if kbps > 0 => Some(u64::from(kbps)),
		_ => None,
	};

	let duration_ms = match xing {
		Some(XingHeader {
			frames: Some(frames),
			..
		}) => {
			log::debug!("MPEG: Using the Xing frame count to calculate duration");

			let samples = u64::from(*frames) * u64::from(header.samples_per_frame());
			Some(samples * 1000 / u64::from(sample_rate))
		},
		// The bitrate is kbps, so `bits / kbps` is already in milliseconds
		Some(XingHeader {
			bytes: Some(bytes), ..
		}) => kbps.map(|kbps| u64::from(*bytes) * 8 / kbps),
		Some(_) => None,
		None => {
			log::debug!("MPEG: No Xing header, estimating duration from the bitrate");
			kbps.map(|kbps| audio_size * 8 / kbps)
		},
	};

	let duration_ms = duration_ms.unwrap_or(0);
	properties.duration = Duration::from_millis(duration_ms);

	properties.average_bitrate = match xing {
		Some(xing) if xing.id == XingId::Xing => {
			if duration_ms == 0 {
				0
			} else {
				let bytes = xing.bytes.map_or(audio_size, u64::from);
				(bytes * 8 * 1000 / duration_ms) as u32
			}
		},
		_ => kbps.map_or(0, |kbps| (kbps * 1000) as u32),
	};

	properties
}
