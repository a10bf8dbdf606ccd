use super::FrameFlags;
use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::id3v2_err;

use std::fmt::{Display, Formatter};
use std::io::Read;

/// An ID3v2 frame header
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHeader {
	pub(crate) id: FrameId,
	pub(crate) size: u32,
	/// The frame flags
	pub flags: FrameFlags,
}

impl FrameHeader {
	/// Get the ID of the frame
	pub fn id(&self) -> &FrameId {
		&self.id
	}

	/// The size of the frame content, as declared in the header
	///
	/// This includes any data added by the frame flags (ex. a data length indicator).
	pub fn size(&self) -> u32 {
		self.size
	}
}

/// An `ID3v2` frame ID
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub enum FrameId {
	/// A 4 character ID3v2.3/4 frame ID
	Valid(String),
	/// A 3 character ID3v2.2 frame ID
	Outdated(String),
}

impl FrameId {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// # Errors
	///
	/// * `id` contains invalid characters (must be 'A'..='Z' and '0'..='9')
	/// * `id` is an invalid length (must be 3 or 4)
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::id3::v2::FrameId;
	///
	/// # fn main() -> tagwalk::error::Result<()> {
	/// assert!(FrameId::new("TIT2")?.is_valid());
	/// assert!(FrameId::new("TT2")?.is_outdated());
	/// assert!(FrameId::new("tit2").is_err());
	/// # Ok(()) }
	/// ```
	pub fn new(id: &str) -> Result<Self> {
		if !id
			.bytes()
			.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
		{
			id3v2_err!(BadFrameId(id.as_bytes().to_vec()));
		}

		match id.len() {
			3 => Ok(FrameId::Outdated(id.to_owned())),
			4 => Ok(FrameId::Valid(id.to_owned())),
			_ => id3v2_err!(BadFrameId(id.as_bytes().to_vec())),
		}
	}

	/// Whether this frame ID represents an outdated (ID3v2.2) ID
	pub fn is_outdated(&self) -> bool {
		matches!(self, FrameId::Outdated(_))
	}

	/// Whether this frame ID represents a valid (ID3v2.3 or ID3v2.4) ID
	pub fn is_valid(&self) -> bool {
		matches!(self, FrameId::Valid(_))
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		match self {
			FrameId::Valid(v) | FrameId::Outdated(v) => v,
		}
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The length of a frame header for `version`
pub(crate) fn header_len(version: Id3v2Version) -> u32 {
	match version {
		Id3v2Version::V2 => 6,
		Id3v2Version::V3 | Id3v2Version::V4 => 10,
	}
}

/// Read the next frame header
///
/// `size` is always populated once the header bytes are read, so the caller can skip a frame
/// with an invalid ID.
///
/// Returns `None` if there aren't enough bytes left for a header, or padding was reached.
pub(crate) fn parse_header<R>(
	reader: &mut R,
	version: Id3v2Version,
	size: &mut u32,
) -> Result<Option<FrameHeader>>
where
	R: Read,
{
	let mut header = [0; 10];
	let header = &mut header[..header_len(version) as usize];
	if reader.read_exact(header).is_err() {
		return Ok(None);
	}

	// Assume we just started reading padding
	if header[0] == 0 {
		return Ok(None);
	}

	let (id_bytes, flags) = match version {
		Id3v2Version::V2 => {
			*size = u32::from_be_bytes([0, header[3], header[4], header[5]]);
			(&header[..3], FrameFlags::default())
		},
		Id3v2Version::V3 => {
			*size = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
			let flags = FrameFlags::parse_id3v23(u16::from_be_bytes([header[8], header[9]]));
			(&header[..4], flags)
		},
		Id3v2Version::V4 => {
			*size = u32::from_be_bytes([header[4], header[5], header[6], header[7]]).unsynch();
			let flags = FrameFlags::parse_id3v24(u16::from_be_bytes([header[8], header[9]]));
			(&header[..4], flags)
		},
	};

	let Ok(id_str) = std::str::from_utf8(id_bytes) else {
		id3v2_err!(BadFrameId(id_bytes.to_vec()));
	};
	let id = FrameId::new(id_str)?;

	Ok(Some(FrameHeader {
		id,
		size: *size,
		flags,
	}))
}
