use crate::config::ParsingMode;
use crate::error::Result;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::{err, id3v2_err};
use crate::util::io::ReadExt;

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

/// The ID3v2 version
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised
	///
	/// This only affects how the tag is read for ID3v2.2 and ID3v2.3. ID3v2.4 tags unsynchronise
	/// individual frames instead, see [`FrameFlags::unsynchronisation`](crate::id3::v2::FrameFlags::unsynchronisation).
	pub unsynchronisation: bool,
	/// Whether an extended header follows the tag header (ID3v2.3 and ID3v2.4)
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage (ID3v2.3 and ID3v2.4)
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4)
	pub footer: bool,
}

/// An ID3v2 tag header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Header {
	/// The tag version
	pub version: Id3v2Version,
	/// The minor version, informational only
	pub revision: u8,
	/// The tag flags
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents, **excluding** the header and footer
	///
	/// This includes the extended header, frames, and padding.
	pub size: u32,
	/// The raw extended header, if one exists
	///
	/// This includes the 4 bytes of the size field.
	pub extended_header: Option<Vec<u8>>,
}

impl Id3v2Header {
	/// Parse an ID3v2 header, and its extended header if one exists
	///
	/// # Errors
	///
	/// * The reader doesn't start with `"ID3"` ([`ErrorKind::MagicMismatch`](crate::error::ErrorKind::MagicMismatch))
	/// * The major version isn't 2, 3, or 4
	/// * The ID3v2.2 compression flag is set in [`ParsingMode::Strict`]
	/// * The extended header doesn't fit within the tag
	pub fn parse<R>(reader: &mut R, parse_mode: ParsingMode) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; 10];
		reader.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			err!(MagicMismatch("ID3v2"));
		}

		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => err!(UnsupportedVersion("ID3v2", u32::from(major))),
		};
		let revision = header[4];
		let flags = header[5];

		// In ID3v2.2, bit 6 marks a compressed tag. No compression scheme was ever decided on,
		// so the flag is meaningless.
		if version == Id3v2Version::V2 && flags & 0x40 == 0x40 {
			if parse_mode == ParsingMode::Strict {
				id3v2_err!(V2Compression);
			}

			log::warn!("Encountered the ID3v2.2 compression flag, ignoring");
		}

		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: version >= Id3v2Version::V3 && flags & 0x40 == 0x40,
			experimental: version >= Id3v2Version::V3 && flags & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
		};

		let size = BigEndian::read_u32(&header[6..]).unsynch();

		let mut extended_header = None;
		if flags_parsed.extended_header {
			let extended_header_content = match version {
				// The ID3v2.3 size excludes itself
				Id3v2Version::V3 => {
					let len = reader.read_u32::<BigEndian>()?;
					read_extended_header(reader, len, len)?
				},
				// The ID3v2.4 size is synchsafe, and includes itself
				_ => {
					let len = reader.read_u32::<BigEndian>()?.unsynch();
					if len < 4 {
						err!(InvalidFieldEncoding("ID3v2 extended header size"));
					}

					read_extended_header(reader, len, len - 4)?
				},
			};

			if extended_header_content.len() as u64 > u64::from(size) {
				err!(InvalidFieldEncoding("ID3v2 extended header size"));
			}

			log::trace!(
				"Read an extended header of {} bytes",
				extended_header_content.len()
			);
			extended_header = Some(extended_header_content);
		}

		Ok(Id3v2Header {
			version,
			revision,
			flags: flags_parsed,
			size,
			extended_header,
		})
	}

	/// The size of the extended header, including its size field
	pub fn extended_header_size(&self) -> u32 {
		self.extended_header
			.as_ref()
			.map_or(0, |extended_header| extended_header.len() as u32)
	}

	/// The number of bytes available for frames and padding
	pub fn frames_size(&self) -> u32 {
		self.size - self.extended_header_size()
	}

	/// The total size of the tag, including the header and footer
	pub fn full_tag_size(&self) -> u64 {
		let footer = if self.flags.footer { 10 } else { 0 };
		10 + u64::from(self.size) + footer
	}
}

// Reads the remainder of an extended header, keeping the 4 size bytes at the front
fn read_extended_header<R>(reader: &mut R, size_field: u32, remaining: u32) -> Result<Vec<u8>>
where
	R: Read,
{
	let mut content = Vec::with_capacity(4);
	content.extend(size_field.to_be_bytes());
	content.extend(reader.read_vec(remaining as usize)?);
	Ok(content)
}
