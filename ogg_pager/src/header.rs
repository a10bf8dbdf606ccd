use crate::{PageError, Result};

use std::io::{Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt};

/// The fixed portion of a page header, up to and including the checksum
pub const PAGE_HEADER_FIXED_SIZE: usize = 26;

/// An OGG page header
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PageHeader {
	/// The position in the stream the page started at
	pub start: u64,
	pub(crate) header_type_flag: u8,
	/// The page's absolute granule position
	pub abgp: u64,
	/// The page's stream serial number
	pub stream_serial: u32,
	/// The page's sequence number
	pub sequence_number: u32,
	pub(crate) checksum: u32,
	/// The page's segment table
	///
	/// Each entry is the length of one lacing value. A value of 255 means the packet
	/// continues into the next segment.
	pub segments: Vec<u8>,
}

impl PageHeader {
	/// Read a page header, leaving the reader at the start of the page content
	///
	/// # Errors
	///
	/// * The page is missing the "OggS" capture pattern
	/// * The stream structure version is not 0
	/// * The reader does not contain enough data
	pub fn read<R>(data: &mut R) -> Result<Self>
	where
		R: Read + Seek,
	{
		let start = data.stream_position()?;

		let mut sig = [0; 4];
		data.read_exact(&mut sig)?;

		if &sig != b"OggS" {
			return Err(PageError::MissingMagic);
		}

		// Version, always 0
		let version = data.read_u8()?;

		if version != 0 {
			return Err(PageError::InvalidVersion(version));
		}

		let header_type_flag = data.read_u8()?;

		let abgp = data.read_u64::<LittleEndian>()?;
		let stream_serial = data.read_u32::<LittleEndian>()?;
		let sequence_number = data.read_u32::<LittleEndian>()?;
		let checksum = data.read_u32::<LittleEndian>()?;

		// A page with no segments is legal, it just carries no content
		let segment_count = data.read_u8()?;

		let mut segments = vec![0; segment_count as usize];
		data.read_exact(&mut segments)?;

		Ok(Self {
			start,
			header_type_flag,
			abgp,
			stream_serial,
			sequence_number,
			checksum,
			segments,
		})
	}

	/// Returns the page's header type flag
	pub fn header_type_flag(&self) -> u8 {
		self.header_type_flag
	}

	/// Returns the page's checksum
	pub fn checksum(&self) -> u32 {
		self.checksum
	}

	/// The size of the page content, as described by the segment table
	pub fn content_size(&self) -> usize {
		self.segments.iter().map(|&b| usize::from(b)).sum()
	}

	/// The size of the full header, including the segment table
	pub fn len(&self) -> usize {
		PAGE_HEADER_FIXED_SIZE + 1 + self.segments.len()
	}
}

#[cfg(test)]
mod tests {
	use super::PageHeader;
	use crate::{PageError, CONTAINS_LAST_PAGE_OF_BITSTREAM};

	use std::io::Cursor;

	fn header_bytes(flag: u8, segments: &[u8]) -> Vec<u8> {
		let mut bytes = b"OggS".to_vec();
		bytes.push(0);
		bytes.push(flag);
		bytes.extend(1234_u64.to_le_bytes());
		bytes.extend(0xDEAD_BEEF_u32.to_le_bytes());
		bytes.extend(7_u32.to_le_bytes());
		bytes.extend(0_u32.to_le_bytes());
		bytes.push(segments.len() as u8);
		bytes.extend(segments);
		bytes
	}

	#[test_log::test]
	fn read_header() {
		let bytes = header_bytes(CONTAINS_LAST_PAGE_OF_BITSTREAM, &[255, 10]);
		let header = PageHeader::read(&mut Cursor::new(bytes)).unwrap();

		assert_eq!(header.abgp, 1234);
		assert_eq!(header.stream_serial, 0xDEAD_BEEF);
		assert_eq!(header.sequence_number, 7);
		assert_eq!(header.header_type_flag(), CONTAINS_LAST_PAGE_OF_BITSTREAM);
		assert_eq!(header.content_size(), 265);
		assert_eq!(header.len(), 29);
	}

	#[test_log::test]
	fn zero_segments() {
		let bytes = header_bytes(0, &[]);
		let header = PageHeader::read(&mut Cursor::new(bytes)).unwrap();

		assert!(header.segments.is_empty());
		assert_eq!(header.content_size(), 0);
	}

	#[test_log::test]
	fn bad_version() {
		let mut bytes = header_bytes(0, &[1]);
		bytes[4] = 1;

		assert!(matches!(
			PageHeader::read(&mut Cursor::new(bytes)),
			Err(PageError::InvalidVersion(1))
		));
	}

	#[test_log::test]
	fn missing_magic() {
		let mut bytes = header_bytes(0, &[1]);
		bytes[0] = b'X';

		assert!(matches!(
			PageHeader::read(&mut Cursor::new(bytes)),
			Err(PageError::MissingMagic)
		));
	}
}
