use crate::error::{PageError, Result};
use crate::header::{PAGE_HEADER_FIXED_SIZE, PageHeader};
use crate::{CONTINUED_PACKET, Page};

use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Read a single logical packet, following it across page boundaries
///
/// The first page is always consumed in full. After that, the header of every following page is
/// peeked: pages marked as [`CONTINUED_PACKET`] are appended to the packet, and the first page that
/// is not a continuation ends the packet. That page is left unconsumed, with the reader positioned
/// at its capture pattern.
///
/// Running out of data while peeking simply ends the packet.
///
/// # Errors
///
/// * The first page could not be read
/// * A following page is missing its capture pattern
///
/// # Examples
///
/// ```rust
/// use ogg_pager::read_packet;
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), ogg_pager::PageError> {
/// let mut bytes = b"OggS".to_vec();
/// bytes.extend([0, 0x02]);
/// bytes.extend([0; 20]);
/// bytes.extend([1, 3]);
/// bytes.extend(b"abc");
///
/// let packet = read_packet(&mut Cursor::new(bytes))?;
/// assert_eq!(packet, b"abc");
/// # Ok(()) }
/// ```
pub fn read_packet<R>(data: &mut R) -> Result<Vec<u8>>
where
	R: Read + Seek,
{
	let first_page = Page::read(data)?;
	let mut packet = first_page.take_content();

	loop {
		let peek_start = data.stream_position()?;

		let mut peek = [0; PAGE_HEADER_FIXED_SIZE];
		match data.read_exact(&mut peek) {
			Ok(()) => {},
			Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
				// Nothing else to read, the packet ends with the stream
				data.seek(SeekFrom::Start(peek_start))?;
				break;
			},
			Err(e) => return Err(e.into()),
		}

		data.seek(SeekFrom::Current(-(PAGE_HEADER_FIXED_SIZE as i64)))?;

		if &peek[..4] != b"OggS" {
			return Err(PageError::MissingMagic);
		}

		if peek[5] & CONTINUED_PACKET == 0 {
			break;
		}

		let page = Page::read(data)?;
		packet.extend_from_slice(page.content());
	}

	Ok(packet)
}

// Searching starts this far from the end of the stream
const LAST_PAGE_SEARCH_START: u64 = 14;

/// Search backwards from the end of the stream for the last page, and read its header
///
/// The capture pattern is searched for in 4 byte windows. When a window holds the start of a
/// split pattern (`ggS`, `gS`, or `S`), the next window is moved back just enough to cover it.
///
/// # Errors
///
/// * The stream is too short to contain a page
/// * No capture pattern could be found
/// * The header of the last page is malformed
///
/// # Examples
///
/// ```rust
/// use ogg_pager::{CONTAINS_LAST_PAGE_OF_BITSTREAM, find_last_page};
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), ogg_pager::PageError> {
/// let mut bytes = b"OggS".to_vec();
/// bytes.extend([0, CONTAINS_LAST_PAGE_OF_BITSTREAM]);
/// bytes.extend(44100_u64.to_le_bytes());
/// bytes.extend([0; 12]);
/// bytes.extend([1, 3]);
/// bytes.extend(b"abc");
///
/// let header = find_last_page(&mut Cursor::new(bytes))?;
/// assert_eq!(header.abgp, 44100);
/// # Ok(()) }
/// ```
pub fn find_last_page<R>(data: &mut R) -> Result<PageHeader>
where
	R: Read + Seek,
{
	let stream_len = data.seek(SeekFrom::End(0))?;
	if stream_len < LAST_PAGE_SEARCH_START {
		return Err(PageError::NotEnoughData);
	}

	let mut pos = stream_len - LAST_PAGE_SEARCH_START;
	loop {
		data.seek(SeekFrom::Start(pos))?;

		let mut window = [0; 4];
		data.read_exact(&mut window)?;

		let step_back = match window {
			[b'O', b'g', b'g', b'S'] => {
				data.seek(SeekFrom::Start(pos))?;
				return PageHeader::read(data);
			},
			[b'g', b'g', b'S', _] => 1,
			[b'g', b'S', _, _] => 2,
			[b'S', _, _, _] => 3,
			_ => 4,
		};

		pos = pos.checked_sub(step_back).ok_or(PageError::MissingMagic)?;
	}
}
