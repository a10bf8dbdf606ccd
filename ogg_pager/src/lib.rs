//! A simple OGG page and packet reader
//!
//! This crate only deals with the physical framing of an OGG stream. It knows nothing about
//! the codecs carried inside of it.

mod error;
pub mod fixture;
mod header;
mod packet;

use std::io::{Read, Seek};

pub use error::{PageError, Result};
pub use header::{PAGE_HEADER_FIXED_SIZE, PageHeader};
pub use packet::{find_last_page, read_packet};

/// The page contains a continuation of the previous page's packet
pub const CONTINUED_PACKET: u8 = 0x01;
/// The packet contains the first page of the logical bitstream
pub const CONTAINS_FIRST_PAGE_OF_BITSTREAM: u8 = 0x02;
/// The packet contains the last page of the logical bitstream
pub const CONTAINS_LAST_PAGE_OF_BITSTREAM: u8 = 0x04;

/// An OGG page
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Page {
	content: Vec<u8>,
	header: PageHeader,
	/// The position in the stream the page ended
	pub end: u64,
}

impl Page {
	/// Reads a page, header and content, from the current position
	///
	/// # Errors
	///
	/// * The header is invalid, see [`PageHeader::read`]
	/// * The stream ends before the content does
	///
	/// # Examples
	///
	/// ```rust
	/// use ogg_pager::Page;
	/// use std::io::Cursor;
	///
	/// # fn main() -> Result<(), ogg_pager::PageError> {
	/// let mut bytes = b"OggS".to_vec();
	/// bytes.extend([0, 0x02]);
	/// bytes.extend([0; 20]);
	/// bytes.extend([1, 3]);
	/// bytes.extend(b"abc");
	///
	/// let page = Page::read(&mut Cursor::new(bytes))?;
	/// assert_eq!(page.content(), b"abc");
	/// # Ok(()) }
	/// ```
	pub fn read<V>(data: &mut V) -> Result<Self>
	where
		V: Read + Seek,
	{
		let header = PageHeader::read(data)?;

		let mut content = vec![0; header.content_size()];
		data.read_exact(&mut content)?;

		let end = data.stream_position()?;

		Ok(Page {
			content,
			header,
			end,
		})
	}

	/// Returns the page's header
	pub fn header(&self) -> &PageHeader {
		&self.header
	}

	/// Returns the page's content
	pub fn content(&self) -> &[u8] {
		self.content.as_slice()
	}

	/// Consumes the page and returns its content
	pub fn take_content(self) -> Vec<u8> {
		self.content
	}
}
