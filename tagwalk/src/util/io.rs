//! Helpers for reading from seekable byte sources

use crate::error::Result;
use crate::macros::{err, try_vec};

use std::io::{Read, Seek, SeekFrom};

// TODO: https://github.com/rust-lang/rust/issues/59359
pub(crate) trait SeekStreamLen: Seek {
	fn stream_len_hack(&mut self) -> Result<u64> {
		let current_pos = self.stream_position()?;
		let len = self.seek(SeekFrom::End(0))?;

		self.seek(SeekFrom::Start(current_pos))?;

		Ok(len)
	}
}

impl<T> SeekStreamLen for T where T: Seek {}

pub(crate) trait ReadExt: Read {
	/// Read exactly `len` bytes into a new buffer
	///
	/// The allocation is checked against the global allocation limit before anything is read.
	fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
		let mut content = try_vec![0; len];
		self.read_exact(&mut content)?;
		Ok(content)
	}

	/// Read a 3 byte big endian integer
	fn read_u24_be(&mut self) -> Result<u32> {
		let mut bytes = [0; 3];
		self.read_exact(&mut bytes)?;
		Ok(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
	}
}

impl<T> ReadExt for T where T: Read {}

/// Split `len` bytes off of the front of `content`
///
/// Unlike reading from the slice, a `len` larger than what remains is reported as an
/// [`ErrorKind::InvalidFieldEncoding`](crate::error::ErrorKind::InvalidFieldEncoding), since the
/// length was declared by the data itself.
pub(crate) fn take_bytes<'a>(content: &mut &'a [u8], len: usize, field: &'static str) -> Result<&'a [u8]> {
	if len > content.len() {
		log::debug!(
			"Declared length of {field} ({len}) exceeds the remaining {} bytes",
			content.len()
		);
		err!(InvalidFieldEncoding(field));
	}

	let (taken, rest) = content.split_at(len);
	*content = rest;
	Ok(taken)
}
