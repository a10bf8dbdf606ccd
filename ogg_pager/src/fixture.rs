//! Helpers for assembling pages by hand
//!
//! Nothing here is needed to read a stream. These exist for building streams in tests.

use crate::{PageError, Result};

/// The maximum page content size
pub const MAX_CONTENT_SIZE: usize = 65025;

/// Creates the segment table for a page holding `length` bytes of content
///
/// Content ending on a 255 byte boundary gets a trailing 0 lacing value, terminating the packet.
/// The exception is content of exactly [`MAX_CONTENT_SIZE`], which fills every segment and
/// leaves the packet to continue on the next page.
///
/// # Errors
///
/// `length` > [`MAX_CONTENT_SIZE`]
pub fn segment_table(length: usize) -> Result<Vec<u8>> {
	if length > MAX_CONTENT_SIZE {
		return Err(PageError::TooMuchData(length));
	}

	let full_segments = length / 255;

	let mut segments = vec![255; full_segments];
	if full_segments < 255 {
		segments.push((length % 255) as u8);
	}

	Ok(segments)
}
