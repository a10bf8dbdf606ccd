//! Utilities for working with unsynchronized ID3v2 content
//!
//! ID3v2 avoids false MPEG frame syncs in two ways:
//!
//! * Sizes are stored as synchsafe integers, where the most significant bit of every byte is zero,
//!   see [`SynchsafeInteger`].
//! * Content may be unsynchronised, where a `0x00` is inserted after every `0xFF`,
//!   see [`UnsynchronizedStream`].

use crate::error::Result;

use std::io::Read;

/// A reader for unsynchronized content
///
/// Every `0x00` that immediately follows a `0xFF` is dropped. All other bytes pass through untouched.
///
/// # Examples
///
/// ```rust
/// use std::io::Read;
/// use tagwalk::id3::v2::util::synchsafe::UnsynchronizedStream;
///
/// # fn main() -> tagwalk::error::Result<()> {
/// let content = [0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15];
///
/// let mut unsynchronized_reader = UnsynchronizedStream::new(&content[..]);
///
/// let mut unsynchronized_content = Vec::new();
/// unsynchronized_reader.read_to_end(&mut unsynchronized_content)?;
///
/// assert_eq!(unsynchronized_content, [0xFF, 0x1A, 0xFF, 0x15]);
/// # Ok(()) }
/// ```
pub struct UnsynchronizedStream<R> {
	reader: R,
	buf: Box<[u8; 4 * 1024]>,
	filled: usize,
	pos: usize,
	last_was_ff: bool,
}

impl<R> UnsynchronizedStream<R> {
	/// Create a new [`UnsynchronizedStream`]
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			buf: Box::new([0; 4 * 1024]),
			filled: 0,
			pos: 0,
			last_was_ff: false,
		}
	}

	/// Extract the reader, discarding the [`UnsynchronizedStream`]
	///
	/// Any bytes that were buffered, but not yet read, are lost.
	pub fn into_inner(self) -> R {
		self.reader
	}
}

impl<R: Read> Read for UnsynchronizedStream<R> {
	fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
		let mut written = 0;

		while written < out.len() {
			if self.pos == self.filled {
				self.filled = self.reader.read(&mut self.buf[..])?;
				self.pos = 0;

				if self.filled == 0 {
					break;
				}
			}

			let byte = self.buf[self.pos];
			self.pos += 1;

			if self.last_was_ff && byte == 0 {
				self.last_was_ff = false;
				continue;
			}

			self.last_was_ff = byte == 0xFF;
			out[written] = byte;
			written += 1;
		}

		Ok(written)
	}
}

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// The integer type that this can be widened to for use in [`SynchsafeInteger::widening_synch`]
	type WideningType;

	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in 7 bits per byte
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> tagwalk::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let synch_number = 0xFFF_FFFF_u32.synch()?;
	/// assert_eq!(synch_number, 0x7F7F_7F7F);
	///
	/// assert!(0x1000_0000_u32.synch().is_err());
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Create a synchsafe integer, widening to the next available integer type
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// let large_number_synchsafe = u8::MAX.widening_synch();
	/// assert_eq!(large_number_synchsafe, 0x017F_u16);
	/// assert_eq!(large_number_synchsafe.unsynch(), 0xFF);
	/// ```
	fn widening_synch(self) -> Self::WideningType;

	/// Decode a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// // The size bytes of an ID3v2 header: 00 00 02 01
	/// assert_eq!(0x0000_0201_u32.unsynch(), 257);
	/// ```
	fn unsynch(self) -> Self;
}

// Each byte of a synchsafe integer carries 7 bits of the value, so both directions are a matter
// of moving 7 bit groups between 7 and 8 bit strides.
macro_rules! impl_synchsafe {
	($($ty:ty => $widening_ty:ty),+ $(,)?) => {
		$(
			impl SynchsafeInteger for $ty {
				type WideningType = $widening_ty;

				fn synch(self) -> Result<Self> {
					const BYTES: u32 = <$ty>::BITS / 8;
					const MAXIMUM_INTEGER: $ty = <$ty>::MAX >> BYTES;

					if self > MAXIMUM_INTEGER {
						crate::macros::err!(TooMuchData);
					}

					let mut synched: $ty = 0;
					for group in 0..BYTES {
						synched |= ((self >> (group * 7)) & 0x7F) << (group * 8);
					}

					Ok(synched)
				}

				fn widening_synch(self) -> Self::WideningType {
					const GROUPS: u32 = <$ty>::BITS / 8 + 1;

					let value = <$widening_ty>::from(self);
					let mut synched: $widening_ty = 0;
					for group in 0..GROUPS {
						synched |= ((value >> (group * 7)) & 0x7F) << (group * 8);
					}

					synched
				}

				fn unsynch(self) -> Self {
					const BYTES: u32 = <$ty>::BITS / 8;

					let mut unsynched: $ty = 0;
					for group in 0..BYTES {
						unsynched |= ((self >> (group * 8)) & 0x7F) << (group * 7);
					}

					unsynched
				}
			}
		)+
	};
}

impl_synchsafe!(u8 => u16, u16 => u32, u32 => u64);
