//! Errors returned by the readers
//!
//! Every fallible operation returns a [`TagwalkError`], with the cause available through
//! [`TagwalkError::kind`]. [`ErrorKind`] is non-exhaustive, new causes may be added.
//!
//! Note that a tag simply not being present is *not* an error. Readers for optional tags
//! (such as [`read_id3v2`](crate::id3::v2::read_id3v2)) return `Ok(None)` in that case.

use crate::file::FileType;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

use ogg_pager::PageError;

/// Alias for `Result<T, TagwalkError>`
pub type Result<T> = std::result::Result<T, TagwalkError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Stream structure
	/// No supported format was recognized, and no ID3v1 tag was found
	UnknownFormat,
	/// The leading signature did not match the format being read
	///
	/// Callers reading multiple possible formats from one stream can treat this as a hint to try
	/// another reader.
	MagicMismatch(&'static str),
	/// The stream ended in the middle of a structure
	UnexpectedEndOfData,
	/// A structure declared a version this crate cannot read
	UnsupportedVersion(&'static str, u32),
	/// A field could not be decoded within the bounds it was given
	///
	/// This covers declared lengths running past the end of their containing buffer, enumerated
	/// values outside of their range, and missing terminators.
	InvalidFieldEncoding(&'static str),
	/// The final page of an OGG stream is not marked as such
	MalformedFinalPage,

	// Sizes
	/// A declared size exceeds the allocation limit, or a length that cannot be represented
	TooMuchData,
	/// The audio data is smaller than the metadata claims to precede it
	SizeMismatch,
	/// A format-specific structural error
	FileDecoding(FileDecodingError),

	// Pictures
	/// The data could not be decoded as a picture block
	NotAPicture,

	// Tags
	/// Text could not be decoded in its declared encoding
	TextDecode(&'static str),
	/// Errors that arise while reading ID3v2 tags
	Id3v2(Id3v2Error),
	/// An MP4 atom is malformed
	BadAtom(&'static str),

	// External errors
	/// An OGG page could not be read
	OggPage(PageError),
	/// Invalid UTF-8 where UTF-8 is required
	StrFromUtf8(std::str::Utf8Error),
	/// Represents all cases of [`std::io::Error`], other than an unexpected EOF
	///
	/// An unexpected EOF is reported as [`ErrorKind::UnexpectedEndOfData`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// The types of errors that can occur while reading ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
	/// As such, it is recommended to ignore the tag entirely.
	V2Compression,

	// Frame
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	BadFrameId(Vec<u8>),
	/// Arises when a frame doesn't have enough data
	BadFrameLength,
	/// Arises when a text encoding byte is not one of the four defined encodings
	BadTextEncoding(u8),
	/// Arises when an invalid picture format is parsed. Only applicable to [`Id3v2Version::V2`](crate::id3::v2::Id3v2Version::V2)
	BadPictureFormat(String),

	// Compression
	#[cfg(feature = "id3v2_compression_support")]
	/// Arises when a compressed frame is unable to be decompressed
	Decompression(std::io::Error),
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			Self::BadTextEncoding(encoding) => {
				write!(f, "Found an invalid text encoding byte ({encoding})")
			},
			Self::BadPictureFormat(format) => {
				write!(f, "Picture: Found unexpected format \"{format}\"")
			},
			#[cfg(feature = "id3v2_compression_support")]
			Self::Decompression(err) => write!(f, "Failed to decompress frame: {err}"),
		}
	}
}

/// An error that arises while reading an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// A structural problem specific to one file format
///
/// For example, a FLAC stream with two `STREAMINFO` blocks, or an MPEG stream with no frame sync.
pub struct FileDecodingError {
	format: FileType,
	description: &'static str,
}

impl FileDecodingError {
	/// Create a `FileDecodingError` for `format`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::error::FileDecodingError;
	/// use tagwalk::file::FileType;
	///
	/// let flac_error = FileDecodingError::new(FileType::Flac, "STREAMINFO block is too short");
	/// assert_eq!(flac_error.format(), FileType::Flac);
	/// ```
	#[must_use]
	pub const fn new(format: FileType, description: &'static str) -> Self {
		Self {
			format,
			description,
		}
	}

	/// Returns the [`FileType`] being read when the error occurred
	pub fn format(&self) -> FileType {
		self.format
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}: {:?}", self.format, self.description)
	}
}

impl Display for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}: {}", self.format, self.description)
	}
}

/// The error type for every reader in tagwalk
pub struct TagwalkError {
	pub(crate) kind: ErrorKind,
}

impl TagwalkError {
	/// Create a `TagwalkError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::error::{ErrorKind, TagwalkError};
	///
	/// let unknown_format = TagwalkError::new(ErrorKind::UnknownFormat);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::error::{ErrorKind, TagwalkError};
	///
	/// let unknown_format = TagwalkError::new(ErrorKind::UnknownFormat);
	/// if let ErrorKind::UnknownFormat = unknown_format.kind() {
	/// 	println!("What's the format?");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for TagwalkError {}

impl Debug for TagwalkError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for TagwalkError {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<FileDecodingError> for TagwalkError {
	fn from(input: FileDecodingError) -> Self {
		Self {
			kind: ErrorKind::FileDecoding(input),
		}
	}
}

impl From<PageError> for TagwalkError {
	fn from(input: PageError) -> Self {
		match input {
			PageError::Io(err) => Self::from(err),
			_ => Self {
				kind: ErrorKind::OggPage(input),
			},
		}
	}
}

impl From<std::io::Error> for TagwalkError {
	fn from(input: std::io::Error) -> Self {
		if input.kind() == std::io::ErrorKind::UnexpectedEof {
			return Self {
				kind: ErrorKind::UnexpectedEndOfData,
			};
		}

		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::str::Utf8Error> for TagwalkError {
	fn from(input: std::str::Utf8Error) -> Self {
		Self {
			kind: ErrorKind::StrFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for TagwalkError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Display for TagwalkError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::OggPage(ref err) => write!(f, "{err}"),
			ErrorKind::StrFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::UnknownFormat => {
				write!(f, "No format could be determined from the provided file")
			},
			ErrorKind::MagicMismatch(format) => {
				write!(f, "Expected a {format} signature, found something else")
			},
			ErrorKind::UnexpectedEndOfData => {
				write!(f, "The stream ended in the middle of a structure")
			},
			ErrorKind::UnsupportedVersion(what, version) => {
				write!(f, "Unsupported {what} version: {version}")
			},
			ErrorKind::InvalidFieldEncoding(message) => {
				write!(f, "Invalid field encoding: {message}")
			},
			ErrorKind::MalformedFinalPage => {
				write!(f, "The last page found is not marked as the final page")
			},
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read an abnormally large amount of data"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),
			ErrorKind::FileDecoding(ref file_decode_err) => write!(f, "{file_decode_err}"),

			ErrorKind::NotAPicture => write!(f, "Picture: Encountered invalid data"),

			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),
			ErrorKind::BadAtom(message) => write!(f, "MP4 Atom: {message}"),
		}
	}
}
