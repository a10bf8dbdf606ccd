use crate::id3::v2::util::synchsafe::SynchsafeInteger;

/// The type of file read
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[allow(missing_docs)]
#[non_exhaustive]
pub enum FileType {
	Mpeg,
	Mp4,
	Flac,
	Vorbis,
}

impl FileType {
	/// Attempts to determine a [`FileType`] from a buffer of the file's leading bytes
	///
	/// A leading ID3v2 tag is skipped if the buffer extends past it, since FLAC files can start with one.
	/// Otherwise, a file starting with an ID3v2 tag is assumed to be MPEG.
	///
	/// NOTE: This is for use in [`crate::read_from`], which reads more bytes when the buffer isn't enough.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::file::FileType;
	///
	/// assert_eq!(FileType::from_buffer(b"fLaC\x00\x00\x00\x22"), Some(FileType::Flac));
	/// assert_eq!(FileType::from_buffer(b"\x00\x00\x00\x18ftypM4A "), Some(FileType::Mp4));
	/// assert_eq!(FileType::from_buffer(b"\xFF\xFB\x90\x00"), Some(FileType::Mpeg));
	/// assert_eq!(FileType::from_buffer(b"RIFF"), None);
	/// ```
	pub fn from_buffer(buf: &[u8]) -> Option<Self> {
		if buf.len() >= 10 && &buf[..3] == b"ID3" {
			let mut size = u32::from_be_bytes([buf[6], buf[7], buf[8], buf[9]]).unsynch() as usize;
			size += 10;

			// ID3v2.4 footer
			if buf[3] == 4 && buf[5] & 0x10 == 0x10 {
				size += 10;
			}

			return match buf.get(size..) {
				Some(rest) if !rest.is_empty() => Self::quick_type_guess(rest).or(Some(Self::Mpeg)),
				_ => Some(Self::Mpeg),
			};
		}

		Self::quick_type_guess(buf)
	}

	pub(crate) fn quick_type_guess(buf: &[u8]) -> Option<Self> {
		use crate::mpeg::header::verify_frame_sync;

		match buf.first()? {
			0xFF if buf.len() >= 2 && verify_frame_sync([buf[0], buf[1]]) => Some(Self::Mpeg),
			b'O' if buf.starts_with(b"OggS") => Some(Self::Vorbis),
			b'f' if buf.starts_with(b"fLaC") => Some(Self::Flac),
			_ if buf.len() >= 8 && &buf[4..8] == b"ftyp" => Some(Self::Mp4),
			_ => None,
		}
	}
}
