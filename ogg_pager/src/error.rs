use std::error::Error;
use std::fmt;

/// Alias for `Result<T, PageError>`
pub type Result<T> = std::result::Result<T, PageError>;

/// Errors that can occur while reading pages and packets
#[derive(Debug)]
pub enum PageError {
	/// A page declared a stream structure version other than 0
	InvalidVersion(u8),
	/// A page did not start with the capture pattern (`OggS`)
	MissingMagic,
	/// The content is too large to fit in a single page, see [`MAX_CONTENT_SIZE`](crate::fixture::MAX_CONTENT_SIZE)
	TooMuchData(usize),
	/// The stream is too short to hold a page
	NotEnoughData,
	/// Any std::io::Error
	Io(std::io::Error),
}

impl fmt::Display for PageError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PageError::InvalidVersion(version) => {
				write!(f, "Page has a stream structure version of {version}, expected 0")
			},
			PageError::MissingMagic => write!(f, "Page is missing its capture pattern"),
			PageError::TooMuchData(len) => write!(f, "{len} bytes will not fit in a single page"),
			PageError::NotEnoughData => write!(f, "Stream is too short to contain a page"),
			PageError::Io(err) => write!(f, "{err}"),
		}
	}
}

impl Error for PageError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			PageError::Io(e) => Some(e),
			_ => None,
		}
	}
}

impl From<std::io::Error> for PageError {
	fn from(err: std::io::Error) -> PageError {
		PageError::Io(err)
	}
}
