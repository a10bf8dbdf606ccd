//! Format-agnostic picture handling
//!
//! Every format stores artwork differently, but all of them end up as a [`Picture`]:
//!
//! * ID3v2 `APIC` and `PIC` frames
//! * FLAC `PICTURE` blocks, and their base64 encoded form in Vorbis comments (`METADATA_BLOCK_PICTURE`)
//! * MP4 `covr` atoms

use crate::error::{ErrorKind, Result, TagwalkError};
use crate::macros::err;
use crate::util::io::take_bytes;
use crate::util::text::utf8_decode;

use std::fmt::{Debug, Display, Formatter};

use byteorder::{BigEndian, ByteOrder};
use data_encoding::BASE64;

pub(crate) const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_str("image/jpeg"), MimeType::Jpeg);
	/// assert_eq!(MimeType::from_str("IMAGE/PNG"), MimeType::Png);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_ascii_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a `MimeType` from an ID3v2.2 `PIC` image format code
	///
	/// The codes are case-insensitive. Unknown codes return `None`.
	pub(crate) fn from_pic_format(format: &str) -> Option<Self> {
		match &*format.to_ascii_uppercase() {
			"JPG" => Some(Self::Jpeg),
			"PNG" => Some(Self::Png),
			"GIF" => Some(Self::Gif),
			"BMP" => Some(Self::Bmp),
			_ => None,
		}
	}

	/// Guess the `MimeType` from the leading bytes of an image
	pub(crate) fn from_signature(data: &[u8]) -> Option<Self> {
		if data.starts_with(PNG_SIGNATURE) {
			return Some(Self::Png);
		}

		if data.starts_with(JPEG_SIGNATURE) {
			return Some(Self::Jpeg);
		}

		None
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::picture::MimeType;
	///
	/// assert_eq!(MimeType::Jpeg.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Returns the file extension for the `MimeType` if it is known
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::picture::MimeType;
	///
	/// assert_eq!(MimeType::Jpeg.ext(), Some("jpg"));
	/// assert_eq!(MimeType::Unknown(String::from("image/webp")).ext(), None);
	/// ```
	pub fn ext(&self) -> Option<&str> {
		match self {
			MimeType::Jpeg => Some("jpg"),
			MimeType::Png => Some("png"),
			MimeType::Tiff => Some("tif"),
			MimeType::Bmp => Some("bmp"),
			MimeType::Gif => Some("gif"),
			MimeType::Unknown(_) => None,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
///
/// FLAC picture blocks share the same table.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
}

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(self) -> u8 {
		self as u8
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	///
	/// Returns `None` for anything outside of `0..=20`.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::picture::PictureType;
	///
	/// assert_eq!(PictureType::from_u8(3), Some(PictureType::CoverFront));
	/// assert_eq!(PictureType::from_u8(21), None);
	/// ```
	pub fn from_u8(byte: u8) -> Option<Self> {
		let ty = match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			_ => return None,
		};

		Some(ty)
	}
}

/// Represents a picture.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	pub(crate) pic_type: PictureType,
	pub(crate) mime_type: Option<MimeType>,
	pub(crate) extension: Option<String>,
	pub(crate) description: Option<String>,
	pub(crate) data: Vec<u8>,
}

impl Debug for Picture {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Picture")
			.field("pic_type", &self.pic_type)
			.field("mime_type", &self.mime_type)
			.field("extension", &self.extension)
			.field("description", &self.description)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl Picture {
	/// Create a picture whose extension is derived from its [`MimeType`]
	pub(crate) fn new(
		pic_type: PictureType,
		mime_type: Option<MimeType>,
		description: Option<String>,
		data: Vec<u8>,
	) -> Self {
		let extension = mime_type
			.as_ref()
			.and_then(MimeType::ext)
			.map(str::to_owned);

		Self {
			pic_type,
			mime_type,
			extension,
			description,
			data,
		}
	}

	/// Returns the [`PictureType`]
	pub fn pic_type(&self) -> PictureType {
		self.pic_type
	}

	/// Returns the [`MimeType`]
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	/// Returns the file extension
	///
	/// This is derived from the [`MimeType`], except for ID3v2.2 `PIC` frames, which store
	/// their image format directly.
	pub fn extension(&self) -> Option<&str> {
		self.extension.as_deref()
	}

	/// Returns the description
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Returns the [`Picture`] data as borrowed bytes.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes a [`Picture`], returning the data as [`Vec`] without clones or allocation.
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}

	/// Get a [`Picture`] from FLAC `METADATA_BLOCK_PICTURE` bytes
	///
	/// This takes both the base64 encoded string from Vorbis comments, and the raw data from a
	/// FLAC block, specified with `encoded`.
	///
	/// The layout is:
	///
	/// | Field              | Size         |
	/// |--------------------|--------------|
	/// | Picture type       | 4            |
	/// | MIME type length   | 4            |
	/// | MIME type          | variable     |
	/// | Description length | 4            |
	/// | Description        | variable     |
	/// | Width, height, color depth, colors used | 16 |
	/// | Data length        | 4            |
	/// | Data               | variable     |
	///
	/// # Errors
	///
	/// * `encoded` is set and `bytes` is not valid base64 ([`ErrorKind::NotAPicture`])
	/// * The picture type is outside of `0..=20`
	/// * Any length field exceeds the remaining bytes
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::picture::{MimeType, Picture, PictureType};
	///
	/// # fn main() -> tagwalk::error::Result<()> {
	/// let mut block = Vec::new();
	/// block.extend(3_u32.to_be_bytes());
	/// block.extend(9_u32.to_be_bytes());
	/// block.extend(b"image/png");
	/// block.extend(0_u32.to_be_bytes());
	/// block.extend([0; 16]);
	/// block.extend(2_u32.to_be_bytes());
	/// block.extend([0xAB, 0xCD]);
	///
	/// let picture = Picture::from_flac_bytes(&block, false)?;
	/// assert_eq!(picture.pic_type(), PictureType::CoverFront);
	/// assert_eq!(picture.mime_type(), Some(&MimeType::Png));
	/// assert_eq!(picture.extension(), Some("png"));
	/// assert_eq!(picture.data(), &[0xAB, 0xCD]);
	/// # Ok(()) }
	/// ```
	pub fn from_flac_bytes(bytes: &[u8], encoded: bool) -> Result<Self> {
		if encoded {
			let data = BASE64
				.decode(bytes)
				.map_err(|_| TagwalkError::new(ErrorKind::NotAPicture))?;
			return Self::from_flac_bytes_inner(&data);
		}

		Self::from_flac_bytes_inner(bytes)
	}

	fn from_flac_bytes_inner(mut content: &[u8]) -> Result<Self> {
		let content = &mut content;

		let pic_ty = BigEndian::read_u32(take_bytes(content, 4, "picture type")?);
		let Some(pic_type) = u8::try_from(pic_ty).ok().and_then(PictureType::from_u8) else {
			log::debug!("Invalid FLAC picture type: {pic_ty}");
			err!(InvalidFieldEncoding("picture type"));
		};

		let mime_len = read_length(content, "MIME type length")?;
		let mime_str = utf8_decode(take_bytes(content, mime_len, "MIME type")?);

		let desc_len = read_length(content, "picture description length")?;
		let description = utf8_decode(take_bytes(content, desc_len, "picture description")?);

		// Width, height, color depth, and colors used
		take_bytes(content, 16, "picture dimensions")?;

		let data_len = read_length(content, "picture data length")?;
		let data = take_bytes(content, data_len, "picture data")?.to_vec();

		let mime_type = (!mime_str.is_empty()).then(|| MimeType::from_str(&mime_str));
		let description = (!description.is_empty()).then_some(description);

		Ok(Self::new(pic_type, mime_type, description, data))
	}
}

fn read_length(content: &mut &[u8], field: &'static str) -> Result<usize> {
	let len = BigEndian::read_u32(take_bytes(content, 4, field)?);
	Ok(len as usize)
}
