use crate::config::Utf16ByteOrder;
use crate::error::Result;
use crate::macros::err;

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// The width of a single code unit, and therefore of the string terminator
	pub(crate) fn unit_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}
}

/// Decode a complete (unterminated) string
///
/// `default_order` is used for [`TextEncoding::UTF16`] strings that are missing their byte order mark.
pub(crate) fn decode_text(
	bytes: &[u8],
	encoding: TextEncoding,
	default_order: Utf16ByteOrder,
) -> Result<String> {
	match encoding {
		TextEncoding::Latin1 => Ok(latin1_decode(bytes)),
		TextEncoding::UTF8 => Ok(utf8_decode(bytes)),
		TextEncoding::UTF16 => {
			// A lone byte can't hold anything, not even a BOM
			if bytes.len() < 2 {
				return Ok(String::new());
			}

			if bytes.len() % 2 != 0 {
				err!(TextDecode("UTF-16 string has an odd length"));
			}

			match bytes {
				[0xFE, 0xFF, rest @ ..] => Ok(utf16_decode_bytes(rest, u16::from_be_bytes)),
				[0xFF, 0xFE, rest @ ..] => Ok(utf16_decode_bytes(rest, u16::from_le_bytes)),
				_ => {
					log::trace!("UTF-16 string is missing a BOM, assuming {default_order:?}");
					let endianness = match default_order {
						Utf16ByteOrder::LittleEndian => u16::from_le_bytes,
						Utf16ByteOrder::BigEndian => u16::from_be_bytes,
					};

					Ok(utf16_decode_bytes(bytes, endianness))
				},
			}
		},
		TextEncoding::UTF16BE => {
			if bytes.len() % 2 != 0 {
				err!(TextDecode("UTF-16 string has an odd length"));
			}

			Ok(utf16_decode_bytes(bytes, u16::from_be_bytes))
		},
	}
}

/// Split a string off of the front of `bytes` at its terminator
///
/// The terminator is a single zero byte for Latin-1 and UTF-8, and a zero code unit for UTF-16. UTF-16
/// terminators are only searched for on code unit boundaries, so a zero byte belonging to a character
/// (ex. the high byte of `'A'` in little endian) never ends the string early.
///
/// Returns the string bytes, and the bytes following the terminator (if one was found).
pub(crate) fn split_terminated(bytes: &[u8], encoding: TextEncoding) -> (&[u8], Option<&[u8]>) {
	let unit_len = encoding.unit_len();

	let terminator_pos = bytes
		.chunks_exact(unit_len)
		.position(|unit| unit.iter().all(|b| *b == 0))
		.map(|unit_index| unit_index * unit_len);

	match terminator_pos {
		Some(pos) => (&bytes[..pos], Some(&bytes[pos + unit_len..])),
		None => (bytes, None),
	}
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| *c as char).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn utf8_decode(bytes: &[u8]) -> String {
	let mut text = String::from_utf8_lossy(bytes).into_owned();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> String {
	if bytes.is_empty() {
		return String::new();
	}

	let words: Vec<u16> = bytes
		.chunks_exact(2)
		// In ID3v2, it is possible to have multiple UTF-16 strings separated by null.
		// This also makes it possible for us to encounter multiple BOMs in a single string.
		// We must filter them out.
		.filter_map(|c| match c {
			[0xFF, 0xFE] | [0xFE, 0xFF] => None,
			[b1, b2] => Some(endianness([*b1, *b2])),
			_ => None,
		})
		.collect();

	let mut text = String::from_utf16_lossy(&words);
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}
