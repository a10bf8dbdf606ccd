use super::atom::{Atom, AtomIdent};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::v1::GENRES;
use crate::macros::err;
use crate::picture::{MimeType, PNG_SIGNATURE, Picture, PictureType};
use crate::util::text::{utf8_decode, utf16_decode_bytes};

use std::fmt::{Display, Formatter};

use byteorder::{BigEndian, ByteOrder};

const ITUNES_MEAN: &str = "com.apple.iTunes";

// The well known data type codes that change how the payload is read
const BINARY: u32 = 0;
const UTF8: u32 = 1;
const UTF16: u32 = 2;
const JPEG: u32 = 13;
const PNG: u32 = 14;
const BE_SIGNED_INTEGER: u32 = 21;
const BE_UNSIGNED_INTEGER: u32 = 22;

/// The key of an [`Ilst`] item
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKey {
	/// A four byte identifier, such as `©nam`
	Atom(AtomIdent),
	/// The `name` of a freeform (`----`) item, only kept for the `com.apple.iTunes` mean
	Freeform(String),
}

impl Display for ItemKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ItemKey::Atom(ident) => write!(f, "{ident}"),
			ItemKey::Freeform(name) => f.write_str(name),
		}
	}
}

/// The value of an [`Ilst`] item
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mp4Value {
	/// A UTF-8 or UTF-16 string
	Text(String),
	/// A big endian integer, signed or unsigned
	Integer(i64),
	/// A number and total, used by `trkn` and `disk`
	Pair(u32, u32),
	/// Any data with an unhandled type code
	Binary(Vec<u8>),
	/// A `covr` image
	Picture(Picture),
}

/// An MP4 `ilst` atom, the iTunes-style metadata list
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Ilst {
	pub(crate) items: Vec<(ItemKey, Mp4Value)>,
}

impl Ilst {
	/// Gets the first value of the atom `ident`
	pub fn get(&self, ident: &[u8; 4]) -> Option<&Mp4Value> {
		self.items.iter().find_map(|(key, value)| match key {
			ItemKey::Atom(key) if key == ident => Some(value),
			_ => None,
		})
	}

	/// Gets the value of the freeform item `name`
	pub fn get_freeform(&self, name: &str) -> Option<&Mp4Value> {
		self.items.iter().find_map(|(key, value)| match key {
			ItemKey::Freeform(key) if key == name => Some(value),
			_ => None,
		})
	}

	/// Gets the text of the first value of `ident`, if it is non-empty text
	pub fn text(&self, ident: &[u8; 4]) -> Option<&str> {
		match self.get(ident) {
			Some(Mp4Value::Text(text)) if !text.is_empty() => Some(text),
			_ => None,
		}
	}

	/// Every picture in the list
	pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
		self.items.iter().filter_map(|(_, value)| match value {
			Mp4Value::Picture(picture) => Some(picture),
			_ => None,
		})
	}

	/// An iterator over every item, in the order they were read
	pub fn items(&self) -> impl Iterator<Item = (&ItemKey, &Mp4Value)> {
		self.items.iter().map(|(key, value)| (key, value))
	}

	/// The number of items
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the list is empty
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Decode the items of an `ilst` atom
	pub(crate) fn parse(ilst: &Atom, parse_options: ParseOptions) -> Result<Self> {
		let parse_mode = parse_options.parsing_mode;
		let mut tag = Ilst::default();
		let mut gnre = None;

		for item in ilst.children() {
			let key = match item.ident().as_bytes() {
				b"----" => match freeform_name(item) {
					Some(name) => ItemKey::Freeform(name),
					None => {
						log::debug!("Skipping freeform item with an unknown mean");
						continue;
					},
				},
				_ => ItemKey::Atom(item.ident()),
			};

			if item.ident() == *b"covr" {
				if !parse_options.read_cover_art {
					continue;
				}

				for data in item.children().iter().filter(|atom| atom.ident() == *b"data") {
					let (code, payload) = split_data(data)?;
					if let Some(picture) = parse_cover(code, payload) {
						tag.items.push((key.clone(), Mp4Value::Picture(picture)));
					}
				}

				continue;
			}

			let Some(data) = item.child(b"data") else {
				if parse_mode == ParsingMode::Strict {
					err!(BadAtom("ilst item has no data atom"));
				}

				log::warn!("ilst item {key} has no data atom, skipping");
				continue;
			};

			let (code, payload) = split_data(data)?;

			let value = match item.ident().as_bytes() {
				b"trkn" | b"disk" => {
					if payload.len() < 6 {
						err!(InvalidFieldEncoding("ilst number pair"));
					}

					Mp4Value::Pair(u32::from(payload[3]), u32::from(payload[5]))
				},
				_ => parse_value(code, payload, parse_mode)?,
			};

			if item.ident() == *b"gnre" && parse_options.implicit_conversions {
				gnre = Some(value);
				continue;
			}

			tag.items.push((key, value));
		}

		// Upgrade the outdated genre index, unless a genre name exists already
		if let Some(gnre) = gnre {
			if tag.get(b"\xA9gen").is_none() {
				log::debug!("Converting 'gnre' atom to '©gen'");

				match genre_from_index(&gnre) {
					Some(genre) => tag.items.push((
						ItemKey::Atom(AtomIdent(*b"\xA9gen")),
						Mp4Value::Text(genre.to_owned()),
					)),
					None => tag.items.push((ItemKey::Atom(AtomIdent(*b"gnre")), gnre)),
				}
			}
		}

		Ok(tag)
	}
}

// The `name` of a freeform item, only if its `mean` is iTunes'
fn freeform_name(item: &Atom) -> Option<String> {
	// Both start with a version (1) and flags (3)
	let payload = |ident: &[u8; 4]| {
		item.child(ident)
			.and_then(Atom::data)
			.and_then(|data| data.get(4..))
	};

	if payload(b"mean")? != ITUNES_MEAN.as_bytes() {
		return None;
	}

	Some(utf8_decode(payload(b"name")?))
}

// Splits a `data` atom into its type code and payload
fn split_data(data: &Atom) -> Result<(u32, &[u8])> {
	let content = data.data().unwrap_or_default();
	if content.len() < 8 {
		err!(InvalidFieldEncoding("ilst data atom"));
	}

	// Version (1) + type (3) + locale (4)
	let code = BigEndian::read_u24(&content[1..4]);
	Ok((code, &content[8..]))
}

fn parse_cover(code: u32, payload: &[u8]) -> Option<Picture> {
	let mime_type = match code {
		JPEG => MimeType::Jpeg,
		PNG => MimeType::Png,
		_ if payload.starts_with(PNG_SIGNATURE) => MimeType::Png,
		_ => {
			log::debug!("Skipping covr data with an unknown type ({code})");
			return None;
		},
	};

	Some(Picture::new(
		PictureType::CoverFront,
		Some(mime_type),
		None,
		payload.to_vec(),
	))
}

fn parse_value(code: u32, payload: &[u8], parse_mode: ParsingMode) -> Result<Mp4Value> {
	let value = match code {
		BINARY => Mp4Value::Binary(payload.to_vec()),
		UTF8 => Mp4Value::Text(utf8_decode(payload)),
		UTF16 => Mp4Value::Text(utf16_decode_bytes(payload, u16::from_be_bytes)),
		BE_SIGNED_INTEGER | BE_UNSIGNED_INTEGER => {
			match read_integer(payload, code == BE_SIGNED_INTEGER) {
				Some(integer) => Mp4Value::Integer(integer),
				None => {
					if parse_mode == ParsingMode::Strict {
						err!(InvalidFieldEncoding("ilst integer"));
					}

					log::warn!("Integer item has an invalid size ({}), keeping it as binary", payload.len());
					Mp4Value::Binary(payload.to_vec())
				},
			}
		},
		_ => Mp4Value::Binary(payload.to_vec()),
	};

	Ok(value)
}

fn read_integer(payload: &[u8], signed: bool) -> Option<i64> {
	let len = payload.len();
	if !matches!(len, 1 | 2 | 3 | 4 | 8) {
		return None;
	}

	if signed {
		return Some(BigEndian::read_int(payload, len));
	}

	i64::try_from(BigEndian::read_uint(payload, len)).ok()
}

fn genre_from_index(value: &Mp4Value) -> Option<&'static str> {
	let index = match value {
		Mp4Value::Integer(index) => usize::try_from(*index).ok()?,
		Mp4Value::Binary(data) if data.len() == 2 => usize::from(BigEndian::read_u16(data)),
		_ => return None,
	};

	// `gnre` indices are 1 based
	GENRES.get(index.checked_sub(1)?).copied()
}

pub(super) fn gnre_genre(ilst: &Ilst) -> Option<&'static str> {
	ilst.get(b"gnre").and_then(genre_from_index)
}
