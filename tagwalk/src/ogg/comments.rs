use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::file::TagFormat;
use crate::macros::{err, parse_mode_choice};
use crate::metadata::{Metadata, RawValue, preferred_picture};
use crate::picture::Picture;
use crate::util::io::take_bytes;
use crate::util::{parse_leading_number, parse_number_pair};

use std::borrow::Cow;

use byteorder::{ByteOrder, LittleEndian};

const PICTURE_KEY: &str = "metadata_block_picture";

/// Vorbis comments
///
/// Used by both OGG Vorbis and FLAC. Keys are stored lowercase, and every entry is kept in the
/// order it was read, including repeated keys.
///
/// ## Notes on the [`Metadata`] implementation
///
/// * `PERFORMER` takes precedence over `ARTIST` for the artist.
/// * The composer is read from `COMPOSER`, falling back to `ARTIST` only when a `PERFORMER` exists.
/// * The comment is read from `COMMENT`, falling back to `DESCRIPTION`.
/// * The year is read from the first 4 characters of `DATE`.
/// * `TRACKNUMBER` and `DISCNUMBER` may be in the form `x/n`, the totals are read from `TRACKTOTAL`
///   and `DISCTOTAL` first.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct VorbisComments {
	pub(crate) vendor: String,
	pub(crate) items: Vec<(String, String)>,
	pub(crate) pictures: Vec<Picture>,
}

impl VorbisComments {
	/// The vendor string
	pub fn vendor(&self) -> &str {
		&self.vendor
	}

	/// Gets the last value of `key`
	///
	/// NOTE: Keys are case-insensitive
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::ogg::VorbisComments;
	///
	/// let comments = VorbisComments::default();
	/// assert!(comments.get("ARTIST").is_none());
	/// ```
	pub fn get(&self, key: &str) -> Option<&str> {
		self.get_all(key).last()
	}

	/// Gets every value of `key`, in the order they were read
	///
	/// NOTE: Keys are case-insensitive
	pub fn get_all<'a, 'k>(
		&'a self,
		key: &'k str,
	) -> impl Iterator<Item = &'a str> + use<'a, 'k> {
		self.items
			.iter()
			.filter(move |(k, _)| k.eq_ignore_ascii_case(key))
			.map(|(_, v)| v.as_str())
	}

	/// An iterator over every `(key, value)` pair
	pub fn items(&self) -> impl Iterator<Item = (&str, &str)> {
		self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// The pictures stored in `METADATA_BLOCK_PICTURE` fields
	pub fn pictures(&self) -> &[Picture] {
		&self.pictures
	}

	/// The number of items, not including pictures
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the comments have no items or pictures
	pub fn is_empty(&self) -> bool {
		self.items.is_empty() && self.pictures.is_empty()
	}

	// Empty values are treated as missing
	fn text(&self, key: &str) -> Option<Cow<'_, str>> {
		self.get(key).filter(|v| !v.is_empty()).map(Cow::Borrowed)
	}

	/// Decode a comment block
	///
	/// `content` starts at the vendor length. For OGG, the packet signature must already be removed.
	pub(crate) fn parse(mut content: &[u8], parse_options: ParseOptions) -> Result<Self> {
		let content = &mut content;
		let parse_mode = parse_options.parsing_mode;

		let vendor_len = read_length(content, "vendor length")?;
		let vendor = decode_value(take_bytes(content, vendor_len, "vendor")?, parse_mode)?;

		let number_of_items = read_length(content, "comment count")?;
		log::debug!("Vorbis comments: vendor '{vendor}', {number_of_items} items");

		let mut comments = Self {
			vendor,
			..Self::default()
		};

		for _ in 0..number_of_items {
			let comment_len = read_length(content, "comment length")?;
			let comment = take_bytes(content, comment_len, "comment")?;

			// KEY=VALUE
			let Some((key, value)) = split_comment(comment) else {
				parse_mode_choice!(
					parse_mode,
					STRICT: err!(InvalidFieldEncoding("Vorbis comment")),
					DEFAULT: {
						log::warn!("Discarding malformed Vorbis comment");
						continue;
					}
				);
			};

			if key == PICTURE_KEY {
				if !parse_options.read_cover_art {
					continue;
				}

				match Picture::from_flac_bytes(value, true) {
					Ok(picture) => comments.pictures.push(picture),
					Err(e) => {
						if parse_mode == ParsingMode::Strict {
							return Err(e);
						}

						log::warn!("Failed to decode FLAC picture, discarding field");
					},
				}

				continue;
			}

			let value = decode_value(value, parse_mode)?;
			comments.items.push((key, value));
		}

		Ok(comments)
	}
}

fn read_length(content: &mut &[u8], field: &'static str) -> Result<usize> {
	let len = LittleEndian::read_u32(take_bytes(content, 4, field)?);
	Ok(len as usize)
}

fn valid_key(key: &[u8]) -> bool {
	// 0x20..=0x7D, excluding '='
	!key.is_empty() && key.iter().all(|c| (b' '..=b'}').contains(c) && *c != b'=')
}

// Splits at the first '=', lowercasing the key
fn split_comment(comment: &[u8]) -> Option<(String, &[u8])> {
	let separator = comment.iter().position(|b| *b == b'=')?;
	let (key, value) = (&comment[..separator], &comment[separator + 1..]);

	if !valid_key(key) {
		return None;
	}

	let key = key
		.iter()
		.map(|b| char::from(b.to_ascii_lowercase()))
		.collect();
	Some((key, value))
}

fn decode_value(value: &[u8], parse_mode: ParsingMode) -> Result<String> {
	match std::str::from_utf8(value) {
		Ok(value) => Ok(value.to_owned()),
		Err(e) => {
			if parse_mode == ParsingMode::Strict {
				return Err(e.into());
			}

			log::warn!("Non UTF-8 value found in Vorbis comments, decoding lossily");
			Ok(String::from_utf8_lossy(value).into_owned())
		},
	}
}

impl Metadata for VorbisComments {
	fn title(&self) -> Option<Cow<'_, str>> {
		self.text("title")
	}

	fn artist(&self) -> Option<Cow<'_, str>> {
		self.text("performer").or_else(|| self.text("artist"))
	}

	fn album(&self) -> Option<Cow<'_, str>> {
		self.text("album")
	}

	fn album_artist(&self) -> Option<Cow<'_, str>> {
		self.text("albumartist")
	}

	fn composer(&self) -> Option<Cow<'_, str>> {
		if let Some(composer) = self.text("composer") {
			return Some(composer);
		}

		// Without a performer, `ARTIST` is the performing artist
		self.text("performer")?;
		self.text("artist")
	}

	fn genre(&self) -> Option<Cow<'_, str>> {
		self.text("genre")
	}

	fn comment(&self) -> Option<Cow<'_, str>> {
		self.text("comment").or_else(|| self.text("description"))
	}

	fn lyrics(&self) -> Option<Cow<'_, str>> {
		self.text("lyrics")
	}

	fn year(&self) -> Option<u32> {
		self.get("date")?.get(..4)?.parse().ok()
	}

	fn track(&self) -> Option<u32> {
		parse_number_pair(self.get("tracknumber")?).0
	}

	fn track_total(&self) -> Option<u32> {
		self.get("tracktotal")
			.and_then(parse_leading_number)
			.or_else(|| parse_number_pair(self.get("tracknumber")?).1)
	}

	fn disk(&self) -> Option<u32> {
		parse_number_pair(self.get("discnumber")?).0
	}

	fn disk_total(&self) -> Option<u32> {
		self.get("disctotal")
			.and_then(parse_leading_number)
			.or_else(|| parse_number_pair(self.get("discnumber")?).1)
	}

	fn picture(&self) -> Option<&Picture> {
		preferred_picture(&self.pictures)
	}

	fn tag_format(&self) -> TagFormat {
		TagFormat::Vorbis
	}

	fn raw(&self) -> Vec<(Cow<'_, str>, RawValue<'_>)> {
		let items = self
			.items
			.iter()
			.map(|(k, v)| (Cow::Borrowed(k.as_str()), RawValue::Text(Cow::Borrowed(v))));
		let pictures = self
			.pictures
			.iter()
			.map(|picture| (Cow::Borrowed(PICTURE_KEY), RawValue::Picture(picture)));

		items.chain(pictures).collect()
	}
}

#[cfg(test)]
pub(crate) mod test_utils {
	/// Build a comment block, starting at the vendor length
	pub(crate) fn comment_block(vendor: &str, comments: &[&[u8]]) -> Vec<u8> {
		let mut block = (vendor.len() as u32).to_le_bytes().to_vec();
		block.extend(vendor.as_bytes());
		block.extend((comments.len() as u32).to_le_bytes());

		for comment in comments {
			block.extend((comment.len() as u32).to_le_bytes());
			block.extend(*comment);
		}

		block
	}
}
