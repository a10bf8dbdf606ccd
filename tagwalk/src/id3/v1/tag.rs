use crate::file::TagFormat;
use crate::id3::v1::constants::GENRES;
use crate::metadata::{Metadata, RawValue};

use std::borrow::Cow;

macro_rules! impl_accessor {
	($($name:ident,)+) => {
		$(
			fn $name(&self) -> Option<Cow<'_, str>> {
				self.$name.as_deref().map(Cow::Borrowed)
			}
		)+
	}
}

/// ID3v1 is a severely limited format, with each field being incredibly small in size. All fields
/// have been commented with their maximum sizes and any other additional restrictions.
///
/// Empty fields are `None`.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	/// Track title, 30 bytes max
	pub title: Option<String>,
	/// Track artist, 30 bytes max
	pub artist: Option<String>,
	/// Album title, 30 bytes max
	pub album: Option<String>,
	/// Release year, 4 bytes max
	pub year: Option<String>,
	/// A short comment
	///
	/// The number of bytes differs between versions, but the max is 30 bytes.
	/// Some notes:
	///
	/// * ID3v1.1 reduces the comment to 28 bytes, leaving the last byte for the track number
	pub comment: Option<String>,
	/// The track number, 1 byte max
	///
	/// Issues:
	///
	/// * This is not included in ID3v1.0
	/// * A zero byte is no track number
	pub track_number: Option<u8>,
	/// The track's genre, 1 byte max
	///
	/// ID3v1 has a predefined set of genres, see [`GENRES`](crate::id3::v1::GENRES).
	/// This byte is an index into that list.
	pub genre: Option<u8>,
}

impl Id3v1Tag {
	/// Returns `true` if the tag contains no values
	pub fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.artist.is_none()
			&& self.album.is_none()
			&& self.year.is_none()
			&& self.comment.is_none()
			&& self.track_number.is_none()
			&& self.genre.is_none()
	}
}

impl Metadata for Id3v1Tag {
	impl_accessor!(title, artist, album, comment,);

	fn genre(&self) -> Option<Cow<'_, str>> {
		let name = GENRES.get(usize::from(self.genre?))?;
		Some(Cow::Borrowed(name))
	}

	fn year(&self) -> Option<u32> {
		crate::util::parse_leading_number(self.year.as_deref()?)
	}

	fn track(&self) -> Option<u32> {
		self.track_number.map(u32::from)
	}

	fn tag_format(&self) -> TagFormat {
		TagFormat::Id3v1
	}

	fn raw(&self) -> Vec<(Cow<'_, str>, RawValue<'_>)> {
		let mut raw = Vec::new();

		let text_fields = [
			("title", &self.title),
			("artist", &self.artist),
			("album", &self.album),
			("year", &self.year),
			("comment", &self.comment),
		];
		for (key, value) in text_fields {
			if let Some(value) = value {
				raw.push((Cow::Borrowed(key), RawValue::Text(Cow::Borrowed(value.as_str()))));
			}
		}

		if let Some(track_number) = self.track_number {
			raw.push((Cow::Borrowed("track"), RawValue::Integer(i64::from(track_number))));
		}

		if let Some(genre) = self.genre {
			raw.push((Cow::Borrowed("genre"), RawValue::Integer(i64::from(genre))));
		}

		raw
	}
}
