use super::constants::GENRES;
use super::tag::Id3v1Tag;
use crate::error::Result;
use crate::util::io::SeekStreamLen;
use crate::util::text::latin1_decode;

use std::io::{Read, Seek, SeekFrom};

pub(crate) const ID3V1_TAG_MARKER: [u8; 3] = *b"TAG";
pub(crate) const ID3V1_TAG_SIZE: u64 = 128;

/// Read an ID3v1 tag from the last 128 bytes of `reader`
///
/// This returns `Ok(None)` if the stream is too short, or doesn't end with a tag. The position of
/// `reader` is restored in every case.
///
/// # Errors
///
/// * Unable to seek or read from `reader`
///
/// # Examples
///
/// ```rust
/// use tagwalk::id3::v1::read_id3v1;
/// use tagwalk::metadata::Metadata;
///
/// # fn main() -> tagwalk::error::Result<()> {
/// let mut bytes = vec![0; 128];
/// bytes[..3].copy_from_slice(b"TAG");
/// bytes[3..12].copy_from_slice(b"Foo title");
///
/// let tag = read_id3v1(&mut std::io::Cursor::new(bytes))?.expect("tag should exist");
/// assert_eq!(tag.title().as_deref(), Some("Foo title"));
/// # Ok(()) }
/// ```
pub fn read_id3v1<R>(reader: &mut R) -> Result<Option<Id3v1Tag>>
where
	R: Read + Seek,
{
	let start = reader.stream_position()?;
	if reader.stream_len_hack()? < ID3V1_TAG_SIZE {
		return Ok(None);
	}

	reader.seek(SeekFrom::End(-128))?;

	let mut id3v1 = [0; 128];
	reader.read_exact(&mut id3v1)?;
	reader.seek(SeekFrom::Start(start))?;

	if id3v1[..3] != ID3V1_TAG_MARKER {
		return Ok(None);
	}

	log::debug!("Found an ID3v1 tag");
	Ok(Some(Id3v1Tag::parse(&id3v1)))
}

impl Id3v1Tag {
	/// Parse the 128 bytes of a tag, which are expected to start with `"TAG"`
	pub(crate) fn parse(bytes: &[u8; 128]) -> Self {
		let fields = &bytes[3..];

		// ID3v1.1 steals the last byte of the comment for the track number, marked by a
		// zero byte before it. A track number of 0 is invalid.
		let (comment, track_number) = if fields[122] == 0 && fields[123] != 0 {
			(&fields[94..122], Some(fields[123]))
		} else {
			(&fields[94..124], None)
		};

		let genre = fields[124];

		Self {
			title: decode_text(&fields[..30]),
			artist: decode_text(&fields[30..60]),
			album: decode_text(&fields[60..90]),
			year: decode_text(&fields[90..94]),
			comment: decode_text(comment),
			track_number,
			genre: (usize::from(genre) < GENRES.len()).then_some(genre),
		}
	}
}

fn decode_text(data: &[u8]) -> Option<String> {
	let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
	if data[end..].iter().any(|&b| b != 0) {
		log::warn!("ID3v1 text field contains trailing junk, skipping");
	}

	let text = latin1_decode(&data[..end]);
	let text = text.trim_end_matches(' ');
	(!text.is_empty()).then(|| text.to_owned())
}
