use super::frame::header::FrameHeader;
use super::genre::expand_genre;
use super::header::{Id3v2Header, Id3v2TagFlags, Id3v2Version};
use super::Frame;
use crate::file::TagFormat;
use crate::metadata::{Metadata, RawValue, preferred_picture};
use crate::picture::Picture;
use crate::util::{parse_leading_number, parse_number_pair};

use std::borrow::Cow;

macro_rules! impl_accessor {
	($($name:ident => $v22:literal, $v23:literal;)+) => {
		$(
			fn $name(&self) -> Option<Cow<'_, str>> {
				self.text_for($v22, $v23).map(Cow::Borrowed)
			}
		)+
	}
}

/// An `ID3v2` tag
///
/// Frames are stored in the order they appear in the tag, keyed by their frame ID. Since a tag can
/// contain a frame ID multiple times, repeated IDs are given an ordinal suffix: the first `TXXX` frame is
/// keyed `TXXX`, the second `TXXX_0`, the third `TXXX_1`, and so on.
///
/// ## Notes on the [`Metadata`] implementation
///
/// * Frame IDs are chosen by version, for example the title is read from `TT2` in ID3v2.2 and `TIT2`
///   otherwise. The year is read from `TDRC` in ID3v2.4.
/// * Genres have their numeric references expanded, so `(17)` becomes `Rock`.
/// * The comment is the text of the first `COMM` frame, or its description if the text is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Tag {
	header: Id3v2Header,
	frames: Vec<(String, FrameHeader, Frame)>,
}

impl Id3v2Tag {
	pub(crate) fn new(header: Id3v2Header) -> Self {
		Self {
			header,
			frames: Vec::new(),
		}
	}

	/// The version of the tag
	pub fn version(&self) -> Id3v2Version {
		self.header.version
	}

	/// The minor version of the tag
	pub fn revision(&self) -> u8 {
		self.header.revision
	}

	/// The tag's flags
	pub fn flags(&self) -> &Id3v2TagFlags {
		&self.header.flags
	}

	/// The raw extended header, including its size field, if the tag had one
	pub fn extended_header(&self) -> Option<&[u8]> {
		self.header.extended_header.as_deref()
	}

	/// The total size of the tag in the stream, including the header and footer
	pub fn size(&self) -> u64 {
		self.header.full_tag_size()
	}

	/// Gets a frame by its key
	///
	/// See [`Id3v2Tag`] for how keys are assigned.
	pub fn get(&self, key: &str) -> Option<&Frame> {
		self.frames
			.iter()
			.find(|(k, _, _)| k == key)
			.map(|(_, _, frame)| frame)
	}

	/// Gets the header of a frame by its key
	pub fn header(&self, key: &str) -> Option<&FrameHeader> {
		self.frames
			.iter()
			.find(|(k, _, _)| k == key)
			.map(|(_, header, _)| header)
	}

	/// Gets all frames with the ID `id`, in the order they were read
	pub fn get_all<'a, 'k>(
		&'a self,
		id: &'k str,
	) -> impl Iterator<Item = &'a Frame> + use<'a, 'k> {
		self.frames
			.iter()
			.filter(move |(_, header, _)| header.id.as_str() == id)
			.map(|(_, _, frame)| frame)
	}

	/// An iterator over all keys and frames, in the order they were read
	pub fn frames(&self) -> impl Iterator<Item = (&str, &Frame)> {
		self.frames
			.iter()
			.map(|(key, _, frame)| (key.as_str(), frame))
	}

	/// The number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag contains no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	pub(crate) fn insert(&mut self, header: FrameHeader, frame: Frame) {
		let id = header.id.as_str();
		let existing = self
			.frames
			.iter()
			.filter(|(_, h, _)| h.id == header.id)
			.count();

		let key = match existing {
			0 => id.to_owned(),
			n => {
				log::debug!("Encountered a duplicate \"{id}\" frame");
				format!("{id}_{}", n - 1)
			},
		};

		self.frames.push((key, header, frame));
	}

	fn frame_id(&self, v22: &'static str, v23: &'static str) -> &'static str {
		match self.header.version {
			Id3v2Version::V2 => v22,
			Id3v2Version::V3 | Id3v2Version::V4 => v23,
		}
	}

	fn text_for(&self, v22: &'static str, v23: &'static str) -> Option<&str> {
		let text = self.get(self.frame_id(v22, v23))?.text()?;
		(!text.is_empty()).then_some(text)
	}

	fn number_pair(&self, v22: &'static str, v23: &'static str) -> (Option<u32>, Option<u32>) {
		self.text_for(v22, v23)
			.map_or((None, None), parse_number_pair)
	}
}

impl Metadata for Id3v2Tag {
	impl_accessor!(
		title        => "TT2", "TIT2";
		artist       => "TP1", "TPE1";
		album        => "TAL", "TALB";
		album_artist => "TP2", "TPE2";
		composer     => "TCM", "TCOM";
	);

	fn genre(&self) -> Option<Cow<'_, str>> {
		self.text_for("TCO", "TCON").map(expand_genre)
	}

	fn comment(&self) -> Option<Cow<'_, str>> {
		let Some(Frame::Comment(comment)) = self.get(self.frame_id("COM", "COMM")) else {
			return None;
		};

		if comment.content.is_empty() {
			if comment.description.is_empty() {
				return None;
			}

			return Some(Cow::Borrowed(&comment.description));
		}

		Some(Cow::Borrowed(&comment.content))
	}

	fn lyrics(&self) -> Option<Cow<'_, str>> {
		self.text_for("ULT", "USLT").map(Cow::Borrowed)
	}

	fn year(&self) -> Option<u32> {
		let value = match self.header.version {
			Id3v2Version::V4 => self.text_for("TDRC", "TDRC"),
			_ => self.text_for("TYE", "TYER"),
		}?;

		parse_leading_number(value)
	}

	fn track(&self) -> Option<u32> {
		self.number_pair("TRK", "TRCK").0
	}

	fn track_total(&self) -> Option<u32> {
		self.number_pair("TRK", "TRCK").1
	}

	fn disk(&self) -> Option<u32> {
		self.number_pair("TPA", "TPOS").0
	}

	fn disk_total(&self) -> Option<u32> {
		self.number_pair("TPA", "TPOS").1
	}

	fn picture(&self) -> Option<&Picture> {
		let id = self.frame_id("PIC", "APIC");
		preferred_picture(self.get_all(id).filter_map(|frame| match frame {
			Frame::Picture(picture) => Some(&picture.picture),
			_ => None,
		}))
	}

	fn tag_format(&self) -> TagFormat {
		match self.header.version {
			Id3v2Version::V2 => TagFormat::Id3v2_2,
			Id3v2Version::V3 => TagFormat::Id3v2_3,
			Id3v2Version::V4 => TagFormat::Id3v2_4,
		}
	}

	fn raw(&self) -> Vec<(Cow<'_, str>, RawValue<'_>)> {
		self.frames
			.iter()
			.map(|(key, _, frame)| {
				let value = match frame {
					Frame::Picture(picture) => RawValue::Picture(&picture.picture),
					Frame::UniqueFileIdentifier(ufid) => RawValue::Binary(&ufid.identifier),
					Frame::Binary(data) => RawValue::Binary(data),
					_ => RawValue::Text(Cow::Borrowed(frame.text().unwrap_or_default())),
				};

				(Cow::Borrowed(key.as_str()), value)
			})
			.collect()
	}
}
