pub(super) mod content;
pub(super) mod header;
pub(super) mod read;

use super::items::{
	AttachedPictureFrame, ExtendedTextFrame, ExtendedUrlFrame, LanguageFrame, TextInformationFrame,
	UniqueFileIdentifierFrame, UrlLinkFrame,
};

/// Represents an `ID3v2` frame
///
/// Frames are decoded according to their ID. ID3v2.2 frames share the variants of their
/// ID3v2.3/4 counterparts (ex. `TT2` and `TIT2` are both [`Frame::Text`]).
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
	/// Represents a "COMM" or "COM" frame
	Comment(LanguageFrame),
	/// Represents a "USLT" or "ULT" frame
	UnsynchronizedText(LanguageFrame),
	/// Represents a "T..." (excluding TXXX) frame
	Text(TextInformationFrame),
	/// Represents a "TXXX" or "TXX" frame
	UserText(ExtendedTextFrame),
	/// Represents a "W..." (excluding WXXX) frame
	Url(UrlLinkFrame),
	/// Represents a "WXXX" or "WXX" frame
	UserUrl(ExtendedUrlFrame),
	/// Represents an "APIC" or "PIC" frame
	Picture(AttachedPictureFrame),
	/// Represents a "UFID" or "UFI" frame
	UniqueFileIdentifier(UniqueFileIdentifierFrame),
	/// Binary data
	///
	/// This is used for:
	///
	/// * Frames with no specialized decoder (ex. `PRIV`, `GEOB`, `POPM`)
	/// * Encrypted frames
	/// * Compressed frames, when the `id3v2_compression_support` feature is disabled
	Binary(Vec<u8>),
}

impl Frame {
	/// The primary text of the frame, if it has any
	///
	/// * [`Frame::Text`], [`Frame::Url`]: the value
	/// * [`Frame::UserText`], [`Frame::UserUrl`], [`Frame::Comment`], [`Frame::UnsynchronizedText`]: the content
	pub fn text(&self) -> Option<&str> {
		match self {
			Frame::Text(text) => Some(&text.value),
			Frame::Url(url) => Some(&url.content),
			Frame::UserText(text) => Some(&text.content),
			Frame::UserUrl(url) => Some(&url.content),
			Frame::Comment(language_frame) | Frame::UnsynchronizedText(language_frame) => {
				Some(&language_frame.content)
			},
			Frame::Picture(_) | Frame::UniqueFileIdentifier(_) | Frame::Binary(_) => None,
		}
	}
}

/// Various flags to describe the content of a frame
///
/// ID3v2.2 frames have no flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The group identifier the frame belongs to
	///
	/// This is `Some(0)` until the identifier is read from the frame content.
	pub grouping_identity: Option<u8>,
	/// Frame is zlib compressed
	pub compression: bool,
	/// Frame encryption method symbol
	///
	/// This is `Some(0)` until the symbol is read from the frame content. Since the encryption
	/// method is unknown, encrypted frames are kept as [`Frame::Binary`].
	pub encryption: Option<u8>,
	/// Frame is unsynchronised (ID3v2.4 only)
	pub unsynchronisation: bool,
	/// The size of the frame content with all flags removed
	///
	/// In ID3v2.3, this is only present for compressed frames.
	pub data_length_indicator: Option<u32>,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator`
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: (flags & 0x0040 == 0x0040).then_some(0),
			compression: flags & 0x0008 == 0x0008,
			encryption: (flags & 0x0004 == 0x0004).then_some(0),
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: (flags & 0x0001 == 0x0001).then_some(0),
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	pub fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: (flags & 0x0020 == 0x0020).then_some(0),
			compression: flags & 0x0080 == 0x0080,
			encryption: (flags & 0x0040 == 0x0040).then_some(0),
			unsynchronisation: false,
			data_length_indicator: None,
		}
	}
}
