use super::Frame;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::id3::v2::items::{
	AttachedPictureFrame, ExtendedTextFrame, ExtendedUrlFrame, LanguageFrame,
	TextInformationFrame, UniqueFileIdentifierFrame, UrlLinkFrame,
};
use crate::macros::id3v2_err;
use crate::util::text::TextEncoding;

#[rustfmt::skip]
pub(super) fn parse_content(
	id: &str,
	content: &[u8],
	version: Id3v2Version,
	parse_options: ParseOptions,
) -> Result<Frame> {
	log::trace!("Parsing frame content for ID: {}", id);

	Ok(match id {
		"APIC" | "PIC" => Frame::Picture(AttachedPictureFrame::parse(content, version, parse_options)?),
		"TXXX" | "TXX" => Frame::UserText(ExtendedTextFrame::parse(content, parse_options)?),
		"WXXX" | "WXX" => Frame::UserUrl(ExtendedUrlFrame::parse(content, parse_options)?),
		"COMM" | "COM" => Frame::Comment(LanguageFrame::parse(content, parse_options)?),
		"USLT" | "ULT" => Frame::UnsynchronizedText(LanguageFrame::parse(content, parse_options)?),
		"UFID" | "UFI" => Frame::UniqueFileIdentifier(UniqueFileIdentifierFrame::parse(content)?),
		i if i.starts_with('T') => Frame::Text(TextInformationFrame::parse(content, parse_options)?),
		i if i.starts_with('W') => Frame::Url(UrlLinkFrame::parse(content)),
		_ => Frame::Binary(content.to_vec()),
	})
}

pub(in crate::id3::v2) fn verify_encoding(
	encoding: u8,
	parse_mode: ParsingMode,
) -> Result<TextEncoding> {
	if let Some(encoding) = TextEncoding::from_u8(encoding) {
		return Ok(encoding);
	}

	if parse_mode == ParsingMode::Strict {
		id3v2_err!(BadTextEncoding(encoding));
	}

	log::warn!("Found an invalid text encoding ({encoding}), assuming Latin-1");
	Ok(TextEncoding::Latin1)
}
