//! Truncated files must produce errors, never panics

use crate::util::{
	PNG_DATA, atom, flac, flac_picture, id3v2_3, ilst_item, mp4, read, stream_info, v3_picture_frame,
	v3_text_frame, vorbis, xing_frame,
};

use tagwalk::config::{ParseOptions, ParsingMode};
use tagwalk::error::ErrorKind;
use tagwalk::file::FileType;

fn read_every_truncation(bytes: &[u8]) {
	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	let relaxed = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);

	for len in 0..bytes.len() {
		for parse_options in [ParseOptions::new(), strict, relaxed] {
			let _ = read(&bytes[..len], parse_options);
		}
	}
}

#[test_log::test]
fn truncated_mpeg() {
	let mut bytes = id3v2_3(
		&[
			v3_text_frame(b"TIT2", "Foo title"),
			v3_picture_frame(3, PNG_DATA),
		],
		4,
	);
	bytes.extend(xing_frame(100, 41795));

	read_every_truncation(&bytes);
}

#[test_log::test]
fn truncated_mp4() {
	let bytes = mp4(
		b"M4A ",
		10,
		&[
			ilst_item(b"\xA9nam", 1, b"Foo title"),
			ilst_item(b"trkn", 0, &[0, 0, 0, 1, 0, 2, 0, 0]),
			ilst_item(b"covr", 14, PNG_DATA),
		],
	);

	read_every_truncation(&bytes);
}

#[test_log::test]
fn mp4_child_header_past_parent() {
	// A 64-bit length whose upper bytes belong to the next atom
	let mut child = 1_u32.to_be_bytes().to_vec();
	child.extend(b"free");
	child.extend([0; 4]);

	let mut bytes = atom(b"ftyp", b"M4A \0\0\0\0");
	bytes.extend(atom(b"moov", &child));
	bytes.extend(atom(b"mdat", &[0; 92]));

	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	let err = read(&bytes, strict).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::BadAtom(_)));

	for parse_mode in [ParsingMode::BestAttempt, ParsingMode::Relaxed] {
		let _ = read(&bytes, ParseOptions::new().parsing_mode(parse_mode));
	}

	read_every_truncation(&bytes);
}

#[test_log::test]
fn truncated_flac() {
	let bytes = flac(
		&[
			(0, stream_info(44100, 2, 16, 44100)),
			(6, flac_picture(3, PNG_DATA)),
		],
		16,
	);

	read_every_truncation(&bytes);
}

#[test_log::test]
fn truncated_vorbis() {
	let bytes = vorbis(&["TITLE=Foo title", "ARTIST=Bar artist"], 44100, 44100);
	read_every_truncation(&bytes);
}

#[test_log::test]
fn truncated_headers_are_errors() {
	let bytes = flac(&[(0, stream_info(44100, 2, 16, 44100))], 0);
	assert_eq!(FileType::from_buffer(&bytes[..8]), Some(FileType::Flac));

	let err = read(&bytes[..20], ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnexpectedEndOfData));
}
