use crate::util::{
	MPEG_HEADER, flac, id3v1, id3v2_3, mp4, read, stream_info, temp_file, v3_text_frame, vorbis,
	xing_frame,
};

use std::io::{Cursor, Seek, SeekFrom};

use tagwalk::config::ParseOptions;
use tagwalk::error::ErrorKind;
use tagwalk::file::{FileType, TagFormat, TaggedFile};
use tagwalk::prelude::*;

#[test_log::test]
fn every_format() {
	let mut mpeg = id3v2_3(&[v3_text_frame(b"TIT2", "Foo title")], 0);
	mpeg.extend(xing_frame(10, 4179));

	let files = [
		(mpeg, FileType::Mpeg),
		(mp4(b"M4A ", 10, &[]), FileType::Mp4),
		(flac(&[(0, stream_info(44100, 2, 16, 44100))], 10), FileType::Flac),
		(vorbis(&[], 44100, 44100), FileType::Vorbis),
	];

	for (bytes, expected) in files {
		assert_eq!(FileType::from_buffer(&bytes), Some(expected));

		let tagged_file = read(&bytes, ParseOptions::new()).unwrap();
		assert_eq!(tagged_file.file_type(), Some(expected));
	}
}

#[test_log::test]
fn read_from_path() {
	let mut bytes = MPEG_HEADER.to_vec();
	bytes.extend([0; 2048]);
	bytes.extend(id3v1("Foo title", "Bar artist", "", "", 1, 255));

	// The extension is never considered
	let file = temp_file(&bytes);
	let tagged_file = tagwalk::read_from_path(file.path(), ParseOptions::new()).unwrap();

	assert_eq!(tagged_file.file_type(), Some(FileType::Mpeg));
	assert_eq!(tagged_file.title().as_deref(), Some("Foo title"));
	assert_eq!(tagged_file.tag_format(), TagFormat::Id3v1);

	let err = tagwalk::read_from_path(file.path().join("missing"), ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Io(_)));
}

#[test_log::test]
fn unknown_format() {
	let mut bytes = b"RIFF\x00\x00\x00\x00WAVEfmt ".to_vec();
	bytes.extend([0; 256]);

	let err = read(&bytes, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnknownFormat));

	// Unknown, but with an ID3v1 tag at the end
	bytes.extend(id3v1("Foo title", "", "", "", 0, 255));
	let tagged_file = read(&bytes, ParseOptions::new()).unwrap();

	let TaggedFile::Id3v1(tag) = &tagged_file else {
		panic!("Expected a bare ID3v1 tag");
	};
	assert_eq!(tag.title().as_deref(), Some("Foo title"));
	assert_eq!(tagged_file.file_type(), None);
	assert_eq!(tagged_file.tag_format(), TagFormat::Id3v1);

	let err = read(&[], ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnknownFormat));
}

#[test_log::test]
fn starts_at_current_position() {
	let mut bytes = vec![0xAA; 16];
	bytes.extend(flac(&[(0, stream_info(44100, 2, 16, 44100))], 10));

	let mut reader = Cursor::new(bytes);
	reader.seek(SeekFrom::Start(16)).unwrap();

	let tagged_file = tagwalk::read_from(&mut reader, ParseOptions::new()).unwrap();
	assert_eq!(tagged_file.file_type(), Some(FileType::Flac));
}
