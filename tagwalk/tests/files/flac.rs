use crate::util::{PNG_DATA, comment_block, flac, flac_picture, id3v2_3, read, stream_info, v3_text_frame};

use std::io::Cursor;
use std::time::Duration;

use tagwalk::config::{ParseOptions, ParsingMode};
use tagwalk::file::{FileSubtype, TagFormat, TaggedFile};
use tagwalk::flac::FlacFile;
use tagwalk::picture::{MimeType, PictureType};
use tagwalk::prelude::*;

fn full_test_flac(comment_blocks: &[&[&str]]) -> Vec<u8> {
	let mut blocks: Vec<(u8, Vec<u8>)> = vec![(0, stream_info(48000, 2, 24, 48000 * 30))];
	for comments in comment_blocks {
		blocks.push((4, comment_block("reference libFLAC 1.4.3", comments)));
	}
	blocks.push((6, flac_picture(3, PNG_DATA)));
	blocks.push((1, vec![0; 512]));

	flac(&blocks, 30 * 1000)
}

#[test_log::test]
fn read_file() {
	let bytes = full_test_flac(&[&[
		"TITLE=Foo title",
		"ARTIST=Bar artist",
		"ALBUM=Baz album",
		"DATE=2019-06-01",
		"TRACKNUMBER=4/9",
		"DISCNUMBER=1",
		"DISCTOTAL=2",
		"GENRE=Classical",
	]]);

	let file = FlacFile::read_from(&mut Cursor::new(bytes), ParseOptions::new()).unwrap();

	assert_eq!(file.title().as_deref(), Some("Foo title"));
	assert_eq!(file.artist().as_deref(), Some("Bar artist"));
	assert_eq!(file.album().as_deref(), Some("Baz album"));
	assert_eq!(file.year(), Some(2019));
	assert_eq!(file.track(), Some(4));
	assert_eq!(file.track_total(), Some(9));
	assert_eq!(file.disk(), Some(1));
	assert_eq!(file.disk_total(), Some(2));
	assert_eq!(file.genre().as_deref(), Some("Classical"));

	let comments = file.vorbis_comments().unwrap();
	assert_eq!(comments.vendor(), "reference libFLAC 1.4.3");
	assert_eq!(comments.get("tracknumber"), Some("4/9"));

	let picture = file.picture().unwrap();
	assert_eq!(picture.pic_type(), PictureType::CoverFront);
	assert_eq!(picture.mime_type(), Some(&MimeType::Png));
	assert_eq!(picture.description(), Some("cover"));
	assert_eq!(picture.data(), PNG_DATA);

	assert_eq!(file.tag_format(), TagFormat::Vorbis);
	assert_eq!(file.file_subtype(), FileSubtype::Flac);
}

#[test_log::test]
fn properties() {
	let file = FlacFile::read_from(&mut Cursor::new(full_test_flac(&[&[]])), ParseOptions::new())
		.unwrap();

	let info = file.stream_info().unwrap();
	assert_eq!(info.sample_rate, 48000);
	assert_eq!(info.bits_per_sample, 24);

	assert_eq!(file.duration(), Duration::from_secs(30));
	// 30000 bytes of frames over 30 seconds
	assert_eq!(file.average_bitrate(), 8000);
	assert_eq!(file.properties().bit_depth(), 24);
	assert_eq!(file.properties().channels(), 2);
}

#[test_log::test]
fn multiple_vorbis_comments() {
	let bytes = full_test_flac(&[&["ARTIST=Artist 1"], &["ARTIST=Artist 2"]]);

	// Reading a file with multiple VORBIS_COMMENT blocks should error when using `Strict`
	assert!(
		FlacFile::read_from(
			&mut Cursor::new(bytes.clone()),
			ParseOptions::new().parsing_mode(ParsingMode::Strict)
		)
		.is_err()
	);

	// But by default, we should just take the last tag in the stream
	let file = FlacFile::read_from(&mut Cursor::new(bytes), ParseOptions::new()).unwrap();
	assert_eq!(file.artist().as_deref(), Some("Artist 2"));
}

#[test_log::test]
fn read_no_tags() {
	let bytes = full_test_flac(&[&["TITLE=Foo title"]]);
	let file =
		FlacFile::read_from(&mut Cursor::new(bytes), ParseOptions::new().read_tags(false)).unwrap();

	assert!(file.vorbis_comments().is_none());
	assert!(file.title().is_none());
	assert_eq!(file.tag_format(), TagFormat::Unknown);
	assert_eq!(file.duration(), Duration::from_secs(30));
}

#[test_log::test]
fn read_no_properties() {
	let bytes = full_test_flac(&[&["TITLE=Foo title"]]);
	let file = FlacFile::read_from(
		&mut Cursor::new(bytes),
		ParseOptions::new().read_properties(false),
	)
	.unwrap();

	assert_eq!(file.title().as_deref(), Some("Foo title"));
	assert_eq!(file.duration(), Duration::ZERO);
	assert_eq!(file.average_bitrate(), 0);
}

#[test_log::test]
fn id3v2_before_stream() {
	let mut bytes = id3v2_3(&[v3_text_frame(b"TIT2", "ID3v2 title")], 512);
	bytes.extend(full_test_flac(&[&["TITLE=Foo title"]]));

	let tagged_file = read(&bytes, ParseOptions::new()).unwrap();
	let TaggedFile::Flac(file) = tagged_file else {
		panic!("Expected a FLAC file");
	};

	// The ID3v2 tag is never read
	assert_eq!(file.title().as_deref(), Some("Foo title"));
	assert_eq!(file.duration(), Duration::from_secs(30));
}
