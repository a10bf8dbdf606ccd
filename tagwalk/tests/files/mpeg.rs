use crate::util::{
	MPEG_HEADER, PNG_DATA, id3v1, id3v2_3, read, v3_frame, v3_picture_frame, v3_text_frame,
	xing_frame,
};

use std::io::Cursor;
use std::time::Duration;

use tagwalk::config::ParseOptions;
use tagwalk::file::{FileSubtype, TagFormat, TaggedFile};
use tagwalk::id3::v2::Frame;
use tagwalk::metadata::RawValue;
use tagwalk::mpeg::{Layer, MpegFile, XingId};
use tagwalk::picture::{MimeType, PictureType};
use tagwalk::prelude::*;

fn comment_frame(text: &str) -> Vec<u8> {
	let mut content = b"\x00eng\x00".to_vec();
	content.extend(text.as_bytes());
	v3_frame(b"COMM", &content)
}

fn full_test_mp3() -> Vec<u8> {
	let mut bytes = id3v2_3(
		&[
			v3_text_frame(b"TIT2", "Foo title"),
			v3_text_frame(b"TPE1", "Bar artist"),
			v3_text_frame(b"TRCK", "3/12"),
			v3_text_frame(b"TCON", "(17)Rock"),
			comment_frame("Qux comment"),
			v3_picture_frame(4, b"back"),
			v3_picture_frame(3, PNG_DATA),
		],
		32,
	);

	bytes.extend(xing_frame(1000, 417_952));
	bytes.extend(MPEG_HEADER);
	bytes.extend([0; 413]);
	bytes.extend(id3v1("V1 title", "", "Baz album", "1999", 5, 17));
	bytes
}

#[test_log::test]
fn read_full() {
	let file = MpegFile::read_from(&mut Cursor::new(full_test_mp3()), ParseOptions::new()).unwrap();

	// From the ID3v2 tag
	assert_eq!(file.title().as_deref(), Some("Foo title"));
	assert_eq!(file.artist().as_deref(), Some("Bar artist"));
	assert_eq!(file.track(), Some(3));
	assert_eq!(file.track_total(), Some(12));
	assert_eq!(file.genre().as_deref(), Some("Rock"));
	assert_eq!(file.comment().as_deref(), Some("Qux comment"));

	// Missing from the ID3v2 tag, taken from the ID3v1 tag
	assert_eq!(file.album().as_deref(), Some("Baz album"));
	assert_eq!(file.year(), Some(1999));

	let picture = file.picture().unwrap();
	assert_eq!(picture.pic_type(), PictureType::CoverFront);
	assert_eq!(picture.mime_type(), Some(&MimeType::Png));
	assert_eq!(picture.description(), Some("cover"));
	assert_eq!(picture.data(), PNG_DATA);

	assert_eq!(file.tag_format(), TagFormat::Id3v2_3);
	assert_eq!(file.file_subtype(), FileSubtype::Mp3);

	let id3v2 = file.id3v2().unwrap();
	assert_eq!(id3v2.len(), 7);
	assert!(matches!(id3v2.get("TIT2"), Some(Frame::Text(_))));
	assert_eq!(id3v2.get_all("APIC").count(), 2);

	assert_eq!(file.id3v1().unwrap().title().as_deref(), Some("V1 title"));
}

#[test_log::test]
fn properties() {
	let file = MpegFile::read_from(&mut Cursor::new(full_test_mp3()), ParseOptions::new()).unwrap();

	assert_eq!(file.frame_header().layer, Layer::Layer3);

	let xing = file.xing_header().unwrap();
	assert_eq!(xing.id, XingId::Xing);
	assert_eq!(xing.frames, Some(1000));
	assert_eq!(xing.bytes, Some(417_952));

	// 1000 frames * 1152 samples / 44100 Hz
	assert_eq!(file.duration(), Duration::from_millis(26122));
	assert_eq!(file.average_bitrate(), 128_000);
	assert_eq!(file.properties().sample_rate(), 44100);
	assert_eq!(file.properties().channels(), 2);
}

#[test_log::test]
fn read_no_tags() {
	let file = MpegFile::read_from(
		&mut Cursor::new(full_test_mp3()),
		ParseOptions::new().read_tags(false),
	)
	.unwrap();

	assert!(file.id3v2().is_none());
	assert!(file.id3v1().is_none());
	assert!(file.title().is_none());
	assert_eq!(file.tag_format(), TagFormat::Unknown);
	assert!(file.raw().is_empty());

	// The tags are still skipped properly
	assert_eq!(file.duration(), Duration::from_millis(26122));
}

#[test_log::test]
fn read_no_properties() {
	let file = MpegFile::read_from(
		&mut Cursor::new(full_test_mp3()),
		ParseOptions::new().read_properties(false),
	)
	.unwrap();

	assert_eq!(file.title().as_deref(), Some("Foo title"));
	assert_eq!(file.duration(), Duration::ZERO);
	assert_eq!(file.average_bitrate(), 0);
}

#[test_log::test]
fn id3v1_only() {
	let mut bytes = MPEG_HEADER.to_vec();
	bytes.extend([0; 1000]);
	bytes.extend(id3v1("Foo title", "Bar artist", "", "2003", 7, 17));

	let TaggedFile::Mpeg(file) = read(&bytes, ParseOptions::new()).unwrap() else {
		panic!("Expected an MPEG file");
	};

	assert!(file.id3v2().is_none());
	assert_eq!(file.title().as_deref(), Some("Foo title"));
	assert_eq!(file.artist().as_deref(), Some("Bar artist"));
	assert!(file.album().is_none());
	assert_eq!(file.year(), Some(2003));
	assert_eq!(file.track(), Some(7));
	assert_eq!(file.genre().as_deref(), Some("Rock"));
	assert_eq!(file.tag_format(), TagFormat::Id3v1);

	let raw = file.raw();
	assert!(raw.contains(&("title".into(), RawValue::Text("Foo title".into()))));
}
