use crate::util::{PNG_DATA, flac_picture, ogg_page, read, vorbis};

use std::io::Cursor;
use std::time::Duration;

use tagwalk::config::{ParseOptions, ParsingMode};
use tagwalk::error::ErrorKind;
use tagwalk::file::{FileSubtype, FileType, TagFormat};
use tagwalk::ogg::VorbisFile;
use tagwalk::picture::PictureType;
use tagwalk::prelude::*;

use data_encoding::BASE64;

const COMMENTS: &[&str] = &[
	"TITLE=Foo title",
	"ARTIST=Bar artist",
	"PERFORMER=Performer",
	"ALBUM=Baz album",
	"DATE=2021",
	"TRACKNUMBER=2",
	"TRACKTOTAL=11",
	"DESCRIPTION=Qux description",
];

#[test_log::test]
fn read_file() {
	let bytes = vorbis(COMMENTS, 44100, 44100 * 90);
	let file = VorbisFile::read_from(&mut Cursor::new(bytes), ParseOptions::new()).unwrap();

	assert_eq!(file.title().as_deref(), Some("Foo title"));
	// PERFORMER is preferred, with ARTIST then being the composer
	assert_eq!(file.artist().as_deref(), Some("Performer"));
	assert_eq!(file.composer().as_deref(), Some("Bar artist"));
	assert_eq!(file.album().as_deref(), Some("Baz album"));
	assert_eq!(file.year(), Some(2021));
	assert_eq!(file.track(), Some(2));
	assert_eq!(file.track_total(), Some(11));
	assert_eq!(file.comment().as_deref(), Some("Qux description"));

	let comments = file.vorbis_comments().unwrap();
	assert_eq!(comments.vendor(), "Xiph.Org libVorbis I 20200704");
	assert_eq!(comments.len(), COMMENTS.len());

	assert_eq!(file.tag_format(), TagFormat::Vorbis);
	assert_eq!(file.file_subtype(), FileSubtype::Ogg);
}

#[test_log::test]
fn properties() {
	let bytes = vorbis(&[], 44100, 44100 * 90);
	let file = VorbisFile::read_from(&mut Cursor::new(bytes), ParseOptions::new()).unwrap();

	let header = file.identification_header();
	assert_eq!(header.channels, 2);
	assert_eq!(header.sample_rate, 44100);
	assert_eq!(header.bitrate_nominal, 128_000);

	assert_eq!(file.duration(), Duration::from_secs(90));
	assert_eq!(file.average_bitrate(), 128_000);
	assert_eq!(file.properties().sample_rate(), 44100);
	assert_eq!(file.properties().channels(), 2);
}

#[test_log::test]
fn comment_picture() {
	let picture = BASE64.encode(&flac_picture(3, PNG_DATA));
	let field = format!("METADATA_BLOCK_PICTURE={picture}");

	let bytes = vorbis(&["TITLE=Foo title", field.as_str()], 48000, 48000);
	let file = VorbisFile::read_from(&mut Cursor::new(bytes.clone()), ParseOptions::new()).unwrap();

	let picture = file.picture().unwrap();
	assert_eq!(picture.pic_type(), PictureType::CoverFront);
	assert_eq!(picture.data(), PNG_DATA);

	// Pictures aren't kept as text
	assert!(file.vorbis_comments().unwrap().get("metadata_block_picture").is_none());

	let file = VorbisFile::read_from(
		&mut Cursor::new(bytes),
		ParseOptions::new().read_cover_art(false),
	)
	.unwrap();
	assert!(file.picture().is_none());
	assert_eq!(file.title().as_deref(), Some("Foo title"));
}

#[test_log::test]
fn read_no_tags() {
	let bytes = vorbis(COMMENTS, 44100, 44100 * 90);
	let file =
		VorbisFile::read_from(&mut Cursor::new(bytes), ParseOptions::new().read_tags(false))
			.unwrap();

	assert!(file.vorbis_comments().is_none());
	assert!(file.title().is_none());
	assert_eq!(file.tag_format(), TagFormat::Unknown);
	assert_eq!(file.duration(), Duration::from_secs(90));
}

#[test_log::test]
fn unterminated_stream() {
	let mut bytes = vorbis(COMMENTS, 44100, 44100 * 90);

	// Replace the final page with one that isn't flagged as the last
	let last_page = ogg_page(0, 44100 * 90, 3, &[0x22; 200]);
	let len = bytes.len();
	bytes.truncate(len - last_page.len());
	bytes.extend(last_page);

	let err = VorbisFile::read_from(&mut Cursor::new(bytes.clone()), ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::MalformedFinalPage));

	// Only the properties need the final page
	let file = VorbisFile::read_from(
		&mut Cursor::new(bytes.clone()),
		ParseOptions::new().read_properties(false),
	)
	.unwrap();
	assert_eq!(file.title().as_deref(), Some("Foo title"));

	// Relaxed keeps the tags, zeroing the properties
	let file = VorbisFile::read_from(
		&mut Cursor::new(bytes),
		ParseOptions::new().parsing_mode(ParsingMode::Relaxed),
	)
	.unwrap();
	assert_eq!(file.title().as_deref(), Some("Foo title"));
	assert_eq!(file.duration(), Duration::ZERO);
}

#[test_log::test]
fn probe() {
	let bytes = vorbis(COMMENTS, 44100, 44100 * 90);

	let tagged_file = read(&bytes, ParseOptions::new()).unwrap();
	assert_eq!(tagged_file.file_type(), Some(FileType::Vorbis));
	assert_eq!(tagged_file.title().as_deref(), Some("Foo title"));
}
