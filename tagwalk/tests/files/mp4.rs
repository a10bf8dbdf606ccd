use crate::util::{PNG_DATA, atom, freeform_item, ilst_item, mp4, read};

use std::io::Cursor;
use std::time::Duration;

use tagwalk::config::{ParseOptions, ParsingMode};
use tagwalk::file::{FileSubtype, FileType, TagFormat};
use tagwalk::metadata::RawValue;
use tagwalk::mp4::{AtomIdent, Mp4File, Mp4Value};
use tagwalk::picture::{MimeType, PictureType};
use tagwalk::prelude::*;

fn full_test_m4a() -> Vec<u8> {
	mp4(
		b"M4A ",
		183,
		&[
			ilst_item(b"\xA9nam", 1, b"Foo title"),
			ilst_item(b"\xA9ART", 1, b"Bar artist"),
			ilst_item(b"\xA9alb", 1, b"Baz album"),
			ilst_item(b"aART", 1, b"Album artist"),
			ilst_item(b"\xA9day", 1, b"1984"),
			ilst_item(b"trkn", 0, &[0, 0, 0, 1, 0, 10, 0, 0]),
			ilst_item(b"disk", 0, &[0, 0, 0, 2, 0, 2]),
			ilst_item(b"tmpo", 21, &[0, 120]),
			ilst_item(b"gnre", 0, &[0, 9]),
			ilst_item(b"covr", 14, PNG_DATA),
			freeform_item("com.apple.iTunes", "MusicBrainz Track Id", "abcd-1234"),
		],
	)
}

#[test_log::test]
fn read_file() {
	let file = Mp4File::read_from(&mut Cursor::new(full_test_m4a()), ParseOptions::new()).unwrap();

	assert_eq!(file.title().as_deref(), Some("Foo title"));
	assert_eq!(file.artist().as_deref(), Some("Bar artist"));
	assert_eq!(file.album().as_deref(), Some("Baz album"));
	assert_eq!(file.album_artist().as_deref(), Some("Album artist"));
	assert_eq!(file.year(), Some(1984));
	assert_eq!(file.track(), Some(1));
	assert_eq!(file.track_total(), Some(10));
	assert_eq!(file.disk(), Some(2));
	assert_eq!(file.disk_total(), Some(2));
	// The `gnre` index is upgraded to a name
	assert_eq!(file.genre().as_deref(), Some("Jazz"));

	let picture = file.picture().unwrap();
	assert_eq!(picture.pic_type(), PictureType::CoverFront);
	assert_eq!(picture.mime_type(), Some(&MimeType::Png));

	let ilst = file.ilst().unwrap();
	assert_eq!(ilst.text(b"\xA9alb"), Some("Baz album"));
	assert_eq!(ilst.get(b"tmpo"), Some(&Mp4Value::Integer(120)));
	assert_eq!(
		ilst.get_freeform("MusicBrainz Track Id"),
		Some(&Mp4Value::Text(String::from("abcd-1234")))
	);

	assert_eq!(file.tag_format(), TagFormat::Mp4);
	assert_eq!(file.file_subtype(), FileSubtype::M4a);

	let raw = file.raw();
	assert!(raw.contains(&("MusicBrainz Track Id".into(), RawValue::Text("abcd-1234".into()))));
	assert!(raw.contains(&("tmpo".into(), RawValue::Integer(120))));
}

#[test_log::test]
fn properties() {
	let file = Mp4File::read_from(&mut Cursor::new(full_test_m4a()), ParseOptions::new()).unwrap();

	assert_eq!(file.duration(), Duration::from_secs(183));
	assert_eq!(file.average_bitrate(), 192_000);
	assert_eq!(file.properties().sample_rate(), 48000);
	assert_eq!(file.properties().channels(), 2);

	let ftyp = file.ftyp();
	assert_eq!(ftyp.major_brand, *b"M4A ");

	assert!(file.atoms().iter().any(|atom| atom.ident() == AtomIdent(*b"mdat")));
}

#[test_log::test]
fn read_no_tags() {
	let file = Mp4File::read_from(
		&mut Cursor::new(full_test_m4a()),
		ParseOptions::new().read_tags(false),
	)
	.unwrap();

	assert!(file.ilst().is_none());
	assert!(file.title().is_none());
	assert!(file.raw().is_empty());
	assert_eq!(file.duration(), Duration::from_secs(183));
}

#[test_log::test]
fn read_no_cover_art() {
	let file = Mp4File::read_from(
		&mut Cursor::new(full_test_m4a()),
		ParseOptions::new().read_cover_art(false),
	)
	.unwrap();

	assert!(file.picture().is_none());
	assert_eq!(file.title().as_deref(), Some("Foo title"));
}

#[test_log::test]
fn audiobook() {
	let bytes = mp4(b"M4B ", 3600, &[ilst_item(b"\xA9nam", 1, b"Chapter one")]);

	let tagged_file = read(&bytes, ParseOptions::new()).unwrap();
	assert_eq!(tagged_file.file_type(), Some(FileType::Mp4));
	assert_eq!(tagged_file.file_subtype(), FileSubtype::M4b);
	assert_eq!(tagged_file.title().as_deref(), Some("Chapter one"));
	assert_eq!(tagged_file.duration(), Duration::from_secs(3600));
}

#[test_log::test]
fn oversized_atom() {
	let mut bytes = full_test_m4a();

	// Claim the trailing `mdat` is far larger than the file
	let mdat_start = bytes.len() - 264;
	assert_eq!(&bytes[mdat_start + 4..mdat_start + 8], b"mdat");
	bytes[mdat_start..mdat_start + 4].copy_from_slice(&0x00FF_FFFF_u32.to_be_bytes());

	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	assert!(Mp4File::read_from(&mut Cursor::new(bytes.clone()), strict).is_err());

	let file = Mp4File::read_from(&mut Cursor::new(bytes), ParseOptions::new()).unwrap();
	assert_eq!(file.title().as_deref(), Some("Foo title"));
}

#[test_log::test]
fn not_an_mp4() {
	let bytes = atom(b"moov", &[0; 16]);
	assert!(Mp4File::read_from(&mut Cursor::new(bytes), ParseOptions::new()).is_err());
}
