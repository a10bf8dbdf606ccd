//! MP4 specific items
//!
//! ## File notes
//!
//! The whole atom tree is read up front, keeping only the contents of the atoms needed for
//! decoding. Metadata is read from the iTunes-style `ilst` atom, found anywhere in the tree
//! (usually `moov.udta.meta.ilst`).

mod atom;
mod ilst;
mod properties;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{FileSubtype, TagFormat};
use crate::macros::err;
use crate::metadata::{Metadata, RawValue, preferred_picture};
use crate::picture::Picture;
use crate::util::io::SeekStreamLen;

use std::borrow::Cow;
use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use atom::{find_atom, read_atoms};

// Exports

pub use atom::{Atom, AtomIdent};
pub use ilst::{Ilst, ItemKey, Mp4Value};
pub use properties::{
	EsdsDescriptor, Ftyp, MovieHeader, Mp4Properties, Mp4aDescription, SoundDescriptionV1,
};

/// An MP4 file
///
/// ## Notes on the [`Metadata`] implementation
///
/// * The artist is read from `©ART`, falling back to `©art`.
/// * The genre is read from `©gen`, falling back to the index stored in `gnre`.
/// * The year is read from the first 4 characters of `©day`.
/// * Track and disk totals of 0 are treated as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mp4File {
	pub(crate) atoms: Vec<Atom>,
	pub(crate) ftyp: Ftyp,
	pub(crate) movie_header: Option<MovieHeader>,
	pub(crate) audio: Option<Mp4aDescription>,
	pub(crate) esds: Option<EsdsDescriptor>,
	pub(crate) ilst: Option<Ilst>,
	pub(crate) properties: Mp4Properties,
}

impl Mp4File {
	/// Read an MP4 file from `reader`
	///
	/// # Errors
	///
	/// * The stream doesn't start with an `ftyp` atom ([`ErrorKind::MagicMismatch`](crate::error::ErrorKind::MagicMismatch))
	/// * The atom tree is malformed
	/// * One of the decoded atoms (`ftyp`, `mvhd`, `mp4a`, `esds`, `ilst`) is malformed
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		let start = reader.stream_position()?;

		let mut header = [0; 8];
		reader.read_exact(&mut header)?;
		if &header[4..] != b"ftyp" {
			err!(MagicMismatch("MP4"));
		}

		reader.seek(SeekFrom::Start(start))?;

		let len = reader.stream_len_hack()? - start;
		let atoms = read_atoms(reader, len, parse_options.parsing_mode)?;
		log::debug!("Read {} top level atoms", atoms.len());

		let ftyp = Ftyp::parse(atoms.first().and_then(Atom::data).unwrap_or_default())?;

		let mut file = Self {
			ftyp,
			movie_header: None,
			audio: None,
			esds: None,
			ilst: None,
			properties: Mp4Properties::default(),
			atoms: Vec::new(),
		};

		if parse_options.read_properties {
			if let Some(mvhd) = find_atom(&atoms, b"mvhd").and_then(Atom::data) {
				file.movie_header = Some(MovieHeader::parse(mvhd)?);
			}

			if let Some(mp4a) = find_atom(&atoms, b"mp4a").and_then(Atom::data) {
				let (audio, esds) = Mp4aDescription::parse(mp4a, parse_options.parsing_mode)?;
				file.audio = Some(audio);
				file.esds = esds;
			}

			file.properties = properties::read_properties(
				file.movie_header.as_ref(),
				file.audio.as_ref(),
				file.esds.as_ref(),
			);
		}

		if parse_options.read_tags {
			if let Some(ilst) = find_atom(&atoms, b"ilst") {
				file.ilst = Some(Ilst::parse(ilst, parse_options)?);
			}
		}

		file.atoms = atoms;
		Ok(file)
	}

	/// The top level atoms
	pub fn atoms(&self) -> &[Atom] {
		&self.atoms
	}

	/// The file type box
	pub fn ftyp(&self) -> &Ftyp {
		&self.ftyp
	}

	/// The movie header, if properties were read
	pub fn movie_header(&self) -> Option<&MovieHeader> {
		self.movie_header.as_ref()
	}

	/// The `mp4a` sample description, if properties were read
	pub fn audio(&self) -> Option<&Mp4aDescription> {
		self.audio.as_ref()
	}

	/// The elementary stream descriptor of the `mp4a` description
	pub fn esds(&self) -> Option<&EsdsDescriptor> {
		self.esds.as_ref()
	}

	/// The metadata list
	pub fn ilst(&self) -> Option<&Ilst> {
		self.ilst.as_ref()
	}

	/// The file's audio properties
	pub fn properties(&self) -> &Mp4Properties {
		&self.properties
	}

	fn text(&self, ident: &[u8; 4]) -> Option<Cow<'_, str>> {
		self.ilst.as_ref()?.text(ident).map(Cow::Borrowed)
	}

	fn pair(&self, ident: &[u8; 4]) -> Option<(u32, u32)> {
		match self.ilst.as_ref()?.get(ident)? {
			Mp4Value::Pair(number, total) => Some((*number, *total)),
			_ => None,
		}
	}
}

fn non_zero(value: u32) -> Option<u32> {
	(value != 0).then_some(value)
}

impl Metadata for Mp4File {
	fn title(&self) -> Option<Cow<'_, str>> {
		self.text(b"\xA9nam")
	}

	fn artist(&self) -> Option<Cow<'_, str>> {
		self.text(b"\xA9ART").or_else(|| self.text(b"\xA9art"))
	}

	fn album(&self) -> Option<Cow<'_, str>> {
		self.text(b"\xA9alb")
	}

	fn album_artist(&self) -> Option<Cow<'_, str>> {
		self.text(b"aART")
	}

	fn composer(&self) -> Option<Cow<'_, str>> {
		self.text(b"\xA9wrt")
	}

	fn genre(&self) -> Option<Cow<'_, str>> {
		self.text(b"\xA9gen").or_else(|| {
			self.ilst
				.as_ref()
				.and_then(ilst::gnre_genre)
				.map(Cow::Borrowed)
		})
	}

	fn comment(&self) -> Option<Cow<'_, str>> {
		self.text(b"\xA9cmt")
	}

	fn lyrics(&self) -> Option<Cow<'_, str>> {
		self.text(b"\xA9lyr")
	}

	fn year(&self) -> Option<u32> {
		let date = self.text(b"\xA9day")?;
		date.get(..4)?.parse().ok()
	}

	fn track(&self) -> Option<u32> {
		self.pair(b"trkn").and_then(|(number, _)| non_zero(number))
	}

	fn track_total(&self) -> Option<u32> {
		self.pair(b"trkn").and_then(|(_, total)| non_zero(total))
	}

	fn disk(&self) -> Option<u32> {
		self.pair(b"disk").and_then(|(number, _)| non_zero(number))
	}

	fn disk_total(&self) -> Option<u32> {
		self.pair(b"disk").and_then(|(_, total)| non_zero(total))
	}

	fn picture(&self) -> Option<&Picture> {
		preferred_picture(self.ilst.as_ref()?.pictures())
	}

	fn duration(&self) -> Duration {
		self.properties.duration
	}

	fn average_bitrate(&self) -> u32 {
		self.properties.average_bitrate
	}

	fn file_subtype(&self) -> FileSubtype {
		self.ftyp.subtype()
	}

	fn tag_format(&self) -> TagFormat {
		match self.ilst {
			Some(_) => TagFormat::Mp4,
			None => TagFormat::Unknown,
		}
	}

	fn raw(&self) -> Vec<(Cow<'_, str>, RawValue<'_>)> {
		let Some(ilst) = &self.ilst else {
			return Vec::new();
		};

		ilst.items()
			.map(|(key, value)| {
				let key = match key {
					ItemKey::Freeform(name) => Cow::Borrowed(name.as_str()),
					ItemKey::Atom(_) => Cow::Owned(key.to_string()),
				};

				let value = match value {
					Mp4Value::Text(text) => RawValue::Text(Cow::Borrowed(text)),
					Mp4Value::Integer(integer) => RawValue::Integer(*integer),
					Mp4Value::Pair(number, total) => RawValue::Pair(*number, *total),
					Mp4Value::Binary(data) => RawValue::Binary(data),
					Mp4Value::Picture(picture) => RawValue::Picture(picture),
				};

				(key, value)
			})
			.collect()
	}
}

#[cfg(test)]
pub(crate) mod test_utils {
	pub(crate) use super::atom::test_utils::atom;
	pub(crate) use super::properties::test_utils::{esds, mp4a_v0};

	pub(crate) fn data(code: u32, payload: &[u8]) -> Vec<u8> {
		let mut content = code.to_be_bytes().to_vec();
		content.extend([0; 4]);
		content.extend(payload);
		atom(b"data", &content)
	}

	pub(crate) fn mvhd(time_scale: u32, duration: u32) -> Vec<u8> {
		let mut content = vec![0; 100];
		content[12..16].copy_from_slice(&time_scale.to_be_bytes());
		content[16..20].copy_from_slice(&duration.to_be_bytes());
		atom(b"mvhd", &content)
	}

	/// A complete file: `ftyp`, then `moov` with a movie header, an `mp4a` description and an `ilst`
	pub(crate) fn file(brand: &[u8; 4], ilst_items: &[Vec<u8>]) -> Vec<u8> {
		let mut ftyp = brand.to_vec();
		ftyp.extend([0; 4]);
		ftyp.extend(b"M4A mp42isom");

		let mut stsd = vec![0; 8];
		stsd.extend(mp4a_v0(2, 44100, &esds(256_000, 0, false)));
		let stbl = atom(b"stbl", &atom(b"stsd", &stsd));
		let trak = atom(b"trak", &atom(b"mdia", &atom(b"minf", &stbl)));

		let mut meta = vec![0; 4];
		meta.extend(atom(b"hdlr", &[0; 25]));
		meta.extend(atom(b"ilst", &ilst_items.concat()));

		let mut moov = mvhd(44100, 44100 * 200);
		moov.extend(trak);
		moov.extend(atom(b"udta", &atom(b"meta", &meta)));

		let mut file = atom(b"ftyp", &ftyp);
		file.extend(atom(b"moov", &moov));
		file.extend(atom(b"mdat", &[0; 64]));
		file
	}
}

#[cfg(test)]
mod tests {
	use super::Mp4File;
	use super::test_utils::{atom, data, file};
	use crate::config::ParseOptions;
	use crate::error::ErrorKind;
	use crate::file::{FileSubtype, TagFormat};
	use crate::metadata::{Metadata, RawValue};
	use crate::picture::MimeType;

	use std::io::Cursor;
	use std::time::Duration;

	fn read(bytes: Vec<u8>, parse_options: ParseOptions) -> crate::error::Result<Mp4File> {
		Mp4File::read_from(&mut Cursor::new(bytes), parse_options)
	}

	#[test_log::test]
	fn full_file() {
		let bytes = file(
			b"M4A ",
			&[
				atom(b"\xA9nam", &data(1, b"Foo title")),
				atom(b"\xA9art", &data(1, b"Bar artist")),
				atom(b"\xA9day", &data(1, b"2011-03-04T00:00:00Z")),
				atom(b"trkn", &data(0, &[0, 0, 0, 3, 0, 12, 0, 0])),
				atom(b"disk", &data(0, &[0, 0, 0, 1, 0, 0])),
				atom(b"gnre", &data(0, &[0, 18])),
				atom(b"covr", &data(13, &[0xFF, 0xD8, 0xFF, 0xE0])),
			],
		);

		let file = read(bytes, ParseOptions::new()).unwrap();

		assert_eq!(file.title().as_deref(), Some("Foo title"));
		assert_eq!(file.artist().as_deref(), Some("Bar artist"));
		assert_eq!(file.year(), Some(2011));
		assert_eq!(file.track(), Some(3));
		assert_eq!(file.track_total(), Some(12));
		assert_eq!(file.disk(), Some(1));
		assert_eq!(file.disk_total(), None);
		assert_eq!(file.genre().as_deref(), Some("Rock"));
		assert_eq!(file.picture().unwrap().mime_type(), Some(&MimeType::Jpeg));

		assert_eq!(file.duration(), Duration::from_secs(200));
		assert_eq!(file.average_bitrate(), 256_000);
		assert_eq!(file.properties().sample_rate(), 44100);
		assert_eq!(file.properties().channels(), 2);
		assert_eq!(file.file_subtype(), FileSubtype::M4a);
		assert_eq!(file.tag_format(), TagFormat::Mp4);

		let raw = file.raw();
		assert_eq!(raw[0].0, "©nam");
		assert_eq!(raw[0].1, RawValue::Text("Foo title".into()));
		assert_eq!(raw[3].1, RawValue::Pair(3, 12));
	}

	#[test_log::test]
	fn options() {
		let items = [atom(b"\xA9nam", &data(1, b"Foo title"))];

		let audiobook = read(file(b"M4B ", &items), ParseOptions::new().read_tags(false)).unwrap();
		assert!(audiobook.ilst().is_none());
		assert_eq!(audiobook.tag_format(), TagFormat::Unknown);
		assert_eq!(audiobook.file_subtype(), FileSubtype::M4b);

		let protected =
			read(file(b"M4P ", &items), ParseOptions::new().read_properties(false)).unwrap();
		assert!(protected.movie_header().is_none());
		assert_eq!(protected.duration(), Duration::ZERO);
		assert_eq!(protected.title().as_deref(), Some("Foo title"));
	}

	#[test_log::test]
	fn missing_ftyp() {
		let bytes = atom(b"moov", &atom(b"mvhd", &[0; 100]));
		let err = read(bytes, ParseOptions::new()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::MagicMismatch(_)));
	}
}
