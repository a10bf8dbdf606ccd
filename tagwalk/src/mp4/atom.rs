use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::err;
use crate::util::io::ReadExt;

use std::fmt::{Debug, Display, Formatter};
use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

pub(super) const ATOM_HEADER_LEN: u64 = 8;
const EXTENDED_ATOM_HEADER_LEN: u64 = 16;

// Leaves that are kept in memory, everything else is skipped
const COPIED_LEAVES: [&[u8; 4]; 7] = [b"ftyp", b"mvhd", b"mp4a", b"esds", b"mean", b"name", b"data"];

/// Represents an `MP4` atom identifier
///
/// Many FOURCCs start with `0xA9` (©), these are displayed as Latin-1.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct AtomIdent(pub [u8; 4]);

impl AtomIdent {
	/// The raw FOURCC
	pub fn as_bytes(&self) -> &[u8; 4] {
		&self.0
	}
}

impl Display for AtomIdent {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for b in self.0 {
			write!(f, "{}", char::from(b))?;
		}

		Ok(())
	}
}

impl Debug for AtomIdent {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "AtomIdent(\"{self}\")")
	}
}

impl PartialEq<[u8; 4]> for AtomIdent {
	fn eq(&self, other: &[u8; 4]) -> bool {
		self.0 == *other
	}
}

/// A node in the atom tree
///
/// Containers have children and no data. Leaves only have data if they are one of the atoms
/// needed for decoding (`ftyp`, `mvhd`, `mp4a`, `esds`, `mean`, `name`, `data`), the contents of
/// every other leaf are skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Atom {
	pub(crate) ident: AtomIdent,
	pub(crate) len: u64,
	pub(crate) data: Option<Vec<u8>>,
	pub(crate) children: Vec<Atom>,
}

impl Atom {
	/// The atom's identifier
	pub fn ident(&self) -> AtomIdent {
		self.ident
	}

	/// The full length of the atom, including its header
	pub fn len(&self) -> u64 {
		self.len
	}

	/// The atom's content, if it was kept
	pub fn data(&self) -> Option<&[u8]> {
		self.data.as_deref()
	}

	/// The atom's children
	pub fn children(&self) -> &[Atom] {
		&self.children
	}

	/// Gets the first direct child with the identifier `ident`
	pub fn child(&self, ident: &[u8; 4]) -> Option<&Atom> {
		self.children.iter().find(|atom| atom.ident == *ident)
	}
}

/// Find the first atom with the identifier `ident`, searching depth first
pub(crate) fn find_atom<'a>(atoms: &'a [Atom], ident: &[u8; 4]) -> Option<&'a Atom> {
	for atom in atoms {
		if atom.ident == *ident {
			return Some(atom);
		}

		if let Some(found) = find_atom(&atom.children, ident) {
			return Some(found);
		}
	}

	None
}

// The number of bytes to skip before the children of a container, or `None` for leaves
fn container_prefix(ident: AtomIdent, parent_is_ilst: bool) -> Option<u64> {
	// Every item in `ilst` holds `data` (or `mean`/`name`) atoms
	if parent_is_ilst {
		return Some(0);
	}

	match &ident.0 {
		b"moov" | b"trak" | b"mdia" | b"minf" | b"stbl" | b"udta" | b"ilst" => Some(0),
		// Version (1) + flags (3)
		b"meta" => Some(4),
		// Version (1) + flags (3) + entry count (4)
		b"stsd" => Some(8),
		_ => None,
	}
}

struct AtomHeader {
	ident: AtomIdent,
	len: u64,
	header_len: u64,
}

impl AtomHeader {
	// `remaining` is what is left of the parent, including this header
	fn read<R>(reader: &mut R, remaining: u64) -> Result<Self>
	where
		R: Read,
	{
		let len_raw = reader.read_u32::<BigEndian>()?;

		let mut ident = [0; 4];
		reader.read_exact(&mut ident)?;
		let ident = AtomIdent(ident);

		let (len, header_len) = match len_raw {
			// The atom extends to the end of its parent
			0 => (remaining, ATOM_HEADER_LEN),
			1 => (reader.read_u64::<BigEndian>()?, EXTENDED_ATOM_HEADER_LEN),
			_ => (u64::from(len_raw), ATOM_HEADER_LEN),
		};

		if len < header_len {
			log::debug!("Atom {ident} has a length of {len}, smaller than its header");
			err!(BadAtom("Found an atom with an invalid length"));
		}

		log::trace!("Found atom {ident}, length: {len}");

		Ok(Self {
			ident,
			len,
			header_len,
		})
	}
}

/// Read every atom within the next `len` bytes
///
/// Trailing data too short for an atom header is skipped.
pub(crate) fn read_atoms<R>(reader: &mut R, len: u64, parse_mode: ParsingMode) -> Result<Vec<Atom>>
where
	R: Read + Seek,
{
	read_children(reader, len, false, parse_mode)
}

fn read_children<R>(
	reader: &mut R,
	mut remaining: u64,
	parent_is_ilst: bool,
	parse_mode: ParsingMode,
) -> Result<Vec<Atom>>
where
	R: Read + Seek,
{
	let mut atoms = Vec::new();
	let parent_end = reader.stream_position()? + remaining;

	while remaining >= ATOM_HEADER_LEN {
		let header = AtomHeader::read(reader, remaining)?;

		if header.len > remaining {
			if parse_mode == ParsingMode::Strict {
				err!(BadAtom("Atom is larger than its parent"));
			}

			log::warn!(
				"Atom {} has a length of {}, but only {remaining} bytes remain, skipping the rest",
				header.ident,
				header.len
			);

			// An extended header may have already read past the parent
			reader.seek(SeekFrom::Start(parent_end))?;
			return Ok(atoms);
		}

		remaining -= header.len;

		let content_len = header.len - header.header_len;
		let atom = match container_prefix(header.ident, parent_is_ilst) {
			Some(prefix) => {
				if content_len < prefix {
					err!(BadAtom("Container atom is too small"));
				}

				reader.seek(SeekFrom::Current(prefix as i64))?;

				let children = read_children(
					reader,
					content_len - prefix,
					header.ident == *b"ilst",
					parse_mode,
				)?;

				Atom {
					ident: header.ident,
					len: header.len,
					data: None,
					children,
				}
			},
			None => {
				let data = if COPIED_LEAVES.contains(&header.ident.as_bytes()) {
					Some(reader.read_vec(content_len as usize)?)
				} else {
					log::trace!("Skipping atom {}", header.ident);
					reader.seek(SeekFrom::Current(content_len as i64))?;
					None
				};

				Atom {
					ident: header.ident,
					len: header.len,
					data,
					children: Vec::new(),
				}
			},
		};

		atoms.push(atom);
	}

	if remaining > 0 {
		log::trace!("Skipping {remaining} trailing bytes");
		reader.seek(SeekFrom::Current(remaining as i64))?;
	}

	Ok(atoms)
}


#[cfg(test)]
mod tests {
	use super::test_utils::atom;
	use super::{AtomIdent, find_atom, read_atoms};
	use crate::config::ParsingMode;
	use crate::error::ErrorKind;

	use std::io::Cursor;

	fn read(bytes: &[u8], parse_mode: ParsingMode) -> crate::error::Result<Vec<super::Atom>> {
		read_atoms(&mut Cursor::new(bytes), bytes.len() as u64, parse_mode)
	}

	#[test_log::test]
	fn containers_and_leaves() {
		let mut meta = vec![0; 4];
		meta.extend(atom(b"ilst", &atom(b"\xA9nam", &atom(b"data", b"payload"))));

		let mut moov = atom(b"mvhd", &[1; 20]);
		moov.extend(atom(b"udta", &atom(b"meta", &meta)));
		moov.extend(atom(b"skip", &[0xFF; 10]));

		let mut bytes = atom(b"ftyp", b"M4A \0\0\0\0");
		bytes.extend(atom(b"moov", &moov));
		bytes.extend(atom(b"mdat", &[0; 32]));

		let atoms = read(&bytes, ParsingMode::BestAttempt).unwrap();
		assert_eq!(atoms.len(), 3);
		assert_eq!(atoms[0].data(), Some(&b"M4A \0\0\0\0"[..]));

		// Skipped leaves are kept, without their content
		assert_eq!(atoms[2].ident(), AtomIdent(*b"mdat"));
		assert_eq!(atoms[2].len(), 40);
		assert!(atoms[2].data().is_none());

		let moov = &atoms[1];
		assert_eq!(moov.children().len(), 3);
		assert!(moov.child(b"skip").unwrap().data().is_none());

		let item = find_atom(&atoms, b"\xA9nam").unwrap();
		assert_eq!(item.child(b"data").unwrap().data(), Some(&b"payload"[..]));
	}

	#[test_log::test]
	fn extended_and_open_ended_lengths() {
		let mut bytes = Vec::new();
		bytes.extend(1_u32.to_be_bytes());
		bytes.extend(b"ftyp");
		bytes.extend(24_u64.to_be_bytes());
		bytes.extend(b"M4B \0\0\0\0");

		// A length of 0 extends to the end of the stream
		bytes.extend(0_u32.to_be_bytes());
		bytes.extend(b"mdat");
		bytes.extend([0; 100]);

		let atoms = read(&bytes, ParsingMode::Strict).unwrap();
		assert_eq!(atoms[0].data(), Some(&b"M4B \0\0\0\0"[..]));
		assert_eq!(atoms[1].len(), 108);
	}

	#[test_log::test]
	fn trailing_bytes_are_ignored() {
		let mut bytes = atom(b"ftyp", b"M4A \0\0\0\0");
		bytes.extend([0; 5]);

		let atoms = read(&bytes, ParsingMode::Strict).unwrap();
		assert_eq!(atoms.len(), 1);
	}

	#[test_log::test]
	fn invalid_lengths() {
		let mut bytes = 4_u32.to_be_bytes().to_vec();
		bytes.extend(b"free");
		let err = read(&bytes, ParsingMode::Relaxed).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::BadAtom(_)));

		// A child larger than its parent
		let mut child = atom(b"data", &[0; 4]);
		child[3] = 200;
		let bytes = atom(b"moov", &child);

		let err = read(&bytes, ParsingMode::Strict).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::BadAtom(_)));

		let atoms = read(&bytes, ParsingMode::BestAttempt).unwrap();
		assert!(atoms[0].children().is_empty());
	}

	#[test_log::test]
	fn extended_header_past_parent() {
		// The child's 64-bit length runs into the next atom
		let mut child = 1_u32.to_be_bytes().to_vec();
		child.extend(b"free");
		child.extend([0; 4]);

		let mut bytes = atom(b"moov", &child);
		bytes.extend(atom(b"mdat", &[0; 92]));

		let err = read(&bytes, ParsingMode::Strict).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::BadAtom(_)));

		let atoms = read(&bytes, ParsingMode::BestAttempt).unwrap();
		assert_eq!(atoms.len(), 2);
		assert!(atoms[0].children().is_empty());
		assert_eq!(atoms[1].ident(), AtomIdent(*b"mdat"));
		assert_eq!(atoms[1].len(), 100);
	}
}
