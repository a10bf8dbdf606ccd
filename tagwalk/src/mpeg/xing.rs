use crate::error::Result;
use crate::macros::decode_err;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

const FRAMES_FLAG: u8 = 0x01;
const BYTES_FLAG: u8 = 0x02;
const TOC_FLAG: u8 = 0x04;
const QUALITY_FLAG: u8 = 0x08;

/// The identifier of a [`XingHeader`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum XingId {
	/// `"Xing"`, usually written for VBR streams
	Xing,
	/// `"Info"`, usually written for CBR streams
	Info,
}

impl XingId {
	pub(super) fn from_bytes(id: [u8; 4]) -> Option<Self> {
		match &id {
			b"Xing" => Some(Self::Xing),
			b"Info" => Some(Self::Info),
			_ => None,
		}
	}
}

/// A Xing/Info header, found in the payload of the first MPEG frame
///
/// Every field is optional, only those flagged in the header are present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XingHeader {
	/// Whether this is a `"Xing"` or `"Info"` header
	pub id: XingId,
	/// The total number of frames in the stream
	pub frames: Option<u32>,
	/// The total number of bytes in the stream
	pub bytes: Option<u32>,
	/// The seek table
	pub toc: Option<Box<[u8; 100]>>,
	/// The encoder quality indicator
	pub quality: Option<u32>,
}

impl XingHeader {
	/// Read a Xing header, starting at its identifier
	///
	/// # Errors
	///
	/// * The identifier is neither `"Xing"` nor `"Info"`
	/// * The reader ends before every flagged field is read
	pub fn read<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let mut intro = [0; 8];
		reader.read_exact(&mut intro)?;

		let Some(id) = XingId::from_bytes([intro[0], intro[1], intro[2], intro[3]]) else {
			decode_err!(@BAIL Mpeg, "Xing header has an invalid identifier");
		};

		let flags = intro[7] & 0x0F;
		log::trace!("Reading Xing header, id: {id:?}, flags: {flags:#06b}");

		let mut header = Self {
			id,
			frames: None,
			bytes: None,
			toc: None,
			quality: None,
		};

		if flags & FRAMES_FLAG != 0 {
			header.frames = Some(reader.read_u32::<BigEndian>()?);
		}

		if flags & BYTES_FLAG != 0 {
			header.bytes = Some(reader.read_u32::<BigEndian>()?);
		}

		if flags & TOC_FLAG != 0 {
			let mut toc = Box::new([0; 100]);
			reader.read_exact(&mut *toc)?;
			header.toc = Some(toc);
		}

		if flags & QUALITY_FLAG != 0 {
			header.quality = Some(reader.read_u32::<BigEndian>()?);
		}

		Ok(header)
	}
}
