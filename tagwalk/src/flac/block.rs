use crate::error::Result;
use crate::util::io::ReadExt;

use std::io::{Read, Seek, SeekFrom};

use byteorder::ReadBytesExt;

pub(in crate::flac) const BLOCK_ID_STREAMINFO: u8 = 0;
pub(in crate::flac) const BLOCK_ID_VORBIS_COMMENTS: u8 = 4;
pub(in crate::flac) const BLOCK_ID_PICTURE: u8 = 6;

pub(in crate::flac) struct Block {
	pub(in crate::flac) ty: u8,
	pub(in crate::flac) last: bool,
	pub(in crate::flac) len: u32,
	/// Empty unless the predicate asked for the content
	pub(in crate::flac) content: Vec<u8>,
}

impl Block {
	/// Read a block header, and the content of the block if `predicate` accepts its type
	///
	/// The reader is always left at the end of the block.
	pub(in crate::flac) fn read<R, P>(data: &mut R, mut predicate: P) -> Result<Self>
	where
		R: Read + Seek,
		P: FnMut(u8) -> bool,
	{
		let byte = data.read_u8()?;
		let last = (byte & 0x80) != 0;
		let ty = byte & 0x7F;

		let len = data.read_u24_be()?;
		log::trace!("Reading FLAC block, type: {ty}, size: {len}");

		let content = if predicate(ty) {
			data.read_vec(len as usize)?
		} else {
			data.seek(SeekFrom::Current(i64::from(len)))?;
			Vec::new()
		};

		Ok(Self {
			ty,
			last,
			len,
			content,
		})
	}
}
