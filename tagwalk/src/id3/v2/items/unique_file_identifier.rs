use crate::error::Result;
use crate::macros::err;
use crate::util::text::latin1_decode;

/// An `ID3v2` unique file identifier frame (UFID)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UniqueFileIdentifierFrame {
	/// The non-empty owner of the identifier
	pub owner: String,
	/// The binary payload, up to 64 bytes
	pub identifier: Vec<u8>,
}

impl UniqueFileIdentifierFrame {
	/// Read a [`UniqueFileIdentifierFrame`] from frame content
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// The owner has no null terminator
	pub fn parse(content: &[u8]) -> Result<Self> {
		let Some(split) = content.iter().position(|b| *b == 0) else {
			err!(InvalidFieldEncoding("UFID owner"));
		};

		Ok(Self {
			owner: latin1_decode(&content[..split]),
			identifier: content[split + 1..].to_vec(),
		})
	}
}
