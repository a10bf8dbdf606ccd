//! Items for OGG container formats
//!
//! ## File notes
//!
//! The only supported codec is Vorbis, and the only supported tag format is [`VorbisComments`].
//! The comment decoder is shared with [`FlacFile`](crate::flac::FlacFile).

pub(crate) mod comments;
pub(crate) mod constants;
pub(crate) mod vorbis;

use crate::error::Result;
use crate::macros::err;

// Exports

pub use comments::VorbisComments;
pub use vorbis::VorbisFile;
pub use vorbis::properties::{VorbisIdentificationHeader, VorbisProperties};

fn verify_signature(content: &[u8], sig: &[u8]) -> Result<()> {
	if !content.starts_with(sig) {
		err!(MagicMismatch("Vorbis"));
	}

	Ok(())
}
