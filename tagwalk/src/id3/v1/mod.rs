//! ID3v1 items
//!
//! # ID3v1 notes
//!
//! See also: [`Id3v1Tag`]
//!
//! ## Genres
//!
//! ID3v1 stores the genre in a single byte, an index into the [`GENRES`] list. Unknown indices
//! are discarded.
//!
//! ## Track Numbers
//!
//! ID3v1.1 stores a track number in the last byte of the comment, when the byte before it is zero.

pub(crate) mod constants;
pub(crate) mod read;
pub(crate) mod tag;

// Exports

pub use constants::GENRES;
pub use read::read_id3v1;
pub use tag::Id3v1Tag;
