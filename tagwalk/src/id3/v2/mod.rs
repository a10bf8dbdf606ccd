//! ID3v2.2, ID3v2.3 and ID3v2.4 tags
//!
//! Tags are located with [`read_id3v2`], which returns `Ok(None)` when no tag header is present
//! at the current position. The result is an [`Id3v2Tag`], a list of decoded [`Frame`]s in the
//! order they appear in the tag.
//!
//! ## Frame IDs
//!
//! ID3v2.2 uses 3 character IDs, which are kept as-is (see [`FrameId::Outdated`]). The
//! [`Metadata`](crate::metadata::Metadata) accessors of [`Id3v2Tag`] pick the ID matching the
//! tag's version, so the title is `TT2` in ID3v2.2 and `TIT2` otherwise.
//!
//! ## Unsynchronisation
//!
//! Tag-wide unsynchronisation (ID3v2.2 and ID3v2.3) and per-frame unsynchronisation (ID3v2.4)
//! are both reversed before a frame's content is decoded.

mod frame;
pub(crate) mod genre;
pub(crate) mod header;
mod items;
pub(crate) mod read;
pub(crate) mod tag;
pub mod util;

pub use header::{Id3v2Header, Id3v2TagFlags, Id3v2Version};
pub use read::read_id3v2;

pub use tag::Id3v2Tag;

pub use items::*;

pub use frame::header::{FrameHeader, FrameId};
pub use frame::{Frame, FrameFlags};
