//! Read metadata and audio properties from audio files.
//!
//! # Supported Formats
//!
//! | File Format | Container       | Tags                  | Properties            |
//! |-------------|-----------------|-----------------------|-----------------------|
//! | MP3/MP2/MP1 | MPEG audio      | ID3v2, ID3v1          | Frame header, Xing    |
//! | MP4         | ISO base media  | iTunes-style `ilst`   | `mvhd`, `mp4a`/`esds` |
//! | FLAC        | FLAC            | Vorbis Comments       | `STREAMINFO`          |
//! | Vorbis      | OGG             | Vorbis Comments       | Identification header |
//!
//! Streams of an unknown format are checked for a trailing ID3v1 tag.
//!
//! tagwalk never writes. Every reader only requires `Read + Seek`.
//!
//! # Examples
//!
//! ## Reading a generic file
//!
//! It isn't always convenient to [use concrete file types](#using-concrete-file-types), which is
//! where [`TaggedFile`](file::TaggedFile) comes in.
//!
//! ### Using a path
//!
//! ```rust,no_run
//! # fn main() -> tagwalk::error::Result<()> {
//! use tagwalk::config::ParseOptions;
//! use tagwalk::read_from_path;
//!
//! // The format is always guessed from the content
//! let tagged_file = read_from_path("test.mp3", ParseOptions::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Using an existing reader
//!
//! ```rust,no_run
//! # fn main() -> tagwalk::error::Result<()> {
//! use std::fs::File;
//! use tagwalk::config::ParseOptions;
//! use tagwalk::read_from;
//!
//! let mut file = File::open("test.flac")?;
//! let tagged_file = read_from(&mut file, ParseOptions::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Accessing items
//!
//! ```rust,no_run
//! # fn main() -> tagwalk::error::Result<()> {
//! use tagwalk::config::ParseOptions;
//! use tagwalk::prelude::*;
//! use tagwalk::read_from_path;
//!
//! let tagged_file = read_from_path("test.m4a", ParseOptions::new())?;
//!
//! let title = tagged_file.title();
//! let track = tagged_file.track();
//!
//! // Everything the tag holds, in its native keys
//! for (key, value) in tagged_file.raw() {
//! 	println!("{key}: {value:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Using concrete file types
//!
//! ```rust,no_run
//! # fn main() -> tagwalk::error::Result<()> {
//! use std::fs::File;
//! use tagwalk::config::ParseOptions;
//! use tagwalk::mpeg::MpegFile;
//!
//! let mut file_content = File::open("test.mp3")?;
//!
//! // We are expecting an MP3 file
//! let mp3_file = MpegFile::read_from(&mut file_content, ParseOptions::new())?;
//!
//! println!("Channels: {}", mp3_file.properties().channels());
//! println!("Has ID3v2: {}", mp3_file.id3v2().is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Important format-specific notes
//!
//! All formats have their own quirks. Be sure to read the module documentation of each format.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod file;
pub(crate) mod macros;
pub mod metadata;
pub mod picture;
pub mod probe;
mod util;

pub mod flac;
pub mod id3;
pub mod mp4;
pub mod mpeg;
pub mod ogg;

pub use crate::probe::{read_from, read_from_path};

pub use util::text::TextEncoding;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use tagwalk::prelude::*;
	//! ```

	pub use crate::file::{FileType, TaggedFile};
	pub use crate::metadata::Metadata;
}
