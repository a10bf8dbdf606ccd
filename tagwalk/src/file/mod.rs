//! Generic file handling utilities

mod file_type;
mod tagged_file;

pub use file_type::FileType;
pub use tagged_file::TaggedFile;

/// The specific flavor of a file, beyond its container
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum FileSubtype {
	/// The subtype couldn't be determined
	#[default]
	Unknown,
	/// MPEG-1/2 Audio Layer I
	Mp1,
	/// MPEG-1/2 Audio Layer II
	Mp2,
	/// MPEG-1/2 Audio Layer III
	Mp3,
	/// An MP4 with an `M4A ` major brand
	M4a,
	/// An MP4 audiobook, with an `M4B ` major brand
	M4b,
	/// A protected MP4, with an `M4P ` major brand
	M4p,
	/// FLAC
	Flac,
	/// Ogg Vorbis
	Ogg,
}

/// The format of the tag backing a [`Metadata`](crate::metadata::Metadata) view
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
#[allow(non_camel_case_types)]
pub enum TagFormat {
	/// No tag was found
	#[default]
	Unknown,
	/// ID3v1
	Id3v1,
	/// ID3v2.2
	Id3v2_2,
	/// ID3v2.3
	Id3v2_3,
	/// ID3v2.4
	Id3v2_4,
	/// iTunes-style MP4 metadata (`ilst`)
	Mp4,
	/// Vorbis comments, used by both Ogg Vorbis and FLAC
	Vorbis,
}
