//! A format-agnostic view of tags and audio properties
//!
//! Every tag and file type in tagwalk implements [`Metadata`], so common values can be read
//! without knowing where they came from:
//!
//! ```rust,no_run
//! use tagwalk::config::ParseOptions;
//! use tagwalk::metadata::Metadata;
//!
//! # fn main() -> tagwalk::error::Result<()> {
//! let tagged_file = tagwalk::read_from_path("foo.mp3", ParseOptions::new())?;
//!
//! if let Some(title) = tagged_file.title() {
//! 	println!("Title: {title}");
//! }
//!
//! println!("Duration: {:?}", tagged_file.duration());
//! # Ok(()) }
//! ```

use crate::file::{FileSubtype, TagFormat};
use crate::picture::Picture;

use std::borrow::Cow;
use std::time::Duration;

/// A raw tag value, as returned by [`Metadata::raw`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawValue<'a> {
	/// A text value
	Text(Cow<'a, str>),
	/// An integer value
	Integer(i64),
	/// A number and total pair, such as a track number
	Pair(u32, u32),
	/// Binary data with no further interpretation
	Binary(&'a [u8]),
	/// An embedded picture
	Picture(&'a Picture),
}

// This defines the `Metadata` trait.
//
// Usage:
//
// metadata_trait! {
//     [field_name]<type>
// }
//
// * `field_name` is the name of the getter. Names with multiple segments, such as `track_total`,
// are separated by spaces: [track total]<type>.
//
// * `type` is the getter's return type, wrapped in an `Option`.
macro_rules! metadata_trait {
	($([$($name:tt)+] < $ty:ty >),+ $(,)?) => {
		/// Provides accessors for common items and properties
		///
		/// Values that a format doesn't carry are `None` (or zero for the audio properties).
		///
		/// For formats that support multiple definitions of the same item, the accessors only return
		/// one of them. To get at all of them, use [`Metadata::raw`] or the format-specific methods.
		pub trait Metadata {
			$(
				metadata_trait! { @GET_METHOD [$($name)+] $ty }
			)+

			/// Returns the embedded picture, preferring the front cover
			fn picture(&self) -> Option<&Picture> {
				None
			}

			/// The duration of the audio
			///
			/// This is [`Duration::ZERO`] if the duration can't be determined.
			fn duration(&self) -> Duration {
				Duration::ZERO
			}

			/// The average bitrate of the audio, in bits per second
			fn average_bitrate(&self) -> u32 {
				0
			}

			/// The subtype of the file
			fn file_subtype(&self) -> FileSubtype {
				FileSubtype::Unknown
			}

			/// The format of the tag the values are read from
			fn tag_format(&self) -> TagFormat;

			/// All values of the tag, in the order they were read
			///
			/// The keys are the native keys of the tag format (ex. `TIT2` for ID3v2.3, `©nam` for MP4).
			fn raw(&self) -> Vec<(Cow<'_, str>, RawValue<'_>)>;
		}
	};
	(@GET_METHOD [$name:tt $($other:tt)*] $ret_ty:ty) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)* "."]
			///
			/// # Example
			///
			/// ```rust
			/// use tagwalk::id3::v1::Id3v1Tag;
			/// use tagwalk::metadata::Metadata;
			///
			/// let tag = Id3v1Tag::default();
			#[doc = "assert_eq!(tag." $name $(_ $other)* "(), None);"]
			/// ```
			fn [<
				$name $(_ $other)*
			>] (&self) -> Option<$ret_ty> { None }
		}
	};
}

metadata_trait! {
	[title       ]<Cow<'_, str>>, [artist     ]<Cow<'_, str>>,
	[album       ]<Cow<'_, str>>, [album artist]<Cow<'_, str>>,
	[composer    ]<Cow<'_, str>>, [genre      ]<Cow<'_, str>>,
	[comment     ]<Cow<'_, str>>, [lyrics     ]<Cow<'_, str>>,
	[year        ]<u32>,
	[track       ]<u32>,          [track total]<u32>,
	[disk        ]<u32>,          [disk total ]<u32>,
}

// Forwards the item accessors to the optional tag stored in `$field`
//
// Usage (within `impl Metadata for ...`):
//
// - forward_accessors!(vorbis_comments);
macro_rules! forward_accessors {
	($field:ident) => {
		forward_accessors! {
			@METHODS $field,
			title -> std::borrow::Cow<'_, str>,
			artist -> std::borrow::Cow<'_, str>,
			album -> std::borrow::Cow<'_, str>,
			album_artist -> std::borrow::Cow<'_, str>,
			composer -> std::borrow::Cow<'_, str>,
			genre -> std::borrow::Cow<'_, str>,
			comment -> std::borrow::Cow<'_, str>,
			lyrics -> std::borrow::Cow<'_, str>,
			year -> u32,
			track -> u32,
			track_total -> u32,
			disk -> u32,
			disk_total -> u32,
		}
	};
	(@METHODS $field:ident, $($name:ident -> $ty:ty),+ $(,)?) => {
		$(
			fn $name(&self) -> Option<$ty> {
				self.$field.as_ref()?.$name()
			}
		)+
	};
}

pub(crate) use forward_accessors;

/// Pick the front cover out of `pictures`, falling back to the first picture
pub(crate) fn preferred_picture<'a, I>(pictures: I) -> Option<&'a Picture>
where
	I: IntoIterator<Item = &'a Picture>,
{
	use crate::picture::PictureType;

	let mut first = None;
	for picture in pictures {
		if picture.pic_type() == PictureType::CoverFront {
			return Some(picture);
		}

		first.get_or_insert(picture);
	}

	first
}
