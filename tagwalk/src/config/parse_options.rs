/// Options to control how tagwalk parses a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) read_properties: bool,
	pub(crate) read_tags: bool,
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) read_cover_art: bool,
	pub(crate) implicit_conversions: bool,
	pub(crate) default_utf16_byte_order: Utf16ByteOrder,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	read_properties: true,
	///     read_tags: true,
	/// 	parsing_mode: ParsingMode::BestAttempt,
	///     read_cover_art: true,
	///     implicit_conversions: true,
	///     default_utf16_byte_order: Utf16ByteOrder::LittleEndian,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Default byte order for UTF-16 text without a byte order mark
	pub const DEFAULT_UTF16_BYTE_ORDER: Utf16ByteOrder = Utf16ByteOrder::LittleEndian;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			read_properties: true,
			read_tags: true,
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			read_cover_art: true,
			implicit_conversions: true,
			default_utf16_byte_order: Self::DEFAULT_UTF16_BYTE_ORDER,
		}
	}

	/// Whether or not to read the audio properties
	///
	/// When disabled, durations and bitrates are zero. Headers that locate the tags (such as the
	/// MPEG frame header) are still decoded.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::ParseOptions;
	///
	/// // Only the tags are needed, skip finding the last OGG page
	/// let parsing_options = ParseOptions::new().read_properties(false);
	/// ```
	pub fn read_properties(&mut self, read_properties: bool) -> Self {
		self.read_properties = read_properties;
		*self
	}

	/// Whether or not to read the tags
	///
	/// When disabled, tags are skipped over rather than decoded.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::ParseOptions;
	///
	/// // Only the duration is needed
	/// let parsing_options = ParseOptions::new().read_tags(false);
	/// ```
	pub fn read_tags(&mut self, read_tags: bool) -> Self {
		self.read_tags = read_tags;
		*self
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::{ParseOptions, ParsingMode};
	///
	/// // Reject anything malformed, rather than reading around it
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether or not to read cover art
	///
	/// This covers ID3v2 `APIC`/`PIC` frames, MP4 `covr` items, FLAC `PICTURE` blocks and
	/// `METADATA_BLOCK_PICTURE` Vorbis comments.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::ParseOptions;
	///
	/// // Pictures can be large, and only the text is needed here
	/// let parsing_options = ParseOptions::new().read_cover_art(false);
	/// ```
	pub fn read_cover_art(&mut self, read_cover_art: bool) -> Self {
		self.read_cover_art = read_cover_art;
		*self
	}

	/// Whether or not to perform implicit conversions
	///
	/// Implicit conversions fill in values from outdated or non-standard items that are still
	/// commonly written. Currently this covers:
	///
	/// * Resolving the outdated MP4 `gnre` atom to a genre name when no `©gen` atom exists
	pub fn implicit_conversions(&mut self, implicit_conversions: bool) -> Self {
		self.implicit_conversions = implicit_conversions;
		*self
	}

	/// The byte order to assume for UTF-16 text that is missing its byte order mark
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::{ParseOptions, Utf16ByteOrder};
	///
	/// // My tagger forgets the BOM, and always writes big endian
	/// let parsing_options =
	/// 	ParseOptions::new().default_utf16_byte_order(Utf16ByteOrder::BigEndian);
	/// ```
	pub fn default_utf16_byte_order(&mut self, byte_order: Utf16ByteOrder) -> Self {
		self.default_utf16_byte_order = byte_order;
		*self
	}
}

/// The parsing strictness mode
///
/// This can be set with [`ParseOptions::parsing_mode`].
///
/// # Examples
///
/// ```rust,no_run
/// use tagwalk::config::{ParseOptions, ParsingMode};
///
/// # fn main() -> tagwalk::error::Result<()> {
/// // Only well-formed files are wanted
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// let tagged_file = tagwalk::read_from_path("foo.mp3", parsing_options)?;
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Error on any input that breaks its format's rules
	///
	/// ## Examples of behavior
	///
	/// * Invalid UTF-8 in a Vorbis comment - The read fails
	/// * Unknown ID3v2.2 picture format - The read fails
	/// * A second FLAC `VORBIS_COMMENT` block - The read fails
	/// * An MP4 atom larger than its parent - The read fails
	Strict,
	/// Read around recoverable problems, keeping as much as possible
	///
	/// ## Examples of behavior
	///
	/// * Invalid UTF-8 in a Vorbis comment - The value is decoded lossily
	/// * Unknown ID3v2.2 picture format - The picture is kept without a MIME type
	/// * A second FLAC `VORBIS_COMMENT` block - It replaces the first
	/// * An MP4 atom larger than its parent - The rest of the parent is skipped
	#[default]
	BestAttempt,
	/// Like [`ParsingMode::BestAttempt`], additionally discarding invalid fields wherever possible
	///
	/// If the input is malformed, the resulting tags may be incomplete, and the properties zeroed.
	Relaxed,
}

/// The byte order of UTF-16 text
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Utf16ByteOrder {
	/// Little endian, the least significant byte comes first
	#[default]
	LittleEndian,
	/// Big endian, the most significant byte comes first
	BigEndian,
}
