use std::cell::Cell;

thread_local! {
	static GLOBAL_OPTIONS: Cell<GlobalOptions> = const { Cell::new(GlobalOptions::new()) };
}

pub(crate) fn global_options() -> GlobalOptions {
	GLOBAL_OPTIONS.get()
}

/// Options that apply to every read made on the current thread
///
/// Unlike [`ParseOptions`](crate::config::ParseOptions), these are not passed to each reader. Use
/// [`apply_global_options`] to change them.
///
/// # Examples
///
/// ```rust
/// use tagwalk::config::{GlobalOptions, apply_global_options};
///
/// // Allow for pictures larger than the default limit
/// let global_options = GlobalOptions::new().allocation_limit(64 * 1024 * 1024);
/// apply_global_options(global_options);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
#[non_exhaustive]
pub struct GlobalOptions {
	pub(crate) allocation_limit: usize,
}

impl GlobalOptions {
	/// Default allocation limit for any single item, 16 MiB
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Creates a new `GlobalOptions`, with every option at its default
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwalk::config::GlobalOptions;
	///
	/// assert_eq!(GlobalOptions::new(), GlobalOptions::default());
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The maximum number of bytes to allocate for any single length-prefixed item
	///
	/// Lengths are read from untrusted input, so a corrupt frame, atom or block could otherwise
	/// request gigabytes. Exceeding the limit fails the read with
	/// [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData).
	pub fn allocation_limit(&mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		*self
	}
}

impl Default for GlobalOptions {
	fn default() -> Self {
		Self::new()
	}
}

/// Replaces the [`GlobalOptions`] of the current thread
///
/// # Examples
///
/// ```rust
/// use tagwalk::config::{GlobalOptions, apply_global_options};
///
/// apply_global_options(GlobalOptions::new().allocation_limit(1024));
/// ```
pub fn apply_global_options(options: GlobalOptions) {
	GLOBAL_OPTIONS.set(options);
}
