// Fallible `vec![elem; size]`, respecting the allocation limit
macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(TagwalkError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)             -> return Err(TagwalkError::new(ErrorKind::Variant))
// - err!(Variant(Args, ...))  -> return Err(TagwalkError::new(ErrorKind::Variant(Args, ...)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagwalkError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($($arg:expr),+ $(,)?)) => {
		return Err(crate::error::TagwalkError::new(
			crate::error::ErrorKind::$variant($($arg),+),
		))
	};
}

// Shorthand for return Err(Id3v2Error::new(Id3v2ErrorKind::Foo).into())
macro_rules! id3v2_err {
	($variant:ident) => {
		return Err(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::$variant,
		)
		.into())
	};
	($variant:ident($($arg:expr),+ $(,)?)) => {
		return Err(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::$variant($($arg),+),
		)
		.into())
	};
}

// A `TagwalkError` wrapping FileDecodingError::new(FileType::Foo, "Message")
//
// Usage:
//
// - decode_err!(Flac, "Message")       -> TagwalkError
// - decode_err!(@BAIL Flac, "Message") -> return Err(TagwalkError)
macro_rules! decode_err {
	($file_ty:ident, $reason:literal) => {
		crate::error::TagwalkError::from(crate::error::FileDecodingError::new(
			crate::file::FileType::$file_ty,
			$reason,
		))
	};
	(@BAIL $file_ty:ident, $reason:literal) => {
		return Err(decode_err!($file_ty, $reason))
	};
}

// Branch on a `ParsingMode`, with `DEFAULT` covering every mode not listed
//
// Usage:
//
// - parse_mode_choice!(parse_mode, STRICT: expr, DEFAULT: expr)
// - parse_mode_choice!(parse_mode, STRICT: expr, RELAXED: expr, DEFAULT: expr)
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict:expr,)?
		$(RELAXED: $relaxed:expr,)?
		DEFAULT: $default:expr $(,)?
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => $strict,)?
			$(crate::config::ParsingMode::Relaxed => $relaxed,)?
			#[allow(unreachable_patterns)]
			_ => $default,
		}
	};
}

pub(crate) use {decode_err, err, id3v2_err, parse_mode_choice, try_vec};
