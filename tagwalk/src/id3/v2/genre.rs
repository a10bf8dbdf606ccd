use crate::id3::v1::GENRES;

use std::borrow::Cow;

/// Expand the numeric genre references in a `TCON`/`TCO` value
///
/// Older taggers write genres as `(N)`, an index into the ID3v1 genre list, optionally followed
/// by a refinement. References are replaced from the end of the value until none are left, or
/// one refers to an unknown genre. A reference escaped as `((N)` is left alone, with the escape
/// removed.
pub(crate) fn expand_genre(value: &str) -> Cow<'_, str> {
	if !value.contains('(') {
		return Cow::Borrowed(value);
	}

	let mut genre = value.to_owned();
	while let Some(expanded) = expand_last_reference(&genre) {
		genre = expanded;
	}

	Cow::Owned(genre.replace("((", "("))
}

// Returns `None` when nothing was expanded
fn expand_last_reference(value: &str) -> Option<String> {
	let (start, end, index) = find_last_reference(value)?;
	let name = *GENRES.get(index)?;

	let prefix = value[..start].trim();
	let suffix = value[end..].trim_start_matches(' ');

	let mut expanded = String::with_capacity(value.len() + name.len());
	if !prefix.is_empty() && prefix != name {
		expanded.push_str(prefix);
		expanded.push(' ');
	}

	expanded.push_str(name);

	if !suffix.is_empty() && suffix != name {
		expanded.push(' ');
		expanded.push_str(suffix);
	}

	Some(expanded)
}

// Finds the last `(N)` that either starts the value, or isn't escaped by a preceding `(`
fn find_last_reference(value: &str) -> Option<(usize, usize, usize)> {
	let bytes = value.as_bytes();

	let mut found = None;
	for (start, _) in value.match_indices('(') {
		if start > 0 && bytes[start - 1] == b'(' {
			continue;
		}

		let digits = &value[start + 1..];
		let digit_count = digits.bytes().take_while(u8::is_ascii_digit).count();
		if digit_count == 0 || digits.as_bytes().get(digit_count) != Some(&b')') {
			continue;
		}

		// An index too large for a `usize` can't be a genre either
		let index = digits[..digit_count].parse().unwrap_or(usize::MAX);
		found = Some((start, start + digit_count + 2, index));
	}

	found
}
