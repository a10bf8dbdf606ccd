pub(crate) mod alloc;
pub(crate) mod io;
pub(crate) mod text;

/// Parse a leading run of ASCII digits, ignoring surrounding whitespace
///
/// Trailing non-digit characters are ignored, so `"2004-05-01"` yields `2004`.
pub(crate) fn parse_leading_number(value: &str) -> Option<u32> {
	let value = value.trim();
	let digits = value
		.find(|c: char| !c.is_ascii_digit())
		.map_or(value, |end| &value[..end]);

	digits.parse().ok()
}

/// Split an `x/n` style value into its number and total
///
/// A value without a separator only has a number.
pub(crate) fn parse_number_pair(value: &str) -> (Option<u32>, Option<u32>) {
	match value.split_once('/') {
		Some((number, total)) => (parse_leading_number(number), parse_leading_number(total)),
		None => (parse_leading_number(value), None),
	}
}
