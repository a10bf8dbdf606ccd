use crate::util::text::latin1_decode;

/// An `ID3v2` URL frame
///
/// URL frames have no encoding byte, the content is always Latin-1.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UrlLinkFrame {
	/// The URL
	pub content: String,
}

impl UrlLinkFrame {
	/// Read a [`UrlLinkFrame`] from frame content
	///
	/// NOTE: This expects the frame header to have already been skipped
	pub fn parse(content: &[u8]) -> Self {
		Self {
			content: latin1_decode(content),
		}
	}
}
