//! Utilities for working with ID3v2 tags

pub(crate) mod known_frames;
pub mod synchsafe;
