#![allow(missing_docs)]

mod flac;
mod malformed;
mod mp4;
mod mpeg;
mod ogg;
mod probe;
pub(crate) mod util;
