#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use tagwalk::config::{ParseOptions, ParsingMode};

fuzz_target!(|data: Vec<u8>| {
	for parsing_mode in [ParsingMode::Strict, ParsingMode::BestAttempt, ParsingMode::Relaxed] {
		let _ = tagwalk::ogg::VorbisFile::read_from(
			&mut Cursor::new(&data),
			ParseOptions::new().parsing_mode(parsing_mode),
		);
	}
});
