#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use tagwalk::config::ParseOptions;

fuzz_target!(|data: Vec<u8>| {
	let _ = tagwalk::read_from(&mut Cursor::new(data), ParseOptions::new());
});
