//! Builders for small, synthetic files of every supported format

use tagwalk::config::ParseOptions;
use tagwalk::file::TaggedFile;

use std::io::{Cursor, Write};

use ogg_pager::fixture::segment_table;
use ogg_pager::{CONTAINS_FIRST_PAGE_OF_BITSTREAM, CONTAINS_LAST_PAGE_OF_BITSTREAM};

pub const PNG_DATA: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0DIHDR";

pub fn read(bytes: &[u8], parse_options: ParseOptions) -> tagwalk::error::Result<TaggedFile> {
	tagwalk::read_from(&mut Cursor::new(bytes), parse_options)
}

#[allow(clippy::missing_panics_doc)]
pub fn temp_file(bytes: &[u8]) -> tempfile::NamedTempFile {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(bytes).unwrap();
	file.flush().unwrap();
	file
}

// ID3v2

fn synchsafe(size: u32) -> [u8; 4] {
	[
		((size >> 21) & 0x7F) as u8,
		((size >> 14) & 0x7F) as u8,
		((size >> 7) & 0x7F) as u8,
		(size & 0x7F) as u8,
	]
}

/// An ID3v2.3 frame
pub fn v3_frame(id: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut frame = id.to_vec();
	frame.extend((content.len() as u32).to_be_bytes());
	frame.extend([0, 0]);
	frame.extend(content);
	frame
}

/// An ID3v2.3 text frame, Latin-1 encoded
pub fn v3_text_frame(id: &[u8; 4], text: &str) -> Vec<u8> {
	let mut content = vec![0];
	content.extend(text.as_bytes());
	v3_frame(id, &content)
}

/// An ID3v2.3 `APIC` frame holding a PNG
pub fn v3_picture_frame(pic_type: u8, data: &[u8]) -> Vec<u8> {
	let mut content = vec![0];
	content.extend(b"image/png\0");
	content.push(pic_type);
	content.extend(b"cover\0");
	content.extend(data);
	v3_frame(b"APIC", &content)
}

/// A complete ID3v2.3 tag
pub fn id3v2_3(frames: &[Vec<u8>], padding: usize) -> Vec<u8> {
	let body_len = frames.iter().map(Vec::len).sum::<usize>() + padding;

	let mut tag = b"ID3\x03\x00\x00".to_vec();
	tag.extend(synchsafe(body_len as u32));
	for frame in frames {
		tag.extend(frame);
	}
	tag.extend(std::iter::repeat_n(0, padding));
	tag
}

// ID3v1

fn padded<const N: usize>(value: &str) -> [u8; N] {
	let mut field = [0; N];
	field[..value.len()].copy_from_slice(value.as_bytes());
	field
}

/// An ID3v1.1 tag
pub fn id3v1(title: &str, artist: &str, album: &str, year: &str, track: u8, genre: u8) -> Vec<u8> {
	let mut tag = b"TAG".to_vec();
	tag.extend(padded::<30>(title));
	tag.extend(padded::<30>(artist));
	tag.extend(padded::<30>(album));
	tag.extend(padded::<4>(year));
	tag.extend([0; 28]);
	tag.push(0);
	tag.push(track);
	tag.push(genre);
	tag
}

// MPEG

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo
pub const MPEG_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

/// A first frame carrying a Xing header with frame and byte counts
pub fn xing_frame(frames: u32, bytes: u32) -> Vec<u8> {
	let mut frame = MPEG_HEADER.to_vec();
	// Side information
	frame.extend([0; 32]);
	frame.extend(b"Xing");
	frame.extend([0, 0, 0, 0x03]);
	frame.extend(frames.to_be_bytes());
	frame.extend(bytes.to_be_bytes());
	frame.resize(417, 0);
	frame
}

// MP4

pub fn atom(ident: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut atom = (content.len() as u32 + 8).to_be_bytes().to_vec();
	atom.extend(ident);
	atom.extend(content);
	atom
}

/// An `ilst` item with a single `data` atom
pub fn ilst_item(ident: &[u8; 4], code: u32, payload: &[u8]) -> Vec<u8> {
	let mut data = code.to_be_bytes().to_vec();
	data.extend([0; 4]);
	data.extend(payload);
	atom(ident, &atom(b"data", &data))
}

/// A freeform (`----`) `ilst` item
pub fn freeform_item(mean: &str, name: &str, value: &str) -> Vec<u8> {
	let mut mean_content = vec![0; 4];
	mean_content.extend(mean.as_bytes());
	let mut name_content = vec![0; 4];
	name_content.extend(name.as_bytes());
	let mut data = 1_u32.to_be_bytes().to_vec();
	data.extend([0; 4]);
	data.extend(value.as_bytes());

	let mut content = atom(b"mean", &mean_content);
	content.extend(atom(b"name", &name_content));
	content.extend(atom(b"data", &data));
	atom(b"----", &content)
}

fn esds(bitrate: u32) -> Vec<u8> {
	let mut content = vec![0; 4];
	content.extend([0x03, 25, 0, 1, 0]);
	content.extend([0x04, 17, 0x40, 0x15, 0, 0x18, 0]);
	content.extend(bitrate.to_be_bytes());
	content.extend(bitrate.to_be_bytes());
	content.extend([0x05, 2, 0x12, 0x10]);
	content.extend([0x06, 1, 0x02]);
	atom(b"esds", &content)
}

fn mp4a(channels: u16, sample_rate: u16, bitrate: u32) -> Vec<u8> {
	let mut content = vec![0; 16];
	content.extend(channels.to_be_bytes());
	content.extend(16_u16.to_be_bytes());
	content.extend([0; 4]);
	content.extend(sample_rate.to_be_bytes());
	content.extend([0; 2]);
	content.extend(esds(bitrate));
	atom(b"mp4a", &content)
}

/// An MP4 file: `ftyp`, `moov` (`mvhd`, an audio track and the `ilst`), and `mdat`
pub fn mp4(brand: &[u8; 4], duration_secs: u32, ilst_items: &[Vec<u8>]) -> Vec<u8> {
	let mut ftyp = brand.to_vec();
	ftyp.extend([0; 4]);
	ftyp.extend(b"isomiso2mp41");

	let mut mvhd = vec![0; 100];
	mvhd[12..16].copy_from_slice(&1000_u32.to_be_bytes());
	mvhd[16..20].copy_from_slice(&(duration_secs * 1000).to_be_bytes());

	let mut stsd = vec![0, 0, 0, 0, 0, 0, 0, 1];
	stsd.extend(mp4a(2, 48000, 192_000));
	let stbl = atom(b"stbl", &atom(b"stsd", &stsd));
	let trak = atom(b"trak", &atom(b"mdia", &atom(b"minf", &stbl)));

	let mut meta = vec![0; 4];
	meta.extend(atom(b"hdlr", &[0; 25]));
	meta.extend(atom(b"ilst", &ilst_items.concat()));

	let mut moov = atom(b"mvhd", &mvhd);
	moov.extend(trak);
	moov.extend(atom(b"udta", &atom(b"meta", &meta)));

	let mut file = atom(b"ftyp", &ftyp);
	file.extend(atom(b"moov", &moov));
	file.extend(atom(b"mdat", &[0xAB; 256]));
	file
}

// Vorbis comments, shared by FLAC and OGG Vorbis

pub fn comment_block(vendor: &str, comments: &[&str]) -> Vec<u8> {
	let mut block = (vendor.len() as u32).to_le_bytes().to_vec();
	block.extend(vendor.as_bytes());
	block.extend((comments.len() as u32).to_le_bytes());

	for comment in comments {
		block.extend((comment.len() as u32).to_le_bytes());
		block.extend(comment.as_bytes());
	}

	block
}

// FLAC

pub fn flac_block(ty: u8, last: bool, content: &[u8]) -> Vec<u8> {
	let mut block = vec![if last { ty | 0x80 } else { ty }];
	block.extend(&(content.len() as u32).to_be_bytes()[1..]);
	block.extend(content);
	block
}

pub fn stream_info(sample_rate: u32, channels: u8, bits: u8, total_samples: u64) -> Vec<u8> {
	let mut block = Vec::with_capacity(34);
	block.extend(4096_u16.to_be_bytes());
	block.extend(4096_u16.to_be_bytes());
	block.extend([0; 6]);

	let packed = (u64::from(sample_rate) << 44)
		| (u64::from(channels - 1) << 41)
		| (u64::from(bits - 1) << 36)
		| total_samples;
	block.extend(packed.to_be_bytes());
	block.extend([0; 16]);
	block
}

/// A `PICTURE` block body holding a PNG
pub fn flac_picture(pic_type: u32, data: &[u8]) -> Vec<u8> {
	let mut content = pic_type.to_be_bytes().to_vec();
	content.extend(9_u32.to_be_bytes());
	content.extend(b"image/png");
	content.extend(5_u32.to_be_bytes());
	content.extend(b"cover");
	content.extend([0; 16]);
	content.extend((data.len() as u32).to_be_bytes());
	content.extend(data);
	content
}

/// A FLAC file with `audio_len` bytes of frames
pub fn flac(blocks: &[(u8, Vec<u8>)], audio_len: usize) -> Vec<u8> {
	let mut bytes = b"fLaC".to_vec();
	for (i, (ty, content)) in blocks.iter().enumerate() {
		bytes.extend(flac_block(*ty, i == blocks.len() - 1, content));
	}
	bytes.extend(std::iter::repeat_n(0xFF, audio_len));
	bytes
}

// OGG Vorbis

pub fn ogg_page(flag: u8, abgp: u64, sequence_number: u32, content: &[u8]) -> Vec<u8> {
	let mut page = b"OggS\x00".to_vec();
	page.push(flag);
	page.extend(abgp.to_le_bytes());
	page.extend(0xCAFE_u32.to_le_bytes());
	page.extend(sequence_number.to_le_bytes());
	page.extend(0_u32.to_le_bytes());

	let segments = segment_table(content.len()).unwrap();
	page.push(segments.len() as u8);
	page.extend(segments);
	page.extend(content);
	page
}

pub fn vorbis_identification(channels: u8, sample_rate: u32, nominal_bitrate: i32) -> Vec<u8> {
	let mut packet = b"\x01vorbis".to_vec();
	packet.extend(0_u32.to_le_bytes());
	packet.push(channels);
	packet.extend(sample_rate.to_le_bytes());
	packet.extend(0_i32.to_le_bytes());
	packet.extend(nominal_bitrate.to_le_bytes());
	packet.extend(0_i32.to_le_bytes());
	packet.push(0xB8);
	packet.push(1);
	packet
}

/// An OGG Vorbis stream, with each header on its own page
pub fn vorbis(comments: &[&str], sample_rate: u32, total_samples: u64) -> Vec<u8> {
	let mut comment_packet = b"\x03vorbis".to_vec();
	comment_packet.extend(comment_block("Xiph.Org libVorbis I 20200704", comments));
	comment_packet.push(1);

	let mut bytes = ogg_page(
		CONTAINS_FIRST_PAGE_OF_BITSTREAM,
		0,
		0,
		&vorbis_identification(2, sample_rate, 128_000),
	);
	bytes.extend(ogg_page(0, 0, 1, &comment_packet));
	bytes.extend(ogg_page(0, total_samples / 2, 2, &[0x11; 200]));
	bytes.extend(ogg_page(
		CONTAINS_LAST_PAGE_OF_BITSTREAM,
		total_samples,
		3,
		&[0x22; 200],
	));
	bytes
}
