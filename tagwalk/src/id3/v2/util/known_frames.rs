//! Frame IDs declared by each ID3v2 version
//!
//! Unknown frames are still read. These lists only decide when an unknown frame header is more
//! likely to be garbage past the end of the tag.

use crate::id3::v2::Id3v2Version;

#[rustfmt::skip]
const ID3V22_FRAMES: &[&str] = &[
	"BUF", "CNT", "COM", "CRA", "CRM", "ETC", "EQU", "GEO", "IPL", "LNK", "MCI", "MLL", "PIC",
	"POP", "REV", "RVA", "SLT", "STC", "TAL", "TBP", "TCM", "TCO", "TCR", "TDA", "TDY", "TEN",
	"TFT", "TIM", "TKE", "TLA", "TLE", "TMT", "TOA", "TOF", "TOL", "TOR", "TOT", "TP1", "TP2",
	"TP3", "TP4", "TPA", "TPB", "TRC", "TRD", "TRK", "TSI", "TSS", "TT1", "TT2", "TT3", "TXT",
	"TXX", "TYE", "UFI", "ULT", "WAF", "WAR", "WAS", "WCM", "WCP", "WPB", "WXX",
];

#[rustfmt::skip]
const ID3V23_FRAMES: &[&str] = &[
	"AENC", "APIC", "COMM", "COMR", "ENCR", "EQUA", "ETCO", "GEOB", "GRID", "IPLS", "LINK",
	"MCDI", "MLLT", "OWNE", "PRIV", "PCNT", "POPM", "POSS", "RBUF", "RVAD", "RVRB", "SYLT",
	"SYTC", "TALB", "TBPM", "TCMP", "TCOM", "TCON", "TCOP", "TDAT", "TDLY", "TENC", "TEXT",
	"TFLT", "TIME", "TIT1", "TIT2", "TIT3", "TKEY", "TLAN", "TLEN", "TMED", "TOAL", "TOFN",
	"TOLY", "TOPE", "TORY", "TOWN", "TPE1", "TPE2", "TPE3", "TPE4", "TPOS", "TPUB", "TRCK",
	"TRDA", "TRSN", "TRSO", "TSIZ", "TSO2", "TSOC", "TSRC", "TSSE", "TYER", "TXXX", "UFID",
	"USER", "USLT", "WCOM", "WCOP", "WOAF", "WOAR", "WOAS", "WORS", "WPAY", "WPUB", "WXXX",
];

#[rustfmt::skip]
const ID3V24_FRAMES: &[&str] = &[
	"AENC", "APIC", "ASPI", "COMM", "COMR", "ENCR", "EQU2", "ETCO", "GEOB", "GRID", "LINK",
	"MCDI", "MLLT", "OWNE", "PRIV", "PCNT", "POPM", "POSS", "RBUF", "RVA2", "RVRB", "SEEK",
	"SIGN", "SYLT", "SYTC", "TALB", "TBPM", "TCMP", "TCOM", "TCON", "TCOP", "TDEN", "TDLY",
	"TDOR", "TDRC", "TDRL", "TDTG", "TENC", "TEXT", "TFLT", "TIPL", "TIT1", "TIT2", "TIT3",
	"TKEY", "TLAN", "TLEN", "TMCL", "TMED", "TMOO", "TOAL", "TOFN", "TOLY", "TOPE", "TOWN",
	"TPE1", "TPE2", "TPE3", "TPE4", "TPOS", "TPRO", "TPUB", "TRCK", "TRSN", "TRSO", "TSO2",
	"TSOA", "TSOC", "TSOP", "TSOT", "TSRC", "TSSE", "TSST", "TXXX", "UFID", "USER", "USLT",
	"WCOM", "WCOP", "WOAF", "WOAR", "WOAS", "WORS", "WPAY", "WPUB", "WXXX",
];

/// Whether `id` is declared by `version`
pub(crate) fn is_known_frame(version: Id3v2Version, id: &str) -> bool {
	let known = match version {
		Id3v2Version::V2 => ID3V22_FRAMES,
		Id3v2Version::V3 => ID3V23_FRAMES,
		Id3v2Version::V4 => ID3V24_FRAMES,
	};

	known.contains(&id)
}
