// Frame identifiers defined by each ID3v2 sub-version

use super::header::Id3v2Version;

/// ID3v2.2 frames, plus the iTunes extensions seen in the wild
const V2_FRAMES: &[&str] = &[
    "BUF", "CNT", "COM", "CRA", "CRM", "EQU", "ETC", "GEO", "IPL", "LNK", "MCI", "MLL", "PIC",
    "POP", "REV", "RVA", "SLT", "STC", "TAL", "TBP", "TCM", "TCO", "TCP", "TCR", "TDA", "TDY",
    "TEN", "TFT", "TIM", "TKE", "TLA", "TLE", "TMT", "TOA", "TOF", "TOL", "TOR", "TOT", "TP1",
    "TP2", "TP3", "TP4", "TPA", "TPB", "TRC", "TRD", "TRK", "TS2", "TSA", "TSC", "TSI", "TSP",
    "TSS", "TST", "TT1", "TT2", "TT3", "TXT", "TXX", "TYE", "UFI", "ULT", "WAF", "WAR", "WAS",
    "WCM", "WCP", "WPB", "WXX",
];

/// ID3v2.3 frames, plus the iTunes extensions seen in the wild
const V3_FRAMES: &[&str] = &[
    "AENC", "APIC", "COMM", "COMR", "ENCR", "EQUA", "ETCO", "GEOB", "GRID", "GRP1", "IPLS",
    "LINK", "MCDI", "MLLT", "OWNE", "PCNT", "PCST", "POPM", "POSS", "PRIV", "RBUF", "RVAD",
    "RVRB", "SYLT", "SYTC", "TALB", "TBPM", "TCMP", "TCOM", "TCON", "TCOP", "TDAT", "TDLY",
    "TENC", "TEXT", "TFLT", "TIME", "TIT1", "TIT2", "TIT3", "TKEY", "TLAN", "TLEN", "TMED",
    "TOAL", "TOFN", "TOLY", "TOPE", "TORY", "TOWN", "TPE1", "TPE2", "TPE3", "TPE4", "TPOS",
    "TPUB", "TRCK", "TRDA", "TRSN", "TRSO", "TSIZ", "TSO2", "TSOA", "TSOC", "TSOP", "TSOT",
    "TSRC", "TSSE", "TXXX", "TYER", "UFID", "USER", "USLT", "WCOM", "WCOP", "WOAF", "WOAR",
    "WOAS", "WORS", "WPAY", "WPUB", "WXXX",
];

/// ID3v2.4 frames, plus the iTunes extensions seen in the wild
const V4_FRAMES: &[&str] = &[
    "AENC", "APIC", "ASPI", "COMM", "COMR", "ENCR", "EQU2", "ETCO", "GEOB", "GRID", "GRP1",
    "LINK", "MCDI", "MLLT", "OWNE", "PCNT", "PCST", "POPM", "POSS", "PRIV", "RBUF", "RVA2",
    "RVRB", "SEEK", "SIGN", "SYLT", "SYTC", "TALB", "TBPM", "TCMP", "TCOM", "TCON", "TCOP",
    "TDEN", "TDLY", "TDOR", "TDRC", "TDRL", "TDTG", "TENC", "TEXT", "TFLT", "TIPL", "TIT1",
    "TIT2", "TIT3", "TKEY", "TLAN", "TLEN", "TMCL", "TMED", "TMOO", "TOAL", "TOFN", "TOLY",
    "TOPE", "TOWN", "TPE1", "TPE2", "TPE3", "TPE4", "TPOS", "TPRO", "TPUB", "TRCK", "TRSN",
    "TRSO", "TSO2", "TSOA", "TSOC", "TSOP", "TSOT", "TSRC", "TSSE", "TSST", "TXXX", "UFID",
    "USER", "USLT", "WCOM", "WCOP", "WOAF", "WOAR", "WOAS", "WORS", "WPAY", "WPUB", "WXXX",
];

/// Whether `id` is a frame defined for `version`
pub fn is_valid_frame_id(version: Id3v2Version, id: &str) -> bool {
    let known = match version {
        Id3v2Version::V2 => V2_FRAMES,
        Id3v2Version::V3 => V3_FRAMES,
        Id3v2Version::V4 => V4_FRAMES,
    };
    known.binary_search(&id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_sorted() {
        for table in [V2_FRAMES, V3_FRAMES, V4_FRAMES] {
            assert!(table.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_known_frames() {
        assert!(is_valid_frame_id(Id3v2Version::V2, "TT2"));
        assert!(is_valid_frame_id(Id3v2Version::V3, "TYER"));
        assert!(!is_valid_frame_id(Id3v2Version::V3, "TDRC"));
        assert!(is_valid_frame_id(Id3v2Version::V4, "TDRC"));
        assert!(!is_valid_frame_id(Id3v2Version::V4, "TYER"));
        assert!(!is_valid_frame_id(Id3v2Version::V4, "\0\0\0\0"));
        assert!(!is_valid_frame_id(Id3v2Version::V2, "TIT2"));
    }
}
