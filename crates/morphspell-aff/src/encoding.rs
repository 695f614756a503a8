// Input decoding driven by the affix file's SET directive
//
// Both files are read as raw bytes. The affix file is scanned for `SET` before
// decoding (the directive itself is plain ASCII in every supported encoding),
// then both files are decoded with the declared encoding.

use crate::LoadError;

/// Encoding assumed when the affix file has no SET directive.
pub const DEFAULT_ENCODING: &str = "ISO8859-1";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encodings the loader can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// ISO 8859-1; also used for US-ASCII input.
    Latin1,
}

impl Encoding {
    /// Map a SET label to an encoding.
    pub fn from_label(label: &str) -> Result<Self, LoadError> {
        match label.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Encoding::Utf8),
            "ISO8859-1" | "ISO-8859-1" | "LATIN1" | "US-ASCII" | "ASCII" => Ok(Encoding::Latin1),
            _ => Err(LoadError::UnsupportedEncoding(label.to_string())),
        }
    }

    /// Choose the encoding for a pair of input files from the raw affix
    /// bytes. Without a SET directive a UTF-8 byte order mark selects UTF-8,
    /// anything else falls back to ISO 8859-1.
    pub fn detect(aff: &[u8]) -> Result<(Self, String), LoadError> {
        match declared_label(aff) {
            Some(label) => Ok((Self::from_label(&label)?, label)),
            None if aff.starts_with(UTF8_BOM) => Ok((Encoding::Utf8, "UTF-8".to_string())),
            None => Ok((Encoding::Latin1, DEFAULT_ENCODING.to_string())),
        }
    }

    /// Decode `bytes`. `file` names the input in error messages.
    pub fn decode(self, bytes: &[u8], file: &'static str) -> Result<String, LoadError> {
        match self {
            Encoding::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes)
                    .map(str::to_owned)
                    .map_err(|_| LoadError::InvalidText {
                        file,
                        encoding: "UTF-8",
                    })
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// Find the argument of the first `SET` directive in raw affix bytes.
pub fn declared_label(aff: &[u8]) -> Option<String> {
    let aff = aff.strip_prefix(UTF8_BOM).unwrap_or(aff);
    aff.split(|&b| b == b'\n').find_map(|line| {
        let line = line.trim_ascii();
        let rest = line.strip_prefix(b"SET")?;
        if !rest.first().is_some_and(u8::is_ascii_whitespace) {
            return None;
        }
        let label: Vec<u8> = rest
            .trim_ascii()
            .iter()
            .copied()
            .take_while(|b| !b.is_ascii_whitespace())
            .collect();
        (!label.is_empty()).then(|| String::from_utf8_lossy(&label).into_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_set_label() {
        assert_eq!(declared_label(b"# header\nSET UTF-8\nTRY abc\n").as_deref(), Some("UTF-8"));
        assert_eq!(declared_label(b"SET\tISO8859-1\r\n").as_deref(), Some("ISO8859-1"));
        assert_eq!(declared_label(b"TRY abc\n"), None);
        // SETTINGS is not SET.
        assert_eq!(declared_label(b"SETTINGS x\n"), None);
    }

    #[test]
    fn detect_defaults_to_latin1() {
        let (encoding, label) = Encoding::detect(b"TRY abc\n").unwrap();
        assert_eq!(encoding, Encoding::Latin1);
        assert_eq!(label, DEFAULT_ENCODING);
    }

    #[test]
    fn detect_bom_without_set() {
        let (encoding, label) = Encoding::detect(b"\xEF\xBB\xBFTRY abc\n").unwrap();
        assert_eq!(encoding, Encoding::Utf8);
        assert_eq!(label, "UTF-8");
    }

    #[test]
    fn unsupported_label_is_an_error() {
        let err = Encoding::detect(b"SET KOI8-R\n").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedEncoding(label) if label == "KOI8-R"));
    }

    #[test]
    fn decode_latin1_bytes() {
        let text = Encoding::Latin1.decode(b"k\xE4vel\xF6", "dictionary").unwrap();
        assert_eq!(text, "k\u{00E4}vel\u{00F6}");
    }

    #[test]
    fn decode_utf8_strips_bom() {
        let text = Encoding::Utf8.decode(b"\xEF\xBB\xBFwalk", "dictionary").unwrap();
        assert_eq!(text, "walk");
        assert!(matches!(
            Encoding::Utf8.decode(b"\xFFwalk", "dictionary"),
            Err(LoadError::InvalidText { file: "dictionary", .. })
        ));
    }
}
