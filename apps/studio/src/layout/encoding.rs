//! WinAnsi (CP1252) text handling for the standard Type1 fonts.
//!
//! Free-text fields are sanitized once before layout: every character is
//! either representable in WinAnsi or replaced with `?`. Substitutions are
//! recorded as [`EncodingWarning`]s and never abort generation.

use serde::Serialize;

/// Replacement written in place of characters WinAnsi cannot represent.
pub const REPLACEMENT_CHAR: char = '?';

/// A non-fatal substitution made while preparing a field for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodingWarning {
    pub field: &'static str,
    pub character: char,
}

/// CP1252 code points 0x80..=0x9F that map to Unicode characters outside Latin-1.
const CP1252_HIGH: &[(char, u8)] = &[
    ('\u{20AC}', 0x80), // €
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85), // …
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95), // •
    ('\u{2013}', 0x96), // –
    ('\u{2014}', 0x97), // —
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99), // ™
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Maps a character to its WinAnsi byte, if it has one.
pub fn winansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => CP1252_HIGH
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, byte)| *byte),
    }
}

/// Returns a copy of `text` containing only WinAnsi-representable characters.
///
/// Newlines are preserved for the line wrapper (`\r\n` and `\r` become `\n`),
/// tabs become a single space, anything else unrepresentable becomes
/// [`REPLACEMENT_CHAR`] and is reported in `warnings`.
pub fn sanitize(text: &str, field: &'static str, warnings: &mut Vec<EncodingWarning>) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .chars()
        .map(|c| match c {
            '\n' => '\n',
            '\t' => ' ',
            c if winansi_byte(c).is_some() => c,
            c => {
                warnings.push(EncodingWarning { field, character: c });
                REPLACEMENT_CHAR
            }
        })
        .collect()
}

/// Encodes sanitized text into WinAnsi bytes for a PDF string operand.
///
/// Characters without a mapping (only possible for unsanitized input) are
/// written as [`REPLACEMENT_CHAR`].
pub fn to_winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| winansi_byte(c).unwrap_or(REPLACEMENT_CHAR as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        let mut warnings = Vec::new();
        assert_eq!(sanitize("Jane Doe", "name", &mut warnings), "Jane Doe");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_latin1_accents_are_supported() {
        let mut warnings = Vec::new();
        let out = sanitize("José Müller, Zürich", "name", &mut warnings);
        assert_eq!(out, "José Müller, Zürich");
        assert!(warnings.is_empty());
        assert_eq!(to_winansi_bytes("é"), vec![0xE9]);
    }

    #[test]
    fn test_typographic_punctuation_maps_to_cp1252() {
        assert_eq!(winansi_byte('€'), Some(0x80));
        assert_eq!(winansi_byte('–'), Some(0x96));
        assert_eq!(winansi_byte('•'), Some(0x95));
    }

    #[test]
    fn test_unsupported_characters_are_replaced_and_reported() {
        let mut warnings = Vec::new();
        let out = sanitize("Go 🚀 Rust 中", "skills", &mut warnings);
        assert_eq!(out, "Go ? Rust ?");
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0], EncodingWarning { field: "skills", character: '🚀' });
        assert_eq!(warnings[1].character, '中');
    }

    #[test]
    fn test_line_endings_and_tabs_are_normalized() {
        let mut warnings = Vec::new();
        let out = sanitize("a\r\nb\rc\td", "summary", &mut warnings);
        assert_eq!(out, "a\nb\nc d");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_control_characters_are_replaced() {
        let mut warnings = Vec::new();
        let out = sanitize("a\u{0007}b", "summary", &mut warnings);
        assert_eq!(out, "a?b");
        assert_eq!(warnings.len(), 1);
    }
}
