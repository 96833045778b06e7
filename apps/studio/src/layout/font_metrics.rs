//! Static font-metric tables for the standard Type1 typefaces used on resumes.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe core-font AFM files. Oblique faces share the widths of their upright
//! counterpart, so each family only carries a regular and a bold table.
//! Each table covers ASCII 0x20..=0x7E plus the WinAnsi upper half 0x80..=0xFF,
//! which is what the PDF writer actually draws for accented and typographic glyphs.

use serde::{Deserialize, Serialize};

use crate::layout::encoding::winansi_byte;

// ────────────────────────────────────────────────────────────────────────────
// Font family / face enums
// ────────────────────────────────────────────────────────────────────────────

/// The typeface families the layout engine can write without embedding font files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Proportional sans-serif, the default resume face.
    Helvetica,
    /// Monospaced typewriter face.
    Courier,
}

impl FontFamily {
    /// Parses a family name as it appears in configuration (`helvetica`, `courier`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "arial" => Some(FontFamily::Helvetica),
            "courier" => Some(FontFamily::Courier),
            _ => None,
        }
    }
}

/// Style variant within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// Resource name used for this face inside a page's font dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
        }
    }
}

/// PostScript base-font name of a family/face pair.
pub fn base_font_name(family: FontFamily, face: FontFace) -> &'static str {
    match (family, face) {
        (FontFamily::Helvetica, FontFace::Regular) => "Helvetica",
        (FontFamily::Helvetica, FontFace::Bold) => "Helvetica-Bold",
        (FontFamily::Helvetica, FontFace::Italic) => "Helvetica-Oblique",
        (FontFamily::Courier, FontFace::Regular) => "Courier",
        (FontFamily::Courier, FontFace::Bold) => "Courier-Bold",
        (FontFamily::Courier, FontFace::Italic) => "Courier-Oblique",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units, covering
/// 0x20 (space) through 0x7E (~).
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub family: FontFamily,
    widths: [f32; 95],
    /// WinAnsi bytes 0x80..=0xFF; index = byte - 0x80. Undefined slots hold the average.
    high_widths: [f32; 128],
    /// Fallback width for characters WinAnsi cannot encode.
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Width of a single character in em units, measured through its WinAnsi byte.
    pub fn char_width(&self, c: char) -> f32 {
        match winansi_byte(c) {
            Some(byte @ 0x20..=0x7E) => self.widths[usize::from(byte - 0x20)],
            Some(byte @ 0x80..=0xFF) => self.high_widths[usize::from(byte - 0x80)],
            _ => self.average_char_width,
        }
    }

    /// Measures the rendered width of a string in em units.
    ///
    /// Characters outside WinAnsi fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Width of a string in points at the given font size.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables (ASCII printable + WinAnsi upper half)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    #[rustfmt::skip]
    high_widths: [
        // 0x80: €  (81)  ‚  ƒ  „  …  †  ‡  ˆ  ‰  Š  ‹  Œ  (8D)  Ž  (8F)
        0.556, 0.556, 0.222, 0.556, 0.333, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.556, 0.611, 0.556,
        // 0x90: (90)  '  '  "  "  •  –  —  ˜  ™  š  ›  œ  (9D)  ž  Ÿ
        0.556, 0.222, 0.222, 0.333, 0.333, 0.350, 0.556, 1.000, 0.333, 1.000, 0.500, 0.333, 0.944, 0.556, 0.500, 0.667,
        // 0xA0: nbsp  ¡  ¢  £  ¤  ¥  ¦  §  ¨  ©  ª  «  ¬  shy  ®  ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // 0xB0: °  ±  ²  ³  ´  µ  ¶  ·  ¸  ¹  º  »  ¼  ½  ¾  ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // 0xC0: À  Á  Â  Ã  Ä  Å  Æ  Ç  È  É  Ê  Ë  Ì  Í  Î  Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // 0xD0: Ð  Ñ  Ò  Ó  Ô  Õ  Ö  ×  Ø  Ù  Ú  Û  Ü  Ý  Þ  ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // 0xE0: à  á  â  ã  ä  å  æ  ç  è  é  ê  ë  ì  í  î  ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // 0xF0: ð  ñ  ò  ó  ô  õ  ö  ÷  ø  ù  ú  û  ü  ý  þ  ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
    average_char_width: 0.556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    #[rustfmt::skip]
    high_widths: [
        // 0x80: €  (81)  ‚  ƒ  „  …  †  ‡  ˆ  ‰  Š  ‹  Œ  (8D)  Ž  (8F)
        0.556, 0.611, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.611, 0.611, 0.611,
        // 0x90: (90)  '  '  "  "  •  –  —  ˜  ™  š  ›  œ  (9D)  ž  Ÿ
        0.611, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.611, 0.500, 0.667,
        // 0xA0: nbsp  ¡  ¢  £  ¤  ¥  ¦  §  ¨  ©  ª  «  ¬  shy  ®  ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // 0xB0: °  ±  ²  ³  ´  µ  ¶  ·  ¸  ¹  º  »  ¼  ½  ¾  ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // 0xC0: À  Á  Â  Ã  Ä  Å  Æ  Ç  È  É  Ê  Ë  Ì  Í  Î  Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // 0xD0: Ð  Ñ  Ò  Ó  Ô  Õ  Ö  ×  Ø  Ù  Ú  Û  Ü  Ý  Þ  ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // 0xE0: à  á  â  ã  ä  å  æ  ç  è  é  ê  ë  ì  í  î  ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // 0xF0: ð  ñ  ò  ó  ô  õ  ö  ÷  ø  ù  ú  û  ü  ý  þ  ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
    average_char_width: 0.611,
};

/// Courier is monospaced: every glyph, bold or not, is 0.6em wide.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Courier,
    widths: [0.600; 95],
    high_widths: [0.600; 128],
    average_char_width: 0.600,
};

/// Returns the static metric table for a family/face pair.
pub fn get_metrics(family: FontFamily, face: FontFace) -> &'static FontMetricTable {
    match (family, face) {
        (FontFamily::Helvetica, FontFace::Bold) => &HELVETICA_BOLD_TABLE,
        (FontFamily::Helvetica, _) => &HELVETICA_TABLE,
        (FontFamily::Courier, _) => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let m = get_metrics(FontFamily::Helvetica, FontFace::Regular);
        assert_eq!(m.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let m = get_metrics(FontFamily::Helvetica, FontFace::Regular);
        // "Hi" = H (0.722) + i (0.222)
        assert!((m.measure_str("Hi") - 0.944).abs() < 1e-4);
    }

    #[test]
    fn test_unencodable_falls_back_to_average() {
        let m = get_metrics(FontFamily::Helvetica, FontFace::Regular);
        assert!((m.measure_str("🐍") - m.average_char_width).abs() < 1e-6);
    }

    #[test]
    fn test_winansi_upper_half_uses_real_widths() {
        let m = get_metrics(FontFamily::Helvetica, FontFace::Regular);
        for wide in ['—', 'Æ', 'Œ', '‰', '™', '…'] {
            assert!((m.char_width(wide) - 1.0).abs() < 1e-6, "{wide}");
        }
        assert!((m.char_width('–') - 0.556).abs() < 1e-6);
        assert!((m.char_width('•') - 0.350).abs() < 1e-6);
        assert!((m.char_width('é') - 0.556).abs() < 1e-6);
        assert!((m.char_width('Ö') - 0.778).abs() < 1e-6);
        // Non-breaking space measures like a space.
        assert_eq!(m.char_width('\u{A0}'), m.char_width(' '));
    }

    #[test]
    fn test_bold_upper_half_differs_from_regular() {
        let bold = get_metrics(FontFamily::Helvetica, FontFace::Bold);
        assert!((bold.char_width('ñ') - 0.611).abs() < 1e-6);
        assert!((bold.char_width('Å') - 0.722).abs() < 1e-6);
        assert!((bold.char_width('—') - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_courier_upper_half_is_monospaced() {
        let m = get_metrics(FontFamily::Courier, FontFace::Regular);
        assert!((m.measure_str("José—Æ") - 6.0 * 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let regular = get_metrics(FontFamily::Helvetica, FontFace::Regular);
        let bold = get_metrics(FontFamily::Helvetica, FontFace::Bold);
        let text = "Senior Engineer at Acme";
        assert!(bold.measure_str(text) > regular.measure_str(text));
    }

    #[test]
    fn test_italic_shares_regular_widths() {
        let regular = get_metrics(FontFamily::Helvetica, FontFace::Regular);
        let italic = get_metrics(FontFamily::Helvetica, FontFace::Italic);
        assert_eq!(regular.measure_str("2019 - 2023"), italic.measure_str("2019 - 2023"));
    }

    #[test]
    fn test_courier_is_monospaced() {
        let m = get_metrics(FontFamily::Courier, FontFace::Bold);
        assert!((m.measure_str("iiii") - m.measure_str("WWWW")).abs() < 1e-6);
        assert!((m.width_pt("abc", 10.0) - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_family_from_name() {
        assert_eq!(FontFamily::from_name("Helvetica"), Some(FontFamily::Helvetica));
        assert_eq!(FontFamily::from_name(" courier "), Some(FontFamily::Courier));
        assert_eq!(FontFamily::from_name("comic-sans"), None);
    }

    #[test]
    fn test_base_font_names_are_distinct_per_face() {
        let names: Vec<_> = FontFace::ALL
            .iter()
            .map(|f| base_font_name(FontFamily::Helvetica, *f))
            .collect();
        assert_eq!(names, vec!["Helvetica", "Helvetica-Bold", "Helvetica-Oblique"]);
    }
}
