//! Glyph advance widths used to wrap report text.
//!
//! Embedded fonts are measured from their `hmtx` table. The built-in
//! Helvetica fallback has no font file, so its widths come from the Adobe
//! core-font AFM (units of 1/1000 em).

use ttf_parser::Face;

/// Helvetica advances for `' '..='~'`, in 1/1000 em.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Advance for characters outside the AFM table.
const HELVETICA_DEFAULT: u16 = 556;

pub(crate) enum FontMetrics<'a> {
    Helvetica,
    Face { face: Face<'a>, units_per_em: f32 },
}

impl<'a> FontMetrics<'a> {
    /// Parses `data` as a TrueType/OpenType face.
    pub(crate) fn from_font_data(data: &'a [u8]) -> Result<Self, String> {
        let face = Face::parse(data, 0).map_err(|e| e.to_string())?;
        let units_per_em = f32::from(face.units_per_em().max(1));
        Ok(Self::Face { face, units_per_em })
    }

    /// Horizontal advance of `c` in points at `size`.
    pub(crate) fn advance(&self, c: char, size: f32) -> f32 {
        match self {
            Self::Helvetica => {
                let units = u32::from(c)
                    .checked_sub(0x20)
                    .and_then(|i| HELVETICA_ASCII.get(i as usize))
                    .copied()
                    .unwrap_or(HELVETICA_DEFAULT);
                f32::from(units) / 1000.0 * size
            }
            Self::Face { face, units_per_em } => {
                // unmapped characters draw as .notdef (glyph 0)
                let glyph = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
                let units = face
                    .glyph_hor_advance(glyph)
                    .map_or(*units_per_em, f32::from);
                units / units_per_em * size
            }
        }
    }

    /// Width of `text` in points at `size`.
    pub(crate) fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.advance(c, size)).sum()
    }
}
