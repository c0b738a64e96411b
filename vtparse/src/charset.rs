//! ISO 2022 character-set designations (`ESC I [I2] F`).
//!
//! Grounded on the reference parser's `charset_graphic_94` table:
//! the primary 94-character-set table keyed by final byte `0x30..=0x7e`
//! with no second intermediate. Only the subset exercised by common
//! terminal use (ASCII, DEC special graphics, the big five western
//! NRCSes) is reproduced verbatim; everything else the original table
//! names resolves to [`CharsetId::Unknown`] here rather than being
//! enumerated exhaustively.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CharsetId {
    /// No charset / not yet designated.
    None,
    /// ISO-IR 6, ISO 646 IRV: plain ASCII.
    Ascii,
    /// DEC special graphics and line drawing set.
    DecSpecialGraphic,
    /// DEC supplemental graphics.
    DecSupplemental,
    /// DEC technical character set.
    DecTechnical,
    Dutch,
    Finnish,
    NorwegianDanish,
    Swedish,
    FrenchCanadian,
    Swiss,
    /// ISO-IR 100, ISO 8859-1 supplemental (96-charset).
    Latin1Supplemental,
    /// ISO-IR 101, ISO 8859-2 supplemental (96-charset).
    Latin2Supplemental,
    /// JIS C 6226-1978 (ISO-IR 42), the original multi-byte Kanji set.
    Jis0208_1978,
    /// GB 2312-1980 (ISO-IR 58).
    Gb2312,
    /// JIS X 0208-1983 (ISO-IR 87), the revised multi-byte Kanji set.
    Jis0208_1983,
    /// A designation the parser recognised syntactically but whose
    /// specific identity isn't in this crate's table.
    Unknown,
}

/// `G0`..`G3` designation slot, derived from the first intermediate byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GSlot {
    G0,
    G1,
    G2,
    G3,
}

impl GSlot {
    /// 94-charset designators: `ESC (` => G0, `ESC )` => G1,
    /// `ESC *` => G2, `ESC +` => G3. 96-charset designators: there is
    /// no G0 96-set, so `ESC -` => G1, `ESC .` => G2, `ESC /` => G3.
    pub fn from_intermediate(byte: u8) -> Option<GSlot> {
        match byte {
            0x28 => Some(GSlot::G0),
            0x29 | 0x2d => Some(GSlot::G1),
            0x2a | 0x2e => Some(GSlot::G2),
            0x2b | 0x2f => Some(GSlot::G3),
            _ => None,
        }
    }
}

/// Resolve a 94-charset designation final byte (no second
/// intermediate) to a [`CharsetId`]. `0x30..=0x7e` is the valid
/// range; bytes outside it are not designations.
pub fn resolve_94_charset(final_byte: u8) -> CharsetId {
    match final_byte {
        0x30 => CharsetId::DecSpecialGraphic,
        0x34 => CharsetId::Dutch,
        0x35 => CharsetId::Finnish,
        0x36 => CharsetId::NorwegianDanish,
        0x37 => CharsetId::Swedish,
        0x39 => CharsetId::FrenchCanadian,
        0x3d => CharsetId::Swiss,
        0x3e => CharsetId::DecSupplemental,
        0x42 => CharsetId::Ascii,
        0x30..=0x7e => CharsetId::Unknown,
        _ => CharsetId::None,
    }
}

/// Resolve a 96-charset designation final byte (`ESC -`/`.`/`/` F) to
/// a [`CharsetId`]. Grounded on `charset_graphic_96`: only the two
/// entries in everyday terminal use (ISO-IR 100/101, the Latin-1 and
/// Latin-2 supplemental sets) are named; the rest of that table's
/// entries resolve to `Unknown`.
pub fn resolve_96_charset(final_byte: u8) -> CharsetId {
    match final_byte {
        0x41 => CharsetId::Latin1Supplemental,
        0x42 => CharsetId::Latin2Supplemental,
        0x30..=0x7e => CharsetId::Unknown,
        _ => CharsetId::None,
    }
}

/// Resolve a multi-byte (`ESC $` prefixed) 94ⁿ-charset designation
/// final byte to a [`CharsetId`]. Grounded on `charset_graphic_94_n`
/// and the legacy-compatibility note in the reference parser: `@`,
/// `A`, `B` are the historical G0-only forms (`ESC $ @`, `ESC $ A`,
/// `ESC $ B`) and are resolved identically whether or not a second
/// (G-slot) intermediate was present.
pub fn resolve_94n_charset(final_byte: u8) -> CharsetId {
    match final_byte {
        0x40 => CharsetId::Jis0208_1978,
        0x41 => CharsetId::Gb2312,
        0x42 => CharsetId::Jis0208_1983,
        0x30..=0x7e => CharsetId::Unknown,
        _ => CharsetId::None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ascii_is_final_b() {
        assert_eq!(resolve_94_charset(b'B'), CharsetId::Ascii);
    }

    #[test]
    fn g_slot_from_intermediate() {
        assert_eq!(GSlot::from_intermediate(b'('), Some(GSlot::G0));
        assert_eq!(GSlot::from_intermediate(b'+'), Some(GSlot::G3));
        assert_eq!(GSlot::from_intermediate(b'Z'), None);
    }
}
