//! Named SGR (`CSI ... m`) parameter codes.
//!
//! Grounded in the reference parser's `parser-sgr.hh` `SGR(...)` table.
//! Not exhaustive: only the codes commonly produced by real terminal
//! applications are named; anything else resolves to `None` and the
//! caller can still read the raw numeric parameter from the
//! [`crate::Sequence`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SgrAttr {
    Reset,
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Inverse,
    Invisible,
    Strikethrough,
    DoubleUnderline,
    BoldOrDimOff,
    ItalicOff,
    UnderlineOff,
    BlinkOff,
    InverseOff,
    InvisibleOff,
    StrikethroughOff,
    ForeBasic(u8),
    ForeSpec,
    ForeDefault,
    BackBasic(u8),
    BackSpec,
    BackDefault,
    ForeBasicBright(u8),
    BackBasicBright(u8),
    Overline,
    OverlineOff,
    DecoSpec,
    DecoDefault,
}

pub fn sgr_attr(code: i32) -> Option<SgrAttr> {
    match code {
        0 => Some(SgrAttr::Reset),
        1 => Some(SgrAttr::Bold),
        2 => Some(SgrAttr::Dim),
        3 => Some(SgrAttr::Italic),
        4 => Some(SgrAttr::Underline),
        5 | 6 => Some(SgrAttr::Blink),
        7 => Some(SgrAttr::Inverse),
        8 => Some(SgrAttr::Invisible),
        9 => Some(SgrAttr::Strikethrough),
        21 => Some(SgrAttr::DoubleUnderline),
        22 => Some(SgrAttr::BoldOrDimOff),
        23 => Some(SgrAttr::ItalicOff),
        24 => Some(SgrAttr::UnderlineOff),
        25 => Some(SgrAttr::BlinkOff),
        27 => Some(SgrAttr::InverseOff),
        28 => Some(SgrAttr::InvisibleOff),
        29 => Some(SgrAttr::StrikethroughOff),
        30..=37 => Some(SgrAttr::ForeBasic((code - 30) as u8)),
        38 => Some(SgrAttr::ForeSpec),
        39 => Some(SgrAttr::ForeDefault),
        40..=47 => Some(SgrAttr::BackBasic((code - 40) as u8)),
        48 => Some(SgrAttr::BackSpec),
        49 => Some(SgrAttr::BackDefault),
        53 => Some(SgrAttr::Overline),
        55 => Some(SgrAttr::OverlineOff),
        58 => Some(SgrAttr::DecoSpec),
        59 => Some(SgrAttr::DecoDefault),
        90..=97 => Some(SgrAttr::ForeBasicBright((code - 90) as u8)),
        100..=107 => Some(SgrAttr::BackBasicBright((code - 100) as u8)),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bold_is_one() {
        assert_eq!(sgr_attr(1), Some(SgrAttr::Bold));
    }

    #[test]
    fn fore_spec_is_38() {
        assert_eq!(sgr_attr(38), Some(SgrAttr::ForeSpec));
    }

    #[test]
    fn unknown_is_none() {
        assert_eq!(sgr_attr(12), None);
    }
}
