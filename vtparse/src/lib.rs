//! A state machine for parsing ECMA-48/DEC VT control sequences out of
//! a stream of Unicode code points.
//!
//! This follows the design described at
//! <https://vt100.net/emu/dec_ansi_parser>, extended with explicit
//! SOS/PM/APC handling, the single-character SCI introducer, and a
//! DECSIXEL sub-parser for the image data carried inside a sixel DCS.
//!
//! Unlike many VT parsers this crate does not call back into an actor
//! for every byte. Instead [`Parser::feed`] is pull-based: it consumes
//! one code point, returns a [`Status`] describing what just happened,
//! and on anything other than [`Status::None`] the completed
//! [`Sequence`] can be read from [`Parser::sequence`]. This suits
//! callers that want to buffer, replay or inspect sequences before
//! acting on them, rather than being forced to react synchronously
//! inside a trait method.
//!
//! ```
//! use vtparse::{Parser, Status};
//!
//! let mut parser = Parser::new();
//! for cp in "\x1b[31m".chars() {
//!     if parser.feed(cp as u32) == Status::Csi {
//!         let seq = parser.sequence();
//!         assert_eq!(seq.param(0), 31);
//!     }
//! }
//! ```
mod arg;
mod charset;
mod command;
mod parser;
mod sequence;
mod sgr;
pub mod sixel;
mod state;
mod string;
mod tables;

pub use arg::{SequenceArg, ARG_DEFAULT};
pub use charset::{resolve_94_charset, CharsetId, GSlot};
pub use command::Command;
pub use parser::{Parser, Status};
pub use sequence::{Intermediates, Kind, ParamIntro, SgrColor, MAX_ARGS};
pub use sgr::{sgr_attr, SgrAttr};

/// The record produced by the parser on every completed sequence.
pub type Sequence = sequence::Sequence;

#[cfg(test)]
mod integration_test {
    use super::*;

    #[test]
    fn csi_sgr_roundtrip_through_public_api() {
        let mut p = Parser::new();
        let mut last = Status::None;
        for cp in "\x1b[1;31mhi".chars() {
            last = p.feed(cp as u32);
            if last == Status::Csi {
                break;
            }
        }
        assert_eq!(last, Status::Csi);
        let seq = p.sequence();
        assert_eq!(seq.command(), Command::Sgr);
        assert_eq!(seq.n_args(), 2);
        assert_eq!(seq.param(0), 1);
        assert_eq!(seq.param(1), 31);
        assert_eq!(sgr_attr(seq.param(1)), Some(SgrAttr::ForeBasic(1)));
    }

    #[test]
    fn dcs_sixel_handoff() {
        use sixel::{Mode, SixelDelegate, SixelParser};

        let mut p = Parser::new();
        let mut last = Status::None;
        for cp in "\x1bPq".chars() {
            last = p.feed(cp as u32);
        }
        assert_eq!(last, Status::None);
        assert_eq!(p.sequence().kind(), Kind::None);

        // The enclosing DCS has dispatched its final byte ('q'); the
        // caller now knows (via the Command) that the passthrough
        // data is sixel and switches to feeding it through the
        // sub-parser directly.
        let mut sp = SixelParser::new(Mode::Utf8);

        struct NullDelegate;
        impl SixelDelegate for NullDelegate {
            fn sixel(&mut self, _value: u8) {}
            fn sixel_st(&mut self, _term: u8) {}
            fn decgri(&mut self, _seq: &sixel::Sequence) {}
            fn decgra(&mut self, _seq: &sixel::Sequence) {}
            fn decgci(&mut self, _seq: &sixel::Sequence) {}
            fn decgcr(&mut self, _seq: &sixel::Sequence) {}
            fn decgch(&mut self, _seq: &sixel::Sequence) {}
            fn decgnl(&mut self, _seq: &sixel::Sequence) {}
        }
        let mut d = NullDelegate;
        let status = sp.feed(b'#', &mut d);
        assert_eq!(status, sixel::Status::Continue);
    }
}
