//! The main control-sequence state machine.
use log::trace;

use crate::charset::{resolve_94_charset, resolve_94n_charset, resolve_96_charset, CharsetId, GSlot};
use crate::command::Command;
use crate::sequence::{Kind, ParamIntro, Sequence};
use crate::state::State;
use crate::tables;

const ESC: u32 = 0x1b;
const CAN: u32 = 0x18;
const SUB: u32 = 0x1a;
const BEL: u32 = 0x07;
const BACKSLASH: u32 = 0x5c;

const C1_DCS: u32 = 0x90;
const C1_SOS: u32 = 0x98;
const C1_SCI: u32 = 0x9a;
const C1_CSI: u32 = 0x9b;
const C1_ST: u32 = 0x9c;
const C1_OSC: u32 = 0x9d;
const C1_PM: u32 = 0x9e;
const C1_APC: u32 = 0x9f;

/// The result of feeding one code point to [`Parser::feed`].
pub type Status = Kind;

/// The VT/ECMA-48 control-sequence state machine.
///
/// Owns a single reusable [`Sequence`] record: after `feed` returns a
/// status other than [`Status::None`], read the result from
/// [`Parser::sequence`] before calling `feed` again.
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    seq: Sequence,
    /// Which kind of string sequence is being collected while in one
    /// of the `OscString`/`DcsPass`/`StIgnore` family of states.
    str_kind: Kind,
}

impl Default for Parser {
    fn default() -> Self {
        Parser {
            state: State::Ground,
            seq: Sequence::default(),
            str_kind: Kind::None,
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The most recently completed (or in-progress) sequence record.
    pub fn sequence(&self) -> &Sequence {
        &self.seq
    }

    fn enter_ground(&mut self) {
        self.state = State::Ground;
    }

    fn begin_fresh_escape(&mut self) {
        self.state = State::Escape;
        self.seq.intermediates_mut().clear();
    }

    fn begin_csi(&mut self, introducer: u32) {
        self.state = State::CsiEntry;
        self.seq.clear_params();
        self.seq.clear_string();
        self.seq.set_introducer(introducer);
    }

    fn begin_dcs(&mut self, introducer: u32) {
        self.state = State::DcsEntry;
        self.seq.clear_params();
        self.seq.clear_string();
        self.seq.set_introducer(introducer);
    }

    fn begin_str_collect(&mut self, kind: Kind, introducer: u32) {
        self.state = if kind == Kind::Osc {
            State::OscString
        } else {
            State::StIgnore
        };
        self.str_kind = kind;
        self.seq.clear_params();
        self.seq.clear_string();
        self.seq.set_introducer(introducer);
    }

    /// `(introducer ^ terminator) & 0x80 == 0`: both came from the C0
    /// (ESC-prefixed) control set, or both from the C1 (8-bit) set.
    fn control_set_matches(&self, terminator: u32) -> bool {
        (self.seq.introducer() ^ terminator) & 0x80 == 0
    }

    fn finish_str_collect(&mut self, terminator: u32) -> Status {
        let kind = self.str_kind;
        self.enter_ground();
        let bypasses_check = kind == Kind::Osc && terminator == BEL;
        if !bypasses_check && !self.control_set_matches(terminator) {
            self.seq.set_kind(Kind::Ignore);
            self.seq.set_terminator(terminator);
            trace!("control-set mismatch terminating string sequence");
            return Status::Ignore;
        }
        self.seq.set_kind(kind);
        self.seq.set_terminator(terminator);
        kind
    }

    fn abort_str_collect(&mut self) {
        self.enter_ground();
        self.seq.set_kind(Kind::None);
    }

    /// Feed one Unicode scalar value (already UTF-8 decoded upstream)
    /// to the state machine.
    pub fn feed(&mut self, cp: u32) -> Status {
        // CAN/SUB are recognised in every state.
        if cp == CAN {
            self.enter_ground();
            self.seq.set_kind(Kind::None);
            return Status::None;
        }
        if cp == SUB {
            self.enter_ground();
            self.seq.clear_params();
            self.seq.set_kind(Kind::Control);
            self.seq.set_command(Command::Sub);
            self.seq.set_terminator(cp);
            return Status::Control;
        }

        match self.state {
            State::Ground => self.feed_ground(cp),
            State::Escape => self.feed_escape(cp),
            State::EscapeIntermediate => self.feed_escape_intermediate(cp),
            State::CsiEntry | State::CsiParam => self.feed_csi_param(cp),
            State::CsiIntermediate => self.feed_csi_intermediate(cp),
            State::CsiIgnore => self.feed_csi_ignore(cp),
            State::DcsEntry | State::DcsParam => self.feed_dcs_param(cp),
            State::DcsIntermediate => self.feed_dcs_intermediate(cp),
            State::DcsIgnore => self.feed_dcs_ignore(cp),
            State::DcsPass => self.feed_dcs_pass(cp),
            State::DcsPassEsc => self.feed_str_esc(cp, true),
            State::OscString => self.feed_osc_string(cp),
            State::OscStringEsc => self.feed_str_esc(cp, false),
            State::StIgnore => self.feed_st_ignore(cp),
            State::StIgnoreEsc => self.feed_str_esc(cp, false),
            State::Sci => self.feed_sci(cp),
        }
    }

    fn feed_ground(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.begin_fresh_escape();
            return Status::None;
        }
        if (0x80..=0x9f).contains(&cp) {
            return self.dispatch_c1_entry(cp);
        }
        if cp <= 0x1f || cp == 0x7f {
            self.seq.clear_params();
            self.seq.set_kind(Kind::Control);
            self.seq.set_command(tables::dispatch_c0(cp));
            self.seq.set_terminator(cp);
            return Status::Control;
        }
        // printable: 0x20..=0x7e, and anything above 0x9f
        self.seq.clear_params();
        self.seq.set_kind(Kind::Graphic);
        self.seq.set_command(Command::Graphic);
        self.seq.set_terminator(cp);
        Status::Graphic
    }

    fn dispatch_c1_entry(&mut self, cp: u32) -> Status {
        match cp {
            C1_DCS => {
                self.begin_dcs(cp);
                Status::None
            }
            C1_SOS => {
                self.begin_str_collect(Kind::Sos, cp);
                Status::None
            }
            C1_SCI => {
                self.state = State::Sci;
                self.seq.clear_params();
                self.seq.set_introducer(cp);
                Status::None
            }
            C1_CSI => {
                self.begin_csi(cp);
                Status::None
            }
            C1_ST => {
                // A bare ST outside any string context: nothing to do.
                Status::None
            }
            C1_OSC => {
                self.begin_str_collect(Kind::Osc, cp);
                Status::None
            }
            C1_PM => {
                self.begin_str_collect(Kind::Pm, cp);
                Status::None
            }
            C1_APC => {
                self.begin_str_collect(Kind::Apc, cp);
                Status::None
            }
            _ => {
                self.seq.clear_params();
                self.seq.set_kind(Kind::Control);
                self.seq.set_command(tables::dispatch_c1(cp));
                self.seq.set_terminator(cp);
                Status::Control
            }
        }
    }

    fn feed_escape(&mut self, cp: u32) -> Status {
        match cp {
            0x20..=0x2f => {
                self.seq.intermediates_mut().push(cp as u8);
                self.state = State::EscapeIntermediate;
                Status::None
            }
            0x50 => {
                self.begin_dcs(ESC);
                Status::None
            }
            0x5b => {
                self.begin_csi(ESC);
                Status::None
            }
            0x5d => {
                self.begin_str_collect(Kind::Osc, ESC);
                Status::None
            }
            0x58 => {
                self.begin_str_collect(Kind::Sos, ESC);
                Status::None
            }
            0x5e => {
                self.begin_str_collect(Kind::Pm, ESC);
                Status::None
            }
            0x5f => {
                self.begin_str_collect(Kind::Apc, ESC);
                Status::None
            }
            0x5a => {
                self.state = State::Sci;
                self.seq.clear_params();
                self.seq.set_introducer(ESC);
                Status::None
            }
            0x30..=0x7e => self.dispatch_escape_final(cp as u8),
            _ => Status::None,
        }
    }

    fn feed_escape_intermediate(&mut self, cp: u32) -> Status {
        match cp {
            0x20..=0x2f => {
                if !self.seq.intermediates_mut().push(cp as u8) {
                    trace!("dropping excess ESC intermediate");
                }
                Status::None
            }
            0x30..=0x7e => self.dispatch_escape_final(cp as u8),
            _ => Status::None,
        }
    }

    fn dispatch_escape_final(&mut self, final_byte: u8) -> Status {
        self.enter_ground();
        let intermediates = self.seq.intermediates().bytes();
        let first = intermediates.first().copied();

        if let Some(designator) = first {
            if matches!(designator, b'(' | b')' | b'*' | b'+') {
                if let Some(slot) = GSlot::from_intermediate(designator) {
                    let charset = resolve_94_charset(final_byte);
                    self.seq.set_kind(Kind::Escape);
                    self.seq.set_command(Command::GnDm);
                    self.seq.set_terminator(final_byte as u32);
                    self.seq.set_charset(charset, slot);
                    return Status::Escape;
                }
            }
            if matches!(designator, b'-' | b'.' | b'/') {
                if let Some(slot) = GSlot::from_intermediate(designator) {
                    let charset = resolve_96_charset(final_byte);
                    self.seq.set_kind(Kind::Escape);
                    self.seq.set_command(Command::GnDm);
                    self.seq.set_terminator(final_byte as u32);
                    self.seq.set_charset(charset, slot);
                    return Status::Escape;
                }
            }
            if designator == b'$' {
                // Multi-byte (94^n/96^n) designation: `ESC $ F` is
                // the legacy G0-only form; `ESC $ I F` designates the
                // G-slot named by the second intermediate `I`.
                let second = intermediates.get(1).copied();
                let (slot, charset) = match second {
                    Some(i2) if matches!(i2, b'(' | b')' | b'*' | b'+') => {
                        (GSlot::from_intermediate(i2), resolve_94n_charset(final_byte))
                    }
                    Some(i2) if matches!(i2, b'-' | b'.' | b'/') => {
                        (GSlot::from_intermediate(i2), CharsetId::Unknown)
                    }
                    None if matches!(final_byte, b'@' | b'A' | b'B') => {
                        (Some(GSlot::G0), resolve_94n_charset(final_byte))
                    }
                    _ => (None, CharsetId::None),
                };
                if let Some(slot) = slot {
                    self.seq.set_kind(Kind::Escape);
                    self.seq.set_command(Command::GnDMm);
                    self.seq.set_terminator(final_byte as u32);
                    self.seq.set_charset(charset, slot);
                    return Status::Escape;
                }
            }
        }

        let command = tables::dispatch_esc(final_byte, first);
        self.seq.set_kind(Kind::Escape);
        self.seq.set_command(command);
        self.seq.set_terminator(final_byte as u32);
        Status::Escape
    }

    fn push_param_byte(&mut self, cp: u32) -> bool {
        match cp {
            0x30..=0x39 => {
                if self.seq.args_full() {
                    return false;
                }
                self.seq.current_arg_mut().push_digit(cp as u8 - b'0');
                true
            }
            0x3a => {
                if self.seq.args_full() {
                    return false;
                }
                self.seq.finish_subparam();
                true
            }
            0x3b => {
                if self.seq.args_full() {
                    return false;
                }
                self.seq.finish_param();
                true
            }
            _ => true,
        }
    }

    fn feed_csi_param(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.begin_fresh_escape();
            return Status::None;
        }
        match cp {
            0x30..=0x39 | 0x3a | 0x3b => {
                if !self.push_param_byte(cp) {
                    self.state = State::CsiIgnore;
                } else {
                    self.state = State::CsiParam;
                }
                Status::None
            }
            0x3c..=0x3f => {
                if self.state == State::CsiEntry && self.seq.intermediates_mut().set_param_intro(cp as u8) {
                    self.state = State::CsiParam;
                } else {
                    self.state = State::CsiIgnore;
                }
                Status::None
            }
            0x20..=0x2f => {
                self.seq.intermediates_mut().push(cp as u8);
                self.state = State::CsiIntermediate;
                Status::None
            }
            0x40..=0x7e => self.dispatch_csi_final(cp as u8),
            _ => Status::None,
        }
    }

    fn feed_csi_intermediate(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.begin_fresh_escape();
            return Status::None;
        }
        match cp {
            0x20..=0x2f => {
                if !self.seq.intermediates_mut().push(cp as u8) {
                    trace!("dropping excess CSI intermediate");
                }
                Status::None
            }
            0x30..=0x3f => {
                self.state = State::CsiIgnore;
                Status::None
            }
            0x40..=0x7e => self.dispatch_csi_final(cp as u8),
            _ => Status::None,
        }
    }

    fn feed_csi_ignore(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.begin_fresh_escape();
            return Status::None;
        }
        if (0x40..=0x7e).contains(&cp) {
            self.enter_ground();
            self.seq.set_kind(Kind::Ignore);
            self.seq.set_terminator(cp);
            return Status::Ignore;
        }
        Status::None
    }

    fn dispatch_csi_final(&mut self, final_byte: u8) -> Status {
        self.enter_ground();
        self.seq.finalize_params();
        let param_intro = self.seq.intermediates().param_intro();
        let intermediate = self.seq.intermediates().first();
        let command = tables::dispatch_csi(final_byte, param_intro, intermediate);
        self.seq.set_kind(Kind::Csi);
        self.seq.set_command(command);
        self.seq.set_terminator(final_byte as u32);
        Status::Csi
    }

    fn feed_dcs_param(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.begin_fresh_escape();
            return Status::None;
        }
        match cp {
            0x30..=0x39 | 0x3a | 0x3b => {
                if !self.push_param_byte(cp) {
                    self.state = State::DcsIgnore;
                } else {
                    self.state = State::DcsParam;
                }
                Status::None
            }
            0x3c..=0x3f => {
                if self.state == State::DcsEntry && self.seq.intermediates_mut().set_param_intro(cp as u8) {
                    self.state = State::DcsParam;
                } else {
                    self.state = State::DcsIgnore;
                }
                Status::None
            }
            0x20..=0x2f => {
                self.seq.intermediates_mut().push(cp as u8);
                self.state = State::DcsIntermediate;
                Status::None
            }
            0x40..=0x7e => self.dispatch_dcs_final(cp as u8),
            _ => Status::None,
        }
    }

    fn feed_dcs_intermediate(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.begin_fresh_escape();
            return Status::None;
        }
        match cp {
            0x20..=0x2f => {
                if !self.seq.intermediates_mut().push(cp as u8) {
                    trace!("dropping excess DCS intermediate");
                }
                Status::None
            }
            0x30..=0x3f => {
                self.state = State::DcsIgnore;
                Status::None
            }
            0x40..=0x7e => self.dispatch_dcs_final(cp as u8),
            _ => Status::None,
        }
    }

    fn feed_dcs_ignore(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.begin_fresh_escape();
            return Status::None;
        }
        // otherwise swallowed until the enclosing ESC/ST exits this DCS.
        Status::None
    }

    fn dispatch_dcs_final(&mut self, final_byte: u8) -> Status {
        self.seq.finalize_params();
        let param_intro = self.seq.intermediates().param_intro();
        let intermediate = self.seq.intermediates().first();
        let command = tables::dispatch_dcs(final_byte, param_intro, intermediate);
        self.seq.set_command(command);
        self.seq.set_terminator(final_byte as u32);
        self.seq.clear_string();
        self.str_kind = Kind::Dcs;
        self.state = State::DcsPass;
        Status::None
    }

    fn feed_dcs_pass(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.state = State::DcsPassEsc;
            return Status::None;
        }
        if cp == C1_ST {
            return self.finish_str_collect(cp);
        }
        self.seq.push_string(char::from_u32(cp).unwrap_or('\u{fffd}'));
        Status::None
    }

    fn feed_osc_string(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.state = State::OscStringEsc;
            return Status::None;
        }
        if cp == BEL {
            return self.finish_str_collect(cp);
        }
        if cp == C1_ST {
            return self.finish_str_collect(cp);
        }
        if cp >= 0x20 {
            self.seq.push_string(char::from_u32(cp).unwrap_or('\u{fffd}'));
        }
        Status::None
    }

    fn feed_st_ignore(&mut self, cp: u32) -> Status {
        if cp == ESC {
            self.state = State::StIgnoreEsc;
            return Status::None;
        }
        if cp == C1_ST {
            return self.finish_str_collect(cp);
        }
        if cp >= 0x20 {
            self.seq.push_string(char::from_u32(cp).unwrap_or('\u{fffd}'));
        }
        Status::None
    }

    /// Shared handling for `DcsPassEsc`/`OscStringEsc`/`StIgnoreEsc`:
    /// a following backslash completes the pending string as ST;
    /// anything else aborts it and re-enters `Escape` to reprocess
    /// this same byte as the start of a new sequence.
    fn feed_str_esc(&mut self, cp: u32, _was_dcs: bool) -> Status {
        if cp == BACKSLASH {
            return self.finish_str_collect(ESC);
        }
        self.abort_str_collect();
        self.begin_fresh_escape();
        self.feed_escape(cp)
    }

    fn feed_sci(&mut self, cp: u32) -> Status {
        self.enter_ground();
        match cp {
            0x08..=0x0d | 0x20..=0x7e => {
                self.seq.set_kind(Kind::Sci);
                self.seq.set_command(tables::dispatch_sci(cp as u8));
                self.seq.set_terminator(cp);
                Status::Sci
            }
            _ => Status::None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sequence::SgrColor;

    fn feed_all(p: &mut Parser, bytes: &[u8]) -> Status {
        let mut last = Status::None;
        for &b in bytes {
            last = p.feed(b as u32);
        }
        last
    }

    #[test]
    fn s1_sgr_31() {
        let mut p = Parser::new();
        let status = feed_all(&mut p, b"\x1b[31m");
        assert_eq!(status, Status::Csi);
        let seq = p.sequence();
        assert_eq!(seq.command(), Command::Sgr);
        assert_eq!(seq.n_args(), 1);
        assert_eq!(seq.param(0), 31);
    }

    #[test]
    fn s2_sgr_colon_subparams() {
        let mut p = Parser::new();
        let status = feed_all(&mut p, b"\x1b[38:2::10:20:30m");
        assert_eq!(status, Status::Csi);
        let seq = p.sequence();
        assert_eq!(seq.n_args(), 6);
        assert_eq!(
            [
                seq.param(0),
                seq.param(1),
                seq.param(2),
                seq.param(3),
                seq.param(4),
                seq.param(5)
            ],
            [38, 2, -1, 10, 20, 30]
        );
        for i in 0..5 {
            assert!(seq.is_subparam(i), "slot {} should be a subparam", i);
        }
        assert!(!seq.is_subparam(5));
        assert_eq!(seq.sgr_color(0), Some((SgrColor::Rgb(10, 20, 30), 6)));
    }

    #[test]
    fn s2b_sgr_colon_rejects_non_default_colorspace_id() {
        // `38:2:5:10:20:30` has a present, non-default colour-space-id
        // subparameter (`5`); the whole sequence must be rejected
        // rather than silently misread as `Rgb(5, 10, 20)`.
        let mut p = Parser::new();
        let status = feed_all(&mut p, b"\x1b[38:2:5:10:20:30m");
        assert_eq!(status, Status::Csi);
        let seq = p.sequence();
        assert_eq!(seq.sgr_color(0), None);
    }

    #[test]
    fn s3_osc_bel() {
        let mut p = Parser::new();
        let status = feed_all(&mut p, b"\x1b]0;hello\x07");
        assert_eq!(status, Status::Osc);
        assert_eq!(p.sequence().string(), "0;hello");
        assert_eq!(p.sequence().terminator(), 0x07);
    }

    #[test]
    fn s5_all_default_subparams() {
        let mut p = Parser::new();
        let status = feed_all(&mut p, b"\x1b[;::;;m");
        assert_eq!(status, Status::Csi);
        let seq = p.sequence();
        assert_eq!(seq.n_args(), 5);
        for i in 0..5 {
            assert_eq!(seq.param(i), -1);
        }
        assert!(seq.is_subparam(1));
        assert!(seq.is_subparam(2));
    }

    #[test]
    fn s6_designate_ascii() {
        let mut p = Parser::new();
        let status = feed_all(&mut p, b"\x1b(B");
        assert_eq!(status, Status::Escape);
        let seq = p.sequence();
        assert_eq!(seq.command(), Command::GnDm);
        assert_eq!(seq.charset(), Some((CharsetId::Ascii, GSlot::G0)));
    }

    #[test]
    fn s7_designate_96_charset_into_g1() {
        let mut p = Parser::new();
        let status = feed_all(&mut p, b"\x1b-A");
        assert_eq!(status, Status::Escape);
        let seq = p.sequence();
        assert_eq!(seq.command(), Command::GnDm);
        assert_eq!(seq.charset(), Some((CharsetId::Latin1Supplemental, GSlot::G1)));
    }

    #[test]
    fn s8_designate_multibyte_legacy_g0() {
        let mut p = Parser::new();
        let status = feed_all(&mut p, b"\x1b$B");
        assert_eq!(status, Status::Escape);
        let seq = p.sequence();
        assert_eq!(seq.command(), Command::GnDMm);
        assert_eq!(seq.charset(), Some((CharsetId::Jis0208_1983, GSlot::G0)));
    }

    #[test]
    fn s9_designate_multibyte_into_g2() {
        let mut p = Parser::new();
        let status = feed_all(&mut p, b"\x1b$*A");
        assert_eq!(status, Status::Escape);
        let seq = p.sequence();
        assert_eq!(seq.command(), Command::GnDMm);
        assert_eq!(seq.charset(), Some((CharsetId::Gb2312, GSlot::G2)));
    }

    #[test]
    fn p5_control_set_mismatch_reports_ignore() {
        let mut p = Parser::new();
        // OSC introduced via ESC ] (C0 form), terminated via raw C1 ST.
        let mut status = Status::None;
        for &b in b"\x1b]0;x" {
            status = p.feed(b as u32);
        }
        status = p.feed(0x9c);
        assert_eq!(status, Status::Ignore);
    }

    #[test]
    fn p6_arity_overflow_drops_sequence() {
        let mut p = Parser::new();
        let mut input = Vec::new();
        input.extend_from_slice(b"\x1b[");
        for _ in 0..40 {
            input.extend_from_slice(b"1;");
        }
        input.push(b'm');
        let status = feed_all(&mut p, &input);
        assert_eq!(status, Status::Ignore);
    }

    #[test]
    fn p7_reset_is_idempotent() {
        let mut p = Parser::new();
        feed_all(&mut p, b"\x1b[3");
        p.reset();
        let fresh = Parser::new();
        assert_eq!(p.sequence().kind(), fresh.sequence().kind());
        let status = feed_all(&mut p, b"\x1b[31m");
        assert_eq!(status, Status::Csi);
        assert_eq!(p.sequence().param(0), 31);
    }

    #[test]
    fn p8_printable_run_all_graphic() {
        let mut p = Parser::new();
        let mut count = 0;
        for b in b'a'..=b'z' {
            if p.feed(b as u32) == Status::Graphic {
                count += 1;
            }
        }
        assert_eq!(count, 26);
    }

    #[test]
    fn p9_esc_abort_drops_dcs() {
        let mut p = Parser::new();
        // Begin a DCS, then abort with ESC followed by something
        // other than backslash.
        feed_all(&mut p, b"\x1bPq");
        let status = p.feed(ESC);
        assert_eq!(status, Status::None);
        // '[' should now start a fresh CSI rather than be swallowed
        // by the aborted DCS.
        let status = feed_all(&mut p, b"[31m");
        assert_eq!(status, Status::Csi);
    }

    #[test]
    fn p10_esc_abort_drops_csi_param_and_ignore_and_dcs_param() {
        // ESC arriving mid-CSI-param aborts the first CSI and starts
        // a fresh one; the merged-sequence misread this guards
        // against would report a single CSI with params [3,1,3,2].
        let mut p = Parser::new();
        feed_all(&mut p, b"\x1b[31");
        let status = feed_all(&mut p, b"\x1b[32m");
        assert_eq!(status, Status::Csi);
        let seq = p.sequence();
        assert_eq!(seq.n_args(), 1);
        assert_eq!(seq.param(0), 32);

        // ESC arriving in CSI_IGNORE (after an overflowed/invalid
        // sequence) likewise starts a fresh CSI rather than being
        // swallowed.
        let mut p = Parser::new();
        feed_all(&mut p, b"\x1b[1<"); // a second param-intro byte -> CsiIgnore
        let status = feed_all(&mut p, b"\x1b[33m");
        assert_eq!(status, Status::Csi);
        assert_eq!(p.sequence().param(0), 33);

        // ESC arriving mid-DCS-param aborts the DCS and starts a
        // fresh CSI.
        let mut p = Parser::new();
        feed_all(&mut p, b"\x1bP1");
        let status = feed_all(&mut p, b"\x1b[34m");
        assert_eq!(status, Status::Csi);
        assert_eq!(p.sequence().param(0), 34);
    }

    proptest::proptest! {
        /// P6: any number of `;`-separated numeric params beyond
        /// `MAX_ARGS` drops the whole sequence rather than panicking
        /// or truncating silently into a different command.
        #[test]
        fn arity_overflow_always_ignores(extra_params in 1usize..64) {
            let mut p = Parser::new();
            let mut input = Vec::new();
            input.extend_from_slice(b"\x1b[");
            for _ in 0..(crate::sequence::MAX_ARGS + extra_params) {
                input.extend_from_slice(b"1;");
            }
            input.push(b'm');
            let status = feed_all(&mut p, &input);
            proptest::prop_assert_eq!(status, Status::Ignore);
        }

        /// P7: `reset` always returns the parser to the same state a
        /// freshly constructed one starts in, regardless of what was
        /// fed beforehand.
        #[test]
        fn reset_always_matches_fresh_state(
            indices in proptest::collection::vec(0usize..10, 0..16)
        ) {
            const ALPHABET: &[u8] = b"\x1b[]0123456789;:mq";
            let prefix: Vec<u8> = indices.iter().map(|&i| ALPHABET[i % ALPHABET.len()]).collect();
            let mut p = Parser::new();
            feed_all(&mut p, &prefix);
            p.reset();
            let fresh = Parser::new();
            proptest::prop_assert_eq!(p.sequence().kind(), fresh.sequence().kind());
            let status = feed_all(&mut p, b"\x1b[31m");
            proptest::prop_assert_eq!(status, Status::Csi);
            proptest::prop_assert_eq!(p.sequence().param(0), 31);
        }

        /// P8: every printable ASCII byte fed from ground always
        /// reports as a graphic character, never swallowed.
        #[test]
        fn printable_run_never_loses_a_byte(bytes in proptest::collection::vec(0x20u8..0x7f, 0..64)) {
            let mut p = Parser::new();
            let mut count = 0;
            for &b in &bytes {
                if p.feed(b as u32) == Status::Graphic {
                    count += 1;
                }
            }
            proptest::prop_assert_eq!(count, bytes.len());
        }
    }
}
