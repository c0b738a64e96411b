//! The `Sequence` record produced by [`crate::Parser::feed`], and the
//! packed intermediate-byte representation it carries.
use crate::arg::{SequenceArg, ARG_DEFAULT};
use crate::charset::{CharsetId, GSlot};
use crate::command::Command;
use crate::string::SequenceString;

/// Maximum number of parameter slots a single sequence can carry.
/// Sequences with more parameters than this are dropped entirely
/// (see `Parser`'s `*_IGNORE` states).
pub const MAX_ARGS: usize = 32;

/// The broad category a completed sequence falls into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    None,
    /// Parsed but rejected (arity overflow, control-set mismatch, ...).
    Ignore,
    Graphic,
    Control,
    Escape,
    Csi,
    Dcs,
    Osc,
    Sci,
    Apc,
    Pm,
    Sos,
}

impl Default for Kind {
    fn default() -> Self {
        Kind::None
    }
}

/// Parameter-introducer byte recognised at the start of a CSI/DCS
/// parameter area (`< = > ?`), packed into the low 3 bits of
/// [`Intermediates`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParamIntro {
    Less,
    Equal,
    Greater,
    Question,
}

impl ParamIntro {
    fn from_byte(b: u8) -> Option<ParamIntro> {
        match b {
            0x3c => Some(ParamIntro::Less),
            0x3d => Some(ParamIntro::Equal),
            0x3e => Some(ParamIntro::Greater),
            0x3f => Some(ParamIntro::Question),
            _ => None,
        }
    }

    fn to_code(self) -> u32 {
        match self {
            ParamIntro::Less => 1,
            ParamIntro::Equal => 2,
            ParamIntro::Greater => 3,
            ParamIntro::Question => 4,
        }
    }

    fn from_code(code: u32) -> Option<ParamIntro> {
        match code {
            1 => Some(ParamIntro::Less),
            2 => Some(ParamIntro::Equal),
            3 => Some(ParamIntro::Greater),
            4 => Some(ParamIntro::Question),
            _ => None,
        }
    }
}

const MAX_INTERMEDIATES: usize = 4;

/// A packed set of intermediate bytes (`0x20..=0x2f`) plus an
/// optional leading parameter-introducer byte. The parameter
/// introducer occupies the low 3 bits; each intermediate occupies
/// the next 5-bit slot in arrival order, `0` meaning absent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Intermediates(u32);

impl Intermediates {
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Record a CSI/DCS parameter-introducer byte. Returns `false`
    /// if one was already recorded (a protocol violation the caller
    /// should turn into an ignore).
    pub fn set_param_intro(&mut self, byte: u8) -> bool {
        if self.0 & 0x7 != 0 {
            return false;
        }
        match ParamIntro::from_byte(byte) {
            Some(pi) => {
                self.0 |= pi.to_code();
                true
            }
            None => false,
        }
    }

    pub fn param_intro(&self) -> Option<ParamIntro> {
        ParamIntro::from_code(self.0 & 0x7)
    }

    /// Append an intermediate byte. Returns `false` if more than
    /// [`MAX_INTERMEDIATES`] have already been collected; excess
    /// intermediates are silently discarded by the caller.
    pub fn push(&mut self, byte: u8) -> bool {
        debug_assert!((0x20..=0x2f).contains(&byte));
        for slot in 0..MAX_INTERMEDIATES {
            let shift = 3 + slot * 5;
            if (self.0 >> shift) & 0x1f == 0 {
                let encoded = (byte as u32 - 0x20 + 1) & 0x1f;
                self.0 |= encoded << shift;
                return true;
            }
        }
        false
    }

    /// The intermediate bytes in arrival order.
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MAX_INTERMEDIATES);
        for slot in 0..MAX_INTERMEDIATES {
            let shift = 3 + slot * 5;
            let encoded = (self.0 >> shift) & 0x1f;
            if encoded == 0 {
                break;
            }
            out.push((encoded - 1) as u8 + 0x20);
        }
        out
    }

    pub fn first(&self) -> Option<u8> {
        self.bytes().first().copied()
    }
}

/// A resolved color from an SGR 38/48/58 sub-sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SgrColor {
    Indexed(u16),
    Rgb(u16, u16, u16),
}

/// The record produced by the parser on every completed sequence.
/// Re-used across calls to `Parser::feed`; valid only until the next
/// `feed`.
#[derive(Debug, Clone)]
pub struct Sequence {
    kind: Kind,
    command: Command,
    terminator: u32,
    introducer: u32,
    intermediates: Intermediates,
    charset: Option<(CharsetId, GSlot)>,
    args: [SequenceArg; MAX_ARGS],
    n_args: usize,
    n_final_args: usize,
    string: SequenceString,
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence {
            kind: Kind::default(),
            command: Command::default(),
            terminator: 0,
            introducer: 0,
            intermediates: Intermediates::default(),
            charset: None,
            args: [SequenceArg::default(); MAX_ARGS],
            n_args: 0,
            n_final_args: 0,
            string: SequenceString::default(),
        }
    }
}

impl Sequence {
    pub(crate) fn clear_params(&mut self) {
        for a in &mut self.args {
            a.reset();
        }
        self.n_args = 0;
        self.n_final_args = 0;
        self.intermediates.clear();
        self.charset = None;
    }

    pub(crate) fn clear_string(&mut self) {
        self.string.clear();
    }

    pub(crate) fn set_kind(&mut self, kind: Kind) {
        self.kind = kind;
    }

    pub(crate) fn set_command(&mut self, command: Command) {
        self.command = command;
    }

    pub(crate) fn set_terminator(&mut self, terminator: u32) {
        self.terminator = terminator;
    }

    pub(crate) fn set_introducer(&mut self, introducer: u32) {
        self.introducer = introducer;
    }

    pub(crate) fn set_charset(&mut self, charset: CharsetId, slot: GSlot) {
        self.charset = Some((charset, slot));
    }

    pub(crate) fn intermediates_mut(&mut self) -> &mut Intermediates {
        &mut self.intermediates
    }

    pub(crate) fn push_string(&mut self, c: char) {
        self.string.push(c);
    }

    /// True if the parameter count is already at capacity; the
    /// caller should drop the sequence rather than push another arg.
    /// `n_args` counts *closed* slots; the pending (not yet closed)
    /// slot lives at `args[n_args]`, so the array is exhausted once
    /// `n_args` reaches `MAX_ARGS`.
    pub(crate) fn args_full(&self) -> bool {
        self.n_args >= MAX_ARGS
    }

    /// The slot currently being accumulated (not yet closed by a
    /// separator or the terminator).
    pub(crate) fn current_arg_mut(&mut self) -> &mut SequenceArg {
        &mut self.args[self.n_args]
    }

    /// Close the pending slot as a sub-parameter (colon-separated)
    /// and advance to the next one. Must not be called when
    /// [`Sequence::args_full`] is true.
    pub(crate) fn finish_subparam(&mut self) {
        self.args[self.n_args].mark_sub();
        self.n_args += 1;
    }

    /// Close the pending slot as a top-level parameter
    /// (semicolon-separated) and advance to the next one. Must not
    /// be called when [`Sequence::args_full`] is true.
    pub(crate) fn finish_param(&mut self) {
        self.n_final_args += 1;
        self.n_args += 1;
    }

    /// Called once at the terminator. The pending slot is only
    /// counted if it ever saw a digit — a sequence ending right
    /// after a separator (`CSI ;;m`) does not materialise one more
    /// trailing default slot beyond what the separators already
    /// produced.
    pub(crate) fn finalize_params(&mut self) {
        if self.n_args < MAX_ARGS && self.args[self.n_args].started() {
            self.n_final_args += 1;
            self.n_args += 1;
        }
    }

    // --- public accessors -------------------------------------------------

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn terminator(&self) -> u32 {
        self.terminator
    }

    pub fn introducer(&self) -> u32 {
        self.introducer
    }

    pub fn intermediates(&self) -> &Intermediates {
        &self.intermediates
    }

    pub fn charset(&self) -> Option<(CharsetId, GSlot)> {
        self.charset
    }

    pub fn n_args(&self) -> usize {
        self.n_args
    }

    pub fn n_final_args(&self) -> usize {
        self.n_final_args
    }

    /// The value of parameter `i`, or `default` if `i` is beyond
    /// `n_args` or was never started.
    pub fn param_or(&self, i: usize, default: i32) -> i32 {
        self.args.get(i).map(|a| a.value_or(default)).unwrap_or(default)
    }

    pub fn param(&self, i: usize) -> i32 {
        self.args.get(i).map(|a| a.value()).unwrap_or(ARG_DEFAULT)
    }

    pub fn is_subparam(&self, i: usize) -> bool {
        self.args.get(i).map(|a| a.is_sub()).unwrap_or(false)
    }

    pub fn string(&self) -> String {
        self.string.as_str_lossy()
    }

    pub fn string_chars(&self) -> &[char] {
        self.string.chars()
    }

    /// Decode an SGR colour extension (38/48/58) starting at
    /// parameter index `i`, which must hold the introducer value
    /// (`38`, `48` or `58`). Accepts both the classic semicolon form
    /// (`38;2;r;g;b`, `38;5;n`) and the colon sub-parameter form,
    /// including both the 4- and 5-subparam RGB shapes
    /// (`38:2:r:g:b` and `38:2::r:g:b`, the latter with an ignored
    /// colour-space id).
    pub fn sgr_color(&self, i: usize) -> Option<(SgrColor, usize)> {
        let selector = self.param(i + 1);
        match selector {
            5 => {
                let n = self.param(i + 2);
                if n < 0 {
                    return None;
                }
                Some((SgrColor::Indexed(n as u16), 3))
            }
            2 => {
                if self.is_subparam(i) {
                    // Colon sub-parameter form. Count the run of
                    // sub-parameters following the colour-space
                    // selector (mirroring `collect_sgr_color`'s
                    // `seq.next(idx) - idx`) to tell the 4- and
                    // 5-subparam shapes apart.
                    let mut n = 1;
                    let mut j = i + 1;
                    while self.is_subparam(j) {
                        n += 1;
                        j += 1;
                    }
                    if n < 4 {
                        return None;
                    }
                    let mut idx = i + 1;
                    if n > 4 {
                        // A colour-space-id sub-parameter is present;
                        // it must be default, otherwise the whole
                        // sequence is rejected rather than
                        // reinterpreted as a 4-subparam shape.
                        idx += 1;
                        if self.param(idx) >= 0 {
                            return None;
                        }
                    }
                    let r = self.param(idx + 1);
                    let g = self.param(idx + 2);
                    let b = self.param(idx + 3);
                    if r < 0 || g < 0 || b < 0 {
                        return None;
                    }
                    Some((SgrColor::Rgb(r as u16, g as u16, b as u16), idx + 4 - i))
                } else {
                    let r = self.param(i + 2);
                    let g = self.param(i + 3);
                    let b = self.param(i + 4);
                    if r < 0 || g < 0 || b < 0 {
                        return None;
                    }
                    Some((SgrColor::Rgb(r as u16, g as u16, b as u16), 5))
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn intermediates_round_trip() {
        let mut i = Intermediates::default();
        assert!(i.push(b'$'));
        assert!(i.push(b'"'));
        assert_eq!(i.bytes(), vec![b'$', b'"']);
    }

    #[test]
    fn param_intro_packs_low_bits() {
        let mut i = Intermediates::default();
        assert!(i.set_param_intro(b'?'));
        assert_eq!(i.param_intro(), Some(ParamIntro::Question));
        assert!(i.push(b' '));
        assert_eq!(i.bytes(), vec![b' ']);
    }
}
