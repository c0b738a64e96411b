//! DECSIXEL image sub-parser, entered once the main parser dispatches
//! a DCS with [`crate::Command::Decsixel`] and driven byte-by-byte by
//! the caller for the remainder of the DCS passthrough data.
//!
//! Grounded in the reference parser's `sixel-parser.hh`. Known
//! deliberate differences from the DEC terminal's own SIXEL parser
//! (carried over from that reference):
//!
//! * Bytes with the high bit set are ignored rather than masked with
//!   `~0x80`, except C1 controls in [`Mode::EightBit`], which abort.
//! * UTF-8-encoded C1 controls are recognised in [`Mode::Utf8`]; a C1
//!   ST completes the sequence, any other C1 control aborts.
//! * All C0 controls except CAN, ESC and SUB are ignored outright,
//!   rather than being executed as if they preceded the DCS.
//! * `:` is reserved for a future sub-parameter separator; any
//!   parameter sequence containing one is ignored in its entirety.
//! * A parameter count beyond [`ARG_MAX`] drops the whole sequence,
//!   rather than executing the command with the parameters collected
//!   so far.
use crate::arg::SequenceArg;

const ARG_MAX: usize = 8;

/// The handful of commands a sixel data stream can carry, keyed by
/// the byte that introduces them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    None,
    /// `!` - repeat the following sixel a given number of times.
    Decgri,
    /// `"` - set raster attributes (aspect ratio, image size).
    Decgra,
    /// `#` - select or define a colour register.
    Decgci,
    /// `$` - graphics carriage return.
    Decgcr,
    /// `+` - graphics cursor home (reserved, no known terminal emits it).
    Decgch,
    /// `-` - graphics next line.
    Decgnl,
    /// A recognised-but-unassigned command byte; delegates should
    /// treat this as a no-op.
    Reserved,
}

impl Default for Command {
    fn default() -> Self {
        Command::None
    }
}

fn classify(raw: u8) -> Command {
    match raw {
        0x21 => Command::Decgri,
        0x22 => Command::Decgra,
        0x23 => Command::Decgci,
        0x24 => Command::Decgcr,
        0x2b => Command::Decgch,
        0x2d => Command::Decgnl,
        0x25..=0x2a | 0x2c | 0x2e | 0x2f | 0x3c..=0x3e => Command::Reserved,
        _ => Command::None,
    }
}

/// A single sixel command plus its accumulated parameters. Re-used
/// across calls to [`SixelParser::feed`]; valid only until the next
/// command is consumed.
#[derive(Debug, Clone)]
pub struct Sequence {
    command: Command,
    args: [SequenceArg; ARG_MAX],
    n_args: usize,
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence {
            command: Command::default(),
            args: [SequenceArg::default(); ARG_MAX],
            n_args: 0,
        }
    }
}

impl Sequence {
    pub fn command(&self) -> Command {
        self.command
    }

    pub fn size(&self) -> usize {
        self.n_args
    }

    pub fn param(&self, idx: usize) -> i32 {
        self.args.get(idx).map(|a| a.value_or(-1)).unwrap_or(-1)
    }

    /// The parameter at `idx`, defaulted and then clamped to
    /// `min..=max` (returning `min` if `min > max`).
    pub fn param_clamped(&self, idx: usize, default: i32, min: i32, max: i32) -> i32 {
        self.param_or(idx, default).max(min).min(max.max(min))
    }

    pub fn param_or(&self, idx: usize, default: i32) -> i32 {
        self.args.get(idx).map(|a| a.value_or(default)).unwrap_or(default)
    }

    fn clear(&mut self) {
        for a in &mut self.args {
            a.reset();
        }
        self.n_args = 0;
        self.command = Command::None;
    }
}

/// How 8-bit and C1 input is recognised while collecting sixel data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Utf8,
    EightBit,
    SevenBit,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Utf8
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Ground,
    Params,
    Ignore,
    Esc,
    Utf8C2,
}

/// Result of feeding one byte to the sixel parser.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// Keep feeding bytes.
    Continue,
    /// The DCS terminator (ST) was seen; the byte was consumed.
    Complete,
    /// The sequence was aborted (CAN/SUB, or flushed at end of
    /// input); the byte was consumed.
    Abort,
    /// Aborted; the caller should re-present this same byte to the
    /// enclosing parser.
    AbortRewindOne,
    /// Aborted on a two-byte sequence (ESC or a UTF-8 C1 lead byte
    /// followed by a non-continuation byte); the caller should
    /// re-present both bytes to the enclosing parser.
    AbortRewindTwo,
}

/// Receives the decoded commands and raw sixel values from
/// [`SixelParser::feed`]. Implementors typically paint into an image
/// buffer; unrecognised command bytes resolve to [`Command::Reserved`]
/// and are delivered through `nop` rather than dropped silently.
pub trait SixelDelegate {
    /// A single sixel data byte, already shifted down to `0..=0x3f`.
    fn sixel(&mut self, value: u8);
    /// The DCS was terminated; `term` is the raw terminator byte
    /// (`\\` or the C1 ST).
    fn sixel_st(&mut self, term: u8);
    fn decgri(&mut self, seq: &Sequence);
    fn decgra(&mut self, seq: &Sequence);
    fn decgci(&mut self, seq: &Sequence);
    fn decgcr(&mut self, seq: &Sequence);
    fn decgch(&mut self, seq: &Sequence);
    fn decgnl(&mut self, seq: &Sequence);
    /// Called for a recognised-but-reserved command byte, or when a
    /// sequence is dispatched with no command at all (start of
    /// stream). Default does nothing.
    fn nop(&mut self, _seq: &Sequence) {}
}

/// DECSIXEL sub-parser. Constructed once a DCS has been identified as
/// carrying sixel data and fed the raw DCS passthrough bytes one at a
/// time via [`feed`](SixelParser::feed).
#[derive(Debug, Clone)]
pub struct SixelParser {
    mode: Mode,
    state: State,
    seq: Sequence,
}

impl Default for SixelParser {
    fn default() -> Self {
        SixelParser::new(Mode::default())
    }
}

impl SixelParser {
    pub fn new(mode: Mode) -> Self {
        SixelParser {
            mode,
            state: State::Ground,
            seq: Sequence::default(),
        }
    }

    pub fn reset(&mut self) {
        self.state = State::Ground;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    pub fn sequence(&self) -> &Sequence {
        &self.seq
    }

    fn params_overflow(&mut self) {
        self.state = State::Ignore;
    }

    fn params_finish(&mut self) {
        if self.seq.n_args < ARG_MAX
            && (self.seq.n_args > 0 || self.seq.args[self.seq.n_args].started())
        {
            self.seq.n_args += 1;
        }
    }

    fn param_finish(&mut self) {
        if self.seq.n_args < ARG_MAX - 1 {
            self.seq.n_args += 1;
        } else {
            self.params_overflow();
        }
    }

    fn param_digit(&mut self, digit: u8) {
        if self.seq.n_args < ARG_MAX {
            self.seq.args[self.seq.n_args].push_digit(digit);
        } else {
            self.params_overflow();
        }
    }

    fn consume(&mut self, raw: u8) {
        self.seq.clear();
        self.seq.command = classify(raw);
        self.state = State::Params;
    }

    fn dispatch(&mut self, delegate: &mut dyn SixelDelegate) {
        self.params_finish();
        match self.seq.command {
            Command::Decgri => delegate.decgri(&self.seq),
            Command::Decgra => delegate.decgra(&self.seq),
            Command::Decgci => delegate.decgci(&self.seq),
            Command::Decgcr => delegate.decgcr(&self.seq),
            Command::Decgch => delegate.decgch(&self.seq),
            Command::Decgnl => delegate.decgnl(&self.seq),
            Command::None | Command::Reserved => delegate.nop(&self.seq),
        }
    }

    fn complete(&mut self, raw: u8, delegate: &mut dyn SixelDelegate) -> Status {
        self.state = State::Ground;
        delegate.sixel_st(raw);
        Status::Complete
    }

    fn abort(&mut self, status: Status) -> Status {
        self.state = State::Ground;
        status
    }

    /// Feed one raw byte to the parser. `delegate` receives any
    /// command dispatches or sixel data this byte triggers.
    pub fn feed(&mut self, raw: u8, delegate: &mut dyn SixelDelegate) -> Status {
        match self.state {
            State::Params => self.feed_params(raw, delegate),
            State::Ground => self.feed_ground(raw, delegate),
            State::Ignore => self.feed_ignore(raw, delegate),
            State::Esc => self.feed_esc(raw, delegate),
            State::Utf8C2 => self.feed_utf8_c2(raw, delegate),
        }
    }

    fn feed_params(&mut self, raw: u8, delegate: &mut dyn SixelDelegate) -> Status {
        match raw {
            0x00..=0x17 | 0x19 | 0x1c..=0x1f => Status::Continue,
            0x30..=0x39 => {
                self.param_digit(raw - 0x30);
                Status::Continue
            }
            0x3a => self.abort_into_ignore(),
            0x3b => {
                self.param_finish();
                Status::Continue
            }
            0x7f | 0xa0..=0xc1 | 0xc3..=0xff => Status::Continue,
            0xc2 if self.mode == Mode::EightBit => Status::Continue,
            0xc2 | 0x80..=0x9f if self.mode == Mode::SevenBit => Status::Continue,
            0x18 | 0x1b | 0x20..=0x2f | 0x3c..=0x7e | 0xc2 | 0x80..=0x9f => {
                self.dispatch(delegate);
                self.state = State::Ground;
                self.feed_ground(raw, delegate)
            }
            0x1a => {
                // SUB aborts the pending command without dispatching it,
                // then re-enters GROUND and is itself treated like '?'.
                self.state = State::Ground;
                self.feed_ground(0x1a, delegate)
            }
            _ => Status::Continue,
        }
    }

    fn abort_into_ignore(&mut self) -> Status {
        self.state = State::Ignore;
        Status::Continue
    }

    fn feed_ground(&mut self, raw: u8, delegate: &mut dyn SixelDelegate) -> Status {
        match raw {
            0x00..=0x17 | 0x19 | 0x1c..=0x1f => Status::Continue,
            0x18 => self.abort(Status::AbortRewindOne),
            0x1b => {
                self.state = State::Esc;
                Status::Continue
            }
            0x20 => Status::Continue,
            0x21..=0x2f | 0x3c..=0x3e => {
                self.consume(raw);
                Status::Continue
            }
            0x30..=0x3b => {
                self.state = State::Ignore;
                Status::Continue
            }
            0x1a => {
                delegate.sixel(0x3f - 0x3f);
                Status::Continue
            }
            0x3f..=0x7e => {
                delegate.sixel(raw - 0x3f);
                Status::Continue
            }
            0x7f => Status::Continue,
            0xc2 => {
                if self.mode == Mode::Utf8 {
                    self.state = State::Utf8C2;
                }
                Status::Continue
            }
            0x9c => {
                if self.mode == Mode::EightBit {
                    self.complete(raw, delegate)
                } else {
                    Status::Continue
                }
            }
            0x80..=0x9b | 0x9d..=0x9f => {
                if self.mode == Mode::EightBit {
                    self.abort(Status::AbortRewindOne)
                } else {
                    Status::Continue
                }
            }
            0xa0..=0xc1 | 0xc3..=0xff => Status::Continue,
        }
    }

    fn feed_ignore(&mut self, raw: u8, delegate: &mut dyn SixelDelegate) -> Status {
        match raw {
            0x30..=0x3b | 0x7f => Status::Continue,
            _ => {
                self.state = State::Ground;
                self.feed_ground(raw, delegate)
            }
        }
    }

    fn feed_esc(&mut self, raw: u8, delegate: &mut dyn SixelDelegate) -> Status {
        match raw {
            0x5c => self.complete(raw, delegate),
            0x7f => Status::Continue,
            _ => self.abort(Status::AbortRewindTwo),
        }
    }

    fn feed_utf8_c2(&mut self, raw: u8, delegate: &mut dyn SixelDelegate) -> Status {
        match raw {
            0x1b => {
                self.state = State::Esc;
                Status::Continue
            }
            0x80..=0x9b | 0x9d..=0x9f => self.abort(Status::AbortRewindTwo),
            0x9c => self.complete(raw, delegate),
            0xc2 => Status::Continue,
            _ => {
                self.state = State::Ground;
                self.feed_ground(raw, delegate)
            }
        }
    }

    /// Called once the enclosing parser's DCS passthrough ends
    /// without having seen an ST (e.g. the input stream itself
    /// ended). Dispatches any pending command and forces a clean
    /// return to [`State::Ground`].
    pub fn flush(&mut self, delegate: &mut dyn SixelDelegate) -> Status {
        match self.state {
            State::Params => {
                self.dispatch(delegate);
                self.abort(Status::Abort)
            }
            State::Ground | State::Ignore => self.abort(Status::Abort),
            State::Esc | State::Utf8C2 => self.abort(Status::AbortRewindOne),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        pixels: Vec<u8>,
        commands: Vec<(Command, Vec<i32>)>,
        completed: bool,
    }

    impl Recorder {
        fn record(&mut self, seq: &Sequence) {
            let args = (0..seq.size()).map(|i| seq.param(i)).collect();
            self.commands.push((seq.command(), args));
        }
    }

    impl SixelDelegate for Recorder {
        fn sixel(&mut self, value: u8) {
            self.pixels.push(value);
        }
        fn sixel_st(&mut self, _term: u8) {
            self.completed = true;
        }
        fn decgri(&mut self, seq: &Sequence) {
            self.record(seq);
        }
        fn decgra(&mut self, seq: &Sequence) {
            self.record(seq);
        }
        fn decgci(&mut self, seq: &Sequence) {
            self.record(seq);
        }
        fn decgcr(&mut self, seq: &Sequence) {
            self.record(seq);
        }
        fn decgch(&mut self, seq: &Sequence) {
            self.record(seq);
        }
        fn decgnl(&mut self, seq: &Sequence) {
            self.record(seq);
        }
    }

    fn feed_all(p: &mut SixelParser, d: &mut Recorder, bytes: &[u8]) -> Status {
        let mut last = Status::Continue;
        for &b in bytes {
            last = p.feed(b, d);
        }
        last
    }

    #[test]
    fn plain_sixel_data_decodes_to_six_bit_values() {
        let mut p = SixelParser::default();
        let mut d = Recorder::default();
        feed_all(&mut p, &mut d, b"?@A");
        assert_eq!(d.pixels, vec![0, 1, 2]);
    }

    #[test]
    fn raster_attributes_carries_four_params() {
        let mut p = SixelParser::default();
        let mut d = Recorder::default();
        // DECGRA "1;1;10;20 then a sixel byte to force dispatch
        feed_all(&mut p, &mut d, b"\"1;1;10;20?");
        assert_eq!(d.commands, vec![(Command::Decgra, vec![1, 1, 10, 20])]);
        assert_eq!(d.pixels, vec![0]);
    }

    #[test]
    fn colon_in_params_aborts_to_ignore() {
        let mut p = SixelParser::default();
        let mut d = Recorder::default();
        feed_all(&mut p, &mut d, b"!1:2?");
        // The whole "!1:2" command is dropped; only the trailing '?' sixel survives.
        assert!(d.commands.is_empty());
        assert_eq!(d.pixels, vec![0]);
    }

    #[test]
    fn st_backslash_completes() {
        let mut p = SixelParser::default();
        let mut d = Recorder::default();
        let status = feed_all(&mut p, &mut d, b"-\x1b\\");
        assert_eq!(status, Status::Complete);
        assert!(d.completed);
        assert_eq!(d.commands, vec![(Command::Decgnl, vec![])]);
    }

    #[test]
    fn can_aborts_and_rewinds_one() {
        let mut p = SixelParser::default();
        let mut d = Recorder::default();
        let status = p.feed(0x18, &mut d);
        assert_eq!(status, Status::AbortRewindOne);
    }

    #[test]
    fn esc_then_non_backslash_rewinds_two() {
        let mut p = SixelParser::default();
        let mut d = Recorder::default();
        p.feed(0x1b, &mut d);
        let status = p.feed(b'[', &mut d);
        assert_eq!(status, Status::AbortRewindTwo);
    }

    #[test]
    fn flush_dispatches_pending_command() {
        let mut p = SixelParser::default();
        let mut d = Recorder::default();
        feed_all(&mut p, &mut d, b"#5");
        let status = p.flush(&mut d);
        assert_eq!(status, Status::Abort);
        assert_eq!(d.commands, vec![(Command::Decgci, vec![5])]);
    }

    proptest::proptest! {
        /// P10: CAN always requests a one-byte rewind, and a
        /// non-backslash byte following ESC always requests a
        /// two-byte rewind, no matter what was fed beforehand.
        #[test]
        fn can_always_rewinds_one(prefix in proptest::collection::vec(0x3fu8..0x7e, 0..16)) {
            let mut p = SixelParser::default();
            let mut d = Recorder::default();
            feed_all(&mut p, &mut d, &prefix);
            let status = p.feed(0x18, &mut d);
            proptest::prop_assert_eq!(status, Status::AbortRewindOne);
        }

        #[test]
        fn esc_non_backslash_always_rewinds_two(
            prefix in proptest::collection::vec(0x3fu8..0x7e, 0..16),
            follow in proptest::sample::select(&[b'[', b'a', b'0', b'?'][..]),
        ) {
            let mut p = SixelParser::default();
            let mut d = Recorder::default();
            feed_all(&mut p, &mut d, &prefix);
            p.feed(0x1b, &mut d);
            let status = p.feed(follow, &mut d);
            proptest::prop_assert_eq!(status, Status::AbortRewindTwo);
        }
    }
}
