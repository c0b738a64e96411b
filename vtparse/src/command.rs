//! Stable command identifiers.
//!
//! Each variant names a control function the parser can resolve a
//! completed sequence to. The list is not the full ECMA-48/DEC VT
//! catalogue; it covers the commands exercised by CSI/DCS/ESC/SCI
//! dispatch and the sequences named in the test scenarios. Anything
//! the dispatch tables don't recognise resolves to `Command::None`
//! rather than failing to parse.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Command {
    None,
    /// A bare graphic character (`Sequence::kind() == Kind::Graphic`).
    Graphic,

    // C0 controls
    Nul,
    Bel,
    Bs,
    Cr,
    Enq,
    Ff,
    Ht,
    Lf,
    Si,
    So,
    Sub,
    Vt,
    Can,
    Dc1,
    Dc3,
    Epa,
    Spa,

    // nF / Fp / Fe (ESC) sequences
    Ind,
    Nel,
    Hts,
    Ri,
    Ss2,
    Ss3,
    DecSc,
    DecRc,
    Decaln,
    Decanm,
    Decbi,
    Decfi,
    Decll,
    Decpam,
    Decpnm,
    Decdhl,
    Decdwl,
    Decswl,
    Ris,
    Ls1R,
    Ls2,
    Ls2R,
    Ls3,
    Ls3R,
    GnDm,
    GnDMm,

    // CSI
    Ich,
    Cuu,
    Cud,
    Cuf,
    Cub,
    Cnl,
    Cpl,
    Cha,
    Cup,
    Cht,
    Ed,
    El,
    Il,
    Dl,
    Dch,
    Su,
    Sd,
    Ech,
    Cbt,
    Hpa,
    Hpr,
    Hvp,
    Vpa,
    Vpr,
    Tbc,
    SmEcma,
    RmEcma,
    Sgr,
    DsrEcma,
    Decstbm,
    Decslrm,
    SmDec,
    RmDec,
    DsrDec,
    Decsca,
    Decstr,
    Decrqm,
    Decrqss,
    Decscusr,
    Da1,
    Da2,
    Da3,
    Decssl,
    Decera,
    Decfra,
    Decsera,
    Deccra,
    Decrqcra,
    Decic,
    Decdc,
    Decscl,
    Rep,
    XtermWm,
    XtermSgfx,
    XtermRrv,

    // DCS
    DecrqssDcs,
    Decsixel,
    Decdld,
    Decudk,
    Tmux,

    // OSC
    Osc,

    // SCI
    Sci,
}

impl Default for Command {
    fn default() -> Self {
        Command::None
    }
}
