//! The seam the reference implementation expresses as two derived
//! classes (`TermpropsRegistry`, `SystemdPropertyRegistry`) each
//! overriding virtual hooks on a common `Registry` base. Rust favours
//! composition over that virtual-dispatch style for a path that is
//! only exercised at setup time, so here it is a trait implemented by
//! two zero-sized marker types and threaded through
//! [`crate::Registry`] as a generic parameter.
use crate::parse;
use crate::value::{Flags, Type, Value};

pub type ParseFn = fn(&str) -> Option<Value>;

/// A single well-known property: its installed name, declared shape,
/// and an optional parser overriding the `Type`'s default (used by
/// e.g. the progress hint/value pair, which are range-constrained).
pub struct WellKnownProperty {
    pub name: &'static str,
    pub ty: Type,
    pub flags: Flags,
    pub parser: Option<ParseFn>,
}

/// A well-known alias name resolving to an existing target name.
pub struct WellKnownAlias {
    pub name: &'static str,
    pub target: &'static str,
}

/// The policy-specific behaviour a [`crate::Registry`] is
/// parameterised over: which names are pre-installed and under what
/// shape, which names are forbidden outright, the reserved prefix
/// gating caller-installable names, and which parser a `Type`
/// resolves to by default.
pub trait RegistryPolicy {
    /// The reserved prefix a caller-installed (non-well-known) name
    /// must start with.
    const EXTENSION_PREFIX: &'static str;

    /// Names installed automatically when the registry is created.
    const WELL_KNOWN: &'static [WellKnownProperty];

    /// Alias names installed automatically when the registry is
    /// created (resolved against [`Self::WELL_KNOWN`]).
    const WELL_KNOWN_ALIASES: &'static [WellKnownAlias] = &[];

    /// Names that may never be installed, well-known or otherwise.
    fn is_blocklisted(name: &str) -> bool;

    /// Alias names that may never be installed.
    fn is_blocklisted_alias(name: &str) -> bool {
        Self::is_blocklisted(name)
    }

    /// The parser a `Type` resolves to absent a per-property
    /// override. Policies may substitute stricter parsers for
    /// specific types (the systemd registry is stricter about
    /// escaping than the OSC termprop path).
    fn parse_fn(ty: Type) -> ParseFn {
        match ty {
            Type::Valueless => parse::parse_valueless,
            Type::String => parse::parse_string,
            Type::Int => parse::parse_int,
            Type::Uint => parse::parse_uint,
            Type::Rgb => parse::parse_rgb,
            Type::Uri => parse::parse_uri,
            Type::Uuid => parse::parse_uuid,
            Type::Image => parse::parse_image,
        }
    }
}

/// Well-known names every public OSC termprop registry installs.
/// Caller-installed names must carry the `vte.ext.` prefix.
pub struct TermpropPolicy;

impl RegistryPolicy for TermpropPolicy {
    const EXTENSION_PREFIX: &'static str = "vte.ext.";

    const WELL_KNOWN: &'static [WellKnownProperty] = &[
        WellKnownProperty {
            name: "vte.current-directory-uri",
            ty: Type::Uri,
            flags: Flags::NO_OSC,
            parser: None,
        },
        WellKnownProperty {
            name: "vte.current-file-uri",
            ty: Type::Uri,
            flags: Flags::NO_OSC,
            parser: None,
        },
        WellKnownProperty {
            name: "xterm.title",
            ty: Type::String,
            flags: Flags::NO_OSC,
            parser: None,
        },
        WellKnownProperty {
            name: "vte.container.name",
            ty: Type::String,
            flags: Flags::NONE,
            parser: None,
        },
        WellKnownProperty {
            name: "vte.container.runtime",
            ty: Type::String,
            flags: Flags::NONE,
            parser: None,
        },
        WellKnownProperty {
            name: "vte.container.uid",
            ty: Type::Uint,
            flags: Flags::NONE,
            parser: None,
        },
        WellKnownProperty {
            name: "vte.shell.precmd",
            ty: Type::Valueless,
            flags: Flags::NONE,
            parser: None,
        },
        WellKnownProperty {
            name: "vte.shell.preexec",
            ty: Type::Valueless,
            flags: Flags::NONE,
            parser: None,
        },
        WellKnownProperty {
            name: "vte.shell.postexec",
            ty: Type::Uint,
            flags: Flags::EPHEMERAL,
            parser: None,
        },
        WellKnownProperty {
            name: "vte.progress.hint",
            ty: Type::Int,
            flags: Flags::NONE,
            parser: Some(progress_hint_parser),
        },
        WellKnownProperty {
            name: "vte.progress.value",
            ty: Type::Uint,
            flags: Flags::NONE,
            parser: Some(progress_value_parser),
        },
        WellKnownProperty {
            name: "vte.icon.color",
            ty: Type::Rgb,
            flags: Flags::NONE,
            parser: None,
        },
        WellKnownProperty {
            name: "vte.icon.image",
            ty: Type::Image,
            flags: Flags::NONE,
            parser: None,
        },
    ];

    fn is_blocklisted(name: &str) -> bool {
        // No termprop names are currently blocklisted; the hook
        // exists so a name can be retired without an API break.
        let _ = name;
        false
    }
}

fn progress_hint_parser(text: &str) -> Option<Value> {
    parse::parse_int_range(text, 0, 4)
}

fn progress_value_parser(text: &str) -> Option<Value> {
    parse::parse_uint_range(text, 0, 100)
}

/// Policy for the internal systemd context-attribute registry. Has
/// no caller-installable extension surface (the prefix is nominal —
/// nothing currently calls `install` against this registry outside
/// its own bootstrap) and is stricter about `STRING`/`UUID` escaping
/// than the OSC path.
#[cfg(feature = "systemd")]
pub struct SystemdPolicy;

#[cfg(feature = "systemd")]
impl RegistryPolicy for SystemdPolicy {
    const EXTENSION_PREFIX: &'static str = "systemd.ext.";

    const WELL_KNOWN: &'static [WellKnownProperty] = &[
        WellKnownProperty {
            name: "systemd.context.id",
            ty: Type::Uuid,
            flags: Flags::NO_OSC,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.boot-id",
            ty: Type::Uuid,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.comm",
            ty: Type::String,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.command-line",
            ty: Type::String,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.container",
            ty: Type::String,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.context.type",
            ty: Type::Int,
            flags: Flags::SYSTEMD_START,
            parser: Some(parse::parse_systemd_context_type),
        },
        WellKnownProperty {
            name: "systemd.current-directory",
            ty: Type::Uri,
            flags: Flags::SYSTEMD_START,
            parser: Some(parse::parse_systemd_cwd),
        },
        WellKnownProperty {
            name: "systemd.context.exit-condition",
            ty: Type::Int,
            flags: Flags::SYSTEMD_END,
            parser: Some(parse::parse_systemd_exit_condition),
        },
        WellKnownProperty {
            name: "systemd.exit-signal",
            ty: Type::String,
            flags: Flags::SYSTEMD_END,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.exit-status",
            ty: Type::Uint,
            flags: Flags::SYSTEMD_END,
            parser: Some(systemd_exit_status_parser),
        },
        WellKnownProperty {
            name: "systemd.hostname",
            ty: Type::String,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.machine-id",
            ty: Type::Uuid,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.pid",
            ty: Type::Uint,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.pidfd-inode",
            ty: Type::Uint,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.target-host",
            ty: Type::String,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.target-user",
            ty: Type::String,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.user",
            ty: Type::String,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
        WellKnownProperty {
            name: "systemd.vm",
            ty: Type::String,
            flags: Flags::SYSTEMD_START,
            parser: None,
        },
    ];

    fn is_blocklisted(name: &str) -> bool {
        let _ = name;
        false
    }

    fn parse_fn(ty: Type) -> ParseFn {
        match ty {
            Type::String => parse::parse_systemd_string,
            Type::Uuid => parse::parse_systemd_uuid,
            other => <TermpropPolicy as RegistryPolicy>::parse_fn(other),
        }
    }
}

/// `systemd.exit-status`: a process exit code, `0..=255`. Grounded on
/// `systemdpropsregistry.cc`'s inline range-check closure for
/// `EXIT_STATUS`.
#[cfg(feature = "systemd")]
fn systemd_exit_status_parser(text: &str) -> Option<Value> {
    parse::parse_uint_range(text, 0, 255)
}
