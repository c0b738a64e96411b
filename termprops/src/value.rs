//! The typed value model shared by every [`crate::Registry`]: the
//! declared [`Type`] of a property, the [`Flags`] governing how it
//! may be set, and the decoded [`Value`] a payload parses into.
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A stable, numeric identifier for an installed property. Assigned
/// sequentially by a [`crate::Registry`] at `install` time and never
/// reused within that registry's lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyId(pub(crate) u32);

impl PropertyId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// The declared shape of a property's payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// Present/absent only; no payload.
    Valueless,
    String,
    Int,
    Uint,
    Rgb,
    Uri,
    Uuid,
    /// An opaque, format-version-prefixed binary body (e.g. an
    /// inline image).
    Image,
}

bitflags! {
    /// Per-property behavioural flags.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        const NONE = 0;
        /// Not settable through an OSC termprop payload (systemd-only,
        /// or purely host-assigned).
        const NO_OSC = 1 << 0;
        /// Cleared automatically once read/acted upon by the host.
        const EPHEMERAL = 1 << 1;
        /// Only meaningful on a systemd context "start" frame.
        const SYSTEMD_START = 1 << 2;
        /// Only meaningful on a systemd context "end" frame.
        const SYSTEMD_END = 1 << 3;
    }
}

/// A decoded property value. The active variant always matches the
/// [`Type`] the owning [`crate::PropertyInfo`] was installed with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Valueless,
    String(String),
    Int(i64),
    Uint(u64),
    Rgb(u8, u8, u8),
    Uri(String),
    Uuid(uuid::Uuid),
    Image(Vec<u8>),
}

impl Value {
    pub fn type_of(&self) -> Type {
        match self {
            Value::Valueless => Type::Valueless,
            Value::String(_) => Type::String,
            Value::Int(_) => Type::Int,
            Value::Uint(_) => Type::Uint,
            Value::Rgb(..) => Type::Rgb,
            Value::Uri(_) => Type::Uri,
            Value::Uuid(_) => Type::Uuid,
            Value::Image(_) => Type::Image,
        }
    }
}
