//! A typed, named-property registry for terminal session metadata.
//!
//! Backs two consumers built on top of [`vtparse`]'s OSC output:
//! the public termprop mechanism (host applications report structured
//! metadata — current directory, container identity, shell
//! pre/post-exec markers, progress — through an OSC payload of the
//! form `name=value`) and, with the `systemd` feature, an internal
//! registry for the structured attributes carried in a systemd
//! "context" escape.
//!
//! Both are [`Registry`] instances parameterised by a
//! [`RegistryPolicy`] rather than two subclasses of a common base:
//! they share identical install/lookup/parse machinery and differ
//! only in their well-known name tables and in which parser a
//! [`Type`] resolves to by default.
//!
//! ```
//! use termprops::{termprops, Flags, Type};
//!
//! let registry = termprops();
//! let info = registry.lookup("vte.current-directory-uri").unwrap();
//! assert_eq!(info.ty(), Type::Uri);
//! assert_eq!(info.flags(), Flags::NO_OSC);
//! ```
mod error;
mod parse;
mod policy;
mod registry;
mod value;

pub use error::RegistryError;
pub use policy::{ParseFn, RegistryPolicy, TermpropPolicy, WellKnownAlias, WellKnownProperty};
pub use registry::{PropertyInfo, Registry};
pub use value::{Flags, PropertyId, Type, Value};

#[cfg(feature = "systemd")]
pub use policy::SystemdPolicy;

lazy_static::lazy_static! {
    static ref TERMPROPS: Registry<TermpropPolicy> = Registry::new();
}

/// The shared, process-wide registry of public OSC termprops.
/// Installed once on first use, matching the reference
/// implementation's function-local `static auto s_termprops_registry`.
pub fn termprops() -> &'static Registry<TermpropPolicy> {
    &TERMPROPS
}

#[cfg(feature = "systemd")]
lazy_static::lazy_static! {
    static ref SYSTEMD_PROPERTIES: Registry<SystemdPolicy> = Registry::new();
}

/// The shared, process-wide registry of systemd context attributes.
#[cfg(feature = "systemd")]
pub fn systemd_properties() -> &'static Registry<SystemdPolicy> {
    &SYSTEMD_PROPERTIES
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn well_known_termprops_are_preinstalled() {
        let r = termprops();
        let info = r.lookup("vte.progress.value").expect("well-known property");
        assert_eq!(info.ty(), Type::Uint);
    }

    #[test]
    fn install_rejects_missing_prefix() {
        let mut r = Registry::<TermpropPolicy>::new();
        let err = r.install("not-prefixed", Type::String, Flags::NONE).unwrap_err();
        assert_eq!(
            err,
            RegistryError::MissingExtensionPrefix {
                name: "not-prefixed".to_string()
            }
        );
    }

    #[test]
    fn install_accepts_extension_names() {
        let mut r = Registry::<TermpropPolicy>::new();
        let id = r
            .install("vte.ext.my-plugin.state", Type::String, Flags::NONE)
            .expect("install should succeed");
        assert_eq!(r.lookup_by_id(id).unwrap().name(), "vte.ext.my-plugin.state");
    }

    #[test]
    fn install_is_idempotent_for_same_shape() {
        let mut r = Registry::<TermpropPolicy>::new();
        let a = r.install("vte.ext.x", Type::Int, Flags::NONE).unwrap();
        let b = r.install("vte.ext.x", Type::Int, Flags::NONE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn install_rejects_reshaping_existing_property() {
        let mut r = Registry::<TermpropPolicy>::new();
        r.install("vte.ext.x", Type::Int, Flags::NONE).unwrap();
        let err = r.install("vte.ext.x", Type::String, Flags::NONE).unwrap_err();
        assert_eq!(
            err,
            RegistryError::AlreadyInstalledWithDifferentShape {
                name: "vte.ext.x".to_string()
            }
        );
    }

    #[test]
    fn install_rejects_wellknown_type_mismatch() {
        let mut r = Registry::<TermpropPolicy>::new();
        let err = r
            .install("vte.icon.color", Type::String, Flags::NONE)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::WellKnownTypeMismatch {
                name: "vte.icon.color".to_string()
            }
        );
    }

    #[test]
    fn alias_resolves_to_target_value_shape() {
        let mut r = Registry::<TermpropPolicy>::new();
        r.install("vte.ext.original", Type::Uint, Flags::NONE).unwrap();
        let id = r.install_alias("vte.ext.alias", "vte.ext.original").unwrap();
        assert_eq!(r.lookup("vte.ext.alias").unwrap().id(), id);
        assert_eq!(r.lookup("vte.ext.original").unwrap().id(), id);
    }

    #[test]
    fn alias_rejects_unknown_target() {
        let mut r = Registry::<TermpropPolicy>::new();
        let err = r.install_alias("vte.ext.alias", "vte.ext.nope").unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownAliasTarget {
                name: "vte.ext.alias".to_string(),
                target: "vte.ext.nope".to_string()
            }
        );
    }

    #[test]
    fn alias_rejects_wellknown_name() {
        let mut r = Registry::<TermpropPolicy>::new();
        let err = r.install_alias("vte.icon.color", "vte.ext.original").unwrap_err();
        assert_eq!(
            err,
            RegistryError::WellKnownAliasRejected {
                name: "vte.icon.color".to_string()
            }
        );
    }

    #[test]
    fn parse_progress_hint_enforces_range() {
        let r = termprops();
        let info = r.lookup("vte.progress.hint").unwrap();
        assert_eq!(r.parse(info.id(), "2"), Some(Value::Int(2)));
        assert_eq!(r.parse(info.id(), "9"), None);
    }

    #[test]
    fn parse_rgb_hex_forms() {
        let r = termprops();
        let info = r.lookup("vte.icon.color").unwrap();
        assert_eq!(r.parse(info.id(), "#ff8000"), Some(Value::Rgb(0xff, 0x80, 0x00)));
        assert_eq!(r.parse(info.id(), "rgb:ff/80/00"), Some(Value::Rgb(0xff, 0x80, 0x00)));
    }

    #[test]
    fn parse_current_directory_uri_promotes_bare_path() {
        let r = termprops();
        let info = r.lookup("vte.current-directory-uri").unwrap();
        let value = r.parse(info.id(), "/home/user/project").unwrap();
        match value {
            Value::Uri(s) => assert!(s.starts_with("file://")),
            other => panic!("expected Uri, got {:?}", other),
        }
    }
}
