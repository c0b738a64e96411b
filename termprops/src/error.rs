//! Typed equivalents of the `g_warning(...); return -1;` rejection
//! sites in the reference registry's `install`/`install_alias`.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("property \"{name}\" is already installed with a different type or flags")]
    AlreadyInstalledWithDifferentShape { name: String },

    #[error("denying to install well-known property \"{name}\" with incorrect type or flags")]
    WellKnownTypeMismatch { name: String },

    #[error("property name \"{name}\" does not start with the required extension prefix")]
    MissingExtensionPrefix { name: String },

    #[error("property name \"{name}\" is not a valid property name")]
    InvalidName { name: String },

    #[error("denying to install blocklisted property \"{name}\"")]
    Blocklisted { name: String },

    #[error("cannot install alias \"{name}\": target \"{target}\" is not a known property")]
    UnknownAliasTarget { name: String, target: String },

    #[error("denying to install well-known property \"{name}\" as an alias")]
    WellKnownAliasRejected { name: String },
}
