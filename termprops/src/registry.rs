//! The generic `Registry<P>`: install/lookup/parse operations shared
//! by the public termprop registry and (with the `systemd` feature)
//! the internal systemd context-attribute registry, parameterised by
//! a [`RegistryPolicy`] rather than subclassed.
use std::collections::HashMap;
use std::marker::PhantomData;

use log::{debug, warn};

use crate::error::RegistryError;
use crate::policy::RegistryPolicy;
use crate::value::{Flags, PropertyId, Type, Value};

/// Everything known about one installed property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    id: PropertyId,
    name: String,
    ty: Type,
    flags: Flags,
}

impl PropertyInfo {
    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Type {
        self.ty
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }
}

fn validate_name(name: &str, prefix_len: usize) -> bool {
    name.len() > prefix_len
        && name[prefix_len..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
}

/// A name → typed-property registry. One instance backs the public
/// OSC termprop mechanism (`termprops::termprops()`); with the
/// `systemd` feature, a second instance with a different
/// [`RegistryPolicy`] backs the systemd context-attribute stream
/// (`termprops::systemd_properties()`).
pub struct Registry<P: RegistryPolicy> {
    by_name: HashMap<String, PropertyId>,
    by_id: Vec<PropertyInfo>,
    parse_override: HashMap<PropertyId, crate::policy::ParseFn>,
    _policy: PhantomData<P>,
}

impl<P: RegistryPolicy> Default for Registry<P> {
    fn default() -> Self {
        let mut reg = Registry {
            by_name: HashMap::new(),
            by_id: Vec::new(),
            parse_override: HashMap::new(),
            _policy: PhantomData,
        };
        for wk in P::WELL_KNOWN {
            let id = reg.bootstrap(wk.name, wk.ty, wk.flags);
            if let Some(parser) = wk.parser {
                reg.parse_override.insert(id, parser);
            }
        }
        for alias in P::WELL_KNOWN_ALIASES {
            let target = reg
                .by_name
                .get(alias.target)
                .copied()
                .unwrap_or_else(|| panic!("well-known alias target \"{}\" not installed", alias.target));
            reg.by_name.insert(alias.name.to_string(), target);
        }
        reg
    }
}

impl<P: RegistryPolicy> Registry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    fn bootstrap(&mut self, name: &str, ty: Type, flags: Flags) -> PropertyId {
        let id = PropertyId(self.by_id.len() as u32);
        self.by_id.push(PropertyInfo {
            id,
            name: name.to_string(),
            ty,
            flags,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Register a new property. Rejects names that collide with a
    /// well-known name under a different shape, names missing the
    /// policy's extension prefix, blocklisted names, and names
    /// already installed under a different shape. Installing the
    /// same `(name, type, flags)` twice is a no-op that returns the
    /// existing id.
    pub fn install(&mut self, name: &str, ty: Type, flags: Flags) -> Result<PropertyId, RegistryError> {
        let well_known = P::WELL_KNOWN.iter().find(|wk| wk.name == name);

        if let Some(info) = self.lookup(name) {
            if info.ty != ty || info.flags != flags {
                if well_known.is_some() {
                    warn!("denying to install well-known property \"{}\" with incorrect type or flags", name);
                    return Err(RegistryError::WellKnownTypeMismatch { name: name.to_string() });
                }
                warn!("property \"{}\" already installed with different type or flags", name);
                return Err(RegistryError::AlreadyInstalledWithDifferentShape {
                    name: name.to_string(),
                });
            }
            return Ok(info.id);
        }

        if well_known.is_none() {
            if !name.starts_with(P::EXTENSION_PREFIX) {
                return Err(RegistryError::MissingExtensionPrefix { name: name.to_string() });
            }
            if !validate_name(name, P::EXTENSION_PREFIX.len()) {
                return Err(RegistryError::InvalidName { name: name.to_string() });
            }
        }

        if P::is_blocklisted(name) {
            warn!("denying to install blocklisted property \"{}\"", name);
            return Err(RegistryError::Blocklisted { name: name.to_string() });
        }

        Ok(self.bootstrap(name, ty, flags))
    }

    /// Register `name` as an alias resolving to the already-installed
    /// property `target`.
    pub fn install_alias(&mut self, name: &str, target: &str) -> Result<PropertyId, RegistryError> {
        if P::WELL_KNOWN.iter().any(|wk| wk.name == name) {
            warn!("denying to install well-known property \"{}\" as an alias", name);
            return Err(RegistryError::WellKnownAliasRejected { name: name.to_string() });
        }

        if P::is_blocklisted(name) || P::is_blocklisted_alias(name) {
            warn!("denying to install blocklisted property alias \"{}\"", name);
            return Err(RegistryError::Blocklisted { name: name.to_string() });
        }

        if self.lookup(name).is_some() {
            warn!("property \"{}\" already registered", name);
            return Err(RegistryError::AlreadyInstalledWithDifferentShape {
                name: name.to_string(),
            });
        }

        if let Some(wk_alias) = P::WELL_KNOWN_ALIASES.iter().find(|a| a.name == name) {
            if wk_alias.target != target {
                return Err(RegistryError::WellKnownAliasRejected { name: name.to_string() });
            }
        } else {
            if !name.starts_with(P::EXTENSION_PREFIX) {
                return Err(RegistryError::MissingExtensionPrefix { name: name.to_string() });
            }
            if !validate_name(name, P::EXTENSION_PREFIX.len()) {
                return Err(RegistryError::InvalidName { name: name.to_string() });
            }
        }

        let target_id = self
            .lookup(target)
            .map(|info| info.id)
            .ok_or_else(|| RegistryError::UnknownAliasTarget {
                name: name.to_string(),
                target: target.to_string(),
            })?;

        self.by_name.insert(name.to_string(), target_id);
        Ok(target_id)
    }

    pub fn lookup(&self, name: &str) -> Option<&PropertyInfo> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id.as_u32() as usize))
    }

    pub fn lookup_by_id(&self, id: PropertyId) -> Option<&PropertyInfo> {
        self.by_id.get(id.as_u32() as usize)
    }

    /// Parse `text` into the `Value` appropriate for `id`'s declared
    /// type, using a per-property parser override if one was
    /// installed (e.g. the progress hint/value range checks).
    pub fn parse(&self, id: PropertyId, text: &str) -> Option<Value> {
        let info = self.lookup_by_id(id)?;
        let parser = self.parse_override.get(&id).copied().unwrap_or_else(|| P::parse_fn(info.ty));
        let value = parser(text);
        if value.is_none() {
            debug!("failed to parse value for property \"{}\"", info.name);
        }
        value
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.by_id.iter()
    }
}
