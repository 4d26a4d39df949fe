// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminfo entries and the registry of entries parsed from one source

use std::collections::{BTreeMap, btree_map::Entry};

use crate::capability::Capability;

/// Errors reported when registering entries and capabilities
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The entry already has a capability with that name
    #[error("Duplicate capability {capability} in entry {fragment}")]
    DuplicateCapability { fragment: String, capability: String },
    /// An entry with that name is already registered
    #[error("Duplicate entry {0}")]
    DuplicateFragment(String),
}

/// One terminfo entry
#[derive(Clone, Debug)]
pub struct Fragment {
    name: String,
    aliases: Vec<String>,
    description: String,
    capabilities: BTreeMap<String, Capability>,
}

impl Fragment {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: vec![],
            description: description.into(),
            capabilities: BTreeMap::default(),
        }
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Primary name, used to refer to the entry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names between the primary name and the description
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Add a capability, its name must not be used yet
    pub fn add_capability(&mut self, capability: Capability) -> Result<(), Error> {
        match self.capabilities.entry(capability.name().to_owned()) {
            Entry::Occupied(entry) => Err(Error::DuplicateCapability {
                fragment: self.name.clone(),
                capability: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(capability);
                Ok(())
            }
        }
    }

    /// Add or replace a capability
    ///
    /// Returns the replaced capability.
    pub fn set_capability(&mut self, capability: Capability) -> Option<Capability> {
        self.capabilities
            .insert(capability.name().to_owned(), capability)
    }

    pub fn remove_capability(&mut self, name: &str) -> Option<Capability> {
        self.capabilities.remove(name)
    }

    pub fn capability(&self, name: &str) -> Option<&Capability> {
        self.capabilities.get(name)
    }

    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.values()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

/// Entries by primary name
#[derive(Clone, Debug, Default)]
pub struct Registry {
    fragments: BTreeMap<String, Fragment>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry, its primary name must not be used yet
    ///
    /// Returns the registered entry.
    pub fn insert(&mut self, fragment: Fragment) -> Result<&mut Fragment, Error> {
        match self.fragments.entry(fragment.name().to_owned()) {
            Entry::Occupied(entry) => Err(Error::DuplicateFragment(entry.key().clone())),
            Entry::Vacant(entry) => Ok(entry.insert(fragment)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Fragment> {
        self.fragments.get_mut(name)
    }

    /// Take an entry out of the registry
    pub fn take(&mut self, name: &str) -> Option<Fragment> {
        self.fragments.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
