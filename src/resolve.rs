// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Expanding `use` references between entries
//!
//! An entry with `use=other` gets all capabilities of `other` and loses the
//! `use` capability. The referenced entry is expanded first, so chains of
//! references are flattened completely.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    capability::{Capability, Value},
    fragment::{self, Fragment, Registry},
};

/// Name of the capability referencing another entry
pub const USE: &str = "use";

/// Errors reported when expanding `use` references
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The referenced entry does not exist
    #[error("Entry {fragment} uses unknown entry {name}")]
    UnknownFragment { fragment: String, name: String },
    /// `use` is not a string capability
    #[error("Entry {0} has a non-string use capability")]
    InvalidReference(String),
    /// Entries reference each other in a loop, the first name is repeated at the end
    #[error("Circular use references: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
    /// The used entry defines a capability the entry has already
    #[error(transparent)]
    Fragment(#[from] fragment::Error),
}

/// Name of the entry referenced by `use`, if any
fn reference(fragment: &Fragment) -> Result<Option<&str>, Error> {
    match fragment.capability(USE).map(Capability::value) {
        None => Ok(None),
        Some(Value::String(name)) => Ok(Some(name)),
        Some(_) => Err(Error::InvalidReference(fragment.name().to_owned())),
    }
}

/// Entries to expand for `name`, each one using the next one
///
/// The chain ends with an entry that is already expanded or has no reference.
fn reference_chain(
    registry: &Registry,
    name: &str,
    resolved: &BTreeSet<String>,
) -> Result<Vec<String>, Error> {
    let mut chain: Vec<String> = vec![];
    let mut current = name.to_owned();

    loop {
        if resolved.contains(&current) {
            chain.push(current);
            break;
        }

        if let Some(position) = chain.iter().position(|seen| *seen == current) {
            let mut cycle = chain.split_off(position);
            cycle.push(current);
            return Err(Error::Cycle(cycle));
        }

        let Some(fragment) = registry.get(&current) else {
            // Only names taken from `use` can be missing
            return Err(Error::UnknownFragment {
                fragment: chain.last().cloned().unwrap_or_default(),
                name: current,
            });
        };
        let next = reference(fragment)?.map(str::to_owned);
        chain.push(current);
        match next {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(chain)
}

/// Copy all capabilities of `used` into `fragment` and drop its `use`
fn expand(fragment: &mut Fragment, used: &Fragment) -> Result<(), Error> {
    debug!(
        entry = fragment.name(),
        used = used.name(),
        count = used.len(),
        "Expanding use reference"
    );
    fragment.remove_capability(USE);
    for capability in used.capabilities() {
        fragment.add_capability(capability.clone())?;
    }
    Ok(())
}

/// Expand `use` references in all entries of the registry
///
/// Every entry is expanded after the entry it uses, regardless of the order
/// of the entries. Circular references are reported as errors.
pub fn resolve(registry: &mut Registry) -> Result<(), Error> {
    let names: Vec<String> = registry.names().map(str::to_owned).collect();
    let mut resolved = BTreeSet::new();

    for name in names {
        let chain = reference_chain(registry, &name, &resolved)?;

        // Deepest reference first
        for pair in chain.windows(2).rev() {
            let (fragment_name, used_name) = (&pair[0], &pair[1]);
            let unknown = || Error::UnknownFragment {
                fragment: fragment_name.clone(),
                name: used_name.clone(),
            };
            let used = registry.get(used_name).cloned().ok_or_else(unknown)?;
            let fragment = registry.get_mut(fragment_name).ok_or_else(unknown)?;
            expand(fragment, &used)?;
        }

        resolved.extend(chain);
    }

    Ok(())
}
