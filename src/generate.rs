// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Generating the built-in terminfo header from terminfo source

use tracing::debug;

use crate::{capability, parse, patch, resolve, serialize};

/// Errors reported when generating the header
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] parse::Error),
    #[error(transparent)]
    Resolve(#[from] resolve::Error),
    /// The target name cannot be used as a string capability
    #[error(transparent)]
    Patch(#[from] capability::Error),
    /// The source has no entry with the requested name
    #[error("Entry {0} not found")]
    UnknownEntry(String),
}

/// Description of the generated terminal
#[derive(Clone, Debug)]
pub struct Target<'a> {
    /// Name of the built-in terminal
    pub name: &'a str,
    /// Name of the generated constant
    pub symbol: &'a str,
    /// Kernel name of the host system
    pub os_name: &'a str,
}

impl<'a> Target<'a> {
    /// Target using the default constant name
    pub const fn new(name: &'a str, os_name: &'a str) -> Self {
        Self {
            name,
            symbol: serialize::DEFAULT_SYMBOL,
            os_name,
        }
    }
}

/// Generate the header for one entry of the terminfo source
///
/// # Arguments
///
/// * `source`       - terminfo source text
/// * `source_entry` - primary name of the entry to translate
/// * `target`       - terminal the header is generated for
///
/// Returns the complete header text.
pub fn generate(source: &str, source_entry: &str, target: &Target<'_>) -> Result<String, Error> {
    let mut registry = parse::parse(source)?;
    debug!(entries = registry.len(), "Parsed terminfo source");
    resolve::resolve(&mut registry)?;

    let Some(mut entry) = registry.take(source_entry) else {
        return Err(Error::UnknownEntry(source_entry.to_owned()));
    };
    patch::patch(&mut entry, target.name, target.os_name)?;
    debug!(
        entry = entry.name(),
        capabilities = entry.len(),
        "Serializing entry"
    );

    let capabilities = serialize::serialize(&entry);
    Ok(serialize::render_header(&capabilities, target.symbol))
}

#[cfg(test)]
mod test {
    use super::*;

    const SOURCE: &str = "xterm|X terminal emulator,\n\tbool1,\n\tnum1#15,\n\tstr1=hi\\,there,\n";

    #[test]
    fn single_entry() {
        let header = generate(SOURCE, "xterm", &Target::new("myterm", "Linux")).unwrap();
        let fields = [
            "Co",
            "256",
            "RGB",
            "8",
            "TN",
            "myterm",
            "bool1",
            "",
            "name",
            "myterm",
            "num1",
            "15",
            "query-os-name",
            "Linux",
            "str1",
            "hi,there",
        ];
        let expected = format!(
            "#pragma once\n\nstatic const char terminfo_capabilities[] = \"{}\";\n",
            fields.join("\\0\" \"")
        );
        assert_eq!(header, expected);
    }

    #[test]
    fn custom_symbol() {
        let target = Target {
            symbol: "builtin_terminfo",
            ..Target::new("myterm", "Linux")
        };
        let header = generate(SOURCE, "xterm", &target).unwrap();
        assert!(header.contains("static const char builtin_terminfo[] = \"Co\\0"));
    }

    #[test]
    fn deterministic() {
        let target = Target::new("myterm", "Linux");
        assert_eq!(
            generate(SOURCE, "xterm", &target),
            generate(SOURCE, "xterm", &target)
        );
    }

    #[test]
    fn unknown_entry() {
        assert_eq!(
            generate(SOURCE, "foot", &Target::new("myterm", "Linux")),
            Err(Error::UnknownEntry("foot".to_owned()))
        );
    }

    #[test]
    fn resolve_error_in_other_entry() {
        let source = format!("{SOURCE}other|Other,use=missing,\n");
        assert!(matches!(
            generate(&source, "xterm", &Target::new("myterm", "Linux")),
            Err(Error::Resolve(resolve::Error::UnknownFragment { .. }))
        ));
    }

    #[test]
    fn target_name_with_trailing_backslash() {
        let header = generate("x|X,am,", "x", &Target::new("my\\", "Linux")).unwrap();
        let fields = [
            "Co",
            "256",
            "RGB",
            "8",
            "TN",
            "my\\\\",
            "am",
            "",
            "name",
            "my\\\\",
            "query-os-name",
            "Linux",
        ];
        let expected = format!(
            "#pragma once\n\nstatic const char terminfo_capabilities[] = \"{}\";\n",
            fields.join("\\0\" \"")
        );
        assert_eq!(header, expected);
    }

    #[test]
    fn unsupported_target_name() {
        assert!(matches!(
            generate(SOURCE, "xterm", &Target::new("my\\lterm", "Linux")),
            Err(Error::Patch(capability::Error::UnsupportedEscape { .. }))
        ));
    }
}
