// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing terminfo source files

use tracing::{debug, trace};

use crate::{
    capability::{self, Capability},
    fragment::{self, Fragment, Registry},
    lex::{self, Lexer, Token, strip_comments},
};

/// Errors reported when parsing terminfo source
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The source could not be split into definitions
    #[error(transparent)]
    Lex(#[from] lex::Error),
    /// A capability value is invalid
    #[error(transparent)]
    Capability(#[from] capability::Error),
    /// Duplicate entry or capability
    #[error(transparent)]
    Fragment(#[from] fragment::Error),
    /// A capability is defined before the first entry header
    #[error("Capability {0} outside of any entry")]
    NoCurrentFragment(String),
}

/// Parse terminfo source into a registry of entries
///
/// Capabilities are attached to the entry whose header precedes them.
/// `use` references are kept as string capabilities, see
/// [`resolve`](crate::resolve::resolve).
pub fn parse(source: &str) -> Result<Registry, Error> {
    let text = strip_comments(source);
    let mut registry = Registry::new();
    let mut current: Option<String> = None;

    for token in Lexer::new(&text) {
        let capability = match token? {
            Token::Header {
                name,
                aliases,
                description,
            } => {
                let aliases = aliases.into_iter().map(str::to_owned).collect();
                registry.insert(Fragment::new(name, description).with_aliases(aliases))?;
                debug!(entry = name, description, "Registered entry");
                current = Some(name.to_owned());
                continue;
            }
            Token::Boolean(name) => Capability::boolean(name),
            Token::Integer { name, value } => Capability::parse_integer(name, value)?,
            Token::String { name, value } => Capability::string(name, value)?,
        };

        let Some(fragment) = current.as_deref().and_then(|name| registry.get_mut(name)) else {
            return Err(Error::NoCurrentFragment(capability.name().to_owned()));
        };
        trace!(entry = fragment.name(), %capability, "Parsed capability");
        fragment.add_capability(capability)?;
    }

    Ok(registry)
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use collection_literals::collection;

    use super::*;
    use crate::capability::Value;

    fn values(fragment: &Fragment) -> BTreeMap<&str, Value> {
        fragment
            .capabilities()
            .map(|cap| (cap.name(), cap.value().clone()))
            .collect()
    }

    #[test]
    fn single_entry() {
        let source = "xterm|X terminal emulator,\n\tbool1,\n\tnum1#15,\n\tstr1=hi\\,there,\n";
        let registry = parse(source).unwrap();
        let xterm = registry.get("xterm").unwrap();
        assert_eq!(xterm.description(), "X terminal emulator");
        assert!(xterm.aliases().is_empty());
        assert_eq!(
            values(xterm),
            collection!(
                "bool1" => Value::Boolean,
                "num1" => Value::Integer(15),
                "str1" => Value::String("hi,there".to_owned()),
            )
        );
    }

    #[test]
    fn several_entries() {
        let source = "\
# Base fragment
foot+base|foot base fragment,
\tam, bce,
\tcolors#0x100,
# Main entry
foot|foot-extra|foot terminal emulator,
\tuse=foot+base,
\tbel=^G,
";
        let registry = parse(source).unwrap();
        assert_eq!(registry.len(), 2);

        let base = registry.get("foot+base").unwrap();
        assert_eq!(
            values(base),
            collection!(
                "am" => Value::Boolean,
                "bce" => Value::Boolean,
                "colors" => Value::Integer(256),
            )
        );

        let foot = registry.get("foot").unwrap();
        assert_eq!(foot.aliases(), ["foot-extra"]);
        assert_eq!(foot.description(), "foot terminal emulator");
        assert_eq!(
            values(foot),
            collection!(
                "bel" => Value::String("\\x07".to_owned()),
                "use" => Value::String("foot+base".to_owned()),
            )
        );
    }

    #[test]
    fn control_backslash_before_comma() {
        let registry = parse("xterm|X,kquit=^\\,am,").unwrap();
        let xterm = registry.get("xterm").unwrap();
        assert_eq!(
            values(xterm),
            collection!(
                "am" => Value::Boolean,
                "kquit" => Value::String("\\x1c".to_owned()),
            )
        );
    }

    #[test]
    fn capability_before_header() {
        assert_eq!(
            parse("am,\nxterm|X,\n").unwrap_err(),
            Error::NoCurrentFragment("am".to_owned())
        );
    }

    #[test]
    fn duplicate_capability() {
        assert_eq!(
            parse("xterm|X,am,cols#80,am,").unwrap_err(),
            Error::Fragment(fragment::Error::DuplicateCapability {
                fragment: "xterm".to_owned(),
                capability: "am".to_owned(),
            })
        );
    }

    #[test]
    fn duplicate_entry() {
        assert_eq!(
            parse("xterm|X,am,xterm|Y,").unwrap_err(),
            Error::Fragment(fragment::Error::DuplicateFragment("xterm".to_owned()))
        );
    }

    #[test]
    fn malformed() {
        assert_eq!(
            parse("xterm|X,kcbt@,").unwrap_err(),
            Error::Lex(lex::Error::MalformedToken("kcbt@".to_owned()))
        );
    }

    #[test]
    fn invalid_number() {
        assert!(matches!(
            parse("xterm|X,cols#ff,").unwrap_err(),
            Error::Capability(capability::Error::InvalidNumber { .. })
        ));
    }

    #[test]
    fn unsupported_escape() {
        assert!(matches!(
            parse("xterm|X,lf0=\\l,").unwrap_err(),
            Error::Capability(capability::Error::UnsupportedEscape { .. })
        ));
    }

    #[test]
    fn empty_source() {
        assert!(parse("# nothing here\n").unwrap().is_empty());
    }
}
