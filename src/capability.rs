// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminal capabilities and translation of terminfo string escapes

use std::{cmp::Ordering, fmt, fmt::Write, iter::Peekable, str::Chars};

/// Closes the C string literal and opens a new one
///
/// Keeps a digit that follows a numeric escape from being read as part of it.
pub const LITERAL_SPLIT: &str = "\" \"";

const ESC: &str = "\\033";
const DEL: &str = "\\x7f";

/// Errors reported when creating a capability
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Numeric value is neither decimal nor `0x` prefixed hexadecimal
    #[error("Invalid numeric value {value:?} for capability {name}")]
    InvalidNumber { name: String, value: String },
    /// String escape that has no C string literal equivalent
    #[error("Unsupported escape sequence \\{escape} in capability {name}")]
    UnsupportedEscape { name: String, escape: char },
}

/// Value of a capability, tagged by its kind
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Present boolean capability, absence means false
    Boolean,
    Integer(i32),
    /// String already translated to C string literal escapes
    String(String),
}

/// Named capability of a terminal entry
///
/// Capabilities are compared and ordered by name only.
#[derive(Clone, Debug)]
pub struct Capability {
    name: String,
    value: Value,
}

impl Capability {
    /// Create a boolean capability
    pub fn boolean(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Value::Boolean,
        }
    }

    /// Create a numeric capability
    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value: Value::Integer(value),
        }
    }

    /// Create a numeric capability from its terminfo source literal
    ///
    /// The literal is hexadecimal if prefixed with `0x`, decimal otherwise.
    pub fn parse_integer(name: impl Into<String>, literal: &str) -> Result<Self, Error> {
        let name = name.into();
        let parsed = match literal
            .strip_prefix("0x")
            .or_else(|| literal.strip_prefix("0X"))
        {
            Some(digits) => i32::from_str_radix(digits, 16),
            None => literal.parse(),
        };
        match parsed {
            Ok(value) => Ok(Self::integer(name, value)),
            Err(_) => Err(Error::InvalidNumber {
                name,
                value: literal.to_owned(),
            }),
        }
    }

    /// Create a string capability from its terminfo source value
    ///
    /// Terminfo escapes are translated to C string literal escapes right away.
    pub fn string(name: impl Into<String>, source: &str) -> Result<Self, Error> {
        let name = name.into();
        match translate_escapes(source) {
            Ok(value) => Ok(Self {
                name,
                value: Value::String(value),
            }),
            Err(escape) => Err(Error::UnsupportedEscape { name, escape }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn value(&self) -> &Value {
        &self.value
    }

    pub const fn is_boolean(&self) -> bool {
        matches!(self.value, Value::Boolean)
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Capability {}

impl PartialOrd for Capability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Capability {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

// Terminfo source notation
impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Boolean => write!(f, "{}", self.name),
            Value::Integer(value) => write!(f, "{}#{value}", self.name),
            Value::String(value) => write!(f, "{}={value}", self.name),
        }
    }
}

/// Split the literal if the next character would extend a numeric escape
fn guard_escape(output: &mut String, chars: &mut Peekable<Chars<'_>>, extends: fn(char) -> bool) {
    if chars.peek().is_some_and(|&c| extends(c)) {
        output.push_str(LITERAL_SPLIT);
    }
}

/// Translate terminfo string escapes to C string literal escapes
///
/// See terminfo(5) for the escapes. `\\`, `\n`, `\r`, `\t`, `\b`, `\f` and
/// octal escapes mean the same in C and are copied unchanged.
///
/// Returns the unsupported escape character on failure.
fn translate_escapes(source: &str) -> Result<String, char> {
    let mut output = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('E' | 'e') => {
                    output.push_str(ESC);
                    guard_escape(&mut output, &mut chars, |c| matches!(c, '0'..='7'));
                }
                Some(c @ (',' | ':' | '^')) => output.push(c),
                Some('s') => output.push(' '),
                Some('l') => return Err('l'),
                Some(c) => {
                    output.push('\\');
                    output.push(c);
                }
                // Trailing backslash, keep it from escaping what follows
                None => output.push_str("\\\\"),
            },
            '^' => match chars.peek().copied() {
                Some('?') => {
                    chars.next();
                    output.push_str(DEL);
                    guard_escape(&mut output, &mut chars, |c| c.is_ascii_hexdigit());
                }
                Some(ctrl @ '@'..='_') => {
                    chars.next();
                    let code = u32::from(ctrl) - u32::from('@');
                    // Writing to a String cannot fail
                    let _ = write!(output, "\\x{code:02x}");
                    guard_escape(&mut output, &mut chars, |c| c.is_ascii_hexdigit());
                }
                _ => output.push('^'),
            },
            '"' => output.push_str("\\\""),
            c => output.push(c),
        }
    }

    Ok(output)
}
