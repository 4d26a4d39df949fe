// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Splitting terminfo source text into tokens
//!
//! Definitions in terminfo source are terminated by commas, line breaks carry
//! no meaning. Every token is one of:
//!
//! * entry header `name|alias|description,`
//! * boolean capability `name,`
//! * numeric capability `name#value,`
//! * string capability `name=value,`

/// Errors reported when splitting the source into tokens
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The token is neither an entry header nor a capability
    #[error("Malformed definition {0:?}")]
    MalformedToken(String),
    /// The source ends without the final comma
    #[error("Definition without final comma {0:?}")]
    UnterminatedToken(String),
}

/// Definition found in terminfo source
#[derive(Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Header {
        name: &'a str,
        aliases: Vec<&'a str>,
        description: &'a str,
    },
    Boolean(&'a str),
    Integer {
        name: &'a str,
        value: &'a str,
    },
    String {
        name: &'a str,
        value: &'a str,
    },
}

/// Drop comment lines, join the rest without separators
///
/// Comment lines start with `#` after optional whitespace. Every line is
/// trimmed, so indentation is not carried into the tokens.
pub fn strip_comments(source: &str) -> String {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .collect()
}

/// Characters allowed in entry names
const fn is_entry_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '@')
}

/// Characters allowed in capability names
const fn is_capability_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_capability_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_capability_name_char)
}

/// Iterator over the tokens of comment-free terminfo source
///
/// Stops after the first error.
pub struct Lexer<'a> {
    remainder: &'a str,
}

impl<'a> Lexer<'a> {
    pub const fn new(source: &'a str) -> Self {
        Self { remainder: source }
    }

    /// Split off the text up to the next comma that is not escaped
    ///
    /// The character after `\` or `^` is taken literally, so `^\,` ends the
    /// definition.
    fn next_definition(&mut self) -> Result<Option<&'a str>, Error> {
        let text = self.remainder.trim_start();
        if text.is_empty() {
            self.remainder = text;
            return Ok(None);
        }

        let mut escaped = false;
        for (index, c) in text.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' | '^' => escaped = true,
                ',' => {
                    self.remainder = &text[index + 1..];
                    return Ok(Some(&text[..index]));
                }
                _ => {}
            }
        }

        self.remainder = "";
        Err(Error::UnterminatedToken(text.to_owned()))
    }
}

/// Classify the text of one definition, without the final comma
fn classify(text: &str) -> Option<Token<'_>> {
    let header = text
        .split_once('|')
        .filter(|(name, _)| !name.is_empty() && name.chars().all(is_entry_name_char));
    if let Some((name, rest)) = header {
        let mut fields: Vec<&str> = rest.split('|').collect();
        // `split` yields at least one field
        let description = fields.pop().unwrap_or_default();
        if description.is_empty() {
            return None;
        }
        return Some(Token::Header {
            name,
            aliases: fields,
            description,
        });
    }

    let Some(split) = text.find(|c| !is_capability_name_char(c)) else {
        return is_capability_name(text).then_some(Token::Boolean(text));
    };
    let (name, rest) = text.split_at(split);
    if name.is_empty() {
        return None;
    }
    if let Some(value) = rest.strip_prefix('=') {
        Some(Token::String { name, value })
    } else if let Some(value) = rest.strip_prefix('#') {
        Some(Token::Integer { name, value })
    } else {
        None
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = match self.next_definition() {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => return Some(Err(err)),
        };
        match classify(text) {
            Some(token) => Some(Ok(token)),
            None => {
                self.remainder = "";
                Some(Err(Error::MalformedToken(text.to_owned())))
            }
        }
    }
}
