// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rendering an entry as a C string constant
//!
//! The constant holds NUL separated pairs of capability name and value,
//! sorted by name. Boolean capabilities have an empty value.

use std::borrow::Cow;

use crate::{
    capability::{Capability, LITERAL_SPLIT, Value},
    fragment::Fragment,
};

/// Default name of the generated constant
pub const DEFAULT_SYMBOL: &str = "terminfo_capabilities";

/// Escape double quotes for a C string literal
fn escape_quotes(text: &str) -> Cow<'_, str> {
    if text.contains('"') {
        Cow::Owned(text.replace('"', "\\\""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Value field of a capability
///
/// String values are translated to C escapes when the capability is created.
fn value_field(capability: &Capability) -> Cow<'_, str> {
    match capability.value() {
        Value::Boolean => Cow::Borrowed(""),
        Value::Integer(value) => Cow::Owned(value.to_string()),
        Value::String(value) => Cow::Borrowed(value),
    }
}

/// Join name and value fields of all capabilities, sorted by name
///
/// The fields are separated by a NUL escape that also splits the literal.
pub fn serialize(fragment: &Fragment) -> String {
    let mut capabilities: Vec<&Capability> = fragment.capabilities().collect();
    capabilities.sort_unstable();

    let separator = format!("\\0{LITERAL_SPLIT}");
    capabilities
        .into_iter()
        .flat_map(|capability| [escape_quotes(capability.name()), value_field(capability)])
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Render the generated header declaring the constant
///
/// # Arguments
///
/// * `capabilities` - fields produced by [`serialize`]
/// * `symbol`       - name of the constant
pub fn render_header(capabilities: &str, symbol: &str) -> String {
    format!("#pragma once\n\nstatic const char {symbol}[] = \"{capabilities}\";\n")
}
