// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Adjusting the selected entry for the built-in terminfo

use tracing::debug;

use crate::{
    capability::{self, Capability},
    fragment::Fragment,
};

/// Number of colors always advertised
pub const COLORS: i32 = 256;

/// Bits per color channel for direct colors
pub const RGB_BITS: i32 = 8;

/// Replace the capabilities that identify the target terminal
///
/// `Co`, `RGB`, `TN`, `name` and `query-os-name` are set regardless of
/// their previous values, any `RGB` from the source is dropped.
///
/// # Arguments
///
/// * `fragment`    - resolved entry to patch
/// * `target_name` - name of the built-in terminal
/// * `os_name`     - kernel name of the host system
pub fn patch(
    fragment: &mut Fragment,
    target_name: &str,
    os_name: &str,
) -> Result<(), capability::Error> {
    if let Some(rgb) = fragment.remove_capability("RGB") {
        debug!(entry = fragment.name(), %rgb, "Dropped source RGB");
    }

    let capabilities = [
        Capability::integer("Co", COLORS),
        Capability::string("TN", target_name)?,
        Capability::string("name", target_name)?,
        Capability::integer("RGB", RGB_BITS),
        Capability::string("query-os-name", os_name)?,
    ];
    for capability in capabilities {
        debug!(entry = fragment.name(), %capability, "Patching");
        fragment.set_capability(capability);
    }

    Ok(())
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
    fn empty_entry() {
        let mut fragment = Fragment::new("foot", "foot terminal emulator");
        patch(&mut fragment, "myterm", "Linux").unwrap();
        assert_eq!(
            values(&fragment),
            collection!(
                "Co" => Value::Integer(256),
                "RGB" => Value::Integer(8),
                "TN" => Value::String("myterm".to_owned()),
                "name" => Value::String("myterm".to_owned()),
                "query-os-name" => Value::String("Linux".to_owned()),
            )
        );
    }

    #[test]
    fn overrides_source_values() {
        let mut fragment = Fragment::new("foot", "foot terminal emulator");
        fragment.add_capability(Capability::boolean("RGB")).unwrap();
        fragment.add_capability(Capability::integer("Co", 8)).unwrap();
        fragment
            .add_capability(Capability::string("TN", "foot").unwrap())
            .unwrap();
        fragment.add_capability(Capability::boolean("am")).unwrap();
        patch(&mut fragment, "myterm", "FreeBSD").unwrap();
        assert_eq!(
            values(&fragment),
            collection!(
                "Co" => Value::Integer(256),
                "RGB" => Value::Integer(8),
                "TN" => Value::String("myterm".to_owned()),
                "am" => Value::Boolean,
                "name" => Value::String("myterm".to_owned()),
                "query-os-name" => Value::String("FreeBSD".to_owned()),
            )
        );
    }

    #[test]
    fn patching_twice() {
        let mut fragment = Fragment::new("foot", "foot terminal emulator");
        patch(&mut fragment, "one", "Linux").unwrap();
        patch(&mut fragment, "two", "Linux").unwrap();
        assert_eq!(fragment.len(), 5);
        assert_eq!(
            fragment.capability("TN").unwrap().value(),
            &Value::String("two".to_owned())
        );
    }
}
