// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Host system information

use std::env;

/// Kernel name derived from the compile target
fn fallback_system_name() -> String {
    match env::consts::OS {
        "macos" => "Darwin".to_owned(),
        "linux" => "Linux".to_owned(),
        "freebsd" => "FreeBSD".to_owned(),
        "netbsd" => "NetBSD".to_owned(),
        "openbsd" => "OpenBSD".to_owned(),
        other => other.to_owned(),
    }
}

/// Kernel name of the running system, as reported by `uname -s`
#[cfg(unix)]
pub fn system_name() -> String {
    match nix::sys::utsname::uname() {
        Ok(uts) => uts.sysname().to_string_lossy().into_owned(),
        Err(err) => {
            tracing::warn!(%err, "uname failed, using the compile target name");
            fallback_system_name()
        }
    }
}

/// Kernel name of the running system
#[cfg(not(unix))]
pub fn system_name() -> String {
    fallback_system_name()
}
