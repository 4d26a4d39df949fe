// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compile a terminfo source entry into an escaped C string constant

pub mod capability;
pub mod fragment;
pub mod generate;
pub mod host;
pub mod lex;
pub mod parse;
pub mod patch;
pub mod resolve;
pub mod serialize;

pub use capability::{Capability, Value};
pub use fragment::{Fragment, Registry};
pub use generate::{Target, generate};
pub use parse::parse;
