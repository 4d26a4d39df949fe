// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Generate a C header with a built-in terminfo entry

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use terminfo_embed::{Target, generate, host, serialize::DEFAULT_SYMBOL};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Generate a C header with a built-in terminfo entry")]
struct Args {
    /// Entry to translate from the terminfo source
    source_entry_name: String,

    /// Terminfo source file, `-` for standard input
    source: PathBuf,

    /// Terminal name for the generated entry
    target_entry_name: String,

    /// Header file to write, `-` for standard output
    target: PathBuf,

    /// Name of the generated constant
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// Kernel name for `query-os-name` instead of the host one
    #[arg(long)]
    os_name: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_source(path: &Path) -> Result<String> {
    if is_stdio(path) {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Cannot read terminfo source from standard input")?;
        Ok(source)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Cannot read terminfo source {}", path.display()))
    }
}

fn write_target(path: &Path, header: &str) -> Result<()> {
    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(header.as_bytes())
            .and_then(|()| stdout.flush())
            .context("Cannot write header to standard output")
    } else {
        fs::write(path, header).with_context(|| format!("Cannot write header {}", path.display()))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(args.log_level))
        .with_writer(io::stderr)
        .init();

    let source = read_source(&args.source)?;
    let os_name = args.os_name.unwrap_or_else(host::system_name);
    let target = Target {
        name: &args.target_entry_name,
        symbol: &args.symbol,
        os_name: &os_name,
    };

    // Nothing is written unless the whole header is generated
    let header = generate(&source, &args.source_entry_name, &target).with_context(|| {
        format!(
            "Cannot generate {} from entry {}",
            args.target_entry_name, args.source_entry_name
        )
    })?;
    write_target(&args.target, &header)?;

    info!(
        source = %args.source_entry_name,
        target = %args.target_entry_name,
        os_name = %os_name,
        "Generated built-in terminfo"
    );
    Ok(())
}
