//! Command handler functions for the jacoco2cobertura CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::dump;
use crate::parsers::jacoco;
use crate::task::{self, ConvertConfig};

pub fn cmd_convert(config: &ConvertConfig) -> Result<String> {
    let written = task::run(config).with_context(|| {
        format!(
            "Failed to convert {} to Cobertura",
            config.input.display()
        )
    })?;

    let mut out = String::new();
    for path in &written {
        writeln!(out, "Cobertura report generated at {}", path.display())?;
    }
    Ok(out)
}

pub fn cmd_dump(file: &Path) -> Result<String> {
    let report = jacoco::load(file)
        .with_context(|| format!("Failed to load JaCoCo report {}", file.display()))?;
    Ok(dump::render(&report))
}
