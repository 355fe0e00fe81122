// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use jacoco2cobertura::model::jacoco::Report;

pub const SAMPLE: &[u8] = include_bytes!("../fixtures/sample_jacoco.xml");

pub fn sample_report() -> Report {
    jacoco2cobertura::parsers::jacoco::parse(SAMPLE).unwrap()
}

/// Write `content` into `dir` under `name`, returning the full path.
pub fn write_input(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
