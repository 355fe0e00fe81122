//! One Cobertura document per package.

use std::path::{Path, PathBuf};

use crate::model::cobertura::Coverage;

/// A single-package document and the package's dotted name.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageReport {
    /// e.g. `com.example.util`.
    pub package_name: String,
    pub coverage: Coverage,
}

/// Split `coverage` into one document per package. Each document keeps the
/// timestamp and sources, and takes its document-level rates from its only
/// package.
pub fn split_by_package(coverage: &Coverage) -> Vec<PackageReport> {
    coverage
        .packages
        .iter()
        .map(|package| PackageReport {
            package_name: dotted_name(&package.name),
            coverage: Coverage {
                timestamp: coverage.timestamp,
                sources: coverage.sources.clone(),
                packages: vec![package.clone()],
                // package rates, not zeros: the document describes only this package
                rates: package.rates,
            },
        })
        .collect()
}

/// `com/example/util` → `com.example.util`.
pub fn dotted_name(package_name: &str) -> String {
    package_name.replace('/', ".")
}

/// Output path of the document for `package_name`: the last `.xml` of
/// `output` becomes `-<package_name>.xml`. Without any `.xml` the suffix is
/// appended.
pub fn package_output_path(output: &Path, package_name: &str) -> PathBuf {
    let output = output.to_string_lossy();
    let path = match output.rfind(".xml") {
        Some(idx) => format!(
            "{}-{}.xml{}",
            &output[..idx],
            package_name,
            &output[idx + ".xml".len()..]
        ),
        None => format!("{}-{}.xml", output, package_name),
    };
    PathBuf::from(path)
}
