use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::convert::convert;
use crate::error::{ConvertError, Result};
use crate::model::cobertura::Coverage;
use crate::parsers::jacoco;
use crate::split::{package_output_path, split_by_package};
use crate::writer;

/// Everything one conversion needs.
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// JaCoCo XML report to read.
    pub input: PathBuf,
    /// Cobertura XML report to write. In split mode this is the template
    /// for the per-package file names.
    pub output: PathBuf,
    /// Written as `<source>` roots as given; not checked for existence.
    pub source_dirs: Vec<String>,
    pub split_by_package: bool,
}

/// Load the JaCoCo report, convert it and write one or more Cobertura
/// reports. Returns the written paths in order.
pub fn run(config: &ConvertConfig) -> Result<Vec<PathBuf>> {
    info!("Converting JaCoCo report to Cobertura");

    check_paths(config)?;

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        split_by_package = config.split_by_package,
        "Calculated configuration"
    );
    for source_dir in &config.source_dirs {
        info!(source_dir = %source_dir, "Source directory");
    }

    let report = jacoco::load(&config.input).map_err(|e| ConvertError::Load {
        path: config.input.clone(),
        source: Box::new(e),
    })?;
    debug!(
        packages = report.packages.len(),
        sessions = report.sessions.len(),
        "Loaded JaCoCo report"
    );

    let coverage = convert(&report, &config.source_dirs)?;
    for package in &coverage.packages {
        debug!(
            package = %package.name,
            classes = package.classes.len(),
            line_rate = package.rates.line_rate,
            "Mapped package"
        );
    }

    if !config.split_by_package {
        store(&config.output, &coverage)?;
        info!(path = %config.output.display(), "Cobertura report generated");
        return Ok(vec![config.output.clone()]);
    }

    let docs: Vec<_> = split_by_package(&coverage)
        .into_iter()
        .map(|doc| (package_output_path(&config.output, &doc.package_name), doc))
        .collect();
    let mut seen = HashSet::new();
    for (path, doc) in &docs {
        if !seen.insert(path) {
            return Err(ConvertError::Transform(format!(
                "package {} would overwrite {}",
                doc.package_name,
                path.display()
            )));
        }
    }

    let mut written = Vec::new();
    for (path, doc) in docs {
        store(&path, &doc.coverage)?;
        info!(
            package = %doc.package_name,
            path = %path.display(),
            "Cobertura report for package generated"
        );
        written.push(path);
    }
    Ok(written)
}

/// Fail before any conversion work if the input is missing or the output
/// directory cannot be created.
fn check_paths(config: &ConvertConfig) -> Result<()> {
    if !config.input.exists() {
        return Err(ConvertError::InputNotFound(config.input.clone()));
    }

    if let Some(dir) = config.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|source| ConvertError::OutputDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

fn store(path: &Path, coverage: &Coverage) -> Result<()> {
    writer::store(path, coverage).map_err(|e| ConvertError::Store {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<report name="r">
        <sessioninfo id="s" start="1700000000000" dump="1700000001000"/>
        <package name="com/a"><counter type="LINE" missed="0" covered="1"/></package>
        <package name="com/b"/>
    </report>"#;

    fn config(dir: &Path, split_by_package: bool) -> ConvertConfig {
        let input = dir.join("jacoco.xml");
        std::fs::write(&input, REPORT).unwrap();
        ConvertConfig {
            input,
            output: dir.join("out/cobertura.xml"),
            source_dirs: vec![],
            split_by_package,
        }
    }

    #[test]
    fn test_run_single_document() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), false);

        let written = run(&cfg).unwrap();
        assert_eq!(written, vec![cfg.output.clone()]);

        let xml = std::fs::read_to_string(&cfg.output).unwrap();
        assert!(xml.contains(r#"timestamp="1700000000""#));
        assert!(xml.contains(r#"<package name="com/a""#));
        assert!(xml.contains(r#"<package name="com/b""#));
    }

    #[test]
    fn test_run_split_by_package() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), true);

        let written = run(&cfg).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("out/cobertura-com.a.xml"),
                dir.path().join("out/cobertura-com.b.xml"),
            ]
        );
        assert!(!cfg.output.exists());

        let a = std::fs::read_to_string(&written[0]).unwrap();
        assert!(a.contains(r#"<package name="com/a""#));
        assert!(!a.contains(r#"<package name="com/b""#));
        assert!(a.contains(r#"timestamp="1700000000""#));
    }

    #[test]
    fn test_missing_input_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConvertConfig {
            input: dir.path().join("missing.xml"),
            output: dir.path().join("out/cobertura.xml"),
            ..Default::default()
        };
        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, ConvertError::InputNotFound(_)));
        assert!(err.to_string().contains("missing.xml"));
        // nothing created before the check failed
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_uncreatable_output_dir_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), false);
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        cfg.output = blocker.join("reports/cobertura.xml");

        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, ConvertError::OutputDir { .. }), "{err}");
    }

    #[test]
    fn test_unparseable_input_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), false);
        std::fs::write(&cfg.input, "<coverage/>").unwrap();
        cfg.output = dir.path().join("cobertura.xml");

        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, ConvertError::Load { .. }), "{err}");
        assert!(err.to_string().contains("jacoco.xml"), "{err}");
        assert!(!cfg.output.exists());
    }

    #[test]
    fn test_unwritable_output_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), false);
        // a directory where the output file should go
        cfg.output = dir.path().join("taken");
        std::fs::create_dir(&cfg.output).unwrap();

        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, ConvertError::Store { .. }), "{err}");
    }

    #[test]
    fn test_split_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), true);
        // distinct packages, same dotted name
        std::fs::write(
            &cfg.input,
            r#"<report name="r"><package name="com/a"/><package name="com.a"/></report>"#,
        )
        .unwrap();
        cfg.output = dir.path().join("cov.xml");

        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, ConvertError::Transform(_)), "{err}");
        assert!(err.to_string().contains("cov-com.a.xml"), "{err}");
        assert!(!dir.path().join("cov-com.a.xml").exists());
    }

    #[test]
    fn test_split_groups_sharing_a_package() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), true);
        std::fs::write(
            &cfg.input,
            r#"<report name="r">
                <group name="a"><package name="com/acme"><class name="com/acme/A"/></package></group>
                <group name="b"><package name="com/acme"><class name="com/acme/B"/></package></group>
            </report>"#,
        )
        .unwrap();
        cfg.output = dir.path().join("cov.xml");

        let written = run(&cfg).unwrap();
        assert_eq!(written, vec![dir.path().join("cov-com.acme.xml")]);
        let xml = std::fs::read_to_string(&written[0]).unwrap();
        assert!(xml.contains(r#"<class name="com/acme/A""#), "{xml}");
        assert!(xml.contains(r#"<class name="com/acme/B""#), "{xml}");
    }
}
