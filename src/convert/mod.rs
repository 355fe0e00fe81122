//! Mapping of a JaCoCo report tree onto a Cobertura document tree.

pub mod branches;
pub mod lines;

use std::collections::BTreeMap;

use crate::error::{ConvertError, Result};
use crate::model::cobertura::{self, Coverage, Rates};
use crate::model::jacoco::{Class, Method, Package, Report};

/// Source root used when the caller supplies none.
pub const DEFAULT_SOURCE: &str = ".";

/// Build the Cobertura document for `report`. `sources` become the
/// document's `<source>` roots verbatim.
pub fn convert(report: &Report, sources: &[String]) -> Result<Coverage> {
    let sources = if sources.is_empty() {
        vec![DEFAULT_SOURCE.to_string()]
    } else {
        sources.to_vec()
    };

    Ok(Coverage {
        timestamp: timestamp(report)?,
        sources,
        packages: report.packages.iter().map(map_package).collect(),
        rates: Rates::of(report),
    })
}

/// Start of the first session in seconds, or 0 without sessions.
pub fn timestamp(report: &Report) -> Result<i64> {
    let Some(start) = report.sessions.first().and_then(|s| s.start.as_deref()) else {
        return Ok(0);
    };
    let millis: i64 = start.trim().parse().map_err(|_| {
        ConvertError::Transform(format!("session start '{}' is not a millisecond timestamp", start))
    })?;
    Ok(millis / 1000)
}

pub fn map_package(package: &Package) -> cobertura::Package {
    cobertura::Package {
        name: package.name.clone().unwrap_or_default(),
        classes: package
            .classes
            .iter()
            .map(|class| map_class(class, package))
            .collect(),
        rates: Rates::of(package),
    }
}

pub fn map_class(class: &Class, package: &Package) -> cobertura::Class {
    let methods: Vec<_> = class
        .methods
        .iter()
        .map(|method| map_method(method, class.source_file_name.as_deref(), package))
        .collect();

    cobertura::Class {
        name: class.name.clone().unwrap_or_default(),
        filename: format!(
            "{}/{}",
            package.name.as_deref().unwrap_or_default(),
            class.source_file_name.as_deref().unwrap_or_default()
        ),
        lines: class_lines(&methods),
        methods,
        rates: Rates::of(class),
    }
}

pub fn map_method(method: &Method, source_file: Option<&str>, package: &Package) -> cobertura::Method {
    cobertura::Method {
        name: method.name.clone().unwrap_or_default(),
        signature: method.desc.clone().unwrap_or_default(),
        lines: lines::lines_for_method(method, package, source_file)
            .into_iter()
            .map(branches::map_line)
            .collect(),
        rates: Rates::of(method),
    }
}

/// Union of the method lines, by number. Where method ranges overlap the
/// first method's copy is kept.
fn class_lines(methods: &[cobertura::Method]) -> Vec<cobertura::Line> {
    let mut by_number = BTreeMap::new();
    for line in methods.iter().flat_map(|m| m.lines.iter()) {
        by_number.entry(line.number).or_insert_with(|| line.clone());
    }
    by_number.into_values().collect()
}
