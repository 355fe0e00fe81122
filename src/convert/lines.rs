//! Attribution of source-file lines to methods.
//!
//! JaCoCo records hits per source-file line and only a start line per
//! method. A method owns the lines from its own start line up to (not
//! including) the next method start line declared in the same source file.

use std::collections::HashMap;

use crate::model::jacoco::{Line, Method, Package};

/// Lines of `package` belonging to `method`, a method of a class compiled
/// from `source_file`. Lines keep their source-file order.
pub fn lines_for_method<'a>(
    method: &Method,
    package: &'a Package,
    source_file: Option<&str>,
) -> Vec<&'a Line> {
    let Some(source_file) = source_file else {
        return Vec::new();
    };

    let start = method.line.unwrap_or(0);
    let next = next_method_line(package, source_file, start);

    package
        .source_files
        .iter()
        .filter(|f| f.name.as_deref() == Some(source_file))
        .flat_map(|f| f.lines.iter())
        .filter(|l| l.nr != 0 && l.nr >= start)
        .filter(|l| next.map_or(true, |next| l.nr < next))
        .collect()
}

/// First method start line after `start` in `source_file`, if any.
fn next_method_line(package: &Package, source_file: &str, start: u32) -> Option<u32> {
    method_starts(package, source_file)
        .into_values()
        .filter(|&line| line > start)
        .min()
}

/// Start line by method name across every class compiled from
/// `source_file`. Overloads share a name, so the last one declared
/// overwrites the others.
pub fn method_starts<'a>(package: &'a Package, source_file: &str) -> HashMap<&'a str, u32> {
    let mut starts = HashMap::new();
    let methods = package
        .classes
        .iter()
        .filter(|c| c.source_file_name.as_deref() == Some(source_file))
        .flat_map(|c| c.methods.iter());
    for method in methods {
        if let (Some(name), Some(line)) = (method.name.as_deref(), method.line) {
            starts.insert(name, line);
        }
    }
    starts
}
