//! Plain-text outline of a loaded JaCoCo report, for eyeballing what the
//! converter sees. Not part of the conversion itself.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::model::jacoco::{Counter, Report, SessionInfo};

/// `Display` adapter rendering the whole report tree.
pub struct ReportDump<'a>(pub &'a Report);

/// Render `report` as an indented outline.
pub fn render(report: &Report) -> String {
    ReportDump(report).to_string()
}

/// Millisecond epoch string as a UTC date-time, or verbatim when it is not
/// a number.
fn session_time(millis: Option<&str>) -> String {
    let Some(raw) = millis else {
        return "-".to_string();
    };
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn write_counters(f: &mut fmt::Formatter<'_>, indent: usize, counters: &[Counter]) -> fmt::Result {
    for c in counters {
        writeln!(
            f,
            "{:indent$}counter: {} missed={} covered={}",
            "", c.kind, c.missed, c.covered
        )?;
    }
    Ok(())
}

fn write_session(f: &mut fmt::Formatter<'_>, session: &SessionInfo) -> fmt::Result {
    writeln!(
        f,
        "  {}  start={}  dump={}",
        session.id.as_deref().unwrap_or("-"),
        session_time(session.start.as_deref()),
        session_time(session.dump.as_deref()),
    )
}

impl fmt::Display for ReportDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "report: {}", report.name.as_deref().unwrap_or(""))?;
        writeln!(f, "sessions:")?;
        for session in &report.sessions {
            write_session(f, session)?;
        }

        for package in &report.packages {
            writeln!(f, "package: {}", package.name.as_deref().unwrap_or(""))?;
            for class in &package.classes {
                writeln!(
                    f,
                    "  class: {} ({})",
                    class.name.as_deref().unwrap_or(""),
                    class.source_file_name.as_deref().unwrap_or("-")
                )?;
                for method in &class.methods {
                    let line = method
                        .line
                        .map_or_else(|| "-".to_string(), |l| l.to_string());
                    writeln!(
                        f,
                        "    method: {} {} line {}",
                        method.name.as_deref().unwrap_or(""),
                        method.desc.as_deref().unwrap_or(""),
                        line
                    )?;
                    write_counters(f, 6, &method.counters)?;
                }
                write_counters(f, 4, &class.counters)?;
            }
            for file in &package.source_files {
                writeln!(f, "  sourcefile: {}", file.name.as_deref().unwrap_or(""))?;
                for line in &file.lines {
                    writeln!(
                        f,
                        "    line: {} mi={} ci={} mb={} cb={}",
                        line.nr, line.mi, line.ci, line.mb, line.cb
                    )?;
                }
                write_counters(f, 4, &file.counters)?;
            }
            write_counters(f, 2, &package.counters)?;
        }
        write_counters(f, 0, &report.counters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::jacoco;

    #[test]
    fn test_render_sample() {
        let input = include_bytes!("../tests/fixtures/sample_jacoco.xml");
        let report = jacoco::parse(input).unwrap();
        let out = render(&report);

        assert!(out.starts_with("report: sample\n"));
        assert!(out.contains("  host-1a2b  start=2023-11-14 22:13:20 UTC  dump=2023-11-14 22:13:25 UTC\n"));
        assert!(out.contains("package: com/example\n"));
        assert!(out.contains("  class: com/example/Foo (Foo.java)\n"));
        assert!(out.contains("    method: <init> ()V line 3\n"));
        assert!(out.contains("      counter: BRANCH missed=1 covered=1\n"));
        assert!(out.contains("  sourcefile: Foo.java\n"));
        assert!(out.contains("    line: 11 mi=0 ci=5 mb=1 cb=1\n"));
        assert!(out.ends_with("counter: COMPLEXITY missed=1 covered=3\n"));
    }

    #[test]
    fn test_session_time_fallbacks() {
        assert_eq!(session_time(None), "-");
        assert_eq!(session_time(Some("soon")), "soon");
        assert_eq!(session_time(Some("0")), "1970-01-01 00:00:00 UTC");
    }
}
