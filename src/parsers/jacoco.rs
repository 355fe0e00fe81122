/// Loader for JaCoCo XML coverage reports.
///
/// JaCoCo XML structure:
///   <report name="...">
///     <sessioninfo id="..." start="..." dump="..."/>
///     <group name="...">            (optional, may nest)
///       <package name="com/example">
///         <class name="com/example/Foo" sourcefilename="Foo.java">
///           <method name="doStuff" desc="()V" line="10">
///             <counter type="LINE" missed="0" covered="3"/>
///           </method>
///           <counter type="LINE" missed="1" covered="5"/>
///         </class>
///         <sourcefile name="Foo.java">
///           <line nr="10" mi="0" ci="3" mb="0" cb="2"/>
///           <counter type="LINE" missed="1" covered="5"/>
///         </sourcefile>
///         <counter type="LINE" missed="1" covered="5"/>
///       </package>
///     </group>
///     <counter type="LINE" missed="1" covered="5"/>
///   </report>
///
/// The whole tree is kept in memory: line attribution needs every method
/// start line of a source file before any of its lines can be assigned.
///
/// Packages found inside `<group>` elements are flattened into the report,
/// same-named packages from different groups merged into one; group-level
/// counters are dropped.
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{get_attr, parse_attr, xml_err};
use crate::error::{ConvertError, Result};
use crate::model::jacoco::*;

/// Read and parse the JaCoCo report at `path`.
pub fn load(path: &Path) -> Result<Report> {
    let content = std::fs::read(path)?;
    parse(&content)
}

/// Parse JaCoCo XML from raw bytes.
pub fn parse(input: &[u8]) -> Result<Report> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);

    let mut builder = ReportBuilder::default();
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf);
        let position = reader.buffer_position();
        match event {
            Err(e) => return Err(xml_err(e, &reader)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) => builder.open(e, position)?,
            Ok(Event::Empty(ref e)) => {
                builder.open(e, position)?;
                builder.close(e.name().as_ref());
            }
            Ok(Event::End(ref e)) => builder.close(e.name().as_ref()),
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}

/// JaCoCo counts are 32-bit; absent means 0.
fn count_attr(e: &BytesStart, name: &[u8], position: usize) -> Result<u64> {
    Ok(parse_attr::<u32>(e, name, position)?.map_or(0, u64::from))
}

/// Element-by-element assembly of a `Report`. Each open container slot is
/// moved into its parent when the container closes.
#[derive(Default)]
struct ReportBuilder {
    report: Option<Report>,
    group_depth: usize,
    package: Option<Package>,
    class: Option<Class>,
    method: Option<Method>,
    source_file: Option<SourceFile>,
}

impl ReportBuilder {
    fn open(&mut self, e: &BytesStart, position: usize) -> Result<()> {
        let Some(report) = self.report.as_mut() else {
            if e.name().as_ref() != b"report" {
                return Err(ConvertError::Parse(format!(
                    "expected <report> root element, found <{}>",
                    String::from_utf8_lossy(e.name().as_ref())
                )));
            }
            self.report = Some(Report {
                name: get_attr(e, b"name"),
                ..Default::default()
            });
            return Ok(());
        };

        match e.name().as_ref() {
            b"sessioninfo" => {
                report.sessions.push(SessionInfo {
                    id: get_attr(e, b"id"),
                    start: get_attr(e, b"start"),
                    dump: get_attr(e, b"dump"),
                });
            }
            b"group" => {
                self.group_depth += 1;
            }
            b"package" => {
                self.package = Some(Package {
                    name: get_attr(e, b"name"),
                    ..Default::default()
                });
            }
            b"class" => {
                self.class = Some(Class {
                    name: get_attr(e, b"name"),
                    source_file_name: get_attr(e, b"sourcefilename"),
                    ..Default::default()
                });
            }
            b"method" => {
                self.method = Some(Method {
                    name: get_attr(e, b"name"),
                    desc: get_attr(e, b"desc"),
                    line: parse_attr(e, b"line", position)?,
                    ..Default::default()
                });
            }
            b"sourcefile" => {
                self.source_file = Some(SourceFile {
                    name: get_attr(e, b"name"),
                    ..Default::default()
                });
            }
            b"line" => {
                if let Some(file) = self.source_file.as_mut() {
                    file.lines.push(Line {
                        nr: parse_attr(e, b"nr", position)?.unwrap_or(0),
                        mi: count_attr(e, b"mi", position)?,
                        ci: count_attr(e, b"ci", position)?,
                        mb: count_attr(e, b"mb", position)?,
                        cb: count_attr(e, b"cb", position)?,
                    });
                }
            }
            b"counter" => {
                let counter = Counter::new(
                    CounterKind::from_tag(&get_attr(e, b"type").unwrap_or_default()),
                    count_attr(e, b"missed", position)?,
                    count_attr(e, b"covered", position)?,
                );
                self.attach_counter(counter);
            }
            _ => {}
        }
        Ok(())
    }

    /// Counters belong to the innermost open element.
    fn attach_counter(&mut self, counter: Counter) {
        if let Some(method) = self.method.as_mut() {
            method.counters.push(counter);
        } else if let Some(class) = self.class.as_mut() {
            class.counters.push(counter);
        } else if let Some(file) = self.source_file.as_mut() {
            file.counters.push(counter);
        } else if let Some(package) = self.package.as_mut() {
            package.counters.push(counter);
        } else if self.group_depth > 0 {
            // group totals have no Cobertura counterpart
        } else if let Some(report) = self.report.as_mut() {
            report.counters.push(counter);
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"method" => {
                if let (Some(method), Some(class)) = (self.method.take(), self.class.as_mut()) {
                    class.methods.push(method);
                }
            }
            b"class" => {
                if let (Some(class), Some(package)) = (self.class.take(), self.package.as_mut()) {
                    package.classes.push(class);
                }
            }
            b"sourcefile" => {
                if let (Some(file), Some(package)) =
                    (self.source_file.take(), self.package.as_mut())
                {
                    package.source_files.push(file);
                }
            }
            b"package" => {
                if let (Some(package), Some(report)) = (self.package.take(), self.report.as_mut()) {
                    // groups of an aggregate report may repeat a package
                    match report.packages.iter_mut().find(|p| p.name == package.name) {
                        Some(existing) => existing.merge(package),
                        None => report.packages.push(package),
                    }
                }
            }
            b"group" => {
                self.group_depth = self.group_depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn finish(self) -> Result<Report> {
        self.report
            .ok_or_else(|| ConvertError::Parse("document has no <report> element".to_string()))
    }
}
