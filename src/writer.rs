/// Writer for Cobertura XML coverage reports.
///
/// Output structure:
///   <?xml version="1.0" encoding="UTF-8"?>
///   <coverage timestamp="..." line-rate="..." branch-rate="..." complexity="...">
///     <sources><source>.</source></sources>
///     <packages>
///       <package name="com/example" line-rate="..." ...>
///         <classes>
///           <class name="com/example/Foo" filename="com/example/Foo.java" ...>
///             <methods>
///               <method name="doStuff" signature="()V" ...>
///                 <lines>
///                   <line number="11" hits="1" branch="true" condition-coverage="50% (1/2)">
///                     <conditions>
///                       <condition number="0" type="jump" coverage="50%"/>
///                     </conditions>
///                   </line>
///                 </lines>
///               </method>
///             </methods>
///             <lines>...</lines>
///           </class>
///         </classes>
///       </package>
///     </packages>
///   </coverage>
use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::writer::Writer;

use crate::error::{ConvertError, Result};
use crate::model::cobertura::*;

/// Write `coverage` to `path`, creating missing parent directories.
pub fn store(path: &Path, coverage: &Coverage) -> Result<()> {
    let xml = to_xml(coverage)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, xml)?;
    Ok(())
}

/// Serialize `coverage`, declaration header included.
pub fn to_xml(coverage: &Coverage) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    if let Err(source) = write_coverage(&mut writer, coverage) {
        return Err(ConvertError::Xml {
            source,
            position: writer.get_ref().len(),
        });
    }
    Ok(writer.into_inner())
}

/// Rates rendered the way Cobertura readers expect: `1.0`, `0.75`.
fn format_rate(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

struct RateAttrs {
    line_rate: String,
    branch_rate: String,
    complexity: String,
}

impl RateAttrs {
    fn new(rates: &Rates) -> Self {
        Self {
            line_rate: format_rate(rates.line_rate),
            branch_rate: format_rate(rates.branch_rate),
            complexity: format_rate(rates.complexity),
        }
    }

    fn attributes(&self) -> [(&str, &str); 3] {
        [
            ("line-rate", self.line_rate.as_str()),
            ("branch-rate", self.branch_rate.as_str()),
            ("complexity", self.complexity.as_str()),
        ]
    }
}

fn write_coverage<W: Write>(w: &mut Writer<W>, coverage: &Coverage) -> quick_xml::Result<()> {
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let timestamp = coverage.timestamp.to_string();
    let rates = RateAttrs::new(&coverage.rates);
    w.create_element("coverage")
        .with_attribute(("timestamp", timestamp.as_str()))
        .with_attributes(rates.attributes())
        .write_inner_content(|w| -> quick_xml::Result<()> {
            w.create_element("sources").write_inner_content(|w| -> quick_xml::Result<()> {
                for source in &coverage.sources {
                    w.create_element("source")
                        .write_text_content(BytesText::new(source))?;
                }
                Ok(())
            })?;
            w.create_element("packages").write_inner_content(|w| -> quick_xml::Result<()> {
                for package in &coverage.packages {
                    write_package(w, package)?;
                }
                Ok(())
            })?;
            Ok(())
        })?;
    Ok(())
}

fn write_package<W: Write>(w: &mut Writer<W>, package: &Package) -> quick_xml::Result<()> {
    let rates = RateAttrs::new(&package.rates);
    w.create_element("package")
        .with_attribute(("name", package.name.as_str()))
        .with_attributes(rates.attributes())
        .write_inner_content(|w| -> quick_xml::Result<()> {
            w.create_element("classes").write_inner_content(|w| -> quick_xml::Result<()> {
                for class in &package.classes {
                    write_class(w, class)?;
                }
                Ok(())
            })?;
            Ok(())
        })?;
    Ok(())
}

fn write_class<W: Write>(w: &mut Writer<W>, class: &Class) -> quick_xml::Result<()> {
    let rates = RateAttrs::new(&class.rates);
    w.create_element("class")
        .with_attribute(("name", class.name.as_str()))
        .with_attribute(("filename", class.filename.as_str()))
        .with_attributes(rates.attributes())
        .write_inner_content(|w| -> quick_xml::Result<()> {
            w.create_element("methods").write_inner_content(|w| -> quick_xml::Result<()> {
                for method in &class.methods {
                    write_method(w, method)?;
                }
                Ok(())
            })?;
            write_lines(w, &class.lines)
        })?;
    Ok(())
}

fn write_method<W: Write>(w: &mut Writer<W>, method: &Method) -> quick_xml::Result<()> {
    let rates = RateAttrs::new(&method.rates);
    w.create_element("method")
        .with_attribute(("name", method.name.as_str()))
        .with_attribute(("signature", method.signature.as_str()))
        .with_attributes(rates.attributes())
        .write_inner_content(|w| write_lines(w, &method.lines))?;
    Ok(())
}

fn write_lines<W: Write>(w: &mut Writer<W>, lines: &[Line]) -> quick_xml::Result<()> {
    w.create_element("lines").write_inner_content(|w| -> quick_xml::Result<()> {
        for line in lines {
            write_line(w, line)?;
        }
        Ok(())
    })?;
    Ok(())
}

fn write_line<W: Write>(w: &mut Writer<W>, line: &Line) -> quick_xml::Result<()> {
    let number = line.number.to_string();
    let hits = line.hits.to_string();
    let mut element = w
        .create_element("line")
        .with_attribute(("number", number.as_str()))
        .with_attribute(("hits", hits.as_str()))
        .with_attribute(("branch", if line.branch { "true" } else { "false" }));
    if let Some(condition_coverage) = &line.condition_coverage {
        element = element.with_attribute(("condition-coverage", condition_coverage.as_str()));
    }

    if line.conditions.is_empty() {
        element.write_empty()?;
        return Ok(());
    }

    element.write_inner_content(|w| -> quick_xml::Result<()> {
        w.create_element("conditions").write_inner_content(|w| -> quick_xml::Result<()> {
            for condition in &line.conditions {
                let number = condition.number.to_string();
                w.create_element("condition")
                    .with_attribute(("number", number.as_str()))
                    .with_attribute(("type", condition.kind.as_str()))
                    .with_attribute(("coverage", condition.coverage.as_str()))
                    .write_empty()?;
            }
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(coverage: &Coverage) -> String {
        String::from_utf8(to_xml(coverage).unwrap()).unwrap()
    }

    fn sample() -> Coverage {
        let branching = Line {
            number: 11,
            hits: 1,
            branch: true,
            condition_coverage: Some("50% (1/2)".to_string()),
            conditions: vec![Condition::jump("50%".to_string())],
        };
        let plain = Line {
            number: 12,
            hits: 0,
            ..Default::default()
        };
        Coverage {
            timestamp: 1_700_000_000,
            sources: vec![".".to_string()],
            packages: vec![Package {
                name: "com/example".to_string(),
                classes: vec![Class {
                    name: "com/example/Foo".to_string(),
                    filename: "com/example/Foo.java".to_string(),
                    methods: vec![Method {
                        name: "<init>".to_string(),
                        signature: "()V".to_string(),
                        lines: vec![branching.clone(), plain.clone()],
                        rates: Rates {
                            line_rate: 0.5,
                            branch_rate: 0.5,
                            complexity: 2.0,
                        },
                    }],
                    lines: vec![branching, plain],
                    rates: Rates::default(),
                }],
                rates: Rates {
                    line_rate: 1.0,
                    branch_rate: 0.0,
                    complexity: 1.0,
                },
            }],
            rates: Rates {
                line_rate: 0.8333333333333334,
                branch_rate: 0.5,
                complexity: 4.0,
            },
        }
    }

    #[test]
    fn test_declaration_header() {
        let xml = render(&Coverage::default());
        assert!(
            xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_document_attributes() {
        let xml = render(&sample());
        assert!(xml.contains(
            r#"<coverage timestamp="1700000000" line-rate="0.8333333333333334" branch-rate="0.5" complexity="4.0">"#
        ), "{xml}");
        assert!(xml.contains("<source>.</source>"), "{xml}");
        assert!(xml.contains(
            r#"<package name="com/example" line-rate="1.0" branch-rate="0.0" complexity="1.0">"#
        ), "{xml}");
        assert!(xml.contains(
            r#"<class name="com/example/Foo" filename="com/example/Foo.java" line-rate="0.0" branch-rate="0.0" complexity="0.0">"#
        ), "{xml}");
    }

    #[test]
    fn test_names_are_escaped() {
        let xml = render(&sample());
        assert!(xml.contains(r#"<method name="&lt;init&gt;" signature="()V""#), "{xml}");
    }

    #[test]
    fn test_branching_line_has_conditions() {
        let xml = render(&sample());
        assert!(xml.contains(
            r#"<line number="11" hits="1" branch="true" condition-coverage="50% (1/2)">"#
        ), "{xml}");
        assert!(
            xml.contains(r#"<condition number="0" type="jump" coverage="50%"/>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_plain_line_has_no_condition_fields() {
        let xml = render(&sample());
        assert!(
            xml.contains(r#"<line number="12" hits="0" branch="false"/>"#),
            "{xml}"
        );
        assert_eq!(xml.matches("<conditions>").count(), 2, "{xml}");
    }

    #[test]
    fn test_output_parses_back() {
        let bytes = to_xml(&sample()).unwrap();
        let mut reader = quick_xml::Reader::from_reader(bytes.as_slice());
        let mut buf = Vec::new();
        let mut elements = 0;
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Eof => break,
                Event::Start(_) | Event::Empty(_) => elements += 1,
                _ => {}
            }
            buf.clear();
        }
        assert!(elements > 10);
    }

    #[test]
    fn test_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/cobertura.xml");
        store(&path, &sample()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<coverage"));
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0), "0.0");
        assert_eq!(format_rate(1.0), "1.0");
        assert_eq!(format_rate(0.75), "0.75");
        assert_eq!(format_rate(12.0), "12.0");
    }
}
