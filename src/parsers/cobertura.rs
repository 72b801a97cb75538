/// Parser for Cobertura XML coverage reports.
///
/// Cobertura XML structure:
///   <coverage>
///     <packages>
///       <package name="...">
///         <classes>
///           <class name="..." filename="...">
///             <methods>
///               <method name="...">
///                 <lines><line number="..." hits="..."/></lines>
///               </method>
///             </methods>
///             <lines>
///               <line number="..." hits="..."/>
///             </lines>
///           </class>
///         </classes>
///       </package>
///     </packages>
///   </coverage>
///
/// Only line totals are kept: a line counts once per file no matter how many
/// times it is listed, and it is covered if any listing has `hits > 0`.
use std::collections::HashMap;
use std::str;

use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{LineAccumulator, Parser};
use crate::error::{CovmapError, Result};
use crate::model::CoverageData;

pub struct CoberturaParser;

impl Parser for CoberturaParser {
    fn parse(&self, input: &[u8]) -> Result<CoverageData> {
        parse_cobertura(input)
    }
}

fn parse_cobertura(input: &[u8]) -> Result<CoverageData> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);

    let mut files = LineAccumulator::default();
    let mut buf = Vec::new();
    let mut current_file: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => {
                return Err(CovmapError::Xml {
                    position: reader.buffer_position(),
                    source: e,
                })
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"class" => {
                    let attrs = attr_map(e);
                    match attrs.get("filename") {
                        Some(filename) if !filename.is_empty() => {
                            files.file(filename);
                            current_file = Some(filename.clone());
                        }
                        _ => {
                            warn!("skipping <class> without a filename attribute");
                            current_file = None;
                        }
                    }
                }
                b"line" => record_line(e, current_file.as_deref(), &mut files),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"line" {
                    record_line(e, current_file.as_deref(), &mut files);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"class" {
                    current_file = None;
                }
            }
            _ => {}
        }
        buf.clear();
    }

    files.finish()
}

fn record_line(e: &BytesStart, current_file: Option<&str>, files: &mut LineAccumulator) {
    let Some(path) = current_file else {
        return;
    };
    let attrs = attr_map(e);
    let Some(line_number) = attrs.get("number").and_then(|n| n.parse::<u32>().ok()) else {
        warn!("skipping <line> without a valid number in '{}'", path);
        return;
    };
    let hit_count = attrs
        .get("hits")
        .and_then(|h| h.parse::<u64>().ok())
        .unwrap_or(0);
    files.record(path, line_number, hit_count);
}

/// Extract attributes from an XML element into a HashMap.
fn attr_map(e: &BytesStart) -> HashMap<String, String> {
    e.attributes()
        .filter_map(|a| {
            let attr = a.ok()?;
            let key = str::from_utf8(attr.key.local_name().into_inner())
                .ok()?
                .to_string();
            let value = attr.unescape_value().ok()?.to_string();
            Some((key, value))
        })
        .collect()
}
