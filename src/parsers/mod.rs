pub mod jacoco;

use std::str::FromStr;

use quick_xml::events::BytesStart;
use quick_xml::reader::Reader;

use crate::error::{ConvertError, Result};

/// Unescaped value of attribute `name`, if present.
pub(crate) fn get_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Parse attribute `name` into `T`. Absent is `None`; present but
/// unparseable is an error, since the document no longer has the shape we
/// expect.
pub(crate) fn parse_attr<T: FromStr>(
    e: &BytesStart,
    name: &[u8],
    position: usize,
) -> Result<Option<T>> {
    match get_attr(e, name) {
        None => Ok(None),
        Some(value) => value.trim().parse().map(Some).map_err(|_| {
            ConvertError::Parse(format!(
                "invalid value '{}' for attribute '{}' of <{}> near position {}",
                value,
                String::from_utf8_lossy(name),
                String::from_utf8_lossy(e.name().as_ref()),
                position,
            ))
        }),
    }
}

pub(crate) fn xml_err<R>(source: quick_xml::Error, reader: &Reader<R>) -> ConvertError {
    ConvertError::Xml {
        source,
        position: reader.buffer_position(),
    }
}
