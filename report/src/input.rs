use std::{fs, path::Path};

use constants::{MAX_PATH_LEN, REPORT_FILE_EXTENSION};

use crate::{
    error::{InputOrigin, ReportError},
    xml::{XmlDocumentReader, XmlElement},
};

/// Resolves a report argument, which is either a path to a report file or the
/// report XML itself, to the document's root element.
///
/// Input that is neither an existing file nor starts like XML, but reads like a
/// path, is reported as [`ReportError::NotFound`] instead of as malformed XML.
pub fn resolve(input: &str) -> Result<XmlElement, ReportError> {
    let looks_like_xml = input.trim().starts_with('<');

    if !looks_like_xml && input.chars().count() < MAX_PATH_LEN {
        let path = Path::new(input);
        if path.is_file() {
            return read_file(path);
        }
    }

    if looks_like_xml {
        return read_literal(input);
    }

    if looks_like_path(input) {
        tracing::debug!(input, "input is not a file but looks like a path");
        return Err(ReportError::NotFound(String::from(input)));
    }

    read_literal(input)
}

fn looks_like_path(input: &str) -> bool {
    !input.contains('\n')
        && (input.contains('/')
            || input.contains('\\')
            || input.to_lowercase().ends_with(REPORT_FILE_EXTENSION))
}

fn read_file(path: &Path) -> Result<XmlElement, ReportError> {
    tracing::debug!(path = %path.display(), "reading report file");
    let contents = fs::read(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    XmlDocumentReader::new()
        .read(contents.as_slice())
        .map_err(|source| ReportError::MalformedDocument {
            origin: InputOrigin::File(path.to_path_buf()),
            source,
        })
}

fn read_literal(xml: &str) -> Result<XmlElement, ReportError> {
    tracing::debug!(len = xml.len(), "reading report from XML string");
    XmlDocumentReader::new()
        .read(xml.as_bytes())
        .map_err(|source| ReportError::MalformedDocument {
            origin: InputOrigin::Literal,
            source,
        })
}
