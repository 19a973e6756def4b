use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::xml::XmlError;

/// Where the document being parsed came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOrigin {
    File(PathBuf),
    Literal,
}

impl fmt::Display for InputOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputOrigin::File(path) => write!(f, "file `{}`", path.display()),
            InputOrigin::Literal => write!(f, "XML string"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("unsupported report format `{0}`, expected one of: junit, xunit, nunit")]
    UnsupportedFormat(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("malformed document in {origin}: {source}")]
    MalformedDocument { origin: InputOrigin, source: XmlError },
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
