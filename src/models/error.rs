use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Display, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[display("unreadable archive: {_0}")]
    ArchiveUnreadable(String),
    #[display("no modinfo.ini in {_0}")]
    DescriptorNotFound(String),
    #[display("more than one modinfo.ini in {_0}")]
    DescriptorAmbiguous(String),
    #[display("mod '{_0}' has no backing archive")]
    NoBackingArchive(String),
    #[display("IO error: {_0}")]
    Io(String),
    #[display("invalid path: {_0}")]
    InvalidPath(String),
    #[display("parse error: {_0}")]
    Parse(String),
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::ArchiveUnreadable(e.to_string())
    }
}
