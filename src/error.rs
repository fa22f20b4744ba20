//! Errors produced when opening a file.

use crate::handle::FileKind;
use crate::status::Status;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The path does not exist.
    NotFound(PathBuf),
    /// The path exists but cannot be read by this process.
    InsufficientAccess(PathBuf),
    /// The path is not a regular file.
    InvalidType(PathBuf, FileKind),
    /// `stat`, `open` or another system call failed.
    Io(io::Error),
}

impl Error {
    /// The status flags describing this error. Always includes `ERROR`.
    pub fn status(&self) -> Status {
        match self {
            Error::NotFound(_) => Status::ERROR | Status::NOT_FOUND,
            Error::InsufficientAccess(_) => Status::ERROR | Status::INSUFFICIENT_ACCESS,
            Error::InvalidType(..) => Status::ERROR | Status::INVALID_TYPE,
            Error::Io(_) => Status::ERROR,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound(path) => write!(f, "no such file: {}", path.display()),
            Error::InsufficientAccess(path) => {
                write!(f, "permission denied: {}", path.display())
            }
            Error::InvalidType(path, kind) => write!(
                f,
                "not a regular file: {} is a {}",
                path.display(),
                kind
            ),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}
