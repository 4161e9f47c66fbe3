// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::ConvertStatus;

#[derive(Error, Debug)]
pub enum DlogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid dlog header: {0}")]
    InvalidHeader(String),

    #[error("Invalid conversion options: {0}")]
    InvalidConfig(String),

    #[error("Value {0} is out of range for fixed-point output")]
    ValueOutOfRange(f64),

    #[error("Buffer overflow: tried to write {attempted} bytes to buffer of size {capacity}")]
    BufferOverflow { attempted: usize, capacity: usize },
}

impl DlogError {
    /// Collapse the error into the status code reported to callers of
    /// [`DlogConverter::convert_file_status`](crate::DlogConverter::convert_file_status).
    pub fn status(&self) -> ConvertStatus {
        match self {
            DlogError::InvalidHeader(_) => ConvertStatus::InvalidHeader,
            _ => ConvertStatus::FileOpenError,
        }
    }

    pub(crate) fn file_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DlogError::FileOpen { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, DlogError>;
