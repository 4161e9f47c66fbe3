// src/converter/mod.rs
//! dlog to CSV conversion
//!
//! [`DlogConverter`] streams the sample section in fixed-size chunks,
//! decodes each entry in the header's byte order, divides it by the header's
//! voltage units and renders it with [`format_number`](crate::numeric::format_number).

mod dlog_converter;
mod options;

pub use dlog_converter::DlogConverter;
pub use options::ConvertOptions;

use crate::header::HeaderInfo;

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSummary {
    /// Sample count declared in the header
    pub declared_samples: u64,
    pub samples_written: u64,
    /// CSV data rows written, excluding any header row
    pub rows_written: u64,
    /// Bytes of an incomplete sample left at the end of the stream
    pub trailing_bytes: usize,
    pub header: HeaderInfo,
}

impl ConvertSummary {
    /// True if the stream held fewer samples than the header declared
    pub fn is_short(&self) -> bool {
        self.samples_written < self.declared_samples
    }
}
