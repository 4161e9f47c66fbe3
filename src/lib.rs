// src/lib.rs
//! # dlog-rs
//!
//! A high-performance Rust library for converting binary data-logger (dlog)
//! files into CSV text.
//!
//! ## Features
//!
//! - 🚀 **High Performance**: Chunked reads into reusable buffers and an allocation-free number formatter
//! - ✅ **Validated Headers**: Byte order, format revision and sample width are checked before any data is read
//! - 📦 **Memory Bounded**: Input and output buffers have fixed capacities, whatever the file size
//! - 🎯 **Type Safe**: Strongly typed header fields and status codes
//! - 🩹 **Tolerant**: Files cut short by the logger convert as far as the data goes
//!
//! ## Quick Start
//!
//! ### Converting a file
//!
//! ```rust,no_run
//! use dlog_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut converter = DlogConverter::new();
//!     let summary = converter.convert_file("capture.dlog", "capture.csv")?;
//!     println!("Wrote {} samples", summary.samples_written);
//!     Ok(())
//! }
//! ```
//!
//! ### Converting streams
//!
//! ```rust
//! use dlog_rs::*;
//! use std::io::Cursor;
//!
//! # fn main() -> Result<()> {
//! let header = HeaderInfo::new(SampleWidth::W2, 2, 1000);
//! let mut dlog = header.encode();
//! dlog.extend_from_slice(&1500i16.to_le_bytes());
//! dlog.extend_from_slice(&(-250i16).to_le_bytes());
//!
//! let mut csv: Vec<u8> = Vec::new();
//! let mut converter = DlogConverter::with_options(
//!     ConvertOptions::default().with_buffer_sizes(4096, 4096),
//! )?;
//! converter.convert(&mut Cursor::new(dlog), &mut csv)?;
//!
//! assert_eq!(csv, b"1.500\n-0.250\n");
//! # Ok(())
//! # }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod header;
pub mod raw_data;
pub mod numeric;
pub mod converter;

// Re-export commonly used types at the crate root for convenience
pub use error::{DlogError, Result};

// Type exports
pub use types::{
    ConvertStatus,
    Endianness,
    SampleWidth,
    StopReason,
};

// Header exports
pub use header::{
    parse_header,
    HeaderInfo,
    SampleLayout,
};

// Raw data exports
pub use raw_data::{
    InputBuffer,
    OutputBuffer,
    SampleDecoder,
};

// Formatter exports
pub use numeric::format_number;

// Converter exports
pub use converter::{
    ConvertOptions,
    ConvertSummary,
    DlogConverter,
};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use dlog_rs::prelude::*;
    //! ```

    pub use crate::error::{DlogError, Result};
    pub use crate::types::{ConvertStatus, Endianness, SampleWidth};
    pub use crate::header::HeaderInfo;
    pub use crate::converter::{ConvertOptions, DlogConverter};
}

/// Convert the dlog file at `input` to CSV at `output` with default options
/// and report the outcome as a status code.
pub fn convert_file(input: impl AsRef<std::path::Path>, output: impl AsRef<std::path::Path>) -> ConvertStatus {
    DlogConverter::new().convert_file_status(input, output)
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
