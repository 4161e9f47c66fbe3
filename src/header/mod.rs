// src/header/mod.rs
//! dlog file header handling
//!
//! The header is a fixed 80 byte field layout followed by zero padding up to
//! `header_length_on_disk` (usually one 512 byte sector). The first byte
//! selects the byte order of every other multi-byte field and of the samples.
//!
//! ```
//! use dlog_rs::header::{parse_header, HeaderInfo};
//! use dlog_rs::types::SampleWidth;
//! use std::io::Cursor;
//!
//! let bytes = HeaderInfo::new(SampleWidth::W2, 100, 1000).encode();
//! let header = parse_header(&mut Cursor::new(bytes)).unwrap();
//! assert_eq!(header.sample_count, 100);
//! ```

mod info;
mod layout;
mod parser;

pub use info::HeaderInfo;
pub use layout::SampleLayout;
pub use parser::parse_header;
