// src/raw_data/mod.rs
//! Raw sample handling for dlog files
//!
//! - [`decode`] / [`SampleDecoder`] - turn fixed-width entries into numbers
//!   in the byte order declared by the header
//! - [`InputBuffer`] - chunked reads with carry-over of partial records
//! - [`OutputBuffer`] - CSV text staging with flush-and-reset on overflow
//!
//! # Example
//!
//! ```
//! use dlog_rs::raw_data::{InputBuffer, OutputBuffer, SampleDecoder};
//! use dlog_rs::types::{Endianness, SampleWidth};
//! use std::io::Cursor;
//!
//! let decoder = SampleDecoder::new(SampleWidth::W2, Endianness::Little, true);
//! let mut input = InputBuffer::with_capacity(64);
//! let mut output = OutputBuffer::with_capacity(1024);
//! let mut csv: Vec<u8> = Vec::new();
//!
//! input.fill(&mut Cursor::new(vec![0xE8, 0x03, 0x18, 0xFC])).unwrap();
//! for record in input.take_records(decoder.width(), u64::MAX).chunks_exact(2) {
//!     output.push_field(decoder.scaled(record, 1000.0), 3, b'\n', &mut csv).unwrap();
//! }
//! output.flush(&mut csv).unwrap();
//!
//! assert_eq!(csv, b"1.000\n-1.000\n");
//! ```

mod buffer;
mod decode;

pub use buffer::{InputBuffer, OutputBuffer};
pub use decode::{decode, sign_extend, SampleDecoder};
