// src/raw_data/buffer.rs
use bytes::{BufMut, BytesMut};
use std::io::{self, Read, Write};

use crate::error::{DlogError, Result};
use crate::numeric::{format_number, MAX_FIELD_WIDTH};

/// Fixed-capacity staging area for raw sample bytes read from the input.
///
/// Whole records are handed out with [`take_records`](Self::take_records);
/// a partial record left at the end of a chunk is moved to the front on the
/// next [`fill`](Self::fill) so it is completed by the following read.
///
/// # Example
///
/// ```
/// use dlog_rs::raw_data::InputBuffer;
/// use std::io::Cursor;
///
/// let mut buffer = InputBuffer::with_capacity(16);
/// let mut input = Cursor::new(vec![1u8, 2, 3, 4, 5]);
///
/// assert_eq!(buffer.fill(&mut input).unwrap(), 5);
/// assert_eq!(buffer.take_records(2, u64::MAX), &[1, 2, 3, 4]);
/// assert_eq!(buffer.pending(), 1);
/// ```
pub struct InputBuffer {
    data: Vec<u8>,
    filled: usize,
    consumed: usize,
}

impl InputBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        InputBuffer {
            data: vec![0u8; capacity],
            filled: 0,
            consumed: 0,
        }
    }

    /// Move unconsumed bytes to the front and read more after them.
    ///
    /// Returns the number of bytes read; 0 means end of stream (or a full
    /// buffer, which cannot happen while records are taken after every fill).
    pub fn fill<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        if self.consumed > 0 {
            self.data.copy_within(self.consumed..self.filled, 0);
            self.filled -= self.consumed;
            self.consumed = 0;
        }

        loop {
            match reader.read(&mut self.data[self.filled..]) {
                Ok(n) => {
                    self.filled += n;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Consume up to `max_records` whole records of `width` bytes
    pub fn take_records(&mut self, width: usize, max_records: u64) -> &[u8] {
        let available = (self.filled - self.consumed) / width;
        let count = (available as u64).min(max_records) as usize;
        let start = self.consumed;
        self.consumed += count * width;
        &self.data[start..self.consumed]
    }

    /// Bytes read but not yet consumed
    pub fn pending(&self) -> usize {
        self.filled - self.consumed
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Forget any buffered bytes, keeping the allocation
    pub fn reset(&mut self) {
        self.filled = 0;
        self.consumed = 0;
    }
}

impl std::fmt::Debug for InputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBuffer")
            .field("capacity", &self.data.len())
            .field("filled", &self.filled)
            .field("consumed", &self.consumed)
            .finish()
    }
}

/// Fixed-capacity CSV text buffer.
///
/// Fields are appended until the next one might not fit, at which point the
/// filled prefix is written to the output stream and the buffer starts over.
/// The byte length never exceeds the configured capacity.
pub struct OutputBuffer {
    buffer: BytesMut,
    capacity: usize,
    bytes_flushed: u64,
}

impl OutputBuffer {
    /// Space reserved per field: the number plus its terminator
    pub const FIELD_BUDGET: usize = MAX_FIELD_WIDTH + 1;

    /// Create a buffer holding at most `capacity` bytes.
    ///
    /// Capacities below [`OutputBuffer::FIELD_BUDGET`] are raised to it.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(Self::FIELD_BUDGET);
        OutputBuffer {
            buffer: BytesMut::with_capacity(capacity),
            capacity,
            bytes_flushed: 0,
        }
    }

    /// Append `value` rendered with `precision` digits followed by `terminator`
    #[inline]
    pub fn push_field<W: Write>(
        &mut self,
        value: f64,
        precision: u8,
        terminator: u8,
        writer: &mut W,
    ) -> Result<()> {
        self.ensure_space(Self::FIELD_BUDGET, writer)?;

        let mut scratch = [0u8; MAX_FIELD_WIDTH];
        let len = format_number(value, &mut scratch, precision)?;
        self.buffer.put_slice(&scratch[..len]);
        self.buffer.put_u8(terminator);
        Ok(())
    }

    /// Append a single byte
    pub fn push_byte<W: Write>(&mut self, byte: u8, writer: &mut W) -> Result<()> {
        self.ensure_space(1, writer)?;
        self.buffer.put_u8(byte);
        Ok(())
    }

    /// Flush first if fewer than `needed` bytes are left
    fn ensure_space<W: Write>(&mut self, needed: usize, writer: &mut W) -> Result<()> {
        if needed > self.capacity {
            return Err(DlogError::BufferOverflow {
                attempted: needed,
                capacity: self.capacity,
            });
        }
        if self.buffer.len() + needed > self.capacity {
            self.flush(writer)?;
        }
        Ok(())
    }

    /// Write the filled prefix to `writer` and reset to empty
    pub fn flush<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.buffer)?;
        self.bytes_flushed += self.buffer.len() as u64;
        self.buffer.clear();
        Ok(())
    }

    /// Buffered bytes not yet flushed
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total bytes handed to the writer since the last reset
    pub fn bytes_flushed(&self) -> u64 {
        self.bytes_flushed
    }

    /// Drop buffered text and counters, keeping the allocation
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.bytes_flushed = 0;
    }
}

// Implement Debug manually to avoid printing large buffers
impl std::fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("len", &self.buffer.len())
            .field("capacity", &self.capacity)
            .field("bytes_flushed", &self.bytes_flushed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader handing out at most `step` bytes per call
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_partial_record_is_carried_over() {
        let mut buffer = InputBuffer::with_capacity(8);
        let mut input = Trickle { data: (1..=8).collect(), pos: 0, step: 3 };

        assert_eq!(buffer.fill(&mut input).unwrap(), 3);
        assert_eq!(buffer.take_records(4, u64::MAX), &[] as &[u8]);
        assert_eq!(buffer.pending(), 3);

        assert_eq!(buffer.fill(&mut input).unwrap(), 3);
        assert_eq!(buffer.take_records(4, u64::MAX), &[1, 2, 3, 4]);
        assert_eq!(buffer.pending(), 2);

        assert_eq!(buffer.fill(&mut input).unwrap(), 2);
        assert_eq!(buffer.take_records(4, u64::MAX), &[5, 6, 7, 8]);
        assert_eq!(buffer.fill(&mut input).unwrap(), 0);
        assert_eq!(buffer.pending(), 0);
    }

    #[test]
    fn test_take_records_respects_limit() {
        let mut buffer = InputBuffer::with_capacity(16);
        let mut input = Cursor::new(vec![0u8; 12]);
        buffer.fill(&mut input).unwrap();

        assert_eq!(buffer.take_records(2, 2).len(), 4);
        assert_eq!(buffer.pending(), 8);
        assert_eq!(buffer.take_records(2, 10).len(), 8);
    }

    #[test]
    fn test_input_reset() {
        let mut buffer = InputBuffer::with_capacity(4);
        buffer.fill(&mut Cursor::new(vec![9u8; 3])).unwrap();
        buffer.reset();
        assert_eq!(buffer.pending(), 0);
        assert_eq!(buffer.capacity(), 4);
    }

    #[test]
    fn test_output_push_and_flush() {
        let mut out: Vec<u8> = Vec::new();
        let mut buffer = OutputBuffer::with_capacity(1024);

        buffer.push_field(1.5, 2, b',', &mut out).unwrap();
        buffer.push_field(-2.0, 1, b'\n', &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(buffer.as_bytes(), b"1.50,-2.0\n");

        buffer.flush(&mut out).unwrap();
        assert_eq!(out, b"1.50,-2.0\n");
        assert!(buffer.is_empty());
        assert_eq!(buffer.bytes_flushed(), 10);
    }

    #[test]
    fn test_output_flushes_before_overflow() {
        let mut out: Vec<u8> = Vec::new();
        let capacity = OutputBuffer::FIELD_BUDGET * 2;
        let mut buffer = OutputBuffer::with_capacity(capacity);

        for i in 0..100 {
            buffer.push_field(i as f64, 3, b'\n', &mut out).unwrap();
            assert!(buffer.len() <= capacity);
        }
        buffer.flush(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 100);
        assert_eq!(lines[0], "0.000");
        assert_eq!(lines[99], "99.000");
    }

    #[test]
    fn test_output_minimum_capacity() {
        let buffer = OutputBuffer::with_capacity(1);
        assert_eq!(buffer.capacity(), OutputBuffer::FIELD_BUDGET);
    }

    #[test]
    fn test_output_write_error_propagates() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut buffer = OutputBuffer::with_capacity(64);
        buffer.push_byte(b'x', &mut Closed).unwrap();
        assert!(matches!(buffer.flush(&mut Closed), Err(DlogError::Io(_))));
    }

    #[test]
    fn test_debug_formatting() {
        let buffer = OutputBuffer::with_capacity(256);
        let debug_str = format!("{:?}", buffer);
        assert!(debug_str.contains("capacity: 256"));
    }
}
