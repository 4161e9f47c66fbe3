// src/header/parser.rs
use std::io::{self, Read};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::debug;

use crate::error::{DlogError, Result};
use crate::header::HeaderInfo;
use crate::types::{Endianness, SampleWidth, StopReason};

// Field offsets within the fixed header layout
const ENDIAN: usize = 0;
const SAMPLE_ENTRY_BYTES: usize = 1;
const HEADER_LENGTH: usize = 2;
const HEADER_LENGTH_ON_DISK: usize = 4;
const FORMAT: usize = 6;
const REVISION: usize = 8;
const VOLTAGE_UNITS: usize = 12;
const STOP_REASON: usize = 20;
const START_INDEX: usize = 24;
const SAMPLE_COUNT: usize = 32;
const SAMPLE_FREQ_UNITS: usize = 40;
const MICRO_SAMPLES_PER_SECOND: usize = 48;
const DELAY_UNITS: usize = 56;
const PICOSECOND_DELAY: usize = 64;

/// Read and validate the header at the start of `reader`.
///
/// On success the reader is positioned at the first byte of sample data,
/// `header_length_on_disk` bytes from where it started. The padding is
/// consumed by reading, so non-seekable streams work too.
pub fn parse_header<R: Read>(reader: &mut R) -> Result<HeaderInfo> {
    let mut fixed = [0u8; HeaderInfo::FIXED_LAYOUT_SIZE];
    reader.read_exact(&mut fixed).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => DlogError::InvalidHeader(format!(
            "stream is shorter than the {} byte minimum header",
            HeaderInfo::FIXED_LAYOUT_SIZE
        )),
        _ => DlogError::Io(e),
    })?;

    let header = HeaderInfo::from_bytes(&fixed)?;

    let padding = header.header_length_on_disk as u64 - HeaderInfo::FIXED_LAYOUT_SIZE as u64;
    let skipped = io::copy(&mut reader.by_ref().take(padding), &mut io::sink())?;
    if skipped != padding {
        return Err(DlogError::InvalidHeader(format!(
            "stream ends inside the {} byte on-disk header",
            header.header_length_on_disk
        )));
    }

    debug!(
        endian = header.endian.name(),
        sample_bytes = header.sample_bytes(),
        header_length = header.header_length,
        header_length_on_disk = header.header_length_on_disk,
        format = header.format,
        revision = header.revision,
        voltage_units = header.voltage_units,
        sample_count = header.sample_count,
        stop_reason = header.stop_reason.name(),
        "Parsed dlog header"
    );

    Ok(header)
}

impl HeaderInfo {
    /// Decode and validate the fixed header fields from `bytes`.
    ///
    /// Only the first [`HeaderInfo::FIXED_LAYOUT_SIZE`] bytes are looked at.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::FIXED_LAYOUT_SIZE {
            return Err(DlogError::InvalidHeader(format!(
                "need {} header bytes, got {}",
                Self::FIXED_LAYOUT_SIZE,
                bytes.len()
            )));
        }

        let endian = Endianness::from_u8(bytes[ENDIAN]).ok_or_else(|| {
            DlogError::InvalidHeader(format!("invalid endian tag {}", bytes[ENDIAN]))
        })?;

        let header = match endian {
            Endianness::Little => decode_fields::<LittleEndian>(endian, bytes)?,
            Endianness::Big => decode_fields::<BigEndian>(endian, bytes)?,
        };

        header.validate()?;
        Ok(header)
    }

    /// Encode the header in its own byte order, zero padded to
    /// `header_length_on_disk` (never shorter than the fixed layout).
    ///
    /// Only the fixed fields are kept by [`parse_header`], so any bytes a file
    /// carries between the fixed layout and `header_length` come back as zeros.
    pub fn encode(&self) -> Vec<u8> {
        let len = (self.header_length_on_disk as usize).max(Self::FIXED_LAYOUT_SIZE);
        let mut bytes = vec![0u8; len];
        match self.endian {
            Endianness::Little => encode_fields::<LittleEndian>(self, &mut bytes),
            Endianness::Big => encode_fields::<BigEndian>(self, &mut bytes),
        }
        bytes
    }
}

fn decode_fields<B: ByteOrder>(endian: Endianness, b: &[u8]) -> Result<HeaderInfo> {
    let sample_width = SampleWidth::from_u8(b[SAMPLE_ENTRY_BYTES]).ok_or_else(|| {
        DlogError::InvalidHeader(format!(
            "unsupported sample width {} bytes",
            b[SAMPLE_ENTRY_BYTES]
        ))
    })?;

    Ok(HeaderInfo {
        endian,
        sample_width,
        header_length: B::read_u16(&b[HEADER_LENGTH..]),
        header_length_on_disk: B::read_u16(&b[HEADER_LENGTH_ON_DISK..]),
        format: B::read_u16(&b[FORMAT..]),
        revision: B::read_u32(&b[REVISION..]),
        voltage_units: B::read_u64(&b[VOLTAGE_UNITS..]),
        stop_reason: StopReason::from_u32(B::read_u32(&b[STOP_REASON..])),
        start_index: B::read_u64(&b[START_INDEX..]),
        sample_count: B::read_u64(&b[SAMPLE_COUNT..]),
        sample_freq_units: B::read_u64(&b[SAMPLE_FREQ_UNITS..]),
        micro_samples_per_second: B::read_u64(&b[MICRO_SAMPLES_PER_SECOND..]),
        delay_units: B::read_u64(&b[DELAY_UNITS..]),
        picosecond_delay: B::read_i64(&b[PICOSECOND_DELAY..]),
    })
}

fn encode_fields<B: ByteOrder>(header: &HeaderInfo, b: &mut [u8]) {
    b[ENDIAN] = header.endian as u8;
    b[SAMPLE_ENTRY_BYTES] = header.sample_width as u8;
    B::write_u16(&mut b[HEADER_LENGTH..], header.header_length);
    B::write_u16(&mut b[HEADER_LENGTH_ON_DISK..], header.header_length_on_disk);
    B::write_u16(&mut b[FORMAT..], header.format);
    B::write_u32(&mut b[REVISION..], header.revision);
    B::write_u64(&mut b[VOLTAGE_UNITS..], header.voltage_units);
    B::write_u32(&mut b[STOP_REASON..], header.stop_reason as u32);
    B::write_u64(&mut b[START_INDEX..], header.start_index);
    B::write_u64(&mut b[SAMPLE_COUNT..], header.sample_count);
    B::write_u64(&mut b[SAMPLE_FREQ_UNITS..], header.sample_freq_units);
    B::write_u64(&mut b[MICRO_SAMPLES_PER_SECOND..], header.micro_samples_per_second);
    B::write_u64(&mut b[DELAY_UNITS..], header.delay_units);
    B::write_i64(&mut b[PICOSECOND_DELAY..], header.picosecond_delay);
}
