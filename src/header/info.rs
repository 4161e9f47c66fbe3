// src/header/info.rs
use std::fmt;

use crate::error::{DlogError, Result};
use crate::header::SampleLayout;
use crate::types::{Endianness, SampleWidth, StopReason};

/// Parsed dlog file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub endian: Endianness,
    pub sample_width: SampleWidth,
    /// Logical size of the header structure
    pub header_length: u16,
    /// Space the header occupies in the file, sector aligned (usually 512)
    pub header_length_on_disk: u16,
    pub format: u16,
    pub revision: u32,
    /// Divide a raw sample by this to get volts
    pub voltage_units: u64,
    pub stop_reason: StopReason,
    /// Index of the first sample in the file, usually 0
    pub start_index: u64,
    pub sample_count: u64,
    /// Divide `micro_samples_per_second` by this to get samples per second
    pub sample_freq_units: u64,
    pub micro_samples_per_second: u64,
    /// Divide `picosecond_delay` by this to get the delay in seconds
    pub delay_units: u64,
    /// Delay from the start of acquisition to the first sample, usually 0
    pub picosecond_delay: i64,
}

impl HeaderInfo {
    /// Bytes covered by the fixed field layout
    pub const FIXED_LAYOUT_SIZE: usize = 80;
    pub const MIN_HEADER_LENGTH: u16 = Self::FIXED_LAYOUT_SIZE as u16;
    pub const SECTOR_SIZE: u16 = 512;

    /// A single-channel little-endian header with the given sample width,
    /// count and scale. Remaining fields are zero.
    pub fn new(sample_width: SampleWidth, sample_count: u64, voltage_units: u64) -> Self {
        HeaderInfo {
            endian: Endianness::Little,
            sample_width,
            header_length: Self::MIN_HEADER_LENGTH,
            header_length_on_disk: Self::SECTOR_SIZE,
            format: 1,
            revision: 1,
            voltage_units,
            stop_reason: StopReason::Normal,
            start_index: 0,
            sample_count,
            sample_freq_units: 0,
            micro_samples_per_second: 0,
            delay_units: 0,
            picosecond_delay: 0,
        }
    }

    /// Check the semantic invariants the converter relies on.
    pub fn validate(&self) -> Result<()> {
        if self.header_length < Self::MIN_HEADER_LENGTH {
            return Err(DlogError::InvalidHeader(format!(
                "header length {} is below the minimum of {}",
                self.header_length,
                Self::MIN_HEADER_LENGTH
            )));
        }

        if self.header_length_on_disk < self.header_length {
            return Err(DlogError::InvalidHeader(format!(
                "on-disk header length {} is smaller than header length {}",
                self.header_length_on_disk, self.header_length
            )));
        }

        if !SampleLayout::is_supported(self.format, self.revision) {
            return Err(DlogError::InvalidHeader(format!(
                "unsupported format {} revision {}",
                self.format, self.revision
            )));
        }

        if self.voltage_units == 0 {
            return Err(DlogError::InvalidHeader("voltage units must not be zero".into()));
        }

        Ok(())
    }

    /// Row layout for this header's format and revision
    pub fn layout(&self) -> Option<SampleLayout> {
        SampleLayout::lookup(self.format, self.revision)
    }

    pub fn sample_bytes(&self) -> usize {
        self.sample_width.bytes()
    }

    /// Samples per second, `None` if the rate fields are zero
    pub fn sample_rate_hz(&self) -> Option<f64> {
        if self.sample_freq_units == 0 || self.micro_samples_per_second == 0 {
            return None;
        }
        Some(self.micro_samples_per_second as f64 / self.sample_freq_units as f64)
    }

    /// Seconds between two consecutive samples
    pub fn sample_period_secs(&self) -> Option<f64> {
        self.sample_rate_hz().map(|rate| 1.0 / rate)
    }

    /// Delay of the first sample relative to the start of acquisition
    pub fn first_sample_delay_secs(&self) -> Option<f64> {
        if self.delay_units == 0 {
            return None;
        }
        Some(self.picosecond_delay as f64 / self.delay_units as f64)
    }

    /// Length of the logged acquisition in seconds
    pub fn duration_secs(&self) -> Option<f64> {
        self.sample_period_secs().map(|period| self.sample_count as f64 * period)
    }

    /// Number of sample bytes the header declares after the on-disk header
    pub fn data_len_bytes(&self) -> u64 {
        self.sample_count.saturating_mul(self.sample_bytes() as u64)
    }

    /// Acquisition time of the sample at `index` (relative to the file start)
    pub fn sample_time_secs(&self, index: u64) -> Option<f64> {
        let period = self.sample_period_secs()?;
        let delay = self.first_sample_delay_secs().unwrap_or(0.0);
        Some(delay + self.start_index.saturating_add(index) as f64 * period)
    }
}

impl fmt::Display for HeaderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "format:          {} (revision {})", self.format, self.revision)?;
        writeln!(f, "endian:          {}", self.endian.name())?;
        writeln!(f, "sample width:    {} bytes", self.sample_bytes())?;
        writeln!(
            f,
            "header length:   {} ({} on disk)",
            self.header_length, self.header_length_on_disk
        )?;
        writeln!(f, "voltage units:   {}", self.voltage_units)?;
        writeln!(f, "samples:         {} (first index {})", self.sample_count, self.start_index)?;
        match self.sample_rate_hz() {
            Some(rate) => writeln!(f, "sample rate:     {} Hz", rate)?,
            None => writeln!(f, "sample rate:     undefined")?,
        }
        if let Some(duration) = self.duration_secs() {
            writeln!(f, "duration:        {} s", duration)?;
        }
        if let Some(delay) = self.first_sample_delay_secs() {
            writeln!(f, "first sample at: {} s", delay)?;
        }
        write!(f, "stop reason:     {}", self.stop_reason)
    }
}
