// src/converter/options.rs
use crate::error::{DlogError, Result};
use crate::numeric::MAX_PRECISION;

/// Settings for a [`DlogConverter`](crate::DlogConverter)
///
/// # Example
///
/// ```
/// use dlog_rs::ConvertOptions;
///
/// let options = ConvertOptions::default()
///     .with_precision(4)
///     .with_time_column(6)
///     .with_csv_header("time,volts");
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Digits after the decimal point for sample values
    pub precision: u8,
    /// Bytes read from the input per chunk
    pub input_buffer_size: usize,
    /// CSV bytes staged before they are written out
    pub output_buffer_size: usize,
    /// Row written verbatim before the data
    pub csv_header: Option<String>,
    /// Prefix every row with its acquisition time in seconds
    pub time_column: bool,
    /// Digits after the decimal point for the time column
    pub time_precision: u8,
    /// Entries per row, overriding the header format's layout
    pub channels: Option<usize>,
}

impl ConvertOptions {
    pub const DEFAULT_PRECISION: u8 = 3;
    pub const DEFAULT_TIME_PRECISION: u8 = 6;
    pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 10_000_000;
    pub const DEFAULT_OUTPUT_BUFFER_SIZE: usize = 200_000_000;
    /// Must hold at least one sample entry of the widest type
    pub const MIN_INPUT_BUFFER_SIZE: usize = 8;
    pub const MIN_OUTPUT_BUFFER_SIZE: usize = 256;

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_buffer_sizes(mut self, input: usize, output: usize) -> Self {
        self.input_buffer_size = input;
        self.output_buffer_size = output;
        self
    }

    pub fn with_csv_header(mut self, header: impl Into<String>) -> Self {
        self.csv_header = Some(header.into());
        self
    }

    pub fn with_time_column(mut self, precision: u8) -> Self {
        self.time_column = true;
        self.time_precision = precision;
        self
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(DlogError::InvalidConfig(format!(
                "precision {} exceeds the maximum of {}",
                self.precision, MAX_PRECISION
            )));
        }

        if self.time_column && self.time_precision > MAX_PRECISION {
            return Err(DlogError::InvalidConfig(format!(
                "time precision {} exceeds the maximum of {}",
                self.time_precision, MAX_PRECISION
            )));
        }

        if self.input_buffer_size < Self::MIN_INPUT_BUFFER_SIZE {
            return Err(DlogError::InvalidConfig(format!(
                "input buffer of {} bytes is below the minimum of {}",
                self.input_buffer_size,
                Self::MIN_INPUT_BUFFER_SIZE
            )));
        }

        if self.output_buffer_size < Self::MIN_OUTPUT_BUFFER_SIZE {
            return Err(DlogError::InvalidConfig(format!(
                "output buffer of {} bytes is below the minimum of {}",
                self.output_buffer_size,
                Self::MIN_OUTPUT_BUFFER_SIZE
            )));
        }

        if self.channels == Some(0) {
            return Err(DlogError::InvalidConfig("channel count must be at least 1".into()));
        }

        if let Some(header) = &self.csv_header {
            if header.contains('\n') {
                return Err(DlogError::InvalidConfig("CSV header must be a single line".into()));
            }
        }

        Ok(())
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            precision: Self::DEFAULT_PRECISION,
            input_buffer_size: Self::DEFAULT_INPUT_BUFFER_SIZE,
            output_buffer_size: Self::DEFAULT_OUTPUT_BUFFER_SIZE,
            csv_header: None,
            time_column: false,
            time_precision: Self::DEFAULT_TIME_PRECISION,
            channels: None,
        }
    }
}
