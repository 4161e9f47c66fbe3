// src/converter/dlog_converter.rs
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::converter::{ConvertOptions, ConvertSummary};
use crate::error::{DlogError, Result};
use crate::header::{parse_header, HeaderInfo};
use crate::raw_data::{InputBuffer, OutputBuffer, SampleDecoder};
use crate::types::ConvertStatus;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::io::Cursor;

/// Converts dlog files to CSV.
///
/// A converter owns its input and output buffers. They are allocated on the
/// first conversion and reused for every later file, so one converter should
/// be kept around when converting many files.
#[derive(Debug)]
pub struct DlogConverter {
    options: ConvertOptions,
    input: Option<InputBuffer>,
    output: Option<OutputBuffer>,
}

/// Constructors and file-level entry points
impl DlogConverter {
    /// Converter with [`ConvertOptions::default`]
    pub fn new() -> Self {
        DlogConverter {
            options: ConvertOptions::default(),
            input: None,
            output: None,
        }
    }

    pub fn with_options(options: ConvertOptions) -> Result<Self> {
        options.validate()?;
        Ok(DlogConverter {
            options,
            input: None,
            output: None,
        })
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the dlog file at `input` into a CSV file at `output`.
    ///
    /// The output file is only created once the input header has been
    /// validated.
    pub fn convert_file(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<ConvertSummary> {
        let input = input.as_ref();
        let output = output.as_ref();

        let mut reader = File::open(input).map_err(|e| DlogError::file_open(input, e))?;
        let header = parse_header(&mut reader)?;
        let mut writer = File::create(output).map_err(|e| DlogError::file_open(output, e))?;

        debug!(input = %input.display(), output = %output.display(), "Converting dlog file");
        self.convert_samples(&mut reader, &mut writer, &header)
    }

    /// Like [`convert_file`](Self::convert_file) but reads the input through
    /// a memory map.
    #[cfg(feature = "mmap")]
    pub fn convert_file_mmap(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<ConvertSummary> {
        let input = input.as_ref();
        let output = output.as_ref();

        let file = File::open(input).map_err(|e| DlogError::file_open(input, e))?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| DlogError::file_open(input, e))?;
        let mut reader = Cursor::new(&mmap[..]);

        let header = parse_header(&mut reader)?;
        let mut writer = File::create(output).map_err(|e| DlogError::file_open(output, e))?;

        debug!(input = %input.display(), output = %output.display(), "Converting memory-mapped dlog file");
        self.convert_samples(&mut reader, &mut writer, &header)
    }

    /// Convert a file and report only the status code.
    pub fn convert_file_status(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> ConvertStatus {
        let input = input.as_ref();
        match self.convert_file(input, output) {
            Ok(_) => ConvertStatus::Ok,
            Err(e) => {
                warn!(input = %input.display(), error = %e, "Conversion failed");
                e.status()
            }
        }
    }
}

/// Stream-level conversion
impl DlogConverter {
    /// Parse the header at the start of `reader` and convert the samples
    /// that follow it.
    pub fn convert<R: Read, W: Write>(
        &mut self,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<ConvertSummary> {
        let header = parse_header(reader)?;
        self.convert_samples(reader, writer, &header)
    }

    /// Convert the samples of an already parsed header.
    ///
    /// `reader` must be positioned at the first sample byte. Conversion stops
    /// after `header.sample_count` samples or at end of stream, whichever
    /// comes first; a short stream is not an error.
    pub fn convert_samples<R: Read, W: Write>(
        &mut self,
        reader: &mut R,
        writer: &mut W,
        header: &HeaderInfo,
    ) -> Result<ConvertSummary> {
        header.validate()?;

        let DlogConverter { options, input, output } = self;

        let mut layout = header.layout().ok_or_else(|| {
            DlogError::InvalidHeader(format!(
                "unsupported format {} revision {}",
                header.format, header.revision
            ))
        })?;
        if let Some(channels) = options.channels {
            layout = layout.with_channels(channels);
        }
        let channels = layout.channels as u64;

        let timing = if options.time_column {
            let period = header.sample_period_secs().ok_or_else(|| {
                DlogError::InvalidHeader("time column requested but the sample rate is undefined".into())
            })?;
            let delay = header.first_sample_delay_secs().unwrap_or(0.0);
            Some((period, delay))
        } else {
            None
        };

        let decoder = SampleDecoder::new(header.sample_width, header.endian, layout.signed);
        let width = decoder.width();
        let units = header.voltage_units as f64;
        let precision = options.precision;

        let input = input.get_or_insert_with(|| InputBuffer::with_capacity(options.input_buffer_size));
        let output = output.get_or_insert_with(|| OutputBuffer::with_capacity(options.output_buffer_size));
        input.reset();
        output.reset();

        if let Some(csv_header) = &options.csv_header {
            writer.write_all(csv_header.as_bytes())?;
            writer.write_all(b"\n")?;
        }

        let declared = header.sample_count;
        let mut written: u64 = 0;
        let mut end_of_stream = false;

        while written < declared {
            let read = input.fill(reader)?;
            if read == 0 {
                end_of_stream = true;
                break;
            }

            let records = input.take_records(width, declared - written);
            for record in records.chunks_exact(width) {
                let column = written % channels;

                if column == 0 {
                    if let Some((period, delay)) = timing {
                        let row = written / channels;
                        let time = delay + header.start_index.saturating_add(row) as f64 * period;
                        output.push_field(time, options.time_precision, b',', writer)?;
                    }
                }

                let terminator = if column + 1 == channels { b'\n' } else { b',' };
                output.push_field(decoder.scaled(record, units), precision, terminator, writer)?;
                written += 1;
            }

            trace!(read, written, pending = input.pending(), "Converted chunk");
        }

        // Close a row cut short by the end of the data
        if written % channels != 0 {
            output.push_byte(b'\n', writer)?;
        }

        output.flush(writer)?;
        writer.flush()?;

        let trailing_bytes = if end_of_stream { input.pending() } else { 0 };
        if trailing_bytes > 0 {
            warn!(trailing_bytes, width, "Discarding incomplete sample at end of stream");
        }
        if written < declared {
            warn!(declared, written, "Stream ended before the declared sample count");
        }

        let rows_written = written.div_ceil(channels);
        debug!(
            samples = written,
            rows = rows_written,
            bytes = output.bytes_flushed(),
            "Conversion finished"
        );

        Ok(ConvertSummary {
            declared_samples: declared,
            samples_written: written,
            rows_written,
            trailing_bytes,
            header: header.clone(),
        })
    }
}

impl Default for DlogConverter {
    fn default() -> Self {
        Self::new()
    }
}
