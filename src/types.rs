// src/types.rs
use std::fmt;

/// Byte order of every multi-byte field after the first header byte,
/// and of the raw samples that follow the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Endianness {
    Little = 0,
    Big = 1,
}

impl Endianness {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Endianness::Little),
            1 => Some(Endianness::Big),
            _ => None,
        }
    }

    pub fn is_big_endian(&self) -> bool {
        matches!(self, Endianness::Big)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endianness::Little => "little",
            Endianness::Big => "big",
        }
    }
}

/// Why the logger stopped writing the file. Carried for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StopReason {
    Normal = 0,
    Forced = 1,
    Error = 2,
    Overflow = 3,
    Unknown = 4,
}

impl StopReason {
    /// Codes outside the documented range are reported as `Unknown`.
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => StopReason::Normal,
            1 => StopReason::Forced,
            2 => StopReason::Error,
            3 => StopReason::Overflow,
            _ => StopReason::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StopReason::Normal => "normal",
            StopReason::Forced => "forced",
            StopReason::Error => "error",
            StopReason::Overflow => "overflow",
            StopReason::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Width of one raw sample entry in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SampleWidth {
    W1 = 1,
    W2 = 2,
    W4 = 4,
    W8 = 8,
}

impl SampleWidth {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(SampleWidth::W1),
            2 => Some(SampleWidth::W2),
            4 => Some(SampleWidth::W4),
            8 => Some(SampleWidth::W8),
            _ => None,
        }
    }

    pub fn bytes(&self) -> usize {
        *self as usize
    }
}

/// Status code returned by the file-level entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ConvertStatus {
    Ok = 0,
    FileOpenError = 1,
    InvalidHeader = 2,
}

impl ConvertStatus {
    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ConvertStatus::Ok)
    }
}

impl fmt::Display for ConvertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConvertStatus::Ok => "ok",
            ConvertStatus::FileOpenError => "file open error",
            ConvertStatus::InvalidHeader => "invalid header",
        };
        write!(f, "{} ({})", name, self.code())
    }
}
