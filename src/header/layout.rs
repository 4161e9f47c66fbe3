// src/header/layout.rs

/// How the raw entries of a given header `format`/`revision` map onto CSV rows.
///
/// Entries are interleaved channel by channel: with `channels == 3` the
/// entries `e0 e1 e2 e3 ...` become rows `e0,e1,e2` / `e3,...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLayout {
    /// Raw entries are two's complement integers
    pub signed: bool,
    /// Entries per CSV row
    pub channels: usize,
}

/// Recognised `(format, revision)` pairs and their sample layout.
const KNOWN_LAYOUTS: &[((u16, u32), SampleLayout)] = &[(
    (1, 1),
    SampleLayout { signed: true, channels: 1 },
)];

impl SampleLayout {
    pub const SINGLE_CHANNEL: SampleLayout = SampleLayout { signed: true, channels: 1 };

    /// Look up the layout for a header variant, `None` if the variant is not supported
    pub fn lookup(format: u16, revision: u32) -> Option<Self> {
        KNOWN_LAYOUTS
            .iter()
            .find(|(key, _)| *key == (format, revision))
            .map(|(_, layout)| *layout)
    }

    pub fn is_supported(format: u16, revision: u32) -> bool {
        Self::lookup(format, revision).is_some()
    }

    /// Same layout with a different number of entries per row
    pub fn with_channels(self, channels: usize) -> Self {
        SampleLayout { channels, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_layout() {
        let layout = SampleLayout::lookup(1, 1).unwrap();
        assert!(layout.signed);
        assert_eq!(layout.channels, 1);
        assert_eq!(layout, SampleLayout::SINGLE_CHANNEL);
    }

    #[test]
    fn test_unknown_layouts() {
        assert!(!SampleLayout::is_supported(0, 0));
        assert!(!SampleLayout::is_supported(1, 2));
        assert!(!SampleLayout::is_supported(2, 1));
    }

    #[test]
    fn test_with_channels_keeps_signedness() {
        let layout = SampleLayout::SINGLE_CHANNEL.with_channels(4);
        assert_eq!(layout.channels, 4);
        assert!(layout.signed);
    }
}
