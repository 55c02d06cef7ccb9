use core::fmt;

/// Bits per conversion result
pub const DATA_BITS: u32 = 24;
/// Largest positive conversion result
pub const MAX_VALUE: u32 = 0x7F_FFFF;
/// Most negative conversion result, as a raw code
pub const MIN_VALUE: u32 = 0x80_0000;

/// Readiness wait gives up after 5 s
pub const READY_TIMEOUT_US: u32 = 5_000_000;
/// Sleep between DOUT polls during the readiness wait
pub const READY_POLL_US: u32 = 100;
/// PD_SCK high for more than 60 us puts the chip to sleep
pub const SLEEP_DELAY_US: u32 = 80;
/// Each PD_SCK half period, must stay between 0.2 and 50 us
pub const PULSE_WIDTH_NS: u32 = 1_000;

/// Input channel and gain for the next conversion.
///
/// The discriminant is the number of PD_SCK pulses sent after the 24 data
/// bits, which is how the chip latches the setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    A128 = 1,
    B32 = 2,
    A64 = 3,
}

impl Selection {
    /// Trailing pulses that program this selection
    pub fn pulses(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Selection::A128 | Selection::A64 => "A",
            Selection::B32 => "B",
        }
    }

    pub fn gain(&self) -> u8 {
        match self {
            Selection::A128 => 128,
            Selection::A64 => 64,
            Selection::B32 => 32,
        }
    }

    /// Maps a raw pulse code back to its selection
    pub fn from_pulses(code: u8) -> Option<Self> {
        match code {
            1 => Some(Selection::A128),
            2 => Some(Selection::B32),
            3 => Some(Selection::A64),
            _ => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel {}, gain={}", self.label(), self.gain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_table() {
        let table = [
            (Selection::A128, 1, "A", 128),
            (Selection::A64, 3, "A", 64),
            (Selection::B32, 2, "B", 32),
        ];
        for (selection, pulses, label, gain) in table {
            assert_eq!(selection.pulses(), pulses);
            assert_eq!(selection.label(), label);
            assert_eq!(selection.gain(), gain);
        }
        assert_eq!(Selection::default(), Selection::A128);
    }

    #[test]
    fn codes() {
        for code in 1..=3u8 {
            assert_eq!(Selection::from_pulses(code).map(|s| s.pulses()), Some(code));
        }
        for code in [0u8, 4, 25, 128, 255] {
            assert_eq!(Selection::from_pulses(code), None);
        }
    }
}
