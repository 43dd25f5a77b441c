//! Validated audio and bus values.
//!
//! Each newtype rejects values the codec cannot be programmed with:
//! - `SampleRateHz`: validates the 8000–192000 Hz playback range
//! - `SampleWidth`: the three serial word lengths a codec can be programmed for
//! - `I2cAddr`: rejects I²C-reserved addresses

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── SampleRateHz ─────────────────────────────────────────────────────────────

/// Sample rate in Hz, validated to the playback range of the DAI.
///
/// Valid range: 8000–192000 Hz (8 kHz telephony to 192 kHz hi-res PCM).
/// DSD bit rates are not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct SampleRateHz(u32);

impl SampleRateHz {
    /// Minimum supported sample rate: 8000 Hz.
    pub const MIN_HZ: u32 = 8_000;

    /// Maximum supported sample rate: 192000 Hz.
    pub const MAX_HZ: u32 = 192_000;

    /// Create a `SampleRateHz`, returning an error if out of 8000–192000 Hz.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `hz < 8000` or `hz > 192000`.
    pub fn new(hz: u32) -> Result<Self, OutOfRangeError> {
        if (Self::MIN_HZ..=Self::MAX_HZ).contains(&hz) {
            Ok(Self(hz))
        } else {
            Err(OutOfRangeError {
                value: hz,
                min: Self::MIN_HZ,
                max: Self::MAX_HZ,
            })
        }
    }

    /// Return the sample rate in Hz.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

// ── SampleWidth ──────────────────────────────────────────────────────────────

/// Serial audio word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleWidth {
    /// 16-bit samples
    Bits16,
    /// 24-bit samples
    Bits24,
    /// 32-bit samples
    Bits32,
}

impl SampleWidth {
    /// Map a width in bits to a `SampleWidth`.
    ///
    /// Returns `None` for anything other than 16, 24 or 32.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            16 => Some(Self::Bits16),
            24 => Some(Self::Bits24),
            32 => Some(Self::Bits32),
            _ => None,
        }
    }

    /// Width in bits.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Bits16 => 16,
            Self::Bits24 => 24,
            Self::Bits32 => 32,
        }
    }
}

// ── I2cAddr ──────────────────────────────────────────────────────────────────

/// 7-bit I²C address of a codec.
///
/// 0x00–0x07 (general call, CBUS, high-speed master codes) and 0x78–0x7F
/// (10-bit addressing, device ID) are reserved by the bus and never name a
/// codec.
///
/// ```rust
/// use platform::audio_types::I2cAddr;
///
/// let dac = I2cAddr::try_new(0x48).unwrap();
/// assert_eq!(dac.get(), 0x48);
/// assert!(I2cAddr::try_new(0x7A).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct I2cAddr(u8);

impl I2cAddr {
    /// First usable address.
    pub const FIRST: u8 = 0x08;
    /// Last usable address.
    pub const LAST: u8 = 0x77;

    /// Wrap a board-fixed address as-is.
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr)
    }

    /// Wrap `addr` if it is outside the reserved ranges.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] for 0x00–0x07 and 0x78–0xFF.
    pub fn try_new(addr: u8) -> Result<Self, OutOfRangeError> {
        if (Self::FIRST..=Self::LAST).contains(&addr) {
            Ok(Self(addr))
        } else {
            Err(OutOfRangeError {
                value: u32::from(addr),
                min: u32::from(Self::FIRST),
                max: u32::from(Self::LAST),
            })
        }
    }

    /// The raw 7-bit address.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_width_bits_round_trip_for_supported_widths() {
        for bits in [16u8, 24, 32] {
            assert_eq!(SampleWidth::from_bits(bits).map(SampleWidth::bits), Some(bits));
        }
    }

    #[test]
    fn sample_width_rejects_20_bit() {
        assert_eq!(SampleWidth::from_bits(20), None);
    }

    #[test]
    fn sample_rate_bounds_are_inclusive() {
        assert!(SampleRateHz::new(SampleRateHz::MIN_HZ).is_ok());
        assert!(SampleRateHz::new(SampleRateHz::MAX_HZ).is_ok());
        assert!(SampleRateHz::new(7_999).is_err());
        assert!(SampleRateHz::new(192_001).is_err());
    }
}
