//! Mixer controls backed by register fields
//!
//! A [`MixerControl`] maps a user-visible value (0..=`max`) onto a bit field
//! in one register (mono) or a pair of registers (stereo), optionally
//! inverted, optionally with a linear dB scale attached.

use heapless::Vec;
use thiserror_no_std::Error;

use crate::regmap::{RegisterMap, RegmapError};

/// TLV type tag for a linear dB scale.
pub const TLV_DB_SCALE: u32 = 1;

/// Mute flag in the second TLV word of a dB scale.
const TLV_DB_SCALE_MUTE: u32 = 0x1_0000;

/// Linear dB scale of a volume control.
///
/// `min` and `step` are in 0.01 dB units. With `mute_avail`, the lowest
/// value means "muted" rather than `min` dB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DbScale {
    /// Gain at control value 0, in 0.01 dB
    pub min: i32,
    /// Gain increment per control step, in 0.01 dB
    pub step: u16,
    /// Whether the lowest value mutes
    pub mute_avail: bool,
}

impl DbScale {
    /// Gain at `value`, in 0.01 dB.
    pub fn db_at(&self, value: u8) -> i32 {
        let offset = i32::from(self.step).saturating_mul(i32::from(value));
        self.min.saturating_add(offset)
    }

    /// TLV container words: type, byte length, min, step | mute flag.
    pub fn to_tlv(&self) -> [u32; 4] {
        let mut step = u32::from(self.step);
        if self.mute_avail {
            step |= TLV_DB_SCALE_MUTE;
        }
        [TLV_DB_SCALE, 8, u32::from_ne_bytes(self.min.to_ne_bytes()), step]
    }
}

/// Register(s) a control lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlRegs {
    /// One channel, one register
    Mono(u8),
    /// Two channels, one register each
    Stereo {
        /// Left channel register
        left: u8,
        /// Right channel register
        right: u8,
    },
}

/// Per-channel control values.
pub type ControlValues = Vec<u8, 2>;

/// Control access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError<E> {
    /// A value exceeds the control's maximum.
    #[error("control value {value} exceeds maximum {max}")]
    InvalidValue {
        /// Offending value
        value: u8,
        /// Control maximum
        max: u8,
    },
    /// Number of values does not match the channel count.
    #[error("expected {expected} control values, got {got}")]
    ChannelCount {
        /// Channels of the control
        expected: usize,
        /// Values supplied
        got: usize,
    },
    /// Register access failed.
    #[error("register access failed")]
    Regmap(RegmapError<E>),
}

impl<E> From<RegmapError<E>> for ControlError<E> {
    fn from(err: RegmapError<E>) -> Self {
        Self::Regmap(err)
    }
}

/// A mixer control mapped onto register bit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixerControl {
    /// Control name as shown to user space
    pub name: &'static str,
    /// Backing register(s)
    pub regs: ControlRegs,
    /// Bit position of the field
    pub shift: u8,
    /// Largest control value; the field spans the bits needed to hold it
    pub max: u8,
    /// Register holds `max - value`
    pub invert: bool,
    /// dB scale, for volume controls
    pub tlv: Option<DbScale>,
}

impl MixerControl {
    /// A single-register switch or level.
    pub const fn single(name: &'static str, reg: u8, shift: u8, max: u8, invert: bool) -> Self {
        Self {
            name,
            regs: ControlRegs::Mono(reg),
            shift,
            max,
            invert,
            tlv: None,
        }
    }

    /// A stereo level with left and right in separate registers.
    pub const fn double_r(
        name: &'static str,
        left: u8,
        right: u8,
        shift: u8,
        max: u8,
        invert: bool,
        tlv: DbScale,
    ) -> Self {
        Self {
            name,
            regs: ControlRegs::Stereo { left, right },
            shift,
            max,
            invert,
            tlv: Some(tlv),
        }
    }

    /// Number of channels.
    pub const fn channels(&self) -> usize {
        match self.regs {
            ControlRegs::Mono(_) => 1,
            ControlRegs::Stereo { .. } => 2,
        }
    }

    /// Register field mask.
    ///
    /// Covers every bit `max` occupies, so a `max` that is not `2^n - 1`
    /// still gets a field of full width.
    pub fn mask(&self) -> u8 {
        let width = u8::BITS.saturating_sub(self.max.leading_zeros());
        let field = u8::MAX
            .checked_shr(u8::BITS.saturating_sub(width))
            .unwrap_or(0);
        field.checked_shl(u32::from(self.shift)).unwrap_or(0)
    }

    /// Read the current control values.
    pub fn get<M: RegisterMap>(&self, map: &mut M) -> Result<ControlValues, ControlError<M::Error>> {
        let mut values = ControlValues::new();
        for reg in self.registers() {
            let raw = map.read(reg)? & self.mask();
            let field = raw.checked_shr(u32::from(self.shift)).unwrap_or(0);
            let value = if self.invert {
                self.max.saturating_sub(field)
            } else {
                field
            };
            // Capacity matches the largest channel count.
            let _ = values.push(value);
        }
        Ok(values)
    }

    /// Write control values, one per channel.
    ///
    /// Every value is validated before the first register is touched.
    /// Returns whether any register changed.
    pub fn put<M: RegisterMap>(
        &self,
        map: &mut M,
        values: &[u8],
    ) -> Result<bool, ControlError<M::Error>> {
        if values.len() != self.channels() {
            return Err(ControlError::ChannelCount {
                expected: self.channels(),
                got: values.len(),
            });
        }
        if let Some(&value) = values.iter().find(|&&v| v > self.max) {
            return Err(ControlError::InvalidValue {
                value,
                max: self.max,
            });
        }

        let mut changed = false;
        for (reg, &value) in self.registers().zip(values) {
            let field = if self.invert {
                self.max.saturating_sub(value)
            } else {
                value
            };
            let bits = field.checked_shl(u32::from(self.shift)).unwrap_or(0);
            changed |= map.update_bits(reg, self.mask(), bits)?;
        }
        Ok(changed)
    }

    fn registers(&self) -> impl Iterator<Item = u8> {
        let (first, second) = match self.regs {
            ControlRegs::Mono(reg) => (reg, None),
            ControlRegs::Stereo { left, right } => (left, Some(right)),
        };
        core::iter::once(first).chain(second)
    }
}
