//! Host audio framework contract
//!
//! Types describing what a codec offers to the framework (DAI and component
//! descriptors) and the operations the framework calls back into ([`DaiOps`]).
//! The framework side of registration is the [`ComponentRegistrar`] trait.

use crate::controls::MixerControl;

/// Who drives the bit clock and frame clock on the DAI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockRole {
    /// Codec drives both bit clock and frame clock.
    CodecMaster,
    /// Codec receives both bit clock and frame clock.
    CodecSlave,
    /// Codec drives the bit clock, receives the frame clock.
    CodecBitclockMaster,
    /// Codec drives the frame clock, receives the bit clock.
    CodecFrameMaster,
}

/// Serial frame format on the DAI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameFormat {
    /// Philips I²S
    I2s,
    /// Left-justified
    LeftJustified,
    /// Right-justified
    RightJustified,
    /// DSP mode A (data one bit clock after frame sync)
    DspA,
    /// DSP mode B (data on frame sync)
    DspB,
    /// AC'97 link
    Ac97,
    /// Pulse-density modulation
    Pdm,
}

/// DAI format negotiated by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DaiFormat {
    /// Frame format
    pub format: FrameFormat,
    /// Clocking role of the codec
    pub role: ClockRole,
}

impl DaiFormat {
    /// Build a format descriptor.
    pub const fn new(format: FrameFormat, role: ClockRole) -> Self {
        Self { format, role }
    }
}

/// Direction of a PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamDirection {
    /// Host → codec
    Playback,
    /// Codec → host
    Capture,
}

/// PCM sample encodings a DAI can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PcmFormat {
    /// Signed 16-bit little endian
    S16Le,
    /// Signed 24-bit little endian (in a 32-bit container)
    S24Le,
    /// Signed 32-bit little endian
    S32Le,
    /// Direct Stream Digital, 8 one-bit samples per byte
    DsdU8,
    /// Direct Stream Digital, 16 one-bit samples per word, little endian
    DsdU16Le,
}

impl PcmFormat {
    /// Significant sample width in bits, as reported to the codec.
    pub const fn width(self) -> u8 {
        match self {
            Self::S16Le | Self::DsdU16Le => 16,
            Self::S24Le => 24,
            Self::S32Le => 32,
            Self::DsdU8 => 8,
        }
    }
}

/// Continuous rate list covered by the framework's 8 kHz–192 kHz rate mask.
pub const STANDARD_RATES: [u32; 12] = [
    8_000, 11_025, 16_000, 22_050, 32_000, 44_100, 48_000, 64_000, 88_200, 96_000, 176_400,
    192_000,
];

/// Hardware parameters for one stream, as handed to [`DaiOps::hw_params`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HwParams {
    /// Sample rate in Hz
    pub rate: u32,
    /// Significant sample width in bits
    pub width: u8,
    /// Channel count
    pub channels: u8,
}

impl HwParams {
    /// Parameters for `format` at `rate` with `channels` channels.
    pub const fn new(rate: u32, format: PcmFormat, channels: u8) -> Self {
        Self {
            rate,
            width: format.width(),
            channels,
        }
    }
}

/// Capabilities of one stream direction of a DAI.
#[derive(Debug, Clone, Copy)]
pub struct PcmStreamCaps {
    /// Stream name as shown by the framework
    pub stream_name: &'static str,
    /// Minimum channel count
    pub channels_min: u8,
    /// Maximum channel count
    pub channels_max: u8,
    /// Lowest supported rate (Hz)
    pub rate_min: u32,
    /// Highest supported rate (Hz)
    pub rate_max: u32,
    /// Discrete rates advertised in the rate mask
    pub rates: &'static [u32],
    /// Supported sample encodings
    pub formats: &'static [PcmFormat],
}

impl PcmStreamCaps {
    /// Whether `rate` is one of the advertised rates.
    pub fn supports_rate(&self, rate: u32) -> bool {
        (self.rate_min..=self.rate_max).contains(&rate) && self.rates.contains(&rate)
    }

    /// Whether `format` is advertised.
    pub fn supports_format(&self, format: PcmFormat) -> bool {
        self.formats.contains(&format)
    }

    /// Whether `channels` lies within the advertised range.
    pub fn supports_channels(&self, channels: u8) -> bool {
        (self.channels_min..=self.channels_max).contains(&channels)
    }
}

/// DAI descriptor registered with the framework.
#[derive(Debug, Clone, Copy)]
pub struct DaiDriver {
    /// DAI name
    pub name: &'static str,
    /// Playback capabilities (the only direction a DAC offers)
    pub playback: PcmStreamCaps,
}

/// Component descriptor registered with the framework.
#[derive(Debug, Clone, Copy)]
pub struct ComponentDriver {
    /// Component name
    pub name: &'static str,
    /// Mixer controls exposed to user space
    pub controls: &'static [MixerControl],
    /// Keep the bias at standby while idle instead of powering off
    pub idle_bias_on: bool,
    /// Delay power-down after the stream stops
    pub use_pmdown_time: bool,
    /// Sample endianness is handled by the codec
    pub endianness: bool,
}

/// Power level requested by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BiasLevel {
    /// Powered off
    Off,
    /// Low-power standby
    Standby,
    /// About to start a stream
    Prepare,
    /// Fully on
    On,
}

/// Callbacks the framework makes into a codec DAI.
///
/// The framework serialises these calls per device instance; `&mut self`
/// encodes the same guarantee.
pub trait DaiOps {
    /// Error type
    type Error: core::fmt::Debug;

    /// Negotiate clocking role and frame format.
    fn set_fmt(&mut self, fmt: DaiFormat) -> Result<(), Self::Error>;

    /// Program rate, width and channel count for a stream.
    fn hw_params(&mut self, params: &HwParams) -> Result<(), Self::Error>;

    /// Mute or unmute the stream in `direction`.
    fn mute_stream(&mut self, mute: bool, direction: StreamDirection) -> Result<(), Self::Error>;
}

/// Framework side of codec registration.
pub trait ComponentRegistrar {
    /// Error type
    type Error: core::fmt::Debug;

    /// Register a component and its DAIs.
    fn register_component(
        &mut self,
        component: &ComponentDriver,
        dais: &[DaiDriver],
    ) -> Result<(), Self::Error>;
}

/// How the platform identified a device on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMatch<'a> {
    /// Legacy I²C device id
    I2cId(&'a str),
    /// Platform-description compatible string
    Compatible(&'a str),
}

/// Identifiers a driver binds to.
#[derive(Debug, Clone, Copy)]
pub struct MatchTable {
    /// I²C device ids
    pub i2c_ids: &'static [&'static str],
    /// Compatible strings
    pub compatible: &'static [&'static str],
}

impl MatchTable {
    /// Whether `device` is handled by this table.
    pub fn matches(&self, device: DeviceMatch<'_>) -> bool {
        match device {
            DeviceMatch::I2cId(id) => self.i2c_ids.contains(&id),
            DeviceMatch::Compatible(compat) => self.compatible.contains(&compat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPS: PcmStreamCaps = PcmStreamCaps {
        stream_name: "Playback",
        channels_min: 2,
        channels_max: 2,
        rate_min: 8_000,
        rate_max: 192_000,
        rates: &STANDARD_RATES,
        formats: &[PcmFormat::S16Le, PcmFormat::S32Le],
    };

    #[test]
    fn hw_params_takes_width_from_format() {
        assert_eq!(HwParams::new(48_000, PcmFormat::S24Le, 2).width, 24);
        assert_eq!(HwParams::new(48_000, PcmFormat::DsdU16Le, 2).width, 16);
        assert_eq!(HwParams::new(48_000, PcmFormat::DsdU8, 2).width, 8);
    }

    #[test]
    fn stream_caps_rate_check_uses_rate_list() {
        assert!(CAPS.supports_rate(44_100));
        assert!(CAPS.supports_rate(192_000));
        assert!(!CAPS.supports_rate(44_000));
        assert!(!CAPS.supports_rate(384_000));
    }

    #[test]
    fn stream_caps_channel_and_format_checks() {
        assert!(CAPS.supports_channels(2));
        assert!(!CAPS.supports_channels(1));
        assert!(CAPS.supports_format(PcmFormat::S16Le));
        assert!(!CAPS.supports_format(PcmFormat::DsdU8));
    }

    #[test]
    fn match_table_distinguishes_id_kinds() {
        let table = MatchTable {
            i2c_ids: &["codec"],
            compatible: &["vendor,codec"],
        };
        assert!(table.matches(DeviceMatch::I2cId("codec")));
        assert!(table.matches(DeviceMatch::Compatible("vendor,codec")));
        assert!(!table.matches(DeviceMatch::I2cId("vendor,codec")));
        assert!(!table.matches(DeviceMatch::Compatible("codec")));
    }
}
