//! DAI and component descriptors registered with the host framework.

use platform::audio::STANDARD_RATES;
use platform::{ComponentDriver, DaiDriver, DeviceMatch, MatchTable, PcmFormat, PcmStreamCaps};

use crate::controls::CONTROLS;

/// DAI and component name.
pub const NAME: &str = "es9038q2m";

/// Platform-description compatible string.
pub const COMPATIBLE: &str = "ess,es9038q2m";

/// Sample encodings accepted on the playback stream.
pub const FORMATS: [PcmFormat; 5] = [
    PcmFormat::S16Le,
    PcmFormat::S24Le,
    PcmFormat::S32Le,
    PcmFormat::DsdU8,
    PcmFormat::DsdU16Le,
];

/// Playback stream: stereo, 8 kHz to 192 kHz.
pub const PLAYBACK: PcmStreamCaps = PcmStreamCaps {
    stream_name: "Playback",
    channels_min: 2,
    channels_max: 2,
    rate_min: 8_000,
    rate_max: 192_000,
    rates: &STANDARD_RATES,
    formats: &FORMATS,
};

/// The codec's single DAI.
pub const DAI: DaiDriver = DaiDriver {
    name: NAME,
    playback: PLAYBACK,
};

/// Component descriptor.
pub const COMPONENT: ComponentDriver = ComponentDriver {
    name: NAME,
    controls: &CONTROLS,
    idle_bias_on: true,
    use_pmdown_time: true,
    endianness: true,
};

/// Identifiers the driver binds to.
pub const MATCH_TABLE: MatchTable = MatchTable {
    i2c_ids: &[NAME],
    compatible: &[COMPATIBLE],
};

/// Whether `device` should be handled by this driver.
pub fn matches(device: DeviceMatch<'_>) -> bool {
    MATCH_TABLE.matches(device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_by_id_and_compatible() {
        assert!(matches(DeviceMatch::I2cId("es9038q2m")));
        assert!(matches(DeviceMatch::Compatible("ess,es9038q2m")));
        assert!(!matches(DeviceMatch::Compatible("ess,es9028q2m")));
    }

    #[test]
    fn playback_is_stereo_only() {
        assert!(PLAYBACK.supports_channels(2));
        assert!(!PLAYBACK.supports_channels(1));
        assert!(!PLAYBACK.supports_channels(8));
    }

    #[test]
    fn playback_rate_span() {
        assert!(PLAYBACK.supports_rate(8_000));
        assert!(PLAYBACK.supports_rate(44_100));
        assert!(PLAYBACK.supports_rate(192_000));
        assert!(!PLAYBACK.supports_rate(384_000));
    }

    #[test]
    fn playback_accepts_dsd() {
        assert!(PLAYBACK.supports_format(PcmFormat::DsdU8));
        assert!(PLAYBACK.supports_format(PcmFormat::DsdU16Le));
    }

    #[test]
    fn component_flags() {
        assert!(COMPONENT.idle_bias_on);
        assert!(COMPONENT.use_pmdown_time);
        assert!(COMPONENT.endianness);
        assert_eq!(COMPONENT.controls.len(), 2);
    }
}
