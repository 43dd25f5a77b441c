//! Mixer controls exposed by the codec.

use platform::{DbScale, MixerControl};

use crate::registers::{REG_FILTER_MUTE, REG_VOLUME1, REG_VOLUME2};

/// Attenuation scale: −127.5 dB to 0 dB in 0.5 dB steps, bottom step mutes.
pub const VOLUME_TLV: DbScale = DbScale {
    min: -12750,
    step: 50,
    mute_avail: true,
};

/// Stereo volume. The registers hold attenuation, so the control is inverted.
pub const MASTER_PLAYBACK_VOLUME: MixerControl = MixerControl::double_r(
    "Master Playback Volume",
    REG_VOLUME1,
    REG_VOLUME2,
    0,
    255,
    true,
    VOLUME_TLV,
);

/// Soft mute of both channels.
pub const MUTE_SWITCH: MixerControl = MixerControl::single("Mute Switch", REG_FILTER_MUTE, 0, 1, false);

/// Controls registered with the component.
pub const CONTROLS: [MixerControl; 2] = [MASTER_PLAYBACK_VOLUME, MUTE_SWITCH];
