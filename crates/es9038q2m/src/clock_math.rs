//! NCO ratio calculation for the ES9038Q2M master-mode clock generator.
//!
//! In master mode the chip derives BCLK/LRCLK from its reference clock
//! (MCLK) through a 32-bit numerically controlled oscillator. The NCO
//! register holds the sample rate as a fraction of the reference clock:
//!
//!   NCO = round(fs x 2^32 / MCLK)   (mod 2^32)
//!
//! # Worked Example
//!
//! Reference clock 49.152 MHz (256 x 192 kHz), fs = 44.1 kHz:
//!
//!   44 100 x 4 294 967 296 / 49 152 000 = 3 853 516.8
//!   NCO = 3 853 517 = 0x003A_CCCD
//!
//! Bytes go out most significant first: NCO_4 = 0x00, NCO_3 = 0x3A,
//! NCO_2 = 0xCC, NCO_1 = 0xCD.
//!
//! Integer-only: the product needs 51 bits at 192 kHz, so the division is
//! done in `u128` and cannot overflow.
//!
//! References:
//! - ES9038Q2M datasheet, registers 34-37 (NCO)

use crate::registers::{REG_NCO_1, REG_NCO_2, REG_NCO_3, REG_NCO_4};

/// Common reference clock: 256 x 192 kHz.
pub const MCLK_49M152_HZ: u32 = 49_152_000;

/// 44.1 kHz-family reference clock: 512 x 44.1 kHz.
pub const MCLK_22M5792_HZ: u32 = 22_579_200;

/// NCO registers in write order, most significant byte first.
pub const NCO_WRITE_ORDER: [u8; 4] = [REG_NCO_4, REG_NCO_3, REG_NCO_2, REG_NCO_1];

/// NCO ratio for `rate_hz` against a `clock_hz` reference, rounded to nearest.
///
/// Ratios of 2^32 and above wrap, as the register is 32 bits wide.
/// Returns `None` for a zero reference clock.
pub fn nco_ratio(rate_hz: u32, clock_hz: u32) -> Option<u32> {
    if clock_hz == 0 {
        return None;
    }
    let clock = u128::from(clock_hz);
    // (rate << 32) + clock / 2 < 2^65; the quotient is reduced mod 2^32.
    #[allow(clippy::arithmetic_side_effects)]
    let rounded = ((u128::from(rate_hz) << 32) + clock / 2) / clock;
    #[allow(clippy::cast_possible_truncation)]
    Some(rounded as u32)
}

/// NCO bytes paired with their registers, in write order.
pub fn nco_writes(ratio: u32) -> [(u8, u8); 4] {
    let [b3, b2, b1, b0] = ratio.to_be_bytes();
    [
        (REG_NCO_4, b3),
        (REG_NCO_3, b2),
        (REG_NCO_2, b1),
        (REG_NCO_1, b0),
    ]
}

/// Sample rate the chip actually produces for `ratio`, in mHz.
///
/// Truncated toward zero.
pub fn effective_rate_millihertz(ratio: u32, clock_hz: u32) -> u64 {
    // ratio < 2^32, clock < 2^32, x1000 < 2^10: fits in u128 without overflow.
    #[allow(clippy::arithmetic_side_effects)]
    let millihertz = (u128::from(ratio) * u128::from(clock_hz) * 1000) >> 32;
    u64::try_from(millihertz).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nco_44k1_rounds_up() {
        // 3 853 516.8 rounds to 3 853 517, truncation would give ...516
        assert_eq!(nco_ratio(44_100, MCLK_49M152_HZ), Some(3_853_517));
        assert_eq!(nco_ratio(44_100, MCLK_49M152_HZ), Some(0x003A_CCCD));
    }

    #[test]
    fn nco_48k_family_is_exact_power_of_two() {
        assert_eq!(nco_ratio(48_000, MCLK_49M152_HZ), Some(0x0040_0000));
        assert_eq!(nco_ratio(96_000, MCLK_49M152_HZ), Some(0x0080_0000));
        assert_eq!(nco_ratio(192_000, MCLK_49M152_HZ), Some(0x0100_0000));
    }

    #[test]
    fn nco_8k_rounds_up() {
        assert_eq!(nco_ratio(8_000, MCLK_49M152_HZ), Some(699_051));
    }

    #[test]
    fn nco_44k1_against_44k1_family_clock() {
        assert_eq!(nco_ratio(44_100, MCLK_22M5792_HZ), Some(0x0080_0000));
    }

    #[test]
    fn nco_zero_clock_is_rejected() {
        assert_eq!(nco_ratio(48_000, 0), None);
    }

    #[test]
    fn nco_wraps_when_rate_exceeds_clock() {
        // 2 x 2^32 mod 2^32
        assert_eq!(nco_ratio(192_000, 96_000), Some(0));
        assert_eq!(nco_ratio(u32::MAX, 1), Some(0));
    }

    #[test]
    fn nco_writes_are_msb_first() {
        assert_eq!(
            nco_writes(0x003A_CCCD),
            [(0x25, 0x00), (0x24, 0x3A), (0x23, 0xCC), (0x22, 0xCD)]
        );
        assert_eq!(
            nco_writes(0).map(|(reg, _)| reg),
            NCO_WRITE_ORDER
        );
    }

    #[test]
    fn effective_rate_for_exact_ratio() {
        assert_eq!(effective_rate_millihertz(0x0040_0000, MCLK_49M152_HZ), 48_000_000);
    }

    #[test]
    fn effective_rate_error_for_rounded_ratio_is_small() {
        let ratio = nco_ratio(44_100, MCLK_49M152_HZ).unwrap_or(0);
        let actual = effective_rate_millihertz(ratio, MCLK_49M152_HZ);
        // |error| < half an NCO step (~5.7 mHz)
        assert!(actual.abs_diff(44_100_000) < 10);
    }
}
