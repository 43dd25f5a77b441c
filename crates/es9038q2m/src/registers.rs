//! ES9038Q2M register map
//!
//! Source: ESS Technology ES9038Q2M Datasheet v1.4
//! <https://www.esstech.com/wp-content/uploads/2022/09/ES9038Q2M-Datasheet-v1.4.pdf>
//!
//! # Key I²C Constraints
//!
//! ## Single-byte reads only
//! The ES9038Q2M does NOT support multi-byte sequential I²C reads. Every
//! register read is a separate `write_read` transaction that sends exactly
//! 1 address byte and reads back exactly 1 data byte. [`platform::I2cRegmap`]
//! never issues anything else.
//!
//! ## Configuration vs. status block
//! 0x00–0x3F are read/write configuration registers and are cached. 0x40 and
//! up (chip id, DPLL numerator, S/PDIF channel status, read-backs) are
//! read-only, change under the chip's own control, and always go to the bus.
//!
//! # I²C Address
//!
//! | ADDR pin | Address |
//! |----------|---------|
//! | GND      | `0x48`  |
//! | VDD      | `0x49`  |

use platform::{RegisterDef, RegmapConfig};

/// 7-bit I2C device address when ADDR pin is pulled low.
pub const I2C_ADDR_LOW: u8 = 0x48;
/// 7-bit I2C device address when ADDR pin is pulled high.
pub const I2C_ADDR_HIGH: u8 = 0x49;

// ---------------------------------------------------------------------------
// Register addresses: configuration
// ---------------------------------------------------------------------------

/// System register: bit 0 = soft reset
pub const REG_SYSTEM: u8 = 0x00;
/// Input selection: serial width \[7:6\], serial mode \[5:4\], auto select \[3:2\], input \[1:0\]
pub const REG_INPUT_SEL: u8 = 0x01;
/// Mixing, serial data and automute configuration
pub const REG_MIXING: u8 = 0x02;
/// S/PDIF configuration
pub const REG_SPDIF_CFG: u8 = 0x03;
/// Automute time
pub const REG_AUTOMUTE_TIME: u8 = 0x04;
/// Automute level
pub const REG_AUTOMUTE_LEVEL: u8 = 0x05;
/// De-emphasis filter and DoP
pub const REG_DEEMPH: u8 = 0x06;
/// Filter bandwidth and system mute: bit 0 = mute
pub const REG_FILTER_MUTE: u8 = 0x07;
/// GPIO1-2 configuration
pub const REG_GPIO12_CFG: u8 = 0x08;
/// Master mode and sync configuration: bit 7 = master enable
pub const REG_MASTER_MODE: u8 = 0x0A;
/// S/PDIF mux
pub const REG_SPDIF_SELECT: u8 = 0x0B;
/// ASRC / DPLL bandwidth
pub const REG_ASRC_DPLL_BW: u8 = 0x0C;
/// THD bypass
pub const REG_THD_BYPASS: u8 = 0x0D;
/// Soft start configuration: bit 7 = soft start enable
pub const REG_SOFT_START: u8 = 0x0E;
/// Volume attenuation, channel 1 (left)
///
/// 0x00 = 0 dB (loudest), 0xFF = –127.5 dB. 0.5 dB per step.
pub const REG_VOLUME1: u8 = 0x0F;
/// Volume attenuation, channel 2 (right), same encoding as [`REG_VOLUME1`]
pub const REG_VOLUME2: u8 = 0x10;
/// Master trim, bits \[7:0\]
pub const REG_MASTER_TRIM1: u8 = 0x11;
/// Master trim, bits \[15:8\]
pub const REG_MASTER_TRIM2: u8 = 0x12;
/// Master trim, bits \[23:16\]
pub const REG_MASTER_TRIM3: u8 = 0x13;
/// Master trim, bits \[31:24\]
pub const REG_MASTER_TRIM4: u8 = 0x14;
/// GPIO input selection
pub const REG_GPIO_INPUT_SEL: u8 = 0x15;
/// THD compensation C2, low byte
pub const REG_THD_COMP_C2_1: u8 = 0x16;
/// THD compensation C2, high byte
pub const REG_THD_COMP_C2_2: u8 = 0x17;
/// THD compensation C3, low byte
pub const REG_THD_COMP_C3_1: u8 = 0x18;
/// THD compensation C3, high byte
pub const REG_THD_COMP_C3_2: u8 = 0x19;
/// General configuration
pub const REG_GENERAL_CFG: u8 = 0x1B;
/// GPIO configuration
pub const REG_GPIO_CFG: u8 = 0x1D;
/// Charge pump clock, low byte
pub const REG_CP_CLK_1: u8 = 0x1E;
/// Charge pump clock, high byte
pub const REG_CP_CLK_2: u8 = 0x1F;
/// Interrupt mask
pub const REG_INTERRUPT_MASK: u8 = 0x21;
/// NCO ratio, bits \[7:0\]
pub const REG_NCO_1: u8 = 0x22;
/// NCO ratio, bits \[15:8\]
pub const REG_NCO_2: u8 = 0x23;
/// NCO ratio, bits \[23:16\]
pub const REG_NCO_3: u8 = 0x24;
/// NCO ratio, bits \[31:24\]
pub const REG_NCO_4: u8 = 0x25;
/// General configuration 2
pub const REG_GENERAL_CFG_2: u8 = 0x27;
/// Programmable FIR coefficient address
pub const REG_PROG_FIR_ADDR: u8 = 0x28;
/// Programmable FIR coefficient data, bits \[7:0\]
pub const REG_PROG_FIR_DATA_1: u8 = 0x29;
/// Programmable FIR coefficient data, bits \[15:8\]
pub const REG_PROG_FIR_DATA_2: u8 = 0x2A;
/// Programmable FIR coefficient data, bits \[23:16\]
pub const REG_PROG_FIR_DATA_3: u8 = 0x2B;
/// Programmable FIR configuration
pub const REG_PROG_FIR_CFG: u8 = 0x2C;
/// Low power and auto-calibration
pub const REG_LOW_POWER: u8 = 0x2D;
/// ADC configuration
pub const REG_ADC_CFG: u8 = 0x2E;
/// ADC filter coefficient 1
pub const REG_ADC_FILTER_1: u8 = 0x2F;
/// ADC filter coefficient 2
pub const REG_ADC_FILTER_2: u8 = 0x30;
/// ADC filter coefficient 3
pub const REG_ADC_FILTER_3: u8 = 0x31;
/// ADC filter coefficient 4
pub const REG_ADC_FILTER_4: u8 = 0x32;
/// ADC filter coefficient 5
pub const REG_ADC_FILTER_5: u8 = 0x33;
/// ADC filter coefficient 6
pub const REG_ADC_FILTER_6: u8 = 0x34;

// ---------------------------------------------------------------------------
// Register addresses: read-only status
// ---------------------------------------------------------------------------

/// Chip identification and lock status
pub const REG_CHIP_ID: u8 = 0x40;
/// GPIO readback
pub const REG_GPIO_READBACK: u8 = 0x41;
/// DPLL numerator, bits \[7:0\]
pub const REG_DPLL_NUM_1: u8 = 0x42;
/// DPLL numerator, bits \[15:8\]
pub const REG_DPLL_NUM_2: u8 = 0x43;
/// DPLL numerator, bits \[23:16\]
pub const REG_DPLL_NUM_3: u8 = 0x44;
/// DPLL numerator, bits \[31:24\]
pub const REG_DPLL_NUM_4: u8 = 0x45;
/// First S/PDIF channel status byte (0x46–0x5D)
pub const REG_SPDIF_STATUS_1: u8 = 0x46;
/// Input selection status
pub const REG_INPUT_STATUS: u8 = 0x60;
/// ADC readback, bits \[7:0\]
pub const REG_ADC_READBACK_1: u8 = 0x64;
/// ADC readback, bits \[15:8\]
pub const REG_ADC_READBACK_2: u8 = 0x65;
/// ADC readback, bits \[23:16\]; last readable register
pub const REG_ADC_READBACK_3: u8 = 0x66;

/// First register of the read-only status block.
pub const STATUS_BASE: u8 = REG_CHIP_ID;

// ---------------------------------------------------------------------------
// Register field values
// ---------------------------------------------------------------------------

/// System register: initiate soft reset
pub const SYSTEM_SOFT_RESET: u8 = 0x01;

/// Input select: serial word length field
pub const INPUT_SEL_BITS_MASK: u8 = 0xC0;
/// Input select: 16-bit serial words
pub const INPUT_SEL_BITS_16: u8 = 0x00;
/// Input select: 24-bit serial words
pub const INPUT_SEL_BITS_24: u8 = 0x40;
/// Input select: 32-bit serial words
pub const INPUT_SEL_BITS_32: u8 = 0x80;

/// Input select: serial mode field
pub const INPUT_SEL_MODE_MASK: u8 = 0x30;
/// Input select: I²S
pub const INPUT_SEL_MODE_I2S: u8 = 0x00;
/// Input select: left-justified
pub const INPUT_SEL_MODE_LJ: u8 = 0x10;
/// Input select: right-justified
pub const INPUT_SEL_MODE_RJ: u8 = 0x30;

/// Input select: automatic input detection field (0 = disabled)
pub const INPUT_SEL_AUTO_MASK: u8 = 0x0C;
/// Input select: input source field (0 = serial data)
pub const INPUT_SEL_SOURCE_MASK: u8 = 0x03;

/// Filter/mute: mute both channels
pub const FILTER_MUTE_MUTE: u8 = 0x01;

/// Master mode: chip drives BCLK and LRCLK
pub const MASTER_MODE_ENABLE: u8 = 0x80;
/// Master mode: 128fs mode, cleared before the NCO is programmed
pub const MASTER_MODE_128FS: u8 = 0x10;

/// Soft start: ramp enable
pub const SOFT_START_ENABLE: u8 = 0x80;

/// Chip id: identification field
pub const CHIP_ID_MASK: u8 = 0xFC;
/// Chip id: expected value of the identification field
pub const CHIP_ID_ES9038Q2M: u8 = 0x1C << 2;

/// Whether a CHIP_ID read-back identifies an ES9038Q2M.
///
/// Bits \[1:0\] carry lock status and are ignored.
pub const fn is_es9038q2m(chip_id: u8) -> bool {
    chip_id & CHIP_ID_MASK == CHIP_ID_ES9038Q2M
}

// ---------------------------------------------------------------------------
// Register table
// ---------------------------------------------------------------------------

/// Every register the driver knows, ascending by address.
pub const REGISTERS: [RegisterDef; 59] = [
    RegisterDef::config(REG_SYSTEM, "SYSTEM", 0x00),
    RegisterDef::config(REG_INPUT_SEL, "INPUT_SEL", 0xCC),
    RegisterDef::config(REG_MIXING, "MIXING", 0x34),
    RegisterDef::config(REG_SPDIF_CFG, "SPDIF_CFG", 0x40),
    RegisterDef::config(REG_AUTOMUTE_TIME, "AUTOMUTE_TIME", 0x00),
    RegisterDef::config(REG_AUTOMUTE_LEVEL, "AUTOMUTE_LEVEL", 0x68),
    RegisterDef::config(REG_DEEMPH, "DEEMPH", 0x42),
    RegisterDef::config(REG_FILTER_MUTE, "FILTER_MUTE", 0x80),
    RegisterDef::config(REG_GPIO12_CFG, "GPIO12_CFG", 0xDD),
    RegisterDef::config(REG_MASTER_MODE, "MASTER_MODE", 0x02),
    RegisterDef::config(REG_SPDIF_SELECT, "SPDIF_SELECT", 0x00),
    RegisterDef::config(REG_ASRC_DPLL_BW, "ASRC_DPLL_BW", 0x5A),
    RegisterDef::config(REG_THD_BYPASS, "THD_BYPASS", 0x40),
    RegisterDef::config(REG_SOFT_START, "SOFT_START", 0x0A),
    RegisterDef::config(REG_VOLUME1, "VOLUME1", 0x50),
    RegisterDef::config(REG_VOLUME2, "VOLUME2", 0x50),
    RegisterDef::config(REG_MASTER_TRIM1, "MASTER_TRIM1", 0x7F),
    RegisterDef::config(REG_MASTER_TRIM2, "MASTER_TRIM2", 0xFF),
    RegisterDef::config(REG_MASTER_TRIM3, "MASTER_TRIM3", 0xFF),
    RegisterDef::config(REG_MASTER_TRIM4, "MASTER_TRIM4", 0xFF),
    RegisterDef::config(REG_GPIO_INPUT_SEL, "GPIO_INPUT_SEL", 0x00),
    RegisterDef::config(REG_THD_COMP_C2_1, "THD_COMP_C2_1", 0x00),
    RegisterDef::config(REG_THD_COMP_C2_2, "THD_COMP_C2_2", 0x00),
    RegisterDef::config(REG_THD_COMP_C3_1, "THD_COMP_C3_1", 0x00),
    RegisterDef::config(REG_THD_COMP_C3_2, "THD_COMP_C3_2", 0x00),
    RegisterDef::config(REG_GENERAL_CFG, "GENERAL_CFG", 0xD4),
    RegisterDef::config(REG_GPIO_CFG, "GPIO_CFG", 0x00),
    RegisterDef::config(REG_CP_CLK_1, "CP_CLK_1", 0x00),
    RegisterDef::config(REG_CP_CLK_2, "CP_CLK_2", 0x00),
    RegisterDef::config(REG_INTERRUPT_MASK, "INTERRUPT_MASK", 0x3C),
    RegisterDef::config(REG_NCO_1, "NCO_1", 0x00),
    RegisterDef::config(REG_NCO_2, "NCO_2", 0x00),
    RegisterDef::config(REG_NCO_3, "NCO_3", 0x00),
    RegisterDef::config(REG_NCO_4, "NCO_4", 0x00),
    RegisterDef::config(REG_GENERAL_CFG_2, "GENERAL_CFG_2", 0x00),
    RegisterDef::config(REG_PROG_FIR_ADDR, "PROG_FIR_ADDR", 0x00),
    RegisterDef::config(REG_PROG_FIR_DATA_1, "PROG_FIR_DATA_1", 0x00),
    RegisterDef::config(REG_PROG_FIR_DATA_2, "PROG_FIR_DATA_2", 0x00),
    RegisterDef::config(REG_PROG_FIR_DATA_3, "PROG_FIR_DATA_3", 0x00),
    RegisterDef::config(REG_PROG_FIR_CFG, "PROG_FIR_CFG", 0x00),
    RegisterDef::config(REG_LOW_POWER, "LOW_POWER", 0x04),
    RegisterDef::config(REG_ADC_CFG, "ADC_CFG", 0x00),
    RegisterDef::config(REG_ADC_FILTER_1, "ADC_FILTER_1", 0x03),
    RegisterDef::config(REG_ADC_FILTER_2, "ADC_FILTER_2", 0xE0),
    RegisterDef::config(REG_ADC_FILTER_3, "ADC_FILTER_3", 0x04),
    RegisterDef::config(REG_ADC_FILTER_4, "ADC_FILTER_4", 0x00),
    RegisterDef::config(REG_ADC_FILTER_5, "ADC_FILTER_5", 0x04),
    RegisterDef::config(REG_ADC_FILTER_6, "ADC_FILTER_6", 0x00),
    RegisterDef::status(REG_CHIP_ID, "CHIP_ID"),
    RegisterDef::status(REG_GPIO_READBACK, "GPIO_READBACK"),
    RegisterDef::status(REG_DPLL_NUM_1, "DPLL_NUM_1"),
    RegisterDef::status(REG_DPLL_NUM_2, "DPLL_NUM_2"),
    RegisterDef::status(REG_DPLL_NUM_3, "DPLL_NUM_3"),
    RegisterDef::status(REG_DPLL_NUM_4, "DPLL_NUM_4"),
    RegisterDef::status(REG_SPDIF_STATUS_1, "SPDIF_STATUS_1"),
    RegisterDef::status(REG_INPUT_STATUS, "INPUT_STATUS"),
    RegisterDef::status(REG_ADC_READBACK_1, "ADC_READBACK_1"),
    RegisterDef::status(REG_ADC_READBACK_2, "ADC_READBACK_2"),
    RegisterDef::status(REG_ADC_READBACK_3, "ADC_READBACK_3"),
];

const _: () = assert!(platform::regmap::table_is_strictly_ascending(&REGISTERS));

/// Register map description consumed by [`platform::I2cRegmap`].
#[derive(Debug, Clone, Copy)]
pub struct Es9038q2mRegisters;

impl RegmapConfig for Es9038q2mRegisters {
    const MAX_REGISTER: u8 = REG_ADC_READBACK_3;
    const REGISTERS: &'static [RegisterDef] = &REGISTERS;

    fn readable(reg: u8) -> bool {
        reg <= REG_ADC_READBACK_3
    }

    fn volatile(reg: u8) -> bool {
        reg >= STATUS_BASE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i2c_addresses_are_adjacent() {
        assert_eq!(I2C_ADDR_LOW, 0x48);
        assert_eq!(I2C_ADDR_HIGH, 0x49);
    }

    #[test]
    fn config_block_has_48_defaults() {
        let configs = REGISTERS.iter().filter(|def| def.reset.is_some()).count();
        assert_eq!(configs, 48);
        assert!(REGISTERS
            .iter()
            .filter(|def| def.reset.is_some())
            .all(|def| def.addr < STATUS_BASE));
    }

    #[test]
    fn status_block_has_no_defaults() {
        assert!(REGISTERS
            .iter()
            .filter(|def| def.addr >= STATUS_BASE)
            .all(|def| def.reset.is_none()));
    }

    #[test]
    fn reset_values_match_datasheet() {
        assert_eq!(Es9038q2mRegisters::reset_value(REG_INPUT_SEL), Some(0xCC));
        assert_eq!(Es9038q2mRegisters::reset_value(REG_FILTER_MUTE), Some(0x80));
        assert_eq!(Es9038q2mRegisters::reset_value(REG_SOFT_START), Some(0x0A));
        assert_eq!(Es9038q2mRegisters::reset_value(REG_VOLUME1), Some(0x50));
        assert_eq!(Es9038q2mRegisters::reset_value(REG_GENERAL_CFG), Some(0xD4));
        assert_eq!(Es9038q2mRegisters::reset_value(REG_CHIP_ID), None);
    }

    #[test]
    fn access_policy_boundaries() {
        assert!(Es9038q2mRegisters::readable(0x00));
        assert!(Es9038q2mRegisters::readable(0x66));
        assert!(!Es9038q2mRegisters::readable(0x67));

        assert!(!Es9038q2mRegisters::volatile(0x3F));
        assert!(Es9038q2mRegisters::volatile(0x40));

        assert!(Es9038q2mRegisters::writeable(0x3F));
        assert!(!Es9038q2mRegisters::writeable(0x40));
        assert!(!Es9038q2mRegisters::writeable(0x67));
    }

    #[test]
    fn chip_id_ignores_lock_bits() {
        for id in 0x70..=0x73 {
            assert!(is_es9038q2m(id));
        }
        assert!(!is_es9038q2m(0x74));
        assert!(!is_es9038q2m(0x00));
        assert!(!is_es9038q2m(0xFF));
    }

    #[test]
    #[allow(clippy::arithmetic_side_effects)]
    fn nco_registers_are_contiguous() {
        assert_eq!(REG_NCO_2, REG_NCO_1 + 1);
        assert_eq!(REG_NCO_3, REG_NCO_2 + 1);
        assert_eq!(REG_NCO_4, REG_NCO_3 + 1);
    }

    #[test]
    fn input_sel_fields_cover_the_register() {
        assert_eq!(
            INPUT_SEL_BITS_MASK | INPUT_SEL_MODE_MASK | INPUT_SEL_AUTO_MASK | INPUT_SEL_SOURCE_MASK,
            0xFF
        );
    }
}
