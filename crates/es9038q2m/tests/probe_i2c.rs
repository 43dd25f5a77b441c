//! Bus-level tests: the driver over a real `I2cRegmap` and a mocked I²C bus.
//!
//! Every transaction the chip would see is listed up front; `done()` fails
//! the test if the driver issued fewer or more.

#![allow(clippy::unwrap_used)]

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use es9038q2m::registers::*;
use es9038q2m::{Error, Es9038q2m, CLOCK_FREQUENCY_PROPERTY};
use platform::mocks::MockRegistrar;
use platform::{
    ClockRole, DaiFormat, FrameFormat, HwParams, PcmFormat, StaticProperties, StreamDirection,
};

const ADDR: u8 = I2C_ADDR_LOW;

fn props() -> StaticProperties<1> {
    StaticProperties::new()
        .with(CLOCK_FREQUENCY_PROPERTY, 49_152_000)
        .unwrap()
}

fn chip_id(id: u8) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![REG_CHIP_ID], vec![id])
}

fn write(reg: u8, val: u8) -> I2cTransaction {
    I2cTransaction::write(ADDR, vec![reg, val])
}

#[test]
fn probe_reads_id_then_resets() {
    let i2c = I2cMock::new(&[chip_id(0x72), write(REG_SYSTEM, SYSTEM_SOFT_RESET)]);
    let mut registrar = MockRegistrar::new();

    let dac = Es9038q2m::probe(i2c, ADDR, &props(), &mut registrar).unwrap();

    assert_eq!(dac.address(), ADDR);
    assert_eq!(registrar.components(), &["es9038q2m"]);
    dac.release().done();
}

#[test]
fn probe_stops_on_foreign_chip() {
    let i2c = I2cMock::new(&[chip_id(0x60)]);
    let mut handle = i2c.clone();
    let mut registrar = MockRegistrar::new();

    let err = Es9038q2m::probe(i2c, ADDR, &props(), &mut registrar)
        .err()
        .unwrap();

    assert_eq!(err, Error::ChipIdMismatch { found: 0x60 });
    assert!(registrar.components().is_empty());
    handle.done();
}

#[test]
fn probe_propagates_chip_id_bus_error() {
    let i2c = I2cMock::new(&[chip_id(0x00).with_error(ErrorKind::Other)]);
    let mut handle = i2c.clone();
    let mut registrar = MockRegistrar::new();

    let err = Es9038q2m::probe(i2c, ADDR, &props(), &mut registrar)
        .err()
        .unwrap();

    assert_eq!(err, Error::Bus(ErrorKind::Other));
    handle.done();
}

#[test]
fn probe_without_clock_touches_nothing() {
    let i2c = I2cMock::new(&[]);
    let mut handle = i2c.clone();
    let mut registrar = MockRegistrar::new();

    let err = Es9038q2m::probe(i2c, ADDR, &StaticProperties::<1>::new(), &mut registrar)
        .err()
        .unwrap();

    assert_eq!(err, Error::MissingConfig("clock-frequency"));
    handle.done();
}

#[test]
fn probe_rejects_reserved_address() {
    let i2c = I2cMock::new(&[]);
    let mut handle = i2c.clone();
    let mut registrar = MockRegistrar::new();

    let err = Es9038q2m::probe(i2c, 0x03, &props(), &mut registrar)
        .err()
        .unwrap();

    assert!(matches!(err, Error::InvalidArgument(_)));
    handle.done();
}

#[test]
fn registration_failure_comes_after_reset() {
    let i2c = I2cMock::new(&[chip_id(0x70), write(REG_SYSTEM, SYSTEM_SOFT_RESET)]);
    let mut handle = i2c.clone();
    let mut registrar = MockRegistrar::refusing();

    let err = Es9038q2m::probe(i2c, ADDR, &props(), &mut registrar)
        .err()
        .unwrap();

    assert_eq!(err, Error::Registration);
    handle.done();
}

#[test]
fn playback_bring_up_44k1_32bit() {
    let i2c = I2cMock::new(&[
        chip_id(0x70),
        write(REG_SYSTEM, SYSTEM_SOFT_RESET),
        // set_fmt: master, I²S
        write(REG_MASTER_MODE, 0x82),
        write(REG_INPUT_SEL, 0xC0),
        // hw_params: soft start already off after reset, 128fs already clear
        write(REG_INPUT_SEL, 0x80),
        write(REG_NCO_4, 0x00),
        write(REG_NCO_3, 0x3A),
        write(REG_NCO_2, 0xCC),
        write(REG_NCO_1, 0xCD),
        write(REG_SOFT_START, 0x8A),
        // mute_stream(true); unmute at reset default writes nothing
        write(REG_FILTER_MUTE, 0x81),
    ]);
    let mut registrar = MockRegistrar::new();

    let mut dac = Es9038q2m::probe(i2c, ADDR, &props(), &mut registrar).unwrap();
    dac.set_fmt(DaiFormat::new(FrameFormat::I2s, ClockRole::CodecMaster))
        .unwrap();
    dac.hw_params(&HwParams::new(44_100, PcmFormat::S32Le, 2))
        .unwrap();
    dac.mute_stream(false, StreamDirection::Playback).unwrap();
    dac.mute_stream(true, StreamDirection::Playback).unwrap();

    assert_eq!(dac.rate().map(platform::SampleRateHz::get), Some(44_100));
    dac.release().done();
}

#[test]
fn second_hw_params_brackets_soft_start() {
    let i2c = I2cMock::new(&[
        chip_id(0x70),
        write(REG_SYSTEM, SYSTEM_SOFT_RESET),
        write(REG_MASTER_MODE, 0x82),
        write(REG_INPUT_SEL, 0xC0),
        // first stream: 48 kHz / 16 bit
        write(REG_INPUT_SEL, 0x00),
        write(REG_NCO_4, 0x00),
        write(REG_NCO_3, 0x40),
        write(REG_NCO_2, 0x00),
        write(REG_NCO_1, 0x00),
        write(REG_SOFT_START, 0x8A),
        // second stream: 96 kHz / 24 bit
        write(REG_SOFT_START, 0x0A),
        write(REG_INPUT_SEL, 0x40),
        write(REG_NCO_4, 0x00),
        write(REG_NCO_3, 0x80),
        write(REG_NCO_2, 0x00),
        write(REG_NCO_1, 0x00),
        write(REG_SOFT_START, 0x8A),
    ]);
    let mut registrar = MockRegistrar::new();

    let mut dac = Es9038q2m::probe(i2c, ADDR, &props(), &mut registrar).unwrap();
    dac.set_fmt(DaiFormat::new(FrameFormat::I2s, ClockRole::CodecMaster))
        .unwrap();
    dac.hw_params(&HwParams::new(48_000, PcmFormat::S16Le, 2))
        .unwrap();
    dac.hw_params(&HwParams::new(96_000, PcmFormat::S24Le, 2))
        .unwrap();

    dac.release().done();
}

#[test]
fn nco_write_failure_leaves_soft_start_off() {
    let i2c = I2cMock::new(&[
        chip_id(0x70),
        write(REG_SYSTEM, SYSTEM_SOFT_RESET),
        write(REG_MASTER_MODE, 0x82),
        write(REG_INPUT_SEL, 0xC0),
        write(REG_INPUT_SEL, 0x80),
        write(REG_NCO_4, 0x00).with_error(ErrorKind::Other),
    ]);
    let mut registrar = MockRegistrar::new();

    let mut dac = Es9038q2m::probe(i2c, ADDR, &props(), &mut registrar).unwrap();
    dac.set_fmt(DaiFormat::new(FrameFormat::I2s, ClockRole::CodecMaster))
        .unwrap();
    let err = dac
        .hw_params(&HwParams::new(44_100, PcmFormat::S32Le, 2))
        .unwrap_err();

    assert_eq!(err, Error::Bus(ErrorKind::Other));
    assert_eq!(dac.rate(), None);
    dac.release().done();
}

#[test]
fn resume_restores_volume_after_power_loss() {
    let i2c = I2cMock::new(&[
        chip_id(0x70),
        write(REG_SYSTEM, SYSTEM_SOFT_RESET),
        write(REG_VOLUME1, 0x00),
        write(REG_VOLUME2, 0x0F),
        // resume: non-default registers only, ascending
        write(REG_VOLUME1, 0x00),
        write(REG_VOLUME2, 0x0F),
    ]);
    let mut registrar = MockRegistrar::new();

    let mut dac = Es9038q2m::probe(i2c, ADDR, &props(), &mut registrar).unwrap();
    assert!(dac.set_volume(255, 240).unwrap());
    assert_eq!(dac.volume_db().unwrap(), (0, -750));
    dac.resume().unwrap();

    dac.release().done();
}
