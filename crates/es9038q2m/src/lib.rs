//! ESS ES9038Q2M stereo DAC driver
//!
//! Configures the chip over its 8-bit I²C register interface and exposes it
//! to a host audio framework as a playback-only codec: serial format and
//! clocking role, sample width, master-mode sample rate (NCO), mute and a
//! stereo volume control.
//!
//! # Modules
//!
//! - [`registers`] - Register addresses, reset defaults and bit fields
//! - [`clock_math`] - NCO ratio for master-mode rate generation
//! - [`controls`] - Mixer controls (volume, mute switch)
//! - [`dai`] - DAI / component descriptors and bus match table
//! - [`driver`] - The device instance ([`Es9038q2m`])
//!
//! # Features
//!
//! - `defmt`: Log through defmt (hardware builds)
//! - `tracing`: Log through tracing (host builds)
//!
//! # Example
//!
//! ```no_run
//! use es9038q2m::{registers::I2C_ADDR_LOW, Es9038q2m, CLOCK_FREQUENCY_PROPERTY};
//! use platform::{
//!     ClockRole, ComponentRegistrar, DaiFormat, FrameFormat, HwParams, PcmFormat,
//!     StaticProperties, StreamDirection,
//! };
//!
//! fn bring_up<I, R>(i2c: I, registrar: &mut R) -> Result<(), es9038q2m::Error<I::Error>>
//! where
//!     I: embedded_hal::i2c::I2c,
//!     R: ComponentRegistrar,
//! {
//!     let props = StaticProperties::<1>::new()
//!         .with(CLOCK_FREQUENCY_PROPERTY, 49_152_000)
//!         .map_err(|_| es9038q2m::Error::MissingConfig(CLOCK_FREQUENCY_PROPERTY))?;
//!     let mut dac = Es9038q2m::probe(i2c, I2C_ADDR_LOW, &props, registrar)?;
//!     dac.set_fmt(DaiFormat::new(FrameFormat::I2s, ClockRole::CodecMaster))?;
//!     dac.hw_params(&HwParams::new(44_100, PcmFormat::S32Le, 2))?;
//!     dac.mute_stream(false, StreamDirection::Playback)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::wildcard_imports)] // `use registers::*` in the driver

pub mod clock_math;
pub mod controls;
pub mod dai;
pub mod driver;
pub mod error;
pub mod registers;

pub use driver::{Es9038q2m, CLOCK_FREQUENCY_PROPERTY};
pub use error::Error;
pub use registers::Es9038q2mRegisters;
