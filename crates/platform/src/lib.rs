//! Hardware Abstraction Layer (HAL) for I²C-controlled audio codecs
//!
//! This crate provides the trait-based seams between a codec driver, the
//! register bus it talks over, and the host audio framework that drives it,
//! enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Host audio framework (DAI ops, mixer controls)
//!         ↓
//! Codec driver (es9038q2m crate)
//!         ↓
//! Platform HAL (this crate - register map, contract types)
//!         ↓
//! Bus (embedded-hal I²C)
//! ```
//!
//! # Abstraction Levels
//!
//! - [`RegisterMap`] - Cached register access with volatile read-through
//! - [`DaiOps`] / [`ComponentRegistrar`] - Host framework contract
//! - [`MixerControl`] - Register-field controls with dB scales
//! - [`DeviceProperties`] - Static platform configuration
//!
//! # Features
//!
//! - `std`: Host-side mocks for test suites
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{RegisterMap, RegmapError};
//!
//! fn unmute<M: RegisterMap>(map: &mut M) -> Result<bool, RegmapError<M::Error>> {
//!     map.clear_bits(0x07, 0x01)
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
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio;
pub mod audio_types;
pub mod config;
pub mod controls;
pub mod regmap;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export host framework contract
pub use audio::{
    BiasLevel, ClockRole, ComponentDriver, ComponentRegistrar, DaiDriver, DaiFormat, DaiOps,
    DeviceMatch, FrameFormat, HwParams, MatchTable, PcmFormat, PcmStreamCaps, StreamDirection,
};

// Re-export audio newtypes
pub use audio_types::{I2cAddr, OutOfRangeError, SampleRateHz, SampleWidth};

// Re-export configuration
pub use config::{DeviceProperties, StaticProperties};

// Re-export controls
pub use controls::{ControlError, ControlRegs, ControlValues, DbScale, MixerControl};

// Re-export register map types
pub use regmap::{I2cRegmap, RegisterDef, RegisterMap, RegmapConfig, RegmapError};
