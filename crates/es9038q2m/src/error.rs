//! Driver error type

use platform::{ControlError, RegmapError};
use thiserror_no_std::Error;

/// ES9038Q2M driver errors, generic over the bus error `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error<E> {
    /// A request the chip cannot honour (format, role, width, rate, channels, control value).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A required device property is absent.
    #[error("missing device property: {0}")]
    MissingConfig(&'static str),
    /// The bus transaction did not complete.
    #[error("bus transaction failed")]
    Bus(E),
    /// The register map refused the access.
    #[error("register map access refused")]
    Regmap(RegmapError<E>),
    /// CHIP_ID does not identify an ES9038Q2M.
    #[error("unexpected chip id {found:#04x}")]
    ChipIdMismatch {
        /// Value read from CHIP_ID
        found: u8,
    },
    /// Rate programming needs the codec to be clock master.
    #[error("rate programming requires codec clock master")]
    UnsupportedClocking,
    /// The host framework refused the component.
    #[error("component registration failed")]
    Registration,
}

impl<E> From<RegmapError<E>> for Error<E> {
    fn from(err: RegmapError<E>) -> Self {
        match err {
            RegmapError::Bus(e) => Self::Bus(e),
            other => Self::Regmap(other),
        }
    }
}

impl<E> From<ControlError<E>> for Error<E> {
    fn from(err: ControlError<E>) -> Self {
        match err {
            ControlError::InvalidValue { .. } => Self::InvalidArgument("control value out of range"),
            ControlError::ChannelCount { .. } => Self::InvalidArgument("control channel count"),
            ControlError::Regmap(e) => e.into(),
        }
    }
}
