//! Unified error types for the RiceDryer control core.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the host loop's error handling uniform. All
//! variants are `Copy` so they can be cheaply passed through the service and
//! telemetry layers without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the control core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor reading was rejected by validation.
    Sensor(SensorError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Why a temperature reading was rejected before reaching the PID engine.
///
/// A rejected reading skips the current control cycle: the previous output
/// and heating decision stay in force, and the controller's mode never
/// changes. Retry cadence belongs to the external periodic caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Reading is NaN (the DHT22 driver reports failed reads this way).
    NotANumber,
    /// Reading is outside the physically plausible band [-50, 150] °C.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "reading is not a number"),
            Self::OutOfRange => write!(f, "reading out of plausible range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
