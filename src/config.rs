//! System configuration parameters
//!
//! All tunable parameters for the RiceDryer temperature regulation core.
//! Hard safety constants (heating threshold, overshoot margin, plausible
//! measurement band, output limits) are deliberately NOT here — they live
//! in [`crate::control::temperature`] and cannot be reconfigured.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DryerConfig {
    // --- Setpoint ---
    /// Target drying temperature (°C)
    pub setpoint_c: f32,

    // --- PID gains (tuned for the rice dryer heating chamber) ---
    /// Proportional gain — response to the current error
    pub kp: f32,
    /// Integral gain — response to accumulated error
    pub ki: f32,
    /// Derivative gain — response to the rate of temperature change
    pub kd: f32,

    // --- Timing ---
    /// PID sample interval (milliseconds): minimum spacing between
    /// effective PID computations
    pub sample_interval_ms: u32,
    /// Control loop interval (milliseconds): host tick cadence
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for DryerConfig {
    fn default() -> Self {
        Self {
            // Setpoint
            setpoint_c: 40.0,

            // PID gains
            kp: 2.0,
            ki: 0.1,
            kd: 0.5,

            // Timing
            sample_interval_ms: 1000,    // 1 Hz PID updates
            control_loop_interval_ms: 250, // 4 Hz host ticks
            telemetry_interval_secs: 60, // 1/min
        }
    }
}

impl DryerConfig {
    /// PID sample interval as a `Duration`.
    pub fn sample_interval(&self) -> core::time::Duration {
        core::time::Duration::from_millis(u64::from(self.sample_interval_ms))
    }

    /// Check the invariants the control-loop arithmetic depends on.
    /// Gains and setpoint are deliberately NOT validated here — range
    /// policy for those belongs to the operator-facing layer.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.sample_interval_ms == 0 {
            return Err(Error::Config("sample_interval_ms must be non-zero"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be non-zero"));
        }
        if self.telemetry_interval_secs == 0 {
            return Err(Error::Config("telemetry_interval_secs must be non-zero"));
        }
        Ok(())
    }
}
