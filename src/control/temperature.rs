//! Temperature regulation controller.
//!
//! Wraps the PID engine with the two protections the drying chamber needs:
//!
//! 1. **Reading validation** — NaN or implausible readings (outside
//!    [-50, 150] °C) never reach the engine. The cycle is skipped, the
//!    previous output and heating decision stay in force, and the rejection
//!    reason is held for the observer. A bad reading never changes mode.
//! 2. **Overshoot interlock** — the heating command is forced off whenever
//!    the chamber is more than [`OVERSHOOT_MARGIN`] above the setpoint,
//!    regardless of what the PID output says. Hard interlock, not a tunable.
//!
//! The controller mutates only its own state; observability comes from the
//! read accessors, not from logging.

use core::time::Duration;

use crate::config::DryerConfig;
use crate::control::pid::{Mode, PidController};
use crate::error::SensorError;

/// Lowest reading the sensor could physically produce (°C).
pub const TEMP_VALID_MIN: f32 = -50.0;
/// Highest reading the sensor could physically produce (°C).
pub const TEMP_VALID_MAX: f32 = 150.0;

/// PID output floor (%).
pub const OUTPUT_MIN: f32 = 0.0;
/// PID output ceiling (%).
pub const OUTPUT_MAX: f32 = 100.0;

/// Output percentage above which the heater is commanded on.
/// Strictly greater-than: an output of exactly 10.0 keeps the heater off.
pub const HEATING_THRESHOLD: f32 = 10.0;

/// Degrees above the setpoint at which the overshoot interlock disables
/// the heater unconditionally.
pub const OVERSHOOT_MARGIN: f32 = 2.0;

/// Closed-loop temperature controller for the drying chamber.
pub struct TemperatureController {
    pid: PidController,
    setpoint: f32,
    /// Last measurement that passed validation.
    current_temperature: f32,
    /// Last computed actuation percentage, always in [OUTPUT_MIN, OUTPUT_MAX].
    output: f32,
    /// Why the most recent rejected reading was rejected, if any.
    last_rejection: Option<SensorError>,
}

impl TemperatureController {
    /// Build the controller from configuration. Starts in Automatic mode
    /// with output limits [0, 100] and the configured sample interval.
    pub fn new(config: &DryerConfig) -> Self {
        let mut pid = PidController::new(config.kp, config.ki, config.kd, config.sample_interval());
        pid.set_output_limits(OUTPUT_MIN, OUTPUT_MAX);
        Self {
            pid,
            setpoint: config.setpoint_c,
            current_temperature: 0.0,
            output: 0.0,
            last_rejection: None,
        }
    }

    // ── Control cycle ─────────────────────────────────────────

    /// Validate a raw reading and, if it passes, run one PID step.
    ///
    /// Returns `Ok(true)` when a new output was computed this cycle,
    /// `Ok(false)` when the sample interval has not elapsed or the mode is
    /// Manual (output unchanged either way). A NaN or out-of-band reading
    /// returns `Err` and leaves `current_temperature`, `output`, and mode
    /// untouched.
    pub fn compute(&mut self, raw: f32, now: Duration) -> Result<bool, SensorError> {
        if raw.is_nan() {
            self.last_rejection = Some(SensorError::NotANumber);
            return Err(SensorError::NotANumber);
        }
        if !(TEMP_VALID_MIN..=TEMP_VALID_MAX).contains(&raw) {
            self.last_rejection = Some(SensorError::OutOfRange);
            return Err(SensorError::OutOfRange);
        }

        self.current_temperature = raw;
        self.last_rejection = None;

        match self.pid.compute(self.setpoint, raw, now) {
            Some(output) => {
                self.output = output;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether the heater should be energised right now.
    ///
    /// True iff the last output exceeds [`HEATING_THRESHOLD`] AND the
    /// chamber is not more than [`OVERSHOOT_MARGIN`] above the setpoint.
    /// The overshoot check overrides the threshold check unconditionally.
    /// Pure with respect to controller state.
    pub fn should_heat_on(&self) -> bool {
        let mut heat_on = self.output > HEATING_THRESHOLD;
        if self.current_temperature > self.setpoint + OVERSHOOT_MARGIN {
            heat_on = false;
        }
        heat_on
    }

    // ── Operator surface ──────────────────────────────────────

    /// Replace the target temperature. Effective on the next
    /// `compute`/`should_heat_on` evaluation. Bounds policy is the
    /// caller's responsibility.
    pub fn set_setpoint(&mut self, setpoint: f32) {
        self.setpoint = setpoint;
    }

    /// Replace all three PID gains. Effective on the next compute.
    pub fn set_tunings(&mut self, kp: f32, ki: f32, kd: f32) {
        self.pid.set_tunings(kp, ki, kd);
    }

    /// Switch the engine between Automatic (`true`) and Manual (`false`).
    /// The Manual→Automatic edge clears integral windup.
    pub fn set_mode(&mut self, automatic: bool) {
        self.pid.set_mode(if automatic { Mode::Automatic } else { Mode::Manual });
    }

    /// Clear integral windup and force the output to zero, then resume
    /// Automatic operation. Used when recovering from a manual
    /// intervention or a fault.
    pub fn reset(&mut self) {
        self.pid.set_mode(Mode::Manual);
        self.pid.set_output(0.0);
        self.output = 0.0;
        self.pid.set_mode(Mode::Automatic);
    }

    // ── Read accessors (for display / telemetry / logging) ────

    /// Last computed actuation percentage.
    pub fn output(&self) -> f32 {
        self.output
    }

    /// Current target temperature.
    pub fn setpoint(&self) -> f32 {
        self.setpoint
    }

    /// Last validated measurement.
    pub fn current_temperature(&self) -> f32 {
        self.current_temperature
    }

    /// Current engine mode.
    pub fn mode(&self) -> Mode {
        self.pid.mode()
    }

    /// Current PID gains.
    pub fn gains(&self) -> (f32, f32, f32) {
        self.pid.gains()
    }

    /// Why the most recent reading was rejected, or `None` if the most
    /// recent reading was accepted.
    pub fn last_rejection(&self) -> Option<SensorError> {
        self.last_rejection
    }
}
