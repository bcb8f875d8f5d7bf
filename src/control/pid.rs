//! PID engine for heater output regulation.
//!
//! Discrete-time proportional-integral-derivative law over the temperature
//! error, recomputed on a fixed sample interval. The engine takes the
//! setpoint and measurement as explicit call parameters and returns the
//! output by value, so it carries no references to caller state and is
//! testable in isolation.
//!
//! - Derivative on measurement, not on error — no output kick when the
//!   operator moves the setpoint.
//! - Conditional-integration anti-windup: while the output is saturated,
//!   integration further into saturation is discarded.
//! - Sample-interval gating: calls arriving early are accepted but produce
//!   no new output (rate limiter, not an error).

use core::time::Duration;

/// Controller mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Output frozen; error accumulation suspended.
    Manual,
    /// Normal closed-loop operation.
    Automatic,
}

/// PID compute engine.
#[derive(Debug, Clone)]
pub struct PidController {
    kp: f32,
    ki: f32,
    kd: f32,
    sample_interval: Duration,
    output_min: f32,
    output_max: f32,
    mode: Mode,
    /// Accumulated error in error·seconds. Zeroed on every
    /// Manual→Automatic transition edge.
    integral: f32,
    /// Derivative reference. `None` until the first compute after
    /// construction or a Manual→Automatic edge, so that compute
    /// contributes no derivative term.
    last_measurement: Option<f32>,
    last_output: f32,
    last_compute: Option<Duration>,
}

impl PidController {
    /// Create an engine with the given gains and sample interval.
    /// Starts in Automatic mode with output limits [0, 100].
    pub fn new(kp: f32, ki: f32, kd: f32, sample_interval: Duration) -> Self {
        Self {
            kp,
            ki,
            kd,
            sample_interval,
            output_min: 0.0,
            output_max: 100.0,
            mode: Mode::Automatic,
            integral: 0.0,
            last_measurement: None,
            last_output: 0.0,
            last_compute: None,
        }
    }

    /// Replace all three gains atomically. Takes effect on the next compute.
    /// No sign/magnitude validation — the caller owns tuning policy.
    pub fn set_tunings(&mut self, kp: f32, ki: f32, kd: f32) {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
    }

    /// Set the minimum spacing between effective computations.
    pub fn set_sample_interval(&mut self, interval: Duration) {
        self.sample_interval = interval;
    }

    /// Set output limits and clamp current output accordingly.
    pub fn set_output_limits(&mut self, min: f32, max: f32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.output_min = min;
        self.output_max = max;
        self.last_output = self.last_output.clamp(min, max);
    }

    /// Switch between Manual and Automatic.
    ///
    /// The Manual→Automatic edge zeroes the integral accumulator
    /// (anti-windup) and drops the derivative reference so the first
    /// compute after resume has no derivative spike. Redundant calls with
    /// the current mode change nothing.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Automatic && self.mode == Mode::Manual {
            self.integral = 0.0;
            self.last_measurement = None;
        }
        self.mode = mode;
    }

    /// Overwrite the held output (clamped). Meaningful in Manual mode,
    /// where the engine returns this value untouched.
    pub fn set_output(&mut self, value: f32) {
        self.last_output = value.clamp(self.output_min, self.output_max);
    }

    /// Run one PID step.
    ///
    /// `now` is a monotonic timestamp since an arbitrary epoch; the engine
    /// only compares distances between successive calls.
    ///
    /// Returns `Some(output)` when a new output was computed, `None` when
    /// the sample interval has not elapsed or the mode is Manual. In both
    /// `None` cases the previous output is retained.
    pub fn compute(&mut self, setpoint: f32, measurement: f32, now: Duration) -> Option<f32> {
        if self.mode == Mode::Manual {
            return None;
        }
        if let Some(last) = self.last_compute {
            if now.saturating_sub(last) < self.sample_interval {
                return None;
            }
        }

        let dt = self.sample_interval.as_secs_f32();
        let error = setpoint - measurement;

        let candidate = self.integral + error * dt;

        // Derivative on measurement: d = -kd * d(meas)/dt.
        let derivative = match self.last_measurement {
            Some(prev) => -(measurement - prev) / dt,
            None => 0.0,
        };

        let unclamped = self.kp * error + self.ki * candidate + self.kd * derivative;
        let output = unclamped.clamp(self.output_min, self.output_max);

        // Anti-windup: discard this step's integration if it pushes further
        // into an already-saturated limit. Integration back out of
        // saturation is never blocked.
        let saturated_up = unclamped > self.output_max && error > 0.0;
        let saturated_down = unclamped < self.output_min && error < 0.0;
        if !(saturated_up || saturated_down) {
            self.integral = candidate;
        }

        self.last_measurement = Some(measurement);
        self.last_output = output;
        self.last_compute = Some(now);
        Some(output)
    }

    /// The last computed (or held) output.
    pub fn output(&self) -> f32 {
        self.last_output
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current gains.
    pub fn gains(&self) -> (f32, f32, f32) {
        (self.kp, self.ki, self.kd)
    }

    /// Configured sample interval.
    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }
}
