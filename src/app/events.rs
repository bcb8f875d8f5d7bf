//! Outbound application events.
//!
//! The [`DryerService`](super::service::DryerService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — log to serial, draw on the LCD,
//! publish to the cloud, etc.

use serde::Serialize;

use crate::control::pid::Mode;
use crate::diagnostics::RuntimeMetrics;
use crate::error::SensorError;

/// Structured events emitted by the control core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started and the controller is in Automatic mode.
    Started,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The operator changed the target temperature.
    SetpointChanged { from: f32, to: f32 },

    /// The operator replaced the PID gains.
    TuningsChanged { kp: f32, ki: f32, kd: f32 },

    /// The controller switched between Automatic and Manual.
    ModeChanged(Mode),

    /// Integral windup was cleared and the output forced to zero.
    ControllerReset,

    /// A sensor reading failed validation and this cycle's PID update was
    /// skipped. The previous heating decision stays in force.
    ReadingRejected(SensorError),

    /// The heating command changed level.
    HeaterChanged(bool),

    /// On-demand diagnostics snapshot.
    Diagnostics(RuntimeMetrics),
}

/// A point-in-time telemetry snapshot suitable for display or transmission.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TelemetryData {
    /// Last validated chamber temperature (°C).
    pub temperature_c: f32,
    /// Current target temperature (°C).
    pub setpoint_c: f32,
    /// Last computed PID output (%).
    pub output_pct: f32,
    /// Whether the heater is currently commanded on.
    pub heating: bool,
    /// Whether the controller is in Automatic mode.
    pub automatic: bool,
    /// Readings rejected by validation since start.
    pub rejected_readings: u32,
}
