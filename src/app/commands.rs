//! Inbound commands to the dryer service.
//!
//! These represent actions requested by the outside world (setpoint
//! potentiometer, mode button, mobile app, serial console) that the
//! [`DryerService`](super::service::DryerService) interprets and acts
//! upon. The service accepts them at any point between ticks.

/// Commands that external adapters can send into the control core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DryerCommand {
    /// Replace the target temperature (°C). No bounds validation here —
    /// range policy belongs to the adapter that produced the command.
    SetSetpoint(f32),

    /// Replace all three PID gains atomically.
    SetTunings { kp: f32, ki: f32, kd: f32 },

    /// Switch the controller between Automatic (`true`) and Manual
    /// (`false`) — e.g. maintenance mode.
    SetMode { automatic: bool },

    /// Clear integral windup and force the output to zero, then resume
    /// Automatic operation.
    Reset,

    /// Emit a [`Diagnostics`](super::events::AppEvent::Diagnostics)
    /// snapshot through the event sink.
    GetDiagnostics,
}
