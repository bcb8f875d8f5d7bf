//! Port traits — the hexagonal boundary between the control core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DryerService (domain)
//! ```
//!
//! Driven adapters (the DHT22 driver, the relay/SSR driver, the LCD and
//! network reporters) implement these traits. The
//! [`DryerService`](super::service::DryerService) consumes them via
//! generics, so the control core never touches hardware directly.

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle to obtain the
/// chamber temperature.
pub trait SensorPort {
    /// Read the chamber temperature in °C.
    ///
    /// May return NaN on a failed read (the DHT22 driver does exactly
    /// that) — validation is the controller's job, not the adapter's.
    fn read_temperature(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the heating element.
pub trait ActuatorPort {
    /// Energise (`true`) or de-energise (`false`) the heater relay/SSR.
    fn set_heater(&mut self, on: bool);

    /// Kill all actuators — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, LCD,
/// cloud telemetry, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
