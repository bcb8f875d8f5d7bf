//! Dryer service — the hexagonal core.
//!
//! [`DryerService`] owns the temperature controller, the tick-derived
//! clock, and the runtime diagnostics. It exposes a clean,
//! hardware-agnostic API. All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │         DryerService          │
//!  ActuatorPort ◀──│  validation · PID · interlock │
//!                  └──────────────────────────────┘
//! ```
//!
//! All logging lives here. The controller underneath mutates only its own
//! state, so every decision is reconstructable from its read accessors.

use core::time::Duration;

use log::{debug, info, warn};

use crate::config::DryerConfig;
use crate::control::temperature::TemperatureController;
use crate::diagnostics::{RuntimeMetrics, TemperatureTrace};

use super::commands::DryerCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// DryerService
// ───────────────────────────────────────────────────────────────

/// The dryer service orchestrates one control cycle per tick.
pub struct DryerService {
    controller: TemperatureController,
    /// Duration of one host tick (from config).
    tick_period: Duration,
    /// Monotonic time synthesized from the tick counter. The controller
    /// core never reads a wall clock.
    now: Duration,
    tick_count: u64,
    /// Telemetry cadence in ticks.
    telemetry_every: u64,
    /// Last heating command applied to the actuator.
    heater_on: bool,
    metrics: RuntimeMetrics,
    trace: TemperatureTrace,
}

impl DryerService {
    /// Construct the service from configuration.
    ///
    /// Fails only when the config breaks the loop arithmetic (zero
    /// intervals); gain and setpoint policy stays with the caller.
    pub fn new(config: &DryerConfig) -> crate::error::Result<Self> {
        config.validate()?;

        let tick_period = Duration::from_millis(u64::from(config.control_loop_interval_ms));
        let telemetry_every = (u64::from(config.telemetry_interval_secs) * 1000
            / u64::from(config.control_loop_interval_ms))
        .max(1);

        Ok(Self {
            controller: TemperatureController::new(config),
            tick_period,
            now: Duration::ZERO,
            tick_count: 0,
            telemetry_every,
            heater_on: false,
            metrics: RuntimeMetrics::default(),
            trace: TemperatureTrace::new(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup. The controller is already in Automatic mode with
    /// the configured gains and sample interval.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let (kp, ki, kd) = self.controller.gains();
        info!(
            "DryerService started — setpoint {:.1}°C, Kp {:.2} Ki {:.2} Kd {:.2}",
            self.controller.setpoint(),
            kp,
            ki,
            kd
        );
        sink.emit(&AppEvent::Started);
    }

    /// Freeze the controller and de-energise every actuator. Called by
    /// the host when leaving the control loop (power-down, fault
    /// recovery handled outside this core).
    pub fn shutdown(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.controller.set_mode(false);
        hw.all_off();
        if self.heater_on {
            self.heater_on = false;
            self.metrics.heater_switches += 1;
            sink.emit(&AppEvent::HeaterChanged(false));
        }
        info!("DryerService shut down — all actuators off");
        sink.emit(&AppEvent::ModeChanged(self.controller.mode()));
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read sensor → validate + PID →
    /// heating decision → drive actuator → emit events.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        self.tick_count += 1;
        self.now += self.tick_period;
        self.metrics.control_cycles += 1;
        self.metrics.uptime_secs = self.now.as_secs();

        // 1. Read the sensor via SensorPort.
        let raw = hw.read_temperature();

        // 2. Validate and run the PID step.
        match self.controller.compute(raw, self.now) {
            Ok(true) => {
                self.metrics.pid_computes += 1;
                self.trace.record(self.controller.current_temperature());
                debug!(
                    "PID compute — temp {:.1}°C, setpoint {:.1}°C, output {:.1}%",
                    self.controller.current_temperature(),
                    self.controller.setpoint(),
                    self.controller.output()
                );
            }
            Ok(false) => {} // Rate-limited or Manual — output retained.
            Err(e) => {
                // Fail-safe: hold the last known-good actuation.
                self.metrics.rejected_readings += 1;
                warn!("rejected temperature reading {raw}: {e}");
                sink.emit(&AppEvent::ReadingRejected(e));
            }
        }

        // 3. Heating decision → actuator.
        self.apply_heater(hw, sink);

        // 4. Telemetry on cadence.
        if self.tick_count % self.telemetry_every == 0 {
            sink.emit(&AppEvent::Telemetry(self.telemetry()));
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from the setpoint knob, mode button,
    /// app, or serial console).
    pub fn handle_command(
        &mut self,
        cmd: DryerCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            DryerCommand::SetSetpoint(to) => {
                let from = self.controller.setpoint();
                self.controller.set_setpoint(to);
                info!("setpoint changed: {from:.1}°C -> {to:.1}°C");
                sink.emit(&AppEvent::SetpointChanged { from, to });
            }

            DryerCommand::SetTunings { kp, ki, kd } => {
                self.controller.set_tunings(kp, ki, kd);
                info!("PID tunings changed: Kp {kp:.2} Ki {ki:.2} Kd {kd:.2}");
                sink.emit(&AppEvent::TuningsChanged { kp, ki, kd });
            }

            DryerCommand::SetMode { automatic } => {
                self.controller.set_mode(automatic);
                info!(
                    "controller mode set to {}",
                    if automatic { "AUTOMATIC" } else { "MANUAL" }
                );
                sink.emit(&AppEvent::ModeChanged(self.controller.mode()));
            }

            DryerCommand::Reset => {
                self.controller.reset();
                info!("controller reset — integral windup cleared, output forced to 0");
                sink.emit(&AppEvent::ControllerReset);
                // Output is now zero, so this drops the heater at once
                // instead of waiting for the next tick.
                self.apply_heater(hw, sink);
            }

            DryerCommand::GetDiagnostics => {
                sink.emit(&AppEvent::Diagnostics(self.metrics));
            }
        }
    }

    // ── Read accessors ────────────────────────────────────────

    /// The wrapped temperature controller (read-only).
    pub fn controller(&self) -> &TemperatureController {
        &self.controller
    }

    /// Runtime metrics so far.
    pub fn metrics(&self) -> RuntimeMetrics {
        self.metrics
    }

    /// Recent validated-temperature trace.
    pub fn trace(&self) -> &TemperatureTrace {
        &self.trace
    }

    /// Build a telemetry snapshot from current state.
    pub fn telemetry(&self) -> TelemetryData {
        TelemetryData {
            temperature_c: self.controller.current_temperature(),
            setpoint_c: self.controller.setpoint(),
            output_pct: self.controller.output(),
            heating: self.heater_on,
            automatic: self.controller.mode() == crate::control::pid::Mode::Automatic,
            rejected_readings: self.metrics.rejected_readings,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Apply the current heating decision to the actuator and emit an
    /// event when the command level changes.
    fn apply_heater(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let heat = self.controller.should_heat_on();
        hw.set_heater(heat);
        if heat != self.heater_on {
            self.heater_on = heat;
            self.metrics.heater_switches += 1;
            info!("heater {}", if heat { "ON" } else { "OFF" });
            sink.emit(&AppEvent::HeaterChanged(heat));
        }
    }
}
