//! End-to-end service tests: scripted sensor in, relay commands out.

use ricedryer::app::commands::DryerCommand;
use ricedryer::app::events::AppEvent;
use ricedryer::app::service::DryerService;
use ricedryer::config::DryerConfig;
use ricedryer::control::pid::Mode;
use ricedryer::error::SensorError;

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

/// One host tick per PID sample keeps cycle arithmetic obvious in tests.
fn test_config() -> DryerConfig {
    DryerConfig {
        control_loop_interval_ms: 1000,
        sample_interval_ms: 1000,
        telemetry_interval_secs: 2,
        ..DryerConfig::default()
    }
}

fn service() -> (DryerService, MockHardware, RecordingSink) {
    let mut svc = DryerService::new(&test_config()).expect("test config is valid");
    let hw = MockHardware::new(20.0);
    let mut sink = RecordingSink::new();
    svc.start(&mut sink);
    (svc, hw, sink)
}

#[test]
fn zero_interval_config_is_rejected() {
    let cfg = DryerConfig {
        control_loop_interval_ms: 0,
        ..DryerConfig::default()
    };
    assert!(DryerService::new(&cfg).is_err());
}

#[test]
fn start_emits_started() {
    let (_, _, sink) = service();
    assert!(matches!(sink.events[0], AppEvent::Started));
}

#[test]
fn cold_chamber_turns_heater_on() {
    let (mut svc, mut hw, mut sink) = service();

    svc.tick(&mut hw, &mut sink);

    assert!(hw.heater_on());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::HeaterChanged(true))), 1);
    assert!(svc.controller().output() > 10.0);
}

#[test]
fn overshoot_drops_heater() {
    let (mut svc, mut hw, mut sink) = service();
    svc.tick(&mut hw, &mut sink);
    assert!(hw.heater_on());

    hw.temperature = 43.0; // setpoint 40 + margin 2, exceeded
    svc.tick(&mut hw, &mut sink);

    assert!(!hw.heater_on());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::HeaterChanged(false))), 1);
}

#[test]
fn rejected_readings_hold_last_actuation() {
    let (mut svc, mut hw, mut sink) = service();
    svc.tick(&mut hw, &mut sink);
    assert!(hw.heater_on());
    let output = svc.controller().output().to_bits();

    hw.temperature = f32::NAN;
    for _ in 0..5 {
        svc.tick(&mut hw, &mut sink);
    }

    // Fail-safe: the heater keeps its last known-good command every cycle.
    assert!(hw.heater_on());
    assert!(matches!(hw.calls.last(), Some(ActuatorCall::SetHeater(true))));
    assert_eq!(svc.controller().output().to_bits(), output);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ReadingRejected(SensorError::NotANumber))),
        5
    );
    assert_eq!(svc.metrics().rejected_readings, 5);
    assert_eq!(svc.controller().mode(), Mode::Automatic);
}

#[test]
fn out_of_range_reading_is_reported_with_cause() {
    let (mut svc, mut hw, mut sink) = service();
    hw.temperature = 900.0; // disconnected thermistor reads absurdly high
    svc.tick(&mut hw, &mut sink);

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ReadingRejected(SensorError::OutOfRange))),
        1
    );
    assert_eq!(
        svc.controller().last_rejection(),
        Some(SensorError::OutOfRange)
    );
}

#[test]
fn setpoint_command_takes_effect_and_is_announced() {
    let (mut svc, mut hw, mut sink) = service();

    svc.handle_command(DryerCommand::SetSetpoint(50.0), &mut hw, &mut sink);

    assert_eq!(svc.controller().setpoint(), 50.0);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::SetpointChanged { from, to } if *from == 40.0 && *to == 50.0
    )));
}

#[test]
fn tunings_command_replaces_gains() {
    let (mut svc, mut hw, mut sink) = service();

    svc.handle_command(
        DryerCommand::SetTunings {
            kp: 3.0,
            ki: 0.2,
            kd: 1.0,
        },
        &mut hw,
        &mut sink,
    );

    assert_eq!(svc.controller().gains(), (3.0, 0.2, 1.0));
}

#[test]
fn reset_command_drops_heater_without_waiting_for_a_tick() {
    let (mut svc, mut hw, mut sink) = service();
    svc.tick(&mut hw, &mut sink);
    assert!(hw.heater_on());

    svc.handle_command(DryerCommand::Reset, &mut hw, &mut sink);

    assert!(!hw.heater_on());
    assert_eq!(svc.controller().output(), 0.0);
    assert_eq!(svc.controller().mode(), Mode::Automatic);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ControllerReset)), 1);
}

#[test]
fn manual_mode_freezes_output_but_interlock_still_governs() {
    let (mut svc, mut hw, mut sink) = service();
    svc.tick(&mut hw, &mut sink);
    let frozen = svc.controller().output();
    assert!(frozen > 10.0);

    svc.handle_command(DryerCommand::SetMode { automatic: false }, &mut hw, &mut sink);

    // Overshoot while in Manual: the interlock must still win.
    hw.temperature = 43.0;
    svc.tick(&mut hw, &mut sink);
    assert!(!hw.heater_on());
    assert_eq!(svc.controller().output(), frozen);

    // Back below the margin: the frozen output commands heat again.
    hw.temperature = 39.0;
    svc.tick(&mut hw, &mut sink);
    assert!(hw.heater_on());
    assert_eq!(svc.controller().output(), frozen);
}

#[test]
fn telemetry_is_emitted_on_cadence() {
    let (mut svc, mut hw, mut sink) = service();

    for _ in 0..6 {
        svc.tick(&mut hw, &mut sink);
    }

    // telemetry_interval_secs = 2 at one tick per second.
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 3);
    let snap = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::Telemetry(t) => Some(*t),
            _ => None,
        })
        .unwrap();
    assert_eq!(snap.setpoint_c, 40.0);
    assert_eq!(snap.temperature_c, 20.0);
    assert!(snap.heating);
    assert!(snap.automatic);
}

#[test]
fn diagnostics_command_reports_counters() {
    let (mut svc, mut hw, mut sink) = service();
    svc.tick(&mut hw, &mut sink);
    hw.temperature = f32::NAN;
    svc.tick(&mut hw, &mut sink);

    svc.handle_command(DryerCommand::GetDiagnostics, &mut hw, &mut sink);

    let metrics = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::Diagnostics(m) => Some(*m),
            _ => None,
        })
        .unwrap();
    assert_eq!(metrics.control_cycles, 2);
    assert_eq!(metrics.pid_computes, 1);
    assert_eq!(metrics.rejected_readings, 1);
    assert!(metrics.heater_switches >= 1);
}

#[test]
fn shutdown_kills_actuators_and_freezes_the_controller() {
    let (mut svc, mut hw, mut sink) = service();
    svc.tick(&mut hw, &mut sink);
    assert!(hw.heater_on());

    svc.shutdown(&mut hw, &mut sink);

    assert!(matches!(hw.calls.last(), Some(ActuatorCall::AllOff)));
    assert!(!hw.heater_on());
    assert_eq!(svc.controller().mode(), Mode::Manual);
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::ModeChanged(Mode::Manual))));
}

#[test]
fn trace_records_only_validated_temperatures() {
    let (mut svc, mut hw, mut sink) = service();
    svc.tick(&mut hw, &mut sink);
    hw.temperature = f32::NAN;
    svc.tick(&mut hw, &mut sink);

    assert_eq!(svc.trace().len(), 1);
    assert_eq!(svc.trace().latest(), Some(20.0));
}
