//! Runtime diagnostics.
//!
//! Counters and a short recent-temperature trace, collected by the service
//! as it runs and reported on demand through the
//! [`GetDiagnostics`](crate::app::commands::DryerCommand::GetDiagnostics)
//! command. Everything here is fixed-capacity — no heap.

use serde::Serialize;

/// Number of samples kept in the recent-temperature trace.
/// One minute of history at the default 1 Hz PID cadence.
const TRACE_SAMPLES: usize = 60;

/// Runtime metrics snapshot.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RuntimeMetrics {
    /// Seconds since the service started.
    pub uptime_secs: u64,
    /// Host ticks processed.
    pub control_cycles: u64,
    /// Effective PID computations (cycles where a new output was produced).
    pub pid_computes: u64,
    /// Readings rejected by validation.
    pub rejected_readings: u32,
    /// Heater on/off transitions.
    pub heater_switches: u32,
}

/// Fixed-capacity ring of recent validated temperatures.
#[derive(Default)]
pub struct TemperatureTrace {
    buf: heapless::HistoryBuffer<f32, TRACE_SAMPLES>,
}

impl TemperatureTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one validated measurement, evicting the oldest when full.
    pub fn record(&mut self, temperature_c: f32) {
        self.buf.write(temperature_c);
    }

    /// The most recent recorded temperature.
    pub fn latest(&self) -> Option<f32> {
        self.buf.recent().copied()
    }

    /// Minimum over the trace window.
    pub fn min(&self) -> Option<f32> {
        self.buf.oldest_ordered().copied().reduce(f32::min)
    }

    /// Maximum over the trace window.
    pub fn max(&self) -> Option<f32> {
        self.buf.oldest_ordered().copied().reduce(f32::max)
    }

    /// Mean over the trace window.
    pub fn mean(&self) -> Option<f32> {
        let n = self.buf.len();
        if n == 0 {
            return None;
        }
        Some(self.buf.oldest_ordered().sum::<f32>() / n as f32)
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }
}
