//! RiceDryer temperature regulation core.
//!
//! Converts a periodic chamber-temperature reading into a bounded heater
//! command while protecting against sensor faults, integral windup, and
//! thermal overshoot. Everything hardware-specific (DHT22, relay/SSR,
//! potentiometer, button, LCD, WiFi) lives outside this crate and plugs
//! in through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
