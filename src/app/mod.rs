//! Application layer: ports, commands, events, and the orchestrating
//! service. Hardware adapters live outside this crate and plug in via
//! the traits in [`ports`].

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
