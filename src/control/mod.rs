//! Closed-loop control: the PID engine and the temperature controller
//! that wraps it with validation and overshoot protection.

pub mod pid;
pub mod temperature;
