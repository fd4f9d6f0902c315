//! Terminal output: simulated LEDs and start-up reports

pub mod console;
pub mod formatter;
