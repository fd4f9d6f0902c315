//! HID output: the state machine wired to its transports.

mod controller;

pub use controller::HidController;
