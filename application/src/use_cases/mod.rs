//! Use cases (application services)

pub mod run_device;

pub use run_device::DeviceLoop;
