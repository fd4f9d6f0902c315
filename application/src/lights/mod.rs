//! Light buffer arbitration and the automatic pattern animation.

mod arbiter;
mod auto;

pub use arbiter::LightArbiter;
pub use auto::AutoLights;
