//! LED driver port

use keybow_domain::Rgb;
use std::io;

/// Port for the physical LED chain.
pub trait LightDriverPort: Send {
    /// Push a full frame, one colour per LED in buffer order.
    fn show(&mut self, pixels: &[Rgb]) -> io::Result<()>;
}

pub struct NullLightDriver;

impl LightDriverPort for NullLightDriver {
    fn show(&mut self, _pixels: &[Rgb]) -> io::Result<()> {
        Ok(())
    }
}
