//! APA102 LED chain over spidev.

use keybow_application::LightDriverPort;
use keybow_domain::Rgb;
use std::fs::File;
use std::io::{self, Write};

/// Highest value of the 5-bit global brightness field.
pub const APA102_MAX_BRIGHTNESS: u8 = 31;

/// Encode one APA102 frame.
///
/// Layout: four zero bytes, then `[0xE0 | brightness, b, g, r]` per LED,
/// then `max(4, ceil(n / 16))` bytes of `0xFF` to clock the data through.
pub fn encode_apa102_frame(pixels: &[Rgb], brightness: u8) -> Vec<u8> {
    let level = 0xE0 | brightness.min(APA102_MAX_BRIGHTNESS);
    let end_len = pixels.len().div_ceil(16).max(4);

    let mut frame = Vec::with_capacity(4 + pixels.len() * 4 + end_len);
    frame.extend_from_slice(&[0; 4]);
    for p in pixels {
        frame.extend_from_slice(&[level, p.b, p.g, p.r]);
    }
    frame.resize(frame.len() + end_len, 0xFF);
    frame
}

/// Light driver writing whole frames to a spidev node.
pub struct Apa102Spi<W: Write + Send = File> {
    spi: W,
    brightness: u8,
}

impl<W: Write + Send> Apa102Spi<W> {
    pub fn new(spi: W, brightness: u8) -> Self {
        Self {
            spi,
            brightness: brightness.min(APA102_MAX_BRIGHTNESS),
        }
    }
}

impl<W: Write + Send> LightDriverPort for Apa102Spi<W> {
    fn show(&mut self, pixels: &[Rgb]) -> io::Result<()> {
        // spidev treats each write as one transfer
        self.spi.write_all(&encode_apa102_frame(pixels, self.brightness))?;
        self.spi.flush()
    }
}
