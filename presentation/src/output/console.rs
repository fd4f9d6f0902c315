//! Console light driver for `--simulate`
//!
//! Draws the LED chain as one line of coloured dots, redrawn in place.

use colored::{ColoredString, Colorize};
use keybow_application::LightDriverPort;
use keybow_domain::Rgb;
use std::io::{self, Write};

const LED_GLYPH: &str = "●";

/// One coloured cell per LED.
pub fn led_cells(pixels: &[Rgb]) -> Vec<ColoredString> {
    pixels
        .iter()
        .map(|p| LED_GLYPH.truecolor(p.r, p.g, p.b))
        .collect()
}

/// The whole chain as a printable row.
pub fn format_led_row(pixels: &[Rgb]) -> String {
    led_cells(pixels)
        .iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Light driver that renders to a terminal.
///
/// Identical consecutive frames are drawn once.
pub struct ConsoleLightDriver<W: Write + Send = io::Stdout> {
    out: W,
    last: Option<Vec<Rgb>>,
}

impl ConsoleLightDriver {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleLightDriver<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }
}

impl<W: Write + Send> LightDriverPort for ConsoleLightDriver<W> {
    fn show(&mut self, pixels: &[Rgb]) -> io::Result<()> {
        if self.last.as_deref() == Some(pixels) {
            return Ok(());
        }
        write!(self.out, "\r{} {}", "LEDs".cyan().bold(), format_led_row(pixels))?;
        self.out.flush()?;
        self.last = Some(pixels.to_vec());
        Ok(())
    }
}
