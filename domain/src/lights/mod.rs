//! LED colours, the light buffer and decoded patterns.

/// One LED colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One colour per LED, indexed by LED position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightBuffer {
    pixels: Vec<Rgb>,
}

impl LightBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![Rgb::BLACK; len],
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, led: usize) -> Option<Rgb> {
        self.pixels.get(led).copied()
    }

    /// Returns `false` when `led` is outside the buffer.
    pub fn set(&mut self, led: usize, color: Rgb) -> bool {
        match self.pixels.get_mut(led) {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Overwrite the whole buffer from `frame`; LEDs past its end go black.
    pub fn load_frame(&mut self, frame: &[Rgb]) {
        for (led, pixel) in self.pixels.iter_mut().enumerate() {
            *pixel = frame.get(led).copied().unwrap_or(Rgb::BLACK);
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}

/// A decoded still image: every row is a frame, every column an LED.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    pixels: Vec<Rgb>,
}

impl Pattern {
    /// `pixels` is row-major; a trailing partial row is discarded.
    pub fn new(width: usize, mut pixels: Vec<Rgb>) -> Self {
        if width == 0 {
            pixels.clear();
        } else {
            pixels.truncate(pixels.len() - pixels.len() % width);
        }
        Self { width, pixels }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn frame_count(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.pixels.len() / self.width
        }
    }

    /// Pixels of frame `index`, or `None` past the last frame.
    pub fn frame(&self, index: usize) -> Option<&[Rgb]> {
        if index >= self.frame_count() {
            return None;
        }
        let start = index * self.width;
        self.pixels.get(start..start + self.width)
    }
}
