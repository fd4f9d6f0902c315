//! Serial gadget tty.

use keybow_application::SerialPort;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// Most bytes returned by one read.
pub const SERIAL_READ_CHUNK: usize = 256;

/// Polled serial link over a non-blocking tty.
pub struct SerialTty<T: Read + Write + Send = File> {
    tty: T,
}

impl SerialTty<File> {
    /// Open `path` read-write without blocking on reads.
    pub fn open_nonblocking(path: &Path) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.read(true).write(true);
        #[cfg(target_os = "linux")]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.custom_flags(libc::O_NONBLOCK | libc::O_NOCTTY);
        }
        options.open(path)
    }
}

impl<T: Read + Write + Send> SerialTty<T> {
    pub fn new(tty: T) -> Self {
        Self { tty }
    }
}

impl<T: Read + Write + Send> SerialPort for SerialTty<T> {
    fn read(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = [0u8; SERIAL_READ_CHUNK];
        match self.tty.read(&mut buf) {
            Ok(n) => Ok(buf[..n].to_vec()),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(Vec::new()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match self.tty.write(data) {
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            other => other,
        }
    }
}
