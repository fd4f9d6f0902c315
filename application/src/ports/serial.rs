//! Serial link port
//!
//! The serial gadget is polled: `read` returns whatever bytes are
//! available right now, possibly none.

use std::io;

pub trait SerialPort: Send {
    /// Read the currently available bytes without blocking.
    fn read(&mut self) -> io::Result<Vec<u8>>;

    /// Write `data`, returning how many bytes were accepted.
    fn write(&mut self, data: &[u8]) -> io::Result<usize>;
}

/// Serial port with nothing attached: reads are empty, writes go nowhere.
pub struct NullSerialPort;

impl SerialPort for NullSerialPort {
    fn read(&mut self) -> io::Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn write(&mut self, _data: &[u8]) -> io::Result<usize> {
        Ok(0)
    }
}
