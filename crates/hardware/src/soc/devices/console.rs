//! Console character stream.
//!
//! Implements the blocking character I/O used by the print/read syscalls and
//! the memory-mapped console registers. It provides:
//! 1. **Device Trait:** `ConsoleDevice`, the byte-level transport.
//! 2. **Line Discipline:** `Console`, with `fgets`-style line reads and
//!    flush-on-write output.
//! 3. **Transports:** `StdioDevice` (process stdin/stdout) and `BufferedDevice`
//!    (in-memory queues for embedding hosts and tests).

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

/// Byte-level console transport.
pub trait ConsoleDevice: Send {
    /// Reads one byte, blocking until it is available.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Writes one byte.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Flushes buffered output.
    fn flush(&mut self) -> io::Result<()>;

    /// Returns true if `read_byte` would return without blocking.
    fn input_available(&mut self) -> bool;
}

/// Line discipline over a `ConsoleDevice`.
pub struct Console {
    device: Box<dyn ConsoleDevice>,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

impl Console {
    /// Wraps a device.
    pub fn new(device: Box<dyn ConsoleDevice>) -> Self {
        Self { device }
    }

    /// Console on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(Box::new(StdioDevice))
    }

    /// Reads a line into `buf`, in the manner of C `fgets`.
    ///
    /// Reading stops after a newline (which is stored), after `buf.len() - 1`
    /// bytes, or at end of input. A NUL terminator follows the data when `buf`
    /// is non-empty, so a one-byte buffer receives only the terminator and no
    /// input is consumed.
    ///
    /// # Returns
    ///
    /// The number of data bytes stored, excluding the terminator.
    pub fn read_line(&mut self, buf: &mut [u8]) -> usize {
        let Some(capacity) = buf.len().checked_sub(1) else {
            return 0;
        };
        let mut len = 0;
        while len < capacity {
            match self.device.read_byte() {
                Ok(Some(byte)) => {
                    buf[len] = byte;
                    len += 1;
                    if byte == b'\n' {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    warn!(%err, "console read failed");
                    break;
                }
            }
        }
        buf[len] = 0;
        len
    }

    /// Reads a single byte, blocking. End of input reads as 0.
    pub fn read_char(&mut self) -> u8 {
        match self.device.read_byte() {
            Ok(Some(byte)) => byte,
            Ok(None) => {
                debug!("console input exhausted");
                0
            }
            Err(err) => {
                warn!(%err, "console read failed");
                0
            }
        }
    }

    /// Writes a byte and flushes it immediately.
    pub fn write_char(&mut self, byte: u8) {
        if let Err(err) = self.device.write_byte(byte).and_then(|()| self.device.flush()) {
            warn!(%err, "console write failed");
        }
    }

    /// Writes a string and flushes it.
    pub fn write_str(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    /// Writes raw bytes and flushes them.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let result = bytes
            .iter()
            .try_for_each(|&b| self.device.write_byte(b))
            .and_then(|()| self.device.flush());
        if let Err(err) = result {
            warn!(%err, "console write failed");
        }
    }

    /// Returns true if the next read would return immediately.
    pub fn input_available(&mut self) -> bool {
        self.device.input_available()
    }
}

/// Console transport over the process's stdin and stdout.
///
/// On Unix `input_available` polls stdin with a zero timeout. On other
/// targets it always reports `false`; polling loops waiting for input there
/// will spin forever, so blocking reads must be used instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdioDevice;

impl ConsoleDevice for StdioDevice {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match io::stdin().lock().read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        io::stdout().lock().write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }

    #[cfg(unix)]
    fn input_available(&mut self) -> bool {
        let mut fds = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: `fds` is a valid, exclusively borrowed pollfd and the count is 1.
        let ready = unsafe { libc::poll(&raw mut fds, 1, 0) };
        ready > 0 && fds.revents & libc::POLLIN != 0
    }

    #[cfg(not(unix))]
    fn input_available(&mut self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
struct Buffers {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

/// In-memory console transport.
///
/// Clones share the same queues, so a host can keep one handle to feed input
/// and collect output while the simulator owns another.
#[derive(Clone, Debug, Default)]
pub struct BufferedDevice {
    inner: Arc<Mutex<Buffers>>,
}

impl BufferedDevice {
    /// Creates a device with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends bytes to the input queue.
    pub fn push_input(&self, bytes: &[u8]) {
        if let Ok(mut buffers) = self.inner.lock() {
            buffers.input.extend(bytes);
        }
    }

    /// Removes and returns everything written so far.
    pub fn take_output(&self) -> Vec<u8> {
        self.inner
            .lock()
            .map(|mut buffers| std::mem::take(&mut buffers.output))
            .unwrap_or_default()
    }

    /// Number of input bytes not yet read.
    pub fn pending(&self) -> usize {
        self.inner.lock().map_or(0, |buffers| buffers.input.len())
    }
}

impl ConsoleDevice for BufferedDevice {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.inner
            .lock()
            .map(|mut buffers| buffers.input.pop_front())
            .map_err(|_| io::Error::other("console buffers poisoned"))
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.inner
            .lock()
            .map(|mut buffers| buffers.output.push(byte))
            .map_err(|_| io::Error::other("console buffers poisoned"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn input_available(&mut self) -> bool {
        self.pending() > 0
    }
}
