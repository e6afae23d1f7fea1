//! Buffered adapters placed between a [`crate::codec`] encoder/decoder and
//! the caller's underlying stream, so a schema walk that issues many small
//! reads or writes (one per primitive field) does not turn into one
//! syscall per field.

use crate::config::DEFAULT_BUFFER_SIZE;
use std::io::{BufReader, BufWriter, Read, Write};

/// Wraps a [`Write`] in a fixed-size output buffer. Callers building a
/// [`crate::generic::GenericWriter`] over a raw `File` or socket should
/// wrap it in a `BufferedOutput` first; wrapping an already-buffered
/// writer (e.g. a `Vec<u8>`) is harmless but unnecessary.
pub struct BufferedOutput<W: Write>(BufWriter<W>);

impl<W: Write> BufferedOutput<W> {
    pub fn new(inner: W) -> Self {
        BufferedOutput(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, inner))
    }

    /// Flushes the buffer and returns the underlying writer.
    pub fn into_inner(self) -> std::io::Result<W> {
        self.0
            .into_inner()
            .map_err(|e| e.into_error())
    }
}

impl<W: Write> Write for BufferedOutput<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}

/// Wraps a [`Read`] in a fixed-size input buffer, for the same reason as
/// [`BufferedOutput`].
pub struct BufferedInput<R: Read>(BufReader<R>);

impl<R: Read> BufferedInput<R> {
    pub fn new(inner: R) -> Self {
        BufferedInput(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, inner))
    }

    pub fn into_inner(self) -> R {
        self.0.into_inner()
    }
}

impl<R: Read> Read for BufferedInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.0.read(buf)
    }
}
