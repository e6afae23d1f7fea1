//! Constants and configuration parameters for the buffered I/O adapters.

/// Default capacity (in bytes) of the scratch buffer used by
/// [`crate::io::BufferedOutput`] and [`crate::io::BufferedInput`] before
/// flushing to or refilling from the underlying block-oriented stream.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;
