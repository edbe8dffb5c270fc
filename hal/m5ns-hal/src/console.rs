//! Serial console abstractions
//!
//! Provides a write-only, line-oriented text sink used for boot-time
//! diagnostics.

/// Line-oriented text output
///
/// Implementations append their own line terminator.
pub trait LineSink {
    /// Error type for write operations
    type Error;

    /// Write one line of text
    ///
    /// Blocks until the line has been written or an error occurs.
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    type Error = T::Error;

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        (**self).write_line(line)
    }
}
