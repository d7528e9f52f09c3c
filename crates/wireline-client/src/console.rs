//! Console output abstraction.
//!
//! Decouples the session from the terminal so tests can capture everything
//! the user would see. The production implementation lives with the binary;
//! this crate only depends on the seam.

/// Sink for user-facing output.
pub trait Console: Send {
    /// Print one line of chat or handshake output.
    fn line(&mut self, text: &str);

    /// Print one line of error output.
    fn error(&mut self, text: &str);
}
