//! Station storage error types.

/// Errors raised by a station store.
///
/// Cloneable so that a failure can be broadcast to every catalog subscriber.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed
    #[error("storage I/O error: {message}")]
    Io { message: String },

    /// Stored data could not be decoded
    #[error("corrupt station data: {message}")]
    Corrupt { message: String },
}
