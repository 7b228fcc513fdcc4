//! Error types for header-field parsing.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while lexing or parsing header fields.
///
/// Both kinds are fatal to the current parse call: no partial result is
/// produced and no repair is attempted. The caller decides whether to
/// reject the message, skip the field, or surface a validation error.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed character sequence for the active lexical mode.
    #[error("Lexical error at position {position}: {message}")]
    Lexical {
        /// Byte position where the error occurred.
        position: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// Token stream does not match the expected grammar production.
    #[error("Grammar error at position {position}: {message}")]
    Grammar {
        /// Byte position where the error occurred.
        position: usize,
        /// Description of what went wrong.
        message: String,
    },
}
