//! Error types.
//!
//! Out-of-range coordinates are never an error: every coordinate-consuming call clamps its input
//! first. The remaining failure modes are a read-only editor, a language definition that does not
//! compile, and (only through the checked codec entry point) malformed UTF-8.

use thiserror::Error;

/// Errors returned by mutating editor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The editor is read-only; nothing was changed and no undo record was added.
    #[error("the editor is read-only")]
    ReadonlyViolation,
}

/// Errors produced when a language definition is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    /// A token pattern is not a valid regular expression.
    #[error("invalid token pattern `{pattern}`: {message}")]
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// Message reported by the regex compiler.
        message: String,
    },
    /// A token pattern is the empty string.
    #[error("token patterns must not be empty")]
    EmptyPattern,
}

/// A byte run that is not well-formed UTF-8.
///
/// `consumed` is how many bytes a decoder should skip before trying again (at least 1 for
/// non-empty input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed UTF-8 sequence ({consumed} byte(s))")]
pub struct MalformedEncoding {
    /// Bytes to skip.
    pub consumed: usize,
}
