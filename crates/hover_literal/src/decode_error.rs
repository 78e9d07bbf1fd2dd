//! Errors from the escape decoders.
//!
//! Only the strict JSON decoder rejects input; every other decoder is
//! lenient and passes malformed escapes through. Offsets are byte offsets
//! into the raw literal text, delimiters included.

use thiserror::Error;

/// Why a literal could not be decoded.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// A `\` followed by a character outside the escape set.
    #[error("invalid escape `\\{escape}` at byte {offset}")]
    InvalidEscape { offset: usize, escape: char },
    /// A `\u` not followed by four hex digits.
    #[error("invalid unicode escape at byte {offset}")]
    InvalidUnicodeEscape { offset: usize },
    /// A `\` with nothing after it.
    #[error("dangling backslash at byte {offset}")]
    DanglingBackslash { offset: usize },
}

impl DecodeError {
    /// Byte offset of the offending `\` within the raw literal.
    pub fn offset(&self) -> usize {
        match *self {
            Self::InvalidEscape { offset, .. }
            | Self::InvalidUnicodeEscape { offset }
            | Self::DanglingBackslash { offset } => offset,
        }
    }
}

#[cfg(test)]
mod tests;
