//! Low-level literal scanner for string hover previews.
//!
//! This crate finds the boundaries of string-like literals in a text window
//! for four grammar profiles (JSON, JSONC, JavaScript/TypeScript, Rust).
//! It knows nothing about positions, escapes, or editors: it turns bytes
//! into [`RawToken`] spans with [`TokenFlags`] describing what the literal
//! contains. Decoding and cursor mapping live in `hover_literal`.
//!
//! # Pipeline
//!
//! ```text
//! &str window -> SourceBuffer (sentinel-padded) -> Cursor -> RawScanner -> RawToken*
//! ```
//!
//! # Example
//!
//! ```
//! use hover_scan_core::{tokenize, GrammarProfile, RawTag};
//!
//! let window = r#"{"key": "a\nb"}"#;
//! let literals: Vec<_> = tokenize(window, GrammarProfile::Json)
//!     .into_iter()
//!     .filter(|tok| tok.tag == RawTag::String)
//!     .map(|tok| tok.content(window))
//!     .collect();
//! assert_eq!(literals, [r#""key""#, r#""a\nb""#]);
//! ```

mod cursor;
mod grammar;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use grammar::GrammarProfile;
pub use raw_scanner::{tokenize, RawScanner};
pub use source_buffer::SourceBuffer;
pub use tag::{RawTag, RawToken, TokenFlags};
