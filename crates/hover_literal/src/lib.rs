//! String literal hover previews.
//!
//! Given a document and a cursor, a [`LiteralLocator`] finds the string
//! literal under the cursor and returns its decoded value, so an editor can
//! show what `"a\tbé"` actually contains. Four surfaces are supported:
//! strict JSON, JSON with comments, JavaScript/TypeScript, and Rust.
//!
//! # Architecture
//!
//! - [`TextSource`]: line and UTF-16 column access to the document
//! - `hover_scan_core`: literal boundaries inside a window
//! - [`TemplateTracker`]: reassembly of interpolated JS/TS templates
//! - [`unescape`] and the `decode_*` functions: per-language escape decoding
//!
//! A locator returns `None` when no literal covers the cursor, when the
//! literal already reads as its value, when decoding fails, or when its
//! [`Cancellation`] signal fires.
//!
//! # Example
//!
//! ```
//! use hover_literal::{LiteralLocator, NeverCancelled, Position, ScriptLocator, SourceText};
//!
//! let source = SourceText::new("const s = 'tab:\\t';");
//! let value = ScriptLocator.locate(&source, Position::new(0, 12), &NeverCancelled);
//! assert_eq!(value.as_deref(), Some("tab:\t"));
//! ```

mod cancel;
mod config;
mod decode_error;
mod escape;
mod locate;
mod template;
mod text_source;

pub use cancel::{CancelFlag, Cancellation, NeverCancelled};
pub use config::{JsonEscapePolicy, LocatorConfig, DEFAULT_JSON_ESCAPE_POLICY};
pub use decode_error::DecodeError;
pub use escape::{
    decode_json_string, decode_rust_raw_string, decode_rust_string, decode_script_segment,
    decode_script_string, unescape, Escape, EscapeGrammar, EscapeKind,
};
pub use locate::{
    JsonLocator, JsoncLocator, LiteralLocator, RustLocator, ScriptLocator, Surface,
};
pub use template::{TemplateTracker, PLACEHOLDER};
pub use text_source::{byte_to_utf16, utf16_to_byte, Position, SourceText, TextSource};
