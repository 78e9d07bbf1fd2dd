//! Grammar profiles: the closed set of literal grammars the scanner knows.
//!
//! One scanning engine serves every language surface. A profile selects
//! which bytes can start a token, which comment styles exist, and how
//! quoted strings end.

/// Literal grammar for one language surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrammarProfile {
    /// Strict JSON: `"` strings only, no comments.
    Json,
    /// JSON with `//` and `/* */` comments.
    Jsonc,
    /// JavaScript and TypeScript: three quote styles, template literals
    /// with `${...}` holes, comments, and regex literals.
    Script,
    /// Rust: strings, chars, raw strings, and nesting block comments.
    Rust,
}

impl GrammarProfile {
    /// Bytes that may begin a non-skipped token. Everything else is
    /// coalesced into [`RawTag::Skipped`](crate::RawTag::Skipped) runs.
    pub fn start_bytes(self) -> &'static [u8] {
        match self {
            Self::Json => b"\"",
            Self::Jsonc => b"\"/",
            Self::Script => b"\"'`/{}",
            Self::Rust => b"\"'/r",
        }
    }

    /// Whether `//` and `/* */` comments exist.
    pub fn has_comments(self) -> bool {
        !matches!(self, Self::Json)
    }

    /// Whether block comments nest.
    pub fn nested_block_comments(self) -> bool {
        matches!(self, Self::Rust)
    }

    /// Whether `"` strings may contain raw line breaks.
    pub fn multiline_strings(self) -> bool {
        matches!(self, Self::Rust)
    }

    /// Whether `\` followed by a line break continues a single-line string.
    pub fn line_continuations(self) -> bool {
        matches!(self, Self::Script)
    }
}
