//! Raw token tags, per-token flags, and the raw token itself.
//!
//! The scanner only distinguishes what the locators care about: literal
//! tokens (strings, chars, raw strings, template fragments), trivia that
//! must be skipped as a unit (comments, regex literals, coalesced plain
//! text), and the braces that drive template nesting.

/// Kind of a raw token.
///
/// Discriminants are grouped in ranges so a tag fits in one byte and
/// range checks stay cheap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // === Literals: 0-15 ===
    /// Quoted string (`"..."`, JS `'...'`, or a template without holes).
    String = 0,
    /// Rust char or byte-char literal (`'x'`, `b'\n'`).
    Char = 1,
    /// Rust raw string (`r#"..."#`).
    RawString = 2,

    // === Template Fragments: 16-18 ===
    /// `` `text${ ``: opens a template and its first hole.
    TemplateLeft = 16,
    /// `` }text${ ``: closes one hole and opens the next.
    TemplateMiddle = 17,
    /// `` }text` ``: closes the last hole and the template.
    TemplateRight = 18,

    // === Punctuation: 80-81 ===
    /// `{` outside any literal (JS/TS brace bookkeeping).
    LeftBrace = 80,
    /// `}` that does not continue a template.
    RightBrace = 81,

    // === Trivia: 112-114 ===
    /// Coalesced run of text that cannot start a literal.
    Skipped = 112,
    /// Line or block comment.
    Comment = 113,
    /// JS/TS regular-expression literal.
    Regex = 114,

    // === Control: 255 ===
    /// End of the window. Always has `len == 0`.
    Eof = 255,
}

impl RawTag {
    /// Returns `true` for tags whose content is a previewable literal on
    /// its own (not a template fragment).
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(self, Self::String | Self::Char | Self::RawString)
    }

    /// Returns `true` for the three interpolated-template fragment tags.
    #[inline]
    pub fn is_template_fragment(self) -> bool {
        matches!(
            self,
            Self::TemplateLeft | Self::TemplateMiddle | Self::TemplateRight
        )
    }

    /// Returns `true` for tags that never hold a literal value.
    #[cfg(test)]
    pub(crate) fn is_trivia(self) -> bool {
        matches!(self, Self::Skipped | Self::Comment | Self::Regex)
    }

    /// Human-readable name for logs and test failure messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Char => "char",
            Self::RawString => "raw string",
            Self::TemplateLeft => "template left",
            Self::TemplateMiddle => "template middle",
            Self::TemplateRight => "template right",
            Self::LeftBrace => "`{`",
            Self::RightBrace => "`}`",
            Self::Skipped => "skipped text",
            Self::Comment => "comment",
            Self::Regex => "regex",
            Self::Eof => "end of window",
        }
    }
}

/// Per-token metadata flags.
///
/// Structural problems found while scanning are recorded here instead of
/// being reported as errors. The escape bits double as the descriptor the
/// locators use to skip literals that already read clearly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TokenFlags(u8);

impl TokenFlags {
    /// The closing delimiter is missing; the token ends at a line break or
    /// at the end of the window.
    pub const UNCLOSED: u8 = 1 << 0;
    /// The content contains at least one `\`.
    pub const HAS_ESCAPE: u8 = 1 << 1;
    /// The content contains a raw line break.
    pub const HAS_NEWLINE: u8 = 1 << 2;
    /// A `}` with nothing to close.
    pub const STRAY_BRACE: u8 = 1 << 3;

    /// Empty flags (no bits set).
    pub const EMPTY: Self = TokenFlags(0);

    /// Create flags from raw bits.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        TokenFlags(bits)
    }

    /// Get the raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if a specific flag is set.
    #[inline]
    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set a flag.
    #[inline]
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Compute the escape descriptor bits for literal content.
    pub fn describe(content: &[u8]) -> Self {
        let mut flags = Self::EMPTY;
        if memchr::memchr(b'\\', content).is_some() {
            flags.set(Self::HAS_ESCAPE);
        }
        if memchr::memchr2(b'\n', b'\r', content).is_some() {
            flags.set(Self::HAS_NEWLINE);
        }
        flags
    }

    /// Check if the closing delimiter is missing.
    #[inline]
    pub const fn is_unclosed(self) -> bool {
        self.contains(Self::UNCLOSED)
    }

    /// Check if the content contains a backslash.
    #[inline]
    pub const fn has_escape(self) -> bool {
        self.contains(Self::HAS_ESCAPE)
    }

    /// Check if the content contains a raw line break.
    #[inline]
    pub const fn has_newline(self) -> bool {
        self.contains(Self::HAS_NEWLINE)
    }
}

/// A raw token: tag, flags, and its byte span within the fed window.
///
/// `start` is relative to the window, not the document. Callers that feed
/// a window which does not begin at the document start must convert their
/// cursor into window coordinates before comparing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawToken {
    pub tag: RawTag,
    pub flags: TokenFlags,
    pub start: u32,
    pub len: u32,
}

impl RawToken {
    /// Exclusive end offset.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.len
    }

    /// Returns `true` if `offset` lies within the token, counting the
    /// position right after the last byte as inside.
    #[inline]
    pub fn covers(&self, offset: u32) -> bool {
        self.start <= offset && offset <= self.end()
    }

    /// The raw text of this token within `window`.
    ///
    /// Returns `""` if the span does not fit `window` (a token from a
    /// different window).
    pub fn content<'w>(&self, window: &'w str) -> &'w str {
        window
            .get(self.start as usize..self.end() as usize)
            .unwrap_or("")
    }
}
