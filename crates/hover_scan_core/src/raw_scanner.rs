//! Hand-written raw scanner producing literal-relevant tokens.
//!
//! The scanner operates on a sentinel-terminated [`Cursor`] and produces
//! [`RawToken`] values with zero heap allocation (the brace-depth stack
//! lives inline until templates nest more than four levels deep). It does
//! not decode escapes; it only finds literal boundaries and records what
//! it saw in [`TokenFlags`].
//!
//! # Design
//!
//! Dispatch is on the grammar profile and the current byte. Bytes that
//! cannot begin a token for the active profile are coalesced into a single
//! [`RawTag::Skipped`] run using memchr. Bytes that *might* begin a token
//! (`'` in Rust, `r` in Rust, `/` with comments) are probed on a copy of the
//! cursor; a failed probe leaves them inside the skipped run.
//!
//! # Template Nesting
//!
//! For [`GrammarProfile::Script`] the scanner keeps a brace-depth stack.
//! Level 0 is the document itself; each open `` `...${ `` pushes a level.
//! The top counter tracks unmatched `{` inside the current interpolation.
//! A `}` continues a template only when that counter is 0 and a template
//! level is open; otherwise it is ordinary punctuation.

use smallvec::{smallvec, SmallVec};

use crate::cursor::Cursor;
use crate::grammar::GrammarProfile;
use crate::tag::{RawTag, RawToken, TokenFlags};

/// Keywords after which a `/` starts a regex literal rather than a division.
const REGEX_PRECEDING_KEYWORDS: &[&[u8]] = &[
    b"await", b"case", b"delete", b"do", b"else", b"in", b"instanceof", b"new", b"of", b"return",
    b"throw", b"typeof", b"void", b"yield",
];

/// How the template fragment being scanned was opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FragmentOpener {
    /// `` ` ``: the start of a template.
    Backtick,
    /// `}`: the end of an interpolation hole.
    Brace,
}

/// Per-call scanner over one literal window.
///
/// Produces one token at a time. Structural problems (unclosed literals,
/// stray braces) are encoded as [`TokenFlags`], never as errors.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    profile: GrammarProfile,
    /// Brace-depth stack. Never empty: index 0 is the top level.
    brace_depth: SmallVec<[u32; 4]>,
}

impl<'a> RawScanner<'a> {
    /// Create a new scanner from a cursor and the grammar of the window.
    pub fn new(cursor: Cursor<'a>, profile: GrammarProfile) -> Self {
        Self {
            cursor,
            profile,
            brace_depth: smallvec![0],
        }
    }

    /// Current byte offset in the window.
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Number of levels on the brace-depth stack.
    ///
    /// `1` means "not inside any template"; each open template adds one.
    #[cfg(test)]
    pub(crate) fn template_depth(&self) -> usize {
        self.brace_depth.len()
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the window is exhausted.
    /// Subsequent calls after EOF continue to return `Eof`.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return RawToken {
                tag: RawTag::Eof,
                flags: TokenFlags::EMPTY,
                start,
                len: 0,
            };
        }
        match (self.profile, self.cursor.current()) {
            (GrammarProfile::Script, b'\'') => self.quoted(start, b'\''),
            (_, b'"') => self.quoted(start, b'"'),
            (GrammarProfile::Script, b'`') => {
                self.cursor.advance(); // consume opening '`'
                self.template_fragment(start, FragmentOpener::Backtick)
            }
            (GrammarProfile::Script, b'{') => self.left_brace(start),
            (GrammarProfile::Script, b'}') => self.right_brace(start),
            (GrammarProfile::Rust, b'\'') => match self.probe_char_literal() {
                Some(end) => {
                    self.cursor = end;
                    self.literal(RawTag::Char, start, false)
                }
                None => self.skipped(start),
            },
            (GrammarProfile::Rust, b'r') => match self.probe_raw_opener() {
                Some((body, hashes)) => {
                    self.cursor = body;
                    let closed = self.cursor.eat_raw_string_body(hashes);
                    self.literal(RawTag::RawString, start, !closed)
                }
                None => self.skipped(start),
            },
            (profile, b'/') if profile.has_comments() => self.slash(start),
            _ => self.skipped(start),
        }
    }

    // ─── Token Construction ────────────────────────────────────────

    /// Build a literal-kind token ending at the cursor, computing its
    /// escape descriptor.
    fn literal(&self, tag: RawTag, start: u32, unclosed: bool) -> RawToken {
        let end = self.cursor.pos();
        let mut flags = TokenFlags::describe(self.cursor.bytes(start, end));
        if unclosed {
            flags.set(TokenFlags::UNCLOSED);
        }
        RawToken {
            tag,
            flags,
            start,
            len: end - start,
        }
    }

    /// Build a token without content metadata ending at the cursor.
    fn plain(&self, tag: RawTag, start: u32, flags: TokenFlags) -> RawToken {
        RawToken {
            tag,
            flags,
            start,
            len: self.cursor.pos() - start,
        }
    }

    // ─── Skipped Text ──────────────────────────────────────────────

    /// Coalesce everything up to the next real token start into one run.
    ///
    /// The byte at `start` is known not to begin a token.
    fn skipped(&mut self, start: u32) -> RawToken {
        self.cursor.advance_char();
        loop {
            self.cursor.eat_until_any(self.profile.start_bytes());
            if self.cursor.is_eof() || self.begins_token() {
                break;
            }
            // Every start byte is ASCII.
            self.cursor.advance();
        }
        self.plain(RawTag::Skipped, start, TokenFlags::EMPTY)
    }

    /// Does the byte at the cursor begin a token for this profile?
    fn begins_token(&self) -> bool {
        match (self.profile, self.cursor.current()) {
            (_, b'"') | (GrammarProfile::Script, b'\'' | b'`' | b'{' | b'}') => true,
            (GrammarProfile::Rust, b'\'') => self.probe_char_literal().is_some(),
            (GrammarProfile::Rust, b'r') => self.probe_raw_opener().is_some(),
            (profile, b'/') if profile.has_comments() => {
                matches!(self.cursor.peek(), b'/' | b'*')
                    || (profile == GrammarProfile::Script && self.probe_regex().is_some())
            }
            _ => false,
        }
    }

    // ─── Quoted Strings ────────────────────────────────────────────

    /// Scan a `quote`-delimited string.
    ///
    /// JSON and JS strings end (unclosed) at a raw line break; JS allows a
    /// `\` line continuation; Rust strings may span lines freely.
    fn quoted(&mut self, start: u32, quote: u8) -> RawToken {
        self.cursor.advance(); // consume opening quote
        let multiline = self.profile.multiline_strings();
        let continuation = self.profile.line_continuations();
        loop {
            match self.cursor.skip_to_string_delim(quote) {
                b'\\' => {
                    self.cursor.advance(); // consume '\'
                    match self.cursor.current() {
                        b'\n' | b'\r' if multiline || continuation => {
                            self.cursor.eat_newline();
                        }
                        // JSON: the line break still ends the string.
                        b'\n' | b'\r' => {}
                        _ if self.cursor.is_eof() => {}
                        _ => self.cursor.advance_char(),
                    }
                }
                b'\n' | b'\r' if multiline => {
                    self.cursor.eat_newline();
                }
                b'\n' | b'\r' => return self.literal(RawTag::String, start, true),
                _ if self.cursor.is_eof() => return self.literal(RawTag::String, start, true),
                _ => {
                    self.cursor.advance(); // consume closing quote
                    return self.literal(RawTag::String, start, false);
                }
            }
        }
    }

    // ─── Template Literals ─────────────────────────────────────────

    /// Scan template text after its opener up to `` ` `` or `${`.
    ///
    /// | opener | ends with `` ` `` | ends with `${` | window ends |
    /// |--------|------------------|----------------|-------------|
    /// | `` ` `` | `String` | `TemplateLeft` (push) | `String`, unclosed |
    /// | `}` | `TemplateRight` (pop) | `TemplateMiddle` | `TemplateRight` (pop), unclosed |
    fn template_fragment(&mut self, start: u32, opener: FragmentOpener) -> RawToken {
        loop {
            match self.cursor.skip_to_template_delim() {
                b'`' => {
                    self.cursor.advance();
                    return match opener {
                        FragmentOpener::Backtick => self.literal(RawTag::String, start, false),
                        FragmentOpener::Brace => {
                            self.pop_template_level();
                            self.literal(RawTag::TemplateRight, start, false)
                        }
                    };
                }
                b'$' if self.cursor.peek() == b'{' => {
                    self.cursor.advance_n(2);
                    return match opener {
                        FragmentOpener::Backtick => {
                            self.brace_depth.push(0);
                            self.literal(RawTag::TemplateLeft, start, false)
                        }
                        FragmentOpener::Brace => self.literal(RawTag::TemplateMiddle, start, false),
                    };
                }
                b'$' => self.cursor.advance(),
                b'\\' => {
                    self.cursor.advance();
                    self.cursor.advance_char();
                }
                _ => {
                    return match opener {
                        FragmentOpener::Backtick => self.literal(RawTag::String, start, true),
                        FragmentOpener::Brace => {
                            self.pop_template_level();
                            self.literal(RawTag::TemplateRight, start, true)
                        }
                    };
                }
            }
        }
    }

    fn pop_template_level(&mut self) {
        if self.brace_depth.len() > 1 {
            self.brace_depth.pop();
        }
    }

    fn left_brace(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        if let Some(depth) = self.brace_depth.last_mut() {
            *depth = depth.saturating_add(1);
        }
        self.plain(RawTag::LeftBrace, start, TokenFlags::EMPTY)
    }

    fn right_brace(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '}'
        if let Some(depth) = self.brace_depth.last_mut().filter(|depth| **depth > 0) {
            *depth -= 1;
            return self.plain(RawTag::RightBrace, start, TokenFlags::EMPTY);
        }
        if self.brace_depth.len() > 1 {
            // Balanced interpolation inside an open template: this `}`
            // closes the hole.
            return self.template_fragment(start, FragmentOpener::Brace);
        }
        self.plain(
            RawTag::RightBrace,
            start,
            TokenFlags::from_bits(TokenFlags::STRAY_BRACE),
        )
    }

    // ─── Comments & Regex ──────────────────────────────────────────

    fn slash(&mut self, start: u32) -> RawToken {
        match self.cursor.peek() {
            b'/' => {
                self.cursor.advance_n(2);
                self.cursor.eat_until_newline_or_eof();
                self.plain(RawTag::Comment, start, TokenFlags::EMPTY)
            }
            b'*' => {
                self.cursor.advance_n(2);
                if self.profile.nested_block_comments() {
                    self.cursor.eat_nested_block_comment();
                } else {
                    self.cursor.eat_block_comment();
                }
                self.plain(RawTag::Comment, start, TokenFlags::EMPTY)
            }
            _ => match self.probe_regex() {
                Some(end) => {
                    self.cursor = end;
                    self.plain(RawTag::Regex, start, TokenFlags::EMPTY)
                }
                _ => self.skipped(start),
            },
        }
    }

    /// Probe a regex literal at the cursor (a `/` that is not a comment).
    ///
    /// This is a heuristic: a `/` is a regex start only when the previous
    /// significant byte puts it in expression-start position. The body must
    /// close on the same line; `\` escapes and `[...]` classes are honored.
    fn probe_regex(&self) -> Option<Cursor<'a>> {
        if self.profile != GrammarProfile::Script || !self.regex_allowed() {
            return None;
        }
        let mut probe = self.cursor;
        probe.advance(); // consume opening '/'
        let mut in_class = false;
        loop {
            if probe.is_eof() {
                return None;
            }
            match probe.current() {
                b'\n' | b'\r' => return None,
                b'\\' => {
                    probe.advance();
                    if probe.is_eof() || matches!(probe.current(), b'\n' | b'\r') {
                        return None;
                    }
                    probe.advance_char();
                }
                b'[' => {
                    in_class = true;
                    probe.advance();
                }
                b']' => {
                    in_class = false;
                    probe.advance();
                }
                b'/' if !in_class => {
                    probe.advance();
                    probe.eat_while(|b| b.is_ascii_alphabetic());
                    return Some(probe);
                }
                _ => probe.advance_char(),
            }
        }
    }

    /// Is a `/` at the cursor in expression-start position?
    fn regex_allowed(&self) -> bool {
        let before = self.cursor.preceding(self.cursor.pos());
        let Some(last) = before.iter().rposition(|b| !b.is_ascii_whitespace()) else {
            return true;
        };
        let trimmed = before.get(..=last).unwrap_or_default();
        match trimmed {
            [.., b')' | b']' | b'}' | b'"' | b'\'' | b'`'] => false,
            // Postfix `++` / `--` ends an operand.
            [.., b'+', b'+'] | [.., b'-', b'-'] => false,
            [.., b] if is_ident_byte(*b) => {
                let word_start = trimmed
                    .iter()
                    .rposition(|&b| !is_ident_byte(b))
                    .map_or(0, |i| i + 1);
                let word = trimmed.get(word_start..).unwrap_or_default();
                REGEX_PRECEDING_KEYWORDS.contains(&word)
            }
            _ => true,
        }
    }

    // ─── Rust Literals ─────────────────────────────────────────────

    /// Probe a Rust char literal at the cursor: `'`, one character or one
    /// escape, then `'`. Anything else is a lifetime or label tick.
    fn probe_char_literal(&self) -> Option<Cursor<'a>> {
        let mut probe = self.cursor;
        probe.advance(); // consume opening '\''
        match probe.current() {
            b'\\' => {
                probe.advance();
                if probe.is_eof() {
                    return None;
                }
                let escaped = probe.current();
                probe.advance_char();
                match escaped {
                    b'u' if probe.current() == b'{' => {
                        let mut steps = 0;
                        while probe.current() != b'}' {
                            if probe.is_eof()
                                || steps > 8
                                || matches!(probe.current(), b'\'' | b'\n' | b'\r')
                            {
                                return None;
                            }
                            probe.advance();
                            steps += 1;
                        }
                        probe.advance(); // consume '}'
                    }
                    b'x' => {
                        for _ in 0..2 {
                            if probe.current().is_ascii_hexdigit() {
                                probe.advance();
                            }
                        }
                    }
                    _ => {}
                }
            }
            b'\'' | b'\n' | b'\r' => return None,
            _ if probe.is_eof() => return None,
            _ => probe.advance_char(),
        }
        if probe.is_eof() || probe.current() != b'\'' {
            return None;
        }
        probe.advance(); // consume closing '\''
        Some(probe)
    }

    /// Probe a raw-string opener `r#*"` at the cursor. Returns the cursor
    /// just past the opening `"` and the number of `#`s.
    fn probe_raw_opener(&self) -> Option<(Cursor<'a>, u32)> {
        // `r` inside an identifier (`bar"`) is not a prefix; `br"` and `cr"` are.
        let before = self.cursor.preceding(self.cursor.pos());
        match before {
            [.., prev, b'b' | b'c'] if is_ident_byte(*prev) => return None,
            [.., b'b' | b'c'] => {}
            [.., prev] if is_ident_byte(*prev) => return None,
            _ => {}
        }
        let mut probe = self.cursor;
        probe.advance(); // consume 'r'
        let mut hashes = 0u32;
        while !probe.is_eof() && probe.current() == b'#' {
            probe.advance();
            hashes = hashes.saturating_add(1);
        }
        if probe.is_eof() || probe.current() != b'"' {
            return None;
        }
        probe.advance(); // consume '"'
        Some((probe, hashes))
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// Identifier bytes for the regex look-behind: ASCII word characters, `$`,
/// and any non-ASCII byte (Unicode identifiers).
#[inline]
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Convenience function: scan a window and collect all raw tokens.
///
/// Returns a `Vec<RawToken>` containing all tokens except the final `Eof`.
/// For streaming access, construct a `SourceBuffer` + `RawScanner` directly.
pub fn tokenize(window: &str, profile: GrammarProfile) -> Vec<RawToken> {
    let buf = crate::SourceBuffer::new(window);
    RawScanner::new(buf.cursor(), profile).collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "test assertions use unwrap for clarity"
)]
