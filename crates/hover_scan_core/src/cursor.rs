//! Zero-cost cursor over a sentinel-terminated window buffer.
//!
//! The cursor advances through the buffer byte-by-byte. The end of the
//! window is detected when the current byte equals the sentinel (`0x00`)
//! and the position has reached or exceeded the window length.
//!
//! # Interior Null Bytes
//!
//! Documents may contain raw NUL characters (inside a JSON string, for
//! example). A null at `pos < source_len` is ordinary content; a null at
//! `pos >= source_len` is the sentinel. Skipping methods that use memchr
//! only search within the window content, so interior nulls never end a
//! scan early.

/// Returns the earliest (minimum) of two optional positions.
///
/// Used by the memchr-based scanning methods to combine results from
/// separate memchr calls when we need to search for more bytes than
/// `memchr3` supports (which handles at most 3 needles).
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Find the first occurrence of any byte in `needles` within `haystack`.
///
/// Splits the needle set into groups of at most three and combines the
/// memchr results with [`earliest_of`].
fn find_any(needles: &[u8], haystack: &[u8]) -> Option<usize> {
    needles.chunks(3).fold(None, |found, group| {
        // Only search the prefix before an earlier hit.
        let limit = found.unwrap_or(haystack.len());
        let window = haystack.get(..limit).unwrap_or(haystack);
        let hit = match *group {
            [a] => memchr::memchr(a, window),
            [a, b] => memchr::memchr2(a, b, window),
            [a, b, c] => memchr::memchr3(a, b, c, window),
            _ => None,
        };
        earliest_of(found, hit)
    })
}

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots for the
/// speculative probes the scanner runs (char literals, regex literals,
/// raw-string openers).
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (cache-line padding). This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (window + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual window content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the given absolute position, or `0x00` past
    /// the end of the buffer.
    #[inline]
    pub fn byte_at(&self, pos: u32) -> u8 {
        self.buf.get(pos as usize).copied().unwrap_or(0)
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` at the end of the window (the sentinel byte).
    /// Interior null bytes also return `0x00`; use [`is_eof()`](Self::is_eof)
    /// to distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Returns the byte one position ahead of current.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos.saturating_add(1))
    }

    /// Advance the cursor by one byte. Never moves past the sentinel.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.source_len {
            self.pos += 1;
        }
    }

    /// Advance the cursor by `n` bytes, clamped to the end of the window.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = self.pos.saturating_add(n).min(self.source_len);
    }

    /// Returns `true` if the cursor has reached the end of the window.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the window.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the window content (excludes sentinel and padding).
    #[cfg(test)]
    pub(crate) fn source_len(&self) -> u32 {
        self.source_len
    }

    /// The window bytes strictly before `end`.
    ///
    /// Used for the short look-behind the regex heuristic needs.
    pub fn preceding(&self, end: u32) -> &'a [u8] {
        let end = end.min(self.source_len) as usize;
        self.buf.get(..end).unwrap_or_default()
    }

    /// The window bytes in `start..end` (clamped to the window).
    pub fn bytes(&self, start: u32, end: u32) -> &'a [u8] {
        let end = end.min(self.source_len);
        self.buf
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }

    /// Remaining window content from the current position.
    #[inline]
    fn remaining(&self) -> &'a [u8] {
        self.buf
            .get(self.pos as usize..self.source_len as usize)
            .unwrap_or_default()
    }

    /// Move to `pos + offset` when `offset` is a hit, otherwise to the end
    /// of the window. Returns the byte at the new position (0 at the end).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset <= remaining.len() <= source_len which fits in u32"
    )]
    fn jump(&mut self, offset: Option<usize>) -> u8 {
        if let Some(off) = offset {
            self.pos += off as u32;
            self.current()
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance while `pred` returns `true` for the current byte and the
    /// window is not exhausted.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Consume a line break (`\n`, `\r\n`, or a lone `\r`) if one is at the
    /// cursor. Returns `true` if anything was consumed.
    pub fn eat_newline(&mut self) -> bool {
        match self.current() {
            b'\n' => {
                self.advance();
                true
            }
            b'\r' => {
                self.advance();
                if self.current() == b'\n' {
                    self.advance();
                }
                true
            }
            _ => false,
        }
    }

    /// Advance to the next `\n` byte or the end of the window using
    /// SIMD-accelerated search.
    ///
    /// Used to skip line comment bodies.
    pub fn eat_until_newline_or_eof(&mut self) {
        let hit = memchr::memchr(b'\n', self.remaining());
        self.jump(hit);
    }

    /// Advance to the next byte contained in `needles`.
    ///
    /// Returns the byte found, or 0 at the end of the window. This is the
    /// coalescing skip that lets the scanner pass over runs of text that
    /// cannot begin a literal, comment, or brace in a single step.
    pub fn eat_until_any(&mut self, needles: &[u8]) -> u8 {
        let hit = find_any(needles, self.remaining());
        self.jump(hit)
    }

    /// Advance past ordinary quoted-string content to the next interesting
    /// byte. Returns the byte found, or 0 at the end of the window.
    ///
    /// "Interesting" bytes: the closing `quote`, `\`, `\n`, `\r`.
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let remaining = self.remaining();
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        // A lone CR also ends a single-line string.
        let limit = primary.unwrap_or(remaining.len());
        let cr = memchr::memchr(b'\r', remaining.get(..limit).unwrap_or(remaining));
        self.jump(earliest_of(primary, cr))
    }

    /// Advance past ordinary template content to the next interesting byte.
    /// Returns the byte found, or 0 at the end of the window.
    ///
    /// Template delimiters: `` ` ``, `$` (possible `${`), `\`.
    /// Line breaks are ordinary content inside templates.
    pub fn skip_to_template_delim(&mut self) -> u8 {
        let hit = memchr::memchr3(b'`', b'$', b'\\', self.remaining());
        self.jump(hit)
    }

    /// Advance past a non-nesting block comment body (the `/*` is already
    /// consumed). Positions the cursor after `*/`, or at the end of the
    /// window for an unclosed comment.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset <= remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_block_comment(&mut self) {
        match memchr::memmem::find(self.remaining(), b"*/") {
            Some(off) => self.pos += off as u32 + 2,
            None => self.pos = self.source_len,
        }
    }

    /// Advance past a nesting block comment body (the opening `/*` is
    /// already consumed, so the initial depth is 1). Rust comments nest:
    /// `/* a /* b */ c */` is a single comment.
    pub fn eat_nested_block_comment(&mut self) {
        let mut depth = 1u32;
        loop {
            match self.jump(memchr::memchr2(b'*', b'/', self.remaining())) {
                b'*' if self.peek() == b'/' => {
                    self.advance_n(2);
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                b'/' if self.peek() == b'*' => {
                    self.advance_n(2);
                    depth += 1;
                }
                _ if self.is_eof() => return,
                _ => self.advance(),
            }
        }
    }

    /// Advance to the end of a raw string body: the first `"` followed by
    /// at least `hashes` `#` characters. Positions the cursor after the
    /// closing `"` and its `hashes` hashes and returns `true`, or moves to
    /// the end of the window and returns `false` for an unclosed raw string.
    pub fn eat_raw_string_body(&mut self, hashes: u32) -> bool {
        loop {
            if self.jump(memchr::memchr(b'"', self.remaining())) == 0 && self.is_eof() {
                return false;
            }
            self.advance(); // consume '"'
            let mut probe = *self;
            let mut seen = 0u32;
            while seen < hashes && probe.current() == b'#' && !probe.is_eof() {
                probe.advance();
                seen += 1;
            }
            if seen == hashes {
                *self = probe;
                return true;
            }
        }
    }
}
