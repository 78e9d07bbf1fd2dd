//! Document access for the locators.
//!
//! Editors address text by line and UTF-16 column, so every offset and
//! column crossing this interface is in UTF-16 code units. The scanner
//! works on bytes; [`utf16_to_byte`] and [`byte_to_utf16`] translate
//! between the two within a window.

/// Zero-based line and UTF-16 column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Read access to a document.
///
/// Except for [`checked_offset_of`](TextSource::checked_offset_of),
/// out-of-range positions are clamped the way editors clamp them: a line
/// past the end maps to the end of the document, a column past the end of
/// its line maps to the end of that line.
pub trait TextSource {
    /// The entire document.
    fn whole_text(&self) -> &str;

    /// One line including its terminator. Empty for a line past the end.
    fn line_text(&self, line: u32) -> &str;

    /// Text between two positions (after clamping both).
    fn range_text(&self, start: Position, end: Position) -> &str;

    /// Document offset of a position, in UTF-16 code units.
    fn offset_of(&self, position: Position) -> usize;

    /// Like [`offset_of`](TextSource::offset_of), but `None` for a line
    /// past the last one or a column past the end of its line.
    fn checked_offset_of(&self, position: Position) -> Option<usize>;

    /// Position of a document offset given in UTF-16 code units.
    fn position_of(&self, offset: usize) -> Position;
}

/// Byte index in `text` that is `utf16` code units from its start.
///
/// Returns `None` when `utf16` lies past the end of `text`. An offset that
/// falls between the halves of a surrogate pair snaps to the start of that
/// character.
pub fn utf16_to_byte(text: &str, utf16: usize) -> Option<usize> {
    let mut units = 0;
    for (byte, c) in text.char_indices() {
        let next = units + c.len_utf16();
        if next > utf16 {
            return Some(byte);
        }
        units = next;
    }
    (units == utf16).then_some(text.len())
}

/// Number of UTF-16 code units in `text[..byte]`. A `byte` inside a
/// character counts that character as not yet reached.
pub fn byte_to_utf16(text: &str, byte: usize) -> usize {
    text.char_indices()
        .take_while(|&(i, c)| i + c.len_utf8() <= byte)
        .map(|(_, c)| c.len_utf16())
        .sum()
}

/// In-memory document with a line index.
///
/// Lines end at `\n`, `\r\n`, or a lone `\r`.
#[derive(Clone, Debug)]
pub struct SourceText {
    text: String,
    /// Byte offset of each line start. Never empty.
    line_starts: Vec<usize>,
    /// UTF-16 offset of each line start, parallel to `line_starts`.
    line_starts_utf16: Vec<usize>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        let mut line_starts_utf16 = vec![0];
        let mut units = 0;
        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            units += c.len_utf16();
            let is_break = match c {
                '\n' => true,
                '\r' => chars.peek().map(|&(_, next)| next) != Some('\n'),
                _ => false,
            };
            if is_break {
                line_starts.push(i + 1);
                line_starts_utf16.push(units);
            }
        }
        Self {
            text,
            line_starts,
            line_starts_utf16,
        }
    }

    /// Number of lines. A trailing line break starts one more (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte span of `line` including its terminator.
    fn line_span(&self, line: usize) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        Some((start, end))
    }

    /// Byte span of `line` without its terminator.
    fn line_content_span(&self, line: usize) -> Option<(usize, usize)> {
        let (start, end) = self.line_span(line)?;
        let content = &self.text[start..end];
        let trimmed = content
            .strip_suffix("\r\n")
            .or_else(|| content.strip_suffix('\n'))
            .or_else(|| content.strip_suffix('\r'))
            .unwrap_or(content);
        Some((start, start + trimmed.len()))
    }

    /// Clamp a position onto the document and return its byte offset.
    fn byte_offset(&self, position: Position) -> usize {
        let line = position.line as usize;
        let Some((start, end)) = self.line_content_span(line) else {
            return self.text.len();
        };
        let content = &self.text[start..end];
        let column = utf16_to_byte(content, position.character as usize).unwrap_or(content.len());
        start + column
    }
}

impl TextSource for SourceText {
    fn whole_text(&self) -> &str {
        &self.text
    }

    fn line_text(&self, line: u32) -> &str {
        self.line_span(line as usize)
            .map_or("", |(start, end)| &self.text[start..end])
    }

    fn range_text(&self, start: Position, end: Position) -> &str {
        let start = self.byte_offset(start);
        let end = self.byte_offset(end).max(start);
        &self.text[start..end]
    }

    fn offset_of(&self, position: Position) -> usize {
        let byte = self.byte_offset(position);
        let line = self.line_starts.partition_point(|&s| s <= byte) - 1;
        let line_start = self.line_starts[line];
        self.line_starts_utf16[line] + byte_to_utf16(&self.text[line_start..], byte - line_start)
    }

    fn checked_offset_of(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        if line >= self.line_count() {
            return None;
        }
        let (start, end) = self.line_content_span(line)?;
        let content = &self.text[start..end];
        let column = utf16_to_byte(content, position.character as usize)?;
        Some(self.line_starts_utf16.get(line)? + byte_to_utf16(content, column))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "line count and line length in UTF-16 units fit in u32 for any document an editor opens"
    )]
    fn position_of(&self, offset: usize) -> Position {
        let line = self.line_starts_utf16.partition_point(|&s| s <= offset) - 1;
        let (start, end) = self.line_content_span(line).unwrap_or((0, 0));
        let width = byte_to_utf16(&self.text[start..end], end - start);
        let character = (offset - self.line_starts_utf16[line]).min(width);
        Position::new(line as u32, character as u32)
    }
}
