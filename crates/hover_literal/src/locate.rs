//! Locator drivers: one per language surface.
//!
//! Each locator picks the smallest literal window its grammar allows,
//! converts the cursor into window bytes, scans tokens until it reaches
//! the cursor, and decodes the literal found there.
//!
//! | Surface | Window | Trivial when |
//! |---------|--------|--------------|
//! | JSON | the cursor line | no `\` |
//! | JSONC | document start to the next line start | no `\` |
//! | JS/TS | whole document | no `\` and no raw line break |
//! | Rust | whole document | no `\` and no raw line break |
//!
//! A trivial literal already reads as its value, so it gets no preview.
//! Interpolated templates are never trivial: their holes are elided.

use hover_scan_core::{GrammarProfile, RawScanner, RawTag, RawToken, SourceBuffer, TokenFlags};

use crate::cancel::Cancellation;
use crate::config::LocatorConfig;
use crate::decode_error::DecodeError;
use crate::escape::{
    decode_json_string, decode_rust_raw_string, decode_rust_string, decode_script_string,
};
use crate::template::TemplateTracker;
use crate::text_source::{utf16_to_byte, Position, TextSource};

/// Finds and decodes the literal under a cursor.
pub trait LiteralLocator {
    /// The decoded value of the literal at `position`, or `None` when the
    /// cursor is not inside a literal, the literal is trivial, decoding
    /// fails, or `cancel` fires first.
    fn locate(
        &self,
        source: &dyn TextSource,
        position: Position,
        cancel: &dyn Cancellation,
    ) -> Option<String>;
}

// ─── Scan Loop ─────────────────────────────────────────────────────

/// What the scan found under the cursor.
enum Hit<'w> {
    /// A self-contained literal token and its raw text.
    Literal { token: RawToken, text: &'w str },
    /// An interpolated template, already reassembled.
    Template(Result<String, DecodeError>),
}

/// Scan `window` up to byte `cursor`.
fn find_literal<'w>(
    window: &'w str,
    cursor: u32,
    profile: GrammarProfile,
    cancel: &dyn Cancellation,
) -> Option<Hit<'w>> {
    let buf = SourceBuffer::new(window);
    let mut scanner = RawScanner::new(buf.cursor(), profile);
    let mut tracker = TemplateTracker::new();

    loop {
        if cancel.is_cancelled() {
            tracing::trace!(pos = scanner.pos(), "locate cancelled");
            return None;
        }

        let token = scanner.next_token();
        if token.tag == RawTag::Eof {
            return tracker.finish().map(Hit::Template);
        }

        let covers = token.covers(cursor);
        if token.tag.is_template_fragment() {
            if let Some(done) = tracker.observe(token.tag, token.content(window), covers) {
                return Some(Hit::Template(done));
            }
        } else if covers && token.tag.is_literal() {
            tracing::trace!(
                tag = token.tag.name(),
                start = token.start,
                unclosed = token.flags.is_unclosed(),
                "literal under cursor"
            );
            return Some(Hit::Literal {
                token,
                text: token.content(window),
            });
        }

        if token.start > cursor && !tracker.is_pending() {
            return None;
        }
    }
}

/// Convert a UTF-16 column or offset into a byte offset within `window`.
fn window_cursor(window: &str, utf16: usize) -> Option<u32> {
    let byte = utf16_to_byte(window, utf16)?;
    u32::try_from(byte).ok()
}

/// Apply the triviality filter and decode a hit.
///
/// `cancel` is checked once more before decoding starts.
fn preview(
    hit: Hit<'_>,
    cancel: &dyn Cancellation,
    is_trivial: impl Fn(TokenFlags) -> bool,
    decode: impl Fn(RawTag, &str) -> Result<String, DecodeError>,
) -> Option<String> {
    if cancel.is_cancelled() {
        tracing::trace!("locate cancelled before decode");
        return None;
    }
    let decoded = match hit {
        Hit::Template(assembled) => assembled,
        Hit::Literal { token, text } => {
            if is_trivial(token.flags) {
                tracing::debug!(tag = token.tag.name(), len = token.len, "trivial literal skipped");
                return None;
            }
            decode(token.tag, text)
        }
    };
    decoded
        .map_err(|err| tracing::debug!(error = %err, "literal could not be decoded"))
        .ok()
}

fn without_escape(flags: TokenFlags) -> bool {
    !flags.has_escape()
}

fn without_escape_or_newline(flags: TokenFlags) -> bool {
    !flags.has_escape() && !flags.has_newline()
}

// ─── Locators ──────────────────────────────────────────────────────

/// Strict JSON. Strings are single-line, so only the cursor line is read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonLocator {
    config: LocatorConfig,
}

impl JsonLocator {
    pub const fn new(config: LocatorConfig) -> Self {
        Self { config }
    }
}

impl LiteralLocator for JsonLocator {
    #[tracing::instrument(level = "trace", skip_all, fields(line = position.line, character = position.character))]
    fn locate(
        &self,
        source: &dyn TextSource,
        position: Position,
        cancel: &dyn Cancellation,
    ) -> Option<String> {
        source.checked_offset_of(position)?;
        let window = source.line_text(position.line);
        let cursor = window_cursor(window, position.character as usize)?;
        tracing::trace!(window_len = window.len(), cursor, "json window");

        let hit = find_literal(window, cursor, GrammarProfile::Json, cancel)?;
        let policy = self.config.json_escape_policy;
        preview(hit, cancel, without_escape, |_, raw| decode_json_string(raw, policy))
    }
}

/// JSON with comments. The window must start at the document start: a
/// line may sit inside a block comment opened earlier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsoncLocator {
    config: LocatorConfig,
}

impl JsoncLocator {
    pub const fn new(config: LocatorConfig) -> Self {
        Self { config }
    }
}

impl LiteralLocator for JsoncLocator {
    #[tracing::instrument(level = "trace", skip_all, fields(line = position.line, character = position.character))]
    fn locate(
        &self,
        source: &dyn TextSource,
        position: Position,
        cancel: &dyn Cancellation,
    ) -> Option<String> {
        let end = Position::new(position.line.saturating_add(1), 0);
        let window = source.range_text(Position::default(), end);
        let cursor = window_cursor(window, source.checked_offset_of(position)?)?;
        tracing::trace!(window_len = window.len(), cursor, "jsonc window");

        let hit = find_literal(window, cursor, GrammarProfile::Jsonc, cancel)?;
        let policy = self.config.json_escape_policy;
        preview(hit, cancel, without_escape, |_, raw| decode_json_string(raw, policy))
    }
}

/// JavaScript and TypeScript, including nested template literals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptLocator;

impl LiteralLocator for ScriptLocator {
    #[tracing::instrument(level = "trace", skip_all, fields(line = position.line, character = position.character))]
    fn locate(
        &self,
        source: &dyn TextSource,
        position: Position,
        cancel: &dyn Cancellation,
    ) -> Option<String> {
        let window = source.whole_text();
        let cursor = window_cursor(window, source.checked_offset_of(position)?)?;
        tracing::trace!(window_len = window.len(), cursor, "script window");

        let hit = find_literal(window, cursor, GrammarProfile::Script, cancel)?;
        preview(hit, cancel, without_escape_or_newline, |_, raw| {
            decode_script_string(raw)
        })
    }
}

/// Rust strings, chars, byte literals, and raw strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RustLocator;

impl LiteralLocator for RustLocator {
    #[tracing::instrument(level = "trace", skip_all, fields(line = position.line, character = position.character))]
    fn locate(
        &self,
        source: &dyn TextSource,
        position: Position,
        cancel: &dyn Cancellation,
    ) -> Option<String> {
        let window = source.whole_text();
        let cursor = window_cursor(window, source.checked_offset_of(position)?)?;
        tracing::trace!(window_len = window.len(), cursor, "rust window");

        let hit = find_literal(window, cursor, GrammarProfile::Rust, cancel)?;
        preview(hit, cancel, without_escape_or_newline, |tag, raw| match tag {
            RawTag::RawString => decode_rust_raw_string(raw),
            _ => decode_rust_string(raw),
        })
    }
}

// ─── Surfaces ──────────────────────────────────────────────────────

/// A language surface the locators support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Json,
    Jsonc,
    /// JavaScript, TypeScript, and their JSX dialects.
    Script,
    Rust,
}

impl Surface {
    /// Every surface, in a stable order.
    pub const ALL: [Surface; 4] = [Self::Json, Self::Jsonc, Self::Script, Self::Rust];

    /// Map an editor language id (`typescriptreact`, `jsonc`, ...).
    pub fn from_language_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|surface| surface.language_ids().contains(&id))
    }

    /// Map a file extension, without the leading dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonc" => Some(Self::Jsonc),
            "js" | "mjs" | "cjs" | "jsx" | "ts" | "mts" | "cts" | "tsx" => Some(Self::Script),
            "rs" => Some(Self::Rust),
            _ => None,
        }
    }

    /// Editor language ids served by this surface.
    pub fn language_ids(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Jsonc => &["jsonc"],
            Self::Script => &[
                "javascript",
                "javascriptreact",
                "typescript",
                "typescriptreact",
            ],
            Self::Rust => &["rust"],
        }
    }

    /// Literal grammar of this surface.
    pub fn profile(self) -> GrammarProfile {
        match self {
            Self::Json => GrammarProfile::Json,
            Self::Jsonc => GrammarProfile::Jsonc,
            Self::Script => GrammarProfile::Script,
            Self::Rust => GrammarProfile::Rust,
        }
    }

    /// Run this surface's locator.
    pub fn locate(
        self,
        config: LocatorConfig,
        source: &dyn TextSource,
        position: Position,
        cancel: &dyn Cancellation,
    ) -> Option<String> {
        match self {
            Self::Json => JsonLocator::new(config).locate(source, position, cancel),
            Self::Jsonc => JsoncLocator::new(config).locate(source, position, cancel),
            Self::Script => ScriptLocator.locate(source, position, cancel),
            Self::Rust => RustLocator.locate(source, position, cancel),
        }
    }
}
