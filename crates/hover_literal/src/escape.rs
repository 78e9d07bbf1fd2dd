//! Escape Sequence Processing
//!
//! Decodes the run-time value of string, char, and template literals for
//! three escape grammars (JSON, Rust, JavaScript/TypeScript).
//!
//! Every decoder makes a single left-to-right pass: each `\` is classified
//! into an [`EscapeKind`] by the grammar, then resolved by one `match`.
//! Alternatives are never applied as sequential replacements, so `\\n`
//! reads as a backslash followed by `n`, not as a newline.
//!
//! # Grammar Reference
//!
//! | Grammar | Escapes | Malformed / unknown |
//! |---------|---------|---------------------|
//! | JSON | `\"` `\\` `\/` `\b` `\f` `\n` `\r` `\t` `\uXXXX` | per [`JsonEscapePolicy`] |
//! | Rust | `\0` `\'` `\"` `\\` `\n` `\r` `\t` `\xHH` `\u{H..}` `\`+newline | kept verbatim |
//! | Script | JSON set minus `\/`, plus `\0` `\'` `\v` `` \` `` `\$` `\xHH` `\u{H..}` `\`+line terminator | unknown `\c` reads `c`; malformed kept verbatim |
//!
//! Unclosed literals decode as if they were closed.

use crate::config::JsonEscapePolicy;
use crate::decode_error::DecodeError;

/// Stand-in for code points that cannot be represented (lone surrogates).
const REPLACEMENT: char = '\u{FFFD}';

/// What a single `\` introduces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeKind {
    /// A one-character replacement (`\n`, `\"`, ...).
    Char(char),
    /// `\` followed by a line break; contributes nothing.
    LineContinuation,
    /// `\uXXXX` in JSON and JS: one UTF-16 code unit. Surrogate pairs are
    /// joined across consecutive escapes.
    CodeUnit(u16),
    /// `\xHH` or `\u{H..}`: a whole code point.
    CodePoint(u32),
    /// `\` followed by a character outside the grammar's escape set.
    Unknown(char),
    /// `\x` or `\u` without valid digits. Carries the introducer letter.
    Malformed(char),
    /// `\` at the very end of the literal body.
    Dangling,
}

/// A classified escape and the number of body bytes it spans, including
/// the backslash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Escape {
    pub kind: EscapeKind,
    pub len: usize,
}

impl Escape {
    fn new(kind: EscapeKind, len: usize) -> Self {
        Self { kind, len }
    }

    /// `\` plus one character that forms the whole escape.
    fn single(kind: EscapeKind, c: char) -> Self {
        Self::new(kind, 1 + c.len_utf8())
    }
}

/// Escape grammar of a literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeGrammar {
    Json(JsonEscapePolicy),
    Rust,
    Script,
}

/// What to do with an escape the grammar does not define.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fallback {
    /// Fail the whole literal.
    Reject,
    /// Emit the escape without its introducer (`\a` reads `a`, `\u` reads
    /// nothing).
    Drop,
    /// Emit the escape text unchanged.
    Verbatim,
}

#[derive(Clone, Copy, Debug)]
struct Fallbacks {
    unknown: Fallback,
    malformed: Fallback,
    dangling: Fallback,
}

impl EscapeGrammar {
    fn fallbacks(self) -> Fallbacks {
        match self {
            Self::Json(JsonEscapePolicy::Strict) => Fallbacks {
                unknown: Fallback::Reject,
                malformed: Fallback::Reject,
                dangling: Fallback::Reject,
            },
            Self::Json(JsonEscapePolicy::Lenient) => Fallbacks {
                unknown: Fallback::Drop,
                malformed: Fallback::Drop,
                dangling: Fallback::Verbatim,
            },
            Self::Rust => Fallbacks {
                unknown: Fallback::Verbatim,
                malformed: Fallback::Verbatim,
                dangling: Fallback::Verbatim,
            },
            Self::Script => Fallbacks {
                unknown: Fallback::Drop,
                malformed: Fallback::Verbatim,
                dangling: Fallback::Verbatim,
            },
        }
    }

    /// Classify the escape whose backslash precedes `rest`.
    pub fn classify(self, rest: &str) -> Escape {
        match self {
            Self::Json(_) => classify_json(rest),
            Self::Rust => classify_rust(rest),
            Self::Script => classify_script(rest),
        }
    }
}

// ─── Classifiers ───────────────────────────────────────────────────

fn classify_json(rest: &str) -> Escape {
    let Some(c) = rest.chars().next() else {
        return Escape::new(EscapeKind::Dangling, 1);
    };
    let kind = match c {
        '"' | '\\' | '/' => EscapeKind::Char(c),
        'b' => EscapeKind::Char('\u{8}'),
        'f' => EscapeKind::Char('\u{c}'),
        'n' => EscapeKind::Char('\n'),
        'r' => EscapeKind::Char('\r'),
        't' => EscapeKind::Char('\t'),
        'u' => return code_unit(rest),
        _ => EscapeKind::Unknown(c),
    };
    Escape::single(kind, c)
}

fn classify_rust(rest: &str) -> Escape {
    let Some(c) = rest.chars().next() else {
        return Escape::new(EscapeKind::Dangling, 1);
    };
    let kind = match c {
        '0' => EscapeKind::Char('\0'),
        '\'' | '"' | '\\' => EscapeKind::Char(c),
        'n' => EscapeKind::Char('\n'),
        'r' => EscapeKind::Char('\r'),
        't' => EscapeKind::Char('\t'),
        'x' => return byte_escape(rest),
        'u' => {
            return braced_code_point(rest)
                .unwrap_or(Escape::single(EscapeKind::Malformed('u'), 'u'));
        }
        '\n' => return rust_continuation(rest, 1),
        '\r' if rest.as_bytes().get(1) == Some(&b'\n') => return rust_continuation(rest, 2),
        _ => EscapeKind::Unknown(c),
    };
    Escape::single(kind, c)
}

fn classify_script(rest: &str) -> Escape {
    let Some(c) = rest.chars().next() else {
        return Escape::new(EscapeKind::Dangling, 1);
    };
    let kind = match c {
        '0' => EscapeKind::Char('\0'),
        '\'' | '"' | '\\' | '`' | '$' => EscapeKind::Char(c),
        'b' => EscapeKind::Char('\u{8}'),
        'f' => EscapeKind::Char('\u{c}'),
        'n' => EscapeKind::Char('\n'),
        'r' => EscapeKind::Char('\r'),
        't' => EscapeKind::Char('\t'),
        'v' => EscapeKind::Char('\u{b}'),
        'x' => return byte_escape(rest),
        'u' if rest.as_bytes().get(1) == Some(&b'{') => {
            return braced_code_point(rest)
                .unwrap_or(Escape::single(EscapeKind::Malformed('u'), 'u'));
        }
        'u' => return code_unit(rest),
        '\r' if rest.as_bytes().get(1) == Some(&b'\n') => {
            return Escape::new(EscapeKind::LineContinuation, 3);
        }
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => EscapeKind::LineContinuation,
        _ => EscapeKind::Unknown(c),
    };
    Escape::single(kind, c)
}

/// `\uXXXX` with exactly four hex digits. `rest` starts at the `u`.
fn code_unit(rest: &str) -> Escape {
    fixed_hex(&rest[1..], 4)
        .and_then(|value| u16::try_from(value).ok())
        .map_or(Escape::single(EscapeKind::Malformed('u'), 'u'), |unit| {
            Escape::new(EscapeKind::CodeUnit(unit), 6)
        })
}

/// `\xHH` with exactly two hex digits. `rest` starts at the `x`.
fn byte_escape(rest: &str) -> Escape {
    fixed_hex(&rest[1..], 2).map_or(Escape::single(EscapeKind::Malformed('x'), 'x'), |value| {
        Escape::new(EscapeKind::CodePoint(value), 4)
    })
}

/// `\u{H..}` with one to six hex digits naming a valid scalar value.
/// `rest` starts at the `u`.
fn braced_code_point(rest: &str) -> Option<Escape> {
    let braced = rest.get(1..)?.strip_prefix('{')?;
    let close = braced.bytes().take(7).position(|b| b == b'}')?;
    let digits = &braced[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    char::from_u32(value)?;
    // `\` `u` `{` digits `}`
    Some(Escape::new(EscapeKind::CodePoint(value), 4 + close))
}

/// Rust line continuation: the line break (`newline_len` bytes after the
/// backslash) plus any whitespace that follows it.
fn rust_continuation(rest: &str, newline_len: usize) -> Escape {
    let skipped = rest[newline_len..]
        .bytes()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
        .count();
    Escape::new(EscapeKind::LineContinuation, 1 + newline_len + skipped)
}

/// Parse exactly `digits` ASCII hex digits at the start of `s`.
fn fixed_hex(s: &str, digits: usize) -> Option<u32> {
    let hex = s.get(..digits)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

// ─── Decoding ──────────────────────────────────────────────────────

/// Joins UTF-16 surrogate pairs from consecutive `\uXXXX` escapes; lone
/// halves become U+FFFD.
#[derive(Default)]
struct SurrogateJoiner {
    high: Option<u16>,
}

impl SurrogateJoiner {
    fn push(&mut self, unit: u16, out: &mut String) {
        if let Some(high) = self.high.take() {
            if (0xDC00..=0xDFFF).contains(&unit) {
                let joined = char::decode_utf16([high, unit])
                    .next()
                    .and_then(Result::ok)
                    .unwrap_or(REPLACEMENT);
                out.push(joined);
                return;
            }
            out.push(REPLACEMENT);
        }
        match unit {
            0xD800..=0xDBFF => self.high = Some(unit),
            _ => out.push(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT)),
        }
    }

    fn flush(&mut self, out: &mut String) {
        if self.high.take().is_some() {
            out.push(REPLACEMENT);
        }
    }
}

/// Decode the escapes in a literal body (delimiters already stripped).
///
/// `base` is the byte offset of `body` within the raw literal; it only
/// feeds the offsets reported in [`DecodeError`].
pub fn unescape(body: &str, base: usize, grammar: EscapeGrammar) -> Result<String, DecodeError> {
    if !body.contains('\\') {
        return Ok(body.to_owned());
    }

    let fallbacks = grammar.fallbacks();
    let mut out = String::with_capacity(body.len());
    let mut joiner = SurrogateJoiner::default();
    let mut rest = body;

    while let Some(i) = rest.find('\\') {
        let (plain, tail) = rest.split_at(i);
        if !plain.is_empty() {
            joiner.flush(&mut out);
            out.push_str(plain);
        }
        let offset = base + (body.len() - tail.len());
        let escape = grammar.classify(&tail[1..]);

        match escape.kind {
            EscapeKind::Char(c) => {
                joiner.flush(&mut out);
                out.push(c);
            }
            EscapeKind::LineContinuation => {}
            EscapeKind::CodeUnit(unit) => joiner.push(unit, &mut out),
            EscapeKind::CodePoint(value) => {
                joiner.flush(&mut out);
                out.push(char::from_u32(value).unwrap_or(REPLACEMENT));
            }
            EscapeKind::Unknown(c) => {
                joiner.flush(&mut out);
                match fallbacks.unknown {
                    Fallback::Reject => {
                        return Err(DecodeError::InvalidEscape { offset, escape: c });
                    }
                    Fallback::Drop => out.push(c),
                    Fallback::Verbatim => {
                        out.push('\\');
                        out.push(c);
                    }
                }
            }
            EscapeKind::Malformed(letter) => {
                joiner.flush(&mut out);
                match fallbacks.malformed {
                    Fallback::Reject => return Err(DecodeError::InvalidUnicodeEscape { offset }),
                    Fallback::Drop => {}
                    Fallback::Verbatim => {
                        out.push('\\');
                        out.push(letter);
                    }
                }
            }
            EscapeKind::Dangling => {
                joiner.flush(&mut out);
                match fallbacks.dangling {
                    Fallback::Reject => return Err(DecodeError::DanglingBackslash { offset }),
                    Fallback::Drop => {}
                    Fallback::Verbatim => out.push('\\'),
                }
            }
        }

        rest = &tail[escape.len..];
    }

    joiner.flush(&mut out);
    out.push_str(rest);
    Ok(out)
}

// ─── Delimiters ────────────────────────────────────────────────────

/// Strip `closer` from the end of `body` when it is really a closer: an
/// odd run of backslashes before it means the closer is escaped content.
pub(crate) fn strip_closer<'a>(body: &'a str, closer: &str) -> &'a str {
    let Some(inner) = body.strip_suffix(closer) else {
        return body;
    };
    let backslashes = inner.bytes().rev().take_while(|&b| b == b'\\').count();
    if backslashes % 2 == 0 {
        inner
    } else {
        body
    }
}

/// Split a quoted literal into its body and the body's byte offset.
///
/// The first character is the opening quote; the matching closer is
/// stripped only when present and unescaped.
fn strip_quotes(raw: &str) -> (&str, usize) {
    let Some(quote) = raw.chars().next() else {
        return ("", 0);
    };
    let open = quote.len_utf8();
    let mut closer = [0u8; 4];
    let closer = quote.encode_utf8(&mut closer);
    (strip_closer(&raw[open..], closer), open)
}

/// Decode a JSON string literal (`"..."`, possibly unclosed).
///
/// Raw control characters are kept as they are.
pub fn decode_json_string(raw: &str, policy: JsonEscapePolicy) -> Result<String, DecodeError> {
    let (body, base) = strip_quotes(raw);
    unescape(body, base, EscapeGrammar::Json(policy))
}

/// Decode a Rust string or char literal (`"..."` or `'...'`).
///
/// Malformed escapes pass through verbatim, so this never fails.
pub fn decode_rust_string(raw: &str) -> Result<String, DecodeError> {
    let (body, base) = strip_quotes(raw);
    unescape(body, base, EscapeGrammar::Rust)
}

/// Decode a Rust raw string literal (`r#"..."#`): the body, verbatim.
pub fn decode_rust_raw_string(raw: &str) -> Result<String, DecodeError> {
    let Some(after_r) = raw.strip_prefix('r') else {
        return Ok(raw.to_owned());
    };
    let hashes = after_r.bytes().take_while(|&b| b == b'#').count();
    let Some(body) = after_r[hashes..].strip_prefix('"') else {
        return Ok(raw.to_owned());
    };
    let closer = format!("\"{}", "#".repeat(hashes));
    Ok(body.strip_suffix(closer.as_str()).unwrap_or(body).to_owned())
}

/// Decode a JS/TS string or hole-free template literal (`"..."`, `'...'`,
/// `` `...` ``).
pub fn decode_script_string(raw: &str) -> Result<String, DecodeError> {
    let (body, base) = strip_quotes(raw);
    unescape(body, base, EscapeGrammar::Script)
}

/// Decode one template segment whose delimiters (`` ` ``, `${`, `}`) are
/// already stripped.
pub fn decode_script_segment(segment: &str) -> Result<String, DecodeError> {
    unescape(segment, 0, EscapeGrammar::Script)
}
