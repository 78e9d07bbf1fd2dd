//! Template nesting tracker for JS/TS.
//!
//! The scanner splits an interpolated template into fragments
//! (`` `a${ ``, `}b${`, `` }c` ``) and keeps the brace-depth stack that
//! decides which `}` continues a template. This tracker mirrors that stack
//! with one fragment list per open template, remembers which level holds
//! the cursor, and reassembles that level once it closes:
//!
//! ```text
//! `begin${ `${ `123` }` }end`      cursor on `begin`
//!  level 1: [`begin${, }end`]   -> "begin${...}end"
//!  level 2: [`${, }`]           -> "${...}"
//! ```
//!
//! Holes are elided as [`PLACEHOLDER`]; enclosing templates are never
//! scanned past the target's closing fragment.

use hover_scan_core::RawTag;

use crate::decode_error::DecodeError;
use crate::escape::{decode_script_segment, strip_closer};

/// Stand-in for an interpolation hole in a reassembled template.
pub const PLACEHOLDER: &str = "${...}";

#[derive(Clone, Copy, Debug)]
struct Fragment<'a> {
    tag: RawTag,
    text: &'a str,
}

/// Per-call segment stack. Feed it every template fragment in order.
#[derive(Debug, Default)]
pub struct TemplateTracker<'a> {
    /// Fragments of each open template, outermost first.
    levels: Vec<Vec<Fragment<'a>>>,
    /// 1-based level that holds the cursor, once seen.
    target: Option<usize>,
}

impl<'a> TemplateTracker<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fragment covering the cursor was seen and its template has not
    /// been assembled yet.
    pub fn is_pending(&self) -> bool {
        self.target.is_some()
    }

    /// Number of open templates.
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Record one fragment. Returns the assembled template when this
    /// fragment closes the level holding the cursor.
    ///
    /// Tags other than the three fragment tags are ignored.
    pub fn observe(
        &mut self,
        tag: RawTag,
        text: &'a str,
        covers_cursor: bool,
    ) -> Option<Result<String, DecodeError>> {
        let fragment = Fragment { tag, text };
        match tag {
            RawTag::TemplateLeft => {
                self.levels.push(vec![fragment]);
                if covers_cursor {
                    self.target = Some(self.levels.len());
                }
                None
            }
            RawTag::TemplateMiddle => {
                if covers_cursor {
                    self.target = Some(self.levels.len());
                }
                if let Some(level) = self.levels.last_mut() {
                    level.push(fragment);
                }
                None
            }
            RawTag::TemplateRight => {
                if covers_cursor {
                    self.target = Some(self.levels.len());
                }
                let closed_index = self.levels.len();
                let mut level = self.levels.pop()?;
                level.push(fragment);
                if self.target == Some(closed_index) {
                    self.target = None;
                    Some(assemble(&level))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// The window ended. Assemble the target template from the fragments
    /// seen so far if it never closed.
    pub fn finish(self) -> Option<Result<String, DecodeError>> {
        let index = self.target?;
        let level = self.levels.get(index.checked_sub(1)?)?;
        Some(assemble(level))
    }
}

/// Strip delimiters from each fragment, decode the segments, and join
/// them with [`PLACEHOLDER`].
fn assemble(fragments: &[Fragment<'_>]) -> Result<String, DecodeError> {
    let mut out = String::new();
    for fragment in fragments {
        let body = match fragment.tag {
            RawTag::TemplateLeft => fragment.text.strip_prefix('`'),
            _ => fragment.text.strip_prefix('}'),
        }
        .unwrap_or(fragment.text);
        match fragment.tag {
            RawTag::TemplateLeft | RawTag::TemplateMiddle => {
                let segment = body.strip_suffix("${").unwrap_or(body);
                out.push_str(&decode_script_segment(segment)?);
                out.push_str(PLACEHOLDER);
            }
            _ => out.push_str(&decode_script_segment(strip_closer(body, "`"))?),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests;
