use super::*;
use hover_scan_core::{tokenize, GrammarProfile};
use pretty_assertions::assert_eq;

/// Drive a tracker over `window` with the cursor at byte `cursor`, the same
/// way the script locator does.
fn reassemble(window: &str, cursor: u32) -> Option<Result<String, DecodeError>> {
    let mut tracker = TemplateTracker::new();
    for tok in tokenize(window, GrammarProfile::Script) {
        if tok.tag.is_template_fragment() {
            if let Some(done) = tracker.observe(tok.tag, tok.content(window), tok.covers(cursor)) {
                return Some(done);
            }
        }
    }
    tracker.finish()
}

fn ok(s: &str) -> Option<Result<String, DecodeError>> {
    Some(Ok(s.to_owned()))
}

// === Direct observation ===

#[test]
fn untargeted_template_yields_nothing() {
    let mut tracker = TemplateTracker::new();
    assert_eq!(tracker.observe(RawTag::TemplateLeft, "`a${", false), None);
    assert_eq!(tracker.depth(), 1);
    assert_eq!(tracker.observe(RawTag::TemplateRight, "}b`", false), None);
    assert_eq!(tracker.depth(), 0);
    assert!(!tracker.is_pending());
    assert_eq!(tracker.finish(), None);
}

#[test]
fn targeted_template_assembles_on_close() {
    let mut tracker = TemplateTracker::new();
    assert_eq!(tracker.observe(RawTag::TemplateLeft, "`a${", true), None);
    assert!(tracker.is_pending());
    assert_eq!(tracker.observe(RawTag::TemplateMiddle, "}b${", false), None);
    assert_eq!(
        tracker.observe(RawTag::TemplateRight, "}c`", false),
        ok("a${...}b${...}c")
    );
    assert!(!tracker.is_pending());
}

#[test]
fn stray_right_is_ignored() {
    let mut tracker = TemplateTracker::new();
    assert_eq!(tracker.observe(RawTag::TemplateRight, "}x`", true), None);
    assert_eq!(tracker.observe(RawTag::String, "\"x\"", true), None);
}

// === Through the scanner ===

#[test]
fn nested_outer_from_either_end() {
    let window = "`begin${ `${ `123` }` }end`";
    assert_eq!(reassemble(window, 0), ok("begin${...}end"));
    assert_eq!(reassemble(window, 23), ok("begin${...}end"));
}

#[test]
fn nested_inner() {
    assert_eq!(
        reassemble("`begin${ `${ `123` }` }end`", 9),
        ok("${...}")
    );
}

#[test]
fn cursor_on_middle_fragment() {
    assert_eq!(
        reassemble("`begin${ 123 }middle${ 456 }end`", 15),
        ok("begin${...}middle${...}end")
    );
}

#[test]
fn unclosed_template_after_hole() {
    assert_eq!(reassemble("`123 ${ 123 }", 0), ok("123 ${...}"));
}

#[test]
fn window_ends_inside_hole() {
    assert_eq!(reassemble("`a\\n${ x ", 0), ok("a\n${...}"));
}

#[test]
fn segments_are_decoded() {
    assert_eq!(
        reassemble("`\\u00e9${ 1 }\\t`", 0),
        ok("\u{e9}${...}\t")
    );
}

#[test]
fn escaped_backtick_before_close() {
    assert_eq!(reassemble("`a${ 1 }\\``", 0), ok("a${...}`"));
}

#[test]
fn cursor_in_hole_is_not_a_target() {
    // Offset 5 is inside `${ 1 }`, not on a fragment.
    assert_eq!(reassemble("`a${ 1 }b`", 5), None);
}
