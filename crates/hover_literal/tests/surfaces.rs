//! Hover results per language surface, through the public API.
//!
//! Each case is a whole document and a cursor; the expected value is what
//! the hover preview shows, or `None` when no preview appears.

use hover_literal::{
    JsonEscapePolicy, LocatorConfig, NeverCancelled, Position, SourceText, Surface,
};
use pretty_assertions::assert_eq;

const JSON_SURFACES: [Surface; 2] = [Surface::Json, Surface::Jsonc];

fn hover_with(
    config: LocatorConfig,
    surface: Surface,
    text: &str,
    line: u32,
    character: u32,
) -> Option<String> {
    surface.locate(
        config,
        &SourceText::new(text),
        Position::new(line, character),
        &NeverCancelled,
    )
}

fn hover(surface: Surface, text: &str, line: u32, character: u32) -> Option<String> {
    hover_with(LocatorConfig::default(), surface, text, line, character)
}

fn lenient() -> LocatorConfig {
    LocatorConfig::with_json_escape_policy(JsonEscapePolicy::Lenient)
}

fn some(s: &str) -> Option<String> {
    Some(s.to_owned())
}

// === JSON and JSONC ===

#[test]
fn json_simple_string_has_no_preview() {
    for surface in JSON_SURFACES {
        assert_eq!(hover(surface, r#""123""#, 0, 0), None, "{surface:?}");
    }
}

#[test]
fn json_raw_control_character_is_kept() {
    for surface in JSON_SURFACES {
        assert_eq!(
            hover(surface, "\"1\u{19}\\n\"", 0, 0),
            some("1\u{19}\n"),
            "{surface:?}"
        );
    }
}

#[test]
fn json_escapes() {
    let cases = [
        (r#""1\"23""#, "1\"23"),
        (r#""1\\23""#, "1\\23"),
        (r#""1\/23""#, "1/23"),
        (r#""1\b23""#, "1\u{8}23"),
        (r#""1\f23""#, "1\u{c}23"),
        (r#""1\n23""#, "1\n23"),
        (r#""1\r23""#, "1\r23"),
        (r#""1\t23""#, "1\t23"),
        (r#""1\u123423""#, "1\u{1234}23"),
    ];
    for surface in JSON_SURFACES {
        for (text, expected) in cases {
            assert_eq!(hover(surface, text, 0, 0), some(expected), "{surface:?} {text}");
        }
    }
}

#[test]
fn json_bad_escapes_depend_on_policy() {
    let cases = [
        (r#""1\uzzzz""#, "1zzzz"),
        (r#""1\a23""#, "1a23"),
        (r#""1\"#, "1\\"),
    ];
    for surface in JSON_SURFACES {
        for (text, expected) in cases {
            assert_eq!(hover(surface, text, 0, 0), None, "strict {surface:?} {text}");
            assert_eq!(
                hover_with(lenient(), surface, text, 0, 0),
                some(expected),
                "lenient {surface:?} {text}"
            );
        }
    }
}

#[test]
fn json_unclosed_strings() {
    for surface in JSON_SURFACES {
        assert_eq!(hover(surface, r#""1\n"#, 0, 0), some("1\n"));
        assert_eq!(hover(surface, "\"1\\n\n", 0, 0), some("1\n"));
        assert_eq!(hover(surface, r#""1\""#, 0, 0), some("1\""));
        assert_eq!(hover(surface, "\"1\\\"\n", 0, 0), some("1\""));
    }
}

#[test]
fn json_surrogate_pair() {
    assert_eq!(
        hover(Surface::Json, r#""\uD83D\uDE00!""#, 0, 0),
        some("\u{1F600}!")
    );
}

#[test]
fn json_cursor_on_second_string_of_line() {
    let text = r#"{"a\tb": "c\nd"}"#;
    assert_eq!(hover(Surface::Json, text, 0, 2), some("a\tb"));
    assert_eq!(hover(Surface::Json, text, 0, 11), some("c\nd"));
    assert_eq!(hover(Surface::Json, text, 0, 8), None);
}

#[test]
fn jsonc_string_after_comments() {
    assert_eq!(hover(Surface::Jsonc, r#"/**/"1\n23""#, 0, 5), some("1\n23"));
    assert_eq!(hover(Surface::Jsonc, "//\n\"1\\n23\"", 1, 0), some("1\n23"));
}

#[test]
fn jsonc_string_inside_comments() {
    assert_eq!(hover(Surface::Jsonc, r#"/*"1\n23"*/"#, 0, 3), None);
    assert_eq!(hover(Surface::Jsonc, r#"//"1\n23""#, 0, 3), None);
}

// === JavaScript / TypeScript ===

#[test]
fn script_simple_strings_have_no_preview() {
    for text in [r#""123""#, "'123'", "`123`"] {
        assert_eq!(hover(Surface::Script, text, 0, 0), None, "{text}");
    }
}

#[test]
fn script_simple_strings_with_escapes() {
    for text in [r#""123\n""#, r"'123\n'", r"`123\n`"] {
        assert_eq!(hover(Surface::Script, text, 0, 0), some("123\n"), "{text}");
    }
}

#[test]
fn script_multiline_template() {
    assert_eq!(hover(Surface::Script, "`123\n456`", 0, 0), some("123\n456"));
}

#[test]
fn script_nested_templates() {
    let text = "`begin${ `${ `123` }` }end`";
    assert_eq!(hover(Surface::Script, text, 0, 0), some("begin${...}end"));
    assert_eq!(hover(Surface::Script, text, 0, 9), some("${...}"));
    assert_eq!(hover(Surface::Script, text, 0, 23), some("begin${...}end"));
}

#[test]
fn script_template_middle() {
    assert_eq!(
        hover(Surface::Script, "`begin${ 123 }middle${ 456 }end`", 0, 15),
        some("begin${...}middle${...}end")
    );
}

#[test]
fn script_simple_string_after_template() {
    assert_eq!(hover(Surface::Script, r#"`123\n456` "123""#, 0, 12), None);
}

#[test]
fn script_line_continuation() {
    assert_eq!(hover(Surface::Script, "\"123\\\n456\"", 0, 0), some("123456"));
    assert_eq!(hover(Surface::Script, "'123\\\n456", 0, 0), some("123456"));
}

#[test]
fn script_other_escapes() {
    let cases = [
        (r#""1\t23""#, "1\t23"),
        (r#""1\"23""#, "1\"23"),
        ("\"1\t\\t23\"", "1\t\t23"),
        (r#""1\xA923""#, "1\u{A9}23"),
        (r#""1\u00A923""#, "1\u{A9}23"),
        (r#""1\u115523""#, "1\u{1155}23"),
        (r#""1\u{2F804}23""#, "1\u{2F804}23"),
    ];
    for (text, expected) in cases {
        assert_eq!(hover(Surface::Script, text, 0, 0), some(expected), "{text}");
    }
}

#[test]
fn script_unclosed_strings() {
    assert_eq!(hover(Surface::Script, r#""123\""#, 0, 0), some("123\""));
    assert_eq!(hover(Surface::Script, r#"'123\""#, 0, 0), some("123\""));
    assert_eq!(hover(Surface::Script, r#"`123\""#, 0, 0), some("123\""));
    assert_eq!(hover(Surface::Script, "`123 ${ 123 }", 0, 0), some("123 ${...}"));
}

#[test]
fn script_regex_quote_is_not_a_string() {
    let text = r#"const re = /"/; const s = "a\tb";"#;
    assert_eq!(hover(Surface::Script, text, 0, 28), some("a\tb"));
}

#[test]
fn script_division_after_postfix_increment() {
    let text = r#"x = i++ / 2; s = "a\tb/c";"#;
    assert_eq!(hover(Surface::Script, text, 0, 18), some("a\tb/c"));
}

#[test]
fn script_comment_hides_string() {
    assert_eq!(hover(Surface::Script, r#"// "a\nb""#, 0, 4), None);
}

// === Rust ===

#[test]
fn rust_simple_literals_have_no_preview() {
    assert_eq!(hover(Surface::Rust, r#""123""#, 0, 0), None);
    assert_eq!(hover(Surface::Rust, "'1'", 0, 0), None);
}

#[test]
fn rust_escaped_chars() {
    assert_eq!(hover(Surface::Rust, r"'\n'", 0, 0), some("\n"));
    assert_eq!(hover(Surface::Rust, r"'\xA9'", 0, 0), some("\u{A9}"));
    assert_eq!(hover(Surface::Rust, r"'\u{1155}'", 0, 0), some("\u{1155}"));
}

#[test]
fn rust_escaped_strings() {
    let cases = [
        (r#""1\t23""#, "1\t23"),
        (r#""1\"23""#, "1\"23"),
        ("\"1\t\\t23\"", "1\t\t23"),
        (r#""1\xA923""#, "1\u{A9}23"),
        (r#""1\u{00A9}23""#, "1\u{A9}23"),
        (r#""1\u{1155}23""#, "1\u{1155}23"),
    ];
    for (text, expected) in cases {
        assert_eq!(hover(Surface::Rust, text, 0, 0), some(expected), "{text}");
    }
}

#[test]
fn rust_raw_strings_are_verbatim() {
    assert_eq!(
        hover(Surface::Rust, r#"r"1\u{1155}23""#, 0, 0),
        some(r"1\u{1155}23")
    );
    assert_eq!(
        hover(Surface::Rust, r##"r#"1\u{1155}23"#"##, 0, 0),
        some(r"1\u{1155}23")
    );
    assert_eq!(
        hover(Surface::Rust, r###"r##"1\u{1155}23#"##"###, 0, 0),
        some(r"1\u{1155}23#")
    );
}

#[test]
fn rust_lifetime_does_not_open_a_char() {
    let text = r#"fn f<'a>(x: &'a str) -> &'a str { "\n" }"#;
    assert_eq!(hover(Surface::Rust, text, 0, 35), some("\n"));
}

#[test]
fn rust_string_in_nested_comment_is_hidden() {
    let text = r#"/* /* */ "a\nb" */ "c\nd""#;
    assert_eq!(hover(Surface::Rust, text, 0, 10), None);
    assert_eq!(hover(Surface::Rust, text, 0, 20), some("c\nd"));
}

#[test]
fn rust_multiline_document() {
    let text = "fn main() {\n    println!(\"x\\ty\");\n}\n";
    assert_eq!(hover(Surface::Rust, text, 1, 14), some("x\ty"));
    assert_eq!(hover(Surface::Rust, text, 0, 3), None);
}
