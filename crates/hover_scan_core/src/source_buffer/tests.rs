use super::*;

// === Construction ===

#[test]
fn empty_window() {
    let buf = SourceBuffer::new("");
    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert!(buf.as_bytes().is_empty());
    assert_eq!(buf.as_sentinel_bytes()[0], 0);
}

#[test]
fn ascii_window() {
    let buf = SourceBuffer::new(r#""a\nb""#);
    assert_eq!(buf.len(), 6);
    assert!(!buf.is_empty());
    assert_eq!(buf.as_bytes(), br#""a\nb""#);
    assert_eq!(buf.as_sentinel_bytes()[6], 0);
}

#[test]
fn utf8_multibyte_window() {
    let window = "\"\u{1F600}\\n\""; // emoji (4 bytes)
    let buf = SourceBuffer::new(window);
    assert_eq!(buf.len() as usize, window.len());
    assert_eq!(buf.as_bytes(), window.as_bytes());
}

#[test]
fn interior_null_is_content() {
    let buf = SourceBuffer::new("a\0b");
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.as_bytes(), b"a\0b");
}

// === Cache-Line Alignment ===

#[test]
fn buffer_aligned_to_cache_line() {
    for len in [0, 1, 10, 63, 64, 65, 127, 128, 1000] {
        let window: String = "x".repeat(len);
        let buf = SourceBuffer::new(&window);
        assert_eq!(
            buf.as_sentinel_bytes().len() % CACHE_LINE,
            0,
            "buffer length {} is not cache-line aligned for window length {}",
            buf.as_sentinel_bytes().len(),
            len
        );
    }
}

#[test]
fn sentinel_and_padding_are_zero() {
    let buf = SourceBuffer::new("abc");
    for &b in &buf.as_sentinel_bytes()[3..] {
        assert_eq!(b, 0, "non-zero byte in sentinel/padding region");
    }
}

#[test]
fn cursor_starts_at_zero() {
    let buf = SourceBuffer::new("abc");
    let cursor = buf.cursor();
    assert_eq!(cursor.pos(), 0);
    assert_eq!(cursor.source_len(), 3);
    assert_eq!(cursor.current(), b'a');
}
