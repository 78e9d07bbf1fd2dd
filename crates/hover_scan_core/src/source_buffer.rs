//! Sentinel-terminated window buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the window content,
//! allowing the scanner to detect the end of the window without explicit
//! bounds checking. The total buffer size is rounded up to the next 64-byte
//! boundary, which also provides safe padding for `peek()` near the end
//! of the buffer.
//!
//! A buffer is built once per locate call from the literal window the
//! driver selected (a single line, a document prefix, or the whole text).

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated window buffer.
///
/// # Layout
///
/// ```text
/// [window_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[window_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual window content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from a literal window.
    ///
    /// Windows larger than `u32::MAX` bytes are truncated to `u32::MAX`
    /// bytes of scannable content; token offsets are `u32` throughout.
    pub fn new(window: &str) -> Self {
        let bytes = window.as_bytes();
        let source_len = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
        let content_len = source_len as usize;

        // Round up to next 64-byte boundary (minimum: content + 1 sentinel byte).
        let padded_len = (content_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        if let (Some(dst), Some(src)) = (buf.get_mut(..content_len), bytes.get(..content_len)) {
            dst.copy_from_slice(src);
        }

        Self { buf, source_len }
    }

    /// Returns the window bytes (without sentinel or padding).
    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.buf.get(..self.source_len as usize).unwrap_or_default()
    }

    /// Returns the full buffer including sentinel and cache-line padding.
    #[cfg(test)]
    pub(crate) fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the window content in bytes (excludes sentinel and padding).
    #[cfg(test)]
    pub(crate) fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the window is empty.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

/// Size assertion: `SourceBuffer` should stay within a cache line.
/// Vec<u8> = 24, u32 = 4, + 4 padding = 32.
const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);

#[cfg(test)]
mod tests;
