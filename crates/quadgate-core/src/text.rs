//! Char-boundary helpers for byte-window slicing.
//!
//! Rust `&str[a..b]` panics when an index falls inside a multi-byte
//! character. These helpers snap indices to the nearest valid boundary so
//! fixed-size byte windows are always safe to slice.

/// Largest char boundary less than or equal to `idx` (clamped to `s.len()`).
#[inline]
pub fn floor_char_boundary(s: &str, idx: usize) -> usize {
    let mut idx = idx.min(s.len());
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Slice a byte window `[start, end)` out of `s`, snapping both edges down
/// to char boundaries and clamping to the string length.
///
/// Snapping down widens the window on the left edge and narrows it on the
/// right, so a window can never split a character or exceed its nominal
/// extent on the right.
pub fn byte_window(s: &str, start: usize, end: usize) -> &str {
    let start = floor_char_boundary(s, start);
    let end = floor_char_boundary(s, end.max(start));
    &s[start..end]
}
