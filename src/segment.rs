// Copyright (c) 2022 Gilad Naaman
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Grammar-level parsing of one `/`-delimited segment.
//!
//! This is the state-machine half of the navigator: it knows how to find
//! where a segment's namespace, name and predicate list begin and end, but
//! it never decides what the caller asked for. [`crate::PathCursor`] drives
//! it.

/// Byte offsets describing one parsed `Segment` within the whole path string.
///
/// All offsets are relative to the start of the full path, not to the
/// segment itself, so ranges can be sliced directly out of the original
/// `&str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SegmentInfo {
    /// First byte of the segment (right after the leading `/`).
    pub seg_start: usize,
    /// First byte of the bare node name (after `namespace:`, if any).
    pub name_start: usize,
    /// First byte past the bare node name.
    pub name_end: usize,
    /// First byte past the last predicate (or past the name, if none);
    /// this is either the path length or the index of the `/` that starts
    /// the next segment.
    pub pred_end: usize,
}

impl SegmentInfo {
    pub(crate) fn name<'a>(&self, path: &'a str) -> &'a str {
        &path[self.name_start..self.name_end]
    }

    pub(crate) fn with_ns<'a>(&self, path: &'a str) -> &'a str {
        &path[self.seg_start..self.name_end]
    }

    /// Offset where the next segment would start, or `path.len()` if this
    /// was the last one.
    pub(crate) fn next_seg_start(&self, path: &str) -> usize {
        if self.pred_end < path.len() {
            self.pred_end + 1
        } else {
            path.len()
        }
    }
}

/// Parses one segment starting right after its leading `/`.
///
/// Returns `None` on grammar violations (an unterminated predicate, a
/// missing `'` or `]`); callers treat that as "absent", never as a panic.
pub(crate) fn parse_segment(path: &str, seg_start: usize) -> Option<SegmentInfo> {
    let bytes = path.as_bytes();
    if seg_start > bytes.len() {
        return None;
    }

    let mut i = seg_start;
    let mut colon = None;
    while i < bytes.len() {
        match bytes[i] {
            b':' => {
                colon = Some(i);
                break;
            }
            b'/' | b'[' => break,
            _ => i += 1,
        }
    }
    let name_start = colon.map(|c| c + 1).unwrap_or(seg_start);

    let mut name_end = name_start;
    while name_end < bytes.len() && bytes[name_end] != b'/' && bytes[name_end] != b'[' {
        name_end += 1;
    }

    let pred_end = skip_predicates(path, name_end)?;
    Some(SegmentInfo {
        seg_start,
        name_start,
        name_end,
        pred_end,
    })
}

/// Walks zero or more `[key='value']` predicates starting at `pos`,
/// returning the offset right past the last one (or `pos` itself if there
/// were none).
pub(crate) fn skip_predicates(path: &str, pos: usize) -> Option<usize> {
    let bytes = path.as_bytes();
    let mut pos = pos;
    while pos < bytes.len() && bytes[pos] == b'[' {
        let (_key, _value, next) = parse_predicate(path, pos)?;
        pos = next;
    }
    Some(pos)
}

/// Parses a single `[key='value']` predicate starting at the `[`.
///
/// Returns the key range, the value range (both relative to `path`) and the
/// offset of the first byte past the closing `]`.
pub(crate) fn parse_predicate(
    path: &str,
    bracket: usize,
) -> Option<(core::ops::Range<usize>, core::ops::Range<usize>, usize)> {
    let bytes = path.as_bytes();
    debug_assert_eq!(bytes.get(bracket), Some(&b'['));

    let key_start = bracket + 1;
    let eq = memchr::memchr(b'=', &bytes[key_start..])? + key_start;
    if bytes.get(eq + 1) != Some(&b'\'') {
        return None;
    }
    let val_start = eq + 2;
    let close_quote = memchr::memchr(b'\'', &bytes[val_start..])? + val_start;
    let close_bracket = close_quote + 1;
    if bytes.get(close_bracket) != Some(&b']') {
        return None;
    }

    Some((key_start..eq, val_start..close_quote, close_bracket + 1))
}

/// Finds the next predicate at or after `pos`, bounded by `bound` (exclusive).
///
/// This is the shared scan `PathCursor`'s `next_key_name`/`next_key_value`
/// operations drive: both search for the next `[` and differ only in which
/// half of the parsed predicate they return.
pub(crate) fn next_predicate_in(
    path: &str,
    pos: usize,
    bound: usize,
) -> Option<(core::ops::Range<usize>, core::ops::Range<usize>, usize)> {
    let bytes = path.as_bytes();
    let bracket = memchr::memchr(b'[', &bytes[pos..bound])? + pos;
    let (key, value, next) = parse_predicate(path, bracket)?;
    if next > bound {
        return None;
    }
    Some((key, value, next))
}

/// Walks segments from the start of the path, stopping at the `n`-th
/// (zero-based). `path` must start with `/`.
pub(crate) fn segment_at_index(path: &str, index: usize) -> Option<SegmentInfo> {
    if path.as_bytes().first() != Some(&b'/') {
        return None;
    }
    let mut seg_start = 1;
    let mut i = 0;
    loop {
        let seg = parse_segment(path, seg_start)?;
        if i == index {
            return Some(seg);
        }
        let next = seg.next_seg_start(path);
        if next >= path.len() {
            return None;
        }
        seg_start = next;
        i += 1;
    }
}

/// Finds the first segment (starting the search at `from_index`) whose bare
/// name equals `name`.
pub(crate) fn find_segment_by_name(
    path: &str,
    from_index: usize,
    name: &str,
) -> Option<(usize, SegmentInfo)> {
    let mut index = from_index;
    loop {
        let seg = segment_at_index(path, index)?;
        if seg.name(path) == name {
            return Some((index, seg));
        }
        index += 1;
    }
}

/// Returns the last segment of `path`, by walking every segment in turn.
///
/// This does not assume `/` cannot appear inside a predicate value, unlike a
/// naive `rfind('/')`.
pub(crate) fn last_segment(path: &str) -> Option<SegmentInfo> {
    if path.as_bytes().first() != Some(&b'/') {
        return None;
    }
    let mut seg_start = 1;
    let mut last = None;
    loop {
        let seg = parse_segment(path, seg_start)?;
        let next = seg.next_seg_start(path);
        last = Some(seg);
        if next >= path.len() {
            return last;
        }
        seg_start = next;
    }
}
