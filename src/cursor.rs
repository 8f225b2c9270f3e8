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

use crate::segment::{self, SegmentInfo};

#[cfg(feature = "logging")]
macro_rules! trace_cursor {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}
#[cfg(not(feature = "logging"))]
macro_rules! trace_cursor {
    ($($arg:tt)*) => {};
}

/// A cursor over a single XPath instance-identifier expression.
///
/// `PathCursor` borrows the path for as long as the cursor lives (the
/// `'buf` lifetime) and decomposes it into node names, namespace prefixes
/// and predicate key/value pairs without ever copying the string.
///
/// Every operation comes in two forms:
///
/// - the *seeding* form takes `&'buf mut str` directly: it (re)installs the
///   cursor at the start of that path, discarding whatever scan was in
///   progress.
/// - the `_continue` form takes no buffer and resumes from wherever the
///   cursor currently is; calling it before any seeding call returns `None`.
///
/// This is the two-method rendering of the "pass the original buffer to
/// start a scan, pass a null sentinel to continue it" idiom the navigator
/// was distilled from.
///
/// A cursor is never shared: calling any method takes `&mut self` (or `&self`
/// for the handful of operations that are pure lookups), so the borrow
/// checker enforces single ownership for the whole scan sequence by
/// construction.
#[derive(Debug)]
pub struct PathCursor<'buf> {
    buf: Option<&'buf str>,
    /// Offset where the next `next_node`/`next_node_with_ns` scan resumes.
    current: usize,
    /// Shared scan position for `next_key_name`/`next_key_value` within the
    /// current node's predicate list.
    pred_pos: usize,
    /// Start of the current node's predicate list; unlike `pred_pos`, this
    /// never advances, so by-name/by-index lookups can rescan from the
    /// beginning regardless of how far `next_key_name`/`next_key_value` got.
    pred_start: usize,
    /// Upper bound (exclusive) for `pred_pos`, i.e. the end of the current
    /// node's predicate list.
    pred_end: usize,
    /// Ordinal of the most recently yielded node, or -1 before any node has
    /// been returned.
    node_index: isize,
}

impl<'buf> Default for PathCursor<'buf> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'buf> PathCursor<'buf> {
    /// Returns a freshly zeroed cursor, equivalent to a C `sr_xpath_ctx_t`
    /// that was `{0}`-initialized.
    pub fn new() -> Self {
        Self {
            buf: None,
            current: 0,
            pred_pos: 0,
            pred_start: 0,
            pred_end: 0,
            node_index: -1,
        }
    }

    fn seed(&mut self, path: &'buf mut str) {
        trace_cursor!("seeding cursor, path len = {}", path.len());
        self.buf = Some(&*path);
        self.current = 1;
        self.pred_pos = 1;
        self.pred_start = 1;
        self.pred_end = 1;
        self.node_index = -1;
    }

    fn select(&mut self, index: usize, seg: SegmentInfo) {
        let path = self.buf.expect("select called without a seeded buffer");
        trace_cursor!("selecting node {index}: {:?}", seg.name(path));
        self.node_index = index as isize;
        self.current = seg.next_seg_start(path);
        self.pred_pos = seg.name_end;
        self.pred_start = seg.name_end;
        self.pred_end = seg.pred_end;
    }

    /// Restores the cursor to its pre-scan state.
    ///
    /// Because this crate never mutates the caller's buffer, "restoring" is
    /// just forgetting the borrow and resetting bookkeeping; the buffer
    /// itself was never touched, so it is trivially byte-identical to what
    /// it was before the scan.
    pub fn recover(&mut self) {
        trace_cursor!("recovering cursor");
        self.buf = None;
        self.current = 0;
        self.pred_pos = 0;
        self.pred_start = 0;
        self.pred_end = 0;
        self.node_index = -1;
    }

    // ---- 4.1.1 next node (no namespace) -------------------------------

    pub fn next_node(&mut self, path: &'buf mut str) -> Option<&'buf str> {
        self.seed(path);
        self.next_node_continue()
    }

    pub fn next_node_continue(&mut self) -> Option<&'buf str> {
        let path = self.buf?;
        if self.current >= path.len() {
            return None;
        }
        let seg = segment::parse_segment(path, self.current)?;
        let index = (self.node_index + 1) as usize;
        self.select(index, seg);
        Some(seg.name(path))
    }

    // ---- 4.1.2 next node (with namespace) ------------------------------

    pub fn next_node_with_ns(&mut self, path: &'buf mut str) -> Option<&'buf str> {
        self.seed(path);
        self.next_node_with_ns_continue()
    }

    pub fn next_node_with_ns_continue(&mut self) -> Option<&'buf str> {
        let path = self.buf?;
        if self.current >= path.len() {
            return None;
        }
        let seg = segment::parse_segment(path, self.current)?;
        let index = (self.node_index + 1) as usize;
        self.select(index, seg);
        Some(seg.with_ns(path))
    }

    // ---- 4.1.3 next key name / next key value --------------------------

    pub fn next_key_name(&mut self, path: &'buf mut str) -> Option<&'buf str> {
        self.seed(path);
        self.next_key_name_continue()
    }

    pub fn next_key_name_continue(&mut self) -> Option<&'buf str> {
        let path = self.buf?;
        if self.node_index < 0 {
            return None;
        }
        let (key, _value, next) = segment::next_predicate_in(path, self.pred_pos, self.pred_end)?;
        self.pred_pos = next;
        Some(&path[key])
    }

    pub fn next_key_value(&mut self, path: &'buf mut str) -> Option<&'buf str> {
        self.seed(path);
        self.next_key_value_continue()
    }

    pub fn next_key_value_continue(&mut self) -> Option<&'buf str> {
        let path = self.buf?;
        if self.node_index < 0 {
            return None;
        }
        let (_key, value, next) = segment::next_predicate_in(path, self.pred_pos, self.pred_end)?;
        self.pred_pos = next;
        Some(&path[value])
    }

    // ---- 4.1.4 node by name (absolute / relative) ----------------------

    pub fn node(&mut self, path: &'buf mut str, name: &str) -> Option<&'buf str> {
        self.seed(path);
        self.node_continue(name)
    }

    pub fn node_continue(&mut self, name: &str) -> Option<&'buf str> {
        let path = self.buf?;
        let (index, seg) = segment::find_segment_by_name(path, 0, name)?;
        self.select(index, seg);
        Some(seg.name(path))
    }

    pub fn node_rel(&mut self, path: &'buf mut str, name: &str) -> Option<&'buf str> {
        self.seed(path);
        self.node_rel_continue(name)
    }

    pub fn node_rel_continue(&mut self, name: &str) -> Option<&'buf str> {
        let path = self.buf?;
        let start = self.node_index.max(0) as usize;
        let (index, seg) = segment::find_segment_by_name(path, start, name)?;
        self.select(index, seg);
        Some(seg.name(path))
    }

    // ---- 4.1.5 node by index (absolute / relative) ---------------------

    pub fn node_idx(&mut self, path: &'buf mut str, index: usize) -> Option<&'buf str> {
        self.seed(path);
        self.node_idx_continue(index)
    }

    pub fn node_idx_continue(&mut self, index: usize) -> Option<&'buf str> {
        let path = self.buf?;
        let seg = segment::segment_at_index(path, index)?;
        self.select(index, seg);
        Some(seg.name(path))
    }

    pub fn node_idx_rel(&mut self, path: &'buf mut str, n: usize) -> Option<&'buf str> {
        self.seed(path);
        self.node_idx_rel_continue(n)
    }

    pub fn node_idx_rel_continue(&mut self, n: usize) -> Option<&'buf str> {
        let path = self.buf?;
        let base = if self.node_index < 0 {
            0
        } else {
            self.node_index as usize
        };
        let index = base + n;
        let seg = segment::segment_at_index(path, index)?;
        self.select(index, seg);
        Some(seg.name(path))
    }

    // ---- 4.1.6 node-key lookup by key name -----------------------------

    pub fn node_key_value(&mut self, path: &'buf mut str, key: &str) -> Option<&'buf str> {
        self.seed(path);
        self.node_key_value_continue(key)
    }

    pub fn node_key_value_continue(&self, key: &str) -> Option<&'buf str> {
        let path = self.buf?;
        if self.node_index < 0 {
            return None;
        }
        current_node_predicates(path, self.pred_start, self.pred_end)
            .find_map(|(k, v)| (&path[k] == key).then(|| &path[v]))
    }

    // ---- 4.1.7 node-key lookup by key index ----------------------------

    pub fn node_key_value_idx(&mut self, path: &'buf mut str, idx: usize) -> Option<&'buf str> {
        self.seed(path);
        self.node_key_value_idx_continue(idx)
    }

    pub fn node_key_value_idx_continue(&self, idx: usize) -> Option<&'buf str> {
        let path = self.buf?;
        if self.node_index < 0 {
            return None;
        }
        current_node_predicates(path, self.pred_start, self.pred_end)
            .nth(idx)
            .map(|(_k, v)| &path[v])
    }

    // ---- 4.1.8 whole-path key lookup by node name + key name -----------

    pub fn key_value(
        &mut self,
        path: &'buf mut str,
        node_name: &str,
        key: &str,
    ) -> Option<&'buf str> {
        self.seed(path);
        self.key_value_continue(node_name, key)
    }

    pub fn key_value_continue(&self, node_name: &str, key: &str) -> Option<&'buf str> {
        let path = self.buf?;
        let (_index, seg) = segment::find_segment_by_name(path, 0, node_name)?;
        current_node_predicates(path, seg.name_end, seg.pred_end)
            .find_map(|(k, v)| (&path[k] == key).then(|| &path[v]))
    }

    // ---- 4.1.9 whole-path key lookup by node index + key index ---------

    pub fn key_value_idx(
        &mut self,
        path: &'buf mut str,
        node_idx: usize,
        key_idx: usize,
    ) -> Option<&'buf str> {
        self.seed(path);
        self.key_value_idx_continue(node_idx, key_idx)
    }

    pub fn key_value_idx_continue(&self, node_idx: usize, key_idx: usize) -> Option<&'buf str> {
        let path = self.buf?;
        let seg = segment::segment_at_index(path, node_idx)?;
        current_node_predicates(path, seg.name_end, seg.pred_end)
            .nth(key_idx)
            .map(|(_k, v)| &path[v])
    }

    // ---- 4.1.10 last node ----------------------------------------------

    pub fn last_node(&mut self, path: &'buf mut str) -> Option<&'buf str> {
        self.seed(path);
        self.last_node_continue()
    }

    pub fn last_node_continue(&self) -> Option<&'buf str> {
        let path = self.buf?;
        let seg = segment::last_segment(path)?;
        Some(seg.name(path))
    }

    // ---- 4.1.11 / 4.1.12 pure operations --------------------------------

    /// Returns the final segment of `path`, predicate suffix included.
    ///
    /// Pure: takes no cursor, never mutates `path`.
    pub fn node_name(path: &str) -> &str {
        match segment::last_segment(path) {
            Some(seg) => &path[seg.seg_start..],
            None => path,
        }
    }

    /// True iff the bare name of `path`'s final segment equals `candidate`.
    ///
    /// A `candidate` starting with `/` can never match, since a bare name
    /// never contains `/`.
    pub fn node_name_eq(path: &str, candidate: &str) -> bool {
        if candidate.starts_with('/') {
            return false;
        }
        match segment::last_segment(path) {
            Some(seg) => seg.name(path) == candidate,
            None => false,
        }
    }
}

/// Iterates every predicate in `[pos, bound)`, independent of cursor state —
/// used by the lookup operations (4.1.6–4.1.9) that must not disturb
/// `pred_pos`.
fn current_node_predicates(
    path: &str,
    pos: usize,
    bound: usize,
) -> impl Iterator<Item = (core::ops::Range<usize>, core::ops::Range<usize>)> + '_ {
    let mut pos = pos;
    core::iter::from_fn(move || {
        let (key, value, next) = segment::next_predicate_in(path, pos, bound)?;
        pos = next;
        Some((key, value))
    })
}
