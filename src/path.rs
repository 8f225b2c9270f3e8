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

//! A pure, allocating convenience layer over the segment grammar that
//! [`crate::PathCursor`] also drives.
//!
//! Mirrors a common split in buffer-cursor libraries between a zero-copy
//! core and an owning, easier-to-hold-onto wrapper: everything here is
//! expressible by repeated `PathCursor` calls, it just saves the caller from
//! driving the cursor by hand when they'd rather have a `Vec` of every
//! segment up front.
//!
//! [`parse_path`] walks the `segment` module directly rather than through
//! `PathCursor`, since the cursor's `next_key_name`/`next_key_value` share a
//! single scan position and are meant to be driven one at a time, not paired
//! up per predicate the way this module needs.

use std::fmt;

use crate::segment;

/// One parsed path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode<'a> {
    pub namespace: Option<&'a str>,
    pub name: &'a str,
    #[cfg_attr(feature = "serde", serde(borrow))]
    pub predicates: Vec<(&'a str, &'a str)>,
}

/// Errors from the allocating convenience layer.
///
/// `PathCursor` itself never produces these — every one of its twelve core
/// operations reports failure as `None`. This type exists only for
/// [`parse_path`], which has no analogue on `PathCursor` and is free to use
/// a richer error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// `path` did not start with `/`.
    MissingLeadingSlash,
    /// A segment's predicate list was malformed (unterminated quote,
    /// missing `]`, etc.).
    MalformedPredicate { at: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::MissingLeadingSlash => write!(f, "path is missing its leading '/'"),
            PathError::MalformedPredicate { at } => {
                write!(f, "malformed predicate near byte offset {at}")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Walks every segment of `path` and collects it into an owned `Vec`.
///
/// Unlike `PathCursor`, this never needs to mutate anything to begin with —
/// it only ever holds a shared `&str` — so there is no borrow to give back.
pub fn parse_path(path: &str) -> Result<Vec<PathNode<'_>>, PathError> {
    if !path.starts_with('/') {
        return Err(PathError::MissingLeadingSlash);
    }

    let mut nodes = Vec::new();
    let mut seg_start = 1;

    while seg_start < path.len() {
        let seg = segment::parse_segment(path, seg_start)
            .ok_or(PathError::MalformedPredicate { at: seg_start })?;

        let (namespace, name) = match seg.with_ns(path).split_once(':') {
            Some((ns, name)) => (Some(ns), name),
            None => (None, seg.name(path)),
        };

        let mut predicates = Vec::new();
        let mut pred_pos = seg.name_end;
        while let Some((key, value, next)) = segment::next_predicate_in(path, pred_pos, seg.pred_end) {
            predicates.push((&path[key], &path[value]));
            pred_pos = next;
        }

        nodes.push(PathNode {
            namespace,
            name,
            predicates,
        });

        seg_start = seg.next_seg_start(path);
    }

    Ok(nodes)
}
