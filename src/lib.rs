// Copyright (c) 2022 Gilad Naaman

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! A zero-copy cursor over the restricted XPath instance-identifier subset
//! used by `sysrepo`-style configuration datastores.
//!
//! An instance identifier looks like:
//!
//! ```text
//! /example-module:container/list[key1='keyA'][key2='keyB']/leaf
//! ```
//!
//! [`PathCursor`] walks expressions of this shape — `/`-delimited segments,
//! each an optional `namespace:` prefix, a node name, and zero or more
//! `[key='value']` predicates — without allocating and without permanently
//! mutating the caller's string.

#![cfg_attr(not(feature = "std"), no_std)]

mod cursor;
mod segment;

#[cfg(feature = "std")]
mod path;

pub use cursor::PathCursor;

#[cfg(feature = "std")]
pub use path::{parse_path, PathError, PathNode};
