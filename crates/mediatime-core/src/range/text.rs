// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Text form of ranges, shared by every range type built on [`Bound`].
//!
//! | Text        | Meaning                                   |
//! |-------------|-------------------------------------------|
//! | `[a_b)`     | `a` included, `b` excluded                |
//! | `(a_b]`     | `a` excluded, `b` included                |
//! | `a_b`       | no markers: both ends included            |
//! | `[a_`, `_b)`| unbounded on the side with no value       |
//! | `[a]`, `a`  | the single value `a`                      |
//! | `()`        | the empty range                           |
//! | `_`         | the universal range                       |
//!
//! The writer never emits a marker on an unbounded side.

use super::bound::Bound;
use crate::error::{Result, TimeError};
use std::fmt;

/// The outcome of parsing a range string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeText<T> {
    /// The literal `()`.
    Empty,
    /// A start and an end bound, not yet normalized.
    Bounds(Bound<T>, Bound<T>),
}

/// Parses a range string, delegating each endpoint to `parse_value`.
///
/// # Errors
///
/// Returns [`TimeError::MalformedInput`] for a structurally invalid string, or
/// whatever `parse_value` returns for an invalid endpoint.
pub fn parse_range_text<T, F>(input: &str, mut parse_value: F) -> Result<RangeText<T>>
where
    F: FnMut(&str) -> Result<T>,
{
    let s = input.trim();
    if s == "()" {
        return Ok(RangeText::Empty);
    }

    let (start_marker, rest) = match s.as_bytes().first() {
        Some(b'[') => (Some(true), &s[1..]),
        Some(b'(') => (Some(false), &s[1..]),
        _ => (None, s),
    };
    let (end_marker, body) = match rest.as_bytes().last() {
        Some(b']') => (Some(true), &rest[..rest.len() - 1]),
        Some(b')') => (Some(false), &rest[..rest.len() - 1]),
        _ => (None, rest),
    };

    let bound = |text: &str, marker: Option<bool>, parse: &mut F| -> Result<Bound<T>> {
        if text.is_empty() {
            return Ok(Bound::Unbounded);
        }
        let value = parse(text)?;
        Ok(match marker {
            Some(false) => Bound::Excluded(value),
            _ => Bound::Included(value),
        })
    };

    match body.split_once('_') {
        Some((_, end)) if end.contains('_') => {
            Err(TimeError::malformed(input, "more than one '_' separator"))
        }
        Some((start, end)) => {
            let start = bound(start, start_marker, &mut parse_value)?;
            let end = bound(end, end_marker, &mut parse_value)?;
            Ok(RangeText::Bounds(start, end))
        }
        None if body.is_empty() => Err(TimeError::malformed(input, "range has no endpoints")),
        None => {
            let start = bound(body, start_marker, &mut parse_value)?;
            let end = bound(body, end_marker, &mut parse_value)?;
            Ok(RangeText::Bounds(start, end))
        }
    }
}

/// Writes a normalized, non-empty pair of bounds in the text form.
///
/// Callers write `()` themselves for the empty range.
pub fn write_range_text<T, F>(
    f: &mut fmt::Formatter<'_>,
    start: &Bound<T>,
    end: &Bound<T>,
    mut write_value: F,
) -> fmt::Result
where
    T: PartialEq,
    F: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
{
    match (start, end) {
        (Bound::Unbounded, Bound::Unbounded) => f.write_str("_"),
        (Bound::Included(s), Bound::Included(e)) if s == e => {
            f.write_str("[")?;
            write_value(f, s)?;
            f.write_str("]")
        }
        _ => {
            match start {
                Bound::Included(v) => {
                    f.write_str("[")?;
                    write_value(f, v)?;
                }
                Bound::Excluded(v) => {
                    f.write_str("(")?;
                    write_value(f, v)?;
                }
                Bound::Unbounded => {}
            }
            f.write_str("_")?;
            match end {
                Bound::Included(v) => {
                    write_value(f, v)?;
                    f.write_str("]")
                }
                Bound::Excluded(v) => {
                    write_value(f, v)?;
                    f.write_str(")")
                }
                Bound::Unbounded => Ok(()),
            }
        }
    }
}
