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

//! Range endpoints and the comparison rules that give ranges their algebra.
//!
//! A [`Bound`] is used either as the start or as the end of a range, and the
//! two roles order differently: an unbounded start lies before every instant
//! while an unbounded end lies after every instant, and at a shared instant an
//! inclusive start comes before an exclusive one whereas an exclusive end comes
//! before an inclusive one. The free functions in this module implement those
//! rules once, generically, so every range type built on `Bound` agrees on them.

use crate::time::Instant;
use std::cmp::Ordering;

/// One end of a range.
///
/// Mirrors [`std::ops::Bound`] but owns its value and defaults to [`Instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound<T = Instant> {
    /// The endpoint is part of the range.
    Included(T),
    /// The endpoint is not part of the range.
    Excluded(T),
    /// The range extends forever in this direction.
    Unbounded,
}

impl<T> Bound<T> {
    /// Returns the endpoint, or `None` if unbounded.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Bound::Included(v) | Bound::Excluded(v) => Some(v),
            Bound::Unbounded => None,
        }
    }

    /// Returns `true` for [`Bound::Included`].
    #[inline]
    pub fn is_inclusive(&self) -> bool {
        matches!(self, Bound::Included(_))
    }

    /// Returns `true` for [`Bound::Unbounded`].
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }

    /// Converts `&Bound<T>` to `Bound<&T>`.
    #[inline]
    pub fn as_ref(&self) -> Bound<&T> {
        match self {
            Bound::Included(v) => Bound::Included(v),
            Bound::Excluded(v) => Bound::Excluded(v),
            Bound::Unbounded => Bound::Unbounded,
        }
    }

    /// Maps the endpoint value, keeping the inclusivity.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Bound<U> {
        match self {
            Bound::Included(v) => Bound::Included(f(v)),
            Bound::Excluded(v) => Bound::Excluded(f(v)),
            Bound::Unbounded => Bound::Unbounded,
        }
    }

    /// Maps the endpoint value with a fallible function, keeping the inclusivity.
    #[inline]
    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<Bound<U>, E> {
        Ok(match self {
            Bound::Included(v) => Bound::Included(f(v)?),
            Bound::Excluded(v) => Bound::Excluded(f(v)?),
            Bound::Unbounded => Bound::Unbounded,
        })
    }

    /// Swaps inclusive and exclusive. Unbounded stays unbounded.
    ///
    /// The flipped end of one range is the start of the range just after it.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Bound::Included(v) => Bound::Excluded(v),
            Bound::Excluded(v) => Bound::Included(v),
            Bound::Unbounded => Bound::Unbounded,
        }
    }
}

impl<T: Ord> Bound<T> {
    /// Orders two bounds used as range starts.
    ///
    /// `Unbounded` is least. At equal values `Included` precedes `Excluded`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::range::Bound;
    /// # use std::cmp::Ordering;
    /// assert_eq!(Bound::Included(1).cmp_as_start(&Bound::Excluded(1)), Ordering::Less);
    /// assert_eq!(Bound::<i32>::Unbounded.cmp_as_start(&Bound::Included(i32::MIN)), Ordering::Less);
    /// ```
    pub fn cmp_as_start(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
            (Bound::Unbounded, _) => Ordering::Less,
            (_, Bound::Unbounded) => Ordering::Greater,
            (a, b) => a
                .value()
                .cmp(&b.value())
                .then_with(|| b.is_inclusive().cmp(&a.is_inclusive())),
        }
    }

    /// Orders two bounds used as range ends.
    ///
    /// `Unbounded` is greatest. At equal values `Excluded` precedes `Included`.
    pub fn cmp_as_end(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
            (Bound::Unbounded, _) => Ordering::Greater,
            (_, Bound::Unbounded) => Ordering::Less,
            (a, b) => a
                .value()
                .cmp(&b.value())
                .then_with(|| a.is_inclusive().cmp(&b.is_inclusive())),
        }
    }

    /// Returns `true` if `point` lies at or after this bound used as a start.
    #[inline]
    pub fn admits_as_start(&self, point: &T) -> bool {
        match self {
            Bound::Included(v) => v <= point,
            Bound::Excluded(v) => v < point,
            Bound::Unbounded => true,
        }
    }

    /// Returns `true` if `point` lies at or before this bound used as an end.
    #[inline]
    pub fn admits_as_end(&self, point: &T) -> bool {
        match self {
            Bound::Included(v) => point <= v,
            Bound::Excluded(v) => point < v,
            Bound::Unbounded => true,
        }
    }
}

/// Which ends of a range built from two optional endpoints are inclusive.
///
/// Ignored for an end that is `None`, since an unbounded end has no inclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Inclusivity {
    /// Neither endpoint is included: `(a, b)`.
    Exclusive,
    /// Only the start is included: `[a, b)`.
    IncludeStart,
    /// Only the end is included: `(a, b]`.
    IncludeEnd,
    /// Both endpoints are included: `[a, b]`.
    #[default]
    Inclusive,
}

impl Inclusivity {
    /// Builds an inclusivity from two flags.
    #[inline]
    pub const fn from_flags(include_start: bool, include_end: bool) -> Self {
        match (include_start, include_end) {
            (false, false) => Inclusivity::Exclusive,
            (true, false) => Inclusivity::IncludeStart,
            (false, true) => Inclusivity::IncludeEnd,
            (true, true) => Inclusivity::Inclusive,
        }
    }

    /// Returns `true` if the start is included.
    #[inline]
    pub const fn includes_start(self) -> bool {
        matches!(self, Inclusivity::IncludeStart | Inclusivity::Inclusive)
    }

    /// Returns `true` if the end is included.
    #[inline]
    pub const fn includes_end(self) -> bool {
        matches!(self, Inclusivity::IncludeEnd | Inclusivity::Inclusive)
    }

    /// Turns two optional endpoints into a pair of bounds.
    pub fn bounds<T>(self, start: Option<T>, end: Option<T>) -> (Bound<T>, Bound<T>) {
        let wrap = |value: Option<T>, inclusive: bool| match value {
            Some(v) if inclusive => Bound::Included(v),
            Some(v) => Bound::Excluded(v),
            None => Bound::Unbounded,
        };
        (
            wrap(start, self.includes_start()),
            wrap(end, self.includes_end()),
        )
    }
}

impl<T> From<std::ops::Bound<T>> for Bound<T> {
    fn from(b: std::ops::Bound<T>) -> Self {
        match b {
            std::ops::Bound::Included(v) => Bound::Included(v),
            std::ops::Bound::Excluded(v) => Bound::Excluded(v),
            std::ops::Bound::Unbounded => Bound::Unbounded,
        }
    }
}

impl<T> From<Bound<T>> for std::ops::Bound<T> {
    fn from(b: Bound<T>) -> Self {
        match b {
            Bound::Included(v) => std::ops::Bound::Included(v),
            Bound::Excluded(v) => std::ops::Bound::Excluded(v),
            Bound::Unbounded => std::ops::Bound::Unbounded,
        }
    }
}

/// Returns `true` if no value lies between `start` and `end`.
///
/// That is the case when the start value exceeds the end value, or when the
/// values are equal and at least one side is exclusive.
pub fn is_empty_span<T: Ord>(start: &Bound<T>, end: &Bound<T>) -> bool {
    match (start, end) {
        (Bound::Unbounded, _) | (_, Bound::Unbounded) => false,
        (Bound::Included(s), Bound::Included(e)) => s > e,
        (s, e) => s.value() >= e.value(),
    }
}

/// Returns `true` if the range ending at `end` is immediately followed,
/// without gap or overlap, by the range starting at `start`.
///
/// Both bounds must sit on the same value and exactly one of them may be inclusive.
pub fn abuts<T: Ord>(end: &Bound<T>, start: &Bound<T>) -> bool {
    match (end, start) {
        (Bound::Included(e), Bound::Excluded(s)) | (Bound::Excluded(e), Bound::Included(s)) => {
            e == s
        }
        _ => false,
    }
}

/// Returns `true` if every value admitted by the range ending at `end` lies
/// strictly before every value admitted by the range starting at `start`.
pub fn precedes<T: Ord>(end: &Bound<T>, start: &Bound<T>) -> bool {
    match (end.value(), start.value()) {
        (Some(e), Some(s)) => e < s || (e == s && !(end.is_inclusive() && start.is_inclusive())),
        _ => false,
    }
}

/// Intersects two non-empty spans, resolving ties toward the exclusive side.
pub fn intersect_spans<T: Ord + Clone>(
    (a_start, a_end): (&Bound<T>, &Bound<T>),
    (b_start, b_end): (&Bound<T>, &Bound<T>),
) -> (Bound<T>, Bound<T>) {
    let start = match a_start.cmp_as_start(b_start) {
        Ordering::Less => b_start,
        _ => a_start,
    };
    let end = match a_end.cmp_as_end(b_end) {
        Ordering::Greater => b_end,
        _ => a_end,
    };
    (start.clone(), end.clone())
}

/// Returns the convex hull of two non-empty spans, resolving ties toward the
/// inclusive side.
pub fn hull_spans<T: Ord + Clone>(
    (a_start, a_end): (&Bound<T>, &Bound<T>),
    (b_start, b_end): (&Bound<T>, &Bound<T>),
) -> (Bound<T>, Bound<T>) {
    let start = match a_start.cmp_as_start(b_start) {
        Ordering::Greater => b_start,
        _ => a_start,
    };
    let end = match a_end.cmp_as_end(b_end) {
        Ordering::Less => b_end,
        _ => a_end,
    };
    (start.clone(), end.clone())
}
