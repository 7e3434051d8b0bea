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

use super::bound::{Bound, Inclusivity, abuts, hull_spans, intersect_spans, is_empty_span, precedes};
use super::iter::RateIter;
use super::text::{RangeText, parse_range_text, write_range_text};
use crate::convert::{AsInstant, AsRange};
use crate::error::{Result, TimeError};
use crate::num::{RationalRate, Rounding};
use crate::time::{Duration, Instant};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::iter::Rev;
use std::ops::{BitAnd, BitOr, RangeBounds};
use std::str::FromStr;
use tracing::debug;

/// How [`Range::quantize`] rounds each end onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RangeRounding {
    /// Each end rounds to its nearest grid point independently.
    #[default]
    Nearest,
    /// Both ends round down.
    Down,
    /// Both ends round up.
    Up,
    /// The start rounds up and the end rounds down, shrinking the range.
    In,
    /// The start rounds down and the end rounds up, growing the range.
    Out,
    /// The start rounds to nearest and the end follows it in the same direction.
    Start,
    /// The end rounds to nearest and the start follows it in the same direction.
    End,
}

/// An interval of [`Instant`]s whose ends are each inclusive, exclusive or
/// unbounded.
///
/// Ranges are always normalized:
///
/// - a range whose start lies after its end, or whose ends meet on a value
///   that is not included at both ends, is the canonical empty range
///   [`Range::NEVER`];
/// - a range unbounded at both ends is the canonical universal range
///   [`Range::ETERNITY`].
///
/// Because the normal form is unique, derived equality and hashing compare
/// ranges as sets of instants.
///
/// # Examples
///
/// ```rust
/// # use mediatime_core::range::Range;
/// # use mediatime_core::time::Instant;
/// let t = |s: &str| s.parse::<Instant>().unwrap();
/// let a = Range::closed_open(t("0:0"), t("10:0"));
/// let b = Range::closed(t("5:0"), t("15:0"));
/// assert_eq!((a & b).to_string(), "[5:000000000_10:000000000)");
/// assert_eq!((a | b).to_string(), "[0:000000000_15:000000000]");
/// assert!(Range::closed(t("10:0"), t("5:0")).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    start: Bound,
    end: Bound,
}

impl Range {
    /// The canonical empty range.
    pub const NEVER: Range = Range {
        start: Bound::Excluded(Instant::EPOCH),
        end: Bound::Excluded(Instant::EPOCH),
    };

    /// The canonical range containing every instant.
    pub const ETERNITY: Range = Range {
        start: Bound::Unbounded,
        end: Bound::Unbounded,
    };

    /// Creates a range from two bounds and normalizes it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::range::{Bound, Range};
    /// # use mediatime_core::time::Instant;
    /// let t = Instant::new(1, 0).unwrap();
    /// assert_eq!(Range::new(Bound::Included(t), Bound::Excluded(t)), Range::NEVER);
    /// assert_eq!(Range::new(Bound::Unbounded, Bound::Unbounded), Range::ETERNITY);
    /// ```
    pub fn new(start: Bound, end: Bound) -> Self {
        if start.is_unbounded() && end.is_unbounded() {
            Self::ETERNITY
        } else if is_empty_span(&start, &end) {
            Self::NEVER
        } else {
            Self { start, end }
        }
    }

    /// Creates a range from optional endpoints, `None` meaning unbounded.
    #[inline]
    pub fn with_inclusivity(
        start: Option<Instant>,
        end: Option<Instant>,
        inclusivity: Inclusivity,
    ) -> Self {
        let (start, end) = inclusivity.bounds(start, end);
        Self::new(start, end)
    }

    /// `[start, end]`
    #[inline]
    pub fn closed(start: Instant, end: Instant) -> Self {
        Self::new(Bound::Included(start), Bound::Included(end))
    }

    /// `[start, end)`
    #[inline]
    pub fn closed_open(start: Instant, end: Instant) -> Self {
        Self::new(Bound::Included(start), Bound::Excluded(end))
    }

    /// `(start, end)`
    #[inline]
    pub fn open(start: Instant, end: Instant) -> Self {
        Self::new(Bound::Excluded(start), Bound::Excluded(end))
    }

    /// `(start, end]`
    #[inline]
    pub fn open_closed(start: Instant, end: Instant) -> Self {
        Self::new(Bound::Excluded(start), Bound::Included(end))
    }

    /// Every instant from `start` on, `start` included.
    #[inline]
    pub fn from_start(start: Instant) -> Self {
        Self::new(Bound::Included(start), Bound::Unbounded)
    }

    /// Every instant up to `end`, `end` included.
    #[inline]
    pub fn from_end(end: Instant) -> Self {
        Self::new(Bound::Unbounded, Bound::Included(end))
    }

    /// The range containing exactly one instant.
    #[inline]
    pub fn single(instant: Instant) -> Self {
        Self::closed(instant, instant)
    }

    /// Returns [`Range::NEVER`].
    #[inline]
    pub const fn never() -> Self {
        Self::NEVER
    }

    /// Returns [`Range::ETERNITY`].
    #[inline]
    pub const fn eternity() -> Self {
        Self::ETERNITY
    }

    /// Creates a range between two values convertible to instants.
    ///
    /// # Errors
    ///
    /// Propagates the conversion error of either endpoint.
    pub fn between<S, E>(start: &S, end: &E, inclusivity: Inclusivity) -> Result<Self>
    where
        S: AsInstant + ?Sized,
        E: AsInstant + ?Sized,
    {
        Ok(Self::with_inclusivity(
            Some(start.as_instant()?),
            Some(end.as_instant()?),
            inclusivity,
        ))
    }

    /// Creates the range starting at `start` and lasting `length`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::MalformedInput`] for a negative length and
    /// [`TimeError::Overflow`] if the end is not representable.
    pub fn from_start_length(start: Instant, length: Duration, inclusivity: Inclusivity) -> Result<Self> {
        if length.is_negative() {
            return Err(TimeError::malformed(length, "range length cannot be negative"));
        }
        let end = start.checked_add(length)?;
        Ok(Self::with_inclusivity(Some(start), Some(end), inclusivity))
    }

    /// Converts any [`AsRange`] value.
    ///
    /// # Errors
    ///
    /// Propagates the conversion's error.
    #[inline]
    pub fn of<T: AsRange + ?Sized>(value: &T) -> Result<Self> {
        value.as_range()
    }

    /// Returns the normal form of this range. Ranges are kept normalized, so
    /// this is the identity; it exists for callers that assemble bounds by hand.
    #[inline]
    pub fn normalize(self) -> Self {
        Self::new(self.start, self.end)
    }

    /// Returns the start bound.
    #[inline]
    pub fn start(&self) -> Bound {
        self.start
    }

    /// Returns the end bound.
    #[inline]
    pub fn end(&self) -> Bound {
        self.end
    }

    /// Returns the start instant, or `None` if unbounded before.
    #[inline]
    pub fn start_instant(&self) -> Option<Instant> {
        self.start.value().copied()
    }

    /// Returns the end instant, or `None` if unbounded after.
    #[inline]
    pub fn end_instant(&self) -> Option<Instant> {
        self.end.value().copied()
    }

    /// Returns `true` if the start instant belongs to the range.
    #[inline]
    pub fn includes_start(&self) -> bool {
        self.start.is_inclusive()
    }

    /// Returns `true` if the end instant belongs to the range.
    #[inline]
    pub fn includes_end(&self) -> bool {
        self.end.is_inclusive()
    }

    /// Returns the inclusivity of the two ends.
    #[inline]
    pub fn inclusivity(&self) -> Inclusivity {
        Inclusivity::from_flags(self.includes_start(), self.includes_end())
    }

    /// Returns `true` if the range has a start instant.
    #[inline]
    pub fn bounded_before(&self) -> bool {
        !self.start.is_unbounded()
    }

    /// Returns `true` if the range has an end instant.
    #[inline]
    pub fn bounded_after(&self) -> bool {
        !self.end.is_unbounded()
    }

    /// Returns `true` if both ends are bounded.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.bounded_before() && self.bounded_after()
    }

    /// Returns `true` if this is the empty range.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::NEVER
    }

    /// Returns `true` if this is the universal range.
    #[inline]
    pub fn is_universal(&self) -> bool {
        *self == Self::ETERNITY
    }

    /// Returns `true` if the range contains exactly one instant.
    #[inline]
    pub fn is_single(&self) -> bool {
        matches!((self.start, self.end), (Bound::Included(s), Bound::Included(e)) if s == e)
    }

    /// Returns the span from start to end. The empty range has length zero.
    ///
    /// Returns `None` if either end is unbounded, and also for a bounded range
    /// whose span does not fit in a [`Duration`], such as one from
    /// [`Instant::MIN`] to [`Instant::MAX`]. Use [`Range::checked_length`] to
    /// tell the two apart.
    pub fn length(&self) -> Option<Duration> {
        match (self.start_instant(), self.end_instant()) {
            _ if self.is_empty() => Some(Duration::ZERO),
            (Some(start), Some(end)) => end.checked_duration_since(start).ok(),
            _ => None,
        }
    }

    /// Like [`Range::length`] but reporting an unbounded range as an error.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::UnboundedRange`] if either end is unbounded and
    /// [`TimeError::Overflow`] if the length is not representable.
    pub fn checked_length(&self) -> Result<Duration> {
        if self.is_empty() {
            return Ok(Duration::ZERO);
        }
        match (self.start_instant(), self.end_instant()) {
            (Some(start), Some(end)) => end.checked_duration_since(start),
            _ => Err(TimeError::UnboundedRange),
        }
    }

    /// Returns `true` if `instant` lies in the range.
    #[inline]
    pub fn contains(&self, instant: Instant) -> bool {
        !self.is_empty() && self.start.admits_as_start(&instant) && self.end.admits_as_end(&instant)
    }

    /// Returns `true` if every instant of `other` lies in `self`. The empty
    /// range is contained in every range.
    pub fn contains_range(&self, other: &Range) -> bool {
        if other.is_empty() {
            return true;
        }
        !self.is_empty()
            && self.start.cmp_as_start(&other.start) != Ordering::Greater
            && self.end.cmp_as_end(&other.end) != Ordering::Less
    }

    /// Returns the instants in both ranges.
    ///
    /// Where the two candidate bounds sit on the same instant with different
    /// inclusivity, the exclusive one wins.
    pub fn intersection(&self, other: &Range) -> Range {
        if self.is_empty() || other.is_empty() {
            return Self::NEVER;
        }
        let (start, end) = intersect_spans((&self.start, &self.end), (&other.start, &other.end));
        Self::new(start, end)
    }

    /// Returns the smallest range containing both ranges.
    ///
    /// Where the two candidate bounds sit on the same instant with different
    /// inclusivity, the inclusive one wins. An empty operand is ignored.
    pub fn extend_to_encompass(&self, other: &Range) -> Range {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let (start, end) = hull_spans((&self.start, &self.end), (&other.start, &other.end));
        Self::new(start, end)
    }

    /// Returns the convex hull of both ranges.
    ///
    /// When the ranges neither overlap nor touch, the result also covers the
    /// gap between them. Use [`Range::checked_union`] to reject that case.
    #[inline]
    pub fn union(&self, other: &Range) -> Range {
        self.extend_to_encompass(other)
    }

    /// Returns the union of two ranges that overlap or are contiguous.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if the union would not be
    /// a single range.
    pub fn checked_union(&self, other: &Range) -> Result<Range> {
        if self.is_empty() || other.is_empty() || self.is_contiguous_with(other) {
            return Ok(self.extend_to_encompass(other));
        }
        debug!(range = %self, other = %other, "rejecting union of disjoint ranges");
        Err(TimeError::invalid_range(format!(
            "ranges {self} and {other} are not contiguous"
        )))
    }

    /// Returns `true` if the ranges share at least one instant.
    #[inline]
    pub fn overlaps(&self, other: &Range) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Returns `true` if `self` ends exactly where `other` starts, with the
    /// shared instant belonging to exactly one of them.
    #[inline]
    pub fn meets(&self, other: &Range) -> bool {
        !self.is_empty() && !other.is_empty() && abuts(&self.end, &other.start)
    }

    /// Returns `true` if the union of the ranges is a single range.
    #[inline]
    pub fn is_contiguous_with(&self, other: &Range) -> bool {
        self.overlaps(other) || self.meets(other) || other.meets(self)
    }

    /// Returns `true` if every instant of `self` precedes every instant of `other`.
    #[inline]
    pub fn before(&self, other: &Range) -> bool {
        !self.is_empty() && !other.is_empty() && precedes(&self.end, &other.start)
    }

    /// Returns `true` if every instant of `self` follows every instant of `other`.
    #[inline]
    pub fn after(&self, other: &Range) -> bool {
        other.before(self)
    }

    /// Returns `true` if `self` starts before `other` does.
    #[inline]
    pub fn starts_earlier_than(&self, other: &Range) -> bool {
        self.compare_starts(other) == Some(Ordering::Less)
    }

    /// Returns `true` if `self` starts after `other` does.
    #[inline]
    pub fn starts_later_than(&self, other: &Range) -> bool {
        self.compare_starts(other) == Some(Ordering::Greater)
    }

    /// Returns `true` if `self` ends before `other` does.
    #[inline]
    pub fn ends_earlier_than(&self, other: &Range) -> bool {
        self.compare_ends(other) == Some(Ordering::Less)
    }

    /// Returns `true` if `self` ends after `other` does.
    #[inline]
    pub fn ends_later_than(&self, other: &Range) -> bool {
        self.compare_ends(other) == Some(Ordering::Greater)
    }

    fn compare_starts(&self, other: &Range) -> Option<Ordering> {
        (!self.is_empty() && !other.is_empty()).then(|| self.start.cmp_as_start(&other.start))
    }

    fn compare_ends(&self, other: &Range) -> Option<Ordering> {
        (!self.is_empty() && !other.is_empty()).then(|| self.end.cmp_as_end(&other.end))
    }

    /// Returns `true` if the start of `self` lies inside `other`.
    pub fn starts_inside(&self, other: &Range) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.start.cmp_as_start(&self.start) != Ordering::Greater
            && !is_empty_span(&self.start, &other.end)
    }

    /// Returns `true` if the end of `self` lies inside `other`.
    pub fn ends_inside(&self, other: &Range) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.end.cmp_as_end(&self.end) != Ordering::Less
            && !is_empty_span(&other.start, &self.end)
    }

    /// Splits the range so that `instant` starts the second part.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if `instant` is not in the range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::range::Range;
    /// # use mediatime_core::time::Instant;
    /// let t = |s: &str| s.parse::<Instant>().unwrap();
    /// let (a, b) = Range::closed(t("0:0"), t("10:0")).split_at(t("4:0")).unwrap();
    /// assert_eq!(a, Range::closed_open(t("0:0"), t("4:0")));
    /// assert_eq!(b, Range::closed(t("4:0"), t("10:0")));
    /// ```
    pub fn split_at(&self, instant: Instant) -> Result<(Range, Range)> {
        self.check_split_point(instant)?;
        Ok((
            Self::new(self.start, Bound::Excluded(instant)),
            Self::new(Bound::Included(instant), self.end),
        ))
    }

    /// Splits the range so that `instant` ends the first part.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if `instant` is not in the range.
    pub fn split_after(&self, instant: Instant) -> Result<(Range, Range)> {
        self.check_split_point(instant)?;
        Ok((
            Self::new(self.start, Bound::Included(instant)),
            Self::new(Bound::Excluded(instant), self.end),
        ))
    }

    fn check_split_point(&self, instant: Instant) -> Result<()> {
        if self.contains(instant) {
            Ok(())
        } else {
            Err(TimeError::invalid_range(format!(
                "cannot split {self} at {instant}"
            )))
        }
    }

    /// Returns the gap between two disjoint ranges, or [`Range::NEVER`] if
    /// they overlap or touch.
    pub fn range_between(&self, other: &Range) -> Range {
        if self.before(other) {
            Self::new(self.end.flip(), other.start.flip())
        } else if other.before(self) {
            Self::new(other.end.flip(), self.start.flip())
        } else {
            Self::NEVER
        }
    }

    /// Returns the part of `self` lying after the end of `other`.
    pub fn excluding_up_to_end_of(&self, other: &Range) -> Range {
        if other.is_empty() {
            return *self;
        }
        match other.end {
            Bound::Unbounded => Self::NEVER,
            end => self.intersection(&Self::new(end.flip(), Bound::Unbounded)),
        }
    }

    /// Returns the part of `self` lying before the start of `other`.
    pub fn excluding_before_start_of(&self, other: &Range) -> Range {
        if other.is_empty() {
            return *self;
        }
        match other.start {
            Bound::Unbounded => Self::NEVER,
            start => self.intersection(&Self::new(Bound::Unbounded, start.flip())),
        }
    }

    /// Returns the instants of `self` that are not in `other`, as zero, one
    /// or two ranges in chronological order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::range::Range;
    /// # use mediatime_core::time::Instant;
    /// let t = |s: &str| s.parse::<Instant>().unwrap();
    /// let pieces = Range::closed(t("0:0"), t("10:0")).difference(&Range::open(t("3:0"), t("4:0")));
    /// assert_eq!(pieces.as_slice(), &[Range::closed(t("0:0"), t("3:0")), Range::closed(t("4:0"), t("10:0"))]);
    /// ```
    pub fn difference(&self, other: &Range) -> SmallVec<[Range; 2]> {
        let mut pieces = SmallVec::new();
        if self.is_empty() {
            return pieces;
        }
        if !self.overlaps(other) {
            pieces.push(*self);
            return pieces;
        }
        if !other.start.is_unbounded() {
            let left = Self::new(self.start, other.start.flip());
            if !left.is_empty() {
                pieces.push(left);
            }
        }
        if !other.end.is_unbounded() {
            let right = Self::new(other.end.flip(), self.end);
            if !right.is_empty() {
                pieces.push(right);
            }
        }
        pieces
    }

    /// Merges `self` into a chronologically ordered sequence of ranges that
    /// neither overlap nor touch, returning a sequence with the same property
    /// that covers the inputs and `self`.
    pub fn merge_into_ordered_ranges<I>(&self, ranges: I) -> Vec<Range>
    where
        I: IntoIterator<Item = Range>,
    {
        let mut merged = Vec::new();
        let mut pending = *self;
        for existing in ranges.into_iter().filter(|r| !r.is_empty()) {
            if pending.is_empty() || (existing.before(&pending) && !existing.is_contiguous_with(&pending)) {
                merged.push(existing);
            } else if existing.is_contiguous_with(&pending) {
                pending = pending.extend_to_encompass(&existing);
            } else {
                merged.push(pending);
                pending = existing;
            }
        }
        if !pending.is_empty() {
            merged.push(pending);
        }
        merged
    }

    /// Given chronologically ordered disjoint ranges, returns the ordered,
    /// non-empty parts of `self` not covered by any of them.
    pub fn complement_of_ordered_subranges<I>(&self, ranges: I) -> Vec<Range>
    where
        I: IntoIterator<Item = Range>,
    {
        let mut gaps = Vec::new();
        let mut remaining = *self;
        for existing in ranges.into_iter().filter(|r| !r.is_empty()) {
            let before = remaining.excluding_before_start_of(&existing);
            if !before.is_empty() {
                gaps.push(before);
            }
            remaining = remaining.excluding_up_to_end_of(&existing);
        }
        if !remaining.is_empty() {
            gaps.push(remaining);
        }
        gaps
    }

    /// Snaps the range onto the grid of `rate`, returning a range that includes
    /// its start and excludes its end.
    ///
    /// An exclusive start moves one tick later, and an inclusive end moves one
    /// tick later before being excluded, so the result covers the same grid
    /// points as the rounded original.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a tick count does not fit in an `i64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::RationalRate;
    /// # use mediatime_core::range::{Range, RangeRounding};
    /// # use mediatime_core::time::Instant;
    /// let t = |s: &str| s.parse::<Instant>().unwrap();
    /// let rate = RationalRate::new(25, 1).unwrap();
    /// let r = Range::closed(t("0:010000000"), t("0:130000000"));
    /// assert_eq!(r.quantize(rate, RangeRounding::Out).unwrap(), Range::closed_open(t("0:0"), t("0:200000000")));
    /// assert_eq!(r.quantize(rate, RangeRounding::In).unwrap(), Range::closed_open(t("0:040000000"), t("0:160000000")));
    /// ```
    pub fn quantize(&self, rate: RationalRate, rounding: RangeRounding) -> Result<Range> {
        if self.is_empty() || self.is_universal() {
            return Ok(*self);
        }

        let (start_rounding, end_rounding) = match rounding {
            RangeRounding::Nearest | RangeRounding::Start | RangeRounding::End => {
                (Rounding::Nearest, Rounding::Nearest)
            }
            RangeRounding::Down => (Rounding::Down, Rounding::Down),
            RangeRounding::Up => (Rounding::Up, Rounding::Up),
            RangeRounding::In => (Rounding::Up, Rounding::Down),
            RangeRounding::Out => (Rounding::Down, Rounding::Up),
        };

        let start = self.start_instant();
        let end = self.end_instant();
        let mut start_count = start.map(|s| s.to_count(rate, start_rounding)).transpose()?;
        let mut end_count = end.map(|e| e.to_count(rate, end_rounding)).transpose()?;

        if let (Some(s), Some(e)) = (start, end) {
            match rounding {
                RangeRounding::Start => end_count = Some(e.to_count(rate, follow_direction(s, rate)?)?),
                RangeRounding::End => start_count = Some(s.to_count(rate, follow_direction(e, rate)?)?),
                _ => {}
            }
        }

        if !self.includes_start() {
            start_count = start_count.map(|c| c.checked_add(1).ok_or(TimeError::Overflow)).transpose()?;
        }
        if self.includes_end() {
            end_count = end_count.map(|c| c.checked_add(1).ok_or(TimeError::Overflow)).transpose()?;
        }

        let start = match start_count {
            Some(c) => Bound::Included(Instant::from_count(c, rate)?),
            None => Bound::Unbounded,
        };
        let end = match end_count {
            Some(c) => Bound::Excluded(Instant::from_count(c, rate)?),
            None => Bound::Unbounded,
        };
        Ok(Self::new(start, end))
    }

    /// Returns the instants of the range lying on the grid of `rate`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::UnboundedRange`] if either end is unbounded. The
    /// empty range yields an empty iterator.
    #[inline]
    pub fn at_rate(&self, rate: RationalRate) -> Result<RateIter> {
        self.at_rate_with_phase(rate, Duration::ZERO)
    }

    /// Like [`Range::at_rate`] on a grid shifted later by `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] unless `0 <= phase < 1 / rate`,
    /// and [`TimeError::UnboundedRange`] if either end is unbounded.
    #[inline]
    pub fn at_rate_with_phase(&self, rate: RationalRate, phase: Duration) -> Result<RateIter> {
        RateIter::new(&self.start, &self.end, self.is_empty(), rate, phase)
    }

    /// Like [`Range::at_rate`] but latest first.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::UnboundedRange`] if either end is unbounded.
    #[inline]
    pub fn reversed_at_rate(&self, rate: RationalRate) -> Result<Rev<RateIter>> {
        self.at_rate(rate).map(Iterator::rev)
    }
}

/// Returns the direction the other end of a range follows once `instant` is
/// rounded to the nearest tick: up if the nearest tick is also the one at or
/// after `instant`, which includes an `instant` already on the grid.
fn follow_direction(instant: Instant, rate: RationalRate) -> Result<Rounding> {
    let nearest = instant.to_count(rate, Rounding::Nearest)?;
    let up = instant.to_count(rate, Rounding::Up)?;
    Ok(if nearest == up { Rounding::Up } else { Rounding::Down })
}

impl Default for Range {
    fn default() -> Self {
        Self::NEVER
    }
}

impl PartialOrd for Range {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Range {
    /// The empty range sorts first; other ranges sort by start, then by end.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .start
                .cmp_as_start(&other.start)
                .then_with(|| self.end.cmp_as_end(&other.end)),
        }
    }
}

impl RangeBounds<Instant> for Range {
    fn start_bound(&self) -> std::ops::Bound<&Instant> {
        self.start.as_ref().into()
    }

    fn end_bound(&self) -> std::ops::Bound<&Instant> {
        self.end.as_ref().into()
    }
}

impl BitAnd for Range {
    type Output = Range;

    #[inline]
    fn bitand(self, rhs: Range) -> Range {
        self.intersection(&rhs)
    }
}

impl BitOr for Range {
    type Output = Range;

    /// The convex hull, see [`Range::union`].
    #[inline]
    fn bitor(self, rhs: Range) -> Range {
        self.union(&rhs)
    }
}

impl From<std::ops::Range<Instant>> for Range {
    #[inline]
    fn from(r: std::ops::Range<Instant>) -> Self {
        Self::closed_open(r.start, r.end)
    }
}

impl From<std::ops::RangeInclusive<Instant>> for Range {
    #[inline]
    fn from(r: std::ops::RangeInclusive<Instant>) -> Self {
        let (start, end) = r.into_inner();
        Self::closed(start, end)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("()");
        }
        write_range_text(f, &self.start, &self.end, |f, t| fmt::Display::fmt(t, f))
    }
}

impl FromStr for Range {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self> {
        match parse_range_text(s, str::parse::<Instant>)? {
            RangeText::Empty => Ok(Self::NEVER),
            RangeText::Bounds(start, end) => Ok(Self::new(start, end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Instant {
        s.parse().unwrap()
    }

    fn r(s: &str) -> Range {
        s.parse().unwrap()
    }

    #[test]
    fn test_reversed_bounds_collapse_to_never() {
        assert_eq!(Range::closed(t("10:0"), t("5:0")), Range::NEVER);
        assert!(Range::closed(t("10:0"), t("5:0")).is_empty());
        assert_eq!(Range::closed_open(t("5:0"), t("5:0")), Range::NEVER);
        assert_eq!(Range::open(t("5:0"), t("5:0")), Range::NEVER);
        assert!(!Range::single(t("5:0")).is_empty());
        assert!(Range::single(t("5:0")).is_single());
    }

    #[test]
    fn test_eternity_ignores_inclusivity() {
        assert_eq!(Range::with_inclusivity(None, None, Inclusivity::Exclusive), Range::ETERNITY);
        assert_eq!(Range::with_inclusivity(None, None, Inclusivity::Inclusive), Range::ETERNITY);
        assert!(Range::ETERNITY.is_universal());
        assert!(Range::ETERNITY.contains(Instant::MIN));
        assert!(!Range::NEVER.contains(Instant::EPOCH));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for range in [Range::NEVER, Range::ETERNITY, r("[0:0_1:0)"), r("(_1:0]")] {
            assert_eq!(range.normalize(), range);
            assert_eq!(range.normalize().normalize(), range.normalize());
        }
    }

    #[test]
    fn test_contains_respects_inclusivity() {
        let range = Range::closed_open(t("0:0"), t("10:0"));
        assert!(range.contains(t("0:0")));
        assert!(range.contains(t("9:999999999")));
        assert!(!range.contains(t("10:0")));
        assert!(!range.contains(t("-0:1")));
        assert!(Range::from_start(t("0:0")).contains(Instant::MAX));
        assert!(Range::from_end(t("0:0")).contains(t("0:0")));
    }

    #[test]
    fn test_contains_range() {
        let outer = r("[0:0_10:0)");
        assert!(outer.contains_range(&r("[0:0_10:0)")));
        assert!(outer.contains_range(&r("(0:0_10:0)")));
        assert!(!outer.contains_range(&r("[0:0_10:0]")));
        assert!(outer.contains_range(&Range::NEVER));
        assert!(!Range::NEVER.contains_range(&outer));
        assert!(Range::ETERNITY.contains_range(&outer));
    }

    #[test]
    fn test_intersection_exclusive_wins() {
        let a = r("[0:0_10:0]");
        let b = r("(0:0_10:0)");
        assert_eq!(a.intersection(&b), b);
        assert_eq!(r("[0:0_5:0]").intersection(&r("[5:0_10:0]")), Range::single(t("5:0")));
        assert_eq!(r("[0:0_5:0)").intersection(&r("[5:0_10:0]")), Range::NEVER);
        assert_eq!(r("_5:0)").intersection(&r("[1:0_")), r("[1:0_5:0)"));
        assert_eq!(a.intersection(&Range::NEVER), Range::NEVER);
        assert_eq!(a.intersection(&Range::ETERNITY), a);
    }

    #[test]
    fn test_union_inclusive_wins_and_is_hull() {
        let a = r("[0:0_10:0)");
        let b = r("(0:0_10:0]");
        assert_eq!(a.union(&b), r("[0:0_10:0]"));
        assert_eq!(r("[0:0_1:0]").union(&r("[5:0_6:0]")), r("[0:0_6:0]"));
        assert_eq!(Range::NEVER.union(&a), a);
        assert_eq!(a.union(&Range::ETERNITY), Range::ETERNITY);
        assert_eq!(a.extend_to_encompass(&b), a | b);
    }

    #[test]
    fn test_checked_union() {
        assert_eq!(
            r("[0:0_5:0)").checked_union(&r("[5:0_10:0)")).unwrap(),
            r("[0:0_10:0)")
        );
        assert!(matches!(
            r("[0:0_5:0)").checked_union(&r("(5:0_10:0)")),
            Err(TimeError::InvalidRangeOperation(_))
        ));
        assert_eq!(Range::NEVER.checked_union(&r("[1:0_2:0]")).unwrap(), r("[1:0_2:0]"));
    }

    #[test]
    fn test_relations() {
        let a = r("[0:0_5:0)");
        let b = r("[5:0_10:0)");
        let c = r("[4:0_6:0)");
        assert!(a.meets(&b));
        assert!(!b.meets(&a));
        assert!(a.before(&b));
        assert!(b.after(&a));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(a.is_contiguous_with(&b));
        assert!(b.is_contiguous_with(&a));
        assert!(!a.is_contiguous_with(&r("(5:0_10:0)")));
        assert!(!r("[0:0_5:0]").before(&r("[5:0_6:0]")));
        assert!(!Range::NEVER.before(&a));
    }

    #[test]
    fn test_start_and_end_comparisons() {
        let a = r("[0:0_5:0)");
        let b = r("(0:0_5:0]");
        assert!(a.starts_earlier_than(&b));
        assert!(b.starts_later_than(&a));
        assert!(a.ends_earlier_than(&b));
        assert!(b.ends_later_than(&a));
        assert!(Range::from_end(t("0:0")).starts_earlier_than(&a));
        assert!(!Range::NEVER.starts_earlier_than(&a));
    }

    #[test]
    fn test_starts_and_ends_inside() {
        let outer = r("[0:0_10:0)");
        assert!(r("[5:0_15:0)").starts_inside(&outer));
        assert!(!r("[10:0_15:0)").starts_inside(&outer));
        assert!(r("[0:0_1:0)").starts_inside(&outer));
        assert!(!r("_1:0)").starts_inside(&outer));
        assert!(r("_1:0)").starts_inside(&Range::from_end(t("2:0"))));
        assert!(r("[-5:0_10:0)").ends_inside(&outer));
        assert!(!r("[-5:0_10:0]").ends_inside(&outer));
        assert!(!r("[-5:0_0:0)").ends_inside(&outer));
        assert!(r("[-5:0_0:0]").ends_inside(&outer));
    }

    #[test]
    fn test_split() {
        let range = r("[0:0_10:0)");
        let (a, b) = range.split_after(t("4:0")).unwrap();
        assert_eq!((a, b), (r("[0:0_4:0]"), r("(4:0_10:0)")));
        let (a, b) = range.split_at(t("0:0")).unwrap();
        assert_eq!((a, b), (Range::NEVER, range));
        assert!(matches!(
            range.split_at(t("10:0")),
            Err(TimeError::InvalidRangeOperation(_))
        ));
    }

    #[test]
    fn test_range_between() {
        assert_eq!(r("[0:0_1:0]").range_between(&r("[3:0_4:0)")), r("(1:0_3:0)"));
        assert_eq!(r("[3:0_4:0)").range_between(&r("[0:0_1:0)")), r("[1:0_3:0)"));
        assert_eq!(r("[0:0_1:0)").range_between(&r("[1:0_4:0)")), Range::NEVER);
        assert_eq!(r("[0:0_2:0)").range_between(&r("[1:0_4:0)")), Range::NEVER);
        assert_eq!(r("[0:0_1:0)").range_between(&r("(1:0_4:0)")), Range::single(t("1:0")));
    }

    #[test]
    fn test_excluding() {
        let range = r("[0:0_10:0)");
        assert_eq!(range.excluding_up_to_end_of(&r("[2:0_4:0]")), r("(4:0_10:0)"));
        assert_eq!(range.excluding_up_to_end_of(&r("[-2:0_-1:0]")), range);
        assert_eq!(range.excluding_up_to_end_of(&r("[2:0_")), Range::NEVER);
        assert_eq!(range.excluding_before_start_of(&r("[2:0_4:0]")), r("[0:0_2:0)"));
        assert_eq!(range.excluding_before_start_of(&r("(2:0_4:0]")), r("[0:0_2:0]"));
        assert_eq!(range.excluding_before_start_of(&r("[20:0_30:0]")), range);
        assert_eq!(range.excluding_before_start_of(&Range::NEVER), range);
    }

    #[test]
    fn test_difference() {
        let range = r("[0:0_10:0)");
        assert_eq!(range.difference(&r("[2:0_4:0)")).as_slice(), &[r("[0:0_2:0)"), r("[4:0_10:0)")]);
        assert_eq!(range.difference(&r("[5:0_")).as_slice(), &[r("[0:0_5:0)")]);
        assert_eq!(range.difference(&r("[20:0_30:0)")).as_slice(), &[range]);
        assert!(range.difference(&Range::ETERNITY).is_empty());
        assert!(Range::NEVER.difference(&range).is_empty());
    }

    #[test]
    fn test_merge_into_ordered_ranges() {
        let existing = vec![r("[0:0_1:0)"), r("[2:0_3:0)"), r("[5:0_6:0)")];
        assert_eq!(
            r("[1:0_2:0)").merge_into_ordered_ranges(existing.clone()),
            vec![r("[0:0_3:0)"), r("[5:0_6:0)")]
        );
        assert_eq!(
            r("[3:500000000_4:0)").merge_into_ordered_ranges(existing.clone()),
            vec![r("[0:0_1:0)"), r("[2:0_3:0)"), r("[3:500000000_4:0)"), r("[5:0_6:0)")]
        );
        assert_eq!(
            r("[10:0_11:0)").merge_into_ordered_ranges(existing.clone()),
            vec![r("[0:0_1:0)"), r("[2:0_3:0)"), r("[5:0_6:0)"), r("[10:0_11:0)")]
        );
        assert_eq!(Range::NEVER.merge_into_ordered_ranges(existing.clone()), existing);
    }

    #[test]
    fn test_complement_of_ordered_subranges() {
        let range = r("[0:0_10:0)");
        let holes = vec![r("[1:0_2:0)"), r("(4:0_5:0]")];
        assert_eq!(
            range.complement_of_ordered_subranges(holes),
            vec![r("[0:0_1:0)"), r("[2:0_4:0]"), r("(5:0_10:0)")]
        );
        assert!(range.complement_of_ordered_subranges(vec![range]).is_empty());
        assert_eq!(range.complement_of_ordered_subranges(Vec::new()), vec![range]);
    }

    #[test]
    fn test_quantize_modes() {
        let rate = RationalRate::new(25, 1).unwrap();
        let range = r("[0:010000000_0:130000000]");
        assert_eq!(range.quantize(rate, RangeRounding::Nearest).unwrap(), r("[0:0_0:160000000)"));
        assert_eq!(range.quantize(rate, RangeRounding::Down).unwrap(), r("[0:0_0:160000000)"));
        assert_eq!(range.quantize(rate, RangeRounding::Up).unwrap(), r("[0:040000000_0:200000000)"));
        assert_eq!(
            r("(0:010000000_0:130000000)").quantize(rate, RangeRounding::Out).unwrap(),
            r("[0:040000000_0:160000000)")
        );
        assert_eq!(r("[0:0_").quantize(rate, RangeRounding::Nearest).unwrap(), r("[0:0_"));
        assert_eq!(Range::NEVER.quantize(rate, RangeRounding::Nearest).unwrap(), Range::NEVER);
    }

    #[test]
    fn test_quantize_start_and_end_follow() {
        let rate = RationalRate::new(25, 1).unwrap();
        // Start 0.03 rounds up to 0.04, so the end 0.13 follows upward to 0.16.
        let range = r("[0:030000000_0:130000000)");
        assert_eq!(range.quantize(rate, RangeRounding::Start).unwrap(), r("[0:040000000_0:160000000)"));
        // End 0.13 rounds down to 0.12, so the start 0.03 follows downward to 0.0.
        assert_eq!(range.quantize(rate, RangeRounding::End).unwrap(), r("[0:0_0:120000000)"));

        let range = r("[0:010000000_0:999999999)");
        assert_eq!(range.quantize(rate, RangeRounding::Start).unwrap(), r("[0:0_0:960000000)"));
        assert_eq!(range.quantize(rate, RangeRounding::End).unwrap(), r("[0:040000000_1:0)"));
        let range = r("[0:039999999_1:010000000)");
        assert_eq!(range.quantize(rate, RangeRounding::Start).unwrap(), r("[0:040000000_1:040000000)"));
        assert_eq!(range.quantize(rate, RangeRounding::End).unwrap(), r("[0:0_1:0)"));
    }

    #[test]
    fn test_quantize_on_grid_anchor_pulls_the_other_end_up() {
        let rate = RationalRate::new(25, 1).unwrap();
        // The start is a tick, so the end 0.01 rounds up to tick 1 and the
        // inclusive end then excludes tick 2.
        assert_eq!(
            r("[0:0_0:010000000]").quantize(rate, RangeRounding::Start).unwrap(),
            r("[0:0_0:080000000)")
        );
        assert_eq!(
            r("[0:010000000_0:120000000)").quantize(rate, RangeRounding::End).unwrap(),
            r("[0:040000000_0:120000000)")
        );
        assert_eq!(
            r("(0:040000000_0:090000000)").quantize(rate, RangeRounding::Start).unwrap(),
            r("[0:080000000_0:120000000)")
        );
    }

    #[test]
    fn test_length() {
        assert_eq!(r("[1:0_3:500000000)").length(), Some(t("2:500000000").epoch_offset()));
        assert_eq!(Range::NEVER.length(), Some(Duration::ZERO));
        assert_eq!(r("[1:0_").length(), None);
        assert_eq!(r("[1:0_").checked_length(), Err(TimeError::UnboundedRange));
    }

    #[test]
    fn test_length_too_long_for_a_duration() {
        let whole = Range::closed(Instant::MIN, Instant::MAX);
        assert!(whole.is_finite());
        assert_eq!(whole.length(), None);
        assert_eq!(whole.checked_length(), Err(TimeError::Overflow));
        let half = Range::closed(Instant::EPOCH, Instant::MAX);
        assert_eq!(half.length(), Some(Duration::MAX));
    }

    #[test]
    fn test_from_start_length() {
        let range = Range::from_start_length(t("1:0"), Duration::from_secs(2), Inclusivity::IncludeStart).unwrap();
        assert_eq!(range, r("[1:0_3:0)"));
        assert!(matches!(
            Range::from_start_length(t("1:0"), Duration::from_secs(-2), Inclusivity::Inclusive),
            Err(TimeError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_ordering() {
        let mut ranges = vec![r("[1:0_2:0)"), Range::ETERNITY, r("(0:0_1:0)"), Range::NEVER, r("[0:0_1:0)"), r("[0:0_")];
        ranges.sort();
        assert_eq!(
            ranges,
            vec![Range::NEVER, Range::ETERNITY, r("[0:0_1:0)"), r("[0:0_"), r("(0:0_1:0)"), r("[1:0_2:0)")]
        );
    }

    #[test]
    fn test_display_and_parse() {
        for text in ["[0:000000000_10:000000000)", "(1:000000000_2:000000000]", "_5:000000000)", "[-1:000000000_", "_", "()", "[3:000000000]"] {
            assert_eq!(r(text).to_string(), text);
        }
        assert_eq!(r("0:0_1:0"), Range::closed(t("0:0"), t("1:0")));
        assert_eq!(r("1.5"), Range::single(t("1:500000000")));
        assert_eq!(r("(1:0_1:0)"), Range::NEVER);
        assert!("[a_b)".parse::<Range>().is_err());
    }

    #[test]
    fn test_std_range_interop() {
        use std::ops::RangeBounds;
        let range = Range::from(t("0:0")..t("1:0"));
        assert_eq!(range, r("[0:0_1:0)"));
        assert_eq!(Range::from(t("0:0")..=t("1:0")), r("[0:0_1:0]"));
        assert!(RangeBounds::contains(&range, &t("0:500000000")));
        assert_eq!(range.end_bound(), std::ops::Bound::Excluded(&t("1:0")));
    }
}
