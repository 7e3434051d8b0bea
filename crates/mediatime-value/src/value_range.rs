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

//! Ranges whose ends are [`TimeValue`]s, optionally tied to a rate.

use crate::value::TimeValue;
use mediatime_core::convert::AsRange;
use mediatime_core::num::{RationalRate, Rounding};
use mediatime_core::range::bound::{abuts, hull_spans, intersect_spans, is_empty_span, precedes};
use mediatime_core::range::text::{RangeText, parse_range_text, write_range_text};
use mediatime_core::range::{Bound, Inclusivity, Range};
use mediatime_core::time::{Duration, Instant};
use mediatime_core::{Result, TimeError};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::str::FromStr;
use tracing::debug;

/// An interval of [`TimeValue`]s.
///
/// Without a rate the ends are instants and the range behaves like a
/// [`Range`]. With a rate every bounded end is a tick count at that rate, the
/// start is inclusive and the end is exclusive: the range covers the time
/// from its first tick up to its end tick. The constructors round bounds given
/// in another form to the nearest tick, then move an exclusive start or an
/// inclusive end one tick later.
///
/// Operations combining ranges work on exact values. Their result keeps the
/// rate when its bounds already sit on the grid as an inclusive start and an
/// exclusive end. Otherwise the result has no rate and holds instants
/// admitting the same whole nanoseconds, so no value common to the operands
/// is lost.
///
/// As with [`Range`], a range that admits nothing is always the canonical
/// empty range and a range unbounded at both ends is always the canonical
/// universal range. Equality and hashing ignore the rate and compare the
/// bounds by exact value.
///
/// # Examples
///
/// ```rust
/// # use mediatime_core::num::RationalRate;
/// # use mediatime_value::{TimeValue, TimeValueRange};
/// let frames: TimeValueRange = "[0_10]@25".parse().unwrap();
/// assert_eq!(frames.to_string(), "[0_11)@25");
/// assert_eq!(frames.length_as_count().unwrap(), 11);
/// assert_eq!(frames.as_range().unwrap().to_string(), "[0:000000000_0:440000000)");
/// assert!(frames.contains(&TimeValue::from_count(10, RationalRate::new(25, 1).unwrap())));
///
/// let clip: TimeValueRange = "[0:100000000_1:0)".parse().unwrap();
/// let both = frames.intersection(&clip).unwrap();
/// assert_eq!(both.to_string(), "[0:100000000_0:440000000)");
/// assert_eq!(both.rate(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeValueRange {
    start: Bound<TimeValue>,
    end: Bound<TimeValue>,
    rate: Option<RationalRate>,
}

impl TimeValueRange {
    /// The canonical empty range without a rate.
    pub const NEVER: TimeValueRange = TimeValueRange {
        start: Bound::Excluded(TimeValue::EPOCH),
        end: Bound::Excluded(TimeValue::EPOCH),
        rate: None,
    };

    /// The canonical universal range without a rate.
    pub const ETERNITY: TimeValueRange = TimeValueRange {
        start: Bound::Unbounded,
        end: Bound::Unbounded,
        rate: None,
    };

    /// Creates a normalized range from two bounds.
    ///
    /// Without an explicit `rate`, the rate of a count-backed bound is adopted,
    /// the start's first. With a rate, each bound is rounded to its nearest
    /// tick; an exclusive start then moves one tick later to become inclusive,
    /// and an inclusive end moves one tick later to become exclusive.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound cannot be expressed as a
    /// count at the rate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::RationalRate;
    /// # use mediatime_core::range::Bound;
    /// # use mediatime_value::{TimeValue, TimeValueRange};
    /// let t = |s: &str| s.parse::<TimeValue>().unwrap();
    /// let rate = RationalRate::new(25, 1).unwrap();
    /// let range = TimeValueRange::new(
    ///     Bound::Included(t("0:010000000")),
    ///     Bound::Included(t("0:130000000")),
    ///     Some(rate),
    /// )
    /// .unwrap();
    /// assert_eq!(range.to_string(), "[0_4)@25");
    /// ```
    pub fn new(
        start: Bound<TimeValue>,
        end: Bound<TimeValue>,
        rate: Option<RationalRate>,
    ) -> Result<Self> {
        let rate = rate
            .or_else(|| start.value().and_then(TimeValue::rate))
            .or_else(|| end.value().and_then(TimeValue::rate));

        let (start, end) = match rate {
            Some(rate) => (snap_start(start, rate)?, snap_end(end, rate)?),
            None => (start, end),
        };
        Ok(Self::normalized(start, end, rate))
    }

    /// Creates a range from optional ends, `None` meaning unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound cannot be expressed as a
    /// count at the rate.
    pub fn with_inclusivity(
        start: Option<TimeValue>,
        end: Option<TimeValue>,
        inclusivity: Inclusivity,
        rate: Option<RationalRate>,
    ) -> Result<Self> {
        let (start, end) = inclusivity.bounds(start, end);
        Self::new(start, end, rate)
    }

    /// Every value from `start` on, `start` included.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the start cannot be expressed as a
    /// count at the rate.
    #[inline]
    pub fn from_start(start: TimeValue, rate: Option<RationalRate>) -> Result<Self> {
        Self::new(Bound::Included(start), Bound::Unbounded, rate)
    }

    /// Every value up to `end`, `end` included.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the end cannot be expressed as a
    /// count at the rate.
    #[inline]
    pub fn from_end(end: TimeValue, rate: Option<RationalRate>) -> Result<Self> {
        Self::new(Bound::Unbounded, Bound::Included(end), rate)
    }

    /// Creates the range starting at `start` and lasting `length`, where
    /// `length` is read as a span from the epoch as in [`TimeValue::checked_add`].
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::MalformedInput`] for a negative length and
    /// [`TimeError::Overflow`] if the end is not representable.
    pub fn from_start_length(
        start: TimeValue,
        length: TimeValue,
        inclusivity: Inclusivity,
        rate: Option<RationalRate>,
    ) -> Result<Self> {
        if length < TimeValue::EPOCH {
            return Err(TimeError::MalformedInput {
                input: length.to_string(),
                reason: "range length cannot be negative",
            });
        }
        let end = start.checked_add(&length)?;
        Self::with_inclusivity(Some(start), Some(end), inclusivity, rate)
    }

    /// The range containing only `value`, or only its tick when a rate applies.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the value cannot be expressed as a
    /// count at the rate.
    pub fn single(value: TimeValue, rate: Option<RationalRate>) -> Result<Self> {
        Self::new(Bound::Included(value), Bound::Included(value), rate)
    }

    /// Converts a [`Range`] of instants, rounding it onto `rate` if given as
    /// [`TimeValueRange::new`] does.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound cannot be expressed as a
    /// count at the rate.
    pub fn from_range(range: &Range, rate: Option<RationalRate>) -> Result<Self> {
        if range.is_empty() {
            return Ok(Self::never(rate));
        }
        Self::new(
            range.start().map(TimeValue::Instant),
            range.end().map(TimeValue::Instant),
            rate,
        )
    }

    /// Converts anything that can be viewed as a [`Range`].
    ///
    /// # Errors
    ///
    /// Propagates the conversion's error, or [`TimeError::Overflow`] as for
    /// [`TimeValueRange::from_range`].
    pub fn of<T: AsRange + ?Sized>(value: &T, rate: Option<RationalRate>) -> Result<Self> {
        Self::from_range(&value.as_range()?, rate)
    }

    /// The canonical empty range, carrying `rate`.
    pub fn never(rate: Option<RationalRate>) -> Self {
        let origin = match rate {
            Some(rate) => TimeValue::from_count(0, rate),
            None => TimeValue::EPOCH,
        };
        Self {
            start: Bound::Excluded(origin),
            end: Bound::Excluded(origin),
            rate,
        }
    }

    /// The canonical universal range, carrying `rate`.
    pub fn eternity(rate: Option<RationalRate>) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
            rate,
        }
    }

    fn normalized(start: Bound<TimeValue>, end: Bound<TimeValue>, rate: Option<RationalRate>) -> Self {
        if start.is_unbounded() && end.is_unbounded() {
            Self::eternity(rate)
        } else if is_empty_span(&start, &end) {
            Self::never(rate)
        } else {
            Self { start, end, rate }
        }
    }

    /// Builds the range admitting exactly the values between `start` and `end`.
    ///
    /// The result keeps `rate` only if no bound has to move for it.
    fn exact(
        start: Bound<TimeValue>,
        end: Bound<TimeValue>,
        rate: Option<RationalRate>,
    ) -> Result<Self> {
        if is_empty_span(&start, &end) {
            return Ok(Self::never(rate));
        }
        if let Some(rate) = rate {
            if let (Some(start), Some(end)) = (grid_start(start, rate), grid_end(end, rate)) {
                return Ok(Self::normalized(start, end, Some(rate)));
            }
            debug!(%rate, "bounds fall between ticks, dropping the rate");
        }
        Ok(Self::normalized(
            start_instant(start)?.map(TimeValue::Instant),
            end_instant(end)?.map(TimeValue::Instant),
            None,
        ))
    }

    /// Returns the same span re-expressed at `rate`, rounding as
    /// [`TimeValueRange::new`] does.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound cannot be expressed as a
    /// count at the rate.
    pub fn with_rate(&self, rate: RationalRate) -> Result<Self> {
        if self.is_empty() {
            return Ok(Self::never(Some(rate)));
        }
        Self::new(self.start, self.end, Some(rate))
    }

    /// Returns the start bound.
    #[inline]
    pub fn start(&self) -> Bound<TimeValue> {
        self.start
    }

    /// Returns the end bound.
    #[inline]
    pub fn end(&self) -> Bound<TimeValue> {
        self.end
    }

    /// Returns the rate, if the range is tied to one.
    #[inline]
    pub fn rate(&self) -> Option<RationalRate> {
        self.rate
    }

    /// Returns `true` if the start value belongs to the range.
    #[inline]
    pub fn includes_start(&self) -> bool {
        self.start.is_inclusive()
    }

    /// Returns `true` if the end value belongs to the range.
    #[inline]
    pub fn includes_end(&self) -> bool {
        self.end.is_inclusive()
    }

    /// Returns `true` if the range has a start.
    #[inline]
    pub fn bounded_before(&self) -> bool {
        !self.start.is_unbounded()
    }

    /// Returns `true` if the range has an end.
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
        is_empty_span(&self.start, &self.end)
    }

    /// Returns `true` if this is the universal range.
    #[inline]
    pub fn is_universal(&self) -> bool {
        self.start.is_unbounded() && self.end.is_unbounded()
    }

    /// Projects the range onto the instant time line, admitting exactly the
    /// whole nanoseconds the range admits. A tick between two nanoseconds
    /// moves its bound to the later one.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    pub fn as_range(&self) -> Result<Range> {
        if self.is_empty() {
            return Ok(Range::NEVER);
        }
        Ok(Range::new(start_instant(self.start)?, end_instant(self.end)?))
    }

    /// Returns the bounds as tick counts at the range's rate.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if the range has no rate.
    pub fn as_count_bounds(&self) -> Result<(Bound<i64>, Bound<i64>)> {
        let rate = self.require_rate()?;
        Ok((
            self.start.try_map(|v| v.as_count(rate))?,
            self.end.try_map(|v| v.as_count(rate))?,
        ))
    }

    /// Returns the span of the range as a duration, each end truncated toward
    /// the epoch to whole nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::UnboundedRange`] if either end is unbounded.
    pub fn length_as_duration(&self) -> Result<Duration> {
        if self.is_empty() {
            return Ok(Duration::ZERO);
        }
        match (self.start.value(), self.end.value()) {
            (Some(start), Some(end)) => end.as_instant()?.checked_duration_since(start.as_instant()?),
            _ => Err(TimeError::UnboundedRange),
        }
    }

    /// Returns the number of ticks in the range.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if the range has no rate
    /// and [`TimeError::UnboundedRange`] if either end is unbounded.
    pub fn length_as_count(&self) -> Result<i64> {
        let rate = self.require_rate()?;
        if self.is_empty() {
            return Ok(0);
        }
        match (self.first_count(rate)?, self.last_count(rate)?) {
            (Some(first), Some(last)) => Ok(last.saturating_sub(first).saturating_add(1).max(0)),
            _ => Err(TimeError::UnboundedRange),
        }
    }

    /// Returns the values of the range at its rate, earliest first. A range
    /// without an end yields values forever.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if the range has no rate
    /// and [`TimeError::UnboundedRange`] if it has no start.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_value::TimeValueRange;
    /// let frames: TimeValueRange = "(2_5]@50".parse().unwrap();
    /// let counts: Vec<String> = frames.iter().unwrap().map(|v| v.to_string()).collect();
    /// assert_eq!(counts, ["3@50", "4@50", "5@50"]);
    ///
    /// let open: TimeValueRange = "[7_@50".parse().unwrap();
    /// assert_eq!(open.iter().unwrap().nth(100).unwrap().to_string(), "107@50");
    /// ```
    pub fn iter(&self) -> Result<TimeValueIter> {
        let rate = self.require_rate()?;
        if self.is_empty() {
            return Ok(TimeValueIter::empty(rate));
        }
        let first = self.first_count(rate)?.ok_or(TimeError::UnboundedRange)?;
        Ok(TimeValueIter::new(rate, first, self.last_count(rate)?, 1))
    }

    /// Returns the values of the range at its rate, latest first. A range
    /// without a start yields values forever.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if the range has no rate
    /// and [`TimeError::UnboundedRange`] if it has no end.
    pub fn iter_rev(&self) -> Result<TimeValueIter> {
        let rate = self.require_rate()?;
        if self.is_empty() {
            return Ok(TimeValueIter::empty(rate));
        }
        let first = self.last_count(rate)?.ok_or(TimeError::UnboundedRange)?;
        Ok(TimeValueIter::new(rate, first, self.first_count(rate)?, -1))
    }

    /// The first tick admitted by the start, if the range has one.
    fn first_count(&self, rate: RationalRate) -> Result<Option<i64>> {
        match self.start {
            Bound::Included(v) => v.as_count(rate).map(Some),
            Bound::Excluded(v) => v.as_count(rate)?.checked_add(1).ok_or(TimeError::Overflow).map(Some),
            Bound::Unbounded => Ok(None),
        }
    }

    /// The last tick admitted by the end, if the range has one.
    fn last_count(&self, rate: RationalRate) -> Result<Option<i64>> {
        match self.end {
            Bound::Included(v) => v.as_count(rate).map(Some),
            Bound::Excluded(v) => v.as_count(rate)?.checked_sub(1).ok_or(TimeError::Overflow).map(Some),
            Bound::Unbounded => Ok(None),
        }
    }

    fn require_rate(&self) -> Result<RationalRate> {
        self.rate.ok_or_else(|| {
            TimeError::InvalidRangeOperation(format!("range {self} has no rate"))
        })
    }

    /// Returns `true` if `value` lies in the range.
    ///
    /// Values compare exactly, so a range at a rate also holds the values
    /// between its ticks.
    #[inline]
    pub fn contains(&self, value: &TimeValue) -> bool {
        !self.is_empty() && self.start.admits_as_start(value) && self.end.admits_as_end(value)
    }

    /// Returns `true` if every value of `other` lies in `self`.
    pub fn contains_range(&self, other: &TimeValueRange) -> bool {
        if other.is_empty() {
            return true;
        }
        !self.is_empty()
            && self.start.cmp_as_start(&other.start) != Ordering::Greater
            && self.end.cmp_as_end(&other.end) != Ordering::Less
    }

    /// Returns `true` if `self` starts before `other` does.
    #[inline]
    pub fn starts_earlier_than(&self, other: &TimeValueRange) -> bool {
        self.compare_starts(other) == Some(Ordering::Less)
    }

    /// Returns `true` if `self` starts after `other` does.
    #[inline]
    pub fn starts_later_than(&self, other: &TimeValueRange) -> bool {
        self.compare_starts(other) == Some(Ordering::Greater)
    }

    /// Returns `true` if `self` ends before `other` does.
    #[inline]
    pub fn ends_earlier_than(&self, other: &TimeValueRange) -> bool {
        self.compare_ends(other) == Some(Ordering::Less)
    }

    /// Returns `true` if `self` ends after `other` does.
    #[inline]
    pub fn ends_later_than(&self, other: &TimeValueRange) -> bool {
        self.compare_ends(other) == Some(Ordering::Greater)
    }

    fn compare_starts(&self, other: &TimeValueRange) -> Option<Ordering> {
        (!self.is_empty() && !other.is_empty()).then(|| self.start.cmp_as_start(&other.start))
    }

    fn compare_ends(&self, other: &TimeValueRange) -> Option<Ordering> {
        (!self.is_empty() && !other.is_empty()).then(|| self.end.cmp_as_end(&other.end))
    }

    /// Returns `true` if the start of `self` lies inside `other`.
    pub fn starts_inside(&self, other: &TimeValueRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.start.cmp_as_start(&self.start) != Ordering::Greater
            && !is_empty_span(&self.start, &other.end)
    }

    /// Returns `true` if the end of `self` lies inside `other`.
    pub fn ends_inside(&self, other: &TimeValueRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.end.cmp_as_end(&self.end) != Ordering::Less
            && !is_empty_span(&other.start, &self.end)
    }

    /// The rate a binary operation's result is expressed at, if its bounds
    /// allow it.
    fn common_rate(&self, other: &TimeValueRange) -> Option<RationalRate> {
        self.rate.or(other.rate)
    }

    /// Returns the values in both ranges, at the rate of `self` or, failing
    /// that, of `other` when the result's bounds lie on that grid.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    pub fn intersection(&self, other: &TimeValueRange) -> Result<TimeValueRange> {
        let rate = self.common_rate(other);
        if self.is_empty() || other.is_empty() {
            return Ok(Self::never(rate));
        }
        let (start, end) = intersect_spans((&self.start, &self.end), (&other.start, &other.end));
        Self::exact(start, end, rate)
    }

    /// Returns the smallest range containing both ranges. An empty operand is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    pub fn extend_to_encompass(&self, other: &TimeValueRange) -> Result<TimeValueRange> {
        let rate = self.common_rate(other);
        let (start, end) = match (self.is_empty(), other.is_empty()) {
            (true, true) => return Ok(Self::never(rate)),
            (true, false) => (other.start, other.end),
            (false, true) => (self.start, self.end),
            (false, false) => hull_spans((&self.start, &self.end), (&other.start, &other.end)),
        };
        Self::exact(start, end, rate)
    }

    /// Returns the convex hull of both ranges, see [`Range::union`].
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    #[inline]
    pub fn union(&self, other: &TimeValueRange) -> Result<TimeValueRange> {
        self.extend_to_encompass(other)
    }

    /// Returns the union of two ranges that overlap or are contiguous.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if the union would not be
    /// a single range.
    pub fn checked_union(&self, other: &TimeValueRange) -> Result<TimeValueRange> {
        if self.is_empty() || other.is_empty() || self.is_contiguous_with(other) {
            return self.extend_to_encompass(other);
        }
        debug!(range = %self, other = %other, "rejecting union of disjoint ranges");
        Err(TimeError::InvalidRangeOperation(format!(
            "ranges {self} and {other} are not contiguous"
        )))
    }

    /// Returns `true` if the ranges share at least one value.
    pub fn overlaps(&self, other: &TimeValueRange) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (start, end) = intersect_spans((&self.start, &self.end), (&other.start, &other.end));
        !is_empty_span(&start, &end)
    }

    /// Returns `true` if `self` ends exactly where `other` starts.
    #[inline]
    pub fn meets(&self, other: &TimeValueRange) -> bool {
        !self.is_empty() && !other.is_empty() && abuts(&self.end, &other.start)
    }

    /// Returns `true` if the union of the ranges is a single range.
    #[inline]
    pub fn is_contiguous_with(&self, other: &TimeValueRange) -> bool {
        self.overlaps(other) || self.meets(other) || other.meets(self)
    }

    /// Returns `true` if every value of `self` precedes every value of `other`.
    #[inline]
    pub fn before(&self, other: &TimeValueRange) -> bool {
        !self.is_empty() && !other.is_empty() && precedes(&self.end, &other.start)
    }

    /// Returns `true` if every value of `self` follows every value of `other`.
    #[inline]
    pub fn after(&self, other: &TimeValueRange) -> bool {
        other.before(self)
    }

    /// Splits the range so that `value` starts the second part.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if `value` is not in the range.
    pub fn split_at(&self, value: TimeValue) -> Result<(TimeValueRange, TimeValueRange)> {
        self.check_split_point(&value)?;
        Ok((
            Self::exact(self.start, Bound::Excluded(value), self.rate)?,
            Self::exact(Bound::Included(value), self.end, self.rate)?,
        ))
    }

    /// Splits the range so that `value` ends the first part. On a range with a
    /// rate, a tick value ends the first part with its whole tick.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidRangeOperation`] if `value` is not in the range.
    pub fn split_after(&self, value: TimeValue) -> Result<(TimeValueRange, TimeValueRange)> {
        self.check_split_point(&value)?;
        if let Some(rate) = self.rate {
            if let Some(count) = grid_count(&value, rate) {
                let next = TimeValue::from_count(count.checked_add(1).ok_or(TimeError::Overflow)?, rate);
                return Ok((
                    Self::exact(self.start, Bound::Excluded(next), self.rate)?,
                    Self::exact(Bound::Included(next), self.end, self.rate)?,
                ));
            }
        }
        Ok((
            Self::exact(self.start, Bound::Included(value), self.rate)?,
            Self::exact(Bound::Excluded(value), self.end, self.rate)?,
        ))
    }

    fn check_split_point(&self, value: &TimeValue) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(TimeError::InvalidRangeOperation(format!(
                "cannot split {self} at {value}"
            )))
        }
    }

    /// Returns the gap between two disjoint ranges, or the empty range if they
    /// overlap or touch.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    pub fn range_between(&self, other: &TimeValueRange) -> Result<TimeValueRange> {
        let rate = self.common_rate(other);
        if self.before(other) {
            Self::exact(self.end.flip(), other.start.flip(), rate)
        } else if other.before(self) {
            Self::exact(other.end.flip(), self.start.flip(), rate)
        } else {
            Ok(Self::never(rate))
        }
    }

    /// Returns the part of `self` lying after the end of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    pub fn excluding_up_to_end_of(&self, other: &TimeValueRange) -> Result<TimeValueRange> {
        if other.is_empty() {
            return Ok(*self);
        }
        match other.end {
            Bound::Unbounded => Ok(Self::never(self.rate)),
            end => self.clipped(end.flip(), Bound::Unbounded),
        }
    }

    /// Returns the part of `self` lying before the start of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    pub fn excluding_before_start_of(&self, other: &TimeValueRange) -> Result<TimeValueRange> {
        if other.is_empty() {
            return Ok(*self);
        }
        match other.start {
            Bound::Unbounded => Ok(Self::never(self.rate)),
            start => self.clipped(Bound::Unbounded, start.flip()),
        }
    }

    /// Intersects with the span between two bounds, keeping the rate of `self`.
    fn clipped(&self, start: Bound<TimeValue>, end: Bound<TimeValue>) -> Result<TimeValueRange> {
        if self.is_empty() || is_empty_span(&start, &end) {
            return Ok(Self::never(self.rate));
        }
        let (start, end) = intersect_spans((&self.start, &self.end), (&start, &end));
        Self::exact(start, end, self.rate)
    }

    /// Returns the values of `self` that are not in `other`, as zero, one or
    /// two ranges in chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    pub fn difference(&self, other: &TimeValueRange) -> Result<SmallVec<[TimeValueRange; 2]>> {
        let mut pieces = SmallVec::new();
        if self.is_empty() {
            return Ok(pieces);
        }
        if !self.overlaps(other) {
            pieces.push(*self);
            return Ok(pieces);
        }
        if !other.start.is_unbounded() {
            let left = Self::exact(self.start, other.start.flip(), self.rate)?;
            if !left.is_empty() {
                pieces.push(left);
            }
        }
        if !other.end.is_unbounded() {
            let right = Self::exact(other.end.flip(), self.end, self.rate)?;
            if !right.is_empty() {
                pieces.push(right);
            }
        }
        Ok(pieces)
    }

    /// Merges `self` into a chronologically ordered sequence of ranges that
    /// neither overlap nor touch, returning a sequence with the same property
    /// that covers the inputs and `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    pub fn merge_into_ordered_ranges<I>(&self, ranges: I) -> Result<Vec<TimeValueRange>>
    where
        I: IntoIterator<Item = TimeValueRange>,
    {
        let mut merged = Vec::new();
        let mut pending = *self;
        for existing in ranges.into_iter().filter(|r| !r.is_empty()) {
            if pending.is_empty() || (existing.before(&pending) && !existing.is_contiguous_with(&pending)) {
                merged.push(existing);
            } else if existing.is_contiguous_with(&pending) {
                pending = pending.extend_to_encompass(&existing)?;
            } else {
                merged.push(pending);
                pending = existing;
            }
        }
        if !pending.is_empty() {
            merged.push(pending);
        }
        Ok(merged)
    }

    /// Given chronologically ordered disjoint ranges, returns the ordered,
    /// non-empty parts of `self` not covered by any of them.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if a bound is not representable as an
    /// instant.
    pub fn complement_of_ordered_subranges<I>(&self, ranges: I) -> Result<Vec<TimeValueRange>>
    where
        I: IntoIterator<Item = TimeValueRange>,
    {
        let mut gaps = Vec::new();
        let mut remaining = *self;
        for existing in ranges.into_iter().filter(|r| !r.is_empty()) {
            let before = remaining.excluding_before_start_of(&existing)?;
            if !before.is_empty() {
                gaps.push(before);
            }
            remaining = remaining.excluding_up_to_end_of(&existing)?;
        }
        if !remaining.is_empty() {
            gaps.push(remaining);
        }
        Ok(gaps)
    }

    /// Divides the range at every tick of `rate`, or of the range's own rate,
    /// that lies strictly inside it.
    ///
    /// The first piece keeps the start of `self` and the last keeps its end;
    /// the pieces in between include their start and exclude their end.
    /// Without any rate, or for a range with no start, the only piece is
    /// `self`. A range with a start but no end yields pieces forever.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::RationalRate;
    /// # use mediatime_value::TimeValueRange;
    /// let clip: TimeValueRange = "(0:010000000_0:130000000]".parse().unwrap();
    /// let pieces: Vec<String> = clip
    ///     .subranges(Some(RationalRate::new(25, 1).unwrap()))
    ///     .map(|r| r.to_string())
    ///     .collect();
    /// assert_eq!(pieces, [
    ///     "(0:010000000_0:040000000)",
    ///     "[0:040000000_0:080000000)",
    ///     "[0:080000000_0:120000000)",
    ///     "[0:120000000_0:130000000]",
    /// ]);
    /// ```
    pub fn subranges(&self, rate: Option<RationalRate>) -> Subranges {
        Subranges {
            rest: Some(*self),
            grid: rate.or(self.rate),
        }
    }

    /// Splits off the part before the first tick of `grid` strictly inside
    /// the range.
    fn split_at_next_tick(&self, grid: RationalRate) -> Option<(TimeValueRange, TimeValueRange)> {
        if self.is_empty() {
            return None;
        }
        let start = self.start.value()?;
        let count = start.as_count_rounded(grid, Rounding::Down).ok()?.checked_add(1)?;
        let tick = TimeValue::from_count(count, grid);
        if self.end.value().is_some_and(|end| tick >= *end) {
            return None;
        }
        let head = Self::exact(self.start, Bound::Excluded(tick), self.rate).ok()?;
        let rest = Self::exact(Bound::Included(tick), self.end, self.rate).ok()?;
        Some((head, rest))
    }
}

/// The tick count of `value` at `rate`, if `value` lies exactly on a tick.
fn grid_count(value: &TimeValue, rate: RationalRate) -> Option<i64> {
    let count = value.as_count_rounded(rate, Rounding::Down).ok()?;
    (TimeValue::from_count(count, rate) == *value).then_some(count)
}

/// The start bound as an inclusive tick, if it already is one.
fn grid_start(bound: Bound<TimeValue>, rate: RationalRate) -> Option<Bound<TimeValue>> {
    match bound {
        Bound::Included(v) => grid_count(&v, rate).map(|c| Bound::Included(TimeValue::from_count(c, rate))),
        Bound::Excluded(_) => None,
        Bound::Unbounded => Some(Bound::Unbounded),
    }
}

/// The end bound as an exclusive tick, if it already is one.
fn grid_end(bound: Bound<TimeValue>, rate: RationalRate) -> Option<Bound<TimeValue>> {
    match bound {
        Bound::Included(_) => None,
        Bound::Excluded(v) => grid_count(&v, rate).map(|c| Bound::Excluded(TimeValue::from_count(c, rate))),
        Bound::Unbounded => Some(Bound::Unbounded),
    }
}

fn instant_rounded(value: TimeValue, rounding: Rounding) -> Result<Instant> {
    match value {
        TimeValue::Instant(t) => Ok(t),
        TimeValue::Count { count, rate } => Instant::from_count_rounded(count, rate, rounding),
    }
}

/// The instant start bound admitting the same whole nanoseconds as `bound`.
fn start_instant(bound: Bound<TimeValue>) -> Result<Bound<Instant>> {
    match bound {
        Bound::Included(v) => instant_rounded(v, Rounding::Up).map(Bound::Included),
        Bound::Excluded(v) => instant_rounded(v, Rounding::Down).map(Bound::Excluded),
        Bound::Unbounded => Ok(Bound::Unbounded),
    }
}

/// The instant end bound admitting the same whole nanoseconds as `bound`.
fn end_instant(bound: Bound<TimeValue>) -> Result<Bound<Instant>> {
    match bound {
        Bound::Included(v) => instant_rounded(v, Rounding::Down).map(Bound::Included),
        Bound::Excluded(v) => instant_rounded(v, Rounding::Up).map(Bound::Excluded),
        Bound::Unbounded => Ok(Bound::Unbounded),
    }
}

fn next_count(count: i64) -> Result<i64> {
    count.checked_add(1).ok_or(TimeError::Overflow)
}

/// Rounds a start bound to the nearest tick and makes it inclusive.
fn snap_start(bound: Bound<TimeValue>, rate: RationalRate) -> Result<Bound<TimeValue>> {
    let count = match bound {
        Bound::Included(v) => v.as_count(rate)?,
        Bound::Excluded(v) => next_count(v.as_count(rate)?)?,
        Bound::Unbounded => return Ok(Bound::Unbounded),
    };
    Ok(Bound::Included(TimeValue::from_count(count, rate)))
}

/// Rounds an end bound to the nearest tick and makes it exclusive.
fn snap_end(bound: Bound<TimeValue>, rate: RationalRate) -> Result<Bound<TimeValue>> {
    let count = match bound {
        Bound::Included(v) => next_count(v.as_count(rate)?)?,
        Bound::Excluded(v) => v.as_count(rate)?,
        Bound::Unbounded => return Ok(Bound::Unbounded),
    };
    Ok(Bound::Excluded(TimeValue::from_count(count, rate)))
}

impl Default for TimeValueRange {
    fn default() -> Self {
        Self::NEVER
    }
}

impl PartialEq for TimeValueRange {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for TimeValueRange {}

impl Hash for TimeValueRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Display for TimeValueRange {
    /// Writes the range text form. A range with a rate prints bare counts and
    /// an `@<rate>` suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("()");
        }
        write_range_text(f, &self.start, &self.end, |f, value| match value {
            TimeValue::Count { count, .. } if self.rate.is_some() => write!(f, "{count}"),
            other => write!(f, "{other}"),
        })?;
        match self.rate {
            Some(rate) => write!(f, "@{rate}"),
            None => Ok(()),
        }
    }
}

impl FromStr for TimeValueRange {
    type Err = TimeError;

    /// Parses the range text form with an optional `@<rate>` suffix. With a
    /// rate, plain integers are counts; anything else is an instant.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (body, rate) = match s.split_once('@') {
            Some((body, rate)) => (body, Some(rate.parse::<RationalRate>()?)),
            None => (s, None),
        };
        match parse_range_text(body, |text| TimeValue::parse_with_rate(text, rate))? {
            RangeText::Empty => Ok(Self::never(rate)),
            RangeText::Bounds(start, end) => Self::new(start, end, rate),
        }
    }
}

impl AsRange for TimeValueRange {
    #[inline]
    fn as_range(&self) -> Result<Range> {
        TimeValueRange::as_range(self)
    }
}

/// An iterator over the ticks of a [`TimeValueRange`], from
/// [`TimeValueRange::iter`] or [`TimeValueRange::iter_rev`].
#[derive(Debug, Clone)]
pub struct TimeValueIter {
    rate: RationalRate,
    next: Option<i64>,
    last: Option<i64>,
    step: i64,
}

impl TimeValueIter {
    fn new(rate: RationalRate, first: i64, last: Option<i64>, step: i64) -> Self {
        let exhausted = last.is_some_and(|last| if step > 0 { first > last } else { first < last });
        Self {
            rate,
            next: (!exhausted).then_some(first),
            last,
            step,
        }
    }

    fn empty(rate: RationalRate) -> Self {
        Self {
            rate,
            next: None,
            last: None,
            step: 1,
        }
    }

    /// Returns the rate of the yielded values.
    #[inline]
    pub fn rate(&self) -> RationalRate {
        self.rate
    }

    /// Returns `true` if the iterator never runs out.
    #[inline]
    pub fn is_endless(&self) -> bool {
        self.next.is_some() && self.last.is_none()
    }
}

impl Iterator for TimeValueIter {
    type Item = TimeValue;

    fn next(&mut self) -> Option<TimeValue> {
        let current = self.next?;
        self.next = if self.last == Some(current) {
            None
        } else {
            current.checked_add(self.step)
        };
        Some(TimeValue::from_count(current, self.rate))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.next, self.last) {
            (None, _) => (0, Some(0)),
            (Some(next), Some(last)) => {
                let remaining = (i128::from(last) - i128::from(next)).abs() + 1;
                (usize::try_from(remaining).unwrap_or(usize::MAX), usize::try_from(remaining).ok())
            }
            (Some(_), None) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for TimeValueIter {}

/// The pieces of a [`TimeValueRange`] between consecutive ticks, from
/// [`TimeValueRange::subranges`].
#[derive(Debug, Clone)]
pub struct Subranges {
    rest: Option<TimeValueRange>,
    grid: Option<RationalRate>,
}

impl Iterator for Subranges {
    type Item = TimeValueRange;

    fn next(&mut self) -> Option<TimeValueRange> {
        loop {
            let rest = self.rest.take()?;
            match self.grid.and_then(|grid| rest.split_at_next_tick(grid)) {
                Some((head, tail)) => {
                    // A piece narrower than a nanosecond holds no instant once it loses the rate.
                    self.rest = (!tail.is_empty()).then_some(tail);
                    if !head.is_empty() {
                        return Some(head);
                    }
                }
                None => return Some(rest),
            }
        }
    }
}

impl FusedIterator for Subranges {}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(n: u64, d: u64) -> RationalRate {
        RationalRate::new(n, d).unwrap()
    }

    fn tvr(s: &str) -> TimeValueRange {
        s.parse().unwrap()
    }

    fn count(c: i64, r: u64) -> TimeValue {
        TimeValue::from_count(c, rate(r, 1))
    }

    fn t(s: &str) -> Instant {
        s.parse().unwrap()
    }

    fn tv(s: &str) -> TimeValue {
        TimeValue::from(t(s))
    }

    #[test]
    fn test_counts_normalize_to_half_open() {
        assert_eq!(tvr("[0_10]@25").to_string(), "[0_11)@25");
        assert_eq!(tvr("(0_10)@25").to_string(), "[1_10)@25");
        assert_eq!(tvr("(0_10]@25").to_string(), "[1_11)@25");
        assert_eq!(tvr("[5]@25").to_string(), "[5_6)@25");
        assert_eq!(tvr("[3_@25").to_string(), "[3_@25");
        assert_eq!(tvr("_@25").to_string(), "_@25");
        assert_eq!(tvr("[0_10]@25"), tvr("[0_11)@25"));
    }

    #[test]
    fn test_empty_and_universal() {
        assert!(tvr("[10_5]@25").is_empty());
        assert!(tvr("(4_5)@25").is_empty());
        assert!(tvr("()").is_empty());
        assert_eq!(tvr("[10_5]@25"), TimeValueRange::NEVER);
        assert_eq!(tvr("(2:0_1:0)"), TimeValueRange::NEVER);
        assert!(tvr("_").is_universal());
        assert_eq!(tvr("_@25"), TimeValueRange::ETERNITY);
        assert_eq!(TimeValueRange::never(Some(rate(25, 1))).to_string(), "()");
    }

    #[test]
    fn test_instant_bounds_round_to_the_nearest_tick() {
        let at_25 = |s: &str| TimeValueRange::from_range(&s.parse().unwrap(), Some(rate(25, 1))).unwrap();
        // 0.25 and 3.25 ticks round to 0 and 3, then the inclusive end moves past tick 3.
        assert_eq!(at_25("[0:010000000_0:130000000]").to_string(), "[0_4)@25");
        assert_eq!(at_25("(0:040000000_0:120000000)").to_string(), "[2_3)@25");
        assert_eq!(at_25("(0:050000000_0:150000000]").to_string(), "[2_5)@25");
        // Half ticks round away from zero.
        assert_eq!(at_25("[0:020000000]").to_string(), "[1_2)@25");
        assert_eq!(at_25("[-0:020000000_0:0)").to_string(), "[-1_0)@25");
        assert_eq!(tvr("[0:010000000_0:130000000]@25"), tvr("[0_4)@25"));
    }

    #[test]
    fn test_without_rate_ranges_hold_instants() {
        let range = tvr("[1:0_2:500000000)");
        assert_eq!(range.rate(), None);
        assert_eq!(range.to_string(), "[1:000000000_2:500000000)");
        assert_eq!(range.as_range().unwrap(), "[1:0_2:500000000)".parse::<Range>().unwrap());
        assert_eq!(range.length_as_duration().unwrap(), Duration::from_millis(1500));
        assert!(matches!(range.length_as_count(), Err(TimeError::InvalidRangeOperation(_))));
        assert!(matches!(range.iter(), Err(TimeError::InvalidRangeOperation(_))));
    }

    #[test]
    fn test_rate_is_adopted_from_count_bounds() {
        let range = TimeValueRange::new(
            Bound::Included(TimeValue::from(t("1:0"))),
            Bound::Excluded(count(50, 25)),
            None,
        )
        .unwrap();
        assert_eq!(range.rate(), Some(rate(25, 1)));
        assert_eq!(range.to_string(), "[25_50)@25");
    }

    #[test]
    fn test_constructors() {
        assert_eq!(TimeValueRange::from_start(count(3, 25), None).unwrap(), tvr("[3_@25"));
        assert_eq!(TimeValueRange::from_end(count(3, 25), None).unwrap(), tvr("_4)@25"));
        assert_eq!(TimeValueRange::from_start(tv("1:0"), None).unwrap().to_string(), "[1:000000000_");
        let clip = TimeValueRange::from_start_length(count(2, 25), count(5, 25), Inclusivity::IncludeStart, None)
            .unwrap();
        assert_eq!(clip.to_string(), "[2_7)@25");
        let span = TimeValueRange::from_start_length(tv("1:0"), tv("0:500000000"), Inclusivity::Inclusive, None)
            .unwrap();
        assert_eq!(span, tvr("[1:0_1:500000000]"));
        assert!(matches!(
            TimeValueRange::from_start_length(count(2, 25), count(-1, 25), Inclusivity::Inclusive, None),
            Err(TimeError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_contains() {
        let range = tvr("[0_10)@25");
        assert!(range.contains(&count(0, 25)));
        assert!(range.contains(&count(9, 25)));
        assert!(!range.contains(&count(10, 25)));
        assert!(range.contains(&TimeValue::from(t("0:200000000"))));
        assert!(range.contains(&count(19, 50)));
        assert!(!TimeValueRange::NEVER.contains(&TimeValue::EPOCH));
        assert!(TimeValueRange::ETERNITY.contains(&count(i64::MIN, 1)));
    }

    #[test]
    fn test_contains_between_ticks() {
        let range = tvr("[0_10)@25");
        assert!(range.contains(&tv("0:110000000")));
        assert!(range.contains(&tv("0:399999999")));
        assert!(!range.contains(&tv("0:400000000")));
        assert!(!range.contains(&tv("-0:000000001")));
    }

    #[test]
    fn test_contains_range() {
        let range = tvr("[0_10)@25");
        assert!(range.contains_range(&tvr("[2_5)@25")));
        assert!(!range.contains_range(&tvr("[2_11)@25")));
        assert!(range.contains_range(&TimeValueRange::NEVER));
        assert!(TimeValueRange::ETERNITY.contains_range(&range));
    }

    #[test]
    fn test_intersection_and_union() {
        let a = tvr("[0_10)@25");
        let b = tvr("[5_15)@25");
        assert_eq!(a.intersection(&b).unwrap(), tvr("[5_10)@25"));
        assert_eq!(a.intersection(&b).unwrap().rate(), Some(rate(25, 1)));
        assert_eq!(a.union(&b).unwrap(), tvr("[0_15)@25"));
        assert_eq!(a.intersection(&tvr("[20_30)@25")).unwrap(), TimeValueRange::NEVER);
        assert_eq!(TimeValueRange::NEVER.union(&a).unwrap(), a);
        assert_eq!(a.intersection(&TimeValueRange::ETERNITY).unwrap(), a);
    }

    #[test]
    fn test_mixed_rates() {
        let frames = tvr("[0_10)@25");
        let fields = tvr("[5_30)@50");
        // Field 5 sits between frames 2 and 3, so the result cannot stay at 25.
        let both = frames.intersection(&fields).unwrap();
        assert_eq!(both.rate(), None);
        assert_eq!(both, tvr("[0:100000000_0:400000000)"));
        // Every frame boundary is also a field boundary.
        let both = fields.intersection(&frames).unwrap();
        assert_eq!(both.rate(), Some(rate(50, 1)));
        assert_eq!(both.to_string(), "[5_20)@50");
        // An instant range on the grid adopts the rate.
        let on_grid = tvr("[0:0_0:200000000)").intersection(&frames).unwrap();
        assert_eq!(on_grid.to_string(), "[0_5)@25");
        assert_eq!(
            frames.union(&tvr("[0:300000000_1:010000000)")).unwrap().to_string(),
            "[0:000000000_1:010000000)"
        );
    }

    #[test]
    fn test_mixed_rate_intersection_keeps_shared_instants() {
        let frames = tvr("[0_10)@25");
        let clip = tvr("[0:100000000_1:000000000)");
        let shared = tv("0:110000000");
        assert!(frames.contains(&shared) && clip.contains(&shared));
        let both = frames.intersection(&clip).unwrap();
        assert!(both.contains(&shared));
        assert!(both.contains(&tv("0:100000000")));
        assert!(!both.contains(&tv("0:099999999")));
        assert_eq!(both.as_range().unwrap(), frames.as_range().unwrap() & clip.as_range().unwrap());
    }

    #[test]
    fn test_as_range_admits_the_same_nanoseconds() {
        // One third of a second lies between two nanoseconds.
        let thirds = tvr("[1_2)@3");
        assert_eq!(thirds.as_range().unwrap(), "[0:333333334_0:666666667)".parse::<Range>().unwrap());
        assert!(!thirds.contains(&tv("0:333333333")));
        assert!(thirds.contains(&tv("0:333333334")));
        assert!(thirds.contains(&tv("0:666666666")));
        assert!(!thirds.contains(&tv("0:666666667")));
    }

    #[test]
    fn test_checked_union_and_relations() {
        let a = tvr("[0_5)@25");
        let b = tvr("[5_10)@25");
        let c = tvr("[6_10)@25");
        assert!(a.meets(&b));
        assert!(a.is_contiguous_with(&b));
        assert!(!a.overlaps(&b));
        assert!(a.before(&c));
        assert!(c.after(&a));
        assert_eq!(a.checked_union(&b).unwrap(), tvr("[0_10)@25"));
        assert!(matches!(a.checked_union(&c), Err(TimeError::InvalidRangeOperation(_))));
    }

    #[test]
    fn test_start_and_end_relations() {
        let a = tvr("[0_10)@25");
        let b = tvr("[5_15)@25");
        assert!(b.starts_inside(&a));
        assert!(!a.starts_inside(&b));
        assert!(a.ends_inside(&b));
        assert!(!b.ends_inside(&a));
        assert!(a.starts_earlier_than(&b));
        assert!(b.starts_later_than(&a));
        assert!(a.ends_earlier_than(&b));
        assert!(b.ends_later_than(&a));
        // A range ending where another starts does not end inside it.
        assert!(!tvr("[0_5)@25").ends_inside(&b));
        assert!(!a.starts_earlier_than(&TimeValueRange::NEVER));
    }

    #[test]
    fn test_split() {
        let range = tvr("[0_10)@25");
        let (left, right) = range.split_at(count(4, 25)).unwrap();
        assert_eq!((left, right), (tvr("[0_4)@25"), tvr("[4_10)@25")));
        let (left, right) = range.split_after(count(4, 25)).unwrap();
        assert_eq!((left, right), (tvr("[0_5)@25"), tvr("[5_10)@25")));
        assert!(matches!(range.split_at(count(10, 25)), Err(TimeError::InvalidRangeOperation(_))));
    }

    #[test]
    fn test_split_between_ticks() {
        let range = tvr("[0_10)@25");
        let (left, right) = range.split_at(tv("0:110000000")).unwrap();
        assert_eq!(left, tvr("[0:0_0:110000000)"));
        assert_eq!(right, tvr("[0:110000000_0:400000000)"));
        assert_eq!((left.rate(), right.rate()), (None, None));
        let (left, right) = range.split_after(tv("0:110000000")).unwrap();
        assert_eq!(left, tvr("[0:0_0:110000000]"));
        assert_eq!(right, tvr("(0:110000000_0:400000000)"));
        let (left, right) = range.split_after(count(9, 25)).unwrap();
        assert_eq!(left, range);
        assert!(right.is_empty());
    }

    #[test]
    fn test_gaps_and_exclusions() {
        let a = tvr("[0_10)@25");
        let b = tvr("[3_5)@25");
        assert_eq!(a.excluding_up_to_end_of(&b).unwrap(), tvr("[5_10)@25"));
        assert_eq!(a.excluding_before_start_of(&b).unwrap(), tvr("[0_3)@25"));
        assert_eq!(a.excluding_up_to_end_of(&tvr("[3_@25")).unwrap(), TimeValueRange::NEVER);
        assert_eq!(a.excluding_before_start_of(&TimeValueRange::NEVER).unwrap(), a);
        assert_eq!(a.range_between(&tvr("[12_20)@25")).unwrap(), tvr("[10_12)@25"));
        assert_eq!(tvr("[12_20)@25").range_between(&a).unwrap(), tvr("[10_12)@25"));
        assert!(a.range_between(&tvr("[10_20)@25")).unwrap().is_empty());
        assert!(a.range_between(&b).unwrap().is_empty());
        assert_eq!(a.difference(&b).unwrap().as_slice(), &[tvr("[0_3)@25"), tvr("[5_10)@25")]);
        assert_eq!(a.difference(&tvr("[20_30)@25")).unwrap().as_slice(), &[a]);
        assert!(b.difference(&a).unwrap().is_empty());
    }

    #[test]
    fn test_merge_and_complement() {
        let existing = [tvr("[0_2)@25"), tvr("[5_8)@25")];
        let merged = tvr("[1_5)@25").merge_into_ordered_ranges(existing).unwrap();
        assert_eq!(merged, vec![tvr("[0_8)@25")]);
        let merged = tvr("[10_12)@25").merge_into_ordered_ranges(existing).unwrap();
        assert_eq!(merged, vec![tvr("[0_2)@25"), tvr("[5_8)@25"), tvr("[10_12)@25")]);
        let gaps = tvr("[0_10)@25").complement_of_ordered_subranges(existing).unwrap();
        assert_eq!(gaps, vec![tvr("[2_5)@25"), tvr("[8_10)@25")]);
    }

    #[test]
    fn test_subranges() {
        let pieces: Vec<_> = tvr("[0_3)@25").subranges(None).collect();
        assert_eq!(pieces, vec![tvr("[0_1)@25"), tvr("[1_2)@25"), tvr("[2_3)@25")]);
        let coarse: Vec<_> = tvr("[0_10)@50").subranges(Some(rate(25, 1))).collect();
        assert_eq!(coarse.len(), 5);
        assert_eq!(coarse[0].to_string(), "[0_2)@50");
        let open: Vec<_> = tvr("[7_@25").subranges(None).take(2).collect();
        assert_eq!(open, vec![tvr("[7_8)@25"), tvr("[8_9)@25")]);
        for whole in [tvr("_5)@25"), tvr("[0:0_1:0)"), TimeValueRange::NEVER] {
            assert_eq!(whole.subranges(None).collect::<Vec<_>>(), vec![whole]);
        }
    }

    #[test]
    fn test_lengths_and_bounds() {
        let range = tvr("[2_10)@25");
        assert_eq!(range.length_as_count().unwrap(), 8);
        assert_eq!(range.length_as_duration().unwrap(), Duration::from_millis(320));
        assert_eq!(range.as_count_bounds().unwrap(), (Bound::Included(2), Bound::Excluded(10)));
        assert_eq!(TimeValueRange::never(Some(rate(25, 1))).length_as_count().unwrap(), 0);
        assert_eq!(tvr("[2_@25").length_as_count(), Err(TimeError::UnboundedRange));
        assert_eq!(tvr("[0_1)@3").length_as_duration().unwrap(), Duration::from_nanos(333_333_333).unwrap());
    }

    #[test]
    fn test_iteration() {
        let range = tvr("[0_4)@25");
        let values: Vec<_> = range.iter().unwrap().collect();
        assert_eq!(values, vec![count(0, 25), count(1, 25), count(2, 25), count(3, 25)]);
        let reversed: Vec<_> = range.iter_rev().unwrap().collect();
        assert_eq!(reversed, vec![count(3, 25), count(2, 25), count(1, 25), count(0, 25)]);
        assert_eq!(range.iter().unwrap().size_hint(), (4, Some(4)));
        assert_eq!(TimeValueRange::never(Some(rate(25, 1))).iter().unwrap().count(), 0);
        assert_eq!(tvr("_4)@25").iter().unwrap_err(), TimeError::UnboundedRange);
        assert_eq!(tvr("[4_@25").iter_rev().unwrap_err(), TimeError::UnboundedRange);
    }

    #[test]
    fn test_iteration_without_an_end() {
        let forward = tvr("[3_@25").iter().unwrap();
        assert!(forward.is_endless());
        assert_eq!(forward.size_hint(), (usize::MAX, None));
        let first: Vec<_> = forward.take(3).collect();
        assert_eq!(first, vec![count(3, 25), count(4, 25), count(5, 25)]);
        let backward: Vec<_> = tvr("_4)@25").iter_rev().unwrap().take(2).collect();
        assert_eq!(backward, vec![count(3, 25), count(2, 25)]);
        let mut last = tvr("[9223372036854775806_@1").iter().unwrap();
        assert_eq!(last.next(), Some(TimeValue::from_count(i64::MAX - 1, rate(1, 1))));
        assert_eq!(last.next(), Some(TimeValue::from_count(i64::MAX, rate(1, 1))));
        assert_eq!(last.next(), None);
    }

    #[test]
    fn test_with_rate() {
        let range = tvr("[0_10)@25").with_rate(rate(50, 1)).unwrap();
        assert_eq!(range.to_string(), "[0_20)@50");
        assert_eq!(tvr("[1:0_2:0)").with_rate(rate(2, 1)).unwrap().to_string(), "[2_4)@2");
    }

    #[test]
    fn test_parse_errors() {
        assert!("[a_b)@25".parse::<TimeValueRange>().is_err());
        assert!("[0_1)@0".parse::<TimeValueRange>().is_err());
        assert!("[0_1_2)".parse::<TimeValueRange>().is_err());
    }
}
