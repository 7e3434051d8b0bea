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

use super::bound::Bound;
use crate::error::{Result, TimeError};
use crate::num::{RationalRate, Rounding};
use crate::time::{Duration, Instant};
use std::iter::FusedIterator;

/// An iterator over the on-grid instants of a bounded range at a fixed rate.
///
/// The grid is `Instant::from_count(k, rate) + phase` for every integer `k`.
/// The iterator walks tick counts, not instants, so it never accumulates
/// rounding error. A clone copies the remaining window, so a clone taken
/// before iterating replays the whole sequence.
///
/// # Examples
///
/// ```rust
/// # use mediatime_core::num::RationalRate;
/// # use mediatime_core::range::Range;
/// # use mediatime_core::time::Instant;
/// let range = Range::closed_open(Instant::new(0, 0).unwrap(), Instant::new(10, 0).unwrap());
/// let ticks = range.at_rate(RationalRate::new(2, 1).unwrap()).unwrap();
/// assert_eq!(ticks.len(), 20);
/// let all: Vec<String> = ticks.map(|t| t.to_string()).collect();
/// assert_eq!(all[1], "0:500000000");
/// assert_eq!(all[19], "9:500000000");
/// ```
#[derive(Debug, Clone)]
pub struct RateIter {
    rate: RationalRate,
    phase: Duration,
    front: i128,
    back: i128,
}

impl RateIter {
    /// Builds the iterator for the span `start..end`, which must be
    /// normalized and bounded on both sides unless it is empty.
    pub(crate) fn new(
        start: &Bound,
        end: &Bound,
        empty: bool,
        rate: RationalRate,
        phase: Duration,
    ) -> Result<Self> {
        if phase.is_negative() || phase.to_count(rate, Rounding::Down)? != 0 {
            return Err(TimeError::invalid_range(format!(
                "phase offset {phase} does not lie within one tick at rate {rate}"
            )));
        }

        let mut iter = Self {
            rate,
            phase,
            front: 0,
            back: -1,
        };
        if empty {
            return Ok(iter);
        }

        let (Some(first), Some(last)) = (start.value(), end.value()) else {
            return Err(TimeError::UnboundedRange);
        };

        // Start one tick outside each bound and walk inward; truncation in
        // `from_count` can put the nominal tick a nanosecond off either side.
        let lower = i128::from(first.checked_sub(phase)?.to_count(rate, Rounding::Down)?) - 1;
        let upper = i128::from(last.checked_sub(phase)?.to_count(rate, Rounding::Up)?) + 1;

        let mut front = lower;
        while front <= upper && !iter.instant_at(front).is_some_and(|t| start.admits_as_start(&t)) {
            front += 1;
        }
        let mut back = upper;
        while back >= front && !iter.instant_at(back).is_some_and(|t| end.admits_as_end(&t)) {
            back -= 1;
        }

        iter.front = front;
        iter.back = back;
        Ok(iter)
    }

    /// Returns the rate of the grid.
    #[inline]
    pub fn rate(&self) -> RationalRate {
        self.rate
    }

    /// Returns the offset of the grid from the epoch-aligned ticks.
    #[inline]
    pub fn phase(&self) -> Duration {
        self.phase
    }

    #[inline]
    fn instant_at(&self, count: i128) -> Option<Instant> {
        let count = i64::try_from(count).ok()?;
        Instant::from_count(count, self.rate)
            .and_then(|t| t.checked_add(self.phase))
            .ok()
    }

    #[inline]
    fn exhaust(&mut self) {
        self.front = 0;
        self.back = -1;
    }
}

impl Iterator for RateIter {
    type Item = Instant;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front > self.back {
            return None;
        }
        match self.instant_at(self.front) {
            Some(t) => {
                self.front += 1;
                Some(t)
            }
            None => {
                self.exhaust();
                None
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl DoubleEndedIterator for RateIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front > self.back {
            return None;
        }
        match self.instant_at(self.back) {
            Some(t) => {
                self.back -= 1;
                Some(t)
            }
            None => {
                self.exhaust();
                None
            }
        }
    }
}

impl ExactSizeIterator for RateIter {
    fn len(&self) -> usize {
        let remaining = self.back - self.front + 1;
        if remaining <= 0 {
            return 0;
        }
        usize::try_from(remaining).unwrap_or(usize::MAX)
    }
}

impl FusedIterator for RateIter {}

#[cfg(test)]
mod tests {
    use super::super::Range;
    use super::*;

    fn t(s: &str) -> Instant {
        s.parse().unwrap()
    }

    fn rate(n: u64, d: u64) -> RationalRate {
        RationalRate::new(n, d).unwrap()
    }

    #[test]
    fn test_half_open_range_excludes_end() {
        let range = Range::closed_open(t("0:0"), t("10:0"));
        let ticks: Vec<_> = range.at_rate(rate(2, 1)).unwrap().collect();
        assert_eq!(ticks.len(), 20);
        assert_eq!(ticks[0], t("0:0"));
        assert_eq!(ticks[1], t("0:500000000"));
        assert_eq!(*ticks.last().unwrap(), t("9:500000000"));
    }

    #[test]
    fn test_inclusivity_is_respected_at_both_ends() {
        let closed = Range::closed(t("0:0"), t("1:0"));
        assert_eq!(closed.at_rate(rate(4, 1)).unwrap().len(), 5);
        let open = Range::open(t("0:0"), t("1:0"));
        assert_eq!(open.at_rate(rate(4, 1)).unwrap().len(), 3);
    }

    #[test]
    fn test_off_grid_bounds_round_inward() {
        let range = Range::closed(t("0:010000000"), t("0:130000000"));
        let ticks: Vec<_> = range.at_rate(rate(25, 1)).unwrap().collect();
        assert_eq!(ticks, vec![t("0:040000000"), t("0:080000000"), t("0:120000000")]);
    }

    #[test]
    fn test_truncated_grid_points_are_found() {
        // Ticks at 3 Hz land on truncated nanoseconds: 0:333333333, 0:666666666.
        let range = Range::closed(t("0:333333333"), t("0:666666666"));
        let ticks: Vec<_> = range.at_rate(rate(3, 1)).unwrap().collect();
        assert_eq!(ticks, vec![t("0:333333333"), t("0:666666666")]);
    }

    #[test]
    fn test_negative_ranges() {
        let range = Range::closed_open(t("-1:0"), t("0:0"));
        let ticks: Vec<_> = range.at_rate(rate(2, 1)).unwrap().collect();
        assert_eq!(ticks, vec![t("-1:0"), t("-0:500000000")]);
    }

    #[test]
    fn test_reverse_and_clone() {
        let range = Range::closed(t("0:0"), t("1:0"));
        let iter = range.at_rate(rate(2, 1)).unwrap();
        let replay = iter.clone();
        let backwards: Vec<_> = iter.rev().collect();
        assert_eq!(backwards, vec![t("1:0"), t("0:500000000"), t("0:0")]);
        assert_eq!(replay.count(), 3);
        let reversed: Vec<_> = range.reversed_at_rate(rate(2, 1)).unwrap().collect();
        assert_eq!(reversed, backwards);
    }

    #[test]
    fn test_mixed_ends() {
        let mut iter = Range::closed(t("0:0"), t("2:0")).at_rate(rate(1, 1)).unwrap();
        assert_eq!(iter.next(), Some(t("0:0")));
        assert_eq!(iter.next_back(), Some(t("2:0")));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(t("1:0")));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_phase_shifts_the_grid() {
        let range = Range::closed_open(t("0:0"), t("2:0"));
        let ticks: Vec<_> = range
            .at_rate_with_phase(rate(1, 1), Duration::from_millis(250))
            .unwrap()
            .collect();
        assert_eq!(ticks, vec![t("0:250000000"), t("1:250000000")]);
    }

    #[test]
    fn test_phase_must_lie_within_one_tick() {
        let range = Range::closed_open(t("0:0"), t("2:0"));
        assert!(matches!(
            range.at_rate_with_phase(rate(1, 1), Duration::SECOND),
            Err(TimeError::InvalidRangeOperation(_))
        ));
        assert!(matches!(
            range.at_rate_with_phase(rate(1, 1), -Duration::NANOSECOND),
            Err(TimeError::InvalidRangeOperation(_))
        ));
    }

    #[test]
    fn test_empty_and_unbounded() {
        assert_eq!(Range::NEVER.at_rate(rate(25, 1)).unwrap().len(), 0);
        assert!(Range::NEVER.at_rate(rate(25, 1)).unwrap().next().is_none());
        assert_eq!(
            Range::from_start(t("0:0")).at_rate(rate(25, 1)).unwrap_err(),
            TimeError::UnboundedRange
        );
        assert_eq!(Range::ETERNITY.at_rate(rate(25, 1)).unwrap_err(), TimeError::UnboundedRange);
    }

    #[test]
    fn test_range_without_grid_points() {
        let range = Range::closed(t("0:100000000"), t("0:200000000"));
        let mut iter = range.at_rate(rate(1, 1)).unwrap();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
    }
}
