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

//! # Mediatime Strategies
//!
//! [`proptest`] strategies producing arbitrary values of every `mediatime`
//! type, for property tests in this workspace and in downstream crates.
//!
//! Every strategy is built from the public constructors only. The unbounded
//! strategies mix the interesting boundary values into the draw: zero,
//! one nanosecond either side of zero, the maximum and minimum durations, the
//! empty range and the universal range. The `*_within` variants keep values
//! inside a window of whole seconds around the epoch so that arithmetic on
//! them cannot overflow.
//!
//! Shrinking moves durations and instants toward the epoch, counts toward
//! zero and ranges toward shorter ones.
//!
//! # Examples
//!
//! ```rust
//! # use mediatime_strategies::{instants_within, ranges_within};
//! # use proptest::prelude::*;
//! proptest! {
//!     #[test]
//!     fn intersection_is_contained(a in ranges_within(1_000), b in ranges_within(1_000)) {
//!         let both = a.intersection(&b);
//!         prop_assert!(a.contains_range(&both));
//!         prop_assert!(b.contains_range(&both));
//!     }
//! }
//! ```

use mediatime_core::num::constants::{MAX_TOTAL_NANOS, NANOS_PER_SECOND};
use mediatime_core::num::RationalRate;
use mediatime_core::range::{Bound, Inclusivity, Range};
use mediatime_core::time::{Duration, Instant};
use mediatime_value::{TimeValue, TimeValueRange};
use proptest::prelude::*;

/// Rates found in practice: film, PAL, NTSC, fields and audio.
pub const COMMON_RATES: [(u64, u64); 9] = [
    (24, 1),
    (24000, 1001),
    (25, 1),
    (30000, 1001),
    (50, 1),
    (60000, 1001),
    (44100, 1),
    (48000, 1),
    (90000, 1),
];

/// Durations whose total nanosecond count lies in `min_nanos..=max_nanos`.
///
/// Shrinks toward `min_nanos`, or toward zero when the window spans it.
pub fn durations_between(min_nanos: i128, max_nanos: i128) -> impl Strategy<Value = Duration> + Clone {
    let min_nanos = min_nanos.max(-MAX_TOTAL_NANOS);
    let max_nanos = max_nanos.min(MAX_TOTAL_NANOS);
    (min_nanos..=max_nanos).prop_filter_map("duration out of range", |n| Duration::from_nanos(n).ok())
}

/// Durations of at most `seconds` whole seconds either side of zero.
pub fn durations_within(seconds: u64) -> impl Strategy<Value = Duration> + Clone {
    let limit = i128::from(seconds) * i128::from(NANOS_PER_SECOND);
    durations_between(-limit, limit)
}

/// Any representable duration, with the boundary values drawn often.
pub fn durations() -> impl Strategy<Value = Duration> + Clone {
    prop_oneof![
        1 => Just(Duration::ZERO),
        1 => Just(Duration::NANOSECOND),
        1 => Just(-Duration::NANOSECOND),
        1 => Just(Duration::MAX),
        1 => Just(Duration::MIN),
        5 => durations_within(1_000_000),
        10 => durations_between(-MAX_TOTAL_NANOS, MAX_TOTAL_NANOS),
    ]
}

/// Instants at most `seconds` whole seconds either side of the epoch.
pub fn instants_within(seconds: u64) -> impl Strategy<Value = Instant> + Clone {
    durations_within(seconds).prop_map(Instant::from_epoch_offset)
}

/// Any representable instant, with the boundary values drawn often.
pub fn instants() -> impl Strategy<Value = Instant> + Clone {
    durations().prop_map(Instant::from_epoch_offset)
}

/// Rates drawn from [`COMMON_RATES`] or built from arbitrary small parts.
pub fn rates() -> impl Strategy<Value = RationalRate> {
    let common = proptest::sample::select(COMMON_RATES.to_vec());
    prop_oneof![
        3 => common,
        1 => (1u64..=1_000_000, 1u64..=1_001),
    ]
    .prop_filter_map("zero rate", |(n, d)| RationalRate::new(n, d).ok())
}

/// One of the four inclusivities.
pub fn inclusivities() -> impl Strategy<Value = Inclusivity> {
    prop_oneof![
        Just(Inclusivity::Exclusive),
        Just(Inclusivity::IncludeStart),
        Just(Inclusivity::IncludeEnd),
        Just(Inclusivity::Inclusive),
    ]
}

/// Bounds over the instants of `values`, unbounded one time in five.
pub fn bounds<S>(values: S) -> impl Strategy<Value = Bound>
where
    S: Strategy<Value = Instant> + Clone,
{
    prop_oneof![
        1 => Just(Bound::Unbounded),
        2 => values.clone().prop_map(Bound::Included),
        2 => values.prop_map(Bound::Excluded),
    ]
}

/// Ranges inside a window of `seconds` either side of the epoch, including
/// empty, universal and half-bounded ones.
///
/// Endpoints are ordered before the range is built, so most draws are
/// non-empty; the empty range still appears directly and through ranges that
/// collapse on a shared endpoint.
pub fn ranges_within(seconds: u64) -> impl Strategy<Value = Range> {
    let bounded = (instants_within(seconds), instants_within(seconds), inclusivities())
        .prop_map(|(a, b, inclusivity)| {
            Range::with_inclusivity(Some(a.min(b)), Some(a.max(b)), inclusivity)
        });
    let half = (bounds(instants_within(seconds)), any::<bool>()).prop_map(|(bound, is_start)| {
        if is_start {
            Range::new(bound, Bound::Unbounded)
        } else {
            Range::new(Bound::Unbounded, bound)
        }
    });
    prop_oneof![
        1 => Just(Range::NEVER),
        1 => Just(Range::ETERNITY),
        2 => half,
        8 => bounded,
    ]
}

/// Ranges anywhere on the representable time line.
pub fn ranges() -> impl Strategy<Value = Range> {
    prop_oneof![
        1 => Just(Range::NEVER),
        1 => Just(Range::ETERNITY),
        4 => (bounds(instants()), bounds(instants())).prop_map(|(s, e)| Range::new(s, e)),
        8 => ranges_within(1_000_000),
    ]
}

/// Non-empty ranges of the given inclusivity whose endpoints lie within
/// `seconds` of the epoch.
pub fn bounded_ranges_within(seconds: u64, inclusivity: Inclusivity) -> impl Strategy<Value = Range> {
    (instants_within(seconds), durations_between(1, i128::from(seconds) * i128::from(NANOS_PER_SECOND)))
        .prop_filter_map("range end out of range", move |(start, length)| {
            Range::from_start_length(start, length, inclusivity).ok()
        })
}

/// Chronologically ordered, closed ranges that neither overlap nor touch,
/// at most `max_len` of them, within `seconds` of the epoch.
pub fn disjoint_ranges_within(seconds: u64, max_len: usize) -> impl Strategy<Value = Vec<Range>> {
    prop::collection::vec(instants_within(seconds), 0..=2 * max_len).prop_map(|mut points| {
        points.sort_unstable();
        points.dedup();
        points
            .chunks_exact(2)
            .map(|pair| Range::closed(pair[0], pair[1]))
            .collect()
    })
}

/// Time values in either representation, within `seconds` of the epoch.
pub fn time_values_within(seconds: u64) -> impl Strategy<Value = TimeValue> {
    let limit = i64::try_from(seconds).unwrap_or(i64::MAX);
    let counts = (rates(), -limit..=limit).prop_map(|(rate, count)| TimeValue::from_count(count, rate));
    prop_oneof![
        instants_within(seconds).prop_map(TimeValue::Instant),
        counts,
    ]
}

/// Time value ranges, with or without a rate, within `seconds` of the epoch.
pub fn time_value_ranges_within(seconds: u64) -> impl Strategy<Value = TimeValueRange> {
    (ranges_within(seconds), prop::option::of(rates())).prop_filter_map(
        "range not representable at rate",
        |(range, rate)| TimeValueRange::from_range(&range, rate).ok(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    fn sample<S: Strategy>(strategy: S, n: usize) -> Vec<S::Value> {
        let mut runner = TestRunner::deterministic();
        (0..n)
            .map(|_| strategy.new_tree(&mut runner).unwrap().current())
            .collect()
    }

    #[test]
    fn test_durations_hit_boundaries() {
        let drawn = sample(durations(), 2_000);
        assert!(drawn.contains(&Duration::ZERO));
        assert!(drawn.contains(&Duration::MAX));
        assert!(drawn.contains(&Duration::MIN));
        assert!(drawn.iter().any(|d| d.is_negative()));
    }

    #[test]
    fn test_ranges_hit_special_values() {
        let drawn = sample(ranges_within(100), 2_000);
        assert!(drawn.iter().any(Range::is_empty));
        assert!(drawn.iter().any(Range::is_universal));
        assert!(drawn.iter().any(|r| r.bounded_before() && !r.bounded_after()));
        assert!(drawn.iter().any(Range::is_finite));
    }

    #[test]
    fn test_windows_are_respected() {
        let limit = Instant::new(10, 0).unwrap();
        for t in sample(instants_within(10), 500) {
            assert!(t <= limit && t >= Instant::from_epoch_offset(-limit.epoch_offset()));
        }
        for r in sample(bounded_ranges_within(10, Inclusivity::IncludeStart), 500) {
            assert!(r.is_finite() && !r.is_empty());
        }
    }

    #[test]
    fn test_disjoint_ranges_are_ordered_and_apart() {
        for ranges in sample(disjoint_ranges_within(100, 5), 300) {
            for pair in ranges.windows(2) {
                assert!(pair[0].before(&pair[1]));
                assert!(!pair[0].is_contiguous_with(&pair[1]));
            }
        }
    }
}
