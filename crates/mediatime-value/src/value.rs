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

//! A time value held either as an instant or as a tick count at a rate.

use mediatime_core::convert::{AsDuration, AsInstant, AsRange};
use mediatime_core::num::constants::NANOS_PER_SECOND;
use mediatime_core::num::{RationalRate, Rounding};
use mediatime_core::range::Range;
use mediatime_core::time::{Duration, Instant};
use mediatime_core::{Result, TimeError};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A point on the media time line in one of two representations.
///
/// Callers that do not want to commit to one representation store a
/// `TimeValue` and project it on demand: [`TimeValue::as_instant`] always
/// works, and [`TimeValue::as_count`] re-expresses the value at any rate.
///
/// Equality, ordering and hashing compare the exact rational number of seconds
/// since the epoch, so a count and an instant that denote the same point are
/// equal.
///
/// # Examples
///
/// ```rust
/// # use mediatime_core::num::RationalRate;
/// # use mediatime_core::time::Instant;
/// # use mediatime_value::TimeValue;
/// let rate = RationalRate::new(25, 1).unwrap();
/// let frame = TimeValue::from_count(50, rate);
/// assert_eq!(frame, TimeValue::from(Instant::new(2, 0).unwrap()));
/// assert_eq!(frame.as_instant().unwrap().to_string(), "2:000000000");
/// assert_eq!(frame.as_count(RationalRate::new(50, 1).unwrap()).unwrap(), 100);
/// assert_eq!(frame.to_string(), "50@25");
/// ```
#[derive(Debug, Clone, Copy)]
pub enum TimeValue {
    /// An instant on the TAI time line.
    Instant(Instant),
    /// `count` ticks at `rate` after the epoch.
    Count {
        /// The number of ticks.
        count: i64,
        /// The tick rate.
        rate: RationalRate,
    },
}

impl TimeValue {
    /// The epoch, held as an instant.
    pub const EPOCH: TimeValue = TimeValue::Instant(Instant::EPOCH);

    /// Creates a count-backed value.
    #[inline]
    pub const fn from_count(count: i64, rate: RationalRate) -> Self {
        TimeValue::Count { count, rate }
    }

    /// Returns the rate of a count-backed value.
    #[inline]
    pub fn rate(&self) -> Option<RationalRate> {
        match self {
            TimeValue::Instant(_) => None,
            TimeValue::Count { rate, .. } => Some(*rate),
        }
    }

    /// Returns `true` if the value is held as a tick count.
    #[inline]
    pub fn is_count(&self) -> bool {
        matches!(self, TimeValue::Count { .. })
    }

    /// Projects the value onto the instant time line.
    ///
    /// Count-backed values convert exactly and are truncated toward the epoch
    /// to whole nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the instant is not representable.
    pub fn as_instant(&self) -> Result<Instant> {
        match *self {
            TimeValue::Instant(t) => Ok(t),
            TimeValue::Count { count, rate } => Instant::from_count(count, rate),
        }
    }

    /// Returns the value as a tick count at `rate`, rounded to the nearest tick.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the count does not fit in an `i64`.
    #[inline]
    pub fn as_count(&self, rate: RationalRate) -> Result<i64> {
        self.as_count_rounded(rate, Rounding::Nearest)
    }

    /// Returns the value as a tick count at `rate` under `rounding`.
    ///
    /// A count-backed value at an equal rate is returned unchanged. A count at
    /// another rate is rescaled exactly; there `Nearest` rounds ties away from
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the count does not fit in an `i64`.
    pub fn as_count_rounded(&self, rate: RationalRate, rounding: Rounding) -> Result<i64> {
        match *self {
            TimeValue::Instant(t) => t.to_count(rate, rounding),
            TimeValue::Count { count, rate: own } if own == rate => Ok(count),
            TimeValue::Count { count, rate: own } => rescale(count, own, rate, rounding),
        }
    }

    /// Returns the value as a count at `rate`, rounded to the nearest tick.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the count does not fit in an `i64`.
    #[inline]
    pub fn with_rate(&self, rate: RationalRate) -> Result<Self> {
        self.with_rate_rounded(rate, Rounding::Nearest)
    }

    /// Returns the value as a count at `rate` under `rounding`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the count does not fit in an `i64`.
    #[inline]
    pub fn with_rate_rounded(&self, rate: RationalRate, rounding: Rounding) -> Result<Self> {
        Ok(Self::from_count(self.as_count_rounded(rate, rounding)?, rate))
    }

    /// Adds `offset`, read as a span from the epoch, keeping the representation
    /// of `self`.
    ///
    /// For a count-backed value the offset is first rounded to the nearest
    /// tick.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::RationalRate;
    /// # use mediatime_value::TimeValue;
    /// let rate = RationalRate::new(25, 1).unwrap();
    /// let a = TimeValue::from_count(10, rate);
    /// let b: TimeValue = "1:0".parse().unwrap();
    /// assert_eq!(a.checked_add(&b).unwrap().to_string(), "35@25");
    /// ```
    pub fn checked_add(&self, offset: &TimeValue) -> Result<Self> {
        match *self {
            TimeValue::Instant(t) => Ok(TimeValue::Instant(
                t.checked_add(offset.as_instant()?.epoch_offset())?,
            )),
            TimeValue::Count { count, rate } => {
                let delta = offset.as_count(rate)?;
                let count = count.checked_add(delta).ok_or(TimeError::Overflow)?;
                Ok(Self::from_count(count, rate))
            }
        }
    }

    /// Subtracts `offset`, read as a span from the epoch, keeping the
    /// representation of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    pub fn checked_sub(&self, offset: &TimeValue) -> Result<Self> {
        match *self {
            TimeValue::Instant(t) => Ok(TimeValue::Instant(
                t.checked_sub(offset.as_instant()?.epoch_offset())?,
            )),
            TimeValue::Count { count, rate } => {
                let delta = offset.as_count(rate)?;
                let count = count.checked_sub(delta).ok_or(TimeError::Overflow)?;
                Ok(Self::from_count(count, rate))
            }
        }
    }

    /// Scales the distance from the epoch by `factor`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    pub fn checked_mul(&self, factor: u64) -> Result<Self> {
        match *self {
            TimeValue::Instant(t) => Ok(TimeValue::Instant(Instant::from_epoch_offset(
                t.epoch_offset().checked_mul(factor)?,
            ))),
            TimeValue::Count { count, rate } => {
                let factor = i64::try_from(factor).map_err(|_| TimeError::Overflow)?;
                let count = count.checked_mul(factor).ok_or(TimeError::Overflow)?;
                Ok(Self::from_count(count, rate))
            }
        }
    }

    /// Returns the value mirrored about the epoch if it lies before it.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] for a count of `i64::MIN`.
    pub fn checked_abs(&self) -> Result<Self> {
        match *self {
            TimeValue::Instant(t) => Ok(TimeValue::Instant(Instant::from_epoch_offset(
                t.epoch_offset().abs(),
            ))),
            TimeValue::Count { count, rate } => Ok(Self::from_count(
                count.checked_abs().ok_or(TimeError::Overflow)?,
                rate,
            )),
        }
    }

    /// Parses a value whose rate, if any, is supplied separately.
    ///
    /// With a rate, a plain integer is a tick count at that rate and anything
    /// else is an instant. Without a rate, the text is always an instant, so a
    /// plain integer means whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::MalformedInput`] for unparseable text.
    pub fn parse_with_rate(text: &str, rate: Option<RationalRate>) -> Result<Self> {
        let text = text.trim();
        match rate {
            Some(rate) if is_integer(text) => text
                .parse::<i64>()
                .map(|count| Self::from_count(count, rate))
                .map_err(|_| TimeError::MalformedInput {
                    input: text.to_owned(),
                    reason: "count does not fit in 64 bits",
                }),
            _ => text.parse::<Instant>().map(TimeValue::Instant),
        }
    }

    /// The exact number of seconds since the epoch as `numer / denom`, with a
    /// positive denominator.
    fn exact_seconds(&self) -> (BigInt, BigInt) {
        match *self {
            TimeValue::Instant(t) => (
                BigInt::from(t.epoch_offset().as_nanos()),
                BigInt::from(NANOS_PER_SECOND),
            ),
            TimeValue::Count { count, rate } => (
                BigInt::from(count) * rate.denominator(),
                BigInt::from(rate.numerator()),
            ),
        }
    }
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Re-expresses `count` ticks at `from` as ticks at `to`.
fn rescale(count: i64, from: RationalRate, to: RationalRate, rounding: Rounding) -> Result<i64> {
    let numer = BigInt::from(count) * from.denominator() * to.numerator();
    let denom = BigInt::from(from.numerator()) * to.denominator();
    let quotient = match rounding {
        Rounding::Down => numer.div_floor(&denom),
        Rounding::Up => numer.div_ceil(&denom),
        Rounding::TowardZero => &numer / &denom,
        Rounding::Nearest => {
            let magnitude = (numer.abs() * 2u32 + &denom) / (&denom * 2u32);
            if numer.is_negative() { -magnitude } else { magnitude }
        }
    };
    quotient.to_i64().ok_or(TimeError::Overflow)
}

impl Default for TimeValue {
    fn default() -> Self {
        Self::EPOCH
    }
}

impl From<Instant> for TimeValue {
    #[inline]
    fn from(instant: Instant) -> Self {
        TimeValue::Instant(instant)
    }
}

impl PartialEq for TimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimeValue {}

impl PartialOrd for TimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TimeValue::Instant(a), TimeValue::Instant(b)) => a.cmp(b),
            (TimeValue::Count { count: a, rate: ra }, TimeValue::Count { count: b, rate: rb })
                if ra.numerator() == rb.numerator() && ra.denominator() == rb.denominator() =>
            {
                a.cmp(b)
            }
            _ => {
                let (an, ad) = self.exact_seconds();
                let (bn, bd) = other.exact_seconds();
                (an * bd).cmp(&(bn * ad))
            }
        }
    }
}

impl Hash for TimeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (numer, denom) = self.exact_seconds();
        let divisor = numer.gcd(&denom);
        (numer / &divisor).hash(state);
        (denom / divisor).hash(state);
    }
}

impl fmt::Display for TimeValue {
    /// Instants print as `<seconds>:<nanoseconds>`, counts as `<count>@<rate>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Instant(t) => write!(f, "{t}"),
            TimeValue::Count { count, rate } => write!(f, "{count}@{rate}"),
        }
    }
}

impl FromStr for TimeValue {
    type Err = TimeError;

    /// Parses `<value>` or `<value>@<rate>`. With a rate the result is always
    /// count-backed: an instant is rounded to the nearest tick.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once('@') {
            Some((_, rate)) if rate.contains('@') => Err(TimeError::MalformedInput {
                input: s.to_owned(),
                reason: "more than one '@' separator",
            }),
            Some((value, rate)) => {
                let rate = rate.parse::<RationalRate>()?;
                Self::parse_with_rate(value, Some(rate))?.with_rate(rate)
            }
            None => Self::parse_with_rate(s, None),
        }
    }
}

impl AsInstant for TimeValue {
    #[inline]
    fn as_instant(&self) -> Result<Instant> {
        TimeValue::as_instant(self)
    }
}

impl AsDuration for TimeValue {
    #[inline]
    fn as_duration(&self) -> Result<Duration> {
        Ok(TimeValue::as_instant(self)?.epoch_offset())
    }
}

/// A value is the range containing only its instant.
impl AsRange for TimeValue {
    #[inline]
    fn as_range(&self) -> Result<Range> {
        Ok(Range::single(TimeValue::as_instant(self)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rate(n: u64, d: u64) -> RationalRate {
        RationalRate::new(n, d).unwrap()
    }

    fn t(s: &str) -> Instant {
        s.parse().unwrap()
    }

    #[test]
    fn test_equality_is_exact_across_representations() {
        assert_eq!(TimeValue::from_count(3, rate(3, 1)), TimeValue::from(t("1:0")));
        assert_eq!(TimeValue::from_count(2, rate(50, 1)), TimeValue::from_count(1, rate(25, 1)));
        assert_ne!(TimeValue::from_count(1, rate(3, 1)), TimeValue::from(t("0:333333333")));
        assert!(TimeValue::from_count(1, rate(3, 1)) > TimeValue::from(t("0:333333333")));
        assert!(TimeValue::from_count(-1, rate(25, 1)) < TimeValue::EPOCH);
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let set: HashSet<TimeValue> = [
            TimeValue::from_count(3, rate(3, 1)),
            TimeValue::from(t("1:0")),
            TimeValue::from_count(50, rate(50, 1)),
            TimeValue::from_count(100, rate(100, 2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_as_count_rescales_exactly() {
        let v = TimeValue::from_count(1001, rate(30000, 1001));
        assert_eq!(v.as_count(rate(30000, 1001)).unwrap(), 1001);
        assert_eq!(v.as_count(rate(60000, 1001)).unwrap(), 2002);
        let third = TimeValue::from_count(1, rate(3, 1));
        assert_eq!(third.as_count_rounded(rate(2, 1), Rounding::Down).unwrap(), 0);
        assert_eq!(third.as_count_rounded(rate(2, 1), Rounding::Up).unwrap(), 1);
        assert_eq!(third.as_count(rate(2, 1)).unwrap(), 1);
        let neg = TimeValue::from_count(-1, rate(3, 1));
        assert_eq!(neg.as_count_rounded(rate(2, 1), Rounding::Down).unwrap(), -1);
        assert_eq!(neg.as_count_rounded(rate(2, 1), Rounding::TowardZero).unwrap(), 0);
        assert_eq!(neg.as_count(rate(2, 1)).unwrap(), -1);
    }

    #[test]
    fn test_nearest_rescale_ties_away_from_zero() {
        // 1 tick at 2 Hz is 0.5 s, exactly half a tick at 1 Hz.
        assert_eq!(TimeValue::from_count(1, rate(2, 1)).as_count(rate(1, 1)).unwrap(), 1);
        assert_eq!(TimeValue::from_count(-1, rate(2, 1)).as_count(rate(1, 1)).unwrap(), -1);
    }

    #[test]
    fn test_as_instant() {
        assert_eq!(TimeValue::from_count(1, rate(3, 1)).as_instant().unwrap(), t("0:333333333"));
        assert_eq!(TimeValue::from(t("5:1")).as_instant().unwrap(), t("5:1"));
        assert_eq!(
            TimeValue::from_count(i64::MAX, rate(1, u64::MAX)).as_instant(),
            Err(TimeError::Overflow)
        );
    }

    #[test]
    fn test_arithmetic_keeps_representation() {
        let frames = TimeValue::from_count(10, rate(25, 1));
        let second = TimeValue::from(t("1:0"));
        assert_eq!(frames.checked_add(&second).unwrap(), TimeValue::from_count(35, rate(25, 1)));
        assert!(frames.checked_add(&second).unwrap().is_count());
        assert_eq!(second.checked_add(&frames).unwrap(), TimeValue::from(t("1:400000000")));
        assert!(!second.checked_sub(&frames).unwrap().is_count());
        assert_eq!(frames.checked_sub(&second).unwrap(), TimeValue::from_count(-15, rate(25, 1)));
        assert_eq!(frames.checked_mul(3).unwrap(), TimeValue::from_count(30, rate(25, 1)));
        assert_eq!(
            TimeValue::from_count(-4, rate(25, 1)).checked_abs().unwrap(),
            TimeValue::from_count(4, rate(25, 1))
        );
        assert_eq!(
            TimeValue::from_count(i64::MAX, rate(25, 1)).checked_add(&TimeValue::from_count(1, rate(25, 1))),
            Err(TimeError::Overflow)
        );
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(TimeValue::from_count(-7, rate(30000, 1001)).to_string(), "-7@30000/1001");
        assert_eq!(TimeValue::from(t("-1:5")).to_string(), "-1:000000005");
        assert_eq!("50@25".parse::<TimeValue>().unwrap(), TimeValue::from_count(50, rate(25, 1)));
        assert_eq!("+3@3".parse::<TimeValue>().unwrap().as_instant().unwrap(), t("1:0"));
        let converted: TimeValue = "1:0@25".parse().unwrap();
        assert!(converted.is_count());
        assert_eq!(converted.to_string(), "25@25");
        assert_eq!("2".parse::<TimeValue>().unwrap(), TimeValue::from(t("2:0")));
        assert!("1@2@3".parse::<TimeValue>().is_err());
        assert!("1@0".parse::<TimeValue>().is_err());
        assert!("x@25".parse::<TimeValue>().is_err());
    }

    #[test]
    fn test_capabilities() {
        let v = TimeValue::from_count(25, rate(25, 1));
        assert_eq!(Instant::of(&v).unwrap(), t("1:0"));
        assert_eq!(Duration::of(&v).unwrap(), Duration::SECOND);
        assert_eq!(Range::of(&v).unwrap(), Range::single(t("1:0")));
    }
}
