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

use super::parse::parse_parts;
use crate::error::{Result, TimeError};
use crate::num::constants::{MAX_TOTAL_NANOS, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_SECOND};
use crate::num::rounding::MagnitudeRounding;
use crate::num::wide::mul_div;
use crate::num::{RationalRate, Rounding};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// The sign of a [`Duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Strictly below zero.
    Negative,
    /// Exactly zero.
    Zero,
    /// Strictly above zero.
    Positive,
}

/// A signed, nanosecond-precision span of time.
///
/// The value is kept as a sign, a whole number of seconds and a nanosecond
/// remainder in `[0, 999_999_999]`. The representation is canonical: zero is
/// never negative, so derived equality and hashing agree with the numeric value.
///
/// Every operation returns a new value. Checked methods (`checked_add`, ...)
/// report overflow as [`TimeError::Overflow`]; the operator impls panic on
/// overflow in the same way `std::time::Duration` does.
///
/// # Examples
///
/// ```rust
/// # use mediatime_core::time::Duration;
/// let a = Duration::new(1, 500_000_000).unwrap();
/// let b = Duration::from_millis(700);
/// assert_eq!((a - b).to_string(), "0:800000000");
/// assert_eq!((b - a).to_string(), "-0:800000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    negative: bool,
    seconds: u64,
    nanoseconds: u32,
}

impl Duration {
    /// The zero duration.
    pub const ZERO: Duration = Duration {
        negative: false,
        seconds: 0,
        nanoseconds: 0,
    };

    /// The largest representable duration.
    pub const MAX: Duration = Duration {
        negative: false,
        seconds: u64::MAX,
        nanoseconds: (NANOS_PER_SECOND - 1) as u32,
    };

    /// The most negative representable duration, `-MAX`.
    pub const MIN: Duration = Duration {
        negative: true,
        seconds: u64::MAX,
        nanoseconds: (NANOS_PER_SECOND - 1) as u32,
    };

    /// One nanosecond.
    pub const NANOSECOND: Duration = Duration::from_nanos_u32(1);

    /// One second.
    pub const SECOND: Duration = Duration::from_secs(1);

    /// Creates a non-negative duration from whole seconds and nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::MalformedInput`] if `nanoseconds` is one billion or more.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::time::Duration;
    /// assert!(Duration::new(1, 999_999_999).is_ok());
    /// assert!(Duration::new(1, 1_000_000_000).is_err());
    /// ```
    #[inline]
    pub fn new(seconds: u64, nanoseconds: u32) -> Result<Self> {
        Self::from_parts(false, seconds, nanoseconds)
    }

    /// Creates a duration from a sign flag, whole seconds and nanoseconds.
    ///
    /// A negative zero is canonicalized to [`Duration::ZERO`].
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::MalformedInput`] if `nanoseconds` is one billion or more.
    pub fn from_parts(negative: bool, seconds: u64, nanoseconds: u32) -> Result<Self> {
        if u64::from(nanoseconds) >= NANOS_PER_SECOND {
            return Err(TimeError::malformed(
                nanoseconds,
                "nanoseconds must be below one billion",
            ));
        }
        Ok(Self::canonical(negative, seconds, nanoseconds))
    }

    #[inline]
    const fn canonical(negative: bool, seconds: u64, nanoseconds: u32) -> Self {
        Self {
            negative: negative && (seconds != 0 || nanoseconds != 0),
            seconds,
            nanoseconds,
        }
    }

    const fn from_nanos_u32(nanoseconds: u32) -> Self {
        Self::canonical(false, 0, nanoseconds)
    }

    /// Creates a duration from a signed number of whole seconds.
    #[inline]
    pub const fn from_secs(seconds: i64) -> Self {
        Self::canonical(seconds < 0, seconds.unsigned_abs(), 0)
    }

    /// Creates a duration from a signed number of milliseconds.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        let magnitude = millis.unsigned_abs();
        Self::canonical(
            millis < 0,
            magnitude / 1_000,
            ((magnitude % 1_000) * NANOS_PER_MILLI) as u32,
        )
    }

    /// Creates a duration from a signed number of microseconds.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        let magnitude = micros.unsigned_abs();
        Self::canonical(
            micros < 0,
            magnitude / 1_000_000,
            ((magnitude % 1_000_000) * NANOS_PER_MICRO) as u32,
        )
    }

    /// Creates a duration from a signed total number of nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the magnitude exceeds [`Duration::MAX`].
    pub fn from_nanos(nanos: i128) -> Result<Self> {
        Self::from_magnitude(nanos < 0, nanos.unsigned_abs())
    }

    /// Creates a duration from a sign and an unsigned nanosecond magnitude.
    pub(crate) fn from_magnitude(negative: bool, magnitude: u128) -> Result<Self> {
        if magnitude > MAX_TOTAL_NANOS as u128 {
            return Err(TimeError::Overflow);
        }
        let seconds = (magnitude / u128::from(NANOS_PER_SECOND)) as u64;
        let nanoseconds = (magnitude % u128::from(NANOS_PER_SECOND)) as u32;
        Ok(Self::canonical(negative, seconds, nanoseconds))
    }

    /// Returns the whole-seconds part of the magnitude.
    #[inline]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Returns the sub-second part of the magnitude, in nanoseconds.
    #[inline]
    pub const fn nanoseconds(&self) -> u32 {
        self.nanoseconds
    }

    /// Returns `true` if the duration is strictly below zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns `true` if the duration is exactly zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanoseconds == 0
    }

    /// Returns the sign of the duration.
    #[inline]
    pub const fn sign(&self) -> Sign {
        if self.negative {
            Sign::Negative
        } else if self.is_zero() {
            Sign::Zero
        } else {
            Sign::Positive
        }
    }

    /// Returns the signed total number of nanoseconds. Always exact.
    #[inline]
    pub const fn as_nanos(&self) -> i128 {
        let magnitude = self.magnitude() as i128;
        if self.negative { -magnitude } else { magnitude }
    }

    #[inline]
    pub(crate) const fn magnitude(&self) -> u128 {
        self.seconds as u128 * NANOS_PER_SECOND as u128 + self.nanoseconds as u128
    }

    /// Returns the absolute value. Never overflows, as the range is symmetric.
    #[inline]
    pub const fn abs(&self) -> Self {
        Self {
            negative: false,
            seconds: self.seconds,
            nanoseconds: self.nanoseconds,
        }
    }

    /// Adds two durations.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the sum is not representable.
    #[inline]
    pub fn checked_add(self, rhs: Duration) -> Result<Self> {
        Self::from_nanos(self.as_nanos() + rhs.as_nanos())
    }

    /// Subtracts `rhs` from `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the difference is not representable.
    #[inline]
    pub fn checked_sub(self, rhs: Duration) -> Result<Self> {
        Self::from_nanos(self.as_nanos() - rhs.as_nanos())
    }

    /// Multiplies by a non-negative integer factor.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the product is not representable.
    pub fn checked_mul(self, factor: u64) -> Result<Self> {
        let magnitude = self
            .magnitude()
            .checked_mul(u128::from(factor))
            .ok_or(TimeError::Overflow)?;
        Self::from_magnitude(self.negative, magnitude)
    }

    /// Multiplies by the non-negative rational `numerator / denominator`,
    /// rounding the nanosecond result as requested.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::IncompatibleRate`] if `denominator` is zero and
    /// [`TimeError::Overflow`] if the product is not representable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::Rounding;
    /// # use mediatime_core::time::Duration;
    /// let d = Duration::from_secs(1);
    /// assert_eq!(d.checked_mul_ratio(1, 3, Rounding::Down).unwrap().nanoseconds(), 333_333_333);
    /// assert_eq!(d.checked_mul_ratio(2, 3, Rounding::Nearest).unwrap().nanoseconds(), 666_666_667);
    /// ```
    pub fn checked_mul_ratio(self, numerator: u64, denominator: u64, rounding: Rounding) -> Result<Self> {
        if denominator == 0 {
            return Err(TimeError::IncompatibleRate {
                numerator,
                denominator,
            });
        }
        let magnitude = mul_div(
            self.magnitude(),
            u128::from(numerator),
            u128::from(denominator),
            rounding.for_magnitude(self.negative),
        )
        .ok_or(TimeError::Overflow)?;
        Self::from_magnitude(self.negative, magnitude)
    }

    /// Divides by a positive integer, rounding the nanosecond result as requested.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::IncompatibleRate`] if `divisor` is zero.
    #[inline]
    pub fn checked_div(self, divisor: u64, rounding: Rounding) -> Result<Self> {
        self.checked_mul_ratio(1, divisor, rounding)
    }

    /// Converts to a whole number of ticks at `rate`.
    ///
    /// The exact rational value `nanos * numerator / (1e9 * denominator)` is
    /// computed with integer arithmetic only and then rounded:
    ///
    /// - [`Rounding::Nearest`] adds half a tick, itself truncated to whole
    ///   nanoseconds, to the magnitude and truncates. Ties round away from zero.
    /// - [`Rounding::TowardZero`], [`Rounding::Down`] and [`Rounding::Up`] are
    ///   exact truncation, floor and ceiling of the rational value.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the count does not fit in an `i64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::{RationalRate, Rounding};
    /// # use mediatime_core::time::Duration;
    /// let three = RationalRate::new(3, 1).unwrap();
    /// assert_eq!(Duration::from_secs(1).to_count(three, Rounding::Nearest).unwrap(), 3);
    /// let d = Duration::new(1, 166_666_667).unwrap();
    /// assert_eq!(d.to_count(three, Rounding::Nearest).unwrap(), 3);
    /// assert_eq!(d.to_count(three, Rounding::Up).unwrap(), 4);
    /// ```
    pub fn to_count(&self, rate: RationalRate, rounding: Rounding) -> Result<i64> {
        let numerator = u128::from(rate.numerator());
        let scaled_denominator = u128::from(rate.denominator()) * u128::from(NANOS_PER_SECOND);

        let magnitude = match rounding {
            Rounding::Nearest => {
                let half_tick = mul_div(
                    u128::from(NANOS_PER_SECOND),
                    u128::from(rate.denominator()),
                    2 * numerator,
                    MagnitudeRounding::Floor,
                )
                .ok_or(TimeError::Overflow)?;
                let biased = self.magnitude() + half_tick;
                mul_div(biased, numerator, scaled_denominator, MagnitudeRounding::Floor)
            }
            other => mul_div(
                self.magnitude(),
                numerator,
                scaled_denominator,
                other.for_magnitude(self.negative),
            ),
        }
        .ok_or(TimeError::Overflow)?;

        signed_count(self.negative, magnitude)
    }

    /// Converts a tick count at `rate` into a duration, truncating the
    /// nanosecond result toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::RationalRate;
    /// # use mediatime_core::time::Duration;
    /// let rate = RationalRate::new(50, 1).unwrap();
    /// assert_eq!(Duration::from_count(75, rate).unwrap().to_string(), "1:500000000");
    /// assert_eq!(Duration::from_count(-75, rate).unwrap().to_string(), "-1:500000000");
    /// ```
    #[inline]
    pub fn from_count(count: i64, rate: RationalRate) -> Result<Self> {
        Self::from_count_rounded(count, rate, Rounding::TowardZero)
    }

    /// Converts a tick count at `rate` into a duration, rounding the
    /// nanosecond result as requested. [`Rounding::Nearest`] rounds ties away
    /// from zero.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    pub fn from_count_rounded(count: i64, rate: RationalRate, rounding: Rounding) -> Result<Self> {
        let negative = count < 0;
        let magnitude = mul_div(
            u128::from(count.unsigned_abs()),
            u128::from(rate.denominator()) * u128::from(NANOS_PER_SECOND),
            u128::from(rate.numerator()),
            rounding.for_magnitude(negative),
        )
        .ok_or(TimeError::Overflow)?;
        Self::from_magnitude(negative, magnitude)
    }

    /// Rounds to the nearest on-grid value at `rate`, as chosen by `rounding`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the tick count does not fit in an `i64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::{RationalRate, Rounding};
    /// # use mediatime_core::time::Duration;
    /// let rate = RationalRate::new(30000, 1001).unwrap();
    /// let d: Duration = "1001:16683334".parse().unwrap();
    /// assert_eq!(d.quantize(rate, Rounding::Nearest).unwrap().to_string(), "1001:033366666");
    /// ```
    #[inline]
    pub fn quantize(&self, rate: RationalRate, rounding: Rounding) -> Result<Self> {
        Self::from_count(self.to_count(rate, rounding)?, rate)
    }

    /// Returns how far past the previous on-grid value at `rate` this duration lies.
    ///
    /// The result is non-negative and shorter than one tick.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the tick count does not fit in an `i64`.
    #[inline]
    pub fn phase_offset(&self, rate: RationalRate) -> Result<Self> {
        self.checked_sub(self.quantize(rate, Rounding::Down)?)
    }

    /// Converts to whole milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the count does not fit in an `i64`.
    #[inline]
    pub fn to_millis(&self, rounding: Rounding) -> Result<i64> {
        self.to_count(RationalRate::new(1_000, 1)?, rounding)
    }

    /// Converts to whole microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the count does not fit in an `i64`.
    #[inline]
    pub fn to_micros(&self, rounding: Rounding) -> Result<i64> {
        self.to_count(RationalRate::new(1_000_000, 1)?, rounding)
    }
}

/// Applies a sign to a count magnitude, checking it fits in an `i64`.
fn signed_count(negative: bool, magnitude: u128) -> Result<i64> {
    let magnitude = i128::try_from(magnitude).map_err(|_| TimeError::Overflow)?;
    let count = if negative { -magnitude } else { magnitude };
    i64::try_from(count).map_err(|_| TimeError::Overflow)
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_nanos().cmp(&other.as_nanos())
    }
}

impl Neg for Duration {
    type Output = Duration;

    #[inline]
    fn neg(self) -> Duration {
        Self::canonical(!self.negative, self.seconds, self.nanoseconds)
    }
}

impl Add for Duration {
    type Output = Duration;

    /// # Panics
    ///
    /// Panics if the sum overflows. Use [`Duration::checked_add`] to handle that case.
    #[inline]
    fn add(self, rhs: Duration) -> Duration {
        self.checked_add(rhs)
            .unwrap_or_else(|_| panic!("overflow when adding durations"))
    }
}

impl Sub for Duration {
    type Output = Duration;

    /// # Panics
    ///
    /// Panics if the difference overflows. Use [`Duration::checked_sub`] to handle that case.
    #[inline]
    fn sub(self, rhs: Duration) -> Duration {
        self.checked_sub(rhs)
            .unwrap_or_else(|_| panic!("overflow when subtracting durations"))
    }
}

impl Mul<u64> for Duration {
    type Output = Duration;

    /// # Panics
    ///
    /// Panics if the product overflows. Use [`Duration::checked_mul`] to handle that case.
    #[inline]
    fn mul(self, rhs: u64) -> Duration {
        self.checked_mul(rhs)
            .unwrap_or_else(|_| panic!("overflow when multiplying duration by scalar"))
    }
}

impl From<std::time::Duration> for Duration {
    #[inline]
    fn from(d: std::time::Duration) -> Self {
        Self::canonical(false, d.as_secs(), d.subsec_nanos())
    }
}

impl TryFrom<Duration> for std::time::Duration {
    type Error = TimeError;

    fn try_from(d: Duration) -> Result<Self> {
        if d.is_negative() {
            return Err(TimeError::malformed(d, "std durations cannot be negative"));
        }
        Ok(std::time::Duration::new(d.seconds, d.nanoseconds))
    }
}

impl fmt::Display for Duration {
    /// Writes the canonical `[-]<seconds>:<nanoseconds>` form, with the
    /// nanoseconds zero-padded to nine digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{}{}:{:09}", sign, self.seconds, self.nanoseconds)
    }
}

impl FromStr for Duration {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self> {
        let (negative, seconds, nanoseconds) = parse_parts(s)?;
        Ok(Self::canonical(negative, seconds, nanoseconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Duration {
        s.parse().unwrap()
    }

    fn rate(n: u64, den: u64) -> RationalRate {
        RationalRate::new(n, den).unwrap()
    }

    #[test]
    fn test_new_rejects_nanosecond_overflow() {
        assert!(matches!(
            Duration::new(0, 1_000_000_000),
            Err(TimeError::MalformedInput { .. })
        ));
        assert_eq!(Duration::new(3, 5).unwrap().nanoseconds(), 5);
    }

    #[test]
    fn test_negative_zero_is_canonical() {
        let z = Duration::from_parts(true, 0, 0).unwrap();
        assert_eq!(z, Duration::ZERO);
        assert!(!z.is_negative());
        assert_eq!(-Duration::ZERO, Duration::ZERO);
        assert_eq!(d("-0:0"), Duration::ZERO);
        assert_eq!(Duration::ZERO.sign(), Sign::Zero);
    }

    #[test]
    fn test_unit_constructors() {
        assert_eq!(Duration::from_millis(-1_500), d("-1:500000000"));
        assert_eq!(Duration::from_micros(2_000_001), d("2:000001000"));
        assert_eq!(Duration::from_secs(i64::MIN).seconds(), 1u64 << 63);
        assert_eq!(Duration::from_nanos(-1).unwrap(), d("-0:1"));
        assert_eq!(Duration::from_nanos(MAX_TOTAL_NANOS).unwrap(), Duration::MAX);
        assert_eq!(Duration::from_nanos(-MAX_TOTAL_NANOS).unwrap(), Duration::MIN);
        assert_eq!(Duration::from_nanos(MAX_TOTAL_NANOS + 1), Err(TimeError::Overflow));
    }

    #[test]
    fn test_add_and_sub_across_zero() {
        assert_eq!(d("1:0") - d("1:000000001"), d("-0:1"));
        assert_eq!(d("-1:500000000") + d("2:0"), d("0:500000000"));
        assert_eq!(d("-1:500000000") - d("0:600000000"), d("-2:100000000"));
        assert_eq!(d("1:0") + (-d("1:0")), Duration::ZERO);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(Duration::MAX.checked_add(Duration::NANOSECOND), Err(TimeError::Overflow));
        assert_eq!(Duration::MIN.checked_sub(Duration::NANOSECOND), Err(TimeError::Overflow));
        assert_eq!(Duration::MAX.checked_mul(2), Err(TimeError::Overflow));
        assert_eq!(Duration::MAX.checked_mul(1).unwrap(), Duration::MAX);
        assert_eq!(-Duration::MAX, Duration::MIN);
        assert_eq!(Duration::MIN.abs(), Duration::MAX);
    }

    #[test]
    #[should_panic(expected = "overflow when adding durations")]
    fn test_add_operator_panics_on_overflow() {
        let _ = Duration::MAX + Duration::SECOND;
    }

    #[test]
    fn test_ordering_includes_sign() {
        let mut values = vec![d("1:0"), d("-1:0"), Duration::ZERO, d("-0:1"), d("0:1"), Duration::MIN];
        values.sort();
        assert_eq!(
            values,
            vec![Duration::MIN, d("-1:0"), d("-0:1"), Duration::ZERO, d("0:1"), d("1:0")]
        );
    }

    #[test]
    fn test_scaling() {
        assert_eq!(d("1:500000000") * 3, d("4:500000000"));
        assert_eq!(d("-1:0").checked_mul_ratio(1, 3, Rounding::Down).unwrap(), d("-0:333333334"));
        assert_eq!(d("-1:0").checked_mul_ratio(1, 3, Rounding::Up).unwrap(), d("-0:333333333"));
        assert_eq!(d("1:0").checked_div(4, Rounding::Nearest).unwrap(), d("0:250000000"));
        assert!(matches!(
            d("1:0").checked_div(0, Rounding::Nearest),
            Err(TimeError::IncompatibleRate { .. })
        ));
    }

    #[test]
    fn test_to_count_nearest_vectors() {
        let r = rate(50, 1);
        assert_eq!(d("100:029999999").to_count(r, Rounding::Nearest).unwrap(), 5001);
        assert_eq!(d("100:030000000").to_count(r, Rounding::Nearest).unwrap(), 5002);
        assert_eq!(d("100:010000000").to_count(r, Rounding::Nearest).unwrap(), 5001);
        assert_eq!(d("-100:030000000").to_count(r, Rounding::Nearest).unwrap(), -5002);
    }

    #[test]
    fn test_to_count_directional_vectors() {
        let r = rate(50, 1);
        assert_eq!(d("100:029999999").to_count(r, Rounding::Up).unwrap(), 5002);
        assert_eq!(d("100:030000000").to_count(r, Rounding::Down).unwrap(), 5001);
        assert_eq!(d("100:030000000").to_count(r, Rounding::TowardZero).unwrap(), 5001);
        assert_eq!(d("-100:029999999").to_count(r, Rounding::Down).unwrap(), -5002);
        assert_eq!(d("-100:030000000").to_count(r, Rounding::Up).unwrap(), -5001);
        assert_eq!(d("-100:030000000").to_count(r, Rounding::TowardZero).unwrap(), -5001);
        assert_eq!(d("100:020000000").to_count(r, Rounding::Up).unwrap(), 5001);
    }

    #[test]
    fn test_to_count_nearest_half_tick_is_truncated() {
        let three = rate(3, 1);
        assert_eq!(d("1:0").to_count(three, Rounding::Nearest).unwrap(), 3);
        assert_eq!(d("1:166666667").to_count(three, Rounding::Nearest).unwrap(), 3);
        assert_eq!(d("1:166666668").to_count(three, Rounding::Nearest).unwrap(), 4);
    }

    #[test]
    fn test_to_count_prime_denominator_is_exact() {
        // 3 seconds at 1/3 Hz is exactly one tick, even though neither the
        // seconds nor the nanoseconds part is divisible on its own.
        let r = rate(1, 3);
        assert_eq!(d("3:0").to_count(r, Rounding::Down).unwrap(), 1);
        assert_eq!(d("2:999999999").to_count(r, Rounding::Down).unwrap(), 0);
        assert_eq!(d("3:000000001").to_count(r, Rounding::Up).unwrap(), 2);
    }

    #[test]
    fn test_to_count_overflow() {
        let r = rate(u64::MAX, 1);
        assert_eq!(Duration::MAX.to_count(r, Rounding::Down), Err(TimeError::Overflow));
        assert_eq!(Duration::MAX.to_count(rate(1, 1), Rounding::Down), Err(TimeError::Overflow));
        assert_eq!(d("1:0").to_count(r, Rounding::Down).unwrap_err(), TimeError::Overflow);
    }

    #[test]
    fn test_from_count_vectors() {
        let r = rate(50, 1);
        assert_eq!(Duration::from_count(1, r).unwrap(), d("0:020000000"));
        assert_eq!(Duration::from_count(75, r).unwrap(), d("1:500000000"));
        assert_eq!(Duration::from_count(-75, r).unwrap(), d("-1:500000000"));
        assert_eq!(Duration::from_count(1, rate(3, 1)).unwrap(), d("0:333333333"));
        assert_eq!(Duration::from_count(-1, rate(3, 1)).unwrap(), d("-0:333333333"));
        assert_eq!(
            Duration::from_count_rounded(2, rate(3, 1), Rounding::Nearest).unwrap(),
            d("0:666666667")
        );
        assert_eq!(
            Duration::from_count_rounded(-1, rate(3, 1), Rounding::Down).unwrap(),
            d("-0:333333334")
        );
    }

    #[test]
    fn test_from_count_to_count_round_trip_on_grid() {
        let r = rate(30000, 1001);
        for count in [-1_000_000i64, -1, 0, 1, 29, 30, 1_000_000_007] {
            let value = Duration::from_count(count, r).unwrap();
            assert_eq!(value.to_count(r, Rounding::Nearest).unwrap(), count);
        }
    }

    #[test]
    fn test_quantize_vectors() {
        let r = rate(30000, 1001);
        assert_eq!(d("1001:16683334").quantize(r, Rounding::Nearest).unwrap(), d("1001:033366666"));
        assert_eq!(d("1001:16683334").quantize(r, Rounding::Down).unwrap(), d("1001:0"));
        assert_eq!(d("1001:16683334").phase_offset(r).unwrap(), d("0:016683334"));
        assert_eq!(d("-0:000000001").phase_offset(r).unwrap(), d("0:033366665"));
    }

    #[test]
    fn test_milli_and_micro_conversion() {
        assert_eq!(d("1:000500000").to_millis(Rounding::Nearest).unwrap(), 1_001);
        assert_eq!(d("1:000499999").to_millis(Rounding::Nearest).unwrap(), 1_000);
        assert_eq!(d("-0:000001500").to_micros(Rounding::Down).unwrap(), -2);
        assert_eq!(d("-0:000001500").to_micros(Rounding::TowardZero).unwrap(), -1);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(d("1:5").to_string(), "1:000000005");
        assert_eq!(Duration::MIN.to_string(), "-18446744073709551615:999999999");
        assert_eq!(d("-2.5"), d("-2:500000000"));
        assert_eq!(d(&Duration::MIN.to_string()), Duration::MIN);
    }

    #[test]
    fn test_std_interop() {
        let std = std::time::Duration::new(5, 7);
        let ours = Duration::from(std);
        assert_eq!(ours, d("5:7"));
        assert_eq!(std::time::Duration::try_from(ours).unwrap(), std);
        assert!(std::time::Duration::try_from(-ours).is_err());
    }
}
