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

use super::duration::Duration;
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TimeError};
use crate::num::{RationalRate, Rounding};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A point on the TAI time scale, stored as a [`Duration`] offset from the
/// epoch `1970-01-01T00:00:00 TAI`.
///
/// Instants may lie before the epoch. Adding two instants is meaningless and
/// not provided; the supported arithmetic is
/// `Instant + Duration = Instant`, `Instant - Duration = Instant` and
/// `Instant - Instant = Duration`.
///
/// # Examples
///
/// ```rust
/// # use mediatime_core::time::{Duration, Instant};
/// let t: Instant = "10:0".parse().unwrap();
/// let later = t + Duration::from_millis(250);
/// assert_eq!(later.to_string(), "10:250000000");
/// assert_eq!(later - t, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Instant(Duration);

impl Instant {
    /// The epoch, `0:000000000`.
    pub const EPOCH: Instant = Instant(Duration::ZERO);

    /// The latest representable instant.
    pub const MAX: Instant = Instant(Duration::MAX);

    /// The earliest representable instant.
    pub const MIN: Instant = Instant(Duration::MIN);

    /// Creates an instant `seconds` and `nanoseconds` after the epoch.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::MalformedInput`] if `nanoseconds` is one billion or more.
    #[inline]
    pub fn new(seconds: u64, nanoseconds: u32) -> Result<Self> {
        Duration::new(seconds, nanoseconds).map(Instant)
    }

    /// Creates an instant from a sign flag, whole seconds and nanoseconds
    /// relative to the epoch.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::MalformedInput`] if `nanoseconds` is one billion or more.
    #[inline]
    pub fn from_parts(negative: bool, seconds: u64, nanoseconds: u32) -> Result<Self> {
        Duration::from_parts(negative, seconds, nanoseconds).map(Instant)
    }

    /// Creates the instant lying `offset` after the epoch.
    #[inline]
    pub const fn from_epoch_offset(offset: Duration) -> Self {
        Instant(offset)
    }

    /// Returns the signed offset of this instant from the epoch.
    #[inline]
    pub const fn epoch_offset(&self) -> Duration {
        self.0
    }

    /// Returns the whole seconds of the epoch offset's magnitude.
    #[inline]
    pub const fn seconds(&self) -> u64 {
        self.0.seconds()
    }

    /// Returns the sub-second nanoseconds of the epoch offset's magnitude.
    #[inline]
    pub const fn nanoseconds(&self) -> u32 {
        self.0.nanoseconds()
    }

    /// Returns `true` if the instant lies before the epoch.
    #[inline]
    pub const fn is_before_epoch(&self) -> bool {
        self.0.is_negative()
    }

    /// Reads the current TAI time from the host clock.
    ///
    /// This is the only non-deterministic constructor. Code that needs to be
    /// testable should take a [`Clock`] and call [`Instant::now_with`].
    ///
    /// # Errors
    ///
    /// Returns the error reported by [`SystemClock::current_time`].
    #[inline]
    pub fn now() -> Result<Self> {
        SystemClock::default().current_time()
    }

    /// Reads the current time from an injected clock.
    #[inline]
    pub fn now_with<C: Clock + ?Sized>(clock: &C) -> Result<Self> {
        clock.current_time()
    }

    /// Converts to a tick count at `rate` since the epoch.
    /// See [`Duration::to_count`] for the rounding rules.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the count does not fit in an `i64`.
    #[inline]
    pub fn to_count(&self, rate: RationalRate, rounding: Rounding) -> Result<i64> {
        self.0.to_count(rate, rounding)
    }

    /// Returns the instant `count` ticks at `rate` after the epoch, truncated
    /// toward the epoch to whole nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::RationalRate;
    /// # use mediatime_core::time::Instant;
    /// let rate = RationalRate::new(25, 1).unwrap();
    /// assert_eq!(Instant::from_count(26, rate).unwrap().to_string(), "1:040000000");
    /// ```
    #[inline]
    pub fn from_count(count: i64, rate: RationalRate) -> Result<Self> {
        Duration::from_count(count, rate).map(Instant)
    }

    /// Like [`Instant::from_count`] with an explicit rounding policy.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    #[inline]
    pub fn from_count_rounded(count: i64, rate: RationalRate, rounding: Rounding) -> Result<Self> {
        Duration::from_count_rounded(count, rate, rounding).map(Instant)
    }

    /// Rounds to an on-grid instant at `rate`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the tick count does not fit in an `i64`.
    #[inline]
    pub fn quantize(&self, rate: RationalRate, rounding: Rounding) -> Result<Self> {
        self.0.quantize(rate, rounding).map(Instant)
    }

    /// Returns the offset of this instant past the previous on-grid instant at `rate`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the tick count does not fit in an `i64`.
    #[inline]
    pub fn phase_offset(&self, rate: RationalRate) -> Result<Duration> {
        self.0.phase_offset(rate)
    }

    /// Returns `self + offset`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    #[inline]
    pub fn checked_add(self, offset: Duration) -> Result<Self> {
        self.0.checked_add(offset).map(Instant)
    }

    /// Returns `self - offset`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    #[inline]
    pub fn checked_sub(self, offset: Duration) -> Result<Self> {
        self.0.checked_sub(offset).map(Instant)
    }

    /// Returns the signed duration from `earlier` to `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Overflow`] if the result is not representable.
    #[inline]
    pub fn checked_duration_since(self, earlier: Instant) -> Result<Duration> {
        self.0.checked_sub(earlier.0)
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    /// # Panics
    ///
    /// Panics if the result is not representable.
    #[inline]
    fn add(self, rhs: Duration) -> Instant {
        Instant(self.0 + rhs)
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    /// # Panics
    ///
    /// Panics if the result is not representable.
    #[inline]
    fn sub(self, rhs: Duration) -> Instant {
        Instant(self.0 - rhs)
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    /// # Panics
    ///
    /// Panics if the result is not representable.
    #[inline]
    fn sub(self, rhs: Instant) -> Duration {
        self.0 - rhs.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Instant {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse().map(Instant)
    }
}
