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

//! # Clock Sources
//!
//! The [`Clock`] trait is the single seam through which the crate reads the
//! outside world. Production code uses [`SystemClock`], which reads the host's
//! UTC wall clock and shifts it onto the TAI scale with a configured offset;
//! tests use [`FixedClock`].
//!
//! Leap-second tables are not derived or shipped here. The TAI-UTC difference
//! is a single configured value, see [`ClockConfig`].

use crate::error::Result;
use crate::num::constants::DEFAULT_TAI_UTC_OFFSET_SECONDS;
use crate::time::{Duration, Instant};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

/// A source of the current TAI time.
///
/// A read is a single synchronous call that either returns immediately or
/// fails. There is no pending or retryable state.
///
/// # Examples
///
/// ```rust
/// # use mediatime_core::clock::{Clock, FixedClock};
/// # use mediatime_core::time::Instant;
/// fn stamp(clock: &impl Clock) -> String {
///     clock.current_time().map(|t| t.to_string()).unwrap_or_default()
/// }
///
/// let clock = FixedClock::new(Instant::new(42, 0).unwrap());
/// assert_eq!(stamp(&clock), "42:000000000");
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn current_time(&self) -> Result<Instant>;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn current_time(&self) -> Result<Instant> {
        (**self).current_time()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    #[inline]
    fn current_time(&self) -> Result<Instant> {
        (**self).current_time()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    #[inline]
    fn current_time(&self) -> Result<Instant> {
        (**self).current_time()
    }
}

/// Configuration for [`SystemClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    /// Seconds to add to the host's UTC reading to obtain TAI.
    pub tai_utc_offset_seconds: i64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tai_utc_offset_seconds: DEFAULT_TAI_UTC_OFFSET_SECONDS,
        }
    }
}

impl ClockConfig {
    /// Returns a copy with a different TAI-UTC offset.
    #[inline]
    pub fn with_tai_utc_offset(mut self, seconds: i64) -> Self {
        self.tai_utc_offset_seconds = seconds;
        self
    }

    /// Returns the TAI-UTC offset as a [`Duration`].
    #[inline]
    pub fn tai_utc_offset(&self) -> Duration {
        Duration::from_secs(self.tai_utc_offset_seconds)
    }
}

/// Reads the host's wall clock and converts it to TAI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock {
    config: ClockConfig,
}

impl SystemClock {
    /// Creates a clock with the given configuration.
    #[inline]
    pub fn new(config: ClockConfig) -> Self {
        Self { config }
    }

    /// Returns the clock's configuration.
    #[inline]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }
}

impl Clock for SystemClock {
    fn current_time(&self) -> Result<Instant> {
        let since_unix = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(after) => Duration::from(after),
            Err(before) => -Duration::from(before.duration()),
        };
        let offset = self.config.tai_utc_offset();
        let now = Instant::from_epoch_offset(since_unix).checked_add(offset)?;
        trace!(
            seconds = now.seconds(),
            nanoseconds = now.nanoseconds(),
            tai_utc_offset = self.config.tai_utc_offset_seconds,
            "read system clock"
        );
        Ok(now)
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: Instant,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    #[inline]
    pub fn new(now: Instant) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    #[inline]
    fn current_time(&self) -> Result<Instant> {
        Ok(self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offset() {
        assert_eq!(ClockConfig::default().tai_utc_offset(), Duration::from_secs(37));
        assert_eq!(
            ClockConfig::default().with_tai_utc_offset(-2).tai_utc_offset(),
            Duration::from_secs(-2)
        );
    }

    #[test]
    fn test_system_clock_applies_offset() {
        let utc = SystemClock::new(ClockConfig::default().with_tai_utc_offset(0));
        let tai = SystemClock::default();
        let a = utc.current_time().unwrap();
        let b = tai.current_time().unwrap();
        let gap = b - a;
        assert!(gap >= Duration::from_secs(37));
        assert!(gap < Duration::from_secs(38));
    }

    #[test]
    fn test_clock_through_smart_pointers() {
        let fixed = FixedClock::new(Instant::new(7, 0).unwrap());
        let shared: Arc<dyn Clock> = Arc::new(fixed);
        let boxed: Box<dyn Clock> = Box::new(fixed);
        assert_eq!(shared.current_time().unwrap(), Instant::new(7, 0).unwrap());
        assert_eq!(boxed.current_time().unwrap(), Instant::new(7, 0).unwrap());
        assert_eq!((&fixed).current_time().unwrap(), Instant::new(7, 0).unwrap());
    }
}
