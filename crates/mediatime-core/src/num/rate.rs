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

use crate::error::{Result, TimeError};
use crate::time::Duration;
use num_integer::Integer;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A positive rational sampling rate, in ticks per second.
///
/// The rate does not have to be stored in lowest terms. Equality, ordering and
/// hashing all work on the rational value, so `50/1` and `100/2` are the same
/// rate.
///
/// # Examples
///
/// ```rust
/// # use mediatime_core::num::RationalRate;
/// let ntsc = RationalRate::new(30000, 1001).unwrap();
/// assert_eq!(ntsc.to_string(), "30000/1001");
/// assert_eq!(RationalRate::new(100, 2).unwrap(), RationalRate::new(50, 1).unwrap());
/// assert!(RationalRate::new(25, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RationalRate {
    numerator: u64,
    denominator: u64,
}

impl RationalRate {
    /// Creates a new rate of `numerator / denominator` ticks per second.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::IncompatibleRate`] if either part is zero.
    #[inline]
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(TimeError::IncompatibleRate {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Creates an integer rate of `hertz` ticks per second.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::IncompatibleRate`] if `hertz` is zero.
    #[inline]
    pub fn from_hertz(hertz: u64) -> Result<Self> {
        Self::new(hertz, 1)
    }

    /// Returns the numerator as supplied at construction.
    #[inline]
    pub const fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Returns the denominator as supplied at construction.
    #[inline]
    pub const fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Returns the same rate in lowest terms.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::RationalRate;
    /// let r = RationalRate::new(60000, 2002).unwrap().reduced();
    /// assert_eq!((r.numerator(), r.denominator()), (30000, 1001));
    /// ```
    pub fn reduced(&self) -> Self {
        let gcd = self.numerator.gcd(&self.denominator);
        Self {
            numerator: self.numerator / gcd,
            denominator: self.denominator / gcd,
        }
    }

    /// Returns `true` if the rate is a whole number of ticks per second.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.numerator % self.denominator == 0
    }

    /// Returns the duration of a single tick, truncated to whole nanoseconds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mediatime_core::num::RationalRate;
    /// let rate = RationalRate::new(3, 1).unwrap();
    /// assert_eq!(rate.tick().to_string(), "0:333333333");
    /// ```
    #[inline]
    pub fn tick(&self) -> Duration {
        // One tick never exceeds u64::MAX nanoseconds, so this cannot fail.
        Duration::from_count(1, *self).unwrap_or(Duration::MAX)
    }

    #[inline]
    fn cross(&self, other: &Self) -> (u128, u128) {
        (
            self.numerator as u128 * other.denominator as u128,
            other.numerator as u128 * self.denominator as u128,
        )
    }
}

impl PartialEq for RationalRate {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = self.cross(other);
        a == b
    }
}

impl Eq for RationalRate {}

impl PartialOrd for RationalRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalRate {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.cross(other);
        a.cmp(&b)
    }
}

impl Hash for RationalRate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let r = self.reduced();
        r.numerator.hash(state);
        r.denominator.hash(state);
    }
}

impl fmt::Display for RationalRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for RationalRate {
    type Err = TimeError;

    /// Parses `"<n>"` or `"<n>/<d>"`.
    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            let part = part.trim();
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TimeError::malformed(s, "rate is not of the form <n> or <n>/<d>"));
            }
            part.parse::<u64>()
                .map_err(|_| TimeError::malformed(s, "rate component does not fit in 64 bits"))
        };
        match s.split_once('/') {
            Some((n, d)) => Self::new(parse(n)?, parse(d)?),
            None => Self::new(parse(s)?, 1),
        }
    }
}
