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

/// Rounding policy applied when an exact rational result has to be turned
/// into an integer (a tick count, a nanosecond count, ...).
///
/// `Down` and `Up` are meant in the signed sense: `Down` is the floor and
/// `Up` is the ceiling, so for negative values they round away from and
/// toward zero respectively.
///
/// # Examples
///
/// ```rust
/// # use mediatime_core::num::{RationalRate, Rounding};
/// # use mediatime_core::time::Duration;
/// let rate = RationalRate::new(50, 1).unwrap();
/// let d: Duration = "100:30000000".parse().unwrap();
/// assert_eq!(d.to_count(rate, Rounding::Down).unwrap(), 5001);
/// assert_eq!(d.to_count(rate, Rounding::Nearest).unwrap(), 5002);
/// assert_eq!((-d).to_count(rate, Rounding::Up).unwrap(), -5001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Round to the nearest integer, ties away from zero.
    #[default]
    Nearest,
    /// Truncate: discard the fractional part of the magnitude.
    TowardZero,
    /// Round toward negative infinity.
    Down,
    /// Round toward positive infinity.
    Up,
}

/// Rounding of a non-negative magnitude, after the sign has been split off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MagnitudeRounding {
    Floor,
    Ceil,
    HalfUp,
}

impl Rounding {
    /// Returns the policy to apply to the magnitude of a value with the given sign.
    #[inline]
    pub(crate) fn for_magnitude(self, negative: bool) -> MagnitudeRounding {
        match (self, negative) {
            (Rounding::Nearest, _) => MagnitudeRounding::HalfUp,
            (Rounding::TowardZero, _) => MagnitudeRounding::Floor,
            (Rounding::Down, false) | (Rounding::Up, true) => MagnitudeRounding::Floor,
            (Rounding::Up, false) | (Rounding::Down, true) => MagnitudeRounding::Ceil,
        }
    }
}
