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

//! # Conversion Capabilities
//!
//! Three small traits let foreign types be handed to the constructors in this
//! crate without the crate depending on them: anything with a natural notion
//! of an offset implements [`AsDuration`], of a timestamp [`AsInstant`], and of
//! an interval [`AsRange`].
//!
//! # Examples
//!
//! ```rust
//! # use mediatime_core::convert::AsInstant;
//! # use mediatime_core::error::Result;
//! # use mediatime_core::range::{Inclusivity, Range};
//! # use mediatime_core::time::Instant;
//! struct Packet {
//!     pts_seconds: u64,
//! }
//!
//! impl AsInstant for Packet {
//!     fn as_instant(&self) -> Result<Instant> {
//!         Instant::new(self.pts_seconds, 0)
//!     }
//! }
//!
//! let range = Range::between(&Packet { pts_seconds: 1 }, &Packet { pts_seconds: 3 }, Inclusivity::IncludeStart).unwrap();
//! assert_eq!(range.to_string(), "[1:000000000_3:000000000)");
//! ```

use crate::error::Result;
use crate::range::Range;
use crate::time::{Duration, Instant};

/// Types that can be viewed as a signed [`Duration`].
pub trait AsDuration {
    /// Returns the value as a duration.
    fn as_duration(&self) -> Result<Duration>;
}

/// Types that can be viewed as an [`Instant`].
pub trait AsInstant {
    /// Returns the value as an instant.
    fn as_instant(&self) -> Result<Instant>;
}

/// Types that can be viewed as a [`Range`].
pub trait AsRange {
    /// Returns the value as a range.
    fn as_range(&self) -> Result<Range>;
}

impl<T: AsDuration + ?Sized> AsDuration for &T {
    #[inline]
    fn as_duration(&self) -> Result<Duration> {
        (**self).as_duration()
    }
}

impl<T: AsInstant + ?Sized> AsInstant for &T {
    #[inline]
    fn as_instant(&self) -> Result<Instant> {
        (**self).as_instant()
    }
}

impl<T: AsRange + ?Sized> AsRange for &T {
    #[inline]
    fn as_range(&self) -> Result<Range> {
        (**self).as_range()
    }
}

impl AsDuration for Duration {
    #[inline]
    fn as_duration(&self) -> Result<Duration> {
        Ok(*self)
    }
}

impl AsDuration for std::time::Duration {
    #[inline]
    fn as_duration(&self) -> Result<Duration> {
        Ok(Duration::from(*self))
    }
}

/// An instant is its offset from the epoch.
impl AsDuration for Instant {
    #[inline]
    fn as_duration(&self) -> Result<Duration> {
        Ok(self.epoch_offset())
    }
}

/// A duration is read as an offset from the epoch.
impl AsInstant for Duration {
    #[inline]
    fn as_instant(&self) -> Result<Instant> {
        Ok(Instant::from_epoch_offset(*self))
    }
}

impl AsInstant for Instant {
    #[inline]
    fn as_instant(&self) -> Result<Instant> {
        Ok(*self)
    }
}

/// An instant is the range containing only itself.
impl AsRange for Instant {
    #[inline]
    fn as_range(&self) -> Result<Range> {
        Ok(Range::single(*self))
    }
}

impl AsRange for Range {
    #[inline]
    fn as_range(&self) -> Result<Range> {
        Ok(*self)
    }
}

impl Duration {
    /// Converts any [`AsDuration`] value.
    ///
    /// # Errors
    ///
    /// Propagates the conversion's error.
    #[inline]
    pub fn of<T: AsDuration + ?Sized>(value: &T) -> Result<Self> {
        value.as_duration()
    }
}

impl Instant {
    /// Converts any [`AsInstant`] value.
    ///
    /// # Errors
    ///
    /// Propagates the conversion's error.
    #[inline]
    pub fn of<T: AsInstant + ?Sized>(value: &T) -> Result<Self> {
        value.as_instant()
    }
}
