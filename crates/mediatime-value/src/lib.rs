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

//! # Mediatime Value
//!
//! Representation-agnostic time values built on `mediatime-core`.
//!
//! ## Modules
//!
//! - `value`: [`TimeValue`], a tagged union holding either an `Instant` or a
//!   tick count at a `RationalRate`, compared and hashed by exact value and
//!   projected to either representation on demand.
//! - `value_range`: [`TimeValueRange`], a range over `TimeValue` bounds with
//!   the same normalization rules as `Range`. When tied to a rate it is kept
//!   half-open on the tick grid and can be iterated tick by tick, in either
//!   direction and without end when the far side is unbounded. Combining
//!   ranges at different rates never loses a shared value: a result whose
//!   bounds fall between ticks is returned without a rate.
//!
//! With the `serde` feature both types serialize as their canonical strings,
//! for example `"50@25"` and `"[0_10)@25"`.
//!
//! ## Example
//!
//! ```rust
//! # use mediatime_core::num::RationalRate;
//! # use mediatime_value::{TimeValue, TimeValueRange};
//! let rate = RationalRate::new(25, 1).unwrap();
//! let clip: TimeValueRange = "[0:0_2:0)".parse().unwrap();
//! let frames = clip.with_rate(rate).unwrap();
//! assert_eq!(frames.to_string(), "[0_50)@25");
//! assert_eq!(frames.iter().unwrap().last(), Some(TimeValue::from_count(49, rate)));
//! ```

pub mod value;
pub mod value_range;

#[cfg(feature = "serde")]
mod serde_impl;

pub use value::TimeValue;
pub use value_range::{Subranges, TimeValueIter, TimeValueRange};
