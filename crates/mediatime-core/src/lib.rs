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

//! # Mediatime Core
//!
//! Exact, integer-only timing primitives for media pipelines. Timestamps are
//! kept to the nanosecond on the TAI time scale, and conversions between
//! timestamps and frame or sample counts are carried out in exact rational
//! arithmetic with an explicit rounding policy, so no error ever accumulates
//! over long streams.
//!
//! ## Modules
//!
//! - `time`: `Duration`, a signed `(seconds, nanoseconds)` span, and
//!   `Instant`, a point on the TAI time line. Both convert to and from tick
//!   counts at any `RationalRate`, quantize onto a rate grid and expose their
//!   phase relative to it.
//! - `num`: `RationalRate`, `Rounding` and the unit constants. Products that
//!   overflow 128 bits fall back to arbitrary-precision integers.
//! - `range`: `Range`, an interval of instants with inclusive, exclusive or
//!   unbounded ends; set algebra (intersection, hull, difference, split,
//!   merge, complement), relations (`meets`, `before`, `overlaps`, ...),
//!   quantization and iteration at a rate (`RateIter`).
//! - `clock`: The `Clock` trait, a system clock configured with a TAI-UTC
//!   offset, and a fixed clock for tests.
//! - `convert`: `AsDuration`, `AsInstant` and `AsRange`, the capabilities
//!   through which foreign types reach the constructors in this crate.
//! - `error`: `TimeError` and the crate-wide `Result` alias.
//!
//! With the `serde` feature, `Duration`, `Instant`, `RationalRate` and `Range`
//! serialize as their canonical strings.
//!
//! ## Example
//!
//! ```rust
//! # use mediatime_core::num::{RationalRate, Rounding};
//! # use mediatime_core::range::Range;
//! # use mediatime_core::time::Instant;
//! let ntsc = RationalRate::new(30000, 1001).unwrap();
//! let t: Instant = "1001:0".parse().unwrap();
//! assert_eq!(t.to_count(ntsc, Rounding::Nearest).unwrap(), 30000);
//!
//! let second: Range = "[0:0_1:0)".parse().unwrap();
//! assert_eq!(second.at_rate(RationalRate::new(25, 1).unwrap()).unwrap().len(), 25);
//! ```

pub mod clock;
pub mod convert;
pub mod error;
pub mod num;
pub mod range;
pub mod time;

#[cfg(feature = "serde")]
mod serde_impl;

pub use error::{Result, TimeError};
