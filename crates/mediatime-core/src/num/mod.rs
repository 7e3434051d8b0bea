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

//! # Numeric Foundations
//!
//! Exact integer machinery behind every time conversion.
//!
//! ## Submodules
//!
//! - `constants`: Unit conversion constants (`NANOS_PER_SECOND`, ...) and the
//!   default TAI-UTC offset.
//! - `rate`: `RationalRate`, a positive rational number of ticks per second
//!   compared and hashed by value.
//! - `rounding`: `Rounding`, the policy applied when an exact rational result
//!   is turned into an integer.
//!
//! No floating-point value is used anywhere in the conversion path. Products
//! that do not fit in 128 bits are evaluated with arbitrary-precision integers.

pub mod constants;
pub mod rate;
pub mod rounding;
pub(crate) mod wide;

pub use rate::RationalRate;
pub use rounding::Rounding;
