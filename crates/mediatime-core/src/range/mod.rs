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

//! # Ranges of Instants
//!
//! Intervals on the TAI time line whose ends may each be inclusive,
//! exclusive or unbounded.
//!
//! ## Submodules
//!
//! - `bound`: [`Bound`] and [`Inclusivity`], plus the generic span rules
//!   (ordering of starts and ends, emptiness, adjacency, intersection and
//!   hull) shared by every range type in the workspace.
//! - `iter`: [`RateIter`], the double-ended iterator over the grid points of
//!   a bounded range at a given rate.
//! - `text`: The `[start_end)` text form used by `Display` and `FromStr`.
//!
//! [`Range`] itself lives at the top of this module. Its constructors always
//! normalize, so a range that admits no instant is always [`Range::NEVER`]
//! and a range unbounded on both sides is always [`Range::ETERNITY`].

pub mod bound;
pub mod iter;
pub mod text;
mod time_range;

pub use bound::{Bound, Inclusivity};
pub use iter::RateIter;
pub use time_range::{Range, RangeRounding};
