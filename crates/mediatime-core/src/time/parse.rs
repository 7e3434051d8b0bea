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

//! Text parsing shared by [`Duration`](super::Duration) and [`Instant`](super::Instant).
//!
//! Accepted forms, each with an optional leading `+` or `-`:
//!
//! - `<seconds>:<nanoseconds>`: the canonical form. The nanosecond field is an
//!   integer below one billion and need not be zero-padded.
//! - `<seconds>.<fraction>`: the legacy decimal form. The fraction is right-padded
//!   with zeros, or truncated, to nine digits.
//! - `<seconds>`: whole seconds.

use crate::error::{Result, TimeError};
use crate::num::constants::{NANOS_DIGITS, NANOS_PER_SECOND};

/// A parsed `(negative, seconds, nanoseconds)` triple, not yet canonicalized.
pub(crate) type Parts = (bool, u64, u32);

pub(crate) fn parse_parts(input: &str) -> Result<Parts> {
    let s = input.trim();
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    if let Some((secs, nanos)) = body.split_once(':') {
        let seconds = parse_digits(input, secs, SECONDS_OVERFLOW)?;
        let nanos = parse_digits(input, nanos, NANOS_OVERFLOW)?;
        if nanos >= NANOS_PER_SECOND {
            return Err(TimeError::malformed(input, NANOS_OVERFLOW));
        }
        return Ok((negative, seconds, nanos as u32));
    }

    if let Some((secs, fraction)) = body.split_once('.') {
        let seconds = parse_digits(input, secs, SECONDS_OVERFLOW)?;
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::malformed(input, "fraction must be decimal digits"));
        }
        let nanos = fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(NANOS_DIGITS)
            .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));
        return Ok((negative, seconds, nanos));
    }

    Ok((negative, parse_digits(input, body, SECONDS_OVERFLOW)?, 0))
}

const SECONDS_OVERFLOW: &str = "seconds do not fit in 64 bits";
const NANOS_OVERFLOW: &str = "nanoseconds must be below one billion";

/// Parses a field of decimal digits, reporting `overflow` if it exceeds a `u64`.
fn parse_digits(input: &str, digits: &str, overflow: &'static str) -> Result<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::malformed(input, "expected decimal digits"));
    }
    digits
        .parse::<u64>()
        .map_err(|_| TimeError::malformed(input, overflow))
}
