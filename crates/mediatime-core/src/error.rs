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

//! Error type shared by every fallible operation in the crate.
//!
//! All errors are reported synchronously at the call that triggers them.
//! Nothing in this crate performs I/O beyond reading the host clock, so no
//! error is ever retried internally.

use thiserror::Error;

/// The result type used throughout `mediatime`.
pub type Result<T, E = TimeError> = std::result::Result<T, E>;

/// Errors produced by time arithmetic, conversion, parsing and range algebra.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// Text that could not be parsed, or a component outside its legal range
    /// (for example a nanosecond field of one billion or more).
    #[error("malformed input {input:?}: {reason}")]
    MalformedInput {
        /// The offending input, rendered as text.
        input: String,
        /// A short description of what was wrong with it.
        reason: &'static str,
    },

    /// The result of an arithmetic operation or conversion does not fit in the
    /// representable range.
    #[error("arithmetic overflow")]
    Overflow,

    /// Rate-quantized iteration (or a length) was requested on a range with at
    /// least one unbounded end.
    #[error("operation requires a range bounded at both ends")]
    UnboundedRange,

    /// A rate with a zero numerator or zero denominator was supplied.
    #[error("incompatible rate {numerator}/{denominator}")]
    IncompatibleRate {
        /// The numerator that was supplied.
        numerator: u64,
        /// The denominator that was supplied.
        denominator: u64,
    },

    /// A range operation whose preconditions do not hold, such as the strict
    /// union of two ranges that neither overlap nor touch.
    #[error("invalid range operation: {0}")]
    InvalidRangeOperation(String),
}

impl TimeError {
    /// Builds a [`TimeError::MalformedInput`] from anything displayable.
    pub(crate) fn malformed(input: impl std::fmt::Display, reason: &'static str) -> Self {
        TimeError::MalformedInput {
            input: input.to_string(),
            reason,
        }
    }

    /// Builds a [`TimeError::InvalidRangeOperation`].
    pub(crate) fn invalid_range(message: impl Into<String>) -> Self {
        TimeError::InvalidRangeOperation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(TimeError::Overflow.to_string(), "arithmetic overflow");
        assert_eq!(
            TimeError::IncompatibleRate {
                numerator: 25,
                denominator: 0
            }
            .to_string(),
            "incompatible rate 25/0"
        );
        assert_eq!(
            TimeError::malformed("1:x", "nanoseconds are not a number").to_string(),
            "malformed input \"1:x\": nanoseconds are not a number"
        );
        assert_eq!(
            TimeError::invalid_range("not contiguous").to_string(),
            "invalid range operation: not contiguous"
        );
    }

    #[test]
    fn test_errors_compare_by_value() {
        assert_eq!(TimeError::UnboundedRange, TimeError::UnboundedRange);
        assert_ne!(TimeError::UnboundedRange, TimeError::Overflow);
    }
}
