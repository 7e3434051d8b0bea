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

//! Exact `a * b / c` over the naturals.
//!
//! Every conversion between nanoseconds and ticks reduces to this operation.
//! Operands are at most 96 bits wide, so the product can need up to roughly
//! 192 bits. The product is formed in `u128` when it fits and in a `BigUint`
//! otherwise; in both cases the quotient and remainder are exact and rounding
//! is decided on the remainder alone, never on an approximation.

use super::rounding::MagnitudeRounding;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::ToPrimitive;
use tracing::debug;

/// Computes `a * b / c`, rounding the quotient as requested.
///
/// Returns `None` if `c` is zero or if the rounded quotient does not fit in a `u128`.
pub(crate) fn mul_div(a: u128, b: u128, c: u128, rounding: MagnitudeRounding) -> Option<u128> {
    if c == 0 {
        return None;
    }

    let (quotient, remainder) = match a.checked_mul(b) {
        Some(product) => product.div_rem(&c),
        None => {
            debug!(a, b, c, "mul_div exceeds 128 bits, using arbitrary precision");
            let product = BigUint::from(a) * BigUint::from(b);
            let (q, r) = product.div_rem(&BigUint::from(c));
            (q.to_u128()?, r.to_u128()?)
        }
    };

    round_quotient(quotient, remainder, c, rounding)
}

#[inline]
fn round_quotient(
    quotient: u128,
    remainder: u128,
    divisor: u128,
    rounding: MagnitudeRounding,
) -> Option<u128> {
    let bump = match rounding {
        MagnitudeRounding::Floor => false,
        MagnitudeRounding::Ceil => remainder != 0,
        // remainder >= divisor / 2, without overflowing 2 * remainder
        MagnitudeRounding::HalfUp => remainder >= divisor - remainder,
    };
    if bump {
        quotient.checked_add(1)
    } else {
        Some(quotient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MagnitudeRounding::*;

    #[test]
    fn test_mul_div_small_operands() {
        assert_eq!(mul_div(10, 3, 4, Floor), Some(7));
        assert_eq!(mul_div(10, 3, 4, Ceil), Some(8));
        assert_eq!(mul_div(10, 3, 4, HalfUp), Some(8));
        assert_eq!(mul_div(9, 1, 4, HalfUp), Some(2));
        assert_eq!(mul_div(11, 1, 4, HalfUp), Some(3));
        assert_eq!(mul_div(12, 1, 4, Ceil), Some(3));
    }

    #[test]
    fn test_mul_div_zero_divisor() {
        assert_eq!(mul_div(1, 1, 0, Floor), None);
    }

    #[test]
    fn test_mul_div_wide_product_matches_exact_value() {
        // (2^100 + 7) * 2^64 / 2^64 == 2^100 + 7, but the product needs 165 bits.
        let a = (1u128 << 100) + 7;
        let b = 1u128 << 64;
        assert_eq!(mul_div(a, b, b, Floor), Some(a));
        assert_eq!(mul_div(a, b + 1, b, Floor), Some(a + (a >> 64)));
    }

    #[test]
    fn test_mul_div_wide_product_rounds_on_remainder() {
        let a = u128::MAX / 3;
        // a * 3 / 2 overflows u128 in the product and in the quotient.
        assert_eq!(mul_div(a, 3, 2, Floor), None);
        // a * 6 / 6 is exact even though a * 6 overflows.
        assert_eq!(mul_div(a, 6, 6, Ceil), Some(a));
        assert_eq!(mul_div(a, 5, 7, Floor), Some((BigUint::from(a) * 5u32 / 7u32).to_u128().unwrap()));
    }

    #[test]
    fn test_mul_div_ceil_overflow_is_reported() {
        assert_eq!(mul_div(u128::MAX, 1, 1, Ceil), Some(u128::MAX));
        assert_eq!(mul_div(u128::MAX, 2, 2, Floor), Some(u128::MAX));
    }
}
