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

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Error returned when a [`DecimalContext`] is requested with a scale
/// outside of [`DecimalContext::MIN_SCALE`]..=[`DecimalContext::MAX_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error(
    "Invalid decimal scale {scale}. Allowed range is {}..={}.",
    DecimalContext::MIN_SCALE,
    DecimalContext::MAX_SCALE
)]
pub struct InvalidScaleError {
    scale: u32,
}

impl InvalidScaleError {
    #[inline]
    pub fn new(scale: u32) -> Self {
        Self { scale }
    }

    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Decimal overflow")]
    Overflow,
    #[error("Decimal value {0} cannot be represented as f64")]
    NotRepresentable(Decimal),
}

/// Fixed-point arithmetic at an explicit number of fractional digits.
///
/// Every quotient and product is rounded to `scale` digits with
/// round-half-up (`MidpointAwayFromZero`), so the same inputs always yield
/// the same coefficients regardless of platform float behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalContext {
    scale: u32,
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            scale: Self::DEFAULT_SCALE,
        }
    }
}

impl DecimalContext {
    pub const MIN_SCALE: u32 = 4;
    pub const MAX_SCALE: u32 = 28;
    pub const DEFAULT_SCALE: u32 = 16;

    #[inline]
    pub fn new(scale: u32) -> Result<Self, InvalidScaleError> {
        if !(Self::MIN_SCALE..=Self::MAX_SCALE).contains(&scale) {
            return Err(InvalidScaleError::new(scale));
        }
        Ok(Self { scale })
    }

    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[inline]
    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero)
    }

    #[inline]
    pub fn div(&self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        lhs.checked_div(rhs)
            .map(|q| self.round(q))
            .ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    pub fn mul(&self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ArithmeticError> {
        lhs.checked_mul(rhs)
            .map(|p| self.round(p))
            .ok_or(ArithmeticError::Overflow)
    }

    /// Computes `base^(-exponent)` rounded to the context scale.
    pub fn inverse_power(&self, base: u32, exponent: u32) -> Result<Decimal, ArithmeticError> {
        let base = Decimal::from(base);
        let mut denominator = Decimal::ONE;
        for _ in 0..exponent {
            denominator = denominator
                .checked_mul(base)
                .ok_or(ArithmeticError::Overflow)?;
        }
        self.div(Decimal::ONE, denominator)
    }

    #[inline]
    pub fn to_f64(&self, value: Decimal) -> Result<f64, ArithmeticError> {
        value
            .to_f64()
            .filter(|v| v.is_finite())
            .ok_or(ArithmeticError::NotRepresentable(value))
    }
}
