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

use crate::math::decimal::{ArithmeticError, DecimalContext};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Percentage {value} is out of range. Allowed range is 0..=100.")]
pub struct PercentageOutOfRangeError {
    value: i64,
}

impl PercentageOutOfRangeError {
    #[inline]
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }
}

/// A whole-number percentage in `0..=100`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const FULL: Percentage = Percentage(100);

    #[inline]
    pub fn new(value: i64) -> Result<Self, PercentageOutOfRangeError> {
        if !(0..=100).contains(&value) {
            return Err(PercentageOutOfRangeError::new(value));
        }
        Ok(Self(value as u8))
    }

    #[inline]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The percentage as a fraction in `[0, 1]`, rounded to the context scale.
    #[inline]
    pub fn as_fraction(&self, ctx: &DecimalContext) -> Result<Decimal, ArithmeticError> {
        ctx.div(Decimal::from(self.0), Decimal::ONE_HUNDRED)
    }
}

impl TryFrom<i64> for Percentage {
    type Error = PercentageOutOfRangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Percentage::new(value)
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
