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

use crate::policy::err::{
    BigMTooSmallError, InvalidPriorityBaseError, NonPositiveWeightError, PolicyConfigError,
    PriorityDecayError,
};
use blister_alloc_core::prelude::DecimalContext;
use rust_decimal::Decimal;

/// How the Big-M constant of the old-deduction linearization is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BigM {
    /// `max(1, largest requested quantity)` of the batch.
    #[default]
    LargestOrder,
    /// A fixed constant. Must dominate every request of the batch.
    Fixed(i64),
}

impl BigM {
    pub const LEGACY: BigM = BigM::Fixed(1_000_000);

    #[inline]
    pub fn resolve(&self, largest_request: i64) -> Result<i64, BigMTooSmallError> {
        match *self {
            BigM::LargestOrder => Ok(largest_request.max(1)),
            BigM::Fixed(m) if m < largest_request || m < 0 => {
                Err(BigMTooSmallError::new(m, largest_request.max(0)))
            }
            BigM::Fixed(m) => Ok(m),
        }
    }
}

impl std::fmt::Display for BigM {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BigM::LargestOrder => write!(f, "largest-order"),
            BigM::Fixed(m) => write!(f, "{}", m),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    /// Objective weight of the fulfilled-order term.
    pub fulfillment_weight: Decimal,
    /// Objective weight of the old-grade balancing term.
    pub short_time_weight: Decimal,
    /// Objective weight of the new-grade balancing term.
    pub long_time_weight: Decimal,
    /// Base of the priority decay `base^(-min(i, cap))`.
    pub priority_base: u32,
    /// Priority index after which the weight stops decaying.
    pub priority_cap: u32,
    /// Fractional digits kept by every coefficient division.
    pub division_scale: u32,
    pub big_m: BigM,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            fulfillment_weight: Decimal::from(10_000),
            short_time_weight: Decimal::ONE,
            long_time_weight: Decimal::ONE,
            priority_base: 2,
            priority_cap: 6,
            division_scale: DecimalContext::DEFAULT_SCALE,
            big_m: BigM::LargestOrder,
        }
    }
}

impl PolicyConfig {
    #[inline]
    pub fn with_fulfillment_weight(mut self, weight: Decimal) -> Self {
        self.fulfillment_weight = weight;
        self
    }

    #[inline]
    pub fn with_short_time_weight(mut self, weight: Decimal) -> Self {
        self.short_time_weight = weight;
        self
    }

    #[inline]
    pub fn with_long_time_weight(mut self, weight: Decimal) -> Self {
        self.long_time_weight = weight;
        self
    }

    #[inline]
    pub fn with_priority_base(mut self, base: u32) -> Self {
        self.priority_base = base;
        self
    }

    #[inline]
    pub fn with_priority_cap(mut self, cap: u32) -> Self {
        self.priority_cap = cap;
        self
    }

    #[inline]
    pub fn with_division_scale(mut self, scale: u32) -> Self {
        self.division_scale = scale;
        self
    }

    #[inline]
    pub fn with_big_m(mut self, big_m: BigM) -> Self {
        self.big_m = big_m;
        self
    }

    #[inline]
    pub fn decimal_context(&self) -> Result<DecimalContext, PolicyConfigError> {
        Ok(DecimalContext::new(self.division_scale)?)
    }

    pub fn validate(&self) -> Result<(), PolicyConfigError> {
        if self.priority_base < 2 {
            return Err(InvalidPriorityBaseError::new(self.priority_base))?;
        }
        self.validate_priority_decay(&self.decimal_context()?)?;

        for (name, value) in [
            ("fulfillment", self.fulfillment_weight),
            ("short_time", self.short_time_weight),
            ("long_time", self.long_time_weight),
        ] {
            if value <= Decimal::ZERO {
                return Err(NonPositiveWeightError::new(name, value))?;
            }
        }

        // Batch-independent part of the Big-M check.
        self.big_m.resolve(0)?;
        Ok(())
    }

    /// Every weight `base^-i`, `i <= cap`, must be representable, non-zero
    /// and strictly below its predecessor after rounding.
    fn validate_priority_decay(&self, ctx: &DecimalContext) -> Result<(), PriorityDecayError> {
        let err = || {
            PriorityDecayError::new(self.priority_base, self.priority_cap, ctx.scale())
        };
        let mut previous: Option<Decimal> = None;
        for i in 0..=self.priority_cap {
            let w = ctx
                .inverse_power(self.priority_base, i)
                .map_err(|_| err())?;
            if w <= Decimal::ZERO || previous.is_some_and(|p| w >= p) {
                return Err(err());
            }
            previous = Some(w);
        }
        Ok(())
    }
}
