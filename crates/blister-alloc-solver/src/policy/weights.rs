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

use crate::policy::{config::PolicyConfig, err::PolicyConfigError};
use blister_alloc_core::prelude::{ArithmeticError, DecimalContext};
use blister_alloc_model::prelude::{Batch, Order};
use rust_decimal::Decimal;

/// The grade an order is steered towards by the balancing objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferredGrade {
    New,
    Old,
}

impl std::fmt::Display for PreferredGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferredGrade::New => write!(f, "New"),
            PreferredGrade::Old => write!(f, "Old"),
        }
    }
}

/// Everything the model needs to know about one order's place in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderWeights {
    priority: Decimal,
    preferred: PreferredGrade,
    long_time_lower_bound: Decimal,
    short_time_coefficient: Decimal,
    long_time_coefficient: Decimal,
}

impl OrderWeights {
    #[inline]
    pub fn priority(&self) -> Decimal {
        self.priority
    }

    #[inline]
    pub fn preferred(&self) -> PreferredGrade {
        self.preferred
    }

    #[inline]
    pub fn new_weight(&self) -> Decimal {
        match self.preferred {
            PreferredGrade::New => Decimal::ONE,
            PreferredGrade::Old => Decimal::ZERO,
        }
    }

    #[inline]
    pub fn old_weight(&self) -> Decimal {
        match self.preferred {
            PreferredGrade::New => Decimal::ZERO,
            PreferredGrade::Old => Decimal::ONE,
        }
    }

    #[inline]
    pub fn long_time_lower_bound(&self) -> Decimal {
        self.long_time_lower_bound
    }

    #[inline]
    pub fn short_time_coefficient(&self) -> Decimal {
        self.short_time_coefficient
    }

    #[inline]
    pub fn long_time_coefficient(&self) -> Decimal {
        self.long_time_coefficient
    }
}

/// An order of the batch together with its computed weights.
#[derive(Debug, Clone, Copy)]
pub struct WeightedOrder<'a, T: Ord + Copy> {
    position: usize,
    priority_index: usize,
    order: &'a Order<T>,
    weights: OrderWeights,
}

impl<'a, T: Ord + Copy> WeightedOrder<'a, T> {
    /// Position in the caller's input sequence.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Rank after sorting by ordering timestamp, 0 is served first.
    #[inline]
    pub fn priority_index(&self) -> usize {
        self.priority_index
    }

    #[inline]
    pub fn order(&self) -> &'a Order<T> {
        self.order
    }

    #[inline]
    pub fn weights(&self) -> &OrderWeights {
        &self.weights
    }
}

/// Computes per-order priority and grade weights for a batch.
#[derive(Debug, Clone)]
pub struct PriorityPolicy {
    config: PolicyConfig,
    ctx: DecimalContext,
}

impl PriorityPolicy {
    #[inline]
    pub fn new(config: PolicyConfig) -> Result<Self, PolicyConfigError> {
        config.validate()?;
        let ctx = config.decimal_context()?;
        Ok(Self { config, ctx })
    }

    #[inline]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    #[inline]
    pub fn decimal_context(&self) -> &DecimalContext {
        &self.ctx
    }

    /// `base^(-min(index, cap))`.
    #[inline]
    pub fn priority_weight(&self, priority_index: usize) -> Result<Decimal, ArithmeticError> {
        let exponent = u32::try_from(priority_index)
            .unwrap_or(u32::MAX)
            .min(self.config.priority_cap);
        self.ctx.inverse_power(self.config.priority_base, exponent)
    }

    /// Weights of the order at `priority_index` in a batch of `batch_len` orders.
    pub fn weigh_order<T: Ord + Copy>(
        &self,
        order: &Order<T>,
        priority_index: usize,
        batch_len: usize,
    ) -> Result<OrderWeights, ArithmeticError> {
        let (preferred, long_time_lower_bound) = match order.minimum_long_term() {
            Some(minimum) => (PreferredGrade::Old, minimum.as_fraction(&self.ctx)?),
            None => (PreferredGrade::New, Decimal::ZERO),
        };

        let divider = Decimal::from(priority_index as u64 + 1);
        let reversed_divider = Decimal::from(batch_len as u64) + Decimal::ONE - divider;

        let mut weights = OrderWeights {
            priority: self.priority_weight(priority_index)?,
            preferred,
            long_time_lower_bound,
            short_time_coefficient: Decimal::ZERO,
            long_time_coefficient: Decimal::ZERO,
        };

        let short = self.ctx.div(weights.old_weight(), reversed_divider)?;
        weights.short_time_coefficient = self.ctx.mul(short, -divider)?;

        let long = self.ctx.div(weights.new_weight(), divider)?;
        weights.long_time_coefficient = self.ctx.mul(long, reversed_divider)?;

        Ok(weights)
    }

    /// Weighs every order of the batch, returned in priority order.
    pub fn weigh<'a, T: Ord + Copy>(
        &self,
        batch: &'a Batch<T>,
    ) -> Result<Vec<WeightedOrder<'a, T>>, ArithmeticError> {
        let n = batch.len();
        batch
            .iter_by_priority()
            .enumerate()
            .map(|(priority_index, (position, order))| {
                let weights = self.weigh_order(order, priority_index, n)?;
                tracing::trace!(
                    order = %order.id(),
                    priority_index,
                    priority = %weights.priority(),
                    preferred = %weights.preferred(),
                    short = %weights.short_time_coefficient(),
                    long = %weights.long_time_coefficient(),
                    "weighed order"
                );
                Ok(WeightedOrder {
                    position,
                    priority_index,
                    order,
                    weights,
                })
            })
            .collect()
    }
}
