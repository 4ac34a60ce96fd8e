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

use crate::{
    model::{
        err::ModelBuildError,
        milp::{LinearExpression, MilpModel, VariableDefinition, VariableId},
    },
    policy::{OrderWeights, PriorityPolicy},
};
use blister_alloc_core::prelude::DecimalContext;
use blister_alloc_model::prelude::{Batch, OrderIdentifier};
use rust_decimal::Decimal;

pub const NEW_STOCK_CAPACITY: &str = "new_stock_capacity";
pub const OLD_STOCK_CAPACITY: &str = "old_stock_capacity";
pub const OBJECTIVE_ENABLED: &str = "objective_enabled";
pub const OBJECTIVE_SHORT_TIME: &str = "objective_short_time";
pub const OBJECTIVE_LONG_TIME: &str = "objective_long_time";

/// Decision variables of a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderVariables {
    /// Binary, 1 when the order is served in full.
    pub enabled: VariableId,
    /// Continuous share of the request served from new stock.
    pub long_time: VariableId,
    /// Integer number of old units deducted.
    pub old_deduction: VariableId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelledOrder {
    id: OrderIdentifier,
    requested: i64,
    position: usize,
    priority_index: usize,
    variables: OrderVariables,
    weights: OrderWeights,
}

impl ModelledOrder {
    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        self.id
    }

    #[inline]
    pub fn requested(&self) -> i64 {
        self.requested
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn priority_index(&self) -> usize {
        self.priority_index
    }

    #[inline]
    pub fn variables(&self) -> &OrderVariables {
        &self.variables
    }

    #[inline]
    pub fn weights(&self) -> &OrderWeights {
        &self.weights
    }
}

/// The MILP of one batch plus the handles needed to read a solution back.
#[derive(Debug, Clone)]
pub struct AllocationModel {
    model: MilpModel,
    orders: Vec<ModelledOrder>,
    big_m: i64,
}

impl AllocationModel {
    #[inline]
    pub fn model(&self) -> &MilpModel {
        &self.model
    }

    /// Modelled orders in priority order.
    #[inline]
    pub fn orders(&self) -> &[ModelledOrder] {
        &self.orders
    }

    #[inline]
    pub fn big_m(&self) -> i64 {
        self.big_m
    }
}

/// Emits the allocation MILP of a batch.
///
/// Per order `i` with request `R`:
///
/// ```text
/// lb_i - 1 <= longtime_i - enabled_i <= 0
/// old_deduction_i - M·enabled_i            <= 0
/// old_deduction_i + R·longtime_i           <= R
/// old_deduction_i + R·longtime_i - M·enabled_i >= R - M
/// ```
///
/// so that `old_deduction_i = R·(1 - longtime_i)` when enabled and `0`
/// otherwise. Capacity rows bound `Σ R·longtime` by the new stock and
/// `Σ old_deduction` by the old stock.
#[derive(Debug, Clone, Copy)]
pub struct AllocationModelBuilder<'p> {
    policy: &'p PriorityPolicy,
}

impl<'p> AllocationModelBuilder<'p> {
    #[inline]
    pub fn new(policy: &'p PriorityPolicy) -> Self {
        Self { policy }
    }

    pub fn build<T: Ord + Copy>(&self, batch: &Batch<T>) -> Result<AllocationModel, ModelBuildError> {
        let ctx = self.policy.decimal_context();
        let config = self.policy.config();
        let big_m = config.big_m.resolve(batch.largest_request())?;
        let m = big_m as f64;

        let weighed = self.policy.weigh(batch)?;
        let n = weighed.len();

        let mut model = MilpModel::with_capacities(3 * n, 4 * n + 5);
        let mut new_capacity = LinearExpression::new(NEW_STOCK_CAPACITY)
            .with_upper(batch.new_stock().quantity() as f64);
        let mut old_capacity = LinearExpression::new(OLD_STOCK_CAPACITY)
            .with_upper(batch.old_stock().quantity() as f64);
        let mut objective_enabled = LinearExpression::new(OBJECTIVE_ENABLED)
            .with_weight(ctx.to_f64(config.fulfillment_weight)?);
        let mut objective_short = LinearExpression::new(OBJECTIVE_SHORT_TIME)
            .with_weight(ctx.to_f64(config.short_time_weight)?);
        let mut objective_long = LinearExpression::new(OBJECTIVE_LONG_TIME)
            .with_weight(ctx.to_f64(config.long_time_weight)?);

        let mut orders = Vec::with_capacity(n);
        for w in &weighed {
            let i = w.priority_index();
            let requested = w.order().requested();
            let r = requested as f64;
            let weights = *w.weights();

            let enabled = model.add_variable(VariableDefinition::binary(format!("enabled_{i}")))?;
            let long_time = model.add_variable(
                VariableDefinition::continuous(format!("longtime_{i}")).with_lower(0.0),
            )?;
            let old_deduction = model.add_variable(
                VariableDefinition::integer(format!("old_deduction_{i}")).with_lower(0.0),
            )?;

            let lower_bound = ctx.to_f64(weights.long_time_lower_bound())?;
            model.add_expression(
                LinearExpression::new(format!("enabled_longtime_{i}"))
                    .with_term(long_time, 1.0)
                    .with_term(enabled, -1.0)
                    .with_lower(lower_bound - 1.0)
                    .with_upper(0.0),
            )?;
            model.add_expression(
                LinearExpression::new(format!("old_deduction_enabled_{i}"))
                    .with_term(old_deduction, 1.0)
                    .with_term(enabled, -m)
                    .with_upper(0.0),
            )?;
            model.add_expression(
                LinearExpression::new(format!("old_deduction_upper_{i}"))
                    .with_term(old_deduction, 1.0)
                    .with_term(long_time, r)
                    .with_upper(r),
            )?;
            model.add_expression(
                LinearExpression::new(format!("old_deduction_lower_{i}"))
                    .with_term(old_deduction, 1.0)
                    .with_term(long_time, r)
                    .with_term(enabled, -m)
                    .with_lower(r - m),
            )?;

            if requested != 0 {
                new_capacity.add_term(long_time, r);
            }
            old_capacity.add_term(old_deduction, 1.0);

            add_nonzero(&mut objective_enabled, enabled, weights.priority(), ctx)?;
            add_nonzero(
                &mut objective_short,
                long_time,
                weights.short_time_coefficient(),
                ctx,
            )?;
            add_nonzero(
                &mut objective_long,
                long_time,
                weights.long_time_coefficient(),
                ctx,
            )?;

            orders.push(ModelledOrder {
                id: w.order().id(),
                requested,
                position: w.position(),
                priority_index: i,
                variables: OrderVariables {
                    enabled,
                    long_time,
                    old_deduction,
                },
                weights,
            });
        }

        model.add_expression(new_capacity)?;
        model.add_expression(old_capacity)?;
        model.add_expression(objective_enabled)?;
        model.add_expression(objective_short)?;
        model.add_expression(objective_long)?;

        tracing::debug!(
            orders = n,
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            big_m,
            "built allocation model"
        );

        Ok(AllocationModel {
            model,
            orders,
            big_m,
        })
    }
}

#[inline]
fn add_nonzero(
    expression: &mut LinearExpression,
    variable: VariableId,
    coefficient: Decimal,
    ctx: &DecimalContext,
) -> Result<(), ModelBuildError> {
    if !coefficient.is_zero() {
        expression.add_term(variable, ctx.to_f64(coefficient)?);
    }
    Ok(())
}
