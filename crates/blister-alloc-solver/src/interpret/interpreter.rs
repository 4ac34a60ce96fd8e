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
    backend::traits::MilpSolution,
    interpret::err::{InterpretationError, MissingValueError, NonFiniteValueError},
    model::{AllocationModel, builder::ModelledOrder, milp::VariableId},
};
use blister_alloc_model::prelude::{Allocation, Fulfillment};
use num_traits::ToPrimitive;

/// Turns solved variable values into per-order fulfillments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultInterpreter;

impl ResultInterpreter {
    /// Values at or above this are read as an enabled order.
    pub const ENABLED_THRESHOLD: f64 = 0.5;

    /// Reads one fulfillment per modelled order, in the caller's input order.
    pub fn interpret<S>(
        model: &AllocationModel,
        solution: &S,
    ) -> Result<Allocation, InterpretationError>
    where
        S: MilpSolution + ?Sized,
    {
        let mut orders: Vec<&ModelledOrder> = model.orders().iter().collect();
        orders.sort_by_key(|o| o.position());

        let mut allocation = Allocation::with_capacity(orders.len());
        for o in orders {
            allocation.insert(Self::fulfill(o, solution)?);
        }
        Ok(allocation)
    }

    pub fn fulfill<S>(order: &ModelledOrder, solution: &S) -> Result<Fulfillment, InterpretationError>
    where
        S: MilpSolution + ?Sized,
    {
        let vars = order.variables();
        let enabled = read(order, vars.enabled, solution)?;
        let long_time = read(order, vars.long_time, solution)?;

        if enabled < Self::ENABLED_THRESHOLD {
            return Ok(Fulfillment::disabled(order.id()));
        }

        let fraction = long_time.clamp(0.0, 1.0);
        let requested = order.requested();
        let scaled = (requested as f64 * fraction).round();
        let new_amount = scaled
            .to_i64()
            .ok_or(NonFiniteValueError::new(order.id(), vars.long_time, scaled))?
            .clamp(0, requested);

        Ok(Fulfillment::enabled(
            order.id(),
            fraction,
            new_amount,
            requested - new_amount,
        ))
    }
}

#[inline]
fn read<S>(order: &ModelledOrder, variable: VariableId, solution: &S) -> Result<f64, InterpretationError>
where
    S: MilpSolution + ?Sized,
{
    let value = solution
        .value(variable)
        .ok_or(MissingValueError::new(order.id(), variable))?;
    if !value.is_finite() {
        return Err(NonFiniteValueError::new(order.id(), variable, value))?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::traits::SolveStatus,
        model::AllocationModelBuilder,
        policy::{PolicyConfig, PriorityPolicy},
    };
    use blister_alloc_model::prelude::{Batch, Order, OrderIdentifier};
    use std::collections::HashMap;

    struct FixedSolution(HashMap<VariableId, f64>);

    impl MilpSolution for FixedSolution {
        fn status(&self) -> SolveStatus {
            SolveStatus::Optimal
        }

        fn value(&self, variable: VariableId) -> Option<f64> {
            self.0.get(&variable).copied()
        }
    }

    #[inline]
    fn oid(n: u64) -> OrderIdentifier {
        OrderIdentifier::new(n)
    }

    fn model(orders: &[(u64, i64, i64)]) -> AllocationModel {
        let orders = orders
            .iter()
            .map(|&(id, r, at)| Order::new(oid(id), r, at, None).expect("valid order"))
            .collect();
        let batch = Batch::from_quantities(100, 100, orders).expect("valid batch");
        let policy = PriorityPolicy::new(PolicyConfig::default()).expect("policy");
        AllocationModelBuilder::new(&policy)
            .build(&batch)
            .expect("model")
    }

    fn solution(model: &AllocationModel, values: &[(u64, f64, f64)]) -> FixedSolution {
        let mut map = HashMap::new();
        for &(id, enabled, long_time) in values {
            let o = model
                .orders()
                .iter()
                .find(|o| o.id() == oid(id))
                .expect("modelled order");
            map.insert(o.variables().enabled, enabled);
            map.insert(o.variables().long_time, long_time);
            map.insert(o.variables().old_deduction, 0.0);
        }
        FixedSolution(map)
    }

    #[test]
    fn test_enabled_order_is_split_by_fraction() {
        let m = model(&[(1, 15, 0)]);
        let a = ResultInterpreter::interpret(&m, &solution(&m, &[(1, 1.0, 0.6)]))
            .expect("interpretable");
        let f = a.get(oid(1)).expect("fulfillment");
        assert!(f.is_enabled());
        assert_eq!(f.new_amount(), 9);
        assert_eq!(f.old_amount(), 6);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        let m = model(&[(1, 5, 0), (2, 3, 1)]);
        let a = ResultInterpreter::interpret(&m, &solution(&m, &[(1, 1.0, 0.5), (2, 1.0, 0.5)]))
            .expect("interpretable");
        // 2.5 -> 3, 1.5 -> 2
        assert_eq!(a.get(oid(1)).map(|f| f.new_amount()), Some(3));
        assert_eq!(a.get(oid(2)).map(|f| f.new_amount()), Some(2));
        assert_eq!(a.get(oid(2)).map(|f| f.old_amount()), Some(1));
    }

    #[test]
    fn test_disabled_order_is_zeroed_despite_residual_long_time() {
        let m = model(&[(1, 10, 0)]);
        let a = ResultInterpreter::interpret(&m, &solution(&m, &[(1, 0.2, 0.7)]))
            .expect("interpretable");
        assert_eq!(a.get(oid(1)), Some(&Fulfillment::disabled(oid(1))));
    }

    #[test]
    fn test_near_integral_enabled_values_are_rounded() {
        let m = model(&[(1, 10, 0)]);
        let a = ResultInterpreter::interpret(&m, &solution(&m, &[(1, 0.999_999_9, 1.000_000_2)]))
            .expect("interpretable");
        let f = a.get(oid(1)).expect("fulfillment");
        assert!(f.is_enabled());
        assert_eq!(f.long_time_fraction(), 1.0);
        assert_eq!(f.new_amount(), 10);
        assert_eq!(f.old_amount(), 0);
    }

    #[test]
    fn test_negative_long_time_is_clamped() {
        let m = model(&[(1, 10, 0)]);
        let a = ResultInterpreter::interpret(&m, &solution(&m, &[(1, 1.0, -1e-9)]))
            .expect("interpretable");
        let f = a.get(oid(1)).expect("fulfillment");
        assert_eq!(f.new_amount(), 0);
        assert_eq!(f.old_amount(), 10);
    }

    #[test]
    fn test_output_follows_input_order() {
        let m = model(&[(1, 5, 30), (2, 5, 10), (3, 5, 20)]);
        let a = ResultInterpreter::interpret(
            &m,
            &solution(&m, &[(1, 1.0, 1.0), (2, 1.0, 1.0), (3, 0.0, 0.0)]),
        )
        .expect("interpretable");
        let ids: Vec<u64> = a.iter().map(|f| *f.order_id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let m = model(&[(1, 10, 0)]);
        let err = ResultInterpreter::interpret(&m, &solution(&m, &[(1, 1.0, f64::NAN)]))
            .expect_err("nan");
        match err {
            InterpretationError::NonFiniteValue(e) => assert_eq!(e.order(), oid(1)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_value_is_rejected() {
        let m = model(&[(1, 10, 0)]);
        let err = ResultInterpreter::interpret(&m, &FixedSolution(HashMap::new()))
            .expect_err("missing");
        assert!(matches!(err, InterpretationError::MissingValue(_)));
    }
}
