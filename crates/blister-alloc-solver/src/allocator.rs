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
    backend::{GoodLpSolver, MilpSolution, MilpSolver, SolverConfig},
    err::AllocationError,
    interpret::ResultInterpreter,
    model::AllocationModelBuilder,
    policy::{PolicyConfig, PriorityPolicy},
};
use blister_alloc_model::prelude::{Allocation, AllocationValidator, Batch};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

#[derive(Debug, Clone, PartialEq)]
pub struct AllocatorConfig {
    pub policy: PolicyConfig,
    pub solver: SolverConfig,
    /// Run [`AllocationValidator`] on every interpreted allocation.
    pub validate: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            solver: SolverConfig::default(),
            validate: true,
        }
    }
}

impl AllocatorConfig {
    #[inline]
    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    #[inline]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

/// Allocates batches of orders against new and old stock.
///
/// Each batch is modelled, solved and interpreted on its own; nothing is
/// shared between batches except the read-only policy and solver.
#[derive(Debug, Clone)]
pub struct Allocator<S = GoodLpSolver> {
    policy: PriorityPolicy,
    solver: S,
    validate: bool,
}

impl Allocator<GoodLpSolver> {
    #[inline]
    pub fn new(config: AllocatorConfig) -> Result<Self, AllocationError> {
        let solver = GoodLpSolver::new(config.solver.clone());
        Self::with_solver(config, solver)
    }
}

impl<S: MilpSolver> Allocator<S> {
    #[inline]
    pub fn with_solver(config: AllocatorConfig, solver: S) -> Result<Self, AllocationError> {
        Ok(Self {
            policy: PriorityPolicy::new(config.policy)?,
            solver,
            validate: config.validate,
        })
    }

    #[inline]
    pub fn policy(&self) -> &PriorityPolicy {
        &self.policy
    }

    #[inline]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            orders = batch.len(),
            new_stock = batch.new_stock().quantity(),
            old_stock = batch.old_stock().quantity(),
        )
    )]
    pub fn allocate<T: Ord + Copy>(&self, batch: &Batch<T>) -> Result<Allocation, AllocationError> {
        if batch.is_empty() {
            return Ok(Allocation::new());
        }

        let model = AllocationModelBuilder::new(&self.policy).build(batch)?;
        let solution = self.solver.maximise(model.model())?;

        let status = solution.status();
        if !status.is_optimal() {
            return Err(AllocationError::NonOptimal(status));
        }

        let allocation = ResultInterpreter::interpret(&model, &solution)?;
        if self.validate {
            AllocationValidator::validate(batch, &allocation)?;
        }

        tracing::debug!(
            enabled = allocation.enabled_count(),
            new_used = allocation.total_new(),
            old_used = allocation.total_old(),
            "allocated batch"
        );
        Ok(allocation)
    }

    /// Allocates each batch in turn. A failing batch does not affect the others.
    pub fn allocate_all<'a, T, I>(&self, batches: I) -> Vec<Result<Allocation, AllocationError>>
    where
        T: Ord + Copy + 'a,
        I: IntoIterator<Item = &'a Batch<T>>,
    {
        batches
            .into_iter()
            .enumerate()
            .map(|(index, batch)| self.allocate_logged(index, batch))
            .collect()
    }

    /// Like [`Allocator::allocate_all`], solving batches on the rayon pool.
    pub fn par_allocate_all<T>(&self, batches: &[Batch<T>]) -> Vec<Result<Allocation, AllocationError>>
    where
        T: Ord + Copy + Sync,
        S: Sync,
    {
        let indexed: Vec<(usize, &Batch<T>)> = batches.iter().enumerate().collect();
        indexed
            .par_iter()
            .map(|&(index, batch)| self.allocate_logged(index, batch))
            .collect()
    }

    fn allocate_logged<T: Ord + Copy>(
        &self,
        index: usize,
        batch: &Batch<T>,
    ) -> Result<Allocation, AllocationError> {
        let result = self.allocate(batch);
        if let Err(e) = &result {
            tracing::warn!(batch = index, error = %e, "batch allocation failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::{SolveStatus, SolverError},
        model::{MilpModel, VariableId},
        policy::{BigM, PolicyConfigError},
    };
    use blister_alloc_model::prelude::{Order, OrderIdentifier};
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Clone)]
    struct MockSolution {
        status: SolveStatus,
        values: HashMap<VariableId, f64>,
    }

    impl MilpSolution for MockSolution {
        fn status(&self) -> SolveStatus {
            self.status
        }

        fn value(&self, variable: VariableId) -> Option<f64> {
            self.values.get(&variable).copied()
        }
    }

    /// Solver driven by a closure over the model, counting invocations.
    struct FnSolver<F> {
        f: F,
        calls: AtomicUsize,
    }

    impl<F> FnSolver<F>
    where
        F: Fn(&MilpModel) -> Result<MockSolution, SolverError>,
    {
        fn new(f: F) -> Self {
            Self {
                f,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl<F> MilpSolver for FnSolver<F>
    where
        F: Fn(&MilpModel) -> Result<MockSolution, SolverError>,
    {
        type Solution = MockSolution;

        fn maximise(&self, model: &MilpModel) -> Result<MockSolution, SolverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.f)(model)
        }
    }

    /// Every order enabled with the given long-time share.
    fn all_enabled(long_time: f64) -> impl Fn(&MilpModel) -> Result<MockSolution, SolverError> {
        move |model| {
            let mut values = HashMap::new();
            for (id, d) in model.iter_variables() {
                let v = if d.name().starts_with("enabled_") {
                    1.0
                } else if d.name().starts_with("longtime_") {
                    long_time
                } else {
                    0.0
                };
                values.insert(id, v);
            }
            Ok(MockSolution {
                status: SolveStatus::Optimal,
                values,
            })
        }
    }

    #[inline]
    fn oid(n: u64) -> OrderIdentifier {
        OrderIdentifier::new(n)
    }

    fn batch(new: i64, old: i64, requests: &[i64]) -> Batch<i64> {
        let orders = requests
            .iter()
            .enumerate()
            .map(|(i, &r)| Order::new(oid(i as u64 + 1), r, i as i64, None).expect("valid order"))
            .collect();
        Batch::from_quantities(new, old, orders).expect("valid batch")
    }

    #[test]
    fn test_empty_batch_skips_solver() {
        let solver = FnSolver::new(all_enabled(1.0));
        let allocator =
            Allocator::with_solver(AllocatorConfig::default(), &solver).expect("allocator");
        let a = allocator.allocate(&batch(10, 10, &[])).expect("empty batch");
        assert!(a.is_empty());
        assert_eq!(solver.calls(), 0);
    }

    #[test]
    fn test_mock_solution_is_interpreted_and_validated() {
        let solver = FnSolver::new(all_enabled(1.0));
        let allocator = Allocator::with_solver(AllocatorConfig::default(), solver).expect("allocator");
        let a = allocator.allocate(&batch(15, 0, &[10, 5])).expect("valid");
        assert_eq!(a.enabled_count(), 2);
        assert_eq!(a.total_new(), 15);
        assert_eq!(allocator.solver().calls(), 1);
    }

    #[test]
    fn test_infeasible_is_reported() {
        let solver = FnSolver::new(|_: &MilpModel| Err(SolverError::Infeasible));
        let allocator = Allocator::with_solver(AllocatorConfig::default(), solver).expect("allocator");
        assert_eq!(
            allocator.allocate(&batch(1, 1, &[1])),
            Err(AllocationError::Infeasible)
        );
    }

    #[test]
    fn test_non_optimal_status_fails_the_batch() {
        let solver = FnSolver::new(|m: &MilpModel| {
            let mut s = all_enabled(1.0)(m)?;
            s.status = SolveStatus::TimeLimit;
            Ok(s)
        });
        let allocator = Allocator::with_solver(AllocatorConfig::default(), solver).expect("allocator");
        assert_eq!(
            allocator.allocate(&batch(10, 10, &[5])),
            Err(AllocationError::NonOptimal(SolveStatus::TimeLimit))
        );
    }

    #[test]
    fn test_validation_catches_over_capacity_solution() {
        // The mock ignores capacity: 15 new units against 10 available.
        let solver = FnSolver::new(all_enabled(1.0));
        let allocator = Allocator::with_solver(AllocatorConfig::default(), &solver).expect("allocator");
        let err = allocator
            .allocate(&batch(10, 0, &[10, 5]))
            .expect_err("over capacity");
        assert!(matches!(err, AllocationError::Validation(_)));

        let unchecked = Allocator::with_solver(
            AllocatorConfig::default().with_validation(false),
            &solver,
        )
        .expect("allocator");
        assert!(unchecked.allocate(&batch(10, 0, &[10, 5])).is_ok());
    }

    #[test]
    fn test_model_errors_surface_before_solving() {
        let solver = FnSolver::new(all_enabled(1.0));
        let config =
            AllocatorConfig::default().with_policy(PolicyConfig::default().with_big_m(BigM::Fixed(3)));
        let allocator = Allocator::with_solver(config, &solver).expect("allocator");
        let err = allocator.allocate(&batch(10, 10, &[5])).expect_err("big-m too small");
        assert!(matches!(err, AllocationError::ModelBuild(_)));
        assert_eq!(solver.calls(), 0);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let config =
            AllocatorConfig::default().with_policy(PolicyConfig::default().with_division_scale(2));
        assert!(matches!(
            Allocator::new(config),
            Err(AllocationError::PolicyConfig(PolicyConfigError::InvalidScale(_)))
        ));

        let config =
            AllocatorConfig::default().with_policy(PolicyConfig::default().with_priority_cap(60));
        assert!(matches!(
            Allocator::new(config),
            Err(AllocationError::PolicyConfig(PolicyConfigError::PriorityDecay(_)))
        ));
    }

    #[test]
    fn test_allocate_all_isolates_failures() {
        let solver = FnSolver::new(all_enabled(0.0));
        let allocator = Allocator::with_solver(AllocatorConfig::default(), solver).expect("allocator");
        let batches = [batch(0, 10, &[10]), batch(0, 5, &[10]), batch(0, 10, &[4, 6])];

        let results = allocator.allocate_all(&batches);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(AllocationError::Validation(_))));
        assert_eq!(results[2].as_ref().map(|a| a.total_old()), Ok(10));

        let par = allocator.par_allocate_all(&batches);
        assert_eq!(par, results);
    }
}
