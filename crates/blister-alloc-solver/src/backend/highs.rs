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
    backend::{
        err::SolverError,
        traits::{MilpSolution, MilpSolver, SolveStatus},
    },
    model::milp::{LinearExpression, MilpModel, VariableDefinition, VariableId, VariableKind},
};
use good_lp::{
    Expression, ProblemVariables, Solution, SolverModel, Variable, constraint,
    solvers::{SolutionStatus, WithTimeLimit, highs::highs},
    variable,
};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolverConfig {
    /// Wall-clock bound of a single solve. Hitting it fails the batch.
    pub time_limit: Option<Duration>,
    /// Forward HiGHS log output.
    pub verbose: bool,
}

impl SolverConfig {
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoodLpSolution {
    status: SolveStatus,
    values: Vec<f64>,
}

impl MilpSolution for GoodLpSolution {
    #[inline]
    fn status(&self) -> SolveStatus {
        self.status
    }

    #[inline]
    fn value(&self, variable: VariableId) -> Option<f64> {
        self.values.get(variable.index()).copied()
    }
}

/// Solves a [`MilpModel`] exactly (`mip_rel_gap = 0`) with HiGHS through `good_lp`.
#[derive(Debug, Clone, Default)]
pub struct GoodLpSolver {
    config: SolverConfig,
}

impl GoodLpSolver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

fn declare(definition: &VariableDefinition) -> good_lp::VariableDefinition {
    let mut v = variable().name(definition.name());
    v = match definition.kind() {
        VariableKind::Binary => v.binary(),
        VariableKind::Integer => v.integer(),
        VariableKind::Continuous => v,
    };
    if let Some(lower) = definition.lower() {
        v = v.min(lower);
    }
    if let Some(upper) = definition.upper() {
        v = v.max(upper);
    }
    v
}

fn affine(expression: &LinearExpression, handles: &[Variable], scale: f64) -> Expression {
    expression
        .terms()
        .iter()
        .fold(Expression::from(0.0), |acc, &(v, c)| {
            acc + (scale * c) * handles[v.index()]
        })
}

impl MilpSolver for GoodLpSolver {
    type Solution = GoodLpSolution;

    fn maximise(&self, model: &MilpModel) -> Result<GoodLpSolution, SolverError> {
        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .iter_variables()
            .map(|(_, d)| vars.add(declare(d)))
            .collect();

        let objective = model
            .iter_objective()
            .fold(Expression::from(0.0), |acc, e| {
                acc + affine(e, &handles, e.weight().unwrap_or(0.0))
            });

        let mut problem = vars
            .maximise(objective)
            .using(highs)
            .set_option("mip_rel_gap", 0.0)
            .set_option("output_flag", self.config.verbose);
        if let Some(limit) = self.config.time_limit {
            problem = problem.with_time_limit(limit.as_secs_f64());
        }

        for e in model.iter_constraints() {
            let lhs = affine(e, &handles, 1.0);
            match (e.lower(), e.upper()) {
                (Some(l), Some(u)) if l == u => {
                    problem.add_constraint(constraint::eq(lhs, l));
                }
                (lower, upper) => {
                    if let Some(l) = lower {
                        problem.add_constraint(constraint::geq(lhs.clone(), l));
                    }
                    if let Some(u) = upper {
                        problem.add_constraint(constraint::leq(lhs, u));
                    }
                }
            }
        }

        let solution = problem.solve()?;
        let status = match solution.status() {
            SolutionStatus::Optimal => SolveStatus::Optimal,
            SolutionStatus::TimeLimit => SolveStatus::TimeLimit,
            SolutionStatus::GapLimit => SolveStatus::GapLimit,
        };
        let values = handles.iter().map(|&h| solution.value(h)).collect();

        tracing::debug!(%status, variables = handles.len(), "HiGHS finished");
        Ok(GoodLpSolution { status, values })
    }
}
