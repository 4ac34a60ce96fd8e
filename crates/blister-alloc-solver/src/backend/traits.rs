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
    backend::err::SolverError,
    model::milp::{MilpModel, VariableId},
};

/// Why the solver stopped with a solution in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Optimal,
    TimeLimit,
    GapLimit,
}

impl SolveStatus {
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::TimeLimit => write!(f, "time limit reached"),
            SolveStatus::GapLimit => write!(f, "gap limit reached"),
        }
    }
}

pub trait MilpSolution {
    fn status(&self) -> SolveStatus;

    /// Value of `variable`, `None` if the solution does not cover it.
    fn value(&self, variable: VariableId) -> Option<f64>;
}

pub trait MilpSolver {
    type Solution: MilpSolution;

    /// Maximises the model's weighted objective subject to its constraints.
    fn maximise(&self, model: &MilpModel) -> Result<Self::Solution, SolverError>;
}

impl<S: MilpSolver + ?Sized> MilpSolver for &S {
    type Solution = S::Solution;

    #[inline]
    fn maximise(&self, model: &MilpModel) -> Result<Self::Solution, SolverError> {
        (**self).maximise(model)
    }
}
