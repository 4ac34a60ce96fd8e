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
    backend::{SolveStatus, SolverError},
    interpret::InterpretationError,
    model::ModelBuildError,
    policy::PolicyConfigError,
};
use blister_alloc_model::prelude::AllocationValidationError;

/// Everything that can fail a batch. No partial allocation is ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    #[error("The batch admits no feasible allocation")]
    Infeasible,
    #[error("Solver failure: {0}")]
    Solver(SolverError),
    #[error("Solver stopped without a proven optimum: {0}")]
    NonOptimal(SolveStatus),
    #[error("Invalid policy configuration: {0}")]
    PolicyConfig(#[from] PolicyConfigError),
    #[error("Model construction failed: {0}")]
    ModelBuild(#[from] ModelBuildError),
    #[error("Cannot interpret solution: {0}")]
    Interpretation(#[from] InterpretationError),
    #[error("Allocation violates an invariant: {0}")]
    Validation(#[from] AllocationValidationError),
}

impl From<SolverError> for AllocationError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::Infeasible => AllocationError::Infeasible,
            other => AllocationError::Solver(other),
        }
    }
}
