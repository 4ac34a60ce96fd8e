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

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum SolverError {
    #[error("The model is infeasible")]
    Infeasible,
    #[error("The model is unbounded")]
    Unbounded,
    #[error("Solver backend failed: {0}")]
    Backend(String),
}

impl From<good_lp::ResolutionError> for SolverError {
    fn from(err: good_lp::ResolutionError) -> Self {
        match err {
            good_lp::ResolutionError::Infeasible => SolverError::Infeasible,
            good_lp::ResolutionError::Unbounded => SolverError::Unbounded,
            other => SolverError::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_errors_map_to_solver_errors() {
        assert_eq!(
            SolverError::from(good_lp::ResolutionError::Infeasible),
            SolverError::Infeasible
        );
        assert_eq!(
            SolverError::from(good_lp::ResolutionError::Unbounded),
            SolverError::Unbounded
        );
        assert!(matches!(
            SolverError::from(good_lp::ResolutionError::Str("boom".to_owned())),
            SolverError::Backend(msg) if msg.contains("boom")
        ));
    }
}
