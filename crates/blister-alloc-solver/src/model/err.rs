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

use crate::{model::milp::VariableId, policy::err::BigMTooSmallError};
use blister_alloc_core::prelude::ArithmeticError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Name `{name}` is already used in the model")]
pub struct DuplicateNameError {
    name: String,
}

impl DuplicateNameError {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Expression `{expression}` references unknown variable {variable}")]
pub struct UnknownVariableError {
    expression: String,
    variable: VariableId,
}

impl UnknownVariableError {
    #[inline]
    pub fn new(expression: impl Into<String>, variable: VariableId) -> Self {
        Self {
            expression: expression.into(),
            variable,
        }
    }

    #[inline]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[inline]
    pub fn variable(&self) -> VariableId {
        self.variable
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("`{name}` has invalid bounds [{lower:?}, {upper:?}]")]
pub struct InvalidBoundsError {
    name: String,
    lower: Option<f64>,
    upper: Option<f64>,
}

impl InvalidBoundsError {
    #[inline]
    pub fn new(name: impl Into<String>, lower: Option<f64>, upper: Option<f64>) -> Self {
        Self {
            name: name.into(),
            lower,
            upper,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("`{name}` carries a non-finite number {value}")]
pub struct NonFiniteNumberError {
    name: String,
    value: f64,
}

impl NonFiniteNumberError {
    #[inline]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelBuildError {
    #[error(transparent)]
    DuplicateName(#[from] DuplicateNameError),
    #[error(transparent)]
    UnknownVariable(#[from] UnknownVariableError),
    #[error(transparent)]
    InvalidBounds(#[from] InvalidBoundsError),
    #[error(transparent)]
    NonFiniteNumber(#[from] NonFiniteNumberError),
    #[error(transparent)]
    BigMTooSmall(#[from] BigMTooSmallError),
    #[error("Coefficient arithmetic failed: {0}")]
    Arithmetic(#[from] ArithmeticError),
}
