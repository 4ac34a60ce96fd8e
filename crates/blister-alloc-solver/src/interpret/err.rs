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

use crate::model::milp::VariableId;
use blister_alloc_model::prelude::OrderIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Solution has no value for {variable} of order {order}")]
pub struct MissingValueError {
    order: OrderIdentifier,
    variable: VariableId,
}

impl MissingValueError {
    #[inline]
    pub fn new(order: OrderIdentifier, variable: VariableId) -> Self {
        Self { order, variable }
    }

    #[inline]
    pub fn order(&self) -> OrderIdentifier {
        self.order
    }

    #[inline]
    pub fn variable(&self) -> VariableId {
        self.variable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("Solution value {value} of {variable} for order {order} is not a finite number")]
pub struct NonFiniteValueError {
    order: OrderIdentifier,
    variable: VariableId,
    value: f64,
}

impl NonFiniteValueError {
    #[inline]
    pub fn new(order: OrderIdentifier, variable: VariableId, value: f64) -> Self {
        Self {
            order,
            variable,
            value,
        }
    }

    #[inline]
    pub fn order(&self) -> OrderIdentifier {
        self.order
    }

    #[inline]
    pub fn variable(&self) -> VariableId {
        self.variable
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InterpretationError {
    #[error(transparent)]
    MissingValue(#[from] MissingValueError),
    #[error(transparent)]
    NonFiniteValue(#[from] NonFiniteValueError),
}
