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

use crate::batch::order::OrderIdentifier;
use blister_alloc_core::prelude::Percentage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{grade} stock exceeded: {used} units allocated, {available} available")]
pub struct CapacityExceededError {
    grade: &'static str,
    used: i64,
    available: i64,
}

impl CapacityExceededError {
    #[inline]
    pub fn new(grade: &'static str, used: i64, available: i64) -> Self {
        Self {
            grade,
            used,
            available,
        }
    }

    #[inline]
    pub fn grade(&self) -> &'static str {
        self.grade
    }

    #[inline]
    pub fn used(&self) -> i64 {
        self.used
    }

    #[inline]
    pub fn available(&self) -> i64 {
        self.available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error(
    "Order {id} is not conserved: new {new_amount} + old {old_amount} != requested {requested}"
)]
pub struct ConservationError {
    id: OrderIdentifier,
    requested: i64,
    new_amount: i64,
    old_amount: i64,
}

impl ConservationError {
    #[inline]
    pub fn new(id: OrderIdentifier, requested: i64, new_amount: i64, old_amount: i64) -> Self {
        Self {
            id,
            requested,
            new_amount,
            old_amount,
        }
    }

    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        self.id
    }

    #[inline]
    pub fn requested(&self) -> i64 {
        self.requested
    }

    #[inline]
    pub fn new_amount(&self) -> i64 {
        self.new_amount
    }

    #[inline]
    pub fn old_amount(&self) -> i64 {
        self.old_amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Order {id} has negative amounts: new {new_amount}, old {old_amount}")]
pub struct NegativeAmountError {
    id: OrderIdentifier,
    new_amount: i64,
    old_amount: i64,
}

impl NegativeAmountError {
    #[inline]
    pub fn new(id: OrderIdentifier, new_amount: i64, old_amount: i64) -> Self {
        Self {
            id,
            new_amount,
            old_amount,
        }
    }

    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Disabled order {id} still receives new {new_amount}, old {old_amount}")]
pub struct DisabledNotZeroedError {
    id: OrderIdentifier,
    new_amount: i64,
    old_amount: i64,
}

impl DisabledNotZeroedError {
    #[inline]
    pub fn new(id: OrderIdentifier, new_amount: i64, old_amount: i64) -> Self {
        Self {
            id,
            new_amount,
            old_amount,
        }
    }

    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        self.id
    }

    #[inline]
    pub fn new_amount(&self) -> i64 {
        self.new_amount
    }

    #[inline]
    pub fn old_amount(&self) -> i64 {
        self.old_amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Order {id} receives {new_amount} of {requested} new units, below its minimum {minimum}")]
pub struct LongTermFloorError {
    id: OrderIdentifier,
    minimum: Percentage,
    requested: i64,
    new_amount: i64,
}

impl LongTermFloorError {
    #[inline]
    pub fn new(id: OrderIdentifier, minimum: Percentage, requested: i64, new_amount: i64) -> Self {
        Self {
            id,
            minimum,
            requested,
            new_amount,
        }
    }

    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        self.id
    }

    #[inline]
    pub fn minimum(&self) -> Percentage {
        self.minimum
    }

    #[inline]
    pub fn requested(&self) -> i64 {
        self.requested
    }

    #[inline]
    pub fn new_amount(&self) -> i64 {
        self.new_amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Order {id} has no fulfillment")]
pub struct MissingFulfillmentError {
    id: OrderIdentifier,
}

impl MissingFulfillmentError {
    #[inline]
    pub fn new(id: OrderIdentifier) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Fulfillment for {id} does not belong to any order of the batch")]
pub struct UnknownFulfillmentError {
    id: OrderIdentifier,
}

impl UnknownFulfillmentError {
    #[inline]
    pub fn new(id: OrderIdentifier) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CompletenessError {
    #[error(transparent)]
    Missing(#[from] MissingFulfillmentError),
    #[error(transparent)]
    Unknown(#[from] UnknownFulfillmentError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AllocationValidationError {
    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceededError),
    #[error(transparent)]
    Conservation(#[from] ConservationError),
    #[error(transparent)]
    NegativeAmount(#[from] NegativeAmountError),
    #[error(transparent)]
    DisabledNotZeroed(#[from] DisabledNotZeroedError),
    #[error(transparent)]
    LongTermFloor(#[from] LongTermFloorError),
    #[error(transparent)]
    Completeness(#[from] CompletenessError),
}

impl From<MissingFulfillmentError> for AllocationValidationError {
    fn from(err: MissingFulfillmentError) -> Self {
        AllocationValidationError::Completeness(err.into())
    }
}

impl From<UnknownFulfillmentError> for AllocationValidationError {
    fn from(err: UnknownFulfillmentError) -> Self {
        AllocationValidationError::Completeness(err.into())
    }
}
