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

use crate::{batch::order::OrderIdentifier, common::NegativeStockError};
use blister_alloc_core::prelude::PercentageOutOfRangeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Order {id} requests a negative quantity {requested}")]
pub struct NegativeRequestError {
    id: OrderIdentifier,
    requested: i64,
}

impl NegativeRequestError {
    #[inline]
    pub fn new(id: OrderIdentifier, requested: i64) -> Self {
        Self { id, requested }
    }

    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        self.id
    }

    #[inline]
    pub fn requested(&self) -> i64 {
        self.requested
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Order {id} has an invalid minimum long-term fraction: {source}")]
pub struct MinimumOutOfRangeError {
    id: OrderIdentifier,
    source: PercentageOutOfRangeError,
}

impl MinimumOutOfRangeError {
    #[inline]
    pub fn new(id: OrderIdentifier, source: PercentageOutOfRangeError) -> Self {
        Self { id, source }
    }

    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        self.id
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.source.value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    NegativeRequest(#[from] NegativeRequestError),
    #[error(transparent)]
    MinimumOutOfRange(#[from] MinimumOutOfRangeError),
}

impl OrderError {
    #[inline]
    pub fn id(&self) -> OrderIdentifier {
        match self {
            OrderError::NegativeRequest(e) => e.id(),
            OrderError::MinimumOutOfRange(e) => e.id(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Order {id} appears more than once in the batch")]
pub struct DuplicateOrderError {
    id: OrderIdentifier,
}

impl DuplicateOrderError {
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
pub enum BatchError {
    #[error(transparent)]
    NegativeStock(#[from] NegativeStockError),
    #[error(transparent)]
    DuplicateOrder(#[from] DuplicateOrderError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

#[derive(Debug, thiserror::Error)]
pub enum BatchLoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed batch document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Batch {index} is invalid: {source}")]
    InvalidBatch {
        index: usize,
        #[source]
        source: BatchError,
    },
}
