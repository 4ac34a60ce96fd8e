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
    batch::err::{MinimumOutOfRangeError, NegativeRequestError, OrderError},
    common::{Identifier, IdentifierMarkerName},
};
use blister_alloc_core::prelude::Percentage;
use std::hash::Hasher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderIdentifierMarker;

impl IdentifierMarkerName for OrderIdentifierMarker {
    const NAME: &'static str = "OrderId";
}

pub type OrderIdentifier = Identifier<u64, OrderIdentifierMarker>;

/// Routing data carried through an allocation untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct OrderAttributes {
    customer_address_id: Option<u64>,
    depot_id: Option<u64>,
    shipping_parameter_id: Option<u64>,
}

impl OrderAttributes {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_customer_address_id(mut self, id: u64) -> Self {
        self.customer_address_id = Some(id);
        self
    }

    #[inline]
    pub fn with_depot_id(mut self, id: u64) -> Self {
        self.depot_id = Some(id);
        self
    }

    #[inline]
    pub fn with_shipping_parameter_id(mut self, id: u64) -> Self {
        self.shipping_parameter_id = Some(id);
        self
    }

    #[inline]
    pub fn customer_address_id(&self) -> Option<u64> {
        self.customer_address_id
    }

    #[inline]
    pub fn depot_id(&self) -> Option<u64> {
        self.depot_id
    }

    #[inline]
    pub fn shipping_parameter_id(&self) -> Option<u64> {
        self.shipping_parameter_id
    }
}

/// A demand for `requested` units, sequenced by `ordered_at`.
///
/// The optional minimum long-term fraction states how much of the order must
/// be served from new stock when the order is fulfilled. Orders without a
/// minimum prefer new stock; orders with one prefer old stock down to that
/// floor.
#[derive(Debug, Clone)]
pub struct Order<T: Ord + Copy> {
    id: OrderIdentifier,
    requested: i64,
    ordered_at: T,
    minimum_long_term: Option<Percentage>,
    attributes: OrderAttributes,
}

impl<T: Ord + Copy> PartialEq for Order<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: Ord + Copy> Eq for Order<T> {}

impl<T: Ord + Copy> std::hash::Hash for Order<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl<T: Ord + Copy> Order<T> {
    #[inline]
    pub fn new(
        id: OrderIdentifier,
        requested: i64,
        ordered_at: T,
        minimum_long_term: Option<Percentage>,
    ) -> Result<Self, OrderError> {
        if requested < 0 {
            return Err(NegativeRequestError::new(id, requested))?;
        }

        Ok(Self {
            id,
            requested,
            ordered_at,
            minimum_long_term,
            attributes: OrderAttributes::default(),
        })
    }

    /// Like [`Order::new`], validating a raw percentage.
    #[inline]
    pub fn from_raw(
        id: OrderIdentifier,
        requested: i64,
        ordered_at: T,
        minimum_long_term: Option<i64>,
    ) -> Result<Self, OrderError> {
        let minimum = minimum_long_term
            .map(Percentage::new)
            .transpose()
            .map_err(|e| MinimumOutOfRangeError::new(id, e))?;
        Self::new(id, requested, ordered_at, minimum)
    }

    #[inline]
    pub fn with_attributes(mut self, attributes: OrderAttributes) -> Self {
        self.attributes = attributes;
        self
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
    pub fn ordered_at(&self) -> T {
        self.ordered_at
    }

    #[inline]
    pub fn minimum_long_term(&self) -> Option<Percentage> {
        self.minimum_long_term
    }

    #[inline]
    pub fn has_minimum_long_term(&self) -> bool {
        self.minimum_long_term.is_some()
    }

    #[inline]
    pub fn attributes(&self) -> &OrderAttributes {
        &self.attributes
    }
}

impl<T: Ord + Copy> std::fmt::Display for Order<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.minimum_long_term {
            Some(p) => write!(f, "{} requesting {} (minimum {})", self.id, self.requested, p),
            None => write!(f, "{} requesting {}", self.id, self.requested),
        }
    }
}
