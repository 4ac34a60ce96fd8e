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
    batch::{
        err::{BatchError, DuplicateOrderError},
        order::{Order, OrderIdentifier},
    },
    common::{NewStock, OldStock},
};
use std::collections::HashSet;

/// One independent allocation problem: two stock levels and the orders
/// competing for them, in the caller's input order.
#[derive(Debug, Clone)]
pub struct Batch<T: Ord + Copy> {
    new_stock: NewStock,
    old_stock: OldStock,
    orders: Vec<Order<T>>,
}

impl<T: Ord + Copy> Batch<T> {
    #[inline]
    pub fn new(
        new_stock: NewStock,
        old_stock: OldStock,
        orders: Vec<Order<T>>,
    ) -> Result<Self, BatchError> {
        let mut seen: HashSet<OrderIdentifier> = HashSet::with_capacity(orders.len());
        for o in &orders {
            if !seen.insert(o.id()) {
                return Err(DuplicateOrderError::new(o.id()))?;
            }
        }

        Ok(Self {
            new_stock,
            old_stock,
            orders,
        })
    }

    #[inline]
    pub fn from_quantities(
        new_stock: i64,
        old_stock: i64,
        orders: Vec<Order<T>>,
    ) -> Result<Self, BatchError> {
        Self::new(NewStock::new(new_stock)?, OldStock::new(old_stock)?, orders)
    }

    #[inline]
    pub fn new_stock(&self) -> NewStock {
        self.new_stock
    }

    #[inline]
    pub fn old_stock(&self) -> OldStock {
        self.old_stock
    }

    #[inline]
    pub fn orders(&self) -> &[Order<T>] {
        &self.orders
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Order<T>> {
        self.orders.iter()
    }

    #[inline]
    pub fn order(&self, id: OrderIdentifier) -> Option<&Order<T>> {
        self.orders.iter().find(|o| o.id() == id)
    }

    #[inline]
    pub fn contains_order(&self, id: OrderIdentifier) -> bool {
        self.order(id).is_some()
    }

    /// Input positions sorted ascending by ordering timestamp.
    /// Equal timestamps keep their input order.
    pub fn priority_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = (0..self.orders.len()).collect();
        positions.sort_by_key(|&p| self.orders[p].ordered_at());
        positions
    }

    /// Orders in priority order, paired with their input position.
    #[inline]
    pub fn iter_by_priority(&self) -> impl Iterator<Item = (usize, &Order<T>)> {
        self.priority_positions()
            .into_iter()
            .map(move |p| (p, &self.orders[p]))
    }

    #[inline]
    pub fn largest_request(&self) -> i64 {
        self.orders.iter().map(|o| o.requested()).max().unwrap_or(0)
    }

    #[inline]
    pub fn total_requested(&self) -> i64 {
        self.orders
            .iter()
            .fold(0i64, |acc, o| acc.saturating_add(o.requested()))
    }
}
