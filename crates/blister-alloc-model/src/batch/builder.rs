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

use crate::batch::{err::BatchError, order::Order, stock_batch::Batch};

#[derive(Debug, Clone)]
pub struct BatchBuilder<T: Ord + Copy> {
    new_stock: i64,
    old_stock: i64,
    orders: Vec<Order<T>>,
}

impl<T: Ord + Copy> Default for BatchBuilder<T> {
    fn default() -> Self {
        Self {
            new_stock: 0,
            old_stock: 0,
            orders: Vec::new(),
        }
    }
}

impl<T: Ord + Copy> BatchBuilder<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(orders: usize) -> Self {
        Self {
            orders: Vec::with_capacity(orders),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_new_stock(mut self, quantity: i64) -> Self {
        self.new_stock = quantity;
        self
    }

    #[inline]
    pub fn with_old_stock(mut self, quantity: i64) -> Self {
        self.old_stock = quantity;
        self
    }

    #[inline]
    pub fn with_orders<I>(mut self, orders: I) -> Self
    where
        I: IntoIterator<Item = Order<T>>,
    {
        self.orders.clear();
        self.orders.extend(orders);
        self
    }

    #[inline]
    pub fn add_order(&mut self, order: Order<T>) -> &mut Self {
        self.orders.push(order);
        self
    }

    #[inline]
    pub fn extend_orders<I>(&mut self, orders: I) -> &mut Self
    where
        I: IntoIterator<Item = Order<T>>,
    {
        self.orders.extend(orders);
        self
    }

    #[inline]
    pub fn build(self) -> Result<Batch<T>, BatchError> {
        Batch::from_quantities(self.new_stock, self.old_stock, self.orders)
    }
}
