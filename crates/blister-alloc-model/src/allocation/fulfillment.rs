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

/// How a single order is served.
///
/// A disabled fulfillment always carries zero amounts and a zero fraction.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Fulfillment {
    order_id: OrderIdentifier,
    enabled: bool,
    long_time_fraction: f64,
    new_amount: i64,
    old_amount: i64,
}

impl Fulfillment {
    #[inline]
    pub fn new(
        order_id: OrderIdentifier,
        enabled: bool,
        long_time_fraction: f64,
        new_amount: i64,
        old_amount: i64,
    ) -> Self {
        Self {
            order_id,
            enabled,
            long_time_fraction,
            new_amount,
            old_amount,
        }
    }

    #[inline]
    pub fn enabled(
        order_id: OrderIdentifier,
        long_time_fraction: f64,
        new_amount: i64,
        old_amount: i64,
    ) -> Self {
        Self {
            order_id,
            enabled: true,
            long_time_fraction,
            new_amount,
            old_amount,
        }
    }

    #[inline]
    pub fn disabled(order_id: OrderIdentifier) -> Self {
        Self {
            order_id,
            enabled: false,
            long_time_fraction: 0.0,
            new_amount: 0,
            old_amount: 0,
        }
    }

    #[inline]
    pub fn order_id(&self) -> OrderIdentifier {
        self.order_id
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn long_time_fraction(&self) -> f64 {
        self.long_time_fraction
    }

    #[inline]
    pub fn new_amount(&self) -> i64 {
        self.new_amount
    }

    #[inline]
    pub fn old_amount(&self) -> i64 {
        self.old_amount
    }

    #[inline]
    pub fn total(&self) -> i64 {
        self.new_amount + self.old_amount
    }
}

impl std::fmt::Display for Fulfillment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.enabled {
            write!(
                f,
                "{}: new {}, old {}",
                self.order_id, self.new_amount, self.old_amount
            )
        } else {
            write!(f, "{}: disabled", self.order_id)
        }
    }
}
