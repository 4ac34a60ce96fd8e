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

use crate::{allocation::fulfillment::Fulfillment, batch::order::OrderIdentifier};
use std::collections::HashMap;

/// The outcome of allocating one batch: one [`Fulfillment`] per order,
/// iterable in the caller's input order and addressable by order id.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Allocation {
    fulfillments: Vec<Fulfillment>,
    #[serde(skip)]
    index: HashMap<OrderIdentifier, usize>,
}

impl Allocation {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fulfillments: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts a fulfillment, replacing and returning any previous one for
    /// the same order. A replacement keeps the original position.
    pub fn insert(&mut self, fulfillment: Fulfillment) -> Option<Fulfillment> {
        match self.index.get(&fulfillment.order_id()) {
            Some(&pos) => Some(std::mem::replace(&mut self.fulfillments[pos], fulfillment)),
            None => {
                self.index
                    .insert(fulfillment.order_id(), self.fulfillments.len());
                self.fulfillments.push(fulfillment);
                None
            }
        }
    }

    #[inline]
    pub fn get(&self, id: OrderIdentifier) -> Option<&Fulfillment> {
        self.index.get(&id).map(|&pos| &self.fulfillments[pos])
    }

    #[inline]
    pub fn contains(&self, id: OrderIdentifier) -> bool {
        self.index.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fulfillments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fulfillments.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Fulfillment> {
        self.fulfillments.iter()
    }

    #[inline]
    pub fn iter_enabled(&self) -> impl Iterator<Item = &Fulfillment> {
        self.fulfillments.iter().filter(|f| f.is_enabled())
    }

    #[inline]
    pub fn enabled_count(&self) -> usize {
        self.iter_enabled().count()
    }

    #[inline]
    pub fn total_new(&self) -> i64 {
        self.fulfillments.iter().map(|f| f.new_amount()).sum()
    }

    #[inline]
    pub fn total_old(&self) -> i64 {
        self.fulfillments.iter().map(|f| f.old_amount()).sum()
    }
}

impl<'a> IntoIterator for &'a Allocation {
    type Item = &'a Fulfillment;
    type IntoIter = std::slice::Iter<'a, Fulfillment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Fulfillment> for Allocation {
    fn from_iter<I: IntoIterator<Item = Fulfillment>>(iter: I) -> Self {
        let mut allocation = Allocation::new();
        for f in iter {
            allocation.insert(f);
        }
        allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn oid(n: u64) -> OrderIdentifier {
        OrderIdentifier::new(n)
    }

    #[test]
    fn test_insert_keeps_input_order_and_index() {
        let mut a = Allocation::with_capacity(3);
        assert!(a.insert(Fulfillment::enabled(oid(3), 1.0, 10, 0)).is_none());
        assert!(a.insert(Fulfillment::disabled(oid(1))).is_none());
        assert!(a.insert(Fulfillment::enabled(oid(2), 0.5, 5, 5)).is_none());

        let ids: Vec<u64> = a.iter().map(|f| *f.order_id().value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(a.get(oid(2)).map(|f| f.new_amount()), Some(5));
        assert!(a.get(oid(4)).is_none());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut a = Allocation::new();
        a.insert(Fulfillment::disabled(oid(1)));
        a.insert(Fulfillment::disabled(oid(2)));
        let previous = a.insert(Fulfillment::enabled(oid(1), 1.0, 4, 0));

        assert_eq!(previous, Some(Fulfillment::disabled(oid(1))));
        assert_eq!(a.len(), 2);
        assert_eq!(a.iter().next().map(|f| f.is_enabled()), Some(true));
    }

    #[test]
    fn test_totals() {
        let a: Allocation = [
            Fulfillment::enabled(oid(1), 1.0, 15, 0),
            Fulfillment::enabled(oid(2), 0.5, 5, 5),
            Fulfillment::disabled(oid(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(a.total_new(), 20);
        assert_eq!(a.total_old(), 5);
        assert_eq!(a.enabled_count(), 2);
        assert!(a.contains(oid(3)));
    }

    #[test]
    fn test_disabled_is_zeroed() {
        let f = Fulfillment::disabled(oid(1));
        assert!(!f.is_enabled());
        assert_eq!(f.total(), 0);
        assert_eq!(f.long_time_fraction(), 0.0);
        assert_eq!(f.to_string(), "OrderId(1): disabled");
    }

    #[test]
    fn test_serializes_fulfillments_only() {
        let a: Allocation = [Fulfillment::enabled(oid(7), 1.0, 3, 0)].into_iter().collect();
        let json = serde_json::to_value(&a).expect("serializable");
        assert_eq!(json["fulfillments"][0]["order_id"], 7);
        assert_eq!(json["fulfillments"][0]["new_amount"], 3);
        assert!(json.get("index").is_none());
    }
}
