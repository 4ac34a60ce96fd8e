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

use crate::batch::{
    builder::BatchBuilder,
    err::{BatchError, BatchLoaderError},
    order::{Order, OrderAttributes, OrderIdentifier},
    stock_batch::Batch,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[derive(Debug, Clone, Deserialize)]
struct OrderRecord {
    id: u64,
    #[serde(default)]
    requested: Option<i64>,
    ordered_at: DateTime<Utc>,
    #[serde(default)]
    minimum_long_term: Option<i64>,
    #[serde(default)]
    customer_address_id: Option<u64>,
    #[serde(default)]
    depot_id: Option<u64>,
    #[serde(default)]
    shipping_parameter_id: Option<u64>,
}

impl OrderRecord {
    fn attributes(&self) -> OrderAttributes {
        let mut attrs = OrderAttributes::new();
        if let Some(id) = self.customer_address_id {
            attrs = attrs.with_customer_address_id(id);
        }
        if let Some(id) = self.depot_id {
            attrs = attrs.with_depot_id(id);
        }
        if let Some(id) = self.shipping_parameter_id {
            attrs = attrs.with_shipping_parameter_id(id);
        }
        attrs
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BatchRecord {
    new_stock: i64,
    old_stock: i64,
    #[serde(default)]
    orders: Vec<OrderRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BatchDocument {
    Many(Vec<BatchRecord>),
    One(BatchRecord),
}

/// Reads batches from JSON.
///
/// A document is either a single batch object or an array of them:
///
/// ```json
/// { "new_stock": 20, "old_stock": 35,
///   "orders": [ { "id": 1, "requested": 15, "ordered_at": "2024-01-01T00:00:00Z",
///                 "minimum_long_term": 60 } ] }
/// ```
///
/// A missing `requested` quantity is read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchLoader {
    skip_invalid_orders: bool,
}

impl BatchLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop orders that fail validation instead of rejecting their batch.
    #[inline]
    pub fn skip_invalid_orders(mut self, yes: bool) -> Self {
        self.skip_invalid_orders = yes;
        self
    }

    pub fn from_reader<R: Read>(&self, r: R) -> Result<Vec<Batch<DateTime<Utc>>>, BatchLoaderError> {
        let document: BatchDocument = serde_json::from_reader(BufReader::new(r))?;
        let records = match document {
            BatchDocument::Many(records) => records,
            BatchDocument::One(record) => vec![record],
        };

        let batches = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                self.build_batch(index, record)
                    .map_err(|source| BatchLoaderError::InvalidBatch { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(batches = batches.len(), "loaded batches");
        Ok(batches)
    }

    #[inline]
    pub fn from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<Batch<DateTime<Utc>>>, BatchLoaderError> {
        let file = File::open(path)?;
        self.from_reader(file)
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Vec<Batch<DateTime<Utc>>>, BatchLoaderError> {
        self.from_reader(s.as_bytes())
    }

    fn build_batch(
        &self,
        index: usize,
        record: BatchRecord,
    ) -> Result<Batch<DateTime<Utc>>, BatchError> {
        let mut builder = BatchBuilder::with_capacity(record.orders.len())
            .with_new_stock(record.new_stock)
            .with_old_stock(record.old_stock);

        for o in record.orders {
            let id = OrderIdentifier::new(o.id);
            let attributes = o.attributes();
            match Order::from_raw(
                id,
                o.requested.unwrap_or(0),
                o.ordered_at,
                o.minimum_long_term,
            ) {
                Ok(order) => {
                    builder.add_order(order.with_attributes(attributes));
                }
                Err(e) if self.skip_invalid_orders => {
                    tracing::warn!(batch = index, order = %id, error = %e, "skipping invalid order");
                }
                Err(e) => return Err(e.into()),
            }
        }

        builder.build()
    }
}
