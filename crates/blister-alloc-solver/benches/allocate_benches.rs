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

use blister_alloc_model::prelude::{Batch, Order, OrderIdentifier};
use blister_alloc_solver::prelude::{
    AllocationModelBuilder, Allocator, AllocatorConfig, PolicyConfig, PriorityPolicy,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// --- helpers ---
#[inline]
fn oid(n: usize) -> OrderIdentifier {
    OrderIdentifier::new(n as u64)
}

/// Orders on consecutive days cycling through a few sizes and minimums.
fn build_batch(num_orders: usize, new_stock: i64, old_stock: i64) -> Batch<i64> {
    const SIZES: [i64; 5] = [5, 10, 15, 20, 30];
    const MINIMUMS: [Option<i64>; 4] = [None, Some(30), Some(60), Some(0)];

    let orders = (0..num_orders)
        .map(|i| {
            Order::from_raw(
                oid(i + 1),
                SIZES[i % SIZES.len()],
                i as i64,
                MINIMUMS[i % MINIMUMS.len()],
            )
            .expect("valid order")
        })
        .collect();
    Batch::from_quantities(new_stock, old_stock, orders).expect("valid batch")
}

fn bench_model_builder(c: &mut Criterion) {
    let batch = build_batch(50, 300, 400);
    let policy = PriorityPolicy::new(PolicyConfig::default()).expect("policy");

    c.bench_function("AllocationModelBuilder build (50 orders)", |b| {
        b.iter(|| black_box(AllocationModelBuilder::new(&policy).build(black_box(&batch))))
    });
}

fn bench_allocate(c: &mut Criterion) {
    let allocator = Allocator::new(AllocatorConfig::default()).expect("allocator");

    let small = build_batch(20, 120, 150);
    c.bench_function("Allocator allocate (20 orders)", |b| {
        b.iter(|| black_box(allocator.allocate(black_box(&small))))
    });

    let large = build_batch(50, 300, 400);
    c.bench_function("Allocator allocate (50 orders)", |b| {
        b.iter(|| black_box(allocator.allocate(black_box(&large))))
    });
}

fn bench_par_allocate_all(c: &mut Criterion) {
    let allocator = Allocator::new(AllocatorConfig::default()).expect("allocator");
    let batches: Vec<Batch<i64>> = (0..8).map(|_| build_batch(20, 120, 150)).collect();

    let mut group = c.benchmark_group("Allocator batches (8 x 20 orders)");
    group.sample_size(20);
    group.bench_function("allocate_all", |b| {
        b.iter(|| black_box(allocator.allocate_all(black_box(&batches))))
    });
    group.bench_function("par_allocate_all", |b| {
        b.iter(|| black_box(allocator.par_allocate_all(black_box(&batches))))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_model_builder,
    bench_allocate,
    bench_par_allocate_all
);
criterion_main!(benches);
