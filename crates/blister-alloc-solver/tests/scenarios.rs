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

use blister_alloc_model::prelude::{Allocation, Batch, Order, OrderIdentifier};
use blister_alloc_solver::prelude::{
    AllocationError, Allocator, AllocatorConfig, BigM, PolicyConfig,
};

type Expected = Option<(i64, i64)>;

#[inline]
fn oid(n: u64) -> OrderIdentifier {
    OrderIdentifier::new(n)
}

#[inline]
fn allocator() -> Allocator {
    Allocator::new(AllocatorConfig::default()).expect("default config is valid")
}

/// Orders placed on consecutive days, given as `(requested, minimum %)`.
fn batch(new: i64, old: i64, orders: &[(i64, Option<i64>)]) -> Batch<i64> {
    let dated: Vec<(i64, i64, Option<i64>)> = orders
        .iter()
        .enumerate()
        .map(|(day, &(r, m))| (day as i64, r, m))
        .collect();
    dated_batch(new, old, &dated)
}

/// Orders given as `(day, requested, minimum %)`.
fn dated_batch(new: i64, old: i64, orders: &[(i64, i64, Option<i64>)]) -> Batch<i64> {
    let orders = orders
        .iter()
        .enumerate()
        .map(|(i, &(day, r, m))| Order::from_raw(oid(i as u64 + 1), r, day, m).expect("valid order"))
        .collect();
    Batch::from_quantities(new, old, orders).expect("valid batch")
}

fn assert_consistent(batch: &Batch<i64>, allocation: &Allocation) {
    assert_eq!(allocation.len(), batch.len());
    assert!(allocation.total_new() <= batch.new_stock().quantity());
    assert!(allocation.total_old() <= batch.old_stock().quantity());
    for (order, f) in batch.iter().zip(allocation.iter()) {
        assert_eq!(f.order_id(), order.id());
        if f.is_enabled() {
            assert_eq!(f.total(), order.requested(), "{order} is not fully served");
        } else {
            assert_eq!(f.total(), 0, "{order} is disabled but served");
        }
    }
}

fn outcome(allocation: &Allocation) -> Vec<Expected> {
    allocation
        .iter()
        .map(|f| f.is_enabled().then(|| (f.new_amount(), f.old_amount())))
        .collect()
}

fn solve(batch: &Batch<i64>) -> Vec<Expected> {
    solve_with(&allocator(), batch)
}

fn solve_with(allocator: &Allocator, batch: &Batch<i64>) -> Vec<Expected> {
    let allocation = allocator.allocate(batch).expect("batch is solvable");
    assert_consistent(batch, &allocation);
    outcome(&allocation)
}

#[test]
fn test_zero_minimum_prefers_old_stock() {
    let b = batch(100, 25, &[(10, Some(0)), (15, Some(0))]);
    assert_eq!(solve(&b), vec![Some((0, 10)), Some((0, 15))]);

    let b = batch(0, 25, &[(10, Some(0)), (15, Some(0))]);
    assert_eq!(solve(&b), vec![Some((0, 10)), Some((0, 15))]);
}

#[test]
fn test_full_minimum_takes_new_stock() {
    let b = batch(45, 100, &[(10, Some(100)), (15, Some(100)), (20, Some(100))]);
    assert_eq!(solve(&b), vec![Some((10, 0)), Some((15, 0)), Some((20, 0))]);

    let b = batch(45, 0, &[(10, Some(100)), (15, Some(100)), (20, Some(100))]);
    assert_eq!(solve(&b), vec![Some((10, 0)), Some((15, 0)), Some((20, 0))]);
}

#[test]
fn test_no_minimum_with_enough_new_stock_takes_new() {
    let b = batch(45, 100, &[(10, None), (15, None), (20, None)]);
    assert_eq!(solve(&b), vec![Some((10, 0)), Some((15, 0)), Some((20, 0))]);

    let b = batch(45, 0, &[(10, None), (15, None), (20, None)]);
    assert_eq!(solve(&b), vec![Some((10, 0)), Some((15, 0)), Some((20, 0))]);
}

#[test]
fn test_no_minimum_without_new_stock_takes_old() {
    let b = batch(0, 100, &[(10, None), (15, None), (20, None)]);
    assert_eq!(solve(&b), vec![Some((0, 10)), Some((0, 15)), Some((0, 20))]);
}

#[test]
fn test_scarce_new_stock_goes_to_oldest_orders() {
    let b = batch(20, 35, &[(15, None), (10, None), (30, None)]);
    assert_eq!(solve(&b), vec![Some((15, 0)), Some((5, 5)), Some((0, 30))]);
}

#[test]
fn test_minimums_are_respected_before_preferences() {
    let b = batch(25, 100, &[(15, Some(60)), (10, None), (30, Some(50))]);
    assert_eq!(solve(&b), vec![Some((9, 6)), Some((1, 9)), Some((15, 15))]);
}

#[test]
fn test_enough_new_stock_for_oldest_orders() {
    let orders = [(10, Some(80)), (15, Some(60)), (20, Some(0))];
    assert_eq!(
        solve(&batch(35, 10, &orders)),
        vec![Some((10, 0)), Some((15, 0)), Some((10, 10))]
    );
    assert_eq!(
        solve(&batch(17, 100, &orders)),
        vec![Some((8, 2)), Some((9, 6)), Some((0, 20))]
    );
}

#[test]
fn test_all_old_stock_is_used() {
    let b = batch(
        100,
        11,
        &[
            (10, Some(30)),
            (15, Some(40)),
            (20, Some(20)),
            (9, Some(80)),
            (33, Some(90)),
        ],
    );
    assert_eq!(
        solve(&b),
        vec![
            Some((10, 0)),
            Some((15, 0)),
            Some((13, 7)),
            Some((8, 1)),
            Some((30, 3)),
        ]
    );
}

#[test]
fn test_large_orders() {
    let stock = i32::MAX as i64;
    let b = batch(stock, stock, &[(100_000, None), (100_000, None), (100_000, None)]);
    assert_eq!(
        solve(&b),
        vec![Some((100_000, 0)), Some((100_000, 0)), Some((100_000, 0))]
    );

    let b = batch(
        stock,
        stock,
        &[(100_000, None), (100_000, Some(80)), (100_000, Some(60))],
    );
    assert_eq!(
        solve(&b),
        vec![
            Some((100_000, 0)),
            Some((80_000, 20_000)),
            Some((60_000, 40_000)),
        ]
    );
}

#[test]
fn test_only_servable_orders_are_enabled() {
    let with_minimums = [(10, Some(10)), (15, Some(20)), (10, Some(60))];
    let without = [(10, None), (15, None), (10, None)];

    for orders in [with_minimums, without] {
        assert_eq!(solve(&batch(10, 0, &orders)), vec![Some((10, 0)), None, None]);
        assert_eq!(
            solve(&batch(20, 0, &orders)),
            vec![Some((10, 0)), None, Some((10, 0))]
        );
    }
}

#[test]
fn test_oldest_order_is_completed_from_mixed_stock() {
    let b = batch(11, 3, &[(10, Some(60)), (5, Some(0)), (5, Some(0))]);
    assert_eq!(solve(&b), vec![Some((7, 3)), None, None]);

    let b = batch(11, 3, &[(10, None), (5, None), (5, None)]);
    assert_eq!(solve(&b), vec![Some((10, 0)), None, None]);
}

fn many_orders(minimums: [Option<i64>; 20], requests: [i64; 20]) -> Vec<(i64, i64, Option<i64>)> {
    const DAYS: [i64; 20] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 14, 14, 14, 15, 15];
    (0..20).map(|i| (DAYS[i], requests[i], minimums[i])).collect()
}

#[test]
fn test_many_orders_without_minimums() {
    let mut requests = [5; 20];
    requests[..4].copy_from_slice(&[10, 10, 20, 30]);
    let b = dated_batch(10, 200, &many_orders([None; 20], requests));

    let got = solve(&b);
    assert_eq!(got[0], Some((10, 0)));
    for (i, f) in got.iter().enumerate().skip(1) {
        assert_eq!(*f, Some((0, requests[i])), "order {}", i + 1);
    }
}

#[test]
fn test_many_orders_with_some_minimums() {
    let mut requests = [5; 20];
    requests[..4].copy_from_slice(&[10, 10, 20, 10]);
    let mut minimums = [None; 20];
    minimums[1] = Some(30);
    minimums[2] = Some(60);
    minimums[3] = Some(10);
    minimums[4] = Some(30);
    minimums[10] = Some(40);
    let b = dated_batch(30, 200, &many_orders(minimums, requests));

    let got = solve(&b);
    let mut expected: Vec<Expected> = requests.iter().map(|&r| Some((0, r))).collect();
    expected[0] = Some((10, 0));
    expected[1] = Some((3, 7));
    expected[2] = Some((12, 8));
    expected[3] = Some((1, 9));
    expected[4] = Some((2, 3));
    expected[10] = Some((2, 3));
    assert_eq!(got, expected);
}

#[test]
fn test_nothing_available_disables_everything() {
    let b = batch(0, 0, &[(10, None), (10, None), (20, None)]);
    assert_eq!(solve(&b), vec![None, None, None]);
}

#[test]
fn test_unreachable_minimums_disable_everything() {
    let b = batch(7, 1000, &[(100, Some(50)), (10, Some(80)), (20, Some(100))]);
    assert_eq!(solve(&b), vec![None, None, None]);
}

#[test]
fn test_every_minimum_is_met_with_only_new_stock() {
    let a = allocator();
    for minimum in 0..=100 {
        let b = batch(30, 0, &[(20, Some(minimum)), (10, Some(10))]);
        let allocation = a.allocate(&b).expect("batch is solvable");
        assert_consistent(&b, &allocation);
        assert_eq!(
            outcome(&allocation),
            vec![Some((20, 0)), Some((10, 0))],
            "minimum {minimum}%"
        );
    }
}

#[test]
fn test_minimum_leaves_room_for_younger_order() {
    let b = batch(30, 10, &[(20, Some(60)), (10, Some(10))]);
    assert_eq!(solve(&b), vec![Some((19, 1)), Some((1, 9))]);
}

#[test]
fn test_repeated_solves_are_stable() {
    let a = allocator();
    let b = batch(30, 0, &[(20, Some(69)), (10, Some(10))]);
    for _ in 0..25 {
        let allocation = a.allocate(&b).expect("batch is solvable");
        assert_eq!(outcome(&allocation), vec![Some((20, 0)), Some((10, 0))]);
    }
}

#[test]
fn test_output_follows_input_order_not_priority() {
    let b = dated_batch(20, 35, &[(2, 30, None), (0, 15, None), (1, 10, None)]);
    let allocation = allocator().allocate(&b).expect("batch is solvable");
    assert_consistent(&b, &allocation);
    assert_eq!(
        outcome(&allocation),
        vec![Some((0, 30)), Some((15, 0)), Some((5, 5))]
    );
}

#[test]
fn test_older_orders_are_never_worse_off() {
    let b = batch(17, 100, &[(10, None), (10, None), (10, None), (10, None)]);
    let got = solve(&b);
    let new: Vec<i64> = got.iter().map(|f| f.map_or(0, |(n, _)| n)).collect();
    assert!(new.windows(2).all(|w| w[0] >= w[1]), "{new:?}");
    assert_eq!(new.iter().sum::<i64>(), 17);
}

#[test]
fn test_empty_batch() {
    let b = batch(10, 10, &[]);
    assert!(allocator().allocate(&b).expect("empty batch").is_empty());
}

#[test]
fn test_par_allocate_all_matches_sequential() {
    let batches = vec![
        batch(20, 35, &[(15, None), (10, None), (30, None)]),
        batch(25, 100, &[(15, Some(60)), (10, None), (30, Some(50))]),
        batch(0, 0, &[(10, None)]),
        batch(11, 3, &[(10, Some(60)), (5, Some(0)), (5, Some(0))]),
    ];
    let a = allocator();

    let sequential: Vec<Result<Allocation, AllocationError>> = a.allocate_all(&batches);
    let parallel = a.par_allocate_all(&batches);
    assert_eq!(parallel, sequential);

    let outcomes: Vec<Vec<Expected>> = parallel
        .iter()
        .map(|r| outcome(r.as_ref().expect("solvable")))
        .collect();
    assert_eq!(outcomes[0], vec![Some((15, 0)), Some((5, 5)), Some((0, 30))]);
    assert_eq!(outcomes[2], vec![None]);
    assert_eq!(outcomes[3], vec![Some((7, 3)), None, None]);
}

#[test]
fn test_fixed_legacy_big_m_matches_largest_order() {
    let legacy = Allocator::new(
        AllocatorConfig::default().with_policy(PolicyConfig::default().with_big_m(BigM::LEGACY)),
    )
    .expect("legacy big-m is valid");
    let derived = allocator();

    let stock = i32::MAX as i64;
    let cases: Vec<(Batch<i64>, Vec<Expected>)> = vec![
        (
            batch(100, 25, &[(10, Some(0)), (15, Some(0))]),
            vec![Some((0, 10)), Some((0, 15))],
        ),
        (
            batch(10, 0, &[(10, None), (15, None), (10, None)]),
            vec![Some((10, 0)), None, None],
        ),
        (
            batch(20, 35, &[(15, None), (10, None), (30, None)]),
            vec![Some((15, 0)), Some((5, 5)), Some((0, 30))],
        ),
        (
            batch(25, 100, &[(15, Some(60)), (10, None), (30, Some(50))]),
            vec![Some((9, 6)), Some((1, 9)), Some((15, 15))],
        ),
        (
            batch(11, 3, &[(10, Some(60)), (5, Some(0)), (5, Some(0))]),
            vec![Some((7, 3)), None, None],
        ),
        (
            batch(7, 1000, &[(100, Some(50)), (10, Some(80)), (20, Some(100))]),
            vec![None, None, None],
        ),
        (
            batch(30, 10, &[(20, Some(60)), (10, Some(10))]),
            vec![Some((19, 1)), Some((1, 9))],
        ),
        (
            batch(stock, stock, &[(100_000, None), (100_000, None), (100_000, None)]),
            vec![Some((100_000, 0)), Some((100_000, 0)), Some((100_000, 0))],
        ),
        (
            batch(
                stock,
                stock,
                &[(100_000, None), (100_000, Some(80)), (100_000, Some(60))],
            ),
            vec![
                Some((100_000, 0)),
                Some((80_000, 20_000)),
                Some((60_000, 40_000)),
            ],
        ),
    ];

    for (i, (b, expected)) in cases.iter().enumerate() {
        assert_eq!(&solve_with(&legacy, b), expected, "case {i} with fixed big-m");
        assert_eq!(&solve_with(&derived, b), expected, "case {i} with derived big-m");
    }
}
