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

use anyhow::Context;
use blister_alloc_model::prelude::{Allocation, Batch, BatchLoader};
use blister_alloc_solver::prelude::{
    AllocationError, Allocator, AllocatorConfig, BigM, PolicyConfig, SolverConfig,
};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Allocate new and old blister stock to the orders of one or more batches.
#[derive(Debug, Parser)]
#[command(name = "blister-alloc", version, about)]
struct Args {
    /// JSON file holding a batch or an array of batches.
    input: PathBuf,

    /// Abort a single solve after this many seconds.
    #[arg(long, value_name = "SECS")]
    time_limit: Option<u64>,

    /// Use this fixed Big-M instead of the largest request.
    #[arg(long, value_name = "M")]
    big_m: Option<i64>,

    /// Print one JSON record per batch instead of a summary.
    #[arg(long)]
    json: bool,

    /// Skip the post-solve invariant checks.
    #[arg(long)]
    no_validate: bool,

    /// Solve batches on all cores.
    #[arg(long)]
    parallel: bool,

    /// Drop malformed orders instead of rejecting their batch.
    #[arg(long)]
    skip_invalid_orders: bool,

    /// Forward solver log output.
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn allocator_config(&self) -> AllocatorConfig {
        let mut policy = PolicyConfig::default();
        if let Some(m) = self.big_m {
            policy = policy.with_big_m(BigM::Fixed(m));
        }

        let mut solver = SolverConfig::default().with_verbose(self.verbose);
        if let Some(secs) = self.time_limit {
            solver = solver.with_time_limit(Duration::from_secs(secs));
        }

        AllocatorConfig::default()
            .with_policy(policy)
            .with_solver(solver)
            .with_validation(!self.no_validate)
    }
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
struct RunRecord<'a> {
    batch: usize,
    orders: usize,
    new_stock: i64,
    old_stock: i64,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    allocation: Option<&'a Allocation>,
    error: Option<String>,
}

fn print_summary(
    index: usize,
    batch: &Batch<DateTime<Utc>>,
    result: &Result<Allocation, AllocationError>,
) {
    println!(
        "batch {}: {} orders, {} new / {} old in stock",
        index + 1,
        batch.len(),
        batch.new_stock().quantity(),
        batch.old_stock().quantity()
    );
    match result {
        Ok(allocation) => {
            for f in allocation {
                println!("  {f}");
            }
            println!(
                "  {} of {} orders served, {} new and {} old used",
                allocation.enabled_count(),
                allocation.len(),
                allocation.total_new(),
                allocation.total_old()
            );
        }
        Err(e) => println!("  failed: {e}"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    enable_tracing();

    let batches = BatchLoader::new()
        .skip_invalid_orders(args.skip_invalid_orders)
        .from_path(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let allocator = Allocator::new(args.allocator_config()).context("invalid configuration")?;

    tracing::info!(
        "Allocating {} batches from {}",
        batches.len(),
        args.input.display()
    );

    let start_ts = Utc::now();
    let t0 = Instant::now();
    let results = if args.parallel {
        allocator.par_allocate_all(&batches)
    } else {
        allocator.allocate_all(&batches)
    };
    let runtime_ms = t0.elapsed().as_millis();
    let end_ts = Utc::now();

    let mut failed = 0usize;
    for (index, (batch, result)) in batches.iter().zip(&results).enumerate() {
        if result.is_err() {
            failed += 1;
        }

        if args.json {
            let record = RunRecord {
                batch: index + 1,
                orders: batch.len(),
                new_stock: batch.new_stock().quantity(),
                old_stock: batch.old_stock().quantity(),
                start_ts,
                end_ts,
                runtime_ms,
                allocation: result.as_ref().ok(),
                error: result.as_ref().err().map(|e| e.to_string()),
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            print_summary(index, batch, result);
        }
    }

    tracing::info!(
        "Done in {} ms, {} of {} batches failed",
        runtime_ms,
        failed,
        batches.len()
    );
    if failed > 0 {
        anyhow::bail!("{failed} batch(es) could not be allocated");
    }
    Ok(())
}
