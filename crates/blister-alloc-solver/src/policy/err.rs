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

use blister_alloc_core::prelude::InvalidScaleError;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Priority base must be at least 2, got {base}")]
pub struct InvalidPriorityBaseError {
    base: u32,
}

impl InvalidPriorityBaseError {
    #[inline]
    pub fn new(base: u32) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> u32 {
        self.base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Objective weight `{name}` must be positive, got {value}")]
pub struct NonPositiveWeightError {
    name: &'static str,
    value: Decimal,
}

impl NonPositiveWeightError {
    #[inline]
    pub fn new(name: &'static str, value: Decimal) -> Self {
        Self { name, value }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn value(&self) -> Decimal {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Big-M {big_m} is smaller than the largest order {largest_request}")]
pub struct BigMTooSmallError {
    big_m: i64,
    largest_request: i64,
}

impl BigMTooSmallError {
    #[inline]
    pub fn new(big_m: i64, largest_request: i64) -> Self {
        Self {
            big_m,
            largest_request,
        }
    }

    #[inline]
    pub fn big_m(&self) -> i64 {
        self.big_m
    }

    #[inline]
    pub fn largest_request(&self) -> i64 {
        self.largest_request
    }
}

/// The priority weights up to the cap do not stay positive and strictly
/// decreasing at the configured scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error(
    "Priority weights {base}^-i for i up to {cap} are not strictly decreasing and positive at scale {scale}"
)]
pub struct PriorityDecayError {
    base: u32,
    cap: u32,
    scale: u32,
}

impl PriorityDecayError {
    #[inline]
    pub fn new(base: u32, cap: u32, scale: u32) -> Self {
        Self { base, cap, scale }
    }

    #[inline]
    pub fn base(&self) -> u32 {
        self.base
    }

    #[inline]
    pub fn cap(&self) -> u32 {
        self.cap
    }

    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum PolicyConfigError {
    #[error(transparent)]
    InvalidPriorityBase(#[from] InvalidPriorityBaseError),
    #[error(transparent)]
    InvalidScale(#[from] InvalidScaleError),
    #[error(transparent)]
    NonPositiveWeight(#[from] NonPositiveWeightError),
    #[error(transparent)]
    BigMTooSmall(#[from] BigMTooSmallError),
    #[error(transparent)]
    PriorityDecay(#[from] PriorityDecayError),
}
