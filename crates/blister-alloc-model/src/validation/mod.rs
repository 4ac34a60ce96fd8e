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

pub mod err;

use crate::{
    allocation::Allocation,
    batch::Batch,
    common::{Grade, NewGrade, OldGrade},
    validation::err::{
        AllocationValidationError, CapacityExceededError, CompletenessError, ConservationError,
        DisabledNotZeroedError, LongTermFloorError, MissingFulfillmentError, NegativeAmountError,
        UnknownFulfillmentError,
    },
};

/// Post-hoc checks of an [`Allocation`] against the batch it was computed for.
#[derive(Debug, Clone)]
pub struct AllocationValidator;

impl AllocationValidator {
    /// Every order has exactly one fulfillment and no fulfillment is foreign.
    #[inline]
    pub fn validate_complete<T: Ord + Copy>(
        batch: &Batch<T>,
        allocation: &Allocation,
    ) -> Result<(), CompletenessError> {
        for o in batch.iter() {
            if !allocation.contains(o.id()) {
                return Err(MissingFulfillmentError::new(o.id()))?;
            }
        }
        for f in allocation.iter() {
            if !batch.contains_order(f.order_id()) {
                return Err(UnknownFulfillmentError::new(f.order_id()))?;
            }
        }
        Ok(())
    }

    #[inline]
    pub fn validate_capacity<T: Ord + Copy>(
        batch: &Batch<T>,
        allocation: &Allocation,
    ) -> Result<(), CapacityExceededError> {
        let used_new: i128 = allocation.iter().map(|f| f.new_amount() as i128).sum();
        let used_old: i128 = allocation.iter().map(|f| f.old_amount() as i128).sum();

        let available_new = batch.new_stock().quantity();
        if used_new > available_new as i128 {
            return Err(CapacityExceededError::new(
                NewGrade::NAME,
                saturate(used_new),
                available_new,
            ));
        }

        let available_old = batch.old_stock().quantity();
        if used_old > available_old as i128 {
            return Err(CapacityExceededError::new(
                OldGrade::NAME,
                saturate(used_old),
                available_old,
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn validate_non_negative(allocation: &Allocation) -> Result<(), NegativeAmountError> {
        for f in allocation.iter() {
            if f.new_amount() < 0 || f.old_amount() < 0 {
                return Err(NegativeAmountError::new(
                    f.order_id(),
                    f.new_amount(),
                    f.old_amount(),
                ));
            }
        }
        Ok(())
    }

    /// new + old equals the requested quantity for every enabled order.
    #[inline]
    pub fn validate_conservation<T: Ord + Copy>(
        batch: &Batch<T>,
        allocation: &Allocation,
    ) -> Result<(), ConservationError> {
        for o in batch.iter() {
            let Some(f) = allocation.get(o.id()) else {
                continue;
            };
            let served = f.new_amount() as i128 + f.old_amount() as i128;
            if f.is_enabled() && served != o.requested() as i128 {
                return Err(ConservationError::new(
                    o.id(),
                    o.requested(),
                    f.new_amount(),
                    f.old_amount(),
                ));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn validate_disabled_zeroed(allocation: &Allocation) -> Result<(), DisabledNotZeroedError> {
        for f in allocation.iter() {
            if !f.is_enabled() && (f.new_amount() != 0 || f.old_amount() != 0) {
                return Err(DisabledNotZeroedError::new(
                    f.order_id(),
                    f.new_amount(),
                    f.old_amount(),
                ));
            }
        }
        Ok(())
    }

    /// Enabled orders with a minimum receive at least that share of new
    /// stock. One unit of slack absorbs rounding of the fraction.
    #[inline]
    pub fn validate_long_term_floor<T: Ord + Copy>(
        batch: &Batch<T>,
        allocation: &Allocation,
    ) -> Result<(), LongTermFloorError> {
        for o in batch.iter() {
            let (Some(minimum), Some(f)) = (o.minimum_long_term(), allocation.get(o.id())) else {
                continue;
            };
            if !f.is_enabled() {
                continue;
            }
            let required = minimum.value() as i128 * o.requested() as i128;
            let granted = (f.new_amount() as i128 + 1) * 100;
            if granted < required {
                return Err(LongTermFloorError::new(
                    o.id(),
                    minimum,
                    o.requested(),
                    f.new_amount(),
                ));
            }
        }
        Ok(())
    }

    pub fn validate<T: Ord + Copy>(
        batch: &Batch<T>,
        allocation: &Allocation,
    ) -> Result<(), AllocationValidationError> {
        Self::validate_complete(batch, allocation)?;
        Self::validate_non_negative(allocation)?;
        Self::validate_disabled_zeroed(allocation)?;
        Self::validate_conservation(batch, allocation)?;
        Self::validate_capacity(batch, allocation)?;
        Self::validate_long_term_floor(batch, allocation)?;
        Ok(())
    }
}

#[inline]
fn saturate(v: i128) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}
