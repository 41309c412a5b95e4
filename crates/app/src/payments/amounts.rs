//! Currency amount conversion.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Convert a major-unit amount into minor units (×100), rounding half away
/// from zero. `None` when the result does not fit in an `i64`.
#[must_use]
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
