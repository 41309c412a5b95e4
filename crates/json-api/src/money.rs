//! Money rendering.

use rust_decimal::{Decimal, prelude::ToPrimitive as _};
use tracing::warn;

/// Render a stored amount as a JSON number.
///
/// Amounts are `NUMERIC(12, 2)`, well inside the range `f64` represents.
/// A value that still fails to convert is logged and rendered as zero.
pub(crate) fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_else(|| {
        warn!(%amount, "amount not representable as a JSON number");

        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_survive_conversion() {
        assert!((to_f64(Decimal::new(24_950, 2)) - 249.5).abs() < f64::EPSILON);
    }

    #[test]
    fn largest_storable_amount_converts() {
        let largest = Decimal::new(999_999_999_999, 2);

        assert!((to_f64(largest) - 9_999_999_999.99).abs() < 1e-3);
    }
}
