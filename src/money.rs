// 💰 Points arithmetic
// Balances are exact base-10 values kept at cent precision.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places every stored balance is rounded to
pub const POINTS_SCALE: u32 = 2;

/// Round to cents, half-up (0.005 -> 0.01)
pub fn round_points(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(POINTS_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_points(dec!(1.005)), dec!(1.01));
        assert_eq!(round_points(dec!(1.004)), dec!(1.00));
        assert_eq!(round_points(dec!(149.985)), dec!(149.99));
    }

    #[test]
    fn test_round_keeps_exact_values() {
        assert_eq!(round_points(dec!(99.99)), dec!(99.99));
        assert_eq!(round_points(dec!(100)), dec!(100));
        assert_eq!(round_points(Decimal::ZERO), Decimal::ZERO);
    }
}
