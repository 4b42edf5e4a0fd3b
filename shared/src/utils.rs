//! # Shared Computation
//!
//! Money math used on both sides of the wire: the platform service fee and
//! the total an orderer pays for a finalized order.
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use shared::utils::order_total;
//!
//! // items 50, reward 25 -> fee 1.125 -> total 76.125
//! assert_eq!(order_total(dec!(50), dec!(25)), dec!(76.125));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Platform service fee rate, applied to items cost plus reward
pub const SERVICE_FEE_RATE: Decimal = dec!(0.015);

/// Service fee: 1.5% of (items cost + reward)
pub fn service_fee(items_cost: Decimal, reward: Decimal) -> Decimal {
    (items_cost + reward) * SERVICE_FEE_RATE
}

/// Total an orderer pays: items cost + reward + service fee
pub fn order_total(items_cost: Decimal, reward: Decimal) -> Decimal {
    items_cost + reward + service_fee(items_cost, reward)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_fee() {
        assert_eq!(service_fee(dec!(50), dec!(25)), dec!(1.125));
        assert_eq!(service_fee(dec!(0), dec!(0)), dec!(0));
    }

    #[test]
    fn test_order_total() {
        assert_eq!(order_total(dec!(50), dec!(25)), dec!(76.125));
        assert_eq!(order_total(dec!(100), dec!(0)), dec!(101.5));
    }

    #[test]
    fn test_fee_is_exact_not_floating() {
        // 0.1 + 0.2 style rounding must not creep into totals
        assert_eq!(service_fee(dec!(0.1), dec!(0.2)), dec!(0.0045));
    }
}
