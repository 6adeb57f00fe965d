//! Monetary types for sold-price representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_is_decimal() {
        let price: Price = dec!(12.99);
        assert_eq!(price * Decimal::TWO, dec!(25.98));
    }
}
