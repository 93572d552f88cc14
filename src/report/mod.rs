//! Read-side views over committed payroll batches.
//!
//! Amounts are kept at full precision in batches; these views are where
//! they get rounded to currency precision.

mod breakdown;
mod export;

use rust_decimal::{Decimal, RoundingStrategy};

pub use breakdown::{DeductionLine, PayBreakdown, Payslip};
pub use export::{EXPORT_COLUMNS, ExportRow, PayrollExport};

/// Number of decimal places money is rendered with unless configured.
pub const DEFAULT_CURRENCY_SCALE: u32 = 2;

/// Rounds half away from zero and pads to exactly `scale` places.
///
/// # Example
///
/// ```
/// use payroll_engine::report::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(12345, 3), 2).to_string(), "12.35");
/// assert_eq!(round_currency(Decimal::new(10, 0), 2).to_string(), "10.00");
/// ```
pub fn round_currency(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_currency_half_away_from_zero() {
        assert_eq!(
            round_currency(Decimal::from_str("2.005").unwrap(), 2).to_string(),
            "2.01"
        );
        assert_eq!(
            round_currency(Decimal::from_str("-2.005").unwrap(), 2).to_string(),
            "-2.01"
        );
    }

    #[test]
    fn test_round_currency_zero_scale() {
        assert_eq!(
            round_currency(Decimal::from_str("99.5").unwrap(), 0).to_string(),
            "100"
        );
    }
}
