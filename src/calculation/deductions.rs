//! Deduction resolution.
//!
//! This module sums what is withheld from an employee's gross pay for a
//! pay period. Approved cash advances requested within the period are the
//! only source today; `other_deductions` is carried as zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CashAdvance, PayPeriod};

/// Deductions for one employee over one pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeductionSummary {
    /// Sum of approved in-period cash advances.
    pub cash_advance: Decimal,
    /// Any other deductions.
    pub other_deductions: Decimal,
}

impl DeductionSummary {
    /// Sum of every deduction, or `None` if it overflows.
    pub fn total(&self) -> Option<Decimal> {
        self.cash_advance.checked_add(self.other_deductions)
    }
}

/// Resolves the deductions for an employee over a pay period.
///
/// Only advances for `employee_id` with status approved and a request date
/// inside the period are counted.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] for a counted advance with a
/// negative amount, or when the counted advances overflow their sum.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_deductions;
/// use payroll_engine::models::{AdvanceStatus, CashAdvance, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
/// )
/// .unwrap();
/// let advance = CashAdvance {
///     id: "adv_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     amount: Decimal::new(100, 0),
///     status: AdvanceStatus::Approved,
///     date_requested: NaiveDate::from_ymd_opt(2026, 1, 8).unwrap(),
/// };
///
/// let deductions = resolve_deductions("emp_001", &period, &[&advance]).unwrap();
/// assert_eq!(deductions.cash_advance, Decimal::new(100, 0));
/// assert_eq!(deductions.other_deductions, Decimal::ZERO);
/// ```
pub fn resolve_deductions(
    employee_id: &str,
    period: &PayPeriod,
    advances: &[&CashAdvance],
) -> EngineResult<DeductionSummary> {
    let mut cash_advance = Decimal::ZERO;

    for advance in advances.iter().filter(|a| {
        a.employee_id == employee_id && a.is_approved() && period.contains_date(a.date_requested)
    }) {
        if advance.amount < Decimal::ZERO {
            return Err(EngineError::InvalidAmount {
                employee_id: employee_id.to_string(),
                field: "cash_advance.amount".to_string(),
                message: format!("advance '{}' has negative amount {}", advance.id, advance.amount),
            });
        }
        cash_advance = cash_advance.checked_add(advance.amount).ok_or_else(|| {
            EngineError::InvalidAmount {
                employee_id: employee_id.to_string(),
                field: "cash_advance.amount".to_string(),
                message: format!("advance '{}' overflows the period total", advance.id),
            }
        })?;
    }

    Ok(DeductionSummary {
        cash_advance,
        other_deductions: Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdvanceStatus;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period() -> PayPeriod {
        PayPeriod::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )
        .unwrap()
    }

    fn advance(employee_id: &str, amount: &str, status: AdvanceStatus, day: u32) -> CashAdvance {
        CashAdvance {
            id: format!("adv_{}_{}", employee_id, day),
            employee_id: employee_id.to_string(),
            amount: dec(amount),
            status,
            date_requested: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
        }
    }

    /// DR-001: approved in-period advances are summed
    #[test]
    fn test_sums_approved_advances_in_period() {
        let advances = [
            advance("emp_001", "100", AdvanceStatus::Approved, 1),
            advance("emp_001", "250.50", AdvanceStatus::Approved, 15),
        ];
        let refs: Vec<&CashAdvance> = advances.iter().collect();

        let result = resolve_deductions("emp_001", &period(), &refs).unwrap();
        assert_eq!(result.cash_advance, dec("350.50"));
        assert_eq!(result.total(), Some(dec("350.50")));
    }

    /// DR-002: pending and rejected advances are not deducted
    #[test]
    fn test_ignores_unapproved_advances() {
        let advances = [
            advance("emp_001", "100", AdvanceStatus::Pending, 3),
            advance("emp_001", "200", AdvanceStatus::Rejected, 4),
        ];
        let refs: Vec<&CashAdvance> = advances.iter().collect();

        let result = resolve_deductions("emp_001", &period(), &refs).unwrap();
        assert_eq!(result, DeductionSummary::default());
    }

    /// DR-003: advances outside the period or for others are not deducted
    #[test]
    fn test_ignores_out_of_period_and_foreign_advances() {
        let mut early = advance("emp_001", "75", AdvanceStatus::Approved, 1);
        early.date_requested = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let advances = [early, advance("emp_002", "80", AdvanceStatus::Approved, 5)];
        let refs: Vec<&CashAdvance> = advances.iter().collect();

        let result = resolve_deductions("emp_001", &period(), &refs).unwrap();
        assert_eq!(result.cash_advance, Decimal::ZERO);
    }

    #[test]
    fn test_negative_advance_is_rejected() {
        let advances = [advance("emp_001", "-10", AdvanceStatus::Approved, 2)];
        let refs: Vec<&CashAdvance> = advances.iter().collect();

        let result = resolve_deductions("emp_001", &period(), &refs);
        assert!(matches!(result, Err(EngineError::InvalidAmount { .. })));
    }

    /// DR-004: advances whose sum overflows are rejected
    #[test]
    fn test_advance_sum_overflow_is_rejected() {
        let advances = [
            advance("emp_001", "50000000000000000000000000000", AdvanceStatus::Approved, 2),
            advance("emp_001", "50000000000000000000000000000", AdvanceStatus::Approved, 3),
        ];
        let refs: Vec<&CashAdvance> = advances.iter().collect();

        match resolve_deductions("emp_001", &period(), &refs) {
            Err(EngineError::InvalidAmount { message, .. }) => {
                assert!(message.contains("adv_emp_001_3"));
            }
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }
}
