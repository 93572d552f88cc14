//! Payroll batch and pay item models.
//!
//! This module contains the [`PayrollBatch`] state machine and the
//! [`PayItem`] lines it owns. A batch is created complete and in
//! [`PayrollStatus::Draft`]; its items are never handed out mutably, and
//! the only transition any operation performs is draft → approved.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;
use crate::error::{EngineError, EngineResult};

/// Lifecycle status of a payroll batch.
///
/// Statuses only move forward: draft → approved → paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Generated and awaiting approval.
    Draft,
    /// Approved and locked.
    Approved,
    /// Paid out. Reserved; no current operation reaches it.
    Paid,
}

impl PayrollStatus {
    /// Returns true if `next` is the single legal step after `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayrollStatus;
    ///
    /// assert!(PayrollStatus::Draft.can_transition_to(PayrollStatus::Approved));
    /// assert!(!PayrollStatus::Draft.can_transition_to(PayrollStatus::Paid));
    /// assert!(!PayrollStatus::Approved.can_transition_to(PayrollStatus::Draft));
    /// ```
    pub fn can_transition_to(self, next: PayrollStatus) -> bool {
        matches!(
            (self, next),
            (PayrollStatus::Draft, PayrollStatus::Approved)
                | (PayrollStatus::Approved, PayrollStatus::Paid)
        )
    }

    /// Returns the lowercase name used in storage and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            PayrollStatus::Draft => "draft",
            PayrollStatus::Approved => "approved",
            PayrollStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One employee's computed pay line within a payroll batch.
///
/// `gross_pay` is `basic_pay + overtime_pay` and `net_pay` is
/// `gross_pay - cash_advance - other_deductions`; [`PayrollBatch::draft`]
/// refuses items that break either equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayItem {
    /// The batch this item belongs to.
    pub payroll_id: Uuid,
    /// The employee this item pays.
    pub employee_id: String,
    /// Complete shifts (clock-in and clock-out) in the period.
    pub days_worked: u32,
    /// Total recorded hours, overtime included.
    pub hours_worked: Decimal,
    /// Recorded overtime hours.
    pub overtime_hours: Decimal,
    /// Pay for days or hours at the straight rate.
    pub basic_pay: Decimal,
    /// Overtime premium.
    pub overtime_pay: Decimal,
    /// Pre-deduction earnings.
    pub gross_pay: Decimal,
    /// Approved cash advances deducted this period.
    pub cash_advance: Decimal,
    /// Any other deductions.
    pub other_deductions: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
}

impl PayItem {
    /// Sum of every deduction on the item.
    ///
    /// Saturates at `Decimal::MAX`; items accepted into a batch always have
    /// a representable total.
    pub fn total_deductions(&self) -> Decimal {
        self.cash_advance.saturating_add(self.other_deductions)
    }

    fn check_invariants(&self, payroll_id: Uuid) -> EngineResult<()> {
        let violation = if self.payroll_id != payroll_id {
            Some(format!("belongs to batch {}", self.payroll_id))
        } else if self.gross_pay < Decimal::ZERO {
            Some(format!("gross pay {} is negative", self.gross_pay))
        } else if self.basic_pay.checked_add(self.overtime_pay) != Some(self.gross_pay) {
            Some(format!(
                "gross pay {} is not basic {} plus overtime {}",
                self.gross_pay, self.basic_pay, self.overtime_pay
            ))
        } else if self
            .cash_advance
            .checked_add(self.other_deductions)
            .and_then(|deductions| self.gross_pay.checked_sub(deductions))
            != Some(self.net_pay)
        {
            Some(format!(
                "net pay {} is not gross {} less cash advance {} and other deductions {}",
                self.net_pay, self.gross_pay, self.cash_advance, self.other_deductions
            ))
        } else {
            None
        };

        match violation {
            Some(message) => Err(EngineError::InvalidPayItem {
                employee_id: self.employee_id.clone(),
                message,
            }),
            None => Ok(()),
        }
    }
}

/// The unit of work grouping every pay item generated for one period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayPeriod, PayrollBatch, PayrollStatus};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use uuid::Uuid;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
/// )
/// .unwrap();
/// let created_at = Utc.with_ymd_and_hms(2026, 1, 16, 9, 0, 0).unwrap();
///
/// let mut batch = PayrollBatch::draft(Uuid::new_v4(), period, created_at, vec![]).unwrap();
/// assert_eq!(batch.status(), PayrollStatus::Draft);
///
/// batch.approve(created_at).unwrap();
/// assert_eq!(batch.status(), PayrollStatus::Approved);
/// assert!(batch.approve(created_at).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollBatch {
    id: Uuid,
    #[serde(flatten)]
    period: PayPeriod,
    status: PayrollStatus,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    items: Vec<PayItem>,
}

impl PayrollBatch {
    /// Builds a draft batch from a complete item set.
    ///
    /// Items are ordered by employee id. Fails with
    /// [`EngineError::InvalidPayItem`] if an item names another batch,
    /// breaks the pay equations, or repeats an employee.
    pub fn draft(
        id: Uuid,
        period: PayPeriod,
        created_at: DateTime<Utc>,
        mut items: Vec<PayItem>,
    ) -> EngineResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut totals = Some((Decimal::ZERO, Decimal::ZERO));
        for item in &items {
            item.check_invariants(id)?;
            if !seen.insert(item.employee_id.as_str()) {
                return Err(EngineError::InvalidPayItem {
                    employee_id: item.employee_id.clone(),
                    message: "employee appears more than once in the batch".to_string(),
                });
            }
            totals = totals.and_then(|(gross, net)| {
                Some((
                    gross.checked_add(item.gross_pay)?,
                    net.checked_add(item.net_pay)?,
                ))
            });
            if totals.is_none() {
                return Err(EngineError::InvalidPayItem {
                    employee_id: item.employee_id.clone(),
                    message: "batch pay totals exceed the representable range".to_string(),
                });
            }
        }
        items.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

        Ok(Self {
            id,
            period,
            status: PayrollStatus::Draft,
            created_at,
            approved_at: None,
            items,
        })
    }

    /// Moves the batch from draft to approved, stamping `approved_at`.
    ///
    /// Any other starting status is a [`EngineError::StatusConflict`] and
    /// leaves the batch untouched.
    pub fn approve(&mut self, approved_at: DateTime<Utc>) -> EngineResult<()> {
        if !self.status.can_transition_to(PayrollStatus::Approved) {
            return Err(EngineError::StatusConflict {
                batch_id: self.id,
                operation: "approve",
                required: PayrollStatus::Draft,
                current: self.status,
            });
        }
        self.status = PayrollStatus::Approved;
        self.approved_at = Some(approved_at);
        Ok(())
    }

    /// The batch id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The period the batch covers.
    pub fn period(&self) -> PayPeriod {
        self.period
    }

    /// The current status.
    pub fn status(&self) -> PayrollStatus {
        self.status
    }

    /// When the batch was generated.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the batch was approved, if it has been.
    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// The pay items, ordered by employee id.
    pub fn items(&self) -> &[PayItem] {
        &self.items
    }

    /// The item for one employee, if the employee is in the batch.
    pub fn item_for(&self, employee_id: &str) -> Option<&PayItem> {
        self.items
            .binary_search_by(|item| item.employee_id.as_str().cmp(employee_id))
            .ok()
            .map(|index| &self.items[index])
    }

    /// Header and totals without the item list.
    ///
    /// [`draft`](Self::draft) rejects item sets whose totals overflow, so
    /// the saturating sums here are exact.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            id: self.id,
            period: self.period,
            status: self.status,
            created_at: self.created_at,
            approved_at: self.approved_at,
            employee_count: self.items.len(),
            total_gross_pay: self
                .items
                .iter()
                .fold(Decimal::ZERO, |total, i| total.saturating_add(i.gross_pay)),
            total_net_pay: self
                .items
                .iter()
                .fold(Decimal::ZERO, |total, i| total.saturating_add(i.net_pay)),
        }
    }
}

/// A batch header with aggregate totals, used for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// The batch id.
    pub id: Uuid,
    /// The period the batch covers.
    #[serde(flatten)]
    pub period: PayPeriod,
    /// The current status.
    pub status: PayrollStatus,
    /// When the batch was generated.
    pub created_at: DateTime<Utc>,
    /// When the batch was approved, if it has been.
    pub approved_at: Option<DateTime<Utc>>,
    /// Number of pay items in the batch.
    pub employee_count: usize,
    /// Sum of gross pay over all items.
    pub total_gross_pay: Decimal,
    /// Sum of net pay over all items.
    pub total_net_pay: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
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

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 16, hour, 0, 0).unwrap()
    }

    fn item(payroll_id: Uuid, employee_id: &str, gross: &str, advance: &str) -> PayItem {
        PayItem {
            payroll_id,
            employee_id: employee_id.to_string(),
            days_worked: 5,
            hours_worked: dec("40"),
            overtime_hours: Decimal::ZERO,
            basic_pay: dec(gross),
            overtime_pay: Decimal::ZERO,
            gross_pay: dec(gross),
            cash_advance: dec(advance),
            other_deductions: Decimal::ZERO,
            net_pay: dec(gross) - dec(advance),
        }
    }

    /// PB-001: a new batch is draft with no approval stamp
    #[test]
    fn test_draft_batch_starts_unapproved() {
        let id = Uuid::new_v4();
        let items = vec![item(id, "emp_001", "600", "100")];
        let batch = PayrollBatch::draft(id, period(), at(9), items).unwrap();
        assert_eq!(batch.status(), PayrollStatus::Draft);
        assert!(batch.approved_at().is_none());
        assert_eq!(batch.items().len(), 1);
    }

    /// PB-002: approve stamps approved_at
    #[test]
    fn test_approve_from_draft() {
        let id = Uuid::new_v4();
        let mut batch = PayrollBatch::draft(id, period(), at(9), vec![]).unwrap();
        batch.approve(at(10)).unwrap();
        assert_eq!(batch.status(), PayrollStatus::Approved);
        assert_eq!(batch.approved_at(), Some(at(10)));
    }

    /// PB-003: second approval conflicts and changes nothing
    #[test]
    fn test_double_approve_conflicts_without_change() {
        let id = Uuid::new_v4();
        let mut batch = PayrollBatch::draft(id, period(), at(9), vec![]).unwrap();
        batch.approve(at(10)).unwrap();
        let before = batch.clone();

        match batch.approve(at(11)) {
            Err(EngineError::StatusConflict { current, .. }) => {
                assert_eq!(current, PayrollStatus::Approved);
            }
            other => panic!("Expected StatusConflict, got {:?}", other),
        }
        assert_eq!(batch, before);
    }

    /// PB-004: one item per employee
    #[test]
    fn test_duplicate_employee_is_rejected() {
        let id = Uuid::new_v4();
        let items = vec![item(id, "emp_001", "600", "0"), item(id, "emp_001", "500", "0")];
        let result = PayrollBatch::draft(id, period(), at(9), items);
        assert!(matches!(result, Err(EngineError::InvalidPayItem { .. })));
    }

    #[test]
    fn test_item_from_another_batch_is_rejected() {
        let id = Uuid::new_v4();
        let items = vec![item(Uuid::new_v4(), "emp_001", "600", "0")];
        assert!(PayrollBatch::draft(id, period(), at(9), items).is_err());
    }

    #[test]
    fn test_inconsistent_net_pay_is_rejected() {
        let id = Uuid::new_v4();
        let mut bad = item(id, "emp_001", "600", "100");
        bad.net_pay = dec("600");
        let result = PayrollBatch::draft(id, period(), at(9), vec![bad]);
        match result {
            Err(EngineError::InvalidPayItem { employee_id, message }) => {
                assert_eq!(employee_id, "emp_001");
                assert!(message.contains("net pay"));
            }
            other => panic!("Expected InvalidPayItem, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_total_overflow_is_rejected() {
        let id = Uuid::new_v4();
        let huge = "50000000000000000000000000000";
        let items = vec![item(id, "emp_001", huge, "0"), item(id, "emp_002", huge, "0")];
        match PayrollBatch::draft(id, period(), at(9), items) {
            Err(EngineError::InvalidPayItem { employee_id, message }) => {
                assert_eq!(employee_id, "emp_002");
                assert!(message.contains("totals"));
            }
            other => panic!("Expected InvalidPayItem, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_net_pay_is_allowed() {
        let id = Uuid::new_v4();
        let batch =
            PayrollBatch::draft(id, period(), at(9), vec![item(id, "emp_001", "50", "100")])
                .unwrap();
        assert_eq!(batch.items()[0].net_pay, dec("-50"));
    }

    #[test]
    fn test_items_are_ordered_and_searchable() {
        let id = Uuid::new_v4();
        let items = vec![
            item(id, "emp_003", "300", "0"),
            item(id, "emp_001", "100", "0"),
            item(id, "emp_002", "200", "0"),
        ];
        let batch = PayrollBatch::draft(id, period(), at(9), items).unwrap();
        let order: Vec<&str> = batch.items().iter().map(|i| i.employee_id.as_str()).collect();
        assert_eq!(order, vec!["emp_001", "emp_002", "emp_003"]);
        assert_eq!(batch.item_for("emp_002").unwrap().gross_pay, dec("200"));
        assert!(batch.item_for("emp_999").is_none());
    }

    #[test]
    fn test_summary_totals() {
        let id = Uuid::new_v4();
        let items = vec![item(id, "emp_001", "600", "100"), item(id, "emp_002", "400", "0")];
        let summary = PayrollBatch::draft(id, period(), at(9), items).unwrap().summary();
        assert_eq!(summary.employee_count, 2);
        assert_eq!(summary.total_gross_pay, dec("1000"));
        assert_eq!(summary.total_net_pay, dec("900"));
    }

    #[test]
    fn test_status_is_monotonic() {
        use PayrollStatus::*;
        for from in [Draft, Approved, Paid] {
            for to in [Draft, Approved, Paid] {
                if from.can_transition_to(to) {
                    assert!(to > from);
                }
            }
        }
        assert!(!Paid.can_transition_to(Draft));
        assert!(!Approved.can_transition_to(Approved));
    }

    #[test]
    fn test_serialize_batch_uses_period_field_names() {
        let id = Uuid::new_v4();
        let batch = PayrollBatch::draft(id, period(), at(9), vec![]).unwrap();
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["period_start"], "2026-01-01");
        assert_eq!(json["period_end"], "2026-01-15");
        assert_eq!(json["status"], "draft");
        assert!(json["approved_at"].is_null());
    }
}
