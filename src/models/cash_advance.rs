//! Cash advance ledger entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Review state of a cash advance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceStatus {
    /// Approved; deducted from pay in the period it was requested.
    Approved,
    /// Awaiting review.
    Pending,
    /// Refused.
    Rejected,
}

/// Money advanced to an employee against future pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashAdvance {
    /// Unique identifier for the advance.
    pub id: String,
    /// The employee who received the advance.
    pub employee_id: String,
    /// The advanced amount.
    pub amount: Decimal,
    /// Review state of the request.
    pub status: AdvanceStatus,
    /// The date the advance was requested.
    pub date_requested: NaiveDate,
}

impl CashAdvance {
    /// Returns true if the advance has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == AdvanceStatus::Approved
    }
}
