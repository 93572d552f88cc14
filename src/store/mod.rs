//! Storage seams for the payroll engine.
//!
//! The engine reads from three collaborators (the employee directory, the
//! attendance store and the cash-advance ledger) and writes to a payroll
//! repository. Each is a trait so a hosted backend can be plugged in; the
//! crate ships [`InMemoryStore`], which implements all four.

mod memory;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, CashAdvance, Employee, PayPeriod, PayrollBatch, PayrollStatus,
};

pub use memory::{InMemoryStore, SeedData};

/// Read access to employee records.
pub trait EmployeeDirectory: Send + Sync {
    /// Every employee whose status is active right now.
    fn active_employees(&self) -> EngineResult<Vec<Employee>>;

    /// A single employee by id, whatever their status.
    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// The employees with the given ids that exist, whatever their status.
    fn employees_by_ids(&self, employee_ids: &[&str]) -> EngineResult<Vec<Employee>>;
}

/// Read access to daily attendance rows.
pub trait AttendanceStore: Send + Sync {
    /// Every attendance row, for all employees, dated within the period.
    fn attendance_in_period(&self, period: &PayPeriod) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Read access to cash advance requests.
pub trait CashAdvanceLedger: Send + Sync {
    /// Every advance, for all employees and statuses, requested within the
    /// period.
    fn advances_in_period(&self, period: &PayPeriod) -> EngineResult<Vec<CashAdvance>>;
}

/// Durable storage for payroll batches.
///
/// Implementations must make [`commit_batch`](Self::commit_batch) all or
/// nothing and [`approve_batch`](Self::approve_batch) a compare-and-swap,
/// and must never expose a partially written batch to readers.
pub trait PayrollRepository: Send + Sync {
    /// Stores a batch header and all of its items as one unit.
    fn commit_batch(&self, batch: PayrollBatch) -> EngineResult<()>;

    /// Loads one batch with its items.
    fn batch(&self, batch_id: Uuid) -> EngineResult<Option<PayrollBatch>>;

    /// Loads every batch matching the query, newest first.
    fn list_batches(&self, query: &BatchQuery) -> EngineResult<Vec<PayrollBatch>>;

    /// Approves a batch if and only if it is still a draft.
    fn approve_batch(&self, batch_id: Uuid, approved_at: DateTime<Utc>)
    -> EngineResult<PayrollBatch>;
}

/// Filter for listing payroll batches. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BatchQuery {
    /// Only batches in this status.
    #[serde(default)]
    pub status: Option<PayrollStatus>,
    /// Only batches with a pay item for this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Only batches whose period contains this date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl BatchQuery {
    /// Returns true if the batch satisfies every set filter.
    pub fn matches(&self, batch: &PayrollBatch) -> bool {
        self.status.is_none_or(|status| batch.status() == status)
            && self
                .employee_id
                .as_deref()
                .is_none_or(|employee_id| batch.item_for(employee_id).is_some())
            && self
                .date
                .is_none_or(|date| batch.period().contains_date(date))
    }
}
