//! In-memory implementation of every storage seam.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::{AttendanceStore, BatchQuery, CashAdvanceLedger, EmployeeDirectory, PayrollRepository};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, CashAdvance, Employee, PayPeriod, PayrollBatch};

/// Records loaded into an [`InMemoryStore`] at startup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeedData {
    /// Employee directory entries.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Attendance rows.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Cash advance requests.
    #[serde(default)]
    pub cash_advances: Vec<CashAdvance>,
}

#[derive(Debug, Default)]
struct Records {
    employees: BTreeMap<String, Employee>,
    attendance: Vec<AttendanceRecord>,
    advances: Vec<CashAdvance>,
}

/// A thread-safe store holding collaborator records and payroll batches.
///
/// Collaborator records and batches sit behind separate locks. A batch is
/// inserted, and approved, while holding the batch write lock, so readers
/// see either none of a batch or all of it.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Records>,
    batches: RwLock<HashMap<Uuid, PayrollBatch>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with seed records.
    pub fn from_seed(seed: SeedData) -> Self {
        let records = Records {
            employees: seed
                .employees
                .into_iter()
                .map(|e| (e.id.clone(), e))
                .collect(),
            attendance: seed.attendance,
            advances: seed.cash_advances,
        };
        Self {
            records: RwLock::new(records),
            batches: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces an employee record.
    pub fn upsert_employee(&self, employee: Employee) -> EngineResult<()> {
        write(&self.records)?
            .employees
            .insert(employee.id.clone(), employee);
        Ok(())
    }

    /// Appends an attendance row.
    pub fn add_attendance(&self, record: AttendanceRecord) -> EngineResult<()> {
        write(&self.records)?.attendance.push(record);
        Ok(())
    }

    /// Appends a cash advance request.
    pub fn add_cash_advance(&self, advance: CashAdvance) -> EngineResult<()> {
        write(&self.records)?.advances.push(advance);
        Ok(())
    }

    /// Number of committed batches.
    pub fn batch_count(&self) -> EngineResult<usize> {
        Ok(read(&self.batches)?.len())
    }
}

fn read<T>(lock: &RwLock<T>) -> EngineResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| EngineError::Storage {
        message: "store lock poisoned".to_string(),
    })
}

fn write<T>(lock: &RwLock<T>) -> EngineResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| EngineError::Storage {
        message: "store lock poisoned".to_string(),
    })
}

impl EmployeeDirectory for InMemoryStore {
    fn active_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(read(&self.records)?
            .employees
            .values()
            .filter(|e| e.is_active())
            .cloned()
            .collect())
    }

    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(read(&self.records)?.employees.get(employee_id).cloned())
    }

    fn employees_by_ids(&self, employee_ids: &[&str]) -> EngineResult<Vec<Employee>> {
        let records = read(&self.records)?;
        Ok(employee_ids
            .iter()
            .filter_map(|id| records.employees.get(*id).cloned())
            .collect())
    }
}

impl AttendanceStore for InMemoryStore {
    fn attendance_in_period(&self, period: &PayPeriod) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(read(&self.records)?
            .attendance
            .iter()
            .filter(|r| period.contains_date(r.date))
            .cloned()
            .collect())
    }
}

impl CashAdvanceLedger for InMemoryStore {
    fn advances_in_period(&self, period: &PayPeriod) -> EngineResult<Vec<CashAdvance>> {
        Ok(read(&self.records)?
            .advances
            .iter()
            .filter(|a| period.contains_date(a.date_requested))
            .cloned()
            .collect())
    }
}

impl PayrollRepository for InMemoryStore {
    fn commit_batch(&self, batch: PayrollBatch) -> EngineResult<()> {
        let mut batches = write(&self.batches)?;
        if batches.contains_key(&batch.id()) {
            return Err(EngineError::DuplicateBatch {
                batch_id: batch.id(),
            });
        }
        debug!(batch_id = %batch.id(), items = batch.items().len(), "Committing payroll batch");
        batches.insert(batch.id(), batch);
        Ok(())
    }

    fn batch(&self, batch_id: Uuid) -> EngineResult<Option<PayrollBatch>> {
        Ok(read(&self.batches)?.get(&batch_id).cloned())
    }

    fn list_batches(&self, query: &BatchQuery) -> EngineResult<Vec<PayrollBatch>> {
        let mut found: Vec<PayrollBatch> = read(&self.batches)?
            .values()
            .filter(|b| query.matches(b))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(found)
    }

    fn approve_batch(
        &self,
        batch_id: Uuid,
        approved_at: DateTime<Utc>,
    ) -> EngineResult<PayrollBatch> {
        let mut batches = write(&self.batches)?;
        let batch = batches
            .get_mut(&batch_id)
            .ok_or(EngineError::BatchNotFound { batch_id })?;
        batch.approve(approved_at)?;
        Ok(batch.clone())
    }
}
