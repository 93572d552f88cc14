//! Payroll batch orchestration.
//!
//! [`PayrollEngine`] turns a pay period into a committed draft batch, moves
//! batches from draft to approved, and serves the read-side views.
//!
//! Generation fetches attendance and cash advances once for the whole
//! period and partitions them by employee in memory. Every pay item is
//! computed before anything is written; the batch is then committed as a
//! single unit, so a failure for any employee leaves no trace in storage.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{aggregate_attendance, calculate_compensation, resolve_deductions};
use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, CashAdvance, Employee, PayItem, PayPeriod, PayrollBatch};
use crate::report::{DEFAULT_CURRENCY_SCALE, PayBreakdown, PayrollExport, Payslip};
use crate::store::{
    AttendanceStore, BatchQuery, CashAdvanceLedger, EmployeeDirectory, PayrollRepository,
};

/// Generates, approves and reports on payroll batches.
#[derive(Clone)]
pub struct PayrollEngine {
    directory: Arc<dyn EmployeeDirectory>,
    attendance: Arc<dyn AttendanceStore>,
    ledger: Arc<dyn CashAdvanceLedger>,
    repository: Arc<dyn PayrollRepository>,
    clock: Arc<dyn Clock>,
    currency_scale: u32,
}

impl PayrollEngine {
    /// Creates an engine over separate collaborators.
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        attendance: Arc<dyn AttendanceStore>,
        ledger: Arc<dyn CashAdvanceLedger>,
        repository: Arc<dyn PayrollRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            attendance,
            ledger,
            repository,
            clock,
            currency_scale: DEFAULT_CURRENCY_SCALE,
        }
    }

    /// Creates an engine over one store that plays every collaborator.
    pub fn with_store<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: EmployeeDirectory + AttendanceStore + CashAdvanceLedger + PayrollRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store, clock)
    }

    /// Sets the number of decimal places used by exports and breakdowns.
    pub fn with_currency_scale(mut self, currency_scale: u32) -> Self {
        self.currency_scale = currency_scale;
        self
    }

    /// Generates and commits a draft batch for every active employee.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPeriod`] if `period_start > period_end`.
    /// - [`EngineError::GenerationFailed`] naming the employee and period if
    ///   any employee's computation fails. Nothing is committed.
    /// - Storage errors from the collaborators.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use payroll_engine::clock::SystemClock;
    /// use payroll_engine::engine::PayrollEngine;
    /// use payroll_engine::store::InMemoryStore;
    /// use chrono::NaiveDate;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let engine = PayrollEngine::with_store(store, Arc::new(SystemClock));
    /// let batch = engine
    ///     .generate(
    ///         NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///         NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     )
    ///     .unwrap();
    /// assert!(batch.items().is_empty());
    /// ```
    pub fn generate(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> EngineResult<PayrollBatch> {
        let started = Instant::now();
        let period = PayPeriod::new(period_start, period_end)?;

        let employees = self.directory.active_employees()?;
        let attendance = self.attendance.attendance_in_period(&period)?;
        let advances = self.ledger.advances_in_period(&period)?;

        let attendance_by_employee = partition(&attendance, |r| r.employee_id.as_str());
        let advances_by_employee = partition(&advances, |a| a.employee_id.as_str());

        let batch_id = Uuid::new_v4();
        let items = employees
            .iter()
            .map(|employee| {
                build_pay_item(
                    batch_id,
                    employee,
                    &period,
                    slice_for(&attendance_by_employee, &employee.id),
                    slice_for(&advances_by_employee, &employee.id),
                )
                .map_err(|source| {
                    warn!(
                        employee_id = %employee.id,
                        period_start = %period_start,
                        period_end = %period_end,
                        error = %source,
                        "Payroll generation aborted"
                    );
                    EngineError::GenerationFailed {
                        employee_id: employee.id.clone(),
                        period_start,
                        period_end,
                        source: Box::new(source),
                    }
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let batch = PayrollBatch::draft(batch_id, period, self.clock.now(), items)?;
        self.repository.commit_batch(batch.clone())?;

        info!(
            batch_id = %batch.id(),
            period_start = %period_start,
            period_end = %period_end,
            items = batch.items().len(),
            attendance_rows = attendance.len(),
            duration_us = started.elapsed().as_micros() as u64,
            "Payroll batch generated"
        );

        Ok(batch)
    }

    /// Approves a draft batch.
    ///
    /// # Errors
    ///
    /// - [`EngineError::BatchNotFound`] for an unknown id.
    /// - [`EngineError::StatusConflict`] carrying the current status if the
    ///   batch is not a draft; the stored batch is left unchanged.
    pub fn approve(&self, batch_id: Uuid) -> EngineResult<PayrollBatch> {
        match self.repository.approve_batch(batch_id, self.clock.now()) {
            Ok(batch) => {
                info!(batch_id = %batch_id, "Payroll batch approved");
                Ok(batch)
            }
            Err(err) => {
                warn!(batch_id = %batch_id, error = %err, "Payroll approval refused");
                Err(err)
            }
        }
    }

    /// Loads a batch with its items.
    pub fn batch(&self, batch_id: Uuid) -> EngineResult<PayrollBatch> {
        self.repository
            .batch(batch_id)?
            .ok_or(EngineError::BatchNotFound { batch_id })
    }

    /// Lists batches matching the query, newest first.
    pub fn list_batches(&self, query: &BatchQuery) -> EngineResult<Vec<PayrollBatch>> {
        self.repository.list_batches(query)
    }

    /// Every pay item for an employee with its batch header, newest first.
    pub fn payslips(&self, employee_id: &str) -> EngineResult<Vec<Payslip>> {
        if self.directory.employee(employee_id)?.is_none() {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }

        let query = BatchQuery {
            employee_id: Some(employee_id.to_string()),
            ..BatchQuery::default()
        };
        Ok(self
            .repository
            .list_batches(&query)?
            .iter()
            .filter_map(|batch| batch.item_for(employee_id).map(|item| Payslip::new(batch, item)))
            .collect())
    }

    /// Lays out a batch for export, whatever its status.
    pub fn export(&self, batch_id: Uuid) -> EngineResult<PayrollExport> {
        let batch = self.batch(batch_id)?;
        let ids: Vec<&str> = batch
            .items()
            .iter()
            .map(|item| item.employee_id.as_str())
            .collect();
        let employees = self.directory.employees_by_ids(&ids)?;
        PayrollExport::build(&batch, &employees, self.currency_scale)
    }

    /// Breaks one employee's pay item down into earnings and deductions.
    pub fn breakdown(&self, batch_id: Uuid, employee_id: &str) -> EngineResult<PayBreakdown> {
        let batch = self.batch(batch_id)?;
        let item = batch
            .item_for(employee_id)
            .ok_or_else(|| EngineError::PayItemNotFound {
                batch_id,
                employee_id: employee_id.to_string(),
            })?;
        let employee =
            self.directory
                .employee(employee_id)?
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    employee_id: employee_id.to_string(),
                })?;
        Ok(PayBreakdown::build(
            &batch,
            item,
            &employee,
            self.currency_scale,
        ))
    }
}

/// Runs the three calculators for one employee and assembles the item.
fn build_pay_item(
    payroll_id: Uuid,
    employee: &Employee,
    period: &PayPeriod,
    attendance: &[&AttendanceRecord],
    advances: &[&CashAdvance],
) -> EngineResult<PayItem> {
    let summary = aggregate_attendance(&employee.id, period, attendance)?;
    let compensation = calculate_compensation(employee, &summary)?;
    let deductions = resolve_deductions(&employee.id, period, advances)?;

    debug!(
        employee_id = %employee.id,
        days_worked = summary.days_worked,
        total_hours = %summary.total_hours,
        overtime_hours = %summary.overtime_hours,
        cash_advance = %deductions.cash_advance,
        "Computed pay item"
    );

    let net_pay = deductions
        .total()
        .and_then(|total| compensation.gross_pay.checked_sub(total))
        .ok_or_else(|| EngineError::InvalidAmount {
            employee_id: employee.id.clone(),
            field: "net_pay".to_string(),
            message: "amount exceeds the representable range".to_string(),
        })?;

    Ok(PayItem {
        payroll_id,
        employee_id: employee.id.clone(),
        days_worked: summary.days_worked,
        hours_worked: summary.total_hours,
        overtime_hours: summary.overtime_hours,
        basic_pay: compensation.basic_pay,
        overtime_pay: compensation.overtime_pay,
        gross_pay: compensation.gross_pay,
        cash_advance: deductions.cash_advance,
        other_deductions: deductions.other_deductions,
        net_pay,
    })
}

fn partition<'a, T>(
    rows: &'a [T],
    key: impl Fn(&'a T) -> &'a str,
) -> HashMap<&'a str, Vec<&'a T>> {
    let mut grouped: HashMap<&str, Vec<&T>> = HashMap::new();
    for row in rows {
        grouped.entry(key(row)).or_default().push(row);
    }
    grouped
}

fn slice_for<'m, 'a, T>(
    grouped: &'m HashMap<&'a str, Vec<&'a T>>,
    employee_id: &str,
) -> &'m [&'a T] {
    grouped.get(employee_id).map(Vec::as_slice).unwrap_or(&[])
}
