//! Core data models for the payroll engine.
//!
//! This module contains the input records supplied by the employee
//! directory, attendance store and cash-advance ledger, and the payroll
//! batch records the engine produces.

mod attendance;
mod cash_advance;
mod employee;
mod pay_period;
mod payroll;

pub use attendance::{AttendanceRecord, AttendanceType};
pub use cash_advance::{AdvanceStatus, CashAdvance};
pub use employee::{Employee, EmployeeStatus, EmploymentType};
pub use pay_period::PayPeriod;
pub use payroll::{BatchSummary, PayItem, PayrollBatch, PayrollStatus};
