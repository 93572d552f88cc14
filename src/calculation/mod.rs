//! Calculation logic for the payroll engine.
//!
//! This module contains the per-employee calculators the engine runs for
//! every pay item: attendance aggregation, gross pay from the employee's
//! rate profile, and deduction resolution.

mod attendance_aggregator;
mod compensation;
mod deductions;

pub use attendance_aggregator::{AttendanceSummary, aggregate_attendance};
pub use compensation::{CompensationResult, OVERTIME_PREMIUM, calculate_compensation};
pub use deductions::{DeductionSummary, resolve_deductions};
