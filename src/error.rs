//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while generating, approving and
//! querying payroll batches.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{EmploymentType, PayrollStatus};

/// Coarse classification of an [`EngineError`].
///
/// Callers (the HTTP layer in particular) use the kind to decide how to
/// report an error without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request or the input records were invalid.
    Validation,
    /// A referenced record does not exist.
    NotFound,
    /// The operation is not legal in the record's current state.
    Conflict,
    /// Attendance values could not be aggregated.
    Aggregation,
    /// Configuration or seed data could not be loaded.
    Config,
    /// The backing store failed.
    Storage,
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// assert_eq!(error.kind(), ErrorKind::Config);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The pay period ends before it starts.
    #[error("Invalid pay period: start {start} is after end {end}")]
    InvalidPeriod {
        /// The requested period start.
        start: NaiveDate,
        /// The requested period end.
        end: NaiveDate,
    },

    /// The employee has no rate for their employment type.
    #[error("Employee '{employee_id}' has no {rate} rate for employment type {employment_type:?}")]
    MissingRate {
        /// The employee missing the rate.
        employee_id: String,
        /// The employment type that requires the rate.
        employment_type: EmploymentType,
        /// Which rate is missing ("daily" or "hourly").
        rate: &'static str,
    },

    /// A rate or amount on an input record was not usable.
    #[error("Invalid value for '{field}' on record of employee '{employee_id}': {message}")]
    InvalidAmount {
        /// The employee the record belongs to.
        employee_id: String,
        /// The offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A pay item set could not form a valid batch.
    #[error("Invalid pay item for employee '{employee_id}': {message}")]
    InvalidPayItem {
        /// The employee whose item was rejected.
        employee_id: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// An attendance value was not a usable number of hours.
    #[error(
        "Malformed attendance value for employee '{employee_id}' on {date}: {field} = '{value}'"
    )]
    MalformedAttendance {
        /// The employee the row belongs to.
        employee_id: String,
        /// The attendance date of the row.
        date: NaiveDate,
        /// The field that failed to parse.
        field: &'static str,
        /// The raw stored value.
        value: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The missing employee id.
        employee_id: String,
    },

    /// No payroll batch exists with the given id.
    #[error("Payroll batch not found: {batch_id}")]
    BatchNotFound {
        /// The missing batch id.
        batch_id: Uuid,
    },

    /// The batch has no item for the given employee.
    #[error("No pay item for employee '{employee_id}' in payroll batch {batch_id}")]
    PayItemNotFound {
        /// The batch that was searched.
        batch_id: Uuid,
        /// The employee without an item.
        employee_id: String,
    },

    /// The batch is not in the status the operation requires.
    #[error("Payroll batch {batch_id} is {current}; {operation} requires {required}")]
    StatusConflict {
        /// The batch in question.
        batch_id: Uuid,
        /// The operation that was refused.
        operation: &'static str,
        /// The status the operation requires.
        required: PayrollStatus,
        /// The status the batch is actually in.
        current: PayrollStatus,
    },

    /// A batch with this id was already committed.
    #[error("Payroll batch {batch_id} already exists")]
    DuplicateBatch {
        /// The batch id that was committed twice.
        batch_id: Uuid,
    },

    /// Generation failed for one employee, so nothing was committed.
    #[error(
        "Payroll generation for {period_start} to {period_end} failed at employee '{employee_id}': {source}"
    )]
    GenerationFailed {
        /// The employee whose computation failed.
        employee_id: String,
        /// The requested period start.
        period_start: NaiveDate,
        /// The requested period end.
        period_end: NaiveDate,
        /// The underlying failure.
        #[source]
        source: Box<EngineError>,
    },

    /// The backing store could not be used.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Returns the coarse classification of this error.
    ///
    /// A [`EngineError::GenerationFailed`] reports the kind of its source.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Config
            }
            EngineError::InvalidPeriod { .. }
            | EngineError::MissingRate { .. }
            | EngineError::InvalidAmount { .. }
            | EngineError::InvalidPayItem { .. } => ErrorKind::Validation,
            EngineError::MalformedAttendance { .. } => ErrorKind::Aggregation,
            EngineError::EmployeeNotFound { .. }
            | EngineError::BatchNotFound { .. }
            | EngineError::PayItemNotFound { .. } => ErrorKind::NotFound,
            EngineError::StatusConflict { .. } | EngineError::DuplicateBatch { .. } => {
                ErrorKind::Conflict
            }
            EngineError::GenerationFailed { source, .. } => source.kind(),
            EngineError::Storage { .. } => ErrorKind::Storage,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
