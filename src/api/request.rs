//! Request types for the payroll API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PayPeriod;

/// Preset period lengths for [`GeneratePayrollRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// The Monday-to-Sunday week containing the reference date.
    Weekly,
    /// The calendar month containing the reference date.
    Monthly,
}

/// Request body for `POST /payrolls`.
///
/// The period is given either as explicit inclusive bounds
/// (`period_start` and `period_end`) or as a `period_type` with a
/// `reference_date`. Explicit bounds are validated by the engine, so an
/// inverted range is reported as `INVALID_PERIOD` rather than a JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// First day of the pay period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<NaiveDate>,
    /// Last day of the pay period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    /// Preset period length, used instead of explicit bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_type: Option<PeriodType>,
    /// Any date inside the preset period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

impl GeneratePayrollRequest {
    /// Resolves the requested period to its first and last day.
    ///
    /// # Errors
    ///
    /// Returns a message naming the missing field when neither form is
    /// complete, or when both forms are mixed.
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), String> {
        match (
            self.period_type,
            self.reference_date,
            self.period_start,
            self.period_end,
        ) {
            (Some(period_type), Some(reference), None, None) => {
                let period = match period_type {
                    PeriodType::Weekly => PayPeriod::week_containing(reference),
                    PeriodType::Monthly => PayPeriod::month_containing(reference),
                };
                Ok((period.start_date(), period.end_date()))
            }
            (None, None, Some(start), Some(end)) => Ok((start, end)),
            (Some(_), _, Some(_), _) | (Some(_), _, _, Some(_)) => Err(
                "period_type cannot be combined with period_start or period_end".to_string(),
            ),
            (Some(_), None, ..) => Err("missing field `reference_date`".to_string()),
            (None, Some(_), ..) => Err("missing field `period_type`".to_string()),
            (None, None, None, _) => Err("missing field `period_start`".to_string()),
            (None, None, Some(_), None) => Err("missing field `period_end`".to_string()),
        }
    }
}
