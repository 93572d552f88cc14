//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for generating, approving,
//! listing and exporting payroll batches.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{GeneratePayrollRequest, PeriodType};
pub use response::{ApiError, ApiErrorResponse, status_for};
pub use state::AppState;
