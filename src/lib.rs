//! Payroll engine for daily- and hourly-rated crews.
//!
//! This crate aggregates attendance over a pay period, applies each
//! employee's pay basis, deducts approved cash advances, and records the
//! result as a payroll batch that moves from draft to approved before it
//! can be exported.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod store;
