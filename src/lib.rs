//! Leave Balance Ledger Engine
//!
//! This crate computes an employee's month-by-month leave ledger for a
//! calendar year: monthly credit, carry-forward (automatic or overridden by an
//! administrator), categorized weekday usage, loss-of-pay days and the closing
//! balance of each month. It also provides the paid/loss-of-pay split applied
//! when a leave request is approved.
//!
//! The computation is pure. Applications, overrides and settings are read
//! through the seams in [`store`], and [`api`] exposes the engine over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
