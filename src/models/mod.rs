//! Core data models for the leave ledger engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod leave_application;
mod leave_override;
mod ledger_entry;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, LedgerCalculationResult};
pub use leave_application::{
    LeaveApplication, LeaveApplicationRecord, LeaveStatus, LeaveType,
    OtherLeaveTag,
};
pub use leave_override::{LeaveBalanceOverride, MonthOverride, MonthlyOverrides};
pub use ledger_entry::{CategoryUsage, LedgerTotals, MonthlyLedgerEntry, YearLedger};
