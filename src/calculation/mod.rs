//! Calculation logic for the leave ledger engine.
//!
//! This module contains the weekday splitting of leave date ranges, monthly
//! usage aggregation, carry-forward resolution, the monthly accrual
//! recurrence that produces a year's ledger, and the paid/LOP split applied
//! when a leave request is approved.

mod accrual;
mod calendar_span;
mod carry_forward;
mod pay_split;
mod usage;

pub use accrual::{AccrualState, MonthAccrualResult, MonthDescriptor, accrue_month, compute_year};
pub use calendar_span::{MonthSpan, clip_to_year, count_weekdays, is_weekday, split_by_month};
pub use carry_forward::{CarryForwardResolution, auto_carry_candidate, resolve_carry_forward};
pub use pay_split::{PaySplit, adjust_paid_days};
pub use usage::{MonthUsage, UsageAggregation, aggregate_usage};
