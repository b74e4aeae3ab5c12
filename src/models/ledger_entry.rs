//! Ledger entry models.
//!
//! A [`MonthlyLedgerEntry`] is the fully computed state of one employee's leave
//! balance for one calendar month. Entries are always produced twelve at a time
//! and are never patched individually.

use serde::{Deserialize, Serialize};

use super::{AuditStep, AuditWarning, LeaveType};

/// Weekday leave taken in a month, broken down by category.
///
/// # Example
///
/// ```
/// use leave_ledger::models::{CategoryUsage, LeaveType};
///
/// let mut usage = CategoryUsage::default();
/// usage.add(&LeaveType::Casual, 2);
/// usage.add(&LeaveType::from("study"), 1);
///
/// assert_eq!(usage.tracked_total(), 2);
/// assert_eq!(usage.uncategorized, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUsage {
    /// Sick leave weekdays.
    pub sick: u32,
    /// Casual leave weekdays.
    pub casual: u32,
    /// Weekdays of leave filed under an untracked type. Reported, but never
    /// deducted from the balance.
    pub uncategorized: u32,
}

impl CategoryUsage {
    /// Adds `days` to the bucket for `leave_type`.
    pub fn add(&mut self, leave_type: &LeaveType, days: u32) {
        let bucket = match leave_type {
            LeaveType::Sick => &mut self.sick,
            LeaveType::Casual => &mut self.casual,
            LeaveType::Other(_) => &mut self.uncategorized,
        };
        *bucket = bucket.saturating_add(days);
    }

    /// Days that consume the monthly balance.
    pub fn tracked_total(&self) -> u32 {
        self.sick.saturating_add(self.casual)
    }

    /// Sums two usage records bucket by bucket.
    pub fn merged(self, other: CategoryUsage) -> CategoryUsage {
        CategoryUsage {
            sick: self.sick.saturating_add(other.sick),
            casual: self.casual.saturating_add(other.casual),
            uncategorized: self.uncategorized.saturating_add(other.uncategorized),
        }
    }
}

/// One month of an employee's leave ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLedgerEntry {
    /// Calendar month (1-12).
    pub month: u32,
    /// Days credited for the month.
    pub monthly_credit: u32,
    /// Days carried in from the previous month or set by an override.
    pub carried_forward: u32,
    /// Extra days granted by an administrator.
    pub additional_credit: u32,
    /// Days available to use this month.
    pub available: u32,
    /// Weekday leave taken, by category.
    pub category_usage: CategoryUsage,
    /// Loss-of-pay days attributed to this month.
    pub lop_days: u32,
    /// Days left at the end of the month. Never negative.
    pub balance: u32,
    /// True when the carry-forward was derived automatically and is positive.
    pub is_auto_carried: bool,
    /// True when an administrator override governs this month.
    pub is_overridden: bool,
}

/// Year-level totals derived from the twelve monthly entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Sum of the monthly credits.
    pub total_credit: u32,
    /// Sum of administrator-granted additional credit.
    pub total_additional_credit: u32,
    /// Usage across the whole year, by category.
    pub usage: CategoryUsage,
    /// Loss-of-pay days across the whole year.
    pub lop_days: u32,
    /// December's balance.
    pub closing_balance: u32,
}

impl LedgerTotals {
    /// Derives totals from a sequence of monthly entries.
    pub fn from_entries(entries: &[MonthlyLedgerEntry]) -> Self {
        entries.iter().fold(
            LedgerTotals {
                total_credit: 0,
                total_additional_credit: 0,
                usage: CategoryUsage::default(),
                lop_days: 0,
                closing_balance: 0,
            },
            |totals, entry| LedgerTotals {
                total_credit: totals.total_credit.saturating_add(entry.monthly_credit),
                total_additional_credit: totals
                    .total_additional_credit
                    .saturating_add(entry.additional_credit),
                usage: totals.usage.merged(entry.category_usage),
                lop_days: totals.lop_days.saturating_add(entry.lop_days),
                closing_balance: entry.balance,
            },
        )
    }
}

/// The computed ledger for one employee and one year.
///
/// Produced by [`crate::calculation::compute_year`]. Contains no clock or
/// random values, so identical inputs always yield an identical ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearLedger {
    /// The employee the ledger belongs to.
    pub applicant_id: String,
    /// The calendar year.
    pub year: i32,
    /// Entries for months 1 through 12, in order.
    pub entries: Vec<MonthlyLedgerEntry>,
    /// One audit step per month.
    pub audit_steps: Vec<AuditStep>,
    /// Inputs that were skipped or adjusted while computing.
    pub warnings: Vec<AuditWarning>,
}

impl YearLedger {
    /// Returns the entry for `month` (1-12).
    pub fn entry(&self, month: u32) -> Option<&MonthlyLedgerEntry> {
        self.entries.iter().find(|e| e.month == month)
    }

    /// Year-level totals.
    pub fn totals(&self) -> LedgerTotals {
        LedgerTotals::from_entries(&self.entries)
    }
}
