//! Paid/LOP splitting for leave approvals.
//!
//! Given a request's total days and the administrator's proposed paid days,
//! produces a split that always sums to the total. Out-of-range input is
//! clamped, never rejected, because the proposal is recomputed on every edit
//! of the paid-days control.

use serde::Serialize;

/// A paid/loss-of-pay split of a leave request.
///
/// Only [`adjust_paid_days`] constructs a split, so
/// `paid_days + lop_days == total_days` holds for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaySplit {
    paid_days: u32,
    lop_days: u32,
}

impl PaySplit {
    /// Days paid from the leave balance.
    pub fn paid_days(&self) -> u32 {
        self.paid_days
    }

    /// Days taken as loss of pay.
    pub fn lop_days(&self) -> u32 {
        self.lop_days
    }

    /// The request's total days.
    pub fn total_days(&self) -> u32 {
        self.paid_days + self.lop_days
    }
}

/// Splits `total_days` into paid and LOP days.
///
/// `paid_days = clamp(proposed_paid_days, 0, total_days)` and
/// `lop_days = total_days - paid_days`.
///
/// # Example
///
/// ```
/// use leave_ledger::calculation::adjust_paid_days;
///
/// let split = adjust_paid_days(5, 7);
/// assert_eq!((split.paid_days(), split.lop_days()), (5, 0));
///
/// let split = adjust_paid_days(5, 2);
/// assert_eq!((split.paid_days(), split.lop_days()), (2, 3));
///
/// let split = adjust_paid_days(5, -1);
/// assert_eq!((split.paid_days(), split.lop_days()), (0, 5));
/// ```
pub fn adjust_paid_days(total_days: u32, proposed_paid_days: i64) -> PaySplit {
    let paid_days = proposed_paid_days.clamp(0, i64::from(total_days)) as u32;
    PaySplit {
        paid_days,
        lop_days: total_days - paid_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_within_range_is_kept() {
        let split = adjust_paid_days(5, 3);
        assert_eq!(split.paid_days(), 3);
        assert_eq!(split.lop_days(), 2);
        assert_eq!(split.total_days(), 5);
    }

    #[test]
    fn test_proposal_above_total_is_clamped() {
        let split = adjust_paid_days(5, 7);
        assert_eq!(split.paid_days(), 5);
        assert_eq!(split.lop_days(), 0);
    }

    #[test]
    fn test_negative_proposal_is_clamped_to_zero() {
        let split = adjust_paid_days(4, -3);
        assert_eq!(split.paid_days(), 0);
        assert_eq!(split.lop_days(), 4);
    }

    #[test]
    fn test_zero_total() {
        let split = adjust_paid_days(0, 2);
        assert_eq!(split.paid_days(), 0);
        assert_eq!(split.lop_days(), 0);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let split = adjust_paid_days(u32::MAX, i64::MAX);
        assert_eq!(split.paid_days(), u32::MAX);
        assert_eq!(split.lop_days(), 0);

        let split = adjust_paid_days(u32::MAX, i64::MIN);
        assert_eq!(split.lop_days(), u32::MAX);
    }

    #[test]
    fn test_split_serializes_both_fields() {
        let json = serde_json::to_value(adjust_paid_days(5, 2)).unwrap();
        assert_eq!(json["paid_days"], 2);
        assert_eq!(json["lop_days"], 3);
    }
}
