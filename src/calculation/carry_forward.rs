//! Carry-forward resolution.
//!
//! Decides, for one month, whether an administrator override or the automatic
//! carry-forward from the previous month supplies the days carried in. The
//! resolver is stateless; the previous balance is threaded through by the
//! accrual recurrence.

use crate::models::MonthOverride;

/// The outcome of resolving a month's carry-forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarryForwardResolution {
    /// Days carried into the month.
    pub carried_forward: u32,
    /// True when the days were carried automatically and are positive.
    pub is_auto_carried: bool,
    /// True when a manual override governs the month.
    pub is_overridden: bool,
}

/// Computes the automatic carry-forward candidate for `month`.
///
/// January never receives carry-forward; there is no cross-year carry. Later
/// months carry the previous balance up to `max_carry_forward`.
///
/// # Example
///
/// ```
/// use leave_ledger::calculation::auto_carry_candidate;
///
/// assert_eq!(auto_carry_candidate(1, 5, 2), 0);
/// assert_eq!(auto_carry_candidate(2, 5, 2), 2);
/// assert_eq!(auto_carry_candidate(2, 1, 2), 1);
/// ```
pub fn auto_carry_candidate(month: u32, previous_balance: u32, max_carry_forward: u32) -> u32 {
    if month <= 1 {
        0
    } else {
        previous_balance.min(max_carry_forward)
    }
}

/// Resolves the carry-forward for `month`.
///
/// A manual override replaces the automatic candidate and is never reported
/// as auto-carried. January carries nothing in, even under an override; the
/// override still marks the month as overridden.
///
/// # Example
///
/// ```
/// use leave_ledger::calculation::resolve_carry_forward;
/// use leave_ledger::models::MonthOverride;
///
/// let manual = MonthOverride::Manual {
///     carried_forward: 3,
///     additional_credit: 0,
///     reason: "special grant".to_string(),
/// };
///
/// let resolved = resolve_carry_forward(5, &manual, 1);
/// assert_eq!(resolved.carried_forward, 3);
/// assert!(!resolved.is_auto_carried);
///
/// let automatic = resolve_carry_forward(5, &MonthOverride::NoOverride, 1);
/// assert_eq!(automatic.carried_forward, 1);
/// assert!(automatic.is_auto_carried);
/// ```
pub fn resolve_carry_forward(
    month: u32,
    month_override: &MonthOverride,
    auto_candidate: u32,
) -> CarryForwardResolution {
    match month_override {
        MonthOverride::Manual {
            carried_forward, ..
        } => CarryForwardResolution {
            carried_forward: if month <= 1 { 0 } else { *carried_forward },
            is_auto_carried: false,
            is_overridden: true,
        },
        MonthOverride::NoOverride | MonthOverride::CreditOnly { .. } => {
            let carried_forward = if month <= 1 { 0 } else { auto_candidate };
            CarryForwardResolution {
                carried_forward,
                is_auto_carried: carried_forward > 0,
                is_overridden: false,
            }
        }
    }
}
