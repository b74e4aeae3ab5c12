//! Configuration types for the leave ledger.
//!
//! These are deserialized from `leave_settings.yaml` and are immutable for
//! the duration of one ledger computation.

use serde::{Deserialize, Serialize};

use crate::models::AuditWarning;

/// How a stored balance override record is recognised as a manual override.
///
/// A month that is manually overridden takes its carry-forward from the record
/// and is exempt from the `max_leaves_per_month` cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideDetection {
    /// A record counts only when it carries a positive carry-forward or a
    /// non-empty adjustment reason.
    #[default]
    Heuristic,
    /// Any stored record counts, including one that zeroes carry-forward
    /// without giving a reason.
    Explicit,
}

/// Process-wide leave accrual parameters.
///
/// # Example
///
/// ```
/// use leave_ledger::config::{LeaveSettings, OverrideDetection};
///
/// let settings = LeaveSettings {
///     monthly_credit: 1,
///     max_carry_forward: 1,
///     max_leaves_per_month: 2,
///     override_detection: OverrideDetection::Heuristic,
/// };
/// assert!(settings.policy_warnings().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSettings {
    /// Days credited at the start of every month.
    pub monthly_credit: u32,
    /// Cap on the days rolled from one month's balance into the next.
    pub max_carry_forward: u32,
    /// Cap on `available` for months that are not manually overridden.
    pub max_leaves_per_month: u32,
    /// Rule used to recognise manual overrides.
    #[serde(default)]
    pub override_detection: OverrideDetection,
}

impl LeaveSettings {
    /// Flags settings that are legal but probably not what was meant.
    ///
    /// A monthly cap below the monthly credit is applied as written: every
    /// month that is not manually overridden discards part of its own accrual.
    /// The ledger is still produced, carrying the returned warnings.
    pub fn policy_warnings(&self) -> Vec<AuditWarning> {
        let mut warnings = Vec::new();
        if self.max_leaves_per_month < self.monthly_credit {
            warnings.push(AuditWarning::new(
                "CAP_BELOW_MONTHLY_CREDIT",
                format!(
                    "max_leaves_per_month ({}) is below monthly_credit ({}); \
                     non-overridden months are capped at {}",
                    self.max_leaves_per_month, self.monthly_credit, self.max_leaves_per_month
                ),
                "medium",
            ));
        }
        warnings
    }
}

/// Top-level structure of `leave_settings.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveSettingsFile {
    /// The leave accrual settings.
    pub leave: LeaveSettings,
}
