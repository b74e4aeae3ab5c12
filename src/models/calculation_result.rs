//! Calculation result models for the leave ledger engine.
//!
//! This module contains the [`LedgerCalculationResult`] envelope returned to
//! ledger consumers, and the audit types recorded while the ledger is computed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{LedgerTotals, MonthlyLedgerEntry};
use crate::config::LeaveSettings;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one month of the
/// accrual recurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The month the step concerns, if any.
    pub month: Option<u32>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that were skipped or partially ignored. They never
/// stop the ledger from being produced.
///
/// # Example
///
/// ```
/// use leave_ledger::models::AuditWarning;
///
/// let warning = AuditWarning::new("NOT_APPROVED", "Application la_001 is pending", "low");
/// assert_eq!(warning.code, "NOT_APPROVED");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a ledger calculation as delivered to consumers.
///
/// The entries are read-only for the consumer; corrections flow back only as
/// balance overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerCalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The ID of the employee the ledger is for.
    pub applicant_id: String,
    /// The calendar year of the ledger.
    pub year: i32,
    /// The settings the ledger was computed under.
    pub settings: LeaveSettings,
    /// Entries for months 1 through 12.
    pub entries: Vec<MonthlyLedgerEntry>,
    /// Year-level totals.
    pub totals: LedgerTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverrideDetection;
    use crate::models::CategoryUsage;

    fn create_sample_entry(month: u32, balance: u32) -> MonthlyLedgerEntry {
        MonthlyLedgerEntry {
            month,
            monthly_credit: 1,
            carried_forward: 0,
            additional_credit: 0,
            available: 1,
            category_usage: CategoryUsage::default(),
            lop_days: 0,
            balance,
            is_auto_carried: false,
            is_overridden: false,
        }
    }

    #[test]
    fn test_result_serialization_shape() {
        let entries = vec![create_sample_entry(1, 1)];
        let result = LedgerCalculationResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            applicant_id: "emp_001".to_string(),
            year: 2026,
            settings: LeaveSettings {
                monthly_credit: 1,
                max_carry_forward: 1,
                max_leaves_per_month: 2,
                override_detection: OverrideDetection::Heuristic,
            },
            totals: LedgerTotals::from_entries(&entries),
            entries,
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 10,
            },
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["applicant_id"], "emp_001");
        assert_eq!(json["year"], 2026);
        assert_eq!(json["entries"][0]["month"], 1);
        assert_eq!(json["entries"][0]["is_auto_carried"], false);
        assert_eq!(json["settings"]["override_detection"], "heuristic");
        assert_eq!(json["totals"]["closing_balance"], 1);

        let round_trip: LedgerCalculationResult = serde_json::from_value(json).unwrap();
        assert_eq!(round_trip, result);
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "monthly_accrual".to_string(),
            rule_name: "Monthly Accrual".to_string(),
            month: Some(2),
            input: serde_json::json!({ "monthly_credit": 1 }),
            output: serde_json::json!({ "balance": 0 }),
            reasoning: "1 + 1 + 0 = 2".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"rule_id\":\"monthly_accrual\""));
        assert!(json.contains("\"month\":2"));
    }
}
