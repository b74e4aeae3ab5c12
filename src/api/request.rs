//! Request types for the leave ledger API.
//!
//! This module defines the JSON bodies accepted by the `/ledger` and `/split`
//! endpoints, and their conversion into validated domain values.

use serde::{Deserialize, Serialize};

use crate::calculation::PaySplit;
use crate::config::OverrideDetection;
use crate::error::EngineResult;
use crate::models::{
    LeaveApplication, LeaveApplicationRecord, LeaveBalanceOverride, MonthlyOverrides,
};

/// Request body for the `/ledger` endpoint.
///
/// Carries everything the surrounding application has already loaded for one
/// employee and year: their leave applications and any balance overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRequest {
    /// The employee whose ledger is computed.
    pub applicant_id: String,
    /// The calendar year of the ledger.
    pub year: i32,
    /// The employee's leave applications. Non-approved ones are skipped.
    #[serde(default)]
    pub applications: Vec<LeaveApplicationRecord>,
    /// Balance overrides for months of `year`.
    #[serde(default)]
    pub overrides: Vec<LeaveBalanceOverride>,
}

impl LedgerRequest {
    /// Validates the applications into domain values.
    ///
    /// Fails on the first application whose dates or split are inconsistent.
    pub fn validated_applications(&self) -> EngineResult<Vec<LeaveApplication>> {
        self.applications
            .iter()
            .cloned()
            .map(LeaveApplication::try_from)
            .collect()
    }

    /// Classifies the override records into one override per month.
    pub fn monthly_overrides(&self, detection: OverrideDetection) -> EngineResult<MonthlyOverrides> {
        MonthlyOverrides::from_records(&self.overrides, detection)
    }
}

/// Request body for the `/split` endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SplitRequest {
    /// The request's total weekday count.
    pub total_days: u32,
    /// The administrator's proposed paid days. May be out of range; numbers
    /// beyond `i64` saturate rather than fail.
    #[serde(deserialize_with = "deserialize_saturating_i64")]
    pub proposed_paid_days: i64,
}

/// Reads any JSON number as an `i64`, saturating at the type's bounds.
///
/// Fractions truncate toward zero. Non-numeric values are still rejected.
fn deserialize_saturating_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let number: serde_json::Number = Deserialize::deserialize(deserializer)?;

    if let Some(value) = number.as_i64() {
        Ok(value)
    } else if number.is_u64() {
        Ok(i64::MAX)
    } else {
        // `as` saturates on overflow and maps NaN to zero.
        Ok(number.as_f64().map_or(0, |value| value as i64))
    }
}

/// Response body for the `/split` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResponse {
    /// The request's total weekday count.
    pub total_days: u32,
    /// Days paid from the leave balance.
    pub paid_days: u32,
    /// Days taken as loss of pay.
    pub lop_days: u32,
}

impl From<PaySplit> for SplitResponse {
    fn from(split: PaySplit) -> Self {
        Self {
            total_days: split.total_days(),
            paid_days: split.paid_days(),
            lop_days: split.lop_days(),
        }
    }
}
