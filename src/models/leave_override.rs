//! Administrator balance overrides.
//!
//! Stored [`LeaveBalanceOverride`] records are classified once into a
//! [`MonthOverride`] according to the configured [`OverrideDetection`] rule.
//! The accrual recurrence only ever sees the classified value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::OverrideDetection;
use crate::error::{EngineError, EngineResult};

/// An administrator-entered correction for one month of one employee's year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalanceOverride {
    /// Calendar month (1-12) the override applies to.
    pub month: u32,
    /// Days carried into the month, replacing the automatic carry-forward.
    #[serde(default)]
    pub carried_forward: u32,
    /// Extra days granted for the month.
    #[serde(default)]
    pub additional_credit: u32,
    /// Why the administrator made the adjustment.
    #[serde(default)]
    pub adjustment_reason: String,
    /// When the adjustment was saved.
    #[serde(default)]
    pub adjusted_at: Option<DateTime<Utc>>,
}

/// The effect a month's override record has on the ledger.
///
/// # Example
///
/// ```
/// use leave_ledger::config::OverrideDetection;
/// use leave_ledger::models::{LeaveBalanceOverride, MonthOverride};
///
/// let record = LeaveBalanceOverride {
///     month: 5,
///     carried_forward: 3,
///     additional_credit: 0,
///     adjustment_reason: "special grant".to_string(),
///     adjusted_at: None,
/// };
///
/// let classified = MonthOverride::classify(&record, OverrideDetection::Heuristic);
/// assert!(classified.is_manual());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonthOverride {
    /// No record, or a record with no effect.
    #[default]
    NoOverride,
    /// A record that is not a manual override but still grants extra days.
    /// Automatic carry-forward and the monthly cap stay in force.
    CreditOnly {
        /// Extra days granted for the month.
        additional_credit: u32,
    },
    /// A manual override: carry-forward comes from the record and the monthly
    /// cap does not apply.
    Manual {
        /// Days carried into the month.
        carried_forward: u32,
        /// Extra days granted for the month.
        additional_credit: u32,
        /// The administrator's reason.
        reason: String,
    },
}

impl MonthOverride {
    /// Classifies a stored record under the given detection rule.
    pub fn classify(record: &LeaveBalanceOverride, detection: OverrideDetection) -> Self {
        let is_manual = match detection {
            OverrideDetection::Heuristic => {
                record.carried_forward > 0 || !record.adjustment_reason.is_empty()
            }
            OverrideDetection::Explicit => true,
        };

        if is_manual {
            MonthOverride::Manual {
                carried_forward: record.carried_forward,
                additional_credit: record.additional_credit,
                reason: record.adjustment_reason.clone(),
            }
        } else if record.additional_credit > 0 {
            MonthOverride::CreditOnly {
                additional_credit: record.additional_credit,
            }
        } else {
            MonthOverride::NoOverride
        }
    }

    /// Returns true when automatic carry-forward is suppressed for the month.
    pub fn is_manual(&self) -> bool {
        matches!(self, MonthOverride::Manual { .. })
    }

    /// Extra days granted for the month (zero when there is no record).
    pub fn additional_credit(&self) -> u32 {
        match self {
            MonthOverride::NoOverride => 0,
            MonthOverride::CreditOnly { additional_credit }
            | MonthOverride::Manual {
                additional_credit, ..
            } => *additional_credit,
        }
    }
}

/// The classified overrides for all twelve months of one employee's year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyOverrides {
    months: [MonthOverride; 12],
}

impl MonthlyOverrides {
    /// Overrides for a year with no administrator adjustments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Classifies stored records, rejecting out-of-range or duplicate months.
    pub fn from_records(
        records: &[LeaveBalanceOverride],
        detection: OverrideDetection,
    ) -> EngineResult<Self> {
        let mut months: [Option<MonthOverride>; 12] = Default::default();

        for record in records {
            if !(1..=12).contains(&record.month) {
                return Err(EngineError::InvalidMonth {
                    month: record.month,
                });
            }

            let slot = &mut months[record.month as usize - 1];
            if slot.is_some() {
                return Err(EngineError::InvalidOverride {
                    month: record.month,
                    message: "more than one override recorded for this month".to_string(),
                });
            }
            *slot = Some(MonthOverride::classify(record, detection));
        }

        Ok(Self {
            months: months.map(Option::unwrap_or_default),
        })
    }

    /// Returns the override for `month` (1-12).
    ///
    /// Months outside the calendar have no override.
    pub fn get(&self, month: u32) -> &MonthOverride {
        const NONE: &MonthOverride = &MonthOverride::NoOverride;
        match month {
            1..=12 => &self.months[month as usize - 1],
            _ => NONE,
        }
    }

    /// Number of months treated as manually overridden.
    pub fn manual_count(&self) -> usize {
        self.months.iter().filter(|m| m.is_manual()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: u32, carried: u32, credit: u32, reason: &str) -> LeaveBalanceOverride {
        LeaveBalanceOverride {
            month,
            carried_forward: carried,
            additional_credit: credit,
            adjustment_reason: reason.to_string(),
            adjusted_at: None,
        }
    }

    #[test]
    fn test_heuristic_positive_carry_is_manual() {
        let classified = MonthOverride::classify(&record(3, 2, 0, ""), OverrideDetection::Heuristic);
        assert_eq!(
            classified,
            MonthOverride::Manual {
                carried_forward: 2,
                additional_credit: 0,
                reason: String::new(),
            }
        );
    }

    #[test]
    fn test_heuristic_reason_only_is_manual() {
        let classified =
            MonthOverride::classify(&record(3, 0, 0, "reset"), OverrideDetection::Heuristic);
        assert!(classified.is_manual());
    }

    #[test]
    fn test_heuristic_zero_record_is_not_manual() {
        let classified = MonthOverride::classify(&record(3, 0, 0, ""), OverrideDetection::Heuristic);
        assert_eq!(classified, MonthOverride::NoOverride);
    }

    #[test]
    fn test_heuristic_credit_only_record_keeps_credit() {
        let classified = MonthOverride::classify(&record(3, 0, 2, ""), OverrideDetection::Heuristic);
        assert_eq!(
            classified,
            MonthOverride::CreditOnly {
                additional_credit: 2
            }
        );
        assert!(!classified.is_manual());
        assert_eq!(classified.additional_credit(), 2);
    }

    #[test]
    fn test_explicit_zero_record_is_manual() {
        let classified = MonthOverride::classify(&record(3, 0, 0, ""), OverrideDetection::Explicit);
        assert!(classified.is_manual());
    }

    #[test]
    fn test_from_records_places_months() {
        let overrides = MonthlyOverrides::from_records(
            &[record(5, 3, 0, "special grant"), record(7, 0, 1, "")],
            OverrideDetection::Heuristic,
        )
        .unwrap();

        assert!(overrides.get(5).is_manual());
        assert_eq!(overrides.get(7).additional_credit(), 1);
        assert_eq!(overrides.get(1), &MonthOverride::NoOverride);
        assert_eq!(overrides.manual_count(), 1);
    }

    #[test]
    fn test_from_records_rejects_duplicate_month() {
        let result = MonthlyOverrides::from_records(
            &[record(5, 1, 0, "a"), record(5, 2, 0, "b")],
            OverrideDetection::Heuristic,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidOverride { month: 5, .. })
        ));
    }

    #[test]
    fn test_from_records_rejects_month_out_of_range() {
        let result =
            MonthlyOverrides::from_records(&[record(13, 1, 0, "a")], OverrideDetection::Heuristic);
        assert!(matches!(result, Err(EngineError::InvalidMonth { month: 13 })));
    }

    #[test]
    fn test_get_outside_calendar_is_no_override() {
        let overrides = MonthlyOverrides::empty();
        assert_eq!(overrides.get(0), &MonthOverride::NoOverride);
        assert_eq!(overrides.get(13), &MonthOverride::NoOverride);
    }

    #[test]
    fn test_deserialize_override_with_defaults() {
        let json = r#"{ "month": 4, "additional_credit": 2 }"#;
        let record: LeaveBalanceOverride = serde_json::from_str(json).unwrap();
        assert_eq!(record.carried_forward, 0);
        assert!(record.adjustment_reason.is_empty());
        assert!(record.adjusted_at.is_none());
    }
}
