//! Monthly leave usage aggregation.
//!
//! Turns an employee's approved leave applications into per-month weekday
//! counts by category and per-month loss-of-pay days for one calendar year.

use chrono::Datelike;
use tracing::{debug, warn};

use crate::models::{AuditWarning, CategoryUsage, LeaveApplication};

use super::calendar_span::{clip_to_year, split_by_month};

/// Leave taken in one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthUsage {
    /// Weekday leave by category.
    pub category_usage: CategoryUsage,
    /// Loss-of-pay days attributed to the month.
    pub lop_days: u32,
}

/// Usage for all twelve months of a year, plus any skipped inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageAggregation {
    months: [MonthUsage; 12],
    /// Applications that were ignored or only partly counted.
    pub warnings: Vec<AuditWarning>,
}

impl UsageAggregation {
    /// Returns the usage for `month` (1-12). Months outside the calendar are empty.
    pub fn month(&self, month: u32) -> MonthUsage {
        match month {
            1..=12 => self.months[month as usize - 1],
            _ => MonthUsage::default(),
        }
    }

    fn month_mut(&mut self, month: u32) -> &mut MonthUsage {
        &mut self.months[month as usize - 1]
    }
}

/// Aggregates an employee's approved leave into per-month usage for `year`.
///
/// For every approved application belonging to `applicant_id`:
/// - each weekday inside the year is added to its month under the
///   application's leave type (untracked types land in the uncategorized
///   bucket);
/// - the application's whole `lop_days` is attributed to the month containing
///   its start date, even when the leave runs into later months. LOP for an
///   application that started in an earlier year is not counted here.
///
/// Applications that are not approved, belong to another applicant, or do not
/// touch the year are skipped with a warning. Contributions are purely
/// additive.
///
/// # Arguments
///
/// * `applicant_id` - The employee whose usage is aggregated
/// * `applications` - Candidate applications, in any order
/// * `year` - The calendar year being aggregated
///
/// # Returns
///
/// Returns a `UsageAggregation` with one `MonthUsage` per month and a warning
/// for every application that was skipped or reported as uncategorized.
///
/// # Example
///
/// ```
/// use leave_ledger::calculation::aggregate_usage;
/// use leave_ledger::models::{LeaveApplication, LeaveType};
/// use chrono::NaiveDate;
///
/// let application = LeaveApplication::submit(
///     "la_001",
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 2, 9).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
///     LeaveType::Casual,
/// )
/// .unwrap()
/// .approve(2);
///
/// let usage = aggregate_usage("emp_001", &[application], 2026);
/// assert_eq!(usage.month(2).category_usage.casual, 2);
/// assert_eq!(usage.month(3).category_usage.casual, 0);
/// ```
pub fn aggregate_usage(
    applicant_id: &str,
    applications: &[LeaveApplication],
    year: i32,
) -> UsageAggregation {
    let mut aggregation = UsageAggregation::default();

    for application in applications {
        // Step 1: Skip applications that do not count towards this ledger
        if application.applicant_id() != applicant_id {
            warn!(
                application_id = %application.id(),
                expected_applicant = %applicant_id,
                actual_applicant = %application.applicant_id(),
                "Skipping leave application for another applicant"
            );
            aggregation.warnings.push(AuditWarning::new(
                "FOREIGN_APPLICATION",
                format!(
                    "Application {} belongs to applicant {}, not {}",
                    application.id(),
                    application.applicant_id(),
                    applicant_id
                ),
                "high",
            ));
            continue;
        }

        if !application.is_approved() {
            warn!(
                application_id = %application.id(),
                status = ?application.status(),
                "Skipping leave application that is not approved"
            );
            aggregation.warnings.push(AuditWarning::new(
                "NOT_APPROVED",
                format!(
                    "Application {} has status {:?} and was not counted",
                    application.id(),
                    application.status()
                ),
                "medium",
            ));
            continue;
        }

        let Some((start, end)) =
            clip_to_year(application.start_date(), application.end_date(), year)
        else {
            debug!(
                application_id = %application.id(),
                year,
                "Skipping leave application outside the ledger year"
            );
            aggregation.warnings.push(AuditWarning::new(
                "OUTSIDE_YEAR",
                format!(
                    "Application {} ({} to {}) does not overlap {}",
                    application.id(),
                    application.start_date(),
                    application.end_date(),
                    year
                ),
                "low",
            ));
            continue;
        };

        // Step 2: Spread the weekdays over the months they fall in
        for span in split_by_month(start, end) {
            aggregation
                .month_mut(span.month)
                .category_usage
                .add(application.leave_type(), span.weekday_count);
        }

        if !application.leave_type().is_tracked() {
            aggregation.warnings.push(AuditWarning::new(
                "UNCATEGORIZED_LEAVE",
                format!(
                    "Application {} has untracked leave type '{}'; reported as uncategorized",
                    application.id(),
                    application.leave_type()
                ),
                "low",
            ));
        }

        // Step 3: Attribute LOP to the start month
        if application.is_lop() && application.start_date().year() == year {
            let month = application.start_date().month();
            let usage = aggregation.month_mut(month);
            usage.lop_days = usage.lop_days.saturating_add(application.lop_days());
        }

        debug!(
            application_id = %application.id(),
            leave_type = %application.leave_type(),
            lop_days = application.lop_days(),
            "Counted leave application"
        );
    }

    aggregation
}
