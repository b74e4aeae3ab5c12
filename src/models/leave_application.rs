//! Leave application model and related types.
//!
//! A [`LeaveApplication`] can only be obtained through a validating factory,
//! so an application whose paid and LOP days disagree with its total, or whose
//! dates run backwards, never reaches the ledger.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculation::{PaySplit, adjust_paid_days, count_weekdays};
use crate::error::{EngineError, EngineResult};

/// The leave category a request is filed under.
///
/// Only [`LeaveType::Sick`] and [`LeaveType::Casual`] are tracked categories;
/// any other tag is kept verbatim in [`LeaveType::Other`] and reported in the
/// uncategorized bucket of the ledger. Every value is built by parsing a tag,
/// so a tracked tag never ends up in [`LeaveType::Other`].
///
/// # Example
///
/// ```
/// use leave_ledger::models::LeaveType;
///
/// assert_eq!(LeaveType::from("Sick"), LeaveType::Sick);
///
/// let other = LeaveType::from("maternity");
/// assert!(matches!(&other, LeaveType::Other(tag) if tag.as_str() == "maternity"));
/// assert!(!other.is_tracked());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeaveType {
    /// Sick leave.
    Sick,
    /// Casual leave.
    Casual,
    /// Any other leave tag.
    Other(OtherLeaveTag),
}

/// A leave tag that names no tracked category.
///
/// Only [`LeaveType`]'s parser constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OtherLeaveTag(String);

impl OtherLeaveTag {
    /// The tag as it was stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtherLeaveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl LeaveType {
    /// Parses a stored tag. Matching ignores case and surrounding whitespace.
    pub fn parse(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        match tag.trim().to_lowercase().as_str() {
            "sick" => LeaveType::Sick,
            "casual" => LeaveType::Casual,
            _ => LeaveType::Other(OtherLeaveTag(tag)),
        }
    }

    /// Returns true for categories that consume the monthly balance.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, LeaveType::Other(_))
    }
}

impl From<String> for LeaveType {
    fn from(tag: String) -> Self {
        LeaveType::parse(tag)
    }
}

impl From<&str> for LeaveType {
    fn from(tag: &str) -> Self {
        LeaveType::parse(tag)
    }
}

impl From<LeaveType> for String {
    fn from(leave_type: LeaveType) -> Self {
        leave_type.to_string()
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveType::Sick => write!(f, "sick"),
            LeaveType::Casual => write!(f, "casual"),
            LeaveType::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// Workflow status of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted and awaiting a decision.
    Pending,
    /// Approved; counts toward the ledger.
    Approved,
    /// Rejected by an administrator.
    Rejected,
    /// Withdrawn by the applicant.
    Cancelled,
    /// Any status this engine does not know about.
    #[serde(other)]
    Unknown,
}

/// The stored shape of a leave application.
///
/// This is what arrives from the application store or over the wire. Convert
/// it with [`LeaveApplication::try_from`] before handing it to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplicationRecord {
    /// Unique identifier for the application.
    pub id: String,
    /// The employee who applied.
    pub applicant_id: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The leave category tag.
    pub leave_type: LeaveType,
    /// Current workflow status.
    pub status: LeaveStatus,
    /// Business days agreed at submission time.
    pub total_days: u32,
    /// Days paid from the leave balance.
    pub paid_days: u32,
    /// Days taken as loss of pay.
    #[serde(default)]
    pub lop_days: u32,
}

/// A validated leave application.
///
/// Invariants held by every value:
/// - `start_date <= end_date`
/// - `paid_days + lop_days == total_days`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LeaveApplicationRecord", into = "LeaveApplicationRecord")]
pub struct LeaveApplication {
    id: String,
    applicant_id: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    leave_type: LeaveType,
    status: LeaveStatus,
    total_days: u32,
    paid_days: u32,
    lop_days: u32,
}

impl TryFrom<LeaveApplicationRecord> for LeaveApplication {
    type Error = EngineError;

    fn try_from(record: LeaveApplicationRecord) -> EngineResult<Self> {
        if record.start_date > record.end_date {
            return Err(EngineError::InvalidApplication {
                application_id: record.id,
                message: format!(
                    "end date {} is before start date {}",
                    record.end_date, record.start_date
                ),
            });
        }

        let split_total = u64::from(record.paid_days) + u64::from(record.lop_days);
        if split_total != u64::from(record.total_days) {
            return Err(EngineError::InvalidApplication {
                application_id: record.id,
                message: format!(
                    "paid_days ({}) + lop_days ({}) must equal total_days ({})",
                    record.paid_days, record.lop_days, record.total_days
                ),
            });
        }

        Ok(Self {
            id: record.id,
            applicant_id: record.applicant_id,
            start_date: record.start_date,
            end_date: record.end_date,
            leave_type: record.leave_type,
            status: record.status,
            total_days: record.total_days,
            paid_days: record.paid_days,
            lop_days: record.lop_days,
        })
    }
}

impl From<LeaveApplication> for LeaveApplicationRecord {
    fn from(application: LeaveApplication) -> Self {
        Self {
            id: application.id,
            applicant_id: application.applicant_id,
            start_date: application.start_date,
            end_date: application.end_date,
            leave_type: application.leave_type,
            status: application.status,
            total_days: application.total_days,
            paid_days: application.paid_days,
            lop_days: application.lop_days,
        }
    }
}

impl LeaveApplication {
    /// Creates a pending application for the given dates.
    ///
    /// `total_days` is the number of weekdays in the inclusive range; the whole
    /// request starts out as paid leave.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_ledger::models::{LeaveApplication, LeaveStatus, LeaveType};
    /// use chrono::NaiveDate;
    ///
    /// // Friday 2026-02-06 to Tuesday 2026-02-10
    /// let application = LeaveApplication::submit(
    ///     "la_001",
    ///     "emp_001",
    ///     NaiveDate::from_ymd_opt(2026, 2, 6).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
    ///     LeaveType::Casual,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(application.total_days(), 3);
    /// assert_eq!(application.status(), LeaveStatus::Pending);
    /// ```
    pub fn submit(
        id: impl Into<String>,
        applicant_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        leave_type: LeaveType,
    ) -> EngineResult<Self> {
        let total_days = count_weekdays(start_date, end_date);
        Self::try_from(LeaveApplicationRecord {
            id: id.into(),
            applicant_id: applicant_id.into(),
            start_date,
            end_date,
            leave_type,
            status: LeaveStatus::Pending,
            total_days,
            paid_days: total_days,
            lop_days: 0,
        })
    }

    /// Approves the application with the administrator's chosen paid days.
    ///
    /// The split and the status change are applied together, so an approved
    /// application always carries a consistent split. Out-of-range input is
    /// clamped by [`adjust_paid_days`].
    pub fn approve(self, proposed_paid_days: i64) -> Self {
        let split = adjust_paid_days(self.total_days, proposed_paid_days);
        tracing::debug!(
            application_id = %self.id,
            paid_days = split.paid_days(),
            lop_days = split.lop_days(),
            "Approving leave application"
        );
        self.with_split(split, LeaveStatus::Approved)
    }

    /// Rejects the application, leaving its split untouched.
    pub fn reject(self) -> Self {
        Self {
            status: LeaveStatus::Rejected,
            ..self
        }
    }

    fn with_split(self, split: PaySplit, status: LeaveStatus) -> Self {
        Self {
            paid_days: split.paid_days(),
            lop_days: split.lop_days(),
            status,
            ..self
        }
    }

    /// Unique identifier for the application.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The employee who applied.
    pub fn applicant_id(&self) -> &str {
        &self.applicant_id
    }

    /// First day of leave (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of leave (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The leave category.
    pub fn leave_type(&self) -> &LeaveType {
        &self.leave_type
    }

    /// Current workflow status.
    pub fn status(&self) -> LeaveStatus {
        self.status
    }

    /// Returns true once the application has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Business days agreed at submission time.
    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Days paid from the leave balance.
    pub fn paid_days(&self) -> u32 {
        self.paid_days
    }

    /// Days taken as loss of pay.
    pub fn lop_days(&self) -> u32 {
        self.lop_days
    }

    /// Returns true when any part of the leave is unpaid.
    pub fn is_lop(&self) -> bool {
        self.lop_days > 0
    }

    /// Returns true when any day of the application falls in `year`.
    pub fn overlaps_year(&self, year: i32) -> bool {
        self.start_date.year() <= year && self.end_date.year() >= year
    }
}
