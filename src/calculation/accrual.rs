//! Monthly accrual recurrence.
//!
//! The ledger for a year is a left fold over twelve month descriptors. The
//! only state carried from one month to the next is [`AccrualState`], so every
//! step can be replayed and tested on its own.

use tracing::debug;

use crate::config::LeaveSettings;
use crate::models::{
    AuditStep, AuditWarning, LeaveApplication, MonthOverride, MonthlyLedgerEntry,
    MonthlyOverrides, YearLedger,
};

use super::carry_forward::{auto_carry_candidate, resolve_carry_forward};
use super::usage::{MonthUsage, aggregate_usage};

/// State threaded from one month of the recurrence to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccrualState {
    /// The balance at the end of the previous month (zero before January).
    pub previous_balance: u32,
}

/// Everything the recurrence needs to know about one month.
#[derive(Debug, Clone, Copy)]
pub struct MonthDescriptor<'a> {
    /// Calendar month (1-12).
    pub month: u32,
    /// Leave taken in the month.
    pub usage: MonthUsage,
    /// The classified override for the month.
    pub month_override: &'a MonthOverride,
}

/// The result of one step of the recurrence.
#[derive(Debug, Clone)]
pub struct MonthAccrualResult {
    /// The computed ledger entry.
    pub entry: MonthlyLedgerEntry,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// State to hand to the next month.
    pub state: AccrualState,
}

/// Computes one month of the ledger.
///
/// 1. The automatic carry-forward candidate is the previous balance capped at
///    `max_carry_forward` (zero in January).
/// 2. The override, if manual, replaces that candidate.
/// 3. `available = monthly_credit + carried_forward + additional_credit`,
///    capped at `max_leaves_per_month` unless the month is overridden.
/// 4. `balance = available - tracked usage`, floored at zero.
///
/// # Arguments
///
/// * `state` - The state left behind by the previous month
/// * `descriptor` - The month number, its usage and its classified override
/// * `settings` - The accrual policy
/// * `step_number` - The audit step number to stamp on the result
///
/// # Returns
///
/// Returns a `MonthAccrualResult` holding the month's entry, its audit step and
/// the state for the following month. Never fails: every out-of-range value is
/// either capped or floored.
///
/// # Example
///
/// ```
/// use leave_ledger::calculation::{AccrualState, MonthDescriptor, MonthUsage, accrue_month};
/// use leave_ledger::config::{LeaveSettings, OverrideDetection};
/// use leave_ledger::models::MonthOverride;
///
/// let settings = LeaveSettings {
///     monthly_credit: 1,
///     max_carry_forward: 1,
///     max_leaves_per_month: 2,
///     override_detection: OverrideDetection::Heuristic,
/// };
///
/// let result = accrue_month(
///     AccrualState { previous_balance: 1 },
///     &MonthDescriptor {
///         month: 2,
///         usage: MonthUsage::default(),
///         month_override: &MonthOverride::NoOverride,
///     },
///     &settings,
///     1,
/// );
///
/// assert_eq!(result.entry.carried_forward, 1);
/// assert_eq!(result.entry.available, 2);
/// assert_eq!(result.state.previous_balance, 2);
/// ```
pub fn accrue_month(
    state: AccrualState,
    descriptor: &MonthDescriptor<'_>,
    settings: &LeaveSettings,
    step_number: u32,
) -> MonthAccrualResult {
    let month = descriptor.month;

    // Step 1: Resolve the carry-forward, letting a manual override win
    let auto_candidate =
        auto_carry_candidate(month, state.previous_balance, settings.max_carry_forward);
    let resolution = resolve_carry_forward(month, descriptor.month_override, auto_candidate);
    let additional_credit = descriptor.month_override.additional_credit();

    // Step 2: Add up what is available, capping months without an override
    let raw_available = settings
        .monthly_credit
        .saturating_add(resolution.carried_forward)
        .saturating_add(additional_credit);
    let available = if resolution.is_overridden {
        raw_available
    } else {
        raw_available.min(settings.max_leaves_per_month)
    };
    let cap_applied = available < raw_available;

    // Step 3: Deduct tracked usage, flooring at zero
    let usage = descriptor.usage.category_usage;
    let used = usage.tracked_total();
    let balance = available.saturating_sub(used);

    let entry = MonthlyLedgerEntry {
        month,
        monthly_credit: settings.monthly_credit,
        carried_forward: resolution.carried_forward,
        additional_credit,
        available,
        category_usage: usage,
        lop_days: descriptor.usage.lop_days,
        balance,
        is_auto_carried: resolution.is_auto_carried,
        is_overridden: resolution.is_overridden,
    };

    // Step 4: Record the audit step
    let carry_source = if resolution.is_overridden {
        "override"
    } else {
        "auto"
    };
    let cap_note = if cap_applied {
        format!(", capped at {}", settings.max_leaves_per_month)
    } else {
        String::new()
    };
    let reasoning = format!(
        "{} credit + {} carried ({}) + {} additional = {}{}; {} used -> balance {}",
        settings.monthly_credit,
        resolution.carried_forward,
        carry_source,
        additional_credit,
        raw_available,
        cap_note,
        used,
        balance
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "monthly_accrual".to_string(),
        rule_name: "Monthly Accrual".to_string(),
        month: Some(month),
        input: serde_json::json!({
            "previous_balance": state.previous_balance,
            "auto_candidate": auto_candidate,
            "monthly_credit": settings.monthly_credit,
            "max_carry_forward": settings.max_carry_forward,
            "max_leaves_per_month": settings.max_leaves_per_month,
            "override": descriptor.month_override,
            "usage": usage,
            "lop_days": descriptor.usage.lop_days
        }),
        output: serde_json::json!({
            "carried_forward": resolution.carried_forward,
            "is_auto_carried": resolution.is_auto_carried,
            "is_overridden": resolution.is_overridden,
            "additional_credit": additional_credit,
            "raw_available": raw_available,
            "available": available,
            "cap_applied": cap_applied,
            "balance": balance
        }),
        reasoning,
    };

    debug!(
        month,
        carried_forward = resolution.carried_forward,
        available,
        used,
        balance,
        overridden = resolution.is_overridden,
        "Computed ledger month"
    );

    MonthAccrualResult {
        entry,
        audit_step,
        state: AccrualState {
            previous_balance: balance,
        },
    }
}

/// Computes the twelve-month ledger for one employee and year.
///
/// This is a pure function of its inputs: no clock, no I/O, and no state
/// beyond the [`AccrualState`] folded through the months. Missing overrides
/// mean automatic carry-forward and no additional credit; missing applications
/// mean zero usage.
///
/// # Arguments
///
/// * `applicant_id` - The employee whose ledger is computed
/// * `year` - The calendar year
/// * `applications` - The employee's applications; only approved ones count
/// * `overrides` - Overrides already classified per month
/// * `settings` - The accrual policy
///
/// # Returns
///
/// Returns a `YearLedger` with entries and audit steps for months 1 through 12
/// in order. Warnings cover skipped applications, an ignored January carry and
/// a monthly cap set below the monthly credit.
///
/// # Example
///
/// ```
/// use leave_ledger::calculation::compute_year;
/// use leave_ledger::config::{LeaveSettings, OverrideDetection};
/// use leave_ledger::models::MonthlyOverrides;
///
/// let settings = LeaveSettings {
///     monthly_credit: 1,
///     max_carry_forward: 1,
///     max_leaves_per_month: 2,
///     override_detection: OverrideDetection::Heuristic,
/// };
///
/// let ledger = compute_year("emp_001", 2026, &[], &MonthlyOverrides::empty(), &settings);
///
/// assert_eq!(ledger.entries.len(), 12);
/// assert_eq!(ledger.entries[0].carried_forward, 0);
/// assert_eq!(ledger.entries[0].balance, 1);
/// assert_eq!(ledger.entries[1].available, 2);
/// ```
pub fn compute_year(
    applicant_id: &str,
    year: i32,
    applications: &[LeaveApplication],
    overrides: &MonthlyOverrides,
    settings: &LeaveSettings,
) -> YearLedger {
    // Step 1: Bucket usage and LOP by month
    let usage = aggregate_usage(applicant_id, applications, year);

    // Step 2: Collect policy and input warnings
    let mut warnings = settings.policy_warnings();
    warnings.extend(usage.warnings.iter().cloned());

    if let MonthOverride::Manual {
        carried_forward, ..
    } = overrides.get(1)
        && *carried_forward > 0
    {
        warnings.push(AuditWarning::new(
            "JANUARY_CARRY_IGNORED",
            format!(
                "January override carries {} days; January never receives carry-forward",
                carried_forward
            ),
            "medium",
        ));
    }

    // Step 3: Fold the twelve months through the recurrence
    let (_, entries, audit_steps) = (1..=12u32)
        .map(|month| MonthDescriptor {
            month,
            usage: usage.month(month),
            month_override: overrides.get(month),
        })
        .fold(
            (
                AccrualState::default(),
                Vec::with_capacity(12),
                Vec::with_capacity(12),
            ),
            |(state, mut entries, mut steps), descriptor| {
                let result = accrue_month(state, &descriptor, settings, descriptor.month);
                entries.push(result.entry);
                steps.push(result.audit_step);
                (result.state, entries, steps)
            },
        );

    debug!(
        applicant_id,
        year,
        applications = applications.len(),
        overridden_months = overrides.manual_count(),
        warnings = warnings.len(),
        "Computed leave ledger"
    );

    YearLedger {
        applicant_id: applicant_id.to_string(),
        year,
        entries,
        audit_steps,
        warnings,
    }
}
