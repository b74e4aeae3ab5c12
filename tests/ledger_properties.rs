//! Property-based tests for the leave ledger recurrence and the paid/LOP split.

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;

use leave_ledger::calculation::{adjust_paid_days, clip_to_year, compute_year, count_weekdays};
use leave_ledger::config::{LeaveSettings, OverrideDetection};
use leave_ledger::models::{
    LeaveApplication, LeaveBalanceOverride, LeaveType, MonthlyOverrides, YearLedger,
};

const YEAR: i32 = 2026;

/// Strategy to generate settings, including caps below the monthly credit.
fn settings_strategy() -> impl Strategy<Value = LeaveSettings> {
    (
        0u32..=3,
        0u32..=3,
        0u32..=7,
        prop_oneof![
            Just(OverrideDetection::Heuristic),
            Just(OverrideDetection::Explicit)
        ],
    )
        .prop_map(
            |(monthly_credit, max_carry_forward, max_leaves_per_month, override_detection)| LeaveSettings {
                monthly_credit,
                max_carry_forward,
                max_leaves_per_month,
                override_detection,
            },
        )
}

fn leave_type_strategy() -> impl Strategy<Value = LeaveType> {
    prop_oneof![
        Just(LeaveType::Sick),
        Just(LeaveType::Casual),
        Just(LeaveType::from("unpaid")),
    ]
}

/// Strategy to generate an application starting between mid-December of the
/// previous year and early January of the next, so some spans cross a year.
fn application_strategy() -> impl Strategy<Value = (i64, u64, LeaveType, i64, bool)> {
    (
        -15i64..375,
        0u64..20,
        leave_type_strategy(),
        -3i64..25,
        prop::bool::weighted(0.85),
    )
}

fn build_applications(specs: &[(i64, u64, LeaveType, i64, bool)]) -> Vec<LeaveApplication> {
    let year_start = NaiveDate::from_ymd_opt(YEAR, 1, 1).unwrap();
    specs
        .iter()
        .enumerate()
        .map(|(i, (offset, length, leave_type, proposed, approved))| {
            let start = if *offset >= 0 {
                year_start.checked_add_days(Days::new(*offset as u64)).unwrap()
            } else {
                year_start.checked_sub_days(Days::new(offset.unsigned_abs())).unwrap()
            };
            let end = start.checked_add_days(Days::new(*length)).unwrap();
            let application = LeaveApplication::submit(
                format!("la_{:03}", i),
                "emp_001",
                start,
                end,
                leave_type.clone(),
            )
            .unwrap();
            if *approved {
                application.approve(*proposed)
            } else {
                application.reject()
            }
        })
        .collect()
}

/// Strategy to generate at most one override per month.
fn overrides_strategy() -> impl Strategy<Value = Vec<LeaveBalanceOverride>> {
    prop::collection::btree_map(1u32..=12, (0u32..5, 0u32..4, prop::bool::ANY), 0..6).prop_map(
        |months| {
            months
                .into_iter()
                .map(
                    |(month, (carried_forward, additional_credit, with_reason))| {
                        LeaveBalanceOverride {
                            month,
                            carried_forward,
                            additional_credit,
                            adjustment_reason: if with_reason {
                                "adjusted".to_string()
                            } else {
                                String::new()
                            },
                            adjusted_at: None,
                        }
                    },
                )
                .collect()
        },
    )
}

fn compute(
    applications: &[LeaveApplication],
    records: &[LeaveBalanceOverride],
    settings: &LeaveSettings,
) -> YearLedger {
    let overrides = MonthlyOverrides::from_records(records, settings.override_detection).unwrap();
    compute_year("emp_001", YEAR, applications, &overrides, settings)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The split always sums to the total and stays within range.
    #[test]
    fn prop_split_invariant(total_days in 0u32..1000, proposed in -2000i64..2000) {
        let split = adjust_paid_days(total_days, proposed);
        prop_assert_eq!(split.paid_days() + split.lop_days(), total_days);
        prop_assert!(split.paid_days() <= total_days);
    }

    /// Balances never exceed what was available and are exactly what remains
    /// after tracked usage, floored at zero.
    #[test]
    fn prop_balance_is_floored_remainder(
        settings in settings_strategy(),
        specs in prop::collection::vec(application_strategy(), 0..12),
        records in overrides_strategy(),
    ) {
        let ledger = compute(&build_applications(&specs), &records, &settings);
        prop_assert_eq!(ledger.entries.len(), 12);
        for entry in &ledger.entries {
            prop_assert!(entry.balance <= entry.available);
            prop_assert_eq!(
                entry.balance,
                entry.available.saturating_sub(entry.category_usage.tracked_total())
            );
        }
    }

    /// A cap below the monthly credit is reported once, and only then.
    #[test]
    fn prop_cap_below_credit_is_warned(
        settings in settings_strategy(),
        specs in prop::collection::vec(application_strategy(), 0..8),
    ) {
        let ledger = compute(&build_applications(&specs), &[], &settings);
        let warned = ledger
            .warnings
            .iter()
            .filter(|w| w.code == "CAP_BELOW_MONTHLY_CREDIT")
            .count();
        let expected = usize::from(settings.max_leaves_per_month < settings.monthly_credit);
        prop_assert_eq!(warned, expected);
    }

    /// January never receives carry-forward.
    #[test]
    fn prop_january_has_no_carry_in(
        settings in settings_strategy(),
        specs in prop::collection::vec(application_strategy(), 0..8),
        records in overrides_strategy(),
    ) {
        let ledger = compute(&build_applications(&specs), &records, &settings);
        prop_assert_eq!(ledger.entries[0].carried_forward, 0);
        prop_assert!(!ledger.entries[0].is_auto_carried);
    }

    /// A month overridden with a reason takes its carry-forward from the record.
    #[test]
    fn prop_override_takes_precedence(
        settings in settings_strategy(),
        specs in prop::collection::vec(application_strategy(), 0..8),
        records in overrides_strategy(),
    ) {
        let ledger = compute(&build_applications(&specs), &records, &settings);
        for record in records.iter().filter(|r| !r.adjustment_reason.is_empty() && r.month > 1) {
            let entry = ledger.entry(record.month).unwrap();
            prop_assert_eq!(entry.carried_forward, record.carried_forward);
            prop_assert!(!entry.is_auto_carried);
            prop_assert!(entry.is_overridden);
        }
    }

    /// Months without a manual override respect both caps.
    #[test]
    fn prop_caps_hold_for_automatic_months(
        settings in settings_strategy(),
        specs in prop::collection::vec(application_strategy(), 0..8),
        records in overrides_strategy(),
    ) {
        let ledger = compute(&build_applications(&specs), &records, &settings);
        for entry in ledger.entries.iter().filter(|e| !e.is_overridden) {
            prop_assert!(entry.available <= settings.max_leaves_per_month);
            prop_assert!(entry.carried_forward <= settings.max_carry_forward);
            prop_assert_eq!(entry.is_auto_carried, entry.carried_forward > 0);
        }
    }

    /// Every weekday of an approved application inside the year is counted once.
    #[test]
    fn prop_usage_counts_weekdays_in_year(
        settings in settings_strategy(),
        specs in prop::collection::vec(application_strategy(), 0..12),
    ) {
        let applications = build_applications(&specs);
        let ledger = compute(&applications, &[], &settings);

        let expected: u32 = applications
            .iter()
            .filter(|a| a.is_approved())
            .filter_map(|a| clip_to_year(a.start_date(), a.end_date(), YEAR))
            .map(|(start, end)| count_weekdays(start, end))
            .sum();
        let counted = ledger.totals().usage;
        prop_assert_eq!(counted.sick + counted.casual + counted.uncategorized, expected);
    }

    /// LOP is counted once per approved application that starts in the year.
    #[test]
    fn prop_lop_counted_in_start_month(
        settings in settings_strategy(),
        specs in prop::collection::vec(application_strategy(), 0..12),
    ) {
        let applications = build_applications(&specs);
        let ledger = compute(&applications, &[], &settings);

        for month in 1..=12u32 {
            let expected: u32 = applications
                .iter()
                .filter(|a| a.is_approved())
                .filter(|a| a.start_date().year() == YEAR && a.start_date().month() == month)
                .map(|a| a.lop_days())
                .sum();
            prop_assert_eq!(ledger.entry(month).unwrap().lop_days, expected);
        }
    }

    /// Identical inputs produce byte-identical ledgers.
    #[test]
    fn prop_compute_is_idempotent(
        settings in settings_strategy(),
        specs in prop::collection::vec(application_strategy(), 0..8),
        records in overrides_strategy(),
    ) {
        let applications = build_applications(&specs);
        let first = compute(&applications, &records, &settings);
        let second = compute(&applications, &records, &settings);
        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }
}
