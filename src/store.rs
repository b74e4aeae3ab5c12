//! Store seams for the ledger's external collaborators.
//!
//! The engine never persists anything. It reads approved applications,
//! overrides and settings through the traits below and hands back a computed
//! [`YearLedger`]. [`InMemoryStore`] implements every seam and is what the
//! tests and the HTTP adapter's callers use when no database is attached.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::calculation::compute_year;
use crate::config::{ConfigLoader, LeaveSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveApplication, LeaveBalanceOverride, MonthlyOverrides, YearLedger};

/// Source of approved leave applications.
pub trait ApplicationStore: Send + Sync {
    /// Returns the applicant's approved applications overlapping `year`.
    fn fetch_approved_applications(
        &self,
        applicant_id: &str,
        year: i32,
    ) -> EngineResult<Vec<LeaveApplication>>;
}

/// Source of administrator balance overrides.
pub trait OverrideStore: Send + Sync {
    /// Returns the applicant's override records for `year`, at most one per month.
    fn fetch_overrides(
        &self,
        applicant_id: &str,
        year: i32,
    ) -> EngineResult<Vec<LeaveBalanceOverride>>;
}

/// Source of the process-wide leave settings.
pub trait SettingsSource: Send + Sync {
    /// Returns the settings to use for one computation.
    fn fetch_settings(&self) -> EngineResult<LeaveSettings>;
}

impl<T: ApplicationStore + ?Sized> ApplicationStore for Arc<T> {
    fn fetch_approved_applications(
        &self,
        applicant_id: &str,
        year: i32,
    ) -> EngineResult<Vec<LeaveApplication>> {
        (**self).fetch_approved_applications(applicant_id, year)
    }
}

impl<T: OverrideStore + ?Sized> OverrideStore for Arc<T> {
    fn fetch_overrides(
        &self,
        applicant_id: &str,
        year: i32,
    ) -> EngineResult<Vec<LeaveBalanceOverride>> {
        (**self).fetch_overrides(applicant_id, year)
    }
}

impl SettingsSource for ConfigLoader {
    fn fetch_settings(&self) -> EngineResult<LeaveSettings> {
        Ok(*self.settings())
    }
}

impl SettingsSource for LeaveSettings {
    fn fetch_settings(&self) -> EngineResult<LeaveSettings> {
        Ok(*self)
    }
}

fn poisoned() -> EngineError {
    EngineError::StoreError {
        message: "in-memory store lock poisoned".to_string(),
    }
}

/// A process-local store of applications and overrides.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    applications: RwLock<Vec<LeaveApplication>>,
    overrides: RwLock<HashMap<(String, i32), Vec<LeaveBalanceOverride>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an application, keyed by its ID.
    pub fn upsert_application(&self, application: LeaveApplication) -> EngineResult<()> {
        let mut applications = self.applications.write().map_err(|_| poisoned())?;
        match applications.iter_mut().find(|a| a.id() == application.id()) {
            Some(existing) => *existing = application,
            None => applications.push(application),
        }
        Ok(())
    }

    /// Approves a stored application with the administrator's paid days.
    ///
    /// The split and the status change are written under one lock, so a
    /// concurrent ledger read never sees an approved application with a stale
    /// split.
    pub fn approve_application(
        &self,
        application_id: &str,
        proposed_paid_days: i64,
    ) -> EngineResult<LeaveApplication> {
        let mut applications = self.applications.write().map_err(|_| poisoned())?;
        let slot = applications
            .iter_mut()
            .find(|a| a.id() == application_id)
            .ok_or_else(|| EngineError::StoreError {
                message: format!("leave application not found: {}", application_id),
            })?;

        let approved = slot.clone().approve(proposed_paid_days);
        *slot = approved.clone();

        info!(
            application_id,
            paid_days = approved.paid_days(),
            lop_days = approved.lop_days(),
            "Leave application approved"
        );
        Ok(approved)
    }

    /// Saves an override record, replacing any existing record for the same month.
    pub fn save_override(
        &self,
        applicant_id: &str,
        year: i32,
        record: LeaveBalanceOverride,
    ) -> EngineResult<()> {
        if !(1..=12).contains(&record.month) {
            return Err(EngineError::InvalidMonth {
                month: record.month,
            });
        }

        let mut overrides = self.overrides.write().map_err(|_| poisoned())?;
        let records = overrides
            .entry((applicant_id.to_string(), year))
            .or_default();
        records.retain(|r| r.month != record.month);
        records.push(record);
        Ok(())
    }
}

impl ApplicationStore for InMemoryStore {
    fn fetch_approved_applications(
        &self,
        applicant_id: &str,
        year: i32,
    ) -> EngineResult<Vec<LeaveApplication>> {
        let applications = self.applications.read().map_err(|_| poisoned())?;
        Ok(applications
            .iter()
            .filter(|a| a.applicant_id() == applicant_id && a.is_approved() && a.overlaps_year(year))
            .cloned()
            .collect())
    }
}

impl OverrideStore for InMemoryStore {
    fn fetch_overrides(
        &self,
        applicant_id: &str,
        year: i32,
    ) -> EngineResult<Vec<LeaveBalanceOverride>> {
        let overrides = self.overrides.read().map_err(|_| poisoned())?;
        Ok(overrides
            .get(&(applicant_id.to_string(), year))
            .cloned()
            .unwrap_or_default())
    }
}

/// Fetches ledger inputs from the stores and computes ledgers.
pub struct LedgerService<A, O, S> {
    applications: A,
    overrides: O,
    settings: S,
}

impl<A, O, S> LedgerService<A, O, S>
where
    A: ApplicationStore,
    O: OverrideStore,
    S: SettingsSource,
{
    /// Creates a service over the given stores.
    pub fn new(applications: A, overrides: O, settings: S) -> Self {
        Self {
            applications,
            overrides,
            settings,
        }
    }

    /// Computes one applicant's ledger for `year`.
    ///
    /// Inputs are snapshotted once; concurrent override writes are not
    /// detected here.
    pub fn compute(&self, applicant_id: &str, year: i32) -> EngineResult<YearLedger> {
        let settings = self.settings.fetch_settings()?;

        let applications = self
            .applications
            .fetch_approved_applications(applicant_id, year)?;
        let records = self.overrides.fetch_overrides(applicant_id, year)?;
        let overrides = MonthlyOverrides::from_records(&records, settings.override_detection)?;

        let ledger = compute_year(applicant_id, year, &applications, &overrides, &settings);
        if !ledger.warnings.is_empty() {
            warn!(
                applicant_id,
                year,
                warnings = ledger.warnings.len(),
                "Ledger computed with warnings"
            );
        }
        Ok(ledger)
    }

    /// Computes ledgers for several applicants in parallel.
    ///
    /// Applicants share no mutable state, so each ledger is computed on the
    /// rayon pool. Results are returned in the order of `applicant_ids`.
    pub fn compute_many(
        &self,
        applicant_ids: &[String],
        year: i32,
    ) -> Vec<(String, EngineResult<YearLedger>)> {
        applicant_ids
            .par_iter()
            .map(|id| (id.clone(), self.compute(id, year)))
            .collect()
    }
}
