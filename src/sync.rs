//! Weekly task state synchronization.
//!
//! The [`WeekSynchronizer`] owns the three operations behind every UI pass:
//! make sure a week's records exist, fetch them, and write toggles back.
//! Storage faults never escape as errors; each call site catches its own
//! fault and reports it as a human-readable warning so the UI can degrade
//! instead of crashing. No retries, no backoff.

use crate::models::TaskStatusRecord;
use crate::store::StatusStore;
use crate::week::WeekStart;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default freshness window for cached week fetches.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Outcome of initializing a week's records.
#[derive(Debug, Clone, Default)]
pub struct InitReport {
    /// Number of (task, date) keys attempted.
    pub attempted: usize,
    /// Human-readable messages for writes that failed.
    pub warnings: Vec<String>,
}

impl InitReport {
    /// Check if every write succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Outcome of fetching a week's records.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Records for the requested window, ordered by date then task name.
    pub records: Vec<TaskStatusRecord>,
    /// Human-readable messages for days that could not be read.
    pub warnings: Vec<String>,
    /// Whether the records were served from the cache.
    pub from_cache: bool,
}

/// A cached week fetch.
#[derive(Debug, Clone)]
struct CachedWeek {
    fetched_at: Instant,
    records: Vec<TaskStatusRecord>,
}

/// Synchronizes the displayed weekly grid with the status store.
///
/// The store is injected at construction so tests can substitute an
/// in-memory double for the SQLite table.
#[derive(Debug)]
pub struct WeekSynchronizer<S: StatusStore> {
    store: S,
    cache_ttl: Duration,
    cache: HashMap<WeekStart, CachedWeek>,
}

impl<S: StatusStore> WeekSynchronizer<S> {
    /// Create a synchronizer with the default cache freshness window.
    pub fn new(store: S) -> Self {
        Self::with_cache_ttl(store, DEFAULT_CACHE_TTL)
    }

    /// Create a synchronizer with a specific cache freshness window.
    ///
    /// A zero duration disables caching entirely.
    pub fn with_cache_ttl(store: S, cache_ttl: Duration) -> Self {
        Self { store, cache_ttl, cache: HashMap::new() }
    }

    /// Access the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Ensure a default record exists for every task on every day of the week.
    ///
    /// Idempotent: existing records keep their status, whatever it is. Best
    /// effort: a fault on one write is reported in the returned
    /// [`InitReport`] and the remaining writes still run.
    pub fn ensure_week_initialized(&self, tasks: &[String], week: WeekStart) -> InitReport {
        let mut report = InitReport::default();
        for task in tasks {
            for day in week.days() {
                report.attempted += 1;
                if let Err(e) = self.store.put_default(task, day) {
                    report
                        .warnings
                        .push(format!("could not initialize '{task}' for {day}: {e}"));
                }
            }
        }
        report
    }

    /// Fetch all records whose date falls within the week's 7-day window.
    ///
    /// Served from the cache while the entry is younger than the configured
    /// freshness window. A fault on one day's read is reported as a warning
    /// and that day contributes no records; degraded fetches are never
    /// cached.
    pub fn fetch_week(&mut self, week: WeekStart) -> FetchOutcome {
        if let Some(cached) = self.cache.get(&week) {
            if cached.fetched_at.elapsed() < self.cache_ttl {
                return FetchOutcome {
                    records: cached.records.clone(),
                    warnings: Vec::new(),
                    from_cache: true,
                };
            }
        }

        let mut outcome = FetchOutcome::default();
        for day in week.days() {
            match self.store.records_for_date(day) {
                Ok(mut records) => outcome.records.append(&mut records),
                Err(e) => outcome.warnings.push(format!("could not fetch {day}: {e}")),
            }
        }

        if outcome.warnings.is_empty() {
            self.cache.insert(
                week,
                CachedWeek { fetched_at: Instant::now(), records: outcome.records.clone() },
            );
        }

        outcome
    }

    /// Write a toggled checkbox back to storage.
    ///
    /// Issues exactly one storage write when `ui_checked` differs from
    /// `stored`, and none when they agree. A successful write evicts the
    /// cache entry for the containing week so the next fetch observes the
    /// new status. Returns warnings for any fault encountered.
    pub fn reconcile(
        &mut self,
        task_name: &str,
        date: chrono::NaiveDate,
        ui_checked: bool,
        stored: bool,
    ) -> Vec<String> {
        if ui_checked == stored {
            return Vec::new();
        }

        match self.store.set_done(task_name, date, ui_checked) {
            Ok(true) => {
                self.cache.remove(&WeekStart::containing(date));
                Vec::new()
            }
            Ok(false) => {
                vec![format!("no stored record for '{task_name}' on {date}")]
            }
            Err(e) => {
                vec![format!("could not update '{task_name}' on {date}: {e}")]
            }
        }
    }
}
