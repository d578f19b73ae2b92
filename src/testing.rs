//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]

use crate::error::{Error, Result};
use crate::models::TaskStatusRecord;
use crate::store::StatusStore;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// A mock status store for testing.
///
/// Backs records with an in-memory map, counts calls per operation, and can
/// be scripted to fail the Nth write to simulate a partial storage outage.
#[derive(Debug, Default)]
pub struct MockStatusStore {
    records: RefCell<BTreeMap<(String, NaiveDate), bool>>,
    put_calls: RefCell<usize>,
    query_calls: RefCell<usize>,
    set_calls: RefCell<usize>,
    fail_on_write: RefCell<Option<usize>>,
    fail_queries: RefCell<bool>,
}

impl MockStatusStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the Nth write call (1-based, counting puts and updates together)
    /// fail with a storage fault. Later writes succeed again.
    pub fn fail_on_write(&self, nth: usize) {
        *self.fail_on_write.borrow_mut() = Some(nth);
    }

    /// Make every query call fail with a storage fault.
    pub fn fail_queries(&self) {
        *self.fail_queries.borrow_mut() = true;
    }

    /// Number of `put_default` calls made.
    pub fn put_call_count(&self) -> usize {
        *self.put_calls.borrow()
    }

    /// Number of `records_for_date` calls made.
    pub fn query_call_count(&self) -> usize {
        *self.query_calls.borrow()
    }

    /// Number of `set_done` calls made.
    pub fn set_call_count(&self) -> usize {
        *self.set_calls.borrow()
    }

    /// Total number of stored records.
    pub fn record_count(&self) -> usize {
        self.records.borrow().len()
    }

    /// Look up a record's status directly, bypassing the store API.
    pub fn status_of(&self, task_name: &str, task_date: NaiveDate) -> Option<bool> {
        self.records.borrow().get(&(task_name.to_string(), task_date)).copied()
    }

    fn injected_fault() -> Error {
        Error::Io(std::io::Error::other("injected storage fault"))
    }

    fn check_write_failure(&self, write_index: usize) -> Result<()> {
        if *self.fail_on_write.borrow() == Some(write_index) {
            return Err(Self::injected_fault());
        }
        Ok(())
    }
}

impl StatusStore for MockStatusStore {
    fn put_default(&self, task_name: &str, task_date: NaiveDate) -> Result<()> {
        *self.put_calls.borrow_mut() += 1;
        let write_index = *self.put_calls.borrow() + *self.set_calls.borrow();
        self.check_write_failure(write_index)?;

        self.records
            .borrow_mut()
            .entry((task_name.to_string(), task_date))
            .or_insert(false);
        Ok(())
    }

    fn records_for_date(&self, task_date: NaiveDate) -> Result<Vec<TaskStatusRecord>> {
        *self.query_calls.borrow_mut() += 1;
        if *self.fail_queries.borrow() {
            return Err(Self::injected_fault());
        }

        Ok(self
            .records
            .borrow()
            .iter()
            .filter(|((_, date), _)| *date == task_date)
            .map(|((name, date), done)| TaskStatusRecord {
                task_name: name.clone(),
                task_date: *date,
                done: *done,
            })
            .collect())
    }

    fn set_done(&self, task_name: &str, task_date: NaiveDate, done: bool) -> Result<bool> {
        *self.set_calls.borrow_mut() += 1;
        let write_index = *self.put_calls.borrow() + *self.set_calls.borrow();
        self.check_write_failure(write_index)?;

        match self.records.borrow_mut().get_mut(&(task_name.to_string(), task_date)) {
            Some(status) => {
                *status = done;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
