//! Interactive session state for the weekly grid.
//!
//! The terminal layer translates key presses into [`Action`]s and hands them
//! to [`App::handle`]; everything here is plain state so the whole
//! interaction model is unit-testable without a terminal.
//!
//! Every interaction runs one full pass: initialize the displayed week (a
//! no-op once its records exist), then fetch and rebuild the grid.
//! Initialization always completes before the fetch within a pass.

use crate::store::StatusStore;
use crate::sync::WeekSynchronizer;
use crate::week::WeekStart;

/// A user interaction, decoupled from the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Show the previous week.
    PreviousWeek,
    /// Jump back to the week containing today.
    CurrentWeek,
    /// Show the next week.
    NextWeek,
    /// Move the cursor one task up.
    MoveUp,
    /// Move the cursor one task down.
    MoveDown,
    /// Move the cursor one day left.
    MoveLeft,
    /// Move the cursor one day right.
    MoveRight,
    /// Toggle the checkbox under the cursor.
    Toggle,
    /// Exit the dashboard.
    Quit,
}

/// The dashboard session.
///
/// Holds the week pointer (reset to the current week on a fresh session,
/// mutated only by the three navigation actions), the cursor, and the grid
/// of stored statuses from the last fetch.
#[derive(Debug)]
pub struct App<S: StatusStore> {
    sync: WeekSynchronizer<S>,
    tasks: Vec<String>,
    week: WeekStart,
    cursor_row: usize,
    cursor_col: usize,
    grid: Vec<[bool; 7]>,
    warnings: Vec<String>,
}

impl<S: StatusStore> App<S> {
    /// Create a session showing the week containing today.
    pub fn new(sync: WeekSynchronizer<S>, tasks: Vec<String>) -> Self {
        Self::with_week(sync, tasks, WeekStart::current())
    }

    /// Create a session pinned to a specific week.
    pub fn with_week(sync: WeekSynchronizer<S>, tasks: Vec<String>, week: WeekStart) -> Self {
        let mut app = Self {
            sync,
            tasks,
            week,
            cursor_row: 0,
            cursor_col: 0,
            grid: Vec::new(),
            warnings: Vec::new(),
        };
        app.run_pass();
        app
    }

    /// The week currently displayed.
    pub const fn week(&self) -> WeekStart {
        self.week
    }

    /// The task names shown as rows.
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    /// The cursor position as (task row, day column).
    pub const fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// The stored status of one cell. Missing cells read as unchecked.
    pub fn is_done(&self, row: usize, col: usize) -> bool {
        self.grid.get(row).is_some_and(|days| days.get(col).copied().unwrap_or(false))
    }

    /// Warnings from the most recent interaction, for the footer line.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Apply one interaction. Returns false when the session should end.
    pub fn handle(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::PreviousWeek => {
                self.week = self.week.previous();
                self.run_pass();
            }
            Action::NextWeek => {
                self.week = self.week.next();
                self.run_pass();
            }
            Action::CurrentWeek => {
                self.week = WeekStart::current();
                self.run_pass();
            }
            Action::MoveUp => self.cursor_row = self.cursor_row.saturating_sub(1),
            Action::MoveDown => {
                if self.cursor_row + 1 < self.tasks.len() {
                    self.cursor_row += 1;
                }
            }
            Action::MoveLeft => self.cursor_col = self.cursor_col.saturating_sub(1),
            Action::MoveRight => {
                if self.cursor_col < 6 {
                    self.cursor_col += 1;
                }
            }
            Action::Toggle => self.toggle_cursor_cell(),
        }
        true
    }

    /// Toggle the cell under the cursor and write it through.
    fn toggle_cursor_cell(&mut self) {
        let Some(task) = self.tasks.get(self.cursor_row).cloned() else {
            return;
        };
        let stored = self.is_done(self.cursor_row, self.cursor_col);
        let date = self.week.days()[self.cursor_col];

        let mut warnings = self.sync.reconcile(&task, date, !stored, stored);
        self.run_pass();
        // Keep the reconcile warnings visible alongside any from the refresh
        warnings.append(&mut self.warnings);
        self.warnings = warnings;
    }

    /// One full top-to-bottom pass: initialize the week, fetch, rebuild.
    fn run_pass(&mut self) {
        let report = self.sync.ensure_week_initialized(&self.tasks, self.week);
        let outcome = self.sync.fetch_week(self.week);

        self.warnings = report.warnings;
        self.warnings.extend(outcome.warnings);

        let days = self.week.days();
        self.grid = self
            .tasks
            .iter()
            .map(|task| {
                let mut row = [false; 7];
                for (col, day) in days.iter().enumerate() {
                    row[col] = outcome
                        .records
                        .iter()
                        .any(|r| r.done && r.is_for(task, *day));
                }
                row
            })
            .collect();
    }
}
