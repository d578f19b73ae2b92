//! # `weekgrid`
//!
//! A weekly task-checklist dashboard: a terminal UI renders a grid of tasks
//! versus days-of-week, backed by a `SQLite` table that persists completion
//! status. The core is the [`sync::WeekSynchronizer`], which keeps the
//! displayed grid and the stored statuses in agreement.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod paths;
pub mod store;
pub mod sync;
pub mod testing;
#[cfg(feature = "tui")]
pub mod ui;
pub mod week;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
