//! Application state for the worksheet engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, ScheduleMetadata};
use crate::models::ScheduleTable;

/// Shared application state.
///
/// Holds the schedule loaded at startup. Every request reads the same
/// immutable table.
#[derive(Clone)]
pub struct AppState {
    schedule: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates application state around a loaded schedule.
    pub fn new(schedule: ConfigLoader) -> Self {
        Self {
            schedule: Arc::new(schedule),
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.schedule.metadata()
    }

    /// Returns the obligation table.
    pub fn table(&self) -> &ScheduleTable {
        self.schedule.table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_schedule() {
        let loader = ConfigLoader::from_yaml_str(
            "metadata:\n  name: Shared\n  effective_date: 2025-07-01\n\
             table:\n  incomes: [1000]\n  obligations:\n    1: [150]\n",
            "inline",
        )
        .unwrap();
        let state = AppState::new(loader);
        let clone = state.clone();

        assert!(std::ptr::eq(state.table(), clone.table()));
        assert_eq!(clone.metadata().name, "Shared");
    }
}
