//! Schedule configuration types.
//!
//! This module contains the strongly-typed structures deserialized from a
//! schedule YAML file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ScheduleTable;

/// Descriptive metadata about a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Human-readable schedule name.
    pub name: String,
    /// The date the schedule took effect.
    pub effective_date: NaiveDate,
    /// Where the schedule was published.
    #[serde(default)]
    pub source_url: Option<String>,
}

/// A schedule file: metadata plus the obligation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Schedule metadata.
    pub metadata: ScheduleMetadata,
    /// The income/obligation table.
    pub table: ScheduleTable,
}
