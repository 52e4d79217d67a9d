//! Core data models for the worksheet engine.
//!
//! This module contains the case inputs, schedule table and result types
//! shared by every calculation stage.

mod add_ons;
mod case_inputs;
mod case_outputs;
mod parent;
mod schedule_table;

pub use add_ons::AddOnSet;
pub use case_inputs::{CaseInputs, CustodyType, DirectPayments, NIGHTS_PER_YEAR};
pub use case_outputs::{Advisory, CaseOutputs, Worksheet, WorksheetPath};
pub use parent::{Parent, ParentIncome};
pub use schedule_table::ScheduleTable;
