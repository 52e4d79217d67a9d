//! Calculation logic for the worksheet engine.
//!
//! This module contains the schedule lookup, income adjustment, add-on
//! allocation, the primary custody worksheet (A), the shared custody
//! worksheet (B), and the case router that chooses between them.

mod add_on_allocation;
mod case_calculation;
mod income_adjustment;
mod primary_custody;
mod schedule_lookup;
mod shared_custody;

#[cfg(test)]
mod test_support;

pub use add_on_allocation::{
    ShareSplit, direct_pay_consistency_warning, direct_pay_total_for_parent, money_tolerance,
    split_by_share, total_add_ons,
};
pub use case_calculation::{NO_PAYOR_NOTE, calculate_case, calculate_case_with};
pub use income_adjustment::{
    BasicComputation, adjusted_actual_income, compute_basic, multifamily_allowance,
    multifamily_factor, zero_income_share,
};
pub use primary_custody::{
    ABOVE_TOP_NOTE, PrimaryComputation, PrimaryOutcome, PrimaryTotals, PrimaryWorksheet,
    WorksheetA, calculate_primary, compute_primary_totals,
};
pub use schedule_lookup::{LookupResult, LookupStatus, ScheduleRow, lookup_basic_obligation};
pub use shared_custody::{
    CapComparison, OvernightSplit, REDUCTION_BAND_END, REDUCTION_BAND_START, SharedComputation,
    SharedOutcome, SharedParentLine, SharedRedirect, calculate_shared, overnight_adjustment,
    shared_basic_multiplier, shared_threshold,
};
